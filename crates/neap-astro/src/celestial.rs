// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
// SPDX-FileCopyrightText: 2025 Angus Morrison <github@angus-morrison.com>
//
// SPDX-License-Identifier: MPL-2.0

/*!
    Module `celestial` derives Doodson's six celestial variables from the
    fundamental lunisolar arguments, and builds on them to compute tidal
    frequencies and the astronomical argument of any constituent.

    The celestial vector is `[τ, s, h, p, N', pₛ]`:

    - τ — mean lunar time
    - s — mean longitude of the Moon
    - h — mean longitude of the Sun
    - p — mean longitude of the lunar perigee
    - N' — negative mean longitude of the ascending lunar node
    - pₛ — mean longitude of the solar perigee

    All components are reported in degrees, normalized to [-180, 180).
*/

use std::f64::consts::TAU;

use neap_math::constants::f64::time::{
    DAYS_PER_JULIAN_CENTURY, HOURS_PER_DAY, JD_J2000, MJD_TO_JD_OFFSET, SECONDS_PER_DAY,
};
use neap_math::math::normalize_degrees_signed;
use neap_math::types::julian_dates::ModifiedJulianDate;
use neap_math::types::units::{Degrees, DegreesPerHour, Seconds};

use crate::fundamental::fundamental_arguments;

/// Epoch at which tidal frequencies are evaluated.
const FREQUENCY_EPOCH: ModifiedJulianDate = 51545.0;

/// Step of the central difference used for tidal frequencies, in days.
const FREQUENCY_STEP: f64 = 0.05;

/// Doodson's six celestial variables at `time` (UT), given `delta` = ΔT in
/// seconds.
pub fn celestial_vector(time: ModifiedJulianDate, delta: Seconds) -> [Degrees; 6] {
    let time_tt = time + delta / SECONDS_PER_DAY;
    let centuries = (time_tt + MJD_TO_JD_OFFSET - JD_J2000) / DAYS_PER_JULIAN_CENTURY;
    let [l, lp, f, d, omega] = fundamental_arguments(centuries);
    let s = f + omega;
    let h = f + omega - d;
    let p = f + omega - l;
    let n_prime = -omega;
    let p_sun = -lp + f - d + omega;
    let tau = TAU * (time - time.floor()) - s + h;
    [tau, s, h, p, n_prime, p_sun].map(|angle| normalize_degrees_signed(angle.to_degrees()))
}

/// The angular speed of a constituent with the given six Doodson
/// multipliers, in degrees per hour, evaluated by central difference of the
/// celestial vector around J2000.
pub fn tidal_frequency(doodson: [i8; 6]) -> DegreesPerHour {
    let before = celestial_vector(FREQUENCY_EPOCH, 0.0);
    let after = celestial_vector(FREQUENCY_EPOCH + FREQUENCY_STEP, 0.0);
    let degrees: Degrees = before
        .iter()
        .zip(after)
        .zip(doodson)
        .map(|((b, a), n)| (a - b) * n as f64)
        .sum();
    degrees / (HOURS_PER_DAY * FREQUENCY_STEP)
}

/// The astronomical (Doodson) argument of a constituent at `time`, in
/// degrees normalized to [-180, 180).
///
/// The seventh multiplier encodes a phase offset in quarter turns and
/// contributes `90° * k₇` to the sum.
pub fn doodson_argument(time: ModifiedJulianDate, delta: Seconds, doodson: [i8; 7]) -> Degrees {
    let vector = celestial_vector(time, delta);
    let argument: Degrees = vector
        .iter()
        .zip(doodson)
        .map(|(angle, n)| angle * n as f64)
        .sum::<f64>()
        + 90.0 * doodson[6] as f64;
    normalize_degrees_signed(argument)
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;
    use rstest::rstest;

    use super::*;

    // 1983-02-05, with ΔT taken from the observed IERS series.
    const TIME: ModifiedJulianDate = 45335.0;
    const DELTA: Seconds = 53.026754231840584;

    #[test]
    fn test_celestial_vector() {
        let expected = [
            160.59900704910373,
            119.4907876655474,
            -79.91020528534887,
            111.5928443590156,
            -93.86098546634287,
            -77.35496535824757,
        ];
        let vector = celestial_vector(TIME, DELTA);
        for (component, expected) in vector.iter().zip(expected) {
            assert_float_eq!(*component, expected, abs <= 1e-10);
        }
    }

    #[test]
    fn test_celestial_vector_is_normalized() {
        for year in 0..45 {
            let time = 41317.0 + year as f64 * 365.25 + 0.73;
            for component in celestial_vector(time, 60.0) {
                assert!((-180.0..180.0).contains(&component));
            }
        }
    }

    #[rstest]
    #[case::q1([1, -2, 0, 1, 0, 0], 13.398660900971143)]
    #[case::o1([1, -1, 0, 0, 0, 0], 13.943035605263933)]
    #[case::k1([1, 1, 0, 0, 0, 0], 15.041068640634329)]
    #[case::n2([2, -1, 0, 1, 0, 0], 28.43972954160547)]
    #[case::m2([2, 0, 0, 0, 0, 0], 28.984104245898262)]
    #[case::s2([2, 2, -2, 0, 0, 0], 30.0000000017462)]
    #[case::node([0, 0, 0, 0, 1, 0], 0.0022064068614113803)]
    #[case::mm([0, 1, 0, -1, 0, 0], 0.54437470429279)]
    #[case::mf([0, 2, 0, 0, 0, 0], 1.0980330353703966)]
    fn test_tidal_frequency(#[case] doodson: [i8; 6], #[case] expected: DegreesPerHour) {
        assert_float_eq!(tidal_frequency(doodson), expected, rel <= 1e-9);
    }

    #[test]
    fn test_doodson_argument_node() {
        // The lunar node tide: N' plus a half-turn phase offset.
        let argument = doodson_argument(TIME, DELTA, [0, 0, 0, 0, 1, 0, 2]);
        assert_float_eq!(argument, 86.139014533657019, abs <= 1e-10);
    }

    #[test]
    fn test_doodson_argument_is_normalized() {
        let argument = doodson_argument(TIME, DELTA, [2, 0, 0, 0, 0, 0, 0]);
        assert!((-180.0..180.0).contains(&argument));
    }
}
