// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
// SPDX-FileCopyrightText: 2025 Angus Morrison <github@angus-morrison.com>
//
// SPDX-License-Identifier: MPL-2.0

/*!
    Module `delta_t` approximates ΔT = ET − UT, the excess of ephemeris time
    over universal time, with the piecewise polynomial expressions of
    Espenak and Meeus for the years 1700-2150.

    Reference: Espenak, F., & Meeus, J. (2006). Five Millennium Canon of
    Solar Eclipses: -1999 to +3000. NASA/TP-2006-214141.
*/

use fast_polynomial::poly_array;
use thiserror::Error;

use neap_math::types::julian_dates::JulianDate;
use neap_math::types::units::Seconds;

/// Error type returned for dates outside the supported 1700-2150 span.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("ΔT is only defined for years 1700-2150, but the year was {year}")]
pub struct DeltaTOutOfRangeError {
    pub year: i64,
}

/// ΔT in seconds at the given Julian Date.
///
/// # Errors
///
/// - [DeltaTOutOfRangeError] if the date falls outside 1700-2150.
pub fn delta_t(julian_date: JulianDate) -> Result<Seconds, DeltaTOutOfRangeError> {
    let year = ((julian_date - 2415020.0) / 365.25).round() as i64 + 1900;
    if !(1700..=2150).contains(&year) {
        return Err(DeltaTOutOfRangeError { year });
    }
    let y = year as f64;
    let seconds = match year {
        1700..1800 => poly_array(
            y - 1700.0,
            &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1174000.0],
        ),
        1800..1860 => poly_array(
            y - 1800.0,
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
        ),
        1860..1900 => poly_array(
            y - 1860.0,
            &[
                7.62,
                0.5737,
                -0.251754,
                0.01680668,
                -0.0004473624,
                1.0 / 233174.0,
            ],
        ),
        1900..1920 => poly_array(
            y - 1900.0,
            &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197],
        ),
        1920..1941 => poly_array(y - 1920.0, &[21.20, 0.84493, -0.076100, 0.0020936]),
        1941..1961 => poly_array(y - 1941.0, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0]),
        1961..1986 => poly_array(y - 1961.0, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0]),
        1986..2005 => poly_array(
            y - 2000.0,
            &[
                63.86,
                0.3345,
                -0.060374,
                0.0017275,
                0.000651814,
                0.00002373599,
            ],
        ),
        2005..2050 => poly_array(y - 2000.0, &[62.92, 0.32217, 0.0055589]),
        _ => {
            let u = (y - 1820.0) / 100.0;
            -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
        }
    };
    Ok(seconds)
}
