// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
// SPDX-FileCopyrightText: 2025 Angus Morrison <github@angus-morrison.com>
//
// SPDX-License-Identifier: MPL-2.0

/*!
    Module `love` provides frequency-dependent degree-2 body Love numbers.

    Outside the diurnal band the elastic values are constant. Inside it, the
    free core nutation resonance pulls the Love numbers down towards K1, and
    the triple is evaluated with a single-pole resonance expansion in the
    tradition of Mathews et al. (1995).
*/

use neap_math::types::units::DegreesPerHour;

/// Degree-2 body Love numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoveNumbers {
    pub k2: f64,
    pub h2: f64,
    pub l2: f64,
}

/// Elastic values used below the diurnal band (< 5°/h).
const LONG_PERIOD: LoveNumbers = LoveNumbers {
    k2: 0.299,
    h2: 0.606,
    l2: 0.0840,
};

/// Elastic values used above the diurnal band (> 22°/h).
const SEMIDIURNAL: LoveNumbers = LoveNumbers {
    k2: 0.302,
    h2: 0.609,
    l2: 0.0852,
};

/// Frequency of the free core nutation resonance, in degrees per hour.
const RESONANCE_FREQUENCY: DegreesPerHour = 15.0737;

/// Resonance strengths of k₂, h₂ and l₂.
const RESONANCE_K2: f64 = -0.00399969442281297;
const RESONANCE_H2: f64 = -0.009678777015864113;
const RESONANCE_L2: f64 = -0.00041162964282603063;

/// Body Love numbers at the given tidal frequency.
pub fn love_numbers(frequency: DegreesPerHour) -> LoveNumbers {
    if frequency < 5.0 {
        return LONG_PERIOD;
    }
    if frequency > 22.0 {
        return SEMIDIURNAL;
    }
    let resonance = (RESONANCE_FREQUENCY - frequency).recip();
    LoveNumbers {
        k2: LONG_PERIOD.k2 + RESONANCE_K2 * resonance,
        h2: LONG_PERIOD.h2 + RESONANCE_H2 * resonance,
        l2: LONG_PERIOD.l2 + RESONANCE_L2 * resonance,
    }
}
