// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
//
// SPDX-License-Identifier: MPL-2.0

//! Conversions from the Unix epoch to Modified Julian Dates.

use neap_math::constants::f64::time::{MJD_UNIX_EPOCH, SECONDS_PER_DAY};
use neap_math::types::julian_dates::ModifiedJulianDate;

const MICROSECONDS_PER_DAY: f64 = SECONDS_PER_DAY * 1e6;

/// Converts microseconds since 1970-01-01T00:00:00 UTC to a Modified Julian
/// Date.
#[inline]
pub fn epoch_to_modified_julian_date(microseconds: i64) -> ModifiedJulianDate {
    microseconds as f64 / MICROSECONDS_PER_DAY + MJD_UNIX_EPOCH
}
