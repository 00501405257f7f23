// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
// SPDX-FileCopyrightText: 2025 Angus Morrison <github@angus-morrison.com>
//
// SPDX-License-Identifier: MPL-2.0

/*!
    Module `accelerator` provides the per-evaluation scratchpad that makes
    bulk altimetry workloads cheap: consecutive query points are usually
    close in space and time, so the last grid cell's interpolated values and
    the last epoch's astronomical state are cached and reused.

    An [Accelerator] is owned by a single worker and never shared.
*/

use num::complex::Complex64;

use neap_astro::celestial::celestial_vector;
use neap_astro::delta_t::{delta_t, DeltaTOutOfRangeError};
use neap_constituents::nodal::{group_modulations, nodal_corrections, NodalCorrection};
use neap_constituents::table::{ConstituentTable, TideComponent};
use neap_constituents::Constituent;
use neap_math::constants::f64::time::{MJD_TO_JD_OFFSET, SECONDS_PER_DAY};
use neap_math::math::normalize_degrees_signed;
use neap_math::types::julian_dates::ModifiedJulianDate;
use neap_math::types::units::{Degrees, Seconds};

use crate::model::Quality;

/// Per-evaluation cache of grid-cell values and astronomical state.
#[derive(Clone, Debug)]
pub struct Accelerator {
    time_tolerance: Seconds,
    cell: Option<[f64; 4]>,
    values: Vec<(Constituent, Complex64)>,
    quality: Quality,
    time: Option<ModifiedJulianDate>,
    delta: Seconds,
    vector: [Degrees; 6],
    corrections: ConstituentTable<NodalCorrection>,
}

impl Accelerator {
    /// Creates an empty accelerator. The astronomical state is reused while
    /// consecutive epochs stay within `time_tolerance` seconds.
    pub fn new(time_tolerance: Seconds) -> Self {
        Self {
            time_tolerance,
            cell: None,
            values: Vec::new(),
            quality: Quality::Undefined,
            time: None,
            delta: 0.0,
            vector: [0.0; 6],
            corrections: ConstituentTable::from_fn(|_| NodalCorrection::UNITY),
        }
    }

    /// ΔT at the cached epoch, in seconds.
    pub fn delta(&self) -> Seconds {
        self.delta
    }

    /// The cached celestial vector `[τ, s, h, p, N', pₛ]`.
    pub fn celestial_vector(&self) -> &[Degrees; 6] {
        &self.vector
    }

    /// Nodal corrections at the cached epoch, in catalogue order.
    pub fn corrections(&self) -> &ConstituentTable<NodalCorrection> {
        &self.corrections
    }

    pub(crate) fn clear_cell(&mut self) {
        self.cell = None;
        self.values.clear();
    }

    /// Replays the cached interpolation if `cell` matches the cached cell.
    pub(crate) fn replay_cell(
        &self,
        cell: &[f64; 4],
        table: &mut ConstituentTable<TideComponent>,
    ) -> Option<Quality> {
        if self.cell.as_ref() != Some(cell) {
            return None;
        }
        for (constituent, value) in &self.values {
            table[*constituent].tide = *value;
        }
        Some(self.quality)
    }

    pub(crate) fn store_cell(
        &mut self,
        cell: [f64; 4],
        values: Vec<(Constituent, Complex64)>,
        quality: Quality,
    ) {
        self.cell = Some(cell);
        self.values = values;
        self.quality = quality;
    }

    /// Refreshes ΔT, the celestial vector, the nodal corrections and every
    /// constituent's astronomical argument for the given epoch.
    ///
    /// A no-op while `time` stays within the accelerator's tolerance of the
    /// cached epoch.
    ///
    /// # Errors
    ///
    /// - [DeltaTOutOfRangeError] if the epoch falls outside 1700-2150.
    pub fn update_args(
        &mut self,
        time: ModifiedJulianDate,
        group_modulated: bool,
        table: &mut ConstituentTable<TideComponent>,
    ) -> Result<(), DeltaTOutOfRangeError> {
        if let Some(cached) = self.time {
            if (time - cached).abs() * SECONDS_PER_DAY <= self.time_tolerance {
                return Ok(());
            }
        }
        self.delta = delta_t(time + MJD_TO_JD_OFFSET)?;
        self.vector = celestial_vector(time, self.delta);

        let solar_longitude = self.vector[2];
        let perigee = self.vector[3];
        let omega = -self.vector[4];
        let perihelion = self.vector[5];
        self.corrections = if group_modulated {
            group_modulations(perihelion, omega, perigee, solar_longitude)
        } else {
            nodal_corrections(omega, perigee)
        };

        for (_, component) in table.iter_mut() {
            let doodson = component.doodson_number;
            let argument: Degrees = self
                .vector
                .iter()
                .zip(doodson)
                .map(|(angle, n)| angle * n as f64)
                .sum::<f64>()
                + 90.0 * doodson[6] as f64;
            component.tidal_argument = normalize_degrees_signed(argument);
        }
        self.time = Some(time);
        Ok(())
    }
}
