// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
// SPDX-FileCopyrightText: 2025 Angus Morrison <github@angus-morrison.com>
//
// SPDX-License-Identifier: MPL-2.0

/*!
    Module `evaluator` provides [Predictor], which drives the per-point
    pipeline — grid interpolation, admittance inference, astronomical
    argument update, harmonic summation — over batches of query points.

    Batches parallelize over the point axis with rayon. Every worker owns a
    private scratch pair of constituent table and accelerator and walks its
    points in input order, so the spatial and temporal caches hit whenever
    consecutive points are nearby. The model itself is shared read-only and
    no locks are taken on the hot path.
*/

use rayon::prelude::*;
use thiserror::Error;

use neap_astro::delta_t::DeltaTOutOfRangeError;
use neap_astro::epoch::epoch_to_modified_julian_date;
use neap_constituents::table::{tide_components, ConstituentTable, TideComponent};
use neap_constituents::Species;
use neap_math::types::julian_dates::ModifiedJulianDate;
use neap_math::types::units::{Degrees, Meters, Seconds};

use crate::accelerator::Accelerator;
use crate::inference::{Admittance, Inference};
use crate::model::{GridElement, Quality, TidalModel};

/// Evaluation settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// Seconds within which a worker reuses its astronomical state.
    pub time_tolerance: Seconds,
    /// Admittance interpolation used to infer minor constituents, or `None`
    /// to disable inference.
    pub admittance: Option<Admittance>,
    /// Use the group-modulated nodal corrections.
    pub group_modulations: bool,
    /// Number of worker threads; 0 picks the rayon default.
    pub num_threads: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_tolerance: 0.0,
            admittance: Some(Admittance::Linear),
            group_modulations: false,
            num_threads: 0,
        }
    }
}

/// Per-batch outputs, indexed by input position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Prediction {
    /// Short-period tide, in meters. NaN where quality is undefined.
    pub tide: Vec<Meters>,
    /// Long-period tide, in meters. NaN where quality is undefined.
    pub tide_lp: Vec<Meters>,
    /// Interpolation quality per point.
    pub quality: Vec<Quality>,
}

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(
        "input arrays must have equal lengths, but were lon: {lon}, lat: {lat}, time: {time}"
    )]
    SizeMismatch { lon: usize, lat: usize, time: usize },
    #[error(transparent)]
    DeltaT(#[from] DeltaTOutOfRangeError),
    #[error("could not build the worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Private per-worker state: the mutable constituent table and accelerator
/// that travel together through a run of points.
struct Scratch {
    table: ConstituentTable<TideComponent>,
    accelerator: Accelerator,
}

/// The tide prediction driver.
pub struct Predictor<'a, T: GridElement> {
    model: &'a TidalModel<T>,
    settings: Settings,
    inference: Option<Inference>,
}

impl<'a, T: GridElement> Predictor<'a, T> {
    pub fn new(model: &'a TidalModel<T>, settings: Settings) -> Self {
        let inference = settings.admittance.map(Inference::new);
        Self {
            model,
            settings,
            inference,
        }
    }

    fn scratch(&self) -> Scratch {
        let mut table = tide_components();
        for (constituent, component) in table.iter_mut() {
            component.is_inferred = !self.model.provides(constituent);
        }
        Scratch {
            table,
            accelerator: Accelerator::new(self.settings.time_tolerance),
        }
    }

    /// Predicts the tide at a single point.
    fn evaluate_point(
        &self,
        scratch: &mut Scratch,
        lon: Degrees,
        lat: Degrees,
        time: ModifiedJulianDate,
    ) -> Result<(Meters, Meters, Quality), DeltaTOutOfRangeError> {
        let quality =
            self.model
                .interpolate(lon, lat, &mut scratch.table, &mut scratch.accelerator);
        if quality == Quality::Undefined {
            return Ok((f64::NAN, f64::NAN, quality));
        }
        if let Some(inference) = &self.inference {
            inference.apply(&mut scratch.table, lat);
        }
        scratch.accelerator.update_args(
            time,
            self.settings.group_modulations,
            &mut scratch.table,
        )?;

        let corrections = scratch.accelerator.corrections();
        let mut tide = 0.0;
        let mut tide_lp = 0.0;
        for (constituent, component) in scratch.table.iter() {
            let correction = corrections[constituent];
            let x = (component.tidal_argument + correction.u).to_radians();
            let height =
                correction.f * (component.tide.re * x.cos() - component.tide.im * x.sin());
            match component.species {
                Species::LongPeriod => tide_lp += height,
                Species::ShortPeriod => tide += height,
            }
        }
        Ok((tide, tide_lp, quality))
    }

    /// Predicts the tide for a batch of query points given as longitudes,
    /// latitudes and epochs in microseconds since 1970-01-01 UTC.
    ///
    /// # Errors
    ///
    /// - [PredictionError::SizeMismatch] if the input lengths differ.
    /// - [PredictionError::DeltaT] if any epoch falls outside 1700-2150.
    pub fn evaluate(
        &self,
        lon: &[Degrees],
        lat: &[Degrees],
        epochs: &[i64],
    ) -> Result<Prediction, PredictionError> {
        if lon.len() != lat.len() || lon.len() != epochs.len() {
            return Err(PredictionError::SizeMismatch {
                lon: lon.len(),
                lat: lat.len(),
                time: epochs.len(),
            });
        }
        let count = lon.len();
        let mut tide = vec![0.0; count];
        let mut tide_lp = vec![0.0; count];
        let mut quality = vec![Quality::Undefined; count];

        let mut run = || -> Result<(), PredictionError> {
            let chunk = count.div_ceil(4 * rayon::current_num_threads()).max(1);
            tide.par_chunks_mut(chunk)
                .zip(tide_lp.par_chunks_mut(chunk))
                .zip(quality.par_chunks_mut(chunk))
                .zip(lon.par_chunks(chunk))
                .zip(lat.par_chunks(chunk))
                .zip(epochs.par_chunks(chunk))
                .try_for_each(|(((((tide, tide_lp), quality), lon), lat), epochs)| {
                    let mut scratch = self.scratch();
                    for index in 0..lon.len() {
                        let time = epoch_to_modified_julian_date(epochs[index]);
                        let (t, t_lp, q) =
                            self.evaluate_point(&mut scratch, lon[index], lat[index], time)?;
                        tide[index] = t;
                        tide_lp[index] = t_lp;
                        quality[index] = q;
                    }
                    Ok(())
                })
        };

        if self.settings.num_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.settings.num_threads)
                .build()?;
            pool.install(run)?;
        } else {
            run()?;
        }

        Ok(Prediction {
            tide,
            tide_lp,
            quality,
        })
    }
}
