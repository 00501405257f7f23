// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
// SPDX-FileCopyrightText: 2025 Angus Morrison <github@angus-morrison.com>
//
// SPDX-License-Identifier: MPL-2.0

/*!
    # neap

    `neap` predicts ocean tide heights from a gridded harmonic model.
    Given per-constituent complex amplitudes on a longitude × latitude grid
    and a batch of (longitude, latitude, time) query points, it interpolates
    the harmonic constants, infers minor constituents by admittance, applies
    astronomical arguments and nodal corrections, and sums the short- and
    long-period tides at each point.

    The gridded [TidalModel] is shared and read-only; every worker owns a
    private scratch pair of constituent table and [Accelerator], so batches
    parallelize over points without locks.
*/

pub mod accelerator;
pub mod evaluator;
pub mod inference;
pub mod model;

pub use accelerator::Accelerator;
pub use evaluator::{Prediction, PredictionError, Predictor, Settings};
pub use inference::{Admittance, Inference, PrimaryInput};
pub use model::{GridElement, InvalidShapeError, Quality, TidalModel};

pub use neap_constituents::{Constituent, Species};
pub use neap_math::axis::{Axis, InvalidAxisError};
