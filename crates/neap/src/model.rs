// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
// SPDX-FileCopyrightText: 2025 Angus Morrison <github@angus-morrison.com>
//
// SPDX-License-Identifier: MPL-2.0

/*!
    Module `model` provides [TidalModel], the shared, read-only gridded
    harmonic model, and its quality-graded bilinear interpolator.

    A model stores one flat complex grid per provided constituent, either in
    `f32` or `f64` precision. Interpolation at a query point blends the four
    surrounding corners, treating NaN cells as a land mask; the number of
    corners that contributed is reported as a [Quality] grade.
*/

use num::complex::Complex64;
use num::Complex;
use thiserror::Error;

use neap_constituents::table::{ConstituentTable, TideComponent};
use neap_constituents::Constituent;
use neap_math::axis::Axis;
use neap_math::interpolation::{bilinear, bilinear_weights};
use neap_math::math::normalize_degrees_from;
use neap_math::types::units::Degrees;

use crate::accelerator::Accelerator;

mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Grid cell element precision. Implemented for `f32` and `f64` only.
pub trait GridElement: private::Sealed + Copy + Send + Sync + 'static {
    fn as_f64(self) -> f64;
}

impl GridElement for f32 {
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl GridElement for f64 {
    fn as_f64(self) -> f64 {
        self
    }
}

/// How many grid corners contributed to an interpolated value.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
#[repr(i8)]
pub enum Quality {
    /// The point is outside the grid or fully masked; outputs are NaN.
    #[default]
    Undefined = 0,
    /// Extrapolated from a single corner.
    Extrapolated1 = 1,
    /// Extrapolated from two corners.
    Extrapolated2 = 2,
    /// Extrapolated from three corners.
    Extrapolated3 = 3,
    /// Interpolated from all four corners.
    Interpolated = 4,
}

impl Quality {
    fn from_contributors(contributors: usize) -> Self {
        match contributors {
            4 => Quality::Interpolated,
            3 => Quality::Extrapolated3,
            2 => Quality::Extrapolated2,
            1 => Quality::Extrapolated1,
            _ => Quality::Undefined,
        }
    }

    /// The wire-exposed quality code.
    pub fn code(self) -> i8 {
        self as i8
    }
}

/// Error returned when a wave grid does not match the model axes.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error(
    "wave shape ({rows}, {columns}) does not match the model grid \
     ({expected_rows}, {expected_columns})"
)]
pub struct InvalidShapeError {
    pub rows: usize,
    pub columns: usize,
    pub expected_rows: usize,
    pub expected_columns: usize,
}

/// A shared, read-only gridded harmonic tide model.
#[derive(Clone, Debug)]
pub struct TidalModel<T: GridElement> {
    longitude: Axis,
    latitude: Axis,
    row_major: bool,
    waves: Vec<(Constituent, Vec<Complex<T>>)>,
}

impl<T: GridElement> TidalModel<T> {
    /// Creates an empty model over the given axes.
    ///
    /// `row_major` declares that rows of subsequently added waves span the
    /// longitude dimension.
    pub fn new(longitude: Axis, latitude: Axis, row_major: bool) -> Self {
        Self {
            longitude,
            latitude,
            row_major,
            waves: Vec::new(),
        }
    }

    pub fn longitude(&self) -> &Axis {
        &self.longitude
    }

    pub fn latitude(&self) -> &Axis {
        &self.latitude
    }

    /// The constituents provided by this model, in insertion order.
    pub fn constituents(&self) -> impl Iterator<Item = Constituent> + '_ {
        self.waves.iter().map(|(constituent, _)| *constituent)
    }

    pub fn provides(&self, constituent: Constituent) -> bool {
        self.waves.iter().any(|(c, _)| *c == constituent)
    }

    fn expected_shape(&self) -> (usize, usize) {
        if self.row_major {
            (self.longitude.len(), self.latitude.len())
        } else {
            (self.latitude.len(), self.longitude.len())
        }
    }

    /// Adds a constituent's complex grid, given as a flat slice with the
    /// declared `(rows, columns)` shape.
    ///
    /// # Errors
    ///
    /// - [InvalidShapeError] if the shape disagrees with the axes or the
    ///   declared row orientation.
    pub fn add_constituent(
        &mut self,
        constituent: Constituent,
        wave: Vec<Complex<T>>,
        shape: (usize, usize),
    ) -> Result<(), InvalidShapeError> {
        let (expected_rows, expected_columns) = self.expected_shape();
        if shape != (expected_rows, expected_columns) || wave.len() != shape.0 * shape.1 {
            return Err(InvalidShapeError {
                rows: shape.0,
                columns: shape.1,
                expected_rows,
                expected_columns,
            });
        }
        self.waves.retain(|(c, _)| *c != constituent);
        self.waves.push((constituent, wave));
        Ok(())
    }

    #[inline]
    fn cell_value(&self, wave: &[Complex<T>], lon_index: usize, lat_index: usize) -> (f64, f64) {
        let index = if self.row_major {
            lon_index * self.latitude.len() + lat_index
        } else {
            lat_index * self.longitude.len() + lon_index
        };
        let value = wave[index];
        (value.re.as_f64(), value.im.as_f64())
    }

    /// Interpolates every provided constituent at `(lon, lat)`, writing the
    /// results into `table` and grading the outcome.
    ///
    /// The accelerator caches the last visited grid cell: while consecutive
    /// queries stay within one cell, the cached values are replayed instead
    /// of re-blending the corners. A point outside the grid, or one whose
    /// cell is fully masked for any constituent, NaN-fills the table and
    /// grades as [Quality::Undefined].
    pub fn interpolate(
        &self,
        lon: Degrees,
        lat: Degrees,
        table: &mut ConstituentTable<TideComponent>,
        accelerator: &mut Accelerator,
    ) -> Quality {
        let (Some((i1, i2)), Some((j1, j2))) =
            (self.longitude.find_indices(lon), self.latitude.find_indices(lat))
        else {
            accelerator.clear_cell();
            return undefined(table);
        };

        let x1 = self.longitude.value(i1);
        let x2 = self.longitude.value(i2);
        let y1 = self.latitude.value(j1);
        let y2 = self.latitude.value(j2);
        let cell = [x1, x2, y1, y2];

        if let Some(quality) = accelerator.replay_cell(&cell, table) {
            return quality;
        }

        // Weights are computed in a frame unwrapped at x1 so that a cell
        // spanning the periodic seam keeps x1 < x2.
        let weights = bilinear_weights(
            (normalize_degrees_from(lon, x1), lat),
            (x1, y1),
            (normalize_degrees_from(x2, x1), y2),
        );

        let mut quality = Quality::Undefined;
        let mut values = Vec::with_capacity(self.waves.len());
        for (constituent, wave) in &self.waves {
            let corners = [
                self.cell_value(wave, i1, j1),
                self.cell_value(wave, i2, j1),
                self.cell_value(wave, i1, j2),
                self.cell_value(wave, i2, j2),
            ];
            let ((re, im), contributors) = bilinear(&weights, &corners);
            if contributors == 0 {
                accelerator.clear_cell();
                return undefined(table);
            }
            values.push((*constituent, Complex64::new(re, im)));
            quality = Quality::from_contributors(contributors);
        }

        for (constituent, component) in table.iter_mut() {
            if !self.provides(constituent) {
                component.tide = Complex64::default();
            }
        }
        for (constituent, value) in &values {
            table[*constituent].tide = *value;
        }
        accelerator.store_cell(cell, values, quality);
        quality
    }
}

fn undefined(table: &mut ConstituentTable<TideComponent>) -> Quality {
    for (_, component) in table.iter_mut() {
        component.tide = Complex64::new(f64::NAN, f64::NAN);
    }
    Quality::Undefined
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use neap_constituents::table::tide_components;

    use super::*;

    fn test_axes() -> (Axis, Axis) {
        let longitude = Axis::periodic(-180.0, 2.0, 180).unwrap();
        let latitude = Axis::from_range(-90.0, 90.0, 2.0).unwrap();
        (longitude, latitude)
    }

    fn constant_wave(model: &TidalModel<f64>, value: Complex64) -> Vec<Complex64> {
        vec![value; model.longitude.len() * model.latitude.len()]
    }

    fn m2_only_model() -> TidalModel<f64> {
        let (longitude, latitude) = test_axes();
        let mut model = TidalModel::new(longitude, latitude, true);
        let wave = constant_wave(&model, Complex64::new(1.0, 0.0));
        let shape = (model.longitude.len(), model.latitude.len());
        model.add_constituent(Constituent::M2, wave, shape).unwrap();
        model
    }

    #[test]
    fn test_add_constituent_rejects_bad_shape() {
        let (longitude, latitude) = test_axes();
        let mut model: TidalModel<f64> = TidalModel::new(longitude, latitude, true);
        let result = model.add_constituent(
            Constituent::M2,
            vec![Complex64::default(); 100],
            (10, 10),
        );
        assert!(matches!(result, Err(InvalidShapeError { .. })));
    }

    #[test]
    fn test_add_constituent_rejects_transposed_orientation() {
        let (longitude, latitude) = test_axes();
        let mut model: TidalModel<f64> = TidalModel::new(longitude, latitude, true);
        let wave = vec![Complex64::default(); 180 * 91];
        // Shape transposed against the declared row_major orientation.
        let result = model.add_constituent(Constituent::M2, wave, (91, 180));
        assert!(result.is_err());
    }

    #[test]
    fn test_interpolate_constant_grid() {
        let model = m2_only_model();
        let mut table = tide_components();
        let mut accelerator = Accelerator::new(0.0);
        let quality = model.interpolate(11.3, -42.7, &mut table, &mut accelerator);
        assert_eq!(quality, Quality::Interpolated);
        let tide = table[Constituent::M2].tide;
        assert_float_eq!(tide.re, 1.0, rel <= 1e-14);
        assert_float_eq!(tide.im, 0.0, abs <= 1e-14);
    }

    #[test]
    fn test_query_on_a_grid_node_returns_the_corner_value() {
        let (longitude, latitude) = test_axes();
        let mut model = TidalModel::new(longitude, latitude, true);
        let shape = (model.longitude.len(), model.latitude.len());
        let wave: Vec<Complex64> = (0..shape.0 * shape.1)
            .map(|index| Complex64::new(index as f64, -(index as f64)))
            .collect();
        model.add_constituent(Constituent::M2, wave, shape).unwrap();

        // Node (10°E, 4°N): lon index 95, lat index 47.
        let mut table = tide_components();
        let mut accelerator = Accelerator::new(0.0);
        let quality = model.interpolate(10.0, 4.0, &mut table, &mut accelerator);
        assert_eq!(quality, Quality::Interpolated);
        let expected = (95 * shape.1 + 47) as f64;
        assert_float_eq!(table[Constituent::M2].tide.re, expected, rel <= 1e-12);
        assert_float_eq!(table[Constituent::M2].tide.im, -expected, rel <= 1e-12);
    }

    #[test]
    fn test_interpolate_outside_grid_is_undefined() {
        let model = m2_only_model();
        let mut table = tide_components();
        let mut accelerator = Accelerator::new(0.0);
        let quality = model.interpolate(0.0, 90.5, &mut table, &mut accelerator);
        assert_eq!(quality, Quality::Undefined);
        assert!(table[Constituent::M2].tide.re.is_nan());
        assert!(table[Constituent::K1].tide.re.is_nan());
    }

    #[test]
    fn test_interpolate_across_periodic_seam() {
        let model = m2_only_model();
        let mut table = tide_components();
        let mut accelerator = Accelerator::new(0.0);
        // Between the last node (178°E) and the wrapped first node (180°W).
        let quality = model.interpolate(179.2, 10.0, &mut table, &mut accelerator);
        assert_eq!(quality, Quality::Interpolated);
        assert_float_eq!(table[Constituent::M2].tide.re, 1.0, rel <= 1e-14);
    }

    #[test]
    fn test_partial_cell_grades_as_extrapolated() {
        let (longitude, latitude) = test_axes();
        let mut model = TidalModel::new(longitude, latitude, true);
        let shape = (model.longitude.len(), model.latitude.len());
        let mut wave = constant_wave(&model, Complex64::new(2.0, -1.0));
        // Mask one corner of the cell containing (1.0, 1.0): node (0°, 0°).
        wave[90 * model.latitude.len() + 45] = Complex64::new(f64::NAN, f64::NAN);
        model.add_constituent(Constituent::M2, wave, shape).unwrap();

        let mut table = tide_components();
        let mut accelerator = Accelerator::new(0.0);
        let quality = model.interpolate(1.0, 1.0, &mut table, &mut accelerator);
        assert_eq!(quality, Quality::Extrapolated3);
        assert_float_eq!(table[Constituent::M2].tide.re, 2.0, rel <= 1e-14);
        assert_float_eq!(table[Constituent::M2].tide.im, -1.0, rel <= 1e-14);
    }

    #[test]
    fn test_cell_cache_replays_values() {
        let model = m2_only_model();
        let mut table = tide_components();
        let mut accelerator = Accelerator::new(0.0);
        let first = model.interpolate(10.1, 20.1, &mut table, &mut accelerator);
        let cached = table[Constituent::M2].tide;
        // A second query in the same 2° cell replays the cached value.
        let second = model.interpolate(10.9, 20.9, &mut table, &mut accelerator);
        assert_eq!(first, second);
        assert_eq!(table[Constituent::M2].tide, cached);
    }

    #[test]
    fn test_f32_grids_share_the_query_api() {
        let (longitude, latitude) = test_axes();
        let mut model: TidalModel<f32> = TidalModel::new(longitude, latitude, true);
        let shape = (model.longitude.len(), model.latitude.len());
        let wave = vec![Complex::new(0.5f32, 0.25f32); shape.0 * shape.1];
        model.add_constituent(Constituent::K1, wave, shape).unwrap();

        let mut table = tide_components();
        let mut accelerator = Accelerator::new(0.0);
        let quality = model.interpolate(-33.0, 33.0, &mut table, &mut accelerator);
        assert_eq!(quality, Quality::Interpolated);
        assert_float_eq!(table[Constituent::K1].tide.re, 0.5, rel <= 1e-6);
    }
}
