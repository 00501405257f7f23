// SPDX-FileCopyrightText: 2025 Helge Eichhorn <git@helgeeichhorn.de>
//
// SPDX-License-Identifier: MPL-2.0

use float_eq::assert_float_eq;
use num::complex::Complex64;

use neap::{Admittance, Axis, Constituent, Predictor, Quality, Settings, TidalModel};
use neap_astro::celestial::{celestial_vector, doodson_argument, tidal_frequency};
use neap_astro::delta_t::delta_t;
use neap_constituents::nodal::nodal_corrections;
use neap_math::constants::f64::time::MJD_TO_JD_OFFSET;

/// 1983-02-05T00:00:00 UT as a Modified Julian Date.
const TIME: f64 = 45335.0;

/// The same epoch in microseconds since 1970-01-01.
const EPOCH: i64 = (45335 - 40587) * 86_400_000_000;

fn global_axes() -> (Axis, Axis) {
    let longitude = Axis::periodic(-180.0, 2.0, 180).unwrap();
    let latitude = Axis::from_range(-90.0, 90.0, 2.0).unwrap();
    (longitude, latitude)
}

fn constant_model(constituents: &[(Constituent, Complex64)]) -> TidalModel<f64> {
    let (longitude, latitude) = global_axes();
    let shape = (longitude.len(), latitude.len());
    let mut model = TidalModel::new(longitude, latitude, true);
    for (constituent, value) in constituents {
        let wave = vec![*value; shape.0 * shape.1];
        model.add_constituent(*constituent, wave, shape).unwrap();
    }
    model
}

fn no_inference() -> Settings {
    Settings {
        admittance: None,
        ..Settings::default()
    }
}

#[test]
fn test_constant_m2_reproduces_the_harmonic_form() {
    let model = constant_model(&[(Constituent::M2, Complex64::new(1.0, 0.0))]);
    let predictor = Predictor::new(&model, no_inference());
    let prediction = predictor.evaluate(&[0.0], &[0.0], &[EPOCH]).unwrap();

    let delta = delta_t(TIME + MJD_TO_JD_OFFSET).unwrap();
    let argument = doodson_argument(TIME, delta, Constituent::M2.doodson_number());
    let vector = celestial_vector(TIME, delta);
    let corrections = nodal_corrections(-vector[4], vector[3]);
    let m2 = corrections[Constituent::M2];
    let expected = m2.f * (argument + m2.u).to_radians().cos();

    assert_eq!(prediction.quality[0], Quality::Interpolated);
    assert_float_eq!(prediction.tide[0], expected, abs <= 1e-10);
    assert_float_eq!(prediction.tide_lp[0], 0.0, abs <= 1e-15);
}

#[test]
fn test_long_period_waves_accumulate_separately() {
    let model = constant_model(&[
        (Constituent::Mf, Complex64::new(0.05, 0.0)),
        (Constituent::M2, Complex64::new(1.0, 0.0)),
    ]);
    let predictor = Predictor::new(&model, no_inference());
    let prediction = predictor.evaluate(&[10.0], &[-30.0], &[EPOCH]).unwrap();

    let delta = delta_t(TIME + MJD_TO_JD_OFFSET).unwrap();
    let vector = celestial_vector(TIME, delta);
    let corrections = nodal_corrections(-vector[4], vector[3]);

    let argument = doodson_argument(TIME, delta, Constituent::Mf.doodson_number());
    let mf = corrections[Constituent::Mf];
    let expected_lp = mf.f * 0.05 * (argument + mf.u).to_radians().cos();
    assert_float_eq!(prediction.tide_lp[0], expected_lp, abs <= 1e-10);

    let argument = doodson_argument(TIME, delta, Constituent::M2.doodson_number());
    let m2 = corrections[Constituent::M2];
    let expected = m2.f * (argument + m2.u).to_radians().cos();
    assert_float_eq!(prediction.tide[0], expected, abs <= 1e-10);
}

#[test]
fn test_out_of_grid_points_are_undefined_without_failing_the_batch() {
    let (longitude, _) = global_axes();
    let latitude = Axis::from_range(-60.0, 60.0, 2.0).unwrap();
    let shape = (longitude.len(), latitude.len());
    let mut model = TidalModel::new(longitude, latitude, true);
    let wave = vec![Complex64::new(1.0, 0.0); shape.0 * shape.1];
    model.add_constituent(Constituent::M2, wave, shape).unwrap();

    let predictor = Predictor::new(&model, no_inference());
    let prediction = predictor
        .evaluate(&[0.0, 0.0], &[75.0, 0.0], &[EPOCH, EPOCH])
        .unwrap();

    assert_eq!(prediction.quality[0], Quality::Undefined);
    assert_eq!(prediction.quality[0].code(), 0);
    assert!(prediction.tide[0].is_nan());
    assert!(prediction.tide_lp[0].is_nan());
    assert_eq!(prediction.quality[1], Quality::Interpolated);
    assert_eq!(prediction.quality[1].code(), 4);
    assert!(prediction.tide[1].is_finite());
}

#[test]
fn test_masked_corners_grade_the_quality() {
    let (longitude, latitude) = global_axes();
    let shape = (longitude.len(), latitude.len());
    let mut wave = vec![Complex64::new(1.0, 0.0); shape.0 * shape.1];
    // Mask three corners of the cell framing (1.0, 1.0): nodes (0°, 0°),
    // (2°, 0°) and (0°, 2°), leaving (2°, 2°).
    wave[90 * shape.1 + 45] = Complex64::new(f64::NAN, f64::NAN);
    wave[91 * shape.1 + 45] = Complex64::new(f64::NAN, f64::NAN);
    wave[90 * shape.1 + 46] = Complex64::new(f64::NAN, f64::NAN);
    let mut model = TidalModel::new(longitude, latitude, true);
    model.add_constituent(Constituent::M2, wave, shape).unwrap();

    let predictor = Predictor::new(&model, no_inference());
    let prediction = predictor.evaluate(&[1.0], &[1.0], &[EPOCH]).unwrap();
    assert_eq!(prediction.quality[0], Quality::Extrapolated1);
    assert!(prediction.tide[0].is_finite());
}

#[test]
fn test_evaluation_is_deterministic_across_thread_counts() {
    let model = constant_model(&[
        (Constituent::M2, Complex64::new(0.75, -0.31)),
        (Constituent::S2, Complex64::new(0.22, 0.11)),
        (Constituent::K1, Complex64::new(0.18, 0.07)),
        (Constituent::O1, Complex64::new(0.09, -0.05)),
        (Constituent::N2, Complex64::new(0.13, 0.02)),
        (Constituent::Q1, Complex64::new(0.03, 0.01)),
        (Constituent::Mm, Complex64::new(0.012, 0.0)),
        (Constituent::Mf, Complex64::new(0.02, -0.004)),
        (Constituent::Node, Complex64::new(0.005, 0.001)),
    ]);

    // Consecutive points are farther apart than one 2° grid cell, so the
    // per-worker cell cache never replays and chunking cannot shift which
    // point fills it first.
    let count = 500;
    let lon: Vec<f64> = (0..count).map(|i| -180.0 + 2.3 * i as f64).collect();
    let lat: Vec<f64> = (0..count).map(|i| -60.0 + 2.1 * (i % 57) as f64).collect();
    let epochs: Vec<i64> = (0..count)
        .map(|i| EPOCH + i as i64 * 7_000_000_000)
        .collect();

    let serial = Predictor::new(
        &model,
        Settings {
            num_threads: 1,
            ..Settings::default()
        },
    )
    .evaluate(&lon, &lat, &epochs)
    .unwrap();
    let parallel = Predictor::new(
        &model,
        Settings {
            num_threads: 3,
            ..Settings::default()
        },
    )
    .evaluate(&lon, &lat, &epochs)
    .unwrap();
    let repeated = Predictor::new(
        &model,
        Settings {
            num_threads: 3,
            ..Settings::default()
        },
    )
    .evaluate(&lon, &lat, &epochs)
    .unwrap();

    assert_eq!(parallel, repeated);
    for index in 0..count {
        assert_eq!(
            serial.tide[index].to_bits(),
            parallel.tide[index].to_bits(),
            "point {index}"
        );
        assert_eq!(serial.quality[index], parallel.quality[index]);
    }
}

#[test]
fn test_inference_fills_minor_constituents() {
    let majors = [
        (Constituent::Q1, Complex64::new(0.02, -0.01)),
        (Constituent::O1, Complex64::new(0.10, 0.03)),
        (Constituent::K1, Complex64::new(0.14, -0.06)),
        (Constituent::N2, Complex64::new(0.05, 0.01)),
        (Constituent::M2, Complex64::new(0.24, -0.09)),
        (Constituent::S2, Complex64::new(0.11, 0.04)),
        (Constituent::Node, Complex64::new(0.004, 0.0)),
        (Constituent::Mm, Complex64::new(0.02, 0.001)),
        (Constituent::Mf, Complex64::new(0.04, -0.002)),
    ];
    let model = constant_model(&majors);

    let with_inference = Predictor::new(&model, Settings::default())
        .evaluate(&[5.0], &[12.0], &[EPOCH])
        .unwrap();
    let without_inference = Predictor::new(&model, no_inference())
        .evaluate(&[5.0], &[12.0], &[EPOCH])
        .unwrap();

    assert!(with_inference.tide[0].is_finite());
    // The inferred minors contribute: P1 alone is a few centimeters here.
    assert_ne!(with_inference.tide[0], without_inference.tide[0]);

    let fourier = Predictor::new(
        &model,
        Settings {
            admittance: Some(Admittance::Fourier),
            ..Settings::default()
        },
    )
    .evaluate(&[5.0], &[12.0], &[EPOCH])
    .unwrap();
    assert!(fourier.tide[0].is_finite());
    // Both admittance fits agree through the anchors, so the predictions
    // stay within a few centimeters of one another.
    assert!((fourier.tide[0] - with_inference.tide[0]).abs() < 0.05);
}

#[test]
fn test_epochs_outside_delta_t_span_fail_the_batch() {
    let model = constant_model(&[(Constituent::M2, Complex64::new(1.0, 0.0))]);
    let predictor = Predictor::new(&model, no_inference());
    // Around the year 2200.
    let far_future = 7_300_000_000_000_000;
    assert!(predictor.evaluate(&[0.0], &[0.0], &[far_future]).is_err());
}

#[test]
fn test_catalogue_frequencies_are_bounded() {
    for constituent in Constituent::iter() {
        let [t, s, h, p, n, ps, _] = constituent.doodson_number();
        let frequency = tidal_frequency([t, s, h, p, n, ps]);
        assert!(
            frequency.abs() < 200.0,
            "{constituent}: {frequency} deg/h"
        );
        assert!(frequency > 0.0, "{constituent}: {frequency} deg/h");
    }
}

#[test]
fn test_group_modulations_change_the_solar_waves() {
    let model = constant_model(&[(Constituent::S2, Complex64::new(0.5, 0.0))]);
    let standard = Predictor::new(&model, no_inference())
        .evaluate(&[0.0], &[0.0], &[EPOCH])
        .unwrap();
    let grouped = Predictor::new(
        &model,
        Settings {
            group_modulations: true,
            ..no_inference()
        },
    )
    .evaluate(&[0.0], &[0.0], &[EPOCH])
    .unwrap();
    // The lumped T2/R2 sidelines modulate S2 by a few percent.
    assert_ne!(standard.tide[0], grouped.tide[0]);
    assert!((standard.tide[0] - grouped.tide[0]).abs() < 0.05);
}
