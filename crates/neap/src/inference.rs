// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
// SPDX-FileCopyrightText: 2025 Angus Morrison <github@angus-morrison.com>
//
// SPDX-License-Identifier: MPL-2.0

/*!
    Module `inference` estimates minor tidal constituents from the major
    ones a gridded model provides.

    Within a species band the tidal admittance varies smoothly with
    frequency, so the complex admittances of three primary constituents pin
    a curve from which every missing neighbor can be read off. The diurnal
    band is first corrected for the frequency dependence of the body Love
    numbers, and the 18.6-year node tide falls back to its latitude-
    dependent equilibrium form when the model does not provide it.

    Equilibrium amplitudes follow Cartwright & Tayler (1971) and Cartwright
    & Edden (1973).
*/

use std::f64::consts::PI;

use num::complex::Complex64;

use neap_astro::celestial::tidal_frequency;
use neap_astro::love::love_numbers;
use neap_constituents::table::{ConstituentTable, TideComponent};
use neap_constituents::Constituent;
use neap_math::types::units::{Degrees, DegreesPerHour, Meters};

/// Admittance interpolation styles.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Admittance {
    /// Piecewise linear between the primary frequencies.
    #[default]
    Linear,
    /// Munk-Cartwright three-term Fourier fit through the primaries. The
    /// long-period band always interpolates linearly.
    Fourier,
}

/// Representation of the primary harmonic constants fed to inference.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PrimaryInput {
    /// Real and imaginary parts, in meters.
    #[default]
    Harmonic,
    /// Amplitude in meters and phase lag in degrees.
    AmplitudePhase,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Band {
    LongPeriod,
    Diurnal,
    Semidiurnal,
}

/// Primary anchors per band, with equilibrium amplitudes in meters.
const DIURNAL_PRIMARIES: [(Constituent, Meters); 3] = [
    (Constituent::Q1, 0.019256),
    (Constituent::O1, 0.100514),
    (Constituent::K1, 0.141565),
];

const SEMIDIURNAL_PRIMARIES: [(Constituent, Meters); 3] = [
    (Constituent::N2, 0.046398),
    (Constituent::M2, 0.242334),
    (Constituent::S2, 0.112841),
];

const LONG_PERIOD_PRIMARIES: [(Constituent, Meters); 3] = [
    (Constituent::Node, NODE_AMPLITUDE),
    (Constituent::Mm, 0.022191),
    (Constituent::Mf, 0.042017),
];

/// Inferrable secondaries per band, with equilibrium amplitudes in meters.
/// Radiational lines (Sa, S1) and the nonlinear shallow-water waves are
/// deliberately absent: their admittance is not smooth.
const DIURNAL_SECONDARIES: [(Constituent, Meters); 15] = [
    (Constituent::TwoQ1, 0.002565),
    (Constituent::Sigma1, 0.003097),
    (Constituent::Rho1, 0.003651),
    (Constituent::Tau1, 0.001310),
    (Constituent::M1, 0.007915),
    (Constituent::Chi1, 0.001541),
    (Constituent::Pi1, 0.002740),
    (Constituent::P1, 0.046843),
    (Constituent::Psi1, 0.001130),
    (Constituent::Phi1, 0.002010),
    (Constituent::Theta1, 0.001541),
    (Constituent::J1, 0.007924),
    (Constituent::SO1, 0.001130),
    (Constituent::OO1, 0.004323),
    (Constituent::Ups1, 0.000843),
];

const SEMIDIURNAL_SECONDARIES: [(Constituent, Meters); 14] = [
    (Constituent::Eps2, 0.001804),
    (Constituent::TwoN2, 0.006207),
    (Constituent::Mu2, 0.007489),
    (Constituent::Nu2, 0.008811),
    (Constituent::Gamma2, 0.000733),
    (Constituent::Alpha2, 0.000313),
    (Constituent::Beta2, 0.000583),
    (Constituent::Delta2, 0.000258),
    (Constituent::Lambda2, 0.001787),
    (Constituent::L2, 0.006849),
    (Constituent::T2, 0.006601),
    (Constituent::R2, 0.000944),
    (Constituent::K2, 0.030704),
    (Constituent::Eta2, 0.001719),
];

const LONG_PERIOD_SECONDARIES: [(Constituent, Meters); 8] = [
    (Constituent::Ssa, 0.019542),
    (Constituent::Sta, 0.000423),
    (Constituent::Msm, 0.004239),
    (Constituent::Msf, 0.003678),
    (Constituent::Mst, 0.000767),
    (Constituent::Mt, 0.008049),
    (Constituent::Msq, 0.001293),
    (Constituent::Mq, 0.001066),
];

/// Equilibrium amplitude of the node tide, in meters.
const NODE_AMPLITUDE: Meters = 0.0279;

/// Elastic factor γ₂ = 1 + k₂ - h₂ of the equilibrium node tide.
const NODE_GAMMA: f64 = 0.682;

/// Argument scale of the Fourier admittance fit.
const FOURIER_SCALE: f64 = 48.0 * PI / 180.0;

/// Inverses of the 3×3 Fourier design matrices `[1, cos f, sin f]` at the
/// primary frequencies of each band.
const DIURNAL_INVERSE: [[f64; 3]; 3] = [
    [3.121374623540351, -3.849376526747166, 1.7280019032068148],
    [-3.1727168217376165, 3.9559332874421136, -0.783216465704497],
    [1.4379730106466029, -3.029628822536747, 1.591655811890144],
];

const SEMIDIURNAL_INVERSE: [[f64; 3]; 3] = [
    [3.3133454698170968, -4.253835027899551, 1.940489558082454],
    [-3.313345472013943, 4.253835032665338, -0.9404895606513947],
    [1.5017102446054642, -3.2577751608355627, 1.7560649162300985],
];

/// The admittance inference stage.
///
/// Construction precomputes per-constituent frequencies and diurnal Love
/// factors; the stage itself is immutable and can be shared by workers.
#[derive(Clone, Debug)]
pub struct Inference {
    admittance: Admittance,
    frequencies: ConstituentTable<DegreesPerHour>,
    gamma: ConstituentTable<f64>,
}

impl Inference {
    pub fn new(admittance: Admittance) -> Self {
        let frequencies = ConstituentTable::from_fn(|constituent| {
            let [t, s, h, p, n, ps, _] = constituent.doodson_number();
            tidal_frequency([t, s, h, p, n, ps])
        });
        let gamma = ConstituentTable::from_fn(|constituent| {
            let love = love_numbers(*frequencies.get(constituent));
            1.0 + love.k2 - love.h2
        });
        Self {
            admittance,
            frequencies,
            gamma,
        }
    }

    pub fn admittance(&self) -> Admittance {
        self.admittance
    }

    /// Fills every inferred constituent of `table` from the primary
    /// harmonic constants, which must be in harmonic (real, imaginary)
    /// form. Non-inferred entries are left untouched.
    pub fn apply(&self, table: &mut ConstituentTable<TideComponent>, latitude: Degrees) {
        self.substitute_equilibrium_node(table, latitude);
        self.apply_band(table, Band::Diurnal, &DIURNAL_PRIMARIES, &DIURNAL_SECONDARIES);
        self.apply_band(
            table,
            Band::Semidiurnal,
            &SEMIDIURNAL_PRIMARIES,
            &SEMIDIURNAL_SECONDARIES,
        );
        self.apply_band(
            table,
            Band::LongPeriod,
            &LONG_PERIOD_PRIMARIES,
            &LONG_PERIOD_SECONDARIES,
        );
    }

    /// Like [Inference::apply], accepting and returning primaries and
    /// inferred constituents in the requested representation.
    pub fn apply_with_input(
        &self,
        table: &mut ConstituentTable<TideComponent>,
        latitude: Degrees,
        input: PrimaryInput,
    ) {
        match input {
            PrimaryInput::Harmonic => self.apply(table, latitude),
            PrimaryInput::AmplitudePhase => {
                let saved: Vec<(Constituent, Complex64)> = all_primaries()
                    .map(|constituent| (constituent, table[constituent].tide))
                    .collect();
                for (constituent, tide) in &saved {
                    let amplitude = tide.re;
                    let phase = tide.im.to_radians();
                    table[*constituent].tide =
                        Complex64::new(amplitude * phase.cos(), -amplitude * phase.sin());
                }
                self.apply(table, latitude);
                for (constituent, _) in all_secondaries() {
                    let component = table.get_mut(constituent);
                    if component.is_inferred {
                        let tide = component.tide;
                        component.tide = Complex64::new(
                            tide.norm(),
                            (-tide.im).atan2(tide.re).to_degrees(),
                        );
                    }
                }
                for (constituent, tide) in saved {
                    // An inferred primary (the substituted node tide) keeps
                    // its inferred value.
                    if !table[constituent].is_inferred {
                        table[constituent].tide = tide;
                    }
                }
            }
        }
    }

    /// The model's node tide is replaced by its latitude-dependent
    /// equilibrium form when it has to be inferred: γ₂·P₂₀(φ) scaled into
    /// the normalization of the amplitude table.
    fn substitute_equilibrium_node(
        &self,
        table: &mut ConstituentTable<TideComponent>,
        latitude: Degrees,
    ) {
        let node = table.get_mut(Constituent::Node);
        if !node.is_inferred {
            return;
        }
        let p20 = 0.5 - 1.5 * latitude.to_radians().sin().powi(2);
        let xi = NODE_GAMMA * p20 * (1.25 / PI).sqrt();
        node.tide = Complex64::new(xi * NODE_AMPLITUDE, 0.0);
    }

    fn apply_band(
        &self,
        table: &mut ConstituentTable<TideComponent>,
        band: Band,
        primaries: &[(Constituent, Meters); 3],
        secondaries: &[(Constituent, Meters)],
    ) {
        let mut anchor_frequencies = [0.0; 3];
        let mut admittances = [Complex64::default(); 3];
        for (slot, (constituent, amplitude)) in primaries.iter().enumerate() {
            anchor_frequencies[slot] = *self.frequencies.get(*constituent);
            let mut z = table[*constituent].tide / *amplitude;
            if band == Band::Diurnal {
                z /= *self.gamma.get(*constituent);
            }
            admittances[slot] = z;
        }

        let fourier = self.admittance == Admittance::Fourier && band != Band::LongPeriod;
        let coefficients = fourier.then(|| {
            let inverse = match band {
                Band::Diurnal => &DIURNAL_INVERSE,
                _ => &SEMIDIURNAL_INVERSE,
            };
            fourier_coefficients(inverse, &admittances)
        });

        for (constituent, amplitude) in secondaries {
            if !table[*constituent].is_inferred {
                continue;
            }
            let x = *self.frequencies.get(*constituent);
            let z = match &coefficients {
                Some(coefficients) => fourier_admittance(coefficients, x),
                None => linear_admittance(&anchor_frequencies, &admittances, x),
            };
            let mut tide = z * *amplitude;
            if band == Band::Diurnal {
                tide *= *self.gamma.get(*constituent);
            }
            table[*constituent].tide = tide;
        }
    }
}

fn all_primaries() -> impl Iterator<Item = Constituent> {
    DIURNAL_PRIMARIES
        .iter()
        .chain(&SEMIDIURNAL_PRIMARIES)
        .chain(&LONG_PERIOD_PRIMARIES)
        .map(|(constituent, _)| *constituent)
}

fn all_secondaries() -> impl Iterator<Item = (Constituent, Meters)> {
    DIURNAL_SECONDARIES
        .iter()
        .chain(&SEMIDIURNAL_SECONDARIES)
        .chain(&LONG_PERIOD_SECONDARIES)
        .copied()
        .chain(std::iter::once((Constituent::Node, NODE_AMPLITUDE)))
}

/// Piecewise linear interpolation through the three anchors: the first
/// segment serves frequencies up to the middle anchor, the second all
/// beyond it.
fn linear_admittance(
    frequencies: &[DegreesPerHour; 3],
    admittances: &[Complex64; 3],
    x: DegreesPerHour,
) -> Complex64 {
    let (i, j) = if x <= frequencies[1] { (0, 1) } else { (1, 2) };
    let fraction = (x - frequencies[i]) / (frequencies[j] - frequencies[i]);
    admittances[i] + (admittances[j] - admittances[i]) * fraction
}

fn fourier_coefficients(inverse: &[[f64; 3]; 3], admittances: &[Complex64; 3]) -> [Complex64; 3] {
    std::array::from_fn(|row| {
        admittances[0] * inverse[row][0]
            + admittances[1] * inverse[row][1]
            + admittances[2] * inverse[row][2]
    })
}

fn fourier_admittance(coefficients: &[Complex64; 3], x: DegreesPerHour) -> Complex64 {
    let argument = x * FOURIER_SCALE;
    coefficients[0] + coefficients[1] * argument.cos() + coefficients[2] * argument.sin()
}
