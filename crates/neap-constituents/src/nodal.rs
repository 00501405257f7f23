// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
// SPDX-FileCopyrightText: 2025 Angus Morrison <github@angus-morrison.com>
//
// SPDX-License-Identifier: MPL-2.0

/*!
    Module `nodal` computes the slow modulations of amplitude (factor f) and
    phase (offset u, degrees) that the 18.6-year regression of the lunar
    node and the 8.85-year cycle of the lunar perigee impose on each
    constituent.

    Two flavors are provided: [nodal_corrections] evaluates the classical
    per-constituent rules in the Doodson/Schureman tradition, while
    [group_modulations] expands selected constituents into their Doodson
    group as a complex sideline sum, picking up solar terms that matter for
    multi-year satellite records. Constituents without a group rule fall
    back to the classical rule.
*/

use neap_math::types::units::Degrees;

use crate::table::ConstituentTable;
use crate::Constituent;

/// Nodal modulation of a single constituent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodalCorrection {
    /// Amplitude modulation factor.
    pub f: f64,
    /// Phase correction in degrees.
    pub u: Degrees,
}

impl NodalCorrection {
    pub const UNITY: NodalCorrection = NodalCorrection { f: 1.0, u: 0.0 };

    /// The correction of a compound wave containing this wave `n` times.
    fn pow(self, n: i32) -> Self {
        Self {
            f: self.f.powi(n),
            u: self.u * n as f64,
        }
    }

    /// The correction of a compound wave containing both inputs.
    fn times(self, rhs: Self) -> Self {
        Self {
            f: self.f * rhs.f,
            u: self.u + rhs.u,
        }
    }

    /// The correction of a compound wave containing this wave subtracted.
    fn opposed(self) -> Self {
        Self {
            f: self.f,
            u: -self.u,
        }
    }
}

impl Default for NodalCorrection {
    fn default() -> Self {
        Self::UNITY
    }
}

/// Sine/cosine harmonics of the lunar node longitude.
struct NodeHarmonics {
    sin_n: f64,
    cos_n: f64,
    sin_2n: f64,
    cos_2n: f64,
    sin_3n: f64,
    cos_3n: f64,
}

impl NodeHarmonics {
    fn new(omega: Degrees) -> Self {
        let n = omega.to_radians();
        let (sin_n, cos_n) = n.sin_cos();
        let (sin_2n, cos_2n) = (2.0 * n).sin_cos();
        let (sin_3n, cos_3n) = (3.0 * n).sin_cos();
        Self {
            sin_n,
            cos_n,
            sin_2n,
            cos_2n,
            sin_3n,
            cos_3n,
        }
    }
}

/// Base corrections of the waves from which every catalogue rule is built.
struct BaseCorrections {
    mm: NodalCorrection,
    mf: NodalCorrection,
    o1: NodalCorrection,
    k1: NodalCorrection,
    j1: NodalCorrection,
    oo1: NodalCorrection,
    m1: NodalCorrection,
    m2: NodalCorrection,
    k2: NodalCorrection,
    l2: NodalCorrection,
    eta2: NodalCorrection,
}

impl BaseCorrections {
    fn new(omega: Degrees, p: Degrees) -> Self {
        let n = NodeHarmonics::new(omega);
        let mm = NodalCorrection {
            f: 1.0 - 0.1300 * n.cos_n + 0.0013 * n.cos_2n,
            u: 0.0,
        };
        let mf = NodalCorrection {
            f: 1.0429 + 0.4135 * n.cos_n - 0.0040 * n.cos_2n,
            u: -23.74 * n.sin_n + 2.68 * n.sin_2n - 0.38 * n.sin_3n,
        };
        let o1 = NodalCorrection {
            f: 1.0089 + 0.1871 * n.cos_n - 0.0147 * n.cos_2n + 0.0014 * n.cos_3n,
            u: 10.80 * n.sin_n - 1.34 * n.sin_2n + 0.19 * n.sin_3n,
        };
        let k1 = NodalCorrection {
            f: 1.0060 + 0.1150 * n.cos_n - 0.0088 * n.cos_2n + 0.0006 * n.cos_3n,
            u: -8.86 * n.sin_n + 0.68 * n.sin_2n - 0.07 * n.sin_3n,
        };
        let j1 = NodalCorrection {
            f: 1.0129 + 0.1676 * n.cos_n - 0.0170 * n.cos_2n + 0.0016 * n.cos_3n,
            u: -12.94 * n.sin_n + 1.34 * n.sin_2n - 0.19 * n.sin_3n,
        };
        let oo1 = NodalCorrection {
            f: 1.1027 + 0.6504 * n.cos_n + 0.0317 * n.cos_2n - 0.0014 * n.cos_3n,
            u: -36.68 * n.sin_n + 4.02 * n.sin_2n - 0.57 * n.sin_3n,
        };
        let m2 = NodalCorrection {
            f: 1.0004 - 0.0373 * n.cos_n + 0.0002 * n.cos_2n,
            u: -2.14 * n.sin_n,
        };
        let k2 = NodalCorrection {
            f: 1.0241 + 0.2863 * n.cos_n + 0.0083 * n.cos_2n - 0.0015 * n.cos_3n,
            u: -17.74 * n.sin_n + 0.68 * n.sin_2n - 0.04 * n.sin_3n,
        };

        // M1 and L2 modulate with the lunar perigee as well as the node
        // (Schureman §§ 207, 215).
        let p_rad = p.to_radians();
        let pn = (p - omega).to_radians();
        let m1_cos = 2.0 * p_rad.cos() + 0.4 * pn.cos();
        let m1_sin = p_rad.sin() + 0.2 * pn.sin();
        let m1 = NodalCorrection {
            f: m1_cos.hypot(m1_sin),
            u: m1_sin.atan2(m1_cos).to_degrees(),
        };
        let two_p = 2.0 * p_rad;
        let l2_cos = 1.0
            - 0.2505 * two_p.cos()
            - 0.1102 * (two_p - omega.to_radians()).cos()
            - 0.0156 * (two_p - 2.0 * omega.to_radians()).cos()
            - 0.0370 * n.cos_n;
        let l2_sin = -0.2505 * two_p.sin()
            - 0.1102 * (two_p - omega.to_radians()).sin()
            - 0.0156 * (two_p - 2.0 * omega.to_radians()).sin()
            - 0.0370 * n.sin_n;
        let l2 = NodalCorrection {
            f: l2_cos.hypot(l2_sin),
            u: l2_sin.atan2(l2_cos).to_degrees(),
        };

        let eta2_cos = 1.0 + 0.436 * n.cos_n;
        let eta2_sin = -0.436 * n.sin_n;
        let eta2 = NodalCorrection {
            f: eta2_cos.hypot(eta2_sin),
            u: eta2_sin.atan2(eta2_cos).to_degrees(),
        };

        Self {
            mm,
            mf,
            o1,
            k1,
            j1,
            oo1,
            m1,
            m2,
            k2,
            l2,
            eta2,
        }
    }

    fn correction(&self, constituent: Constituent) -> NodalCorrection {
        match constituent {
            // Purely solar waves carry no lunar modulation.
            Constituent::Sa
            | Constituent::Ssa
            | Constituent::Sta
            | Constituent::Pi1
            | Constituent::P1
            | Constituent::S1
            | Constituent::Psi1
            | Constituent::Phi1
            | Constituent::T2
            | Constituent::S2
            | Constituent::R2
            | Constituent::S4
            | Constituent::S6
            | Constituent::Node => NodalCorrection::UNITY,

            Constituent::Msm | Constituent::Mm => self.mm,
            Constituent::Msf => self.m2,
            Constituent::Mf | Constituent::Mst | Constituent::Mt | Constituent::Msq => self.mf,
            Constituent::Mq => self.mf,

            Constituent::TwoQ1
            | Constituent::Sigma1
            | Constituent::Q1
            | Constituent::Rho1
            | Constituent::O1
            | Constituent::Tau1 => self.o1,
            Constituent::M1 => self.m1,
            Constituent::Chi1 | Constituent::Theta1 | Constituent::J1 => self.j1,
            Constituent::K1 => self.k1,
            Constituent::SO1 => self.o1.opposed(),
            Constituent::OO1 | Constituent::Ups1 => self.oo1,

            Constituent::Eps2
            | Constituent::TwoN2
            | Constituent::Mu2
            | Constituent::N2
            | Constituent::Nu2
            | Constituent::Gamma2
            | Constituent::Alpha2
            | Constituent::M2
            | Constituent::Beta2
            | Constituent::Delta2
            | Constituent::Lambda2 => self.m2,
            Constituent::L2 => self.l2,
            Constituent::K2 => self.k2,
            Constituent::Eta2 => self.eta2,
            Constituent::TwoSM2 => self.m2.opposed(),

            Constituent::TwoMK3 => self.m2.pow(2).times(self.k1.opposed()),
            Constituent::M3 => NodalCorrection {
                f: self.m2.f.powf(1.5),
                u: 1.5 * self.m2.u,
            },
            Constituent::SO3 => self.o1,
            Constituent::MK3 => self.m2.times(self.k1),
            Constituent::SK3 => self.k1,

            Constituent::N4 | Constituent::MN4 | Constituent::M4 => self.m2.pow(2),
            Constituent::SN4 | Constituent::MS4 => self.m2,
            Constituent::MK4 => self.m2.times(self.k2),
            Constituent::SK4 => self.k2,

            Constituent::TwoMN6 | Constituent::M6 => self.m2.pow(3),
            Constituent::MSN6 | Constituent::TwoMS6 => self.m2.pow(2),
            Constituent::TwoMK6 => self.m2.pow(2).times(self.k2),
            Constituent::TwoSM6 => self.m2,
            Constituent::MSK6 => self.m2.times(self.k2),

            Constituent::M8 => self.m2.pow(4),
        }
    }
}

/// Classical nodal corrections for every catalogue constituent.
///
/// `omega` is the mean longitude of the lunar node and `p` the mean
/// longitude of the lunar perigee, both in degrees.
pub fn nodal_corrections(omega: Degrees, p: Degrees) -> ConstituentTable<NodalCorrection> {
    let base = BaseCorrections::new(omega, p);
    ConstituentTable::from_fn(|constituent| base.correction(constituent))
}

/// A sideline of a constituent's Doodson group. Multipliers apply to the
/// mean solar longitude, lunar perigee, lunar node and solar perihelion,
/// with a phase code in quarter turns.
struct Sideline {
    ratio: f64,
    solar_longitude: i8,
    perigee: i8,
    node: i8,
    perihelion: i8,
    phase: i8,
}

const fn nodal_sideline(ratio: f64, node: i8) -> Sideline {
    Sideline {
        ratio,
        solar_longitude: 0,
        perigee: 0,
        node,
        perihelion: 0,
        phase: 0,
    }
}

/// Doodson-group sidelines of the constituents with a group rule.
///
/// The S2 group lumps in the unresolved T2 and R2 lines, which modulate
/// with the solar longitude and perihelion; the lunar groups carry their
/// node sidelines with Cartwright-Tayler-Edden amplitude ratios.
fn group_sidelines(constituent: Constituent) -> Option<&'static [Sideline]> {
    match constituent {
        Constituent::Mm => {
            const SIDELINES: [Sideline; 2] = [nodal_sideline(-0.1300, 1), nodal_sideline(0.0013, 2)];
            Some(&SIDELINES)
        }
        Constituent::Mf | Constituent::Mt => {
            const SIDELINES: [Sideline; 2] = [nodal_sideline(0.4143, 1), nodal_sideline(0.0387, 2)];
            Some(&SIDELINES)
        }
        Constituent::O1 => {
            const SIDELINES: [Sideline; 2] = [nodal_sideline(0.1886, 1), nodal_sideline(-0.0147, 2)];
            Some(&SIDELINES)
        }
        Constituent::K1 => {
            const SIDELINES: [Sideline; 2] = [nodal_sideline(0.1158, 1), nodal_sideline(-0.0029, 2)];
            Some(&SIDELINES)
        }
        Constituent::M2 => {
            const SIDELINES: [Sideline; 2] = [nodal_sideline(-0.0373, 1), nodal_sideline(0.0002, 2)];
            Some(&SIDELINES)
        }
        Constituent::K2 => {
            const SIDELINES: [Sideline; 2] = [nodal_sideline(0.2980, 1), nodal_sideline(0.0324, 2)];
            Some(&SIDELINES)
        }
        Constituent::S2 => Some(&[
            // T2
            Sideline {
                ratio: 0.0585,
                solar_longitude: -1,
                perigee: 0,
                node: 0,
                perihelion: 1,
                phase: 0,
            },
            // R2
            Sideline {
                ratio: 0.0084,
                solar_longitude: 1,
                perigee: 0,
                node: 0,
                perihelion: -1,
                phase: 2,
            },
        ]),
        _ => None,
    }
}

/// Group-modulated corrections: selected constituents are expanded into
/// their Doodson group as `1 + Σ rᵢ·exp(i·θᵢ)`, the rest fall back to the
/// classical rule.
///
/// `perihelion` is the mean longitude of the solar perihelion, `omega` the
/// lunar node, `p` the lunar perigee and `solar_longitude` the mean solar
/// longitude, all in degrees.
pub fn group_modulations(
    perihelion: Degrees,
    omega: Degrees,
    p: Degrees,
    solar_longitude: Degrees,
) -> ConstituentTable<NodalCorrection> {
    let base = BaseCorrections::new(omega, p);
    ConstituentTable::from_fn(|constituent| match group_sidelines(constituent) {
        None => base.correction(constituent),
        Some(sidelines) => {
            let (mut real, mut imag) = (1.0, 0.0);
            for sideline in sidelines {
                let theta = (sideline.solar_longitude as f64 * solar_longitude
                    + sideline.perigee as f64 * p
                    + sideline.node as f64 * omega
                    + sideline.perihelion as f64 * perihelion
                    + 90.0 * sideline.phase as f64)
                    .to_radians();
                real += sideline.ratio * theta.cos();
                imag += sideline.ratio * theta.sin();
            }
            NodalCorrection {
                f: real.hypot(imag),
                u: imag.atan2(real).to_degrees(),
            }
        }
    })
}
