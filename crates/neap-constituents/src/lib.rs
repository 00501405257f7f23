// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
// SPDX-FileCopyrightText: 2025 Angus Morrison <github@angus-morrison.com>
//
// SPDX-License-Identifier: MPL-2.0

/*!
    The closed catalogue of tidal constituents known to neap.

    Each [Constituent] carries a seven-integer Doodson number (six
    multipliers of the celestial variables plus a quarter-turn phase code),
    a [Species] and a stable, case-sensitive canonical name. The catalogue
    order is fixed; dense per-constituent state lives in
    [table::ConstituentTable], indexed by catalogue ordinal.

    See `CONSTITUENTS.md` at the repository root for the full listing.
*/

use std::fmt::{Display, Formatter};

use thiserror::Error;

pub mod nodal;
pub mod table;

/// Six multipliers of `[τ, s, h, p, N', pₛ]` plus a phase code in quarter
/// turns (0-3).
pub type DoodsonNumber = [i8; 7];

/// Number of constituents in the catalogue.
pub const COUNT: usize = 71;

/// Tidal species, by the first Doodson multiplier.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Species {
    /// Species 0: the slow, zonal waves.
    LongPeriod,
    /// Species 1 and above: diurnal, semidiurnal and shallow-water waves.
    ShortPeriod,
}

/// Error returned when a name has no catalogue entry.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown tidal constituent '{name}'")]
pub struct UnknownConstituentError {
    pub name: String,
}

/// A named tidal constituent.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Constituent {
    // Long-period waves, in order of increasing frequency.
    Node,
    Sa,
    Ssa,
    Sta,
    Msm,
    Mm,
    Msf,
    Mf,
    Mst,
    Mt,
    Msq,
    Mq,
    // Diurnal waves.
    TwoQ1,
    Sigma1,
    Q1,
    Rho1,
    O1,
    Tau1,
    M1,
    Chi1,
    Pi1,
    P1,
    S1,
    K1,
    Psi1,
    Phi1,
    Theta1,
    J1,
    SO1,
    OO1,
    Ups1,
    // Semidiurnal waves.
    Eps2,
    TwoN2,
    Mu2,
    N2,
    Nu2,
    Gamma2,
    Alpha2,
    M2,
    Beta2,
    Delta2,
    Lambda2,
    L2,
    T2,
    S2,
    R2,
    K2,
    Eta2,
    TwoSM2,
    // Third-diurnal and compound waves.
    TwoMK3,
    M3,
    SO3,
    MK3,
    SK3,
    // Quarter-diurnal waves.
    N4,
    MN4,
    M4,
    SN4,
    MS4,
    MK4,
    S4,
    SK4,
    // Sixth-diurnal waves.
    TwoMN6,
    M6,
    MSN6,
    TwoMS6,
    TwoMK6,
    TwoSM6,
    MSK6,
    S6,
    // Eighth-diurnal waves.
    M8,
}

impl Constituent {
    /// Every constituent, in catalogue order.
    pub const ALL: [Constituent; COUNT] = [
        Constituent::Node,
        Constituent::Sa,
        Constituent::Ssa,
        Constituent::Sta,
        Constituent::Msm,
        Constituent::Mm,
        Constituent::Msf,
        Constituent::Mf,
        Constituent::Mst,
        Constituent::Mt,
        Constituent::Msq,
        Constituent::Mq,
        Constituent::TwoQ1,
        Constituent::Sigma1,
        Constituent::Q1,
        Constituent::Rho1,
        Constituent::O1,
        Constituent::Tau1,
        Constituent::M1,
        Constituent::Chi1,
        Constituent::Pi1,
        Constituent::P1,
        Constituent::S1,
        Constituent::K1,
        Constituent::Psi1,
        Constituent::Phi1,
        Constituent::Theta1,
        Constituent::J1,
        Constituent::SO1,
        Constituent::OO1,
        Constituent::Ups1,
        Constituent::Eps2,
        Constituent::TwoN2,
        Constituent::Mu2,
        Constituent::N2,
        Constituent::Nu2,
        Constituent::Gamma2,
        Constituent::Alpha2,
        Constituent::M2,
        Constituent::Beta2,
        Constituent::Delta2,
        Constituent::Lambda2,
        Constituent::L2,
        Constituent::T2,
        Constituent::S2,
        Constituent::R2,
        Constituent::K2,
        Constituent::Eta2,
        Constituent::TwoSM2,
        Constituent::TwoMK3,
        Constituent::M3,
        Constituent::SO3,
        Constituent::MK3,
        Constituent::SK3,
        Constituent::N4,
        Constituent::MN4,
        Constituent::M4,
        Constituent::SN4,
        Constituent::MS4,
        Constituent::MK4,
        Constituent::S4,
        Constituent::SK4,
        Constituent::TwoMN6,
        Constituent::M6,
        Constituent::MSN6,
        Constituent::TwoMS6,
        Constituent::TwoMK6,
        Constituent::TwoSM6,
        Constituent::MSK6,
        Constituent::S6,
        Constituent::M8,
    ];

    /// The catalogue ordinal of the constituent.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Iterates over the catalogue in ordinal order.
    pub fn iter() -> impl Iterator<Item = Constituent> {
        Self::ALL.into_iter()
    }

    /// The seven-integer Doodson number of the constituent.
    pub fn doodson_number(&self) -> DoodsonNumber {
        match self {
            Constituent::Node => [0, 0, 0, 0, 1, 0, 2],
            Constituent::Sa => [0, 0, 1, 0, 0, -1, 0],
            Constituent::Ssa => [0, 0, 2, 0, 0, 0, 0],
            Constituent::Sta => [0, 0, 3, 0, 0, -1, 0],
            Constituent::Msm => [0, 1, -2, 1, 0, 0, 0],
            Constituent::Mm => [0, 1, 0, -1, 0, 0, 0],
            Constituent::Msf => [0, 2, -2, 0, 0, 0, 0],
            Constituent::Mf => [0, 2, 0, 0, 0, 0, 0],
            Constituent::Mst => [0, 3, -2, 1, 0, 0, 0],
            Constituent::Mt => [0, 3, 0, -1, 0, 0, 0],
            Constituent::Msq => [0, 4, -2, 0, 0, 0, 0],
            Constituent::Mq => [0, 4, 0, -2, 0, 0, 0],
            Constituent::TwoQ1 => [1, -3, 0, 2, 0, 0, 1],
            Constituent::Sigma1 => [1, -3, 2, 0, 0, 0, 1],
            Constituent::Q1 => [1, -2, 0, 1, 0, 0, 1],
            Constituent::Rho1 => [1, -2, 2, -1, 0, 0, 1],
            Constituent::O1 => [1, -1, 0, 0, 0, 0, 1],
            Constituent::Tau1 => [1, -1, 2, 0, 0, 0, 3],
            Constituent::M1 => [1, 0, 0, 1, 0, 0, 3],
            Constituent::Chi1 => [1, 0, 2, -1, 0, 0, 3],
            Constituent::Pi1 => [1, 1, -3, 0, 0, 1, 1],
            Constituent::P1 => [1, 1, -2, 0, 0, 0, 1],
            Constituent::S1 => [1, 1, -1, 0, 0, 0, 2],
            Constituent::K1 => [1, 1, 0, 0, 0, 0, 3],
            Constituent::Psi1 => [1, 1, 1, 0, 0, -1, 3],
            Constituent::Phi1 => [1, 1, 2, 0, 0, 0, 3],
            Constituent::Theta1 => [1, 2, -2, 1, 0, 0, 3],
            Constituent::J1 => [1, 2, 0, -1, 0, 0, 3],
            Constituent::SO1 => [1, 3, -2, 0, 0, 0, 3],
            Constituent::OO1 => [1, 3, 0, 0, 0, 0, 3],
            Constituent::Ups1 => [1, 4, 0, -1, 0, 0, 3],
            Constituent::Eps2 => [2, -3, 2, 1, 0, 0, 0],
            Constituent::TwoN2 => [2, -2, 0, 2, 0, 0, 0],
            Constituent::Mu2 => [2, -2, 2, 0, 0, 0, 0],
            Constituent::N2 => [2, -1, 0, 1, 0, 0, 0],
            Constituent::Nu2 => [2, -1, 2, -1, 0, 0, 0],
            Constituent::Gamma2 => [2, 0, -2, 2, 0, 0, 2],
            Constituent::Alpha2 => [2, 0, -1, 0, 0, 1, 2],
            Constituent::M2 => [2, 0, 0, 0, 0, 0, 0],
            Constituent::Beta2 => [2, 0, 1, 0, 0, -1, 0],
            Constituent::Delta2 => [2, 0, 2, 0, 0, 0, 0],
            Constituent::Lambda2 => [2, 1, -2, 1, 0, 0, 2],
            Constituent::L2 => [2, 1, 0, -1, 0, 0, 2],
            Constituent::T2 => [2, 2, -3, 0, 0, 1, 0],
            Constituent::S2 => [2, 2, -2, 0, 0, 0, 0],
            Constituent::R2 => [2, 2, -1, 0, 0, -1, 2],
            Constituent::K2 => [2, 2, 0, 0, 0, 0, 0],
            Constituent::Eta2 => [2, 3, 0, -1, 0, 0, 0],
            Constituent::TwoSM2 => [2, 4, -4, 0, 0, 0, 0],
            Constituent::TwoMK3 => [3, -1, 0, 0, 0, 0, 1],
            Constituent::M3 => [3, 0, 0, 0, 0, 0, 2],
            Constituent::SO3 => [3, 1, -2, 0, 0, 0, 1],
            Constituent::MK3 => [3, 1, 0, 0, 0, 0, 3],
            Constituent::SK3 => [3, 3, -2, 0, 0, 0, 3],
            Constituent::N4 => [4, -2, 0, 2, 0, 0, 0],
            Constituent::MN4 => [4, -1, 0, 1, 0, 0, 0],
            Constituent::M4 => [4, 0, 0, 0, 0, 0, 0],
            Constituent::SN4 => [4, 1, -2, 1, 0, 0, 0],
            Constituent::MS4 => [4, 2, -2, 0, 0, 0, 0],
            Constituent::MK4 => [4, 2, 0, 0, 0, 0, 0],
            Constituent::S4 => [4, 4, -4, 0, 0, 0, 0],
            Constituent::SK4 => [4, 4, -2, 0, 0, 0, 0],
            Constituent::TwoMN6 => [6, -1, 0, 1, 0, 0, 0],
            Constituent::M6 => [6, 0, 0, 0, 0, 0, 0],
            Constituent::MSN6 => [6, 1, -2, 1, 0, 0, 0],
            Constituent::TwoMS6 => [6, 2, -2, 0, 0, 0, 0],
            Constituent::TwoMK6 => [6, 2, 0, 0, 0, 0, 0],
            Constituent::TwoSM6 => [6, 4, -4, 0, 0, 0, 0],
            Constituent::MSK6 => [6, 4, -2, 0, 0, 0, 0],
            Constituent::S6 => [6, 6, -6, 0, 0, 0, 0],
            Constituent::M8 => [8, 0, 0, 0, 0, 0, 0],
        }
    }

    /// The tidal species of the constituent.
    #[inline]
    pub fn species(&self) -> Species {
        if self.doodson_number()[0] == 0 {
            Species::LongPeriod
        } else {
            Species::ShortPeriod
        }
    }

    /// The canonical, case-sensitive name of the constituent.
    pub fn name(&self) -> &'static str {
        match self {
            Constituent::Node => "Node",
            Constituent::Sa => "Sa",
            Constituent::Ssa => "Ssa",
            Constituent::Sta => "Sta",
            Constituent::Msm => "Msm",
            Constituent::Mm => "Mm",
            Constituent::Msf => "Msf",
            Constituent::Mf => "Mf",
            Constituent::Mst => "Mst",
            Constituent::Mt => "Mt",
            Constituent::Msq => "Msq",
            Constituent::Mq => "Mq",
            Constituent::TwoQ1 => "2Q1",
            Constituent::Sigma1 => "Sigma1",
            Constituent::Q1 => "Q1",
            Constituent::Rho1 => "Rho1",
            Constituent::O1 => "O1",
            Constituent::Tau1 => "Tau1",
            Constituent::M1 => "M1",
            Constituent::Chi1 => "Chi1",
            Constituent::Pi1 => "Pi1",
            Constituent::P1 => "P1",
            Constituent::S1 => "S1",
            Constituent::K1 => "K1",
            Constituent::Psi1 => "Psi1",
            Constituent::Phi1 => "Phi1",
            Constituent::Theta1 => "Theta1",
            Constituent::J1 => "J1",
            Constituent::SO1 => "SO1",
            Constituent::OO1 => "OO1",
            Constituent::Ups1 => "Ups1",
            Constituent::Eps2 => "Eps2",
            Constituent::TwoN2 => "2N2",
            Constituent::Mu2 => "Mu2",
            Constituent::N2 => "N2",
            Constituent::Nu2 => "Nu2",
            Constituent::Gamma2 => "Gamma2",
            Constituent::Alpha2 => "Alpha2",
            Constituent::M2 => "M2",
            Constituent::Beta2 => "Beta2",
            Constituent::Delta2 => "Delta2",
            Constituent::Lambda2 => "Lambda2",
            Constituent::L2 => "L2",
            Constituent::T2 => "T2",
            Constituent::S2 => "S2",
            Constituent::R2 => "R2",
            Constituent::K2 => "K2",
            Constituent::Eta2 => "Eta2",
            Constituent::TwoSM2 => "2SM2",
            Constituent::TwoMK3 => "2MK3",
            Constituent::M3 => "M3",
            Constituent::SO3 => "SO3",
            Constituent::MK3 => "MK3",
            Constituent::SK3 => "SK3",
            Constituent::N4 => "N4",
            Constituent::MN4 => "MN4",
            Constituent::M4 => "M4",
            Constituent::SN4 => "SN4",
            Constituent::MS4 => "MS4",
            Constituent::MK4 => "MK4",
            Constituent::S4 => "S4",
            Constituent::SK4 => "SK4",
            Constituent::TwoMN6 => "2MN6",
            Constituent::M6 => "M6",
            Constituent::MSN6 => "MSN6",
            Constituent::TwoMS6 => "2MS6",
            Constituent::TwoMK6 => "2MK6",
            Constituent::TwoSM6 => "2SM6",
            Constituent::MSK6 => "MSK6",
            Constituent::S6 => "S6",
            Constituent::M8 => "M8",
        }
    }

    /// Looks up a constituent by its canonical name.
    ///
    /// # Errors
    ///
    /// - [UnknownConstituentError] if the name has no catalogue entry.
    pub fn from_name(name: &str) -> Result<Constituent, UnknownConstituentError> {
        Self::iter()
            .find(|constituent| constituent.name() == name)
            .ok_or_else(|| UnknownConstituentError {
                name: name.to_owned(),
            })
    }
}

impl Display for Constituent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
