// SPDX-FileCopyrightText: 2024 Helge Eichhorn <git@helgeeichhorn.de>
//
// SPDX-License-Identifier: MPL-2.0

//! Module units provides type aliases for the scalar quantities shared by
//! the neap crates. They document intent without taxing the hot path.

pub type Arcseconds = f64;
pub type Degrees = f64;
pub type Radians = f64;

pub type DegreesPerHour = f64;

pub type JulianCenturies = f64;
pub type Seconds = f64;

pub type Meters = f64;
