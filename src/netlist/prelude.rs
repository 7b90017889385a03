// Copyright (c) 2022-2024 The netlist-xref developers.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The `prelude` helps to import the most commonly used netlist types.

pub use super::circuit::*;
pub use super::device::*;
pub use super::device_class::*;
pub use super::net::*;
pub use super::netlist::*;
pub use super::pin::*;
pub use super::refs::*;
pub use super::subcircuit::*;
pub use super::traits::*;
