// Copyright (c) 2022-2024 The netlist-xref developers.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The `prelude` helps to import the most commonly used types of this crate.

pub use crate::model::{CrossReferenceModel, IndexedNetlistModel, SingleIndexedNetlistModel};
pub use crate::netlist::prelude::*;
pub use crate::rc_key::RcKey;
pub use crate::xref::{
    CircuitPair, CompareLogger, CrossReference, DevicePair, EntityPair, LogEntry, NetPair,
    NetPinPair, NetSubcircuitPinPair, NetTerminalPair, PerCircuitData, PerNetData, PinPair,
    Severity, Status, SubCircuitPair,
};
