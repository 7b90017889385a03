/*
 * Copyright (c) 2022-2024 The netlist-xref developers.
 *
 * This file is part of netlist-xref.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */
//! The cross-reference engine: the [`CrossReference`] recorder consumes pairing events
//! of a netlist compare through the [`CompareLogger`] interface and answers partner and
//! per-circuit/per-net queries afterwards.

pub mod compare_logger;
pub mod cross_reference;
pub mod order;

mod per_net;

pub use compare_logger::{CompareLogger, LogEntry, Severity, Status};
pub use cross_reference::{
    CircuitPair, CrossReference, DevicePair, EntityPair, NetPair, NetPinPair,
    NetSubcircuitPinPair, NetTerminalPair, PerCircuitData, PerNetData, PinPair, SubCircuitPair,
};
