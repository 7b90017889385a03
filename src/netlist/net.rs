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
//! A net represents an electric potential such as the one provided by a metal wire.
//! The net knows its endpoints: device terminals, outside pins of the parent circuit
//! and pins of sub-circuit instances.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Weak;

use super::circuit::Circuit;
use super::refs::{NetPinRef, NetSubcircuitPinRef, NetTerminalRef};
use super::traits::NetlistObject;

/// Data type used for identifying a net.
/// The value is unique within the circuit the net lives in and is used as the textual
/// identity of unnamed nets.
#[derive(Copy, Clone, Debug, Hash, PartialOrd, PartialEq, Ord, Eq)]
pub struct NetIndex {
    index: usize,
}

impl NetIndex {
    pub(super) fn new(index: usize) -> Self {
        NetIndex { index }
    }

    /// Get the integer value of this index.
    pub fn value(&self) -> usize {
        self.index
    }
}

/// A single net.
///
/// A net connects device terminals, outside pins of the circuit it lives in and pins of
/// sub-circuit instances. Net objects are created inside a circuit with
/// `Circuit::create_net`. Connections are made through `Device::connect_terminal`,
/// `Circuit::connect_pin_by_id` and `SubCircuit::connect_pin`.
pub struct Net {
    /// ID of the net. This uniquely identifies the net within the parent circuit.
    pub(super) id: NetIndex,
    /// Name of the net.
    pub(super) name: RefCell<Option<String>>,
    /// The circuit where the net lives in.
    /// A weak reference is needed here to avoid reference cycles.
    pub(super) parent_circuit: Weak<Circuit>,
    /// Device terminals connected to this net, in connection order.
    pub(super) terminals: RefCell<Vec<NetTerminalRef>>,
    /// Outside pins of the parent circuit connected to this net.
    pub(super) pins: RefCell<Vec<NetPinRef>>,
    /// Sub-circuit pins connected to this net.
    pub(super) subcircuit_pins: RefCell<Vec<NetSubcircuitPinRef>>,
}

impl fmt::Debug for Net {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Net")
            .field("name", &self.name.borrow())
            .field("id", &self.id.value())
            .finish()
    }
}

impl Net {
    pub(super) fn new(id: NetIndex, name: Option<String>, parent: Weak<Circuit>) -> Self {
        Net {
            id,
            name: RefCell::new(name),
            parent_circuit: parent,
            terminals: Default::default(),
            pins: Default::default(),
            subcircuit_pins: Default::default(),
        }
    }

    /// Return the name of this net.
    pub fn name(&self) -> Option<String> {
        self.name.borrow().clone()
    }

    /// Get the index of this net.
    /// The index uniquely identifies this net within the circuit.
    pub fn id(&self) -> NetIndex {
        self.id
    }

    /// Get the circuit where this net lives in.
    pub fn parent_circuit(&self) -> Weak<Circuit> {
        self.parent_circuit.clone()
    }

    /// Get a borrowed reference to the device-terminal connections of this net.
    pub fn terminals(&self) -> impl Deref<Target = Vec<NetTerminalRef>> + '_ {
        self.terminals.borrow()
    }

    /// Get a borrowed reference to the outside-pin connections of this net.
    pub fn pins(&self) -> impl Deref<Target = Vec<NetPinRef>> + '_ {
        self.pins.borrow()
    }

    /// Get a borrowed reference to the sub-circuit pin connections of this net.
    pub fn subcircuit_pins(&self) -> impl Deref<Target = Vec<NetSubcircuitPinRef>> + '_ {
        self.subcircuit_pins.borrow()
    }

    /// Return the number of device terminals connected to this net.
    pub fn terminal_count(&self) -> usize {
        self.terminals.borrow().len()
    }

    /// Return the number of outside pins connected to this net.
    pub fn pin_count(&self) -> usize {
        self.pins.borrow().len()
    }

    /// Return the number of sub-circuit pins connected to this net.
    pub fn subcircuit_pin_count(&self) -> usize {
        self.subcircuit_pins.borrow().len()
    }
}

impl Eq for Net {}

impl PartialEq for Net {
    /// A net is considered equal if the ID and parent circuit are identical.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.parent_circuit.ptr_eq(&other.parent_circuit)
    }
}

impl NetlistObject for Net {
    fn raw_name(&self) -> Option<String> {
        self.name().filter(|n| !n.is_empty())
    }

    fn numeric_id(&self) -> usize {
        self.id.value()
    }
}
