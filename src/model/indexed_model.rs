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
//! The interface that supplies browsers with indexed netlist items.

use std::rc::Rc;

use crate::netlist::prelude::*;
use crate::xref::{
    CircuitPair, DevicePair, NetPair, NetPinPair, NetSubcircuitPinPair, NetTerminalPair, PinPair,
    Status, SubCircuitPair,
};

/// A uniform, order-stable index view over either a cross-reference (two-sided) or a
/// single netlist (one-sided).
///
/// Every lookup by index returns `None` when the index is out of range or the parent is
/// unknown; callers are expected to pre-check the counts. Every `*_index` lookup
/// returns `None` for entities the model does not know.
pub trait IndexedNetlistModel {
    /// Tell whether this model views a single netlist. Single models have no second
    /// sides and no status information.
    fn is_single(&self) -> bool;

    /// Return the number of circuit pairs.
    fn circuit_count(&self) -> usize;
    /// Return the number of top-level circuit pairs.
    fn top_circuit_count(&self) -> usize;
    /// Return the number of distinct child circuits of the given circuit pair.
    fn child_circuit_count(&self, circuits: &CircuitPair) -> usize;
    /// Return the number of net pairs inside the given circuit pair.
    fn net_count(&self, circuits: &CircuitPair) -> usize;
    /// Return the number of device pairs inside the given circuit pair.
    fn device_count(&self, circuits: &CircuitPair) -> usize;
    /// Return the number of pin pairs of the given circuit pair.
    fn pin_count(&self, circuits: &CircuitPair) -> usize;
    /// Return the number of sub-circuit pairs inside the given circuit pair.
    fn subcircuit_count(&self, circuits: &CircuitPair) -> usize;
    /// Return the number of paired terminal references of the given net pair.
    fn net_terminal_count(&self, nets: &NetPair) -> usize;
    /// Return the number of paired outside-pin references of the given net pair.
    fn net_pin_count(&self, nets: &NetPair) -> usize;
    /// Return the number of paired sub-circuit pin references of the given net pair.
    fn net_subcircuit_pin_count(&self, nets: &NetPair) -> usize;
    /// Return the number of pin entries of the given sub-circuit pair.
    fn subcircuit_pin_count(&self, subcircuits: &SubCircuitPair) -> usize;

    /// Get the circuit pair the given net pair lives in.
    fn parent_of_net(&self, nets: &NetPair) -> CircuitPair;
    /// Get the circuit pair the given device pair lives in.
    fn parent_of_device(&self, devices: &DevicePair) -> CircuitPair;
    /// Get the circuit pair the given sub-circuit pair lives in.
    fn parent_of_subcircuit(&self, subcircuits: &SubCircuitPair) -> CircuitPair;

    /// Get a circuit pair with its status by index.
    fn circuit_from_index(&self, index: usize) -> Option<(CircuitPair, Status, String)>;
    /// Get a top-level circuit pair with its status by index.
    fn top_circuit_from_index(&self, index: usize) -> Option<(CircuitPair, Status, String)>;
    /// Get a child circuit pair of the given circuit pair by index.
    fn child_circuit_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(CircuitPair, Status, String)>;
    /// Get a net pair of the given circuit pair by index.
    fn net_from_index(&self, circuits: &CircuitPair, index: usize)
        -> Option<(NetPair, Status, String)>;
    /// Get a device pair of the given circuit pair by index.
    fn device_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(DevicePair, Status, String)>;
    /// Get a pin pair of the given circuit pair by index.
    fn pin_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(PinPair, Status, String)>;
    /// Get a sub-circuit pair of the given circuit pair by index.
    fn subcircuit_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(SubCircuitPair, Status, String)>;

    /// Get a paired terminal reference of the given net pair by index.
    fn net_terminalref_from_index(&self, nets: &NetPair, index: usize)
        -> Option<NetTerminalPair>;
    /// Get a paired outside-pin reference of the given net pair by index.
    fn net_pinref_from_index(&self, nets: &NetPair, index: usize) -> Option<NetPinPair>;
    /// Get a paired sub-circuit pin reference of the given net pair by index.
    fn net_subcircuit_pinref_from_index(
        &self,
        nets: &NetPair,
        index: usize,
    ) -> Option<NetSubcircuitPinPair>;
    /// Get a pin entry of the given sub-circuit pair by index.
    fn subcircuit_pinref_from_index(
        &self,
        subcircuits: &SubCircuitPair,
        index: usize,
    ) -> Option<NetSubcircuitPinPair>;

    /// Get the index of the given circuit pair.
    fn circuit_index(&self, circuits: &CircuitPair) -> Option<usize>;
    /// Get the index of the given net pair within its parent circuit pair.
    fn net_index(&self, nets: &NetPair) -> Option<usize>;
    /// Get the index of the given device pair within its parent circuit pair.
    fn device_index(&self, devices: &DevicePair) -> Option<usize>;
    /// Get the index of the given pin pair within the given circuit pair.
    fn pin_index(&self, pins: &PinPair, circuits: &CircuitPair) -> Option<usize>;
    /// Get the index of the given sub-circuit pair within its parent circuit pair.
    fn subcircuit_index(&self, subcircuits: &SubCircuitPair) -> Option<usize>;

    /// Get the partner net of the given net, if any.
    fn second_net_for(&self, first: &Rc<Net>) -> Option<Rc<Net>>;
    /// Get the partner circuit of the given circuit, if any.
    fn second_circuit_for(&self, first: &Rc<Circuit>) -> Option<Rc<Circuit>>;

    /// A human-readable explanation of the status of the indexed top-level circuit.
    fn top_circuit_status_hint(&self, _index: usize) -> String {
        String::new()
    }

    /// A human-readable explanation of the status of the indexed circuit.
    fn circuit_status_hint(&self, _index: usize) -> String {
        String::new()
    }

    /// A human-readable explanation of the status of the indexed child circuit.
    fn child_circuit_status_hint(&self, _circuits: &CircuitPair, _index: usize) -> String {
        String::new()
    }

    /// A human-readable explanation of the status of the indexed net.
    fn net_status_hint(&self, _circuits: &CircuitPair, _index: usize) -> String {
        String::new()
    }

    /// A human-readable explanation of the status of the indexed device.
    fn device_status_hint(&self, _circuits: &CircuitPair, _index: usize) -> String {
        String::new()
    }

    /// A human-readable explanation of the status of the indexed pin.
    fn pin_status_hint(&self, _circuits: &CircuitPair, _index: usize) -> String {
        String::new()
    }

    /// A human-readable explanation of the status of the indexed sub-circuit.
    fn subcircuit_status_hint(&self, _circuits: &CircuitPair, _index: usize) -> String {
        String::new()
    }
}
