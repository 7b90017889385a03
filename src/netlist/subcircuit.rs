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
//! A `SubCircuit` is an instantiation of a circuit inside a parent circuit.
//! Its pins reference the pins of the instantiated circuit.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::circuit::Circuit;
use super::net::Net;
use super::refs::NetSubcircuitPinRef;
use super::traits::NetlistObject;

/// Data type used for identifying a sub-circuit instance.
/// The value is unique within the parent circuit and is used as the textual identity
/// of unnamed instances.
#[derive(Copy, Clone, Debug, Hash, PartialOrd, PartialEq, Ord, Eq)]
pub struct SubCircuitIndex {
    index: usize,
}

impl SubCircuitIndex {
    pub(super) fn new(index: usize) -> Self {
        SubCircuitIndex { index }
    }

    /// Get the integer value of this index.
    pub fn value(&self) -> usize {
        self.index
    }
}

/// Represents an instantiation of a circuit inside a parent circuit.
///
/// Sub-circuits are created with `Circuit::create_subcircuit`. Connecting one of its
/// pins registers a `NetSubcircuitPinRef` endpoint on the net.
pub struct SubCircuit {
    /// ID of the sub-circuit. Uniquely identifies the instance within the parent circuit.
    pub(super) id: SubCircuitIndex,
    /// Instance name.
    pub(super) name: RefCell<Option<String>>,
    /// Circuit of which this is an instance (template).
    circuit: Weak<Circuit>,
    /// Circuit where this instance lives in.
    pub(super) parent_circuit: Weak<Circuit>,
    /// Reference to this instance itself. Needed to create pin references.
    pub(super) self_reference: RefCell<Weak<SubCircuit>>,
    /// Nets connected to the pins of this instance, by pin id.
    pin_nets: RefCell<BTreeMap<usize, Rc<Net>>>,
}

impl fmt::Debug for SubCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubCircuit")
            .field("name", &self.name.borrow())
            .field("id", &self.id.value())
            .field(
                "circuit_ref",
                &self.circuit.upgrade().map(|c| c.name().to_string()),
            )
            .finish()
    }
}

impl SubCircuit {
    pub(super) fn new(
        id: SubCircuitIndex,
        name: Option<String>,
        circuit: Weak<Circuit>,
        parent: Weak<Circuit>,
    ) -> Self {
        SubCircuit {
            id,
            name: RefCell::new(name),
            circuit,
            parent_circuit: parent,
            self_reference: Default::default(),
            pin_nets: Default::default(),
        }
    }

    /// Return the name of this instance.
    pub fn name(&self) -> Option<String> {
        self.name.borrow().clone()
    }

    /// Get the index of this instance.
    /// The index uniquely identifies this instance within the parent circuit.
    pub fn id(&self) -> SubCircuitIndex {
        self.id
    }

    /// Get the circuit template referenced by this instance.
    pub fn circuit_ref(&self) -> Weak<Circuit> {
        self.circuit.clone()
    }

    /// Get the circuit where this instance lives in.
    pub fn parent_circuit(&self) -> Weak<Circuit> {
        self.parent_circuit.clone()
    }

    /// Connect a pin of this instance to a net in the parent circuit.
    /// A previously connected net is disconnected first.
    ///
    /// # Panics
    /// * Panics if the pin id is not defined by the instantiated circuit.
    /// * Panics if the net does not live in the parent circuit of this instance.
    pub fn connect_pin(&self, pin_id: usize, net: &Rc<Net>) {
        let template = self
            .circuit
            .upgrade()
            .expect("Instantiated circuit does not exist anymore.");
        assert!(
            pin_id < template.pin_count(),
            "Circuit '{}' has no pin with id {}.",
            template.name(),
            pin_id
        );
        assert!(
            net.parent_circuit().ptr_eq(&self.parent_circuit),
            "Net does not live in the same circuit as the sub-circuit."
        );

        self.disconnect_pin(pin_id);

        let this = self
            .self_reference
            .borrow()
            .upgrade()
            .expect("Sub-circuit is not registered in a circuit.");
        net.subcircuit_pins
            .borrow_mut()
            .push(NetSubcircuitPinRef::new(this, pin_id));
        self.pin_nets.borrow_mut().insert(pin_id, net.clone());
    }

    /// Disconnect a pin from the attached net, if any.
    /// Returns the previously connected net.
    pub fn disconnect_pin(&self, pin_id: usize) -> Option<Rc<Net>> {
        let old_net = self.pin_nets.borrow_mut().remove(&pin_id);
        if let Some(old_net) = &old_net {
            let this = self.self_reference.borrow().clone();
            old_net.subcircuit_pins.borrow_mut().retain(|r| {
                !(this.ptr_eq(&Rc::downgrade(r.subcircuit())) && r.pin_id() == pin_id)
            });
        }
        old_net
    }

    /// Get the net connected to the given pin, if any.
    pub fn net_for_pin(&self, pin_id: usize) -> Option<Rc<Net>> {
        self.pin_nets.borrow().get(&pin_id).cloned()
    }

    /// Get the net reference for the given pin, if the pin is connected.
    pub fn netref_for_pin(&self, pin_id: usize) -> Option<NetSubcircuitPinRef> {
        if self.pin_nets.borrow().contains_key(&pin_id) {
            let this = self.self_reference.borrow().upgrade()?;
            Some(NetSubcircuitPinRef::new(this, pin_id))
        } else {
            None
        }
    }
}

impl Eq for SubCircuit {}

impl PartialEq for SubCircuit {
    /// A sub-circuit is considered equal if the ID and parent circuit are identical.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.parent_circuit.ptr_eq(&other.parent_circuit)
    }
}

impl NetlistObject for SubCircuit {
    fn raw_name(&self) -> Option<String> {
        self.name().filter(|n| !n.is_empty())
    }

    fn numeric_id(&self) -> usize {
        self.id.value()
    }
}
