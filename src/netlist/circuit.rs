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
//! A `Circuit` is a named block of a netlist. It is defined by pins interfacing to the
//! outside of the circuit, devices and sub-circuit instances that live inside the
//! circuit and nets that do the internal connections.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use itertools::Itertools;

use super::device::{Device, DeviceIndex};
use super::device_class::DeviceClass;
use super::net::{Net, NetIndex};
use super::pin::Pin;
use super::refs::NetPinRef;
use super::subcircuit::{SubCircuit, SubCircuitIndex};
use super::traits::NetlistObject;

/// Data type used for identifying a circuit.
/// The value is unique within the netlist the circuit lives in.
#[derive(Copy, Clone, Debug, Hash, PartialOrd, PartialEq, Ord, Eq)]
pub struct CircuitIndex {
    index: usize,
}

impl CircuitIndex {
    pub(super) fn new(index: usize) -> Self {
        CircuitIndex { index }
    }

    /// Get the integer value of this index.
    pub fn value(&self) -> usize {
        self.index
    }
}

/// Get the value of a counter and increment the counter afterwards.
fn next_id(counter: &Cell<usize>) -> usize {
    let id = counter.get();
    counter.set(id + 1);
    id
}

/// Circuits are the basic building blocks of the netlist.
///
/// A circuit has pins by which it can connect to the outside. Inside, it holds nets,
/// devices and sub-circuit instances. Circuits are created with
/// `Netlist::create_circuit`; their content is created with the `create_*` methods on
/// the circuit itself.
pub struct Circuit {
    /// Name of the circuit.
    pub(super) name: String,
    /// Index of the circuit. This is automatically set when creating a circuit in the
    /// `Netlist`. The ID uniquely identifies a circuit within the netlist.
    id: CircuitIndex,
    /// Reference to this circuit itself.
    pub(super) self_reference: RefCell<Weak<Circuit>>,
    /// Pins of the circuit towards the outside.
    pins: Vec<Rc<Pin>>,
    /// The nets that are defined inside this circuit, in creation order.
    nets: RefCell<Vec<Rc<Net>>>,
    /// Nets indexed by name.
    nets_by_name: RefCell<HashMap<String, Rc<Net>>>,
    /// Counter for creating net IDs.
    next_net_id: Cell<usize>,
    /// The devices inside this circuit, in creation order.
    devices: RefCell<Vec<Rc<Device>>>,
    /// Counter for creating device IDs.
    next_device_id: Cell<usize>,
    /// Sub-circuit instances inside this circuit, in creation order.
    subcircuits: RefCell<Vec<Rc<SubCircuit>>>,
    /// Counter for creating sub-circuit instance IDs.
    next_subcircuit_id: Cell<usize>,
    /// All the instances of this circuit in other circuits.
    references: RefCell<Vec<Rc<SubCircuit>>>,
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Circuit")
            .field("name", &self.name)
            .field("id", &self.id.value())
            .field("pins", &self.pins.iter().map(|p| p.name()).collect_vec())
            .finish()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pin_names = self
            .each_pin()
            .map(|p| {
                let netname = p.internal_net().map(|n| n.expanded_name());
                format!("{}={:?}", p.name(), netname)
            })
            .join(" ");
        writeln!(f, ".subckt {} {}", self.name, pin_names)?;

        for d in self.devices.borrow().iter() {
            let nets = d
                .device_class()
                .terminal_definitions()
                .iter()
                .map(|t| {
                    let netname = d.net_for_terminal(t.id()).map(|n| n.expanded_name());
                    format!("{}={:?}", t.name(), netname)
                })
                .join(" ");
            writeln!(
                f,
                "    D{} {} {}",
                d.expanded_name(),
                d.device_class().name(),
                nets
            )?;
        }

        for c in self.subcircuits.borrow().iter() {
            let sub_template = c
                .circuit_ref()
                .upgrade()
                .map(|t| t.name().to_string())
                .unwrap_or_default();
            let nets = (0..c.circuit_ref().upgrade().map(|t| t.pin_count()).unwrap_or(0))
                .map(|pin_id| {
                    let netname = c.net_for_pin(pin_id).map(|n| n.expanded_name());
                    format!("{}={:?}", pin_id, netname)
                })
                .join(" ");
            writeln!(f, "    X{} {} {}", c.expanded_name(), sub_template, nets)?;
        }
        writeln!(f, ".ends {}", self.name)
    }
}

impl Eq for Circuit {}

impl PartialEq for Circuit {
    /// Circuits are considered equal if they are the same object.
    fn eq(&self, other: &Self) -> bool {
        self.self_reference
            .borrow()
            .ptr_eq(&other.self_reference.borrow())
    }
}

impl Circuit {
    /// Create a new circuit.
    ///
    /// This is not exposed in the crate API. Instead, circuits shall be created
    /// with `Netlist::create_circuit()`.
    pub(super) fn new(circuit_id: CircuitIndex, name: String, pins: Vec<Pin>) -> Self {
        // Set the pin IDs and put the pins into an `Rc`.
        let pins = pins
            .into_iter()
            .enumerate()
            .map(|(pin_id, mut p)| {
                p.id = pin_id;
                Rc::new(p)
            })
            .collect();

        Circuit {
            name,
            id: circuit_id,
            self_reference: Default::default(),
            pins,
            nets: Default::default(),
            nets_by_name: Default::default(),
            // IDs start at 1 because 0 is used as 'invalid'.
            next_net_id: Cell::new(1),
            devices: Default::default(),
            next_device_id: Cell::new(1),
            subcircuits: Default::default(),
            next_subcircuit_id: Cell::new(1),
            references: Default::default(),
        }
    }

    /// Get the name of this circuit.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the ID of this circuit.
    /// The ID uniquely identifies a circuit within the netlist.
    pub fn id(&self) -> CircuitIndex {
        self.id
    }

    /// Get weak reference to this circuit.
    pub(super) fn self_reference(&self) -> Weak<Self> {
        self.self_reference.borrow().clone()
    }

    // Pins.

    /// Iterate over all pins.
    pub fn each_pin(&self) -> impl Iterator<Item = &Rc<Pin>> + ExactSizeIterator {
        self.pins.iter()
    }

    /// Get a pin by its ID.
    /// Returns `None` if the ID does not exist.
    pub fn pin_by_id(&self, pin_id: usize) -> Option<Rc<Pin>> {
        self.pins.get(pin_id).cloned()
    }

    /// Find a pin by its name.
    /// Returns `None` if the name is not found.
    pub fn pin_by_name(&self, pin_name: &str) -> Option<Rc<Pin>> {
        self.pins.iter().find(|p| p.name() == pin_name).cloned()
    }

    /// Get the number of pins.
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Connect a pin with the given internal net, or disconnect it if `None` is given.
    ///
    /// Returns the previously connected net.
    ///
    /// # Panics
    /// * Panics if the pin with this ID does not exist.
    /// * Panics if the net does not live in this circuit.
    pub fn connect_pin_by_id<N: Into<Option<Rc<Net>>>>(
        &self,
        pin_id: usize,
        net: N,
    ) -> Option<Rc<Net>> {
        let pin = self
            .pins
            .get(pin_id)
            .expect("Pin with this index does not exist.");
        let net = net.into();

        if let Some(net) = &net {
            assert!(
                net.parent_circuit().ptr_eq(&self.self_reference()),
                "Net does not live in this circuit."
            );
        }

        let old_net = pin.internal_net.replace(net.clone());

        if let Some(old_net) = &old_net {
            // Remove this endpoint from the old net.
            old_net
                .pins
                .borrow_mut()
                .retain(|r| !Rc::ptr_eq(r.pin(), pin));
        }
        if let Some(net) = &net {
            net.pins.borrow_mut().push(NetPinRef::new(pin.clone()));
        }

        old_net
    }

    /// Disconnect the pin from the internal net.
    /// Returns the previously connected net.
    ///
    /// # Panics
    /// Panics if the pin with this ID does not exist.
    pub fn disconnect_pin_by_id(&self, pin_id: usize) -> Option<Rc<Net>> {
        self.connect_pin_by_id(pin_id, None)
    }

    /// Get the net connected to this pin.
    ///
    /// # Panics
    /// Panics if the pin does not exist.
    pub fn net_for_pin(&self, pin_id: usize) -> Option<Rc<Net>> {
        self.pin_by_id(pin_id)
            .expect("Pin does not exist.")
            .internal_net()
    }

    // Nets.

    /// Create a named or anonymous net.
    ///
    /// # Panics
    /// Panics if there is already a net with this name.
    pub fn create_net<S: Into<String>>(&self, name: Option<S>) -> Rc<Net> {
        let name = name.map(|n| n.into());

        let net_index = NetIndex::new(next_id(&self.next_net_id));

        if let Some(name) = &name {
            assert!(
                !self.nets_by_name.borrow().contains_key(name),
                "Net name already exists."
            );
        }

        let net = Rc::new(Net::new(net_index, name.clone(), self.self_reference()));

        if let Some(name) = name {
            self.nets_by_name.borrow_mut().insert(name, net.clone());
        }
        self.nets.borrow_mut().push(net.clone());

        net
    }

    /// Change the name of a net.
    ///
    /// # Panics
    /// * Panics if there is already another net with this name.
    /// * Panics if the net does not live in this circuit.
    pub fn rename_net<S: Into<String>>(&self, net: &Rc<Net>, name: Option<S>) {
        assert!(
            net.parent_circuit().ptr_eq(&self.self_reference()),
            "Net does not live in this circuit."
        );

        let name: Option<String> = name.map(|n| n.into());
        if let Some(name) = &name {
            if let Some(other) = self.net_by_name(name) {
                if Rc::ptr_eq(&other, net) {
                    return;
                }
                panic!("Net name already exists.");
            }
        }

        let maybe_old_name = net.name.replace(name.clone());
        let mut nets_by_name = self.nets_by_name.borrow_mut();
        if let Some(old_name) = maybe_old_name {
            nets_by_name.remove(&old_name);
        }
        if let Some(name) = name {
            nets_by_name.insert(name, net.clone());
        }
    }

    /// Find a net by its name. Returns `None` if the net name does not exist.
    pub fn net_by_name(&self, name: &str) -> Option<Rc<Net>> {
        self.nets_by_name.borrow().get(name).cloned()
    }

    /// Borrow the list of nets, in creation order.
    pub fn nets(&self) -> impl Deref<Target = Vec<Rc<Net>>> + '_ {
        self.nets.borrow()
    }

    /// Return the number of nets defined in this circuit.
    pub fn net_count(&self) -> usize {
        self.nets.borrow().len()
    }

    // Devices.

    /// Create a named or anonymous device of the given class.
    pub fn create_device<S: Into<String>>(
        &self,
        device_class: &Rc<DeviceClass>,
        name: Option<S>,
    ) -> Rc<Device> {
        let id = DeviceIndex::new(next_id(&self.next_device_id));
        let device = Rc::new(Device::new(
            id,
            name.map(|n| n.into()),
            device_class.clone(),
            self.self_reference(),
        ));
        device.self_reference.replace(Rc::downgrade(&device));
        self.devices.borrow_mut().push(device.clone());
        device
    }

    /// Borrow the list of devices, in creation order.
    pub fn devices(&self) -> impl Deref<Target = Vec<Rc<Device>>> + '_ {
        self.devices.borrow()
    }

    /// Return the number of devices in this circuit.
    pub fn device_count(&self) -> usize {
        self.devices.borrow().len()
    }

    /// Get a device by its index.
    pub fn device_by_id(&self, id: &DeviceIndex) -> Option<Rc<Device>> {
        self.devices
            .borrow()
            .iter()
            .find(|d| d.id() == *id)
            .cloned()
    }

    // Sub-circuits.

    /// Create a named or anonymous instance of a given circuit.
    ///
    /// # Panics
    /// Panics if the instantiation is recursive.
    pub fn create_subcircuit<S: Into<String>>(
        &self,
        template_circuit: &Rc<Circuit>,
        name: Option<S>,
    ) -> Rc<SubCircuit> {
        {
            // Check that creating this instance does not create a cycle in the
            // dependency graph. There can be no recursive instances.
            let mut stack: Vec<Rc<Circuit>> = vec![template_circuit.clone()];
            while let Some(c) = stack.pop() {
                if c.self_reference.borrow().ptr_eq(&self.self_reference()) {
                    panic!("Cannot create recursive instances.");
                }
                for sc in c.subcircuits.borrow().iter() {
                    if let Some(t) = sc.circuit_ref().upgrade() {
                        stack.push(t);
                    }
                }
            }
        }

        let id = SubCircuitIndex::new(next_id(&self.next_subcircuit_id));
        let subcircuit = Rc::new(SubCircuit::new(
            id,
            name.map(|n| n.into()),
            Rc::downgrade(template_circuit),
            self.self_reference(),
        ));
        subcircuit
            .self_reference
            .replace(Rc::downgrade(&subcircuit));

        self.subcircuits.borrow_mut().push(subcircuit.clone());
        // Create an entry in the template circuit.
        template_circuit
            .references
            .borrow_mut()
            .push(subcircuit.clone());

        subcircuit
    }

    /// Borrow the list of sub-circuit instances, in creation order.
    pub fn subcircuits(&self) -> impl Deref<Target = Vec<Rc<SubCircuit>>> + '_ {
        self.subcircuits.borrow()
    }

    /// Return the number of sub-circuit instances in this circuit.
    pub fn subcircuit_count(&self) -> usize {
        self.subcircuits.borrow().len()
    }

    /// Get the distinct circuits instantiated inside this circuit, in first-seen order.
    pub fn each_child_circuit(&self) -> Vec<Rc<Circuit>> {
        self.subcircuits
            .borrow()
            .iter()
            .filter_map(|sc| sc.circuit_ref().upgrade())
            .unique_by(|c| c.id())
            .collect()
    }

    /// Return the number of distinct circuits instantiated inside this circuit.
    pub fn child_circuit_count(&self) -> usize {
        self.each_child_circuit().len()
    }

    // References.

    /// Borrow the list of instances of this circuit in other circuits.
    pub fn references(&self) -> impl Deref<Target = Vec<Rc<SubCircuit>>> + '_ {
        self.references.borrow()
    }

    /// Get the number of sub-circuit instances that reference this circuit.
    pub fn num_references(&self) -> usize {
        self.references.borrow().len()
    }

    /// Test if the circuit has references, i.e. is instantiated somewhere.
    pub fn has_references(&self) -> bool {
        !self.references.borrow().is_empty()
    }
}

impl NetlistObject for Circuit {
    fn raw_name(&self) -> Option<String> {
        if self.name.is_empty() {
            None
        } else {
            Some(self.name.clone())
        }
    }

    fn numeric_id(&self) -> usize {
        self.id.value()
    }
}
