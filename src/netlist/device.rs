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
//! A `Device` is an instance of a primitive component (resistor, capacitor,
//! transistor, ...) inside a circuit. Its terminals connect to nets.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::circuit::Circuit;
use super::device_class::DeviceClass;
use super::net::Net;
use super::refs::NetTerminalRef;
use super::traits::NetlistObject;

/// Data type used for identifying a device.
/// The value is unique within the circuit the device lives in and is used as the
/// textual identity of unnamed devices.
#[derive(Copy, Clone, Debug, Hash, PartialOrd, PartialEq, Ord, Eq)]
pub struct DeviceIndex {
    index: usize,
}

impl DeviceIndex {
    pub(super) fn new(index: usize) -> Self {
        DeviceIndex { index }
    }

    /// Get the integer value of this index.
    pub fn value(&self) -> usize {
        self.index
    }
}

/// An instance of a primitive device inside a circuit.
///
/// Devices are created with `Circuit::create_device`. Connecting a terminal registers a
/// `NetTerminalRef` endpoint on the net.
pub struct Device {
    /// ID of the device. This uniquely identifies the device within the parent circuit.
    pub(super) id: DeviceIndex,
    /// Name of the device.
    pub(super) name: RefCell<Option<String>>,
    /// The kind of this device.
    device_class: Rc<DeviceClass>,
    /// The circuit where the device lives in.
    pub(super) parent_circuit: Weak<Circuit>,
    /// Reference to this device itself. Needed to create terminal references.
    pub(super) self_reference: RefCell<Weak<Device>>,
    /// Nets connected to the terminals, by terminal id.
    terminal_nets: RefCell<BTreeMap<usize, Rc<Net>>>,
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("name", &self.name.borrow())
            .field("id", &self.id.value())
            .field("device_class", &self.device_class.name())
            .finish()
    }
}

impl Device {
    pub(super) fn new(
        id: DeviceIndex,
        name: Option<String>,
        device_class: Rc<DeviceClass>,
        parent: Weak<Circuit>,
    ) -> Self {
        Device {
            id,
            name: RefCell::new(name),
            device_class,
            parent_circuit: parent,
            self_reference: Default::default(),
            terminal_nets: Default::default(),
        }
    }

    /// Return the name of this device.
    pub fn name(&self) -> Option<String> {
        self.name.borrow().clone()
    }

    /// Get the index of this device.
    /// The index uniquely identifies this device within the circuit.
    pub fn id(&self) -> DeviceIndex {
        self.id
    }

    /// Get the class of this device.
    pub fn device_class(&self) -> &Rc<DeviceClass> {
        &self.device_class
    }

    /// Get the circuit where this device lives in.
    pub fn parent_circuit(&self) -> Weak<Circuit> {
        self.parent_circuit.clone()
    }

    /// Connect a terminal to a net that lives in the same circuit.
    /// A previously connected net is disconnected first.
    ///
    /// # Panics
    /// * Panics if the terminal id is not defined by the device class.
    /// * Panics if the net does not live in the parent circuit of this device.
    pub fn connect_terminal(&self, terminal_id: usize, net: &Rc<Net>) {
        assert!(
            self.device_class.has_terminal(terminal_id),
            "Device class '{}' has no terminal with id {}.",
            self.device_class.name(),
            terminal_id
        );
        assert!(
            net.parent_circuit().ptr_eq(&self.parent_circuit),
            "Net does not live in the same circuit as the device."
        );

        self.disconnect_terminal(terminal_id);

        let this = self
            .self_reference
            .borrow()
            .upgrade()
            .expect("Device is not registered in a circuit.");
        net.terminals
            .borrow_mut()
            .push(NetTerminalRef::new(this, terminal_id));
        self.terminal_nets.borrow_mut().insert(terminal_id, net.clone());
    }

    /// Disconnect a terminal from the attached net, if any.
    /// Returns the previously connected net.
    pub fn disconnect_terminal(&self, terminal_id: usize) -> Option<Rc<Net>> {
        let old_net = self.terminal_nets.borrow_mut().remove(&terminal_id);
        if let Some(old_net) = &old_net {
            let this = self.self_reference.borrow().clone();
            old_net.terminals.borrow_mut().retain(|t| {
                !(this.ptr_eq(&Rc::downgrade(t.device())) && t.terminal_id() == terminal_id)
            });
        }
        old_net
    }

    /// Get the net connected to the given terminal, if any.
    pub fn net_for_terminal(&self, terminal_id: usize) -> Option<Rc<Net>> {
        self.terminal_nets.borrow().get(&terminal_id).cloned()
    }
}

impl Eq for Device {}

impl PartialEq for Device {
    /// A device is considered equal if the ID and parent circuit are identical.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.parent_circuit.ptr_eq(&other.parent_circuit)
    }
}

impl NetlistObject for Device {
    fn raw_name(&self) -> Option<String> {
        self.name().filter(|n| !n.is_empty())
    }

    fn numeric_id(&self) -> usize {
        self.id.value()
    }
}
