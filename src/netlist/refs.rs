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
//! References from a net to its endpoints: device terminals, outside pins of the parent
//! circuit and pins of sub-circuit instances.
//!
//! The references are small cloneable values. Two references are equal if they name the
//! same endpoint of the same entity (pointer identity plus id).

use std::fmt;
use std::rc::Rc;

use super::device::Device;
use super::net::Net;
use super::pin::Pin;
use super::subcircuit::SubCircuit;
use super::traits::NetlistObject;

/// One endpoint of a net at a device terminal.
#[derive(Clone)]
pub struct NetTerminalRef {
    device: Rc<Device>,
    terminal_id: usize,
}

impl NetTerminalRef {
    /// Create a terminal reference.
    pub fn new(device: Rc<Device>, terminal_id: usize) -> Self {
        NetTerminalRef {
            device,
            terminal_id,
        }
    }

    /// Get the device of this endpoint.
    pub fn device(&self) -> &Rc<Device> {
        &self.device
    }

    /// Get the terminal id of this endpoint.
    pub fn terminal_id(&self) -> usize {
        self.terminal_id
    }

    /// Get the name of the referenced terminal as defined by the device class.
    pub fn terminal_name(&self) -> Option<String> {
        self.device
            .device_class()
            .terminal_definitions()
            .get(self.terminal_id)
            .map(|t| t.name().to_string())
    }

    /// Get the net this endpoint is attached to.
    pub fn net(&self) -> Option<Rc<Net>> {
        self.device.net_for_terminal(self.terminal_id)
    }
}

impl Eq for NetTerminalRef {}

impl PartialEq for NetTerminalRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.device, &other.device) && self.terminal_id == other.terminal_id
    }
}

impl fmt::Debug for NetTerminalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NetTerminalRef({}, {})",
            self.device.expanded_name(),
            self.terminal_id
        )
    }
}

/// One endpoint of a net at an outside pin of the circuit the net lives in.
#[derive(Clone)]
pub struct NetPinRef {
    pin: Rc<Pin>,
}

impl NetPinRef {
    /// Create a pin reference.
    pub fn new(pin: Rc<Pin>) -> Self {
        NetPinRef { pin }
    }

    /// Get the referenced pin.
    pub fn pin(&self) -> &Rc<Pin> {
        &self.pin
    }

    /// Get the net this endpoint is attached to.
    pub fn net(&self) -> Option<Rc<Net>> {
        self.pin.internal_net()
    }
}

impl Eq for NetPinRef {}

impl PartialEq for NetPinRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.pin, &other.pin)
    }
}

impl fmt::Debug for NetPinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetPinRef({})", self.pin.expanded_name())
    }
}

/// One endpoint of a net at a pin of a sub-circuit instance.
#[derive(Clone)]
pub struct NetSubcircuitPinRef {
    subcircuit: Rc<SubCircuit>,
    pin_id: usize,
}

impl NetSubcircuitPinRef {
    /// Create a sub-circuit pin reference.
    pub fn new(subcircuit: Rc<SubCircuit>, pin_id: usize) -> Self {
        NetSubcircuitPinRef { subcircuit, pin_id }
    }

    /// Get the sub-circuit instance of this endpoint.
    pub fn subcircuit(&self) -> &Rc<SubCircuit> {
        &self.subcircuit
    }

    /// Get the pin id of this endpoint.
    pub fn pin_id(&self) -> usize {
        self.pin_id
    }

    /// Get the pin of the instantiated circuit which this endpoint references.
    pub fn pin(&self) -> Option<Rc<Pin>> {
        self.subcircuit
            .circuit_ref()
            .upgrade()
            .and_then(|c| c.pin_by_id(self.pin_id))
    }

    /// Get the net this endpoint is attached to.
    pub fn net(&self) -> Option<Rc<Net>> {
        self.subcircuit.net_for_pin(self.pin_id)
    }
}

impl Eq for NetSubcircuitPinRef {}

impl PartialEq for NetSubcircuitPinRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.subcircuit, &other.subcircuit) && self.pin_id == other.pin_id
    }
}

impl fmt::Debug for NetSubcircuitPinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NetSubcircuitPinRef({}, {})",
            self.subcircuit.expanded_name(),
            self.pin_id
        )
    }
}
