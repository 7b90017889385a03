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
//! A `Pin` is a connection point of a circuit towards the outside.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::circuit::Circuit;
use super::net::Net;
use super::traits::NetlistObject;

/// Definition of a pin of a circuit.
///
/// Pins are passed to `Netlist::create_circuit` which assigns the positional ids.
#[derive(Clone)]
pub struct Pin {
    /// Positional ID of the pin.
    pub(super) id: usize,
    /// Reference to the circuit where this pin lives in.
    pub(super) parent_circuit: RefCell<Weak<Circuit>>,
    /// Name of the pin. May be empty.
    name: String,
    /// Net that is connected to this pin from within the circuit.
    pub(super) internal_net: RefCell<Option<Rc<Net>>>,
}

impl Eq for Pin {}

impl PartialEq for Pin {
    /// Pins are considered equal if they have the same parent circuit and the same
    /// ID number.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self
                .parent_circuit
                .borrow()
                .ptr_eq(&other.parent_circuit.borrow())
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pin")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish()
    }
}

impl Pin {
    /// Create a new pin with a name. The positional id is assigned when the circuit
    /// is created.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Pin {
            id: 0,
            name: name.into(),
            internal_net: Default::default(),
            parent_circuit: Default::default(),
        }
    }

    /// Get the name of the pin. May be empty.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the positional ID of the pin.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get the net that is internally connected to this pin, if any.
    pub fn internal_net(&self) -> Option<Rc<Net>> {
        self.internal_net.borrow().clone()
    }

    /// Get the circuit where this pin lives in.
    pub fn parent_circuit(&self) -> Weak<Circuit> {
        self.parent_circuit.borrow().clone()
    }
}

impl NetlistObject for Pin {
    fn raw_name(&self) -> Option<String> {
        if self.name.is_empty() {
            None
        } else {
            Some(self.name.clone())
        }
    }

    fn numeric_id(&self) -> usize {
        self.id
    }
}
