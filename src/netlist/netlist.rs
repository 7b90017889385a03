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
//! The netlist is the container of circuits.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use super::circuit::{Circuit, CircuitIndex};
use super::pin::Pin;

/// Collection of circuits.
pub struct Netlist {
    /// Circuits defined in this netlist, in creation order.
    circuits: Vec<Rc<Circuit>>,
    /// Circuits indexed by name.
    circuits_by_name: HashMap<String, Rc<Circuit>>,
    /// Counter for creating circuit indices.
    circuit_index_counter: usize,
}

impl fmt::Debug for Netlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Netlist")
            .field(
                "circuits",
                &self
                    .circuits
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl fmt::Display for Netlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.circuits {
            fmt::Display::fmt(c.as_ref(), f)?;
        }
        Ok(())
    }
}

impl Default for Netlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Netlist {
    /// Create a new empty netlist.
    pub fn new() -> Self {
        Netlist {
            circuits: Default::default(),
            circuits_by_name: Default::default(),
            // Start at 1 because 0 is used as 'invalid'.
            circuit_index_counter: 1,
        }
    }

    /// Create a new and empty circuit.
    ///
    /// # Example
    /// ```rust
    /// use netlist_xref::netlist::prelude::*;
    ///
    /// let mut netlist = Netlist::new();
    /// let pins = vec![Pin::new("A"), Pin::new("B")];
    /// // Create a circuit with a given name and pin definition.
    /// let top = netlist.create_circuit("TOP", pins);
    /// assert_eq!(top.pin_by_id(0).unwrap().name(), "A");
    /// assert_eq!(top.pin_by_id(1).unwrap().name(), "B");
    /// ```
    ///
    /// # Panics
    /// Panics if a circuit with this name already exists.
    pub fn create_circuit<S: Into<String>>(&mut self, name: S, pins: Vec<Pin>) -> Rc<Circuit> {
        let name = name.into();

        // Check that circuit with this name does not yet exist.
        if self.circuits_by_name.contains_key(&name) {
            panic!("Circuit '{}' already exists!", &name);
        }

        debug!("Create circuit '{}'.", &name);

        let circuit_id = CircuitIndex::new(self.circuit_index_counter);
        self.circuit_index_counter += 1;
        let circuit = Circuit::new(circuit_id, name.clone(), pins);

        let circuit_rc = Rc::new(circuit);
        // Store reference to the circuit itself inside the circuit.
        circuit_rc
            .self_reference
            .replace(Rc::downgrade(&circuit_rc));
        // Store reference to the circuit in its pins.
        circuit_rc.each_pin().for_each(|p| {
            p.parent_circuit.replace(Rc::downgrade(&circuit_rc));
        });

        self.circuits_by_name.insert(name, circuit_rc.clone());
        self.circuits.push(circuit_rc.clone());

        circuit_rc
    }

    /// Return the circuit with the given name. Returns `None` if the circuit does not exist.
    pub fn circuit_by_name(&self, name: &str) -> Option<Rc<Circuit>> {
        self.circuits_by_name.get(name).cloned()
    }

    /// Iterate over all circuits in this netlist, in creation order.
    pub fn each_circuit(&self) -> impl Iterator<Item = &Rc<Circuit>> + ExactSizeIterator {
        self.circuits.iter()
    }

    /// Return the number of circuits in this netlist.
    pub fn circuit_count(&self) -> usize {
        self.circuits.len()
    }

    /// Return the number of top circuits (roots of the instantiation tree).
    pub fn top_circuit_count(&self) -> usize {
        // Count how many circuits are not referenced.
        self.each_circuit().filter(|c| !c.has_references()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::prelude::*;

    #[test]
    fn test_netlist_create_circuit() {
        let mut netlist = Netlist::new();
        let pins = vec![Pin::new("A")];
        let top = netlist.create_circuit("TOP", pins);
        assert_eq!(top.each_pin().len(), 1);
        assert_eq!(netlist.top_circuit_count(), 1);
        assert!(netlist.circuit_by_name("TOP").is_some());
    }

    #[test]
    fn test_netlist_create_net() {
        let mut netlist = Netlist::new();
        let top = netlist.create_circuit("TOP", vec![Pin::new("A")]);

        let net_x = top.create_net(Some("x"));
        assert_eq!(top.net_count(), 1, "net_count() is wrong.");

        // Test if the net can be found by name.
        assert!(
            Rc::ptr_eq(&net_x, &top.net_by_name("x").unwrap()),
            "Failed to find net by name."
        );
    }

    #[test]
    fn test_netlist_connect_pin() {
        let mut netlist = Netlist::new();
        let top = netlist.create_circuit("TOP", vec![Pin::new("TOP_A")]);
        let sub = netlist.create_circuit("SUB", vec![Pin::new("SUB_A")]);

        let net1 = top.create_net(Some("net1"));

        let inst_sub = top.create_subcircuit(&sub, Some("INST_SUB1"));
        inst_sub.connect_pin(0, &net1);

        assert_eq!(net1.subcircuit_pin_count(), 1);
        assert_eq!(inst_sub.net_for_pin(0), Some(net1.clone()));
        assert_eq!(sub.num_references(), 1);

        // Connect net1 to the pin A of the TOP circuit.
        top.connect_pin_by_id(0, net1.clone());
        assert_eq!(net1.pin_count(), 1);
        assert_eq!(top.net_for_pin(0), Some(net1.clone()));
    }

    #[test]
    fn test_netlist_connect_terminal() {
        let mut netlist = Netlist::new();
        let top = netlist.create_circuit("TOP", vec![]);

        let mut res = DeviceClass::new("RES");
        let a = res.add_terminal("A");
        let b = res.add_terminal("B");
        res.equate_terminals(&[a, b]);
        let res = Rc::new(res);

        let net1 = top.create_net(Some("net1"));
        let net2 = top.create_net(Some("net2"));

        let r1 = top.create_device(&res, Some("R1"));
        r1.connect_terminal(a, &net1);
        r1.connect_terminal(b, &net2);

        assert_eq!(net1.terminal_count(), 1);
        assert_eq!(net2.terminal_count(), 1);
        assert_eq!(r1.net_for_terminal(a), Some(net1.clone()));

        // Reconnecting moves the endpoint.
        r1.connect_terminal(a, &net2);
        assert_eq!(net1.terminal_count(), 0);
        assert_eq!(net2.terminal_count(), 2);
    }

    #[test]
    #[should_panic(expected = "Cannot create recursive instances.")]
    fn test_netlist_no_recursion() {
        let mut netlist = Netlist::new();
        let top = netlist.create_circuit("top", vec![]);
        let sub = netlist.create_circuit("sub", vec![]);
        let _sub_inst = top.create_subcircuit(&sub, Some("sub_inst"));
        // This should fail:
        let _top_inst = sub.create_subcircuit(&top, Some("recursive_inst"));
    }

    #[test]
    fn test_netlist_rename_net() {
        let mut netlist = Netlist::new();
        let top = netlist.create_circuit("top", vec![]);

        let net1 = top.create_net(Some("Net1"));
        assert_eq!(Some(net1.clone()), top.net_by_name("Net1"));

        top.rename_net(&net1, Some("NewName"));
        assert_eq!(Some(net1.clone()), top.net_by_name("NewName"));
        assert_eq!(None, top.net_by_name("Net1"));

        top.rename_net::<String>(&net1, None);
        assert_eq!(None, top.net_by_name("NewName"));
        assert_eq!(net1.expanded_name(), format!("__{}", net1.id().value()));
    }
}
