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
//! The incarnation of the indexed netlist model for a single netlist.
//!
//! Indices are computed by sorting the live collections with the deterministic
//! comparators; the sorted sequences are cached per parent object. All second sides
//! are empty and all statuses are `Status::None`.

use std::cell::RefCell;
use std::rc::Rc;

use fnv::FnvHashMap;

use crate::netlist::prelude::*;
use crate::rc_key::RcKey;
use crate::xref::order::{
    cmp_by_expanded_name_fast, cmp_by_name, cmp_by_terminal_id, cmp_optional, cmp_pair,
    cmp_value_pair,
};
use crate::xref::{
    CircuitPair, DevicePair, NetPair, NetPinPair, NetSubcircuitPinPair, NetTerminalPair, PinPair,
    Status, SubCircuitPair,
};

use super::indexed_model::IndexedNetlistModel;

/// Indexed view over a single netlist.
pub struct SingleIndexedNetlistModel {
    netlist: Rc<Netlist>,

    circuits: RefCell<Option<Vec<CircuitPair>>>,
    top_circuits: RefCell<Option<Vec<CircuitPair>>>,
    child_circuits: RefCell<FnvHashMap<RcKey<Circuit>, Vec<CircuitPair>>>,
    nets: RefCell<FnvHashMap<RcKey<Circuit>, Vec<NetPair>>>,
    devices: RefCell<FnvHashMap<RcKey<Circuit>, Vec<DevicePair>>>,
    subcircuits: RefCell<FnvHashMap<RcKey<Circuit>, Vec<SubCircuitPair>>>,
    terminal_refs: RefCell<FnvHashMap<RcKey<Net>, Vec<NetTerminalPair>>>,
    pin_refs: RefCell<FnvHashMap<RcKey<Net>, Vec<NetPinPair>>>,
    subcircuit_pin_refs: RefCell<FnvHashMap<RcKey<Net>, Vec<NetSubcircuitPinPair>>>,
    subcircuit_pins: RefCell<FnvHashMap<RcKey<SubCircuit>, Vec<NetSubcircuitPinPair>>>,
}

/// Get the indexed element of a per-parent cache, filling the cache on first access.
fn nth_cached<P, V: Clone>(
    cache: &RefCell<FnvHashMap<RcKey<P>, Vec<V>>>,
    parent: &Rc<P>,
    index: usize,
    fill: impl FnOnce() -> Vec<V>,
) -> Option<V> {
    let mut map = cache.borrow_mut();
    let entries = map.entry(RcKey::new(parent)).or_insert_with(fill);
    entries.get(index).cloned()
}

/// Find the position of an element in a per-parent cache, filling the cache on first
/// access.
fn position_cached<P, V>(
    cache: &RefCell<FnvHashMap<RcKey<P>, Vec<V>>>,
    parent: &Rc<P>,
    fill: impl FnOnce() -> Vec<V>,
    pred: impl Fn(&V) -> bool,
) -> Option<usize> {
    let mut map = cache.borrow_mut();
    let entries = map.entry(RcKey::new(parent)).or_insert_with(fill);
    entries.iter().position(pred)
}

/// Turn one-sided handles into sorted pairs.
fn sorted_handle_pairs<T, F>(items: Vec<Rc<T>>, cmp: F) -> Vec<(Option<Rc<T>>, Option<Rc<T>>)>
where
    F: Fn(&T, &T) -> std::cmp::Ordering + Copy,
{
    let mut pairs: Vec<_> = items.into_iter().map(|x| (Some(x), None)).collect();
    pairs.sort_by(|a, b| cmp_pair(a, b, cmp));
    pairs
}

/// Turn one-sided value references into sorted pairs.
fn sorted_ref_pairs<T, F>(items: Vec<T>, cmp: F) -> Vec<(Option<T>, Option<T>)>
where
    F: Fn(&T, &T) -> std::cmp::Ordering + Copy,
{
    let mut pairs: Vec<_> = items.into_iter().map(|x| (Some(x), None)).collect();
    pairs.sort_by(|a, b| cmp_value_pair(a, b, cmp));
    pairs
}

impl SingleIndexedNetlistModel {
    /// Create an indexed view over the given netlist.
    pub fn new(netlist: Rc<Netlist>) -> Self {
        SingleIndexedNetlistModel {
            netlist,
            circuits: Default::default(),
            top_circuits: Default::default(),
            child_circuits: Default::default(),
            nets: Default::default(),
            devices: Default::default(),
            subcircuits: Default::default(),
            terminal_refs: Default::default(),
            pin_refs: Default::default(),
            subcircuit_pin_refs: Default::default(),
            subcircuit_pins: Default::default(),
        }
    }

    fn all_circuits(&self) -> Vec<CircuitPair> {
        self.circuits
            .borrow_mut()
            .get_or_insert_with(|| {
                sorted_handle_pairs(
                    self.netlist.each_circuit().cloned().collect(),
                    cmp_by_name::<Circuit>,
                )
            })
            .clone()
    }

    fn all_top_circuits(&self) -> Vec<CircuitPair> {
        self.top_circuits
            .borrow_mut()
            .get_or_insert_with(|| {
                sorted_handle_pairs(
                    self.netlist
                        .each_circuit()
                        .filter(|c| !c.has_references())
                        .cloned()
                        .collect(),
                    cmp_by_name::<Circuit>,
                )
            })
            .clone()
    }

    fn fill_child_circuits(circuit: &Rc<Circuit>) -> Vec<CircuitPair> {
        sorted_handle_pairs(circuit.each_child_circuit(), cmp_by_name::<Circuit>)
    }

    fn fill_nets(circuit: &Rc<Circuit>) -> Vec<NetPair> {
        sorted_handle_pairs(circuit.nets().clone(), cmp_by_expanded_name_fast::<Net>)
    }

    fn fill_devices(circuit: &Rc<Circuit>) -> Vec<DevicePair> {
        sorted_handle_pairs(
            circuit.devices().clone(),
            cmp_by_expanded_name_fast::<Device>,
        )
    }

    fn fill_subcircuits(circuit: &Rc<Circuit>) -> Vec<SubCircuitPair> {
        sorted_handle_pairs(
            circuit.subcircuits().clone(),
            cmp_by_expanded_name_fast::<SubCircuit>,
        )
    }

    fn fill_terminal_refs(net: &Rc<Net>) -> Vec<NetTerminalPair> {
        sorted_ref_pairs(net.terminals().clone(), cmp_by_terminal_id)
    }

    fn fill_pin_refs(net: &Rc<Net>) -> Vec<NetPinPair> {
        sorted_ref_pairs(net.pins().clone(), |a, b| {
            cmp_by_expanded_name_fast(a.pin().as_ref(), b.pin().as_ref())
        })
    }

    fn fill_subcircuit_pin_refs(net: &Rc<Net>) -> Vec<NetSubcircuitPinPair> {
        sorted_ref_pairs(net.subcircuit_pins().clone(), |a, b| {
            cmp_optional(
                a.pin().as_deref(),
                b.pin().as_deref(),
                cmp_by_expanded_name_fast,
            )
        })
    }

    /// One entry per pin of the instantiated circuit, in pin order. Unconnected pins
    /// get a synthetic reference so every pin shows up.
    fn fill_subcircuit_pins(subcircuit: &Rc<SubCircuit>) -> Vec<NetSubcircuitPinPair> {
        let pin_count = subcircuit
            .circuit_ref()
            .upgrade()
            .map(|c| c.pin_count())
            .unwrap_or(0);
        (0..pin_count)
            .map(|pin_id| {
                let r = subcircuit
                    .netref_for_pin(pin_id)
                    .unwrap_or_else(|| NetSubcircuitPinRef::new(subcircuit.clone(), pin_id));
                (Some(r), None)
            })
            .collect()
    }
}

impl IndexedNetlistModel for SingleIndexedNetlistModel {
    fn is_single(&self) -> bool {
        true
    }

    fn circuit_count(&self) -> usize {
        self.netlist.circuit_count()
    }

    fn top_circuit_count(&self) -> usize {
        self.netlist.top_circuit_count()
    }

    fn child_circuit_count(&self, circuits: &CircuitPair) -> usize {
        circuits
            .0
            .as_ref()
            .map(|c| c.child_circuit_count())
            .unwrap_or(0)
    }

    fn net_count(&self, circuits: &CircuitPair) -> usize {
        circuits.0.as_ref().map(|c| c.net_count()).unwrap_or(0)
    }

    fn device_count(&self, circuits: &CircuitPair) -> usize {
        circuits.0.as_ref().map(|c| c.device_count()).unwrap_or(0)
    }

    fn pin_count(&self, circuits: &CircuitPair) -> usize {
        circuits.0.as_ref().map(|c| c.pin_count()).unwrap_or(0)
    }

    fn subcircuit_count(&self, circuits: &CircuitPair) -> usize {
        circuits
            .0
            .as_ref()
            .map(|c| c.subcircuit_count())
            .unwrap_or(0)
    }

    fn net_terminal_count(&self, nets: &NetPair) -> usize {
        nets.0.as_ref().map(|n| n.terminal_count()).unwrap_or(0)
    }

    fn net_pin_count(&self, nets: &NetPair) -> usize {
        nets.0.as_ref().map(|n| n.pin_count()).unwrap_or(0)
    }

    fn net_subcircuit_pin_count(&self, nets: &NetPair) -> usize {
        nets.0
            .as_ref()
            .map(|n| n.subcircuit_pin_count())
            .unwrap_or(0)
    }

    fn subcircuit_pin_count(&self, subcircuits: &SubCircuitPair) -> usize {
        subcircuits
            .0
            .as_ref()
            .and_then(|s| s.circuit_ref().upgrade())
            .map(|c| c.pin_count())
            .unwrap_or(0)
    }

    fn parent_of_net(&self, nets: &NetPair) -> CircuitPair {
        (
            nets.0.as_ref().and_then(|n| n.parent_circuit().upgrade()),
            None,
        )
    }

    fn parent_of_device(&self, devices: &DevicePair) -> CircuitPair {
        (
            devices
                .0
                .as_ref()
                .and_then(|d| d.parent_circuit().upgrade()),
            None,
        )
    }

    fn parent_of_subcircuit(&self, subcircuits: &SubCircuitPair) -> CircuitPair {
        (
            subcircuits
                .0
                .as_ref()
                .and_then(|s| s.parent_circuit().upgrade()),
            None,
        )
    }

    fn circuit_from_index(&self, index: usize) -> Option<(CircuitPair, Status, String)> {
        self.all_circuits()
            .get(index)
            .cloned()
            .map(|cp| (cp, Status::None, String::new()))
    }

    fn top_circuit_from_index(&self, index: usize) -> Option<(CircuitPair, Status, String)> {
        self.all_top_circuits()
            .get(index)
            .cloned()
            .map(|cp| (cp, Status::None, String::new()))
    }

    fn child_circuit_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(CircuitPair, Status, String)> {
        let parent = circuits.0.as_ref()?;
        nth_cached(&self.child_circuits, parent, index, || {
            Self::fill_child_circuits(parent)
        })
        .map(|cp| (cp, Status::None, String::new()))
    }

    fn net_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(NetPair, Status, String)> {
        let parent = circuits.0.as_ref()?;
        nth_cached(&self.nets, parent, index, || Self::fill_nets(parent))
            .map(|np| (np, Status::None, String::new()))
    }

    fn device_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(DevicePair, Status, String)> {
        let parent = circuits.0.as_ref()?;
        nth_cached(&self.devices, parent, index, || Self::fill_devices(parent))
            .map(|dp| (dp, Status::None, String::new()))
    }

    fn pin_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(PinPair, Status, String)> {
        // Pins keep their declaration order.
        let parent = circuits.0.as_ref()?;
        parent
            .pin_by_id(index)
            .map(|p| ((Some(p), None), Status::None, String::new()))
    }

    fn subcircuit_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(SubCircuitPair, Status, String)> {
        let parent = circuits.0.as_ref()?;
        nth_cached(&self.subcircuits, parent, index, || {
            Self::fill_subcircuits(parent)
        })
        .map(|sp| (sp, Status::None, String::new()))
    }

    fn net_terminalref_from_index(
        &self,
        nets: &NetPair,
        index: usize,
    ) -> Option<NetTerminalPair> {
        let net = nets.0.as_ref()?;
        nth_cached(&self.terminal_refs, net, index, || {
            Self::fill_terminal_refs(net)
        })
    }

    fn net_pinref_from_index(&self, nets: &NetPair, index: usize) -> Option<NetPinPair> {
        let net = nets.0.as_ref()?;
        nth_cached(&self.pin_refs, net, index, || Self::fill_pin_refs(net))
    }

    fn net_subcircuit_pinref_from_index(
        &self,
        nets: &NetPair,
        index: usize,
    ) -> Option<NetSubcircuitPinPair> {
        let net = nets.0.as_ref()?;
        nth_cached(&self.subcircuit_pin_refs, net, index, || {
            Self::fill_subcircuit_pin_refs(net)
        })
    }

    fn subcircuit_pinref_from_index(
        &self,
        subcircuits: &SubCircuitPair,
        index: usize,
    ) -> Option<NetSubcircuitPinPair> {
        let subcircuit = subcircuits.0.as_ref()?;
        nth_cached(&self.subcircuit_pins, subcircuit, index, || {
            Self::fill_subcircuit_pins(subcircuit)
        })
    }

    fn circuit_index(&self, circuits: &CircuitPair) -> Option<usize> {
        let target = circuits.0.as_ref()?;
        self.all_circuits()
            .iter()
            .position(|cp| cp.0.as_ref().map(|c| Rc::ptr_eq(c, target)) == Some(true))
    }

    fn net_index(&self, nets: &NetPair) -> Option<usize> {
        let target = nets.0.as_ref()?;
        let parent = target.parent_circuit().upgrade()?;
        position_cached(
            &self.nets,
            &parent,
            || Self::fill_nets(&parent),
            |np| np.0.as_ref().map(|n| Rc::ptr_eq(n, target)) == Some(true),
        )
    }

    fn device_index(&self, devices: &DevicePair) -> Option<usize> {
        let target = devices.0.as_ref()?;
        let parent = target.parent_circuit().upgrade()?;
        position_cached(
            &self.devices,
            &parent,
            || Self::fill_devices(&parent),
            |dp| dp.0.as_ref().map(|d| Rc::ptr_eq(d, target)) == Some(true),
        )
    }

    fn pin_index(&self, pins: &PinPair, circuits: &CircuitPair) -> Option<usize> {
        // Pins keep their declaration order.
        let target = pins.0.as_ref()?;
        let parent = circuits.0.as_ref()?;
        let by_id = parent.pin_by_id(target.id())?;
        if Rc::ptr_eq(&by_id, target) {
            Some(target.id())
        } else {
            None
        }
    }

    fn subcircuit_index(&self, subcircuits: &SubCircuitPair) -> Option<usize> {
        let target = subcircuits.0.as_ref()?;
        let parent = target.parent_circuit().upgrade()?;
        position_cached(
            &self.subcircuits,
            &parent,
            || Self::fill_subcircuits(&parent),
            |sp| sp.0.as_ref().map(|s| Rc::ptr_eq(s, target)) == Some(true),
        )
    }

    fn second_net_for(&self, _first: &Rc<Net>) -> Option<Rc<Net>> {
        None
    }

    fn second_circuit_for(&self, _first: &Rc<Circuit>) -> Option<Rc<Circuit>> {
        None
    }
}
