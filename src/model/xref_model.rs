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
//! The incarnation of the indexed netlist model for a populated cross-reference.
//!
//! Indices are the positions in the already-sorted pair sequences of the
//! cross-reference. The model maintains lazily built lookup tables for top-level
//! circuits, child circuits, the parents of entity pairs and the per-pin view of
//! paired sub-circuits.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use fnv::FnvHashMap;

use crate::netlist::prelude::*;
use crate::rc_key::RcKey;
use crate::xref::cross_reference::{pair_key, PairKey};
use crate::xref::order::cmp_subcircuit_pin_refs;
use crate::xref::order::cmp_value_pair;
use crate::xref::{
    CircuitPair, CrossReference, DevicePair, EntityPair, NetPair, NetPinPair,
    NetSubcircuitPinPair, NetTerminalPair, PerCircuitData, PinPair, Status, SubCircuitPair,
};

use super::indexed_model::IndexedNetlistModel;

/// Indexed view over a populated cross-reference.
pub struct CrossReferenceModel {
    xref: Rc<CrossReference>,

    top_level_circuits: RefCell<Option<Vec<CircuitPair>>>,
    child_circuits: RefCell<Option<FnvHashMap<PairKey<Circuit>, Vec<CircuitPair>>>>,
    parents_of_nets: RefCell<Option<FnvHashMap<PairKey<Net>, CircuitPair>>>,
    parents_of_devices: RefCell<Option<FnvHashMap<PairKey<Device>, CircuitPair>>>,
    parents_of_subcircuits: RefCell<Option<FnvHashMap<PairKey<SubCircuit>, CircuitPair>>>,
    subcircuit_pins: RefCell<Option<FnvHashMap<PairKey<SubCircuit>, Vec<NetSubcircuitPinPair>>>>,
}

/// Check whether a recorded pair is addressed by the given handle pair.
/// A pair with only one side given matches on that side alone.
fn pair_matches<T>(recorded: &EntityPair<T>, wanted: &(Option<Rc<T>>, Option<Rc<T>>)) -> bool {
    let first_matches = match (&wanted.0, &recorded.first) {
        (Some(w), Some(r)) => Rc::ptr_eq(w, r),
        (Some(_), None) => false,
        (None, _) => true,
    };
    let second_matches = match (&wanted.1, &recorded.second) {
        (Some(w), Some(r)) => Rc::ptr_eq(w, r),
        (Some(_), None) => false,
        (None, _) => true,
    };
    (wanted.0.is_some() || wanted.1.is_some()) && first_matches && second_matches
}

fn circuit_pair_matches(recorded: &CircuitPair, wanted: &CircuitPair) -> bool {
    let first_matches = match (&wanted.0, &recorded.0) {
        (Some(w), Some(r)) => Rc::ptr_eq(w, r),
        (Some(_), None) => false,
        (None, _) => true,
    };
    let second_matches = match (&wanted.1, &recorded.1) {
        (Some(w), Some(r)) => Rc::ptr_eq(w, r),
        (Some(_), None) => false,
        (None, _) => true,
    };
    (wanted.0.is_some() || wanted.1.is_some()) && first_matches && second_matches
}

/// Register a pair in a parent lookup table under all three key forms: the exact pair
/// and each present side alone.
fn insert_pair_keys<T, V: Clone>(
    map: &mut FnvHashMap<PairKey<T>, V>,
    pair: &(Option<Rc<T>>, Option<Rc<T>>),
    value: V,
) {
    map.entry(pair_key(pair)).or_insert_with(|| value.clone());
    if pair.0.is_some() {
        map.entry((pair.0.as_ref().map(RcKey::new), None))
            .or_insert_with(|| value.clone());
    }
    if pair.1.is_some() {
        map.entry((None, pair.1.as_ref().map(RcKey::new)))
            .or_insert(value);
    }
}

impl CrossReferenceModel {
    /// Create an indexed view over the given cross-reference.
    pub fn new(xref: Rc<CrossReference>) -> Self {
        CrossReferenceModel {
            xref,
            top_level_circuits: Default::default(),
            child_circuits: Default::default(),
            parents_of_nets: Default::default(),
            parents_of_devices: Default::default(),
            parents_of_subcircuits: Default::default(),
            subcircuit_pins: Default::default(),
        }
    }

    /// Get the underlying cross-reference.
    pub fn cross_reference(&self) -> &Rc<CrossReference> {
        &self.xref
    }

    fn with_top_level_circuits<R>(&self, f: impl FnOnce(&Vec<CircuitPair>) -> R) -> R {
        let mut cache = self.top_level_circuits.borrow_mut();
        let list = cache.get_or_insert_with(|| {
            self.xref
                .circuits()
                .iter()
                .filter(|cp| {
                    let first_is_top = cp.0.as_ref().map(|c| !c.has_references()).unwrap_or(true);
                    let second_is_top = cp.1.as_ref().map(|c| !c.has_references()).unwrap_or(true);
                    first_is_top && second_is_top
                })
                .cloned()
                .collect()
        });
        f(list)
    }

    /// Child circuits of one circuit pair, derived from the recorded sub-circuit
    /// pairs. For skipped circuits there is no sub-circuit event list, so the children
    /// are synthesized from the circuits' own sub-circuit lists.
    fn build_child_circuit_list(&self, cp: &CircuitPair) -> Vec<CircuitPair> {
        let mut child_circuits = Vec::new();

        let data = match self.xref.per_circuit_data_for(cp) {
            Some(data) => data,
            None => return child_circuits,
        };

        if data.status == Status::Skipped {
            let mut seen: Vec<RcKey<Circuit>> = Vec::new();

            if let Some(first) = &cp.0 {
                for sc in first.subcircuits().iter() {
                    if let Some(child) = sc.circuit_ref().upgrade() {
                        let key = RcKey::new(&child);
                        if !seen.contains(&key) {
                            seen.push(key);
                            let other = self.xref.other_circuit_for(&child);
                            child_circuits.push((Some(child), other));
                        }
                    }
                }
            }

            if let Some(second) = &cp.1 {
                for sc in second.subcircuits().iter() {
                    if let Some(child) = sc.circuit_ref().upgrade() {
                        let key = RcKey::new(&child);
                        if !seen.contains(&key) {
                            seen.push(key);
                            if self.xref.other_circuit_for(&child).is_none() {
                                child_circuits.push((None, Some(child)));
                            }
                        }
                    }
                }
            }
        } else {
            let mut seen: Vec<PairKey<Circuit>> = Vec::new();
            for sc in &data.subcircuits {
                let first = sc.first.as_ref().and_then(|s| s.circuit_ref().upgrade());
                let second = sc.second.as_ref().and_then(|s| s.circuit_ref().upgrade());
                if first.is_none() && second.is_none() {
                    continue;
                }
                let child = (first, second);
                let key = pair_key(&child);
                if !seen.contains(&key) {
                    seen.push(key);
                    child_circuits.push(child);
                }
            }
        }

        child_circuits
    }

    fn with_child_circuits<R>(
        &self,
        cp: &CircuitPair,
        f: impl FnOnce(Option<&Vec<CircuitPair>>) -> R,
    ) -> R {
        let mut cache = self.child_circuits.borrow_mut();
        let map = cache.get_or_insert_with(|| {
            let mut map = FnvHashMap::default();
            for cp in self.xref.circuits() {
                map.insert(pair_key(cp), self.build_child_circuit_list(cp));
            }
            map
        });
        f(map.get(&pair_key(cp)))
    }

    fn parent_from_cache<T>(
        &self,
        cache: &RefCell<Option<FnvHashMap<PairKey<T>, CircuitPair>>>,
        pair: &(Option<Rc<T>>, Option<Rc<T>>),
        get: impl Fn(&PerCircuitData) -> Vec<(Option<Rc<T>>, Option<Rc<T>>)>,
    ) -> CircuitPair {
        let mut cache = cache.borrow_mut();
        let map = cache.get_or_insert_with(|| {
            let mut map = FnvHashMap::default();
            for cp in self.xref.circuits() {
                if let Some(data) = self.xref.per_circuit_data_for(cp) {
                    for entity_pair in get(data) {
                        insert_pair_keys(&mut map, &entity_pair, cp.clone());
                    }
                }
            }
            map
        });
        map.get(&pair_key(pair)).cloned().unwrap_or((None, None))
    }

    /// The per-pin view of paired sub-circuits: for every pin of the two instantiated
    /// circuits, the net references of the two sides are paired through the net
    /// correspondence.
    fn with_subcircuit_pins<R>(
        &self,
        subcircuits: &SubCircuitPair,
        f: impl FnOnce(Option<&Vec<NetSubcircuitPinPair>>) -> R,
    ) -> R {
        let mut cache = self.subcircuit_pins.borrow_mut();
        let map = cache.get_or_insert_with(|| {
            let mut map: FnvHashMap<PairKey<SubCircuit>, Vec<NetSubcircuitPinPair>> =
                FnvHashMap::default();

            for cp in self.xref.circuits() {
                let data = match self.xref.per_circuit_data_for(cp) {
                    Some(data) => data,
                    None => continue,
                };

                for sc in &data.subcircuits {
                    let (first, second) = match (&sc.first, &sc.second) {
                        (Some(first), Some(second)) => (first, second),
                        _ => continue,
                    };

                    let mut nets_per_pins: Vec<NetSubcircuitPinPair> = Vec::new();

                    // Net references of the second side, keyed by the corresponding
                    // first-side net. References without a corresponding net show up
                    // as second-side-only entries.
                    let mut first_net_to_other_netref: FnvHashMap<
                        RcKey<Net>,
                        VecDeque<NetSubcircuitPinRef>,
                    > = FnvHashMap::default();

                    let second_pin_count = second
                        .circuit_ref()
                        .upgrade()
                        .map(|c| c.pin_count())
                        .unwrap_or(0);
                    for pin_id in 0..second_pin_count {
                        if let Some(netref) = second.netref_for_pin(pin_id) {
                            let other_net = netref
                                .net()
                                .and_then(|n| self.xref.other_net_for(&n));
                            match other_net {
                                Some(other_net) => first_net_to_other_netref
                                    .entry(RcKey::new(&other_net))
                                    .or_default()
                                    .push_back(netref),
                                None => nets_per_pins.push((None, Some(netref))),
                            }
                        }
                    }

                    let first_pin_count = first
                        .circuit_ref()
                        .upgrade()
                        .map(|c| c.pin_count())
                        .unwrap_or(0);
                    for pin_id in 0..first_pin_count {
                        if let Some(netref) = first.netref_for_pin(pin_id) {
                            let other = netref.net().and_then(|n| {
                                first_net_to_other_netref
                                    .get_mut(&RcKey::new(&n))
                                    .and_then(|q| q.pop_front())
                            });
                            nets_per_pins.push((Some(netref), other));
                        }
                    }

                    nets_per_pins
                        .sort_by(|x, y| cmp_value_pair(x, y, cmp_subcircuit_pin_refs));

                    map.insert(pair_key(&sc.pair()), nets_per_pins);
                }
            }

            map
        });
        f(map.get(&pair_key(subcircuits)))
    }

    fn data_for(&self, circuits: &CircuitPair) -> Option<&PerCircuitData> {
        self.xref.per_circuit_data_for(circuits)
    }

    fn status_of(&self, cp: &CircuitPair) -> (Status, String) {
        self.data_for(cp)
            .map(|d| (d.status, d.msg.clone()))
            .unwrap_or((Status::None, String::new()))
    }

    /// The canonical explanation for the status of a circuit pair.
    fn circuit_pair_status_hint(&self, cps: &(CircuitPair, Status, String)) -> String {
        let (pair, status, status_msg) = cps;
        let mut msg = String::new();

        if *status == Status::Mismatch || *status == Status::NoMatch {
            if pair.0.is_none() || pair.1.is_none() {
                msg = "No matching circuit found in the other netlist.\n\
                       By default, circuits are identified by their name.\n\
                       A missing circuit probably means there is no circuit in the other netlist with this name.\n\
                       If circuits with different names need to be associated, use 'same_circuits' in the\n\
                       LVS script to establish such an association."
                    .to_string();
            } else {
                msg = "Circuits could be paired, but there is a mismatch inside.\n\
                       Browse the circuit's component list to identify the mismatching elements."
                    .to_string();
            }
        } else if *status == Status::Skipped {
            msg = "Circuits can only be matched if their child circuits have a known counterpart and a\n\
                   pin-to-pin correspondence could be established for each child circuit.\n\
                   This is not the case here. Browse the child circuits to identify the blockers.\n\
                   Potential blockers are subcircuits without a corresponding other circuit or circuits\n\
                   where some pins could not be mapped to pins from the corresponding other circuit."
                .to_string();
        }

        append_status_msg(msg, status_msg)
    }
}

/// Append the recorded event message after a blank line.
fn append_status_msg(mut msg: String, status_msg: &str) -> String {
    if !status_msg.is_empty() {
        if !msg.is_empty() {
            msg += "\n\n";
        }
        msg += status_msg;
    }
    msg
}

impl IndexedNetlistModel for CrossReferenceModel {
    fn is_single(&self) -> bool {
        false
    }

    fn circuit_count(&self) -> usize {
        self.xref.circuit_count()
    }

    fn top_circuit_count(&self) -> usize {
        self.with_top_level_circuits(|list| list.len())
    }

    fn child_circuit_count(&self, circuits: &CircuitPair) -> usize {
        self.with_child_circuits(circuits, |list| list.map(|l| l.len()).unwrap_or(0))
    }

    fn net_count(&self, circuits: &CircuitPair) -> usize {
        self.data_for(circuits).map(|d| d.nets.len()).unwrap_or(0)
    }

    fn device_count(&self, circuits: &CircuitPair) -> usize {
        self.data_for(circuits)
            .map(|d| d.devices.len())
            .unwrap_or(0)
    }

    fn pin_count(&self, circuits: &CircuitPair) -> usize {
        self.data_for(circuits).map(|d| d.pins.len()).unwrap_or(0)
    }

    fn subcircuit_count(&self, circuits: &CircuitPair) -> usize {
        self.data_for(circuits)
            .map(|d| d.subcircuits.len())
            .unwrap_or(0)
    }

    fn net_terminal_count(&self, nets: &NetPair) -> usize {
        self.xref
            .per_net_data_for(nets)
            .map(|d| d.terminals.len())
            .unwrap_or(0)
    }

    fn net_pin_count(&self, nets: &NetPair) -> usize {
        self.xref
            .per_net_data_for(nets)
            .map(|d| d.pins.len())
            .unwrap_or(0)
    }

    fn net_subcircuit_pin_count(&self, nets: &NetPair) -> usize {
        self.xref
            .per_net_data_for(nets)
            .map(|d| d.subcircuit_pins.len())
            .unwrap_or(0)
    }

    fn subcircuit_pin_count(&self, subcircuits: &SubCircuitPair) -> usize {
        self.with_subcircuit_pins(subcircuits, |pins| match pins {
            Some(pins) => pins.len(),
            None => {
                // Unpaired sub-circuits fall back to the pins of the instantiated
                // circuits.
                let first = subcircuits
                    .0
                    .as_ref()
                    .and_then(|s| s.circuit_ref().upgrade())
                    .map(|c| c.pin_count())
                    .unwrap_or(0);
                let second = subcircuits
                    .1
                    .as_ref()
                    .and_then(|s| s.circuit_ref().upgrade())
                    .map(|c| c.pin_count())
                    .unwrap_or(0);
                first.max(second)
            }
        })
    }

    fn parent_of_net(&self, nets: &NetPair) -> CircuitPair {
        self.parent_from_cache(&self.parents_of_nets, nets, |d| {
            d.nets.iter().map(|p| p.pair()).collect()
        })
    }

    fn parent_of_device(&self, devices: &DevicePair) -> CircuitPair {
        self.parent_from_cache(&self.parents_of_devices, devices, |d| {
            d.devices.iter().map(|p| p.pair()).collect()
        })
    }

    fn parent_of_subcircuit(&self, subcircuits: &SubCircuitPair) -> CircuitPair {
        self.parent_from_cache(&self.parents_of_subcircuits, subcircuits, |d| {
            d.subcircuits.iter().map(|p| p.pair()).collect()
        })
    }

    fn circuit_from_index(&self, index: usize) -> Option<(CircuitPair, Status, String)> {
        let cp = self.xref.circuits().get(index)?.clone();
        let (status, msg) = self.status_of(&cp);
        Some((cp, status, msg))
    }

    fn top_circuit_from_index(&self, index: usize) -> Option<(CircuitPair, Status, String)> {
        let cp = self.with_top_level_circuits(|list| list.get(index).cloned())?;
        let (status, msg) = self.status_of(&cp);
        Some((cp, status, msg))
    }

    fn child_circuit_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(CircuitPair, Status, String)> {
        let cp = self.with_child_circuits(circuits, |list| list.and_then(|l| l.get(index).cloned()))?;
        let (status, msg) = self.status_of(&cp);
        Some((cp, status, msg))
    }

    fn net_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(NetPair, Status, String)> {
        let data = self.data_for(circuits)?;
        let p = data.nets.get(index)?;
        Some((p.pair(), p.status, p.msg.clone()))
    }

    fn device_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(DevicePair, Status, String)> {
        let data = self.data_for(circuits)?;
        let p = data.devices.get(index)?;
        Some((p.pair(), p.status, p.msg.clone()))
    }

    fn pin_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(PinPair, Status, String)> {
        let data = self.data_for(circuits)?;
        let p = data.pins.get(index)?;
        Some((p.pair(), p.status, p.msg.clone()))
    }

    fn subcircuit_from_index(
        &self,
        circuits: &CircuitPair,
        index: usize,
    ) -> Option<(SubCircuitPair, Status, String)> {
        let data = self.data_for(circuits)?;
        let p = data.subcircuits.get(index)?;
        Some((p.pair(), p.status, p.msg.clone()))
    }

    fn net_terminalref_from_index(
        &self,
        nets: &NetPair,
        index: usize,
    ) -> Option<NetTerminalPair> {
        self.xref
            .per_net_data_for(nets)
            .and_then(|d| d.terminals.get(index).cloned())
    }

    fn net_pinref_from_index(&self, nets: &NetPair, index: usize) -> Option<NetPinPair> {
        self.xref
            .per_net_data_for(nets)
            .and_then(|d| d.pins.get(index).cloned())
    }

    fn net_subcircuit_pinref_from_index(
        &self,
        nets: &NetPair,
        index: usize,
    ) -> Option<NetSubcircuitPinPair> {
        self.xref
            .per_net_data_for(nets)
            .and_then(|d| d.subcircuit_pins.get(index).cloned())
    }

    fn subcircuit_pinref_from_index(
        &self,
        subcircuits: &SubCircuitPair,
        index: usize,
    ) -> Option<NetSubcircuitPinPair> {
        self.with_subcircuit_pins(subcircuits, |pins| match pins {
            Some(pins) => pins.get(index).cloned(),
            None => {
                // Unpaired sub-circuits address their pins by pin id directly.
                let first = subcircuits.0.as_ref().and_then(|s| s.netref_for_pin(index));
                let second = subcircuits.1.as_ref().and_then(|s| s.netref_for_pin(index));
                if first.is_none() && second.is_none() {
                    None
                } else {
                    Some((first, second))
                }
            }
        })
    }

    fn circuit_index(&self, circuits: &CircuitPair) -> Option<usize> {
        self.xref
            .circuits()
            .iter()
            .position(|cp| circuit_pair_matches(cp, circuits))
    }

    fn net_index(&self, nets: &NetPair) -> Option<usize> {
        let parent = self.parent_of_net(nets);
        let data = self.data_for(&parent)?;
        data.nets.iter().position(|p| pair_matches(p, nets))
    }

    fn device_index(&self, devices: &DevicePair) -> Option<usize> {
        let parent = self.parent_of_device(devices);
        let data = self.data_for(&parent)?;
        data.devices.iter().position(|p| pair_matches(p, devices))
    }

    fn pin_index(&self, pins: &PinPair, circuits: &CircuitPair) -> Option<usize> {
        let data = self.data_for(circuits)?;
        data.pins.iter().position(|p| pair_matches(p, pins))
    }

    fn subcircuit_index(&self, subcircuits: &SubCircuitPair) -> Option<usize> {
        let parent = self.parent_of_subcircuit(subcircuits);
        let data = self.data_for(&parent)?;
        data.subcircuits
            .iter()
            .position(|p| pair_matches(p, subcircuits))
    }

    fn second_net_for(&self, first: &Rc<Net>) -> Option<Rc<Net>> {
        self.xref.other_net_for(first)
    }

    fn second_circuit_for(&self, first: &Rc<Circuit>) -> Option<Rc<Circuit>> {
        self.xref.other_circuit_for(first)
    }

    fn top_circuit_status_hint(&self, index: usize) -> String {
        self.top_circuit_from_index(index)
            .map(|cps| self.circuit_pair_status_hint(&cps))
            .unwrap_or_default()
    }

    fn circuit_status_hint(&self, index: usize) -> String {
        self.circuit_from_index(index)
            .map(|cps| self.circuit_pair_status_hint(&cps))
            .unwrap_or_default()
    }

    fn child_circuit_status_hint(&self, circuits: &CircuitPair, index: usize) -> String {
        let cps = match self.child_circuit_from_index(circuits, index) {
            Some(cps) => cps,
            None => return String::new(),
        };

        let mut msg = String::new();
        if cps.1 == Status::Mismatch || cps.1 == Status::NoMatch {
            if cps.0 .0.is_none() || cps.0 .1.is_none() {
                msg = "No matching subcircuit was found in the other netlist - this is likely because pin\n\
                       assignment could not be derived from the nets connected to the pins.\n\
                       Check, if the pins are attached properly. If pins need to be swappable, consider using\n\
                       'equivalent_pins' in the LVS script."
                    .to_string();
            } else {
                msg = "Two different subcircuits fit here in the same way, but they are not\n\
                       originating from equivalent circuits.\n\
                       If the circuits behind the subcircuits are identical, using 'same_circuits'\n\
                       in the LVS script will associate them."
                    .to_string();
            }
        }

        append_status_msg(msg, &cps.2)
    }

    fn net_status_hint(&self, circuits: &CircuitPair, index: usize) -> String {
        let cps = match self.net_from_index(circuits, index) {
            Some(cps) => cps,
            None => return String::new(),
        };

        let mut msg = String::new();
        if cps.1 == Status::Mismatch || cps.1 == Status::NoMatch {
            msg = "Nets don't match. Nets match, if connected subcircuit pins and device terminals match to a\n\
                   counterpart in the other netlist (component-wise and pin/terminal-wise).\n\
                   If there already is a net candidate from the other netlist, scan the net members for\n\
                   mismatching items (with errors or warnings) and fix these issues.\n\
                   Otherwise, look for the corresponding other net.\n\
                   Net items not found in the reference netlist indicate additional connections.\n\
                   Net items only found in the reference netlist indicate missing connections."
                .to_string();
        } else if cps.1 == Status::MatchWithWarning {
            msg = "Nets match, but the choice was ambiguous. This may lead to mismatching nets in other places.\n"
                .to_string();
        }

        append_status_msg(msg, &cps.2)
    }

    fn device_status_hint(&self, circuits: &CircuitPair, index: usize) -> String {
        let cps = match self.device_from_index(circuits, index) {
            Some(cps) => cps,
            None => return String::new(),
        };

        let mut msg = String::new();
        if cps.1 == Status::Mismatch || cps.1 == Status::NoMatch {
            if cps.0 .0.is_none() || cps.0 .1.is_none() {
                msg = "No matching device was found in the other netlist.\n\
                       Devices are identified by the nets they are attached to. Unmatched devices mean that\n\
                       at least one terminal net isn't matched with a corresponding net from the other netlist.\n\
                       Make all terminal nets match and the devices will match too."
                    .to_string();
            } else {
                msg = "Devices don't match topologically.\n\
                       Check the terminal connections to identify the terminals not being connected to\n\
                       corresponding nets. Either the devices are not connected correctly or the nets\n\
                       need to be fixed before the devices will match too."
                    .to_string();
            }
        } else if cps.1 == Status::MatchWithWarning {
            msg = "Topologically matching devices are found here but either the parameters or the\n\
                   device classes don't match.\n\
                   If the device class is different but should be considered the same, using\n\
                   'same_device_classed' in the LVS script will solve this issue."
                .to_string();
        }

        append_status_msg(msg, &cps.2)
    }

    fn pin_status_hint(&self, circuits: &CircuitPair, index: usize) -> String {
        let cps = match self.pin_from_index(circuits, index) {
            Some(cps) => cps,
            None => return String::new(),
        };

        let mut msg = String::new();
        if (cps.1 == Status::Mismatch || cps.1 == Status::NoMatch)
            && (cps.0 .0.is_none() || cps.0 .1.is_none())
        {
            msg = "No matching pin was found in the other netlist.\n\
                   Pins are identified by the nets they are attached to - pins on equivalent nets are also\n\
                   equivalent. Making the nets match will make the pins match too."
                .to_string();
        }

        append_status_msg(msg, &cps.2)
    }

    fn subcircuit_status_hint(&self, circuits: &CircuitPair, index: usize) -> String {
        let cps = match self.subcircuit_from_index(circuits, index) {
            Some(cps) => cps,
            None => return String::new(),
        };

        let mut msg = String::new();
        if cps.1 == Status::Mismatch || cps.1 == Status::NoMatch {
            if cps.0 .0.is_none() || cps.0 .1.is_none() {
                msg = "No matching subcircuit was found in the other netlist - this is likely because pin assignment\n\
                       could not be derived from the nets connected to the pins.\n\
                       Check, if the pins are attached properly. If pins need to be swappable, consider using\n\
                       'equivalent_pins' in the LVS script."
                    .to_string();
            } else {
                msg = "Two different subcircuits fit here in the same way, but they are not originating from\n\
                       equivalent circuits.\n\
                       If the circuits behind the subcircuits are identical, using 'same_circuits' in the LVS script\n\
                       will associate them."
                    .to_string();
            }
        }

        append_status_msg(msg, &cps.2)
    }
}
