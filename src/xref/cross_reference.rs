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
//! The cross-reference recorder: stores the results of a netlist compare in a form
//! which supports persisting and browsing.
//!
//! The recorder is driven through the [`CompareLogger`] events, builds pairing tables
//! for every entity kind and keeps per-circuit records of the paired nets, devices,
//! pins and sub-circuits. After `end_netlist` the structure is read-only apart from the
//! lazily computed per-net detail.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

use fnv::FnvHashMap;
use log::{debug, warn};

use crate::netlist::prelude::*;
use crate::rc_key::RcKey;

use super::compare_logger::{CompareLogger, LogEntry, Severity, Status};
use super::order::{
    cmp_by_device_class_name, cmp_by_name, cmp_by_ref_circuit_name, cmp_optional, cmp_pair,
};
use super::per_net;

/// A two-sided circuit handle; either side may be missing.
pub type CircuitPair = (Option<Rc<Circuit>>, Option<Rc<Circuit>>);
/// A two-sided net handle; either side may be missing.
pub type NetPair = (Option<Rc<Net>>, Option<Rc<Net>>);
/// A two-sided device handle; either side may be missing.
pub type DevicePair = (Option<Rc<Device>>, Option<Rc<Device>>);
/// A two-sided pin handle; either side may be missing.
pub type PinPair = (Option<Rc<Pin>>, Option<Rc<Pin>>);
/// A two-sided sub-circuit handle; either side may be missing.
pub type SubCircuitPair = (Option<Rc<SubCircuit>>, Option<Rc<SubCircuit>>);
/// A paired net terminal reference.
pub type NetTerminalPair = (Option<NetTerminalRef>, Option<NetTerminalRef>);
/// A paired net pin reference.
pub type NetPinPair = (Option<NetPinRef>, Option<NetPinRef>);
/// A paired net sub-circuit pin reference.
pub type NetSubcircuitPinPair = (Option<NetSubcircuitPinRef>, Option<NetSubcircuitPinRef>);

pub(crate) type PairKey<T> = (Option<RcKey<T>>, Option<RcKey<T>>);

/// Turn a pair of optional handles into a hashable pointer-identity key.
pub(crate) fn pair_key<T>(pair: &(Option<Rc<T>>, Option<Rc<T>>)) -> PairKey<T> {
    (pair.0.as_ref().map(RcKey::new), pair.1.as_ref().map(RcKey::new))
}

/// A paired record of one entity from each of the two netlists, together with the
/// compare outcome. At least one side is present.
#[derive(Debug, Clone)]
pub struct EntityPair<T> {
    /// The entity of the first netlist, if any.
    pub first: Option<Rc<T>>,
    /// The entity of the second netlist, if any.
    pub second: Option<Rc<T>>,
    /// The compare outcome for this pair.
    pub status: Status,
    /// An optional message explaining the outcome.
    pub msg: String,
}

impl<T> EntityPair<T> {
    /// Create a new pair record.
    ///
    /// At least one side must be present; a pair with two missing sides never appears
    /// in the recorded sequences.
    pub fn new<S: Into<String>>(
        first: Option<Rc<T>>,
        second: Option<Rc<T>>,
        status: Status,
        msg: S,
    ) -> Self {
        debug_assert!(
            first.is_some() || second.is_some(),
            "At least one side of a pair must be present."
        );
        EntityPair {
            first,
            second,
            status,
            msg: msg.into(),
        }
    }

    /// Get both sides as a pair of optional handles.
    pub fn pair(&self) -> (Option<Rc<T>>, Option<Rc<T>>) {
        (self.first.clone(), self.second.clone())
    }
}

/// Everything recorded for one circuit pair: the outcome of the circuit compare and the
/// sorted pair sequences of the entities inside.
#[derive(Debug, Default)]
pub struct PerCircuitData {
    /// Compare outcome of the circuit pair.
    pub status: Status,
    /// An optional message explaining the outcome.
    pub msg: String,
    /// Net pairs, sorted by net name.
    pub nets: Vec<EntityPair<Net>>,
    /// Device pairs, sorted by device class name.
    pub devices: Vec<EntityPair<Device>>,
    /// Pin pairs, sorted by pin name.
    pub pins: Vec<EntityPair<Pin>>,
    /// Sub-circuit pairs, sorted by the name of the instantiated circuit.
    pub subcircuits: Vec<EntityPair<SubCircuit>>,
    /// Log entries emitted while this circuit pair was open.
    pub log_entries: Vec<LogEntry>,
}

/// The correspondence of the endpoints of two paired nets: terminals, outside pins and
/// sub-circuit pins, each as a sorted sequence of paired references.
#[derive(Debug, Default)]
pub struct PerNetData {
    /// Paired device terminal references.
    pub terminals: Vec<NetTerminalPair>,
    /// Paired outside pin references.
    pub pins: Vec<NetPinPair>,
    /// Paired sub-circuit pin references.
    pub subcircuit_pins: Vec<NetSubcircuitPinPair>,
}

type OtherMap<T> = FnvHashMap<RcKey<T>, Option<Rc<T>>>;

/// The root of a recorded netlist compare.
///
/// A `CrossReference` is created empty, filled by exactly one compare run and then
/// queried. `clear()` resets it for another run.
#[derive(Default)]
pub struct CrossReference {
    netlist_a: Option<Weak<Netlist>>,
    netlist_b: Option<Weak<Netlist>>,
    /// The recorded circuit pairs, sorted by circuit name after `end_netlist`.
    circuits: Vec<CircuitPair>,
    /// Per-circuit records, parallel to nothing: addressed through `data_refs`.
    per_circuit_data: Vec<PerCircuitData>,
    /// Maps both sides of each circuit pair onto the per-circuit record.
    data_refs: FnvHashMap<RcKey<Circuit>, usize>,
    /// Lazily computed per-net detail, keyed by the exact net pair.
    per_net_data: RefCell<FnvHashMap<PairKey<Net>, Rc<PerNetData>>>,
    other_circuit: OtherMap<Circuit>,
    other_net: OtherMap<Net>,
    other_device: OtherMap<Device>,
    other_pin: OtherMap<Pin>,
    other_subcircuit: OtherMap<SubCircuit>,
    /// The circuit pair currently receiving entity events.
    current_circuits: CircuitPair,
    /// Index of the per-circuit record currently receiving entity events.
    current_data: Option<usize>,
    /// Log entries that arrived outside any circuit.
    global_log_entries: Vec<LogEntry>,
}

impl CrossReference {
    /// Create a new, empty cross-reference.
    pub fn new() -> Self {
        Default::default()
    }

    /// Get the first netlist of the compare run, if it still exists.
    pub fn netlist_a(&self) -> Option<Rc<Netlist>> {
        self.netlist_a.as_ref().and_then(Weak::upgrade)
    }

    /// Get the second netlist of the compare run, if it still exists.
    pub fn netlist_b(&self) -> Option<Rc<Netlist>> {
        self.netlist_b.as_ref().and_then(Weak::upgrade)
    }

    /// Return the number of recorded circuit pairs.
    pub fn circuit_count(&self) -> usize {
        self.circuits.len()
    }

    /// Get the recorded circuit pairs, sorted by circuit name.
    pub fn circuits(&self) -> &[CircuitPair] {
        &self.circuits
    }

    /// Get the log entries that arrived outside any circuit.
    pub fn global_log_entries(&self) -> &[LogEntry] {
        &self.global_log_entries
    }

    /// Get the per-circuit record of the given circuit pair.
    /// Either side identifies the record; the first side is preferred.
    pub fn per_circuit_data_for(&self, circuits: &CircuitPair) -> Option<&PerCircuitData> {
        if let Some(a) = &circuits.0 {
            if let Some(&i) = self.data_refs.get(&RcKey::new(a)) {
                return self.per_circuit_data.get(i);
            }
        }
        if let Some(b) = &circuits.1 {
            if let Some(&i) = self.data_refs.get(&RcKey::new(b)) {
                return self.per_circuit_data.get(i);
            }
        }
        None
    }

    /// Get the partner circuit of the given circuit, if it was paired.
    pub fn other_circuit_for(&self, circuit: &Rc<Circuit>) -> Option<Rc<Circuit>> {
        self.other_circuit
            .get(&RcKey::new(circuit))
            .and_then(|o| o.clone())
    }

    /// Get the partner net of the given net, if it was paired.
    pub fn other_net_for(&self, net: &Rc<Net>) -> Option<Rc<Net>> {
        self.other_net.get(&RcKey::new(net)).and_then(|o| o.clone())
    }

    /// Get the partner device of the given device, if it was paired.
    pub fn other_device_for(&self, device: &Rc<Device>) -> Option<Rc<Device>> {
        self.other_device
            .get(&RcKey::new(device))
            .and_then(|o| o.clone())
    }

    /// Get the partner pin of the given pin, if it was paired.
    pub fn other_pin_for(&self, pin: &Rc<Pin>) -> Option<Rc<Pin>> {
        self.other_pin.get(&RcKey::new(pin)).and_then(|o| o.clone())
    }

    /// Get the partner sub-circuit of the given sub-circuit, if it was paired.
    pub fn other_subcircuit_for(&self, subcircuit: &Rc<SubCircuit>) -> Option<Rc<SubCircuit>> {
        self.other_subcircuit
            .get(&RcKey::new(subcircuit))
            .and_then(|o| o.clone())
    }

    /// Get the endpoint correspondence of the given net pair.
    ///
    /// The detail is computed on first request and cached; it is a pure function of
    /// the two nets and the recorded device/pin/sub-circuit pairings. Returns `None`
    /// if both sides are missing.
    pub fn per_net_data_for(&self, nets: &NetPair) -> Option<Rc<PerNetData>> {
        if nets.0.is_none() && nets.1.is_none() {
            return None;
        }

        let key = pair_key(nets);
        if let Some(data) = self.per_net_data.borrow().get(&key) {
            return Some(data.clone());
        }

        let data = Rc::new(per_net::build_per_net_data(
            nets,
            &self.other_device,
            &self.other_pin,
            &self.other_subcircuit,
        ));
        self.per_net_data.borrow_mut().insert(key, data.clone());
        Some(data)
    }

    /// Reset the cross-reference to its empty state.
    pub fn clear(&mut self) {
        debug!("Clear cross-reference.");
        self.netlist_a = None;
        self.netlist_b = None;
        self.circuits.clear();
        self.per_circuit_data.clear();
        self.data_refs.clear();
        self.per_net_data.borrow_mut().clear();
        self.other_circuit.clear();
        self.other_net.clear();
        self.other_device.clear();
        self.other_pin.clear();
        self.other_subcircuit.clear();
        self.current_circuits = (None, None);
        self.current_data = None;
        self.global_log_entries.clear();
    }

    // Recording internals.

    /// Record an event-sequence violation: the malformed event is reported and the
    /// recorder continues from a consistent state.
    fn log_violation(&mut self, msg: &str) {
        warn!("{}", msg);
        self.global_log_entries
            .push(LogEntry::new(Severity::Error, msg));
    }

    /// Open a circuit pair and route subsequent entity events to its record.
    fn open_circuit(&mut self, a: Option<&Rc<Circuit>>, b: Option<&Rc<Circuit>>) {
        if self.current_data.is_some() {
            self.log_violation("'begin_circuit' arrived while a circuit was still open.");
            self.close_circuit(Status::None, "");
        }

        self.current_circuits = (a.cloned(), b.cloned());

        self.circuits.push((a.cloned(), b.cloned()));
        self.per_circuit_data.push(PerCircuitData::default());
        let index = self.per_circuit_data.len() - 1;
        self.current_data = Some(index);

        if let Some(a) = a {
            self.data_refs.insert(RcKey::new(a), index);
        }
        if let Some(b) = b {
            self.data_refs.insert(RcKey::new(b), index);
        }

        record_partners(&mut self.other_circuit, a, b, "circuit");
    }

    /// Finalize the open circuit pair: sort its sequences and store the outcome.
    fn close_circuit(&mut self, status: Status, msg: &str) {
        let index = match self.current_data {
            Some(index) => index,
            None => {
                self.log_violation("'end_circuit' arrived without an open circuit.");
                return;
            }
        };

        let data = &mut self.per_circuit_data[index];
        data.devices
            .sort_by(|x, y| cmp_pairs(x, y, cmp_by_device_class_name));
        data.subcircuits
            .sort_by(|x, y| cmp_pairs(x, y, cmp_by_ref_circuit_name));
        data.pins.sort_by(|x, y| cmp_pairs(x, y, cmp_by_name));
        data.nets.sort_by(|x, y| cmp_pairs(x, y, cmp_by_name));

        data.status = status;
        data.msg = msg.to_string();

        self.current_circuits = (None, None);
        self.current_data = None;
    }

    /// Check that a circuit is open for an entity event of the given kind.
    fn ensure_in_circuit(&mut self, kind: &str) -> Option<usize> {
        match self.current_data {
            Some(index) => Some(index),
            None => {
                self.log_violation(&format!(
                    "A {} event arrived outside of a circuit and was ignored.",
                    kind
                ));
                None
            }
        }
    }

    fn record_nets(&mut self, a: Option<&Rc<Net>>, b: Option<&Rc<Net>>, status: Status, msg: &str) {
        if a.is_none() && b.is_none() {
            warn!("Ignoring a net pair without any sides.");
            return;
        }
        if let Some(index) = self.ensure_in_circuit("net") {
            self.per_circuit_data[index]
                .nets
                .push(EntityPair::new(a.cloned(), b.cloned(), status, msg));
            record_partners(&mut self.other_net, a, b, "net");
        }
    }

    fn record_devices(
        &mut self,
        a: Option<&Rc<Device>>,
        b: Option<&Rc<Device>>,
        status: Status,
        msg: &str,
    ) {
        if a.is_none() && b.is_none() {
            warn!("Ignoring a device pair without any sides.");
            return;
        }
        if let Some(index) = self.ensure_in_circuit("device") {
            self.per_circuit_data[index]
                .devices
                .push(EntityPair::new(a.cloned(), b.cloned(), status, msg));
            record_partners(&mut self.other_device, a, b, "device");
        }
    }

    fn record_pins(&mut self, a: Option<&Rc<Pin>>, b: Option<&Rc<Pin>>, status: Status, msg: &str) {
        if a.is_none() && b.is_none() {
            warn!("Ignoring a pin pair without any sides.");
            return;
        }
        if let Some(index) = self.ensure_in_circuit("pin") {
            self.per_circuit_data[index]
                .pins
                .push(EntityPair::new(a.cloned(), b.cloned(), status, msg));
            record_partners(&mut self.other_pin, a, b, "pin");
        }
    }

    fn record_subcircuits(
        &mut self,
        a: Option<&Rc<SubCircuit>>,
        b: Option<&Rc<SubCircuit>>,
        status: Status,
        msg: &str,
    ) {
        if a.is_none() && b.is_none() {
            warn!("Ignoring a sub-circuit pair without any sides.");
            return;
        }
        if let Some(index) = self.ensure_in_circuit("sub-circuit") {
            self.per_circuit_data[index]
                .subcircuits
                .push(EntityPair::new(a.cloned(), b.cloned(), status, msg));
            record_partners(&mut self.other_subcircuit, a, b, "sub-circuit");
        }
    }
}

/// Stable order over pair records with the given value comparator.
fn cmp_pairs<T, F>(x: &EntityPair<T>, y: &EntityPair<T>, cmp: F) -> Ordering
where
    F: Fn(&T, &T) -> Ordering + Copy,
{
    cmp_optional(x.first.as_deref(), y.first.as_deref(), cmp)
        .then_with(|| cmp_optional(x.second.as_deref(), y.second.as_deref(), cmp))
}

/// Update the bidirectional partner map for one recorded pair.
/// A repeated pairing overwrites; the most recent partner wins.
fn record_partners<T>(
    map: &mut OtherMap<T>,
    a: Option<&Rc<T>>,
    b: Option<&Rc<T>>,
    kind: &str,
) {
    if let Some(a) = a {
        if let Some(prev) = map.insert(RcKey::new(a), b.cloned()) {
            if !same_partner(prev.as_ref(), b) {
                warn!(
                    "A {} takes part in more than one pair; the most recent pairing wins.",
                    kind
                );
            }
        }
    }
    if let Some(b) = b {
        if let Some(prev) = map.insert(RcKey::new(b), a.cloned()) {
            if !same_partner(prev.as_ref(), a) {
                warn!(
                    "A {} takes part in more than one pair; the most recent pairing wins.",
                    kind
                );
            }
        }
    }
}

fn same_partner<T>(x: Option<&Rc<T>>, y: Option<&Rc<T>>) -> bool {
    match (x, y) {
        (None, None) => true,
        (Some(x), Some(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

impl CompareLogger for CrossReference {
    fn begin_netlist(&mut self, a: &Rc<Netlist>, b: &Rc<Netlist>) {
        debug!("Begin netlist compare.");
        self.netlist_a = Some(Rc::downgrade(a));
        self.netlist_b = Some(Rc::downgrade(b));
        self.current_circuits = (None, None);
    }

    fn end_netlist(&mut self, _a: &Rc<Netlist>, _b: &Rc<Netlist>) {
        debug!("End netlist compare.");
        if self.current_data.is_some() {
            self.log_violation("'end_netlist' arrived while a circuit was still open.");
            self.close_circuit(Status::None, "");
        }
        self.circuits
            .sort_by(|x, y| cmp_pair(x, y, cmp_by_name::<Circuit>));
    }

    fn begin_circuit(&mut self, a: Option<&Rc<Circuit>>, b: Option<&Rc<Circuit>>) {
        self.open_circuit(a, b);
    }

    fn end_circuit(
        &mut self,
        _a: Option<&Rc<Circuit>>,
        _b: Option<&Rc<Circuit>>,
        matching: bool,
        msg: &str,
    ) {
        self.close_circuit(
            if matching {
                Status::Match
            } else {
                Status::NoMatch
            },
            msg,
        );
    }

    fn circuit_skipped(&mut self, a: Option<&Rc<Circuit>>, b: Option<&Rc<Circuit>>, msg: &str) {
        self.open_circuit(a, b);
        self.close_circuit(Status::Skipped, msg);
    }

    fn circuit_mismatch(&mut self, a: Option<&Rc<Circuit>>, b: Option<&Rc<Circuit>>, msg: &str) {
        self.open_circuit(a, b);
        self.close_circuit(Status::Mismatch, msg);
    }

    fn log_entry(&mut self, severity: Severity, msg: &str) {
        let entry = LogEntry::new(severity, msg);
        match self.current_data {
            Some(index) => self.per_circuit_data[index].log_entries.push(entry),
            None => self.global_log_entries.push(entry),
        }
    }

    fn match_nets(&mut self, a: Option<&Rc<Net>>, b: Option<&Rc<Net>>) {
        self.record_nets(a, b, Status::Match, "");
    }

    fn match_ambiguous_nets(&mut self, a: Option<&Rc<Net>>, b: Option<&Rc<Net>>, msg: &str) {
        self.record_nets(a, b, Status::MatchWithWarning, msg);
    }

    fn net_mismatch(&mut self, a: Option<&Rc<Net>>, b: Option<&Rc<Net>>, msg: &str) {
        self.record_nets(a, b, Status::Mismatch, msg);
    }

    fn match_devices(&mut self, a: Option<&Rc<Device>>, b: Option<&Rc<Device>>) {
        self.record_devices(a, b, Status::Match, "");
    }

    fn match_devices_with_different_parameters(
        &mut self,
        a: Option<&Rc<Device>>,
        b: Option<&Rc<Device>>,
    ) {
        self.record_devices(a, b, Status::MatchWithWarning, "");
    }

    fn match_devices_with_different_device_classes(
        &mut self,
        a: Option<&Rc<Device>>,
        b: Option<&Rc<Device>>,
    ) {
        self.record_devices(a, b, Status::MatchWithWarning, "");
    }

    fn device_mismatch(&mut self, a: Option<&Rc<Device>>, b: Option<&Rc<Device>>, msg: &str) {
        self.record_devices(a, b, Status::Mismatch, msg);
    }

    fn match_pins(&mut self, a: Option<&Rc<Pin>>, b: Option<&Rc<Pin>>) {
        self.record_pins(a, b, Status::Match, "");
    }

    fn pin_mismatch(&mut self, a: Option<&Rc<Pin>>, b: Option<&Rc<Pin>>, msg: &str) {
        self.record_pins(a, b, Status::Mismatch, msg);
    }

    fn match_subcircuits(&mut self, a: Option<&Rc<SubCircuit>>, b: Option<&Rc<SubCircuit>>) {
        self.record_subcircuits(a, b, Status::Match, "");
    }

    fn subcircuit_mismatch(
        &mut self,
        a: Option<&Rc<SubCircuit>>,
        b: Option<&Rc<SubCircuit>>,
        msg: &str,
    ) {
        self.record_subcircuits(a, b, Status::Mismatch, msg);
    }
}
