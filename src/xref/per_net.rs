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
//! Cross-correlation of the endpoints of two paired nets.
//!
//! The algorithms run after the pairing tables are complete. They pair device
//! terminals through the device pairing plus terminal-id normalization, outside pins
//! through the pin pairing, and sub-circuit pins through the sub-circuit pairing with a
//! fallback for swappable pins. Candidates are consumed on match so no endpoint of the
//! second net is paired twice.

use std::collections::BTreeMap;
use std::rc::Rc;

use fnv::FnvHashMap;

use crate::netlist::prelude::*;
use crate::rc_key::RcKey;

use super::cross_reference::{NetPair, PerNetData};
use super::order::{cmp_pin_refs, cmp_subcircuit_pin_refs, cmp_terminal_refs, cmp_value_pair};

type OtherMap<T> = FnvHashMap<RcKey<T>, Option<Rc<T>>>;

/// Compute the endpoint correspondence of a net pair.
pub(super) fn build_per_net_data(
    nets: &NetPair,
    other_device: &OtherMap<Device>,
    other_pin: &OtherMap<Pin>,
    other_subcircuit: &OtherMap<SubCircuit>,
) -> PerNetData {
    let mut data = PerNetData::default();
    match (&nets.0, &nets.1) {
        (None, None) => {}
        (Some(a), None) => init_from_single(a, true, &mut data),
        (None, Some(b)) => init_from_single(b, false, &mut data),
        (Some(a), Some(b)) => {
            build_terminal_refs(a, b, other_device, &mut data);
            build_pin_refs(a, b, other_pin, &mut data);
            build_subcircuit_pin_refs(a, b, other_subcircuit, other_pin, &mut data);
        }
    }
    data
}

/// Fill the correspondence for a net without a partner: every endpoint is one-sided,
/// in the net's natural iteration order.
fn init_from_single(net: &Rc<Net>, first: bool, data: &mut PerNetData) {
    for r in net.pins().iter() {
        data.pins.push(if first {
            (Some(r.clone()), None)
        } else {
            (None, Some(r.clone()))
        });
    }
    for r in net.subcircuit_pins().iter() {
        data.subcircuit_pins.push(if first {
            (Some(r.clone()), None)
        } else {
            (None, Some(r.clone()))
        });
    }
    for r in net.terminals().iter() {
        data.terminals.push(if first {
            (Some(r.clone()), None)
        } else {
            (None, Some(r.clone()))
        });
    }
}

/// Pair the device terminal references of the two nets.
///
/// Terminals are matched per device pair on the basis of normalized terminal ids: the
/// terminal definitions of the partner device are walked in definition order and the
/// first definition with an equal normalized id whose endpoint is still unconsumed
/// wins.
fn build_terminal_refs(
    net_a: &Rc<Net>,
    net_b: &Rc<Net>,
    other_device: &OtherMap<Device>,
    data: &mut PerNetData,
) {
    let mut d2t_a: BTreeMap<(RcKey<Device>, usize), NetTerminalRef> = BTreeMap::new();
    let mut d2t_b: BTreeMap<(RcKey<Device>, usize), NetTerminalRef> = BTreeMap::new();

    for r in net_a.terminals().iter() {
        d2t_a
            .entry((RcKey::new(r.device()), r.terminal_id()))
            .or_insert_with(|| r.clone());
    }
    for r in net_b.terminals().iter() {
        d2t_b
            .entry((RcKey::new(r.device()), r.terminal_id()))
            .or_insert_with(|| r.clone());
    }

    for ((device_key, terminal_id), ref_a) in &d2t_a {
        let device_a = device_key.get();

        let mut ref_b = None;

        if let Some(Some(device_b)) = other_device.get(device_key) {
            // We have a device pair. Now we need to match the terminals: we do so on
            // the basis of normalized terminal IDs.
            let normalized_a = device_a
                .device_class()
                .normalize_terminal_id(*terminal_id);

            for t in device_b.device_class().terminal_definitions() {
                if device_b.device_class().normalize_terminal_id(t.id()) == normalized_a {
                    if let Some(r) = d2t_b.remove(&(RcKey::new(device_b), t.id())) {
                        // The entry is removed so we won't find it again.
                        ref_b = Some(r);
                        break;
                    }
                }
            }
        }

        data.terminals.push((Some(ref_a.clone()), ref_b));
    }

    for r in d2t_b.values() {
        data.terminals.push((None, Some(r.clone())));
    }

    data.terminals
        .sort_by(|x, y| cmp_value_pair(x, y, cmp_terminal_refs));
}

/// Pair the outside pin references of the two nets through the pin pairing.
fn build_pin_refs(net_a: &Rc<Net>, net_b: &Rc<Net>, other_pin: &OtherMap<Pin>, data: &mut PerNetData) {
    let mut p2r_a: BTreeMap<RcKey<Pin>, NetPinRef> = BTreeMap::new();
    let mut p2r_b: BTreeMap<RcKey<Pin>, NetPinRef> = BTreeMap::new();

    for r in net_a.pins().iter() {
        p2r_a
            .entry(RcKey::new(r.pin()))
            .or_insert_with(|| r.clone());
    }
    for r in net_b.pins().iter() {
        p2r_b
            .entry(RcKey::new(r.pin()))
            .or_insert_with(|| r.clone());
    }

    for (pin_key, ref_a) in &p2r_a {
        let mut ref_b = None;

        if let Some(Some(pin_b)) = other_pin.get(pin_key) {
            // The entry is removed so we won't find it again.
            ref_b = p2r_b.remove(&RcKey::new(pin_b));
        }

        data.pins.push((Some(ref_a.clone()), ref_b));
    }

    for r in p2r_b.values() {
        data.pins.push((None, Some(r.clone())));
    }

    data.pins.sort_by(|x, y| cmp_value_pair(x, y, cmp_pin_refs));
}

/// Pair the sub-circuit pin references of the two nets.
///
/// The primary match goes through the pin pairing of the instantiated circuits. If
/// that fails for a paired sub-circuit, the lowest-keyed unconsumed pin of that
/// sub-circuit is taken instead; this keeps the pairing deterministic when the compare
/// accepted swappable pins in either order.
fn build_subcircuit_pin_refs(
    net_a: &Rc<Net>,
    net_b: &Rc<Net>,
    other_subcircuit: &OtherMap<SubCircuit>,
    other_pin: &OtherMap<Pin>,
    data: &mut PerNetData,
) {
    let mut s2t_a: BTreeMap<(RcKey<SubCircuit>, usize), NetSubcircuitPinRef> = BTreeMap::new();
    let mut s2t_b: BTreeMap<(RcKey<SubCircuit>, usize), NetSubcircuitPinRef> = BTreeMap::new();

    for r in net_a.subcircuit_pins().iter() {
        s2t_a
            .entry((RcKey::new(r.subcircuit()), r.pin_id()))
            .or_insert_with(|| r.clone());
    }
    for r in net_b.subcircuit_pins().iter() {
        s2t_b
            .entry((RcKey::new(r.subcircuit()), r.pin_id()))
            .or_insert_with(|| r.clone());
    }

    for ((subcircuit_key, pin_id), ref_a) in &s2t_a {
        let mut ref_b = None;

        if let Some(Some(subcircuit_b)) = other_subcircuit.get(subcircuit_key) {
            // We have a sub-circuit pair. Now we need to match the pins: we do so on
            // the basis of pin matching.
            let pin_a = subcircuit_key
                .get()
                .circuit_ref()
                .upgrade()
                .and_then(|c| c.pin_by_id(*pin_id));

            if let Some(pin_a) = pin_a {
                if let Some(Some(pin_b)) = other_pin.get(&RcKey::new(&pin_a)) {
                    // The entry is removed so we won't find it again.
                    ref_b = s2t_b.remove(&(RcKey::new(subcircuit_b), pin_b.id()));
                }
            }

            // Fallback for swappable pins: match based on the sub-circuit alone.
            if ref_b.is_none() {
                let candidate = s2t_b
                    .range((RcKey::new(subcircuit_b), 0)..)
                    .next()
                    .filter(|(k, _)| k.0 == RcKey::new(subcircuit_b))
                    .map(|(k, _)| k.clone());
                if let Some(candidate) = candidate {
                    ref_b = s2t_b.remove(&candidate);
                }
            }
        }

        data.subcircuit_pins.push((Some(ref_a.clone()), ref_b));
    }

    for r in s2t_b.values() {
        data.subcircuit_pins.push((None, Some(r.clone())));
    }

    data.subcircuit_pins
        .sort_by(|x, y| cmp_value_pair(x, y, cmp_subcircuit_pin_refs));
}
