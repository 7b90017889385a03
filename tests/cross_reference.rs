// Copyright (c) 2022-2024 The netlist-xref developers.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Recorder-level tests: event handling, pairing tables, sorting, log routing and
//! tolerance against malformed event sequences.

mod common;

use std::rc::Rc;

use common::*;
use netlist_xref::prelude::*;

#[test]
fn test_simple_inverter_match() {
    let a = build_inverter();
    let b = build_inverter();

    let mut xref = CrossReference::new();
    feed_inverter_match(&mut xref, &a, &b);

    let inv_a = a.circuit_by_name("INV").unwrap();
    let inv_b = b.circuit_by_name("INV").unwrap();

    assert_eq!(xref.circuit_count(), 1);
    let cp = &xref.circuits()[0];
    assert!(Rc::ptr_eq(cp.0.as_ref().unwrap(), &inv_a));
    assert!(Rc::ptr_eq(cp.1.as_ref().unwrap(), &inv_b));

    let data = xref.per_circuit_data_for(cp).unwrap();
    assert_eq!(data.status, Status::Match);

    // Nets are sorted by name and all match.
    let net_names: Vec<_> = data
        .nets
        .iter()
        .map(|p| p.first.as_ref().unwrap().name().unwrap())
        .collect();
    assert_eq!(net_names, vec!["IN", "OUT", "VDD", "VSS"]);
    assert!(data.nets.iter().all(|p| p.status == Status::Match));
    assert!(data.pins.iter().all(|p| p.status == Status::Match));

    // Devices are sorted by device class name: NMOS before PMOS.
    let class_names: Vec<_> = data
        .devices
        .iter()
        .map(|p| p.first.as_ref().unwrap().device_class().name().to_string())
        .collect();
    assert_eq!(class_names, vec!["NMOS", "PMOS"]);

    // Partner lookups.
    let vdd_a = inv_a.net_by_name("VDD").unwrap();
    let vdd_b = inv_b.net_by_name("VDD").unwrap();
    assert_eq!(xref.other_net_for(&vdd_a), Some(vdd_b.clone()));
    assert_eq!(xref.other_net_for(&vdd_b), Some(vdd_a.clone()));
    assert_eq!(xref.other_circuit_for(&inv_a), Some(inv_b.clone()));

    // The VDD net pair has exactly the PMOS source pairing as terminal detail.
    let detail = xref
        .per_net_data_for(&(Some(vdd_a.clone()), Some(vdd_b.clone())))
        .unwrap();
    assert_eq!(detail.terminals.len(), 1);
    let (ta, tb) = &detail.terminals[0];
    let ta = ta.as_ref().unwrap();
    let tb = tb.as_ref().unwrap();
    assert!(Rc::ptr_eq(ta.device(), &device_by_name(&inv_a, "P1")));
    assert!(Rc::ptr_eq(tb.device(), &device_by_name(&inv_b, "P1")));
    assert_eq!(ta.terminal_id(), MOS_S);
    assert_eq!(tb.terminal_id(), MOS_S);

    // One outside pin on each side, paired.
    assert_eq!(detail.pins.len(), 1);
    assert!(detail.pins[0].0.is_some() && detail.pins[0].1.is_some());
    assert!(detail.subcircuit_pins.is_empty());
}

#[test]
fn test_bidirectional_partners() {
    let a = build_inverter();
    let b = build_inverter();

    let mut xref = CrossReference::new();
    feed_inverter_match(&mut xref, &a, &b);

    for cp in xref.circuits() {
        if let Some(first) = &cp.0 {
            assert_eq!(xref.other_circuit_for(first), cp.1.clone());
        }
        if let Some(second) = &cp.1 {
            assert_eq!(xref.other_circuit_for(second), cp.0.clone());
        }

        let data = xref.per_circuit_data_for(cp).unwrap();
        for p in &data.nets {
            if let Some(first) = &p.first {
                assert_eq!(xref.other_net_for(first), p.second.clone());
            }
            if let Some(second) = &p.second {
                assert_eq!(xref.other_net_for(second), p.first.clone());
            }
        }
        for p in &data.devices {
            if let Some(first) = &p.first {
                assert_eq!(xref.other_device_for(first), p.second.clone());
            }
            if let Some(second) = &p.second {
                assert_eq!(xref.other_device_for(second), p.first.clone());
            }
        }
        for p in &data.pins {
            if let Some(first) = &p.first {
                assert_eq!(xref.other_pin_for(first), p.second.clone());
            }
            if let Some(second) = &p.second {
                assert_eq!(xref.other_pin_for(second), p.first.clone());
            }
        }
    }
}

#[test]
fn test_data_refs_agree_for_both_sides() {
    let a = build_inverter();
    let b = build_inverter();

    let mut xref = CrossReference::new();
    feed_inverter_match(&mut xref, &a, &b);

    let inv_a = a.circuit_by_name("INV").unwrap();
    let inv_b = b.circuit_by_name("INV").unwrap();

    let by_first = xref
        .per_circuit_data_for(&(Some(inv_a), None))
        .unwrap();
    let by_second = xref
        .per_circuit_data_for(&(None, Some(inv_b)))
        .unwrap();
    assert!(std::ptr::eq(by_first, by_second));
}

#[test]
fn test_sort_stability_across_runs() {
    let a = build_inverter();
    let b = build_inverter();

    let mut xref1 = CrossReference::new();
    feed_inverter_match(&mut xref1, &a, &b);
    let mut xref2 = CrossReference::new();
    feed_inverter_match(&mut xref2, &a, &b);

    assert_eq!(xref1.circuit_count(), xref2.circuit_count());
    for (cp1, cp2) in xref1.circuits().iter().zip(xref2.circuits()) {
        assert_eq!(cp1.0, cp2.0);
        assert_eq!(cp1.1, cp2.1);

        let d1 = xref1.per_circuit_data_for(cp1).unwrap();
        let d2 = xref2.per_circuit_data_for(cp2).unwrap();
        assert_eq!(d1.status, d2.status);

        assert_eq!(d1.nets.len(), d2.nets.len());
        for (p1, p2) in d1.nets.iter().zip(&d2.nets) {
            assert_eq!(p1.first, p2.first);
            assert_eq!(p1.second, p2.second);
            assert_eq!(p1.status, p2.status);
        }
        assert_eq!(d1.devices.len(), d2.devices.len());
        for (p1, p2) in d1.devices.iter().zip(&d2.devices) {
            assert_eq!(p1.first, p2.first);
            assert_eq!(p1.second, p2.second);
        }
    }
}

#[test]
fn test_order_independence_of_unrelated_events() {
    let a = build_inverter();
    let b = build_inverter();
    let inv_a = a.circuit_by_name("INV").unwrap();
    let inv_b = b.circuit_by_name("INV").unwrap();

    let run = |names: &[&str]| {
        let mut xref = CrossReference::new();
        xref.begin_netlist(&a, &b);
        xref.begin_circuit(Some(&inv_a), Some(&inv_b));
        for name in names {
            xref.match_nets(
                Some(&inv_a.net_by_name(name).unwrap()),
                Some(&inv_b.net_by_name(name).unwrap()),
            );
        }
        xref.end_circuit(Some(&inv_a), Some(&inv_b), true, "");
        xref.end_netlist(&a, &b);

        let cp = xref.circuits()[0].clone();
        xref.per_circuit_data_for(&cp)
            .unwrap()
            .nets
            .iter()
            .map(|p| p.first.as_ref().unwrap().name().unwrap())
            .collect::<Vec<_>>()
    };

    let order1 = run(&["IN", "OUT", "VDD", "VSS"]);
    let order2 = run(&["VSS", "VDD", "OUT", "IN"]);
    assert_eq!(order1, order2);
    assert_eq!(order1, vec!["IN", "OUT", "VDD", "VSS"]);
}

#[test]
fn test_unpaired_device_sorts_by_pair_order() {
    // Netlist A holds PMOS+NMOS+CAP, netlist B additionally holds a RES which has no
    // counterpart.
    let build = |with_res: bool| {
        let mut netlist = Netlist::new();
        let c = netlist.create_circuit("C", vec![]);
        c.create_device(&mos_class("PMOS"), Some("P1"));
        c.create_device(&mos_class("NMOS"), Some("N1"));
        c.create_device(&two_terminal_class("CAP"), Some("C1"));
        if with_res {
            c.create_device(&two_terminal_class("RES"), Some("R1"));
        }
        Rc::new(netlist)
    };
    let a = build(false);
    let b = build(true);
    let ca = a.circuit_by_name("C").unwrap();
    let cb = b.circuit_by_name("C").unwrap();

    let mut xref = CrossReference::new();
    xref.begin_netlist(&a, &b);
    xref.begin_circuit(Some(&ca), Some(&cb));
    xref.match_devices(
        Some(&device_by_name(&ca, "P1")),
        Some(&device_by_name(&cb, "P1")),
    );
    xref.match_devices(
        Some(&device_by_name(&ca, "N1")),
        Some(&device_by_name(&cb, "N1")),
    );
    xref.match_devices_with_different_parameters(
        Some(&device_by_name(&ca, "C1")),
        Some(&device_by_name(&cb, "C1")),
    );
    xref.device_mismatch(None, Some(&device_by_name(&cb, "R1")), "no counterpart");
    xref.end_circuit(Some(&ca), Some(&cb), false, "device mismatch");
    xref.end_netlist(&a, &b);

    let cp = xref.circuits()[0].clone();
    let data = xref.per_circuit_data_for(&cp).unwrap();
    assert_eq!(data.status, Status::NoMatch);
    assert_eq!(data.devices.len(), 4);

    // The one-sided RES entry sorts first (missing first side), then by class name.
    assert!(data.devices[0].first.is_none());
    assert_eq!(
        data.devices[0]
            .second
            .as_ref()
            .unwrap()
            .device_class()
            .name(),
        "RES"
    );
    assert_eq!(data.devices[0].status, Status::Mismatch);

    let class_names: Vec<_> = data.devices[1..]
        .iter()
        .map(|p| p.first.as_ref().unwrap().device_class().name().to_string())
        .collect();
    assert_eq!(class_names, vec!["CAP", "NMOS", "PMOS"]);
    assert_eq!(data.devices[1].status, Status::MatchWithWarning);
}

#[test]
fn test_log_entry_routing() {
    let a = build_inverter();
    let b = build_inverter();
    let inv_a = a.circuit_by_name("INV").unwrap();
    let inv_b = b.circuit_by_name("INV").unwrap();

    let mut xref = CrossReference::new();
    xref.begin_netlist(&a, &b);
    xref.log_entry(Severity::Info, "before any circuit");
    xref.begin_circuit(Some(&inv_a), Some(&inv_b));
    xref.log_entry(Severity::Info, "inside circuit");
    xref.end_circuit(Some(&inv_a), Some(&inv_b), true, "");
    xref.log_entry(Severity::Info, "after circuit");
    xref.end_netlist(&a, &b);

    let global: Vec<_> = xref
        .global_log_entries()
        .iter()
        .map(|e| e.msg.as_str())
        .collect();
    assert_eq!(global, vec!["before any circuit", "after circuit"]);

    let cp = xref.circuits()[0].clone();
    let data = xref.per_circuit_data_for(&cp).unwrap();
    assert_eq!(data.log_entries, vec![LogEntry::new(Severity::Info, "inside circuit")]);
}

#[test]
fn test_malformed_event_sequences_are_tolerated() {
    let a = build_inverter();
    let b = build_inverter();
    let inv_a = a.circuit_by_name("INV").unwrap();
    let inv_b = b.circuit_by_name("INV").unwrap();

    let mut xref = CrossReference::new();
    xref.begin_netlist(&a, &b);

    // Entity event without an open circuit: reported and ignored.
    xref.match_nets(
        Some(&inv_a.net_by_name("IN").unwrap()),
        Some(&inv_b.net_by_name("IN").unwrap()),
    );
    // End without begin: reported and ignored.
    xref.end_circuit(Some(&inv_a), Some(&inv_b), true, "");

    // Begin while another circuit is open: the first one is force-closed.
    xref.begin_circuit(Some(&inv_a), Some(&inv_b));
    xref.begin_circuit(None, Some(&inv_b));
    xref.end_circuit(None, Some(&inv_b), true, "");
    xref.end_netlist(&a, &b);

    assert_eq!(xref.circuit_count(), 2);
    assert!(xref
        .global_log_entries()
        .iter()
        .any(|e| e.severity == Severity::Error));

    // The force-closed circuit has no recorded outcome.
    let data = xref
        .per_circuit_data_for(&(Some(inv_a.clone()), None))
        .unwrap();
    assert_eq!(data.status, Status::None);
}

#[test]
fn test_duplicate_pairing_last_wins() {
    let a = build_inverter();
    let b = build_inverter();
    let inv_a = a.circuit_by_name("INV").unwrap();
    let inv_b = b.circuit_by_name("INV").unwrap();

    let in_a = inv_a.net_by_name("IN").unwrap();
    let in_b = inv_b.net_by_name("IN").unwrap();
    let out_b = inv_b.net_by_name("OUT").unwrap();

    let mut xref = CrossReference::new();
    xref.begin_netlist(&a, &b);
    xref.begin_circuit(Some(&inv_a), Some(&inv_b));
    xref.match_nets(Some(&in_a), Some(&in_b));
    xref.match_nets(Some(&in_a), Some(&out_b));
    xref.end_circuit(Some(&inv_a), Some(&inv_b), true, "");
    xref.end_netlist(&a, &b);

    // The most recent pairing wins; the stale reverse entry keeps its last value.
    assert_eq!(xref.other_net_for(&in_a), Some(out_b.clone()));
    assert_eq!(xref.other_net_for(&out_b), Some(in_a.clone()));
    assert_eq!(xref.other_net_for(&in_b), Some(in_a.clone()));
}

#[test]
fn test_clear_resets_everything() {
    let a = build_inverter();
    let b = build_inverter();

    let mut xref = CrossReference::new();
    feed_inverter_match(&mut xref, &a, &b);
    assert_eq!(xref.circuit_count(), 1);

    xref.clear();
    assert_eq!(xref.circuit_count(), 0);
    assert!(xref.netlist_a().is_none());
    assert!(xref.global_log_entries().is_empty());

    let inv_a = a.circuit_by_name("INV").unwrap();
    assert!(xref.other_circuit_for(&inv_a).is_none());
    assert!(xref
        .per_circuit_data_for(&(Some(inv_a.clone()), None))
        .is_none());

    // The cross-reference can record a fresh run after clear().
    feed_inverter_match(&mut xref, &a, &b);
    assert_eq!(xref.circuit_count(), 1);
}

#[test]
fn test_netlist_accessors_track_lifetimes() {
    let a = build_inverter();
    let b = build_inverter();

    let mut xref = CrossReference::new();
    feed_inverter_match(&mut xref, &a, &b);

    assert!(Rc::ptr_eq(&xref.netlist_a().unwrap(), &a));
    assert!(Rc::ptr_eq(&xref.netlist_b().unwrap(), &b));

    drop(b);
    assert!(xref.netlist_b().is_none());
}
