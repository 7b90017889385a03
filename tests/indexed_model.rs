// Copyright (c) 2022-2024 The netlist-xref developers.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tests for the indexed model backends: order stability, index round-trips, child
//! circuit synthesis and status hints.

mod common;

use std::rc::Rc;

use common::*;
use netlist_xref::prelude::*;

// Single-netlist backend.

#[test]
fn test_single_model_counts_and_orders() {
    let netlist = build_inverter();
    let model = SingleIndexedNetlistModel::new(netlist.clone());
    assert!(model.is_single());

    assert_eq!(model.circuit_count(), 1);
    assert_eq!(model.top_circuit_count(), 1);

    let (cp, status, _) = model.circuit_from_index(0).unwrap();
    assert_eq!(status, Status::None);
    assert!(cp.1.is_none());
    let inv = cp.0.clone().unwrap();
    assert_eq!(inv.name(), "INV");

    assert_eq!(model.net_count(&cp), 4);
    assert_eq!(model.device_count(&cp), 2);
    assert_eq!(model.pin_count(&cp), 4);
    assert_eq!(model.subcircuit_count(&cp), 0);

    // Nets are ordered by name.
    let net_names: Vec<_> = (0..4)
        .map(|i| {
            let (np, _, _) = model.net_from_index(&cp, i).unwrap();
            np.0.unwrap().name().unwrap()
        })
        .collect();
    assert_eq!(net_names, vec!["IN", "OUT", "VDD", "VSS"]);

    // Devices are ordered by name.
    let device_names: Vec<_> = (0..2)
        .map(|i| {
            let (dp, _, _) = model.device_from_index(&cp, i).unwrap();
            dp.0.unwrap().name().unwrap()
        })
        .collect();
    assert_eq!(device_names, vec!["N1", "P1"]);

    // Pins keep their declaration order.
    for i in 0..4 {
        let (pp, _, _) = model.pin_from_index(&cp, i).unwrap();
        assert_eq!(pp.0.as_ref().unwrap().id(), i);
    }

    // Out of range yields nothing.
    assert!(model.net_from_index(&cp, 4).is_none());
    assert!(model.circuit_from_index(1).is_none());

    // Single models have no partners.
    let in_net = inv.net_by_name("IN").unwrap();
    assert!(model.second_net_for(&in_net).is_none());
}

#[test]
fn test_single_model_unnamed_nets_sort_last() {
    let build = |extra_unnamed_first: bool| {
        let mut netlist = Netlist::new();
        let c = netlist.create_circuit("C", vec![]);
        if extra_unnamed_first {
            c.create_net::<String>(None);
        }
        let u1 = c.create_net::<String>(None);
        let x = c.create_net(Some("X"));
        let u2 = c.create_net::<String>(None);
        (Rc::new(netlist), u1, x, u2)
    };

    for extra in [false, true] {
        let (netlist, u1, x, u2) = build(extra);
        let model = SingleIndexedNetlistModel::new(netlist.clone());
        let cp = (netlist.circuit_by_name("C"), None);

        let nets: Vec<_> = (0..model.net_count(&cp))
            .map(|i| model.net_from_index(&cp, i).unwrap().0 .0.unwrap())
            .collect();

        // The named net comes first; unnamed nets follow ordered by id. Inserting
        // another unnamed net earlier does not perturb the relative order.
        let pos =
            |net: &Rc<Net>| nets.iter().position(|n| Rc::ptr_eq(n, net)).unwrap();
        assert_eq!(pos(&x), 0);
        assert!(pos(&u1) < pos(&u2));
    }
}

#[test]
fn test_single_model_index_round_trip() {
    let mut netlist = Netlist::new();
    let inv = netlist.create_circuit("INV", vec![Pin::new("A")]);
    let via = netlist.create_circuit("VIA", vec![Pin::new("A")]);
    let top = netlist.create_circuit("TOP", vec![Pin::new("IN"), Pin::new("OUT")]);
    top.create_subcircuit(&inv, Some("U1"));
    top.create_subcircuit(&via, Some("U2"));
    top.create_subcircuit(&inv, Some("U0"));
    let n = top.create_net(Some("n"));
    top.connect_pin_by_id(0, n.clone());
    top.create_device(&mos_class("NMOS"), Some("M1"));
    let netlist = Rc::new(netlist);

    let model = SingleIndexedNetlistModel::new(netlist.clone());

    for i in 0..model.circuit_count() {
        let (cp, _, _) = model.circuit_from_index(i).unwrap();
        assert_eq!(model.circuit_index(&cp), Some(i));
    }

    let top_pair = (Some(top.clone()), None);
    for i in 0..model.net_count(&top_pair) {
        let (np, _, _) = model.net_from_index(&top_pair, i).unwrap();
        assert_eq!(model.net_index(&np), Some(i));
    }
    for i in 0..model.device_count(&top_pair) {
        let (dp, _, _) = model.device_from_index(&top_pair, i).unwrap();
        assert_eq!(model.device_index(&dp), Some(i));
    }
    for i in 0..model.subcircuit_count(&top_pair) {
        let (sp, _, _) = model.subcircuit_from_index(&top_pair, i).unwrap();
        assert_eq!(model.subcircuit_index(&sp), Some(i));
    }
    for i in 0..model.pin_count(&top_pair) {
        let (pp, _, _) = model.pin_from_index(&top_pair, i).unwrap();
        assert_eq!(model.pin_index(&pp, &top_pair), Some(i));
    }

    // Child circuits: two distinct templates, ordered by name.
    assert_eq!(model.child_circuit_count(&top_pair), 2);
    let (first_child, _, _) = model.child_circuit_from_index(&top_pair, 0).unwrap();
    assert_eq!(first_child.0.unwrap().name(), "INV");
    let (second_child, _, _) = model.child_circuit_from_index(&top_pair, 1).unwrap();
    assert_eq!(second_child.0.unwrap().name(), "VIA");

    // Parents.
    let net_pair = (Some(n), None);
    let parent = model.parent_of_net(&net_pair);
    assert!(Rc::ptr_eq(parent.0.as_ref().unwrap(), &top));
}

#[test]
fn test_single_model_subcircuit_pins_are_synthesized() {
    let a = build_swappable_pin_netlist(0);
    let top = a.circuit_by_name("TOP").unwrap();
    let u1 = subcircuit_by_name(&top, "U1");

    let model = SingleIndexedNetlistModel::new(a.clone());
    let sp = (Some(u1.clone()), None);

    // One entry per pin of the instantiated circuit, connected or not.
    assert_eq!(model.subcircuit_pin_count(&sp), 2);

    let (r0, other0) = model.subcircuit_pinref_from_index(&sp, 0).unwrap();
    assert!(other0.is_none());
    let r0 = r0.unwrap();
    assert_eq!(r0.pin_id(), 0);
    assert!(r0.net().is_some());

    let (r1, _) = model.subcircuit_pinref_from_index(&sp, 1).unwrap();
    let r1 = r1.unwrap();
    assert_eq!(r1.pin_id(), 1);
    assert!(r1.net().is_none());
}

// Cross-reference backend.

#[test]
fn test_xref_model_browsing_and_round_trip() {
    let a = build_inverter();
    let b = build_inverter();

    let mut xref = CrossReference::new();
    feed_inverter_match(&mut xref, &a, &b);
    let xref = Rc::new(xref);
    let model = CrossReferenceModel::new(xref.clone());
    assert!(!model.is_single());

    assert_eq!(model.circuit_count(), 1);
    assert_eq!(model.top_circuit_count(), 1);

    let (cp, status, _) = model.circuit_from_index(0).unwrap();
    assert_eq!(status, Status::Match);
    assert_eq!(model.circuit_index(&cp), Some(0));
    // Either side alone identifies the circuit pair.
    assert_eq!(model.circuit_index(&(cp.0.clone(), None)), Some(0));
    assert_eq!(model.circuit_index(&(None, cp.1.clone())), Some(0));

    assert_eq!(model.net_count(&cp), 4);
    assert_eq!(model.device_count(&cp), 2);
    assert_eq!(model.pin_count(&cp), 4);

    for i in 0..model.net_count(&cp) {
        let (np, status, _) = model.net_from_index(&cp, i).unwrap();
        assert_eq!(status, Status::Match);
        assert_eq!(model.net_index(&np), Some(i));
        assert_eq!(model.net_index(&(np.0.clone(), None)), Some(i));

        let parent = model.parent_of_net(&np);
        assert!(Rc::ptr_eq(parent.0.as_ref().unwrap(), cp.0.as_ref().unwrap()));
    }
    for i in 0..model.device_count(&cp) {
        let (dp, _, _) = model.device_from_index(&cp, i).unwrap();
        assert_eq!(model.device_index(&dp), Some(i));
    }
    for i in 0..model.pin_count(&cp) {
        let (pp, _, _) = model.pin_from_index(&cp, i).unwrap();
        assert_eq!(model.pin_index(&pp, &cp), Some(i));
    }

    // Net endpoint browsing goes through the per-net detail.
    let (np, _, _) = model.net_from_index(&cp, 2).unwrap(); // VDD
    assert_eq!(model.net_terminal_count(&np), 1);
    assert_eq!(model.net_pin_count(&np), 1);
    assert_eq!(model.net_subcircuit_pin_count(&np), 0);
    let terminal_pair = model.net_terminalref_from_index(&np, 0).unwrap();
    assert!(terminal_pair.0.is_some() && terminal_pair.1.is_some());
    assert!(model.net_terminalref_from_index(&np, 1).is_none());

    // Partner lookups.
    let in_a = a
        .circuit_by_name("INV")
        .unwrap()
        .net_by_name("IN")
        .unwrap();
    let in_b = b
        .circuit_by_name("INV")
        .unwrap()
        .net_by_name("IN")
        .unwrap();
    assert_eq!(model.second_net_for(&in_a), Some(in_b));
}

#[test]
fn test_xref_model_skipped_circuit_children() {
    // Netlist A: TOP instantiates INV and VIA. Netlist B: TOP instantiates INV only.
    let build = |with_via: bool| {
        let mut netlist = Netlist::new();
        let inv = netlist.create_circuit("INV", vec![Pin::new("A")]);
        let top = netlist.create_circuit("TOP", vec![]);
        top.create_subcircuit(&inv, Some("U1"));
        if with_via {
            let via = netlist.create_circuit("VIA", vec![Pin::new("A")]);
            let u2 = top.create_subcircuit(&via, Some("U2"));
            let n = top.create_net(Some("via_net"));
            u2.connect_pin(0, &n);
        }
        Rc::new(netlist)
    };
    let a = build(true);
    let b = build(false);

    let inv_a = a.circuit_by_name("INV").unwrap();
    let inv_b = b.circuit_by_name("INV").unwrap();
    let via_a = a.circuit_by_name("VIA").unwrap();
    let top_a = a.circuit_by_name("TOP").unwrap();
    let top_b = b.circuit_by_name("TOP").unwrap();

    let mut xref = CrossReference::new();
    xref.begin_netlist(&a, &b);
    xref.begin_circuit(Some(&inv_a), Some(&inv_b));
    xref.match_pins(
        Some(&inv_a.pin_by_id(0).unwrap()),
        Some(&inv_b.pin_by_id(0).unwrap()),
    );
    xref.end_circuit(Some(&inv_a), Some(&inv_b), true, "");
    xref.circuit_mismatch(Some(&via_a), None, "not in reference");
    xref.circuit_skipped(Some(&top_a), Some(&top_b), "pin assignment unresolved");
    xref.end_netlist(&a, &b);

    let xref = Rc::new(xref);
    let model = CrossReferenceModel::new(xref.clone());

    // Circuit pairs are sorted by name: INV, TOP, VIA.
    assert_eq!(model.circuit_count(), 3);
    let (top_pair, status, _) = model.circuit_from_index(1).unwrap();
    assert_eq!(status, Status::Skipped);
    assert!(Rc::ptr_eq(top_pair.0.as_ref().unwrap(), &top_a));

    // The child list is synthesized from the circuits' own sub-circuit lists.
    assert_eq!(model.child_circuit_count(&top_pair), 2);
    let (child0, status0, _) = model.child_circuit_from_index(&top_pair, 0).unwrap();
    assert!(Rc::ptr_eq(child0.0.as_ref().unwrap(), &inv_a));
    assert!(Rc::ptr_eq(child0.1.as_ref().unwrap(), &inv_b));
    assert_eq!(status0, Status::Match);

    let (child1, status1, _) = model.child_circuit_from_index(&top_pair, 1).unwrap();
    assert!(Rc::ptr_eq(child1.0.as_ref().unwrap(), &via_a));
    assert!(child1.1.is_none());
    assert_eq!(status1, Status::Mismatch);

    // Only TOP is a top-level pair.
    assert_eq!(model.top_circuit_count(), 1);
    let (tp, _, _) = model.top_circuit_from_index(0).unwrap();
    assert!(Rc::ptr_eq(tp.0.as_ref().unwrap(), &top_a));

    // The skipped status comes with its canonical explanation.
    let hint = model.circuit_status_hint(1);
    assert!(hint.starts_with("Circuits can only be matched"));
    assert!(hint.ends_with("pin assignment unresolved"));

    // The unpaired VIA instance falls back to pin-id addressing.
    let u2 = subcircuit_by_name(&top_a, "U2");
    let sp = (Some(u2), None);
    assert_eq!(model.subcircuit_pin_count(&sp), 1);
    let (r, other) = model.subcircuit_pinref_from_index(&sp, 0).unwrap();
    assert_eq!(r.unwrap().pin_id(), 0);
    assert!(other.is_none());
}

#[test]
fn test_xref_model_subcircuit_pin_browsing() {
    let a = build_swappable_pin_netlist(0);
    let b = build_swappable_pin_netlist(1);

    let inv2_a = a.circuit_by_name("INV2").unwrap();
    let inv2_b = b.circuit_by_name("INV2").unwrap();
    let top_a = a.circuit_by_name("TOP").unwrap();
    let top_b = b.circuit_by_name("TOP").unwrap();
    let u1_a = subcircuit_by_name(&top_a, "U1");
    let u1_b = subcircuit_by_name(&top_b, "U1");

    let mut xref = CrossReference::new();
    xref.begin_netlist(&a, &b);
    xref.begin_circuit(Some(&inv2_a), Some(&inv2_b));
    xref.match_pins(
        Some(&inv2_a.pin_by_id(0).unwrap()),
        Some(&inv2_b.pin_by_id(0).unwrap()),
    );
    xref.match_pins(
        Some(&inv2_a.pin_by_id(1).unwrap()),
        Some(&inv2_b.pin_by_id(1).unwrap()),
    );
    xref.end_circuit(Some(&inv2_a), Some(&inv2_b), true, "");
    xref.begin_circuit(Some(&top_a), Some(&top_b));
    xref.match_nets(
        Some(&top_a.net_by_name("n").unwrap()),
        Some(&top_b.net_by_name("n").unwrap()),
    );
    xref.match_subcircuits(Some(&u1_a), Some(&u1_b));
    xref.end_circuit(Some(&top_a), Some(&top_b), true, "");
    xref.end_netlist(&a, &b);

    let xref = Rc::new(xref);
    let model = CrossReferenceModel::new(xref.clone());

    // The paired sub-circuit exposes the pins whose nets correspond.
    let sp = (Some(u1_a.clone()), Some(u1_b.clone()));
    assert_eq!(model.subcircuit_pin_count(&sp), 1);
    let (ra, rb) = model.subcircuit_pinref_from_index(&sp, 0).unwrap();
    assert_eq!(ra.unwrap().pin_id(), 0);
    assert_eq!(rb.unwrap().pin_id(), 1);

    // Round trip of the sub-circuit pair itself.
    let top_pair = (Some(top_a.clone()), Some(top_b.clone()));
    assert_eq!(model.subcircuit_count(&top_pair), 1);
    let (scp, _, _) = model.subcircuit_from_index(&top_pair, 0).unwrap();
    assert_eq!(model.subcircuit_index(&scp), Some(0));
    let parent = model.parent_of_subcircuit(&scp);
    assert!(Rc::ptr_eq(parent.0.as_ref().unwrap(), &top_a));
}

#[test]
fn test_xref_model_status_hints() {
    let build = |with_res: bool| {
        let mut netlist = Netlist::new();
        let c = netlist.create_circuit("C", vec![]);
        let _n1 = c.create_net(Some("n1"));
        c.create_device(&mos_class("NMOS"), Some("M1"));
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
    xref.match_ambiguous_nets(
        Some(&ca.net_by_name("n1").unwrap()),
        Some(&cb.net_by_name("n1").unwrap()),
        "symmetric candidates",
    );
    xref.match_devices(
        Some(&device_by_name(&ca, "M1")),
        Some(&device_by_name(&cb, "M1")),
    );
    xref.device_mismatch(None, Some(&device_by_name(&cb, "R1")), "no counterpart");
    xref.end_circuit(Some(&ca), Some(&cb), false, "device mismatch");
    xref.end_netlist(&a, &b);

    let xref = Rc::new(xref);
    let model = CrossReferenceModel::new(xref.clone());
    let (cp, _, _) = model.circuit_from_index(0).unwrap();

    // Paired circuits with a mismatch inside.
    let circuit_hint = model.circuit_status_hint(0);
    assert!(circuit_hint.starts_with("Circuits could be paired"));
    assert!(circuit_hint.contains("device mismatch"));

    // The one-sided device sorts first; its hint explains the missing counterpart.
    let device_hint = model.device_status_hint(&cp, 0);
    assert!(device_hint.starts_with("No matching device was found"));
    assert!(device_hint.ends_with("no counterpart"));

    // Matched devices carry no hint.
    assert_eq!(model.device_status_hint(&cp, 1), "");

    // Ambiguous nets warn.
    let net_hint = model.net_status_hint(&cp, 0);
    assert!(net_hint.contains("ambiguous"));
    assert!(net_hint.contains("symmetric candidates"));

    // A matched pin-less circuit yields no pin hint.
    assert_eq!(model.pin_status_hint(&cp, 0), "");
}
