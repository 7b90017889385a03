// Copyright (c) 2022-2024 The netlist-xref developers.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shared builders for the cross-reference tests.

#![allow(dead_code)]

use std::rc::Rc;

use netlist_xref::prelude::*;

/// Terminal ids of the MOS device classes created by `mos_class`.
pub const MOS_S: usize = 0;
pub const MOS_G: usize = 1;
pub const MOS_D: usize = 2;

/// A three-terminal MOS class with swappable source and drain.
pub fn mos_class(name: &str) -> Rc<DeviceClass> {
    let mut class = DeviceClass::new(name);
    let s = class.add_terminal("S");
    let _g = class.add_terminal("G");
    let d = class.add_terminal("D");
    class.equate_terminals(&[s, d]);
    Rc::new(class)
}

/// A two-terminal class (resistor, capacitor) with swappable terminals.
pub fn two_terminal_class(name: &str) -> Rc<DeviceClass> {
    let mut class = DeviceClass::new(name);
    let a = class.add_terminal("A");
    let b = class.add_terminal("B");
    class.equate_terminals(&[a, b]);
    Rc::new(class)
}

/// Find a device of a circuit by name.
pub fn device_by_name(circuit: &Rc<Circuit>, name: &str) -> Rc<Device> {
    circuit
        .devices()
        .iter()
        .find(|d| d.name().as_deref() == Some(name))
        .cloned()
        .unwrap_or_else(|| panic!("No device named '{}'.", name))
}

/// Find a sub-circuit instance of a circuit by name.
pub fn subcircuit_by_name(circuit: &Rc<Circuit>, name: &str) -> Rc<SubCircuit> {
    circuit
        .subcircuits()
        .iter()
        .find(|s| s.name().as_deref() == Some(name))
        .cloned()
        .unwrap_or_else(|| panic!("No sub-circuit named '{}'.", name))
}

/// Build a netlist holding a single CMOS inverter `INV` with pins IN, OUT, VDD, VSS,
/// one PMOS (`P1`) and one NMOS (`N1`) transistor.
pub fn build_inverter() -> Rc<Netlist> {
    let mut netlist = Netlist::new();
    let inv = netlist.create_circuit(
        "INV",
        vec![
            Pin::new("IN"),
            Pin::new("OUT"),
            Pin::new("VDD"),
            Pin::new("VSS"),
        ],
    );

    let n_in = inv.create_net(Some("IN"));
    let n_out = inv.create_net(Some("OUT"));
    let n_vdd = inv.create_net(Some("VDD"));
    let n_vss = inv.create_net(Some("VSS"));

    inv.connect_pin_by_id(0, n_in.clone());
    inv.connect_pin_by_id(1, n_out.clone());
    inv.connect_pin_by_id(2, n_vdd.clone());
    inv.connect_pin_by_id(3, n_vss.clone());

    let pmos = mos_class("PMOS");
    let nmos = mos_class("NMOS");

    let p1 = inv.create_device(&pmos, Some("P1"));
    p1.connect_terminal(MOS_S, &n_vdd);
    p1.connect_terminal(MOS_G, &n_in);
    p1.connect_terminal(MOS_D, &n_out);

    let n1 = inv.create_device(&nmos, Some("N1"));
    n1.connect_terminal(MOS_S, &n_vss);
    n1.connect_terminal(MOS_G, &n_in);
    n1.connect_terminal(MOS_D, &n_out);

    Rc::new(netlist)
}

/// Feed the standard full-match event sequence for two inverter netlists built with
/// `build_inverter`.
pub fn feed_inverter_match(xref: &mut CrossReference, a: &Rc<Netlist>, b: &Rc<Netlist>) {
    let inv_a = a.circuit_by_name("INV").unwrap();
    let inv_b = b.circuit_by_name("INV").unwrap();

    xref.begin_netlist(a, b);
    xref.begin_circuit(Some(&inv_a), Some(&inv_b));
    for name in ["IN", "OUT", "VDD", "VSS"] {
        xref.match_nets(
            Some(&inv_a.net_by_name(name).unwrap()),
            Some(&inv_b.net_by_name(name).unwrap()),
        );
    }
    for name in ["IN", "OUT", "VDD", "VSS"] {
        xref.match_pins(
            Some(&inv_a.pin_by_name(name).unwrap()),
            Some(&inv_b.pin_by_name(name).unwrap()),
        );
    }
    xref.match_devices(
        Some(&device_by_name(&inv_a, "P1")),
        Some(&device_by_name(&inv_b, "P1")),
    );
    xref.match_devices(
        Some(&device_by_name(&inv_a, "N1")),
        Some(&device_by_name(&inv_b, "N1")),
    );
    xref.end_circuit(Some(&inv_a), Some(&inv_b), true, "");
    xref.end_netlist(a, b);
}

/// Build a netlist with a two-pin circuit `INV2` (pins A, B) and a circuit `TOP` with
/// one `INV2` instance `U1`. The net `n` of `TOP` is attached to the instance pin with
/// the given id.
pub fn build_swappable_pin_netlist(connected_pin: usize) -> Rc<Netlist> {
    let mut netlist = Netlist::new();
    let inv2 = netlist.create_circuit("INV2", vec![Pin::new("A"), Pin::new("B")]);
    let top = netlist.create_circuit("TOP", vec![]);

    let u1 = top.create_subcircuit(&inv2, Some("U1"));
    let n = top.create_net(Some("n"));
    u1.connect_pin(connected_pin, &n);

    Rc::new(netlist)
}
