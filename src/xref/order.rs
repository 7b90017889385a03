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
//! Total orders over netlist entities and entity pairs.
//!
//! All comparators are three-way and total; together with the tie-breakers this makes
//! every sort output deterministic. Pairs are ordered with missing sides first, then by
//! the first sides, then by the second sides.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::netlist::prelude::*;

/// Compare two optional values with the given value comparator.
/// A missing value sorts before any present value.
pub fn cmp_optional<T, F>(a: Option<&T>, b: Option<&T>, cmp: F) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => cmp(x, y),
    }
}

/// Lift a value comparator to pairs of optional handles: the first sides decide, the
/// second sides break ties.
pub fn cmp_pair<T, F>(
    a: &(Option<Rc<T>>, Option<Rc<T>>),
    b: &(Option<Rc<T>>, Option<Rc<T>>),
    cmp: F,
) -> Ordering
where
    F: Fn(&T, &T) -> Ordering + Copy,
{
    cmp_optional(a.0.as_deref(), b.0.as_deref(), cmp)
        .then_with(|| cmp_optional(a.1.as_deref(), b.1.as_deref(), cmp))
}

/// Lift a value comparator to pairs of optional values.
pub fn cmp_value_pair<T, F>(
    a: &(Option<T>, Option<T>),
    b: &(Option<T>, Option<T>),
    cmp: F,
) -> Ordering
where
    F: Fn(&T, &T) -> Ordering + Copy,
{
    cmp_optional(a.0.as_ref(), b.0.as_ref(), cmp)
        .then_with(|| cmp_optional(a.1.as_ref(), b.1.as_ref(), cmp))
}

/// Lexicographic order on the plain names. Unnamed entities count as empty names.
pub fn cmp_by_name<T: NetlistObject>(a: &T, b: &T) -> Ordering {
    a.raw_name()
        .unwrap_or_default()
        .cmp(&b.raw_name().unwrap_or_default())
}

/// Lexicographic order on the expanded names.
pub fn cmp_by_expanded_name<T: NetlistObject>(a: &T, b: &T) -> Ordering {
    a.expanded_name().cmp(&b.expanded_name())
}

/// Expanded-name order without building the expanded name strings: named entities come
/// first (ordered by name), unnamed entities come last (ordered by numeric id).
///
/// Adding a name to an entity later does not perturb the relative order of the
/// already-named entities.
pub fn cmp_by_expanded_name_fast<T: NetlistObject>(a: &T, b: &T) -> Ordering {
    match (a.raw_name(), b.raw_name()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.numeric_id().cmp(&b.numeric_id()),
    }
}

/// Order devices by the name of their device class.
pub fn cmp_by_device_class_name(a: &Device, b: &Device) -> Ordering {
    a.device_class().name().cmp(b.device_class().name())
}

/// Order sub-circuit instances by the name of the instantiated circuit.
/// Instances whose referenced circuit no longer exists sort first.
pub fn cmp_by_ref_circuit_name(a: &SubCircuit, b: &SubCircuit) -> Ordering {
    let ca = a.circuit_ref().upgrade();
    let cb = b.circuit_ref().upgrade();
    cmp_optional(ca.as_deref(), cb.as_deref(), |x, y| x.name().cmp(y.name()))
}

/// Order net terminal references by the terminal id alone.
pub fn cmp_by_terminal_id(a: &NetTerminalRef, b: &NetTerminalRef) -> Ordering {
    a.terminal_id().cmp(&b.terminal_id())
}

/// Order net terminal references by the expanded device name, ties broken by the
/// terminal id.
pub fn cmp_terminal_refs(a: &NetTerminalRef, b: &NetTerminalRef) -> Ordering {
    cmp_by_expanded_name(a.device().as_ref(), b.device().as_ref())
        .then_with(|| a.terminal_id().cmp(&b.terminal_id()))
}

/// Order net pin references by the expanded pin name.
pub fn cmp_pin_refs(a: &NetPinRef, b: &NetPinRef) -> Ordering {
    cmp_by_expanded_name(a.pin().as_ref(), b.pin().as_ref())
}

/// Order net sub-circuit pin references by the expanded sub-circuit name, ties broken
/// by the expanded pin name.
pub fn cmp_subcircuit_pin_refs(a: &NetSubcircuitPinRef, b: &NetSubcircuitPinRef) -> Ordering {
    cmp_by_expanded_name(a.subcircuit().as_ref(), b.subcircuit().as_ref()).then_with(|| {
        cmp_optional(
            a.pin().as_deref(),
            b.pin().as_deref(),
            cmp_by_expanded_name,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::prelude::*;

    #[test]
    fn test_pair_order_nulls_first() {
        let mut netlist = Netlist::new();
        let top = netlist.create_circuit("TOP", vec![]);
        let a = top.create_net(Some("a"));
        let b = top.create_net(Some("b"));

        let pair_null: (Option<Rc<Net>>, Option<Rc<Net>>) = (None, Some(a.clone()));
        let pair_a = (Some(a.clone()), Some(b.clone()));
        let pair_b = (Some(b.clone()), None);

        assert_eq!(cmp_pair(&pair_null, &pair_a, cmp_by_name), Ordering::Less);
        assert_eq!(cmp_pair(&pair_a, &pair_b, cmp_by_name), Ordering::Less);
        assert_eq!(cmp_pair(&pair_a, &pair_a, cmp_by_name), Ordering::Equal);
    }

    #[test]
    fn test_unnamed_entities_sort_last() {
        let mut netlist = Netlist::new();
        let top = netlist.create_circuit("TOP", vec![]);
        let unnamed = top.create_net::<String>(None);
        let named = top.create_net(Some("X"));

        assert_eq!(
            cmp_by_expanded_name_fast(named.as_ref(), unnamed.as_ref()),
            Ordering::Less
        );
        // Among unnamed nets the numeric id decides.
        let unnamed2 = top.create_net::<String>(None);
        assert_eq!(
            cmp_by_expanded_name_fast(unnamed.as_ref(), unnamed2.as_ref()),
            Ordering::Less
        );
    }
}
