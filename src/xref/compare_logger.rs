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
//! The event interface between a netlist compare algorithm and its listeners, plus the
//! status and log vocabulary shared by all of them.

use std::rc::Rc;

use crate::netlist::prelude::*;

/// Outcome classification for a paired entity.
///
/// The numeric values of the variants are stable; persistence and reporting rely on
/// them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// No classification.
    None = 0,
    /// Objects are paired and match.
    Match = 1,
    /// Objects are paired, but don't match.
    NoMatch = 2,
    /// Objects are skipped.
    Skipped = 3,
    /// Objects are paired and match, but with a warning (i.e. ambiguous nets).
    MatchWithWarning = 4,
    /// Objects are not paired.
    Mismatch = 5,
}

impl Default for Status {
    fn default() -> Self {
        Status::None
    }
}

/// Severity of a log entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Informational entry.
    Info = 0,
    /// An entry that hints at a problem.
    Warning = 1,
    /// An entry that describes an error.
    Error = 2,
}

/// A log message attached to a compare run or to a single circuit pair.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Severity of the entry.
    pub severity: Severity,
    /// The message text.
    pub msg: String,
}

impl LogEntry {
    /// Create a new log entry.
    pub fn new<S: Into<String>>(severity: Severity, msg: S) -> Self {
        LogEntry {
            severity,
            msg: msg.into(),
        }
    }
}

/// Listener interface for the events of a netlist compare run.
///
/// The compare algorithm drives a logger through exactly one
/// `begin_netlist`/`end_netlist` envelope. Within it, circuits are visited one at a
/// time (`begin_circuit` .. `end_circuit`); the entity events in between refer to the
/// circuit pair currently open. All methods default to doing nothing so implementations
/// can pick the events they care about.
///
/// Entity arguments are nullable: a `None` side means the entity has no counterpart in
/// that netlist.
pub trait CompareLogger {
    /// A compare run starts for the two netlists.
    fn begin_netlist(&mut self, _a: &Rc<Netlist>, _b: &Rc<Netlist>) {}

    /// The compare run is finished.
    fn end_netlist(&mut self, _a: &Rc<Netlist>, _b: &Rc<Netlist>) {}

    /// Two circuits are about to be compared.
    fn begin_circuit(&mut self, _a: Option<&Rc<Circuit>>, _b: Option<&Rc<Circuit>>) {}

    /// The circuit pair is done; `matching` tells whether the circuits correspond.
    fn end_circuit(
        &mut self,
        _a: Option<&Rc<Circuit>>,
        _b: Option<&Rc<Circuit>>,
        _matching: bool,
        _msg: &str,
    ) {
    }

    /// The circuit pair was not compared, e.g. because a child circuit could not be
    /// matched.
    fn circuit_skipped(&mut self, _a: Option<&Rc<Circuit>>, _b: Option<&Rc<Circuit>>, _msg: &str) {
    }

    /// A circuit has no counterpart in the other netlist.
    fn circuit_mismatch(&mut self, _a: Option<&Rc<Circuit>>, _b: Option<&Rc<Circuit>>, _msg: &str) {
    }

    /// Generic diagnostic message of the compare algorithm.
    fn log_entry(&mut self, _severity: Severity, _msg: &str) {}

    /// Two nets match.
    fn match_nets(&mut self, _a: Option<&Rc<Net>>, _b: Option<&Rc<Net>>) {}

    /// Two nets match, but the pairing was ambiguous.
    fn match_ambiguous_nets(&mut self, _a: Option<&Rc<Net>>, _b: Option<&Rc<Net>>, _msg: &str) {}

    /// A net could not be paired.
    fn net_mismatch(&mut self, _a: Option<&Rc<Net>>, _b: Option<&Rc<Net>>, _msg: &str) {}

    /// Two devices match.
    fn match_devices(&mut self, _a: Option<&Rc<Device>>, _b: Option<&Rc<Device>>) {}

    /// Two devices are topologically equivalent but their parameters differ.
    fn match_devices_with_different_parameters(
        &mut self,
        _a: Option<&Rc<Device>>,
        _b: Option<&Rc<Device>>,
    ) {
    }

    /// Two devices are topologically equivalent but their device classes differ.
    fn match_devices_with_different_device_classes(
        &mut self,
        _a: Option<&Rc<Device>>,
        _b: Option<&Rc<Device>>,
    ) {
    }

    /// A device could not be paired.
    fn device_mismatch(&mut self, _a: Option<&Rc<Device>>, _b: Option<&Rc<Device>>, _msg: &str) {}

    /// Two pins match.
    fn match_pins(&mut self, _a: Option<&Rc<Pin>>, _b: Option<&Rc<Pin>>) {}

    /// A pin could not be paired.
    fn pin_mismatch(&mut self, _a: Option<&Rc<Pin>>, _b: Option<&Rc<Pin>>, _msg: &str) {}

    /// Two sub-circuit instances match.
    fn match_subcircuits(&mut self, _a: Option<&Rc<SubCircuit>>, _b: Option<&Rc<SubCircuit>>) {}

    /// A sub-circuit instance could not be paired.
    fn subcircuit_mismatch(
        &mut self,
        _a: Option<&Rc<SubCircuit>>,
        _b: Option<&Rc<SubCircuit>>,
        _msg: &str,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_discriminants() {
        assert_eq!(Status::None as usize, 0);
        assert_eq!(Status::Match as usize, 1);
        assert_eq!(Status::NoMatch as usize, 2);
        assert_eq!(Status::Skipped as usize, 3);
        assert_eq!(Status::MatchWithWarning as usize, 4);
        assert_eq!(Status::Mismatch as usize, 5);
    }
}
