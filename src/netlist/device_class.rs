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
//! A `DeviceClass` describes a kind of primitive device (resistor, transistor, ...):
//! its terminals and which of them are electrically interchangeable.

use std::collections::BTreeMap;

/// Definition of a single device terminal.
#[derive(Debug, Clone)]
pub struct DeviceTerminalDefinition {
    id: usize,
    name: String,
}

impl DeviceTerminalDefinition {
    /// Get the ID of the terminal. Terminal IDs are positional within the device class.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get the name of the terminal.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// The kind of a device.
///
/// A device class defines the ordered terminal list of its devices and a normalization
/// of terminal ids which collapses swappable terminals (such as source and drain of a
/// MOS transistor) onto a single canonical id.
///
/// Device classes are built mutably and then shared between devices through `Rc`.
#[derive(Debug, Clone)]
pub struct DeviceClass {
    name: String,
    terminal_definitions: Vec<DeviceTerminalDefinition>,
    /// Maps a terminal id onto the canonical id of its swappable group.
    /// Identity mappings are not stored.
    equivalent_terminals: BTreeMap<usize, usize>,
}

impl DeviceClass {
    /// Create a new device class without terminals.
    pub fn new<S: Into<String>>(name: S) -> Self {
        DeviceClass {
            name: name.into(),
            terminal_definitions: Vec::new(),
            equivalent_terminals: BTreeMap::new(),
        }
    }

    /// Get the name of the device class.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Append a terminal definition. Returns the id of the new terminal.
    pub fn add_terminal<S: Into<String>>(&mut self, name: S) -> usize {
        let id = self.terminal_definitions.len();
        self.terminal_definitions.push(DeviceTerminalDefinition {
            id,
            name: name.into(),
        });
        id
    }

    /// Declare a group of terminals as electrically interchangeable.
    /// All of them normalize onto the first id of the group.
    ///
    /// # Panics
    /// Panics if one of the ids does not name a terminal of this class.
    pub fn equate_terminals(&mut self, ids: &[usize]) {
        let canonical = match ids.first() {
            Some(&c) => c,
            None => return,
        };
        for &id in ids {
            assert!(
                id < self.terminal_definitions.len(),
                "Terminal id {} is not defined in device class '{}'.",
                id,
                self.name
            );
            if id != canonical {
                self.equivalent_terminals.insert(id, canonical);
            }
        }
    }

    /// Get the ordered terminal definitions of this class.
    pub fn terminal_definitions(&self) -> &[DeviceTerminalDefinition] {
        &self.terminal_definitions
    }

    /// Find a terminal id by the terminal name.
    pub fn terminal_id_by_name(&self, name: &str) -> Option<usize> {
        self.terminal_definitions
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.id)
    }

    /// Return the number of terminals of this class.
    pub fn terminal_count(&self) -> usize {
        self.terminal_definitions.len()
    }

    /// Tell whether the terminal id names a terminal of this class.
    pub fn has_terminal(&self, id: usize) -> bool {
        id < self.terminal_definitions.len()
    }

    /// Collapse a terminal id onto the canonical id of its swappable group.
    /// Ids without an equivalence return themselves.
    pub fn normalize_terminal_id(&self, id: usize) -> usize {
        self.equivalent_terminals.get(&id).copied().unwrap_or(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_normalization() {
        let mut mos = DeviceClass::new("NMOS");
        let s = mos.add_terminal("S");
        let g = mos.add_terminal("G");
        let d = mos.add_terminal("D");
        mos.equate_terminals(&[s, d]);

        assert_eq!(mos.normalize_terminal_id(s), s);
        assert_eq!(mos.normalize_terminal_id(d), s);
        assert_eq!(mos.normalize_terminal_id(g), g);
        assert_eq!(mos.terminal_id_by_name("G"), Some(g));
    }
}
