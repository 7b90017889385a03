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
//! Common capabilities of netlist entities as used by sorting and browsing.

/// Naming capabilities shared by all netlist entities.
///
/// Comparators are generic over this trait; each instantiation is closed over one
/// concrete entity kind.
pub trait NetlistObject {
    /// The user-given name, or `None` for unnamed entities.
    /// An empty name counts as unnamed.
    fn raw_name(&self) -> Option<String>;

    /// The numeric id of the entity within its owning scope.
    fn numeric_id(&self) -> usize;

    /// A non-empty textual identity: the name, or a place-holder derived from the
    /// numeric id for unnamed entities.
    fn expanded_name(&self) -> String {
        self.raw_name()
            .unwrap_or_else(|| format!("__{}", self.numeric_id()))
    }
}
