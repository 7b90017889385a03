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
//! Data structures for representation of netlists: circuits with pins, nets, devices
//! and sub-circuit instances. The cross-reference engine borrows entities from two such
//! netlists; it never owns or edits them.

pub mod prelude;
pub mod netlist;
pub mod circuit;
pub mod net;
pub mod device;
pub mod device_class;
pub mod pin;
pub mod subcircuit;
pub mod refs;
pub mod traits;
