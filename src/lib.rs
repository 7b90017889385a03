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
//! This crate holds the results of a netlist compare in a browsable, persistable form.
//! A compare algorithm drives the [`xref::CrossReference`] recorder through the
//! [`xref::CompareLogger`] event interface; the recorder pairs circuits, nets, devices,
//! pins and sub-circuit instances of two netlists and classifies every pairing with a
//! [`xref::Status`]. The [`model`] module puts a uniform, order-stable index view on top
//! of either a cross-reference or a single netlist, for browsers and exporters.

#![deny(missing_docs)]

// Public modules.
pub mod prelude;
pub mod netlist;
pub mod xref;
pub mod model;
pub mod rc_key;
