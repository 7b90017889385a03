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
//! Uniform index-based views over netlists and cross-references.
//!
//! Browsers and exporters address entities by `(parent, index)` instead of by handle.
//! The indices are order-stable: given the same input, the same index yields the same
//! entity pair across runs, independent of creation order.

pub mod indexed_model;
pub mod single;
pub mod xref_model;

pub use indexed_model::IndexedNetlistModel;
pub use single::SingleIndexedNetlistModel;
pub use xref_model::CrossReferenceModel;
