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
//! Wrapper around `Rc<T>` with hashing, equality and ordering based on the pointer
//! identity of the shared object. This makes reference-counted netlist entities usable
//! as map keys without requiring `T: Hash + Ord`.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Map key with pointer-identity semantics over an `Rc<T>`.
///
/// Two keys are equal exactly if they point to the same allocation. The ordering is the
/// ordering of the pointer addresses. It is stable for the lifetime of the referenced
/// objects but carries no meaning beyond that.
#[derive(Debug)]
pub struct RcKey<T>(Rc<T>);

impl<T> RcKey<T> {
    /// Create a key from a shared reference.
    pub fn new(rc: &Rc<T>) -> Self {
        RcKey(rc.clone())
    }

    /// Get the referenced object back.
    pub fn get(&self) -> &Rc<T> {
        &self.0
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl<T> Clone for RcKey<T> {
    fn clone(&self) -> Self {
        RcKey(self.0.clone())
    }
}

impl<T> From<&Rc<T>> for RcKey<T> {
    fn from(rc: &Rc<T>) -> Self {
        RcKey::new(rc)
    }
}

impl<T> Hash for RcKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state)
    }
}

impl<T> PartialEq for RcKey<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for RcKey<T> {}

impl<T> Ord for RcKey<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.addr().cmp(&other.addr())
    }
}

impl<T> PartialOrd for RcKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_pointer_identity() {
        let a = Rc::new(42);
        let b = Rc::new(42);
        assert_eq!(RcKey::new(&a), RcKey::new(&a.clone()));
        assert_ne!(RcKey::new(&a), RcKey::new(&b));
    }

    #[test]
    fn test_as_map_key() {
        let a = Rc::new("a".to_string());
        let b = Rc::new("a".to_string());
        let mut map = HashMap::new();
        map.insert(RcKey::new(&a), 1);
        map.insert(RcKey::new(&b), 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&RcKey::new(&a)), Some(&1));
    }
}
