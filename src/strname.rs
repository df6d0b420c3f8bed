//! # Interned name handle
//!
//! [`StrName`] is a 16-bit handle into a process-wide two-way table
//! (string → handle, handle → string). Reducing identifier comparison to a
//! `u16` equality check eliminates hashing and byte-traversal on the VM's
//! hottest name-lookup path (spec.md §4.B) at the cost of one indirection
//! during compilation and reflection.
//!
//! Handle `0` is reserved as the null/empty sentinel and is never stored in
//! the table; real handles start at `1`. Entries are append-only — the
//! table never invalidates a handle once issued (spec.md §5).
//!
//! Grounded on `examples/original_source/src/str.cpp`'s `StrName::get` /
//! `_interned` / `_r_interned`. The process-wide table's guarding strategy
//! follows the teacher's own pattern for shared mutable state
//! (`runtime/src/vm/builtins.rs`'s `static FILE_HANDLES: Lazy<Mutex<...>>`).

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::strval::Str;

struct Interner {
    forward: HashMap<String, u16>,
    reverse: Vec<Str>,
}

impl Interner {
    fn new() -> Self {
        Interner {
            forward: HashMap::new(),
            reverse: Vec::new(),
        }
    }

    fn get(&mut self, s: &str) -> u16 {
        if let Some(&handle) = self.forward.get(s) {
            return handle;
        }
        self.reverse.push(Str::from(s));
        let handle = self.reverse.len() as u16;
        self.forward.insert(s.to_string(), handle);
        tracing::trace!(handle, name = s, "strname: interned new name");
        handle
    }
}

static TABLE: Lazy<Mutex<Interner>> = Lazy::new(|| Mutex::new(Interner::new()));

/// A canonical, process-wide handle for an identifier string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrName {
    index: u16,
}

impl Default for StrName {
    /// The null/empty sentinel, handle `0`.
    fn default() -> Self {
        StrName { index: 0 }
    }
}

impl StrName {
    /// Look up or intern `s`, returning its stable handle. Repeated calls
    /// with an equal `s` always return the same handle.
    pub fn get(s: &str) -> StrName {
        let index = TABLE.lock().unwrap().get(s);
        StrName { index }
    }

    /// The raw handle value (`0` is the null/empty sentinel).
    pub fn index(self) -> u16 {
        self.index
    }

    /// `true` for any handle actually present in the table (`1..=N`).
    pub fn is_valid(index: u16) -> bool {
        if index == 0 {
            return false;
        }
        index as usize <= TABLE.lock().unwrap().reverse.len()
    }

    /// The interned string this handle refers to. Panics if `self` is the
    /// null sentinel or otherwise not a table entry — callers should check
    /// [`StrName::is_valid`] first if the handle's provenance is untrusted.
    pub fn sv(self) -> String {
        let table = TABLE.lock().unwrap();
        table.reverse[self.index as usize - 1].as_str().to_string()
    }

    /// Quoted/escaped rendering of the underlying string, for diagnostics.
    pub fn escape(self) -> String {
        let table = TABLE.lock().unwrap();
        table.reverse[self.index as usize - 1]
            .escape(false)
            .as_str()
            .to_string()
    }
}

impl std::fmt::Debug for StrName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.index == 0 {
            write!(f, "StrName(<empty>)")
        } else {
            write!(f, "StrName({:?})", self.sv())
        }
    }
}

impl std::fmt::Display for StrName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.index == 0 {
            Ok(())
        } else {
            f.write_str(&self.sv())
        }
    }
}

impl From<&str> for StrName {
    fn from(s: &str) -> StrName {
        StrName::get(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable_and_distinct() {
        let foo1 = StrName::get("foo");
        let foo2 = StrName::get("foo");
        let bar = StrName::get("bar");
        assert_eq!(foo1, foo2);
        assert_ne!(foo1, bar);
        assert_eq!(foo1.sv(), "foo");
        assert_eq!(bar.sv(), "bar");
    }

    #[test]
    fn equal_views_always_map_to_equal_handles() {
        let a = StrName::get("same");
        let b = StrName::get(&String::from("same"));
        assert_eq!(a, b);
    }

    #[test]
    fn default_handle_is_the_null_sentinel() {
        let empty = StrName::default();
        assert_eq!(empty.index(), 0);
        assert!(!StrName::is_valid(0));
    }

    #[test]
    fn is_valid_rejects_unissued_handles() {
        let handle = StrName::get("validity-probe");
        assert!(StrName::is_valid(handle.index()));
        assert!(!StrName::is_valid(u16::MAX));
    }
}
