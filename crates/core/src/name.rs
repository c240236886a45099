//! Interned names.
//!
//! A `Name` is a small index into the host's `NameTable`. Index 0 is the
//! `None` name. Writing a name into a record interns the string
//! (add-if-absent); row-key lookups only search existing entries.

use hashbrown::HashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// An interned name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The `None` name.
    pub const NONE: Name = Name(0);

    /// Returns the raw table index.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

#[derive(Default)]
struct Entries {
    strings: Vec<Arc<str>>,
    lookup: HashMap<Arc<str>, Name>,
}

/// The host name table.
///
/// Internally locked, so a shared reference is enough to intern.
pub struct NameTable {
    entries: RwLock<Entries>,
}

impl NameTable {
    /// Creates a table holding only the `None` name.
    pub fn new() -> Self {
        let none: Arc<str> = Arc::from("None");
        let mut entries = Entries::default();
        entries.strings.push(none.clone());
        entries.lookup.insert(none, Name::NONE);
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Returns the name for `text`, adding it if absent.
    ///
    /// The empty string maps to `None`.
    pub fn intern(&self, text: &str) -> Name {
        if text.is_empty() {
            return Name::NONE;
        }
        if let Some(name) = self.find(text) {
            return name;
        }
        let mut entries = self.entries.write();
        // Another caller may have added it between the read and the write.
        if let Some(name) = entries.lookup.get(text) {
            return *name;
        }
        let name = Name(entries.strings.len() as u32);
        let text: Arc<str> = Arc::from(text);
        entries.strings.push(text.clone());
        entries.lookup.insert(text, name);
        name
    }

    /// Returns the name for `text` only if it was interned before.
    pub fn find(&self, text: &str) -> Option<Name> {
        if text.is_empty() {
            return Some(Name::NONE);
        }
        self.entries.read().lookup.get(text).copied()
    }

    /// Returns the string behind a name.
    pub fn resolve(&self, name: Name) -> Option<Arc<str>> {
        self.entries.read().strings.get(name.0 as usize).cloned()
    }

    /// Returns the string behind a name, or `"None"` for unknown indices.
    pub fn display(&self, name: Name) -> String {
        self.resolve(name)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "None".to_string())
    }

    /// Number of interned names, including `None`.
    pub fn len(&self) -> usize {
        self.entries.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}
