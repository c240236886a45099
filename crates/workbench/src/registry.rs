//! Table registrations keyed by logical name.

use hashbrown::HashMap;
use rowsmith_core::{Error, Result};

/// Where a logical table lives and which row seeds new rows.
///
/// Immutable once built; a later registration of the same logical name
/// replaces it as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRegistration {
    logical_name: String,
    table_path: String,
    template_row_key: String,
}

impl TableRegistration {
    /// Creates a registration. All three parts must be non-empty.
    pub fn new(
        logical_name: impl Into<String>,
        table_path: impl Into<String>,
        template_row_key: impl Into<String>,
    ) -> Result<Self> {
        let registration = Self {
            logical_name: logical_name.into(),
            table_path: table_path.into(),
            template_row_key: template_row_key.into(),
        };
        if registration.logical_name.is_empty()
            || registration.table_path.is_empty()
            || registration.template_row_key.is_empty()
        {
            return Err(Error::invalid_arguments("Parameters cannot be null or empty"));
        }
        Ok(registration)
    }

    #[inline]
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    #[inline]
    pub fn table_path(&self) -> &str {
        &self.table_path
    }

    #[inline]
    pub fn template_row_key(&self) -> &str {
        &self.template_row_key
    }
}

/// All registrations of one workbench.
#[derive(Debug, Default)]
pub struct Registrations {
    entries: HashMap<String, TableRegistration>,
}

impl Registrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `registration`, returning the one it replaced.
    pub fn insert(&mut self, registration: TableRegistration) -> Option<TableRegistration> {
        self.entries
            .insert(registration.logical_name.clone(), registration)
    }

    pub fn get(&self, logical_name: &str) -> Option<&TableRegistration> {
        self.entries.get(logical_name)
    }

    pub fn remove(&mut self, logical_name: &str) -> Option<TableRegistration> {
        self.entries.remove(logical_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Logical names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_requires_all_parts() {
        assert!(TableRegistration::new("Items", "/Game/Items", "Template").is_ok());
        assert!(TableRegistration::new("", "/Game/Items", "Template").is_err());
        assert!(TableRegistration::new("Items", "", "Template").is_err());
        assert!(TableRegistration::new("Items", "/Game/Items", "").is_err());
    }

    #[test]
    fn test_last_write_wins() {
        let mut registrations = Registrations::new();
        let first = TableRegistration::new("Items", "/Game/A", "Template").unwrap();
        let second = TableRegistration::new("Items", "/Game/B", "Base").unwrap();

        assert!(registrations.insert(first.clone()).is_none());
        assert_eq!(registrations.insert(second), Some(first));

        let current = registrations.get("Items").unwrap();
        assert_eq!(current.table_path(), "/Game/B");
        assert_eq!(current.template_row_key(), "Base");
        assert_eq!(registrations.len(), 1);
    }

    #[test]
    fn test_names_sorted() {
        let mut registrations = Registrations::new();
        for name in ["Vendors", "Items", "Recipes"] {
            registrations.insert(TableRegistration::new(name, "/Game/X", "T").unwrap());
        }
        assert_eq!(registrations.names(), vec!["Items", "Recipes", "Vendors"]);
        assert!(registrations.remove("Items").is_some());
        assert!(registrations.get("Items").is_none());
    }
}
