use std::collections::BTreeMap;

/// Nom de l'entrée de repli commune à toutes les tables.
pub const DEFAULT_NAME: &str = "default";

/// Table nommée en lecture seule avec entrée de repli.
///
/// Construite et validée au démarrage, jamais modifiée ensuite : les
/// lookups inconnus retournent l'entrée `default` au lieu d'échouer.
///
/// # Example
/// ```
/// use gw_core::table::NamedTable;
/// let mut t = NamedTable::new("exemple", 0u8);
/// t.insert("un", 1);
/// assert_eq!(*t.get_or_default("un"), 1);
/// assert_eq!(*t.get_or_default("inconnu"), 0);
/// ```
#[derive(Clone, Debug)]
pub struct NamedTable<T> {
    kind: &'static str,
    default: T,
    entries: BTreeMap<String, T>,
}

impl<T> NamedTable<T> {
    /// Create a table holding only its `default` entry.
    #[must_use]
    pub fn new(kind: &'static str, default: T) -> Self {
        Self {
            kind,
            default,
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace an entry. Replacing `default` changes the fallback.
    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        if name == DEFAULT_NAME {
            self.default = value;
        } else {
            self.entries.insert(name, value);
        }
    }

    /// Exact lookup.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        if name == DEFAULT_NAME {
            Some(&self.default)
        } else {
            self.entries.get(name)
        }
    }

    /// The fallback entry.
    #[must_use]
    pub fn default_entry(&self) -> &T {
        &self.default
    }

    /// Lookup with fallback on the `default` entry (logged at warn level).
    #[must_use]
    pub fn get_or_default(&self, name: &str) -> &T {
        if let Some(v) = self.get(name) {
            v
        } else {
            log::warn!(
                "{} inconnu '{name}', utilisation de '{DEFAULT_NAME}'.",
                self.kind
            );
            self.default_entry()
        }
    }

    /// Entry names, sorted, `default` included.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.push(DEFAULT_NAME);
        names.sort_unstable();
        names
    }

    /// Number of entries, `default` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len() + 1
    }

    /// Always `false`: a table holds at least its default entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}
