//! Core types shared by the loader, the merge engine and the CLI.

use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
};

/// A single `<string>` entry of a resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    /// Value of the `name` attribute, unique within a file.
    pub name: String,

    /// Unescaped element text. May contain format specifiers and `\n` escapes.
    pub value: String,

    /// `false` only when the element carries `translatable="false"`.
    pub translatable: bool,

    /// Element content holds inline markup (`<b>`, CDATA). `value` is then
    /// the raw XML text, not decoded.
    pub markup: bool,
}

/// Ordered key to value map with unique keys.
///
/// Keeps document order so that entries appended to a locale file follow the
/// order of the default file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
    /// Keys whose value is raw XML markup.
    markup: HashSet<String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.markup.remove(&key);
        self.put(key, value.into());
    }

    /// Like [`StringTable::insert`], for a value that is raw XML markup and
    /// must be written without escaping its tags.
    pub fn insert_markup(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.markup.insert(key.clone());
        self.put(key, value.into());
    }

    fn put(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    pub fn is_markup(&self, key: &str) -> bool {
        self.markup.contains(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = StringTable::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

/// A `values-<qualifier>` folder selected for seeding or translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTarget {
    pub path: PathBuf,
    /// Folder qualifier after the `values-` prefix, e.g. `pt-rBR`.
    pub qualifier: String,
}

impl LocaleTarget {
    /// Language code expected by the translation service, e.g. `pt-br`.
    pub fn service_code(&self) -> String {
        crate::locale::service_language_code(&self.qualifier)
    }
}

/// What a merge did to a locale file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub updated: Vec<String>,
    pub inserted: Vec<String>,
    /// Keys present in the target but marked `translatable="false"`.
    pub skipped: Vec<String>,
}

impl MergeReport {
    pub fn touched(&self) -> usize {
        self.updated.len() + self.inserted.len()
    }
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub seeded: Vec<PathBuf>,
    /// Folders left alone because they already had a resource file.
    pub existing: Vec<PathBuf>,
}
