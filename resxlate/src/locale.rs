//! Locale folder discovery and language code mapping.
//!
//! Android keeps one `values-<qualifier>` folder per locale next to the
//! default `values` folder. Other configuration qualifiers (screen width,
//! API level, ...) share the same naming pattern and are filtered out.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

use crate::{error::Error, types::LocaleTarget};

/// Folder holding the default resources.
pub const DEFAULT_FOLDER: &str = "values";
/// Prefix of every locale folder.
pub const LOCALE_PREFIX: &str = "values-";
/// Resource file name inside each folder.
pub const RESOURCE_FILE: &str = "strings.xml";

/// Qualifiers that match `values-*` but never denote a locale.
pub const BUILTIN_IGNORES: &[&str] = &["w820dp", "v21", "sw480dp", "sw600dp", "sw720dp"];

/// UI mode qualifiers. `car` would otherwise pass as an ISO 639 code.
const UI_MODE_QUALIFIERS: &[&str] = &["car", "desk", "television", "appliance", "watch", "vrheadset"];

lazy_static! {
    // `fr`, `fil`, `pt-rBR`, `es-r419`, `b+sr+Latn`
    static ref LOCALE_QUALIFIER_REGEX: Regex =
        Regex::new(r"^(?:[a-zA-Z]{2,3}(?:-[rR](?:[a-zA-Z]{2}|\d{3}))?|b\+[a-zA-Z]{2,3}(?:\+[a-zA-Z0-9]{2,8})*)$")
            .unwrap();
}

/// Path of the default `strings.xml` under `base_path`.
pub fn default_resource_path(base_path: &Path) -> PathBuf {
    base_path.join(DEFAULT_FOLDER).join(RESOURCE_FILE)
}

/// Qualifiers excluded from seeding and translation.
///
/// Always contains [`BUILTIN_IGNORES`]; callers add their own exclusions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    qualifiers: BTreeSet<String>,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new()
    }
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self {
            qualifiers: BUILTIN_IGNORES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Builtin ignores plus `extra`. Blank items are dropped.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for q in extra {
            let q = q.as_ref().trim();
            if !q.is_empty() {
                set.qualifiers.insert(q.to_string());
            }
        }
        set
    }

    pub fn contains(&self, qualifier: &str) -> bool {
        self.qualifiers.contains(qualifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.qualifiers.iter().map(String::as_str)
    }
}

/// Whether `qualifier` is shaped like an Android locale qualifier.
pub fn is_locale_qualifier(qualifier: &str) -> bool {
    let first = qualifier.split('-').next().unwrap_or_default();
    !UI_MODE_QUALIFIERS.contains(&first)
        && LOCALE_QUALIFIER_REGEX.is_match(qualifier)
        && service_language_code(qualifier)
            .parse::<LanguageIdentifier>()
            .is_ok()
}

/// Convert an Android locale qualifier into the translation service's code.
///
/// - `fr` → `fr`
/// - `pt-rBR` → `pt-br`
/// - `b+sr+Latn` → `sr-latn`
pub fn service_language_code(qualifier: &str) -> String {
    if let Some(rest) = qualifier.strip_prefix("b+") {
        return rest.replace('+', "-").to_ascii_lowercase();
    }
    match qualifier.split_once("-r").or_else(|| qualifier.split_once("-R")) {
        Some((language, region)) => format!("{}-{}", language, region.to_ascii_lowercase()),
        None => qualifier.to_string(),
    }
}

/// List the locale folders directly under `base_path`.
///
/// Folders whose qualifier is in `ignore`, or that are not shaped like a
/// locale, are skipped. Order follows the directory listing.
pub fn enumerate_locales(base_path: &Path, ignore: &IgnoreSet) -> Result<Vec<LocaleTarget>, Error> {
    let entries = fs::read_dir(base_path).map_err(|e| Error::io_error(base_path, e))?;

    let mut targets = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io_error(base_path, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(qualifier) = entry
            .file_name()
            .to_str()
            .and_then(|name| name.strip_prefix(LOCALE_PREFIX))
            .map(str::to_string)
        else {
            continue;
        };

        if ignore.contains(&qualifier) {
            debug!(folder = %path.display(), "ignored qualifier");
            continue;
        }
        if !is_locale_qualifier(&qualifier) {
            warn!(folder = %path.display(), "not a locale qualifier, skipping");
            continue;
        }
        targets.push(LocaleTarget { path, qualifier });
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_service_language_code() {
        assert_eq!(service_language_code("pt-rBR"), "pt-br");
        assert_eq!(service_language_code("pt-rbr"), "pt-br");
        assert_eq!(service_language_code("fr"), "fr");
        assert_eq!(service_language_code("zh-RTW"), "zh-tw");
        assert_eq!(service_language_code("es-r419"), "es-419");
        assert_eq!(service_language_code("b+sr+Latn"), "sr-latn");
    }

    #[test]
    fn test_is_locale_qualifier() {
        for q in ["fr", "fil", "pt-rBR", "es-r419", "b+sr+Latn"] {
            assert!(is_locale_qualifier(q), "{q}");
        }
        for q in ["w820dp", "v21", "land", "night", "hdpi", "sw600dp", "fr-FR", "car", "car-night", "desk"] {
            assert!(!is_locale_qualifier(q), "{q}");
        }
    }

    #[test]
    fn test_ignore_set_builtin_and_extra() {
        let set = IgnoreSet::with_extra(["ar", " pt ", ""]);
        assert!(set.contains("w820dp"));
        assert!(set.contains("v21"));
        assert!(set.contains("ar"));
        assert!(set.contains("pt"));
        assert!(!set.contains(""));
        assert!(!set.contains("fr"));
    }

    #[test]
    fn test_enumerate_locales_filters_ignored_and_non_locale() {
        let dir = TempDir::new().unwrap();
        for name in ["values", "values-fr", "values-pt-rBR", "values-w820dp", "values-night", "values-car", "values-ar", "drawable-fr"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("values-de"), "not a folder").unwrap();

        let ignore = IgnoreSet::with_extra(["ar"]);
        let mut found: Vec<String> = enumerate_locales(dir.path(), &ignore)
            .unwrap()
            .into_iter()
            .map(|t| t.qualifier)
            .collect();
        found.sort();
        assert_eq!(found, vec!["fr", "pt-rBR"]);
    }

    #[test]
    fn test_enumerate_missing_base_path() {
        let dir = TempDir::new().unwrap();
        let err = enumerate_locales(&dir.path().join("nope"), &IgnoreSet::new()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
