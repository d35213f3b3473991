//! High-level operations reused by the CLI and library users.

use std::{collections::HashSet, fs, path::Path};

use tracing::{debug, info, warn};

use crate::{
    error::Error,
    formats::AndroidStringsFormat,
    locale::{IgnoreSet, RESOURCE_FILE, default_resource_path, enumerate_locales},
    traits::Parser,
    types::{SeedReport, StringTable},
};

/// Load translatable default values from `<base_path>/values/strings.xml`.
///
/// With an empty `keys` filter every translatable entry is returned, in
/// document order. Entries marked `translatable="false"` are never returned,
/// even when requested by name.
pub fn load_defaults(base_path: &Path, keys: &[String]) -> Result<StringTable, Error> {
    let path = default_resource_path(base_path);
    let format = AndroidStringsFormat::read_from(&path)?;

    let wanted: HashSet<&str> = keys.iter().map(String::as_str).collect();
    let mut table = StringTable::new();
    for entry in format.strings {
        if !wanted.is_empty() && !wanted.contains(entry.name.as_str()) {
            continue;
        }
        if !entry.translatable {
            debug!(key = %entry.name, "skipping non-translatable string");
            continue;
        }
        if entry.markup {
            table.insert_markup(entry.name, entry.value);
        } else {
            table.insert(entry.name, entry.value);
        }
    }

    for key in keys {
        if !table.contains_key(key) {
            warn!(key = %key, "requested key is not a translatable default string");
        }
    }
    Ok(table)
}

/// Options for [`seed_locales`].
#[derive(Debug, Clone, Default)]
pub struct SeedOptions {
    pub ignore: IgnoreSet,
    /// Overwrite locale files that already exist.
    pub force: bool,
}

/// Copy the default resource file into every locale folder under `base_path`
/// that does not have one yet.
pub fn seed_locales(base_path: &Path, options: &SeedOptions) -> Result<SeedReport, Error> {
    let source = default_resource_path(base_path);
    if !source.is_file() {
        return Err(Error::io_error(
            &source,
            std::io::Error::new(std::io::ErrorKind::NotFound, "default resource file not found"),
        ));
    }

    let mut report = SeedReport::default();
    for target in enumerate_locales(base_path, &options.ignore)? {
        let output = target.path.join(RESOURCE_FILE);
        if output.exists() && !options.force {
            debug!(file = %output.display(), "already seeded");
            report.existing.push(output);
            continue;
        }
        fs::copy(&source, &output).map_err(|e| Error::io_error(&output, e))?;
        info!(file = %output.display(), "seeded");
        report.seeded.push(output);
    }
    Ok(report)
}
