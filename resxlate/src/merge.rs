//! Merge translated values into an existing locale `strings.xml`.
//!
//! The target document is scanned once. Every top-level `<string>` whose name
//! is in the translation table gets its content replaced; names that are not
//! found are appended before `</resources>` under a marker comment. All other
//! bytes of the file are copied unchanged.

use std::{
    borrow::Cow,
    collections::HashSet,
    fs,
    io::Write,
    path::Path,
};

use lazy_static::lazy_static;
use quick_xml::escape::partial_escape;
use regex::{Captures, Regex};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{
    error::Error,
    formats::android_strings::Document,
    types::{MergeReport, StringTable},
};

/// Comment written above entries appended by a merge.
pub const NEW_STRINGS_MARKER: &str = "<!-- New translated strings -->";

const INDENT: &str = "    ";

lazy_static! {
    /// An `&` with the entity reference that may follow it.
    static ref AMPERSAND_REGEX: Regex =
        Regex::new(r"&(#[0-9]+;|#x[0-9A-Fa-f]+;|[A-Za-z][A-Za-z0-9]*;)?").unwrap();
}

/// Placeholder path for documents merged in memory.
const INPUT: &str = "<input>";

/// Apply `translations` to the `original` document text.
///
/// Returns the new text and what changed. Entries marked
/// `translatable="false"` are left untouched and never duplicated.
pub fn merge_document(
    original: &str,
    translations: &StringTable,
) -> Result<(String, MergeReport), Error> {
    let document = Document::scan(original).map_err(|e| match e {
        Error::Parse { message, .. } => Error::merge_error(INPUT, message),
        other => other,
    })?;

    let mut report = MergeReport::default();
    let mut pending: HashSet<&str> = translations.keys().collect();
    let mut seen = HashSet::new();
    let mut output = String::with_capacity(original.len() + translations.len() * 64);
    let mut cursor = 0;

    for node in &document.nodes {
        let name = node.entry.name.as_str();
        if !seen.insert(name) {
            return Err(Error::merge_error(
                INPUT,
                format!("duplicate string name '{}'", name),
            ));
        }
        if !pending.remove(name) {
            continue;
        }
        if !node.entry.translatable {
            debug!(key = %name, "target entry is not translatable");
            report.skipped.push(name.to_string());
            continue;
        }
        let Some(value) = translations.get(name) else {
            continue;
        };

        let escaped = escape_value(value, translations.is_markup(name));
        match &node.content {
            Some(content) => {
                output.push_str(&original[cursor..content.start]);
                output.push_str(&escaped);
                cursor = content.end;
            }
            None => {
                // `<string name="k"/>` becomes `<string name="k">value</string>`
                let tag = &original[node.element.clone()];
                let open = tag.trim_end_matches('>').trim_end_matches('/').trim_end();
                output.push_str(&original[cursor..node.element.start]);
                output.push_str(open);
                output.push('>');
                output.push_str(&escaped);
                output.push_str("</string>");
                cursor = node.element.end;
            }
        }
        report.updated.push(name.to_string());
    }

    output.push_str(&original[cursor..document.root_end]);

    let inserted: Vec<(&str, &str)> = translations
        .iter()
        .filter(|(k, _)| pending.contains(k))
        .collect();
    if !inserted.is_empty() {
        if !output.ends_with('\n') {
            output.push('\n');
        }
        output.push('\n');
        output.push_str(INDENT);
        output.push_str(NEW_STRINGS_MARKER);
        output.push('\n');
        for (key, value) in inserted {
            output.push_str(INDENT);
            output.push_str(&render_entry(key, value, translations.is_markup(key)));
            output.push('\n');
            report.inserted.push(key.to_string());
        }
    }

    output.push_str(&original[document.root_end..]);
    Ok((output, report))
}

/// Merge `translations` into the file at `path`.
///
/// The new content is written to a temporary file in the same directory and
/// renamed over the target, so the original stays intact on any failure.
pub fn merge_file(path: &Path, translations: &StringTable) -> Result<MergeReport, Error> {
    let original = fs::read_to_string(path).map_err(|e| Error::io_error(path, e))?;
    let (merged, report) = merge_document(&original, translations).map_err(|e| match e {
        Error::Merge { message, .. } => Error::merge_error(path, message),
        other => other,
    })?;

    if merged == original {
        debug!(file = %path.display(), "no changes");
        return Ok(report);
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(path)
        .map_err(|e| Error::io_error(path, e))?
        .permissions();
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io_error(dir, e))?;
    tmp.write_all(merged.as_bytes())
        .and_then(|_| tmp.as_file().set_permissions(permissions))
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::io_error(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| Error::merge_error(path, format!("cannot replace file: {}", e.error)))?;

    info!(
        file = %path.display(),
        updated = report.updated.len(),
        inserted = report.inserted.len(),
        "file updated"
    );
    Ok(report)
}

/// Escape a value for element content. Markup values keep their tags and
/// entity references; only a bare `&` outside CDATA is escaped.
fn escape_value(value: &str, markup: bool) -> Cow<'_, str> {
    if !markup {
        return partial_escape(value);
    }
    if value.contains("<![CDATA[") {
        return Cow::Borrowed(value);
    }
    AMPERSAND_REGEX.replace_all(value, |caps: &Captures| match caps.get(1) {
        Some(_) => caps[0].to_string(),
        None => "&amp;".to_string(),
    })
}

fn render_entry(key: &str, value: &str, markup: bool) -> String {
    format!(
        "<string name=\"{}\">{}</string>",
        quick_xml::escape::escape(key),
        escape_value(value, markup)
    )
}
