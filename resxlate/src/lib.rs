#![forbid(unsafe_code)]
//! Seed and machine-translate Android `strings.xml` resources.
//!
//! The crate reads the default `values/strings.xml` of an Android project,
//! translates its values through a [`Translator`] backend and merges the
//! results into every `values-<locale>/strings.xml`, updating existing entries
//! in place and appending new ones before `</resources>`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use resxlate::{GoogleTranslator, IgnoreSet, TranslationClient, enumerate_locales, load_defaults, merge_file};
//!
//! let base = Path::new("app/src/main/res");
//! let defaults = load_defaults(base, &[])?;
//! let client = TranslationClient::new(GoogleTranslator::new(
//!     resxlate::settings::DEFAULT_ENDPOINT,
//!     "api-key",
//!     std::time::Duration::from_secs(30),
//! )?);
//! for target in enumerate_locales(base, &IgnoreSet::new())? {
//!     let translated = client.translate_table(&defaults, &target.service_code())?;
//!     merge_file(&target.path.join("strings.xml"), &translated)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Format specifiers such as `%1$s` and `\n` escapes never reach the service
//! as text; see [`placeholder::guard`].

pub mod client;
pub mod error;
pub mod formats;
pub mod locale;
pub mod merge;
pub mod operations;
pub mod placeholder;
pub mod settings;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    client::{GoogleTranslator, TranslationClient},
    error::Error,
    locale::{IgnoreSet, enumerate_locales, service_language_code},
    merge::{merge_document, merge_file},
    operations::{SeedOptions, load_defaults, seed_locales},
    settings::Settings,
    traits::Translator,
    types::{LocaleTarget, MergeReport, SeedReport, StringEntry, StringTable},
};
