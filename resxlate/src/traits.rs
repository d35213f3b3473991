//! Seams between the resource model and the outside world.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing a resource document from one file.
///
/// # Example
///
/// ```rust,no_run
/// use resxlate::traits::Parser;
/// let format = resxlate::formats::android_strings::Format::read_from("res/values/strings.xml")?;
/// println!("{} strings", format.strings.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path. Parse errors carry the path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io_error(path, e))?;
        let reader = BufReader::new(file);
        Self::from_reader(reader).map_err(|e| e.in_file(path))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

/// A machine translation backend.
///
/// Implementations make exactly one call per invocation and never retry.
/// The returned text is the service's raw output; escaping and placeholder
/// restoration are handled by [`crate::client::TranslationClient`].
pub trait Translator: Send + Sync {
    /// Translate `text` into the service language code `target`.
    fn translate(&self, text: &str, target: &str) -> Result<String, Error>;
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str, target: &str) -> Result<String, Error> {
        (**self).translate(text, target)
    }
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, text: &str, target: &str) -> Result<String, Error> {
        (**self).translate(text, target)
    }
}
