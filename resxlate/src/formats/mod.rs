//! Resource file formats understood by resxlate.

pub mod android_strings;

pub use android_strings::Format as AndroidStringsFormat;
