//! Placeholder protection for machine translation.
//!
//! Positional format specifiers (`%1$s`, `%2$.2f`) and literal `\n` escapes
//! are swapped for opaque `__PH<n>__` tokens before a value is sent to the
//! translation service, and swapped back afterwards.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Positional specifier, escaped newline, or a literal double underscore.
    /// Double underscores are captured so input text can never forge a token.
    static ref PROTECTED_REGEX: Regex =
        Regex::new(r"%\d+\$\.?\d*[A-Za-z]|\\n|__").unwrap();
    static ref TOKEN_REGEX: Regex = Regex::new(r"__PH(\d+)__").unwrap();
}

/// Text with protected sequences replaced by tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guarded {
    text: String,
    slots: Vec<String>,
}

impl Guarded {
    /// The text to hand to the translation service.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of protected sequences.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Put the captured sequences back into `translated`.
    /// Tokens with an unknown index are left as they are.
    pub fn restore(&self, translated: &str) -> String {
        if self.slots.is_empty() {
            return translated.to_string();
        }
        TOKEN_REGEX
            .replace_all(translated, |caps: &Captures| {
                match caps[1].parse::<usize>().ok().and_then(|i| self.slots.get(i)) {
                    Some(original) => original.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Tokens that do not occur in `translated`, as the original sequences.
    pub fn missing_tokens<'a>(&'a self, translated: &str) -> Vec<&'a str> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(i, _)| !translated.contains(&token(*i)))
            .map(|(_, s)| s.as_str())
            .collect()
    }
}

fn token(index: usize) -> String {
    format!("__PH{}__", index)
}

/// Replace format specifiers and `\n` escapes in `input` with tokens.
pub fn guard(input: &str) -> Guarded {
    let mut slots = Vec::new();
    let text = PROTECTED_REGEX
        .replace_all(input, |caps: &Captures| {
            let t = token(slots.len());
            slots.push(caps[0].to_string());
            t
        })
        .into_owned();
    Guarded { text, slots }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlaceholderToken {
    pub index: Option<usize>,
    pub kind: char,
}

impl PlaceholderToken {
    pub fn to_signature(&self) -> String {
        match self.index {
            Some(i) => format!("{}${}", i, self.kind),
            None => format!("{}", self.kind),
        }
    }
}

/// Extracts placeholder tokens from a string in occurrence order.
/// Escaped percent `%%` is ignored.
pub fn extract_placeholders(input: &str) -> Vec<PlaceholderToken> {
    let bytes = input.as_bytes();
    let mut i = 0;
    let mut out = Vec::new();

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        if i + 1 < bytes.len() && bytes[i + 1] == b'%' {
            i += 2;
            continue;
        }

        let mut j = i + 1;

        // Optional positional index: digits followed by '$'
        let mut index: Option<usize> = None;
        let start_digits = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j < bytes.len() && j > start_digits && bytes[j] == b'$' {
            index = std::str::from_utf8(&bytes[start_digits..j])
                .ok()
                .and_then(|s| s.parse::<usize>().ok());
            j += 1;
        } else {
            j = i + 1;
        }

        // Optional precision
        if j < bytes.len() && bytes[j] == b'.' {
            j += 1;
        }
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }

        if j < bytes.len() && bytes[j].is_ascii_alphabetic() {
            out.push(PlaceholderToken {
                index,
                kind: (bytes[j] as char).to_ascii_lowercase(),
            });
            i = j + 1;
            continue;
        }

        i += 1;
    }

    out
}

/// Sorted placeholder signature. Translations may reorder positional
/// specifiers, so order is not part of the comparison.
pub fn signature(input: &str) -> Vec<String> {
    let mut tokens = extract_placeholders(input);
    tokens.sort();
    tokens.into_iter().map(|t| t.to_signature()).collect()
}
