//! Translation client: one service call per value, with placeholder
//! protection and output escaping for Android resources.

use std::time::Duration;

use lazy_static::lazy_static;
use quick_xml::escape::unescape;
use regex::{Captures, Regex};
use reqwest::{StatusCode, blocking::Client};
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::Error,
    placeholder::{guard, signature},
    settings::TranslateSettings,
    traits::Translator,
    types::StringTable,
};

lazy_static! {
    static ref ENTITY_REGEX: Regex =
        Regex::new(r"&(?:#[0-9]+|#x[0-9A-Fa-f]+|[A-Za-z][A-Za-z0-9]*);").unwrap();
}

/// Google Cloud Translation v2 REST backend.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
    source_language: Option<String>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<TranslatedText>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    translated_text: String,
}

impl GoogleTranslator {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            source_language: None,
        })
    }

    pub fn from_settings(settings: &TranslateSettings) -> Result<Self, Error> {
        let mut translator =
            Self::new(&settings.endpoint, &settings.api_key, settings.timeout())?;
        translator.source_language = settings.source_language.clone();
        Ok(translator)
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, target: &str) -> Result<String, Error> {
        let mut params = vec![("q", text), ("target", target), ("key", self.api_key.as_str())];
        if let Some(source) = &self.source_language {
            params.push(("source", source.as_str()));
        }

        let response = self
            .client
            .post(&self.endpoint)
            .form(&params)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    Error::service_error("request timed out")
                } else {
                    Error::service_error(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::service_error(format!("cannot read response: {}", e)))?;
        if !status.is_success() {
            return Err(Error::service_error(status_message(status, &body)));
        }

        let parsed: TranslateResponse = serde_json::from_str(&body)
            .map_err(|e| Error::service_error(format!("malformed response: {}", e)))?;
        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| Error::service_error("malformed response: no translations"))
    }
}

fn status_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.chars().take(200).collect());
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => "authentication failed",
        StatusCode::TOO_MANY_REQUESTS => "quota exceeded",
        _ => "request rejected",
    };
    format!("{} (HTTP {}): {}", kind, status.as_u16(), detail)
}

/// Wraps a [`Translator`] with the steps every value goes through.
///
/// Source values are taken as stored in a resource file: `\'` is sent as a
/// plain apostrophe and restored afterwards, specifiers and `\n` are guarded.
pub struct TranslationClient<T> {
    backend: T,
}

impl<T: Translator> TranslationClient<T> {
    pub fn new(backend: T) -> Self {
        Self { backend }
    }

    /// Translate one plain text value into `target` (a service language code).
    pub fn translate_value(&self, source: &str, target: &str) -> Result<String, Error> {
        self.translate_text(source, target, false)
    }

    /// Translate a value holding raw XML markup such as `Hi <b>there</b>`.
    /// Tags are passed through; only quote entities in the answer are decoded
    /// so the result stays well-formed element content.
    pub fn translate_markup(&self, source: &str, target: &str) -> Result<String, Error> {
        self.translate_text(source, target, true)
    }

    fn translate_text(&self, source: &str, target: &str, markup: bool) -> Result<String, Error> {
        let guarded = guard(&unescape_quotes(source));
        let raw = self.backend.translate(guarded.text(), target)?;
        let decoded = decode_entities(&raw, markup);

        let missing = guarded.missing_tokens(&decoded);
        if !missing.is_empty() {
            return Err(Error::service_error(format!(
                "translation dropped placeholders: {}",
                missing.join(", ")
            )));
        }
        let restored = guarded.restore(&decoded);
        if signature(&restored) != signature(source) {
            return Err(Error::service_error(format!(
                "format specifiers changed: {:?} became {:?}",
                signature(source),
                signature(&restored)
            )));
        }
        Ok(escape_quotes(&restored))
    }

    /// Translate every value of `defaults`, stopping at the first failure.
    /// Errors carry the offending key and `target`.
    pub fn translate_table(&self, defaults: &StringTable, target: &str) -> Result<StringTable, Error> {
        let mut translated = StringTable::new();
        for (key, value) in defaults.iter() {
            let markup = defaults.is_markup(key);
            let result = self
                .translate_text(value, target, markup)
                .map_err(|e| e.for_key(key, target))?;
            debug!(key, target, "{} => {}", value, result);
            if markup {
                translated.insert_markup(key, result);
            } else {
                translated.insert(key, result);
            }
        }
        Ok(translated)
    }
}

/// Decode HTML/XML entities returned by the service one at a time. Bare `&`
/// and unknown entities are kept as they are. For markup only quote entities
/// are decoded.
fn decode_entities(text: &str, markup: bool) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| match unescape(&caps[0]) {
            Ok(decoded) if !markup || decoded == "'" || decoded == "\"" => decoded.into_owned(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Backslash-escape apostrophes that are not escaped yet.
pub fn escape_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut escaped = false;
    for c in text.chars() {
        if c == '\'' && !escaped {
            out.push('\\');
        }
        escaped = c == '\\' && !escaped;
        out.push(c);
    }
    out
}

fn unescape_quotes(text: &str) -> String {
    text.replace("\\'", "'")
}
