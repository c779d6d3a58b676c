//! Persisted request context: base URL plus headers

use std::collections::BTreeMap;

use url::Url;

use crate::errors::HttpcliError;
use crate::sessions::headers::{self, HeaderSet};

/// Storage key of the base URL
pub const URL_KEY: &str = "URL";

/// Value that clears the base URL in `http url -`
pub const CLEAR_SENTINEL: &str = "-";

/// Base URL and headers of one session
///
/// The base URL is kept as the stored string and only parsed on read, so a
/// corrupted state file surfaces as a context error where it is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    base_url: Option<String>,
    headers: HeaderSet,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored base URL, `None` when unset
    pub fn base_url(&self) -> Result<Option<Url>, HttpcliError> {
        let raw = match self.base_url.as_deref() {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        let url = Url::parse(raw)
            .map_err(|e| HttpcliError::InvalidBaseUrl(format!("{}: {}", raw, e)))?;
        if !is_absolute(&url) {
            return Err(HttpcliError::NotAbsolute(raw.to_string()));
        }
        Ok(Some(url))
    }

    /// Parse and store a new base URL; `-` or an empty string clears it
    pub fn set_base_url(&mut self, value: &str) -> Result<(), HttpcliError> {
        if value.is_empty() || value == CLEAR_SENTINEL {
            self.base_url = None;
            return Ok(());
        }

        let url = match Url::parse(value) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Err(HttpcliError::NotAbsolute(value.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        if !is_absolute(&url) {
            return Err(HttpcliError::NotAbsolute(value.to_string()));
        }

        self.base_url = Some(url.to_string());
        Ok(())
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderSet {
        &mut self.headers
    }

    /// Replace the full header set; `None` clears every header
    pub fn set_headers(&mut self, headers: Option<HeaderSet>) {
        self.headers = headers.unwrap_or_default();
    }

    pub fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.headers.is_empty()
    }

    /// Flatten into `KEY=VALUE` records
    pub fn to_records(&self) -> BTreeMap<String, String> {
        let mut records: BTreeMap<String, String> =
            headers::encode(&self.headers).into_iter().collect();
        if let Some(url) = &self.base_url {
            records.insert(URL_KEY.to_string(), url.clone());
        }
        records
    }

    /// Rebuild from records; unknown keys are ignored
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let records: Vec<(&str, &str)> = records.into_iter().collect();
        let base_url = records
            .iter()
            .find(|(k, _)| *k == URL_KEY)
            .map(|(_, v)| v.to_string())
            .filter(|v| !v.is_empty());

        Self {
            base_url,
            headers: headers::decode(records),
        }
    }
}

/// Whether a record key belongs to the persisted context
pub fn is_context_key(key: &str) -> bool {
    key == URL_KEY || key.starts_with(headers::HEADER_PREFIX)
}

/// Absolute means a scheme plus a non-empty host
pub fn is_absolute(url: &Url) -> bool {
    !url.cannot_be_a_base() && url.host_str().is_some_and(|h| !h.is_empty())
}
