//! Header collection and its flat `KEY=VALUE` encoding
//!
//! A header named `X-Api-Key` is stored under `HEADER_X_API_KEY`. Decoding
//! turns `_` back into `-` and restores canonical capitalization, so only
//! names made of ASCII letters, digits and `-` are accepted; anything else
//! would not survive the round trip.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::errors::HttpcliError;

/// Storage key prefix for headers
pub const HEADER_PREFIX: &str = "HEADER_";

/// Separator used when a header holds more than one value
const VALUE_SEPARATOR: &str = " ";

/// Case-insensitive header name to values mapping
///
/// Names are kept in canonical form (`x-api-key` becomes `X-Api-Key`), so
/// lookups and equality ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: BTreeMap<String, Vec<String>>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all values of `name` with `value`
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.entries.insert(canonical_name(name), vec![value.into()]);
    }

    /// Add another value to `name`
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.entries
            .entry(canonical_name(name))
            .or_default()
            .push(value.into());
    }

    /// Remove `name`, returning whether it was present
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(&canonical_name(name)).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(&canonical_name(name)).map(Vec::as_slice)
    }

    /// First value of `name`
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&canonical_name(name))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Render as `Name: value` lines, one line per value
    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        for (name, values) in self.iter() {
            for value in values {
                out.push_str(name);
                out.push_str(": ");
                out.push_str(value);
                out.push('\n');
            }
        }
        out
    }

    /// Convert to a reqwest header map for sending
    pub fn to_header_map(&self) -> Result<HeaderMap, HttpcliError> {
        let mut map = HeaderMap::with_capacity(self.len());
        for (name, values) in self.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                HttpcliError::MalformedState(format!("header name {:?}: {}", name, e))
            })?;
            for value in values {
                let header_value = HeaderValue::from_str(value).map_err(|e| {
                    HttpcliError::MalformedState(format!("value of header {}: {}", name, e))
                })?;
                map.append(header_name.clone(), header_value);
            }
        }
        Ok(map)
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in iter {
            set.append(name.as_ref(), value);
        }
        set
    }
}

/// Canonical HTTP capitalization: first letter and every letter after `-`
/// upper-cased, everything else lower-cased.
///
/// Names containing characters outside `[A-Za-z0-9_-]` are returned unchanged.
pub fn canonical_name(name: &str) -> String {
    if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
        return name.to_string();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

/// Check a header name and value given on the command line
pub fn validate(name: &str, value: Option<&str>) -> Result<(), HttpcliError> {
    if name.is_empty() {
        return Err(HttpcliError::InvalidHeader("empty header name".to_string()));
    }
    if let Some(bad) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
        return Err(HttpcliError::InvalidHeader(format!(
            "{:?} contains {:?}; header names may only use letters, digits and '-'",
            name, bad
        )));
    }
    if let Some(value) = value {
        HeaderValue::from_str(value)
            .map_err(|_| HttpcliError::InvalidHeader(format!("invalid value for {}", name)))?;
    }
    Ok(())
}

/// `X-Api-Key` -> `HEADER_X_API_KEY`
pub fn header_to_key(name: &str) -> String {
    format!("{}{}", HEADER_PREFIX, name.to_ascii_uppercase().replace('-', "_"))
}

/// `HEADER_X_API_KEY` -> `X-Api-Key`; `None` for non-header keys
pub fn key_to_header(key: &str) -> Option<String> {
    let rest = key.strip_prefix(HEADER_PREFIX)?;
    if rest.is_empty() {
        return None;
    }
    Some(canonical_name(&rest.replace('_', "-")))
}

/// Flatten headers into storage records, joining multiple values with a space
pub fn encode(headers: &HeaderSet) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, values)| (header_to_key(name), values.join(VALUE_SEPARATOR)))
        .collect()
}

/// Rebuild headers from storage records, ignoring keys that are not headers
pub fn decode<'a, I>(records: I) -> HeaderSet
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut headers = HeaderSet::new();
    for (key, value) in records {
        match key_to_header(key) {
            Some(name) if !value.is_empty() => headers.set(&name, value),
            Some(_) => {}
            None if key.starts_with(HEADER_PREFIX) => {
                tracing::warn!(key, "ignoring header record without a name");
            }
            None => {}
        }
    }
    headers
}
