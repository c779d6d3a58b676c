//! Resolve the URL argument of a request against the session's base URL

use std::collections::BTreeMap;

use url::form_urlencoded;
use url::Url;

use crate::errors::HttpcliError;
use crate::sessions::context::is_absolute;

/// Path, query and fragment of a relative URL argument
#[derive(Debug, Clone, PartialEq, Eq)]
struct RelativeRef<'a> {
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl<'a> RelativeRef<'a> {
    fn split(arg: &'a str) -> Self {
        let (rest, fragment) = match arg.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (arg, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        Self { path: strip_authority(path), query, fragment }
    }
}

/// Drop the authority of a network-path reference (`//host/path`); the base
/// URL always supplies the host
fn strip_authority(path: &str) -> &str {
    match path.strip_prefix("//") {
        Some(rest) => rest.find('/').map_or("", |at| &rest[at..]),
        None => path,
    }
}

/// Combine the stored base URL with a URL argument
///
/// An absolute argument is returned as-is. A relative one takes scheme,
/// user-info, host and port from `base`; its path is clean-joined onto the
/// base path; its query keys replace the same keys of the base query while
/// base-only keys survive; its fragment is kept.
pub fn combine(base: Option<&Url>, arg: &str) -> Result<Url, HttpcliError> {
    if let Ok(url) = Url::parse(arg) {
        if is_absolute(&url) {
            return Ok(url);
        }
    }

    let base = base.ok_or(HttpcliError::MissingBaseUrl)?;
    let rel = RelativeRef::split(arg);

    let base_path = match base.path() {
        "" => "/",
        path => path,
    };

    let mut combined = base.clone();
    combined.set_path(&clean_join(base_path, rel.path));
    combined.set_query(merge_query(base.query(), rel.query).as_deref());
    combined.set_fragment(rel.fragment.filter(|f| !f.is_empty()));

    tracing::debug!(base = %base, arg, url = %combined, "combined request URL");
    Ok(combined)
}

/// `path.Join`-style join: `.` and `..` resolved, repeated `/` collapsed,
/// trailing `/` dropped
pub fn clean_join(base: &str, rel: &str) -> String {
    let joined = if rel.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, rel)
    };
    clean_path(&joined)
}

fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }

    let body = segments.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

/// Merge query strings, `arg` keys winning; encoded sorted by key
fn merge_query(base: Option<&str>, arg: Option<&str>) -> Option<String> {
    let mut params = parse_query(base.unwrap_or(""));
    for (key, values) in parse_query(arg.unwrap_or("")) {
        params.insert(key, values);
    }

    if params.is_empty() {
        return None;
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in &params {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    Some(serializer.finish())
}

fn parse_query(query: &str) -> BTreeMap<String, Vec<String>> {
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params.entry(key.into_owned()).or_default().push(value.into_owned());
    }
    params
}
