//! Query-string helpers for `location.search`.
use crate::catalog::AddonKey;
use crate::constants::ADD_QUERY_PARAM;

/// First value of `name` in a query string (with or without the leading
/// `?`), with `+` and percent escapes decoded.
#[must_use]
pub fn query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode(key).as_deref() == Some(name))
        .and_then(|(_, value)| decode(value))
}

fn decode(component: &str) -> Option<String> {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

/// Add-on named by the `add` parameter, if it is a known key.
#[must_use]
pub fn preselected_addon(search: &str) -> Option<AddonKey> {
    let value = query_param(search, ADD_QUERY_PARAM)?;
    match value.parse() {
        Ok(key) => Some(key),
        Err(err) => {
            log::debug!("ignoring `?{ADD_QUERY_PARAM}=`: {err}");
            None
        }
    }
}
