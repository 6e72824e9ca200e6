//! `document.cookie` formatting and lookup.

/// Build the assignment string for `document.cookie`.
#[must_use]
pub fn set_cookie_string(name: &str, value: &str, max_age_secs: u64) -> String {
    format!(
        "{name}={}; max-age={max_age_secs}; path=/",
        urlencoding::encode(value)
    )
}

/// Find `name` in a `document.cookie` string and percent-decode its value.
///
/// Returns `None` when the cookie is absent or its value does not decode to
/// UTF-8.
#[must_use]
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim_start)
        .find_map(|row| row.strip_prefix(name)?.strip_prefix('='))
        .and_then(|encoded| match urlencoding::decode(encoded) {
            Ok(decoded) => Some(decoded.into_owned()),
            Err(err) => {
                log::warn!("cookie `{name}` is not valid UTF-8: {err}");
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_thirty_day_cookie() {
        assert_eq!(
            set_cookie_string("oneviaMembershipStep", "membership-2.html", 2_592_000),
            "oneviaMembershipStep=membership-2.html; max-age=2592000; path=/"
        );
    }

    #[test]
    fn encodes_json_values() {
        let cookie = set_cookie_string("k", r#"{"a":1}"#, 10);
        assert!(cookie.starts_with("k=%7B%22a%22%3A1%7D;"));
    }

    #[test]
    fn finds_and_decodes_matching_row() {
        let jar = "theme=dark; oneviaMembership=%7B%22plan%22%3Anull%7D; other=1";
        assert_eq!(
            find_cookie(jar, "oneviaMembership").as_deref(),
            Some(r#"{"plan":null}"#)
        );
        assert_eq!(find_cookie(jar, "theme").as_deref(), Some("dark"));
    }

    #[test]
    fn prefix_names_do_not_match() {
        let jar = "oneviaMembershipStep=membership.html";
        assert_eq!(find_cookie(jar, "oneviaMembership"), None);
        assert_eq!(find_cookie("", "oneviaMembership"), None);
    }
}
