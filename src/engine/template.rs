//! URL template substitution.
//!
//! Templates are plain URL strings containing zero or more literal `{}`
//! placeholders. Substitution is a pure string transform:
//!
//! ```text
//! substitute("https://duckduckgo.com/?q={}", "brazil")
//!     -> "https://duckduckgo.com/?q=brazil"
//!
//! substitute("https://github.com/{}/{}", "rust-lang/rust")
//!     -> "https://github.com/rust-lang/rust"
//! ```
//!
//! Components are percent-encoded individually. Placeholders that end up with
//! no component (empty query, or fewer components than placeholders) are
//! stripped together with one adjacent `/` on either side, so `/{}` and `{}/`
//! collapse to nothing and the URL stays clean.

use std::borrow::Cow;

const PLACEHOLDER: &str = "{}";

/// Replace the `{}` placeholders in `template` with `query`, if any.
///
/// - No placeholders: `template` is returned unchanged and the query dropped.
/// - Empty query: every placeholder is stripped (with adjacent slashes).
/// - One placeholder: the full query is encoded and substituted.
/// - Several placeholders: the trimmed query is split by `/` if it contains
///   one, else by a single space, else taken whole; components fill the
///   placeholders left to right and any excess placeholders are stripped.
pub(crate) fn substitute(template: &str, query: &str) -> String {
    let placeholders = template.matches(PLACEHOLDER).count();
    if placeholders == 0 {
        return template.to_string();
    }
    if query.is_empty() {
        return strip_placeholders(template).into_owned();
    }
    if placeholders == 1 {
        return template.replacen(PLACEHOLDER, &urlencoding::encode(query), 1);
    }

    let components = split_query(query.trim());
    let mut url = template.to_string();
    for component in components.iter().take(placeholders) {
        url = url.replacen(PLACEHOLDER, &urlencoding::encode(component), 1);
    }
    if components.len() < placeholders {
        url = strip_placeholders(&url).into_owned();
    }
    url
}

/// Remove every `{}` together with one optional `/` on either side.
fn strip_placeholders(url: &str) -> Cow<'_, str> {
    regex!(r"/?\{\}/?").replace_all(url, "")
}

/// Split a multi-component query. `/` wins over a single space; a query with
/// neither is one component.
fn split_query(query: &str) -> Vec<&str> {
    if query.contains('/') {
        query.split('/').collect()
    } else if query.contains(' ') {
        query.split(' ').collect()
    } else {
        vec![query]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_cases() {
        // (template, query, expected)
        let cases = [
            // No placeholder: query dropped.
            ("https://en.wikipedia.org/wiki/Special:Random", "anything", "https://en.wikipedia.org/wiki/Special:Random"),
            // One placeholder, plain query.
            ("https://duckduckgo.com/?q={}", "brazil", "https://duckduckgo.com/?q=brazil"),
            // One placeholder, query with spaces: encoded whole.
            ("https://www.google.com/maps/search/{}", "new york city", "https://www.google.com/maps/search/new%20york%20city"),
            // One placeholder, reserved characters encoded.
            ("https://duckduckgo.com/?q={}", "a&b=c", "https://duckduckgo.com/?q=a%26b%3Dc"),
            // Empty query: placeholder and its slash stripped.
            ("https://www.google.com/maps/search/{}", "", "https://www.google.com/maps/search"),
            ("https://duckduckgo.com/?q={}", "", "https://duckduckgo.com/?q="),
            // Two placeholders, slash-separated query.
            ("https://github.com/{}/{}", "rust-lang/rust", "https://github.com/rust-lang/rust"),
            // Two placeholders, space-separated query.
            ("https://github.com/{}/{}", "rust-lang rust", "https://github.com/rust-lang/rust"),
            // Slash split takes priority over space split.
            ("https://github.com/{}/{}", "a b/c d", "https://github.com/a%20b/c%20d"),
            // Fewer components than placeholders: excess stripped.
            ("https://github.com/{}/{}", "rust-lang", "https://github.com/rust-lang"),
            // Components are encoded individually.
            ("https://gitlab.com/{}/{}", "my group/my project", "https://gitlab.com/my%20group/my%20project"),
        ];

        for (template, query, expected) in cases {
            assert_eq!(substitute(template, query), expected, "substitute({template:?}, {query:?})");
        }
    }

    #[test]
    fn single_placeholder_round_trips_plain_queries() {
        let query = "brazil";
        let url = substitute("https://duckduckgo.com/?q={}", query);
        let encoded = url.rsplit('=').next().unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), query);
    }

    #[test]
    fn excess_placeholders_leave_no_literal_braces() {
        let url = substitute("https://example.org/{}/{}/{}", "only");
        assert_eq!(url, "https://example.org/only");
        assert!(!url.contains("{}"));
    }

    #[test]
    fn multi_placeholder_query_is_trimmed_first() {
        let url = substitute("https://github.com/{}/{}", "  rust-lang rust  ");
        assert_eq!(url, "https://github.com/rust-lang/rust");
    }
}
