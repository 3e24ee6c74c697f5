use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::form_urlencoded;

/// Characters left unescaped by a URI component encoder.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const ROOT_LOCATION: &str = "/";

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// A navigation history entry: the search state worth restoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub query: Option<String>,
    pub page: usize,
}

impl Default for HistoryEntry {
    fn default() -> Self {
        Self::root()
    }
}

impl HistoryEntry {
    pub fn root() -> Self {
        Self {
            query: None,
            page: 1,
        }
    }

    pub fn search(query: impl Into<String>, page: usize) -> Self {
        let query = query.into();
        if query.trim().is_empty() {
            return Self::root();
        }
        Self {
            query: Some(query),
            page: page.max(1),
        }
    }

    pub fn is_root(&self) -> bool {
        self.query.is_none()
    }

    /// Renders `?query=<encoded>&page=<n>`, or `/` for the root entry.
    pub fn location(&self) -> String {
        match &self.query {
            Some(query) => format!("?query={}&page={}", encode_component(query), self.page),
            None => ROOT_LOCATION.to_string(),
        }
    }

    /// Parses `/`, `?query=…&page=…`, or a full URL carrying that query string.
    ///
    /// A missing or unparsable page falls back to 1; a missing or blank query
    /// yields the root entry.
    pub fn parse_location(location: &str) -> Self {
        let trimmed = location.trim();
        let query_string = match trimmed.find('?') {
            Some(idx) => &trimmed[idx + 1..],
            None => "",
        };
        let query_string = query_string.split('#').next().unwrap_or("");

        let mut query = None;
        let mut page = None;
        for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
            match key.as_ref() {
                "query" if query.is_none() => query = Some(value.into_owned()),
                "page" if page.is_none() => page = value.trim().parse::<usize>().ok(),
                _ => {}
            }
        }

        match query {
            Some(query) => Self::search(query, page.unwrap_or(1)),
            None => Self::root(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HistoryEntry, encode_component};

    #[test]
    fn encode_component_matches_uri_component_rules() {
        assert_eq!(encode_component("cat"), "cat");
        assert_eq!(encode_component("cat food"), "cat%20food");
        assert_eq!(encode_component("a&b=c?"), "a%26b%3Dc%3F");
        assert_eq!(encode_component("it's (ok)!"), "it's%20(ok)!");
        assert_eq!(encode_component("café"), "caf%C3%A9");
    }

    #[test]
    fn location_renders_query_and_page() {
        assert_eq!(
            HistoryEntry::search("cat food", 2).location(),
            "?query=cat%20food&page=2"
        );
        assert_eq!(HistoryEntry::root().location(), "/");
    }

    #[test]
    fn parse_location_accepts_relative_and_absolute_forms() {
        assert_eq!(
            HistoryEntry::parse_location("?query=cat%20food&page=3"),
            HistoryEntry::search("cat food", 3)
        );
        assert_eq!(
            HistoryEntry::parse_location("https://example.com/?page=2&query=dog+house"),
            HistoryEntry::search("dog house", 2)
        );
        assert_eq!(HistoryEntry::parse_location("/"), HistoryEntry::root());
        assert_eq!(HistoryEntry::parse_location(""), HistoryEntry::root());
    }

    #[test]
    fn parse_location_defaults_bad_pages_and_blank_queries() {
        assert_eq!(
            HistoryEntry::parse_location("?query=cat&page=abc"),
            HistoryEntry::search("cat", 1)
        );
        assert_eq!(
            HistoryEntry::parse_location("?query=cat&page=0"),
            HistoryEntry::search("cat", 1)
        );
        assert_eq!(
            HistoryEntry::parse_location("?query=%20%20&page=4"),
            HistoryEntry::root()
        );
    }

    #[test]
    fn location_round_trips_through_parse() {
        let entry = HistoryEntry::search("a&b = c/d", 7);
        assert_eq!(HistoryEntry::parse_location(&entry.location()), entry);
    }
}
