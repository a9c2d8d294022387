use url::form_urlencoded;

pub const PAGE_KEY: &str = "page";
pub const FILTER_KEY: &str = "filter";

/// Key/value view of a navigable location's query string.
///
/// Pairs keep their original order. Lookups return the first occurrence of a
/// key, matching how browsers and routers read repeated keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationQuery {
    pairs: Vec<(String, String)>,
}

impl NavigationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `page=2&filter=M` (a leading `?` is accepted).
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self {
            pairs: form_urlencoded::parse(raw.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace every occurrence of `key` with a single pair.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.remove(key);
        self.pairs.push((key.to_string(), value.into()));
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}
