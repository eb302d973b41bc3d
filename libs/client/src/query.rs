//! Structured search query handed to the store.

/// Search parameters for one resource kind.
///
/// An empty query is "fetch all of this kind". Parameters repeat when a
/// predicate needs more than one bound (e.g. the `ge`/`lt` pair of a
/// half-open date range).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    params: Vec<(String, String)>,
    sort: Option<String>,
    count: Option<u32>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Sort newest-first on the given search parameter.
    pub fn sort_descending(mut self, field: &str) -> Self {
        self.sort = Some(format!("-{field}"));
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn limit(&self) -> Option<u32> {
        self.count
    }

    pub fn is_unfiltered(&self) -> bool {
        self.params.is_empty()
    }

    /// Render as a URL query string, percent-encoding values.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = self
            .params
            .iter()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
            .collect();
        if let Some(sort) = &self.sort {
            pairs.push(format!("_sort={}", urlencoding::encode(sort)));
        }
        if let Some(count) = self.count {
            pairs.push(format!("_count={count}"));
        }
        pairs.join("&")
    }
}
