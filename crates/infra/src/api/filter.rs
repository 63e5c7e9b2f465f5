//! Filter-query construction for list requests.
//!
//! Grammar: `key:value` predicates joined with `;` in the order given. The
//! joined string is percent-escaped as a whole (RFC 3986 unreserved set left
//! as-is), so `host:a;domain_guid:b` goes on the wire as
//! `q=host%3Aa%3Bdomain_guid%3Ab`.
//!
//! Predicates are neither reordered, deduplicated nor validated.

use core::fmt;

/// Ordered list of `key:value` predicates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter with a single predicate.
    pub fn by(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new().and(key, value)
    }

    /// Append a predicate after the existing ones.
    pub fn and(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[(String, String)] {
        &self.predicates
    }

    /// Escaped value for the `q` parameter.
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.to_string()).into_owned()
    }

    /// The complete `q=...` query parameter.
    pub fn to_query(&self) -> String {
        format!("q={}", self.encoded())
    }
}

/// Unescaped form, e.g. `host:my-cool-app;domain_guid:my-domain-guid`.
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (key, value)) in self.predicates.iter().enumerate() {
            if idx > 0 {
                f.write_str(";")?;
            }
            write!(f, "{key}:{value}")?;
        }
        Ok(())
    }
}

/// Path of a list request, optionally filtered.
///
/// An empty filter adds no query string.
pub fn list_path(collection: &str, filter: Option<&Filter>) -> String {
    match filter {
        Some(f) if !f.is_empty() => format!("{collection}?{}", f.to_query()),
        _ => collection.to_string(),
    }
}
