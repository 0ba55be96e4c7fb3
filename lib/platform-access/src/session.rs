//! Session headers handed back by the auth service.

/// Response headers that establish a signed-in session.
///
/// The login workflow treats these as opaque: they are appended to the
/// redirect response unchanged and in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionHeaders(Vec<(String, String)>);

impl SessionHeaders {
    /// Creates an empty header bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header. Repeated names are kept, as with `Set-Cookie`.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Appends a header, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
