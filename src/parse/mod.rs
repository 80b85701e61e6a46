mod error;
mod grammar;

pub use error::ParseError;

/// A parsed item reference: `[namespace:]path[@meta]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemName<'a> {
    pub namespace: Option<&'a str>,
    pub path: &'a str,
    pub meta: Option<u32>,
}

impl ItemName<'_> {
    /// `namespace:path`, with `minecraft` standing in for a missing namespace.
    #[must_use]
    pub fn qualified(&self) -> String {
        format!("{}:{}", self.namespace.unwrap_or("minecraft"), self.path)
    }
}

/// Parse one count segment, `N` or `N-M`, into `(min, max)` as written.
/// Leading, trailing and doubled dashes are ignored.
///
/// # Errors
///
/// Returns [`ParseError`] if the segment is not one or two non-negative integers.
pub fn count_range(input: &str) -> Result<(i32, i32), ParseError> {
    use winnow::Parser;
    grammar::count_range
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}

/// Parse an item reference such as `minecraft:wool@3`.
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not a valid item reference.
pub fn item_name(input: &str) -> Result<ItemName<'_>, ParseError> {
    use winnow::Parser;
    grammar::padded_item_name
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}
