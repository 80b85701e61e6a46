use thiserror::Error;

use crate::parse::ParseError;
use crate::{DocumentError, TagParseError};

/// Unified error type covering documents, names, and tag payloads.
///
/// Returned by convenience methods like
/// [`LootRule::from_json()`](crate::LootRule::from_json).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Tag(#[from] TagParseError),
}
