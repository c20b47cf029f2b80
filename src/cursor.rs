use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::string::FromUtf8Error;

/// Which side of the reference id the next page is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    After,
    Before,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::After => "after",
            Direction::Before => "before",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "after" => Ok(Direction::After),
            "before" => Ok(Direction::Before),
            other => Err(CursorError::InvalidDirection(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CursorError {
    #[error("cursor is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("cursor is not valid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("cursor has no reference")]
    MissingReference,

    #[error("invalid cursor direction: {0}")]
    InvalidDirection(String),
}

/// Opaque pagination anchor.
///
/// On the wire a cursor is `base64("<direction>_<reference>")` using the
/// standard alphabet, so it must be URL-escaped by whoever embeds it in a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub direction: Direction,
    pub reference: String,
}

impl Cursor {
    pub fn new(direction: Direction, reference: impl Into<String>) -> Self {
        Self {
            direction,
            reference: reference.into(),
        }
    }

    pub fn after(reference: impl Into<String>) -> Self {
        Self::new(Direction::After, reference)
    }

    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_string().as_bytes())
    }

    /// Decode a transport token.
    ///
    /// An empty token means "first page" and yields `Ok(None)`. Only the first
    /// two `_`-separated segments are read; anything after the reference is dropped.
    pub fn decode(token: &str) -> Result<Option<Self>, CursorError> {
        if token.is_empty() {
            return Ok(None);
        }

        let decoded = String::from_utf8(STANDARD.decode(token)?)?;

        let mut parts = decoded.split('_');
        let direction: Direction = parts.next().unwrap_or_default().parse()?;
        let reference = parts.next().ok_or(CursorError::MissingReference)?;

        Ok(Some(Self::new(direction, reference)))
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.direction, self.reference)
    }
}

impl Serialize for Cursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}
