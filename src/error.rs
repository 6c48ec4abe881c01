use crate::iana::RecordType;
use std::fmt;

/// What went wrong while decoding a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// The buffer ends before a required field.
    Truncated,

    /// A compression pointer that points forward, at itself, into a loop,
    /// or outside the buffer.
    InvalidPointer,

    /// A label length octet above 63, including the reserved `01` and `10`
    /// label types.
    LabelTooLong,

    /// A name whose encoded length exceeds 255 bytes.
    NameTooLong,

    /// RDATA inconsistent with the layout its record type requires.
    MalformedRData,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "truncated"),
            Self::InvalidPointer => write!(f, "invalid compression pointer"),
            Self::LabelTooLong => write!(f, "label too long"),
            Self::NameTooLong => write!(f, "name too long"),
            Self::MalformedRData => write!(f, "malformed rdata"),
        }
    }
}

/// The wire field being decoded when an error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Field {
    Header,
    Name,
    Type,
    Class,
    Ttl,
    RdLength,
    RData,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Header => "header",
            Self::Name => "name",
            Self::Type => "type",
            Self::Class => "class",
            Self::Ttl => "ttl",
            Self::RdLength => "rdlength",
            Self::RData => "rdata",
        };
        f.write_str(s)
    }
}

/// A decoding failure, with the field and byte offset where it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    field: Field,
    offset: usize,
}

impl DecodeError {
    pub(crate) const fn new(kind: DecodeErrorKind, field: Field, offset: usize) -> Self {
        Self {
            kind,
            field,
            offset,
        }
    }

    pub(crate) const fn truncated(field: Field, offset: usize) -> Self {
        Self::new(DecodeErrorKind::Truncated, field, offset)
    }

    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    pub const fn field(&self) -> Field {
        self.field
    }

    /// Byte offset into the message buffer.
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} at offset {}", self.kind, self.field, self.offset)
    }
}

impl std::error::Error for DecodeError {}

/// Message sections, as named in error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Question,
    Answer,
    Authority,
    Additional,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Question => "question",
            Self::Answer => "answer",
            Self::Authority => "authority",
            Self::Additional => "additional",
        };
        f.write_str(s)
    }
}

/// An encoding failure.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// A section holds more entries than its 16-bit count can express.
    CountOverflow { section: Section, count: usize },

    /// Serialized RDATA does not fit the 16-bit RDLENGTH.
    RDataTooLong(usize),

    /// A record whose data has the layout of another record type.
    RDataTypeMismatch {
        rtype: RecordType,
        rdata_type: RecordType,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountOverflow { section, count } => {
                write!(f, "{} section has {} entries, max is 65535", section, count)
            }
            Self::RDataTooLong(len) => write!(f, "rdata of {} bytes exceeds 65535", len),
            Self::RDataTypeMismatch { rtype, rdata_type } => {
                write!(f, "{} record holds {} rdata", rtype, rdata_type)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Invalid input when building a value programmatically.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    /// An empty label anywhere but at the end of a name.
    EmptyLabel,

    /// A label longer than 63 bytes.
    LabelTooLong(usize),

    /// A name longer than 255 bytes when encoded.
    NameTooLong(usize),

    /// A character string longer than 255 bytes.
    CharacterStringTooLong(usize),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "empty label inside a name"),
            Self::LabelTooLong(len) => write!(f, "label of {} bytes exceeds 63", len),
            Self::NameTooLong(len) => write!(f, "name of {} bytes exceeds 255", len),
            Self::CharacterStringTooLong(len) => {
                write!(f, "character string of {} bytes exceeds 255", len)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Any error from this library.
///
/// The codec functions return their own error types. This one is for
/// callers that mix parsing, building and encoding under one `?`:
///
/// ```rust
/// use dnswire::{Message, Name, RecordType};
///
/// fn ptr_query(addr: &str) -> dnswire::Result<Vec<u8>> {
///     let name: Name = addr.parse()?;
///     let bytes = Message::query(name, RecordType::PTR).to_bytes()?;
///     dnswire::decode(&bytes)?;
///     Ok(bytes)
/// }
///
/// assert!(ptr_query("4.3.2.1.in-addr.arpa").is_ok());
/// assert!(ptr_query("a..arpa").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    Decode(DecodeError),
    Encode(EncodeError),
    Build(BuildError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "decode: {}", e),
            Self::Encode(e) => write!(f, "encode: {}", e),
            Self::Build(e) => write!(f, "build: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Build(e) => Some(e),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

impl From<BuildError> for Error {
    fn from(e: BuildError) -> Self {
        Self::Build(e)
    }
}

/// One and only `Result` type from this library crate, over [Error].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let e = DecodeError::truncated(Field::RdLength, 40);
        assert_eq!(e.to_string(), "truncated rdlength at offset 40");
        assert_eq!(e.kind(), DecodeErrorKind::Truncated);
        assert_eq!(e.offset(), 40);
    }

    #[test]
    fn test_error_conversion() {
        let e: Error = EncodeError::CountOverflow {
            section: Section::Answer,
            count: 70000,
        }
        .into();
        assert_eq!(
            e.to_string(),
            "encode: answer section has 70000 entries, max is 65535"
        );
        assert!(std::error::Error::source(&e).is_some());
    }
}
