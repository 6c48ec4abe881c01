//! Domain names and their wire encoding.
//!
//! [Name] is a sequence of labels. On the wire each label is a length
//! octet followed by that many bytes, and the name ends with a zero octet
//! (the empty root label).
//!
//! RFC 1035 section 4.1.4 allows a name, or the tail of one, to be replaced
//! by a pointer to an earlier occurrence in the message:
//!
//! ```text
//!     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//!     | 1  1|                OFFSET                   |
//!     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```

#[cfg(feature = "logging")]
use log::trace;

use crate::error::{BuildError, DecodeError, DecodeErrorKind, Field};
use crate::wire::{WireReader, WireWriter};
use std::{collections::HashSet, fmt, str::FromStr};

/// Max length of a single label, in bytes.
pub const MAX_LABEL_LEN: usize = 63;

/// Max encoded length of a name, length octets and root label included.
pub const MAX_NAME_LEN: usize = 255;

const POINTER_MASK: u8 = 0xC0;

/// One non-empty label of a domain name, at most 63 bytes.
///
/// Labels are arbitrary bytes; comparison is exact, so `Google` and
/// `google` are different labels.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(Vec<u8>);

impl Label {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, BuildError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(BuildError::EmptyLabel);
        }
        if bytes.len() > MAX_LABEL_LEN {
            return Err(BuildError::LabelTooLong(bytes.len()));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Presentation format: `.` and `\` are escaped with a backslash, other
/// bytes outside printable ASCII as `\DDD`.
impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            match b {
                b'.' | b'\\' => write!(f, "\\{}", b as char)?,
                0x21..=0x7e => write!(f, "{}", b as char)?,
                _ => write!(f, "\\{:03}", b)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label(\"{}\")", self)
    }
}

/// A domain name.
///
/// The root label is implicit: a name holds only its non-empty labels, and
/// [labels](Name::labels) yields the empty root label last.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<Label>,
}

impl Name {
    /// The root name, `.`.
    pub const fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Builds a name from its labels, most specific first.
    ///
    /// A trailing empty label is accepted as the root terminator, so both
    /// `["google", "com"]` and `["google", "com", ""]` give `google.com.`.
    pub fn from_labels<I, L>(labels: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut name = Self::root();
        let mut terminated = false;
        for label in labels {
            let label = label.as_ref();
            if terminated {
                return Err(BuildError::EmptyLabel);
            }
            if label.is_empty() {
                terminated = true;
                continue;
            }
            name.labels.push(Label::new(label)?);
        }

        let len = name.encoded_len();
        if len > MAX_NAME_LEN {
            return Err(BuildError::NameTooLong(len));
        }
        Ok(name)
    }

    /// Iterates over the labels, ending with the empty root label.
    pub fn labels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.labels
            .iter()
            .map(Label::as_bytes)
            .chain(std::iter::once(&b""[..]))
    }

    /// Number of labels, not counting the root.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length of the uncompressed wire form.
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|l| 1 + l.len()).sum::<usize>() + 1
    }

    /// Reads a name at the reader's offset, following compression pointers.
    ///
    /// The reader ends up after the name's own bytes: after the zero octet,
    /// or after the first pointer if there is one. A pointer must point
    /// strictly before itself, and no pointer may be followed twice.
    pub(crate) fn decode(reader: &mut WireReader<'_>) -> Result<Self, DecodeError> {
        let data = reader.data();
        let mut offset = reader.offset();
        let mut labels = Vec::new();
        let mut encoded_len = 1; // the root label
        let mut resume_at = None;
        let mut visited = HashSet::new();

        loop {
            let length = *data
                .get(offset)
                .ok_or_else(|| DecodeError::truncated(Field::Name, offset))?;

            if length == 0 {
                offset += 1;
                break;
            }

            // Check the first 2 bits for possible "Message compression".
            match length & POINTER_MASK {
                0x00 => {
                    let start = offset + 1;
                    let end = start + length as usize;
                    let bytes = data
                        .get(start..end)
                        .ok_or_else(|| DecodeError::truncated(Field::Name, start))?;

                    encoded_len += 1 + bytes.len();
                    if encoded_len > MAX_NAME_LEN {
                        return Err(DecodeError::new(
                            DecodeErrorKind::NameTooLong,
                            Field::Name,
                            offset,
                        ));
                    }
                    labels.push(Label(bytes.to_vec()));
                    offset = end;
                }
                POINTER_MASK => {
                    let low = *data
                        .get(offset + 1)
                        .ok_or_else(|| DecodeError::truncated(Field::Name, offset))?;
                    let target = (usize::from(length & !POINTER_MASK) << 8) | usize::from(low);

                    if target >= offset || !visited.insert(offset) {
                        trace!(
                            "bad compression pointer at {} to {}",
                            offset,
                            target
                        );
                        return Err(DecodeError::new(
                            DecodeErrorKind::InvalidPointer,
                            Field::Name,
                            offset,
                        ));
                    }

                    // A pointer marks the end of the name at the call site.
                    if resume_at.is_none() {
                        resume_at = Some(offset + 2);
                    }
                    offset = target;
                }
                _ => {
                    // 0b01 and 0b10 are reserved label types.
                    return Err(DecodeError::new(
                        DecodeErrorKind::LabelTooLong,
                        Field::Name,
                        offset,
                    ));
                }
            }
        }

        reader.set_offset(resume_at.unwrap_or(offset));
        Ok(Self { labels })
    }

    /// Writes the name. If the writer compresses, the longest suffix
    /// already in the message is replaced by a pointer.
    pub(crate) fn encode(&self, writer: &mut WireWriter) {
        for (i, label) in self.labels.iter().enumerate() {
            let suffix = &self.labels[i..];
            if let Some(offset) = writer.compression_target(suffix) {
                writer.write_u16((u16::from(POINTER_MASK) << 8) | offset);
                return;
            }
            writer.remember_name(suffix);
            writer.write_u8(label.len() as u8);
            writer.write_bytes(label.as_bytes());
        }
        writer.write_u8(0);
    }
}

/// Parses a dotted name such as `www.example.com.`; the final dot is
/// optional and `.` alone is the root. Escapes are not interpreted.
impl FromStr for Name {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "." {
            return Ok(Self::root());
        }
        let labels: Vec<&str> = s.strip_suffix('.').unwrap_or(s).split('.').collect();
        // An empty label here is inside the name, never the terminator.
        if labels.iter().any(|label| label.is_empty()) {
            return Err(BuildError::EmptyLabel);
        }
        Self::from_labels(labels)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        for label in &self.labels {
            write!(f, "{}.", label)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name(\"{}\")", self)
    }
}
