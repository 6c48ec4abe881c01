//! Whole DNS messages.
//!
//! RFC 1035 section 4.1: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1
//! ```text
//!     +---------------------+
//!     |        Header       |
//!     +---------------------+
//!     |       Question      | the question for the name server
//!     +---------------------+
//!     |        Answer       | RRs answering the question
//!     +---------------------+
//!     |      Authority      | RRs pointing toward an authority
//!     +---------------------+
//!     |      Additional     | RRs holding additional information
//!     +---------------------+
//! ```

#[cfg(feature = "logging")]
use log::{debug, trace};

use crate::error::{DecodeError, EncodeError, Section};
use crate::header::{Header, SectionCounts};
use crate::iana::{Class, RecordType};
use crate::name::Name;
use crate::record::{Question, ResourceRecord};
use crate::wire::{WireReader, WireWriter};
use std::{cmp, convert::TryFrom};

/// Smallest question on the wire: root name, type and class.
const MIN_QUESTION_LEN: usize = 5;

/// Smallest resource record on the wire: root name, type, class, TTL and
/// RDLENGTH, with empty RDATA.
const MIN_RECORD_LEN: usize = 11;

/// Options for encoding a [Message].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    compress: bool,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to replace repeated names, or repeated name suffixes, with
    /// compression pointers. On by default.
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn is_compress(&self) -> bool {
        self.compress
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { compress: true }
    }
}

/// A DNS message: a header and four sections.
///
/// The section counts of the wire header are not stored; they are the
/// lengths of the section vectors when encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Default::default()
        }
    }

    /// A recursive query for `name` and `qtype` in class IN, with a random id.
    pub fn query(name: Name, qtype: RecordType) -> Self {
        let header = Header {
            id: fastrand::u16(..),
            rd: true,
            ..Default::default()
        };
        let mut msg = Self::new(header);
        msg.questions.push(Question::new(name, qtype, Class::IN));
        msg
    }

    /// The header counts for the current sections.
    pub fn counts(&self) -> Result<SectionCounts, EncodeError> {
        Ok(SectionCounts {
            questions: section_count(Section::Question, self.questions.len())?,
            answers: section_count(Section::Answer, self.answers.len())?,
            authorities: section_count(Section::Authority, self.authorities.len())?,
            additionals: section_count(Section::Additional, self.additionals.len())?,
        })
    }

    /// All resource records: answers, then authorities, then additionals.
    pub fn records(&self) -> impl Iterator<Item = &ResourceRecord> + '_ {
        self.answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additionals.iter())
    }

    /// Decodes a complete message. Bytes after the last section are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        Self::decode(&mut WireReader::new(data)).map_err(|e| {
            debug!("decode: rejected {} bytes: {}", data.len(), e);
            e
        })
    }

    fn decode(reader: &mut WireReader<'_>) -> Result<Self, DecodeError> {
        let (header, counts) = Header::decode(reader)?;
        trace!(
            "decode: id {}, {} questions {} answers {} authorities {} additionals",
            header.id,
            counts.questions,
            counts.answers,
            counts.authorities,
            counts.additionals
        );

        let mut questions =
            Vec::with_capacity(capacity(reader, counts.questions, MIN_QUESTION_LEN));
        for _ in 0..counts.questions {
            questions.push(Question::decode(reader)?);
        }
        let answers = read_records(reader, counts.answers)?;
        let authorities = read_records(reader, counts.authorities)?;
        let additionals = read_records(reader, counts.additionals)?;

        if reader.remaining() > 0 {
            trace!("decode: ignoring {} trailing bytes", reader.remaining());
        }

        Ok(Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    /// Encodes with the default options: names are compressed.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        self.to_bytes_with(&EncodeOptions::default())
    }

    pub fn to_bytes_with(&self, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
        let counts = self.counts()?;
        let mut writer = WireWriter::new(options.compress);
        self.header.encode(&counts, &mut writer);
        for question in self.questions.iter() {
            question.encode(&mut writer);
        }
        for record in self.records() {
            record.encode(&mut writer)?;
        }
        trace!("encode: id {}, {} bytes", self.header.id, writer.len());
        Ok(writer.into_bytes())
    }
}

fn section_count(section: Section, count: usize) -> Result<u16, EncodeError> {
    u16::try_from(count).map_err(|_| {
        debug!("encode: {} section has {} entries", section, count);
        EncodeError::CountOverflow { section, count }
    })
}

/// Capacity for a section of `count` entries, bounded by how many entries
/// the rest of the buffer could hold.
fn capacity(reader: &WireReader<'_>, count: u16, min_len: usize) -> usize {
    cmp::min(count as usize, reader.remaining() / min_len)
}

/// Decodes a sequence of RR records (in answers, authorities and additionals).
fn read_records(
    reader: &mut WireReader<'_>,
    count: u16,
) -> Result<Vec<ResourceRecord>, DecodeError> {
    let mut records = Vec::with_capacity(capacity(reader, count, MIN_RECORD_LEN));
    for _ in 0..count {
        let record = ResourceRecord::decode(reader)?;
        trace!("read record: {}", record);
        records.push(record);
    }
    Ok(records)
}
