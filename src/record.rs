//! Questions and resource records.

#[cfg(feature = "logging")]
use log::debug;

use crate::error::{DecodeError, EncodeError, Field};
use crate::iana::{Class, RecordType};
use crate::name::Name;
use crate::rdata::RData;
use crate::wire::{WireReader, WireWriter};
use std::fmt;

/// A question section entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub name: Name,
    pub qtype: RecordType,
    pub qclass: Class,
}

impl Question {
    pub fn new(name: Name, qtype: RecordType, qclass: Class) -> Self {
        Self {
            name,
            qtype,
            qclass,
        }
    }

    pub(crate) fn decode(reader: &mut WireReader<'_>) -> Result<Self, DecodeError> {
        let name = Name::decode(reader)?;
        let qtype = RecordType::from_int(reader.read_u16(Field::Type)?);
        let qclass = Class::from_int(reader.read_u16(Field::Class)?);
        Ok(Self::new(name, qtype, qclass))
    }

    pub(crate) fn encode(&self, writer: &mut WireWriter) {
        self.name.encode(writer);
        writer.write_u16(self.qtype.to_int());
        writer.write_u16(self.qclass.to_int());
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.qclass, self.qtype)
    }
}

/// A DNS Resource Record, as found in the answer, authority and additional
/// sections.
///
/// RDLENGTH is not stored: it is computed from `rdata` when encoding. The
/// record type is kept next to the data, as opaque data does not carry it.
///
/// RFC: https://www.rfc-editor.org/rfc/rfc1035#section-3.2.1
///      https://www.rfc-editor.org/rfc/rfc1035#section-4.1.3
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Name,
    pub rtype: RecordType,
    pub class: Class,

    /// in seconds
    pub ttl: u32,
    pub rdata: RData,
}

impl ResourceRecord {
    pub fn new(name: Name, rtype: RecordType, class: Class, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype,
            class,
            ttl,
            rdata,
        }
    }

    /// A record whose type follows from its data. Opaque data has no
    /// type of its own; use [new](Self::new) for it.
    pub fn from_rdata(name: Name, class: Class, ttl: u32, rdata: RData) -> Option<Self> {
        let rtype = rdata.rtype()?;
        Some(Self::new(name, rtype, class, ttl, rdata))
    }

    //                               1  1  1  1  1  1
    // 0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
    // +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    // |                                               |
    // /                                               /
    // /                      NAME                     /
    // |                                               |
    // +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    // |                      TYPE                     |
    // +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    // |                     CLASS                     |
    // +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    // |                      TTL                      |
    // |                                               |
    // +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    // |                   RDLENGTH                    |
    // +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--|
    // /                     RDATA                     /
    // /                                               /
    // +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    pub(crate) fn decode(reader: &mut WireReader<'_>) -> Result<Self, DecodeError> {
        let name = Name::decode(reader)?;
        let rtype = RecordType::from_int(reader.read_u16(Field::Type)?);
        let class = Class::from_int(reader.read_u16(Field::Class)?);
        let ttl = reader.read_u32(Field::Ttl)?;
        let rdlength = reader.read_u16(Field::RdLength)? as usize;
        let rdata = RData::decode(reader, rtype, rdlength)?;
        Ok(Self::new(name, rtype, class, ttl, rdata))
    }

    /// Fails if `rdata` has the layout of a type other than `rtype`, as the
    /// decoder picks the layout from `rtype`. Opaque data goes with any type.
    pub(crate) fn encode(&self, writer: &mut WireWriter) -> Result<(), EncodeError> {
        if let Some(rdata_type) = self.rdata.rtype() {
            if rdata_type != self.rtype {
                debug!(
                    "encode: {} record for {} holds {} rdata",
                    self.rtype, self.name, rdata_type
                );
                return Err(EncodeError::RDataTypeMismatch {
                    rtype: self.rtype,
                    rdata_type,
                });
            }
        }
        self.name.encode(writer);
        writer.write_u16(self.rtype.to_int());
        writer.write_u16(self.class.to_int());
        writer.write_u32(self.ttl);
        let index = writer.begin_rdata();
        self.rdata.encode(writer);
        writer.finish_rdata(index)
    }
}

/// One line in the style of a zone file: name, TTL, class, type, data.
impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name, self.ttl, self.class, self.rtype, self.rdata
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;
    use crate::rdata::Txt;
    use std::net::Ipv4Addr;

    #[test]
    fn test_query() {
        let data = b"\x05GRIMM\x0butelsystems\x05local\x00\x00\x01\x00\x01";
        let mut reader = WireReader::new(data);
        let question = Question::decode(&mut reader).unwrap();
        assert_eq!(question.qtype, RecordType::A);
        assert_eq!(question.qclass, Class::IN);
        assert_eq!(question.name.to_string(), "GRIMM.utelsystems.local.");
        assert_eq!(reader.offset(), data.len());
        assert_eq!(question.to_string(), "GRIMM.utelsystems.local. IN A");
    }

    #[test]
    fn test_question_type_class_codes() {
        // An unknown type and class survive as raw codes.
        let data = b"\x00\xff\x00\x00\x2a";
        let question = Question::decode(&mut WireReader::new(data)).unwrap();
        assert_eq!(question.qtype.to_int(), 0xff00);
        assert_eq!(question.qclass.to_int(), 42);

        let mut writer = WireWriter::new(false);
        question.encode(&mut writer);
        assert_eq!(writer.into_bytes(), data.to_vec());
    }

    #[test]
    fn test_resource_record() {
        let data = b"\x05hello\x00\x00\x01\x00\x01\x00\x00\x00\x0a\x00\x04\x01\x02\x03\x04";
        let mut reader = WireReader::new(data);
        let rr = ResourceRecord::decode(&mut reader).unwrap();
        assert_eq!(rr.name.labels().collect::<Vec<_>>(), vec![&b"hello"[..], &b""[..]]);
        assert_eq!(rr.rtype, RecordType::A);
        assert_eq!(rr.class, Class::IN);
        assert_eq!(rr.ttl, 10);
        assert_eq!(rr.rdata, RData::A(Ipv4Addr::new(1, 2, 3, 4)));
        assert_eq!(rr.to_string(), "hello. 10 IN A 1.2.3.4");
        assert_eq!(reader.offset(), data.len());

        let mut writer = WireWriter::new(false);
        rr.encode(&mut writer).unwrap();
        assert_eq!(writer.into_bytes(), data.to_vec());
    }

    #[test]
    fn test_truncated_fields() {
        let data = b"\x05hello\x00\x00\x01\x00\x01\x00\x00\x00\x0a\x00\x04\x01\x02\x03\x04";
        let cases = [
            (8, Field::Type),
            (10, Field::Class),
            (14, Field::Ttl),
            (16, Field::RdLength),
            (20, Field::RData),
        ];
        for (len, field) in cases {
            let err = ResourceRecord::decode(&mut WireReader::new(&data[..len])).unwrap_err();
            assert_eq!(err.kind(), DecodeErrorKind::Truncated);
            assert_eq!(err.field(), field, "prefix of {} bytes", len);
        }
    }

    #[test]
    fn test_rdata_must_match_type() {
        let name: Name = "hello".parse().unwrap();
        let cases = [
            (RecordType::TXT, RData::A(Ipv4Addr::new(1, 2, 3, 4)), RecordType::A),
            (RecordType::from_int(999), RData::A(Ipv4Addr::LOCALHOST), RecordType::A),
            (RecordType::MX, RData::Txt(Txt::from_text("v=spf1")), RecordType::TXT),
        ];
        for (rtype, rdata, rdata_type) in cases {
            let rr = ResourceRecord::new(name.clone(), rtype, Class::IN, 10, rdata);
            let mut writer = WireWriter::new(true);
            assert_eq!(
                rr.encode(&mut writer),
                Err(EncodeError::RDataTypeMismatch { rtype, rdata_type })
            );
        }

        // Opaque data is accepted under any type.
        let rr = ResourceRecord::new(name, RecordType::A, Class::IN, 10, RData::Opaque(vec![1]));
        assert!(rr.encode(&mut WireWriter::new(true)).is_ok());
    }

    #[test]
    fn test_from_rdata() {
        let name: Name = "hello".parse().unwrap();
        let rdata = RData::A(Ipv4Addr::LOCALHOST);
        let rr = ResourceRecord::from_rdata(name.clone(), Class::IN, 10, rdata).unwrap();
        assert_eq!(rr.rtype, RecordType::A);
        assert!(ResourceRecord::from_rdata(name, Class::IN, 10, RData::Opaque(vec![1])).is_none());
    }
}
