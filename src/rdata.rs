//! Record data (RDATA), decoded according to the record type.
//!
//! Types without a decoder here are kept as [RData::Opaque] bytes, so a
//! record is never rejected only because its type is unknown.

#[cfg(feature = "logging")]
use log::trace;

use crate::error::{BuildError, DecodeError, DecodeErrorKind, Field};
use crate::iana::RecordType;
use crate::name::Name;
use crate::wire::{WireReader, WireWriter};
use std::{
    convert::TryInto,
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
};

/// Max length of one character string inside TXT data.
pub const MAX_CHARACTER_STRING_LEN: usize = 255;

/// The payload of a resource record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RData {
    /// IPv4 address.
    A(Ipv4Addr),

    /// IPv6 address.
    Aaaa(Ipv6Addr),

    /// Authoritative name server.
    Ns(Name),

    /// Canonical name of an alias.
    Cname(Name),

    /// Domain name pointer.
    Ptr(Name),

    /// Mail exchange.
    Mx { preference: u16, exchange: Name },

    /// Text strings.
    Txt(Txt),

    /// Raw bytes of any other record type.
    Opaque(Vec<u8>),
}

impl RData {
    /// The record type this data belongs to. `None` for opaque data, whose
    /// type is only known from the record holding it.
    pub fn rtype(&self) -> Option<RecordType> {
        match self {
            Self::A(_) => Some(RecordType::A),
            Self::Aaaa(_) => Some(RecordType::AAAA),
            Self::Ns(_) => Some(RecordType::NS),
            Self::Cname(_) => Some(RecordType::CNAME),
            Self::Ptr(_) => Some(RecordType::PTR),
            Self::Mx { .. } => Some(RecordType::MX),
            Self::Txt(_) => Some(RecordType::TXT),
            Self::Opaque(_) => None,
        }
    }

    /// Reads `rdlength` bytes of RDATA for a record of type `rtype`.
    ///
    /// Fails with `Truncated` if fewer than `rdlength` bytes remain, and
    /// with `MalformedRData` if the bytes don't fit the type's layout.
    pub(crate) fn decode(
        reader: &mut WireReader<'_>,
        rtype: RecordType,
        rdlength: usize,
    ) -> Result<Self, DecodeError> {
        let start = reader.offset();
        if reader.remaining() < rdlength {
            return Err(DecodeError::truncated(Field::RData, start));
        }
        let end = start + rdlength;
        let malformed = || DecodeError::new(DecodeErrorKind::MalformedRData, Field::RData, start);

        let rdata = match rtype {
            RecordType::A => {
                let bytes = reader.read_bytes(rdlength, Field::RData)?;
                let octets: [u8; 4] = bytes.try_into().map_err(|_| malformed())?;
                Self::A(Ipv4Addr::from(octets))
            }
            RecordType::AAAA => {
                let bytes = reader.read_bytes(rdlength, Field::RData)?;
                let octets: [u8; 16] = bytes.try_into().map_err(|_| malformed())?;
                Self::Aaaa(Ipv6Addr::from(octets))
            }
            RecordType::TXT => {
                let bytes = reader.read_bytes(rdlength, Field::RData)?;
                Self::Txt(Txt::decode(bytes).ok_or_else(malformed)?)
            }
            RecordType::NS | RecordType::CNAME | RecordType::PTR | RecordType::MX => {
                // Names inside RDATA may use pointers into the whole message,
                // but their own bytes must stay within RDLENGTH.
                let bounded = reader.data().get(..end).ok_or_else(malformed)?;
                let mut inner = WireReader::new(bounded);
                inner.set_offset(start);
                let rdata = Self::decode_with_name(&mut inner, rtype).map_err(|e| {
                    if e.kind() == DecodeErrorKind::Truncated {
                        malformed()
                    } else {
                        e
                    }
                })?;
                if inner.offset() != end {
                    return Err(malformed());
                }
                reader.set_offset(end);
                rdata
            }
            _ => {
                trace!("opaque rdata for type {}: {} bytes", rtype, rdlength);
                Self::Opaque(reader.read_bytes(rdlength, Field::RData)?.to_vec())
            }
        };

        Ok(rdata)
    }

    fn decode_with_name(
        reader: &mut WireReader<'_>,
        rtype: RecordType,
    ) -> Result<Self, DecodeError> {
        let rdata = match rtype {
            RecordType::MX => {
                let preference = reader.read_u16(Field::RData)?;
                let exchange = Name::decode(reader)?;
                Self::Mx {
                    preference,
                    exchange,
                }
            }
            RecordType::NS => Self::Ns(Name::decode(reader)?),
            RecordType::CNAME => Self::Cname(Name::decode(reader)?),
            _ => Self::Ptr(Name::decode(reader)?),
        };
        Ok(rdata)
    }

    /// Writes the RDATA bytes, without RDLENGTH.
    pub(crate) fn encode(&self, writer: &mut WireWriter) {
        match self {
            Self::A(addr) => writer.write_bytes(&addr.octets()),
            Self::Aaaa(addr) => writer.write_bytes(&addr.octets()),
            Self::Ns(name) | Self::Cname(name) | Self::Ptr(name) => name.encode(writer),
            Self::Mx {
                preference,
                exchange,
            } => {
                writer.write_u16(*preference);
                exchange.encode(writer);
            }
            Self::Txt(txt) => txt.encode(writer),
            Self::Opaque(bytes) => writer.write_bytes(bytes),
        }
    }
}

/// Presentation format. Opaque data uses the generic `\# <len> <hex>`
/// form from RFC 3597.
impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A(addr) => write!(f, "{}", addr),
            Self::Aaaa(addr) => write!(f, "{}", addr),
            Self::Ns(name) | Self::Cname(name) | Self::Ptr(name) => write!(f, "{}", name),
            Self::Mx {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            Self::Txt(txt) => write!(f, "{}", txt),
            Self::Opaque(bytes) if bytes.is_empty() => write!(f, "\\# 0"),
            Self::Opaque(bytes) => write!(f, "\\# {} {}", bytes.len(), u8_slice_to_hex(bytes)),
        }
    }
}

/// TXT data: one or more character strings.
///
/// From [RFC 1035 section 3.3.14]: "TXT-DATA: One or more
/// <character-string>s." Each string is a length byte followed by up to
/// 255 bytes. Applications such as SPF treat the strings as one text,
/// see [text](Txt::text).
///
/// [RFC 1035 section 3.3.14]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.3.14
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Txt {
    strings: Vec<Vec<u8>>,
}

impl Txt {
    pub fn new<I, S>(strings: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        let strings = strings
            .into_iter()
            .map(Into::into)
            .map(|s: Vec<u8>| {
                if s.len() > MAX_CHARACTER_STRING_LEN {
                    Err(BuildError::CharacterStringTooLong(s.len()))
                } else {
                    Ok(s)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { strings })
    }

    /// Splits `text` into as many character strings as needed.
    pub fn from_text(text: impl AsRef<[u8]>) -> Self {
        let text = text.as_ref();
        if text.is_empty() {
            return Self {
                strings: vec![Vec::new()],
            };
        }
        Self {
            strings: text
                .chunks(MAX_CHARACTER_STRING_LEN)
                .map(<[u8]>::to_vec)
                .collect(),
        }
    }

    pub fn strings(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.strings.iter().map(Vec::as_slice)
    }

    /// All strings concatenated.
    pub fn text(&self) -> Vec<u8> {
        self.strings.concat()
    }

    /// The concatenated text as UTF-8, with invalid bytes replaced.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.text()).into_owned()
    }

    /// Splits RDATA into character strings; `None` if a length byte
    /// claims more bytes than are left.
    fn decode(rdata: &[u8]) -> Option<Self> {
        let mut strings = Vec::new();
        let mut offset = 0;
        while offset < rdata.len() {
            let length = rdata[offset] as usize;
            offset += 1; // move over the length byte

            let offset_end = offset + length;
            if offset_end > rdata.len() {
                trace!(
                    "TXT: string length {} at {} overruns rdata length {}",
                    length,
                    offset,
                    rdata.len()
                );
                return None;
            }
            strings.push(rdata[offset..offset_end].to_vec());
            offset = offset_end;
        }
        Some(Self { strings })
    }

    fn encode(&self, writer: &mut WireWriter) {
        for s in &self.strings {
            writer.write_u8(s.len() as u8);
            writer.write_bytes(s);
        }
    }
}

/// Each string in double quotes; `"` and `\` are escaped, other bytes
/// outside printable ASCII are written as `\DDD`.
impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.strings.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str("\"")?;
            for &b in s {
                match b {
                    b'"' | b'\\' => write!(f, "\\{}", b as char)?,
                    0x20..=0x7e => write!(f, "{}", b as char)?,
                    _ => write!(f, "\\{:03}", b)?,
                }
            }
            f.write_str("\"")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Txt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Txt({})", self)
    }
}

const HEX_TABLE: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Create a hex string from `slice`.
///
/// For example, [1u8, 2u8] -> "0102"
fn u8_slice_to_hex(slice: &[u8]) -> String {
    let mut hex = String::with_capacity(slice.len() * 2);
    for b in slice {
        hex.push(HEX_TABLE[(b >> 4) as usize]);
        hex.push(HEX_TABLE[(b & 0x0F) as usize]);
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(
        data: &[u8],
        start: usize,
        rtype: RecordType,
        rdlength: usize,
    ) -> Result<(RData, usize), DecodeError> {
        let mut reader = WireReader::new(data);
        reader.set_offset(start);
        let rdata = RData::decode(&mut reader, rtype, rdlength)?;
        Ok((rdata, reader.offset()))
    }

    fn encode(rdata: &RData) -> Vec<u8> {
        let mut writer = WireWriter::new(false);
        rdata.encode(&mut writer);
        writer.into_bytes()
    }

    #[test]
    fn test_a_record() {
        let (rdata, end) = decode(b"\x01\x02\x03\x04", 0, RecordType::A, 4).unwrap();
        assert_eq!(rdata, RData::A(Ipv4Addr::new(1, 2, 3, 4)));
        assert_eq!(rdata.to_string(), "1.2.3.4");
        assert_eq!(end, 4);
        assert_eq!(encode(&rdata), b"\x01\x02\x03\x04".to_vec());
    }

    #[test]
    fn test_a_record_wrong_length() {
        for len in [0, 3, 5] {
            let err = decode(b"\x01\x02\x03\x04\x05", 0, RecordType::A, len).unwrap_err();
            assert_eq!(err.kind(), DecodeErrorKind::MalformedRData);
            assert_eq!(err.field(), Field::RData);
        }
    }

    #[test]
    fn test_rdlength_beyond_buffer() {
        let err = decode(b"\x01\x02", 0, RecordType::A, 4).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Truncated);
        let err = decode(b"\x01\x02", 0, RecordType::from_int(999), 3).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Truncated);
    }

    #[test]
    fn test_aaaa_record() {
        let bytes = [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        let (rdata, _) = decode(&bytes, 0, RecordType::AAAA, 16).unwrap();
        assert_eq!(rdata.to_string(), "2001:db8::1");
        assert_eq!(encode(&rdata), bytes.to_vec());
    }

    #[test]
    fn test_spf_txt() {
        let data = b"\x0fv=spf1 ptr ?all";
        let (rdata, end) = decode(data, 0, RecordType::TXT, 16).unwrap();
        let RData::Txt(txt) = &rdata else {
            panic!("not TXT: {:?}", rdata);
        };
        assert_eq!(txt.text(), b"v=spf1 ptr ?all".to_vec());
        assert_eq!(txt.text_lossy(), "v=spf1 ptr ?all");
        assert_eq!(end, 16);
        assert_eq!(encode(&rdata), data.to_vec());
    }

    #[test]
    fn test_txt_multiple_strings() {
        let data = b"\x03abc\x00\x02de";
        let (rdata, _) = decode(data, 0, RecordType::TXT, data.len()).unwrap();
        let RData::Txt(txt) = &rdata else {
            panic!("not TXT: {:?}", rdata);
        };
        assert_eq!(txt.strings().count(), 3);
        assert_eq!(txt.text(), b"abcde".to_vec());
        assert_eq!(rdata.to_string(), "\"abc\" \"\" \"de\"");
    }

    #[test]
    fn test_txt_overrun() {
        // The string claims 15 bytes but RDLENGTH leaves only 10.
        let data = b"\x0fv=spf1 ptr ?all";
        let err = decode(data, 0, RecordType::TXT, 10).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::MalformedRData);
    }

    #[test]
    fn test_txt_build() {
        assert!(Txt::new(vec![vec![b'a'; 256]]).is_err());
        let txt = Txt::from_text(vec![b'a'; 300]);
        assert_eq!(
            txt.strings().map(<[u8]>::len).collect::<Vec<_>>(),
            vec![255, 45]
        );
        let txt = Txt::new(["say \"hi\"", "\u{7f}"]).unwrap();
        assert_eq!(txt.to_string(), "\"say \\\"hi\\\"\" \"\\127\"");
    }

    #[test]
    fn test_opaque_unknown_type() {
        let data = b"\xde\xad\xbe\xef";
        let (rdata, end) = decode(data, 0, RecordType::from_int(65280), 4).unwrap();
        assert_eq!(rdata, RData::Opaque(data.to_vec()));
        assert_eq!(rdata.rtype(), None);
        assert_eq!(rdata.to_string(), "\\# 4 deadbeef");
        assert_eq!(end, 4);
        assert_eq!(encode(&rdata), data.to_vec());
    }

    #[test]
    fn test_known_type_without_decoder_is_opaque() {
        let data = b"\x00\x01\x02";
        let (rdata, _) = decode(data, 0, RecordType::SOA, 3).unwrap();
        assert_eq!(rdata, RData::Opaque(data.to_vec()));
    }

    #[test]
    fn test_cname_with_pointer() {
        // "example.com" at offset 0, then CNAME RDATA "www" + pointer at 13.
        let data = b"\x07example\x03com\x00\x03www\xc0\x00";
        let (rdata, end) = decode(data, 13, RecordType::CNAME, 6).unwrap();
        assert_eq!(rdata, RData::Cname("www.example.com".parse().unwrap()));
        assert_eq!(end, data.len());
    }

    #[test]
    fn test_name_must_fill_rdlength() {
        let data = b"\x03www\x00\xff";
        let err = decode(data, 0, RecordType::PTR, 6).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::MalformedRData);

        // The name runs past RDLENGTH.
        let err = decode(data, 0, RecordType::NS, 3).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::MalformedRData);
    }

    #[test]
    fn test_mx_record() {
        let data = b"\x00\x0a\x04mail\x00";
        let (rdata, _) = decode(data, 0, RecordType::MX, data.len()).unwrap();
        assert_eq!(rdata.to_string(), "10 mail.");
        assert_eq!(rdata.rtype(), Some(RecordType::MX));
        assert_eq!(encode(&rdata), data.to_vec());
    }
}
