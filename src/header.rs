//! The fixed 12-byte message header.

use crate::error::{DecodeError, Field};
use crate::iana::{Opcode, Rcode};
use crate::wire::{WireReader, WireWriter};

/// Length of the header on the wire.
pub const HEADER_LEN: usize = 12;

// Definitions for DNS message header "flags" field
//
// The "flags" field is 16-bit long, in this format:
// (RFC 1035 section 4.1.1, with AD and CD from RFC 4035)
//
//   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
// |QR|   Opcode  |AA|TC|RD|RA| Z|AD|CD|   RCODE   |
//
pub const FLAGS_QR: u16 = 0x8000;
const FLAGS_OPCODE_SHIFT: u16 = 11;
const FLAGS_OPCODE_MASK: u16 = 0x7800;
pub const FLAGS_AA: u16 = 0x0400;
pub const FLAGS_TC: u16 = 0x0200;
pub const FLAGS_RD: u16 = 0x0100;
pub const FLAGS_RA: u16 = 0x0080;
/// Reserved; always written as zero.
pub const FLAGS_Z: u16 = 0x0040;
pub const FLAGS_AD: u16 = 0x0020;
pub const FLAGS_CD: u16 = 0x0010;
const FLAGS_RCODE_MASK: u16 = 0x000F;

/// Header fields other than the section counts.
///
/// The counts are not stored here: they are derived from the sections of
/// a [Message](crate::Message) when encoding. The reserved Z bit is
/// ignored when decoding and always encoded as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,

    /// `true` for a response, `false` for a query.
    pub qr: bool,
    pub opcode: Opcode,

    /// Authoritative answer.
    pub aa: bool,

    /// Truncated.
    pub tc: bool,

    /// Recursion desired.
    pub rd: bool,

    /// Recursion available.
    pub ra: bool,

    /// Authenticated data.
    pub ad: bool,

    /// Checking disabled.
    pub cd: bool,
    pub rcode: Rcode,
}

/// The four section counts as read from a header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionCounts {
    pub questions: u16,
    pub answers: u16,
    pub authorities: u16,
    pub additionals: u16,
}

impl Header {
    pub const fn is_query(&self) -> bool {
        !self.qr
    }

    pub const fn is_response(&self) -> bool {
        self.qr
    }

    /// Packs the flags into their 16-bit wire form.
    pub fn flags(&self) -> u16 {
        // Opcode and rcode are 4-bit values already.
        let mut flags = u16::from(self.opcode.to_int()) << FLAGS_OPCODE_SHIFT;
        flags |= u16::from(self.rcode.to_int());
        for (set, bit) in [
            (self.qr, FLAGS_QR),
            (self.aa, FLAGS_AA),
            (self.tc, FLAGS_TC),
            (self.rd, FLAGS_RD),
            (self.ra, FLAGS_RA),
            (self.ad, FLAGS_AD),
            (self.cd, FLAGS_CD),
        ] {
            if set {
                flags |= bit;
            }
        }
        flags
    }

    /// Unpacks the 16-bit wire flags. The Z bit is dropped.
    pub fn from_flags(id: u16, flags: u16) -> Self {
        Self {
            id,
            qr: flags & FLAGS_QR != 0,
            opcode: Opcode::from_int(((flags & FLAGS_OPCODE_MASK) >> FLAGS_OPCODE_SHIFT) as u8),
            aa: flags & FLAGS_AA != 0,
            tc: flags & FLAGS_TC != 0,
            rd: flags & FLAGS_RD != 0,
            ra: flags & FLAGS_RA != 0,
            ad: flags & FLAGS_AD != 0,
            cd: flags & FLAGS_CD != 0,
            rcode: Rcode::from_int((flags & FLAGS_RCODE_MASK) as u8),
        }
    }

    /// Reads the header at the reader's offset.
    //
    //                                  1  1  1  1  1  1
    //    0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
    //    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    //    |                      ID                       |
    //    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    //    |QR|   Opcode  |AA|TC|RD|RA| Z|AD|CD|   RCODE   |
    //    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    //    |                    QDCOUNT                    |
    //    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    //    |                    ANCOUNT                    |
    //    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    //    |                    NSCOUNT                    |
    //    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    //    |                    ARCOUNT                    |
    //    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    //
    pub(crate) fn decode(
        reader: &mut WireReader<'_>,
    ) -> Result<(Self, SectionCounts), DecodeError> {
        if reader.remaining() < HEADER_LEN {
            return Err(DecodeError::truncated(Field::Header, reader.offset()));
        }
        let id = reader.read_u16(Field::Header)?;
        let flags = reader.read_u16(Field::Header)?;
        let counts = SectionCounts {
            questions: reader.read_u16(Field::Header)?,
            answers: reader.read_u16(Field::Header)?,
            authorities: reader.read_u16(Field::Header)?,
            additionals: reader.read_u16(Field::Header)?,
        };
        Ok((Self::from_flags(id, flags), counts))
    }

    pub(crate) fn encode(&self, counts: &SectionCounts, writer: &mut WireWriter) {
        writer.write_u16(self.id);
        writer.write_u16(self.flags());
        writer.write_u16(counts.questions);
        writer.write_u16(counts.answers);
        writer.write_u16(counts.authorities);
        writer.write_u16(counts.additionals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;

    fn decode(data: &[u8]) -> Result<(Header, SectionCounts), DecodeError> {
        Header::decode(&mut WireReader::new(data))
    }

    #[test]
    fn test_decode_standard_response() {
        let data = b"\x97\xc9\x81\x80\x00\x01\x00\x06\x00\x00\x00\x00";
        let (header, counts) = decode(data).unwrap();
        assert_eq!(header.id, 0x97c9);
        assert!(header.is_response());
        assert_eq!(header.opcode, Opcode::QUERY);
        assert!(!header.aa && !header.tc);
        assert!(header.rd && header.ra);
        assert!(!header.ad && !header.cd);
        assert_eq!(header.rcode, Rcode::NOERROR);
        assert_eq!(counts.questions, 1);
        assert_eq!(counts.answers, 6);
        assert_eq!(counts.authorities, 0);
        assert_eq!(counts.additionals, 0);
    }

    #[test]
    fn test_every_flag_bit() {
        // Z is the only bit that does not survive.
        let (header, _) = decode(b"\x00\x00\xff\xff\x00\x00\x00\x00\x00\x00\x00\x00").unwrap();
        assert_eq!(header.opcode.to_int(), 15);
        assert_eq!(header.rcode.to_int(), 15);
        assert!(header.qr && header.aa && header.tc && header.rd);
        assert!(header.ra && header.ad && header.cd);
        assert_eq!(header.flags(), 0xffff & !FLAGS_Z);
    }

    #[test]
    fn test_unknown_opcode_rcode_kept() {
        let header = Header::from_flags(1, (3 << 11) | 12);
        assert_eq!(header.opcode, Opcode::from_int(3));
        assert_eq!(header.rcode, Rcode::from_int(12));
        assert_eq!(header.flags(), (3 << 11) | 12);
    }

    #[test]
    fn test_wide_opcode_rcode_round_trip() {
        let header = Header {
            id: 9,
            opcode: Opcode::from_int(20),
            rcode: Rcode::from_int(0xF3),
            ..Default::default()
        };
        assert_eq!(header.opcode, Opcode::NOTIFY);
        assert_eq!(header.rcode, Rcode::NXDOMAIN);

        let mut writer = WireWriter::new(false);
        header.encode(&SectionCounts::default(), &mut writer);
        let bytes = writer.into_bytes();
        let (decoded, _) = decode(&bytes).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_encode_writes_counts() {
        let header = Header {
            id: 0x1032,
            qr: true,
            rd: true,
            ra: true,
            rcode: Rcode::NXDOMAIN,
            ..Default::default()
        };
        let counts = SectionCounts {
            questions: 1,
            answers: 2,
            authorities: 3,
            additionals: 4,
        };
        let mut writer = WireWriter::new(false);
        header.encode(&counts, &mut writer);
        assert_eq!(
            writer.into_bytes(),
            b"\x10\x32\x81\x83\x00\x01\x00\x02\x00\x03\x00\x04".to_vec()
        );
    }

    #[test]
    fn test_short_header() {
        let err = decode(b"\x10\x32\x81\x80\x00\x01").unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Truncated);
        assert_eq!(err.field(), Field::Header);
        assert_eq!(err.offset(), 0);
    }
}
