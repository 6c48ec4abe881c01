//! Cursor-based reading and writing of wire-format bytes.
//!
//! [WireReader] is the decoding state: the whole message buffer plus the
//! offset of the next unread byte. The whole buffer stays addressable so
//! that compression pointers can reach back into earlier sections.
//!
//! [WireWriter] collects the encoded message and remembers where names were
//! written, for name compression.

use crate::error::{DecodeError, EncodeError, Field};
use crate::name::Label;
use std::{collections::HashMap, convert::TryFrom};

/// Largest offset a compression pointer can express.
const MAX_POINTER_OFFSET: usize = 0x3FFF;

pub(crate) struct WireReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub(crate) const fn data(&self) -> &'a [u8] {
        self.data
    }

    pub(crate) const fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    pub(crate) fn read_u16(&mut self, field: Field) -> Result<u16, DecodeError> {
        let bytes = self.read_bytes(2, field)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn read_u32(&mut self, field: Field) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(4, field)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads exactly `len` bytes, or fails with `Truncated` at the current
    /// offset without moving the cursor.
    pub(crate) fn read_bytes(&mut self, len: usize, field: Field) -> Result<&'a [u8], DecodeError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| DecodeError::truncated(field, self.offset))?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }
}

pub(crate) struct WireWriter {
    data: Vec<u8>,
    compress: bool,

    /// k: name suffix, v: offset
    names: HashMap<Vec<Label>, u16>,
}

impl WireWriter {
    pub(crate) fn new(compress: bool) -> Self {
        Self {
            data: Vec::new(),
            compress,
            names: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn write_u8(&mut self, byte: u8) {
        self.data.push(byte);
    }

    pub(crate) fn write_u16(&mut self, short: u16) {
        self.data.extend_from_slice(&short.to_be_bytes());
    }

    pub(crate) fn write_u32(&mut self, int: u32) {
        self.data.extend_from_slice(&int.to_be_bytes());
    }

    pub(crate) fn write_bytes(&mut self, s: &[u8]) {
        self.data.extend_from_slice(s);
    }

    /// Offset of an earlier copy of `suffix` that a pointer may target.
    pub(crate) fn compression_target(&self, suffix: &[Label]) -> Option<u16> {
        if !self.compress {
            return None;
        }
        self.names.get(suffix).copied()
    }

    /// Records that `suffix` starts at the current position.
    pub(crate) fn remember_name(&mut self, suffix: &[Label]) {
        if !self.compress || self.data.len() > MAX_POINTER_OFFSET {
            return;
        }
        let offset = self.data.len() as u16;
        self.names.entry(suffix.to_vec()).or_insert(offset);
    }

    /// Reserves the RDLENGTH field; returns its position for
    /// [finish_rdata](Self::finish_rdata).
    pub(crate) fn begin_rdata(&mut self) -> usize {
        let index = self.data.len();
        self.write_u16(0);
        index
    }

    /// Fills in the RDLENGTH reserved at `index` from the bytes written since.
    pub(crate) fn finish_rdata(&mut self, index: usize) -> Result<(), EncodeError> {
        let length = self.data.len() - index - 2;
        let short = u16::try_from(length).map_err(|_| EncodeError::RDataTooLong(length))?;
        self.data[index..index + 2].copy_from_slice(&short.to_be_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;

    #[test]
    fn test_read_big_endian() {
        let data = [0x12, 0x34, 0x00, 0x00, 0x01, 0x16, 0xff];
        let mut reader = WireReader::new(&data);
        assert_eq!(reader.read_u16(Field::Header).unwrap(), 0x1234);
        assert_eq!(reader.read_u32(Field::Ttl).unwrap(), 278);
        assert_eq!(reader.read_bytes(1, Field::Name).unwrap(), &[0xffu8]);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_past_end() {
        let data = [0x00, 0x01, 0x02];
        let mut reader = WireReader::new(&data);
        reader.read_bytes(1, Field::Name).unwrap();
        let err = reader.read_u32(Field::Ttl).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Truncated);
        assert_eq!(err.field(), Field::Ttl);
        assert_eq!(err.offset(), 1);
        // the cursor did not move.
        assert_eq!(reader.offset(), 1);
    }

    #[test]
    fn test_rdata_length_patch() {
        let mut writer = WireWriter::new(false);
        writer.write_u8(0xaa);
        let index = writer.begin_rdata();
        writer.write_bytes(&[1, 2, 3]);
        writer.finish_rdata(index).unwrap();
        assert_eq!(writer.into_bytes(), vec![0xaa, 0x00, 0x03, 1, 2, 3]);
    }

    #[test]
    fn test_rdata_too_long() {
        let mut writer = WireWriter::new(false);
        let index = writer.begin_rdata();
        writer.write_bytes(&vec![0u8; 70000]);
        assert_eq!(
            writer.finish_rdata(index),
            Err(EncodeError::RDataTooLong(70000))
        );
    }
}
