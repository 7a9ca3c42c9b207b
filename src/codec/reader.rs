use super::primitive;
use super::Codec;
use crate::address::{Address, ADDRESS_BYTES};
use crate::error::CodecError;
use crate::layout::Field;

/// Left-to-right cursor over a byte buffer.
///
/// The cursor remembers which structure it is decoding so every failure names
/// the structure and the field being read.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    start: usize,
    pos: usize,
    structure: &'static str,
}

impl<'a> Reader<'a> {
    pub fn new(structure: &'static str, data: &'a [u8]) -> Self {
        Self::at(structure, data, 0)
    }

    /// Start decoding `structure` at `offset` within `data`.
    pub fn at(structure: &'static str, data: &'a [u8], offset: usize) -> Self {
        Reader {
            data,
            start: offset,
            pos: offset,
            structure,
        }
    }

    pub fn structure(&self) -> &'static str {
        self.structure
    }

    /// Absolute position within the underlying buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes consumed since this reader (or nested reader) started.
    pub fn consumed(&self) -> usize {
        self.pos - self.start
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn ensure(&self, field: &'static str, needed: usize) -> Result<(), CodecError> {
        if self.remaining() < needed {
            return Err(CodecError::BufferTooShort {
                structure: self.structure,
                field,
                offset: self.pos,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    fn read_with<T>(
        &mut self,
        field: &'static str,
        width: usize,
        read: fn(&[u8], usize) -> Result<(T, usize), CodecError>,
    ) -> Result<T, CodecError> {
        self.ensure(field, width)?;
        let (value, consumed) = read(self.data, self.pos)?;
        self.pos += consumed;
        Ok(value)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, CodecError> {
        self.read_with(field, 1, primitive::read_u8)
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, CodecError> {
        self.read_with(field, 2, primitive::read_u16_le)
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, CodecError> {
        self.read_with(field, 4, primitive::read_u32_le)
    }

    pub fn read_u64(&mut self, field: &'static str) -> Result<u64, CodecError> {
        self.read_with(field, 8, primitive::read_u64_le)
    }

    pub fn read_i64(&mut self, field: &'static str) -> Result<i64, CodecError> {
        self.read_with(field, 8, primitive::read_i64_le)
    }

    pub fn read_f64(&mut self, field: &'static str) -> Result<f64, CodecError> {
        self.read_with(field, 8, primitive::read_f64_le)
    }

    pub fn read_address(&mut self, field: &'static str) -> Result<Address, CodecError> {
        self.read_with(field, ADDRESS_BYTES, primitive::read_address)
    }

    pub fn read_array<const N: usize>(
        &mut self,
        field: &'static str,
    ) -> Result<[u8; N], CodecError> {
        self.read_with(field, N, primitive::read_array::<N>)
    }

    /// Borrow the next `len` bytes.
    pub fn read_bytes(&mut self, field: &'static str, len: usize) -> Result<&'a [u8], CodecError> {
        self.ensure(field, len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn skip(&mut self, field: &'static str, len: usize) -> Result<(), CodecError> {
        self.read_bytes(field, len).map(|_| ())
    }

    /// A bool stored as a single 0/1 byte.
    pub fn read_bool(&mut self, field: &'static str) -> Result<bool, CodecError> {
        match self.read_u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            n => Err(CodecError::unknown_variant("bool", n)),
        }
    }

    /// Read a `u64` length prefix and check it against the bytes left, so a
    /// corrupt prefix fails here instead of allocating.
    fn read_len(&mut self, field: &'static str, min_item_width: usize) -> Result<usize, CodecError> {
        let len = self.read_u64(field)?;
        let needed = usize::try_from(len)
            .ok()
            .and_then(|n| n.checked_mul(min_item_width.max(1)))
            .ok_or(CodecError::BufferTooShort {
                structure: self.structure,
                field,
                offset: self.pos,
                needed: usize::MAX,
                available: self.remaining(),
            })?;
        self.ensure(field, needed)?;
        Ok(needed / min_item_width.max(1))
    }

    /// Bytes prefixed by a `u64` length.
    pub fn read_len_prefixed(&mut self, field: &'static str) -> Result<&'a [u8], CodecError> {
        let len = self.read_len(field, 1)?;
        self.read_bytes(field, len)
    }

    /// UTF-8 text prefixed by a `u64` length.
    pub fn read_string(&mut self, field: &'static str) -> Result<String, CodecError> {
        let bytes = self.read_len_prefixed(field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 {
            structure: self.structure,
            field,
        })
    }

    /// A `u64`-length-prefixed sequence whose items are at least
    /// `min_item_width` bytes each.
    pub fn read_vec<T>(
        &mut self,
        field: &'static str,
        min_item_width: usize,
        mut read_item: impl FnMut(&mut Self) -> Result<T, CodecError>,
    ) -> Result<Vec<T>, CodecError> {
        let len = self.read_len(field, min_item_width)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(read_item(self)?);
        }
        Ok(items)
    }

    /// A 1-byte presence tag followed by the payload only when present.
    ///
    /// Consumes exactly 1 byte when absent and `1 + payload` when present.
    pub fn read_option<T>(
        &mut self,
        field: &'static str,
        read_some: impl FnOnce(&mut Self) -> Result<T, CodecError>,
    ) -> Result<Option<T>, CodecError> {
        match self.read_u8(field)? {
            0 => Ok(None),
            1 => read_some(self).map(Some),
            n => Err(CodecError::unknown_variant("Option", n)),
        }
    }

    /// SPL token `COption`: a 4-byte tag followed by a payload that is always
    /// present on the wire, zeroed when the tag says none.
    pub fn read_coption<T>(
        &mut self,
        field: &'static str,
        read_payload: impl FnOnce(&mut Self) -> Result<T, CodecError>,
    ) -> Result<Option<T>, CodecError> {
        let tag = self.read_u32(field)?;
        let payload = read_payload(self)?;
        match tag {
            0 => Ok(None),
            1 => Ok(Some(payload)),
            n => Err(CodecError::unknown_variant("COption", n)),
        }
    }

    pub fn read<T: Codec>(&mut self, field: &'static str) -> Result<T, CodecError> {
        T::decode(self, field)
    }

    /// Assert the cursor sits where the layout table places `field`.
    ///
    /// A mismatch means the decoder and the table disagree, which is a bug in
    /// this crate rather than bad input.
    pub fn expect_field(&self, field: Field) {
        debug_assert_eq!(
            self.consumed(),
            field.offset,
            "{}: cursor out of step with layout at {}",
            self.structure,
            field.name
        );
    }

    /// Read `field` from the layout table, checking the cursor position and
    /// that exactly `field.width` bytes were consumed.
    pub fn read_field<T: Codec>(&mut self, field: Field) -> Result<T, CodecError> {
        self.expect_field(field);
        let value = T::decode(self, field.name)?;
        debug_assert_eq!(
            self.consumed(),
            field.end(),
            "{}: {} decoded to the wrong width",
            self.structure,
            field.name
        );
        Ok(value)
    }

    /// Decode an embedded structure at the current position; the parent cursor
    /// advances by whatever the nested decoder consumed.
    pub fn nested<T>(
        &mut self,
        structure: &'static str,
        decode: impl FnOnce(&mut Reader<'a>) -> Result<T, CodecError>,
    ) -> Result<T, CodecError> {
        let mut child = Reader::at(structure, self.data, self.pos);
        let value = decode(&mut child)?;
        self.pos = child.pos;
        Ok(value)
    }
}
