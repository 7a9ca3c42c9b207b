use super::Codec;
use crate::address::Address;
use crate::error::CodecError;

/// Append-only payload buffer sized up front.
///
/// Encoders compute the exact payload length before writing; `finish` checks
/// the declared length was filled exactly.
#[derive(Debug, Clone)]
pub struct Writer {
    buf: Vec<u8>,
    expected: usize,
}

impl Writer {
    pub fn with_len(expected: usize) -> Self {
        Writer {
            buf: Vec::with_capacity(expected),
            expected,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.write_u8(value as u8)
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_f64(&mut self, value: f64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_address(&mut self, address: &Address) -> &mut Self {
        self.write_bytes(address.as_ref())
    }

    /// Bytes prefixed by their `u64` length.
    pub fn write_len_prefixed(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_u64(bytes.len() as u64).write_bytes(bytes)
    }

    pub fn write_string(&mut self, value: &str) -> &mut Self {
        self.write_len_prefixed(value.as_bytes())
    }

    /// 1-byte presence tag, then the payload only when present.
    pub fn write_option<T>(
        &mut self,
        value: Option<&T>,
        write_some: impl FnOnce(&mut Self, &T),
    ) -> &mut Self {
        match value {
            None => self.write_u8(0),
            Some(inner) => {
                self.write_u8(1);
                write_some(self, inner);
                self
            }
        }
    }

    pub fn write<T: Codec>(&mut self, value: &T) -> &mut Self {
        value.encode(self);
        self
    }

    /// The written bytes, or [`CodecError::LengthMismatch`] when the writes
    /// did not fill the declared length exactly.
    pub fn finish(self) -> Result<Vec<u8>, CodecError> {
        if self.buf.len() != self.expected {
            return Err(CodecError::LengthMismatch {
                structure: "payload",
                expected: self.expected,
                actual: self.buf.len(),
            });
        }
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_little_endian() {
        let mut writer = Writer::with_len(12);
        writer.write_u32(2).write_u64(3000);
        assert_eq!(
            writer.finish().unwrap(),
            vec![0x02, 0, 0, 0, 0xB8, 0x0B, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_option_widths() {
        let mut absent = Writer::with_len(1);
        absent.write_option(None::<&u64>, |w, v| {
            w.write_u64(*v);
        });
        assert_eq!(absent.finish().unwrap(), vec![0]);

        let mut present = Writer::with_len(9);
        present.write_option(Some(&5u64), |w, v| {
            w.write_u64(*v);
        });
        assert_eq!(present.finish().unwrap(), vec![1, 5, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_string_is_u64_length_prefixed() {
        let mut writer = Writer::with_len(11);
        writer.write_string("abc");
        assert_eq!(writer.finish().unwrap(), vec![3, 0, 0, 0, 0, 0, 0, 0, b'a', b'b', b'c']);
    }

    #[test]
    fn test_under_filled_payload_is_rejected() {
        let mut writer = Writer::with_len(8);
        writer.write_u32(2);
        assert_eq!(
            writer.finish(),
            Err(CodecError::LengthMismatch {
                structure: "payload",
                expected: 8,
                actual: 4,
            })
        );
    }

    #[test]
    fn test_over_filled_payload_is_rejected() {
        let mut writer = Writer::with_len(4);
        writer.write_u64(1);
        assert!(matches!(
            writer.finish(),
            Err(CodecError::LengthMismatch {
                expected: 4,
                actual: 8,
                ..
            })
        ));
    }
}
