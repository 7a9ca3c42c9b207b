//! Primitive and tagged-union codecs shared by every encoder and decoder.

pub mod primitive;
mod reader;
mod tagged;
mod writer;

pub use reader::Reader;
pub use tagged::TaggedUnion;
pub use writer::Writer;

use crate::address::{Address, ADDRESS_BYTES};
use crate::error::CodecError;

/// A value with a fixed wire representation.
pub trait Codec: Sized {
    /// Bytes this value occupies when encoded.
    fn encoded_len(&self) -> usize;

    fn encode(&self, writer: &mut Writer);

    fn decode(reader: &mut Reader<'_>, field: &'static str) -> Result<Self, CodecError>;
}

macro_rules! int_codec {
    ($ty:ty, $width:expr, $write:ident, $read:ident) => {
        impl Codec for $ty {
            fn encoded_len(&self) -> usize {
                $width
            }

            fn encode(&self, writer: &mut Writer) {
                writer.$write(*self);
            }

            fn decode(reader: &mut Reader<'_>, field: &'static str) -> Result<Self, CodecError> {
                reader.$read(field)
            }
        }
    };
}

int_codec!(u8, 1, write_u8, read_u8);
int_codec!(u16, 2, write_u16, read_u16);
int_codec!(u32, 4, write_u32, read_u32);
int_codec!(u64, 8, write_u64, read_u64);
int_codec!(i64, 8, write_i64, read_i64);
int_codec!(f64, 8, write_f64, read_f64);
int_codec!(bool, 1, write_bool, read_bool);

impl Codec for Address {
    fn encoded_len(&self) -> usize {
        ADDRESS_BYTES
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_address(self);
    }

    fn decode(reader: &mut Reader<'_>, field: &'static str) -> Result<Self, CodecError> {
        reader.read_address(field)
    }
}

impl Codec for String {
    fn encoded_len(&self) -> usize {
        8 + self.len()
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_string(self);
    }

    fn decode(reader: &mut Reader<'_>, field: &'static str) -> Result<Self, CodecError> {
        reader.read_string(field)
    }
}

impl<T: Codec> Codec for Option<T> {
    fn encoded_len(&self) -> usize {
        1 + self.as_ref().map_or(0, |v| v.encoded_len())
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_option(self.as_ref(), |w, v| v.encode(w));
    }

    fn decode(reader: &mut Reader<'_>, field: &'static str) -> Result<Self, CodecError> {
        reader.read_option(field, |r| T::decode(r, field))
    }
}

impl Codec for Vec<Address> {
    fn encoded_len(&self) -> usize {
        8 + self.len() * ADDRESS_BYTES
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_u64(self.len() as u64);
        for address in self {
            writer.write_address(address);
        }
    }

    fn decode(reader: &mut Reader<'_>, field: &'static str) -> Result<Self, CodecError> {
        reader.read_vec(field, ADDRESS_BYTES, |r| r.read_address(field))
    }
}

/// Serialize a value into a fresh, exactly-sized buffer.
pub fn to_bytes<T: Codec>(value: &T) -> Result<Vec<u8>, CodecError> {
    let mut writer = Writer::with_len(value.encoded_len());
    value.encode(&mut writer);
    writer.finish()
}
