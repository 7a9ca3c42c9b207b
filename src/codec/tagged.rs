use super::{Reader, Writer};
use crate::error::CodecError;

/// A closed on-chain enumeration: a 1-byte ordinal followed by a
/// variant-specific payload.
///
/// Implementors keep the ordinal-to-variant mapping in `ordinal` and
/// `read_variant` only; the provided methods handle the tag itself.
pub trait TaggedUnion: Sized {
    /// Name reported in [`CodecError::UnknownVariant`].
    const TYPE_NAME: &'static str;

    fn ordinal(&self) -> u8;

    /// Width of the payload after the ordinal byte.
    fn payload_len(&self) -> usize;

    fn write_payload(&self, writer: &mut Writer);

    /// Decode the payload for `ordinal`; unknown ordinals must fail with
    /// [`TaggedUnion::unknown`].
    fn read_variant(ordinal: u8, reader: &mut Reader<'_>) -> Result<Self, CodecError>;

    /// Total encoded width: ordinal plus payload.
    fn len(&self) -> usize {
        1 + self.payload_len()
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_u8(self.ordinal());
        self.write_payload(writer);
    }

    fn read(reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        let ordinal = reader.read_u8(Self::TYPE_NAME)?;
        Self::read_variant(ordinal, reader)
    }

    fn unknown(ordinal: u8) -> CodecError {
        CodecError::unknown_variant(Self::TYPE_NAME, ordinal)
    }
}
