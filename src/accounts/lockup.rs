use crate::address::Address;
use crate::codec::{Codec, Reader, Writer};
use crate::error::CodecError;
use serde::Serialize;

crate::account_layout! {
    /// Stake lockup: 48 bytes, embedded in stake accounts and stake pools.
    pub struct LockupLayout {
        UNIX_TIMESTAMP: 8,
        EPOCH: 8,
        CUSTODIAN: 32,
    }
}

/// Withdrawal restriction on a stake account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lockup {
    /// Unix timestamp until which the stake is locked.
    pub unix_timestamp: i64,
    /// Epoch until which the stake is locked.
    pub epoch: u64,
    /// Custodian who can modify or bypass the lockup.
    #[serde(with = "crate::address::serde_base58")]
    pub custodian: Address,
}

impl Lockup {
    /// Decode a lockup embedded at `offset`, returning it with the bytes consumed.
    pub fn decode_at(data: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let mut reader = Reader::at("Lockup", data, offset);
        let lockup = Self::decode(&mut reader, "lockup")?;
        Ok((lockup, reader.consumed()))
    }

    /// Whether the lockup still applies at the given clock, unless signed for
    /// by `custodian`.
    pub fn is_in_force(&self, unix_timestamp: i64, epoch: u64, custodian: Option<&Address>) -> bool {
        if custodian == Some(&self.custodian) {
            return false;
        }
        self.unix_timestamp > unix_timestamp || self.epoch > epoch
    }
}

impl Codec for Lockup {
    fn encoded_len(&self) -> usize {
        LockupLayout::LEN
    }

    fn encode(&self, writer: &mut Writer) {
        writer
            .write_i64(self.unix_timestamp)
            .write_u64(self.epoch)
            .write_address(&self.custodian);
    }

    fn decode(reader: &mut Reader<'_>, _field: &'static str) -> Result<Self, CodecError> {
        reader.nested("Lockup", |r| {
            Ok(Lockup {
                unix_timestamp: r.read_field(LockupLayout::UNIX_TIMESTAMP)?,
                epoch: r.read_field(LockupLayout::EPOCH)?,
                custodian: r.read_field(LockupLayout::CUSTODIAN)?,
            })
        })
    }
}
