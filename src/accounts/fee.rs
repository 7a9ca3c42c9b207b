use crate::codec::{Codec, Reader, TaggedUnion, Writer};
use crate::error::CodecError;
use serde::Serialize;

crate::account_layout! {
    /// Stake pool fee ratio: 16 bytes.
    pub struct FeeLayout {
        DENOMINATOR: 8,
        NUMERATOR: 8,
    }
}

/// A fee expressed as `numerator / denominator`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub denominator: u64,
    pub numerator: u64,
}

impl Fee {
    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Fee {
            denominator,
            numerator,
        }
    }

    /// Decode a fee embedded at `offset`, returning it with the bytes consumed.
    pub fn decode_at(data: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let mut reader = Reader::at("Fee", data, offset);
        let fee = Self::decode(&mut reader, "fee")?;
        Ok((fee, reader.consumed()))
    }

    /// Reject ratios the stake pool program would refuse.
    ///
    /// `0/0` is the zero fee; any other zero denominator, or a ratio above one,
    /// is invalid.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.denominator == 0 && self.numerator != 0 {
            return Err(CodecError::illegal_argument(format!(
                "fee {}/0 has a zero denominator",
                self.numerator
            )));
        }
        if self.numerator > self.denominator {
            return Err(CodecError::illegal_argument(format!(
                "fee {}/{} exceeds 100%",
                self.numerator, self.denominator
            )));
        }
        Ok(())
    }

    /// Fee charged on `amount`, rounded up. A zero denominator charges nothing.
    pub fn apply(&self, amount: u64) -> Option<u64> {
        if self.denominator == 0 {
            return Some(0);
        }
        let numerator = (amount as u128).checked_mul(self.numerator as u128)?;
        let denominator = self.denominator as u128;
        let fee = numerator.checked_add(denominator - 1)? / denominator;
        u64::try_from(fee).ok()
    }
}

impl Codec for Fee {
    fn encoded_len(&self) -> usize {
        FeeLayout::LEN
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_u64(self.denominator).write_u64(self.numerator);
    }

    fn decode(reader: &mut Reader<'_>, _field: &'static str) -> Result<Self, CodecError> {
        reader.nested("Fee", |r| {
            Ok(Fee {
                denominator: r.read_field(FeeLayout::DENOMINATOR)?,
                numerator: r.read_field(FeeLayout::NUMERATOR)?,
            })
        })
    }
}

/// A fee change scheduled for a future epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "fee")]
pub enum FutureEpochFee {
    /// Nothing scheduled.
    #[default]
    None,
    /// Takes effect next epoch.
    One(Fee),
    /// Takes effect in two epochs.
    Two(Fee),
}

impl FutureEpochFee {
    pub fn fee(&self) -> Option<&Fee> {
        match self {
            FutureEpochFee::None => None,
            FutureEpochFee::One(fee) | FutureEpochFee::Two(fee) => Some(fee),
        }
    }

    /// Decode a future fee embedded at `offset`, returning it with the bytes
    /// consumed (1 when nothing is scheduled, 17 otherwise).
    pub fn decode_at(data: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let mut reader = Reader::at("FutureEpochFee", data, offset);
        let value = Self::read(&mut reader)?;
        Ok((value, reader.consumed()))
    }
}

impl TaggedUnion for FutureEpochFee {
    const TYPE_NAME: &'static str = "FutureEpochFee";

    fn ordinal(&self) -> u8 {
        match self {
            FutureEpochFee::None => 0,
            FutureEpochFee::One(_) => 1,
            FutureEpochFee::Two(_) => 2,
        }
    }

    fn payload_len(&self) -> usize {
        self.fee().map_or(0, |fee| fee.encoded_len())
    }

    fn write_payload(&self, writer: &mut Writer) {
        if let Some(fee) = self.fee() {
            fee.encode(writer);
        }
    }

    fn read_variant(ordinal: u8, reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        match ordinal {
            0 => Ok(FutureEpochFee::None),
            1 => Ok(FutureEpochFee::One(reader.read("fee")?)),
            2 => Ok(FutureEpochFee::Two(reader.read("fee")?)),
            n => Err(Self::unknown(n)),
        }
    }
}
