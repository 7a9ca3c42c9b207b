use super::StakePoolAccountType;
use crate::address::Address;
use crate::codec::{Reader, TaggedUnion, Writer};
use crate::error::CodecError;
use serde::Serialize;

crate::account_layout! {
    /// Validator list header, including the entry count.
    pub struct ValidatorListLayout {
        ACCOUNT_TYPE: 1,
        MAX_VALIDATORS: 4,
        COUNT: 4,
    }
}

crate::account_layout! {
    /// One validator list entry: 73 bytes.
    pub struct ValidatorStakeInfoLayout {
        ACTIVE_STAKE_LAMPORTS: 8,
        TRANSIENT_STAKE_LAMPORTS: 8,
        LAST_UPDATE_EPOCH: 8,
        TRANSIENT_SEED_SUFFIX: 8,
        UNUSED: 4,
        VALIDATOR_SEED_SUFFIX: 4,
        STATUS: 1,
        VOTE_ACCOUNT_ADDRESS: 32,
    }
}

/// Lifecycle of a validator within a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StakeStatus {
    Active,
    /// Only the transient stake is deactivating.
    DeactivatingTransient,
    ReadyForRemoval,
    /// Only the validator stake is deactivating.
    DeactivatingValidator,
    DeactivatingAll,
}

impl TaggedUnion for StakeStatus {
    const TYPE_NAME: &'static str = "StakeStatus";

    fn ordinal(&self) -> u8 {
        match self {
            StakeStatus::Active => 0,
            StakeStatus::DeactivatingTransient => 1,
            StakeStatus::ReadyForRemoval => 2,
            StakeStatus::DeactivatingValidator => 3,
            StakeStatus::DeactivatingAll => 4,
        }
    }

    fn payload_len(&self) -> usize {
        0
    }

    fn write_payload(&self, _writer: &mut Writer) {}

    fn read_variant(ordinal: u8, _reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        match ordinal {
            0 => Ok(StakeStatus::Active),
            1 => Ok(StakeStatus::DeactivatingTransient),
            2 => Ok(StakeStatus::ReadyForRemoval),
            3 => Ok(StakeStatus::DeactivatingValidator),
            4 => Ok(StakeStatus::DeactivatingAll),
            n => Err(Self::unknown(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorStakeInfo {
    pub active_stake_lamports: u64,
    pub transient_stake_lamports: u64,
    pub last_update_epoch: u64,
    /// Seed suffix of the transient stake account.
    pub transient_seed_suffix: u64,
    /// Seed suffix of the validator stake account; 0 means no suffix.
    pub validator_seed_suffix: u32,
    pub status: StakeStatus,
    #[serde(with = "crate::address::serde_base58")]
    pub vote_account_address: Address,
}

impl ValidatorStakeInfo {
    pub fn decode_at(data: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::at("ValidatorStakeInfo", data, offset);
        let info = Self::read(&mut r)?;
        Ok((info, r.consumed()))
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        r.nested("ValidatorStakeInfo", |r| {
            let active_stake_lamports =
                r.read_field(ValidatorStakeInfoLayout::ACTIVE_STAKE_LAMPORTS)?;
            let transient_stake_lamports =
                r.read_field(ValidatorStakeInfoLayout::TRANSIENT_STAKE_LAMPORTS)?;
            let last_update_epoch = r.read_field(ValidatorStakeInfoLayout::LAST_UPDATE_EPOCH)?;
            let transient_seed_suffix =
                r.read_field(ValidatorStakeInfoLayout::TRANSIENT_SEED_SUFFIX)?;
            r.expect_field(ValidatorStakeInfoLayout::UNUSED);
            r.skip(
                ValidatorStakeInfoLayout::UNUSED.name,
                ValidatorStakeInfoLayout::UNUSED.width,
            )?;
            let validator_seed_suffix =
                r.read_field(ValidatorStakeInfoLayout::VALIDATOR_SEED_SUFFIX)?;
            r.expect_field(ValidatorStakeInfoLayout::STATUS);
            let status = StakeStatus::read(r)?;
            let vote_account_address =
                r.read_field(ValidatorStakeInfoLayout::VOTE_ACCOUNT_ADDRESS)?;
            Ok(ValidatorStakeInfo {
                active_stake_lamports,
                transient_stake_lamports,
                last_update_epoch,
                transient_seed_suffix,
                validator_seed_suffix,
                status,
                vote_account_address,
            })
        })
    }

    /// Lamports the pool holds for this validator, active plus transient.
    pub fn stake_lamports(&self) -> Option<u64> {
        self.active_stake_lamports
            .checked_add(self.transient_stake_lamports)
    }
}

/// Decoded validator list of a stake pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorList {
    #[serde(with = "crate::address::serde_base58::option")]
    pub address: Option<Address>,
    pub account_type: StakePoolAccountType,
    pub max_validators: u32,
    pub validators: Vec<ValidatorStakeInfo>,
}

impl ValidatorList {
    /// Decode a validator list. The account is allocated for
    /// `max_validators` entries; bytes past the last used entry are ignored.
    pub fn decode(data: &[u8], address: Option<Address>) -> Result<Self, CodecError> {
        Self::decode_at(data, 0, address).map(|(list, _)| list)
    }

    pub fn decode_at(
        data: &[u8],
        offset: usize,
        address: Option<Address>,
    ) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::at("ValidatorList", data, offset);
        r.expect_field(ValidatorListLayout::ACCOUNT_TYPE);
        let account_type = StakePoolAccountType::read(&mut r)?;
        let max_validators: u32 = r.read_field(ValidatorListLayout::MAX_VALIDATORS)?;
        let count: u32 = r.read_field(ValidatorListLayout::COUNT)?;
        if count > max_validators {
            return Err(CodecError::CapacityExceeded {
                structure: "ValidatorList",
                count,
                capacity: max_validators,
            });
        }

        let mut validators = Vec::with_capacity(count as usize);
        for _ in 0..count {
            validators.push(ValidatorStakeInfo::read(&mut r)?);
        }
        log::trace!(
            "decoded ValidatorList with {}/{} entries in {} bytes",
            count,
            max_validators,
            r.consumed()
        );
        Ok((
            ValidatorList {
                address,
                account_type,
                max_validators,
                validators,
            },
            r.consumed(),
        ))
    }

    /// Byte offset of entry `index`, for callers slicing a single record.
    pub const fn entry_offset(index: usize) -> usize {
        ValidatorListLayout::LEN + index * ValidatorStakeInfoLayout::LEN
    }

    pub fn find(&self, vote_account_address: &Address) -> Option<&ValidatorStakeInfo> {
        self.validators
            .iter()
            .find(|info| info.vote_account_address == *vote_account_address)
    }

    /// Sum of active and transient stake over all entries.
    pub fn total_stake_lamports(&self) -> Option<u64> {
        self.validators
            .iter()
            .try_fold(0u64, |acc, info| acc.checked_add(info.stake_lamports()?))
    }
}
