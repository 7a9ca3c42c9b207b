//! Account-scan filter descriptors.
//!
//! Offsets come from the same layout tables the decoders read through, so a
//! filter on field F always inspects the bytes the decoder reads for F.

use crate::accounts::{
    NonceLayout, StakeLayout, StakePoolLayout, TokenAccountLayout, ValidatorListLayout,
};
use crate::address::Address;
use crate::error::CodecError;
use crate::layout::Field;
use serde::Serialize;

/// Largest comparand an RPC node accepts.
pub const MAX_MEMCMP_BYTES: usize = 128;

/// Server-side predicate on raw account data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountFilter {
    /// Exact total length of the account data.
    DataSize(u64),
    Memcmp(MemcmpFilter),
}

/// Exact match of `bytes` at `offset`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "EncodedMemcmp")]
pub struct MemcmpFilter {
    offset: usize,
    bytes: Vec<u8>,
}

/// Wire form of [`MemcmpFilter`]: base-58 comparand.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EncodedMemcmp {
    offset: usize,
    bytes: String,
    encoding: &'static str,
}

impl From<MemcmpFilter> for EncodedMemcmp {
    fn from(filter: MemcmpFilter) -> Self {
        EncodedMemcmp {
            offset: filter.offset,
            bytes: bs58::encode(&filter.bytes).into_string(),
            encoding: "base58",
        }
    }
}

impl MemcmpFilter {
    /// Compare `bytes` at a raw offset.
    pub fn new(offset: usize, bytes: Vec<u8>) -> Result<Self, CodecError> {
        if bytes.is_empty() {
            return Err(CodecError::illegal_argument("memcmp comparand is empty"));
        }
        if bytes.len() > MAX_MEMCMP_BYTES {
            return Err(CodecError::illegal_argument(format!(
                "memcmp comparand of {} bytes exceeds {}",
                bytes.len(),
                MAX_MEMCMP_BYTES
            )));
        }
        Ok(MemcmpFilter { offset, bytes })
    }

    /// Compare a prefix of `field`; the comparand may not run past the field.
    pub fn for_field(field: Field, bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() > field.width {
            return Err(CodecError::illegal_argument(format!(
                "{} is {} bytes, comparand is {}",
                field.name,
                field.width,
                bytes.len()
            )));
        }
        Self::new(field.offset, bytes.to_vec())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn base58_bytes(&self) -> String {
        bs58::encode(&self.bytes).into_string()
    }

    /// Whether `data` holds the comparand at the filter's offset.
    pub fn bytes_match(&self, data: &[u8]) -> bool {
        self.offset
            .checked_add(self.bytes.len())
            .and_then(|end| data.get(self.offset..end))
            .is_some_and(|window| window == self.bytes.as_slice())
    }
}

impl AccountFilter {
    pub fn data_size(len: usize) -> Self {
        AccountFilter::DataSize(len as u64)
    }

    pub fn memcmp(field: Field, bytes: &[u8]) -> Result<Self, CodecError> {
        MemcmpFilter::for_field(field, bytes).map(AccountFilter::Memcmp)
    }

    /// Memcmp on a full address field.
    pub fn address(field: Field, address: &Address) -> Result<Self, CodecError> {
        Self::memcmp(field, address.as_ref())
    }

    /// Evaluate the filter locally.
    pub fn allows(&self, data: &[u8]) -> bool {
        match self {
            AccountFilter::DataSize(len) => data.len() as u64 == *len,
            AccountFilter::Memcmp(filter) => filter.bytes_match(data),
        }
    }
}

/// Whether `data` passes every filter.
pub fn allows_all(filters: &[AccountFilter], data: &[u8]) -> bool {
    filters.iter().all(|filter| filter.allows(data))
}

fn sized_address_filter(
    len: usize,
    field: Field,
    address: &Address,
) -> Result<Vec<AccountFilter>, CodecError> {
    Ok(vec![
        AccountFilter::data_size(len),
        AccountFilter::address(field, address)?,
    ])
}

pub fn stake_accounts_by_staker(staker: &Address) -> Result<Vec<AccountFilter>, CodecError> {
    sized_address_filter(StakeLayout::LEN, StakeLayout::STAKER, staker)
}

pub fn stake_accounts_by_withdrawer(
    withdrawer: &Address,
) -> Result<Vec<AccountFilter>, CodecError> {
    sized_address_filter(StakeLayout::LEN, StakeLayout::WITHDRAWER, withdrawer)
}

/// Matches delegations to `voter`; undelegated accounts hold zeroes there.
pub fn stake_accounts_by_voter(voter: &Address) -> Result<Vec<AccountFilter>, CodecError> {
    sized_address_filter(StakeLayout::LEN, StakeLayout::VOTER, voter)
}

pub fn token_accounts_by_owner(owner: &Address) -> Result<Vec<AccountFilter>, CodecError> {
    sized_address_filter(TokenAccountLayout::LEN, TokenAccountLayout::OWNER, owner)
}

pub fn token_accounts_by_mint(mint: &Address) -> Result<Vec<AccountFilter>, CodecError> {
    sized_address_filter(TokenAccountLayout::LEN, TokenAccountLayout::MINT, mint)
}

pub fn nonce_accounts_by_authority(
    authority: &Address,
) -> Result<Vec<AccountFilter>, CodecError> {
    sized_address_filter(NonceLayout::LEN, NonceLayout::AUTHORITY, authority)
}

/// Stake pools are allocated at their maximum size, so they are matched by
/// account type instead of length.
pub fn stake_pools_by_manager(manager: &Address) -> Result<Vec<AccountFilter>, CodecError> {
    Ok(vec![
        AccountFilter::memcmp(StakePoolLayout::ACCOUNT_TYPE, &[1])?,
        AccountFilter::address(StakePoolLayout::MANAGER, manager)?,
    ])
}

pub fn stake_pools_by_mint(pool_mint: &Address) -> Result<Vec<AccountFilter>, CodecError> {
    Ok(vec![
        AccountFilter::memcmp(StakePoolLayout::ACCOUNT_TYPE, &[1])?,
        AccountFilter::address(StakePoolLayout::POOL_MINT, pool_mint)?,
    ])
}

pub fn validator_lists() -> Result<Vec<AccountFilter>, CodecError> {
    Ok(vec![AccountFilter::memcmp(
        ValidatorListLayout::ACCOUNT_TYPE,
        &[2],
    )?])
}
