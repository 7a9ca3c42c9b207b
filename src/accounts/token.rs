//! SPL token account and mint decoders.
//!
//! Optional fields use the token program's `COption`: a 4-byte tag and a
//! payload that is always present on the wire. Token-2022 appends extensions
//! after the base layout; those bytes are ignored here.

use crate::address::Address;
use crate::codec::{Reader, TaggedUnion, Writer};
use crate::error::CodecError;
use crate::layout::Field;
use serde::Serialize;

crate::account_layout! {
    /// Token account base layout: 165 bytes.
    pub struct TokenAccountLayout {
        MINT: 32,
        OWNER: 32,
        AMOUNT: 8,
        DELEGATE: 36,
        STATE: 1,
        IS_NATIVE: 12,
        DELEGATED_AMOUNT: 8,
        CLOSE_AUTHORITY: 36,
    }
}

crate::account_layout! {
    /// Mint base layout: 82 bytes.
    pub struct MintLayout {
        MINT_AUTHORITY: 36,
        SUPPLY: 8,
        DECIMALS: 1,
        IS_INITIALIZED: 1,
        FREEZE_AUTHORITY: 36,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenAccountState {
    Uninitialized,
    Initialized,
    Frozen,
}

impl TaggedUnion for TokenAccountState {
    const TYPE_NAME: &'static str = "AccountState";

    fn ordinal(&self) -> u8 {
        match self {
            TokenAccountState::Uninitialized => 0,
            TokenAccountState::Initialized => 1,
            TokenAccountState::Frozen => 2,
        }
    }

    fn payload_len(&self) -> usize {
        0
    }

    fn write_payload(&self, _writer: &mut Writer) {}

    fn read_variant(ordinal: u8, _reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        match ordinal {
            0 => Ok(TokenAccountState::Uninitialized),
            1 => Ok(TokenAccountState::Initialized),
            2 => Ok(TokenAccountState::Frozen),
            n => Err(Self::unknown(n)),
        }
    }
}

fn coption_address(r: &mut Reader<'_>, field: Field) -> Result<Option<Address>, CodecError> {
    r.expect_field(field);
    r.read_coption(field.name, |r| r.read_address(field.name))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccount {
    #[serde(with = "crate::address::serde_base58::option")]
    pub address: Option<Address>,
    #[serde(with = "crate::address::serde_base58")]
    pub mint: Address,
    #[serde(with = "crate::address::serde_base58")]
    pub owner: Address,
    pub amount: u64,
    #[serde(with = "crate::address::serde_base58::option")]
    pub delegate: Option<Address>,
    pub state: TokenAccountState,
    /// Rent-exempt reserve of a wrapped SOL account.
    pub is_native: Option<u64>,
    pub delegated_amount: u64,
    #[serde(with = "crate::address::serde_base58::option")]
    pub close_authority: Option<Address>,
}

impl TokenAccount {
    pub fn decode(data: &[u8], address: Option<Address>) -> Result<Self, CodecError> {
        Self::decode_at(data, 0, address).map(|(account, _)| account)
    }

    pub fn decode_at(
        data: &[u8],
        offset: usize,
        address: Option<Address>,
    ) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::at("TokenAccount", data, offset);
        let mint = r.read_field(TokenAccountLayout::MINT)?;
        let owner = r.read_field(TokenAccountLayout::OWNER)?;
        let amount = r.read_field(TokenAccountLayout::AMOUNT)?;
        let delegate = coption_address(&mut r, TokenAccountLayout::DELEGATE)?;
        r.expect_field(TokenAccountLayout::STATE);
        let state = TokenAccountState::read(&mut r)?;
        r.expect_field(TokenAccountLayout::IS_NATIVE);
        let is_native = r.read_coption(TokenAccountLayout::IS_NATIVE.name, |r| {
            r.read_u64(TokenAccountLayout::IS_NATIVE.name)
        })?;
        let delegated_amount = r.read_field(TokenAccountLayout::DELEGATED_AMOUNT)?;
        let close_authority = coption_address(&mut r, TokenAccountLayout::CLOSE_AUTHORITY)?;
        log::trace!("decoded TokenAccount in {} bytes", r.consumed());
        Ok((
            TokenAccount {
                address,
                mint,
                owner,
                amount,
                delegate,
                state,
                is_native,
                delegated_amount,
                close_authority,
            },
            r.consumed(),
        ))
    }

    pub fn is_frozen(&self) -> bool {
        self.state == TokenAccountState::Frozen
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mint {
    #[serde(with = "crate::address::serde_base58::option")]
    pub address: Option<Address>,
    #[serde(with = "crate::address::serde_base58::option")]
    pub mint_authority: Option<Address>,
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    #[serde(with = "crate::address::serde_base58::option")]
    pub freeze_authority: Option<Address>,
}

impl Mint {
    pub fn decode(data: &[u8], address: Option<Address>) -> Result<Self, CodecError> {
        Self::decode_at(data, 0, address).map(|(mint, _)| mint)
    }

    pub fn decode_at(
        data: &[u8],
        offset: usize,
        address: Option<Address>,
    ) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::at("Mint", data, offset);
        let mint = Mint {
            address,
            mint_authority: coption_address(&mut r, MintLayout::MINT_AUTHORITY)?,
            supply: r.read_field(MintLayout::SUPPLY)?,
            decimals: r.read_field(MintLayout::DECIMALS)?,
            is_initialized: r.read_field(MintLayout::IS_INITIALIZED)?,
            freeze_authority: coption_address(&mut r, MintLayout::FREEZE_AUTHORITY)?,
        };
        log::trace!("decoded Mint in {} bytes", r.consumed());
        Ok((mint, r.consumed()))
    }
}

#[cfg(test)]
pub(crate) mod test_data {
    use super::*;

    pub fn token_account(mint: Address, owner: Address, amount: u64) -> Vec<u8> {
        let mut data = Vec::with_capacity(TokenAccountLayout::LEN);
        data.extend_from_slice(mint.as_ref());
        data.extend_from_slice(owner.as_ref());
        data.extend_from_slice(&amount.to_le_bytes());
        data.extend_from_slice(&[0; 36]);
        data.push(1);
        data.extend_from_slice(&[0; 12]);
        data.extend_from_slice(&0u64.to_le_bytes());
        data.extend_from_slice(&[0; 36]);
        data
    }
}
