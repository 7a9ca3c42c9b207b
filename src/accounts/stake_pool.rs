use super::{Fee, FeeLayout, FutureEpochFee, Lockup, LockupLayout};
use crate::address::Address;
use crate::codec::{Reader, TaggedUnion, Writer};
use crate::error::CodecError;
use serde::Serialize;

/// Leading byte of every stake pool program account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StakePoolAccountType {
    Uninitialized,
    StakePool,
    ValidatorList,
}

impl TaggedUnion for StakePoolAccountType {
    const TYPE_NAME: &'static str = "AccountType";

    fn ordinal(&self) -> u8 {
        match self {
            StakePoolAccountType::Uninitialized => 0,
            StakePoolAccountType::StakePool => 1,
            StakePoolAccountType::ValidatorList => 2,
        }
    }

    fn payload_len(&self) -> usize {
        0
    }

    fn write_payload(&self, _writer: &mut Writer) {}

    fn read_variant(ordinal: u8, _reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        match ordinal {
            0 => Ok(StakePoolAccountType::Uninitialized),
            1 => Ok(StakePoolAccountType::StakePool),
            2 => Ok(StakePoolAccountType::ValidatorList),
            n => Err(Self::unknown(n)),
        }
    }
}

crate::account_layout! {
    /// Fixed-offset prefix of a stake pool account.
    ///
    /// Everything after `EPOCH_FEE` shifts with the presence tags of the
    /// optional fields, so only this prefix is addressable by filters.
    pub struct StakePoolLayout {
        ACCOUNT_TYPE: 1,
        MANAGER: 32,
        STAKER: 32,
        STAKE_DEPOSIT_AUTHORITY: 32,
        STAKE_WITHDRAW_BUMP_SEED: 1,
        VALIDATOR_LIST: 32,
        RESERVE_STAKE: 32,
        POOL_MINT: 32,
        MANAGER_FEE_ACCOUNT: 32,
        TOKEN_PROGRAM_ID: 32,
        TOTAL_LAMPORTS: 8,
        POOL_TOKEN_SUPPLY: 8,
        LAST_UPDATE_EPOCH: 8,
        LOCKUP: LockupLayout::LEN,
        EPOCH_FEE: FeeLayout::LEN,
    }
}

/// Decoded stake pool state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakePool {
    #[serde(with = "crate::address::serde_base58::option")]
    pub address: Option<Address>,
    pub account_type: StakePoolAccountType,
    #[serde(with = "crate::address::serde_base58")]
    pub manager: Address,
    #[serde(with = "crate::address::serde_base58")]
    pub staker: Address,
    #[serde(with = "crate::address::serde_base58")]
    pub stake_deposit_authority: Address,
    pub stake_withdraw_bump_seed: u8,
    #[serde(with = "crate::address::serde_base58")]
    pub validator_list: Address,
    #[serde(with = "crate::address::serde_base58")]
    pub reserve_stake: Address,
    #[serde(with = "crate::address::serde_base58")]
    pub pool_mint: Address,
    #[serde(with = "crate::address::serde_base58")]
    pub manager_fee_account: Address,
    #[serde(with = "crate::address::serde_base58")]
    pub token_program_id: Address,
    pub total_lamports: u64,
    pub pool_token_supply: u64,
    pub last_update_epoch: u64,
    pub lockup: Lockup,
    pub epoch_fee: Fee,
    pub next_epoch_fee: FutureEpochFee,
    #[serde(with = "crate::address::serde_base58::option")]
    pub preferred_deposit_validator_vote_address: Option<Address>,
    #[serde(with = "crate::address::serde_base58::option")]
    pub preferred_withdraw_validator_vote_address: Option<Address>,
    pub stake_deposit_fee: Fee,
    pub stake_withdrawal_fee: Fee,
    pub next_stake_withdrawal_fee: FutureEpochFee,
    pub stake_referral_fee: u8,
    #[serde(with = "crate::address::serde_base58::option")]
    pub sol_deposit_authority: Option<Address>,
    pub sol_deposit_fee: Fee,
    pub sol_referral_fee: u8,
    #[serde(with = "crate::address::serde_base58::option")]
    pub sol_withdraw_authority: Option<Address>,
    pub sol_withdrawal_fee: Fee,
    pub next_sol_withdrawal_fee: FutureEpochFee,
    pub last_epoch_pool_token_supply: u64,
    pub last_epoch_total_lamports: u64,
}

impl StakePool {
    /// Decode a stake pool account.
    ///
    /// Pool accounts are allocated at their maximum size, so bytes after the
    /// last field are ignored.
    pub fn decode(data: &[u8], address: Option<Address>) -> Result<Self, CodecError> {
        Self::decode_at(data, 0, address).map(|(pool, _)| pool)
    }

    pub fn decode_at(
        data: &[u8],
        offset: usize,
        address: Option<Address>,
    ) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::at("StakePool", data, offset);

        r.expect_field(StakePoolLayout::ACCOUNT_TYPE);
        let account_type = StakePoolAccountType::read(&mut r)?;
        let manager = r.read_field(StakePoolLayout::MANAGER)?;
        let staker = r.read_field(StakePoolLayout::STAKER)?;
        let stake_deposit_authority = r.read_field(StakePoolLayout::STAKE_DEPOSIT_AUTHORITY)?;
        let stake_withdraw_bump_seed = r.read_field(StakePoolLayout::STAKE_WITHDRAW_BUMP_SEED)?;
        let validator_list = r.read_field(StakePoolLayout::VALIDATOR_LIST)?;
        let reserve_stake = r.read_field(StakePoolLayout::RESERVE_STAKE)?;
        let pool_mint = r.read_field(StakePoolLayout::POOL_MINT)?;
        let manager_fee_account = r.read_field(StakePoolLayout::MANAGER_FEE_ACCOUNT)?;
        let token_program_id = r.read_field(StakePoolLayout::TOKEN_PROGRAM_ID)?;
        let total_lamports = r.read_field(StakePoolLayout::TOTAL_LAMPORTS)?;
        let pool_token_supply = r.read_field(StakePoolLayout::POOL_TOKEN_SUPPLY)?;
        let last_update_epoch = r.read_field(StakePoolLayout::LAST_UPDATE_EPOCH)?;
        let lockup = r.read_field(StakePoolLayout::LOCKUP)?;
        let epoch_fee = r.read_field(StakePoolLayout::EPOCH_FEE)?;

        // Variable tail: offsets from here on depend on the presence tags.
        let pool = StakePool {
            address,
            account_type,
            manager,
            staker,
            stake_deposit_authority,
            stake_withdraw_bump_seed,
            validator_list,
            reserve_stake,
            pool_mint,
            manager_fee_account,
            token_program_id,
            total_lamports,
            pool_token_supply,
            last_update_epoch,
            lockup,
            epoch_fee,
            next_epoch_fee: FutureEpochFee::read(&mut r)?,
            preferred_deposit_validator_vote_address: r
                .read("preferred_deposit_validator_vote_address")?,
            preferred_withdraw_validator_vote_address: r
                .read("preferred_withdraw_validator_vote_address")?,
            stake_deposit_fee: r.read("stake_deposit_fee")?,
            stake_withdrawal_fee: r.read("stake_withdrawal_fee")?,
            next_stake_withdrawal_fee: FutureEpochFee::read(&mut r)?,
            stake_referral_fee: r.read_u8("stake_referral_fee")?,
            sol_deposit_authority: r.read("sol_deposit_authority")?,
            sol_deposit_fee: r.read("sol_deposit_fee")?,
            sol_referral_fee: r.read_u8("sol_referral_fee")?,
            sol_withdraw_authority: r.read("sol_withdraw_authority")?,
            sol_withdrawal_fee: r.read("sol_withdrawal_fee")?,
            next_sol_withdrawal_fee: FutureEpochFee::read(&mut r)?,
            last_epoch_pool_token_supply: r.read_u64("last_epoch_pool_token_supply")?,
            last_epoch_total_lamports: r.read_u64("last_epoch_total_lamports")?,
        };
        log::trace!("decoded StakePool in {} bytes", r.consumed());
        Ok((pool, r.consumed()))
    }

    /// Lamports backing one pool token; 1.0 for a pool with no supply.
    ///
    /// Both fields are unsigned 64-bit and may exceed `i64::MAX`.
    pub fn sol_per_pool_token(&self) -> f64 {
        if self.pool_token_supply == 0 {
            return 1.0;
        }
        self.total_lamports as f64 / self.pool_token_supply as f64
    }

    /// Pool tokens minted for a deposit of `lamports`, before fees.
    pub fn calc_pool_tokens_for_deposit(&self, lamports: u64) -> Option<u64> {
        if self.total_lamports == 0 || self.pool_token_supply == 0 {
            return Some(lamports);
        }
        let tokens = (lamports as u128)
            .checked_mul(self.pool_token_supply as u128)?
            .checked_div(self.total_lamports as u128)?;
        u64::try_from(tokens).ok()
    }

    /// Lamports returned for burning `pool_tokens`, before fees.
    pub fn calc_lamports_withdraw_amount(&self, pool_tokens: u64) -> Option<u64> {
        let numerator = (pool_tokens as u128).checked_mul(self.total_lamports as u128)?;
        let denominator = self.pool_token_supply as u128;
        if denominator == 0 || numerator < denominator {
            return Some(0);
        }
        u64::try_from(numerator / denominator).ok()
    }

    /// Pool tokens a SOL deposit yields after the SOL deposit fee.
    pub fn calc_pool_tokens_for_sol_deposit(&self, lamports: u64) -> Option<u64> {
        let tokens = self.calc_pool_tokens_for_deposit(lamports)?;
        tokens.checked_sub(self.sol_deposit_fee.apply(tokens)?)
    }

    /// Whether SOL deposits need a signature from the pool's deposit authority.
    pub fn is_sol_deposit_gated(&self) -> bool {
        self.sol_deposit_authority.is_some()
    }
}
