//! WASM binding for instruction encoding.
//!
//! Each method returns one instruction object (or an array for multi-step
//! operations) shaped as:
//!
//! ```json
//! {
//!   "programId": { "address": "...", "isInvokedProgram": true, ... },
//!   "accounts": [{ "address": "...", "isSigner": true, "isWritable": true, ... }],
//!   "data": [2, 0, 0, 0, ...]
//! }
//! ```
//!
//! Mainnet program ids are used throughout.

use super::to_js;
use crate::accounts::StakePool;
use crate::address::{Address, AddressExt};
use crate::config::ProgramAddresses;
use crate::derivation::{find_associated_token_address, CurveDeriver};
use crate::instructions::stake_pool::{DepositSolAccounts, StakePoolAccounts, WithdrawSolAccounts};
use crate::instructions::{
    associated_token, compute_budget, memo, stake, stake_pool, system, token,
};
use wasm_bindgen::prelude::*;

const PROGRAMS: ProgramAddresses = ProgramAddresses::mainnet();

fn parse(address: &str) -> Result<Address, JsValue> {
    Ok(Address::from_base58(address)?)
}

/// Namespace for instruction encoders.
#[wasm_bindgen]
pub struct EncoderNamespace;

#[wasm_bindgen]
impl EncoderNamespace {
    /// System transfer of `lamports` from `from` to `to`.
    #[wasm_bindgen]
    pub fn transfer(from: &str, to: &str, lamports: u64) -> Result<JsValue, JsValue> {
        to_js(&system::transfer(&PROGRAMS, &parse(from)?, &parse(to)?, lamports)?)
    }

    #[wasm_bindgen]
    pub fn create_account(
        from: &str,
        new_account: &str,
        lamports: u64,
        space: u64,
        owner: &str,
    ) -> Result<JsValue, JsValue> {
        to_js(&system::create_account(
            &PROGRAMS,
            &parse(from)?,
            &parse(new_account)?,
            lamports,
            space,
            &parse(owner)?,
        )?)
    }

    #[wasm_bindgen]
    pub fn advance_nonce_account(nonce: &str, authority: &str) -> Result<JsValue, JsValue> {
        to_js(&system::advance_nonce_account(
            &PROGRAMS,
            &parse(nonce)?,
            &parse(authority)?,
        )?)
    }

    #[wasm_bindgen]
    pub fn stake_delegate(stake: &str, authority: &str, vote: &str) -> Result<JsValue, JsValue> {
        to_js(&stake::delegate_stake(
            &PROGRAMS,
            &parse(stake)?,
            &parse(authority)?,
            &parse(vote)?,
        )?)
    }

    #[wasm_bindgen]
    pub fn stake_deactivate(stake: &str, authority: &str) -> Result<JsValue, JsValue> {
        to_js(&stake::deactivate(&PROGRAMS, &parse(stake)?, &parse(authority)?)?)
    }

    #[wasm_bindgen]
    pub fn stake_withdraw(
        stake: &str,
        withdrawer: &str,
        to: &str,
        lamports: u64,
    ) -> Result<JsValue, JsValue> {
        to_js(&stake::withdraw(
            &PROGRAMS,
            &parse(stake)?,
            &parse(withdrawer)?,
            &parse(to)?,
            lamports,
            None,
        )?)
    }

    #[wasm_bindgen]
    pub fn set_compute_unit_limit(units: u32) -> Result<JsValue, JsValue> {
        to_js(&compute_budget::set_compute_unit_limit(&PROGRAMS, units)?)
    }

    #[wasm_bindgen]
    pub fn set_compute_unit_price(micro_lamports: u64) -> Result<JsValue, JsValue> {
        to_js(&compute_budget::set_compute_unit_price(&PROGRAMS, micro_lamports)?)
    }

    /// Memo signed by nobody; attach signers at the transaction level.
    #[wasm_bindgen]
    pub fn memo(message: &str) -> Result<JsValue, JsValue> {
        to_js(&memo::memo(&PROGRAMS, message, &[]))
    }

    /// Checked token transfer between two token accounts.
    #[wasm_bindgen]
    pub fn token_transfer_checked(
        source: &str,
        mint: &str,
        destination: &str,
        owner: &str,
        amount: u64,
        decimals: u8,
        token_program_id: &str,
    ) -> Result<JsValue, JsValue> {
        let instruction = token::transfer_checked(
            &PROGRAMS,
            &parse(token_program_id)?,
            &parse(source)?,
            &parse(mint)?,
            &parse(destination)?,
            &parse(owner)?,
            &[],
            amount,
            decimals,
        )?;
        to_js(&instruction)
    }

    /// Create the owner's associated token account if it does not exist yet.
    #[wasm_bindgen]
    pub fn create_associated_token_account_idempotent(
        payer: &str,
        owner: &str,
        mint: &str,
        token_program_id: &str,
    ) -> Result<JsValue, JsValue> {
        let owner = parse(owner)?;
        let mint = parse(mint)?;
        let token_program = parse(token_program_id)?;
        let associated =
            find_associated_token_address(&CurveDeriver, &PROGRAMS, &owner, &mint, &token_program)?;
        let instruction = associated_token::create_idempotent(
            &PROGRAMS,
            &parse(payer)?,
            &associated.address,
            &owner,
            &mint,
            &token_program,
        )?;
        to_js(&instruction)
    }

    /// Deposit SOL into a stake pool.
    ///
    /// @param stake_pool - Stake pool address (base58)
    /// @param stake_pool_data - Raw stake pool account data
    /// @param lamports_from - Funding wallet, signs the deposit
    /// @param pool_tokens_to - Token account receiving pool tokens
    /// @param lamports - Amount to deposit
    #[wasm_bindgen]
    pub fn stake_pool_deposit_sol(
        stake_pool: &str,
        stake_pool_data: &[u8],
        lamports_from: &str,
        pool_tokens_to: &str,
        lamports: u64,
    ) -> Result<JsValue, JsValue> {
        let pool_address = parse(stake_pool)?;
        let pool = StakePool::decode(stake_pool_data, Some(pool_address))?;
        let accounts = StakePoolAccounts::derive(&PROGRAMS, &CurveDeriver, &pool_address, &pool)?;
        let pool_tokens_to = parse(pool_tokens_to)?;
        let user = DepositSolAccounts {
            lamports_from: parse(lamports_from)?,
            pool_tokens_to,
            referrer_pool_tokens: pool_tokens_to,
        };
        to_js(&stake_pool::deposit_sol(&PROGRAMS, &accounts, &user, lamports)?)
    }

    /// Burn pool tokens for SOL from the pool reserve.
    #[wasm_bindgen]
    pub fn stake_pool_withdraw_sol(
        stake_pool: &str,
        stake_pool_data: &[u8],
        user_transfer_authority: &str,
        pool_tokens_from: &str,
        lamports_to: &str,
        pool_tokens: u64,
    ) -> Result<JsValue, JsValue> {
        let pool_address = parse(stake_pool)?;
        let pool = StakePool::decode(stake_pool_data, Some(pool_address))?;
        let accounts = StakePoolAccounts::derive(&PROGRAMS, &CurveDeriver, &pool_address, &pool)?;
        let user = WithdrawSolAccounts {
            user_transfer_authority: parse(user_transfer_authority)?,
            pool_tokens_from: parse(pool_tokens_from)?,
            lamports_to: parse(lamports_to)?,
        };
        to_js(&stake_pool::withdraw_sol(&PROGRAMS, &accounts, &user, pool_tokens)?)
    }
}
