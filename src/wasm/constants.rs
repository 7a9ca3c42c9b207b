//! Program ids, account sizes and address derivation exported via WASM.
//!
//! These let JavaScript reference well-known Solana programs without pulling
//! in @solana/web3.js.

use crate::accounts::{NonceLayout, StakeLayout, TokenAccountLayout};
use crate::address::{Address, AddressExt};
use crate::config::ProgramAddresses;
use crate::derivation::{
    find_associated_token_address, find_lookup_table_address, find_withdraw_authority,
    CurveDeriver,
};
use wasm_bindgen::prelude::*;

const PROGRAMS: ProgramAddresses = ProgramAddresses::mainnet();

#[wasm_bindgen]
pub fn system_program_id() -> String {
    PROGRAMS.system_program.to_string()
}

#[wasm_bindgen]
pub fn stake_program_id() -> String {
    PROGRAMS.stake_program.to_string()
}

#[wasm_bindgen]
pub fn compute_budget_program_id() -> String {
    PROGRAMS.compute_budget_program.to_string()
}

#[wasm_bindgen]
pub fn memo_program_id() -> String {
    PROGRAMS.memo_program.to_string()
}

/// SPL Token program id
#[wasm_bindgen]
pub fn token_program_id() -> String {
    PROGRAMS.token_program.to_string()
}

#[wasm_bindgen]
pub fn token_2022_program_id() -> String {
    PROGRAMS.token_2022_program.to_string()
}

/// Associated Token Account program id
#[wasm_bindgen]
pub fn ata_program_id() -> String {
    PROGRAMS.associated_token_program.to_string()
}

#[wasm_bindgen]
pub fn address_lookup_table_program_id() -> String {
    PROGRAMS.address_lookup_table_program.to_string()
}

/// SPL stake pool program id
#[wasm_bindgen]
pub fn stake_pool_program_id() -> String {
    PROGRAMS.stake_pool_program.to_string()
}

#[wasm_bindgen]
pub fn sysvar_recent_blockhashes() -> String {
    PROGRAMS.sysvar_recent_blockhashes.to_string()
}

/// Stake account space in bytes (200)
#[wasm_bindgen]
pub fn stake_account_space() -> u64 {
    StakeLayout::LEN as u64
}

/// Nonce account space in bytes (80)
#[wasm_bindgen]
pub fn nonce_account_space() -> u64 {
    NonceLayout::LEN as u64
}

/// Token account space in bytes (165)
#[wasm_bindgen]
pub fn token_account_space() -> u64 {
    TokenAccountLayout::LEN as u64
}

/// Derive the Associated Token Account address for a wallet and mint.
///
/// Seeds are `[wallet, token_program, mint]` under the ATA program.
///
/// @param wallet_address - Owner wallet address (base58)
/// @param mint_address - Token mint address (base58)
/// @param token_program_id - Token program ID (base58), Token or Token-2022
/// @returns The derived ATA address (base58)
#[wasm_bindgen]
pub fn get_associated_token_address(
    wallet_address: &str,
    mint_address: &str,
    token_program_id: &str,
) -> Result<String, JsValue> {
    let wallet = Address::from_base58(wallet_address)?;
    let mint = Address::from_base58(mint_address)?;
    let token_program = Address::from_base58(token_program_id)?;
    let derived =
        find_associated_token_address(&CurveDeriver, &PROGRAMS, &wallet, &mint, &token_program)?;
    Ok(derived.address.to_string())
}

/// Derive the stake pool withdraw authority from `[stake_pool, "withdraw"]`.
///
/// @param stake_pool_address - Stake pool address (base58)
/// @returns The derived withdraw authority address (base58)
#[wasm_bindgen]
pub fn find_withdraw_authority_program_address(
    stake_pool_address: &str,
) -> Result<String, JsValue> {
    let stake_pool = Address::from_base58(stake_pool_address)?;
    let derived = find_withdraw_authority(&CurveDeriver, &PROGRAMS, &stake_pool)?;
    Ok(derived.address.to_string())
}

/// Derive a lookup table address from its authority and a recent slot.
#[wasm_bindgen]
pub fn find_lookup_table_program_address(
    authority_address: &str,
    recent_slot: u64,
) -> Result<String, JsValue> {
    let authority = Address::from_base58(authority_address)?;
    let derived = find_lookup_table_address(&CurveDeriver, &PROGRAMS, &authority, recent_slot)?;
    Ok(derived.address.to_string())
}
