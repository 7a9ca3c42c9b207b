//! Network program-address table.
//!
//! Encoders never look program ids up globally; they take a
//! [`ProgramAddresses`] so the same code can target mainnet or a test cluster
//! with redeployed programs.

use crate::address::{serde_base58, Address};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use solana_pubkey::pubkey;

pub const SYSTEM_PROGRAM_ID: Address = pubkey!("11111111111111111111111111111111");
pub const STAKE_PROGRAM_ID: Address = pubkey!("Stake11111111111111111111111111111111111111");
pub const STAKE_CONFIG_ID: Address = pubkey!("StakeConfig11111111111111111111111111111111");
pub const TOKEN_PROGRAM_ID: Address = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const TOKEN_2022_PROGRAM_ID: Address = pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Address =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const ADDRESS_LOOKUP_TABLE_PROGRAM_ID: Address =
    pubkey!("AddressLookupTab1e1111111111111111111111111");
pub const COMPUTE_BUDGET_PROGRAM_ID: Address =
    pubkey!("ComputeBudget111111111111111111111111111111");
pub const STAKE_POOL_PROGRAM_ID: Address = pubkey!("SPoo1Ku8WFXoNDMHPsrGSTSG1Y47rzgn41SLUNakuHy");
pub const MEMO_PROGRAM_ID: Address = pubkey!("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr");

pub const SYSVAR_CLOCK_ID: Address = pubkey!("SysvarC1ock11111111111111111111111111111111");
pub const SYSVAR_RENT_ID: Address = pubkey!("SysvarRent111111111111111111111111111111111");
pub const SYSVAR_STAKE_HISTORY_ID: Address =
    pubkey!("SysvarStakeHistory1111111111111111111111111");
pub const SYSVAR_RECENT_BLOCKHASHES_ID: Address =
    pubkey!("SysvarRecentB1ockHashes11111111111111111111");

/// Program and sysvar addresses for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramAddresses {
    #[serde(with = "serde_base58")]
    pub system_program: Address,
    #[serde(with = "serde_base58")]
    pub stake_program: Address,
    #[serde(with = "serde_base58")]
    pub stake_config: Address,
    #[serde(with = "serde_base58")]
    pub token_program: Address,
    #[serde(with = "serde_base58")]
    pub token_2022_program: Address,
    #[serde(with = "serde_base58")]
    pub associated_token_program: Address,
    #[serde(with = "serde_base58")]
    pub address_lookup_table_program: Address,
    #[serde(with = "serde_base58")]
    pub compute_budget_program: Address,
    #[serde(with = "serde_base58")]
    pub stake_pool_program: Address,
    #[serde(with = "serde_base58")]
    pub memo_program: Address,
    #[serde(with = "serde_base58")]
    pub sysvar_clock: Address,
    #[serde(with = "serde_base58")]
    pub sysvar_rent: Address,
    #[serde(with = "serde_base58")]
    pub sysvar_stake_history: Address,
    #[serde(with = "serde_base58")]
    pub sysvar_recent_blockhashes: Address,
}

impl ProgramAddresses {
    /// Canonical addresses shared by mainnet, devnet and testnet.
    pub const fn mainnet() -> Self {
        ProgramAddresses {
            system_program: SYSTEM_PROGRAM_ID,
            stake_program: STAKE_PROGRAM_ID,
            stake_config: STAKE_CONFIG_ID,
            token_program: TOKEN_PROGRAM_ID,
            token_2022_program: TOKEN_2022_PROGRAM_ID,
            associated_token_program: ASSOCIATED_TOKEN_PROGRAM_ID,
            address_lookup_table_program: ADDRESS_LOOKUP_TABLE_PROGRAM_ID,
            compute_budget_program: COMPUTE_BUDGET_PROGRAM_ID,
            stake_pool_program: STAKE_POOL_PROGRAM_ID,
            memo_program: MEMO_PROGRAM_ID,
            sysvar_clock: SYSVAR_CLOCK_ID,
            sysvar_rent: SYSVAR_RENT_ID,
            sysvar_stake_history: SYSVAR_STAKE_HISTORY_ID,
            sysvar_recent_blockhashes: SYSVAR_RECENT_BLOCKHASHES_ID,
        }
    }

    /// Load a table from JSON. Keys that are absent keep their mainnet value.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        serde_json::from_str(json)
            .map_err(|e| CodecError::illegal_argument(format!("program address table: {}", e)))
    }

    /// Whether `program_id` is one of the token programs this table knows.
    pub fn is_token_program(&self, program_id: &Address) -> bool {
        *program_id == self.token_program || *program_id == self.token_2022_program
    }
}

impl Default for ProgramAddresses {
    fn default() -> Self {
        Self::mainnet()
    }
}
