//! Program-derived address requests.
//!
//! This module only assembles seed lists. The address search itself belongs
//! to an [`AddressDeriver`]; [`CurveDeriver`] is the default, backed by
//! `Pubkey::try_find_program_address`.

use crate::address::Address;
use crate::config::ProgramAddresses;
use crate::error::DerivationError;
use serde::Serialize;

/// Longest single seed accepted by the runtime.
pub const MAX_SEED_LEN: usize = 32;

/// Seeds per derivation, including the bump byte the deriver appends.
pub const MAX_SEEDS: usize = 16;

/// Ordered seed bytes for one derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedList {
    seeds: Vec<Vec<u8>>,
}

impl SeedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw address bytes.
    pub fn address(mut self, address: &Address) -> Self {
        self.seeds.push(address.to_bytes().to_vec());
        self
    }

    /// Literal ASCII tag such as `withdraw`.
    pub fn tag(mut self, tag: &str) -> Self {
        self.seeds.push(tag.as_bytes().to_vec());
        self
    }

    pub fn u64_le(mut self, value: u64) -> Self {
        self.seeds.push(value.to_le_bytes().to_vec());
        self
    }

    pub fn u32_le(mut self, value: u32) -> Self {
        self.seeds.push(value.to_le_bytes().to_vec());
        self
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.seeds.push(bytes.to_vec());
        self
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn as_slices(&self) -> Vec<&[u8]> {
        self.seeds.iter().map(Vec::as_slice).collect()
    }

    /// Check the list against the runtime's seed limits, leaving room for the
    /// bump byte.
    pub fn validate(&self) -> Result<(), DerivationError> {
        if self.seeds.is_empty() {
            return Err(DerivationError::InvalidSeeds("seed list is empty".into()));
        }
        if self.seeds.len() >= MAX_SEEDS {
            return Err(DerivationError::InvalidSeeds(format!(
                "{} seeds leave no room for the bump (max {})",
                self.seeds.len(),
                MAX_SEEDS - 1
            )));
        }
        if let Some((index, seed)) = self
            .seeds
            .iter()
            .enumerate()
            .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
        {
            return Err(DerivationError::InvalidSeeds(format!(
                "seed {} is {} bytes (max {})",
                index,
                seed.len(),
                MAX_SEED_LEN
            )));
        }
        Ok(())
    }
}

/// An address derived from seeds, with the bump that moved it off the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgramDerivedAddress {
    #[serde(with = "crate::address::serde_base58")]
    pub address: Address,
    pub bump: u8,
}

/// Derives program addresses from seed lists.
pub trait AddressDeriver {
    fn find_program_address(
        &self,
        seeds: &SeedList,
        program_id: &Address,
    ) -> Result<ProgramDerivedAddress, DerivationError>;
}

/// Bump search over the ed25519 curve.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveDeriver;

impl AddressDeriver for CurveDeriver {
    fn find_program_address(
        &self,
        seeds: &SeedList,
        program_id: &Address,
    ) -> Result<ProgramDerivedAddress, DerivationError> {
        seeds.validate()?;
        let (address, bump) = Address::try_find_program_address(&seeds.as_slices(), program_id)
            .ok_or_else(|| DerivationError::NoViableBump {
                program_id: program_id.to_string(),
            })?;
        log::debug!(
            "derived {} (bump {}) from {} seeds under {}",
            address,
            bump,
            seeds.len(),
            program_id
        );
        Ok(ProgramDerivedAddress { address, bump })
    }
}

/// `owner | token_program | mint` under the associated token program.
pub fn associated_token_seeds(owner: &Address, mint: &Address, token_program: &Address) -> SeedList {
    SeedList::new()
        .address(owner)
        .address(token_program)
        .address(mint)
}

/// `authority | recent_slot (u64 LE)` under the lookup table program.
pub fn lookup_table_seeds(authority: &Address, recent_slot: u64) -> SeedList {
    SeedList::new().address(authority).u64_le(recent_slot)
}

pub fn withdraw_authority_seeds(stake_pool: &Address) -> SeedList {
    SeedList::new().address(stake_pool).tag("withdraw")
}

pub fn deposit_authority_seeds(stake_pool: &Address) -> SeedList {
    SeedList::new().address(stake_pool).tag("deposit")
}

/// A zero `seed` is the unsuffixed validator stake account.
pub fn validator_stake_seeds(vote_account: &Address, stake_pool: &Address, seed: u32) -> SeedList {
    let seeds = SeedList::new().address(vote_account).address(stake_pool);
    if seed == 0 {
        seeds
    } else {
        seeds.u32_le(seed)
    }
}

pub fn transient_stake_seeds(vote_account: &Address, stake_pool: &Address, seed: u64) -> SeedList {
    SeedList::new()
        .tag("transient")
        .address(vote_account)
        .address(stake_pool)
        .u64_le(seed)
}

pub fn ephemeral_stake_seeds(stake_pool: &Address, seed: u64) -> SeedList {
    SeedList::new()
        .tag("ephemeral")
        .address(stake_pool)
        .u64_le(seed)
}

pub fn find_associated_token_address(
    deriver: &impl AddressDeriver,
    programs: &ProgramAddresses,
    owner: &Address,
    mint: &Address,
    token_program: &Address,
) -> Result<ProgramDerivedAddress, DerivationError> {
    deriver.find_program_address(
        &associated_token_seeds(owner, mint, token_program),
        &programs.associated_token_program,
    )
}

pub fn find_lookup_table_address(
    deriver: &impl AddressDeriver,
    programs: &ProgramAddresses,
    authority: &Address,
    recent_slot: u64,
) -> Result<ProgramDerivedAddress, DerivationError> {
    deriver.find_program_address(
        &lookup_table_seeds(authority, recent_slot),
        &programs.address_lookup_table_program,
    )
}

pub fn find_withdraw_authority(
    deriver: &impl AddressDeriver,
    programs: &ProgramAddresses,
    stake_pool: &Address,
) -> Result<ProgramDerivedAddress, DerivationError> {
    deriver.find_program_address(
        &withdraw_authority_seeds(stake_pool),
        &programs.stake_pool_program,
    )
}
