//! Address Lookup Table program instructions.
//!
//! # Wire Format
//!
//! 4-byte little-endian discriminator:
//! - 0: CreateLookupTable (recent_slot u64, bump u8)
//! - 1: FreezeLookupTable
//! - 2: ExtendLookupTable (u64-length-prefixed address list)
//! - 3: DeactivateLookupTable
//! - 4: CloseLookupTable

use super::{AccountReference, Discriminator, Instruction};
use crate::address::Address;
use crate::codec::{Codec, Reader};
use crate::config::ProgramAddresses;
use crate::error::CodecError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTableInstruction {
    /// Accounts: [lookup_table, authority, payer, system_program]
    CreateLookupTable { recent_slot: u64, bump_seed: u8 },
    /// Accounts: [lookup_table, authority]
    FreezeLookupTable,
    /// Accounts: [lookup_table, authority, (optional) payer, (optional) system_program]
    ExtendLookupTable { new_addresses: Vec<Address> },
    /// Accounts: [lookup_table, authority]
    DeactivateLookupTable,
    /// Accounts: [lookup_table, authority, recipient]
    CloseLookupTable,
}

impl LookupTableInstruction {
    pub fn discriminator(&self) -> Discriminator {
        Discriminator::U32(match self {
            Self::CreateLookupTable { .. } => 0,
            Self::FreezeLookupTable => 1,
            Self::ExtendLookupTable { .. } => 2,
            Self::DeactivateLookupTable => 3,
            Self::CloseLookupTable => 4,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateLookupTable { .. } => "CreateLookupTable",
            Self::FreezeLookupTable => "FreezeLookupTable",
            Self::ExtendLookupTable { .. } => "ExtendLookupTable",
            Self::DeactivateLookupTable => "DeactivateLookupTable",
            Self::CloseLookupTable => "CloseLookupTable",
        }
    }

    pub fn to_data(&self) -> Result<Vec<u8>, CodecError> {
        let payload_len = match self {
            Self::CreateLookupTable { .. } => 8 + 1,
            Self::ExtendLookupTable { new_addresses } => new_addresses.encoded_len(),
            _ => 0,
        };
        let mut w = Instruction::payload(self.discriminator(), payload_len);
        match self {
            Self::CreateLookupTable {
                recent_slot,
                bump_seed,
            } => {
                w.write_u64(*recent_slot).write_u8(*bump_seed);
            }
            Self::ExtendLookupTable { new_addresses } => {
                w.write(new_addresses);
            }
            Self::FreezeLookupTable | Self::DeactivateLookupTable | Self::CloseLookupTable => {}
        }
        w.finish()
    }

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new("LookupTableInstruction", data);
        match r.read_u32("discriminator")? {
            0 => Ok(Self::CreateLookupTable {
                recent_slot: r.read_u64("recent_slot")?,
                bump_seed: r.read_u8("bump_seed")?,
            }),
            1 => Ok(Self::FreezeLookupTable),
            2 => Ok(Self::ExtendLookupTable {
                new_addresses: r.read("new_addresses")?,
            }),
            3 => Ok(Self::DeactivateLookupTable),
            4 => Ok(Self::CloseLookupTable),
            n => Err(CodecError::unknown_variant("LookupTableInstruction", n)),
        }
    }
}

fn lookup_table_ix(
    programs: &ProgramAddresses,
    accounts: Vec<AccountReference>,
    instruction: LookupTableInstruction,
) -> Result<Instruction, CodecError> {
    Ok(Instruction::new(
        programs.address_lookup_table_program,
        accounts,
        instruction.to_data()?,
    ))
}

/// `lookup_table` and `bump_seed` come from deriving
/// [`crate::derivation::lookup_table_seeds`] under the lookup table program.
pub fn create_lookup_table(
    programs: &ProgramAddresses,
    lookup_table: &Address,
    authority: &Address,
    payer: &Address,
    recent_slot: u64,
    bump_seed: u8,
) -> Result<Instruction, CodecError> {
    lookup_table_ix(
        programs,
        vec![
            AccountReference::writable(*lookup_table),
            AccountReference::read_only(*authority),
            AccountReference::writable_signer(*payer),
            AccountReference::read_only(programs.system_program),
        ],
        LookupTableInstruction::CreateLookupTable {
            recent_slot,
            bump_seed,
        },
    )
}

pub fn freeze_lookup_table(
    programs: &ProgramAddresses,
    lookup_table: &Address,
    authority: &Address,
) -> Result<Instruction, CodecError> {
    lookup_table_ix(
        programs,
        vec![
            AccountReference::writable(*lookup_table),
            AccountReference::signer(*authority),
        ],
        LookupTableInstruction::FreezeLookupTable,
    )
}

/// The payer funds any rent increase; it and the system program are included
/// together or not at all.
pub fn extend_lookup_table(
    programs: &ProgramAddresses,
    lookup_table: &Address,
    authority: &Address,
    payer: Option<&Address>,
    new_addresses: &[Address],
) -> Result<Instruction, CodecError> {
    if new_addresses.is_empty() {
        return Err(CodecError::illegal_argument(
            "extend requires at least one address",
        ));
    }
    let mut accounts = vec![
        AccountReference::writable(*lookup_table),
        AccountReference::signer(*authority),
    ];
    if let Some(payer) = payer {
        accounts.push(AccountReference::writable_signer(*payer));
        accounts.push(AccountReference::read_only(programs.system_program));
    }
    lookup_table_ix(
        programs,
        accounts,
        LookupTableInstruction::ExtendLookupTable {
            new_addresses: new_addresses.to_vec(),
        },
    )
}

pub fn deactivate_lookup_table(
    programs: &ProgramAddresses,
    lookup_table: &Address,
    authority: &Address,
) -> Result<Instruction, CodecError> {
    lookup_table_ix(
        programs,
        vec![
            AccountReference::writable(*lookup_table),
            AccountReference::signer(*authority),
        ],
        LookupTableInstruction::DeactivateLookupTable,
    )
}

pub fn close_lookup_table(
    programs: &ProgramAddresses,
    lookup_table: &Address,
    authority: &Address,
    recipient: &Address,
) -> Result<Instruction, CodecError> {
    lookup_table_ix(
        programs,
        vec![
            AccountReference::writable(*lookup_table),
            AccountReference::signer(*authority),
            AccountReference::writable(*recipient),
        ],
        LookupTableInstruction::CloseLookupTable,
    )
}
