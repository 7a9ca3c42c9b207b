//! Instruction encoders, one module per program.
//!
//! Every encoder is a pure function from typed arguments to an
//! [`Instruction`]: the program reference, the account list in the exact order
//! and with the exact flags the program expects, and the payload bytes
//! (discriminator first, then fields in declared order).

pub mod associated_token;
pub mod compute_budget;
pub mod lookup_table;
pub mod memo;
pub mod stake;
pub mod stake_pool;
pub mod system;
pub mod token;

use crate::address::Address;
use crate::codec::Writer;
use crate::config::ProgramAddresses;
use crate::error::CodecError;
use serde::Serialize;

/// An address plus the capability flags one instruction needs from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReference {
    #[serde(with = "crate::address::serde_base58")]
    pub address: Address,
    pub is_signer: bool,
    pub is_writable: bool,
    pub is_fee_payer: bool,
    pub is_invoked_program: bool,
}

impl AccountReference {
    const fn new(address: Address, is_signer: bool, is_writable: bool) -> Self {
        AccountReference {
            address,
            is_signer,
            is_writable,
            is_fee_payer: false,
            is_invoked_program: false,
        }
    }

    pub const fn read_only(address: Address) -> Self {
        Self::new(address, false, false)
    }

    pub const fn writable(address: Address) -> Self {
        Self::new(address, false, true)
    }

    pub const fn signer(address: Address) -> Self {
        Self::new(address, true, false)
    }

    pub const fn writable_signer(address: Address) -> Self {
        Self::new(address, true, true)
    }

    /// The fee payer always signs and is always debited.
    pub const fn fee_payer(address: Address) -> Self {
        AccountReference {
            is_fee_payer: true,
            ..Self::new(address, true, true)
        }
    }

    pub const fn invoked_program(address: Address) -> Self {
        AccountReference {
            is_invoked_program: true,
            ..Self::new(address, false, false)
        }
    }
}

/// Leading tag bytes selecting the instruction variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discriminator {
    /// One-byte ordinal (token, associated token, compute budget, stake pool).
    U8(u8),
    /// Four-byte little-endian ordinal (system, stake, address lookup table).
    U32(u32),
    /// Eight-byte hash tag used by Anchor programs.
    Anchor([u8; 8]),
}

impl Discriminator {
    pub const fn len(&self) -> usize {
        match self {
            Discriminator::U8(_) => 1,
            Discriminator::U32(_) => 4,
            Discriminator::Anchor(_) => 8,
        }
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn write(&self, writer: &mut Writer) {
        match self {
            Discriminator::U8(tag) => {
                writer.write_u8(*tag);
            }
            Discriminator::U32(tag) => {
                writer.write_u32(*tag);
            }
            Discriminator::Anchor(tag) => {
                writer.write_bytes(tag);
            }
        }
    }

    /// Whether `data` starts with this discriminator.
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            Discriminator::U8(tag) => data.first() == Some(tag),
            Discriminator::U32(tag) => data.get(..4) == Some(&tag.to_le_bytes()[..]),
            Discriminator::Anchor(tag) => data.get(..8) == Some(&tag[..]),
        }
    }
}

/// One program invocation: program, ordered accounts, opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub program_id: AccountReference,
    pub accounts: Vec<AccountReference>,
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new(program_id: Address, accounts: Vec<AccountReference>, data: Vec<u8>) -> Self {
        Instruction {
            program_id: AccountReference::invoked_program(program_id),
            accounts,
            data,
        }
    }

    /// Start a payload of exactly `discriminator.len() + payload_len` bytes
    /// with the discriminator already written.
    pub fn payload(discriminator: Discriminator, payload_len: usize) -> Writer {
        let mut writer = Writer::with_len(discriminator.len() + payload_len);
        discriminator.write(&mut writer);
        writer
    }

    /// Program address.
    pub fn program(&self) -> &Address {
        &self.program_id.address
    }

    /// Convert to the SDK's instruction type for transaction assembly.
    pub fn into_sdk(self) -> solana_sdk::instruction::Instruction {
        use solana_sdk::instruction::{AccountMeta, Instruction as SdkInstruction};
        use solana_sdk::pubkey::Pubkey as SdkPubkey;

        let accounts = self
            .accounts
            .iter()
            .map(|account| AccountMeta {
                pubkey: SdkPubkey::new_from_array(account.address.to_bytes()),
                is_signer: account.is_signer,
                is_writable: account.is_writable,
            })
            .collect();
        SdkInstruction::new_with_bytes(
            SdkPubkey::new_from_array(self.program_id.address.to_bytes()),
            &self.data,
            accounts,
        )
    }
}

/// Name of the instruction `data` encodes for `program_id`.
///
/// Returns `Ok(None)` for programs this crate has no codec for.
pub fn instruction_name(
    programs: &ProgramAddresses,
    program_id: &Address,
    data: &[u8],
) -> Result<Option<&'static str>, CodecError> {
    let name = if *program_id == programs.system_program {
        system::SystemInstruction::decode(data)?.name()
    } else if *program_id == programs.stake_program {
        stake::StakeInstruction::decode(data)?.name()
    } else if *program_id == programs.compute_budget_program {
        compute_budget::ComputeBudgetInstruction::decode(data)?.name()
    } else if programs.is_token_program(program_id) {
        token::TokenInstruction::decode(data)?.name()
    } else if *program_id == programs.associated_token_program {
        associated_token::AssociatedTokenInstruction::decode(data)?.name()
    } else if *program_id == programs.address_lookup_table_program {
        lookup_table::LookupTableInstruction::decode(data)?.name()
    } else if *program_id == programs.stake_pool_program {
        stake_pool::StakePoolInstruction::decode(data)?.name()
    } else if *program_id == programs.memo_program {
        "Memo"
    } else {
        return Ok(None);
    };
    Ok(Some(name))
}
