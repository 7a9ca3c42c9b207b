//! System program encoders and decoder.
//!
//! Payloads open with a `u32` variant index. Seeded variants carry the seed
//! as a `u64` length and its UTF-8 bytes, capped at 32 bytes before encoding.
//! Nonce encoders take the sysvar ids from [`ProgramAddresses`], so the
//! account lists match whatever cluster configuration the caller passes.

use super::{AccountReference, Discriminator, Instruction};
use crate::address::Address;
use crate::codec::Reader;
use crate::config::ProgramAddresses;
use crate::error::CodecError;

/// Longest seed the runtime accepts for `*WithSeed` addresses.
pub const MAX_SEED_LEN: usize = 32;

/// Size of a nonce account.
pub const NONCE_ACCOUNT_SPACE: u64 = 80;

/// Decoded or to-be-encoded System Program instruction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemInstruction {
    /// Accounts: [funding_account, new_account]
    CreateAccount {
        lamports: u64,
        space: u64,
        owner: Address,
    },

    /// Accounts: [assigned_account]
    Assign { owner: Address },

    /// Accounts: [from, to]
    Transfer { lamports: u64 },

    /// Accounts: [funding_account, created_account, base_account (if not the funder)]
    CreateAccountWithSeed {
        base: Address,
        seed: String,
        lamports: u64,
        space: u64,
        owner: Address,
    },

    /// Accounts: [nonce_account, recent_blockhashes_sysvar, nonce_authority]
    AdvanceNonceAccount,

    /// Accounts: [nonce_account, to_account, recent_blockhashes_sysvar, rent_sysvar, nonce_authority]
    WithdrawNonceAccount { lamports: u64 },

    /// Accounts: [nonce_account, recent_blockhashes_sysvar, rent_sysvar]
    InitializeNonceAccount { authorized: Address },

    /// Accounts: [nonce_account, nonce_authority]
    AuthorizeNonceAccount { authorized: Address },

    /// Accounts: [new_account]
    Allocate { space: u64 },

    /// Accounts: [allocated_account, base_account]
    AllocateWithSeed {
        base: Address,
        seed: String,
        space: u64,
        owner: Address,
    },

    /// Accounts: [assigned_account, base_account]
    AssignWithSeed {
        base: Address,
        seed: String,
        owner: Address,
    },

    /// Accounts: [from_account, base_account, to_account]
    TransferWithSeed {
        lamports: u64,
        from_seed: String,
        from_owner: Address,
    },

    /// Accounts: [nonce_account]
    UpgradeNonceAccount,
}

impl SystemInstruction {
    pub fn discriminator(&self) -> Discriminator {
        Discriminator::U32(match self {
            Self::CreateAccount { .. } => 0,
            Self::Assign { .. } => 1,
            Self::Transfer { .. } => 2,
            Self::CreateAccountWithSeed { .. } => 3,
            Self::AdvanceNonceAccount => 4,
            Self::WithdrawNonceAccount { .. } => 5,
            Self::InitializeNonceAccount { .. } => 6,
            Self::AuthorizeNonceAccount { .. } => 7,
            Self::Allocate { .. } => 8,
            Self::AllocateWithSeed { .. } => 9,
            Self::AssignWithSeed { .. } => 10,
            Self::TransferWithSeed { .. } => 11,
            Self::UpgradeNonceAccount => 12,
        })
    }

    /// Get the string representation of this instruction type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateAccount { .. } => "CreateAccount",
            Self::Assign { .. } => "Assign",
            Self::Transfer { .. } => "Transfer",
            Self::CreateAccountWithSeed { .. } => "CreateAccountWithSeed",
            Self::AdvanceNonceAccount => "AdvanceNonceAccount",
            Self::WithdrawNonceAccount { .. } => "WithdrawNonceAccount",
            Self::InitializeNonceAccount { .. } => "InitializeNonceAccount",
            Self::AuthorizeNonceAccount { .. } => "AuthorizeNonceAccount",
            Self::Allocate { .. } => "Allocate",
            Self::AllocateWithSeed { .. } => "AllocateWithSeed",
            Self::AssignWithSeed { .. } => "AssignWithSeed",
            Self::TransferWithSeed { .. } => "TransferWithSeed",
            Self::UpgradeNonceAccount => "UpgradeNonceAccount",
        }
    }

    fn payload_len(&self) -> usize {
        let seed_len = |seed: &str| 8 + seed.len();
        match self {
            Self::CreateAccount { .. } => 8 + 8 + 32,
            Self::Assign { .. } => 32,
            Self::Transfer { .. } => 8,
            Self::CreateAccountWithSeed { seed, .. } => 32 + seed_len(seed) + 8 + 8 + 32,
            Self::AdvanceNonceAccount | Self::UpgradeNonceAccount => 0,
            Self::WithdrawNonceAccount { .. } => 8,
            Self::InitializeNonceAccount { .. } | Self::AuthorizeNonceAccount { .. } => 32,
            Self::Allocate { .. } => 8,
            Self::AllocateWithSeed { seed, .. } => 32 + seed_len(seed) + 8 + 32,
            Self::AssignWithSeed { seed, .. } => 32 + seed_len(seed) + 32,
            Self::TransferWithSeed { from_seed, .. } => 8 + seed_len(from_seed) + 32,
        }
    }

    /// Serialize into instruction data.
    pub fn to_data(&self) -> Result<Vec<u8>, CodecError> {
        let mut w = Instruction::payload(self.discriminator(), self.payload_len());
        match self {
            Self::CreateAccount {
                lamports,
                space,
                owner,
            } => {
                w.write_u64(*lamports).write_u64(*space).write_address(owner);
            }
            Self::Assign { owner } => {
                w.write_address(owner);
            }
            Self::Transfer { lamports } | Self::WithdrawNonceAccount { lamports } => {
                w.write_u64(*lamports);
            }
            Self::CreateAccountWithSeed {
                base,
                seed,
                lamports,
                space,
                owner,
            } => {
                w.write_address(base)
                    .write_string(seed)
                    .write_u64(*lamports)
                    .write_u64(*space)
                    .write_address(owner);
            }
            Self::AdvanceNonceAccount | Self::UpgradeNonceAccount => {}
            Self::InitializeNonceAccount { authorized }
            | Self::AuthorizeNonceAccount { authorized } => {
                w.write_address(authorized);
            }
            Self::Allocate { space } => {
                w.write_u64(*space);
            }
            Self::AllocateWithSeed {
                base,
                seed,
                space,
                owner,
            } => {
                w.write_address(base)
                    .write_string(seed)
                    .write_u64(*space)
                    .write_address(owner);
            }
            Self::AssignWithSeed { base, seed, owner } => {
                w.write_address(base).write_string(seed).write_address(owner);
            }
            Self::TransferWithSeed {
                lamports,
                from_seed,
                from_owner,
            } => {
                w.write_u64(*lamports)
                    .write_string(from_seed)
                    .write_address(from_owner);
            }
        }
        w.finish()
    }

    /// Decode a System Program instruction from raw data.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new("SystemInstruction", data);
        let discriminator = r.read_u32("discriminator")?;

        let instruction = match discriminator {
            0 => Self::CreateAccount {
                lamports: r.read_u64("lamports")?,
                space: r.read_u64("space")?,
                owner: r.read_address("owner")?,
            },
            1 => Self::Assign {
                owner: r.read_address("owner")?,
            },
            2 => Self::Transfer {
                lamports: r.read_u64("lamports")?,
            },
            3 => Self::CreateAccountWithSeed {
                base: r.read_address("base")?,
                seed: r.read_string("seed")?,
                lamports: r.read_u64("lamports")?,
                space: r.read_u64("space")?,
                owner: r.read_address("owner")?,
            },
            4 => Self::AdvanceNonceAccount,
            5 => Self::WithdrawNonceAccount {
                lamports: r.read_u64("lamports")?,
            },
            6 => Self::InitializeNonceAccount {
                authorized: r.read_address("authorized")?,
            },
            7 => Self::AuthorizeNonceAccount {
                authorized: r.read_address("authorized")?,
            },
            8 => Self::Allocate {
                space: r.read_u64("space")?,
            },
            9 => Self::AllocateWithSeed {
                base: r.read_address("base")?,
                seed: r.read_string("seed")?,
                space: r.read_u64("space")?,
                owner: r.read_address("owner")?,
            },
            10 => Self::AssignWithSeed {
                base: r.read_address("base")?,
                seed: r.read_string("seed")?,
                owner: r.read_address("owner")?,
            },
            11 => Self::TransferWithSeed {
                lamports: r.read_u64("lamports")?,
                from_seed: r.read_string("from_seed")?,
                from_owner: r.read_address("from_owner")?,
            },
            12 => Self::UpgradeNonceAccount,
            n => return Err(CodecError::unknown_variant("SystemInstruction", n)),
        };
        Ok(instruction)
    }
}

pub(crate) fn check_seed(seed: &str) -> Result<(), CodecError> {
    if seed.len() > MAX_SEED_LEN {
        return Err(CodecError::illegal_argument(format!(
            "seed is {} bytes, max {}",
            seed.len(),
            MAX_SEED_LEN
        )));
    }
    Ok(())
}

fn system_ix(
    programs: &ProgramAddresses,
    accounts: Vec<AccountReference>,
    instruction: SystemInstruction,
) -> Result<Instruction, CodecError> {
    Ok(Instruction::new(programs.system_program, accounts, instruction.to_data()?))
}

pub fn create_account(
    programs: &ProgramAddresses,
    from: &Address,
    new_account: &Address,
    lamports: u64,
    space: u64,
    owner: &Address,
) -> Result<Instruction, CodecError> {
    system_ix(
        programs,
        vec![
            AccountReference::writable_signer(*from),
            AccountReference::writable_signer(*new_account),
        ],
        SystemInstruction::CreateAccount {
            lamports,
            space,
            owner: *owner,
        },
    )
}

pub fn assign(
    programs: &ProgramAddresses,
    account: &Address,
    owner: &Address,
) -> Result<Instruction, CodecError> {
    system_ix(
        programs,
        vec![AccountReference::writable_signer(*account)],
        SystemInstruction::Assign { owner: *owner },
    )
}

/// Accounts: `[writable_signer(from), writable(to)]`.
pub fn transfer(
    programs: &ProgramAddresses,
    from: &Address,
    to: &Address,
    lamports: u64,
) -> Result<Instruction, CodecError> {
    system_ix(
        programs,
        vec![
            AccountReference::writable_signer(*from),
            AccountReference::writable(*to),
        ],
        SystemInstruction::Transfer { lamports },
    )
}

/// `to` must already be the address derived from `(base, seed, owner)`.
/// The base account is appended as a signer only when it differs from the
/// funder.
#[allow(clippy::too_many_arguments)]
pub fn create_account_with_seed(
    programs: &ProgramAddresses,
    from: &Address,
    to: &Address,
    base: &Address,
    seed: &str,
    lamports: u64,
    space: u64,
    owner: &Address,
) -> Result<Instruction, CodecError> {
    check_seed(seed)?;
    let mut accounts = vec![
        AccountReference::writable_signer(*from),
        AccountReference::writable(*to),
    ];
    if base != from {
        accounts.push(AccountReference::signer(*base));
    }
    system_ix(
        programs,
        accounts,
        SystemInstruction::CreateAccountWithSeed {
            base: *base,
            seed: seed.to_string(),
            lamports,
            space,
            owner: *owner,
        },
    )
}

pub fn advance_nonce_account(
    programs: &ProgramAddresses,
    nonce: &Address,
    authority: &Address,
) -> Result<Instruction, CodecError> {
    system_ix(
        programs,
        vec![
            AccountReference::writable(*nonce),
            AccountReference::read_only(programs.sysvar_recent_blockhashes),
            AccountReference::signer(*authority),
        ],
        SystemInstruction::AdvanceNonceAccount,
    )
}

pub fn withdraw_nonce_account(
    programs: &ProgramAddresses,
    nonce: &Address,
    authority: &Address,
    to: &Address,
    lamports: u64,
) -> Result<Instruction, CodecError> {
    system_ix(
        programs,
        vec![
            AccountReference::writable(*nonce),
            AccountReference::writable(*to),
            AccountReference::read_only(programs.sysvar_recent_blockhashes),
            AccountReference::read_only(programs.sysvar_rent),
            AccountReference::signer(*authority),
        ],
        SystemInstruction::WithdrawNonceAccount { lamports },
    )
}

pub fn initialize_nonce_account(
    programs: &ProgramAddresses,
    nonce: &Address,
    authority: &Address,
) -> Result<Instruction, CodecError> {
    system_ix(
        programs,
        vec![
            AccountReference::writable(*nonce),
            AccountReference::read_only(programs.sysvar_recent_blockhashes),
            AccountReference::read_only(programs.sysvar_rent),
        ],
        SystemInstruction::InitializeNonceAccount {
            authorized: *authority,
        },
    )
}

pub fn authorize_nonce_account(
    programs: &ProgramAddresses,
    nonce: &Address,
    authority: &Address,
    new_authority: &Address,
) -> Result<Instruction, CodecError> {
    system_ix(
        programs,
        vec![
            AccountReference::writable(*nonce),
            AccountReference::signer(*authority),
        ],
        SystemInstruction::AuthorizeNonceAccount {
            authorized: *new_authority,
        },
    )
}

/// `CreateAccount` sized for a nonce account followed by
/// `InitializeNonceAccount`.
pub fn create_nonce_account(
    programs: &ProgramAddresses,
    from: &Address,
    nonce: &Address,
    authority: &Address,
    lamports: u64,
) -> Result<Vec<Instruction>, CodecError> {
    Ok(vec![
        create_account(
            programs,
            from,
            nonce,
            lamports,
            NONCE_ACCOUNT_SPACE,
            &programs.system_program,
        )?,
        initialize_nonce_account(programs, nonce, authority)?,
    ])
}

pub fn allocate(
    programs: &ProgramAddresses,
    account: &Address,
    space: u64,
) -> Result<Instruction, CodecError> {
    system_ix(
        programs,
        vec![AccountReference::writable_signer(*account)],
        SystemInstruction::Allocate { space },
    )
}

pub fn allocate_with_seed(
    programs: &ProgramAddresses,
    address: &Address,
    base: &Address,
    seed: &str,
    space: u64,
    owner: &Address,
) -> Result<Instruction, CodecError> {
    check_seed(seed)?;
    system_ix(
        programs,
        vec![
            AccountReference::writable(*address),
            AccountReference::signer(*base),
        ],
        SystemInstruction::AllocateWithSeed {
            base: *base,
            seed: seed.to_string(),
            space,
            owner: *owner,
        },
    )
}

pub fn assign_with_seed(
    programs: &ProgramAddresses,
    address: &Address,
    base: &Address,
    seed: &str,
    owner: &Address,
) -> Result<Instruction, CodecError> {
    check_seed(seed)?;
    system_ix(
        programs,
        vec![
            AccountReference::writable(*address),
            AccountReference::signer(*base),
        ],
        SystemInstruction::AssignWithSeed {
            base: *base,
            seed: seed.to_string(),
            owner: *owner,
        },
    )
}

pub fn transfer_with_seed(
    programs: &ProgramAddresses,
    from: &Address,
    from_base: &Address,
    from_seed: &str,
    from_owner: &Address,
    to: &Address,
    lamports: u64,
) -> Result<Instruction, CodecError> {
    check_seed(from_seed)?;
    system_ix(
        programs,
        vec![
            AccountReference::writable(*from),
            AccountReference::signer(*from_base),
            AccountReference::writable(*to),
        ],
        SystemInstruction::TransferWithSeed {
            lamports,
            from_seed: from_seed.to_string(),
            from_owner: *from_owner,
        },
    )
}

pub fn upgrade_nonce_account(
    programs: &ProgramAddresses,
    nonce: &Address,
) -> Result<Instruction, CodecError> {
    system_ix(
        programs,
        vec![AccountReference::writable(*nonce)],
        SystemInstruction::UpgradeNonceAccount,
    )
}
