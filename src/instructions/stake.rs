//! Stake Program instructions.
//!
//! The Stake Program handles Solana staking operations:
//! - Creating and initializing stake accounts
//! - Delegating stake to validators
//! - Deactivating and withdrawing stake
//!
//! # Wire Format
//!
//! Stake instructions start with a 4-byte little-endian discriminator:
//! - 0: Initialize
//! - 1: Authorize
//! - 2: DelegateStake
//! - 3: Split
//! - 4: Withdraw
//! - 5: Deactivate
//! - 6: SetLockup
//! - 7: Merge
//! - 8: AuthorizeWithSeed
//! - 9: InitializeChecked
//! - 10: AuthorizeChecked
//! - 11: AuthorizeCheckedWithSeed
//! - 12: SetLockupChecked
//! - 13: GetMinimumDelegation
//! - 14: DeactivateDelinquent
//! - 15: Redelegate (deprecated, decode only)
//! - 16: MoveStake
//! - 17: MoveLamports

use super::system::{self, check_seed};
use super::{AccountReference, Discriminator, Instruction};
use crate::accounts::Lockup;
use crate::address::Address;
use crate::codec::{Codec, Reader, Writer};
use crate::config::ProgramAddresses;
use crate::error::CodecError;
use serde::Serialize;

/// Size of a stake account.
pub const STAKE_ACCOUNT_SPACE: u64 = 200;

/// Authorization types for stake accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StakeAuthorize {
    /// Authority to delegate/activate stake.
    Staker,
    /// Authority to withdraw stake.
    Withdrawer,
}

impl StakeAuthorize {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staker => "Staker",
            Self::Withdrawer => "Withdrawer",
        }
    }
}

impl Codec for StakeAuthorize {
    fn encoded_len(&self) -> usize {
        4
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_u32(match self {
            Self::Staker => 0,
            Self::Withdrawer => 1,
        });
    }

    fn decode(reader: &mut Reader<'_>, field: &'static str) -> Result<Self, CodecError> {
        match reader.read_u32(field)? {
            0 => Ok(Self::Staker),
            1 => Ok(Self::Withdrawer),
            n => Err(CodecError::unknown_variant("StakeAuthorize", n)),
        }
    }
}

/// The staker and withdrawer set at initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorized {
    #[serde(with = "crate::address::serde_base58")]
    pub staker: Address,
    #[serde(with = "crate::address::serde_base58")]
    pub withdrawer: Address,
}

impl Authorized {
    /// One key holding both authorities.
    pub fn auto(authority: &Address) -> Self {
        Authorized {
            staker: *authority,
            withdrawer: *authority,
        }
    }
}

/// Lockup changes; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockupArgs {
    pub unix_timestamp: Option<i64>,
    pub epoch: Option<u64>,
    #[serde(with = "crate::address::serde_base58::option")]
    pub custodian: Option<Address>,
}

/// Decoded or to-be-encoded Stake Program instruction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakeInstruction {
    /// Accounts: [stake_account, rent_sysvar]
    Initialize {
        authorized: Authorized,
        lockup: Lockup,
    },

    /// Accounts: [stake_account, clock_sysvar, authority, (optional) lockup_custodian]
    Authorize {
        new_authority: Address,
        stake_authorize: StakeAuthorize,
    },

    /// Accounts: [stake_account, vote_account, clock_sysvar, stake_history_sysvar, config_account, stake_authority]
    DelegateStake,

    /// Accounts: [stake_account, new_stake_account, stake_authority]
    Split { lamports: u64 },

    /// Accounts: [stake_account, to_account, clock_sysvar, stake_history_sysvar, withdraw_authority, (optional) lockup_custodian]
    Withdraw { lamports: u64 },

    /// Accounts: [stake_account, clock_sysvar, stake_authority]
    Deactivate,

    /// Accounts: [stake_account, lockup_authority]
    SetLockup(LockupArgs),

    /// Accounts: [destination_stake, source_stake, clock_sysvar, stake_history_sysvar, stake_authority]
    Merge,

    /// Accounts: [stake_account, authority_base, clock_sysvar, (optional) lockup_custodian]
    AuthorizeWithSeed {
        new_authority: Address,
        stake_authorize: StakeAuthorize,
        authority_seed: String,
        authority_owner: Address,
    },

    /// Accounts: [stake_account, rent_sysvar, staker, withdrawer]
    InitializeChecked,

    /// Accounts: [stake_account, clock_sysvar, authority, new_authority, (optional) lockup_custodian]
    AuthorizeChecked { stake_authorize: StakeAuthorize },

    /// Accounts: [stake_account, authority_base, clock_sysvar, new_authority, (optional) lockup_custodian]
    AuthorizeCheckedWithSeed {
        stake_authorize: StakeAuthorize,
        authority_seed: String,
        authority_owner: Address,
    },

    /// Accounts: [stake_account, lockup_authority, (optional) new_lockup_custodian]
    SetLockupChecked {
        unix_timestamp: Option<i64>,
        epoch: Option<u64>,
    },

    /// Accounts: []
    GetMinimumDelegation,

    /// Accounts: [stake_account, delinquent_vote_account, reference_vote_account]
    DeactivateDelinquent,

    /// Accounts: [stake_account, uninitialized_stake_account, vote_account, config_account, stake_authority]
    Redelegate,

    /// Accounts: [source_stake, destination_stake, stake_authority]
    MoveStake { lamports: u64 },

    /// Accounts: [source_stake, destination_stake, stake_authority]
    MoveLamports { lamports: u64 },
}

impl StakeInstruction {
    pub fn discriminator(&self) -> Discriminator {
        Discriminator::U32(match self {
            Self::Initialize { .. } => 0,
            Self::Authorize { .. } => 1,
            Self::DelegateStake => 2,
            Self::Split { .. } => 3,
            Self::Withdraw { .. } => 4,
            Self::Deactivate => 5,
            Self::SetLockup(_) => 6,
            Self::Merge => 7,
            Self::AuthorizeWithSeed { .. } => 8,
            Self::InitializeChecked => 9,
            Self::AuthorizeChecked { .. } => 10,
            Self::AuthorizeCheckedWithSeed { .. } => 11,
            Self::SetLockupChecked { .. } => 12,
            Self::GetMinimumDelegation => 13,
            Self::DeactivateDelinquent => 14,
            Self::Redelegate => 15,
            Self::MoveStake { .. } => 16,
            Self::MoveLamports { .. } => 17,
        })
    }

    /// Get the string representation of this instruction type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize { .. } => "Initialize",
            Self::Authorize { .. } => "Authorize",
            Self::DelegateStake => "DelegateStake",
            Self::Split { .. } => "Split",
            Self::Withdraw { .. } => "Withdraw",
            Self::Deactivate => "Deactivate",
            Self::SetLockup(_) => "SetLockup",
            Self::Merge => "Merge",
            Self::AuthorizeWithSeed { .. } => "AuthorizeWithSeed",
            Self::InitializeChecked => "InitializeChecked",
            Self::AuthorizeChecked { .. } => "AuthorizeChecked",
            Self::AuthorizeCheckedWithSeed { .. } => "AuthorizeCheckedWithSeed",
            Self::SetLockupChecked { .. } => "SetLockupChecked",
            Self::GetMinimumDelegation => "GetMinimumDelegation",
            Self::DeactivateDelinquent => "DeactivateDelinquent",
            Self::Redelegate => "Redelegate",
            Self::MoveStake { .. } => "MoveStake",
            Self::MoveLamports { .. } => "MoveLamports",
        }
    }

    fn payload_len(&self) -> usize {
        match self {
            Self::Initialize { lockup, .. } => 64 + lockup.encoded_len(),
            Self::Authorize { .. } => 32 + 4,
            Self::Split { .. }
            | Self::Withdraw { .. }
            | Self::MoveStake { .. }
            | Self::MoveLamports { .. } => 8,
            Self::SetLockup(args) => {
                args.unix_timestamp.encoded_len()
                    + args.epoch.encoded_len()
                    + args.custodian.encoded_len()
            }
            Self::AuthorizeWithSeed { authority_seed, .. } => {
                32 + 4 + authority_seed.encoded_len() + 32
            }
            Self::AuthorizeChecked { .. } => 4,
            Self::AuthorizeCheckedWithSeed { authority_seed, .. } => {
                4 + authority_seed.encoded_len() + 32
            }
            Self::SetLockupChecked {
                unix_timestamp,
                epoch,
            } => unix_timestamp.encoded_len() + epoch.encoded_len(),
            Self::DelegateStake
            | Self::Deactivate
            | Self::Merge
            | Self::InitializeChecked
            | Self::GetMinimumDelegation
            | Self::DeactivateDelinquent
            | Self::Redelegate => 0,
        }
    }

    /// Serialize into instruction data.
    pub fn to_data(&self) -> Result<Vec<u8>, CodecError> {
        let mut w = Instruction::payload(self.discriminator(), self.payload_len());
        match self {
            Self::Initialize { authorized, lockup } => {
                w.write_address(&authorized.staker)
                    .write_address(&authorized.withdrawer)
                    .write(lockup);
            }
            Self::Authorize {
                new_authority,
                stake_authorize,
            } => {
                w.write_address(new_authority).write(stake_authorize);
            }
            Self::Split { lamports }
            | Self::Withdraw { lamports }
            | Self::MoveStake { lamports }
            | Self::MoveLamports { lamports } => {
                w.write_u64(*lamports);
            }
            Self::SetLockup(args) => {
                w.write(&args.unix_timestamp)
                    .write(&args.epoch)
                    .write(&args.custodian);
            }
            Self::AuthorizeWithSeed {
                new_authority,
                stake_authorize,
                authority_seed,
                authority_owner,
            } => {
                w.write_address(new_authority)
                    .write(stake_authorize)
                    .write_string(authority_seed)
                    .write_address(authority_owner);
            }
            Self::AuthorizeChecked { stake_authorize } => {
                w.write(stake_authorize);
            }
            Self::AuthorizeCheckedWithSeed {
                stake_authorize,
                authority_seed,
                authority_owner,
            } => {
                w.write(stake_authorize)
                    .write_string(authority_seed)
                    .write_address(authority_owner);
            }
            Self::SetLockupChecked {
                unix_timestamp,
                epoch,
            } => {
                w.write(unix_timestamp).write(epoch);
            }
            Self::DelegateStake
            | Self::Deactivate
            | Self::Merge
            | Self::InitializeChecked
            | Self::GetMinimumDelegation
            | Self::DeactivateDelinquent
            | Self::Redelegate => {}
        }
        w.finish()
    }

    /// Decode a Stake Program instruction from raw data.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new("StakeInstruction", data);
        let discriminator = r.read_u32("discriminator")?;

        let instruction = match discriminator {
            0 => Self::Initialize {
                authorized: Authorized {
                    staker: r.read_address("staker")?,
                    withdrawer: r.read_address("withdrawer")?,
                },
                lockup: r.read("lockup")?,
            },
            1 => Self::Authorize {
                new_authority: r.read_address("new_authority")?,
                stake_authorize: r.read("stake_authorize")?,
            },
            2 => Self::DelegateStake,
            3 => Self::Split {
                lamports: r.read_u64("lamports")?,
            },
            4 => Self::Withdraw {
                lamports: r.read_u64("lamports")?,
            },
            5 => Self::Deactivate,
            6 => Self::SetLockup(LockupArgs {
                unix_timestamp: r.read("unix_timestamp")?,
                epoch: r.read("epoch")?,
                custodian: r.read("custodian")?,
            }),
            7 => Self::Merge,
            8 => Self::AuthorizeWithSeed {
                new_authority: r.read_address("new_authority")?,
                stake_authorize: r.read("stake_authorize")?,
                authority_seed: r.read_string("authority_seed")?,
                authority_owner: r.read_address("authority_owner")?,
            },
            9 => Self::InitializeChecked,
            10 => Self::AuthorizeChecked {
                stake_authorize: r.read("stake_authorize")?,
            },
            11 => Self::AuthorizeCheckedWithSeed {
                stake_authorize: r.read("stake_authorize")?,
                authority_seed: r.read_string("authority_seed")?,
                authority_owner: r.read_address("authority_owner")?,
            },
            12 => Self::SetLockupChecked {
                unix_timestamp: r.read("unix_timestamp")?,
                epoch: r.read("epoch")?,
            },
            13 => Self::GetMinimumDelegation,
            14 => Self::DeactivateDelinquent,
            15 => Self::Redelegate,
            16 => Self::MoveStake {
                lamports: r.read_u64("lamports")?,
            },
            17 => Self::MoveLamports {
                lamports: r.read_u64("lamports")?,
            },
            n => return Err(CodecError::unknown_variant("StakeInstruction", n)),
        };
        Ok(instruction)
    }
}

fn stake_ix(
    programs: &ProgramAddresses,
    accounts: Vec<AccountReference>,
    instruction: StakeInstruction,
) -> Result<Instruction, CodecError> {
    Ok(Instruction::new(programs.stake_program, accounts, instruction.to_data()?))
}

fn push_custodian(accounts: &mut Vec<AccountReference>, custodian: Option<&Address>) {
    if let Some(custodian) = custodian {
        accounts.push(AccountReference::signer(*custodian));
    }
}

pub fn initialize(
    programs: &ProgramAddresses,
    stake: &Address,
    authorized: &Authorized,
    lockup: &Lockup,
) -> Result<Instruction, CodecError> {
    stake_ix(
        programs,
        vec![
            AccountReference::writable(*stake),
            AccountReference::read_only(programs.sysvar_rent),
        ],
        StakeInstruction::Initialize {
            authorized: *authorized,
            lockup: *lockup,
        },
    )
}

/// `CreateAccount` sized and owned for staking, followed by `Initialize`.
pub fn create_account(
    programs: &ProgramAddresses,
    from: &Address,
    stake: &Address,
    authorized: &Authorized,
    lockup: &Lockup,
    lamports: u64,
) -> Result<Vec<Instruction>, CodecError> {
    Ok(vec![
        system::create_account(
            programs,
            from,
            stake,
            lamports,
            STAKE_ACCOUNT_SPACE,
            &programs.stake_program,
        )?,
        initialize(programs, stake, authorized, lockup)?,
    ])
}

pub fn authorize(
    programs: &ProgramAddresses,
    stake: &Address,
    authority: &Address,
    new_authority: &Address,
    stake_authorize: StakeAuthorize,
    custodian: Option<&Address>,
) -> Result<Instruction, CodecError> {
    let mut accounts = vec![
        AccountReference::writable(*stake),
        AccountReference::read_only(programs.sysvar_clock),
        AccountReference::signer(*authority),
    ];
    push_custodian(&mut accounts, custodian);
    stake_ix(
        programs,
        accounts,
        StakeInstruction::Authorize {
            new_authority: *new_authority,
            stake_authorize,
        },
    )
}

pub fn delegate_stake(
    programs: &ProgramAddresses,
    stake: &Address,
    authority: &Address,
    vote: &Address,
) -> Result<Instruction, CodecError> {
    stake_ix(
        programs,
        vec![
            AccountReference::writable(*stake),
            AccountReference::read_only(*vote),
            AccountReference::read_only(programs.sysvar_clock),
            AccountReference::read_only(programs.sysvar_stake_history),
            AccountReference::read_only(programs.stake_config),
            AccountReference::signer(*authority),
        ],
        StakeInstruction::DelegateStake,
    )
}

/// `split_stake` must already exist, be allocated and owned by the stake
/// program.
pub fn split(
    programs: &ProgramAddresses,
    stake: &Address,
    authority: &Address,
    lamports: u64,
    split_stake: &Address,
) -> Result<Instruction, CodecError> {
    stake_ix(
        programs,
        vec![
            AccountReference::writable(*stake),
            AccountReference::writable(*split_stake),
            AccountReference::signer(*authority),
        ],
        StakeInstruction::Split { lamports },
    )
}

pub fn withdraw(
    programs: &ProgramAddresses,
    stake: &Address,
    withdrawer: &Address,
    to: &Address,
    lamports: u64,
    custodian: Option<&Address>,
) -> Result<Instruction, CodecError> {
    let mut accounts = vec![
        AccountReference::writable(*stake),
        AccountReference::writable(*to),
        AccountReference::read_only(programs.sysvar_clock),
        AccountReference::read_only(programs.sysvar_stake_history),
        AccountReference::signer(*withdrawer),
    ];
    push_custodian(&mut accounts, custodian);
    stake_ix(programs, accounts, StakeInstruction::Withdraw { lamports })
}

pub fn deactivate(
    programs: &ProgramAddresses,
    stake: &Address,
    authority: &Address,
) -> Result<Instruction, CodecError> {
    stake_ix(
        programs,
        vec![
            AccountReference::writable(*stake),
            AccountReference::read_only(programs.sysvar_clock),
            AccountReference::signer(*authority),
        ],
        StakeInstruction::Deactivate,
    )
}

/// `authority` is the lockup custodian while the lockup is in force, the
/// withdrawer otherwise.
pub fn set_lockup(
    programs: &ProgramAddresses,
    stake: &Address,
    args: &LockupArgs,
    authority: &Address,
) -> Result<Instruction, CodecError> {
    stake_ix(
        programs,
        vec![
            AccountReference::writable(*stake),
            AccountReference::signer(*authority),
        ],
        StakeInstruction::SetLockup(*args),
    )
}

pub fn merge(
    programs: &ProgramAddresses,
    destination: &Address,
    source: &Address,
    authority: &Address,
) -> Result<Instruction, CodecError> {
    stake_ix(
        programs,
        vec![
            AccountReference::writable(*destination),
            AccountReference::writable(*source),
            AccountReference::read_only(programs.sysvar_clock),
            AccountReference::read_only(programs.sysvar_stake_history),
            AccountReference::signer(*authority),
        ],
        StakeInstruction::Merge,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn authorize_with_seed(
    programs: &ProgramAddresses,
    stake: &Address,
    authority_base: &Address,
    authority_seed: &str,
    authority_owner: &Address,
    new_authority: &Address,
    stake_authorize: StakeAuthorize,
    custodian: Option<&Address>,
) -> Result<Instruction, CodecError> {
    check_seed(authority_seed)?;
    let mut accounts = vec![
        AccountReference::writable(*stake),
        AccountReference::signer(*authority_base),
        AccountReference::read_only(programs.sysvar_clock),
    ];
    push_custodian(&mut accounts, custodian);
    stake_ix(
        programs,
        accounts,
        StakeInstruction::AuthorizeWithSeed {
            new_authority: *new_authority,
            stake_authorize,
            authority_seed: authority_seed.to_string(),
            authority_owner: *authority_owner,
        },
    )
}

/// Like [`initialize`], but both authorities sign and no lockup is set.
pub fn initialize_checked(
    programs: &ProgramAddresses,
    stake: &Address,
    authorized: &Authorized,
) -> Result<Instruction, CodecError> {
    stake_ix(
        programs,
        vec![
            AccountReference::writable(*stake),
            AccountReference::read_only(programs.sysvar_rent),
            AccountReference::read_only(authorized.staker),
            AccountReference::signer(authorized.withdrawer),
        ],
        StakeInstruction::InitializeChecked,
    )
}

pub fn authorize_checked(
    programs: &ProgramAddresses,
    stake: &Address,
    authority: &Address,
    new_authority: &Address,
    stake_authorize: StakeAuthorize,
    custodian: Option<&Address>,
) -> Result<Instruction, CodecError> {
    let mut accounts = vec![
        AccountReference::writable(*stake),
        AccountReference::read_only(programs.sysvar_clock),
        AccountReference::signer(*authority),
        AccountReference::signer(*new_authority),
    ];
    push_custodian(&mut accounts, custodian);
    stake_ix(
        programs,
        accounts,
        StakeInstruction::AuthorizeChecked { stake_authorize },
    )
}

#[allow(clippy::too_many_arguments)]
pub fn authorize_checked_with_seed(
    programs: &ProgramAddresses,
    stake: &Address,
    authority_base: &Address,
    authority_seed: &str,
    authority_owner: &Address,
    new_authority: &Address,
    stake_authorize: StakeAuthorize,
    custodian: Option<&Address>,
) -> Result<Instruction, CodecError> {
    check_seed(authority_seed)?;
    let mut accounts = vec![
        AccountReference::writable(*stake),
        AccountReference::signer(*authority_base),
        AccountReference::read_only(programs.sysvar_clock),
        AccountReference::signer(*new_authority),
    ];
    push_custodian(&mut accounts, custodian);
    stake_ix(
        programs,
        accounts,
        StakeInstruction::AuthorizeCheckedWithSeed {
            stake_authorize,
            authority_seed: authority_seed.to_string(),
            authority_owner: *authority_owner,
        },
    )
}

/// A new custodian in `args` travels as a signing account, not in the payload.
pub fn set_lockup_checked(
    programs: &ProgramAddresses,
    stake: &Address,
    args: &LockupArgs,
    authority: &Address,
) -> Result<Instruction, CodecError> {
    let mut accounts = vec![
        AccountReference::writable(*stake),
        AccountReference::signer(*authority),
    ];
    push_custodian(&mut accounts, args.custodian.as_ref());
    stake_ix(
        programs,
        accounts,
        StakeInstruction::SetLockupChecked {
            unix_timestamp: args.unix_timestamp,
            epoch: args.epoch,
        },
    )
}

pub fn get_minimum_delegation(programs: &ProgramAddresses) -> Result<Instruction, CodecError> {
    stake_ix(programs, vec![], StakeInstruction::GetMinimumDelegation)
}

pub fn deactivate_delinquent(
    programs: &ProgramAddresses,
    stake: &Address,
    delinquent_vote: &Address,
    reference_vote: &Address,
) -> Result<Instruction, CodecError> {
    stake_ix(
        programs,
        vec![
            AccountReference::writable(*stake),
            AccountReference::read_only(*delinquent_vote),
            AccountReference::read_only(*reference_vote),
        ],
        StakeInstruction::DeactivateDelinquent,
    )
}

fn move_accounts(source: &Address, destination: &Address, authority: &Address) -> Vec<AccountReference> {
    vec![
        AccountReference::writable(*source),
        AccountReference::writable(*destination),
        AccountReference::signer(*authority),
    ]
}

pub fn move_stake(
    programs: &ProgramAddresses,
    source: &Address,
    destination: &Address,
    authority: &Address,
    lamports: u64,
) -> Result<Instruction, CodecError> {
    stake_ix(
        programs,
        move_accounts(source, destination, authority),
        StakeInstruction::MoveStake { lamports },
    )
}

pub fn move_lamports(
    programs: &ProgramAddresses,
    source: &Address,
    destination: &Address,
    authority: &Address,
    lamports: u64,
) -> Result<Instruction, CodecError> {
    stake_ix(
        programs,
        move_accounts(source, destination, authority),
        StakeInstruction::MoveLamports { lamports },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::test_support::addr;

    #[test]
    fn test_decode_delegate_stake() {
        let data = [2, 0, 0, 0];
        let instr = StakeInstruction::decode(&data).unwrap();
        assert_eq!(instr, StakeInstruction::DelegateStake);
        assert_eq!(instr.name(), "DelegateStake");
    }

    #[test]
    fn test_decode_withdraw() {
        let data = [
            4, 0, 0, 0, // discriminator = 4 (Withdraw)
            0, 202, 154, 59, 0, 0, 0, 0, // lamports = 1000000000
        ];
        assert_eq!(
            StakeInstruction::decode(&data).unwrap(),
            StakeInstruction::Withdraw {
                lamports: 1_000_000_000
            }
        );
    }

    #[test]
    fn test_decode_bad_authorize_type() {
        let mut data = vec![1, 0, 0, 0];
        data.extend_from_slice(&[0u8; 32]);
        data.extend_from_slice(&7u32.to_le_bytes());
        assert_eq!(
            StakeInstruction::decode(&data).unwrap_err(),
            CodecError::UnknownVariant {
                type_name: "StakeAuthorize",
                ordinal: 7
            }
        );
    }

    #[test]
    fn test_initialize_payload() {
        let programs = ProgramAddresses::mainnet();
        let ix = initialize(
            &programs,
            &addr(1),
            &Authorized {
                staker: addr(2),
                withdrawer: addr(3),
            },
            &Lockup::default(),
        ).unwrap();
        assert_eq!(ix.data.len(), 4 + 64 + 48);
        assert_eq!(&ix.data[..4], &[0, 0, 0, 0]);
        assert_eq!(&ix.data[4..36], addr(2).as_ref());
        assert_eq!(ix.accounts[1], AccountReference::read_only(programs.sysvar_rent));
    }

    #[test]
    fn test_delegate_accounts() {
        let programs = ProgramAddresses::mainnet();
        let ix = delegate_stake(&programs, &addr(1), &addr(2), &addr(3)).unwrap();
        let addresses: Vec<Address> = ix.accounts.iter().map(|a| a.address).collect();
        assert_eq!(
            addresses,
            vec![
                addr(1),
                addr(3),
                programs.sysvar_clock,
                programs.sysvar_stake_history,
                programs.stake_config,
                addr(2),
            ]
        );
        assert!(ix.accounts[5].is_signer);
        assert_eq!(ix.data, vec![2, 0, 0, 0]);
    }

    #[test]
    fn test_optional_custodian_appends_signer() {
        let programs = ProgramAddresses::mainnet();
        let without = withdraw(&programs, &addr(1), &addr(2), &addr(3), 10, None).unwrap();
        let with = withdraw(&programs, &addr(1), &addr(2), &addr(3), 10, Some(&addr(4))).unwrap();
        assert_eq!(without.accounts.len(), 5);
        assert_eq!(with.accounts.len(), 6);
        assert_eq!(with.accounts[5], AccountReference::signer(addr(4)));
        assert_eq!(without.data, with.data);
    }

    #[test]
    fn test_set_lockup_option_tags() {
        let programs = ProgramAddresses::mainnet();
        let ix = set_lockup(
            &programs,
            &addr(1),
            &LockupArgs {
                unix_timestamp: None,
                epoch: Some(9),
                custodian: None,
            },
            &addr(2),
        ).unwrap();
        assert_eq!(ix.data, hex::decode("060000000001090000000000000000").unwrap());
    }

    #[test]
    fn test_set_lockup_checked_moves_custodian_to_accounts() {
        let programs = ProgramAddresses::mainnet();
        let args = LockupArgs {
            unix_timestamp: Some(1),
            epoch: None,
            custodian: Some(addr(5)),
        };
        let ix = set_lockup_checked(&programs, &addr(1), &args, &addr(2)).unwrap();
        assert_eq!(ix.accounts.len(), 3);
        assert_eq!(ix.accounts[2], AccountReference::signer(addr(5)));
        // discriminator + Some(i64) + None
        assert_eq!(ix.data.len(), 4 + 9 + 1);

        let no_custodian = LockupArgs {
            custodian: None,
            ..args
        };
        let ix = set_lockup_checked(&programs, &addr(1), &no_custodian, &addr(2)).unwrap();
        assert_eq!(ix.accounts.len(), 2);
    }

    #[test]
    fn test_every_encoder_decodes_back() {
        let programs = ProgramAddresses::mainnet();
        let lockup = Lockup {
            unix_timestamp: 10,
            epoch: 2,
            custodian: addr(9),
        };
        let cases = vec![
            initialize(&programs, &addr(1), &Authorized::auto(&addr(2)), &lockup).unwrap(),
            authorize(&programs, &addr(1), &addr(2), &addr(3), StakeAuthorize::Withdrawer, None).unwrap(),
            split(&programs, &addr(1), &addr(2), 100, &addr(3)).unwrap(),
            deactivate(&programs, &addr(1), &addr(2)).unwrap(),
            merge(&programs, &addr(1), &addr(2), &addr(3)).unwrap(),
            authorize_with_seed(
                &programs,
                &addr(1),
                &addr(2),
                "seed",
                &addr(3),
                &addr(4),
                StakeAuthorize::Staker,
                Some(&addr(5)),
            )
            .unwrap(),
            initialize_checked(&programs, &addr(1), &Authorized::auto(&addr(2))).unwrap(),
            authorize_checked(&programs, &addr(1), &addr(2), &addr(3), StakeAuthorize::Staker, None).unwrap(),
            authorize_checked_with_seed(
                &programs,
                &addr(1),
                &addr(2),
                "s",
                &addr(3),
                &addr(4),
                StakeAuthorize::Withdrawer,
                None,
            )
            .unwrap(),
            get_minimum_delegation(&programs).unwrap(),
            deactivate_delinquent(&programs, &addr(1), &addr(2), &addr(3)).unwrap(),
            move_stake(&programs, &addr(1), &addr(2), &addr(3), 5).unwrap(),
            move_lamports(&programs, &addr(1), &addr(2), &addr(3), 6).unwrap(),
        ];
        for ix in cases {
            let decoded = StakeInstruction::decode(&ix.data).unwrap();
            assert_eq!(decoded.to_data().unwrap(), ix.data, "{}", decoded.name());
        }
    }

    #[test]
    fn test_create_account_pair() {
        let programs = ProgramAddresses::mainnet();
        let ixs = create_account(
            &programs,
            &addr(1),
            &addr(2),
            &Authorized::auto(&addr(1)),
            &Lockup::default(),
            2_282_880,
        ).unwrap();
        assert_eq!(ixs[0].program(), &programs.system_program);
        assert_eq!(ixs[1].program(), &programs.stake_program);
        match system::SystemInstruction::decode(&ixs[0].data).unwrap() {
            system::SystemInstruction::CreateAccount { space, owner, .. } => {
                assert_eq!(space, STAKE_ACCOUNT_SPACE);
                assert_eq!(owner, programs.stake_program);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_get_minimum_delegation_has_no_accounts() {
        let ix = get_minimum_delegation(&ProgramAddresses::mainnet()).unwrap();
        assert!(ix.accounts.is_empty());
        assert_eq!(ix.data, vec![13, 0, 0, 0]);
    }
}
