//! SPL Stake Pool instructions.
//!
//! # Wire Format
//!
//! Single-byte discriminator, then fields in declared order:
//! - 5: SetPreferredValidator (PreferredValidatorType, Option<vote address>)
//! - 6: UpdateValidatorListBalance (start_index u32, no_merge bool)
//! - 7: UpdateStakePoolBalance
//! - 8: CleanupRemovedValidatorEntries
//! - 9: DepositStake
//! - 10: WithdrawStake (pool_tokens u64)
//! - 12: SetFee (FeeType)
//! - 14: DepositSol (lamports u64)
//! - 15: SetFundingAuthority (FundingType)
//! - 16: WithdrawSol (pool_tokens u64)
//! - 23: DepositStakeWithSlippage (minimum_pool_tokens_out u64)
//! - 24: WithdrawStakeWithSlippage (pool_tokens_in u64, minimum_lamports_out u64)
//! - 25: DepositSolWithSlippage (lamports_in u64, minimum_pool_tokens_out u64)
//! - 26: WithdrawSolWithSlippage (pool_tokens_in u64, minimum_lamports_out u64)
//!
//! Encoders take a [`StakePoolAccounts`], the pool-wide addresses usually
//! read from a decoded [`StakePool`].

use super::stake::{self as stake_ix, StakeAuthorize};
use super::{AccountReference, Discriminator, Instruction};
use crate::accounts::{Fee, StakePool};
use crate::address::Address;
use crate::codec::{Codec, Reader, TaggedUnion, Writer};
use crate::config::ProgramAddresses;
use crate::derivation::{deposit_authority_seeds, withdraw_authority_seeds, AddressDeriver};
use crate::error::{CodecError, Error};
use serde::Serialize;

/// Fee to change with `SetFee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum FeeType {
    /// Percentage of SOL deposit fees paid to the referrer.
    SolReferral(u8),
    /// Percentage of stake deposit fees paid to the referrer.
    StakeReferral(u8),
    Epoch(Fee),
    StakeWithdrawal(Fee),
    SolDeposit(Fee),
    StakeDeposit(Fee),
    SolWithdrawal(Fee),
}

impl FeeType {
    pub fn validate(&self) -> Result<(), CodecError> {
        match self {
            FeeType::SolReferral(pct) | FeeType::StakeReferral(pct) if *pct > 100 => Err(
                CodecError::illegal_argument(format!("referral fee {}% exceeds 100%", pct)),
            ),
            FeeType::SolReferral(_) | FeeType::StakeReferral(_) => Ok(()),
            FeeType::Epoch(fee)
            | FeeType::StakeWithdrawal(fee)
            | FeeType::SolDeposit(fee)
            | FeeType::StakeDeposit(fee)
            | FeeType::SolWithdrawal(fee) => fee.validate(),
        }
    }
}

impl TaggedUnion for FeeType {
    const TYPE_NAME: &'static str = "FeeType";

    fn ordinal(&self) -> u8 {
        match self {
            FeeType::SolReferral(_) => 0,
            FeeType::StakeReferral(_) => 1,
            FeeType::Epoch(_) => 2,
            FeeType::StakeWithdrawal(_) => 3,
            FeeType::SolDeposit(_) => 4,
            FeeType::StakeDeposit(_) => 5,
            FeeType::SolWithdrawal(_) => 6,
        }
    }

    fn payload_len(&self) -> usize {
        match self {
            FeeType::SolReferral(_) | FeeType::StakeReferral(_) => 1,
            _ => 16,
        }
    }

    fn write_payload(&self, writer: &mut Writer) {
        match self {
            FeeType::SolReferral(pct) | FeeType::StakeReferral(pct) => {
                writer.write_u8(*pct);
            }
            FeeType::Epoch(fee)
            | FeeType::StakeWithdrawal(fee)
            | FeeType::SolDeposit(fee)
            | FeeType::StakeDeposit(fee)
            | FeeType::SolWithdrawal(fee) => {
                writer.write(fee);
            }
        }
    }

    fn read_variant(ordinal: u8, reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        match ordinal {
            0 => Ok(FeeType::SolReferral(reader.read_u8("fee")?)),
            1 => Ok(FeeType::StakeReferral(reader.read_u8("fee")?)),
            2 => Ok(FeeType::Epoch(reader.read("fee")?)),
            3 => Ok(FeeType::StakeWithdrawal(reader.read("fee")?)),
            4 => Ok(FeeType::SolDeposit(reader.read("fee")?)),
            5 => Ok(FeeType::StakeDeposit(reader.read("fee")?)),
            6 => Ok(FeeType::SolWithdrawal(reader.read("fee")?)),
            n => Err(Self::unknown(n)),
        }
    }
}

/// Funding authority slot changed with `SetFundingAuthority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FundingType {
    StakeDeposit,
    SolDeposit,
    SolWithdraw,
}

impl TaggedUnion for FundingType {
    const TYPE_NAME: &'static str = "FundingType";

    fn ordinal(&self) -> u8 {
        match self {
            FundingType::StakeDeposit => 0,
            FundingType::SolDeposit => 1,
            FundingType::SolWithdraw => 2,
        }
    }

    fn payload_len(&self) -> usize {
        0
    }

    fn write_payload(&self, _writer: &mut Writer) {}

    fn read_variant(ordinal: u8, _reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        match ordinal {
            0 => Ok(FundingType::StakeDeposit),
            1 => Ok(FundingType::SolDeposit),
            2 => Ok(FundingType::SolWithdraw),
            n => Err(Self::unknown(n)),
        }
    }
}

/// Which preferred validator `SetPreferredValidator` changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PreferredValidatorType {
    Deposit,
    Withdraw,
}

impl TaggedUnion for PreferredValidatorType {
    const TYPE_NAME: &'static str = "PreferredValidatorType";

    fn ordinal(&self) -> u8 {
        match self {
            PreferredValidatorType::Deposit => 0,
            PreferredValidatorType::Withdraw => 1,
        }
    }

    fn payload_len(&self) -> usize {
        0
    }

    fn write_payload(&self, _writer: &mut Writer) {}

    fn read_variant(ordinal: u8, _reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        match ordinal {
            0 => Ok(PreferredValidatorType::Deposit),
            1 => Ok(PreferredValidatorType::Withdraw),
            n => Err(Self::unknown(n)),
        }
    }
}

/// Stake pool instruction payloads built by this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakePoolInstruction {
    SetPreferredValidator {
        validator_type: PreferredValidatorType,
        validator_vote_address: Option<Address>,
    },
    UpdateValidatorListBalance {
        start_index: u32,
        no_merge: bool,
    },
    UpdateStakePoolBalance,
    CleanupRemovedValidatorEntries,
    DepositStake,
    WithdrawStake {
        pool_tokens: u64,
    },
    SetFee {
        fee: FeeType,
    },
    DepositSol {
        lamports: u64,
    },
    SetFundingAuthority(FundingType),
    WithdrawSol {
        pool_tokens: u64,
    },
    DepositStakeWithSlippage {
        minimum_pool_tokens_out: u64,
    },
    WithdrawStakeWithSlippage {
        pool_tokens_in: u64,
        minimum_lamports_out: u64,
    },
    DepositSolWithSlippage {
        lamports_in: u64,
        minimum_pool_tokens_out: u64,
    },
    WithdrawSolWithSlippage {
        pool_tokens_in: u64,
        minimum_lamports_out: u64,
    },
}

impl StakePoolInstruction {
    pub fn discriminator(&self) -> Discriminator {
        Discriminator::U8(match self {
            Self::SetPreferredValidator { .. } => 5,
            Self::UpdateValidatorListBalance { .. } => 6,
            Self::UpdateStakePoolBalance => 7,
            Self::CleanupRemovedValidatorEntries => 8,
            Self::DepositStake => 9,
            Self::WithdrawStake { .. } => 10,
            Self::SetFee { .. } => 12,
            Self::DepositSol { .. } => 14,
            Self::SetFundingAuthority(_) => 15,
            Self::WithdrawSol { .. } => 16,
            Self::DepositStakeWithSlippage { .. } => 23,
            Self::WithdrawStakeWithSlippage { .. } => 24,
            Self::DepositSolWithSlippage { .. } => 25,
            Self::WithdrawSolWithSlippage { .. } => 26,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SetPreferredValidator { .. } => "SetPreferredValidator",
            Self::UpdateValidatorListBalance { .. } => "UpdateValidatorListBalance",
            Self::UpdateStakePoolBalance => "UpdateStakePoolBalance",
            Self::CleanupRemovedValidatorEntries => "CleanupRemovedValidatorEntries",
            Self::DepositStake => "DepositStake",
            Self::WithdrawStake { .. } => "WithdrawStake",
            Self::SetFee { .. } => "SetFee",
            Self::DepositSol { .. } => "DepositSol",
            Self::SetFundingAuthority(_) => "SetFundingAuthority",
            Self::WithdrawSol { .. } => "WithdrawSol",
            Self::DepositStakeWithSlippage { .. } => "DepositStakeWithSlippage",
            Self::WithdrawStakeWithSlippage { .. } => "WithdrawStakeWithSlippage",
            Self::DepositSolWithSlippage { .. } => "DepositSolWithSlippage",
            Self::WithdrawSolWithSlippage { .. } => "WithdrawSolWithSlippage",
        }
    }

    fn payload_len(&self) -> usize {
        match self {
            Self::SetPreferredValidator {
                validator_type,
                validator_vote_address,
            } => validator_type.len() + validator_vote_address.encoded_len(),
            Self::UpdateValidatorListBalance { .. } => 4 + 1,
            Self::UpdateStakePoolBalance
            | Self::CleanupRemovedValidatorEntries
            | Self::DepositStake => 0,
            Self::WithdrawStake { .. }
            | Self::DepositSol { .. }
            | Self::WithdrawSol { .. }
            | Self::DepositStakeWithSlippage { .. } => 8,
            Self::SetFee { fee } => fee.len(),
            Self::SetFundingAuthority(funding_type) => funding_type.len(),
            Self::WithdrawStakeWithSlippage { .. }
            | Self::DepositSolWithSlippage { .. }
            | Self::WithdrawSolWithSlippage { .. } => 16,
        }
    }

    pub fn to_data(&self) -> Result<Vec<u8>, CodecError> {
        let mut w = Instruction::payload(self.discriminator(), self.payload_len());
        match self {
            Self::SetPreferredValidator {
                validator_type,
                validator_vote_address,
            } => {
                validator_type.write(&mut w);
                w.write(validator_vote_address);
            }
            Self::UpdateValidatorListBalance {
                start_index,
                no_merge,
            } => {
                w.write_u32(*start_index).write_bool(*no_merge);
            }
            Self::UpdateStakePoolBalance
            | Self::CleanupRemovedValidatorEntries
            | Self::DepositStake => {}
            Self::WithdrawStake { pool_tokens } | Self::WithdrawSol { pool_tokens } => {
                w.write_u64(*pool_tokens);
            }
            Self::DepositSol { lamports } => {
                w.write_u64(*lamports);
            }
            Self::DepositStakeWithSlippage {
                minimum_pool_tokens_out,
            } => {
                w.write_u64(*minimum_pool_tokens_out);
            }
            Self::SetFee { fee } => fee.write(&mut w),
            Self::SetFundingAuthority(funding_type) => funding_type.write(&mut w),
            Self::WithdrawStakeWithSlippage {
                pool_tokens_in,
                minimum_lamports_out,
            }
            | Self::WithdrawSolWithSlippage {
                pool_tokens_in,
                minimum_lamports_out,
            } => {
                w.write_u64(*pool_tokens_in).write_u64(*minimum_lamports_out);
            }
            Self::DepositSolWithSlippage {
                lamports_in,
                minimum_pool_tokens_out,
            } => {
                w.write_u64(*lamports_in).write_u64(*minimum_pool_tokens_out);
            }
        }
        w.finish()
    }

    /// Decode the instructions this module builds; other stake pool ordinals
    /// report [`CodecError::UnknownVariant`].
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new("StakePoolInstruction", data);
        let instruction = match r.read_u8("discriminator")? {
            5 => Self::SetPreferredValidator {
                validator_type: PreferredValidatorType::read(&mut r)?,
                validator_vote_address: r.read("validator_vote_address")?,
            },
            6 => Self::UpdateValidatorListBalance {
                start_index: r.read_u32("start_index")?,
                no_merge: r.read_bool("no_merge")?,
            },
            7 => Self::UpdateStakePoolBalance,
            8 => Self::CleanupRemovedValidatorEntries,
            9 => Self::DepositStake,
            10 => Self::WithdrawStake {
                pool_tokens: r.read_u64("pool_tokens")?,
            },
            12 => Self::SetFee {
                fee: FeeType::read(&mut r)?,
            },
            14 => Self::DepositSol {
                lamports: r.read_u64("lamports")?,
            },
            15 => Self::SetFundingAuthority(FundingType::read(&mut r)?),
            16 => Self::WithdrawSol {
                pool_tokens: r.read_u64("pool_tokens")?,
            },
            23 => Self::DepositStakeWithSlippage {
                minimum_pool_tokens_out: r.read_u64("minimum_pool_tokens_out")?,
            },
            24 => Self::WithdrawStakeWithSlippage {
                pool_tokens_in: r.read_u64("pool_tokens_in")?,
                minimum_lamports_out: r.read_u64("minimum_lamports_out")?,
            },
            25 => Self::DepositSolWithSlippage {
                lamports_in: r.read_u64("lamports_in")?,
                minimum_pool_tokens_out: r.read_u64("minimum_pool_tokens_out")?,
            },
            26 => Self::WithdrawSolWithSlippage {
                pool_tokens_in: r.read_u64("pool_tokens_in")?,
                minimum_lamports_out: r.read_u64("minimum_lamports_out")?,
            },
            n => return Err(CodecError::unknown_variant("StakePoolInstruction", n)),
        };
        Ok(instruction)
    }
}

/// Pool-wide addresses shared by most stake pool instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakePoolAccounts {
    pub stake_pool: Address,
    /// Program-derived withdraw authority of the pool.
    pub withdraw_authority: Address,
    /// Program-derived stake deposit authority, used unless the pool sets a
    /// custom one.
    pub default_deposit_authority: Address,
    pub stake_deposit_authority: Address,
    pub manager: Address,
    pub staker: Address,
    pub validator_list: Address,
    pub reserve_stake: Address,
    pub pool_mint: Address,
    pub manager_fee_account: Address,
    pub token_program: Address,
    pub sol_deposit_authority: Option<Address>,
    pub sol_withdraw_authority: Option<Address>,
}

impl StakePoolAccounts {
    /// Collect the addresses from a decoded pool and its derived authorities.
    pub fn from_pool(
        stake_pool: &Address,
        pool: &StakePool,
        withdraw_authority: &Address,
        default_deposit_authority: &Address,
    ) -> Self {
        StakePoolAccounts {
            stake_pool: *stake_pool,
            withdraw_authority: *withdraw_authority,
            default_deposit_authority: *default_deposit_authority,
            stake_deposit_authority: pool.stake_deposit_authority,
            manager: pool.manager,
            staker: pool.staker,
            validator_list: pool.validator_list,
            reserve_stake: pool.reserve_stake,
            pool_mint: pool.pool_mint,
            manager_fee_account: pool.manager_fee_account,
            token_program: pool.token_program_id,
            sol_deposit_authority: pool.sol_deposit_authority,
            sol_withdraw_authority: pool.sol_withdraw_authority,
        }
    }

    /// Same as [`StakePoolAccounts::from_pool`], deriving both authorities.
    pub fn derive(
        programs: &ProgramAddresses,
        deriver: &impl AddressDeriver,
        stake_pool: &Address,
        pool: &StakePool,
    ) -> Result<Self, Error> {
        let withdraw = deriver.find_program_address(
            &withdraw_authority_seeds(stake_pool),
            &programs.stake_pool_program,
        )?;
        let deposit = deriver.find_program_address(
            &deposit_authority_seeds(stake_pool),
            &programs.stake_pool_program,
        )?;
        Ok(Self::from_pool(stake_pool, pool, &withdraw.address, &deposit.address))
    }

    /// Whether stake deposits must be signed by a pool-chosen authority.
    pub fn has_custom_deposit_authority(&self) -> bool {
        self.stake_deposit_authority != self.default_deposit_authority
    }
}

fn stake_pool_ix(
    programs: &ProgramAddresses,
    accounts: Vec<AccountReference>,
    instruction: StakePoolInstruction,
) -> Result<Instruction, CodecError> {
    Ok(Instruction::new(programs.stake_pool_program, accounts, instruction.to_data()?))
}

/// `validator_stakes` pairs each validator stake account with its transient
/// stake account, both derived by the caller.
pub fn update_validator_list_balance(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    validator_stakes: &[(Address, Address)],
    start_index: u32,
    no_merge: bool,
) -> Result<Instruction, CodecError> {
    let mut accounts = vec![
        AccountReference::read_only(pool.stake_pool),
        AccountReference::read_only(pool.withdraw_authority),
        AccountReference::writable(pool.validator_list),
        AccountReference::writable(pool.reserve_stake),
        AccountReference::read_only(programs.sysvar_clock),
        AccountReference::read_only(programs.sysvar_stake_history),
        AccountReference::read_only(programs.stake_program),
    ];
    for (validator_stake, transient_stake) in validator_stakes {
        accounts.push(AccountReference::writable(*validator_stake));
        accounts.push(AccountReference::writable(*transient_stake));
    }
    stake_pool_ix(
        programs,
        accounts,
        StakePoolInstruction::UpdateValidatorListBalance {
            start_index,
            no_merge,
        },
    )
}

pub fn update_stake_pool_balance(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
) -> Result<Instruction, CodecError> {
    stake_pool_ix(
        programs,
        vec![
            AccountReference::writable(pool.stake_pool),
            AccountReference::read_only(pool.withdraw_authority),
            AccountReference::writable(pool.validator_list),
            AccountReference::read_only(pool.reserve_stake),
            AccountReference::writable(pool.manager_fee_account),
            AccountReference::writable(pool.pool_mint),
            AccountReference::read_only(pool.token_program),
        ],
        StakePoolInstruction::UpdateStakePoolBalance,
    )
}

pub fn cleanup_removed_validator_entries(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
) -> Result<Instruction, CodecError> {
    stake_pool_ix(
        programs,
        vec![
            AccountReference::writable(pool.stake_pool),
            AccountReference::writable(pool.validator_list),
        ],
        StakePoolInstruction::CleanupRemovedValidatorEntries,
    )
}

/// Caller-side accounts for a stake deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositStakeAccounts {
    pub deposit_stake: Address,
    /// Current withdrawer of `deposit_stake`; signs the authority handover.
    pub deposit_stake_withdraw_authority: Address,
    pub validator_stake: Address,
    pub pool_tokens_to: Address,
    pub referrer_pool_tokens: Address,
}

fn deposit_stake_with(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &DepositStakeAccounts,
    instruction: StakePoolInstruction,
) -> Result<Vec<Instruction>, CodecError> {
    // The deposited stake is first handed over to the pool's deposit authority.
    let mut instructions: Vec<Instruction> = [StakeAuthorize::Staker, StakeAuthorize::Withdrawer]
        .into_iter()
        .map(|kind| {
            stake_ix::authorize(
                programs,
                &user.deposit_stake,
                &user.deposit_stake_withdraw_authority,
                &pool.stake_deposit_authority,
                kind,
                None,
            )
        })
        .collect::<Result<_, _>>()?;

    let deposit_authority = if pool.has_custom_deposit_authority() {
        AccountReference::signer(pool.stake_deposit_authority)
    } else {
        AccountReference::read_only(pool.stake_deposit_authority)
    };
    instructions.push(stake_pool_ix(
        programs,
        vec![
            AccountReference::writable(pool.stake_pool),
            AccountReference::writable(pool.validator_list),
            deposit_authority,
            AccountReference::read_only(pool.withdraw_authority),
            AccountReference::writable(user.deposit_stake),
            AccountReference::writable(user.validator_stake),
            AccountReference::writable(pool.reserve_stake),
            AccountReference::writable(user.pool_tokens_to),
            AccountReference::writable(pool.manager_fee_account),
            AccountReference::writable(user.referrer_pool_tokens),
            AccountReference::writable(pool.pool_mint),
            AccountReference::read_only(programs.sysvar_clock),
            AccountReference::read_only(programs.sysvar_stake_history),
            AccountReference::read_only(pool.token_program),
            AccountReference::read_only(programs.stake_program),
        ],
        instruction,
    )?);
    Ok(instructions)
}

/// Two stake `Authorize` instructions followed by `DepositStake`.
pub fn deposit_stake(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &DepositStakeAccounts,
) -> Result<Vec<Instruction>, CodecError> {
    deposit_stake_with(programs, pool, user, StakePoolInstruction::DepositStake)
}

pub fn deposit_stake_with_slippage(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &DepositStakeAccounts,
    minimum_pool_tokens_out: u64,
) -> Result<Vec<Instruction>, CodecError> {
    deposit_stake_with(
        programs,
        pool,
        user,
        StakePoolInstruction::DepositStakeWithSlippage {
            minimum_pool_tokens_out,
        },
    )
}

/// Caller-side accounts for a stake withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawStakeAccounts {
    /// Validator or reserve stake account to split from.
    pub stake_to_split: Address,
    /// Uninitialized account receiving the split stake.
    pub stake_to_receive: Address,
    /// Becomes staker and withdrawer of the received stake.
    pub user_stake_authority: Address,
    pub user_transfer_authority: Address,
    pub user_pool_token_account: Address,
}

fn withdraw_stake_with(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &WithdrawStakeAccounts,
    instruction: StakePoolInstruction,
) -> Result<Instruction, CodecError> {
    stake_pool_ix(
        programs,
        vec![
            AccountReference::writable(pool.stake_pool),
            AccountReference::writable(pool.validator_list),
            AccountReference::read_only(pool.withdraw_authority),
            AccountReference::writable(user.stake_to_split),
            AccountReference::writable(user.stake_to_receive),
            AccountReference::read_only(user.user_stake_authority),
            AccountReference::signer(user.user_transfer_authority),
            AccountReference::writable(user.user_pool_token_account),
            AccountReference::writable(pool.manager_fee_account),
            AccountReference::writable(pool.pool_mint),
            AccountReference::read_only(programs.sysvar_clock),
            AccountReference::read_only(pool.token_program),
            AccountReference::read_only(programs.stake_program),
        ],
        instruction,
    )
}

pub fn withdraw_stake(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &WithdrawStakeAccounts,
    pool_tokens: u64,
) -> Result<Instruction, CodecError> {
    withdraw_stake_with(
        programs,
        pool,
        user,
        StakePoolInstruction::WithdrawStake { pool_tokens },
    )
}

pub fn withdraw_stake_with_slippage(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &WithdrawStakeAccounts,
    pool_tokens_in: u64,
    minimum_lamports_out: u64,
) -> Result<Instruction, CodecError> {
    withdraw_stake_with(
        programs,
        pool,
        user,
        StakePoolInstruction::WithdrawStakeWithSlippage {
            pool_tokens_in,
            minimum_lamports_out,
        },
    )
}

/// Caller-side accounts for a SOL deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositSolAccounts {
    pub lamports_from: Address,
    pub pool_tokens_to: Address,
    pub referrer_pool_tokens: Address,
}

fn deposit_sol_with(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &DepositSolAccounts,
    instruction: StakePoolInstruction,
) -> Result<Instruction, CodecError> {
    let mut accounts = vec![
        AccountReference::writable(pool.stake_pool),
        AccountReference::read_only(pool.withdraw_authority),
        AccountReference::writable(pool.reserve_stake),
        AccountReference::writable_signer(user.lamports_from),
        AccountReference::writable(user.pool_tokens_to),
        AccountReference::writable(pool.manager_fee_account),
        AccountReference::writable(user.referrer_pool_tokens),
        AccountReference::writable(pool.pool_mint),
        AccountReference::read_only(programs.system_program),
        AccountReference::read_only(pool.token_program),
    ];
    if let Some(authority) = pool.sol_deposit_authority {
        accounts.push(AccountReference::signer(authority));
    }
    stake_pool_ix(programs, accounts, instruction)
}

/// The pool's SOL deposit authority, when set, is appended as a signer.
pub fn deposit_sol(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &DepositSolAccounts,
    lamports: u64,
) -> Result<Instruction, CodecError> {
    deposit_sol_with(programs, pool, user, StakePoolInstruction::DepositSol { lamports })
}

pub fn deposit_sol_with_slippage(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &DepositSolAccounts,
    lamports_in: u64,
    minimum_pool_tokens_out: u64,
) -> Result<Instruction, CodecError> {
    deposit_sol_with(
        programs,
        pool,
        user,
        StakePoolInstruction::DepositSolWithSlippage {
            lamports_in,
            minimum_pool_tokens_out,
        },
    )
}

/// Caller-side accounts for a SOL withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawSolAccounts {
    pub user_transfer_authority: Address,
    pub pool_tokens_from: Address,
    pub lamports_to: Address,
}

fn withdraw_sol_with(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &WithdrawSolAccounts,
    instruction: StakePoolInstruction,
) -> Result<Instruction, CodecError> {
    let mut accounts = vec![
        AccountReference::writable(pool.stake_pool),
        AccountReference::read_only(pool.withdraw_authority),
        AccountReference::signer(user.user_transfer_authority),
        AccountReference::writable(user.pool_tokens_from),
        AccountReference::writable(pool.reserve_stake),
        AccountReference::writable(user.lamports_to),
        AccountReference::writable(pool.manager_fee_account),
        AccountReference::writable(pool.pool_mint),
        AccountReference::read_only(programs.sysvar_clock),
        AccountReference::read_only(programs.sysvar_stake_history),
        AccountReference::read_only(programs.stake_program),
        AccountReference::read_only(pool.token_program),
    ];
    if let Some(authority) = pool.sol_withdraw_authority {
        accounts.push(AccountReference::signer(authority));
    }
    stake_pool_ix(programs, accounts, instruction)
}

/// The pool's SOL withdraw authority, when set, is appended as a signer.
pub fn withdraw_sol(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &WithdrawSolAccounts,
    pool_tokens: u64,
) -> Result<Instruction, CodecError> {
    withdraw_sol_with(programs, pool, user, StakePoolInstruction::WithdrawSol { pool_tokens })
}

pub fn withdraw_sol_with_slippage(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    user: &WithdrawSolAccounts,
    pool_tokens_in: u64,
    minimum_lamports_out: u64,
) -> Result<Instruction, CodecError> {
    withdraw_sol_with(
        programs,
        pool,
        user,
        StakePoolInstruction::WithdrawSolWithSlippage {
            pool_tokens_in,
            minimum_lamports_out,
        },
    )
}

/// Signed by the pool manager.
pub fn set_fee(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    fee: FeeType,
) -> Result<Instruction, CodecError> {
    fee.validate()?;
    stake_pool_ix(
        programs,
        vec![
            AccountReference::writable(pool.stake_pool),
            AccountReference::signer(pool.manager),
        ],
        StakePoolInstruction::SetFee { fee },
    )
}

/// `None` removes the authority, opening the slot to anyone.
pub fn set_funding_authority(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    new_authority: Option<&Address>,
    funding_type: FundingType,
) -> Result<Instruction, CodecError> {
    let mut accounts = vec![
        AccountReference::writable(pool.stake_pool),
        AccountReference::signer(pool.manager),
    ];
    if let Some(authority) = new_authority {
        accounts.push(AccountReference::read_only(*authority));
    }
    stake_pool_ix(
        programs,
        accounts,
        StakePoolInstruction::SetFundingAuthority(funding_type),
    )
}

/// Signed by the pool staker.
pub fn set_preferred_validator(
    programs: &ProgramAddresses,
    pool: &StakePoolAccounts,
    validator_type: PreferredValidatorType,
    validator_vote_address: Option<&Address>,
) -> Result<Instruction, CodecError> {
    stake_pool_ix(
        programs,
        vec![
            AccountReference::writable(pool.stake_pool),
            AccountReference::signer(pool.staker),
            AccountReference::read_only(pool.validator_list),
        ],
        StakePoolInstruction::SetPreferredValidator {
            validator_type,
            validator_vote_address: validator_vote_address.copied(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::test_support::addr;

    fn pool_accounts() -> StakePoolAccounts {
        StakePoolAccounts {
            stake_pool: addr(1),
            withdraw_authority: addr(2),
            default_deposit_authority: addr(3),
            stake_deposit_authority: addr(3),
            manager: addr(4),
            staker: addr(5),
            validator_list: addr(6),
            reserve_stake: addr(7),
            pool_mint: addr(8),
            manager_fee_account: addr(9),
            token_program: crate::config::TOKEN_PROGRAM_ID,
            sol_deposit_authority: None,
            sol_withdraw_authority: None,
        }
    }

    #[test]
    fn test_fee_type_widths() {
        assert_eq!(FeeType::SolReferral(50).len(), 2);
        assert_eq!(FeeType::Epoch(Fee::new(1, 100)).len(), 17);
    }

    #[test]
    fn test_set_fee_payload() {
        let programs = ProgramAddresses::mainnet();
        let ix = set_fee(&programs, &pool_accounts(), FeeType::Epoch(Fee::new(3, 100))).unwrap();
        let mut expected = vec![12, 2];
        expected.extend_from_slice(&100u64.to_le_bytes());
        expected.extend_from_slice(&3u64.to_le_bytes());
        assert_eq!(ix.data, expected);
        assert_eq!(ix.accounts[1], AccountReference::signer(addr(4)));

        let ix = set_fee(&programs, &pool_accounts(), FeeType::StakeReferral(25)).unwrap();
        assert_eq!(ix.data, vec![12, 1, 25]);
    }

    #[test]
    fn test_set_fee_rejects_bad_values() {
        let programs = ProgramAddresses::mainnet();
        assert!(matches!(
            set_fee(&programs, &pool_accounts(), FeeType::SolReferral(101)),
            Err(CodecError::IllegalArgument(_))
        ));
        assert!(matches!(
            set_fee(&programs, &pool_accounts(), FeeType::SolDeposit(Fee::new(1, 0))),
            Err(CodecError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_deposit_sol_optional_authority() {
        let programs = ProgramAddresses::mainnet();
        let user = DepositSolAccounts {
            lamports_from: addr(20),
            pool_tokens_to: addr(21),
            referrer_pool_tokens: addr(21),
        };
        let open = deposit_sol(&programs, &pool_accounts(), &user, 1_000).unwrap();
        assert_eq!(open.accounts.len(), 10);
        assert_eq!(open.accounts[3], AccountReference::writable_signer(addr(20)));
        assert_eq!(open.data, hex::decode("0ee803000000000000").unwrap());

        let gated = StakePoolAccounts {
            sol_deposit_authority: Some(addr(30)),
            ..pool_accounts()
        };
        let ix = deposit_sol(&programs, &gated, &user, 1_000).unwrap();
        assert_eq!(ix.accounts.len(), 11);
        assert_eq!(ix.accounts[10], AccountReference::signer(addr(30)));
        assert_eq!(ix.data, open.data);
    }

    #[test]
    fn test_withdraw_sol_accounts() {
        let programs = ProgramAddresses::mainnet();
        let user = WithdrawSolAccounts {
            user_transfer_authority: addr(20),
            pool_tokens_from: addr(21),
            lamports_to: addr(22),
        };
        let ix = withdraw_sol_with_slippage(&programs, &pool_accounts(), &user, 10, 9).unwrap();
        assert_eq!(ix.accounts.len(), 12);
        assert_eq!(ix.accounts[2], AccountReference::signer(addr(20)));
        assert_eq!(ix.accounts[10], AccountReference::read_only(programs.stake_program));
        assert_eq!(ix.data[0], 26);
        assert_eq!(
            StakePoolInstruction::decode(&ix.data).unwrap(),
            StakePoolInstruction::WithdrawSolWithSlippage {
                pool_tokens_in: 10,
                minimum_lamports_out: 9
            }
        );
    }

    #[test]
    fn test_deposit_stake_hands_over_authority() {
        let programs = ProgramAddresses::mainnet();
        let user = DepositStakeAccounts {
            deposit_stake: addr(20),
            deposit_stake_withdraw_authority: addr(21),
            validator_stake: addr(22),
            pool_tokens_to: addr(23),
            referrer_pool_tokens: addr(23),
        };
        let ixs = deposit_stake(&programs, &pool_accounts(), &user).unwrap();
        assert_eq!(ixs.len(), 3);
        assert_eq!(ixs[0].program(), &programs.stake_program);
        assert_eq!(ixs[1].program(), &programs.stake_program);
        assert_eq!(ixs[2].data, vec![9]);
        assert_eq!(ixs[2].accounts.len(), 15);
        assert_eq!(ixs[2].accounts[2], AccountReference::read_only(addr(3)));

        let custom = StakePoolAccounts {
            stake_deposit_authority: addr(40),
            ..pool_accounts()
        };
        let ixs = deposit_stake_with_slippage(&programs, &custom, &user, 77).unwrap();
        assert_eq!(ixs[2].accounts[2], AccountReference::signer(addr(40)));
        assert_eq!(ixs[2].data[0], 23);
        match stake_ix::StakeInstruction::decode(&ixs[0].data).unwrap() {
            stake_ix::StakeInstruction::Authorize {
                new_authority,
                stake_authorize,
            } => {
                assert_eq!(new_authority, addr(40));
                assert_eq!(stake_authorize, StakeAuthorize::Staker);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_update_validator_list_balance_appends_pairs() {
        let programs = ProgramAddresses::mainnet();
        let ix = update_validator_list_balance(
            &programs,
            &pool_accounts(),
            &[(addr(30), addr(31)), (addr(32), addr(33))],
            5,
            true,
        ).unwrap();
        assert_eq!(ix.accounts.len(), 7 + 4);
        assert_eq!(ix.accounts[0], AccountReference::read_only(addr(1)));
        assert_eq!(ix.accounts[8], AccountReference::writable(addr(31)));
        assert_eq!(ix.data, vec![6, 5, 0, 0, 0, 1]);
    }

    #[test]
    fn test_set_funding_authority() {
        let programs = ProgramAddresses::mainnet();
        let ix = set_funding_authority(
            &programs,
            &pool_accounts(),
            Some(&addr(50)),
            FundingType::SolWithdraw,
        ).unwrap();
        assert_eq!(ix.data, vec![15, 2]);
        assert_eq!(ix.accounts.len(), 3);

        let ix = set_funding_authority(&programs, &pool_accounts(), None, FundingType::StakeDeposit).unwrap();
        assert_eq!(ix.accounts.len(), 2);
        assert_eq!(ix.data, vec![15, 0]);
    }

    #[test]
    fn test_unknown_tagged_ordinals() {
        assert_eq!(
            StakePoolInstruction::decode(&[12, 7]).unwrap_err(),
            CodecError::UnknownVariant {
                type_name: "FeeType",
                ordinal: 7
            }
        );
        assert_eq!(
            StakePoolInstruction::decode(&[15, 3]).unwrap_err(),
            CodecError::UnknownVariant {
                type_name: "FundingType",
                ordinal: 3
            }
        );
    }

    #[test]
    fn test_set_preferred_validator() {
        let programs = ProgramAddresses::mainnet();
        let ix = set_preferred_validator(
            &programs,
            &pool_accounts(),
            PreferredValidatorType::Withdraw,
            Some(&addr(60)),
        ).unwrap();
        assert_eq!(ix.data.len(), 1 + 1 + 33);
        assert_eq!(&ix.data[..3], &[5, 1, 1]);

        let ix = set_preferred_validator(&programs, &pool_accounts(), PreferredValidatorType::Deposit, None).unwrap();
        assert_eq!(ix.data, vec![5, 0, 0]);
    }
}
