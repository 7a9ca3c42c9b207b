//! Compute budget encoders and decoder.
//!
//! Every payload is a `u8` tag followed by little-endian integers: heap
//! frame bytes and unit limits are `u32`, the unit price is `u64`
//! micro-lamports. Tag 0 is the retired `RequestUnits` form with two `u32`s;
//! old transactions still carry it, so it decodes but has no encoder. No
//! accounts are referenced.

use super::{Discriminator, Instruction};
use crate::codec::Reader;
use crate::config::ProgramAddresses;
use crate::error::CodecError;

/// Smallest heap frame a transaction can request.
pub const MIN_HEAP_FRAME_BYTES: u32 = 32 * 1024;

/// Largest heap frame a transaction can request.
pub const MAX_HEAP_FRAME_BYTES: u32 = 256 * 1024;

/// Decoded or to-be-encoded ComputeBudget instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeBudgetInstruction {
    /// Deprecated: Request units (replaced by SetComputeUnitLimit).
    RequestUnitsDeprecated { units: u32, additional_fee: u32 },

    /// Heap size in bytes (must be multiple of 1024).
    RequestHeapFrame { bytes: u32 },

    SetComputeUnitLimit { units: u32 },

    /// Price in micro-lamports per compute unit.
    SetComputeUnitPrice { micro_lamports: u64 },

    SetLoadedAccountsDataSizeLimit { bytes: u32 },
}

impl ComputeBudgetInstruction {
    pub fn discriminator(&self) -> Discriminator {
        Discriminator::U8(match self {
            Self::RequestUnitsDeprecated { .. } => 0,
            Self::RequestHeapFrame { .. } => 1,
            Self::SetComputeUnitLimit { .. } => 2,
            Self::SetComputeUnitPrice { .. } => 3,
            Self::SetLoadedAccountsDataSizeLimit { .. } => 4,
        })
    }

    /// Get the string representation of this instruction type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RequestUnitsDeprecated { .. } => "RequestUnitsDeprecated",
            Self::RequestHeapFrame { .. } => "RequestHeapFrame",
            Self::SetComputeUnitLimit { .. } => "SetComputeUnitLimit",
            Self::SetComputeUnitPrice { .. } => "SetComputeUnitPrice",
            Self::SetLoadedAccountsDataSizeLimit { .. } => "SetLoadedAccountsDataSizeLimit",
        }
    }

    /// Serialize into instruction data.
    pub fn to_data(&self) -> Result<Vec<u8>, CodecError> {
        let payload_len = match self {
            Self::RequestUnitsDeprecated { .. } | Self::SetComputeUnitPrice { .. } => 8,
            _ => 4,
        };
        let mut w = Instruction::payload(self.discriminator(), payload_len);
        match self {
            Self::RequestUnitsDeprecated {
                units,
                additional_fee,
            } => {
                w.write_u32(*units).write_u32(*additional_fee);
            }
            Self::RequestHeapFrame { bytes } | Self::SetLoadedAccountsDataSizeLimit { bytes } => {
                w.write_u32(*bytes);
            }
            Self::SetComputeUnitLimit { units } => {
                w.write_u32(*units);
            }
            Self::SetComputeUnitPrice { micro_lamports } => {
                w.write_u64(*micro_lamports);
            }
        }
        w.finish()
    }

    /// Decode a ComputeBudget Program instruction from raw data.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new("ComputeBudgetInstruction", data);
        match r.read_u8("discriminator")? {
            0 => Ok(Self::RequestUnitsDeprecated {
                units: r.read_u32("units")?,
                additional_fee: r.read_u32("additional_fee")?,
            }),
            1 => Ok(Self::RequestHeapFrame {
                bytes: r.read_u32("bytes")?,
            }),
            2 => Ok(Self::SetComputeUnitLimit {
                units: r.read_u32("units")?,
            }),
            3 => Ok(Self::SetComputeUnitPrice {
                micro_lamports: r.read_u64("micro_lamports")?,
            }),
            4 => Ok(Self::SetLoadedAccountsDataSizeLimit {
                bytes: r.read_u32("bytes")?,
            }),
            n => Err(CodecError::unknown_variant("ComputeBudgetInstruction", n)),
        }
    }

    /// Get the compute unit limit if this is a SetComputeUnitLimit instruction.
    pub fn compute_unit_limit(&self) -> Option<u32> {
        match self {
            Self::SetComputeUnitLimit { units } => Some(*units),
            _ => None,
        }
    }

    /// Get the compute unit price in micro-lamports if this is a SetComputeUnitPrice instruction.
    pub fn compute_unit_price(&self) -> Option<u64> {
        match self {
            Self::SetComputeUnitPrice { micro_lamports } => Some(*micro_lamports),
            _ => None,
        }
    }
}

fn compute_budget_ix(
    programs: &ProgramAddresses,
    instruction: ComputeBudgetInstruction,
) -> Result<Instruction, CodecError> {
    Ok(Instruction::new(programs.compute_budget_program, vec![], instruction.to_data()?))
}

/// Heap frames must be a multiple of 1024 between 32 KiB and 256 KiB.
pub fn request_heap_frame(
    programs: &ProgramAddresses,
    bytes: u32,
) -> Result<Instruction, CodecError> {
    if !(MIN_HEAP_FRAME_BYTES..=MAX_HEAP_FRAME_BYTES).contains(&bytes) || bytes % 1024 != 0 {
        return Err(CodecError::illegal_argument(format!(
            "heap frame of {} bytes must be a multiple of 1024 in {}..={}",
            bytes, MIN_HEAP_FRAME_BYTES, MAX_HEAP_FRAME_BYTES
        )));
    }
    compute_budget_ix(
        programs,
        ComputeBudgetInstruction::RequestHeapFrame { bytes },
    )
}

pub fn set_compute_unit_limit(
    programs: &ProgramAddresses,
    units: u32,
) -> Result<Instruction, CodecError> {
    compute_budget_ix(programs, ComputeBudgetInstruction::SetComputeUnitLimit { units })
}

pub fn set_compute_unit_price(
    programs: &ProgramAddresses,
    micro_lamports: u64,
) -> Result<Instruction, CodecError> {
    compute_budget_ix(
        programs,
        ComputeBudgetInstruction::SetComputeUnitPrice { micro_lamports },
    )
}

pub fn set_loaded_accounts_data_size_limit(
    programs: &ProgramAddresses,
    bytes: u32,
) -> Result<Instruction, CodecError> {
    compute_budget_ix(
        programs,
        ComputeBudgetInstruction::SetLoadedAccountsDataSizeLimit { bytes },
    )
}
