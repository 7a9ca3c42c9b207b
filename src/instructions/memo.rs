//! Memo program: the payload is the UTF-8 message itself, with no
//! discriminator.

use super::{AccountReference, Instruction};
use crate::address::Address;
use crate::config::ProgramAddresses;

/// Each signer is attached as a read-only signer so the memo program checks
/// its signature.
pub fn memo(programs: &ProgramAddresses, message: &str, signers: &[Address]) -> Instruction {
    Instruction::new(
        programs.memo_program,
        signers.iter().copied().map(AccountReference::signer).collect(),
        message.as_bytes().to_vec(),
    )
}

/// Memo text carried by instruction data, if it is valid UTF-8.
pub fn decode(data: &[u8]) -> Option<&str> {
    std::str::from_utf8(data).ok()
}
