//! Associated Token Account program instructions.
//!
//! Discriminator is a single byte: 0 Create, 1 CreateIdempotent,
//! 2 RecoverNested. The associated account address is derived by the caller
//! (see [`crate::derivation::associated_token_seeds`]) and passed in.

use super::token::check_token_program;
use super::{AccountReference, Discriminator, Instruction};
use crate::address::Address;
use crate::codec::Reader;
use crate::config::ProgramAddresses;
use crate::error::CodecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociatedTokenInstruction {
    Create,
    CreateIdempotent,
    RecoverNested,
}

impl AssociatedTokenInstruction {
    pub fn discriminator(&self) -> Discriminator {
        Discriminator::U8(match self {
            Self::Create => 0,
            Self::CreateIdempotent => 1,
            Self::RecoverNested => 2,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::CreateIdempotent => "CreateIdempotent",
            Self::RecoverNested => "RecoverNested",
        }
    }

    pub fn to_data(&self) -> Result<Vec<u8>, CodecError> {
        Instruction::payload(self.discriminator(), 0).finish()
    }

    /// Empty data is the legacy encoding of `Create`.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        if data.is_empty() {
            return Ok(Self::Create);
        }
        let mut r = Reader::new("AssociatedTokenInstruction", data);
        match r.read_u8("discriminator")? {
            0 => Ok(Self::Create),
            1 => Ok(Self::CreateIdempotent),
            2 => Ok(Self::RecoverNested),
            n => Err(CodecError::unknown_variant("AssociatedTokenInstruction", n)),
        }
    }
}

fn create_with(
    programs: &ProgramAddresses,
    instruction: AssociatedTokenInstruction,
    payer: &Address,
    associated_account: &Address,
    owner: &Address,
    mint: &Address,
    token_program: &Address,
) -> Result<Instruction, CodecError> {
    check_token_program(programs, token_program)?;
    Ok(Instruction::new(
        programs.associated_token_program,
        vec![
            AccountReference::writable_signer(*payer),
            AccountReference::writable(*associated_account),
            AccountReference::read_only(*owner),
            AccountReference::read_only(*mint),
            AccountReference::read_only(programs.system_program),
            AccountReference::read_only(*token_program),
        ],
        instruction.to_data()?,
    ))
}

/// Fails on-chain if the account already exists.
pub fn create(
    programs: &ProgramAddresses,
    payer: &Address,
    associated_account: &Address,
    owner: &Address,
    mint: &Address,
    token_program: &Address,
) -> Result<Instruction, CodecError> {
    create_with(
        programs,
        AssociatedTokenInstruction::Create,
        payer,
        associated_account,
        owner,
        mint,
        token_program,
    )
}

/// Succeeds on-chain if the account already exists with the same owner.
pub fn create_idempotent(
    programs: &ProgramAddresses,
    payer: &Address,
    associated_account: &Address,
    owner: &Address,
    mint: &Address,
    token_program: &Address,
) -> Result<Instruction, CodecError> {
    create_with(
        programs,
        AssociatedTokenInstruction::CreateIdempotent,
        payer,
        associated_account,
        owner,
        mint,
        token_program,
    )
}

/// Addresses involved in recovering tokens from an associated account owned
/// by another associated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedAccounts {
    /// Associated account of `owner_associated_account` for `nested_mint`.
    pub nested_account: Address,
    pub nested_mint: Address,
    /// Associated account of `wallet` for `nested_mint`.
    pub destination_account: Address,
    /// Associated account of `wallet` for `owner_mint`.
    pub owner_associated_account: Address,
    pub owner_mint: Address,
    pub wallet: Address,
}

pub fn recover_nested(
    programs: &ProgramAddresses,
    nested: &NestedAccounts,
    token_program: &Address,
) -> Result<Instruction, CodecError> {
    check_token_program(programs, token_program)?;
    Ok(Instruction::new(
        programs.associated_token_program,
        vec![
            AccountReference::writable(nested.nested_account),
            AccountReference::read_only(nested.nested_mint),
            AccountReference::writable(nested.destination_account),
            AccountReference::read_only(nested.owner_associated_account),
            AccountReference::read_only(nested.owner_mint),
            AccountReference::writable_signer(nested.wallet),
            AccountReference::read_only(*token_program),
        ],
        AssociatedTokenInstruction::RecoverNested.to_data()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::test_support::addr;

    #[test]
    fn test_create_accounts() {
        let programs = ProgramAddresses::mainnet();
        let ix = create_idempotent(
            &programs,
            &addr(1),
            &addr(2),
            &addr(3),
            &addr(4),
            &programs.token_program,
        )
        .unwrap();
        assert_eq!(ix.program(), &programs.associated_token_program);
        assert_eq!(ix.data, vec![1]);
        assert_eq!(ix.accounts[0], AccountReference::writable_signer(addr(1)));
        assert_eq!(ix.accounts[1], AccountReference::writable(addr(2)));
        assert_eq!(
            ix.accounts[4],
            AccountReference::read_only(programs.system_program)
        );
        assert_eq!(
            ix.accounts[5],
            AccountReference::read_only(programs.token_program)
        );
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            AssociatedTokenInstruction::decode(&[]).unwrap(),
            AssociatedTokenInstruction::Create
        );
        assert_eq!(
            AssociatedTokenInstruction::decode(&[2]).unwrap(),
            AssociatedTokenInstruction::RecoverNested
        );
        assert!(matches!(
            AssociatedTokenInstruction::decode(&[3]),
            Err(CodecError::UnknownVariant { ordinal: 3, .. })
        ));
    }

    #[test]
    fn test_recover_nested_wallet_signs() {
        let programs = ProgramAddresses::mainnet();
        let nested = NestedAccounts {
            nested_account: addr(1),
            nested_mint: addr(2),
            destination_account: addr(3),
            owner_associated_account: addr(4),
            owner_mint: addr(5),
            wallet: addr(6),
        };
        let ix = recover_nested(&programs, &nested, &programs.token_2022_program).unwrap();
        assert_eq!(ix.accounts.len(), 7);
        assert_eq!(ix.accounts[5], AccountReference::writable_signer(addr(6)));
        assert_eq!(ix.data, vec![2]);
    }
}
