//! SPL Token (and Token-2022 base) instructions.
//!
//! # Wire Format
//!
//! Token instructions start with a single-byte discriminator. Optional
//! authorities in instruction data use a 1-byte presence tag followed by the
//! address when present; the 4-byte `COption` tag only appears in account
//! state.
//!
//! Every encoder takes the token program to target, which must be one of the
//! two token programs in [`ProgramAddresses`].

use super::{AccountReference, Discriminator, Instruction};
use crate::address::Address;
use crate::codec::{Codec, Reader, Writer};
use crate::config::ProgramAddresses;
use crate::error::CodecError;
use serde::Serialize;

/// Most signers a token multisig can hold.
pub const MAX_SIGNERS: usize = 11;

/// Authority slots changeable with `SetAuthority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthorityType {
    MintTokens,
    FreezeAccount,
    AccountOwner,
    CloseAccount,
}

impl Codec for AuthorityType {
    fn encoded_len(&self) -> usize {
        1
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_u8(match self {
            Self::MintTokens => 0,
            Self::FreezeAccount => 1,
            Self::AccountOwner => 2,
            Self::CloseAccount => 3,
        });
    }

    fn decode(reader: &mut Reader<'_>, field: &'static str) -> Result<Self, CodecError> {
        match reader.read_u8(field)? {
            0 => Ok(Self::MintTokens),
            1 => Ok(Self::FreezeAccount),
            2 => Ok(Self::AccountOwner),
            3 => Ok(Self::CloseAccount),
            n => Err(CodecError::unknown_variant("AuthorityType", n)),
        }
    }
}

/// Decoded or to-be-encoded token instruction payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenInstruction {
    /// Accounts: [source, destination, owner, ...signers]
    Transfer { amount: u64 },
    /// Accounts: [source, delegate, owner, ...signers]
    Approve { amount: u64 },
    /// Accounts: [source, owner, ...signers]
    Revoke,
    /// Accounts: [account_or_mint, current_authority, ...signers]
    SetAuthority {
        authority_type: AuthorityType,
        new_authority: Option<Address>,
    },
    /// Accounts: [mint, destination, mint_authority, ...signers]
    MintTo { amount: u64 },
    /// Accounts: [account, mint, owner, ...signers]
    Burn { amount: u64 },
    /// Accounts: [account, destination, owner, ...signers]
    CloseAccount,
    /// Accounts: [account, mint, freeze_authority, ...signers]
    FreezeAccount,
    /// Accounts: [account, mint, freeze_authority, ...signers]
    ThawAccount,
    /// Accounts: [source, mint, destination, owner, ...signers]
    TransferChecked { amount: u64, decimals: u8 },
    /// Accounts: [source, mint, delegate, owner, ...signers]
    ApproveChecked { amount: u64, decimals: u8 },
    /// Accounts: [mint, destination, mint_authority, ...signers]
    MintToChecked { amount: u64, decimals: u8 },
    /// Accounts: [account, mint, owner, ...signers]
    BurnChecked { amount: u64, decimals: u8 },
    /// Accounts: [native_account]
    SyncNative,
    /// Accounts: [account, mint]
    InitializeAccount3 { owner: Address },
    /// Accounts: [mint]
    InitializeMint2 {
        decimals: u8,
        mint_authority: Address,
        freeze_authority: Option<Address>,
    },
}

impl TokenInstruction {
    pub fn discriminator(&self) -> Discriminator {
        Discriminator::U8(match self {
            Self::Transfer { .. } => 3,
            Self::Approve { .. } => 4,
            Self::Revoke => 5,
            Self::SetAuthority { .. } => 6,
            Self::MintTo { .. } => 7,
            Self::Burn { .. } => 8,
            Self::CloseAccount => 9,
            Self::FreezeAccount => 10,
            Self::ThawAccount => 11,
            Self::TransferChecked { .. } => 12,
            Self::ApproveChecked { .. } => 13,
            Self::MintToChecked { .. } => 14,
            Self::BurnChecked { .. } => 15,
            Self::SyncNative => 17,
            Self::InitializeAccount3 { .. } => 18,
            Self::InitializeMint2 { .. } => 20,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approve { .. } => "Approve",
            Self::Revoke => "Revoke",
            Self::SetAuthority { .. } => "SetAuthority",
            Self::MintTo { .. } => "MintTo",
            Self::Burn { .. } => "Burn",
            Self::CloseAccount => "CloseAccount",
            Self::FreezeAccount => "FreezeAccount",
            Self::ThawAccount => "ThawAccount",
            Self::TransferChecked { .. } => "TransferChecked",
            Self::ApproveChecked { .. } => "ApproveChecked",
            Self::MintToChecked { .. } => "MintToChecked",
            Self::BurnChecked { .. } => "BurnChecked",
            Self::SyncNative => "SyncNative",
            Self::InitializeAccount3 { .. } => "InitializeAccount3",
            Self::InitializeMint2 { .. } => "InitializeMint2",
        }
    }

    fn payload_len(&self) -> usize {
        match self {
            Self::Transfer { .. }
            | Self::Approve { .. }
            | Self::MintTo { .. }
            | Self::Burn { .. } => 8,
            Self::TransferChecked { .. }
            | Self::ApproveChecked { .. }
            | Self::MintToChecked { .. }
            | Self::BurnChecked { .. } => 9,
            Self::SetAuthority { new_authority, .. } => 1 + new_authority.encoded_len(),
            Self::InitializeAccount3 { .. } => 32,
            Self::InitializeMint2 {
                freeze_authority, ..
            } => 1 + 32 + freeze_authority.encoded_len(),
            Self::Revoke
            | Self::CloseAccount
            | Self::FreezeAccount
            | Self::ThawAccount
            | Self::SyncNative => 0,
        }
    }

    /// Serialize into instruction data.
    pub fn to_data(&self) -> Result<Vec<u8>, CodecError> {
        let mut w = Instruction::payload(self.discriminator(), self.payload_len());
        match self {
            Self::Transfer { amount }
            | Self::Approve { amount }
            | Self::MintTo { amount }
            | Self::Burn { amount } => {
                w.write_u64(*amount);
            }
            Self::TransferChecked { amount, decimals }
            | Self::ApproveChecked { amount, decimals }
            | Self::MintToChecked { amount, decimals }
            | Self::BurnChecked { amount, decimals } => {
                w.write_u64(*amount).write_u8(*decimals);
            }
            Self::SetAuthority {
                authority_type,
                new_authority,
            } => {
                w.write(authority_type).write(new_authority);
            }
            Self::InitializeAccount3 { owner } => {
                w.write_address(owner);
            }
            Self::InitializeMint2 {
                decimals,
                mint_authority,
                freeze_authority,
            } => {
                w.write_u8(*decimals)
                    .write_address(mint_authority)
                    .write(freeze_authority);
            }
            Self::Revoke
            | Self::CloseAccount
            | Self::FreezeAccount
            | Self::ThawAccount
            | Self::SyncNative => {}
        }
        w.finish()
    }

    /// Decode a token instruction from raw data.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new("TokenInstruction", data);
        let discriminator = r.read_u8("discriminator")?;
        let instruction = match discriminator {
            3 => Self::Transfer {
                amount: r.read_u64("amount")?,
            },
            4 => Self::Approve {
                amount: r.read_u64("amount")?,
            },
            5 => Self::Revoke,
            6 => Self::SetAuthority {
                authority_type: r.read("authority_type")?,
                new_authority: r.read("new_authority")?,
            },
            7 => Self::MintTo {
                amount: r.read_u64("amount")?,
            },
            8 => Self::Burn {
                amount: r.read_u64("amount")?,
            },
            9 => Self::CloseAccount,
            10 => Self::FreezeAccount,
            11 => Self::ThawAccount,
            12 => Self::TransferChecked {
                amount: r.read_u64("amount")?,
                decimals: r.read_u8("decimals")?,
            },
            13 => Self::ApproveChecked {
                amount: r.read_u64("amount")?,
                decimals: r.read_u8("decimals")?,
            },
            14 => Self::MintToChecked {
                amount: r.read_u64("amount")?,
                decimals: r.read_u8("decimals")?,
            },
            15 => Self::BurnChecked {
                amount: r.read_u64("amount")?,
                decimals: r.read_u8("decimals")?,
            },
            17 => Self::SyncNative,
            18 => Self::InitializeAccount3 {
                owner: r.read_address("owner")?,
            },
            20 => Self::InitializeMint2 {
                decimals: r.read_u8("decimals")?,
                mint_authority: r.read_address("mint_authority")?,
                freeze_authority: r.read("freeze_authority")?,
            },
            n => return Err(CodecError::unknown_variant("TokenInstruction", n)),
        };
        Ok(instruction)
    }
}

pub(crate) fn check_token_program(programs: &ProgramAddresses, token_program: &Address) -> Result<(), CodecError> {
    if !programs.is_token_program(token_program) {
        return Err(CodecError::illegal_argument(format!(
            "{} is not a token program",
            token_program
        )));
    }
    Ok(())
}

/// Append the authority: a plain signer, or for a multisig a read-only
/// account followed by each signer.
fn push_authority(
    accounts: &mut Vec<AccountReference>,
    authority: &Address,
    signers: &[Address],
) -> Result<(), CodecError> {
    if signers.len() > MAX_SIGNERS {
        return Err(CodecError::illegal_argument(format!(
            "{} multisig signers, max {}",
            signers.len(),
            MAX_SIGNERS
        )));
    }
    if signers.is_empty() {
        accounts.push(AccountReference::signer(*authority));
    } else {
        accounts.push(AccountReference::read_only(*authority));
        accounts.extend(signers.iter().copied().map(AccountReference::signer));
    }
    Ok(())
}

fn token_ix(
    programs: &ProgramAddresses,
    token_program: &Address,
    mut accounts: Vec<AccountReference>,
    authority: Option<(&Address, &[Address])>,
    instruction: TokenInstruction,
) -> Result<Instruction, CodecError> {
    check_token_program(programs, token_program)?;
    if let Some((authority, signers)) = authority {
        push_authority(&mut accounts, authority, signers)?;
    }
    Ok(Instruction::new(*token_program, accounts, instruction.to_data()?))
}

pub fn initialize_mint2(
    programs: &ProgramAddresses,
    token_program: &Address,
    mint: &Address,
    mint_authority: &Address,
    freeze_authority: Option<&Address>,
    decimals: u8,
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![AccountReference::writable(*mint)],
        None,
        TokenInstruction::InitializeMint2 {
            decimals,
            mint_authority: *mint_authority,
            freeze_authority: freeze_authority.copied(),
        },
    )
}

pub fn initialize_account3(
    programs: &ProgramAddresses,
    token_program: &Address,
    account: &Address,
    mint: &Address,
    owner: &Address,
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*account),
            AccountReference::read_only(*mint),
        ],
        None,
        TokenInstruction::InitializeAccount3 { owner: *owner },
    )
}

pub fn transfer(
    programs: &ProgramAddresses,
    token_program: &Address,
    source: &Address,
    destination: &Address,
    authority: &Address,
    signers: &[Address],
    amount: u64,
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*source),
            AccountReference::writable(*destination),
        ],
        Some((authority, signers)),
        TokenInstruction::Transfer { amount },
    )
}

pub fn approve(
    programs: &ProgramAddresses,
    token_program: &Address,
    source: &Address,
    delegate: &Address,
    owner: &Address,
    signers: &[Address],
    amount: u64,
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*source),
            AccountReference::read_only(*delegate),
        ],
        Some((owner, signers)),
        TokenInstruction::Approve { amount },
    )
}

pub fn revoke(
    programs: &ProgramAddresses,
    token_program: &Address,
    source: &Address,
    owner: &Address,
    signers: &[Address],
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![AccountReference::writable(*source)],
        Some((owner, signers)),
        TokenInstruction::Revoke,
    )
}

pub fn set_authority(
    programs: &ProgramAddresses,
    token_program: &Address,
    account_or_mint: &Address,
    new_authority: Option<&Address>,
    authority_type: AuthorityType,
    current_authority: &Address,
    signers: &[Address],
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![AccountReference::writable(*account_or_mint)],
        Some((current_authority, signers)),
        TokenInstruction::SetAuthority {
            authority_type,
            new_authority: new_authority.copied(),
        },
    )
}

pub fn mint_to(
    programs: &ProgramAddresses,
    token_program: &Address,
    mint: &Address,
    destination: &Address,
    mint_authority: &Address,
    signers: &[Address],
    amount: u64,
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*mint),
            AccountReference::writable(*destination),
        ],
        Some((mint_authority, signers)),
        TokenInstruction::MintTo { amount },
    )
}

pub fn burn(
    programs: &ProgramAddresses,
    token_program: &Address,
    account: &Address,
    mint: &Address,
    owner: &Address,
    signers: &[Address],
    amount: u64,
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*account),
            AccountReference::writable(*mint),
        ],
        Some((owner, signers)),
        TokenInstruction::Burn { amount },
    )
}

pub fn close_account(
    programs: &ProgramAddresses,
    token_program: &Address,
    account: &Address,
    destination: &Address,
    owner: &Address,
    signers: &[Address],
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*account),
            AccountReference::writable(*destination),
        ],
        Some((owner, signers)),
        TokenInstruction::CloseAccount,
    )
}

pub fn freeze_account(
    programs: &ProgramAddresses,
    token_program: &Address,
    account: &Address,
    mint: &Address,
    freeze_authority: &Address,
    signers: &[Address],
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*account),
            AccountReference::read_only(*mint),
        ],
        Some((freeze_authority, signers)),
        TokenInstruction::FreezeAccount,
    )
}

pub fn thaw_account(
    programs: &ProgramAddresses,
    token_program: &Address,
    account: &Address,
    mint: &Address,
    freeze_authority: &Address,
    signers: &[Address],
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*account),
            AccountReference::read_only(*mint),
        ],
        Some((freeze_authority, signers)),
        TokenInstruction::ThawAccount,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn transfer_checked(
    programs: &ProgramAddresses,
    token_program: &Address,
    source: &Address,
    mint: &Address,
    destination: &Address,
    authority: &Address,
    signers: &[Address],
    amount: u64,
    decimals: u8,
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*source),
            AccountReference::read_only(*mint),
            AccountReference::writable(*destination),
        ],
        Some((authority, signers)),
        TokenInstruction::TransferChecked { amount, decimals },
    )
}

#[allow(clippy::too_many_arguments)]
pub fn approve_checked(
    programs: &ProgramAddresses,
    token_program: &Address,
    source: &Address,
    mint: &Address,
    delegate: &Address,
    owner: &Address,
    signers: &[Address],
    amount: u64,
    decimals: u8,
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*source),
            AccountReference::read_only(*mint),
            AccountReference::read_only(*delegate),
        ],
        Some((owner, signers)),
        TokenInstruction::ApproveChecked { amount, decimals },
    )
}

#[allow(clippy::too_many_arguments)]
pub fn mint_to_checked(
    programs: &ProgramAddresses,
    token_program: &Address,
    mint: &Address,
    destination: &Address,
    mint_authority: &Address,
    signers: &[Address],
    amount: u64,
    decimals: u8,
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*mint),
            AccountReference::writable(*destination),
        ],
        Some((mint_authority, signers)),
        TokenInstruction::MintToChecked { amount, decimals },
    )
}

#[allow(clippy::too_many_arguments)]
pub fn burn_checked(
    programs: &ProgramAddresses,
    token_program: &Address,
    account: &Address,
    mint: &Address,
    owner: &Address,
    signers: &[Address],
    amount: u64,
    decimals: u8,
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![
            AccountReference::writable(*account),
            AccountReference::writable(*mint),
        ],
        Some((owner, signers)),
        TokenInstruction::BurnChecked { amount, decimals },
    )
}

pub fn sync_native(
    programs: &ProgramAddresses,
    token_program: &Address,
    account: &Address,
) -> Result<Instruction, CodecError> {
    token_ix(
        programs,
        token_program,
        vec![AccountReference::writable(*account)],
        None,
        TokenInstruction::SyncNative,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::test_support::addr;

    #[test]
    fn test_transfer_checked_layout() {
        let programs = ProgramAddresses::mainnet();
        let ix = transfer_checked(
            &programs,
            &programs.token_program,
            &addr(1),
            &addr(2),
            &addr(3),
            &addr(4),
            &[],
            1_000_000,
            6,
        )
        .unwrap();
        assert_eq!(
            ix.accounts,
            vec![
                AccountReference::writable(addr(1)),
                AccountReference::read_only(addr(2)),
                AccountReference::writable(addr(3)),
                AccountReference::signer(addr(4)),
            ]
        );
        assert_eq!(ix.data, hex::decode("0c40420f000000000006").unwrap());
    }

    #[test]
    fn test_multisig_authority() {
        let programs = ProgramAddresses::mainnet();
        let ix = transfer(
            &programs,
            &programs.token_program,
            &addr(1),
            &addr(2),
            &addr(3),
            &[addr(10), addr(11)],
            5,
        )
        .unwrap();
        assert_eq!(ix.accounts.len(), 5);
        assert_eq!(ix.accounts[2], AccountReference::read_only(addr(3)));
        assert_eq!(ix.accounts[3], AccountReference::signer(addr(10)));
        assert_eq!(ix.accounts[4], AccountReference::signer(addr(11)));
    }

    #[test]
    fn test_too_many_signers() {
        let programs = ProgramAddresses::mainnet();
        let signers: Vec<Address> = (0..12).map(addr).collect();
        assert!(matches!(
            revoke(&programs, &programs.token_program, &addr(1), &addr(2), &signers),
            Err(CodecError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_rejects_non_token_program() {
        let programs = ProgramAddresses::mainnet();
        assert!(matches!(
            sync_native(&programs, &programs.system_program, &addr(1)),
            Err(CodecError::IllegalArgument(_))
        ));
        let ix = sync_native(&programs, &programs.token_2022_program, &addr(1)).unwrap();
        assert_eq!(ix.program(), &programs.token_2022_program);
        assert_eq!(ix.data, vec![17]);
    }

    #[test]
    fn test_set_authority_option_tag() {
        let programs = ProgramAddresses::mainnet();
        let clear = set_authority(
            &programs,
            &programs.token_program,
            &addr(1),
            None,
            AuthorityType::CloseAccount,
            &addr(2),
            &[],
        )
        .unwrap();
        assert_eq!(clear.data, vec![6, 3, 0]);

        let set = set_authority(
            &programs,
            &programs.token_program,
            &addr(1),
            Some(&addr(5)),
            AuthorityType::AccountOwner,
            &addr(2),
            &[],
        )
        .unwrap();
        assert_eq!(set.data.len(), 3 + 32);
        assert_eq!(&set.data[..3], &[6, 2, 1]);
    }

    #[test]
    fn test_every_encoder_decodes_back() {
        let programs = ProgramAddresses::mainnet();
        let t = programs.token_program;
        let cases = vec![
            initialize_mint2(&programs, &t, &addr(1), &addr(2), Some(&addr(3)), 9).unwrap(),
            initialize_mint2(&programs, &t, &addr(1), &addr(2), None, 0).unwrap(),
            initialize_account3(&programs, &t, &addr(1), &addr(2), &addr(3)).unwrap(),
            approve(&programs, &t, &addr(1), &addr(2), &addr(3), &[], 7).unwrap(),
            mint_to(&programs, &t, &addr(1), &addr(2), &addr(3), &[], 8).unwrap(),
            burn(&programs, &t, &addr(1), &addr(2), &addr(3), &[], 9).unwrap(),
            close_account(&programs, &t, &addr(1), &addr(2), &addr(3), &[]).unwrap(),
            freeze_account(&programs, &t, &addr(1), &addr(2), &addr(3), &[]).unwrap(),
            thaw_account(&programs, &t, &addr(1), &addr(2), &addr(3), &[]).unwrap(),
            approve_checked(&programs, &t, &addr(1), &addr(2), &addr(3), &addr(4), &[], 1, 2).unwrap(),
            mint_to_checked(&programs, &t, &addr(1), &addr(2), &addr(3), &[], 1, 2).unwrap(),
            burn_checked(&programs, &t, &addr(1), &addr(2), &addr(3), &[], 1, 2).unwrap(),
        ];
        for ix in cases {
            let decoded = TokenInstruction::decode(&ix.data).unwrap();
            assert_eq!(decoded.to_data().unwrap(), ix.data, "{}", decoded.name());
        }
    }

    #[test]
    fn test_decode_unknown() {
        assert_eq!(
            TokenInstruction::decode(&[0]).unwrap_err(),
            CodecError::UnknownVariant {
                type_name: "TokenInstruction",
                ordinal: 0
            }
        );
    }
}
