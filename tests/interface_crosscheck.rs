//! Encoders and decoders checked byte-for-byte against the official program
//! interface crates.

use rstest::rstest;
use wasm_solana_codec::accounts::{
    AddressLookupTable, NonceAccount, NonceState, NonceVersion, StakeAccount, StakePool,
    StakeState, ValidatorList,
};
use wasm_solana_codec::derivation::{
    find_associated_token_address, find_lookup_table_address, find_withdraw_authority,
};
use wasm_solana_codec::instructions::stake::{Authorized, StakeInstruction};
use wasm_solana_codec::instructions::stake_pool::{
    DepositSolAccounts, FeeType, StakePoolAccounts, StakePoolInstruction, WithdrawSolAccounts,
};
use wasm_solana_codec::instructions::{
    associated_token, compute_budget, lookup_table, stake, stake_pool, system, token,
};
use wasm_solana_codec::accounts::{Fee, Lockup};
use wasm_solana_codec::{Address, CurveDeriver, Instruction, ProgramAddresses};

type Meta = ([u8; 32], bool, bool);

fn addr(n: u8) -> Address {
    Address::from([n; 32])
}

/// Any 32-byte address type of the interface crates.
fn to<T: From<[u8; 32]>>(address: &Address) -> T {
    T::from(address.to_bytes())
}

fn metas(ix: &Instruction) -> Vec<Meta> {
    ix.accounts
        .iter()
        .map(|a| (a.address.to_bytes(), a.is_signer, a.is_writable))
        .collect()
}

macro_rules! official_metas {
    ($ix:expr) => {
        $ix.accounts
            .iter()
            .map(|m| (m.pubkey.to_bytes(), m.is_signer, m.is_writable))
            .collect::<Vec<Meta>>()
    };
}

macro_rules! assert_same_instruction {
    ($ours:expr, $official:expr) => {{
        let ours = &$ours;
        let official = &$official;
        assert_eq!(ours.program().to_bytes(), official.program_id.to_bytes());
        assert_eq!(metas(ours), official_metas!(official));
        assert_eq!(ours.data, official.data);
    }};
}

#[test]
fn test_program_ids_match_interface_crates() {
    let programs = ProgramAddresses::mainnet();
    assert_eq!(
        programs.stake_program.to_bytes(),
        solana_stake_interface::program::ID.to_bytes()
    );
    assert_eq!(
        programs.stake_pool_program.to_bytes(),
        spl_stake_pool::id().to_bytes()
    );
    assert_eq!(programs.token_program.to_bytes(), spl_token::id().to_bytes());
    assert_eq!(
        programs.associated_token_program.to_bytes(),
        spl_associated_token_account::id().to_bytes()
    );
}

// System program

#[test]
fn test_system_transfer() {
    let programs = ProgramAddresses::mainnet();
    let ours = system::transfer(&programs, &addr(1), &addr(2), 3_000).unwrap();
    let official = solana_system_interface::instruction::transfer(&to(&addr(1)), &to(&addr(2)), 3_000);
    assert_same_instruction!(ours, official);
}

#[test]
fn test_system_create_account() {
    let programs = ProgramAddresses::mainnet();
    let ours = system::create_account(&programs, &addr(1), &addr(2), 2_282_880, 200, &addr(3)).unwrap();
    let official = solana_system_interface::instruction::create_account(
        &to(&addr(1)),
        &to(&addr(2)),
        2_282_880,
        200,
        &to(&addr(3)),
    );
    assert_same_instruction!(ours, official);
}

#[test]
fn test_system_allocate_and_assign() {
    let programs = ProgramAddresses::mainnet();
    assert_same_instruction!(
        system::allocate(&programs, &addr(4), 165).unwrap(),
        solana_system_interface::instruction::allocate(&to(&addr(4)), 165)
    );
    assert_same_instruction!(
        system::assign(&programs, &addr(4), &addr(5)).unwrap(),
        solana_system_interface::instruction::assign(&to(&addr(4)), &to(&addr(5)))
    );
}

#[test]
fn test_system_nonce_instructions() {
    let programs = ProgramAddresses::mainnet();
    assert_same_instruction!(
        system::advance_nonce_account(&programs, &addr(6), &addr(7)).unwrap(),
        solana_system_interface::instruction::advance_nonce_account(&to(&addr(6)), &to(&addr(7)))
    );
    assert_same_instruction!(
        system::withdraw_nonce_account(&programs, &addr(6), &addr(7), &addr(8), 10).unwrap(),
        solana_system_interface::instruction::withdraw_nonce_account(
            &to(&addr(6)),
            &to(&addr(7)),
            &to(&addr(8)),
            10
        )
    );
    assert_same_instruction!(
        system::authorize_nonce_account(&programs, &addr(6), &addr(7), &addr(9)).unwrap(),
        solana_system_interface::instruction::authorize_nonce_account(
            &to(&addr(6)),
            &to(&addr(7)),
            &to(&addr(9))
        )
    );
}

#[rstest]
#[case::base_is_funder(1)]
#[case::separate_base(3)]
fn test_system_create_account_with_seed(#[case] base: u8) {
    let programs = ProgramAddresses::mainnet();
    let ours = system::create_account_with_seed(
        &programs,
        &addr(1),
        &addr(2),
        &addr(base),
        "stake:0",
        2_282_880,
        200,
        &addr(4),
    )
    .unwrap();
    let official = solana_system_interface::instruction::create_account_with_seed(
        &to(&addr(1)),
        &to(&addr(2)),
        &to(&addr(base)),
        "stake:0",
        2_282_880,
        200,
        &to(&addr(4)),
    );
    assert_same_instruction!(ours, official);
}

#[test]
fn test_system_allocate_and_assign_with_seed() {
    let programs = ProgramAddresses::mainnet();
    assert_same_instruction!(
        system::allocate_with_seed(&programs, &addr(2), &addr(3), "vault", 165, &addr(4))
            .unwrap(),
        solana_system_interface::instruction::allocate_with_seed(
            &to(&addr(2)),
            &to(&addr(3)),
            "vault",
            165,
            &to(&addr(4))
        )
    );
    assert_same_instruction!(
        system::assign_with_seed(&programs, &addr(2), &addr(3), "vault", &addr(4)).unwrap(),
        solana_system_interface::instruction::assign_with_seed(
            &to(&addr(2)),
            &to(&addr(3)),
            "vault",
            &to(&addr(4))
        )
    );
}

#[test]
fn test_nonce_account_decodes_official_state() {
    use solana_nonce::{state::{Data, DurableNonce, State}, versions::Versions};

    let durable_nonce = DurableNonce::from_blockhash(&Default::default());
    let data = Data::new(to(&addr(7)), durable_nonce, 5_000);
    let bytes = bincode::serialize(&Versions::new(State::Initialized(data.clone()))).unwrap();
    assert_eq!(bytes.len(), 80);

    let account = NonceAccount::decode(&bytes, None).unwrap();
    assert_eq!(account.version, NonceVersion::Current);
    assert_eq!(account.state, NonceState::Initialized);
    assert_eq!(account.authority, addr(7));
    assert_eq!(
        account.durable_nonce.to_bytes().as_slice(),
        data.durable_nonce.as_hash().as_ref()
    );
    assert_eq!(account.lamports_per_signature, 5_000);
}

// Address lookup table program

#[test]
fn test_lookup_table_create() {
    use solana_address_lookup_table_interface::instruction as official;

    let programs = ProgramAddresses::mainnet();
    assert_eq!(
        programs.address_lookup_table_program.to_bytes(),
        solana_address_lookup_table_interface::program::ID.to_bytes()
    );

    let derived = find_lookup_table_address(&CurveDeriver, &programs, &addr(1), 4_242).unwrap();
    let (official_address, official_bump) =
        official::derive_lookup_table_address(&to(&addr(1)), 4_242);
    assert_eq!(derived.address.to_bytes(), official_address.to_bytes());
    assert_eq!(derived.bump, official_bump);

    let ours = lookup_table::create_lookup_table(
        &programs,
        &derived.address,
        &addr(1),
        &addr(2),
        4_242,
        derived.bump,
    )
    .unwrap();
    let (official_ix, _) = official::create_lookup_table(to(&addr(1)), to(&addr(2)), 4_242);
    assert_same_instruction!(ours, official_ix);
}

#[rstest]
#[case::with_payer(true)]
#[case::without_payer(false)]
fn test_lookup_table_extend(#[case] with_payer: bool) {
    use solana_address_lookup_table_interface::instruction as official;

    let programs = ProgramAddresses::mainnet();
    let payer = addr(3);
    let ours = lookup_table::extend_lookup_table(
        &programs,
        &addr(1),
        &addr(2),
        with_payer.then_some(&payer),
        &[addr(5), addr(6)],
    )
    .unwrap();
    let official_ix = official::extend_lookup_table(
        to(&addr(1)),
        to(&addr(2)),
        with_payer.then(|| to(&payer)),
        vec![to(&addr(5)), to(&addr(6))],
    );
    assert_same_instruction!(ours, official_ix);
}

#[test]
fn test_lookup_table_lifecycle_instructions() {
    use solana_address_lookup_table_interface::instruction as official;

    let programs = ProgramAddresses::mainnet();
    assert_same_instruction!(
        lookup_table::freeze_lookup_table(&programs, &addr(1), &addr(2)).unwrap(),
        official::freeze_lookup_table(to(&addr(1)), to(&addr(2)))
    );
    assert_same_instruction!(
        lookup_table::deactivate_lookup_table(&programs, &addr(1), &addr(2)).unwrap(),
        official::deactivate_lookup_table(to(&addr(1)), to(&addr(2)))
    );
    assert_same_instruction!(
        lookup_table::close_lookup_table(&programs, &addr(1), &addr(2), &addr(3)).unwrap(),
        official::close_lookup_table(to(&addr(1)), to(&addr(2)), to(&addr(3)))
    );
}

#[rstest]
#[case::with_authority(Some(9))]
#[case::frozen(None)]
fn test_lookup_table_decodes_official_state(#[case] authority: Option<u8>) {
    use solana_address_lookup_table_interface::state::{LookupTableMeta, ProgramState};

    let mut meta = LookupTableMeta::new(to(&addr(0)));
    meta.authority = authority.map(|n| to(&addr(n)));
    meta.last_extended_slot = 77;
    meta.last_extended_slot_start_index = 1;

    // The metadata slot is fixed at 56 bytes whatever the authority option
    // serializes to; addresses follow it.
    let mut data = bincode::serialize(&ProgramState::LookupTable(meta)).unwrap();
    data.resize(56, 0);
    data.extend_from_slice(&[5u8; 32]);
    data.extend_from_slice(&[6u8; 32]);

    let table = AddressLookupTable::decode(&data, None).unwrap();
    assert!(table.is_active());
    assert_eq!(table.last_extended_slot, 77);
    assert_eq!(table.last_extended_slot_start_index, 1);
    assert_eq!(table.authority, authority.map(addr));
    assert_eq!(table.addresses, vec![addr(5), addr(6)]);
}

// Stake program

#[test]
fn test_stake_initialize() {
    use solana_stake_interface::state as official;

    let programs = ProgramAddresses::mainnet();
    let authorized = Authorized {
        staker: addr(2),
        withdrawer: addr(3),
    };
    let ours = stake::initialize(&programs, &addr(1), &authorized, &Lockup::default()).unwrap();
    let official = solana_stake_interface::instruction::initialize(
        &to(&addr(1)),
        &official::Authorized {
            staker: to(&addr(2)),
            withdrawer: to(&addr(3)),
        },
        &official::Lockup::default(),
    );
    assert_same_instruction!(ours, official);
}

#[test]
fn test_stake_delegate_deactivate_withdraw() {
    let programs = ProgramAddresses::mainnet();
    assert_same_instruction!(
        stake::delegate_stake(&programs, &addr(1), &addr(2), &addr(3)).unwrap(),
        solana_stake_interface::instruction::delegate_stake(
            &to(&addr(1)),
            &to(&addr(2)),
            &to(&addr(3))
        )
    );
    assert_same_instruction!(
        stake::deactivate(&programs, &addr(1), &addr(2)).unwrap(),
        solana_stake_interface::instruction::deactivate_stake(&to(&addr(1)), &to(&addr(2)))
    );
    assert_same_instruction!(
        stake::withdraw(&programs, &addr(1), &addr(2), &addr(4), 99, None).unwrap(),
        solana_stake_interface::instruction::withdraw(
            &to(&addr(1)),
            &to(&addr(2)),
            &to(&addr(4)),
            99,
            None
        )
    );
}

#[test]
fn test_stake_payloads_match_bincode() {
    use solana_stake_interface::instruction::StakeInstruction as Official;

    let ours = StakeInstruction::Split { lamports: 1_000 }.to_data().unwrap();
    assert_eq!(ours, bincode::serialize(&Official::Split(1_000)).unwrap());

    let ours = StakeInstruction::Deactivate.to_data().unwrap();
    assert_eq!(ours, bincode::serialize(&Official::Deactivate).unwrap());

    let ours = StakeInstruction::Merge.to_data().unwrap();
    assert_eq!(ours, bincode::serialize(&Official::Merge).unwrap());
}

#[test]
fn test_stake_account_decodes_official_state() {
    use solana_stake_interface::stake_flags::StakeFlags;
    use solana_stake_interface::state::{
        Authorized as OfficialAuthorized, Delegation, Lockup as OfficialLockup, Meta,
        Stake as OfficialStake, StakeStateV2,
    };

    let mut delegation = Delegation::new(&to(&addr(9)), 5_000_000_000, 100);
    delegation.deactivation_epoch = 200;
    let state = StakeStateV2::Stake(
        Meta {
            rent_exempt_reserve: 2_282_880,
            authorized: OfficialAuthorized {
                staker: to(&addr(1)),
                withdrawer: to(&addr(2)),
            },
            lockup: OfficialLockup {
                unix_timestamp: 1_700_000_000,
                epoch: 12,
                custodian: to(&addr(3)),
            },
        },
        OfficialStake {
            delegation,
            credits_observed: 77,
        },
        StakeFlags::empty(),
    );
    let mut data = bincode::serialize(&state).unwrap();
    data.resize(200, 0);

    let account = StakeAccount::decode(&data, None).unwrap();
    assert_eq!(account.state, StakeState::Stake);
    assert_eq!(account.rent_exempt_reserve, 2_282_880);
    assert_eq!(account.staker, addr(1));
    assert_eq!(account.withdrawer, addr(2));
    assert_eq!(account.lockup.unix_timestamp, 1_700_000_000);
    assert_eq!(account.lockup.epoch, 12);
    assert_eq!(account.lockup.custodian, addr(3));
    assert_eq!(account.voter, addr(9));
    assert_eq!(account.stake, 5_000_000_000);
    assert_eq!(account.activation_epoch, 100);
    assert_eq!(account.deactivation_epoch, 200);
    assert_eq!(account.credits_observed, 77);
}

// Compute budget program

#[test]
fn test_compute_budget() {
    use solana_compute_budget_interface::ComputeBudgetInstruction as Official;

    let programs = ProgramAddresses::mainnet();
    assert_same_instruction!(
        compute_budget::set_compute_unit_limit(&programs, 200_000).unwrap(),
        Official::set_compute_unit_limit(200_000)
    );
    assert_same_instruction!(
        compute_budget::set_compute_unit_price(&programs, 5_000).unwrap(),
        Official::set_compute_unit_price(5_000)
    );
}

// Token program

#[test]
fn test_token_transfer_checked() {
    let programs = ProgramAddresses::mainnet();
    let ours = token::transfer_checked(
        &programs,
        &programs.token_program,
        &addr(1),
        &addr(2),
        &addr(3),
        &addr(4),
        &[],
        1_500_000,
        6,
    )
    .unwrap();
    let official = spl_token::instruction::transfer_checked(
        &to(&programs.token_program),
        &to(&addr(1)),
        &to(&addr(2)),
        &to(&addr(3)),
        &to(&addr(4)),
        &[],
        1_500_000,
        6,
    )
    .unwrap();
    assert_same_instruction!(ours, official);
}

#[test]
fn test_token_payloads_match_pack() {
    use spl_token::instruction::TokenInstruction as Official;

    let programs = ProgramAddresses::mainnet();
    let token_program = programs.token_program;

    let ours = token::transfer(&programs, &token_program, &addr(1), &addr(2), &addr(3), &[], 42)
        .unwrap();
    assert_eq!(ours.data, Official::Transfer { amount: 42 }.pack());

    let ours = token::close_account(&programs, &token_program, &addr(1), &addr(2), &addr(3), &[])
        .unwrap();
    assert_eq!(ours.data, Official::CloseAccount.pack());

    let ours = token::sync_native(&programs, &token_program, &addr(1)).unwrap();
    assert_eq!(ours.data, Official::SyncNative.pack());
}

// Associated token account program

#[test]
fn test_associated_token_create_idempotent() {
    let programs = ProgramAddresses::mainnet();
    let owner = addr(1);
    let mint = addr(2);
    let derived = find_associated_token_address(
        &CurveDeriver,
        &programs,
        &owner,
        &mint,
        &programs.token_program,
    )
    .unwrap();
    let official_address =
        spl_associated_token_account::get_associated_token_address_with_program_id(
            &to(&owner),
            &to(&mint),
            &to(&programs.token_program),
        );
    assert_eq!(derived.address.to_bytes(), official_address.to_bytes());

    let ours = associated_token::create_idempotent(
        &programs,
        &addr(5),
        &derived.address,
        &owner,
        &mint,
        &programs.token_program,
    )
    .unwrap();
    let official =
        spl_associated_token_account::instruction::create_associated_token_account_idempotent(
            &to(&addr(5)),
            &to(&owner),
            &to(&mint),
            &to(&programs.token_program),
        );
    assert_same_instruction!(ours, official);
}

// Stake pool program

fn pool_accounts(programs: &ProgramAddresses) -> StakePoolAccounts {
    let stake_pool = addr(20);
    let withdraw_authority = find_withdraw_authority(&CurveDeriver, programs, &stake_pool)
        .unwrap()
        .address;
    StakePoolAccounts {
        stake_pool,
        withdraw_authority,
        default_deposit_authority: addr(21),
        stake_deposit_authority: addr(21),
        manager: addr(22),
        staker: addr(23),
        validator_list: addr(24),
        reserve_stake: addr(25),
        pool_mint: addr(26),
        manager_fee_account: addr(27),
        token_program: programs.token_program,
        sol_deposit_authority: None,
        sol_withdraw_authority: None,
    }
}

#[test]
fn test_stake_pool_withdraw_authority_matches() {
    let programs = ProgramAddresses::mainnet();
    let pool = addr(20);
    let ours = find_withdraw_authority(&CurveDeriver, &programs, &pool).unwrap();
    let (official, bump) = spl_stake_pool::find_withdraw_authority_program_address(
        &spl_stake_pool::id(),
        &to(&pool),
    );
    assert_eq!(ours.address.to_bytes(), official.to_bytes());
    assert_eq!(ours.bump, bump);
}

#[test]
fn test_stake_pool_deposit_sol() {
    let programs = ProgramAddresses::mainnet();
    let pool = pool_accounts(&programs);
    let user = DepositSolAccounts {
        lamports_from: addr(1),
        pool_tokens_to: addr(2),
        referrer_pool_tokens: addr(3),
    };
    let ours = stake_pool::deposit_sol(&programs, &pool, &user, 1_000_000_000).unwrap();
    let official = spl_stake_pool::instruction::deposit_sol(
        &spl_stake_pool::id(),
        &to(&pool.stake_pool),
        &to(&pool.withdraw_authority),
        &to(&pool.reserve_stake),
        &to(&user.lamports_from),
        &to(&user.pool_tokens_to),
        &to(&pool.manager_fee_account),
        &to(&user.referrer_pool_tokens),
        &to(&pool.pool_mint),
        &to(&pool.token_program),
        1_000_000_000,
    );
    assert_same_instruction!(ours, official);
}

#[test]
fn test_stake_pool_withdraw_sol() {
    let programs = ProgramAddresses::mainnet();
    let pool = pool_accounts(&programs);
    let user = WithdrawSolAccounts {
        user_transfer_authority: addr(1),
        pool_tokens_from: addr(2),
        lamports_to: addr(3),
    };
    let ours = stake_pool::withdraw_sol(&programs, &pool, &user, 500).unwrap();
    let official = spl_stake_pool::instruction::withdraw_sol(
        &spl_stake_pool::id(),
        &to(&pool.stake_pool),
        &to(&pool.withdraw_authority),
        &to(&user.user_transfer_authority),
        &to(&user.pool_tokens_from),
        &to(&pool.reserve_stake),
        &to(&user.lamports_to),
        &to(&pool.manager_fee_account),
        &to(&pool.pool_mint),
        &to(&pool.token_program),
        500,
    );
    assert_same_instruction!(ours, official);
}

#[test]
fn test_stake_pool_payloads_match_borsh() {
    use spl_stake_pool::instruction::StakePoolInstruction as Official;
    use spl_stake_pool::state::{Fee as OfficialFee, FeeType as OfficialFeeType};

    let cases = vec![
        (
            StakePoolInstruction::DepositSol { lamports: 7 },
            borsh::to_vec(&Official::DepositSol(7)).unwrap(),
        ),
        (
            StakePoolInstruction::WithdrawStake { pool_tokens: 9 },
            borsh::to_vec(&Official::WithdrawStake(9)).unwrap(),
        ),
        (
            StakePoolInstruction::DepositStake,
            borsh::to_vec(&Official::DepositStake).unwrap(),
        ),
        (
            StakePoolInstruction::UpdateStakePoolBalance,
            borsh::to_vec(&Official::UpdateStakePoolBalance).unwrap(),
        ),
        (
            StakePoolInstruction::UpdateValidatorListBalance {
                start_index: 3,
                no_merge: true,
            },
            borsh::to_vec(&Official::UpdateValidatorListBalance {
                start_index: 3,
                no_merge: true,
            })
            .unwrap(),
        ),
        (
            StakePoolInstruction::SetFee {
                fee: FeeType::Epoch(Fee::new(3, 100)),
            },
            borsh::to_vec(&Official::SetFee {
                fee: OfficialFeeType::Epoch(OfficialFee {
                    denominator: 100,
                    numerator: 3,
                }),
            })
            .unwrap(),
        ),
        (
            StakePoolInstruction::DepositSolWithSlippage {
                lamports_in: 10,
                minimum_pool_tokens_out: 8,
            },
            borsh::to_vec(&Official::DepositSolWithSlippage {
                lamports_in: 10,
                minimum_pool_tokens_out: 8,
            })
            .unwrap(),
        ),
    ];
    for (ours, official) in cases {
        assert_eq!(ours.to_data().unwrap(), official, "{}", ours.name());
        assert_eq!(StakePoolInstruction::decode(&official).unwrap(), ours);
    }
}

#[test]
fn test_stake_pool_account_decodes_official_state() {
    use spl_stake_pool::state::{
        AccountType, Fee as OfficialFee, FutureEpoch, StakePool as OfficialPool,
    };

    let mut official = OfficialPool {
        account_type: AccountType::StakePool,
        manager: to(&addr(1)),
        staker: to(&addr(2)),
        stake_deposit_authority: to(&addr(3)),
        stake_withdraw_bump_seed: 254,
        validator_list: to(&addr(4)),
        reserve_stake: to(&addr(5)),
        pool_mint: to(&addr(6)),
        manager_fee_account: to(&addr(7)),
        token_program_id: to(&addr(8)),
        total_lamports: 10_000_000_000,
        pool_token_supply: 9_000_000_000,
        last_update_epoch: 600,
        ..OfficialPool::default()
    };
    official.epoch_fee = OfficialFee {
        denominator: 100,
        numerator: 5,
    };
    official.next_epoch_fee = FutureEpoch::Two(OfficialFee {
        denominator: 100,
        numerator: 6,
    });
    official.preferred_withdraw_validator_vote_address = Some(to(&addr(9)));
    official.sol_deposit_authority = Some(to(&addr(10)));
    official.sol_referral_fee = 50;
    official.last_epoch_total_lamports = 42;
    let data = borsh::to_vec(&official).unwrap();

    let pool = StakePool::decode(&data, Some(addr(20))).unwrap();
    assert_eq!(pool.manager, addr(1));
    assert_eq!(pool.staker, addr(2));
    assert_eq!(pool.stake_deposit_authority, addr(3));
    assert_eq!(pool.stake_withdraw_bump_seed, 254);
    assert_eq!(pool.pool_mint, addr(6));
    assert_eq!(pool.token_program_id, addr(8));
    assert_eq!(pool.total_lamports, 10_000_000_000);
    assert_eq!(pool.pool_token_supply, 9_000_000_000);
    assert_eq!(pool.epoch_fee, Fee::new(5, 100));
    assert_eq!(
        pool.next_epoch_fee,
        wasm_solana_codec::accounts::FutureEpochFee::Two(Fee::new(6, 100))
    );
    assert_eq!(pool.preferred_deposit_validator_vote_address, None);
    assert_eq!(pool.preferred_withdraw_validator_vote_address, Some(addr(9)));
    assert_eq!(pool.sol_deposit_authority, Some(addr(10)));
    assert_eq!(pool.sol_referral_fee, 50);
    assert_eq!(pool.sol_withdraw_authority, None);
    assert_eq!(pool.last_epoch_total_lamports, 42);

    // Pool accounts are over-allocated on chain.
    let mut padded = data.clone();
    padded.resize(data.len() + 64, 0);
    assert_eq!(StakePool::decode(&padded, Some(addr(20))).unwrap(), pool);
}

#[test]
fn test_validator_list_decodes_official_state() {
    let official = spl_stake_pool::state::ValidatorList::new(4);
    let data = borsh::to_vec(&official).unwrap();
    let list = ValidatorList::decode(&data, None).unwrap();
    assert_eq!(list.max_validators, 4);
    assert_eq!(list.validators.len(), official.validators.len());
}
