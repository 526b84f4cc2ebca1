// Test utilities for the trade-staking program

#![allow(dead_code)]

use anchor_lang::{AccountDeserialize, AccountSerialize, AnchorDeserialize, AnchorSerialize};
use litesvm::{types::TransactionResult, LiteSVM};
use litesvm_token::{CreateAssociatedTokenAccount, CreateMint, MintTo};
use sha2::{Digest, Sha256};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use spl_associated_token_account::get_associated_token_address;
use trade_staking::state::{ConfigUpdate, Pool};

// Program ID matching declare_id!
pub const PROGRAM_ID: Pubkey = Pubkey::new_from_array(trade_staking::ID.to_bytes());

// Standard program IDs
pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = spl_associated_token_account::ID;
use solana_system_interface::program::ID as system_program;

// PDA Seeds
pub const CONFIG: &[u8] = b"config";
pub const POOL: &[u8] = b"pool";
pub const GOVERNANCE: &[u8] = b"governance";
pub const VAULT_AUTHORITY: &[u8] = b"vault_authority";
pub const SUPPORTED_TOKEN: &[u8] = b"token";
pub const STAKER: &[u8] = b"staker";
pub const STAKE_RECORD: &[u8] = b"stake";
pub const PROPOSAL: &[u8] = b"proposal";
pub const VOTE_RECEIPT: &[u8] = b"receipt";

// Stable-value test token
pub const DECIMALS: u8 = 6;
pub const ONE_TOKEN: u64 = 1_000_000;
pub const USD: u128 = 1_000_000_000_000_000_000;

// Protocol parameters used by every test
pub const MINIMUM_STAKE: u128 = 1_000 * USD;
pub const DAY: i64 = 86_400;
pub const NORMAL_LOCK: i64 = 30 * DAY;
pub const INITIAL_RATE: u64 = 1_000;
pub const RATE_STEP: u64 = 10;
pub const EMERGENCY_PENALTY: u8 = 10;

// ======================== HELPERS ========================

/// Anchor instruction discriminator: first 8 bytes of sha256("global:method_name")
pub fn anchor_discriminator(method: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("global:{}", method).as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&digest[..8]);
    discriminator
}

// Setup LiteSVM with the staking program
pub fn setup_svm() -> LiteSVM {
    let mut svm = LiteSVM::new();
    let program_bytes = include_bytes!("../../../target/deploy/trade_staking.so");
    let _ = svm.add_program(PROGRAM_ID, program_bytes);
    svm
}

// Create and fund account
pub fn create_funded_account(svm: &mut LiteSVM, lamports: u64) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), lamports)
        .expect("Airdrop should succeed");
    keypair
}

pub fn send(svm: &mut LiteSVM, ix: Instruction, signer: &Keypair) -> TransactionResult {
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&signer.pubkey()),
        &[signer],
        svm.latest_blockhash(),
    );
    let result = svm.send_transaction(tx);
    svm.expire_blockhash();
    result
}

// Runs a read view and decodes its return data
pub fn view<T: AnchorDeserialize>(svm: &mut LiteSVM, ix: Instruction, payer: &Keypair) -> T {
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&payer.pubkey()),
        &[payer],
        svm.latest_blockhash(),
    );
    let simulated = svm
        .simulate_transaction(tx)
        .unwrap_or_else(|e| panic!("view failed: {:?}", e));
    T::try_from_slice(&simulated.meta.return_data.data).expect("return data should decode")
}

pub fn fetch<T: AccountDeserialize>(svm: &LiteSVM, address: &Pubkey) -> T {
    let account = svm.get_account(address).expect("account should exist");
    T::try_deserialize(&mut account.data.as_slice()).expect("account should decode")
}

// Anchor custom errors are reported as 6000 + variant index
pub fn assert_staking_error(
    result: TransactionResult,
    expected: trade_staking::errors::StakingError,
) {
    let code = expected as u32 + anchor_lang::error::ERROR_CODE_OFFSET;
    match result {
        Ok(_) => panic!("expected error {} but the transaction succeeded", code),
        Err(failed) => {
            let rendered = format!("{:?}", failed.err);
            assert!(
                rendered.contains(&format!("Custom({})", code)),
                "expected custom error {}, got {}",
                code,
                rendered
            );
        }
    }
}

pub fn to_sdk(key: anchor_lang::prelude::Pubkey) -> Pubkey {
    Pubkey::new_from_array(key.to_bytes())
}

// Advance the SVM clock by the specified number of seconds
pub fn advance_time(svm: &mut LiteSVM, seconds: i64) {
    let mut clock: solana_sdk::clock::Clock = svm.get_sysvar();
    clock.unix_timestamp += seconds;
    svm.set_sysvar(&clock);
    svm.expire_blockhash();
}

// Leaves the pool flagged as mid-call, as a nested self-invocation would see it
pub fn set_call_in_progress(svm: &mut LiteSVM) {
    let address = derive_pool_pda().0;
    let mut account = svm.get_account(&address).expect("pool should exist");
    let mut pool: Pool = fetch(svm, &address);
    pool.call_in_progress = true;
    pool.try_serialize(&mut account.data.as_mut_slice())
        .expect("pool should serialize");
    svm.set_account(address, account).expect("pool write should succeed");
}

pub fn now(svm: &LiteSVM) -> i64 {
    let clock: solana_sdk::clock::Clock = svm.get_sysvar();
    clock.unix_timestamp
}

// ======================== PDAS ========================

pub fn derive_config_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG], &PROGRAM_ID)
}

pub fn derive_pool_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL], &PROGRAM_ID)
}

pub fn derive_governance_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GOVERNANCE], &PROGRAM_ID)
}

pub fn derive_vault_authority_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_AUTHORITY], &PROGRAM_ID)
}

pub fn derive_vault(mint: &Pubkey) -> Pubkey {
    get_associated_token_address(&derive_vault_authority_pda().0, mint)
}

pub fn derive_supported_token_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SUPPORTED_TOKEN, mint.as_ref()], &PROGRAM_ID)
}

pub fn derive_staker_pda(owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKER, owner.as_ref()], &PROGRAM_ID)
}

pub fn derive_stake_record_pda(owner: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKE_RECORD, owner.as_ref(), mint.as_ref()], &PROGRAM_ID)
}

pub fn derive_proposal_pda(proposal_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[PROPOSAL, &proposal_id.to_le_bytes()], &PROGRAM_ID)
}

pub fn derive_receipt_pda(proposal: &Pubkey, voter: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VOTE_RECEIPT, proposal.as_ref(), voter.as_ref()], &PROGRAM_ID)
}

// ======================== INSTRUCTIONS ========================

pub fn build_initialize_ix(
    admin: &Pubkey,
    minimum_stake: u128,
    normal_lock_duration: i64,
    initial_reward_rate: u64,
    rate_reduction_step: u64,
    emergency_penalty: u8,
) -> Instruction {
    let mut data = anchor_discriminator("initialize").to_vec();
    data.extend_from_slice(&minimum_stake.to_le_bytes());
    data.extend_from_slice(&normal_lock_duration.to_le_bytes());
    data.extend_from_slice(&initial_reward_rate.to_le_bytes());
    data.extend_from_slice(&rate_reduction_step.to_le_bytes());
    data.push(emergency_penalty);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*admin, true),
            AccountMeta::new(derive_config_pda().0, false),
            AccountMeta::new(derive_pool_pda().0, false),
            AccountMeta::new(derive_governance_pda().0, false),
            AccountMeta::new_readonly(derive_vault_authority_pda().0, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

// `update` is the Borsh encoding of a ConfigUpdate: variant index then payload
pub fn build_update_config_ix(admin: &Pubkey, update: ConfigUpdate) -> Instruction {
    let mut data = anchor_discriminator("update_config").to_vec();
    update
        .serialize(&mut data)
        .expect("config update should serialize");

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*admin, true),
            AccountMeta::new(derive_config_pda().0, false),
            AccountMeta::new(derive_pool_pda().0, false),
        ],
        data,
    }
}

pub fn build_add_supported_token_ix(admin: &Pubkey, mint: &Pubkey) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*admin, true),
            AccountMeta::new_readonly(derive_config_pda().0, false),
            AccountMeta::new_readonly(derive_pool_pda().0, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(derive_supported_token_pda(mint).0, false),
            AccountMeta::new_readonly(derive_vault_authority_pda().0, false),
            AccountMeta::new(derive_vault(mint), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: anchor_discriminator("add_supported_token").to_vec(),
    }
}

pub fn build_remove_supported_token_ix(admin: &Pubkey, mint: &Pubkey) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*admin, true),
            AccountMeta::new_readonly(derive_config_pda().0, false),
            AccountMeta::new(derive_supported_token_pda(mint).0, false),
        ],
        data: anchor_discriminator("remove_supported_token").to_vec(),
    }
}

pub fn build_deposit_ix(
    owner: &Pubkey,
    mint: &Pubkey,
    amount: u64,
    requested_deadline: i64,
) -> Instruction {
    let mut data = anchor_discriminator("deposit").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());
    data.extend_from_slice(&requested_deadline.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*owner, true),
            AccountMeta::new_readonly(derive_config_pda().0, false),
            AccountMeta::new(derive_pool_pda().0, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(derive_supported_token_pda(mint).0, false),
            AccountMeta::new(derive_vault(mint), false),
            AccountMeta::new(get_associated_token_address(owner, mint), false),
            AccountMeta::new(derive_staker_pda(owner).0, false),
            AccountMeta::new(derive_stake_record_pda(owner, mint).0, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

// Shared by withdraw and emergency_exit
fn unstake_accounts(owner: &Pubkey, mint: &Pubkey) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new_readonly(derive_config_pda().0, false),
        AccountMeta::new(derive_pool_pda().0, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new(derive_supported_token_pda(mint).0, false),
        AccountMeta::new_readonly(derive_vault_authority_pda().0, false),
        AccountMeta::new(derive_vault(mint), false),
        AccountMeta::new(get_associated_token_address(owner, mint), false),
        AccountMeta::new(derive_staker_pda(owner).0, false),
        AccountMeta::new(derive_stake_record_pda(owner, mint).0, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
    ]
}

pub fn build_withdraw_ix(owner: &Pubkey, mint: &Pubkey, amount: u64) -> Instruction {
    let mut data = anchor_discriminator("withdraw").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: unstake_accounts(owner, mint),
        data,
    }
}

pub fn build_emergency_exit_ix(owner: &Pubkey, mint: &Pubkey) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: unstake_accounts(owner, mint),
        data: anchor_discriminator("emergency_exit").to_vec(),
    }
}

pub fn build_claim_rewards_ix(owner: &Pubkey, mint: &Pubkey) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*owner, true),
            AccountMeta::new(derive_pool_pda().0, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(derive_supported_token_pda(mint).0, false),
            AccountMeta::new_readonly(derive_vault_authority_pda().0, false),
            AccountMeta::new(derive_vault(mint), false),
            AccountMeta::new(get_associated_token_address(owner, mint), false),
            AccountMeta::new(derive_stake_record_pda(owner, mint).0, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: anchor_discriminator("claim_rewards").to_vec(),
    }
}

pub fn build_fund_rewards_ix(funder: &Pubkey, mint: &Pubkey, amount: u64) -> Instruction {
    let mut data = anchor_discriminator("fund_rewards").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*funder, true),
            AccountMeta::new(derive_pool_pda().0, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(derive_supported_token_pda(mint).0, false),
            AccountMeta::new(derive_vault(mint), false),
            AccountMeta::new(get_associated_token_address(funder, mint), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data,
    }
}

// apply_as_financier and the revocation lifecycle share an account list
pub fn build_financier_ix(method: &str, owner: &Pubkey, mints: &[Pubkey]) -> Instruction {
    let mut accounts = vec![
        AccountMeta::new_readonly(*owner, true),
        AccountMeta::new_readonly(derive_config_pda().0, false),
        AccountMeta::new(derive_pool_pda().0, false),
        AccountMeta::new(derive_staker_pda(owner).0, false),
    ];
    accounts.extend(
        mints
            .iter()
            .map(|mint| AccountMeta::new(derive_stake_record_pda(owner, mint).0, false)),
    );

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data: anchor_discriminator(method).to_vec(),
    }
}

pub fn build_refresh_voting_power_ix(caller: &Pubkey, accounts: &[Pubkey]) -> Instruction {
    let mut metas = vec![
        AccountMeta::new_readonly(*caller, true),
        AccountMeta::new_readonly(derive_pool_pda().0, false),
    ];
    metas.extend(accounts.iter().map(|key| AccountMeta::new(*key, false)));

    Instruction {
        program_id: PROGRAM_ID,
        accounts: metas,
        data: anchor_discriminator("refresh_voting_power").to_vec(),
    }
}

pub fn build_create_proposal_ix(
    proposer: &Pubkey,
    proposal_id: u64,
    title: &str,
    description: &str,
) -> Instruction {
    let mut data = anchor_discriminator("create_proposal").to_vec();
    data.extend_from_slice(&proposal_id.to_le_bytes());
    // Borsh serialization: len (4 bytes) + string bytes
    data.extend_from_slice(&(title.len() as u32).to_le_bytes());
    data.extend_from_slice(title.as_bytes());
    data.extend_from_slice(&(description.len() as u32).to_le_bytes());
    data.extend_from_slice(description.as_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*proposer, true),
            AccountMeta::new_readonly(derive_config_pda().0, false),
            AccountMeta::new(derive_pool_pda().0, false),
            AccountMeta::new(derive_governance_pda().0, false),
            AccountMeta::new_readonly(derive_staker_pda(proposer).0, false),
            AccountMeta::new(derive_proposal_pda(proposal_id).0, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

pub fn build_vote_ix(voter: &Pubkey, proposal_id: u64, support: bool) -> Instruction {
    let proposal = derive_proposal_pda(proposal_id).0;
    let mut data = anchor_discriminator("vote_on_proposal").to_vec();
    data.push(support as u8);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*voter, true),
            AccountMeta::new_readonly(derive_config_pda().0, false),
            AccountMeta::new(derive_pool_pda().0, false),
            AccountMeta::new(derive_governance_pda().0, false),
            AccountMeta::new_readonly(derive_staker_pda(voter).0, false),
            AccountMeta::new(proposal, false),
            AccountMeta::new(derive_receipt_pda(&proposal, voter).0, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

pub fn build_finalize_vote_ix(caller: &Pubkey, proposal_id: u64) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*caller, true),
            AccountMeta::new_readonly(derive_config_pda().0, false),
            AccountMeta::new(derive_pool_pda().0, false),
            AccountMeta::new(derive_governance_pda().0, false),
            AccountMeta::new(derive_proposal_pda(proposal_id).0, false),
        ],
        data: anchor_discriminator("finalize_vote").to_vec(),
    }
}

pub fn build_execute_proposal_ix(executor: &Pubkey, proposal_id: u64) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*executor, true),
            AccountMeta::new(derive_pool_pda().0, false),
            AccountMeta::new(derive_governance_pda().0, false),
            AccountMeta::new(derive_proposal_pda(proposal_id).0, false),
        ],
        data: anchor_discriminator("execute_proposal").to_vec(),
    }
}

pub fn build_get_stake_info_ix(owner: &Pubkey, mints: &[Pubkey]) -> Instruction {
    let mut accounts = vec![
        AccountMeta::new_readonly(derive_pool_pda().0, false),
        AccountMeta::new_readonly(derive_staker_pda(owner).0, false),
    ];
    accounts.extend(
        mints
            .iter()
            .map(|mint| AccountMeta::new_readonly(derive_stake_record_pda(owner, mint).0, false)),
    );

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data: anchor_discriminator("get_stake_info").to_vec(),
    }
}

pub fn build_get_pool_stats_ix(mints: &[Pubkey]) -> Instruction {
    let mut accounts = vec![
        AccountMeta::new_readonly(derive_pool_pda().0, false),
        AccountMeta::new_readonly(derive_vault_authority_pda().0, false),
    ];
    accounts.extend(
        mints
            .iter()
            .map(|mint| AccountMeta::new_readonly(derive_vault(mint), false)),
    );

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data: anchor_discriminator("get_pool_stats").to_vec(),
    }
}

pub fn build_list_ix(method: &str, profiles_of: &[Pubkey]) -> Instruction {
    let mut accounts = vec![AccountMeta::new_readonly(derive_pool_pda().0, false)];
    accounts.extend(
        profiles_of
            .iter()
            .map(|owner| AccountMeta::new_readonly(derive_staker_pda(owner).0, false)),
    );

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data: anchor_discriminator(method).to_vec(),
    }
}

pub fn build_get_vote_receipt_ix(proposal_id: u64, voter: &Pubkey) -> Instruction {
    let proposal = derive_proposal_pda(proposal_id).0;
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(proposal, false),
            AccountMeta::new_readonly(*voter, false),
            AccountMeta::new_readonly(derive_receipt_pda(&proposal, voter).0, false),
        ],
        data: anchor_discriminator("get_vote_receipt").to_vec(),
    }
}

// ======================== FIXTURES ========================

pub struct Fixture {
    pub svm: LiteSVM,
    pub admin: Keypair,
    pub mint: Pubkey,
}

// Initialized program with one supported 6-decimal token
pub fn setup_protocol() -> Fixture {
    let mut svm = setup_svm();
    let admin = create_funded_account(&mut svm, 10 * LAMPORTS_PER_SOL);

    let ix = build_initialize_ix(
        &admin.pubkey(),
        MINIMUM_STAKE,
        NORMAL_LOCK,
        INITIAL_RATE,
        RATE_STEP,
        EMERGENCY_PENALTY,
    );
    send(&mut svm, ix, &admin).expect("initialize should succeed");

    let mint = create_token(&mut svm, &admin);

    Fixture { svm, admin, mint }
}

pub fn create_token(svm: &mut LiteSVM, admin: &Keypair) -> Pubkey {
    let mint = CreateMint::new(svm, admin)
        .authority(&admin.pubkey())
        .decimals(DECIMALS)
        .send()
        .expect("Mint creation should succeed");

    let ix = build_add_supported_token_ix(&admin.pubkey(), &mint);
    send(svm, ix, admin).expect("add_supported_token should succeed");
    mint
}

// Funded wallet holding `tokens` whole tokens of `mint`
pub fn create_staker(svm: &mut LiteSVM, admin: &Keypair, mint: &Pubkey, tokens: u64) -> Keypair {
    let staker = create_funded_account(svm, 10 * LAMPORTS_PER_SOL);
    let ata = CreateAssociatedTokenAccount::new(svm, admin, mint)
        .owner(&staker.pubkey())
        .send()
        .expect("ATA creation should succeed");
    MintTo::new(svm, admin, mint, &ata, tokens * ONE_TOKEN)
        .owner(admin)
        .send()
        .expect("Mint to staker should succeed");
    staker
}

pub fn build_get_governance_stats_ix() -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(derive_config_pda().0, false),
            AccountMeta::new_readonly(derive_governance_pda().0, false),
        ],
        data: anchor_discriminator("get_governance_stats").to_vec(),
    }
}

pub fn build_list_active_proposals_ix(proposal_ids: &[u64]) -> Instruction {
    let mut accounts = vec![AccountMeta::new_readonly(derive_governance_pda().0, false)];
    accounts.extend(
        proposal_ids
            .iter()
            .map(|id| AccountMeta::new_readonly(derive_proposal_pda(*id).0, false)),
    );

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data: anchor_discriminator("list_active_proposals").to_vec(),
    }
}
