//! WASM surface tests; run with `wasm-pack test --node`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;
use wasm_solana_codec::wasm::{
    find_withdraw_authority_program_address, get_associated_token_address, stake_account_space,
    system_program_id, token_program_id,
};
use wasm_solana_codec::{DecoderNamespace, EncoderNamespace, WasmAddress};

const WALLET: &str = "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH";
const RECIPIENT: &str = "DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB";
const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

#[wasm_bindgen_test]
fn test_constants() {
    assert_eq!(system_program_id(), "11111111111111111111111111111111");
    assert_eq!(stake_account_space(), 200);
}

#[wasm_bindgen_test]
fn test_address_round_trip() {
    let address = WasmAddress::from_base58(WALLET).unwrap();
    assert_eq!(address.to_base58(), WALLET);
    assert!(WasmAddress::from_bytes(&[1, 2, 3]).is_err());
}

#[wasm_bindgen_test]
fn test_derivations() {
    let ata = get_associated_token_address(WALLET, USDC_MINT, &token_program_id()).unwrap();
    assert_ne!(ata, WALLET);
    assert!(find_withdraw_authority_program_address("not an address").is_err());
}

#[wasm_bindgen_test]
fn test_encode_transfer() {
    let ix = EncoderNamespace::transfer(WALLET, RECIPIENT, 3_000).unwrap();
    let data = js_sys::Reflect::get(&ix, &JsValue::from_str("data")).unwrap();
    let data: Vec<u8> = serde_wasm_bindgen::from_value(data).unwrap();
    assert_eq!(data, vec![2, 0, 0, 0, 0xb8, 0x0b, 0, 0, 0, 0, 0, 0]);
}

#[wasm_bindgen_test]
fn test_decode_stake_account_with_epoch() {
    let mut data = vec![0u8; 200];
    data[0] = 2;
    data[172..180].copy_from_slice(&u64::MAX.to_le_bytes());
    data[164..172].copy_from_slice(&10u64.to_le_bytes());
    let account = DecoderNamespace::stake_account(&data, None, Some(50)).unwrap();
    let state = js_sys::Reflect::get(&account, &JsValue::from_str("activationState")).unwrap();
    assert_eq!(state.as_string().as_deref(), Some("active"));
}

#[wasm_bindgen_test]
fn test_instruction_name() {
    let name = DecoderNamespace::instruction_name(
        "11111111111111111111111111111111",
        &[2, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
    )
    .unwrap();
    assert_eq!(name.as_deref(), Some("Transfer"));
}
