//! WASM binding for account-state decoding.
//!
//! Every decoder takes the raw account data plus the optional account
//! address and returns a plain object with camelCase keys, base-58 addresses
//! and `BigInt` amounts.

use super::to_js;
use crate::accounts::{
    decode_base64_account_data, AddressLookupTable, Mint, NonceAccount, StakeAccount, StakePool,
    TokenAccount, ValidatorList,
};
use crate::address::{Address, AddressExt};
use crate::config::ProgramAddresses;
use crate::instructions::instruction_name as decode_instruction_name;
use wasm_bindgen::prelude::*;

fn parse_optional(address: Option<String>) -> Result<Option<Address>, JsValue> {
    Ok(address
        .as_deref()
        .map(Address::from_base58)
        .transpose()?)
}

/// Namespace for account decoders.
#[wasm_bindgen]
pub struct DecoderNamespace;

#[wasm_bindgen]
impl DecoderNamespace {
    /// Decode the base64 `data` field of an RPC account response.
    #[wasm_bindgen]
    pub fn account_data_from_base64(encoded: &str) -> Result<Vec<u8>, JsValue> {
        Ok(decode_base64_account_data(encoded)?)
    }

    /// Decode a 200-byte stake account.
    ///
    /// When `current_epoch` is given the result also carries
    /// `activationState`: "activating", "active", "deactivating" or "inactive".
    #[wasm_bindgen]
    pub fn stake_account(
        data: &[u8],
        address: Option<String>,
        current_epoch: Option<u64>,
    ) -> Result<JsValue, JsValue> {
        let account = StakeAccount::decode(data, parse_optional(address)?)?;
        let value = to_js(&account)?;
        if let Some(epoch) = current_epoch {
            js_sys::Reflect::set(
                &value,
                &JsValue::from_str("activationState"),
                &JsValue::from_str(account.activation_state(epoch).as_str()),
            )?;
        }
        Ok(value)
    }

    /// Decode an 80-byte nonce account.
    #[wasm_bindgen]
    pub fn nonce_account(data: &[u8], address: Option<String>) -> Result<JsValue, JsValue> {
        to_js(&NonceAccount::decode(data, parse_optional(address)?)?)
    }

    #[wasm_bindgen]
    pub fn token_account(data: &[u8], address: Option<String>) -> Result<JsValue, JsValue> {
        to_js(&TokenAccount::decode(data, parse_optional(address)?)?)
    }

    #[wasm_bindgen]
    pub fn mint(data: &[u8], address: Option<String>) -> Result<JsValue, JsValue> {
        to_js(&Mint::decode(data, parse_optional(address)?)?)
    }

    #[wasm_bindgen]
    pub fn stake_pool(data: &[u8], address: Option<String>) -> Result<JsValue, JsValue> {
        to_js(&StakePool::decode(data, parse_optional(address)?)?)
    }

    #[wasm_bindgen]
    pub fn validator_list(data: &[u8], address: Option<String>) -> Result<JsValue, JsValue> {
        to_js(&ValidatorList::decode(data, parse_optional(address)?)?)
    }

    #[wasm_bindgen]
    pub fn address_lookup_table(data: &[u8], address: Option<String>) -> Result<JsValue, JsValue> {
        to_js(&AddressLookupTable::decode(data, parse_optional(address)?)?)
    }

    /// Name of the instruction `data` encodes, or `undefined` for programs
    /// without a codec here.
    #[wasm_bindgen]
    pub fn instruction_name(program_id: &str, data: &[u8]) -> Result<Option<String>, JsValue> {
        let program_id = Address::from_base58(program_id)?;
        let name = decode_instruction_name(&ProgramAddresses::mainnet(), &program_id, data)?;
        Ok(name.map(str::to_string))
    }
}
