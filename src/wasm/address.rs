//! WASM bindings for account addresses.
//!
//! Wraps `solana_pubkey::Pubkey` for JavaScript.

use crate::address::{Address, AddressExt};
use crate::error::CodecError;
use wasm_bindgen::prelude::*;

/// WASM wrapper for a 32-byte account address.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmAddress {
    inner: Address,
}

#[wasm_bindgen]
impl WasmAddress {
    /// Parse an address from base-58 text.
    #[wasm_bindgen]
    pub fn from_base58(address: &str) -> Result<WasmAddress, CodecError> {
        Address::from_base58(address).map(|inner| WasmAddress { inner })
    }

    /// Create an address from exactly 32 bytes.
    #[wasm_bindgen]
    pub fn from_bytes(bytes: &[u8]) -> Result<WasmAddress, CodecError> {
        Address::from_bytes_checked(bytes).map(|inner| WasmAddress { inner })
    }

    #[wasm_bindgen]
    pub fn to_base58(&self) -> String {
        self.inner.to_string()
    }

    #[wasm_bindgen]
    pub fn to_bytes(&self) -> js_sys::Uint8Array {
        let bytes = self.inner.to_bytes();
        js_sys::Uint8Array::from(&bytes[..])
    }

    #[wasm_bindgen]
    pub fn equals(&self, other: &WasmAddress) -> bool {
        self.inner == other.inner
    }

    /// Program-derived addresses are off the curve.
    #[wasm_bindgen]
    pub fn is_on_curve(&self) -> bool {
        self.inner.is_on_curve()
    }
}

impl WasmAddress {
    pub fn from_inner(inner: Address) -> Self {
        WasmAddress { inner }
    }

    pub fn inner(&self) -> &Address {
        &self.inner
    }
}
