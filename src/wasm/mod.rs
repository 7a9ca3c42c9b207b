mod address;
mod constants;
mod decoder;
mod encoder;

pub use address::WasmAddress;
pub use decoder::DecoderNamespace;
pub use encoder::EncoderNamespace;

// Re-export constants functions
pub use constants::*;

use serde::Serialize;
use wasm_bindgen::JsValue;

/// Serialize for JavaScript, with `u64` amounts as `BigInt`.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer =
        serde_wasm_bindgen::Serializer::new().serialize_large_number_types_as_bigints(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
