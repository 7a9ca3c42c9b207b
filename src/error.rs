use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Failures raised while encoding instructions or decoding account state.
///
/// Every variant is deterministic for a given input; nothing here is worth
/// retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error(
        "{structure}: buffer too short reading {field} at offset {offset} \
         (need {needed} bytes, {available} available)"
    )]
    BufferTooShort {
        structure: &'static str,
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("unrecognized {type_name} variant: {ordinal}")]
    UnknownVariant {
        type_name: &'static str,
        ordinal: u32,
    },

    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    #[error("{structure}: {field} is not valid UTF-8")]
    InvalidUtf8 {
        structure: &'static str,
        field: &'static str,
    },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("{structure}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        structure: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{structure}: {count} entries exceed the capacity of {capacity}")]
    CapacityExceeded {
        structure: &'static str,
        count: u32,
        capacity: u32,
    },
}

impl CodecError {
    pub fn illegal_argument(msg: impl Into<String>) -> Self {
        CodecError::IllegalArgument(msg.into())
    }

    pub fn unknown_variant(type_name: &'static str, ordinal: impl Into<u32>) -> Self {
        CodecError::UnknownVariant {
            type_name,
            ordinal: ordinal.into(),
        }
    }
}

/// Failures reported by the program-address derivation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("no viable bump seed for program {program_id}")]
    NoViableBump { program_id: String },

    #[error("invalid seeds: {0}")]
    InvalidSeeds(String),
}

/// Crate-level error, for callers that mix decoding and derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Derivation(#[from] DerivationError),
}

// Required for wasm_bindgen to convert errors to JavaScript exceptions
impl From<CodecError> for JsValue {
    fn from(err: CodecError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

impl From<DerivationError> for JsValue {
    fn from(err: DerivationError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_too_short_message_names_structure_and_field() {
        let err = CodecError::BufferTooShort {
            structure: "StakeAccount",
            field: "STAKE",
            offset: 156,
            needed: 8,
            available: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("StakeAccount"));
        assert!(msg.contains("STAKE"));
        assert!(msg.contains("156"));
    }

    #[test]
    fn test_unknown_variant_carries_ordinal() {
        let err = CodecError::unknown_variant("StakeState", 9u32);
        assert_eq!(
            err,
            CodecError::UnknownVariant {
                type_name: "StakeState",
                ordinal: 9
            }
        );
        assert_eq!(err.to_string(), "unrecognized StakeState variant: 9");
    }

    #[test]
    fn test_crate_error_wraps_both_kinds() {
        let codec: Error = CodecError::illegal_argument("empty seeds").into();
        assert!(matches!(codec, Error::Codec(_)));

        let derivation: Error = DerivationError::InvalidSeeds("too many".into()).into();
        assert!(matches!(derivation, Error::Derivation(_)));
    }
}
