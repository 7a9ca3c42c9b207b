//! 32-byte account addresses.
//!
//! Wraps `solana_pubkey::Pubkey` with codec-friendly constructors.

use crate::error::CodecError;
use std::str::FromStr;

/// Re-export the underlying Solana address type.
pub use solana_pubkey::Pubkey as Address;

/// Width of an address on the wire.
pub const ADDRESS_BYTES: usize = 32;

/// Extension trait adding checked constructors that report `CodecError`.
pub trait AddressExt {
    fn from_base58(address: &str) -> Result<Address, CodecError>;
    fn from_bytes_checked(bytes: &[u8]) -> Result<Address, CodecError>;
}

impl AddressExt for Address {
    /// Parse an address from base-58 text.
    fn from_base58(address: &str) -> Result<Address, CodecError> {
        Address::from_str(address)
            .map_err(|e| CodecError::InvalidAddress(format!("{}: {}", address, e)))
    }

    /// Create an address from a byte slice with length validation.
    fn from_bytes_checked(bytes: &[u8]) -> Result<Address, CodecError> {
        let array: [u8; ADDRESS_BYTES] = bytes.try_into().map_err(|_| {
            CodecError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_BYTES,
                bytes.len()
            ))
        })?;
        Ok(Address::from(array))
    }
}

/// Serde adapter storing an [`Address`] as base-58 text.
pub mod serde_base58 {
    use super::{Address, AddressExt};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&address.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let text = String::deserialize(deserializer)?;
        Address::from_base58(&text).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module, for `Option<Address>`.
    pub mod option {
        use super::{Address, AddressExt};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            address: &Option<Address>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match address {
                Some(a) => serializer.serialize_some(&a.to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Address>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|text| Address::from_base58(&text).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base58() {
        let address = "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH";
        let parsed = Address::from_base58(address).unwrap();
        assert_eq!(parsed.to_string(), address);
    }

    #[test]
    fn test_from_bytes() {
        let bytes = [7u8; 32];
        let parsed = Address::from_bytes_checked(&bytes).unwrap();
        assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn test_invalid_base58() {
        assert!(matches!(
            Address::from_base58("invalid!@#$"),
            Err(CodecError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_invalid_length() {
        assert!(Address::from_bytes_checked(&[0u8; 31]).is_err());
        assert!(Address::from_bytes_checked(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_equality() {
        let a = Address::from_base58("11111111111111111111111111111111").unwrap();
        let b = Address::from_bytes_checked(&[0u8; 32]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_base58_roundtrip() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Holder {
            #[serde(with = "serde_base58")]
            key: Address,
            #[serde(with = "serde_base58::option")]
            maybe: Option<Address>,
        }

        let json = r#"{"key":"FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH","maybe":null}"#;
        let holder: Holder = serde_json::from_str(json).unwrap();
        assert_eq!(
            holder.key.to_string(),
            "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH"
        );
        assert!(holder.maybe.is_none());
        assert_eq!(serde_json::to_string(&holder).unwrap(), json);
    }
}
