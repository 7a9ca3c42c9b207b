//! wasm-solana-codec: binary codec for Solana program instructions and
//! account state, with WASM bindings.
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//!
//! 1. **Core codec** - primitive readers/writers (`codec`), layout tables
//!    (`layout`), instruction encoders (`instructions`), account decoders
//!    (`accounts`), scan filters (`filter`) and derived-address requests
//!    (`derivation`). All of it is pure and usable natively.
//! 2. **WASM bindings** (`wasm/`) - thin namespaces that expose the core to
//!    JavaScript.
//!
//! # Usage from Rust
//!
//! ```rust
//! use wasm_solana_codec::{instructions::system, Address, AddressExt, ProgramAddresses};
//!
//! let programs = ProgramAddresses::mainnet();
//! let from = Address::from_base58("FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH").unwrap();
//! let to = Address::from_base58("DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB").unwrap();
//!
//! let transfer = system::transfer(&programs, &from, &to, 1_000_000).unwrap();
//! assert_eq!(&transfer.data[..4], &[2, 0, 0, 0]);
//! ```

pub mod accounts;
pub mod address;
pub mod codec;
pub mod config;
pub mod derivation;
mod error;
pub mod filter;
pub mod instructions;
pub mod layout;
pub mod wasm;

// Re-export core types at crate root
pub use address::{Address, AddressExt};
pub use config::ProgramAddresses;
pub use derivation::{AddressDeriver, CurveDeriver, ProgramDerivedAddress, SeedList};
pub use error::{CodecError, DerivationError, Error};
pub use filter::{AccountFilter, MemcmpFilter};
pub use instructions::{AccountReference, Instruction};

// Re-export WASM types
pub use wasm::{DecoderNamespace, EncoderNamespace, WasmAddress};
