//! Account-state decoders.
//!
//! Each view is decoded left to right through a [`Reader`](crate::codec::Reader)
//! against the structure's layout table, optionally tagged with the address
//! the bytes were read from. Views are snapshots; nothing here writes account
//! state.

mod fee;
mod lockup;
mod lookup_table;
mod nonce;
mod stake;
mod stake_pool;
mod token;
mod validator_list;

pub use fee::{Fee, FeeLayout, FutureEpochFee};
pub use lockup::{Lockup, LockupLayout};
pub use lookup_table::{AddressLookupTable, LookupTableLayout, LOOKUP_TABLE_MAX_ADDRESSES};
pub use nonce::{
    BlockhashQuery, HashSource, NonceAccount, NonceLayout, NonceState, NonceVersion,
};
pub use stake::{
    stake_activation_state, StakeAccount, StakeActivationState, StakeLayout, StakeState,
    BOOTSTRAP_ACTIVATION_EPOCH, NOT_DEACTIVATED,
};
pub use stake_pool::{StakePool, StakePoolAccountType, StakePoolLayout};
pub use token::{Mint, MintLayout, TokenAccount, TokenAccountLayout, TokenAccountState};
pub use validator_list::{
    StakeStatus, ValidatorList, ValidatorListLayout, ValidatorStakeInfo,
    ValidatorStakeInfoLayout,
};

use crate::error::CodecError;
use base64::{engine::general_purpose::STANDARD, Engine};

/// Decode the base64 `data` field of an RPC account response.
pub fn decode_base64_account_data(encoded: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|e| CodecError::illegal_argument(format!("account data is not base64: {}", e)))
}

/// Fixed-size structures must consume the whole buffer.
pub(crate) fn check_len(
    structure: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), CodecError> {
    if expected != actual {
        return Err(CodecError::LengthMismatch {
            structure,
            expected,
            actual,
        });
    }
    Ok(())
}
