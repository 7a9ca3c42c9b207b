use super::{check_len, Lockup, LockupLayout};
use crate::address::Address;
use crate::codec::{Codec, Reader, Writer};
use crate::error::CodecError;
use serde::Serialize;

crate::account_layout! {
    /// Stake program account: 200 bytes regardless of state.
    pub struct StakeLayout {
        STATE: 4,
        RENT_EXEMPT_RESERVE: 8,
        STAKER: 32,
        WITHDRAWER: 32,
        LOCKUP: LockupLayout::LEN,
        VOTER: 32,
        STAKE: 8,
        ACTIVATION_EPOCH: 8,
        DEACTIVATION_EPOCH: 8,
        WARMUP_COOLDOWN_RATE: 8,
        CREDITS_OBSERVED: 8,
        STAKE_FLAGS: 1,
        RESERVED: 3,
    }
}

/// `deactivation_epoch` of stake that was never deactivated.
pub const NOT_DEACTIVATED: u64 = u64::MAX;

/// `activation_epoch` of genesis stake, which is fully active from the start.
pub const BOOTSTRAP_ACTIVATION_EPOCH: u64 = u64::MAX;

/// Stored state ordinal, a 4-byte little-endian value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StakeState {
    Uninitialized,
    /// Authorities and lockup set, not delegated.
    Initialized,
    /// Delegated to a vote account.
    Stake,
    RewardsPool,
}

impl Codec for StakeState {
    fn encoded_len(&self) -> usize {
        4
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_u32(match self {
            StakeState::Uninitialized => 0,
            StakeState::Initialized => 1,
            StakeState::Stake => 2,
            StakeState::RewardsPool => 3,
        });
    }

    fn decode(reader: &mut Reader<'_>, field: &'static str) -> Result<Self, CodecError> {
        match reader.read_u32(field)? {
            0 => Ok(StakeState::Uninitialized),
            1 => Ok(StakeState::Initialized),
            2 => Ok(StakeState::Stake),
            3 => Ok(StakeState::RewardsPool),
            n => Err(CodecError::unknown_variant("StakeState", n)),
        }
    }
}

/// Lifecycle of a delegation relative to a given epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StakeActivationState {
    Activating,
    Active,
    Deactivating,
    Inactive,
}

impl StakeActivationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activating => "activating",
            Self::Active => "active",
            Self::Deactivating => "deactivating",
            Self::Inactive => "inactive",
        }
    }
}

/// Derive the activation state from the delegation epochs.
///
/// Stake activates during its activation epoch and deactivates during its
/// deactivation epoch, so `current == deactivation` is still deactivating.
/// It is active or inactive once that epoch has passed.
/// [`NOT_DEACTIVATED`] marks stake with no deactivation scheduled and
/// [`BOOTSTRAP_ACTIVATION_EPOCH`] marks genesis stake, which never warms up.
pub fn stake_activation_state(
    activation_epoch: u64,
    deactivation_epoch: u64,
    current_epoch: u64,
) -> StakeActivationState {
    if deactivation_epoch == NOT_DEACTIVATED {
        let warmed_up =
            activation_epoch == BOOTSTRAP_ACTIVATION_EPOCH || activation_epoch < current_epoch;
        if warmed_up {
            StakeActivationState::Active
        } else {
            StakeActivationState::Activating
        }
    } else if deactivation_epoch >= current_epoch {
        StakeActivationState::Deactivating
    } else {
        StakeActivationState::Inactive
    }
}

/// Decoded stake account.
///
/// Delegation fields are zero unless `state` is [`StakeState::Stake`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeAccount {
    #[serde(with = "crate::address::serde_base58::option")]
    pub address: Option<Address>,
    pub state: StakeState,
    pub rent_exempt_reserve: u64,
    #[serde(with = "crate::address::serde_base58")]
    pub staker: Address,
    #[serde(with = "crate::address::serde_base58")]
    pub withdrawer: Address,
    pub lockup: Lockup,
    #[serde(with = "crate::address::serde_base58")]
    pub voter: Address,
    pub stake: u64,
    pub activation_epoch: u64,
    pub deactivation_epoch: u64,
    pub warmup_cooldown_rate: f64,
    pub credits_observed: u64,
    pub stake_flags: u8,
}

impl StakeAccount {
    /// Decode a complete stake account.
    pub fn decode(data: &[u8], address: Option<Address>) -> Result<Self, CodecError> {
        let (account, consumed) = Self::decode_at(data, 0, address)?;
        check_len("StakeAccount", consumed, data.len())?;
        Ok(account)
    }

    /// Decode a stake account starting at `offset`, returning it with the
    /// bytes consumed.
    pub fn decode_at(
        data: &[u8],
        offset: usize,
        address: Option<Address>,
    ) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::at("StakeAccount", data, offset);
        let account = StakeAccount {
            address,
            state: r.read_field(StakeLayout::STATE)?,
            rent_exempt_reserve: r.read_field(StakeLayout::RENT_EXEMPT_RESERVE)?,
            staker: r.read_field(StakeLayout::STAKER)?,
            withdrawer: r.read_field(StakeLayout::WITHDRAWER)?,
            lockup: r.read_field(StakeLayout::LOCKUP)?,
            voter: r.read_field(StakeLayout::VOTER)?,
            stake: r.read_field(StakeLayout::STAKE)?,
            activation_epoch: r.read_field(StakeLayout::ACTIVATION_EPOCH)?,
            deactivation_epoch: r.read_field(StakeLayout::DEACTIVATION_EPOCH)?,
            warmup_cooldown_rate: r.read_field(StakeLayout::WARMUP_COOLDOWN_RATE)?,
            credits_observed: r.read_field(StakeLayout::CREDITS_OBSERVED)?,
            stake_flags: r.read_field(StakeLayout::STAKE_FLAGS)?,
        };
        r.expect_field(StakeLayout::RESERVED);
        r.skip(StakeLayout::RESERVED.name, StakeLayout::RESERVED.width)?;
        log::trace!(
            "decoded StakeAccount ({:?}) in {} bytes",
            account.state,
            r.consumed()
        );
        Ok((account, r.consumed()))
    }

    pub fn is_delegated(&self) -> bool {
        self.state == StakeState::Stake
    }

    /// Activation state at `current_epoch`; undelegated stake is inactive.
    pub fn activation_state(&self, current_epoch: u64) -> StakeActivationState {
        if !self.is_delegated() {
            return StakeActivationState::Inactive;
        }
        stake_activation_state(self.activation_epoch, self.deactivation_epoch, current_epoch)
    }
}
