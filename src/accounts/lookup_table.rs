use crate::address::{Address, ADDRESS_BYTES};
use crate::codec::Reader;
use crate::error::CodecError;
use serde::Serialize;

crate::account_layout! {
    /// Lookup table metadata: 56 bytes, followed by the stored addresses.
    pub struct LookupTableLayout {
        TYPE_INDEX: 4,
        DEACTIVATION_SLOT: 8,
        LAST_EXTENDED_SLOT: 8,
        LAST_EXTENDED_SLOT_START_INDEX: 1,
        AUTHORITY: 33,
        PADDING: 2,
    }
}

/// Table capacity enforced by the lookup table program.
pub const LOOKUP_TABLE_MAX_ADDRESSES: usize = 256;

/// Decoded address lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressLookupTable {
    #[serde(with = "crate::address::serde_base58::option")]
    pub address: Option<Address>,
    /// `u64::MAX` while the table is active.
    pub deactivation_slot: u64,
    pub last_extended_slot: u64,
    pub last_extended_slot_start_index: u8,
    /// `None` once the table is frozen.
    #[serde(with = "crate::address::serde_base58::option")]
    pub authority: Option<Address>,
    #[serde(serialize_with = "serialize_addresses")]
    pub addresses: Vec<Address>,
}

fn serialize_addresses<S: serde::Serializer>(
    addresses: &[Address],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(addresses.iter().map(|address| address.to_string()))
}

impl AddressLookupTable {
    pub fn decode(data: &[u8], address: Option<Address>) -> Result<Self, CodecError> {
        let mut r = Reader::new("AddressLookupTable", data);
        r.expect_field(LookupTableLayout::TYPE_INDEX);
        match r.read_u32(LookupTableLayout::TYPE_INDEX.name)? {
            0 => {
                return Err(CodecError::illegal_argument(
                    "lookup table account is uninitialized",
                ))
            }
            1 => {}
            n => return Err(CodecError::unknown_variant("ProgramState", n)),
        }
        let deactivation_slot = r.read_field(LookupTableLayout::DEACTIVATION_SLOT)?;
        let last_extended_slot = r.read_field(LookupTableLayout::LAST_EXTENDED_SLOT)?;
        let last_extended_slot_start_index =
            r.read_field(LookupTableLayout::LAST_EXTENDED_SLOT_START_INDEX)?;

        // The authority option is written into a fixed 33-byte slot.
        r.expect_field(LookupTableLayout::AUTHORITY);
        let authority = r.read_option(LookupTableLayout::AUTHORITY.name, |r| {
            r.read_address(LookupTableLayout::AUTHORITY.name)
        })?;
        let slack = LookupTableLayout::PADDING.end() - r.consumed();
        r.skip(LookupTableLayout::PADDING.name, slack)?;

        let tail = r.remaining();
        if tail % ADDRESS_BYTES != 0 {
            return Err(CodecError::LengthMismatch {
                structure: "AddressLookupTable",
                expected: LookupTableLayout::LEN + tail / ADDRESS_BYTES * ADDRESS_BYTES,
                actual: data.len(),
            });
        }
        let count = tail / ADDRESS_BYTES;
        if count > LOOKUP_TABLE_MAX_ADDRESSES {
            return Err(CodecError::CapacityExceeded {
                structure: "AddressLookupTable",
                count: count as u32,
                capacity: LOOKUP_TABLE_MAX_ADDRESSES as u32,
            });
        }
        let mut addresses = Vec::with_capacity(count);
        for _ in 0..count {
            addresses.push(r.read_address("addresses")?);
        }
        log::trace!("decoded AddressLookupTable with {} addresses", count);
        Ok(AddressLookupTable {
            address,
            deactivation_slot,
            last_extended_slot,
            last_extended_slot_start_index,
            authority,
            addresses,
        })
    }

    pub fn is_active(&self) -> bool {
        self.deactivation_slot == u64::MAX
    }

    pub fn is_frozen(&self) -> bool {
        self.authority.is_none()
    }

    pub fn get(&self, index: u8) -> Option<&Address> {
        self.addresses.get(index as usize)
    }
}
