use super::check_len;
use crate::address::Address;
use crate::codec::{Codec, Reader, TaggedUnion, Writer};
use crate::error::CodecError;
use serde::Serialize;

crate::account_layout! {
    /// Durable nonce account: 80 bytes.
    pub struct NonceLayout {
        VERSION: 4,
        STATE: 4,
        AUTHORITY: 32,
        DURABLE_NONCE: 32,
        LAMPORTS_PER_SIGNATURE: 8,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NonceVersion {
    Legacy,
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NonceState {
    Uninitialized,
    Initialized,
}

impl Codec for NonceVersion {
    fn encoded_len(&self) -> usize {
        4
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_u32(match self {
            NonceVersion::Legacy => 0,
            NonceVersion::Current => 1,
        });
    }

    fn decode(reader: &mut Reader<'_>, field: &'static str) -> Result<Self, CodecError> {
        match reader.read_u32(field)? {
            0 => Ok(NonceVersion::Legacy),
            1 => Ok(NonceVersion::Current),
            n => Err(CodecError::unknown_variant("NonceVersion", n)),
        }
    }
}

impl Codec for NonceState {
    fn encoded_len(&self) -> usize {
        4
    }

    fn encode(&self, writer: &mut Writer) {
        writer.write_u32(match self {
            NonceState::Uninitialized => 0,
            NonceState::Initialized => 1,
        });
    }

    fn decode(reader: &mut Reader<'_>, field: &'static str) -> Result<Self, CodecError> {
        match reader.read_u32(field)? {
            0 => Ok(NonceState::Uninitialized),
            1 => Ok(NonceState::Initialized),
            n => Err(CodecError::unknown_variant("NonceState", n)),
        }
    }
}

/// Decoded durable nonce account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceAccount {
    #[serde(with = "crate::address::serde_base58::option")]
    pub address: Option<Address>,
    pub version: NonceVersion,
    pub state: NonceState,
    #[serde(with = "crate::address::serde_base58")]
    pub authority: Address,
    /// Stored blockhash, in the same 32-byte base-58 form as an address.
    #[serde(with = "crate::address::serde_base58")]
    pub durable_nonce: Address,
    pub lamports_per_signature: u64,
}

impl NonceAccount {
    pub fn decode(data: &[u8], address: Option<Address>) -> Result<Self, CodecError> {
        let (account, consumed) = Self::decode_at(data, 0, address)?;
        check_len("NonceAccount", consumed, data.len())?;
        Ok(account)
    }

    pub fn decode_at(
        data: &[u8],
        offset: usize,
        address: Option<Address>,
    ) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::at("NonceAccount", data, offset);
        let account = NonceAccount {
            address,
            version: r.read_field(NonceLayout::VERSION)?,
            state: r.read_field(NonceLayout::STATE)?,
            authority: r.read_field(NonceLayout::AUTHORITY)?,
            durable_nonce: r.read_field(NonceLayout::DURABLE_NONCE)?,
            lamports_per_signature: r.read_field(NonceLayout::LAMPORTS_PER_SIGNATURE)?,
        };
        log::trace!("decoded NonceAccount in {} bytes", r.consumed());
        Ok((account, r.consumed()))
    }

    pub fn is_initialized(&self) -> bool {
        self.state == NonceState::Initialized
    }
}

/// Where a transaction's recent blockhash comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "address")]
pub enum HashSource {
    /// The cluster's latest blockhash.
    Cluster,
    /// The durable nonce stored in the given nonce account.
    NonceAccount(#[serde(with = "crate::address::serde_base58")] Address),
}

impl TaggedUnion for HashSource {
    const TYPE_NAME: &'static str = "HashSource";

    fn ordinal(&self) -> u8 {
        match self {
            HashSource::Cluster => 0,
            HashSource::NonceAccount(_) => 1,
        }
    }

    fn payload_len(&self) -> usize {
        match self {
            HashSource::Cluster => 0,
            HashSource::NonceAccount(address) => address.encoded_len(),
        }
    }

    fn write_payload(&self, writer: &mut Writer) {
        if let HashSource::NonceAccount(address) = self {
            writer.write_address(address);
        }
    }

    fn read_variant(ordinal: u8, reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        match ordinal {
            0 => Ok(HashSource::Cluster),
            1 => Ok(HashSource::NonceAccount(reader.read_address("nonce_account")?)),
            n => Err(Self::unknown(n)),
        }
    }
}

/// How a signer obtains and checks the blockhash it signs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BlockhashQuery {
    /// A caller-supplied blockhash used as is.
    Static {
        #[serde(with = "crate::address::serde_base58")]
        blockhash: Address,
    },
    /// A caller-supplied blockhash checked against `source`.
    Validated {
        source: HashSource,
        #[serde(with = "crate::address::serde_base58")]
        blockhash: Address,
    },
    /// Fetched from `source` at signing time.
    Rpc { source: HashSource },
}

impl BlockhashQuery {
    /// Query that signs over the durable nonce of `nonce_account`.
    pub fn durable_nonce(nonce_account: Address) -> Self {
        BlockhashQuery::Rpc {
            source: HashSource::NonceAccount(nonce_account),
        }
    }

    pub fn source(&self) -> Option<&HashSource> {
        match self {
            BlockhashQuery::Static { .. } => None,
            BlockhashQuery::Validated { source, .. } | BlockhashQuery::Rpc { source } => {
                Some(source)
            }
        }
    }

    pub fn decode(data: &[u8]) -> Result<(Self, usize), CodecError> {
        let mut reader = Reader::new("BlockhashQuery", data);
        let query = Self::read(&mut reader)?;
        Ok((query, reader.consumed()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut writer = Writer::with_len(self.len());
        self.write(&mut writer);
        writer.finish()
    }
}

impl TaggedUnion for BlockhashQuery {
    const TYPE_NAME: &'static str = "BlockhashQuery";

    fn ordinal(&self) -> u8 {
        match self {
            BlockhashQuery::Static { .. } => 0,
            BlockhashQuery::Validated { .. } => 1,
            BlockhashQuery::Rpc { .. } => 2,
        }
    }

    fn payload_len(&self) -> usize {
        match self {
            BlockhashQuery::Static { blockhash } => blockhash.encoded_len(),
            BlockhashQuery::Validated { source, blockhash } => {
                source.len() + blockhash.encoded_len()
            }
            BlockhashQuery::Rpc { source } => source.len(),
        }
    }

    fn write_payload(&self, writer: &mut Writer) {
        match self {
            BlockhashQuery::Static { blockhash } => {
                writer.write_address(blockhash);
            }
            BlockhashQuery::Validated { source, blockhash } => {
                source.write(writer);
                writer.write_address(blockhash);
            }
            BlockhashQuery::Rpc { source } => source.write(writer),
        }
    }

    fn read_variant(ordinal: u8, reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        match ordinal {
            0 => Ok(BlockhashQuery::Static {
                blockhash: reader.read_address("blockhash")?,
            }),
            1 => Ok(BlockhashQuery::Validated {
                source: HashSource::read(reader)?,
                blockhash: reader.read_address("blockhash")?,
            }),
            2 => Ok(BlockhashQuery::Rpc {
                source: HashSource::read(reader)?,
            }),
            n => Err(Self::unknown(n)),
        }
    }
}
