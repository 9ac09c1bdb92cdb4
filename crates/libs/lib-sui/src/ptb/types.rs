//! # Sui Transaction Types
//!
//! The subset of Sui's `TransactionData` needed for programmable transactions,
//! laid out so that `bcs::to_bytes` yields the canonical encoding the chain
//! and wallets expect. Variant order is significant: BCS encodes an enum by
//! its declaration index.

use serde::Serialize;
use std::fmt;

use super::Error;

// region:    --- Identifiers

/// 32-byte Sui address or object id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AccountAddress(pub [u8; 32]);

pub type ObjectId = AccountAddress;

impl AccountAddress {
    /// `0x2`, the Sui framework.
    pub const FRAMEWORK: AccountAddress = AccountAddress::from_low_byte(2);
    /// `0x6`, the shared system clock.
    pub const CLOCK: AccountAddress = AccountAddress::from_low_byte(6);

    const fn from_low_byte(byte: u8) -> Self {
        let mut bytes = [0u8; 32];
        bytes[31] = byte;
        AccountAddress(bytes)
    }

    /// Parse a `0x`-prefixed hex address, short forms allowed.
    pub fn parse(hex: &str) -> Result<Self, Error> {
        lib_utils::address::address_bytes(hex)
            .map(AccountAddress)
            .map_err(|_| Error::InvalidAddress(hex.to_string()))
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Object digest; BCS encodes it length-prefixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectDigest(Vec<u8>);

impl ObjectDigest {
    pub fn from_base58(digest: &str) -> Result<Self, Error> {
        let bytes = bs58::decode(digest)
            .into_vec()
            .map_err(|_| Error::InvalidDigest(digest.to_string()))?;
        if bytes.len() != 32 {
            return Err(Error::InvalidDigest(digest.to_string()));
        }
        Ok(ObjectDigest(bytes))
    }
}

/// `(id, version, digest)`.
pub type ObjectRef = (ObjectId, u64, ObjectDigest);

// endregion: --- Identifiers

// region:    --- Type tags

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

impl TypeTag {
    /// Parse a non-generic struct type such as `0x2::sui::SUI`.
    pub fn parse_struct(type_str: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidTypeTag(type_str.to_string());
        if type_str.contains('<') {
            return Err(invalid());
        }

        let mut parts = type_str.split("::");
        let (Some(address), Some(module), Some(name), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if !is_identifier(module) || !is_identifier(name) {
            return Err(invalid());
        }

        Ok(TypeTag::Struct(Box::new(StructTag {
            address: AccountAddress::parse(address).map_err(|_| invalid())?,
            module: module.to_string(),
            name: name.to_string(),
            type_params: Vec::new(),
        })))
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// endregion: --- Type tags

// region:    --- Programmable transaction

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CallArg {
    /// BCS bytes of a pure value
    Pure(Vec<u8>),
    Object(ObjectArg),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ObjectArg {
    ImmOrOwnedObject(ObjectRef),
    SharedObject {
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Argument {
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    TransferObjects(Vec<Argument>, Argument),
    SplitCoins(Argument, Vec<Argument>),
    MergeCoins(Argument, Vec<Argument>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

// endregion: --- Programmable transaction

// region:    --- Transaction data

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    pub owner: AccountAddress,
    pub price: u64,
    pub budget: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionExpiration {
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionDataV1 {
    pub kind: TransactionKind,
    pub sender: AccountAddress,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TransactionData {
    V1(TransactionDataV1),
}

impl TransactionData {
    /// Programmable transaction with the sender paying gas.
    pub fn new_programmable(
        sender: AccountAddress,
        payment: Vec<ObjectRef>,
        pt: ProgrammableTransaction,
        budget: u64,
        price: u64,
    ) -> Self {
        TransactionData::V1(TransactionDataV1 {
            kind: TransactionKind::ProgrammableTransaction(pt),
            sender,
            gas_data: GasData {
                payment,
                owner: sender,
                price,
                budget,
            },
            expiration: TransactionExpiration::None,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        bcs::to_bytes(self).map_err(|e| Error::Encode(e.to_string()))
    }
}

// endregion: --- Transaction data
