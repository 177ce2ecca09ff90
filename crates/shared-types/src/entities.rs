//! # Core Domain Entities
//!
//! Identifiers, enumerations and the logical `EventPayload`.
//!
//! ## Clusters
//!
//! - **Identifiers**: `BatchId`, `Address`
//! - **Commitment material**: `Salt`, `Commitment`, `GcmNonce`, `AuthTag`, `HexBytes`
//! - **Enumerations**: `EventType`, `Role`
//! - **Payload**: `EventPayload`

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// A raw 32-byte hash (SHA-256 or Keccak-256).
pub type Hash = [u8; 32];

/// Application fields of an event.
pub type DataMap = serde_json::Map<String, serde_json::Value>;

/// Decode `0x`-prefixed (or bare) hex of either case.
fn decode_hex(field: &'static str, s: &str) -> Result<Vec<u8>, TypeError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(digits).map_err(|e| TypeError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

fn decode_fixed<const N: usize>(field: &'static str, s: &str) -> Result<[u8; N], TypeError> {
    let bytes = decode_hex(field, s)?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| TypeError::InvalidLength {
        field,
        expected: N,
        actual,
    })
}

/// Fixed-width byte newtype rendered as `0x`-prefixed lowercase hex.
macro_rules! hex_newtype {
    ($(#[$meta:meta])* $name:ident, $len:expr, $field:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Byte length of this value.
            pub const LEN: usize = $len;

            /// Wrap raw bytes.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Borrow the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Lowercase `0x`-prefixed hex.
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode_fixed::<$len>($field, s).map(Self)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }
    };
}

hex_newtype!(
    /// 32-byte batch identifier (keccak256-style). Also the storage namespace.
    BatchId,
    32,
    "batchId"
);

hex_newtype!(
    /// 20-byte participant address. Case of the hex form carries no meaning.
    Address,
    20,
    "address"
);

hex_newtype!(
    /// 32 random bytes mixed into the commitment. Never anchored on the ledger.
    Salt,
    32,
    "salt"
);

hex_newtype!(
    /// `SHA-256(canonical_bytes || salt)`, the value anchored externally.
    Commitment,
    32,
    "commitment"
);

hex_newtype!(
    /// 96-bit AES-GCM nonce.
    GcmNonce,
    12,
    "nonce"
);

hex_newtype!(
    /// 128-bit AES-GCM authentication tag.
    AuthTag,
    16,
    "tag"
);

impl BatchId {
    /// Storage namespace for this batch (lowercase hex).
    pub fn namespace(&self) -> String {
        self.to_hex()
    }
}

impl fmt::Debug for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BatchId({})", self)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", self)
    }
}

// Salts are kept out of Debug output so they never reach log lines.
impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Salt(<redacted>)")
    }
}

impl fmt::Debug for GcmNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GcmNonce({})", self)
    }
}

impl fmt::Debug for AuthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthTag({})", self)
    }
}

/// Variable-length bytes rendered as `0x`-prefixed hex (signatures, ciphertext).
#[derive(Clone, Default, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct HexBytes(pub Vec<u8>);

impl HexBytes {
    /// Borrow the raw bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexBytes({} bytes)", self.0.len())
    }
}

impl FromStr for HexBytes {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex("bytes", s).map(Self)
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for HexBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// =============================================================================
// ENUMERATIONS
// =============================================================================

/// Supply-chain event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventType {
    /// Batch creation by its producer.
    Create,
    /// Custody movement between sites.
    Transport,
    /// Regulatory inspection.
    Inspect,
    /// Cold-chain temperature reading.
    Temperature,
    /// Sale to the end customer.
    Sale,
    /// Batch recall.
    Recall,
}

impl EventType {
    /// Every event type, in declaration order.
    pub const ALL: [EventType; 6] = [
        EventType::Create,
        EventType::Transport,
        EventType::Inspect,
        EventType::Temperature,
        EventType::Sale,
        EventType::Recall,
    ];

    /// Wire tag (also the string signed in the typed-data message).
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Create => "Create",
            EventType::Transport => "Transport",
            EventType::Inspect => "Inspect",
            EventType::Temperature => "Temperature",
            EventType::Sale => "Sale",
            EventType::Recall => "Recall",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TypeError::UnknownEventType(s.to_string()))
    }
}

/// Participant roles as assigned on the ledger.
///
/// Codes mirror the ledger's role enumeration (`0` means no role).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Role {
    /// Address has no role assignment.
    Unregistered = 0,
    /// Grows or manufactures the batch.
    Producer = 1,
    /// Moves the batch between sites.
    Transporter = 2,
    /// Sells the batch.
    Retailer = 3,
    /// Inspects and recalls.
    Regulator = 4,
}

impl Role {
    /// Decode a ledger role code.
    pub fn from_code(code: u8) -> Result<Self, TypeError> {
        match code {
            0 => Ok(Role::Unregistered),
            1 => Ok(Role::Producer),
            2 => Ok(Role::Transporter),
            3 => Ok(Role::Retailer),
            4 => Ok(Role::Regulator),
            other => Err(TypeError::UnknownRole(other)),
        }
    }

    /// Ledger role code.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// True for any role other than `Unregistered`.
    pub fn is_registered(&self) -> bool {
        !matches!(self, Role::Unregistered)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// The logical event a participant signs.
///
/// `data` is an arbitrary JSON mapping; its canonical form (sorted keys, no
/// whitespace) is what gets signed and committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// Batch this event belongs to.
    pub batch_id: BatchId,
    /// Kind of event.
    pub event_type: EventType,
    /// Application fields (temperature, gps, ...).
    pub data: DataMap,
}

impl EventPayload {
    /// Build a payload.
    pub fn new(
        batch_id: BatchId,
        event_type: EventType,
        data: DataMap,
    ) -> Self {
        Self {
            batch_id,
            event_type,
            data,
        }
    }
}
