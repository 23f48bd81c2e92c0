//! # Core Value Objects
//!
//! Immutable primitives used across the workspace. These are defined by
//! their value, not identity.
//!
//! - **Identity**: [`Address`] (accounts, connectors, protocols, tokens)
//! - **Integrity**: [`Hash`] (batch hashes), [`keccak256`]
//! - **Data**: [`Bytes`] (opaque spell arguments), [`StorageKey`] / [`StorageValue`]
//! - **Scratch**: [`SlotId`] (per-batch scratch store keys)

use crate::errors::ParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// Fixed-point scale used for token amounts and prices (1e18).
pub const WAD: u64 = 1_000_000_000_000_000_000;

/// Converts a whole number of tokens into 18-decimal base units.
#[must_use]
pub fn ether(whole: u64) -> U256 {
    U256::from(whole) * U256::from(WAD)
}

/// Implements hex `Debug`/`Display`/`FromStr` and string serde for a
/// fixed-size byte newtype.
macro_rules! fixed_bytes {
    ($name:ident, $len:expr) => {
        impl $name {
            /// Number of bytes in this type.
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; $len]);

            /// Creates a value from a byte array.
            #[must_use]
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Creates a value from a slice. Returns None if wrong length.
            #[must_use]
            pub fn from_slice(slice: &[u8]) -> Option<Self> {
                if slice.len() == $len {
                    let mut bytes = [0u8; $len];
                    bytes.copy_from_slice(slice);
                    Some(Self(bytes))
                } else {
                    None
                }
            }

            /// Returns the underlying bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns true if every byte is zero.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }

            /// Lower-case hex with `0x` prefix.
            #[must_use]
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x")?;
                for byte in &self.0[..4] {
                    write!(f, "{byte:02x}")?;
                }
                write!(f, "...")?;
                for byte in &self.0[$len - 2..] {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let bytes =
                    hex::decode(digits).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
                Self::from_slice(&bytes).ok_or(ParseError::InvalidLength {
                    expected: $len,
                    actual: bytes.len(),
                })
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte address identifying an account, connector, protocol or token.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

fixed_bytes!(Address, 20);

impl Address {
    /// Builds an address whose low 8 bytes are `n` (big-endian).
    ///
    /// Handy for deterministic fixtures and seeded worlds.
    #[must_use]
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..20].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }
}

/// Pseudo-token address standing for the chain's native asset.
pub const NATIVE_ASSET: Address = Address([0xEE; 20]);

// =============================================================================
// HASH (32 bytes)
// =============================================================================

/// A 32-byte Keccak-256 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash(pub [u8; 32]);

fixed_bytes!(Hash, 32);

/// Computes keccak256 hash of data.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    Hash::new(digest.into())
}

// =============================================================================
// BYTES (variable length)
// =============================================================================

/// Variable-length byte vector for encoded spell arguments.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    /// Creates an empty Bytes.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates Bytes from a slice.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Self {
        Self(slice.to_vec())
    }

    /// Returns a reference to the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        if self.0.len() <= 8 {
            for byte in &self.0 {
                write!(f, "{byte:02x}")?;
            }
        } else {
            for byte in &self.0[..4] {
                write!(f, "{byte:02x}")?;
            }
            write!(f, "..({} bytes)", self.0.len())?;
        }
        Ok(())
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(vec: Vec<u8>) -> Self {
        Self(vec)
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// =============================================================================
// STORAGE KEY & VALUE (32 bytes each)
// =============================================================================

/// A 32-byte key into a protocol's storage.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StorageKey(pub [u8; 32]);

fixed_bytes!(StorageKey, 32);

impl StorageKey {
    /// Derives a key from the keccak256 of the concatenated parts.
    ///
    /// Protocols use this to key per-account records, e.g.
    /// `derive(&[b"debt", account, token])`.
    #[must_use]
    pub fn derive(parts: &[&[u8]]) -> Self {
        let mut hasher = Keccak256::new();
        for part in parts {
            hasher.update(part);
        }
        Self(hasher.finalize().into())
    }
}

/// A 32-byte word stored under a [`StorageKey`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StorageValue(pub [u8; 32]);

impl StorageValue {
    /// The zero value.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a storage value from a U256.
    #[must_use]
    pub fn from_u256(value: U256) -> Self {
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        Self(bytes)
    }

    /// Converts to U256.
    #[must_use]
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }

    /// Returns true if this is the zero value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for StorageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageValue({})", self.to_u256())
    }
}

impl From<U256> for StorageValue {
    fn from(value: U256) -> Self {
        Self::from_u256(value)
    }
}

// =============================================================================
// SCRATCH SLOT ID
// =============================================================================

/// Key into the per-batch scratch store.
///
/// Slot 0 is reserved: reads through it yield zero and writes are ignored.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u64);

impl SlotId {
    /// The reserved "do not read/write" slot.
    pub const NONE: Self = Self(0);

    /// Returns true for the reserved slot 0.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({})", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SlotId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
