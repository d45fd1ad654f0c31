// OPAQUE BYTE STRINGS
// Fixed-length hashes, keys and signatures carried by the disputes extrinsic and state.
//
// INVARIANTS:
// 1. Length is fixed by the type; parsing rejects any other length
// 2. Ordering is byte-lexicographic (used by every sorted-unique check)
// 3. Wire form is a `0x`-prefixed lowercase hex string

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BytesError {
    #[error("invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// Decode a hex string, with or without the `0x` prefix, into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], BytesError> {
    let raw = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(raw)?;
    let got = bytes.len();
    bytes
        .try_into()
        .map_err(|_| BytesError::InvalidLength { expected: N, got })
}

macro_rules! opaque_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name([0u8; $len])
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = BytesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode_fixed::<$len>(s).map($name)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

opaque_bytes!(
    /// 32-byte opaque hash. Identifies a work-report.
    Hash32,
    32
);
opaque_bytes!(
    /// Ed25519 public key of a validator.
    Ed25519Public,
    32
);
opaque_bytes!(
    /// Ed25519 signature.
    Ed25519Signature,
    64
);
opaque_bytes!(BandersnatchPublic, 32);
opaque_bytes!(BlsPublic, 144);
opaque_bytes!(
    /// Opaque validator metadata (hardware address and similar identifiers).
    ValidatorMetadata,
    128
);
