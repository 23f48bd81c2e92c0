//! # Spell Argument Codec
//!
//! Spell arguments are opaque to the engine. Connectors define their argument
//! structs with serde and exchange them as `bincode` bytes.

use crate::entities::Bytes;
use crate::errors::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes connector arguments into spell bytes.
pub fn encode_args<T: Serialize>(args: &T) -> Result<Bytes, CodecError> {
    bincode::serialize(args)
        .map(Bytes::from)
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decodes connector arguments from spell bytes.
pub fn decode_args<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    bincode::deserialize(bytes).map_err(|e| CodecError::Decode(e.to_string()))
}
