use serde::{Deserialize, Serialize};

/// Schema-stable wire encoding: bincode framed through lz4.
///
/// Digest bytes round-trip exactly; nothing is re-encoded through a text
/// form, so serialized proofs and blocks verify identically after
/// transport.
pub trait WireSerialize: Serialize + for<'a> Deserialize<'a> + Sized {
    fn serialize_wire(&self) -> Result<Vec<u8>, std::io::Error> {
        let encoded = bincode::serialize(&self)
            .map_err(std::io::Error::other)?;
        let compressed = lz4_flex::compress_prepend_size(&encoded);
        Ok(compressed)
    }

    fn deserialize_wire(data: &[u8]) -> Result<Self, std::io::Error> {
        let decompressed = lz4_flex::decompress_size_prepended(data)
            .map_err(std::io::Error::other)?;
        let decoded = bincode::deserialize::<Self>(&decompressed)
            .map_err(std::io::Error::other)?;
        Ok(decoded)
    }
}
