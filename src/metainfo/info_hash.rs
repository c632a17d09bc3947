use super::error::MetainfoError;
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// The BitTorrent v1 info hash: SHA-1 of the bencoded `info` dictionary.
///
/// Displays as 40 lowercase hex characters.
///
/// ```
/// use torrent_repack::metainfo::InfoHash;
///
/// let hash = InfoHash::from_hex("7F3956E5A15B34B62159727C08F944C7E433AD1E").unwrap();
/// assert_eq!(hash.to_string(), "7f3956e5a15b34b62159727c08f944c7e433ad1e");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    /// Hashes an already-encoded info dictionary.
    pub fn from_info_bytes(raw_info: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(raw_info);
        InfoHash(hasher.finalize().into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetainfoError> {
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| MetainfoError::InvalidInfoHash(hex::encode(bytes)))?;
        Ok(InfoHash(arr))
    }

    /// Parses a 40-character hex string, in either case.
    pub fn from_hex(s: &str) -> Result<Self, MetainfoError> {
        let mut arr = [0u8; 20];
        hex::decode_to_slice(s, &mut arr)
            .map_err(|_| MetainfoError::InvalidInfoHash(s.to_string()))?;
        Ok(InfoHash(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for InfoHash {
    type Err = MetainfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
