use super::error::MetainfoError;
use super::info::{take_integer, take_text, value_to_text, Info};
use super::info_hash::InfoHash;
use super::text::Text;
use crate::bencode::{decode, encode, Dict, Value};
use bytes::Bytes;
use std::path::Path;

/// A parsed torrent file.
///
/// Known top-level keys are exposed as fields; any other key is kept in
/// [`Metainfo::extra`] and written back unchanged, so loading and saving an
/// unmodified canonical file reproduces it byte for byte.
///
/// # Examples
///
/// ```no_run
/// use torrent_repack::metainfo::Metainfo;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let metainfo = Metainfo::open("example.torrent")?;
///
/// println!("Torrent: {}", metainfo.info.name);
/// println!("Size: {} bytes", metainfo.info.total_length());
/// println!("Info hash: {}", metainfo.info_hash()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metainfo {
    /// The info dictionary; the only input of the info hash.
    pub info: Info,
    /// Primary tracker URL.
    pub announce: Option<Text>,
    /// Multi-tier tracker list ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
    pub announce_list: Option<Vec<Vec<Text>>>,
    /// Unix timestamp when the torrent was created.
    pub creation_date: Option<i64>,
    pub comment: Option<Text>,
    /// Name/version of the program that created the torrent.
    pub created_by: Option<Text>,
    /// Character encoding of the string fields, as declared by the creator.
    pub encoding: Option<Text>,
    /// Top-level keys this crate does not model, kept verbatim.
    pub extra: Dict,
}

impl Metainfo {
    /// Wraps an info dictionary with no tracker or descriptive fields.
    pub fn new(info: Info) -> Self {
        Self {
            info,
            announce: None,
            announce_list: None,
            creation_date: None,
            comment: None,
            created_by: None,
            encoding: None,
            extra: Dict::new(),
        }
    }

    /// Reads and parses a torrent file.
    ///
    /// # Errors
    ///
    /// Returns [`MetainfoError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`Metainfo::from_bytes`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MetainfoError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let metainfo = Self::from_bytes(&data)?;

        tracing::debug!(
            path = %path.display(),
            bytes = data.len(),
            name = %metainfo.info.name,
            "loaded torrent"
        );

        Ok(metainfo)
    }

    /// Parses a torrent file from raw bytes.
    ///
    /// The input must be exactly one bencoded dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`MetainfoError::Bencode`] for malformed or trailing bytes and
    /// the projection errors of [`Metainfo::from_value`].
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        let value = decode(data)?;
        Self::from_value(value)
    }

    /// Projects a decoded value onto a [`Metainfo`].
    pub fn from_value(value: Value) -> Result<Self, MetainfoError> {
        let mut dict = value
            .into_dict()
            .ok_or(MetainfoError::InvalidField("root"))?;

        let info = dict
            .remove(b"info".as_slice())
            .ok_or(MetainfoError::MissingField("info"))?;
        let info = Info::from_value(info)?;

        let announce = take_text(&mut dict, "announce")?;

        let announce_list = dict
            .remove(b"announce-list".as_slice())
            .map(parse_announce_list)
            .transpose()?;

        let creation_date = take_integer(&mut dict, "creation date")?;
        let comment = take_text(&mut dict, "comment")?;
        let created_by = take_text(&mut dict, "created by")?;
        let encoding = take_text(&mut dict, "encoding")?;

        Ok(Self {
            info,
            announce,
            announce_list,
            creation_date,
            comment,
            created_by,
            encoding,
            extra: dict,
        })
    }

    /// Rebuilds the top-level dictionary, retained keys included.
    pub fn to_value(&self) -> Result<Value, MetainfoError> {
        let mut dict = self.extra.clone();

        dict.insert(Bytes::from_static(b"info"), self.info.to_value()?);

        if let Some(ref announce) = self.announce {
            dict.insert(Bytes::from_static(b"announce"), Value::from(announce));
        }
        if let Some(ref tiers) = self.announce_list {
            let tiers = tiers
                .iter()
                .map(|tier| Value::List(tier.iter().map(Value::from).collect()))
                .collect();
            dict.insert(Bytes::from_static(b"announce-list"), Value::List(tiers));
        }
        if let Some(date) = self.creation_date {
            dict.insert(Bytes::from_static(b"creation date"), Value::Integer(date));
        }
        if let Some(ref comment) = self.comment {
            dict.insert(Bytes::from_static(b"comment"), Value::from(comment));
        }
        if let Some(ref created_by) = self.created_by {
            dict.insert(Bytes::from_static(b"created by"), Value::from(created_by));
        }
        if let Some(ref encoding) = self.encoding {
            dict.insert(Bytes::from_static(b"encoding"), Value::from(encoding));
        }

        Ok(Value::Dict(dict))
    }

    /// Encodes the torrent to canonical bencode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MetainfoError> {
        Ok(encode(&self.to_value()?)?)
    }

    /// Encodes the torrent and writes it to `path`, replacing any existing
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`MetainfoError::Io`] if the write fails; nothing is written
    /// if encoding fails.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), MetainfoError> {
        let path = path.as_ref();
        let data = self.to_bytes()?;
        std::fs::write(path, &data)?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "saved torrent");
        Ok(())
    }

    /// Computes the info hash from the current [`Info`].
    ///
    /// The hash is recomputed on every call, so it always reflects edits made
    /// to `info` since loading.
    pub fn info_hash(&self) -> Result<InfoHash, MetainfoError> {
        self.info.info_hash()
    }

    /// The info hash as 40 lowercase hex characters.
    pub fn info_hash_hex(&self) -> Result<String, MetainfoError> {
        Ok(self.info_hash()?.to_hex())
    }

    /// The top-level comment, if present and valid UTF-8.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_ref().and_then(Text::as_str)
    }

    /// The primary tracker URL, if present and valid UTF-8.
    pub fn announce(&self) -> Option<&str> {
        self.announce.as_ref().and_then(Text::as_str)
    }

    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_ref().and_then(Text::as_str)
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_ref().and_then(Text::as_str)
    }

    /// Returns all tracker URLs from both `announce` and `announce-list`.
    ///
    /// The primary tracker (from `announce`) comes first, followed by
    /// trackers from `announce-list`. Duplicates are removed.
    pub fn trackers(&self) -> Vec<Text> {
        let mut trackers = Vec::new();

        if let Some(ref announce) = self.announce {
            trackers.push(announce.clone());
        }

        for tier in self.announce_list.iter().flatten() {
            for tracker in tier {
                if !trackers.contains(tracker) {
                    trackers.push(tracker.clone());
                }
            }
        }

        trackers
    }
}

fn parse_announce_list(value: Value) -> Result<Vec<Vec<Text>>, MetainfoError> {
    let tiers = value
        .into_list()
        .ok_or(MetainfoError::InvalidField("announce-list"))?;

    tiers
        .into_iter()
        .map(|tier| -> Result<Vec<Text>, MetainfoError> {
            tier.into_list()
                .ok_or(MetainfoError::InvalidField("announce-list"))?
                .into_iter()
                .map(|url| value_to_text(url, "announce-list"))
                .collect()
        })
        .collect()
}
