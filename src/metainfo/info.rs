use super::error::MetainfoError;
use super::info_hash::InfoHash;
use super::text::Text;
use crate::bencode::{encode, Dict, Value};
use bytes::Bytes;
use std::path::PathBuf;

/// Length of one SHA-1 piece hash inside `pieces`.
pub const PIECE_HASH_LEN: usize = 20;

/// The info dictionary from a torrent file.
///
/// Everything that identifies the torrent's content lives here, and nothing
/// else: the info hash is computed from [`Info::to_value`] alone. A field
/// added to this struct therefore changes the hash; a field added to
/// [`Metainfo`](super::Metainfo) does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    /// File name (single-file) or root directory name (multi-file).
    pub name: Text,
    /// Number of bytes per piece.
    pub piece_length: u64,
    /// Concatenated 20-byte SHA-1 piece hashes.
    pub pieces: Bytes,
    /// The `private` flag, kept as `None` when the key is absent so that a
    /// round trip does not add it.
    pub private: Option<bool>,
    /// Tracker source tag. Not part of BEP-3, but set by most private trackers.
    pub source: Option<Text>,
    pub layout: FileLayout,
    /// Keys of the info dictionary this crate does not model, kept verbatim.
    pub extra: Dict,
}

/// Whether the torrent describes one file (`length`) or a directory (`files`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLayout {
    Single { length: u64 },
    Multi { files: Vec<File> },
}

/// One entry of the `files` list of a multi-file torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub length: u64,
    /// Path segments relative to the torrent's root directory.
    pub path: Vec<Text>,
    /// Unmodelled keys such as `md5sum` or `attr`.
    pub extra: Dict,
}

/// A file of the torrent with its full relative path and its byte offset in
/// the concatenated piece data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub length: u64,
    pub offset: u64,
}

impl File {
    pub fn new<T: Into<Text>>(path: impl IntoIterator<Item = T>, length: u64) -> Self {
        Self {
            length,
            path: path.into_iter().map(Into::into).collect(),
            extra: Dict::new(),
        }
    }

    /// Joins the path segments with `/`, independent of the host platform.
    ///
    /// Segments that are not UTF-8 are decoded lossily.
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(|segment| segment.to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.path
            .iter()
            .map(|segment| segment.to_string_lossy().into_owned())
            .collect()
    }

    fn from_value(value: Value) -> Result<Self, MetainfoError> {
        let mut dict = value
            .into_dict()
            .ok_or(MetainfoError::InvalidField("files"))?;

        let length = take_u64(&mut dict, "length", "file length")?
            .ok_or(MetainfoError::MissingField("file length"))?;

        let path = match dict.remove(b"path".as_slice()) {
            Some(Value::List(segments)) if !segments.is_empty() => segments
                .into_iter()
                .map(|segment| value_to_text(segment, "file path"))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(MetainfoError::InvalidField("file path")),
            None => return Err(MetainfoError::MissingField("file path")),
        };

        Ok(Self {
            length,
            path,
            extra: dict,
        })
    }

    fn to_value(&self) -> Result<Value, MetainfoError> {
        let mut dict = self.extra.clone();
        dict.insert(
            Bytes::from_static(b"length"),
            Value::Integer(to_integer(self.length, "file length")?),
        );
        dict.insert(
            Bytes::from_static(b"path"),
            Value::List(self.path.iter().map(Value::from).collect()),
        );
        Ok(Value::Dict(dict))
    }
}

impl Info {
    /// Creates a single-file info dictionary.
    pub fn single_file(
        name: impl Into<Text>,
        piece_length: u64,
        pieces: impl Into<Bytes>,
        length: u64,
    ) -> Self {
        Self::with_layout(name, piece_length, pieces, FileLayout::Single { length })
    }

    /// Creates a multi-file info dictionary rooted at directory `name`.
    pub fn multi_file(
        name: impl Into<Text>,
        piece_length: u64,
        pieces: impl Into<Bytes>,
        files: Vec<File>,
    ) -> Self {
        Self::with_layout(name, piece_length, pieces, FileLayout::Multi { files })
    }

    fn with_layout(
        name: impl Into<Text>,
        piece_length: u64,
        pieces: impl Into<Bytes>,
        layout: FileLayout,
    ) -> Self {
        Self {
            name: name.into(),
            piece_length,
            pieces: pieces.into(),
            private: None,
            source: None,
            layout,
            extra: Dict::new(),
        }
    }

    /// Projects a decoded info dictionary onto an [`Info`].
    ///
    /// # Errors
    ///
    /// - [`MetainfoError::InvalidField`] if the value is not a dictionary, a
    ///   known key has the wrong type, `piece length` is zero, or `pieces` is
    ///   not a multiple of 20 bytes long
    /// - [`MetainfoError::MissingField`] if `name`, `piece length` or
    ///   `pieces` is absent
    /// - [`MetainfoError::AmbiguousFileMode`] unless exactly one of `length`
    ///   and `files` is present
    pub fn from_value(value: Value) -> Result<Self, MetainfoError> {
        let mut dict = value
            .into_dict()
            .ok_or(MetainfoError::InvalidField("info"))?;

        let name = take_text(&mut dict, "name")?
            .ok_or(MetainfoError::MissingField("name"))?;

        let piece_length = take_u64(&mut dict, "piece length", "piece length")?
            .ok_or(MetainfoError::MissingField("piece length"))?;
        if piece_length == 0 {
            return Err(MetainfoError::InvalidField("piece length"));
        }

        let pieces = match dict.remove(b"pieces".as_slice()) {
            Some(Value::Bytes(b)) => b,
            Some(_) => return Err(MetainfoError::InvalidField("pieces")),
            None => return Err(MetainfoError::MissingField("pieces")),
        };
        if pieces.len() % PIECE_HASH_LEN != 0 {
            return Err(MetainfoError::InvalidField("pieces"));
        }

        let private = match take_integer(&mut dict, "private")? {
            None => None,
            Some(0) => Some(false),
            Some(1) => Some(true),
            Some(_) => return Err(MetainfoError::InvalidField("private")),
        };

        let source = take_text(&mut dict, "source")?;

        let length = dict.remove(b"length".as_slice());
        let files = dict.remove(b"files".as_slice());
        let layout = match (length, files) {
            (Some(length), None) => FileLayout::Single {
                length: value_to_u64(length, "length")?,
            },
            (None, Some(Value::List(files))) if !files.is_empty() => FileLayout::Multi {
                files: files
                    .into_iter()
                    .map(File::from_value)
                    .collect::<Result<_, _>>()?,
            },
            (None, Some(_)) => return Err(MetainfoError::InvalidField("files")),
            _ => return Err(MetainfoError::AmbiguousFileMode),
        };

        Ok(Self {
            name,
            piece_length,
            pieces,
            private,
            source,
            layout,
            extra: dict,
        })
    }

    /// Rebuilds the info dictionary, retained keys included.
    ///
    /// # Errors
    ///
    /// Returns [`MetainfoError::IntegerOverflow`] if a length does not fit
    /// in a bencode integer.
    pub fn to_value(&self) -> Result<Value, MetainfoError> {
        let mut dict = self.extra.clone();

        dict.insert(Bytes::from_static(b"name"), Value::from(&self.name));
        dict.insert(
            Bytes::from_static(b"piece length"),
            Value::Integer(to_integer(self.piece_length, "piece length")?),
        );
        dict.insert(
            Bytes::from_static(b"pieces"),
            Value::Bytes(self.pieces.clone()),
        );

        if let Some(private) = self.private {
            dict.insert(
                Bytes::from_static(b"private"),
                Value::Integer(i64::from(private)),
            );
        }
        if let Some(ref source) = self.source {
            dict.insert(Bytes::from_static(b"source"), Value::from(source));
        }

        match &self.layout {
            FileLayout::Single { length } => {
                dict.remove(b"files".as_slice());
                dict.insert(
                    Bytes::from_static(b"length"),
                    Value::Integer(to_integer(*length, "length")?),
                );
            }
            FileLayout::Multi { files } => {
                dict.remove(b"length".as_slice());
                let files = files
                    .iter()
                    .map(File::to_value)
                    .collect::<Result<Vec<_>, _>>()?;
                dict.insert(Bytes::from_static(b"files"), Value::List(files));
            }
        }

        Ok(Value::Dict(dict))
    }

    /// Returns the canonical bencoding of this dictionary, the exact bytes
    /// the info hash is computed over.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MetainfoError> {
        Ok(encode(&self.to_value()?)?)
    }

    /// Computes the info hash from the current field values.
    pub fn info_hash(&self) -> Result<InfoHash, MetainfoError> {
        Ok(InfoHash::from_info_bytes(&self.to_bytes()?))
    }

    /// The `source` tag, if present and valid UTF-8.
    pub fn source(&self) -> Option<&str> {
        self.source.as_ref().and_then(Text::as_str)
    }

    pub fn is_multi_file(&self) -> bool {
        matches!(self.layout, FileLayout::Multi { .. })
    }

    pub fn is_private(&self) -> bool {
        self.private.unwrap_or(false)
    }

    /// Total size of the content in bytes.
    pub fn total_length(&self) -> u64 {
        match &self.layout {
            FileLayout::Single { length } => *length,
            FileLayout::Multi { files } => files
                .iter()
                .fold(0u64, |total, f| total.saturating_add(f.length)),
        }
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len() / PIECE_HASH_LEN
    }

    /// Returns the SHA-1 hash of piece `index`.
    pub fn piece_hash(&self, index: usize) -> Option<[u8; 20]> {
        self.pieces
            .chunks_exact(PIECE_HASH_LEN)
            .nth(index)
            .and_then(|chunk| chunk.try_into().ok())
    }

    /// Lists the torrent's files with paths rooted at [`Info::name`].
    ///
    /// A single-file torrent yields one entry named after the torrent.
    pub fn files(&self) -> Vec<FileEntry> {
        match &self.layout {
            FileLayout::Single { length } => vec![FileEntry {
                path: PathBuf::from(self.name.to_string_lossy().into_owned()),
                length: *length,
                offset: 0,
            }],
            FileLayout::Multi { files } => {
                let root = PathBuf::from(self.name.to_string_lossy().into_owned());
                let mut offset = 0u64;
                files
                    .iter()
                    .map(|file| {
                        let entry = FileEntry {
                            path: root.join(file.to_path_buf()),
                            length: file.length,
                            offset,
                        };
                        offset = offset.saturating_add(file.length);
                        entry
                    })
                    .collect()
            }
        }
    }
}

pub(super) fn take_text(
    dict: &mut Dict,
    key: &'static str,
) -> Result<Option<Text>, MetainfoError> {
    dict.remove(key.as_bytes())
        .map(|value| value_to_text(value, key))
        .transpose()
}

pub(super) fn take_integer(
    dict: &mut Dict,
    key: &'static str,
) -> Result<Option<i64>, MetainfoError> {
    match dict.remove(key.as_bytes()) {
        None => Ok(None),
        Some(Value::Integer(i)) => Ok(Some(i)),
        Some(_) => Err(MetainfoError::InvalidField(key)),
    }
}

fn take_u64(
    dict: &mut Dict,
    key: &'static str,
    field: &'static str,
) -> Result<Option<u64>, MetainfoError> {
    dict.remove(key.as_bytes())
        .map(|value| value_to_u64(value, field))
        .transpose()
}

pub(super) fn value_to_text(value: Value, field: &'static str) -> Result<Text, MetainfoError> {
    match value {
        Value::Bytes(b) => Ok(Text::from(b)),
        _ => Err(MetainfoError::InvalidField(field)),
    }
}

fn value_to_u64(value: Value, field: &'static str) -> Result<u64, MetainfoError> {
    value
        .as_integer()
        .and_then(|i| u64::try_from(i).ok())
        .ok_or(MetainfoError::InvalidField(field))
}

fn to_integer(value: u64, field: &'static str) -> Result<i64, MetainfoError> {
    i64::try_from(value).map_err(|_| MetainfoError::IntegerOverflow(field))
}
