use crate::bencode::Value;
use bytes::Bytes;
use std::borrow::Cow;
use std::fmt;

/// A text field of a torrent, kept as the raw bytes found in the file.
///
/// Bencode strings carry no encoding. Most torrents use UTF-8, but older
/// ones often hold GBK or Shift-JIS text and say so in the top-level
/// `encoding` key. Keeping the bytes means such files load and save back
/// unchanged, and their info hash is preserved.
///
/// ```
/// use torrent_repack::metainfo::Text;
///
/// let utf8 = Text::from("lenna.jpg");
/// assert_eq!(utf8, "lenna.jpg");
/// assert_eq!(utf8.as_str(), Some("lenna.jpg"));
///
/// let gbk = Text::from_bytes(&b"\xC4\xE3\xBA\xC3"[..]);
/// assert_eq!(gbk.as_str(), None);
/// assert_eq!(gbk.as_bytes(), b"\xC4\xE3\xBA\xC3");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Text(Bytes);

impl Text {
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Text(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the text if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Decodes as UTF-8, replacing invalid sequences with U+FFFD.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn is_utf8(&self) -> bool {
        self.as_str().is_some()
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text(Bytes::from(s))
    }
}

impl From<Bytes> for Text {
    fn from(b: Bytes) -> Self {
        Text(b)
    }
}

impl From<&Text> for Value {
    fn from(text: &Text) -> Self {
        Value::Bytes(text.0.clone())
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => fmt::Debug::fmt(s, f),
            None => write!(f, "Text(0x{})", hex::encode(&self.0)),
        }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
