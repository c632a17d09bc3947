//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format of `.torrent` files. It has four
//! kinds of value:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Reads are tolerant and writes are strict: the decoder accepts dictionaries
//! whose keys are out of order, while the encoder always emits keys in
//! ascending byte order. Re-encoding a decoded value therefore yields the
//! canonical form, which is what info-hashes are computed over.
//!
//! # Examples
//!
//! ```
//! use torrent_repack::bencode::{decode, encode};
//!
//! // Keys arrive unsorted and leave sorted.
//! let value = decode(b"d3:zoo1:z3:ant1:ae").unwrap();
//! assert_eq!(encode(&value).unwrap(), b"d3:ant1:a3:zoo1:ze");
//! ```
//!
//! # Error Handling
//!
//! Every syntax error is a [`BencodeError`] carrying the offset where
//! decoding stopped:
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended inside a value
//! - [`BencodeError::MalformedInteger`] - Leading zeros, `-0`, overflow, ...
//! - [`BencodeError::MalformedLength`] - Bad or out-of-bounds string length
//! - [`BencodeError::MalformedKey`] - Dictionary key is not a byte string
//! - [`BencodeError::DuplicateKey`] - Dictionary key repeated
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded (max 64 levels)
//! - [`BencodeError::TrailingData`] - Extra data after the value
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{decode, decode_prefix};
pub use encode::{encode, encode_to};
pub use error::BencodeError;
pub use value::{Dict, Value};
