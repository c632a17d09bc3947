//! torrent-repack - BitTorrent metainfo engine
//!
//! Loads `.torrent` files, computes their info hash, applies field-level
//! edits and writes them back.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding
//! - [`metainfo`] - BEP-3 torrent metainfo, info hash and repacking
//!
//! # Example
//!
//! ```no_run
//! use torrent_repack::{EditStrategy, Metainfo};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut torrent = Metainfo::open("test.torrent")?;
//! torrent.repack(
//!     &EditStrategy::new()
//!         .comment("TensoRaws")
//!         .info_source("https://github.com/TensoRaws"),
//! )?;
//! println!("{}", torrent.info_hash_hex()?);
//! torrent.save_to("test_save.torrent")?;
//! # Ok(())
//! # }
//! ```

pub mod bencode;
pub mod metainfo;

pub use bencode::{decode, decode_prefix, encode, BencodeError, Value};
pub use metainfo::{
    EditStrategy, File, FileEntry, FileLayout, Info, InfoHash, Metainfo, MetainfoError, Text,
};
