//! Torrent metainfo handling ([BEP-3]).
//!
//! A torrent file (`.torrent`) is a bencoded dictionary. Its `info`
//! sub-dictionary describes the content (name, piece size, piece hashes,
//! file layout) and its SHA-1 is the torrent's identity, the info hash.
//! Everything else at the top level (trackers, comment, creator, dates) is
//! descriptive and can change without changing that identity.
//!
//! [`Metainfo`] models the whole file and [`Info`] the info dictionary.
//! Keys neither type models are retained and written back unchanged.
//!
//! # Examples
//!
//! ## Editing and re-saving a torrent
//!
//! ```no_run
//! use torrent_repack::metainfo::{EditStrategy, Metainfo};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut torrent = Metainfo::open("example.torrent")?;
//! let original = torrent.info_hash()?;
//!
//! torrent.repack(&EditStrategy::new().comment("re-uploaded"))?;
//! assert_eq!(torrent.info_hash()?, original);
//!
//! torrent.repack(&EditStrategy::new().info_source("MYTRACKER"))?;
//! println!("new info hash: {}", torrent.info_hash()?);
//!
//! torrent.save_to("example.repacked.torrent")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Listing files
//!
//! ```no_run
//! use torrent_repack::metainfo::Metainfo;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let torrent = Metainfo::open("example.torrent")?;
//! for file in torrent.info.files() {
//!     println!("  {} ({} bytes)", file.path.display(), file.length);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Torrent Structure
//!
//! - **info** - Core torrent metadata (hashed to create the info hash)
//!   - `name` - Suggested file/directory name
//!   - `piece length` - Size of each piece in bytes
//!   - `pieces` - Concatenated SHA1 hashes of each piece
//!   - `length` - Total size (single-file) OR `files` list (multi-file)
//!   - `private`, `source` - Optional private-tracker flags
//! - **announce** - Primary tracker URL
//! - **announce-list** - Additional tracker tiers (BEP-12)
//! - **creation date** - Unix timestamp when created
//! - **comment** - Optional comment
//! - **created by** - Client that created the torrent
//! - **encoding** - Declared string encoding
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod error;
mod info;
mod info_hash;
mod repack;
mod text;
mod torrent;

pub use error::MetainfoError;
pub use info::{File, FileEntry, FileLayout, Info, PIECE_HASH_LEN};
pub use info_hash::InfoHash;
pub use repack::EditStrategy;
pub use text::Text;
pub use torrent::Metainfo;

#[cfg(test)]
mod tests;
