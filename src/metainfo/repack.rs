//! Field-level edits of an existing torrent.

use super::error::MetainfoError;
use super::text::Text;
use super::torrent::Metainfo;
use serde::{Deserialize, Serialize};

/// A set of optional overrides applied by [`Metainfo::repack`].
///
/// Unset fields leave the torrent untouched; they never clear a value.
/// Only `info_source` lives inside the info dictionary, so it is the only
/// override that changes the info hash.
///
/// The struct deserializes from any serde format, with every key optional:
///
/// ```
/// use torrent_repack::metainfo::EditStrategy;
///
/// let strategy = EditStrategy::new()
///     .comment("TensoRaws")
///     .info_source("https://github.com/TensoRaws");
/// assert!(strategy.changes_info_hash());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditStrategy {
    /// Replaces the top-level `comment`.
    pub comment: Option<String>,
    /// Replaces `info.source`.
    pub info_source: Option<String>,
    /// Replaces the top-level `announce` URL.
    pub announce: Option<String>,
    /// Replaces `created by`.
    pub created_by: Option<String>,
    /// Replaces `creation date` (unix seconds).
    pub creation_date: Option<i64>,
}

impl EditStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn info_source(mut self, source: impl Into<String>) -> Self {
        self.info_source = Some(source.into());
        self
    }

    pub fn announce(mut self, url: impl Into<String>) -> Self {
        self.announce = Some(url.into());
        self
    }

    pub fn created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    pub fn creation_date(mut self, timestamp: i64) -> Self {
        self.creation_date = Some(timestamp);
        self
    }

    /// Returns `true` if no override is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `true` if applying this strategy touches the info dictionary.
    pub fn changes_info_hash(&self) -> bool {
        self.info_source.is_some()
    }
}

impl Metainfo {
    /// Applies `strategy` to this torrent in place.
    ///
    /// Call [`Metainfo::info_hash`] afterwards to observe the resulting hash.
    ///
    /// # Errors
    ///
    /// When `info_source` is set, the info dictionary is re-encoded before
    /// and after the edit and any encoding failure is returned here rather
    /// than at save time. Fields outside `info` have already been edited
    /// when that happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use torrent_repack::metainfo::{EditStrategy, Info, Metainfo};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut torrent = Metainfo::new(Info::single_file("a.bin", 16384, vec![0u8; 20], 100));
    /// let before = torrent.info_hash()?;
    ///
    /// torrent.repack(&EditStrategy::new().comment("hello"))?;
    /// assert_eq!(torrent.info_hash()?, before);
    ///
    /// torrent.repack(&EditStrategy::new().info_source("TRACKER"))?;
    /// assert_ne!(torrent.info_hash()?, before);
    /// # Ok(())
    /// # }
    /// ```
    pub fn repack(&mut self, strategy: &EditStrategy) -> Result<(), MetainfoError> {
        if let Some(ref comment) = strategy.comment {
            self.comment = Some(Text::from(comment.as_str()));
        }
        if let Some(ref announce) = strategy.announce {
            self.announce = Some(Text::from(announce.as_str()));
        }
        if let Some(ref created_by) = strategy.created_by {
            self.created_by = Some(Text::from(created_by.as_str()));
        }
        if let Some(date) = strategy.creation_date {
            self.creation_date = Some(date);
        }

        if let Some(ref source) = strategy.info_source {
            let old_hash = self.info.info_hash()?;
            self.info.source = Some(Text::from(source.as_str()));
            let new_hash = self.info.info_hash()?;
            tracing::debug!(
                name = %self.info.name,
                %old_hash,
                %new_hash,
                "info source replaced"
            );
        }

        tracing::trace!(?strategy, name = %self.info.name, "repacked torrent");
        Ok(())
    }

    /// By-value form of [`Metainfo::repack`].
    pub fn repacked(mut self, strategy: &EditStrategy) -> Result<Self, MetainfoError> {
        self.repack(strategy)?;
        Ok(self)
    }
}
