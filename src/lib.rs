//! # ticket-voice
//!
//! Spoken Arabic ticket numbers for clinic queue displays, assembled from
//! pre-recorded audio segments.
//!
//! ## Features
//!
//! - **Composer**: decomposes a ticket number (0-999) into the ordered
//!   segments of its spoken form, with the conjunction placed between groups
//! - **Segment Catalog**: read-only token to asset mapping, loaded by naming
//!   convention, directory scan or JSON manifest, with coverage validation
//! - **Announcements**: chime, prefix, number and clinic name resolved in
//!   playback order, plus fixed notices (welcome, closing, ...)
//!
//! ## Quick Start
//!
//! ```
//! use ticket_voice::{Announcement, NamingConvention, SegmentCatalog, MAX_TICKET_NUMBER};
//!
//! let catalog = SegmentCatalog::from_naming(&NamingConvention::default(), 1..=10);
//! catalog.ensure_coverage(MAX_TICKET_NUMBER)?;
//!
//! let announcement = Announcement::for_ticket(468, Some(2), &catalog)?;
//! for asset in &announcement.assets {
//!     println!("{asset}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod announce;
pub mod catalog;
pub mod composer;
pub mod lexicon;
pub mod token;

pub use announce::{AnnounceError, Announcement, AnnouncementRequest, AnnouncementRequestBuilder};
pub use catalog::{AssetId, CatalogError, NamingConvention, SegmentCatalog};
pub use composer::{checked_ticket, decompose, ComposeError, MAX_TICKET_NUMBER};
pub use token::{CatalogToken, Phrase, TokenTag};

/// Source of playable assets for segment tokens.
///
/// [`SegmentCatalog`] is the standard implementation. Callers that keep
/// their recordings elsewhere implement this to plug into
/// [`Announcement::for_ticket`].
pub trait SegmentResolver {
    /// Asset for `token`, or [`CatalogError::MissingSegment`].
    fn resolve(&self, token: CatalogToken) -> Result<AssetId, CatalogError>;

    /// Asset for a clinic name, or [`CatalogError::MissingClinic`].
    fn resolve_clinic(&self, clinic: u32) -> Result<AssetId, CatalogError>;

    /// Asset for a fixed notice such as `"welcome"`, or
    /// [`CatalogError::MissingNotice`].
    fn resolve_notice(&self, name: &str) -> Result<AssetId, CatalogError>;

    /// Resolve a whole sequence, stopping at the first missing segment.
    fn resolve_all(&self, tokens: &[CatalogToken]) -> Result<Vec<AssetId>, CatalogError> {
        tokens.iter().map(|&token| self.resolve(token)).collect()
    }
}
