use derive_builder::Builder;
use serde::Serialize;

use crate::catalog::{AssetId, CatalogError};
use crate::composer::{checked_ticket, decompose, ComposeError};
use crate::lexicon::{clinic_text, render};
use crate::token::CatalogToken;
use crate::SegmentResolver;

#[derive(thiserror::Error, Debug)]
pub enum AnnounceError {
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// What to announce: a ticket and, optionally, the clinic it is called to.
///
/// ```
/// use ticket_voice::AnnouncementRequestBuilder;
///
/// let request = AnnouncementRequestBuilder::default().ticket(42).clinic(3u32).build()?;
/// assert_eq!(request.clinic, Some(3));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct AnnouncementRequest {
    #[builder(setter(into))]
    pub ticket: i64,
    #[builder(default, setter(into, strip_option))]
    pub clinic: Option<u32>,
}

/// A fully resolved announcement, ready for playback.
///
/// `assets` is the playback order: chime, prefix, the number segments, then
/// the clinic name when one was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    pub ticket: u32,
    pub clinic: Option<u32>,
    /// Decomposition of `ticket`.
    pub number: Vec<CatalogToken>,
    pub assets: Vec<AssetId>,
}

impl Announcement {
    /// Decompose `ticket` and resolve every segment through `resolver`.
    ///
    /// Any missing segment fails the whole announcement; a partial list is
    /// never returned.
    pub fn for_ticket(
        ticket: i64,
        clinic: Option<u32>,
        resolver: &impl SegmentResolver,
    ) -> Result<Self, AnnounceError> {
        let ticket = checked_ticket(ticket)?;
        let number = decompose(i64::from(ticket))?;

        let mut assets = resolver.resolve_all(&[CatalogToken::CHIME, CatalogToken::PREFIX])?;
        assets.extend(resolver.resolve_all(&number)?);
        if let Some(clinic) = clinic {
            assets.push(resolver.resolve_clinic(clinic)?);
        }

        log::debug!("Ticket {ticket} resolved to {} segments", assets.len());
        Ok(Self {
            ticket,
            clinic,
            number,
            assets,
        })
    }

    /// [`Announcement::for_ticket`] for a built request.
    pub fn from_request(
        request: &AnnouncementRequest,
        resolver: &impl SegmentResolver,
    ) -> Result<Self, AnnounceError> {
        Self::for_ticket(request.ticket, request.clinic, resolver)
    }

    /// Full token sequence as played, without the clinic segment.
    pub fn tokens(&self) -> Vec<CatalogToken> {
        let mut tokens = vec![CatalogToken::CHIME, CatalogToken::PREFIX];
        tokens.extend(&self.number);
        tokens
    }

    /// The announcement as Arabic text, e.g.
    /// "على العميل رقم أربعمائة وستون وثمانية عيادة الأسنان".
    pub fn spoken_text(&self, clinic_names: &[(u32, &str)]) -> String {
        let mut text = render(&self.tokens());
        if let Some(clinic) = self.clinic {
            text.push(' ');
            text.push_str(&clinic_text(clinic, clinic_names));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::{AnnounceError, Announcement, AnnouncementRequestBuilder};
    use crate::catalog::{CatalogError, NamingConvention, SegmentCatalog};
    use crate::composer::ComposeError;
    use crate::lexicon::DEFAULT_CLINIC_NAMES;
    use crate::token::CatalogToken;

    fn catalog() -> SegmentCatalog {
        SegmentCatalog::from_naming(&NamingConvention::default(), 1..=10)
    }

    fn asset_names(announcement: &Announcement) -> Vec<&str> {
        announcement.assets.iter().map(|a| a.as_str()).collect()
    }

    #[test]
    fn builds_call_sequence() {
        let announcement = Announcement::for_ticket(468, Some(2), &catalog()).unwrap();
        assert_eq!(
            asset_names(&announcement),
            vec![
                "ding.mp3",
                "prefix.mp3",
                "400.mp3",
                "and.mp3",
                "60.mp3",
                "and.mp3",
                "8.mp3",
                "clinic2.mp3"
            ]
        );
        assert_eq!(announcement.ticket, 468);
        assert_eq!(announcement.number.len(), 5);
    }

    #[test]
    fn clinic_is_optional() {
        let announcement = Announcement::for_ticket(0, None, &catalog()).unwrap();
        assert_eq!(asset_names(&announcement), vec!["ding.mp3", "prefix.mp3", "0.mp3"]);
    }

    #[test]
    fn missing_segment_fails_the_whole_announcement() {
        let catalog = catalog().without(CatalogToken::TensMultiple(60));
        assert!(matches!(
            Announcement::for_ticket(468, None, &catalog),
            Err(AnnounceError::Catalog(CatalogError::MissingSegment(
                CatalogToken::TensMultiple(60)
            )))
        ));
        assert!(Announcement::for_ticket(408, None, &catalog).is_ok());
    }

    #[test]
    fn unknown_clinic_is_reported() {
        assert!(matches!(
            Announcement::for_ticket(5, Some(11), &catalog()),
            Err(AnnounceError::Catalog(CatalogError::MissingClinic(11)))
        ));
    }

    #[test]
    fn out_of_range_ticket_is_reported() {
        assert!(matches!(
            Announcement::for_ticket(1000, Some(1), &catalog()),
            Err(AnnounceError::Compose(ComposeError::OutOfRange(1000)))
        ));
    }

    #[test]
    fn request_builder_and_spoken_text() {
        let request = AnnouncementRequestBuilder::default()
            .ticket(468)
            .clinic(2u32)
            .build()
            .unwrap();
        let announcement = Announcement::from_request(&request, &catalog()).unwrap();
        assert_eq!(
            announcement.spoken_text(&DEFAULT_CLINIC_NAMES),
            "على العميل رقم أربعمائة وستون وثمانية عيادة الأسنان"
        );

        let without_clinic = AnnouncementRequestBuilder::default().ticket(12).build().unwrap();
        assert_eq!(without_clinic.clinic, None);
    }
}
