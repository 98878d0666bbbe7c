//! Read-only mapping from segment tokens to playable assets.
//!
//! A catalog is built once at startup (by naming convention, by scanning an
//! audio directory, or from a JSON manifest) and then only read. Hundreds
//! multiples and teens are stored as their own entries; nothing here derives
//! them from smaller segments.
//!
//! Run [`SegmentCatalog::ensure_coverage`] right after loading so a missing
//! recording is reported before the first ticket is called rather than heard
//! as a gap in the announcement.

pub mod manifest;
pub mod naming;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::composer::{required_tokens, ComposeError};
use crate::lexicon::INSTANT_NOTICES;
use crate::token::{CatalogToken, Phrase};
use crate::SegmentResolver;

pub use manifest::CatalogManifest;
pub use naming::{NamingConvention, NamingConventionBuilder};

/// Opaque handle of a recorded segment, usually a relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Wrap an asset id as-is.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as passed to the player.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("No audio segment recorded for {0}")]
    MissingSegment(CatalogToken),
    #[error("No audio segment recorded for clinic {0}")]
    MissingClinic(u32),
    #[error("No recording for notice {0:?}")]
    MissingNotice(String),
    #[error("Token {0} is outside the range of its kind")]
    InvalidToken(CatalogToken),
    #[error("Catalog is missing {} segment(s): {}", .0.len(), list_tokens(.0))]
    Incomplete(Vec<CatalogToken>),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid catalog manifest: {0}")]
    Manifest(String),
    #[error("Invalid naming convention: {0}")]
    Naming(String),
}

fn list_tokens(tokens: &[CatalogToken]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Segment, clinic-name and notice assets for one deployment.
///
/// Only shared references are handed out after loading, so one catalog can
/// serve any number of threads without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentCatalog {
    segments: BTreeMap<CatalogToken, AssetId>,
    clinics: BTreeMap<u32, AssetId>,
    /// Fixed announcements played on their own (welcome, closing, ...).
    notices: BTreeMap<String, AssetId>,
}

impl SegmentCatalog {
    /// Build a catalog from explicit entries. Later duplicates win.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (CatalogToken, AssetId)>,
    ) -> Result<Self, CatalogError> {
        let mut segments = BTreeMap::new();
        for (token, asset) in entries {
            if !token.is_valid() {
                return Err(CatalogError::InvalidToken(token));
            }
            segments.insert(token, asset);
        }
        Ok(Self {
            segments,
            ..Self::default()
        })
    }

    /// Attach clinic-name assets.
    pub fn with_clinics(mut self, clinics: impl IntoIterator<Item = (u32, AssetId)>) -> Self {
        self.clinics.extend(clinics);
        self
    }

    /// Attach fixed-notice assets by name.
    pub fn with_notices(
        mut self,
        notices: impl IntoIterator<Item = (String, AssetId)>,
    ) -> Self {
        self.notices.extend(notices);
        self
    }

    /// Every segment named by `naming`, plus the stock notices, without
    /// checking that files exist.
    pub fn from_naming(naming: &NamingConvention, clinics: impl IntoIterator<Item = u32>) -> Self {
        let segments = CatalogToken::all()
            .map(|token| (token, naming.asset_id(token)))
            .collect();
        let clinics = clinics
            .into_iter()
            .map(|id| (id, naming.clinic_asset_id(id)))
            .collect();
        let notices = INSTANT_NOTICES
            .iter()
            .map(|(name, _)| (name.to_string(), naming.notice_asset_id(name)))
            .collect();
        Self {
            segments,
            clinics,
            notices,
        }
    }

    /// Collect the segments present in `dir`.
    ///
    /// Files are matched by name through `naming`; anything the convention
    /// does not recognise is skipped. Asset ids are the joined paths.
    pub fn scan_dir(dir: &Path, naming: &NamingConvention) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                log::debug!("Skipping non UTF-8 file name {:?}", file_name);
                continue;
            };
            let asset = AssetId::new(entry.path().to_string_lossy().into_owned());

            if let Some(token) = naming.token_for_file_name(name) {
                catalog.segments.insert(token, asset);
            } else if let Some(clinic) = naming.clinic_for_file_name(name) {
                catalog.clinics.insert(clinic, asset);
            } else {
                log::debug!("Skipping {name}: not a segment file");
            }
        }

        log::info!(
            "Loaded {} segments and {} clinic names from {}",
            catalog.segments.len(),
            catalog.clinics.len(),
            dir.display()
        );
        Ok(catalog)
    }

    /// Add every file in `dir` as a notice named by its stem.
    ///
    /// Notices are kept in their own directory (`instant/` in the stock
    /// layout), so any file with the convention's extension counts.
    pub fn scan_notices(
        mut self,
        dir: &Path,
        naming: &NamingConvention,
    ) -> Result<Self, CatalogError> {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let notice = file_name
                .to_str()
                .and_then(|name| naming.notice_for_file_name(name));
            let Some(notice) = notice else {
                log::debug!("Skipping {:?}: not a notice file", file_name);
                continue;
            };
            let asset = AssetId::new(entry.path().to_string_lossy().into_owned());
            self.notices.insert(notice.to_string(), asset);
        }

        log::info!("Loaded {} notices from {}", self.notices.len(), dir.display());
        Ok(self)
    }

    /// Asset for `token`, if recorded.
    pub fn get(&self, token: &CatalogToken) -> Option<&AssetId> {
        self.segments.get(token)
    }

    /// Asset for a clinic name, if recorded.
    pub fn clinic(&self, clinic: u32) -> Option<&AssetId> {
        self.clinics.get(&clinic)
    }

    /// Asset for a fixed notice, if recorded.
    pub fn notice(&self, name: &str) -> Option<&AssetId> {
        self.notices.get(name)
    }

    /// Number of segment entries. Clinics and notices are not counted.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Recorded tokens in order.
    pub fn tokens(&self) -> impl Iterator<Item = &CatalogToken> {
        self.segments.keys()
    }

    /// Ids of the clinics with a recorded name, ascending.
    pub fn clinic_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.clinics.keys().copied()
    }

    /// Names of the recorded notices, sorted.
    pub fn notice_names(&self) -> impl Iterator<Item = &str> {
        self.notices.keys().map(String::as_str)
    }

    /// Copy of this catalog with `token` removed.
    pub fn without(&self, token: CatalogToken) -> Self {
        let mut copy = self.clone();
        copy.segments.remove(&token);
        copy
    }

    /// Tokens needed to announce any ticket in `0..=max` that have no entry.
    ///
    /// The three fixed phrases are always required.
    pub fn validate_coverage(&self, max: u32) -> Result<BTreeSet<CatalogToken>, CatalogError> {
        let mut required = required_tokens(max)?;
        required.extend(Phrase::ALL.into_iter().map(CatalogToken::Phrase));
        required.retain(|token| !self.segments.contains_key(token));
        Ok(required)
    }

    /// Fail with [`CatalogError::Incomplete`] unless every ticket in `0..=max`
    /// can be announced.
    pub fn ensure_coverage(&self, max: u32) -> Result<(), CatalogError> {
        let missing = self.validate_coverage(max)?;
        if missing.is_empty() {
            return Ok(());
        }
        for token in &missing {
            log::warn!("Missing audio segment for {token}");
        }
        Err(CatalogError::Incomplete(missing.into_iter().collect()))
    }
}

impl SegmentResolver for SegmentCatalog {
    fn resolve(&self, token: CatalogToken) -> Result<AssetId, CatalogError> {
        self.get(&token)
            .cloned()
            .ok_or(CatalogError::MissingSegment(token))
    }

    fn resolve_clinic(&self, clinic: u32) -> Result<AssetId, CatalogError> {
        self.clinic(clinic)
            .cloned()
            .ok_or(CatalogError::MissingClinic(clinic))
    }

    fn resolve_notice(&self, name: &str) -> Result<AssetId, CatalogError> {
        self.notice(name)
            .cloned()
            .ok_or_else(|| CatalogError::MissingNotice(name.to_string()))
    }
}
