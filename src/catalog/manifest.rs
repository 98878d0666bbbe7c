use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AssetId, CatalogError, NamingConvention, SegmentCatalog};
use crate::token::CatalogToken;

/// On-disk listing of segment assets for deployments whose files do not
/// follow a naming convention.
///
/// ```json
/// {
///   "segments": { "0": "audio/zero.mp3", "400": "audio/400.mp3", "and": "audio/wa.mp3" },
///   "clinics": { "1": "audio/family.mp3" },
///   "notices": { "welcome": "instant/welcome.mp3" }
/// }
/// ```
///
/// Segment keys are the default file stems (`"0"` to `"900"`, `"and"`,
/// `"prefix"`, `"ding"`); the phrase names `"conjunction"` and `"chime"` are
/// accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifest {
    #[serde(default)]
    pub segments: BTreeMap<String, String>,
    #[serde(default)]
    pub clinics: BTreeMap<u32, String>,
    #[serde(default)]
    pub notices: BTreeMap<String, String>,
}

impl CatalogManifest {
    /// Parse a manifest. Unknown top-level fields are rejected.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json)
            .map_err(|e| CatalogError::Manifest(format!("Failed to parse JSON: {e}")))
    }

    /// Turn the listing into a catalog, failing on keys that name no token.
    pub fn into_catalog(self) -> Result<SegmentCatalog, CatalogError> {
        let naming = NamingConvention::default();
        let mut entries = Vec::with_capacity(self.segments.len());
        for (key, asset) in self.segments {
            let token = token_for_key(&naming, &key)
                .ok_or_else(|| CatalogError::Manifest(format!("Unknown segment key {key:?}")))?;
            entries.push((token, AssetId::new(asset)));
        }

        let catalog = SegmentCatalog::from_entries(entries)?
            .with_clinics(self.clinics.into_iter().map(|(id, a)| (id, AssetId::new(a))))
            .with_notices(self.notices.into_iter().map(|(name, a)| (name, AssetId::new(a))));
        Ok(catalog)
    }
}

fn token_for_key(naming: &NamingConvention, key: &str) -> Option<CatalogToken> {
    match key {
        "conjunction" => Some(CatalogToken::CONJUNCTION),
        "chime" => Some(CatalogToken::CHIME),
        _ => naming.token_for_stem(key),
    }
}

impl SegmentCatalog {
    /// Load a catalog from a JSON manifest file.
    pub fn load_manifest(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = CatalogManifest::from_json_str(&content)?.into_catalog()?;
        log::info!(
            "Loaded {} segments and {} clinic names from {}",
            catalog.len(),
            catalog.clinic_ids().count(),
            path.display()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogManifest;
    use crate::catalog::{CatalogError, SegmentCatalog};
    use crate::token::CatalogToken;
    use crate::SegmentResolver;

    #[test]
    fn builds_catalog_from_manifest_keys() {
        let manifest = CatalogManifest::from_json_str(
            r#"{
                "segments": {"8": "eight.ogg", "and": "wa.ogg", "chime": "bell.ogg", "200": "mi2atan.ogg"},
                "clinics": {"3": "skin.ogg"},
                "notices": {"closing": "closing.ogg"}
            }"#,
        )
        .unwrap();
        let catalog = manifest.into_catalog().unwrap();

        assert_eq!(catalog.resolve(CatalogToken::Unit(8)).unwrap().as_str(), "eight.ogg");
        assert_eq!(catalog.resolve(CatalogToken::CONJUNCTION).unwrap().as_str(), "wa.ogg");
        assert_eq!(catalog.resolve(CatalogToken::CHIME).unwrap().as_str(), "bell.ogg");
        assert_eq!(
            catalog.resolve(CatalogToken::HundredsMultiple(200)).unwrap().as_str(),
            "mi2atan.ogg"
        );
        assert_eq!(catalog.resolve_clinic(3).unwrap().as_str(), "skin.ogg");
        assert_eq!(catalog.resolve_notice("closing").unwrap().as_str(), "closing.ogg");
    }

    #[test]
    fn rejects_unknown_keys() {
        let manifest =
            CatalogManifest::from_json_str(r#"{"segments": {"250": "x.mp3"}}"#).unwrap();
        assert!(matches!(
            manifest.into_catalog(),
            Err(CatalogError::Manifest(_))
        ));

        assert!(matches!(
            CatalogManifest::from_json_str(r#"{"segmnts": {}}"#),
            Err(CatalogError::Manifest(_))
        ));
    }

    #[test]
    fn loads_manifest_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{"segments": {"prefix": "p.mp3"}}"#).unwrap();

        let catalog = SegmentCatalog::load_manifest(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.clinic_ids().count(), 0);

        let missing = SegmentCatalog::load_manifest(&dir.path().join("none.json"));
        assert!(matches!(missing, Err(CatalogError::Io(_))));
    }
}
