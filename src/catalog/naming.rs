use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::{AssetId, CatalogError};
use crate::token::{CatalogToken, Phrase};

/// How segment files are named on disk.
///
/// The defaults match the deployed asset set: one file per numeric segment
/// named by its value (`0.mp3` ... `900.mp3`), `and.mp3`, `prefix.mp3`,
/// `ding.mp3` and `clinic{N}.mp3`, with fixed notices such as `welcome.mp3`
/// kept apart under `instant/`. Renaming any of these breaks existing
/// installs, so deployments that differ load their own convention with
/// [`NamingConvention::from_json_file`].
///
/// Every stem must map back to exactly one token, so the builder and the JSON
/// loader both reject phrase stems that are empty, repeated, numeric or shaped
/// like a clinic name.
///
/// ```
/// use ticket_voice::catalog::NamingConventionBuilder;
///
/// let naming = NamingConventionBuilder::default()
///     .base("sounds/")
///     .extension("ogg")
///     .build()?;
/// assert_eq!(naming.clinic_file_name(3), "clinic3.ogg");
///
/// assert!(NamingConventionBuilder::default().conjunction("8").build().is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into), build_fn(validate = "Self::validate_stems"))]
#[serde(default)]
pub struct NamingConvention {
    /// Prepended to every file name to form the asset id (e.g. `audio/`).
    pub base: String,
    /// File extension without the dot. Empty means no extension.
    pub extension: String,
    pub conjunction: String,
    pub prefix: String,
    pub chime: String,
    /// Stem prefix for clinic names; the clinic id follows it.
    pub clinic_prefix: String,
    /// Prepended to notice file names. Notices live beside the segment
    /// directory, not inside it, so this does not include `base`.
    pub notice_base: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            base: String::new(),
            extension: "mp3".to_string(),
            conjunction: "and".to_string(),
            prefix: "prefix".to_string(),
            chime: "ding".to_string(),
            clinic_prefix: "clinic".to_string(),
            notice_base: "instant/".to_string(),
        }
    }
}

impl NamingConventionBuilder {
    fn validate_stems(&self) -> Result<(), String> {
        let defaults = NamingConvention::default();
        let pick = |field: &Option<String>, default: String| field.clone().unwrap_or(default);
        let naming = NamingConvention {
            base: pick(&self.base, defaults.base),
            extension: pick(&self.extension, defaults.extension),
            conjunction: pick(&self.conjunction, defaults.conjunction),
            prefix: pick(&self.prefix, defaults.prefix),
            chime: pick(&self.chime, defaults.chime),
            clinic_prefix: pick(&self.clinic_prefix, defaults.clinic_prefix),
            notice_base: pick(&self.notice_base, defaults.notice_base),
        };
        naming.validate().map_err(|e| e.to_string())
    }
}

impl NamingConvention {
    /// Load a convention from a JSON file. Missing fields keep their defaults.
    ///
    /// The result is validated the same way the builder validates.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let naming: Self = serde_json::from_str(&content).map_err(|e| {
            CatalogError::Naming(format!("Failed to parse {}: {e}", path.display()))
        })?;
        naming.validate()?;
        Ok(naming)
    }

    /// Check that every stem maps back to a single token or clinic.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.clinic_prefix.is_empty() || is_all_digits(&self.clinic_prefix) {
            return Err(CatalogError::Naming(format!(
                "clinic prefix {:?} would collide with number stems",
                self.clinic_prefix
            )));
        }

        let phrases = [
            ("conjunction", &self.conjunction),
            ("prefix", &self.prefix),
            ("chime", &self.chime),
        ];
        for (i, (field, stem)) in phrases.iter().enumerate() {
            if stem.is_empty() {
                return Err(CatalogError::Naming(format!("{field} stem is empty")));
            }
            if is_all_digits(stem) {
                return Err(CatalogError::Naming(format!(
                    "{field} stem {stem:?} looks like a number"
                )));
            }
            if self.clinic_for_stem(stem).is_some() {
                return Err(CatalogError::Naming(format!(
                    "{field} stem {stem:?} looks like a clinic name"
                )));
            }
            if let Some((other, _)) = phrases[..i].iter().find(|(_, s)| s == stem) {
                return Err(CatalogError::Naming(format!(
                    "{field} and {other} share the stem {stem:?}"
                )));
            }
        }
        Ok(())
    }

    /// File name without extension.
    pub fn stem(&self, token: CatalogToken) -> String {
        match token {
            CatalogToken::Phrase(Phrase::Conjunction) => self.conjunction.clone(),
            CatalogToken::Phrase(Phrase::Prefix) => self.prefix.clone(),
            CatalogToken::Phrase(Phrase::Chime) => self.chime.clone(),
            numeric => numeric.value().map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    /// Stem plus extension, e.g. `400.mp3`.
    pub fn file_name(&self, token: CatalogToken) -> String {
        self.with_extension(&self.stem(token))
    }

    /// File name of a clinic-name recording, e.g. `clinic3.mp3`.
    pub fn clinic_file_name(&self, clinic: u32) -> String {
        self.with_extension(&format!("{}{clinic}", self.clinic_prefix))
    }

    /// `base` joined with the file name.
    pub fn asset_id(&self, token: CatalogToken) -> AssetId {
        AssetId::new(format!("{}{}", self.base, self.file_name(token)))
    }

    pub fn clinic_asset_id(&self, clinic: u32) -> AssetId {
        AssetId::new(format!("{}{}", self.base, self.clinic_file_name(clinic)))
    }

    /// Asset id of a fixed notice, e.g. `instant/welcome.mp3`.
    pub fn notice_asset_id(&self, notice: &str) -> AssetId {
        AssetId::new(format!("{}{}", self.notice_base, self.with_extension(notice)))
    }

    /// Notice name for a file in the notice directory.
    pub fn notice_for_file_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        self.strip_extension(file_name).filter(|stem| !stem.is_empty())
    }

    /// Inverse of [`NamingConvention::file_name`].
    ///
    /// Only names this convention could have produced are accepted, so
    /// `007.mp3` or `25.mp3` map to nothing.
    pub fn token_for_file_name(&self, file_name: &str) -> Option<CatalogToken> {
        self.token_for_stem(self.strip_extension(file_name)?)
    }

    /// Token whose file stem is `stem`, if any.
    pub fn token_for_stem(&self, stem: &str) -> Option<CatalogToken> {
        if stem == self.conjunction {
            return Some(CatalogToken::CONJUNCTION);
        }
        if stem == self.prefix {
            return Some(CatalogToken::PREFIX);
        }
        if stem == self.chime {
            return Some(CatalogToken::CHIME);
        }
        parse_canonical_number(stem).and_then(CatalogToken::for_value)
    }

    pub fn clinic_for_file_name(&self, file_name: &str) -> Option<u32> {
        self.clinic_for_stem(self.strip_extension(file_name)?)
    }

    fn clinic_for_stem(&self, stem: &str) -> Option<u32> {
        if self.clinic_prefix.is_empty() {
            return None;
        }
        parse_canonical_number(stem.strip_prefix(self.clinic_prefix.as_str())?)
    }

    fn with_extension(&self, stem: &str) -> String {
        if self.extension.is_empty() {
            stem.to_string()
        } else {
            format!("{stem}.{}", self.extension)
        }
    }

    fn strip_extension<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        if self.extension.is_empty() {
            return Some(file_name);
        }
        file_name
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')
    }
}

fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Decimal digits with no sign and no leading zeros (except `0` itself).
fn parse_canonical_number(text: &str) -> Option<u32> {
    let value: u32 = text.parse().ok()?;
    (value.to_string() == text).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::{NamingConvention, NamingConventionBuilder};
    use crate::catalog::CatalogError;
    use crate::token::CatalogToken;

    #[test]
    fn default_names_match_deployed_assets() {
        let naming = NamingConvention::default();
        assert_eq!(naming.file_name(CatalogToken::Unit(0)), "0.mp3");
        assert_eq!(naming.file_name(CatalogToken::Teen(11)), "11.mp3");
        assert_eq!(naming.file_name(CatalogToken::HundredsMultiple(400)), "400.mp3");
        assert_eq!(naming.file_name(CatalogToken::CONJUNCTION), "and.mp3");
        assert_eq!(naming.file_name(CatalogToken::PREFIX), "prefix.mp3");
        assert_eq!(naming.file_name(CatalogToken::CHIME), "ding.mp3");
        assert_eq!(naming.clinic_file_name(10), "clinic10.mp3");
    }

    #[test]
    fn file_names_map_back_to_tokens() {
        let naming = NamingConvention::default();
        for token in CatalogToken::all() {
            assert_eq!(naming.token_for_file_name(&naming.file_name(token)), Some(token));
        }
    }

    #[test]
    fn ignores_names_outside_the_convention() {
        let naming = NamingConvention::default();
        assert_eq!(naming.token_for_file_name("007.mp3"), None);
        assert_eq!(naming.token_for_file_name("25.mp3"), None);
        assert_eq!(naming.token_for_file_name("8.wav"), None);
        assert_eq!(naming.token_for_file_name("8mp3"), None);
        assert_eq!(naming.token_for_file_name("-1.mp3"), None);
        assert_eq!(naming.token_for_file_name("clinic1.mp3"), None);
        assert_eq!(naming.clinic_for_file_name("clinic1.mp3"), Some(1));
        assert_eq!(naming.clinic_for_file_name("clinic.mp3"), None);
        assert_eq!(naming.clinic_for_file_name("clinic01.mp3"), None);
    }

    #[test]
    fn builder_overrides_selected_fields() {
        let naming = NamingConventionBuilder::default()
            .base("audio/")
            .extension("")
            .chime("bell")
            .build()
            .unwrap();
        assert_eq!(naming.asset_id(CatalogToken::CHIME).as_str(), "audio/bell");
        assert_eq!(naming.asset_id(CatalogToken::Unit(4)).as_str(), "audio/4");
        assert_eq!(naming.token_for_file_name("bell"), Some(CatalogToken::CHIME));
        assert_eq!(naming.conjunction, "and");
    }

    #[test]
    fn loads_partial_json_convention() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("naming.json");
        std::fs::write(&path, r#"{"extension": "wav", "conjunction": "wa"}"#).unwrap();

        let naming = NamingConvention::from_json_file(&path).unwrap();
        assert_eq!(naming.file_name(CatalogToken::CONJUNCTION), "wa.wav");
        assert_eq!(naming.prefix, "prefix");
    }

    #[test]
    fn numeric_phrase_stem_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("naming.json");
        std::fs::write(&path, r#"{"conjunction": "8"}"#).unwrap();
        assert!(matches!(
            NamingConvention::from_json_file(&path),
            Err(CatalogError::Naming(_))
        ));

        assert!(NamingConventionBuilder::default()
            .conjunction("8")
            .build()
            .is_err());
    }

    #[test]
    fn ambiguous_stems_are_rejected() {
        let shared = NamingConventionBuilder::default().chime("prefix").build();
        assert!(shared.unwrap_err().to_string().contains("share the stem"));

        assert!(NamingConventionBuilder::default().prefix("").build().is_err());
        assert!(NamingConventionBuilder::default().chime("clinic4").build().is_err());
        assert!(NamingConventionBuilder::default().clinic_prefix("").build().is_err());
        assert!(NamingConventionBuilder::default().clinic_prefix("1").build().is_err());
        assert!(NamingConventionBuilder::default().chime("clinic").build().is_ok());
        assert!(NamingConvention::default().validate().is_ok());
    }

    #[test]
    fn broken_json_is_a_naming_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("naming.json");
        std::fs::write(&path, "{").unwrap();
        let err = NamingConvention::from_json_file(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Naming(_)));
        assert!(err.to_string().starts_with("Invalid naming convention"));
    }

    #[test]
    fn notices_live_under_their_own_base() {
        let naming = NamingConventionBuilder::default().base("audio/").build().unwrap();
        assert_eq!(naming.notice_asset_id("welcome").as_str(), "instant/welcome.mp3");
        assert_eq!(naming.notice_for_file_name("prayer.mp3"), Some("prayer"));
        assert_eq!(naming.notice_for_file_name("notes.txt"), None);
    }
}
