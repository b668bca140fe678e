//! Catalog file formats: JSON arrays, TOML `[[effect]]` tables, and CSV
//! with a `frame_name,description` (or `id,description`) header.

use std::path::Path;

use serde::Deserialize;

use crate::errors::{CatalogError, PrismResult};
use crate::models::EffectDescriptor;

use super::Catalog;

#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    effect: Vec<EffectDescriptor>,
}

#[derive(Deserialize)]
struct CsvRow {
    #[serde(alias = "frame_name")]
    id: String,
    description: String,
}

fn parse_err(format: &str, reason: impl ToString) -> CatalogError {
    CatalogError::Parse {
        format: format.to_string(),
        reason: reason.to_string(),
    }
}

impl Catalog {
    /// Load a catalog file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> PrismResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            Some("csv") => Self::from_csv_str(&content),
            other => Err(CatalogError::Unreadable {
                path: path.display().to_string(),
                reason: format!("unsupported catalog extension: {other:?}"),
            }
            .into()),
        }
    }

    /// Parse a JSON array of `{"id", "description"}` objects.
    pub fn from_json_str(content: &str) -> PrismResult<Self> {
        let descriptors: Vec<EffectDescriptor> =
            serde_json::from_str(content).map_err(|e| parse_err("json", e))?;
        Self::new(descriptors)
    }

    /// Parse TOML with one `[[effect]]` table per descriptor.
    pub fn from_toml_str(content: &str) -> PrismResult<Self> {
        let parsed: TomlCatalog = toml::from_str(content).map_err(|e| parse_err("toml", e))?;
        Self::new(parsed.effect)
    }

    /// Parse CSV with a header row naming `id` (or `frame_name`) and
    /// `description` columns. Extra columns are ignored.
    pub fn from_csv_str(content: &str) -> PrismResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut descriptors = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row.map_err(|e| parse_err("csv", e))?;
            descriptors.push(EffectDescriptor::new(row.id, row.description));
        }
        Self::new(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PrismError;

    #[test]
    fn json_catalog() {
        let catalog = Catalog::from_json_str(
            r#"[{"id": "grayscale", "description": "black and white"},
                {"id": "heat_map", "description": "temperature colors"}]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.ids(), vec!["grayscale", "heat_map"]);
    }

    #[test]
    fn toml_catalog() {
        let catalog = Catalog::from_toml_str(
            r#"
[[effect]]
id = "water_color"
description = "soft painted look"
"#,
        )
        .unwrap();
        assert_eq!(catalog.ids(), vec!["water_color"]);
    }

    #[test]
    fn csv_catalog_with_frame_name_header() {
        let catalog = Catalog::from_csv_str(
            "frame_name,description\ngrayscale, Converts to black and white\nheat_map,Thermal colors\n",
        )
        .unwrap();
        assert_eq!(catalog.ids(), vec!["grayscale", "heat_map"]);
        assert_eq!(
            catalog.get("grayscale").unwrap().description,
            "Converts to black and white"
        );
    }

    #[test]
    fn empty_toml_is_empty_catalog() {
        let err = Catalog::from_toml_str("").unwrap_err();
        assert!(matches!(err, PrismError::CatalogError(CatalogError::Empty)));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = Catalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(
            err,
            PrismError::CatalogError(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = Catalog::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(
            err,
            PrismError::CatalogError(CatalogError::Unreadable { .. })
        ));
    }
}
