use crate::utils::error::{DigestError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

pub const OTHER_CATEGORY: &str = "その他";

#[derive(Debug, Deserialize)]
struct MappingFile {
    #[serde(default)]
    category_mappings: Map<String, Value>,
    #[serde(default)]
    service_descriptions: Map<String, Value>,
}

/// Service-name substring → category, plus service descriptions.
///
/// Entries keep the order of the source JSON object; that order decides which
/// service wins when a title mentions several.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    categories: Vec<(String, String)>,
    descriptions: Vec<(String, String)>,
}

impl CategoryTable {
    pub fn new(categories: Vec<(String, String)>, descriptions: Vec<(String, String)>) -> Self {
        Self {
            categories,
            descriptions,
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: MappingFile = serde_json::from_str(content)?;
        Ok(Self {
            categories: string_pairs(file.category_mappings),
            descriptions: string_pairs(file.service_descriptions),
        })
    }

    /// Loads the table, degrading to an empty one when the file is missing or malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let parsed = std::fs::read_to_string(path)
            .map_err(DigestError::IoError)
            .and_then(|content| Self::from_json_str(&content));

        match parsed {
            Ok(table) => {
                tracing::debug!(
                    "Loaded {} category mappings from {}",
                    table.categories.len(),
                    path.display()
                );
                table
            }
            Err(e) => {
                tracing::warn!(
                    "Could not load service mappings from {}: {}; every item will be classified as {}",
                    path.display(),
                    e,
                    OTHER_CATEGORY
                );
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn string_pairs(map: Map<String, Value>) -> Vec<(String, String)> {
    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Classifier {
    table: CategoryTable,
}

impl Classifier {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    /// First table key found in `title` decides; table order beats title position.
    pub fn classify(&self, title: &str) -> (String, Option<String>) {
        self.table
            .categories
            .iter()
            .find(|(service, _)| title.contains(service.as_str()))
            .map(|(service, category)| (category.clone(), Some(service.clone())))
            .unwrap_or_else(|| (OTHER_CATEGORY.to_string(), None))
    }

    pub fn describe(&self, service: &str) -> &str {
        self.table
            .descriptions
            .iter()
            .find(|(name, _)| name == service)
            .map(|(_, description)| description.as_str())
            .unwrap_or("")
    }
}
