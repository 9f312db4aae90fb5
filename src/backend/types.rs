//! Catalog data model and wire envelope

use serde::{Deserialize, Deserializer, Serialize};

/// Performer or event record returned by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: String,
    pub name: String,
    /// Category tag, e.g. "attraction"
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<AttractionImage>>,
}

impl Attraction {
    /// Image used as the list thumbnail (first variant only)
    pub fn thumbnail(&self) -> Option<&AttractionImage> {
        self.images.as_ref().and_then(|images| images.first())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttractionImage {
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: u32,
}

impl AttractionImage {
    /// Width over height; 1.0 when the catalog omits dimensions
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Corrected keyword proposed by the catalog, score in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellcheckSuggestion {
    pub suggestion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
}

/// Explicit `null` reads like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Entities and spelling suggestions for one keyword, in upstream order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub attractions: Vec<Attraction>,
    pub suggestions: Vec<SpellcheckSuggestion>,
}

/// Raw `attractions` response body. Every level is optional.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestResponse {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
    #[serde(default)]
    pub spellcheck: Option<Spellcheck>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub attractions: Option<Vec<Attraction>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Spellcheck {
    #[serde(default)]
    pub suggestions: Option<Vec<SpellcheckSuggestion>>,
}

impl From<SuggestResponse> for QueryResult {
    fn from(body: SuggestResponse) -> Self {
        Self {
            attractions: body.embedded.and_then(|e| e.attractions).unwrap_or_default(),
            suggestions: body.spellcheck.and_then(|s| s.suggestions).unwrap_or_default(),
        }
    }
}
