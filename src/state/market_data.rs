//! Sector analysis results.

use serde::{Deserialize, Deserializer, Serialize};

/// A notable startup or company within a sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Startup {
    /// Company name.
    pub name: String,
    /// Short description of what the company does.
    pub description: String,
    /// Homepage or reference link. Blank links on the wire become `None`.
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<String>,
}

impl Startup {
    /// Create a startup entry without a link.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            link: None,
        }
    }

    /// Attach a link. Blank links are ignored.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        let link = link.into();
        self.link = (!link.trim().is_empty()).then_some(link);
        self
    }
}

/// The analysis result for one sector.
///
/// Values are replaced wholesale, never patched field by field. Missing or
/// `null` sequences deserialize to empty vectors so consumers never deal with
/// absent lists; a missing `summary` is a malformed payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketData {
    /// Sector summary paragraph.
    pub summary: String,
    /// Key market trends, in presentation order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub trends: Vec<String>,
    /// Notable startups / companies.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub startups: Vec<Startup>,
    /// Investment themes / theses.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub theses: Vec<String>,
}

impl MarketData {
    /// Create a result with only a summary.
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            trends: Vec::new(),
            startups: Vec::new(),
            theses: Vec::new(),
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|link| !link.trim().is_empty()))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
