/// Book types shared with the static catalog
///
/// The inspirational-book catalog itself lives outside this crate; these types
/// describe the catalog entry the user selects and the daily insight/prompt
/// pair derived from it.

use serde::{Deserialize, Serialize};

/// A catalog entry for an inspirational book
///
/// The selected-book store persists a full serialized copy of the chosen
/// entry, so the stored selection stays valid even if the catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogBook {
    /// Catalog-assigned identifier
    pub id: String,
    pub title: String,
    pub author: String,
    /// URL of the cover image shown in the picker
    pub cover_image: String,
    /// Headline takeaways shown on the book detail sheet
    pub key_insights: Vec<String>,
    /// Catalog shelf (e.g. "Psychology", "Self-Help")
    pub category: String,
}

/// One day's insight and reflection prompt for the selected book
///
/// Copied into the journal entry at save time so an entry keeps the prompt it
/// was written against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInsight {
    pub insight: String,
    pub prompt: String,
}
