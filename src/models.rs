//! Data model for the remote catalog documents
//!
//! Both documents are fetched fresh at the start of every sync cycle,
//! are immutable within the cycle, and are discarded once the cycle
//! completes. The only durable state is the image files themselves.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of the emoji catalog, keyed by asset hash.
///
/// Each hash maps to up to two emoji ids: the plain item render and
/// the enchanted render. Either side may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub normal: Option<String>,
    #[serde(default)]
    pub enchanted: Option<String>,
}

impl CatalogEntry {
    /// Asset id to download: the normal render when present, otherwise
    /// the enchanted one.
    pub fn preferred_asset_id(&self) -> Option<&str> {
        self.normal.as_deref().or(self.enchanted.as_deref())
    }
}

/// Remote mapping from asset hash to emoji ids.
pub type CatalogDocument = HashMap<String, CatalogEntry>;

/// Remote mapping from item name to asset hash.
pub type ItemIndex = HashMap<String, String>;

/// A single item the resolver decided to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub item_name: String,
    pub sanitized_name: String,
    pub asset_id: String,
}
