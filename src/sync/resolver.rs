//! Asset resolver
//!
//! Pure function deciding, per item, which asset id to download and
//! under which filename. Takes the two remote documents and a snapshot
//! of the local store; performs no I/O.

use std::collections::HashSet;

use tracing::warn;

use crate::models::{CatalogDocument, ItemIndex, ResolvedTarget};
use crate::storage::sanitize_name;

/// Compute the download targets for one sync cycle.
///
/// An item is skipped when its hash has no catalog entry, when any
/// supported extension already exists for its sanitized name, or when
/// the catalog entry carries neither variant id. Skips are warnings,
/// never errors. Output order follows map iteration and carries no
/// meaning.
pub fn resolve_targets(
    catalog: &CatalogDocument,
    index: &ItemIndex,
    existing_stems: &HashSet<String>,
) -> Vec<ResolvedTarget> {
    let mut targets = Vec::new();
    for (item_name, hash) in index {
        let Some(entry) = catalog.get(hash) else {
            warn!("No catalog entry for item '{}' (hash {})", item_name, hash);
            continue;
        };

        let sanitized_name = sanitize_name(item_name);
        if existing_stems.contains(&sanitized_name) {
            continue;
        }

        let Some(asset_id) = entry.preferred_asset_id() else {
            warn!("Catalog entry for item '{}' has no usable asset id", item_name);
            continue;
        };

        targets.push(ResolvedTarget {
            item_name: item_name.clone(),
            sanitized_name,
            asset_id: asset_id.to_string(),
        });
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogEntry;

    fn entry(normal: Option<&str>, enchanted: Option<&str>) -> CatalogEntry {
        CatalogEntry {
            normal: normal.map(str::to_string),
            enchanted: enchanted.map(str::to_string),
        }
    }

    #[test]
    fn emits_target_with_preferred_asset_id() {
        let catalog = CatalogDocument::from([("h1".to_string(), entry(Some("n1"), Some("e1")))]);
        let index = ItemIndex::from([("sword".to_string(), "h1".to_string())]);

        let targets = resolve_targets(&catalog, &index, &HashSet::new());
        assert_eq!(
            targets,
            vec![ResolvedTarget {
                item_name: "sword".to_string(),
                sanitized_name: "sword".to_string(),
                asset_id: "n1".to_string(),
            }]
        );
    }

    #[test]
    fn falls_back_to_enchanted_asset_id() {
        let catalog = CatalogDocument::from([("h1".to_string(), entry(None, Some("e1")))]);
        let index = ItemIndex::from([("sword".to_string(), "h1".to_string())]);

        let targets = resolve_targets(&catalog, &index, &HashSet::new());
        assert_eq!(targets[0].asset_id, "e1");
    }

    #[test]
    fn skips_item_whose_hash_has_no_catalog_entry() {
        let catalog = CatalogDocument::new();
        let index = ItemIndex::from([("sword".to_string(), "h1".to_string())]);

        assert!(resolve_targets(&catalog, &index, &HashSet::new()).is_empty());
    }

    #[test]
    fn skips_item_already_materialized_under_any_extension() {
        let catalog = CatalogDocument::from([("h1".to_string(), entry(Some("n1"), None))]);
        let index = ItemIndex::from([("category:item".to_string(), "h1".to_string())]);
        let existing = HashSet::from(["category-item".to_string()]);

        assert!(resolve_targets(&catalog, &index, &existing).is_empty());
    }

    #[test]
    fn skips_entry_without_any_asset_id() {
        let catalog = CatalogDocument::from([("h1".to_string(), entry(None, None))]);
        let index = ItemIndex::from([("sword".to_string(), "h1".to_string())]);

        assert!(resolve_targets(&catalog, &index, &HashSet::new()).is_empty());
    }

    #[test]
    fn sanitizes_namespaced_item_names() {
        let catalog = CatalogDocument::from([("h1".to_string(), entry(Some("n1"), None))]);
        let index = ItemIndex::from([("category:item".to_string(), "h1".to_string())]);

        let targets = resolve_targets(&catalog, &index, &HashSet::new());
        assert_eq!(targets[0].sanitized_name, "category-item");
        assert_eq!(targets[0].item_name, "category:item");
    }
}
