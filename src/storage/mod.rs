//! On-disk asset store
//!
//! A flat directory of image files named `<sanitized>.<ext>` is the
//! only persisted state; there is no manifest. The sanitization rule
//! and the extension probe order live here so the sync path and the
//! lookup path can never disagree about a filename.
//!
//! The sync pipeline never deletes or overwrites a file: presence of
//! any supported extension for a sanitized name means the item is
//! already materialized.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Supported extensions in lookup priority order.
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["gif", "png", "jpg", "jpeg", "webp", "apng", "svg"];

/// Content types accepted from the CDN, paired with the extension the
/// asset is persisted under.
const CONTENT_TYPE_TABLE: [(&str, &str); 6] = [
    ("image/gif", "gif"),
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/webp", "webp"),
    ("image/apng", "apng"),
    ("image/svg+xml", "svg"),
];

/// Replace the namespace separator with a filesystem-safe hyphen.
///
/// Item names may be namespaced (`category:item`); the colon is the
/// only character rewritten.
pub fn sanitize_name(item_name: &str) -> String {
    item_name.replace(':', "-")
}

/// Extension an asset with the given declared content type persists
/// under, or `None` when the type is unsupported.
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    CONTENT_TYPE_TABLE
        .iter()
        .find(|(ct, _)| ct.eq_ignore_ascii_case(essence))
        .map(|(_, ext)| *ext)
}

/// Content type served for a stored extension.
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension {
        "gif" => "image/gif",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "apng" => "image/apng",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Handle on the output directory shared by the sync and lookup paths.
#[derive(Debug, Clone)]
pub struct AssetStorage {
    output_dir: PathBuf,
}

impl AssetStorage {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn ensure_dir(&self) -> Result<(), std::io::Error> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).await?;
        }
        Ok(())
    }

    /// Snapshot the sanitized stems already materialized.
    ///
    /// Taken once at the start of a sync cycle; files created
    /// mid-cycle are not re-checked.
    pub async fn snapshot_stems(&self) -> Result<HashSet<String>, std::io::Error> {
        let mut stems = HashSet::new();
        let mut entries = fs::read_dir(&self.output_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let supported = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e));
            if supported {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    stems.insert(stem.to_string());
                }
            }
        }
        Ok(stems)
    }

    /// Probe the extension list in priority order for an existing
    /// file; the first hit wins.
    pub fn find_existing(&self, item_name: &str) -> Option<(PathBuf, &'static str)> {
        let stem = sanitize_name(item_name);
        for ext in SUPPORTED_EXTENSIONS {
            let path = self.output_dir.join(format!("{stem}.{ext}"));
            if path.is_file() {
                return Some((path, content_type_for_extension(ext)));
            }
        }
        None
    }

    pub async fn write_asset(
        &self,
        sanitized_name: &str,
        extension: &str,
        data: &[u8],
    ) -> Result<PathBuf, std::io::Error> {
        let path = self.output_dir.join(format!("{sanitized_name}.{extension}"));
        fs::write(&path, data).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_every_colon() {
        assert_eq!(sanitize_name("category:item"), "category-item");
        assert_eq!(sanitize_name("a:b:c"), "a-b-c");
        assert_eq!(sanitize_name("plain"), "plain");
    }

    #[test]
    fn content_type_table_covers_supported_extensions() {
        assert_eq!(extension_for_content_type("image/gif"), Some("gif"));
        assert_eq!(extension_for_content_type("image/png"), Some("png"));
        assert_eq!(extension_for_content_type("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for_content_type("image/webp"), Some("webp"));
        assert_eq!(extension_for_content_type("image/apng"), Some("apng"));
        assert_eq!(extension_for_content_type("image/svg+xml"), Some("svg"));
        assert_eq!(extension_for_content_type("application/json"), None);
        assert_eq!(extension_for_content_type("text/html"), None);
    }

    #[test]
    fn content_type_parameters_are_ignored() {
        assert_eq!(
            extension_for_content_type("image/png; charset=binary"),
            Some("png")
        );
        assert_eq!(extension_for_content_type("IMAGE/GIF"), Some("gif"));
    }

    #[test]
    fn served_content_types_round_trip() {
        for ext in SUPPORTED_EXTENSIONS {
            let content_type = content_type_for_extension(ext);
            assert!(content_type.starts_with("image/"), "{ext} -> {content_type}");
        }
        assert_eq!(content_type_for_extension("jpeg"), "image/jpeg");
        assert_eq!(content_type_for_extension("bin"), "application/octet-stream");
    }

    #[test]
    fn find_existing_prefers_earlier_extension() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AssetStorage::new(dir.path().to_path_buf());
        std::fs::write(dir.path().join("foo.png"), b"png").unwrap();
        std::fs::write(dir.path().join("foo.gif"), b"gif").unwrap();

        let (path, content_type) = storage.find_existing("foo").unwrap();
        assert_eq!(path, dir.path().join("foo.gif"));
        assert_eq!(content_type, "image/gif");
    }

    #[test]
    fn find_existing_sanitizes_the_lookup_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AssetStorage::new(dir.path().to_path_buf());
        std::fs::write(dir.path().join("category-item.png"), b"png").unwrap();

        assert!(storage.find_existing("category:item").is_some());
        assert!(storage.find_existing("category:other").is_none());
    }

    #[tokio::test]
    async fn snapshot_collects_stems_of_supported_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AssetStorage::new(dir.path().to_path_buf());
        std::fs::write(dir.path().join("one.png"), b"png").unwrap();
        std::fs::write(dir.path().join("two.gif"), b"gif").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"txt").unwrap();

        let stems = storage.snapshot_stems().await.unwrap();
        assert!(stems.contains("one"));
        assert!(stems.contains("two"));
        assert!(!stems.contains("notes"));
    }

    #[tokio::test]
    async fn write_asset_derives_the_filename() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AssetStorage::new(dir.path().to_path_buf());

        let path = storage.write_asset("category-item", "png", b"data").await.unwrap();
        assert_eq!(path, dir.path().join("category-item.png"));
        assert_eq!(std::fs::read(path).unwrap(), b"data");
    }
}
