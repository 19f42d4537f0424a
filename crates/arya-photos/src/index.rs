//! Category-keyed photo path lookup.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use arya_core::error::AryaError;

use crate::taxonomy::{default_taxonomy, PhotoCategory};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Read-only view over the `category/subcategory/*.{jpg,png}` tree.
pub struct PhotoIndex {
    root: PathBuf,
    taxonomy: Vec<PhotoCategory>,
}

impl PhotoIndex {
    /// Index over the default taxonomy rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_taxonomy(root, default_taxonomy())
    }

    pub fn with_taxonomy(root: impl Into<PathBuf>, taxonomy: Vec<PhotoCategory>) -> Self {
        Self {
            root: root.into(),
            taxonomy,
        }
    }

    pub fn taxonomy(&self) -> &[PhotoCategory] {
        &self.taxonomy
    }

    /// Create the full directory tree. Idempotent; separate from lookup,
    /// which treats missing directories as simply empty.
    pub fn setup(&self) -> Result<(), AryaError> {
        for category in &self.taxonomy {
            for sub in category.subcategories {
                let dir = self.root.join(category.name).join(sub);
                std::fs::create_dir_all(&dir)
                    .map_err(|e| AryaError::Photos(format!("Failed to create {}: {}", dir.display(), e)))?;
            }
        }
        debug!("Photo directory tree ready at {}", self.root.display());
        Ok(())
    }

    /// Photo paths for a category/subcategory selection, sorted.
    ///
    /// Both given: that leaf directory only. Category only: every known
    /// subcategory of it. Neither: the whole taxonomy. Unknown names and
    /// missing directories yield an empty result, never an error.
    pub fn lookup(&self, category: Option<&str>, subcategory: Option<&str>) -> Vec<PathBuf> {
        let mut paths = match (category, subcategory) {
            (Some(cat), Some(sub)) => self.files_in(&self.root.join(cat).join(sub)),
            (Some(cat), None) => {
                let mut acc = Vec::new();
                if let Some(entry) = self.taxonomy.iter().find(|c| c.name == cat) {
                    for sub in entry.subcategories {
                        acc.extend(self.files_in(&self.root.join(cat).join(sub)));
                    }
                }
                acc
            }
            (None, _) => {
                let mut acc = Vec::new();
                for entry in &self.taxonomy {
                    for sub in entry.subcategories {
                        acc.extend(self.files_in(&self.root.join(entry.name).join(sub)));
                    }
                }
                acc
            }
        };
        paths.sort();
        debug!(
            "Photo lookup category={:?} subcategory={:?} -> {} paths",
            category,
            subcategory,
            paths.len()
        );
        paths
    }

    fn files_in(&self, dir: &Path) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        warn!("Unreadable entry under {}: {}", dir.display(), e);
                        return None;
                    }
                };
                let path = entry.path();
                if path.is_file() && has_image_extension(&path) {
                    Some(path)
                } else {
                    None
                }
            })
            .collect()
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with_files() -> (tempfile::TempDir, PhotoIndex) {
        let dir = tempfile::tempdir().unwrap();
        let index = PhotoIndex::new(dir.path());
        index.setup().unwrap();

        let write = |rel: &str| {
            std::fs::write(dir.path().join(rel), b"img").unwrap();
        };
        write("rooms/rooms/single.jpg");
        write("rooms/rooms/double.png");
        write("mess/dining/hall.jpg");
        write("mess/kitchen/stove.png");
        write("exterior/building/front.jpg");
        (dir, index)
    }

    // ---- setup ----

    #[test]
    fn test_setup_creates_full_tree() {
        let dir = tempfile::tempdir().unwrap();
        let index = PhotoIndex::new(dir.path());
        index.setup().unwrap();
        assert!(dir.path().join("facilities").join("common_room").is_dir());
        assert!(dir.path().join("exterior").join("garden").is_dir());
    }

    #[test]
    fn test_setup_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let index = PhotoIndex::new(dir.path());
        index.setup().unwrap();
        index.setup().unwrap();
    }

    // ---- lookup ----

    #[test]
    fn test_lookup_leaf_directory() {
        let (_dir, index) = index_with_files();
        let paths = index.lookup(Some("rooms"), Some("rooms"));
        assert_eq!(paths.len(), 2);
        assert!(paths
            .iter()
            .all(|p| p.parent().unwrap().ends_with("rooms/rooms")));
    }

    #[test]
    fn test_lookup_category_unions_subcategories() {
        let (_dir, index) = index_with_files();
        let paths = index.lookup(Some("mess"), None);
        assert_eq!(paths.len(), 2);
        let names: Vec<&str> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert!(names.contains(&"hall.jpg"));
        assert!(names.contains(&"stove.png"));
    }

    #[test]
    fn test_lookup_everything() {
        let (_dir, index) = index_with_files();
        let paths = index.lookup(None, None);
        assert_eq!(paths.len(), 5);
    }

    #[test]
    fn test_lookup_restricted_to_category() {
        let (_dir, index) = index_with_files();
        let paths = index.lookup(Some("rooms"), None);
        assert!(paths.iter().all(|p| p.to_str().unwrap().contains("rooms")));
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_lookup_unknown_category_is_empty() {
        let (_dir, index) = index_with_files();
        assert!(index.lookup(Some("gym"), None).is_empty());
    }

    #[test]
    fn test_lookup_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        // No setup() call: nothing on disk at all.
        let index = PhotoIndex::new(dir.path().join("absent"));
        assert!(index.lookup(None, None).is_empty());
        assert!(index.lookup(Some("rooms"), Some("rooms")).is_empty());
    }

    #[test]
    fn test_lookup_ignores_non_image_files() {
        let (dir, index) = index_with_files();
        std::fs::write(dir.path().join("rooms/rooms/notes.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("rooms/rooms/clip.mp4"), b"x").unwrap();
        let paths = index.lookup(Some("rooms"), None);
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_lookup_accepts_uppercase_extensions() {
        let (dir, index) = index_with_files();
        std::fs::write(dir.path().join("rooms/rooms/shot.JPG"), b"x").unwrap();
        let paths = index.lookup(Some("rooms"), Some("rooms"));
        assert_eq!(paths.len(), 3);
    }

    #[test]
    fn test_lookup_results_are_sorted() {
        let (_dir, index) = index_with_files();
        let paths = index.lookup(None, None);
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn test_lookup_ignores_subdirectories() {
        let (dir, index) = index_with_files();
        std::fs::create_dir_all(dir.path().join("rooms/rooms/old.jpg")).ok();
        // A directory named like an image must not be returned.
        let paths = index.lookup(Some("rooms"), Some("rooms"));
        assert!(paths.iter().all(|p| p.is_file()));
    }
}
