//! Asset type filter categories.
//!
//! A category is a named set of file extensions. The listing query can ask
//! for one category, for everything, or for the `OTHER` bucket: assets whose
//! extension belongs to no configured category.

use super::content::extension;

/// Sentinel filter value selecting assets outside every category.
pub const OTHER_FILTER: &str = "OTHER";

/// A named set of extensions (stored upper-case, without the dot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCategory {
    pub name: String,
    pub extensions: Vec<String>,
}

impl AssetCategory {
    pub fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_uppercase()).collect(),
        }
    }

    fn contains(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// The configured category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCategories {
    categories: Vec<AssetCategory>,
}

impl AssetCategories {
    pub fn new(categories: Vec<AssetCategory>) -> Self {
        Self { categories }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetCategory> {
        self.categories.iter()
    }

    /// Case-insensitive lookup by category name.
    pub fn get(&self, name: &str) -> Option<&AssetCategory> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    fn in_any(&self, ext: &str) -> bool {
        self.categories.iter().any(|c| c.contains(ext))
    }
}

impl Default for AssetCategories {
    fn default() -> Self {
        Self::new(vec![
            AssetCategory::new(
                "Images",
                &["JPG", "JPEG", "PNG", "GIF", "TIFF", "TIF", "ICO", "SVG"],
            ),
            AssetCategory::new(
                "Documents",
                &[
                    "PDF", "TXT", "DOC", "DOCX", "XLS", "XLSX", "PPT", "PPTX", "CSV", "ODT",
                    "ODS", "ODP", "RTF",
                ],
            ),
        ])
    }
}

/// A parsed `asset_type` query value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Category(String),
    Other,
}

impl TypeFilter {
    /// Parse a raw query value. Empty means all; `OTHER` in any case is the
    /// sentinel; anything else names a category.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => TypeFilter::All,
            Some(v) if v.eq_ignore_ascii_case(OTHER_FILTER) => TypeFilter::Other,
            Some(v) => TypeFilter::Category(v.to_string()),
        }
    }

    /// Whether an asset with this display name passes the filter.
    ///
    /// An unknown category name matches nothing.
    pub fn matches(&self, categories: &AssetCategories, display_name: &str) -> bool {
        let ext = extension(display_name);
        match self {
            TypeFilter::All => true,
            TypeFilter::Category(name) => match (categories.get(name), ext) {
                (Some(category), Some(ext)) => category.contains(&ext),
                _ => false,
            },
            TypeFilter::Other => match ext {
                Some(ext) => !categories.in_any(&ext),
                None => true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_values() {
        assert_eq!(TypeFilter::parse(None), TypeFilter::All);
        assert_eq!(TypeFilter::parse(Some("")), TypeFilter::All);
        assert_eq!(TypeFilter::parse(Some("other")), TypeFilter::Other);
        assert_eq!(
            TypeFilter::parse(Some("Documents")),
            TypeFilter::Category("Documents".into())
        );
    }

    #[test]
    fn category_matches_extension_case_insensitively() {
        let categories = AssetCategories::default();
        let docs = TypeFilter::Category("documents".into());
        assert!(docs.matches(&categories, "asset-1.txt"));
        assert!(docs.matches(&categories, "Syllabus.PDF"));
        assert!(!docs.matches(&categories, "photo.png"));
        assert!(!docs.matches(&categories, "README"));
    }

    #[test]
    fn other_excludes_every_category() {
        let categories = AssetCategories::default();
        let other = TypeFilter::Other;
        assert!(other.matches(&categories, "large.file.test"));
        assert!(other.matches(&categories, "README"));
        assert!(!other.matches(&categories, "photo.png"));
        assert!(!other.matches(&categories, "notes.txt"));
    }

    #[test]
    fn unknown_category_matches_nothing() {
        let categories = AssetCategories::default();
        let filter = TypeFilter::Category("Videos".into());
        assert!(!filter.matches(&categories, "clip.mp4"));
    }
}
