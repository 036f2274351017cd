//! Slug derivation
//!
//! A template path's slug is its file name minus the extension, e.g.
//! `/themes/foo/archive-category.php` -> `archive-category`.

use std::path::Path;

/// Length of the template extension stripped from file names (`.php`)
pub const TEMPLATE_SUFFIX_LEN: usize = 4;

/// Derive the slug for a requested template path
///
/// Returns `None` when no non-empty slug remains.
pub fn derive_slug(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy();
    let keep = file_name.chars().count().checked_sub(TEMPLATE_SUFFIX_LEN)?;
    let slug: String = file_name.chars().take(keep).collect();
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_slug_from_full_path() {
        assert_eq!(
            derive_slug(Path::new("/themes/foo/archive-category.php")),
            Some("archive-category".to_string())
        );
    }

    #[test]
    fn test_derive_slug_bare_file() {
        assert_eq!(derive_slug(Path::new("index.php")), Some("index".to_string()));
        assert_eq!(
            derive_slug(Path::new("singular.php")),
            Some("singular".to_string())
        );
    }

    #[test]
    fn test_derive_slug_strips_fixed_length() {
        // The suffix is stripped by length, not by matching the extension
        assert_eq!(derive_slug(Path::new("page.html")), Some("page.".to_string()));
        assert_eq!(derive_slug(Path::new("héllo.php")), Some("héllo".to_string()));
    }

    #[test]
    fn test_derive_slug_empty() {
        assert_eq!(derive_slug(Path::new("")), None);
        assert_eq!(derive_slug(Path::new(".php")), None);
        assert_eq!(derive_slug(Path::new("a.p")), None);
        assert_eq!(derive_slug(Path::new("/")), None);
    }
}
