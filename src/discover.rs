use std::path::Path;

use anyhow::Result;
use regex::Regex;
use tracing::info;
use walkdir::WalkDir;

/// Walk the storage root and return store-relative paths of all page
/// documents, optionally restricted to paths matching a pattern.
pub fn find_pages(root: &Path, pattern: Option<&Regex>) -> Result<Vec<String>> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("fjson") {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        let rel = rel.to_string_lossy().into_owned();
        if pattern.map_or(true, |re| re.is_match(&rel)) {
            pages.push(rel);
        }
    }

    pages.sort();
    info!("found {} page documents under {}", pages.len(), root.display());
    Ok(pages)
}
