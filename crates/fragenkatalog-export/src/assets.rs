//! Image files next to the Markdown output

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use fragenkatalog_core::{ImageAsset, paths};

use crate::{ExportError, Result};

/// Extensions treated as images when cleaning the output directory
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Whether two paths name the same file, lexically or after resolving links
fn is_same_file(a: &Path, b: &Path) -> bool {
    if paths::normalize(a) == paths::normalize(b) {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Delete image files directly inside `dir` left over from an earlier run
///
/// Files that are the source of one of `keep` are left alone. Returns the
/// removed paths. Subdirectories are not touched.
pub fn purge_images(dir: &Path, keep: &[ImageAsset]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ExportError::io(dir, e))? {
        let entry = entry.map_err(|e| ExportError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() || !is_image(&path) {
            continue;
        }
        if keep.iter().any(|asset| is_same_file(&asset.source, &path)) {
            tracing::debug!(path = %path.display(), "Keeping image referenced by the catalog");
            continue;
        }
        fs::remove_file(&path).map_err(|e| ExportError::io(&path, e))?;
        tracing::debug!(path = %path.display(), "Removed stale image");
        removed.push(path);
    }
    removed.sort();
    Ok(removed)
}

/// Copy every asset to its destination, once per destination
///
/// The first asset recorded for a destination wins. An asset whose source
/// already is its destination is left in place. Returns the written
/// destinations in sorted order.
pub fn copy_assets(assets: &[ImageAsset]) -> Result<Vec<PathBuf>> {
    let mut by_destination: BTreeMap<&Path, &ImageAsset> = BTreeMap::new();
    for asset in assets {
        match by_destination.entry(asset.destination.as_path()) {
            Entry::Vacant(entry) => {
                entry.insert(asset);
            }
            Entry::Occupied(entry) if !is_same_file(&entry.get().source, &asset.source) => {
                tracing::warn!(
                    source = %asset.source.display(),
                    destination = %asset.destination.display(),
                    "Another image already uses this destination, not copied"
                );
            }
            Entry::Occupied(_) => {}
        }
    }

    let mut written = Vec::with_capacity(by_destination.len());
    for (destination, asset) in by_destination {
        if is_same_file(&asset.source, destination) {
            tracing::debug!(path = %destination.display(), "Image already in place");
            continue;
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
        }
        fs::copy(&asset.source, destination).map_err(|e| ExportError::io(&asset.source, e))?;
        tracing::debug!(
            source = %asset.source.display(),
            destination = %destination.display(),
            "Copied image"
        );
        written.push(destination.to_path_buf());
    }
    Ok(written)
}
