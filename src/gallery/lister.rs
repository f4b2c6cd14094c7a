//! Paginated listing of a region's image directory.
//!
//! Listing walks the directory once, keeps entries whose extension is a known
//! image type, and slices the result with an offset/limit pair. Entries are
//! ordered by filename, so consecutive pages never overlap.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Extensions (lowercase, without the dot) recognized as images.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Largest page a single listing request can return. Also the default.
pub const MAX_PAGE_SIZE: usize = 30;

/// Return true if the filename ends in a recognized image extension.
///
/// The extension is whatever follows the last dot, compared
/// case-insensitively, so `.png` on its own counts.
pub fn is_image(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

// =============================================================================
// PageRequest
// =============================================================================

/// Offset/limit pair for a single listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of matching images to skip
    pub offset: usize,

    /// Maximum number of images to return, always in `1..=MAX_PAGE_SIZE`
    pub limit: usize,
}

impl PageRequest {
    /// Build a page request, clamping out-of-range values.
    ///
    /// Negative offsets become 0. A limit of zero, below zero, or above
    /// [`MAX_PAGE_SIZE`] becomes [`MAX_PAGE_SIZE`].
    pub fn new(offset: i64, limit: i64) -> Self {
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = match usize::try_from(limit) {
            Ok(limit) if limit > 0 && limit <= MAX_PAGE_SIZE => limit,
            _ => MAX_PAGE_SIZE,
        };

        Self { offset, limit }
    }

    /// Build a page request from raw query string values.
    ///
    /// Missing or non-numeric values parse as 0, which for the limit means
    /// the default page size.
    pub fn from_query(offset: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |value: Option<&str>| value.and_then(|v| v.parse::<i64>().ok()).unwrap_or(0);
        Self::new(parse(offset), parse(limit))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: MAX_PAGE_SIZE,
        }
    }
}

// =============================================================================
// ImagePage
// =============================================================================

/// One page of a region listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePage {
    /// Image filenames in listing order
    pub images: Vec<String>,

    /// Whether matching images remain after this page
    pub has_more: bool,
}

/// List one page of images from `dir`.
///
/// Subdirectories and names that are not valid UTF-8 are skipped. Fails if
/// the directory cannot be read.
pub fn list_page(dir: &Path, page: PageRequest) -> io::Result<ImagePage> {
    let mut names = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }

        if let Ok(name) = entry.file_name().into_string() {
            if is_image(&name) {
                names.push(name);
            }
        }
    }

    names.sort_unstable();
    let total = names.len();

    let images: Vec<String> = names
        .into_iter()
        .skip(page.offset)
        .take(page.limit)
        .collect();
    let has_more = page.offset.saturating_add(images.len()) < total;

    Ok(ImagePage { images, has_more })
}

/// Async wrapper around [`list_page`] that runs on the blocking pool.
pub async fn list_images(dir: PathBuf, page: PageRequest) -> io::Result<ImagePage> {
    tokio::task::spawn_blocking(move || list_page(&dir, page))
        .await
        .map_err(io::Error::other)?
}

// =============================================================================
// Tests
// =============================================================================
