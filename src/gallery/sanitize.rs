//! Path segment checks for region and filename parameters.

use crate::error::GalleryError;

/// Parent-directory marker rejected anywhere in a segment.
pub const TRAVERSAL_MARKER: &str = "..";

/// Return true if the segment contains the traversal marker.
///
/// This is a substring match, not a segment-aware one: `a..b.png` is
/// rejected too.
pub fn is_traversal(segment: &str) -> bool {
    segment.contains(TRAVERSAL_MARKER)
}

/// Normalize and check a region path segment.
///
/// Region names are lowercase in the store, so the segment is lowercased
/// before the traversal check.
pub fn sanitize_region(segment: &str) -> Result<String, GalleryError> {
    if segment.is_empty() {
        return Err(GalleryError::MissingRegion);
    }

    let region = segment.to_lowercase();
    if is_traversal(&region) {
        return Err(GalleryError::Forbidden);
    }

    Ok(region)
}

/// Check a filename path segment.
///
/// Files must sit directly under their region directory, so a filename that
/// still contains a separator is rejected along with traversal attempts.
pub fn sanitize_filename(segment: &str) -> Result<&str, GalleryError> {
    if segment.is_empty() {
        return Err(GalleryError::InvalidPath);
    }

    if is_traversal(segment) || segment.contains('/') || segment.contains('\\') {
        return Err(GalleryError::Forbidden);
    }

    Ok(segment)
}
