//! Filesystem side of the gallery: path checks and directory listing.
//!
//! The on-disk layout is one directory per region under both the images and
//! thumbnails roots:
//!
//! ```text
//! images/<region>/<file>
//! thumbs/<region>/<file>
//! ```

mod lister;
mod sanitize;

pub use lister::{
    is_image, list_images, list_page, ImagePage, PageRequest, IMAGE_EXTENSIONS, MAX_PAGE_SIZE,
};
pub use sanitize::{is_traversal, sanitize_filename, sanitize_region, TRAVERSAL_MARKER};
