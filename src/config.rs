//! Configuration management for the gallery server.
//!
//! Every option can be given on the command line or through the environment.
//! The store connection string uses the conventional `DATABASE_URL`; the
//! remaining variables carry a `GALLERY_` prefix:
//!
//! - `DATABASE_URL` - SQLite database path or `sqlite://` URL (required)
//! - `GALLERY_HOST` - Server bind address (default: 0.0.0.0)
//! - `GALLERY_PORT` - Server port (default: 8080)
//! - `GALLERY_IMAGES_DIR` - Root of `<region>/<file>` images (default: images)
//! - `GALLERY_THUMBS_DIR` - Root of `<region>/<file>` thumbnails (default: thumbs)
//! - `GALLERY_SITE_INDEX` - Static site entry file (default: index.html)
//! - `GALLERY_CORS_ORIGINS` - Comma-separated allowed origins (default: any)

use std::path::PathBuf;

use clap::Parser;

use crate::server::{RouterConfig, DEFAULT_IMAGES_DIR, DEFAULT_SITE_INDEX, DEFAULT_THUMBS_DIR};

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

/// Region Gallery - paginated, region-scoped image galleries over HTTP.
///
/// Serves image listings, images, and thumbnails for regions allow-listed
/// in a SQLite `region` table.
#[derive(Parser, Debug, Clone)]
#[command(name = "region-gallery")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GALLERY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GALLERY_PORT")]
    pub port: u16,

    // =========================================================================
    // Store Configuration
    // =========================================================================
    /// Connection string for the region store.
    ///
    /// A SQLite file path, `sqlite://<path>`, or `:memory:`.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    // =========================================================================
    // Filesystem Configuration
    // =========================================================================
    /// Directory containing one subdirectory of images per region.
    #[arg(long, default_value = DEFAULT_IMAGES_DIR, env = "GALLERY_IMAGES_DIR")]
    pub images_dir: PathBuf,

    /// Directory containing one subdirectory of thumbnails per region.
    #[arg(long, default_value = DEFAULT_THUMBS_DIR, env = "GALLERY_THUMBS_DIR")]
    pub thumbs_dir: PathBuf,

    /// Static site entry file served for `/` and unknown paths.
    #[arg(long, default_value = DEFAULT_SITE_INDEX, env = "GALLERY_SITE_INDEX")]
    pub site_index: PathBuf,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins for the API (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "GALLERY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.trim().is_empty() {
            return Err(
                "Database URL is required. Set --database-url or DATABASE_URL".to_string(),
            );
        }

        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }

        if self.images_dir.as_os_str().is_empty() {
            return Err("images_dir must not be empty".to_string());
        }
        if self.thumbs_dir.as_os_str().is_empty() {
            return Err("thumbs_dir must not be empty".to_string());
        }
        if self.site_index.as_os_str().is_empty() {
            return Err("site_index must not be empty".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the router configuration from these settings.
    pub fn router_config(&self) -> RouterConfig {
        let mut router_config = RouterConfig::default()
            .with_images_dir(self.images_dir.clone())
            .with_thumbs_dir(self.thumbs_dir.clone())
            .with_site_index(self.site_index.clone())
            .with_tracing(!self.no_tracing);

        if let Some(ref origins) = self.cors_origins {
            router_config = router_config.with_cors_origins(origins.clone());
        }

        router_config
    }
}

// =============================================================================
// Tests
// =============================================================================
