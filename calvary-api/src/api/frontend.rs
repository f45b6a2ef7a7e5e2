//! Frontend bundle serving

use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// Name of the single-page entry point inside the static directory
pub const INDEX_FILE: &str = "index.html";

/// Serve files under `static_dir`
///
/// Paths that do not name an existing file get `index.html` so the
/// frontend's own router can handle them.
pub fn frontend_service(static_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join(INDEX_FILE)))
}
