//! Application catalog embedded at compile time.
//!
//! The catalog is the static table of installable apps, grouped by category.
//! It is embedded via `include_str!`, parsed lazily on first access via
//! `OnceLock`, and immutable at runtime. Users may point the config at their
//! own catalog file, which replaces the embedded table wholesale; a file
//! that fails to read or parse falls back to the embedded data so startup
//! never dies on user input.
//!
//! Ordering matters: categories and the apps inside them are displayed in
//! the order they appear in the TOML document.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

const CATALOG_TOML: &str = include_str!("../embedded/catalog.toml");

/// One installable application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDescriptor {
    /// Display name; also the stem of the downloaded installer file.
    pub name: String,
    /// Installer download URL.
    pub download_url: String,
    /// Box-art URL (presentation only).
    pub image_url: String,
}

/// A named, ordered group of apps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub apps: Vec<AppDescriptor>,
}

/// The full catalog: categories in registration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Category labels in registration order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Apps registered under `category`, in display order.
    ///
    /// An unknown category yields an empty slice, not an error; callers
    /// render nothing.
    pub fn lookup(&self, category: &str) -> &[AppDescriptor] {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.apps.as_slice())
            .unwrap_or(&[])
    }

    /// Find an app by exact name across all categories (first match wins).
    pub fn find_app(&self, name: &str) -> Option<&AppDescriptor> {
        self.categories
            .iter()
            .flat_map(|c| c.apps.iter())
            .find(|app| app.name == name)
    }

    /// Total number of apps across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.apps.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Get the embedded default catalog (lazy-loaded).
pub fn embedded_catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        Catalog::from_toml(CATALOG_TOML).unwrap_or_else(|e| {
            panic!("Failed to parse catalog.toml: {}", e);
        })
    })
}

/// Load the catalog, honoring an optional user override file.
///
/// `None` or any read/parse failure yields the embedded catalog; failures
/// are logged, never fatal.
pub fn load_catalog(override_path: Option<&Path>) -> Catalog {
    let Some(path) = override_path else {
        return embedded_catalog().clone();
    };
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Failed to read catalog {}: {}", path.display(), e);
            return embedded_catalog().clone();
        }
    };
    match Catalog::from_toml(&text) {
        Ok(catalog) => {
            tracing::info!(
                "Loaded catalog from {} ({} apps)",
                path.display(),
                catalog.len()
            );
            catalog
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed catalog {}: {}", path.display(), e);
            embedded_catalog().clone()
        }
    }
}
