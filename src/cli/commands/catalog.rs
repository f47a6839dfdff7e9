//! Catalog inspection commands

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::catalog::{self, Catalog};
use crate::cli::output::{print_formatted, OutputFormat};
use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List category names in catalog order
    Categories,

    /// List apps, across all categories or one
    List {
        /// Only list apps in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one app by name
    Show {
        /// App name as it appears in the catalog
        name: String,
    },
}

#[derive(Serialize)]
struct CategoriesResult {
    categories: Vec<String>,
}

#[derive(Serialize)]
struct AppEntry {
    category: String,
    name: String,
    download_url: String,
    image_url: String,
}

#[derive(Serialize)]
struct AppListResult {
    apps: Vec<AppEntry>,
}

pub async fn run(command: CatalogCommands, format: OutputFormat, _quiet: bool) -> Result<()> {
    match command {
        CatalogCommands::Categories => categories(format).await,
        CatalogCommands::List { category } => list(category, format).await,
        CatalogCommands::Show { name } => show(&name, format).await,
    }
}

/// Load the catalog the same way the GUI does, honoring a configured
/// override file
fn load() -> Catalog {
    let config = Config::load_or_default();
    catalog::load_catalog(config.launcher.catalog_path.as_deref())
}

async fn categories(format: OutputFormat) -> Result<()> {
    let catalog = load();

    let result = CategoriesResult {
        categories: catalog
            .category_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    print_formatted(&result, format, |r| {
        if r.categories.is_empty() {
            return "No categories in catalog.".to_string();
        }
        r.categories.join("\n")
    });

    Ok(())
}

async fn list(category: Option<String>, format: OutputFormat) -> Result<()> {
    let catalog = load();

    // An unknown category is an empty listing, not an error
    let entries: Vec<AppEntry> = match category {
        Some(ref name) => catalog
            .lookup(name)
            .iter()
            .map(|app| AppEntry {
                category: name.clone(),
                name: app.name.clone(),
                download_url: app.download_url.clone(),
                image_url: app.image_url.clone(),
            })
            .collect(),
        None => catalog
            .categories
            .iter()
            .flat_map(|c| {
                c.apps.iter().map(|app| AppEntry {
                    category: c.name.clone(),
                    name: app.name.clone(),
                    download_url: app.download_url.clone(),
                    image_url: app.image_url.clone(),
                })
            })
            .collect(),
    };

    let result = AppListResult { apps: entries };

    print_formatted(&result, format, |r| {
        if r.apps.is_empty() {
            return "No apps found.".to_string();
        }

        let mut lines = vec![format!("{:<24} {:<14} {}", "NAME", "CATEGORY", "URL")];
        lines.push("-".repeat(70));

        for app in &r.apps {
            lines.push(format!(
                "{:<24} {:<14} {}",
                app.name, app.category, app.download_url
            ));
        }

        lines.join("\n")
    });

    Ok(())
}

async fn show(name: &str, format: OutputFormat) -> Result<()> {
    let catalog = load();

    let entry = catalog
        .categories
        .iter()
        .find_map(|c| {
            c.apps.iter().find(|app| app.name == name).map(|app| AppEntry {
                category: c.name.clone(),
                name: app.name.clone(),
                download_url: app.download_url.clone(),
                image_url: app.image_url.clone(),
            })
        })
        .with_context(|| format!("App '{}' not found in catalog", name))?;

    print_formatted(&entry, format, |e| {
        format!(
            "Name:      {}\nCategory:  {}\nDownload:  {}\nImage:     {}",
            e.name, e.category, e.download_url, e.image_url
        )
    });

    Ok(())
}
