//! Download-and-launch from the command line

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tokio::sync::watch;

use crate::catalog::{self, AppDescriptor};
use crate::cli::output::{print_formatted, should_show_progress, OutputFormat};
use crate::config::Config;
use crate::installer::{CancelFlag, InstallProgress, Installer, LaunchMode};
use crate::util::format_size;

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// App name as it appears in the catalog
    pub name: String,

    /// Restrict the catalog lookup to one category
    #[arg(long)]
    pub category: Option<String>,

    /// Download from this URL instead of the catalog entry
    #[arg(long)]
    pub url: Option<String>,

    /// Run the installer as a child process instead of handing it to
    /// the desktop shell
    #[arg(long)]
    pub direct: bool,
}

#[derive(Serialize)]
struct InstallResult {
    name: String,
    installer_path: String,
    bytes_downloaded: u64,
    exit_code: Option<i32>,
}

pub async fn run(args: InstallArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let app = resolve_app(&args)?;

    let mut installer = Installer::new()?;
    if args.direct {
        installer = installer.with_launch_mode(LaunchMode::Direct);
    }

    let cancel = CancelFlag::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let (progress_tx, progress_rx) = watch::channel(InstallProgress::default());
    let reporter = should_show_progress(quiet, format).then(|| spawn_reporter(progress_rx));

    let result = installer.install(&app, &progress_tx, cancel).await;

    // Close the channel so the reporter's final line is printed before
    // the result below.
    drop(progress_tx);
    if let Some(reporter) = reporter {
        let _ = reporter.await;
    }

    let outcome = result?;

    let result = InstallResult {
        name: app.name.clone(),
        installer_path: outcome.installer_path.display().to_string(),
        bytes_downloaded: outcome.bytes_downloaded,
        exit_code: outcome.exit_status.code(),
    };

    print_formatted(&result, format, |r| {
        format!(
            "{} installed: {} written to {}",
            r.name,
            format_size(r.bytes_downloaded),
            r.installer_path
        )
    });

    Ok(())
}

/// Resolve the descriptor to install, either from the catalog or from an
/// explicit --url override.
fn resolve_app(args: &InstallArgs) -> Result<AppDescriptor> {
    if let Some(url) = &args.url {
        return Ok(AppDescriptor {
            name: args.name.clone(),
            download_url: url.clone(),
            image_url: String::new(),
        });
    }

    let config = Config::load_or_default();
    let catalog = catalog::load_catalog(config.launcher.catalog_path.as_deref());

    let found = match &args.category {
        Some(category) => catalog
            .lookup(category)
            .iter()
            .find(|app| app.name == args.name)
            .cloned(),
        None => catalog.find_app(&args.name).cloned(),
    };

    found.with_context(|| format!("App '{}' not found in catalog", args.name))
}

/// Print progress lines to stderr as they arrive, overwriting in place.
fn spawn_reporter(
    mut progress_rx: watch::Receiver<InstallProgress>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let progress = progress_rx.borrow().clone();
            match progress.percent {
                Some(percent) => eprint!(
                    "\r{}: {}% ({} / {})        ",
                    progress.status_line(),
                    percent,
                    format_size(progress.bytes_downloaded),
                    format_size(progress.total_bytes)
                ),
                None if progress.bytes_downloaded > 0 => eprint!(
                    "\r{}: {} downloaded        ",
                    progress.status_line(),
                    format_size(progress.bytes_downloaded)
                ),
                None => eprint!("\r{}        ", progress.status_line()),
            }
        }
        eprintln!();
    })
}
