use std::path::Path;

use anyhow::Result;
use chrono::Local;
use log::{debug, info};
use serde::Serialize;

use crate::archive::build_index;
use crate::assets::AssetResolver;
use crate::codec::{decode_slug, display_date, display_instant};
use crate::config::{Config, EnsureOutcome};
use crate::error::ArchiveError;
use crate::logger::init_logger;
use crate::render::{format_archive_plain_text, format_snapshot_plain_text};
use crate::repository::{FsSnapshotStore, SnapshotStore};

pub enum View {
    Current,
    Archive,
    Show(String),
    Slugs,
}

pub struct Options<'a> {
    pub json: bool,
    pub verbose: bool,
    pub config: Option<&'a Path>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Produces the page for one view. Only a missing snapshot is an error here;
/// an unreadable archive is just empty.
pub async fn render_view<S: SnapshotStore>(
    store: &S,
    resolver: &AssetResolver,
    view: &View,
    json: bool,
) -> Result<String> {
    match view {
        View::Current => {
            let payload = store
                .load_current()
                .await
                .ok_or(ArchiveError::CurrentUnavailable)?;
            let resolved = resolver.resolve_snapshot(&payload).await;
            if json {
                return to_json(&resolved);
            }

            let updated = match payload.last_updated_at() {
                Some(at) => display_instant(&at),
                None => payload.last_updated.clone(),
            };
            Ok(format_snapshot_plain_text(
                "AI REPORT",
                &format!("Last Updated: {updated}"),
                &resolved,
            ))
        }
        View::Archive => {
            let ids = store.list().await;
            debug!("Listing {} archived snapshots", ids.len());
            let index = build_index(&ids, Local::now().naive_local(), resolver.base_path());
            if json {
                return to_json(&index);
            }
            Ok(format_archive_plain_text(&index))
        }
        View::Show(slug) => {
            let id = decode_slug(slug).ok_or_else(|| ArchiveError::NotFound(slug.clone()))?;
            let payload = store
                .load(&id)
                .await
                .ok_or_else(|| ArchiveError::NotFound(slug.clone()))?;
            let resolved = resolver.resolve_snapshot(&payload).await;
            if json {
                return to_json(&resolved);
            }
            Ok(format_snapshot_plain_text(
                "AI REPORT ARCHIVE",
                &format!("Archive Date: {}", display_date(&id)),
                &resolved,
            ))
        }
        View::Slugs => {
            let slugs = store.slugs().await;
            if json {
                return to_json(&slugs);
            }
            Ok(slugs.join("\n"))
        }
    }
}

pub async fn run(view: View, opts: Options<'_>) -> Result<()> {
    init_logger(opts.verbose)?;

    let config_outcome: EnsureOutcome = Config::ensure_user_config(opts.config)?;
    if config_outcome.created {
        info!(
            "Config file created at {}. Please edit it and run again.",
            config_outcome.path.display()
        );
        println!(
            "Config file created at {}. Please edit it and run again.",
            config_outcome.path.display()
        );
        return Ok(());
    }

    let cfg = Config::load(&config_outcome.path)?;
    debug!("Config loaded from {}", config_outcome.path.display());

    let store = FsSnapshotStore::from_config(&cfg);
    let resolver = AssetResolver::from_config(&cfg);

    let page = render_view(&store, &resolver, &view, opts.json).await?;
    println!("{page}");
    Ok(())
}
