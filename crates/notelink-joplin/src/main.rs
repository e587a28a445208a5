//! notelink - maintain folder anchor-note links in a Joplin collection.
//!
//! Runs the pipeline exactly once and exits. Invocations must not
//! overlap; schedule them serially.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notelink_engine::auto_link;
use notelink_joplin::{JoplinClient, JoplinConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = JoplinConfig::from_env().context("loading Joplin configuration")?;
    info!(url = %config.base_url, "starting notelink run");

    let client = JoplinClient::new(config).context("building Joplin client")?;
    let report = auto_link(&client).await.context("anchor-link run failed")?;

    info!(
        folders = report.folders,
        notes = report.notes,
        unlinkable_folders = report.unlinkable_folders,
        orphaned_notes = report.orphaned_notes,
        anchors_created = report.anchors_created,
        duplicates_deleted = report.duplicate_anchors_deleted,
        misnamed_deleted = report.misnamed_notes_deleted,
        bodies_appended = report.bodies_appended,
        bodies_relinked = report.bodies_relinked,
        converged = report.converged(),
        "run complete"
    );
    Ok(())
}
