use std::time::Duration;

use anyhow::{Context, Result};
use launchdeck_app_core::{ConfigError, Operation};
use tracing::{debug, info};

use crate::entries::{self, NewGroup, NewItem};
use crate::Session;

pub async fn cmd_path(session: &Session) -> Result<()> {
    let path = session.orchestrator.get_config_path().await?;
    println!("{path}");
    Ok(())
}

pub async fn cmd_show(session: &Session, json: bool) -> Result<()> {
    let config = session.orchestrator.load().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let settings = session.stores.settings.settings();
    println!(
        ":: Theme: {:?}, auto-save: {}, window: {}x{}",
        settings.theme, settings.auto_save, settings.window_width, settings.window_height
    );
    if let Some(saved) = session.orchestrator.last_saved() {
        println!(":: Last saved: {}", saved.to_rfc3339());
    }

    let groups = session.stores.groups.sorted_groups();
    if groups.is_empty() && session.stores.launch_items.is_empty() {
        println!("No groups or launch items configured.");
        return Ok(());
    }

    for group in groups {
        println!("[{}] {}", group.id, group.name);
        for item in session.stores.launch_items.items_by_group(&group.id) {
            println!("  - {} ({}): {}", item.name, item.id, item.path);
        }
    }

    let ungrouped = session.stores.launch_items.ungrouped();
    if !ungrouped.is_empty() {
        println!("[ungrouped]");
        for item in ungrouped {
            println!("  - {} ({}): {}", item.name, item.id, item.path);
        }
    }
    Ok(())
}

/// Loads first so the backend document mirrors the file before it is rewritten.
pub async fn cmd_save(session: &Session) -> Result<()> {
    session.orchestrator.load().await?;
    session.orchestrator.save().await?;
    Ok(())
}

pub async fn cmd_backup(session: &Session) -> Result<()> {
    session.orchestrator.backup().await?;
    Ok(())
}

pub async fn cmd_group_add(session: &Session, new: NewGroup) -> Result<()> {
    session.orchestrator.load().await?;
    let group = entries::add_group(&session.backend, new)?;
    session.orchestrator.save().await?;
    println!(":: Group '{}' added ({})", group.name, group.id);
    Ok(())
}

pub async fn cmd_item_add(session: &Session, new: NewItem) -> Result<()> {
    session.orchestrator.load().await?;
    if let Some(group) = new.group.as_deref() {
        if session.stores.groups.get(group).is_none() {
            println!(":: Warning: group '{group}' does not exist yet");
        }
    }
    let item = entries::add_item(&session.backend, new)?;
    session.orchestrator.save().await?;
    println!(":: Launch item '{}' added ({})", item.name, item.id);
    Ok(())
}

/// Runs the orchestrator until ctrl-c, saving on the given interval and once more on exit.
pub async fn cmd_run(session: &Session, interval_minutes: Option<u32>) -> Result<()> {
    session.orchestrator.initialize().await;
    if let Some(minutes) = interval_minutes {
        session.orchestrator.enable_auto_save(minutes)?;
    }

    let period = session
        .orchestrator
        .auto_save_interval()
        .unwrap_or(Duration::ZERO);
    println!(
        ":: Watching configuration, auto-save every {}s. Press Ctrl-C to stop.",
        period.as_secs()
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    debug!("interrupt received");

    session.orchestrator.disable_auto_save();
    let result = session.orchestrator.save().await;
    session.orchestrator.shutdown();
    info!("launchdeck stopped");
    settle_final_save(result)
}

/// An auto-save that was still running when the final save arrived already wrote the file.
fn settle_final_save(result: Result<String, ConfigError>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(ConfigError::Busy {
            in_flight: Operation::Save,
            ..
        }) => {
            debug!("final save skipped, auto-save already writing");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
