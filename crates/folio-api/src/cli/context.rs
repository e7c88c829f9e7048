//! `folio context` command: show what the model sees.

use anyhow::Result;
use console::style;

use folio_core::prompt::composer::{system_instruction, to_prompt_context};
use folio_infra::config::Secrets;
use folio_infra::store::open_stores;
use folio_types::config::FolioConfig;

use crate::state::snapshot_cache;

/// Load the snapshot once and print the system instruction and knowledge block.
pub async fn print_context(config: &FolioConfig, secrets: &Secrets, json: bool) -> Result<()> {
    let (knowledge, _) = open_stores(&config.store, secrets).await?;
    let cache = snapshot_cache(knowledge, config);
    let snapshot = cache.load().await;
    let block = to_prompt_context(&snapshot, config.chat.condensed_entries);

    if json {
        let out = serde_json::json!({
            "origin": snapshot.origin,
            "loadedAt": snapshot.loaded_at,
            "counts": snapshot.counts(),
            "system": system_instruction(&snapshot.personal),
            "context": block.as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let counts = snapshot.counts();
    println!();
    println!(
        "  {} Snapshot: {} ({} skills, {} experiences, {} projects, {} certifications)",
        style("📚").bold(),
        style(snapshot.origin).cyan(),
        counts.skills,
        counts.experiences,
        counts.projects,
        counts.certifications
    );
    if snapshot.is_degraded() {
        println!(
            "  {}",
            style("Store unreachable: only the personal-info block is available").yellow()
        );
    }
    println!();
    println!("{}", style("── system ──").dim());
    println!("{}", system_instruction(&snapshot.personal));
    println!();
    println!("{}", style("── knowledge ──").dim());
    println!("{block}");
    println!();
    Ok(())
}
