//! Grading and per-card commands.

use std::io::Write;

use chrono::{DateTime, Utc};
use study_core::{Performance, Scheduler, SchedulerSettings};

use crate::db::SqliteRepository;

pub fn grade(
    repo: &mut SqliteRepository,
    settings: &SchedulerSettings,
    card_id: &str,
    performance: Performance,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut scheduler = Scheduler::new(repo).with_settings(settings.clone());
    let next_review = scheduler.grade_card(card_id, performance, now)?;

    let record = scheduler.record(card_id)?;
    let (interval, ease) = record
        .map(|r| (r.interval, r.ease_factor))
        .unwrap_or_default();

    tracing::info!(card_id, %performance, interval, "review recorded");
    writeln!(
        out,
        "{card_id}: next review {} (interval {interval}d, ease {ease:.2})",
        next_review.to_rfc3339()
    )?;
    Ok(())
}

pub fn show(repo: &mut SqliteRepository, card_id: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let scheduler = Scheduler::new(repo);
    match scheduler.record(card_id)? {
        Some(record) => writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?,
        None => writeln!(out, "{card_id}: no review record (new card)")?,
    }
    Ok(())
}

pub fn forget(repo: &mut SqliteRepository, card_id: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    if repo.delete_record(card_id)? {
        tracing::info!(card_id, "deleted review record");
        writeln!(out, "{card_id}: review record deleted")?;
    } else {
        writeln!(out, "{card_id}: no review record")?;
    }
    Ok(())
}
