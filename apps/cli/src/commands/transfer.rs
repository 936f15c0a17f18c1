//! Snapshot import and export.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use study_core::snapshot;

use crate::db::SqliteRepository;

pub fn import(repo: &mut SqliteRepository, path: &Path, out: &mut dyn Write) -> anyhow::Result<()> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let snapshot = snapshot::from_reader(BufReader::new(file))
        .with_context(|| format!("invalid snapshot {}", path.display()))?;
    let count = repo.import_snapshot(&snapshot)?;
    writeln!(out, "imported {count} records")?;
    Ok(())
}

pub fn export(repo: &SqliteRepository, path: Option<&Path>, out: &mut dyn Write) -> anyhow::Result<()> {
    let snapshot = repo.export_snapshot()?;
    match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            snapshot::to_writer(&mut writer, &snapshot)?;
            writer.flush()?;
            writeln!(out, "exported {} records to {}", snapshot.len(), path.display())?;
        }
        None => {
            snapshot::to_writer(&mut *out, &snapshot)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
