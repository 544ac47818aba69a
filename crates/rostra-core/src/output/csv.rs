use crate::error::RostraError;
use crate::output::{Sheet, SheetWriter};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes each sheet to `<dir>/<sheet name>.csv`, header row first.
pub struct CsvWriter {
    dir: PathBuf,
}

impl CsvWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvWriter { dir: dir.into() }
    }

    pub fn sheet_path(&self, sheet: &Sheet) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet.name))
    }
}

impl SheetWriter for CsvWriter {
    fn write(&self, sheets: &[Sheet]) -> Result<(), RostraError> {
        std::fs::create_dir_all(&self.dir)?;
        for sheet in sheets {
            let path = self.sheet_path(sheet);
            write_sheet(&path, sheet)?;
            debug!(path = %path.display(), rows = sheet.rows.len(), "wrote sheet");
        }
        Ok(())
    }
}

fn write_sheet(path: &Path, sheet: &Sheet) -> Result<(), RostraError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)?;
    writer.write_record(&sheet.columns)?;
    for row in &sheet.rows {
        writer.write_record(row)?;
    }
    // Check for error rather than implicitly flushing and ignoring.
    writer.flush()?;
    Ok(())
}
