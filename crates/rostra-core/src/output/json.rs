use crate::error::RostraError;
use crate::output::{Sheet, SheetWriter};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct Workbook<'a> {
    sheets: &'a [Sheet],
}

/// Writes all sheets into a single JSON workbook: `{"sheets": [...]}`.
pub struct JsonWriter {
    path: PathBuf,
}

impl JsonWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonWriter { path: path.into() }
    }
}

impl SheetWriter for JsonWriter {
    fn write(&self, sheets: &[Sheet]) -> Result<(), RostraError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&Workbook { sheets })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/workbook.json");
        let sheets = vec![Sheet {
            name: "Records".into(),
            columns: vec!["Name".into()],
            rows: vec![vec!["Ann Lee".into()]],
        }];
        JsonWriter::new(&path).write(&sheets).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["sheets"][0]["name"], "Records");
        assert_eq!(value["sheets"][0]["rows"][0][0], "Ann Lee");
    }
}
