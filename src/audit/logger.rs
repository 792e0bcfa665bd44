//! JSONL audit log writer and reader

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::error::{FoodCostError, FoodCostResult};

use super::entry::AuditEntry;

/// Append-only audit log, one serialized [`AuditEntry`] per line
pub struct AuditLogger {
    log_path: PathBuf,
}

fn io_error(action: &str, e: std::io::Error) -> FoodCostError {
    FoodCostError::Io(format!("Failed to {} audit log: {}", action, e))
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> FoodCostResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append entries in order; the file is opened and flushed once
    pub fn log_batch(&self, entries: &[AuditEntry]) -> FoodCostResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut buffer = String::new();
        for entry in entries {
            let line = serde_json::to_string(entry)
                .map_err(|e| FoodCostError::Json(format!("Failed to serialize audit entry: {}", e)))?;
            buffer.push_str(&line);
            buffer.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| io_error("open", e))?;
        file.write_all(buffer.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| io_error("append to", e))
    }

    /// Every readable entry, oldest first
    ///
    /// A line that does not parse is logged and skipped.
    pub fn read_all(&self) -> FoodCostResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path).map_err(|e| io_error("open", e))?;
        let mut entries = Vec::new();

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| io_error("read", e))?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(line = index + 1, error = %e, "skipping unreadable audit entry"),
            }
        }

        Ok(entries)
    }

    /// The last `count` readable entries, oldest first
    pub fn read_recent(&self, count: usize) -> FoodCostResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Number of readable entries
    pub fn entry_count(&self) -> FoodCostResult<usize> {
        Ok(self.read_all()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");
        (AuditLogger::new(log_path), temp_dir)
    }

    fn ingredient_entry(i: usize) -> AuditEntry {
        AuditEntry::create(
            EntityType::Ingredient,
            format!("ing-{}", i),
            Some(format!("Ingredient {}", i)),
            &json!({"index": i}),
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&ingredient_entry(0)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Ingredient);
    }

    #[test]
    fn test_log_batch_and_count() {
        let (logger, _temp) = create_test_logger();
        let entries: Vec<AuditEntry> = (0..3).map(ingredient_entry).collect();

        logger.log_batch(&entries).unwrap();
        logger.log_batch(&[]).unwrap();

        assert_eq!(logger.entry_count().unwrap(), 3);
        let ids: Vec<String> = logger
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.entity_id)
            .collect();
        assert_eq!(ids, vec!["ing-0", "ing-1", "ing-2"]);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        for i in 0..10 {
            logger.log(&ingredient_entry(i)).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<&str> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["ing-7", "ing-8", "ing-9"]);
        assert_eq!(logger.read_recent(50).unwrap().len(), 10);
    }

    #[test]
    fn test_missing_log_is_empty() {
        let (logger, _temp) = create_test_logger();

        assert_eq!(logger.entry_count().unwrap(), 0);
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_update_entry_keeps_diff() {
        let (logger, _temp) = create_test_logger();

        let entry = AuditEntry::update(
            EntityType::Recipe,
            "rec-12345678",
            Some("Hotdog Clásico".to_string()),
            &json!({"sale_price": 35.0}),
            &json!({"sale_price": 40.0}),
        );
        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(
            entries[0].diff_summary.as_deref(),
            Some("sale_price: 35.0 -> 40.0")
        );
    }

    #[test]
    fn test_damaged_line_is_skipped() {
        let (logger, temp) = create_test_logger();
        logger.log(&ingredient_entry(0)).unwrap();
        {
            let mut file = OpenOptions::new()
                .append(true)
                .open(temp.path().join("audit.log"))
                .unwrap();
            writeln!(file, "{{not json").unwrap();
        }
        logger.log(&ingredient_entry(1)).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(reopened.read_all().unwrap().len(), 2);
        assert_eq!(reopened.entry_count().unwrap(), 2);
    }
}
