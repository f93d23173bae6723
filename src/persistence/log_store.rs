use super::files::{
    append_to_file, atomic_write, ends_inside_quotes, ends_with_newline, is_missing_or_empty,
};
use crate::domain::SessionRecord;
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default log location, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "study_log.csv";

/// Header row written once at the top of the log
pub const LOG_HEADER: [&str; 5] = ["start_time", "end_time", "duration_minutes", "mode", "note"];

/// Append-only CSV log of study sessions
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the log with its header row if it is missing or empty
    pub fn ensure(&self) -> Result<()> {
        if !is_missing_or_empty(&self.path) {
            return Ok(());
        }

        let header = encode_row(&LOG_HEADER)?;
        atomic_write(&self.path, &header)
            .with_context(|| format!("Failed to create session log: {}", self.path.display()))?;
        info!(path = %self.path.display(), "created session log");
        Ok(())
    }

    /// Append one record as a single flushed write
    pub fn append(&self, record: &SessionRecord) -> Result<()> {
        self.ensure()?;

        let mut bytes = Vec::new();
        if ends_inside_quotes(&self.path)? {
            warn!(path = %self.path.display(), "log ends inside a quoted field, closing it");
            bytes.extend_from_slice(b"\"\n");
        } else if !ends_with_newline(&self.path)? {
            warn!(path = %self.path.display(), "log ends with a partial row, starting a new line");
            bytes.push(b'\n');
        }
        bytes.extend(encode_row(&record.to_row())?);

        append_to_file(&self.path, &bytes)
            .with_context(|| format!("Failed to append to session log: {}", self.path.display()))?;
        debug!(
            start = %record.start,
            minutes = record.duration_minutes,
            mode = record.mode.to_tag(),
            "appended session"
        );
        Ok(())
    }

    /// Lazily read every well-formed record in append order
    pub fn scan(&self) -> Result<Scan> {
        self.ensure()?;
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open session log: {}", self.path.display()))?;

        let rows = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file)
            .into_records();

        Ok(Scan {
            rows,
            at_first_row: true,
        })
    }
}

/// Iterator over the records of a log. Corrupt rows are skipped; an I/O
/// error ends the scan.
pub struct Scan {
    rows: csv::StringRecordsIntoIter<File>,
    at_first_row: bool,
}

impl Iterator for Scan {
    type Item = SessionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let row = match self.rows.next()? {
                Ok(row) => row,
                Err(e) => {
                    if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                        warn!(error = %e, "stopping log scan after read error");
                        return None;
                    }
                    debug!(error = %e, "skipping undecodable log row");
                    self.at_first_row = false;
                    continue;
                }
            };

            let fields: Vec<&str> = row.iter().collect();
            if std::mem::take(&mut self.at_first_row) && is_header(&fields) {
                continue;
            }

            match SessionRecord::from_fields(&fields) {
                Some(record) => return Some(record),
                None => {
                    debug!(row = ?fields, "skipping malformed log row");
                }
            }
        }
    }
}

fn is_header(fields: &[&str]) -> bool {
    fields.first().map(|f| f.trim()) == Some(LOG_HEADER[0])
}

/// Serialize one CSV row (quoted as needed, '\n' terminated)
fn encode_row<I, T>(fields: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields)?;
    writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to encode log row: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimerMode;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::time::Duration;

    fn ts(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, crate::domain::TIMESTAMP_FORMAT).unwrap()
    }

    fn record(start: &str, minutes: u64, note: &str) -> SessionRecord {
        let start = ts(start);
        let end = start + chrono::Duration::minutes(minutes as i64);
        SessionRecord::new(start, end, Duration::from_secs(minutes * 60), TimerMode::CountUp, note)
    }

    fn temp_store() -> (tempfile::TempDir, LogStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path().join("study_log.csv"));
        (dir, store)
    }

    #[test]
    fn test_ensure_creates_header_only() {
        let (_dir, store) = temp_store();
        store.ensure().unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "start_time,end_time,duration_minutes,mode,note\n");
        assert_eq!(store.scan().unwrap().count(), 0);
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let (_dir, store) = temp_store();
        store.ensure().unwrap();
        store.append(&record("2024-01-01 10:00:00", 30, "")).unwrap();
        store.ensure().unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_ensure_fills_empty_file() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "").unwrap();
        store.ensure().unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("start_time,"));
    }

    #[test]
    fn test_append_then_scan() {
        let (_dir, store) = temp_store();
        let first = record("2024-01-01 10:00:00", 30, "algebra");
        let second = record("2024-01-02 08:15:00", 45, "");

        store.append(&first).unwrap();
        assert_eq!(store.scan().unwrap().collect::<Vec<_>>(), vec![first.clone()]);

        store.append(&second).unwrap();
        assert_eq!(store.scan().unwrap().collect::<Vec<_>>(), vec![first, second]);
    }

    #[test]
    fn test_append_quotes_notes() {
        let (_dir, store) = temp_store();
        let tricky = record("2024-01-01 10:00:00", 5, "maths, \"hard\" part\nsecond line");
        store.append(&tricky).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\"maths, \"\"hard\"\" part\nsecond line\""));

        let scanned: Vec<_> = store.scan().unwrap().collect();
        assert_eq!(scanned, vec![tricky]);
    }

    #[test]
    fn test_row_format() {
        let (_dir, store) = temp_store();
        store.append(&record("2024-01-01 10:00:00", 30, "vocab")).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(row, "2024-01-01 10:00:00,2024-01-01 10:30:00,30.00,countup,vocab");
    }

    #[test]
    fn test_scan_skips_malformed_rows() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            "start_time,end_time,duration_minutes,mode,note\n\
             2024-01-01 10:00:00,2024-01-01 10:05:00,abc,countup,\n\
             2024-01-01 11:00:00\n\
             2024-01-01 12:00:00,2024-01-01 12:10:00,10.00,countdown,ok\n",
        )
        .unwrap();

        let scanned: Vec<_> = store.scan().unwrap().collect();
        assert_eq!(scanned.len(), 1);
        assert_eq!(scanned[0].note, "ok");
        assert_eq!(scanned[0].mode, TimerMode::CountDown);
    }

    #[test]
    fn test_scan_without_header() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "2024-01-01 10:00:00,2024-01-01 10:05:00,5.00,countup,\n").unwrap();

        assert_eq!(store.scan().unwrap().count(), 1);
    }

    #[test]
    fn test_append_after_torn_row() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            "start_time,end_time,duration_minutes,mode,note\n2024-01-01 10:00:00,2024-01",
        )
        .unwrap();

        let fresh = record("2024-01-02 10:00:00", 20, "after crash");
        store.append(&fresh).unwrap();

        let scanned: Vec<_> = store.scan().unwrap().collect();
        assert_eq!(scanned, vec![fresh]);
    }

    #[test]
    fn test_append_after_torn_quoted_note() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            "start_time,end_time,duration_minutes,mode,note\n\
             2024-01-01 10:00:00,2024-01-01 10:05:00,5.00,countup,\"maths, ch",
        )
        .unwrap();

        let fresh = record("2024-01-02 10:00:00", 20, "after crash");
        store.append(&fresh).unwrap();
        store.append(&fresh).unwrap();

        let scanned: Vec<_> = store.scan().unwrap().collect();
        assert_eq!(scanned.len(), 3);
        assert_eq!(scanned[0].note, "maths, ch");
        assert_eq!(&scanned[1..], &[fresh.clone(), fresh][..]);
    }

    #[test]
    fn test_append_after_torn_multiline_note() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            "start_time,end_time,duration_minutes,mode,note\n\
             2024-01-01 10:00:00,2024-01-01 10:05:00,5.00,countup,\"line one\n",
        )
        .unwrap();

        let fresh = record("2024-01-02 10:00:00", 20, "");
        store.append(&fresh).unwrap();

        let scanned: Vec<_> = store.scan().unwrap().collect();
        assert_eq!(scanned.last(), Some(&fresh));
        assert_eq!(scanned.len(), 2);
    }
}
