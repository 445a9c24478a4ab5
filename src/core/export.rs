// DoseWatch - core/export.rs
//
// CSV and JSON export of the execution history.
// Core layer: writes to any Write implementor.

use crate::core::model::Reminder;
use crate::util::constants::TIMESTAMP_FORMAT;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One flattened execution row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionRecord {
    pub reminder_id: u32,
    pub medicine: String,
    pub execution_id: u32,
    pub executed_at: String,
    pub status: &'static str,
    pub channel: &'static str,
    pub retries: u32,
    pub duration_minutes: u32,
}

/// Flatten every reminder's executions, ordered by time then reminder.
pub fn execution_records(reminders: &[Reminder]) -> Vec<ExecutionRecord> {
    let mut rows: Vec<(chrono::NaiveDateTime, ExecutionRecord)> = reminders
        .iter()
        .flat_map(|r| {
            r.executions.iter().map(move |e| {
                (
                    e.executed_at,
                    ExecutionRecord {
                        reminder_id: r.id,
                        medicine: r.display_name().to_string(),
                        execution_id: e.id,
                        executed_at: e.executed_at.format(TIMESTAMP_FORMAT).to_string(),
                        status: e.status.key(),
                        channel: e.method.key(),
                        retries: e.retries,
                        duration_minutes: e.duration_minutes,
                    },
                )
            })
        })
        .collect();
    rows.sort_by_key(|(at, rec)| (*at, rec.reminder_id, rec.execution_id));
    rows.into_iter().map(|(_, rec)| rec).collect()
}

/// Export records to CSV. Returns the number of rows written.
pub fn export_csv<W: Write>(
    records: &[ExecutionRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in records {
        csv_writer.serialize(record).map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export records as a pretty-printed JSON array.
pub fn export_json<W: Write>(
    records: &[ExecutionRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::load_builtin_fixtures;

    #[test]
    fn test_records_are_time_ordered() {
        let set = load_builtin_fixtures();
        let records = execution_records(&set.reminders);
        assert_eq!(records.len(), 5);
        // Insulin 07:00 is the earliest execution in the demo set.
        assert_eq!(records[0].medicine, "Insulin");
        assert_eq!(records[0].executed_at, "2024-11-22 07:00");
        assert_eq!(records.last().unwrap().status, "failed");
    }

    #[test]
    fn test_csv_export() {
        let set = load_builtin_fixtures();
        let records = execution_records(&set.reminders);
        let mut buf = Vec::new();
        let count = export_csv(&records, &mut buf, Path::new("history.csv")).unwrap();
        assert_eq!(count, 5);

        let output = String::from_utf8(buf).unwrap();
        let header = output.lines().next().unwrap();
        assert_eq!(
            header,
            "reminder_id,medicine,execution_id,executed_at,status,channel,retries,duration_minutes"
        );
        assert!(output.contains("Aspirin"));
        assert!(output.contains(",call,1,5"));
    }

    #[test]
    fn test_json_export() {
        let set = load_builtin_fixtures();
        let records = execution_records(&set.reminders);
        let mut buf = Vec::new();
        let count = export_json(&records, &mut buf, Path::new("history.json")).unwrap();
        assert_eq!(count, 5);

        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 5);
        assert_eq!(parsed[0]["channel"], "chat");
    }
}
