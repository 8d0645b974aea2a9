//! CSV export of a user's workouts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::storage::{DatabaseError, WorkoutRepository};
use crate::users::UserId;
use crate::workouts::types::Workout;

/// Fixed header row of the export file.
pub const CSV_HEADER: &str = "Duration,Distance,Calories,StartTime,EndTime";

/// Export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Failed to load the workouts
    #[error("Failed to load workouts: {0}")]
    Database(#[from] DatabaseError),

    /// Failed to create export file
    #[error("Failed to create file: {0}")]
    FileCreationFailed(String),

    /// Failed to write export data
    #[error("Failed to write data: {0}")]
    WriteFailed(String),
}

/// Write the header and one line per workout.
pub fn write_workouts_csv<W: Write>(workouts: &[Workout], mut output: W) -> Result<(), ExportError> {
    writeln!(output, "{}", CSV_HEADER).map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for workout in workouts {
        writeln!(
            output,
            "{},{:?},{:?},{},{}",
            workout.duration_minutes,
            workout.distance_km,
            workout.calories,
            escape_field(&workout.start_time),
            escape_field(&workout.end_time),
        )
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    output
        .flush()
        .map_err(|e| ExportError::WriteFailed(e.to_string()))
}

/// Render a user's workouts as CSV text.
pub fn export_csv<R>(repo: &R, user_id: UserId) -> Result<String, ExportError>
where
    R: WorkoutRepository + ?Sized,
{
    let result = repo
        .list_workouts(user_id)
        .map_err(ExportError::from)
        .and_then(|workouts| {
            let file =
                File::create(path).map_err(|e| ExportError::FileCreationFailed(e.to_string()))?;
            write_workouts_csv(&workouts, BufWriter::new(file))?;
            Ok(workouts.len())
        });

    match result {
        Ok(count) => {
            tracing::info!(
                "Exported {} workouts for user {} to {}",
                count,
                user_id,
                path.display()
            );
            Ok(count)
        }
        Err(e) => {
            tracing::error!("Workout export to {} failed: {}", path.display(), e);
            Err(e)
        }
    }
}

/// Generate a default filename for a user's export.
pub fn generate_csv_filename(username: &str) -> String {
    let date = chrono::Local::now().format("%Y%m%d");
    let safe: String = username
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("workouts_{}_{}.csv", safe, date)
}

/// Quote a free-text field when it would break the row.
fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
