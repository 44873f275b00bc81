//! Rendering and writing of the output documents.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

use super::model::{Course, Syllabus};
use crate::error::{KtError, Result};
use crate::utils::fs::ensure_output_dir;

/// Course and syllabus bundled into one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedDocument {
    pub course: Course,
    pub syllabus: Syllabus,
    pub converted_at: DateTime<Utc>,
    pub version: String,
}

/// Paths of the three files written for one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFiles {
    pub course: PathBuf,
    pub syllabus: PathBuf,
    pub combined: PathBuf,
}

impl OutputFiles {
    /// File names are keyed by the course id.
    #[must_use]
    pub fn for_course(output_dir: &Path, course_id: &str) -> Self {
        Self {
            course: output_dir.join(format!("course_{course_id}.json")),
            syllabus: output_dir.join(format!("syllabus_{course_id}.json")),
            combined: output_dir.join(format!("timeback_course_{course_id}.json")),
        }
    }
}

/// Pretty-print `value` with `indent` spaces per level.
///
/// Non-ASCII text is written as-is, not escaped.
pub fn render<T: Serialize>(value: &T, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only emits UTF-8.
    String::from_utf8(buf).map_err(|err| KtError::Io(std::io::Error::other(err)))
}

/// Write the course, syllabus and combined documents into `output_dir`.
///
/// The directory is created if missing. Existing files are overwritten.
pub fn write_documents(
    output_dir: &Path,
    combined: &CombinedDocument,
    indent: usize,
) -> Result<OutputFiles> {
    ensure_output_dir(output_dir)?;

    let files = OutputFiles::for_course(output_dir, &combined.course.sourced_id);
    write_json(&files.course, &combined.course, indent)?;
    write_json(&files.syllabus, &combined.syllabus, indent)?;
    write_json(&files.combined, combined, indent)?;

    info!(
        course = %files.course.display(),
        syllabus = %files.syllabus.display(),
        combined = %files.combined.display(),
        "wrote output documents"
    );
    Ok(files)
}

fn write_json<T: Serialize>(path: &Path, value: &T, indent: usize) -> Result<()> {
    let rendered = render(value, indent)?;
    std::fs::write(path, rendered).map_err(|source| KtError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}
