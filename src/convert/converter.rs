//! End-to-end conversion: read, extract, build, write.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument};

use super::builder::{BuildStats, HierarchyBuilder};
use super::classify::{GradeBand, Subject};
use super::extract::{ShapeKind, extract_course_data};
use super::ids::{IdGenerator, UuidIds};
use super::serialize::{CombinedDocument, OutputFiles, write_documents};
use crate::config::Config;
use crate::error::{KtError, Result};

/// Summary of one converted input.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub course_id: String,
    pub title: String,
    pub subject: Subject,
    pub grade: GradeBand,
    pub shape: ShapeKind,
    pub components: usize,
    pub resources: usize,
    pub dropped_items: usize,
    pub files: OutputFiles,
}

/// Outcome of a multi-input run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub reports: Vec<ConversionReport>,
    pub failures: Vec<(PathBuf, KtError)>,
}

impl BatchOutcome {
    #[must_use]
    pub fn total(&self) -> usize {
        self.reports.len() + self.failures.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// `Err(BatchIncomplete)` if any input failed.
    pub fn into_result(self) -> Result<Vec<ConversionReport>> {
        if self.is_complete() {
            Ok(self.reports)
        } else {
            Err(KtError::BatchIncomplete {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// In-memory result of converting one export.
#[derive(Debug, Clone)]
pub struct Converted {
    pub document: CombinedDocument,
    pub stats: BuildStats,
    pub shape: ShapeKind,
    pub subject: Subject,
    pub grade: GradeBand,
}

/// Drives conversions with one configuration and id source.
pub struct Converter {
    config: Config,
    ids: Box<dyn IdGenerator>,
}

impl Converter {
    /// Converter issuing random UUIDs.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_ids(config, Box::new(UuidIds))
    }

    #[must_use]
    pub fn with_ids(config: Config, ids: Box<dyn IdGenerator>) -> Self {
        Self { config, ids }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Convert a parsed export without touching the filesystem.
    #[must_use]
    pub fn convert_value(&self, raw: &Value) -> Converted {
        let now = Utc::now();
        let data = extract_course_data(raw, self.ids.as_ref());
        let built = HierarchyBuilder::new(&self.config.conversion, self.ids.as_ref(), now)
            .build(&data);

        let document = CombinedDocument {
            course: built.course,
            syllabus: built.syllabus,
            converted_at: now,
            version: self.config.output.format_version.clone(),
        };
        Converted {
            document,
            stats: built.stats,
            shape: data.shape,
            subject: data.subject,
            grade: data.grade_band,
        }
    }

    /// Read and parse an export file.
    pub fn load_document(path: &Path) -> Result<Value> {
        let raw = std::fs::read_to_string(path).map_err(|source| KtError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| KtError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Convert one export file and write its three documents.
    #[instrument(skip_all, fields(input = %input.display()))]
    pub fn convert_file(&self, input: &Path, output_dir: &Path) -> Result<ConversionReport> {
        let raw = Self::load_document(input)?;
        let converted = self.convert_value(&raw);
        let files = write_documents(output_dir, &converted.document, self.config.output.indent)?;

        let Converted {
            document,
            stats,
            shape,
            subject,
            grade,
        } = converted;
        let course = &document.course;
        info!(
            course_id = %course.sourced_id,
            components = document.syllabus.sub_components.len(),
            resources = stats.resources,
            dropped = stats.dropped_items,
            "converted course"
        );

        Ok(ConversionReport {
            input: input.to_path_buf(),
            course_id: course.sourced_id.clone(),
            title: course.title.clone(),
            subject,
            grade,
            shape,
            components: document.syllabus.sub_components.len(),
            resources: stats.resources,
            dropped_items: stats.dropped_items,
            files,
        })
    }

    /// Convert several exports in parallel into one output directory.
    ///
    /// Every input is attempted; failures are collected, not short-circuited.
    pub fn convert_files(&self, inputs: &[PathBuf], output_dir: &Path) -> BatchOutcome {
        let results: Vec<(PathBuf, Result<ConversionReport>)> = inputs
            .par_iter()
            .map(|input| (input.clone(), self.convert_file(input, output_dir)))
            .collect();

        let mut outcome = BatchOutcome::default();
        for (input, result) in results {
            match result {
                Ok(report) => outcome.reports.push(report),
                Err(err) => {
                    error!(input = %input.display(), error = %err, "conversion failed");
                    outcome.failures.push((input, err));
                }
            }
        }
        outcome
    }
}
