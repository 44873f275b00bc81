//! khan-timeback convert - Convert exports into TimeBack documents

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok, robot_partial};
use crate::config::Config;
use crate::convert::{ConversionReport, Converter};
use crate::error::{KtError, Result, StructuredError};

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Khan Academy export files (JSON)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving the generated documents
    #[arg(long, short = 'o')]
    pub output_dir: PathBuf,

    /// Organization id for the converted courses
    #[arg(long)]
    pub org_id: Option<String>,

    /// Academic session id for the converted courses
    #[arg(long)]
    pub school_year: Option<String>,
}

#[derive(Debug, Serialize)]
struct FailedInput {
    input: PathBuf,
    error: StructuredError,
}

#[derive(Debug, Serialize)]
struct ConvertOutput {
    converted: Vec<ConversionReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failed: Vec<FailedInput>,
}

pub fn run(ctx: &AppContext, args: &ConvertArgs) -> Result<()> {
    let config = effective_config(&ctx.config, args)?;
    let converter = Converter::new(config);
    let outcome = converter.convert_files(&args.inputs, &args.output_dir);

    let total = outcome.total();
    let failed: Vec<FailedInput> = outcome
        .failures
        .iter()
        .map(|(input, err)| FailedInput {
            input: input.clone(),
            error: err.to_structured(),
        })
        .collect();
    let output = ConvertOutput {
        converted: outcome.reports,
        failed,
    };

    if ctx.machine_mode() {
        if output.failed.is_empty() {
            emit_json(&robot_ok(&output))?;
        } else {
            let warnings = output
                .failed
                .iter()
                .map(|f| format!("{}: {}", f.input.display(), f.error.message))
                .collect();
            emit_json(&robot_partial(
                &output,
                output.converted.len(),
                output.failed.len(),
                warnings,
            ))?;
        }
    } else {
        print_human(&output);
    }

    if output.failed.is_empty() {
        Ok(())
    } else {
        Err(KtError::BatchIncomplete {
            failed: output.failed.len(),
            total,
        })
    }
}

/// Apply command-line overrides on top of the loaded config.
fn effective_config(base: &Config, args: &ConvertArgs) -> Result<Config> {
    let mut config = base.clone();
    if let Some(org_id) = &args.org_id {
        config.conversion.org_id.clone_from(org_id);
    }
    if let Some(school_year) = &args.school_year {
        config.conversion.school_year.clone_from(school_year);
    }
    config.validate()?;
    Ok(config)
}

fn print_human(output: &ConvertOutput) {
    for report in &output.converted {
        let mut layout = HumanLayout::new();
        layout
            .title(&format!("{} {}", style("✓").green(), report.title))
            .kv("Course id", &report.course_id)
            .kv("Components", &report.components.to_string())
            .kv("Resources", &report.resources.to_string())
            .kv("Dropped items", &report.dropped_items.to_string())
            .kv("Grade", report.grade.as_str())
            .kv("Subject", report.subject.as_str())
            .blank()
            .section("Files")
            .bullet(&report.files.course.display().to_string())
            .bullet(&report.files.syllabus.display().to_string())
            .bullet(&report.files.combined.display().to_string())
            .blank();
        emit_human(layout);
    }

    for failure in &output.failed {
        eprintln!(
            "{} {}: {}",
            style("✗").red().bold(),
            failure.input.display(),
            failure.error.message
        );
    }
}
