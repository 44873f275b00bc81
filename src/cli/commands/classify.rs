//! khan-timeback classify - Subject and grade band for a slug

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::convert::{GradeBand, Subject, classify_grade, classify_subject};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Course slug, e.g. "pre-algebra"
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyReport {
    pub slug: String,
    pub subject: Subject,
    pub grade: GradeBand,
}

pub fn run(ctx: &AppContext, args: &ClassifyArgs) -> Result<()> {
    let report = ClassifyReport {
        slug: args.slug.clone(),
        subject: classify_subject(&args.slug),
        grade: classify_grade(&args.slug),
    };

    if ctx.machine_mode() {
        return emit_json(&robot_ok(report));
    }

    let mut layout = HumanLayout::new();
    layout
        .title(&report.slug)
        .kv("Subject", report.subject.as_str())
        .kv("Grade", report.grade.as_str());
    emit_human(layout);
    Ok(())
}
