//! khan-timeback inspect - Dry-run a conversion

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::convert::{BuildStats, Converted, Converter, GradeBand, ShapeKind, Subject};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Khan Academy export file (JSON)
    pub input: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct UnitSummary {
    pub sort_order: usize,
    pub title: String,
    pub resources: usize,
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub input: PathBuf,
    pub shape: ShapeKind,
    pub title: String,
    pub slug: String,
    pub course_code: String,
    pub subject: Subject,
    pub grade: GradeBand,
    pub stats: BuildStats,
    pub units: Vec<UnitSummary>,
}

impl InspectReport {
    fn new(input: PathBuf, converted: &Converted) -> Self {
        let course = &converted.document.course;
        let units = converted
            .document
            .syllabus
            .sub_components
            .iter()
            .map(|component| UnitSummary {
                sort_order: component.sort_order,
                title: component.title.clone(),
                resources: component.component_resources.len(),
            })
            .collect();

        Self {
            input,
            shape: converted.shape,
            title: course.title.clone(),
            slug: course.metadata.original_slug.clone(),
            course_code: course.course_code.clone(),
            subject: converted.subject,
            grade: converted.grade,
            stats: converted.stats,
            units,
        }
    }
}

pub fn run(ctx: &AppContext, args: &InspectArgs) -> Result<()> {
    let raw = Converter::load_document(&args.input)?;
    let converted = Converter::new(ctx.config.clone()).convert_value(&raw);
    let report = InspectReport::new(args.input.clone(), &converted);

    if ctx.machine_mode() {
        return emit_json(&robot_ok(report));
    }

    let shape = serde_json::to_value(report.shape)?;
    let mut layout = HumanLayout::new();
    layout
        .title(&report.title)
        .kv("Input", &report.input.display().to_string())
        .kv("Shape", shape.as_str().unwrap_or_default())
        .kv("Slug", &report.slug)
        .kv("Course code", &report.course_code)
        .kv("Subject", report.subject.as_str())
        .kv("Grade", report.grade.as_str())
        .kv("Items", &report.stats.items.to_string())
        .kv("Resources", &report.stats.resources.to_string())
        .kv("Dropped items", &report.stats.dropped_items.to_string())
        .blank()
        .section("Units");
    for unit in &report.units {
        layout.bullet(&format!(
            "{}. {} ({} resources)",
            unit.sort_order + 1,
            unit.title,
            unit.resources
        ));
    }
    emit_human(layout);
    Ok(())
}
