//! Extraction of a canonical [`CourseData`] record from a raw export.
//!
//! The export is a GraphQL `contentRoute` response. Its course node is either
//! a full course (units under `unitChildren`) or a single unit whose items sit
//! directly under `allOrderedChildren`. Anything else yields a course with no
//! units. Extraction never fails: missing fields take the defaults below and a
//! missing course node degrades to an all-default record.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::classify::{GradeBand, Subject, classify_grade, classify_subject};
use super::document::DocumentExt;
use super::ids::IdGenerator;

/// Keys leading from the document root to the course node.
pub const COURSE_PATH: &[&str] = &["data", "contentRoute", "listedPathData", "course"];

pub const UNIT_CHILDREN_FIELD: &str = "unitChildren";
pub const ITEM_CHILDREN_FIELD: &str = "allOrderedChildren";

pub const DEFAULT_TITLE: &str = "Khan Academy Course";
pub const DEFAULT_SLUG: &str = "khan-course";

/// How the course node was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Course node with a `unitChildren` list.
    FullCourse,
    /// Unit response: the node itself is the only unit.
    SingleUnit,
    /// Course node with neither children list.
    Empty,
    /// The course node could not be reached.
    Unresolved,
}

/// The course node, resolved once at the top of extraction.
#[derive(Debug, Clone, Copy)]
pub enum CourseShape<'a> {
    FullCourse(&'a [Value]),
    SingleUnit(&'a Value),
    Empty,
}

impl<'a> CourseShape<'a> {
    #[must_use]
    pub fn detect(course: &'a Value) -> Self {
        if let Some(units) = course.array_field(UNIT_CHILDREN_FIELD) {
            Self::FullCourse(units)
        } else if course.array_field(ITEM_CHILDREN_FIELD).is_some() {
            Self::SingleUnit(course)
        } else {
            Self::Empty
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::FullCourse(_) => ShapeKind::FullCourse,
            Self::SingleUnit(_) => ShapeKind::SingleUnit,
            Self::Empty => ShapeKind::Empty,
        }
    }

    #[must_use]
    pub fn units(&self) -> Vec<Value> {
        match self {
            Self::FullCourse(units) => units.to_vec(),
            Self::SingleUnit(unit) => vec![(*unit).clone()],
            Self::Empty => Vec::new(),
        }
    }
}

/// Intermediate course record handed to the hierarchy builder.
#[derive(Debug, Clone)]
pub struct CourseData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub icon_path: String,
    /// Raw unit documents in source order.
    pub units: Vec<Value>,
    pub subject: Subject,
    pub grade_band: GradeBand,
    pub shape: ShapeKind,
}

impl CourseData {
    /// The record used when the course node is unreachable.
    #[must_use]
    pub fn fallback(ids: &dyn IdGenerator) -> Self {
        Self {
            id: ids.fresh_id(),
            title: DEFAULT_TITLE.to_string(),
            description: String::new(),
            slug: DEFAULT_SLUG.to_string(),
            icon_path: String::new(),
            units: Vec::new(),
            subject: classify_subject(""),
            grade_band: classify_grade(""),
            shape: ShapeKind::Unresolved,
        }
    }
}

/// Extract a [`CourseData`] from a raw export document.
pub fn extract_course_data(raw: &Value, ids: &dyn IdGenerator) -> CourseData {
    let course = match raw.path(COURSE_PATH) {
        Ok(course) if course.is_object() => course,
        Ok(_) => {
            warn!("course node is not an object, using default course record");
            return CourseData::fallback(ids);
        }
        Err(miss) => {
            warn!(%miss, "could not locate course node, using default course record");
            return CourseData::fallback(ids);
        }
    };

    let shape = CourseShape::detect(course);
    debug!(shape = ?shape.kind(), "resolved course shape");

    // Classification sees the raw slug, so a missing slug classifies as "".
    let raw_slug = course.str_field("slug").unwrap_or_default();

    let title = course.non_empty_str("translatedTitle").unwrap_or_else(|| {
        warn!("course has no translatedTitle, using default title");
        DEFAULT_TITLE
    });
    let slug = course.non_empty_str("slug").unwrap_or_else(|| {
        warn!("course has no slug, using default slug");
        DEFAULT_SLUG
    });
    let id = course.non_empty_str("id").map_or_else(
        || {
            debug!("course has no id, generating one");
            ids.fresh_id()
        },
        str::to_string,
    );

    CourseData {
        id,
        title: title.to_string(),
        description: course
            .str_field("translatedDescription")
            .unwrap_or_default()
            .to_string(),
        slug: slug.to_string(),
        icon_path: course.str_field("iconPath").unwrap_or_default().to_string(),
        units: shape.units(),
        subject: classify_subject(raw_slug),
        grade_band: classify_grade(raw_slug),
        shape: shape.kind(),
    }
}
