//! Output entities: Course, Syllabus, Component and Resource.
//!
//! Field names follow the TimeBack / OneRoster wire format, so every struct
//! serializes in camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classify::{GradeBand, Subject};
use super::content_type::ResourceMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
}

/// Typed reference to another OneRoster entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub sourced_id: String,
    #[serde(rename = "type")]
    pub ref_type: String,
}

impl EntityRef {
    #[must_use]
    pub fn org(sourced_id: impl Into<String>) -> Self {
        Self {
            sourced_id: sourced_id.into(),
            ref_type: "org".to_string(),
        }
    }

    #[must_use]
    pub fn academic_session(sourced_id: impl Into<String>) -> Self {
        Self {
            sourced_id: sourced_id.into(),
            ref_type: "academicSession".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMetadata {
    pub original_khan_id: String,
    pub original_slug: String,
    pub icon_path: String,
    pub converted_from: String,
    pub converted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub sourced_id: String,
    pub status: Status,
    pub date_last_modified: DateTime<Utc>,
    pub title: String,
    pub course_code: String,
    pub grades: Vec<GradeBand>,
    pub subjects: Vec<Subject>,
    pub org: EntityRef,
    pub school_year: EntityRef,
    pub metadata: CourseMetadata,
}

/// Course summary embedded in a syllabus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub sourced_id: String,
    pub title: String,
    pub grades: Vec<GradeBand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syllabus {
    pub course: CourseSummary,
    pub sub_components: Vec<Component>,
}

impl Syllabus {
    /// Total resources across all components.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.sub_components
            .iter()
            .map(|component| component.component_resources.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    pub original_khan_id: String,
    pub original_slug: String,
    pub unit_type: String,
}

/// One source unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub sourced_id: String,
    pub title: String,
    pub sort_order: usize,
    /// Units are flat, so this is always empty.
    pub sub_components: Vec<Component>,
    pub component_resources: Vec<ComponentResource>,
    pub metadata: ComponentMetadata,
}

/// Position of a resource inside a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResource {
    pub sourced_id: String,
    pub title: String,
    pub sort_order: usize,
    pub resource: Resource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub sourced_id: String,
    pub status: Status,
    pub title: String,
    pub vendor_resource_id: String,
    pub metadata: ResourceMetadata,
}
