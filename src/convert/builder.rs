//! Hierarchy builder: [`CourseData`] into [`Course`] and [`Syllabus`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::content_type::ContentTypeResolver;
use super::document::DocumentExt;
use super::extract::{CourseData, ITEM_CHILDREN_FIELD};
use super::ids::IdGenerator;
use super::model::{
    Component, ComponentMetadata, ComponentResource, Course, CourseMetadata, CourseSummary,
    EntityRef, Resource, Status, Syllabus,
};
use crate::config::ConversionConfig;

pub const COURSE_CODE_PREFIX: &str = "KHAN_";
pub const UNIT_TYPE: &str = "unit";

/// Counts gathered while building one course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Units in the source course.
    pub units: usize,
    /// Items found under all units.
    pub items: usize,
    /// Resources emitted.
    pub resources: usize,
    /// Items dropped for lacking a content kind and type tag.
    pub dropped_items: usize,
}

/// Result of building one course.
#[derive(Debug, Clone)]
pub struct BuiltCourse {
    pub course: Course,
    pub syllabus: Syllabus,
    pub stats: BuildStats,
}

/// Builds the output hierarchy for one conversion run.
pub struct HierarchyBuilder<'a> {
    config: &'a ConversionConfig,
    ids: &'a dyn IdGenerator,
    resolver: ContentTypeResolver,
    now: DateTime<Utc>,
}

impl<'a> HierarchyBuilder<'a> {
    /// `now` stamps `dateLastModified` and `convertedAt`.
    #[must_use]
    pub fn new(config: &'a ConversionConfig, ids: &'a dyn IdGenerator, now: DateTime<Utc>) -> Self {
        Self {
            config,
            ids,
            resolver: ContentTypeResolver::new(config.content_base_url.clone()),
            now,
        }
    }

    #[must_use]
    pub fn build(&self, data: &CourseData) -> BuiltCourse {
        let course = self.build_course(data);
        let summary_id = if self.config.link_syllabus_course {
            course.sourced_id.clone()
        } else {
            self.ids.fresh_id()
        };
        let syllabus = self.build_syllabus(data, summary_id);

        let items = data.units.iter().map(|unit| unit_items(unit).len()).sum();
        let resources = syllabus.resource_count();
        let stats = BuildStats {
            units: data.units.len(),
            items,
            resources,
            dropped_items: items - resources,
        };
        debug!(?stats, course_id = %course.sourced_id, "built course hierarchy");

        BuiltCourse {
            course,
            syllabus,
            stats,
        }
    }

    #[must_use]
    pub fn build_course(&self, data: &CourseData) -> Course {
        Course {
            sourced_id: self.ids.fresh_id(),
            status: Status::Active,
            date_last_modified: self.now,
            title: data.title.clone(),
            course_code: format!("{COURSE_CODE_PREFIX}{}", data.slug.to_uppercase()),
            grades: vec![data.grade_band],
            subjects: vec![data.subject],
            org: EntityRef::org(&self.config.org_id),
            school_year: EntityRef::academic_session(&self.config.school_year),
            metadata: CourseMetadata {
                original_khan_id: data.id.clone(),
                original_slug: data.slug.clone(),
                icon_path: data.icon_path.clone(),
                converted_from: self.config.converted_from.clone(),
                converted_at: self.now,
            },
        }
    }

    /// Build the syllabus; `summary_id` identifies its embedded course summary.
    #[must_use]
    pub fn build_syllabus(&self, data: &CourseData, summary_id: String) -> Syllabus {
        let sub_components = data
            .units
            .iter()
            .enumerate()
            .map(|(index, unit)| self.unit_to_component(unit, index))
            .collect();

        Syllabus {
            course: CourseSummary {
                sourced_id: summary_id,
                title: data.title.clone(),
                grades: vec![data.grade_band],
            },
            sub_components,
        }
    }

    fn unit_to_component(&self, unit: &Value, index: usize) -> Component {
        let title = unit
            .non_empty_str("translatedTitle")
            .map_or_else(|| format!("Unit {}", index + 1), str::to_string);

        let component_resources: Vec<ComponentResource> = unit_items(unit)
            .iter()
            .enumerate()
            .filter_map(|(position, item)| self.item_to_resource(item, position))
            .enumerate()
            .map(|(sort_order, mut resource)| {
                resource.sort_order = sort_order;
                resource
            })
            .collect();

        debug!(
            unit = index,
            title = %title,
            resources = component_resources.len(),
            "converted unit"
        );

        Component {
            sourced_id: self.ids.fresh_id(),
            title,
            sort_order: index,
            sub_components: Vec::new(),
            component_resources,
            metadata: ComponentMetadata {
                original_khan_id: unit.str_field("id").unwrap_or_default().to_string(),
                original_slug: unit.str_field("slug").unwrap_or_default().to_string(),
                unit_type: UNIT_TYPE.to_string(),
            },
        }
    }

    /// `position` is the item's index in its source list; `sort_order` is
    /// assigned afterwards over kept items only.
    fn item_to_resource(&self, item: &Value, position: usize) -> Option<ComponentResource> {
        let metadata = self.resolver.resolve(item)?;

        let title = item
            .non_empty_str("translatedTitle")
            .or_else(|| item.non_empty_str("title"))
            .map_or_else(|| format!("Content {}", position + 1), str::to_string);
        let sourced_id = self.ids.fresh_id();

        Some(ComponentResource {
            sourced_id: sourced_id.clone(),
            title: title.clone(),
            sort_order: position,
            resource: Resource {
                sourced_id,
                status: Status::Active,
                title,
                vendor_resource_id: item.str_field("id").unwrap_or_default().to_string(),
                metadata,
            },
        })
    }
}

fn unit_items(unit: &Value) -> &[Value] {
    unit.array_field(ITEM_CHILDREN_FIELD)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
