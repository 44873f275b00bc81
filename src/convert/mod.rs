//! Khan Academy export to TimeBack conversion.
//!
//! The pipeline runs in four stages:
//! 1. [`extract`] locates the course node and normalizes it into [`CourseData`]
//! 2. [`classify`] tags the course with a subject and grade band from its slug
//! 3. [`builder`] turns units into components and items into resources
//! 4. [`serialize`] writes the course, syllabus and combined documents
//!
//! [`Converter`] runs all four for one file or a batch.

pub mod builder;
pub mod classify;
pub mod content_type;
pub mod converter;
pub mod document;
pub mod extract;
pub mod ids;
pub mod model;
pub mod serialize;

pub use builder::{BuildStats, BuiltCourse, HierarchyBuilder};
pub use classify::{GradeBand, Subject, classify_grade, classify_subject};
pub use content_type::{ContentTypeResolver, ResourceMetadata, ResourceSubType, ResourceType};
pub use converter::{BatchOutcome, ConversionReport, Converted, Converter};
pub use extract::{CourseData, ShapeKind, extract_course_data};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use model::{Component, ComponentResource, Course, Resource, Syllabus};
pub use serialize::{CombinedDocument, OutputFiles};
