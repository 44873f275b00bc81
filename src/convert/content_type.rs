//! Resolution of content-graph items into normalized resource descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::DocumentExt;

/// Normalized resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    Video,
    QtiAssessment,
    Text,
}

/// Normalized resource sub-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceSubType {
    EducationalVideo,
    QtiTest,
    QtiQuiz,
    Article,
    GeneralContent,
}

/// Ordered dispatch table: the first row whose labels contain either the
/// item's content kind or its type tag wins.
pub const CONTENT_RULES: &[(&[&str], ResourceType, ResourceSubType)] = &[
    (&["video"], ResourceType::Video, ResourceSubType::EducationalVideo),
    (&["exercise"], ResourceType::QtiAssessment, ResourceSubType::QtiTest),
    (&["article"], ResourceType::Text, ResourceSubType::Article),
    (
        &["quiz", "topicquiz", "topic-quiz"],
        ResourceType::QtiAssessment,
        ResourceSubType::QtiQuiz,
    ),
];

pub const FALLBACK_KIND: (ResourceType, ResourceSubType) =
    (ResourceType::Text, ResourceSubType::GeneralContent);

/// Item field holding the content kind ("Video", "Exercise", ...).
pub const KIND_FIELD: &str = "contentKind";
/// Item field holding the GraphQL type tag.
pub const TYPE_TAG_FIELD: &str = "__typename";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedDuration {
    pub lower_bound: u64,
    pub upper_bound: u64,
}

/// Metadata block attached to every converted resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    pub original_khan_type: String,
    pub original_khan_id: String,
    pub description: String,
    pub canonical_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<EstimatedDuration>,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub sub_type: ResourceSubType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Maps raw items to [`ResourceMetadata`].
#[derive(Debug, Clone)]
pub struct ContentTypeResolver {
    content_base_url: String,
}

impl ContentTypeResolver {
    #[must_use]
    pub fn new(content_base_url: impl Into<String>) -> Self {
        let content_base_url: String = content_base_url.into();
        Self {
            content_base_url: content_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve one item, or `None` when it carries neither a content kind nor
    /// a type tag.
    #[must_use]
    pub fn resolve(&self, item: &Value) -> Option<ResourceMetadata> {
        let kind = item.non_empty_str(KIND_FIELD).map(str::to_lowercase);
        let type_tag = item.non_empty_str(TYPE_TAG_FIELD).map(str::to_lowercase);
        if kind.is_none() && type_tag.is_none() {
            return None;
        }

        let (resource_type, sub_type) = classify_kind(kind.as_deref(), type_tag.as_deref());
        let canonical_url = item.str_field("canonicalUrl").unwrap_or_default().to_string();
        let url = (!canonical_url.is_empty()).then(|| self.absolute_url(&canonical_url));

        let estimated_duration = item.field("timeEstimate").filter(|v| v.is_object()).map(|est| {
            EstimatedDuration {
                lower_bound: est.count_field("lowerBound").unwrap_or(0),
                upper_bound: est.count_field("upperBound").unwrap_or(0),
            }
        });

        Some(ResourceMetadata {
            original_khan_type: kind.or(type_tag).unwrap_or_default(),
            original_khan_id: item.str_field("id").unwrap_or_default().to_string(),
            description: item
                .str_field("translatedDescription")
                .unwrap_or_default()
                .to_string(),
            canonical_url,
            estimated_duration,
            resource_type,
            sub_type,
            url,
        })
    }

    fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.content_base_url)
        } else {
            format!("{}/{path}", self.content_base_url)
        }
    }
}

fn classify_kind(kind: Option<&str>, type_tag: Option<&str>) -> (ResourceType, ResourceSubType) {
    CONTENT_RULES
        .iter()
        .find(|(labels, _, _)| {
            labels
                .iter()
                .any(|label| kind == Some(*label) || type_tag == Some(*label))
        })
        .map_or(FALLBACK_KIND, |(_, resource_type, sub_type)| {
            (*resource_type, *sub_type)
        })
}
