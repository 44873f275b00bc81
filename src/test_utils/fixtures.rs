use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;

/// Test fixture providing isolated filesystem environment.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl UnitTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {:?}", data_path);

        Self { temp_dir, data_path }
    }

    /// Create a test file with content.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    /// Write `export` as a JSON input file.
    pub fn create_export(&self, name: &str, export: &Value) -> PathBuf {
        let body = serde_json::to_string_pretty(export).expect("Failed to encode export");
        self.create_file(&format!("exports/{name}.json"), &body)
    }
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.data_path);
    }
}

/// Wrap a course node in the `contentRoute` envelope.
pub fn wrap_course(course: Value) -> Value {
    json!({ "data": { "contentRoute": { "listedPathData": { "course": course } } } })
}

/// Two-unit pre-algebra course. Three of its four items carry a content kind.
pub fn sample_course_export() -> Value {
    wrap_course(json!({
        "id": "x7c1e",
        "translatedTitle": "Pre-algebra",
        "translatedDescription": "Factors, fractions and ratios.",
        "slug": "pre-algebra",
        "iconPath": "/images/pre-algebra.svg",
        "unitChildren": [
            {
                "id": "u1",
                "slug": "factors-multiples",
                "translatedTitle": "Factors and multiples",
                "allOrderedChildren": [
                    {
                        "id": "v1",
                        "contentKind": "Video",
                        "translatedTitle": "Understanding factor pairs",
                        "canonicalUrl": "/math/pre-algebra/v/factor-pairs",
                        "timeEstimate": { "lowerBound": 4, "upperBound": 6 }
                    },
                    {
                        "id": "e1",
                        "contentKind": "Exercise",
                        "translatedTitle": "Find factors",
                        "canonicalUrl": "/math/pre-algebra/e/find-factors"
                    }
                ]
            },
            {
                "id": "u2",
                "slug": "ratios",
                "translatedTitle": "Ratios",
                "allOrderedChildren": [
                    { "id": "orphan", "translatedTitle": "Unlabelled item" },
                    {
                        "id": "q1",
                        "__typename": "TopicQuiz",
                        "translatedTitle": "Quiz 1"
                    }
                ]
            }
        ]
    }))
}

/// Single-unit response: items sit directly on the course node.
pub fn sample_unit_export() -> Value {
    wrap_course(json!({
        "id": "unit-42",
        "translatedTitle": "Unit: Chemical reactions",
        "slug": "chemistry-reactions",
        "allOrderedChildren": [
            { "id": "a1", "contentKind": "Article", "translatedTitle": "Balancing equations" },
            { "id": "v2", "contentKind": "Video", "title": "Combustion" }
        ]
    }))
}
