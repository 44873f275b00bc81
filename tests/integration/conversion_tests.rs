//! Library-level pipeline tests: extraction through written documents.

use serde_json::{Value, json};

use khan_timeback::config::Config;
use khan_timeback::convert::serialize::write_documents;
use khan_timeback::convert::{
    Converter, GradeBand, ResourceSubType, ResourceType, SequentialIds, ShapeKind, Subject,
};
use khan_timeback::test_utils::fixtures::{sample_course_export, wrap_course};

use crate::fixture::TestFixture;

fn converter() -> Converter {
    Converter::with_ids(Config::default(), Box::new(SequentialIds::new("it")))
}

fn pre_algebra_scenario() -> Value {
    wrap_course(json!({
        "id": "k1",
        "translatedTitle": "Pre-algebra",
        "slug": "pre-algebra",
        "unitChildren": [{
            "translatedTitle": "Unit 1",
            "allOrderedChildren": [{
                "contentKind": "video",
                "translatedTitle": "Intro Video",
                "canonicalUrl": "/v1",
                "id": "c1"
            }]
        }]
    }))
}

#[test]
fn pre_algebra_scenario_end_to_end() {
    let converted = converter().convert_value(&pre_algebra_scenario());
    let course = &converted.document.course;
    let syllabus = &converted.document.syllabus;

    assert_eq!(course.subjects, vec![Subject::Mathematics]);
    assert_eq!(course.grades, vec![GradeBand::Middle]);
    assert_eq!(course.metadata.original_khan_id, "k1");

    assert_eq!(syllabus.sub_components.len(), 1);
    let unit = &syllabus.sub_components[0];
    assert_eq!(unit.title, "Unit 1");
    assert_eq!(unit.component_resources.len(), 1);

    let resource = &unit.component_resources[0].resource;
    assert_eq!(resource.title, "Intro Video");
    assert_eq!(resource.vendor_resource_id, "c1");
    assert_eq!(resource.metadata.resource_type, ResourceType::Video);
    assert_eq!(resource.metadata.sub_type, ResourceSubType::EducationalVideo);
    assert!(resource.metadata.url.as_deref().unwrap().ends_with("/v1"));
}

#[test]
fn scenario_wire_format() {
    let converted = converter().convert_value(&pre_algebra_scenario());
    let json = serde_json::to_value(&converted.document).unwrap();

    assert_eq!(json["course"]["subjects"], json!(["mathematics"]));
    assert_eq!(json["course"]["grades"], json!(["6-8"]));
    assert_eq!(json["course"]["courseCode"], "KHAN_PRE-ALGEBRA");
    assert_eq!(json["course"]["status"], "active");
    assert_eq!(json["course"]["org"], json!({ "sourcedId": "khan-academy-converted", "type": "org" }));
    assert_eq!(
        json["course"]["schoolYear"],
        json!({ "sourcedId": "2024-2025", "type": "academicSession" })
    );
    assert_eq!(json["version"], "1.0");

    let resource = &json["syllabus"]["subComponents"][0]["componentResources"][0];
    assert_eq!(resource["sortOrder"], 0);
    assert_eq!(resource["resource"]["metadata"]["type"], "video");
    assert_eq!(resource["resource"]["metadata"]["subType"], "educational-video");
    assert_eq!(
        resource["resource"]["metadata"]["url"],
        "https://www.khanacademy.org/v1"
    );
    assert_eq!(resource["resource"]["vendorResourceId"], "c1");
}

#[test]
fn written_combined_document_matches_standalone_documents() {
    let fixture = TestFixture::new("written_combined_document_matches_standalone_documents");
    let input = fixture.add_export("pre-algebra", &sample_course_export());

    let report = converter().convert_file(&input, &fixture.output_dir).unwrap();
    let course = fixture.read_json(&report.files.course);
    let syllabus = fixture.read_json(&report.files.syllabus);
    let combined = fixture.read_json(&report.files.combined);

    assert_eq!(combined["course"], course);
    assert_eq!(combined["syllabus"], syllabus);
    assert_eq!(course["sourcedId"], report.course_id.as_str());
    assert!(combined["convertedAt"].is_string());
}

#[test]
fn output_files_are_keyed_by_course_id() {
    let fixture = TestFixture::new("output_files_are_keyed_by_course_id");
    let input = fixture.add_export("scenario", &pre_algebra_scenario());

    let report = converter().convert_file(&input, &fixture.output_dir).unwrap();
    let id = report.course_id;
    assert_eq!(
        fixture.output_files(),
        vec![
            format!("course_{id}.json"),
            format!("syllabus_{id}.json"),
            format!("timeback_course_{id}.json"),
        ]
    );
}

#[test]
fn rerun_overwrites_existing_files() {
    let fixture = TestFixture::new("rerun_overwrites_existing_files");
    let converted = converter().convert_value(&pre_algebra_scenario());

    let files = write_documents(&fixture.output_dir, &converted.document, 2).unwrap();
    std::fs::write(&files.course, "stale").unwrap();
    write_documents(&fixture.output_dir, &converted.document, 2).unwrap();

    let course = fixture.read_json(&files.course);
    assert_eq!(course["sourcedId"], converted.document.course.sourced_id.as_str());
}

#[test]
fn non_ascii_titles_survive_unescaped() {
    let fixture = TestFixture::new("non_ascii_titles_survive_unescaped");
    let export = wrap_course(json!({
        "translatedTitle": "Álgebra básica",
        "slug": "algebra-basica",
        "unitChildren": [{ "translatedTitle": "Números enteros" }]
    }));
    let input = fixture.add_export("es", &export);

    let report = converter().convert_file(&input, &fixture.output_dir).unwrap();
    let raw = std::fs::read_to_string(&report.files.combined).unwrap();
    assert!(raw.contains("Álgebra básica"));
    assert!(raw.contains("Números enteros"));
}

#[test]
fn single_unit_export_becomes_one_component() {
    let export = wrap_course(json!({
        "id": "u9",
        "translatedTitle": "Unit: Ratios",
        "slug": "ratios",
        "allOrderedChildren": [
            { "contentKind": "Exercise", "translatedTitle": "Ratio practice" },
            { "contentKind": "Article" }
        ]
    }));
    let converted = converter().convert_value(&export);

    assert_eq!(converted.shape, ShapeKind::SingleUnit);
    let components = &converted.document.syllabus.sub_components;
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].title, "Unit: Ratios");
    assert_eq!(components[0].component_resources[1].title, "Content 2");
}

#[test]
fn dropping_an_item_removes_exactly_one_resource() {
    let mut export = pre_algebra_scenario();
    items_mut(&mut export).push(json!({ "contentKind": "Exercise", "id": "c2" }));
    let before = converter().convert_value(&export).document.syllabus.resource_count();
    assert_eq!(before, 2);

    items_mut(&mut export).push(json!({ "translatedTitle": "No kind", "id": "c3" }));
    let converted = converter().convert_value(&export);
    assert_eq!(converted.document.syllabus.resource_count(), before);
    assert_eq!(converted.stats.dropped_items, 1);

    let last = items_mut(&mut export).len() - 1;
    items_mut(&mut export)[last]["contentKind"] = json!("");
    items_mut(&mut export)[last]["__typename"] = json!("");
    assert_eq!(converter().convert_value(&export).stats.dropped_items, 1);
}

fn items_mut(export: &mut Value) -> &mut Vec<Value> {
    export["data"]["contentRoute"]["listedPathData"]["course"]["unitChildren"][0]
        ["allOrderedChildren"]
        .as_array_mut()
        .unwrap()
}

#[test]
fn configured_org_and_base_url_flow_into_output() {
    let mut config = Config::default();
    config.conversion.org_id = "district-42".to_string();
    config.conversion.content_base_url = "https://mirror.example.org/".to_string();
    let converter = Converter::with_ids(config, Box::new(SequentialIds::default()));

    let converted = converter.convert_value(&pre_algebra_scenario());
    assert_eq!(converted.document.course.org.sourced_id, "district-42");
    let url = converted.document.syllabus.sub_components[0].component_resources[0]
        .resource
        .metadata
        .url
        .clone();
    assert_eq!(url.as_deref(), Some("https://mirror.example.org/v1"));
}
