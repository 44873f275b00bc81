//! Binary-level tests for the convert, inspect and classify commands.

use khan_timeback::test_utils::fixtures::{sample_course_export, sample_unit_export};

use crate::fixture::TestFixture;

#[test]
fn convert_machine_envelope_reports_each_course() {
    let fixture = TestFixture::new("convert_machine_envelope_reports_each_course");
    let input = fixture.add_export("pre-algebra", &sample_course_export());

    let output = fixture.convert(&[&input], &[]);
    assert_command_success!(output);

    let json = output.json();
    assert_eq!(json["status"], "ok");
    let report = &json["data"]["converted"][0];
    assert_eq!(report["title"], "Pre-algebra");
    assert_eq!(report["components"], 2);
    assert_eq!(report["resources"], 3);
    assert_eq!(report["dropped_items"], 1);
    assert_eq!(report["grade"], "6-8");
    assert_eq!(report["subject"], "mathematics");
    assert_eq!(report["shape"], "full_course");

    let combined = report["files"]["combined"].as_str().unwrap();
    assert_file_exists!(combined);
    assert_eq!(fixture.output_files().len(), 3);
}

#[test]
fn convert_batch_writes_every_course() {
    let fixture = TestFixture::new("convert_batch_writes_every_course");
    let a = fixture.add_export("course", &sample_course_export());
    let b = fixture.add_export("unit", &sample_unit_export());

    let output = fixture.convert(&[&a, &b], &[]);
    assert_command_success!(output);
    assert_eq!(output.json()["data"]["converted"].as_array().unwrap().len(), 2);
    assert_eq!(fixture.output_files().len(), 6);
}

#[test]
fn org_and_school_year_flags_override_config() {
    let fixture = TestFixture::new("org_and_school_year_flags_override_config");
    fixture.write_config("[conversion]\norg_id = \"from-config\"\nschool_year = \"2023-2024\"\n");
    let input = fixture.add_export("course", &sample_course_export());

    let output = fixture.convert(&[&input], &["--org-id", "district-7"]);
    assert_command_success!(output);

    let combined = output.json()["data"]["converted"][0]["files"]["combined"]
        .as_str()
        .unwrap()
        .to_string();
    let doc = fixture.read_json(combined);
    assert_eq!(doc["course"]["org"]["sourcedId"], "district-7");
    assert_eq!(doc["course"]["schoolYear"]["sourcedId"], "2023-2024");
}

#[test]
fn config_file_controls_indent_and_version() {
    let fixture = TestFixture::new("config_file_controls_indent_and_version");
    fixture.write_config("[output]\nindent = 4\nformat_version = \"1.1\"\n");
    let input = fixture.add_export("course", &sample_course_export());

    let output = fixture.convert(&[&input], &[]);
    assert_command_success!(output);

    let combined = output.json()["data"]["converted"][0]["files"]["combined"]
        .as_str()
        .unwrap()
        .to_string();
    let raw = std::fs::read_to_string(&combined).unwrap();
    assert!(raw.starts_with("{\n    \"course\""));
    assert_eq!(fixture.read_json(&combined)["version"], "1.1");
}

#[test]
fn human_convert_prints_summary() {
    let fixture = TestFixture::new("human_convert_prints_summary");
    let input = fixture.add_export("course", &sample_course_export());
    let out = fixture.output_dir.display().to_string();
    let input = input.display().to_string();

    let output = fixture.run_kt(&["convert", &input, "-o", &out]);
    assert_command_success!(output);
    assert!(output.stdout.contains("Pre-algebra"));
    assert!(output.stdout.contains("Components"));
    assert!(output.stdout.contains("mathematics"));
    assert!(output.stdout.contains("6-8"));
}

#[test]
fn inspect_writes_nothing() {
    let fixture = TestFixture::new("inspect_writes_nothing");
    let input = fixture.add_export("unit", &sample_unit_export());
    let input = input.display().to_string();

    let output = fixture.run_kt(&["-m", "inspect", &input]);
    assert_command_success!(output);

    let json = output.json();
    assert_eq!(json["data"]["shape"], "single_unit");
    assert_eq!(json["data"]["subject"], "science");
    assert_eq!(json["data"]["units"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["stats"]["resources"], 2);
    assert!(fixture.output_files().is_empty());
}

#[test]
fn classify_reports_subject_and_grade() {
    let fixture = TestFixture::new("classify_reports_subject_and_grade");
    let output = fixture.run_kt(&["-m", "classify", "intro-to-algebra2"]);
    assert_command_success!(output);

    let json = output.json();
    assert_eq!(json["data"]["subject"], "mathematics");
    assert_eq!(json["data"]["grade"], "9-12");
}
