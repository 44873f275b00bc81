use proptest::prelude::*;
use serde_json::{Value, json};

use khan_timeback::config::ConversionConfig;
use khan_timeback::convert::builder::HierarchyBuilder;
use khan_timeback::convert::{
    ContentTypeResolver, ResourceSubType, ResourceType, SequentialIds, classify_grade,
    classify_subject, extract_course_data,
};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 _-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![
                    Just("data".to_string()),
                    Just("contentRoute".to_string()),
                    Just("listedPathData".to_string()),
                    Just("course".to_string()),
                    Just("unitChildren".to_string()),
                    Just("allOrderedChildren".to_string()),
                    Just("slug".to_string()),
                    "[a-z]{1,8}",
                ],
                inner,
                0..6,
            )
            .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn arb_item() -> impl Strategy<Value = Value> {
    (
        prop::option::of(prop_oneof![
            Just("Video"),
            Just("Exercise"),
            Just("Article"),
            Just("Quiz"),
            Just("Podcast"),
            Just(""),
        ]),
        prop::option::of("[a-z ]{0,10}"),
    )
        .prop_map(|(kind, title)| {
            let mut item = json!({ "id": "item" });
            if let Some(kind) = kind {
                item["contentKind"] = json!(kind);
            }
            if let Some(title) = title {
                item["translatedTitle"] = json!(title);
            }
            item
        })
}

fn course_with_units(units: Vec<Vec<Value>>) -> Value {
    let units: Vec<Value> = units
        .into_iter()
        .map(|items| json!({ "allOrderedChildren": items }))
        .collect();
    json!({ "data": { "contentRoute": { "listedPathData": { "course": {
        "slug": "pre-algebra",
        "unitChildren": units
    } } } } })
}

proptest! {
    #[test]
    fn extraction_is_total(doc in arb_json()) {
        let ids = SequentialIds::default();
        let data = extract_course_data(&doc, &ids);
        prop_assert!(!data.title.is_empty());
        prop_assert!(!data.slug.is_empty());
        prop_assert!(!data.id.is_empty());
    }

    #[test]
    fn classifiers_are_total(slug in ".{0,40}") {
        let _ = classify_subject(&slug);
        let _ = classify_grade(&slug);
    }

    #[test]
    fn units_map_to_ordered_components(units in prop::collection::vec(prop::collection::vec(arb_item(), 0..5), 0..8)) {
        let config = ConversionConfig::default();
        let ids = SequentialIds::default();
        let unit_count = units.len();
        let kept: Vec<usize> = units
            .iter()
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item["contentKind"].as_str().is_some_and(|k| !k.is_empty()))
                    .count()
            })
            .collect();

        let data = extract_course_data(&course_with_units(units), &ids);
        let built = HierarchyBuilder::new(&config, &ids, chrono::Utc::now()).build(&data);

        let components = &built.syllabus.sub_components;
        prop_assert_eq!(components.len(), unit_count);
        for (i, component) in components.iter().enumerate() {
            prop_assert_eq!(component.sort_order, i);
            prop_assert_eq!(component.component_resources.len(), kept[i]);
            for (j, resource) in component.component_resources.iter().enumerate() {
                prop_assert_eq!(resource.sort_order, j);
                prop_assert!(!resource.title.is_empty());
            }
        }
        prop_assert_eq!(built.stats.resources + built.stats.dropped_items, built.stats.items);
    }

    #[test]
    fn resolver_is_deterministic(item in arb_item()) {
        let resolver = ContentTypeResolver::new("https://www.khanacademy.org");
        prop_assert_eq!(resolver.resolve(&item), resolver.resolve(&item));
    }

    #[test]
    fn unknown_kinds_are_general_content(kind in "[a-z]{3,12}") {
        prop_assume!(!["video", "exercise", "article", "quiz", "topicquiz"].contains(&kind.as_str()));
        let resolver = ContentTypeResolver::new("https://www.khanacademy.org");
        let meta = resolver.resolve(&json!({ "contentKind": kind })).unwrap();
        prop_assert_eq!(meta.resource_type, ResourceType::Text);
        prop_assert_eq!(meta.sub_type, ResourceSubType::GeneralContent);
    }
}
