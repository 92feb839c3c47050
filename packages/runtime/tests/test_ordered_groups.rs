/// Group ordering and hydration of the ordered stylesheet
use pretty_assertions::assert_eq;
use stylekit_runtime::{MemoryStyleSheet, OrderedStyleSheet};

fn marker(group: &str) -> String {
    format!("[stylesheet-group=\"{}\"]{{}}", group)
}

fn sample_sheet() -> OrderedStyleSheet {
    let mut sheet = OrderedStyleSheet::new();
    let inserts = [
        (".g99{}", 9.9),
        (".g3{}", 3.0),
        (".g1{}", 1.0),
        (".g22{}", 2.2),
        (".g4b{}", 4.0),
        (".g4a{}", 4.0),
        (".g20{}", 20.0),
        (".g10{}", 10.0),
        (".g202{}", 20.2),
    ];
    for (rule, group) in inserts {
        assert!(sheet.insert(rule, group));
    }
    sheet
}

#[test]
fn test_groups_serialize_in_numeric_order() {
    let expected = [
        marker("1"),
        ".g1{}".to_string(),
        marker("2.2"),
        ".g22{}".to_string(),
        marker("3"),
        ".g3{}".to_string(),
        marker("4"),
        ".g4a{}".to_string(),
        ".g4b{}".to_string(),
        marker("9.9"),
        ".g99{}".to_string(),
        marker("10"),
        ".g10{}".to_string(),
        marker("20"),
        ".g20{}".to_string(),
        marker("20.2"),
        ".g202{}".to_string(),
    ]
    .join("\n");

    assert_eq!(sample_sheet().text_content(), expected);
}

#[test]
fn test_live_sheet_matches_group_order() {
    let mut sheet = OrderedStyleSheet::with_sheet(Box::new(MemoryStyleSheet::new()));
    for (rule, group) in [(".c{}", 20.0), (".a{}", 1.0), (".b{}", 10.0)] {
        sheet.insert(rule, group);
    }
    assert_eq!(
        sheet.live_rules().unwrap(),
        vec![
            marker("1"),
            ".a{}".to_string(),
            marker("10"),
            ".b{}".to_string(),
            marker("20"),
            ".c{}".to_string(),
        ]
    );
}

#[test]
fn test_hydration_parity() {
    let mut original = sample_sheet();
    let rendered = original.text_content();

    let mut hydrated = OrderedStyleSheet::with_sheet(Box::new(MemoryStyleSheet::from_text(&rendered)));
    assert_eq!(hydrated.text_content(), rendered);

    original.insert(".new{}", 2.2);
    hydrated.insert(".new{}", 2.2);
    assert_eq!(hydrated.text_content(), original.text_content());
    assert_eq!(hydrated.live_rules().unwrap().len(), hydrated.len());
}

#[test]
fn test_hydration_accepts_single_quoted_markers() {
    let original = sample_sheet();
    let rendered = original.text_content().replace('"', "'");

    let mut hydrated = OrderedStyleSheet::with_sheet(Box::new(MemoryStyleSheet::from_text(&rendered)));
    assert_eq!(hydrated.text_content(), original.text_content());

    // already rendered on the server, so not inserted twice
    hydrated.insert(".g3{}", 3.0);
    assert_eq!(hydrated.text_content(), original.text_content());
}

#[test]
fn test_hydrated_insert_lands_inside_its_group() {
    let rendered = [marker("1"), ".a{}".to_string(), marker("3"), ".c{}".to_string()].join("\n");
    let mut hydrated = OrderedStyleSheet::with_sheet(Box::new(MemoryStyleSheet::from_text(&rendered)));

    hydrated.insert(".b{}", 1.0);
    hydrated.insert(".m{}", 2.0);
    assert_eq!(
        hydrated.live_rules().unwrap(),
        vec![
            marker("1"),
            ".a{}".to_string(),
            ".b{}".to_string(),
            marker("2"),
            ".m{}".to_string(),
            marker("3"),
            ".c{}".to_string(),
        ]
    );
}
