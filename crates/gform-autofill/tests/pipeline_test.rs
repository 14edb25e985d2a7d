//! Offline pipeline tests: page HTML through to an encoded payload.

use std::collections::HashSet;

use gform_autofill::{
    build_payload, extract_schema, interpret_schema, FieldType, FillerConfig, FirstOptionFill,
    FormIdentity, RandomFill,
};

/// Non-public id, a duplicated entry id, a grid, checkboxes, a blank
/// "Other" option, and email collection.
const SCHEMA: &str = r#"[null, ["Poll", [
    [1, "Name", null, 0, [[201, null, 1]]],
    [2, "Name again", null, 0, [[201, null, 0]]],
    [3, "Fruit", null, 4, [[202, [["Apple"], ["Pear"], ["Plum"], [""]], 1]]],
    [4, "Rate", null, 7, [[203, [["1"], ["2"]], 1, ["Taste"]],
                          [204, [["1"], ["2"]], 0, ["Price"]]]],
    [5, "Size", null, 3, [[205, [["S"], ["M"], ["L"]], 0]]],
    [6, "Section", null, 8, null],
    [7, "Banner", null, 6, null]
], null, null, null, null, null, null, null, null,
[null, null, null, null, null, null, 2]], "/forms", "Poll",
null, null, null, null, null, null, null, null, null, null,
"abcdefXYZ", null, null, null, null, "-42"]"#;

fn page() -> String {
    format!(
        "<html><body><script>var FB_PUBLIC_LOAD_DATA_ = {SCHEMA};\n</script></body></html>"
    )
}

#[test]
fn test_fields_are_unique_and_required_is_subset() {
    let raw = extract_schema(&page()).unwrap();
    let all = interpret_schema(&raw, false);
    let required = interpret_schema(&raw, true);

    let ids: Vec<&str> = all.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["201", "202", "203", "204", "205", "emailAddress"]);
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());

    let all_ids: HashSet<&str> = ids.iter().copied().collect();
    for field in &required {
        assert!(field.required);
        assert!(all_ids.contains(field.id.as_str()));
    }
    let required_ids: Vec<&str> = required.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(required_ids, vec!["201", "202", "203", "emailAddress"]);

    let fruit = &all[1];
    assert_eq!(fruit.field_type, FieldType::Checkboxes);
    assert_eq!(fruit.options, vec!["Apple", "Pear", "Plum"]);
    assert!(fruit.accepts_other);
    assert_eq!(all[2].row.as_deref(), Some("Taste"));
}

#[test]
fn test_random_payload_stays_within_options() {
    let raw = extract_schema(&page()).unwrap();
    let fields = interpret_schema(&raw, false);
    let identity = FormIdentity::from_schema(&raw);
    let strategy = RandomFill::new(&FillerConfig::default());

    for _ in 0..20 {
        let payload = build_payload(&fields, &identity, &strategy);

        let fruit = payload.get("entry.202").unwrap();
        assert!(!fruit.is_empty());
        let distinct: HashSet<&String> = fruit.iter().collect();
        assert_eq!(distinct.len(), fruit.len());
        for value in fruit {
            assert!(["Apple", "Pear", "Plum"].contains(&value.as_str()));
        }

        if let Some(size) = payload.get("entry.205") {
            assert_eq!(size.len(), 1);
            assert!(["S", "M", "L"].contains(&size[0].as_str()));
        }

        assert_eq!(payload.get("fbzx"), Some(&["-42".to_string()][..]));
        assert_eq!(payload.get("pageHistory"), Some(&["0".to_string()][..]));
    }
}

#[test]
fn test_first_option_payload_encoding() {
    let raw = extract_schema(&page()).unwrap();
    let fields = interpret_schema(&raw, true);
    let identity = FormIdentity::from_schema(&raw);
    let strategy = FirstOptionFill::new(&FillerConfig::default().with_email("me@example.com"));

    let encoded = build_payload(&fields, &identity, &strategy).encode();
    assert_eq!(
        encoded,
        "entry.201=Ok%21&entry.202=Apple&entry.203=1&emailAddress=me%40example.com\
         &fbzx=-42&fvv=1&draftResponse=%5B%5D&pageHistory=0"
    );
}
