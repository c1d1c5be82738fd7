use std::fs;

use docsync_engine::{materialize_category, CategoryDescriptor, WriteOutcome, CATEGORY_FILENAME};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn descriptor_has_canonical_shape() {
    let descriptor = CategoryDescriptor::new("Guides", "Contents of {label}");
    let value = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "label": "Guides",
            "position": 0,
            "link": {"type": "generated-index", "description": "Contents of Guides"}
        })
    );
}

#[test]
fn equal_descriptor_is_not_rewritten() {
    let temp = TempDir::new().unwrap();
    let descriptor = CategoryDescriptor::new("Guides", "Contents of {label}");

    assert_eq!(
        materialize_category(temp.path(), &descriptor).unwrap(),
        WriteOutcome::Written
    );
    assert_eq!(
        materialize_category(temp.path(), &descriptor).unwrap(),
        WriteOutcome::Unchanged
    );
}

#[test]
fn reformatted_but_equal_json_counts_as_equal() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CATEGORY_FILENAME);
    fs::write(
        &path,
        r#"{"link":{"description":"Contents of Guides","type":"generated-index"},"position":0,"label":"Guides"}"#,
    )
    .unwrap();

    let descriptor = CategoryDescriptor::new("Guides", "Contents of {label}");
    assert_eq!(
        materialize_category(temp.path(), &descriptor).unwrap(),
        WriteOutcome::Unchanged
    );
}

#[test]
fn corrupt_or_different_descriptor_is_overwritten() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CATEGORY_FILENAME);
    let descriptor = CategoryDescriptor::new("Guides", "Contents of {label}");

    fs::write(&path, "{ broken").unwrap();
    assert_eq!(
        materialize_category(temp.path(), &descriptor).unwrap(),
        WriteOutcome::Written
    );

    fs::write(&path, r#"{"label": "Old", "position": 0}"#).unwrap();
    assert_eq!(
        materialize_category(temp.path(), &descriptor).unwrap(),
        WriteOutcome::Written
    );

    let written: CategoryDescriptor =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, descriptor);
}
