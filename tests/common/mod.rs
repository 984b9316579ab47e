use rowdump::{write_unit, MemorySource, OutputUnit, Record};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Build a `Record` from a `json!` object literal.
#[allow(dead_code)]
pub fn rec(v: Value) -> Record {
    v.as_object().unwrap().clone()
}

/// In-memory source mirroring a tiny study database:
/// - `users`: 2 rows with `email` to redact
/// - `personal_info`: 2 rows with `email` and `phoneNumber` to redact
/// - `foodPhotos`: 3 rows, two with blob-referencing `photoPath`, one null
/// - `motion`: 250 rows for pagination scenarios (user_id alternates 1/2)
#[allow(dead_code)]
pub fn study_source() -> MemorySource {
    let mut src = MemorySource::new();
    src.add_table(
        "users",
        ["user_id", "name", "email"],
        vec![
            vec![json!(1), json!("ann"), json!("ann@example.com")],
            vec![json!(2), json!("ben"), json!("ben@example.com")],
        ],
    );
    src.add_table(
        "personal_info",
        ["user_id", "email", "phoneNumber", "city"],
        vec![
            vec![json!(1), json!("ann@example.com"), json!("555-0001"), json!("Seattle")],
            vec![json!(2), json!("ben@example.com"), json!("555-0002"), json!("Portland")],
        ],
    );
    src.add_table(
        "foodPhotos",
        ["user_id", "photoPath", "foursquare_values", "note"],
        vec![
            vec![json!(1), json!("../files/foodPhotos/a.jpg"), json!("opaque-blob"), json!("lunch")],
            vec![json!(2), json!("../files/foodPhotos/b.jpg"), json!("opaque-blob"), json!("dinner")],
            vec![json!(1), Value::Null, json!("opaque-blob"), json!("snack")],
        ],
    );
    src.add_table(
        "motion",
        ["user_id", "reading"],
        (0..250)
            .map(|i| vec![json!(i % 2 + 1), json!(i)])
            .collect(),
    );
    src
}

/// Create the photo files the `foodPhotos` rows reference, under `dir`.
#[allow(dead_code)]
pub fn write_server_photos(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("a.jpg"), b"jpeg-a").unwrap();
    fs::write(dir.join("b.jpg"), b"jpeg-b").unwrap();
}

/// Write the analysis-phase fixture from the spec scenarios into `dir`:
/// - `user_0000.json`: users 1 and 2
/// - `photo_0000.json`: records for users 1, 1, 2
/// - `calendar_0000.json`: one record for user 2 only
/// - `summary_0000.json`: an aggregate type with no `user_id` field
#[allow(dead_code)]
pub fn write_analysis_fixture(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    let unit = |record_type: &str, records: Vec<Value>| OutputUnit {
        record_type: record_type.to_string(),
        records: records.into_iter().map(rec).collect(),
    };
    write_unit(
        dir,
        &unit(
            "user",
            vec![
                json!({"user_id": 1, "name": "ann"}),
                json!({"user_id": 2, "name": "ben"}),
            ],
        ),
        0,
    )
    .unwrap();
    write_unit(
        dir,
        &unit(
            "photo",
            vec![
                json!({"user_id": 1, "photoPath": "photos/a.jpg"}),
                json!({"user_id": 1, "photoPath": "photos/c.jpg"}),
                json!({"user_id": 2, "photoPath": "photos/b.jpg"}),
            ],
        ),
        0,
    )
    .unwrap();
    write_unit(
        dir,
        &unit("calendar", vec![json!({"user_id": 2, "event": "standup"})]),
        0,
    )
    .unwrap();
    write_unit(
        dir,
        &unit("summary", vec![json!({"total": 6})]),
        0,
    )
    .unwrap();
}

/// Fresh tempdir kept alive for the test's duration.
#[allow(dead_code)]
pub fn tempdir_path() -> (tempfile::TempDir, PathBuf) {
    let td = tempfile::tempdir().unwrap();
    let p = td.path().to_path_buf();
    (td, p)
}
