#[path = "common/mod.rs"]
mod common;

use common::*;
use rowdump::{
    apply_policy, BlobRewrite, DumpError, FsRelocator, PolicySet, TransformCtx, TypePolicy,
};
use serde_json::json;
use std::fs;

fn ctx<'a>(dump_dir: &'a std::path::Path, relocator: &'a FsRelocator) -> TransformCtx<'a> {
    TransformCtx {
        dump_dir,
        relocator,
    }
}

#[test]
fn no_policy_passes_record_through_unchanged() {
    let (_td, dir) = tempdir_path();
    let relocator = FsRelocator;
    let record = rec(json!({"user_id": 1, "email": "ann@example.com"}));

    let out = apply_policy(&PolicySet::new(), "user_raw", record.clone(), &ctx(&dir, &relocator))
        .unwrap()
        .unwrap();
    assert_eq!(out, record);
}

#[test]
fn drop_fields_removes_present_and_tolerates_absent() {
    let (_td, dir) = tempdir_path();
    let relocator = FsRelocator;
    let policies = PolicySet::new().with(
        "personal_info",
        TypePolicy::dropping(["email", "phoneNumber"]),
    );

    // `phoneNumber` is absent here; that must not be an error.
    let record = rec(json!({"user_id": 1, "email": "ann@example.com", "city": "Seattle"}));
    let out = apply_policy(&policies, "personal_info", record, &ctx(&dir, &relocator))
        .unwrap()
        .unwrap();

    assert!(out.get("email").is_none());
    assert_eq!(out.get("city"), Some(&json!("Seattle")));
}

/// Dropping a middle field must not shuffle the remaining column order.
#[test]
fn drop_fields_preserves_field_order() {
    let (_td, dir) = tempdir_path();
    let relocator = FsRelocator;
    let policies = PolicySet::new().with("user", TypePolicy::dropping(["email"]));

    let record = rec(json!({"user_id": 1, "email": "x@example.com", "name": "ann", "joined": 2020}));
    let out = apply_policy(&policies, "user", record, &ctx(&dir, &relocator))
        .unwrap()
        .unwrap();
    let keys: Vec<&str> = out.keys().map(String::as_str).collect();
    assert_eq!(keys, ["user_id", "name", "joined"]);
}

#[test]
fn keep_predicate_can_exclude_whole_record() {
    let (_td, dir) = tempdir_path();
    let relocator = FsRelocator;
    let policies = PolicySet::new().with(
        "event",
        TypePolicy::default().with_keep(|r| r.get("kind") != Some(&json!("internal"))),
    );

    let kept = apply_policy(
        &policies,
        "event",
        rec(json!({"kind": "public"})),
        &ctx(&dir, &relocator),
    )
    .unwrap();
    assert!(kept.is_some());

    let excluded = apply_policy(
        &policies,
        "event",
        rec(json!({"kind": "internal"})),
        &ctx(&dir, &relocator),
    )
    .unwrap();
    assert!(excluded.is_none());
}

#[test]
fn rewrite_relocates_blob_and_rewrites_path() {
    let (_td, root) = tempdir_path();
    let server = root.join("server_photos");
    write_server_photos(&server);
    let dump_dir = root.join("dump");
    fs::create_dir_all(&dump_dir).unwrap();

    let relocator = FsRelocator;
    let policies = PolicySet::study_defaults(&server);

    let record = rec(json!({
        "user_id": 1,
        "photoPath": "../files/foodPhotos/a.jpg",
        "foursquare_values": "opaque-blob"
    }));
    let out = apply_policy(&policies, "food", record, &ctx(&dump_dir, &relocator))
        .unwrap()
        .unwrap();

    assert_eq!(out.get("photoPath"), Some(&json!("photos/a.jpg")));
    assert!(out.get("foursquare_values").is_none());
    assert_eq!(
        fs::read(dump_dir.join("photos/a.jpg")).unwrap(),
        b"jpeg-a"
    );
}

/// Null or non-matching paths are left alone and nothing is copied.
#[test]
fn rewrite_skips_null_and_foreign_prefixes() {
    let (_td, root) = tempdir_path();
    let server = root.join("server_photos");
    write_server_photos(&server);
    let dump_dir = root.join("dump");
    fs::create_dir_all(&dump_dir).unwrap();

    let relocator = FsRelocator;
    let policies = PolicySet::study_defaults(&server);

    let out = apply_policy(
        &policies,
        "food",
        rec(json!({"user_id": 1, "photoPath": null})),
        &ctx(&dump_dir, &relocator),
    )
    .unwrap()
    .unwrap();
    assert_eq!(out.get("photoPath"), Some(&serde_json::Value::Null));

    let out = apply_policy(
        &policies,
        "food",
        rec(json!({"user_id": 1, "photoPath": "/absolute/elsewhere.jpg"})),
        &ctx(&dump_dir, &relocator),
    )
    .unwrap()
    .unwrap();
    assert_eq!(out.get("photoPath"), Some(&json!("/absolute/elsewhere.jpg")));
    assert!(!dump_dir.join("photos").exists());
}

#[test]
fn missing_blob_is_a_relocation_error() {
    let (_td, root) = tempdir_path();
    let server = root.join("server_photos");
    fs::create_dir_all(&server).unwrap(); // no photo files inside
    let dump_dir = root.join("dump");
    fs::create_dir_all(&dump_dir).unwrap();

    let relocator = FsRelocator;
    let policies = PolicySet::study_defaults(&server);

    let err = apply_policy(
        &policies,
        "food",
        rec(json!({"user_id": 1, "photoPath": "../files/foodPhotos/missing.jpg"})),
        &ctx(&dump_dir, &relocator),
    )
    .unwrap_err();
    assert!(matches!(err, DumpError::Relocation { .. }));
}
