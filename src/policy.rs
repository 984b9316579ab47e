//! Declarative redaction policies, looked up by record type name. Adding a
//! new record type's rules means adding a table entry, never another branch.

use crate::unit::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Forward-compat record filter: return `false` to exclude the whole record.
pub type KeepFn = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// Prefix-substitution rule for a path-valued field that references an
/// external blob. A value starting with `match_prefix` is resolved against
/// `fetch_prefix` to find the real blob, copied under the dump directory at
/// `store_prefix`, and the field is rewritten to that new relative path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobRewrite {
    pub field: String,
    pub match_prefix: String,
    pub fetch_prefix: String,
    pub store_prefix: String,
}

/// Redaction rules for one record type.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TypePolicy {
    #[serde(default)]
    pub drop_fields: Vec<String>,
    #[serde(default)]
    pub rewrite: Option<BlobRewrite>,
    #[serde(skip)]
    pub keep: Option<KeepFn>,
}

impl TypePolicy {
    /// Policy that only strips the given fields.
    pub fn dropping<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            drop_fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_rewrite(mut self, rewrite: BlobRewrite) -> Self {
        self.rewrite = Some(rewrite);
        self
    }

    pub fn with_keep<F>(mut self, keep: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.keep = Some(Arc::new(keep));
        self
    }
}

/// The policy table: record type name -> rules. Types without an entry pass
/// through the transform untouched.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicySet(BTreeMap<String, TypePolicy>);

impl PolicySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, record_type: impl Into<String>, policy: TypePolicy) -> Self {
        self.0.insert(record_type.into(), policy);
        self
    }

    pub fn insert(&mut self, record_type: impl Into<String>, policy: TypePolicy) {
        self.0.insert(record_type.into(), policy);
    }

    pub fn get(&self, record_type: &str) -> Option<&TypePolicy> {
        self.0.get(record_type)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The original study dump's rules: `user` loses `email`,
    /// `personal_info` loses `email` and `phoneNumber`, and `food` loses
    /// `foursquare_values` while its `photoPath` blobs are pulled from
    /// `photo_source` into `photos/` under the dump directory.
    pub fn study_defaults(photo_source: impl AsRef<Path>) -> Self {
        Self::new()
            .with("user", TypePolicy::dropping(["email"]))
            .with("personal_info", TypePolicy::dropping(["email", "phoneNumber"]))
            .with(
                "food",
                TypePolicy::dropping(["foursquare_values"]).with_rewrite(BlobRewrite {
                    field: "photoPath".to_string(),
                    match_prefix: "../files/foodPhotos/".to_string(),
                    fetch_prefix: photo_source.as_ref().to_string_lossy().into_owned(),
                    store_prefix: "photos/".to_string(),
                }),
            )
    }
}
