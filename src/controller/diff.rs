//! # Diff
//!
//! Decides whether the remote object has drifted from the translated payload.
//!
//! Both sides are compared as JSON after removing fields Nexus computes on its
//! own: volatile keys at any depth, plus a per-kind list of top-level keys the
//! remote echoes back (for example the privilege `type`). A key holding `null`
//! counts as absent. Everything else, including list order, must match.

use serde_json::{Map, Value};

/// Keys Nexus rewrites on every read, removed at any depth
pub const VOLATILE_KEYS: [&str; 5] = [
    "lastUpdated",
    "taskId",
    "url",
    "checksum",
    "contentDisposition",
];

/// Per-kind comparison rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffRule {
    /// Top-level keys owned by the server for this kind
    pub derived_keys: &'static [&'static str],
}

impl DiffRule {
    pub const fn new(derived_keys: &'static [&'static str]) -> Self {
        Self { derived_keys }
    }

    /// `true` when `current` must be overwritten with `desired`
    pub fn needs_update(&self, desired: &Value, current: &Value) -> bool {
        self.normalize(desired) != self.normalize(current)
    }

    fn normalize(&self, value: &Value) -> Value {
        let mut normalized = strip_volatile(value);
        if let Value::Object(map) = &mut normalized {
            for key in self.derived_keys {
                map.remove(*key);
            }
        }
        normalized
    }
}

fn strip_volatile(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, value)| !value.is_null() && !VOLATILE_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), strip_volatile(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_volatile).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PLAIN: DiffRule = DiffRule::new(&[]);
    const PRIVILEGE: DiffRule = DiffRule::new(&["readOnly", "type", "id"]);

    fn repository() -> Value {
        json!({
            "name": "r1",
            "online": true,
            "storage": {"blobStoreName": "default", "strictContentTypeValidation": true, "writePolicy": "ALLOW"},
            "group": {"memberNames": ["a", "b"]}
        })
    }

    #[test]
    fn test_identical_payloads_need_no_update() {
        assert!(!PLAIN.needs_update(&repository(), &repository()));
    }

    #[test]
    fn test_volatile_fields_are_ignored_at_any_depth() {
        let mut current = repository();
        current["lastUpdated"] = json!("2024-01-01T00:00:00Z");
        current["url"] = json!("http://nexus/repository/r1");
        current["storage"]["taskId"] = json!("abc");
        current["group"]["checksum"] = json!("sha1");
        current["raw"] = json!({"contentDisposition": "ATTACHMENT"});

        let mut desired = repository();
        desired["raw"] = json!({"contentDisposition": "INLINE"});
        assert!(!PLAIN.needs_update(&desired, &current));
    }

    #[test]
    fn test_changing_only_volatile_fields_never_needs_update() {
        let mut before = repository();
        before["lastUpdated"] = json!("t1");
        let mut after = repository();
        after["lastUpdated"] = json!("t2");
        after["storage"]["checksum"] = json!("other");
        assert!(!PLAIN.needs_update(&before, &after));
    }

    #[test]
    fn test_real_changes_are_detected() {
        let desired = repository();

        let mut changed_scalar = repository();
        changed_scalar["online"] = json!(false);
        assert!(PLAIN.needs_update(&desired, &changed_scalar));

        let mut nested = repository();
        nested["storage"]["writePolicy"] = json!("DENY");
        assert!(PLAIN.needs_update(&desired, &nested));

        let mut added = repository();
        added["cleanup"] = json!({"policyNames": ["weekly"]});
        assert!(PLAIN.needs_update(&desired, &added));

        let mut removed = repository();
        removed.as_object_mut().unwrap().remove("group");
        assert!(PLAIN.needs_update(&desired, &removed));
    }

    #[test]
    fn test_list_order_matters() {
        let mut reordered = repository();
        reordered["group"]["memberNames"] = json!(["b", "a"]);
        assert!(PLAIN.needs_update(&repository(), &reordered));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let mut current = repository();
        current["dockerProxy"] = json!({"indexType": "REGISTRY", "indexUrl": null});
        let mut desired = repository();
        desired["dockerProxy"] = json!({"indexType": "REGISTRY"});
        assert!(!PLAIN.needs_update(&desired, &current));
    }

    #[test]
    fn test_derived_keys_only_ignored_for_their_kind() {
        let desired = json!({"name": "p1", "description": "d", "type": "wildcard", "pattern": "nexus:*"});
        let current = json!({
            "name": "p1",
            "description": "d",
            "type": "wildcard",
            "pattern": "nexus:*",
            "readOnly": false,
            "id": "p1"
        });
        assert!(!PRIVILEGE.needs_update(&desired, &current));
        assert!(PLAIN.needs_update(&desired, &current));
    }

    #[test]
    fn test_derived_keys_are_top_level_only() {
        let desired = json!({"name": "p1", "nested": {"id": 1}});
        let current = json!({"name": "p1", "nested": {"id": 2}});
        assert!(PRIVILEGE.needs_update(&desired, &current));
    }
}
