//! # Finalizer
//!
//! Set operations on `metadata.finalizers` for the operator's own finalizer.
//! Foreign finalizers are always preserved in their original order.

use crate::constants::FINALIZER;
use kube::Resource;

/// Whether the record carries the operator finalizer
pub fn has_finalizer<K: Resource>(obj: &K) -> bool {
    obj.meta()
        .finalizers
        .as_ref()
        .is_some_and(|finalizers| finalizers.iter().any(|f| f == FINALIZER))
}

/// Finalizer list with the operator finalizer appended once
pub fn with_finalizer<K: Resource>(obj: &K) -> Vec<String> {
    let mut finalizers = obj.meta().finalizers.clone().unwrap_or_default();
    if !finalizers.iter().any(|f| f == FINALIZER) {
        finalizers.push(FINALIZER.to_string());
    }
    finalizers
}

/// Finalizer list without the operator finalizer
pub fn without_finalizer<K: Resource>(obj: &K) -> Vec<String> {
    obj.meta()
        .finalizers
        .iter()
        .flatten()
        .filter(|f| *f != FINALIZER)
        .cloned()
        .collect()
}
