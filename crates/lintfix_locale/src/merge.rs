use serde::Serialize;
use serde_json::{Map, Value};

/// Counts of leaf values touched by a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Leaves that did not exist in the target
    pub added: usize,
    /// Differing leaves replaced because overwriting was requested
    pub overwritten: usize,
    /// Differing leaves left alone
    pub kept: usize,
}

impl MergeStats {
    pub fn changed(&self) -> bool {
        self.added > 0 || self.overwritten > 0
    }

    pub fn absorb(&mut self, other: MergeStats) {
        self.added += other.added;
        self.overwritten += other.overwritten;
        self.kept += other.kept;
    }
}

fn count_leaves(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.values().map(count_leaves).sum(),
        _ => 1,
    }
}

/// Deep-merge `patch` into `target`.
///
/// Objects merge key by key. Keys missing from `target` are appended after its existing
/// keys, in patch order. Where both sides hold different non-object values the target's
/// value wins unless `overwrite` is set.
pub fn merge_into(
    target: &mut Map<String, Value>,
    patch: &Map<String, Value>,
    overwrite: bool,
) -> MergeStats {
    let mut stats = MergeStats::default();

    for (key, incoming) in patch {
        match target.get_mut(key) {
            None => {
                stats.added += count_leaves(incoming);
                target.insert(key.clone(), incoming.clone());
            }
            Some(Value::Object(existing)) if incoming.is_object() => {
                if let Value::Object(nested) = incoming {
                    stats.absorb(merge_into(existing, nested, overwrite));
                }
            }
            Some(existing) if existing == incoming => {}
            Some(existing) => {
                if overwrite {
                    stats.overwritten += 1;
                    *existing = incoming.clone();
                } else {
                    stats.kept += 1;
                }
            }
        }
    }

    stats
}
