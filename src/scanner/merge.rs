//! Cross-family UAM merging.
//!
//! Implemented as a pure fold rather than in-place mutation: each family's
//! optional UAM record is folded into the accumulated feature list, and a
//! new list is returned.

use crate::schema::UamAuth;

/// Fold `incoming` into `features`. When an existing entry has the same
/// detected method, source-file lists concatenate (no dedup across
/// families; paths differ by file type), confidence takes the max and UI
/// flags union. Records never merge across different methods.
pub fn merge_by_method(
    features: Vec<UamAuth>,
    incoming: Option<UamAuth>,
) -> Vec<UamAuth> {
    let Some(incoming) = incoming else {
        return features;
    };

    let mut incoming = Some(incoming);
    let mut merged = Vec::with_capacity(features.len() + 1);

    for feature in features {
        match incoming.take() {
            Some(record) if record.method == feature.method => {
                merged.push(merge_pair(feature, record));
            }
            other => {
                incoming = other;
                merged.push(feature);
            }
        }
    }

    if let Some(record) = incoming {
        merged.push(record);
    }

    merged
}

fn merge_pair(mut base: UamAuth, other: UamAuth) -> UamAuth {
    base.source_files.extend(other.source_files);
    base.confidence = base.confidence.max(other.confidence);
    base.metadata.ui_flags =
        base.metadata.ui_flags.union(other.metadata.ui_flags);
    base.metadata
        .provider_config
        .extend(other.metadata.provider_config);
    base.metadata.provider_config.sort();
    base.metadata.provider_config.dedup();
    base
}
