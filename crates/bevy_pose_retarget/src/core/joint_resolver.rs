//! Resolution of free-form joint-name tokens to the joints of a specific skeleton.
//!
//! Lookup happens in three tiers, and the first hit wins:
//! 1. the token lower-cased, against skeleton names lower-cased,
//! 2. the token with authoring-tool namespaces and prefixes stripped, against skeleton names
//!    stripped the same way,
//! 3. the alias table: the token is mapped to its canonical name, and the canonical name plus
//!    each of its aliases are tried in declaration order.
//!
//! No ambiguity scoring happens anywhere: a miss is simply a miss.

use std::sync::LazyLock;

use bevy::platform::collections::HashMap;
use regex::Regex;

use super::{
    aliases::JOINT_ALIASES,
    skeleton::{JointHierarchy, JointId},
};

/// Leading generator prefixes, e.g. `mixamorig`, `mixamorig1_`, `mixamorig:`.
static GENERATOR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^mixamorig\d*[_\-:]*").unwrap());

/// Trims and lower-cases a token. This is the key used for exact matches.
pub fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Drops colon-delimited namespaces and generator prefixes from an already normalized name.
pub fn strip_prefixes(normalized: &str) -> String {
    let last_segment = normalized.rsplit(':').next().unwrap_or(normalized);
    GENERATOR_PREFIX.replace(last_segment, "").into_owned()
}

/// Normalized and stripped form of a token, used to classify it and to compare tokens.
pub fn canonical_key(token: &str) -> String {
    strip_prefixes(&normalize_token(token))
}

/// [`canonical_key`] of the name the alias table lists `token` under, or of `token` itself when
/// the table does not know it. Alternate spellings classify like their canonical name.
pub fn alias_canonical_key(token: &str) -> String {
    let key = canonical_key(token);
    match canonical_entry(&key) {
        Some((canonical, _)) => canonical.to_lowercase(),
        None => key,
    }
}

/// Name index of one skeleton. Built once and kept for as long as the skeleton's joint set
/// does not change.
#[derive(Clone, Debug, Default)]
pub struct JointIndex {
    exact: HashMap<String, JointId>,
    stripped: HashMap<String, JointId>,
}

impl JointIndex {
    /// When two joints collapse to the same key, the one declared first keeps it.
    pub fn build<S: JointHierarchy + ?Sized>(skeleton: &S) -> Self {
        let mut index = Self::default();
        for id in skeleton.joint_ids() {
            let Some(name) = skeleton.joint_name(id) else {
                continue;
            };
            let normalized = normalize_token(name);
            index.stripped.entry(strip_prefixes(&normalized)).or_insert(id);
            index.exact.entry(normalized).or_insert(id);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    fn lookup(&self, normalized: &str) -> Option<JointId> {
        self.exact
            .get(normalized)
            .or_else(|| self.stripped.get(normalized))
            .copied()
    }

    /// Resolves a joint-name token, or returns `None` when nothing on the skeleton matches.
    pub fn resolve(&self, token: &str) -> Option<JointId> {
        if token.trim().is_empty() {
            return None;
        }

        let normalized = normalize_token(token);
        if let Some(id) = self.exact.get(&normalized) {
            return Some(*id);
        }

        let stripped = strip_prefixes(&normalized);
        if let Some(id) = self.lookup(&stripped) {
            return Some(id);
        }

        self.resolve_alias(&stripped)
    }

    fn resolve_alias(&self, stripped: &str) -> Option<JointId> {
        let (canonical, aliases) = canonical_entry(stripped)?;

        std::iter::once(*canonical)
            .chain(aliases.iter().copied())
            .filter(|candidate| !candidate.eq_ignore_ascii_case(stripped))
            .find_map(|candidate| self.lookup(&candidate.to_lowercase()))
    }
}

/// Alias table entry whose canonical name is `stripped`, or failing that, the first entry that
/// lists `stripped` as one of its aliases.
fn canonical_entry(stripped: &str) -> Option<&'static (&'static str, &'static [&'static str])> {
    JOINT_ALIASES
        .iter()
        .find(|(canonical, _)| canonical.eq_ignore_ascii_case(stripped))
        .or_else(|| {
            JOINT_ALIASES.iter().find(|(_, aliases)| {
                aliases
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(stripped))
            })
        })
}
