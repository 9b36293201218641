//! Pose sources: joint-name tokens mapped to raw orientation components, plus metadata
//! describing the convention they were authored in.
//!
//! The wire format is a loosely typed JSON document:
//!
//! ```json
//! {
//!     "meta": {
//!         "type": "Hands",
//!         "source": "Laoli_Native",
//!         "side": "Right",
//!         "targetSide": "Left",
//!         "root_correction": [0.0, 0.0, 0.0, 1.0]
//!     },
//!     "body": {
//!         "RightHandIndex1": { "q": [0.0, 0.0, 0.0, 1.0] }
//!     }
//! }
//! ```
//!
//! Every `meta` field is optional. Entries whose orientation is not exactly four numbers are
//! skipped while parsing.

use std::{fs::File, io::BufReader, path::Path};

use bevy::{
    log::debug,
    math::Quat,
    reflect::{Reflect, std_traits::ReflectDefault},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::{
    classification::Side,
    errors::{PoseSourceError, PoseSourceResult},
};

/// Source kind written by [`capture_pose`](super::capture::capture_pose).
pub const NATIVE_SOURCE_NAME: &str = "Laoli_Native";

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[reflect(Default)]
pub enum SourceKind {
    /// Authored in another convention; needs basis conversion and bind-relative deltas.
    #[default]
    Foreign,
    /// Already expressed as local orientations of the target rig.
    Native,
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[reflect(Default)]
pub enum PoseKind {
    #[default]
    FullBody,
    /// A subset of joints, typically one hand.
    Partial,
}

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
#[reflect(Default)]
pub struct PoseMeta {
    pub source_kind: SourceKind,
    pub pose_kind: PoseKind,
    /// Side the pose was authored for.
    pub side: Option<Side>,
    /// Side the pose should be applied to.
    pub target_side: Option<Side>,
    /// Compensation for camera-relative capture of the root joint, `x, y, z, w`.
    pub root_correction: Option<[f32; 4]>,
}

impl PoseMeta {
    pub fn root_correction_quat(&self) -> Option<Quat> {
        self.root_correction
            .map(|[x, y, z, w]| Quat::from_xyzw(x, y, z, w))
    }
}

/// One retargeting input. Joint order is preserved from the source document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseSource {
    pub meta: PoseMeta,
    joints: IndexMap<String, [f32; 4]>,
}

impl PoseSource {
    pub fn new(meta: PoseMeta) -> Self {
        Self {
            meta,
            joints: IndexMap::new(),
        }
    }

    /// Adds or replaces the orientation for `token`. Components are stored as given; their
    /// order is interpreted when the pose is applied.
    pub fn insert(&mut self, token: impl Into<String>, components: [f32; 4]) {
        self.joints.insert(token.into(), components);
    }

    pub fn with_joint(mut self, token: impl Into<String>, components: [f32; 4]) -> Self {
        self.insert(token, components);
        self
    }

    pub fn joints(&self) -> impl Iterator<Item = (&str, &[f32; 4])> {
        self.joints.iter().map(|(token, q)| (token.as_str(), q))
    }

    pub fn get(&self, token: &str) -> Option<&[f32; 4]> {
        self.joints.get(token)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Adds every joint of `other`, replacing joints with the same token. `other`'s metadata is
    /// ignored.
    pub fn merge(&mut self, other: &PoseSource) {
        for (token, q) in &other.joints {
            self.joints.insert(token.clone(), *q);
        }
    }

    /// `(authored side, target side)` when this is a partial pose that must be applied to the
    /// other side of the body.
    pub fn mirror_sides(&self) -> Option<(Side, Side)> {
        if self.meta.pose_kind != PoseKind::Partial {
            return None;
        }
        match (self.meta.side, self.meta.target_side) {
            (Some(side), Some(target)) if side != target => Some((side, target)),
            _ => None,
        }
    }

    pub fn from_json_str(source: &str) -> PoseSourceResult<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_json_value(&value)
    }

    pub fn from_reader(reader: impl std::io::Read) -> PoseSourceResult<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_json_value(&value)
    }

    pub fn load(path: impl AsRef<Path>) -> PoseSourceResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads a pose source from its loosely typed form. Joints are read from `body`, or from the
    /// top level when there is no `body` mapping.
    pub fn from_json_value(value: &Value) -> PoseSourceResult<Self> {
        let Value::Object(root) = value else {
            return Err(PoseSourceError::NotAMapping(json_type_name(value)));
        };

        let meta = root
            .get("meta")
            .and_then(Value::as_object)
            .map(parse_meta)
            .unwrap_or_default();
        let mut pose = Self::new(meta);

        let (body, skip_meta) = match root.get("body") {
            Some(Value::Object(body)) => (body, false),
            _ => (root, true),
        };

        for (token, entry) in body {
            if skip_meta && token == "meta" {
                continue;
            }
            match parse_components(entry) {
                Some(components) => pose.insert(token.clone(), components),
                None => debug!("Skipping pose entry {token:?}: expected exactly four numbers"),
            }
        }

        Ok(pose)
    }

    pub fn to_json_value(&self) -> Value {
        let mut meta = Map::new();
        if self.meta.pose_kind == PoseKind::Partial {
            meta.insert("type".into(), json!("Hands"));
        }
        if self.meta.source_kind == SourceKind::Native {
            meta.insert("source".into(), json!(NATIVE_SOURCE_NAME));
        }
        if let Some(side) = self.meta.side {
            meta.insert("side".into(), json!(side_name(side)));
        }
        if let Some(side) = self.meta.target_side {
            meta.insert("targetSide".into(), json!(side_name(side)));
        }
        if let Some(correction) = self.meta.root_correction {
            meta.insert("root_correction".into(), json!(correction));
        }

        let body: Map<String, Value> = self
            .joints
            .iter()
            .map(|(token, q)| (token.clone(), json!({ "q": q })))
            .collect();

        json!({ "meta": meta, "body": body })
    }

    pub fn to_json_string(&self) -> PoseSourceResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_value())?)
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Left => "Left",
        Side::Right => "Right",
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

fn parse_meta(meta: &Map<String, Value>) -> PoseMeta {
    let text = |key: &str| meta.get(key).and_then(Value::as_str).map(str::trim);

    let pose_kind = match text("type").map(str::to_ascii_lowercase).as_deref() {
        Some("hands" | "hand" | "partial") => PoseKind::Partial,
        _ => PoseKind::FullBody,
    };
    let source_kind = match text("source") {
        Some(source) if source.to_ascii_lowercase().ends_with("native") => SourceKind::Native,
        _ => SourceKind::Foreign,
    };

    PoseMeta {
        source_kind,
        pose_kind,
        side: text("side").and_then(Side::parse),
        target_side: text("targetSide")
            .or_else(|| text("target_side"))
            .and_then(Side::parse),
        root_correction: meta.get("root_correction").and_then(parse_components),
    }
}

/// Accepts `{ "q": [a, b, c, d] }` or a bare `[a, b, c, d]`.
fn parse_components(entry: &Value) -> Option<[f32; 4]> {
    let array = match entry {
        Value::Object(fields) => fields.get("q")?.as_array()?,
        Value::Array(array) => array,
        _ => return None,
    };
    if array.len() != 4 {
        return None;
    }

    let mut components = [0.; 4];
    for (slot, value) in components.iter_mut().zip(array) {
        *slot = value.as_f64()? as f32;
    }
    Some(components)
}
