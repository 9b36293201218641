use std::sync::LazyLock;

use bevy::{
    math::Vec3,
    reflect::{Reflect, std_traits::ReflectDefault},
};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Reflect, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Unit vector pointing outward from the body towards this side.
    pub fn outward_axis(self) -> Vec3 {
        match self {
            Side::Left => Vec3::NEG_X,
            Side::Right => Vec3::X,
        }
    }

    /// Lenient parse of side names found in pose metadata: `Left`, `left`, `L`, ...
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Some(Side::Left),
            "right" | "r" => Some(Side::Right),
            _ => None,
        }
    }
}

/// Anatomical role of a joint, which selects the orientation policy applied to it.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[reflect(Default)]
pub enum JointClass {
    Root,
    Shoulder,
    Arm,
    Forearm,
    Hand,
    Finger,
    Leg,
    HeadNeck,
    /// Spine, chest and anything not recognised.
    #[default]
    OtherCore,
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[reflect(Default)]
pub struct JointRole {
    pub class: JointClass,
    pub side: Option<Side>,
}

const FINGER_PATTERNS: &[&str] = &[
    "finger", "index", "middle", "ring", "pinky", "little", "thumb",
];
const ROOT_PATTERNS: &[&str] = &["hips", "pelvis"];
const SHOULDER_PATTERNS: &[&str] = &["shoulder", "clavicle", "collar"];
const FOREARM_PATTERNS: &[&str] = &["forearm", "lowerarm", "elbow"];
const HAND_PATTERNS: &[&str] = &["hand", "wrist"];
const ARM_PATTERNS: &[&str] = &["arm"];
const LEG_PATTERNS: &[&str] = &["leg", "thigh", "calf", "shin", "knee", "foot", "toe"];
const HEAD_NECK_PATTERNS: &[&str] = &["head", "neck"];

/// Checked in order; the first matching class wins.
const CLASS_PRIORITY: &[(JointClass, &[&str])] = &[
    (JointClass::Finger, FINGER_PATTERNS),
    (JointClass::Root, ROOT_PATTERNS),
    (JointClass::Shoulder, SHOULDER_PATTERNS),
    (JointClass::Forearm, FOREARM_PATTERNS),
    (JointClass::Hand, HAND_PATTERNS),
    (JointClass::Arm, ARM_PATTERNS),
    (JointClass::Leg, LEG_PATTERNS),
    (JointClass::HeadNeck, HEAD_NECK_PATTERNS),
];

/// Single-letter side markers delimited by separators, e.g. `l_forearm`, `thigh_r`,
/// `bip01_l_hand`, `upperarm.l`.
static SIDE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[_\-.\s])([lr])(?:[_\-.\s]|$)").unwrap());

/// Classifies a joint-name token. Matching is case-insensitive and only looks at the token,
/// never at the skeleton.
pub fn classify(token: &str) -> JointRole {
    let token = token.to_ascii_lowercase();

    let class = CLASS_PRIORITY
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|pattern| token.contains(pattern)))
        .map(|(class, _)| *class)
        .unwrap_or_default();

    JointRole {
        class,
        side: side_of(&token),
    }
}

fn side_of(token: &str) -> Option<Side> {
    if token.contains("left") {
        return Some(Side::Left);
    }
    if token.contains("right") {
        return Some(Side::Right);
    }

    SIDE_LETTER
        .captures(token)
        .and_then(|captures| captures.get(1))
        .and_then(|letter| Side::parse(letter.as_str()))
}
