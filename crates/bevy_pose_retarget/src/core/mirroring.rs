use bevy::reflect::{Reflect, std_traits::ReflectDefault};
use regex::{Regex, escape};
use serde::{Deserialize, Serialize};

use super::classification::Side;

/// Describes where the side word sits in joint names, e.g. the `Left` in `LeftHandIndex1`.
#[derive(Reflect, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[reflect(Default)]
#[serde(default)]
pub struct SideNamePattern {
    pub left_key: String,
    pub right_key: String,
    pub pattern_before: String,
    pub pattern_after: String,
}

impl Default for SideNamePattern {
    fn default() -> Self {
        Self {
            left_key: "Left".into(),
            right_key: "Right".into(),
            pattern_before: r"^.*?".into(),
            pattern_after: "".into(),
        }
    }
}

impl SideNamePattern {
    pub fn key(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_key,
            Side::Right => &self.right_key,
        }
    }

    fn regex_for(&self, side: Side) -> Result<Regex, regex::Error> {
        Regex::new(&format!(
            "({})({})({})",
            &self.pattern_before,
            escape(self.key(side)),
            &self.pattern_after,
        ))
    }

    pub fn to_value(&self) -> Result<SideNameMapper, regex::Error> {
        Ok(SideNameMapper {
            left: self.regex_for(Side::Left)?,
            right: self.regex_for(Side::Right)?,
            pattern: self.clone(),
        })
    }
}

/// Compiled [`SideNamePattern`]. Rewrites joint-name tokens authored for one side so they
/// address the other side instead. Orientation values are never touched.
#[derive(Clone, Debug)]
pub struct SideNameMapper {
    pattern: SideNamePattern,
    left: Regex,
    right: Regex,
}

impl Default for SideNameMapper {
    fn default() -> Self {
        // The default pattern is a valid regex.
        SideNamePattern::default().to_value().unwrap()
    }
}

impl SideNameMapper {
    pub fn pattern(&self) -> &SideNamePattern {
        &self.pattern
    }

    /// Replaces the first `from` side word in `token` with the `to` side word. Tokens without
    /// a `from` side word are returned unchanged.
    pub fn map(&self, token: &str, from: Side, to: Side) -> String {
        if from == to {
            return token.to_string();
        }
        let regex = match from {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };
        let replacement_key = self.pattern.key(to);
        regex
            .replace(token, format!("${{1}}{replacement_key}${{3}}"))
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_first_side_word() {
        let mapper = SideNameMapper::default();
        assert_eq!(
            mapper.map("RightHandIndex1", Side::Right, Side::Left),
            "LeftHandIndex1"
        );
        assert_eq!(
            mapper.map("mixamorig:LeftHand", Side::Left, Side::Right),
            "mixamorig:RightHand"
        );
        assert_eq!(
            mapper.map("RightHandRight", Side::Right, Side::Left),
            "LeftHandRight"
        );
    }

    #[test]
    fn leaves_other_tokens_alone() {
        let mapper = SideNameMapper::default();
        assert_eq!(mapper.map("Spine", Side::Right, Side::Left), "Spine");
        assert_eq!(
            mapper.map("LeftHand", Side::Right, Side::Left),
            "LeftHand"
        );
        assert_eq!(mapper.map("RightHand", Side::Right, Side::Right), "RightHand");
    }

    #[test]
    fn custom_patterns_compile() {
        let mapper = SideNamePattern {
            left_key: "_l".into(),
            right_key: "_r".into(),
            pattern_before: r"^.*".into(),
            pattern_after: r"$".into(),
        }
        .to_value()
        .unwrap();

        assert_eq!(mapper.map("hand_r", Side::Right, Side::Left), "hand_l");
        assert_eq!(mapper.map("hand_right", Side::Right, Side::Left), "hand_right");
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        let pattern = SideNamePattern {
            pattern_before: "(".into(),
            ..Default::default()
        };
        assert!(pattern.to_value().is_err());
    }
}
