//! The retargeting engine: applies one [`PoseSource`] to one skeleton.
//!
//! Each pose entry is resolved to a joint, the joint is classified by its name, and the policy
//! for its class produces the joint's new local orientation:
//!
//! - Native and partial sources are copied directly; only the root may receive the source's
//!   root correction.
//! - A foreign root is converted from the source basis into skeleton space and then made local
//!   to its parent.
//! - Shoulders are held at their bind orientation.
//! - Every other joint composes a remapped delta with its bind orientation, followed by the
//!   corrective offset of its class, if any.
//!
//! Entries that cannot be resolved are skipped. Orientations are always normalized before they
//! reach the skeleton, so malformed input degrades to identity instead of spreading NaNs.

use std::f32::consts::PI;

use bevy::{
    log::{debug, trace},
    math::Quat,
};

use super::{
    classification::{JointClass, JointRole, classify},
    config::{RetargetConfig, RootRotationMode},
    corrective::corrective_offset,
    errors::ConfigResult,
    joint_resolver::{alias_canonical_key, canonical_key},
    mirroring::SideNameMapper,
    orientation::normalize_or_identity,
    pose_source::{PoseKind, PoseSource, SourceKind},
    skeleton::JointHierarchy,
    state::RetargetState,
    swizzle::swizzle,
};

/// How orientations of a pose source relate to the target skeleton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApplicationMode {
    /// Orientations are already target-space local rotations.
    Direct,
    /// Orientations are deltas in the source convention, relative to the bind pose.
    Delta,
}

impl ApplicationMode {
    pub fn of(source: &PoseSource) -> Self {
        if source.meta.source_kind == SourceKind::Native
            || source.meta.pose_kind == PoseKind::Partial
        {
            Self::Direct
        } else {
            Self::Delta
        }
    }
}

/// Skeleton state a single joint's policy may depend on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointContext {
    pub bind: Quat,
    /// Skeleton-space orientation of the joint's parent.
    pub parent_world: Quat,
    pub root_correction: Option<Quat>,
}

impl Default for JointContext {
    fn default() -> Self {
        Self {
            bind: Quat::IDENTITY,
            parent_world: Quat::IDENTITY,
            root_correction: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetargetSummary {
    /// Joints whose orientation was written.
    pub applied: usize,
    /// Entries that were unresolvable, filtered out or disabled.
    pub skipped: usize,
}

pub struct Retargeter {
    config: RetargetConfig,
    side_names: SideNameMapper,
    basis: Quat,
}

impl Retargeter {
    pub fn new(config: RetargetConfig) -> ConfigResult<Self> {
        let side_names = config.side_names.to_value()?;
        let basis = source_basis(config.extra_global_yaw_deg);
        Ok(Self {
            config,
            side_names,
            basis,
        })
    }

    pub fn config(&self) -> &RetargetConfig {
        &self.config
    }

    /// Rotation taking the pose source's basis to the skeleton's.
    pub fn basis(&self) -> Quat {
        self.basis
    }

    /// Applies `source` to `skeleton`. `state` must belong to `skeleton`.
    ///
    /// The first foreign application captures the bind pose. Later foreign full-body
    /// applications start from a full reset to that bind pose, so applying the same source
    /// repeatedly always yields the same result.
    pub fn apply<S: JointHierarchy + ?Sized>(
        &self,
        skeleton: &mut S,
        state: &mut RetargetState,
        source: &PoseSource,
    ) -> RetargetSummary {
        let mode = ApplicationMode::of(source);

        if source.meta.source_kind == SourceKind::Foreign {
            state.capture_bind(skeleton, self.config.force_rest_pose_on_bind_capture);
        }
        if mode == ApplicationMode::Delta && self.config.reset_to_bind_each_application {
            state.reset_to_bind(skeleton);
        }

        let mirror = source.mirror_sides();
        let only_joint = self.config.only_joint.as_deref().map(canonical_key);
        let root_correction = source
            .meta
            .root_correction_quat()
            .map(normalize_or_identity);

        let mut summary = RetargetSummary::default();
        for (token, components) in source.joints() {
            let token = match mirror {
                Some((from, to)) => self.side_names.map(token, from, to),
                None => token.to_string(),
            };
            let key = canonical_key(&token);

            if only_joint.as_ref().is_some_and(|only| *only != key) {
                summary.skipped += 1;
                continue;
            }

            let Some(id) = state.resolve(&*skeleton, &token) else {
                debug!("No joint matches {token:?}, skipping it");
                summary.skipped += 1;
                continue;
            };

            let role = classify(&alias_canonical_key(&token));
            if role.class == JointClass::Finger && !self.config.enable_finger_animation {
                summary.skipped += 1;
                continue;
            }

            let input = normalize_or_identity(self.config.input_quat_order.to_quat(*components));
            let context = JointContext {
                bind: state
                    .bind_rotation(id)
                    .or_else(|| skeleton.local_rotation(id))
                    .unwrap_or(Quat::IDENTITY),
                parent_world: skeleton
                    .parent(id)
                    .map(|parent| skeleton.world_rotation(parent))
                    .unwrap_or(Quat::IDENTITY),
                root_correction,
            };

            let rotation = normalize_or_identity(self.retarget_joint(role, input, mode, &context));
            trace!("{token:?} -> {id:?} ({:?}): {rotation:?}", role.class);
            skeleton.set_local_rotation(id, rotation);
            summary.applied += 1;
        }

        state.record_application();
        summary
    }

    /// New local orientation of a single joint. `input` must be normalized.
    pub fn retarget_joint(
        &self,
        role: JointRole,
        input: Quat,
        mode: ApplicationMode,
        context: &JointContext,
    ) -> Quat {
        match (mode, role.class) {
            (ApplicationMode::Direct, JointClass::Root) => match context.root_correction {
                Some(correction) => correction * input,
                None => input,
            },
            (ApplicationMode::Direct, _) => input,
            (ApplicationMode::Delta, JointClass::Root) => self.retarget_root(input, context),
            (ApplicationMode::Delta, JointClass::Shoulder) => context.bind,
            (ApplicationMode::Delta, _) => self.retarget_delta(role, input, context.bind),
        }
    }

    fn retarget_root(&self, input: Quat, context: &JointContext) -> Quat {
        let mut q = input;
        if self.config.root_apply_local_swizzle {
            q = swizzle(JointClass::Root, q, &self.config);
        }
        if let Some(correction) = context.root_correction {
            q = correction * q;
        }
        if self.config.root_invert {
            q = q.inverse();
        }
        let world = self.source_to_world(q);
        context.parent_world.inverse() * world
    }

    fn retarget_delta(&self, role: JointRole, input: Quat, bind: Quat) -> Quat {
        let mut delta = normalize_or_identity(swizzle(role.class, input, &self.config));
        if self.config.delta_invert {
            delta = delta.inverse();
        }

        let composed = self.config.delta_composition.compose(bind, delta);
        match corrective_offset(role, delta, &self.config) {
            Some(offset) => composed * offset,
            None => composed,
        }
    }

    /// Conjugates a source-space orientation into skeleton space.
    pub fn source_to_world(&self, q: Quat) -> Quat {
        let world = normalize_or_identity(self.basis * q * self.basis.inverse());
        match self.config.root_rotation_mode {
            RootRotationMode::Free => world,
            RootRotationMode::FixedUp => {
                normalize_or_identity(Quat::from_rotation_z(PI) * world)
            }
        }
    }
}

/// A half turn about `X` followed by `extra_yaw_deg` degrees about `Y`.
fn source_basis(extra_yaw_deg: f32) -> Quat {
    let flip = Quat::from_rotation_x(PI);
    if extra_yaw_deg == 0. {
        return flip;
    }
    normalize_or_identity(Quat::from_rotation_y(extra_yaw_deg.to_radians()) * flip)
}
