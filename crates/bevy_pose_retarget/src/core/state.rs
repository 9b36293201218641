use bevy::{log::info, math::Quat, platform::collections::HashMap};

use super::{
    joint_resolver::JointIndex,
    skeleton::{JointHierarchy, JointId},
};

/// Local orientation of every joint at the moment the skeleton was first retargeted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BindSnapshot {
    rotations: HashMap<JointId, Quat>,
}

impl BindSnapshot {
    pub fn capture<S: JointHierarchy + ?Sized>(skeleton: &S) -> Self {
        let rotations = skeleton
            .joint_ids()
            .into_iter()
            .filter_map(|id| skeleton.local_rotation(id).map(|rotation| (id, rotation)))
            .collect();
        Self { rotations }
    }

    pub fn get(&self, id: JointId) -> Option<Quat> {
        self.rotations.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    /// Writes every captured orientation back onto `skeleton`.
    pub fn restore<S: JointHierarchy + ?Sized>(&self, skeleton: &mut S) {
        for (id, rotation) in &self.rotations {
            skeleton.set_local_rotation(*id, *rotation);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindState {
    Unbound,
    Bound,
}

/// Retargeting state of one skeleton. Lives exactly as long as the skeleton it was used with
/// and must not be shared with another one.
#[derive(Clone, Debug, Default)]
pub struct RetargetState {
    bind: Option<BindSnapshot>,
    index: Option<JointIndex>,
    applications: u64,
}

impl RetargetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_state(&self) -> BindState {
        match self.bind {
            Some(_) => BindState::Bound,
            None => BindState::Unbound,
        }
    }

    pub fn bind_snapshot(&self) -> Option<&BindSnapshot> {
        self.bind.as_ref()
    }

    pub fn bind_rotation(&self, id: JointId) -> Option<Quat> {
        self.bind.as_ref().and_then(|bind| bind.get(id))
    }

    /// Captures the bind snapshot if none exists yet. Returns whether a capture happened.
    pub fn capture_bind<S: JointHierarchy + ?Sized>(
        &mut self,
        skeleton: &mut S,
        force_rest_pose: bool,
    ) -> bool {
        if self.bind.is_some() {
            return false;
        }
        if force_rest_pose {
            skeleton.reset_to_rest();
        }
        let snapshot = BindSnapshot::capture(&*skeleton);
        info!("Captured bind pose of {} joints", snapshot.len());
        self.bind = Some(snapshot);
        true
    }

    /// Puts every joint back to its bind orientation. Does nothing while unbound.
    pub fn reset_to_bind<S: JointHierarchy + ?Sized>(&self, skeleton: &mut S) {
        if let Some(bind) = &self.bind {
            bind.restore(skeleton);
        }
    }

    /// Resolves a joint-name token, building the name index on first use.
    pub fn resolve<S: JointHierarchy + ?Sized>(
        &mut self,
        skeleton: &S,
        token: &str,
    ) -> Option<JointId> {
        self.index
            .get_or_insert_with(|| JointIndex::build(skeleton))
            .resolve(token)
    }

    /// Drops the cached name index. Needed only if joints were added to or removed from the
    /// skeleton.
    pub fn invalidate_index(&mut self) {
        self.index = None;
    }

    /// Drops the bind snapshot, so the next foreign application captures a new one. Joint ids
    /// of the snapshot are meaningless once the skeleton's joint layout changes.
    pub fn release_bind(&mut self) {
        self.bind = None;
    }

    pub fn applications(&self) -> u64 {
        self.applications
    }

    pub(crate) fn record_application(&mut self) {
        self.applications += 1;
    }
}
