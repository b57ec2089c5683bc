//! Obstacle segments and the recycling pool that owns them
//!
//! Every segment ever constructed lives in one slot arena. At any instant a
//! slot is either in the active list or on the dead list for its role, never
//! both. Retired segments are revived in place; the arena only grows when a
//! role's dead list is empty.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Which half of a gate a segment forms.
///
/// Only `Bottom` segments count toward the score. The role is a lane tag,
/// not a screen position: in the y-up world a `Top` segment sits below the
/// opening and a `Bottom` segment above it, so presentation code choosing a
/// sprite by role must map `Top` to the lower pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleRole {
    Top,
    Bottom,
}

/// Stable handle to a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub u32);

impl SegmentId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One half of a gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSegment {
    pub id: SegmentId,
    pub role: ObstacleRole,
    pub entity: Entity,
    pub alive: bool,
    /// Player has overtaken this segment (only ever set on `Bottom`)
    pub passed: bool,
}

impl ObstacleSegment {
    fn new(id: SegmentId, role: ObstacleRole, pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        let mut entity = Entity::new(pos, size);
        entity.vel = vel;
        Self {
            id,
            role,
            entity,
            alive: true,
            passed: false,
        }
    }

    fn revive(&mut self, pos: Vec2, vel: Vec2) {
        self.entity.pos = pos;
        self.entity.vel = vel;
        self.passed = false;
        self.alive = true;
    }
}

/// Arena of obstacle segments partitioned into {active, dead-top, dead-bottom}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePool {
    segment_size: Vec2,
    slots: Vec<ObstacleSegment>,
    /// Live segments in spawn order
    active: Vec<SegmentId>,
    dead_top: Vec<SegmentId>,
    dead_bottom: Vec<SegmentId>,
}

impl ObstaclePool {
    pub fn new(segment_size: Vec2) -> Self {
        Self {
            segment_size,
            slots: Vec::new(),
            active: Vec::new(),
            dead_top: Vec::new(),
            dead_bottom: Vec::new(),
        }
    }

    fn dead_list_mut(&mut self, role: ObstacleRole) -> &mut Vec<SegmentId> {
        match role {
            ObstacleRole::Top => &mut self.dead_top,
            ObstacleRole::Bottom => &mut self.dead_bottom,
        }
    }

    fn dead_list(&self, role: ObstacleRole) -> &[SegmentId] {
        match role {
            ObstacleRole::Top => &self.dead_top,
            ObstacleRole::Bottom => &self.dead_bottom,
        }
    }

    /// Get a live segment for `role` at `pos`, reviving a dead one if possible
    pub fn acquire(&mut self, role: ObstacleRole, pos: Vec2, vel: Vec2) -> SegmentId {
        if let Some(id) = self.dead_list_mut(role).pop() {
            if let Some(segment) = self.slots.get_mut(id.index()) {
                segment.revive(pos, vel);
                self.active.push(id);
                return id;
            }
        }

        let id = SegmentId(self.slots.len() as u32);
        self.slots
            .push(ObstacleSegment::new(id, role, pos, vel, self.segment_size));
        self.active.push(id);
        id
    }

    /// Move a live segment to its role's dead list.
    ///
    /// Returns false (and does nothing) if the segment is unknown or already dead.
    pub fn retire(&mut self, id: SegmentId) -> bool {
        let Some(segment) = self.slots.get_mut(id.index()) else {
            return false;
        };
        if !segment.alive {
            return false;
        }
        segment.alive = false;
        let role = segment.role;

        if let Some(i) = self.active.iter().position(|a| *a == id) {
            self.active.remove(i);
        }
        self.dead_list_mut(role).push(id);
        true
    }

    /// Retire every live segment at once. Returns the retired ids in spawn order.
    pub fn retire_all(&mut self) -> Vec<SegmentId> {
        let retired = std::mem::take(&mut self.active);
        for id in &retired {
            if let Some(segment) = self.slots.get_mut(id.index()) {
                segment.alive = false;
                match segment.role {
                    ObstacleRole::Top => self.dead_top.push(*id),
                    ObstacleRole::Bottom => self.dead_bottom.push(*id),
                }
            }
        }
        retired
    }

    /// Scroll every live segment by its velocity
    pub fn advance(&mut self, dt: f32) {
        for id in &self.active {
            if let Some(segment) = self.slots.get_mut(id.index()) {
                segment.entity.pos += segment.entity.vel * dt;
            }
        }
    }

    /// Retire segments whose trailing edge is left of `left_bound`
    pub fn retire_offscreen(&mut self, left_bound: f32) -> Vec<SegmentId> {
        let gone: Vec<SegmentId> = self
            .active
            .iter()
            .copied()
            .filter(|id| {
                self.slots
                    .get(id.index())
                    .is_some_and(|s| s.entity.right_edge() < left_bound)
            })
            .collect();
        for id in &gone {
            self.retire(*id);
        }
        gone
    }

    pub fn for_each_active_mut(&mut self, mut f: impl FnMut(&mut ObstacleSegment)) {
        for id in &self.active {
            if let Some(segment) = self.slots.get_mut(id.index()) {
                f(segment);
            }
        }
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &ObstacleSegment> {
        self.active.iter().filter_map(|id| self.slots.get(id.index()))
    }

    pub fn get(&self, id: SegmentId) -> Option<&ObstacleSegment> {
        self.slots.get(id.index())
    }

    pub fn active_ids(&self) -> &[SegmentId] {
        &self.active
    }

    pub fn active_count(&self, role: ObstacleRole) -> usize {
        self.iter_active().filter(|s| s.role == role).count()
    }

    pub fn dead_count(&self, role: ObstacleRole) -> usize {
        self.dead_list(role).len()
    }

    /// Number of segments ever constructed for `role` (the high-water mark)
    pub fn constructed(&self, role: ObstacleRole) -> usize {
        self.slots.iter().filter(|s| s.role == role).count()
    }

    pub fn segment_size(&self) -> Vec2 {
        self.segment_size
    }
}
