use bevy::log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named structural subdivisions of a driveable, each with its own health pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartId {
    Core,
    Nose,
    Tail,
    LeftWing,
    RightWing,
    Blades,
    CoreWheel,
    LeftWingWheel,
    RightWingWheel,
    TailWheel,
}

impl PartId {
    pub const ALL: [PartId; 10] = [
        PartId::Core,
        PartId::Nose,
        PartId::Tail,
        PartId::LeftWing,
        PartId::RightWing,
        PartId::Blades,
        PartId::CoreWheel,
        PartId::LeftWingWheel,
        PartId::RightWingWheel,
        PartId::TailWheel,
    ];

    /// Parts that must be intact before this one can be repaired or work.
    pub fn default_parents(self) -> &'static [PartId] {
        match self {
            PartId::Core => &[],
            PartId::Nose
            | PartId::Tail
            | PartId::LeftWing
            | PartId::RightWing
            | PartId::Blades
            | PartId::CoreWheel => &[PartId::Core],
            PartId::LeftWingWheel => &[PartId::LeftWing],
            PartId::RightWingWheel => &[PartId::RightWing],
            PartId::TailWheel => &[PartId::Tail],
        }
    }

    pub fn is_wheel(self) -> bool {
        matches!(
            self,
            PartId::CoreWheel | PartId::LeftWingWheel | PartId::RightWingWheel | PartId::TailWheel
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartState {
    pub health: u32,
    pub max_health: u32,
    pub on_fire: bool,
    pub dead: bool,
    pub parents: Vec<PartId>,
}

impl PartState {
    pub fn new(max_health: u32, parents: Vec<PartId>) -> Self {
        let max_health = max_health.max(1);
        Self {
            health: max_health,
            max_health,
            on_fire: false,
            dead: false,
            parents,
        }
    }

    pub fn is_intact(&self) -> bool {
        self.health > 0 && !self.dead
    }

    /// Health a repaired part comes back with.
    pub fn repair_health(&self) -> u32 {
        (self.max_health / 10).max(1)
    }
}

/// What a damage event did to a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The part does not exist on this vehicle or cannot be hit right now.
    Ignored,
    /// Health was reduced and the part is still intact.
    Damaged { remaining: u32 },
    /// This hit took the part from intact to dead.
    Destroyed,
    /// The part was already dead.
    AlreadyDead,
}

/// Health of every part of one vehicle.
///
/// Parts that a vehicle type does not define are not modelled and always count as intact:
/// a helicopter without wings never suffers a missing-wing penalty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartHealthModel {
    parts: BTreeMap<PartId, PartState>,
}

impl PartHealthModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per given part at full health with the default parent table.
    pub fn with_default_parts<'a>(parts: impl IntoIterator<Item = (&'a PartId, &'a u32)>) -> Self {
        let mut model = Self::new();
        for (&part, &max_health) in parts {
            model.insert(part, PartState::new(max_health, part.default_parents().to_vec()));
        }
        model
    }

    pub fn insert(&mut self, part: PartId, state: PartState) {
        self.parts.insert(part, state);
    }

    pub fn get(&self, part: PartId) -> Option<&PartState> {
        self.parts.get(&part)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PartId, &PartState)> {
        self.parts.iter()
    }

    pub fn is_intact(&self, part: PartId) -> bool {
        self.parts.get(&part).map_or(true, PartState::is_intact)
    }

    pub fn is_dead(&self, part: PartId) -> bool {
        self.parts.get(&part).is_some_and(|p| p.dead)
    }

    pub fn is_on_fire(&self, part: PartId) -> bool {
        self.parts.get(&part).is_some_and(|p| p.on_fire)
    }

    /// Reduces a part's health; reaching zero kills it.
    pub fn apply_damage(&mut self, part: PartId, amount: u32) -> DamageOutcome {
        let Some(state) = self.parts.get_mut(&part) else {
            return DamageOutcome::Ignored;
        };
        if !state.is_intact() {
            return DamageOutcome::AlreadyDead;
        }
        state.health = state.health.saturating_sub(amount);
        if state.health == 0 {
            state.dead = true;
            debug!("Part {:?} destroyed", part);
            DamageOutcome::Destroyed
        } else {
            DamageOutcome::Damaged {
                remaining: state.health,
            }
        }
    }

    /// Kills a part outright. Returns whether it was intact before.
    pub fn kill(&mut self, part: PartId) -> bool {
        match self.parts.get_mut(&part) {
            Some(state) if state.is_intact() => {
                state.health = 0;
                state.dead = true;
                true
            }
            _ => false,
        }
    }

    pub fn set_on_fire(&mut self, part: PartId, on_fire: bool) {
        if let Some(state) = self.parts.get_mut(&part) {
            state.on_fire = on_fire;
        }
    }

    /// Partial repair: health becomes `max(1, max_health / 10)` and fire/dead flags clear.
    /// Refused, without any change, when the part is unknown or a parent is not intact.
    pub fn repair(&mut self, part: PartId) -> bool {
        let Some(state) = self.parts.get(&part) else {
            return false;
        };
        if !state.parents.iter().all(|&parent| self.is_intact(parent)) {
            return false;
        }
        if let Some(state) = self.parts.get_mut(&part) {
            state.health = state.repair_health();
            state.on_fire = false;
            state.dead = false;
        }
        true
    }

    /// `(working, total)` over a group of parts. Unmodelled parts count as working.
    pub fn count_working(&self, group: &[PartId]) -> (usize, usize) {
        let working = group.iter().filter(|&&part| self.is_intact(part)).count();
        (working, group.len())
    }

    /// `working / total`, or 0 for an empty group.
    pub fn proportion_working(&self, group: &[PartId]) -> f64 {
        match self.count_working(group) {
            (_, 0) => 0.0,
            (working, total) => working as f64 / total as f64,
        }
    }
}
