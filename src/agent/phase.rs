use crate::world::cell::TargetKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "1a")]
    OneA,
    #[serde(rename = "1b")]
    OneB,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::OneA => "1a",
            Phase::OneB => "1b",
            Phase::Two => "2",
            Phase::Three => "3",
            Phase::Four => "4",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// How the agent reorients while roaming. Chosen once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum LookStrategy {
    /// Face the nearest unfinished bush every `orient_every` ticks, turn
    /// clockwise after each meal and leave phase 1b on a zone or side change.
    PhaseBased { orient_every: u64 },
    /// Turn clockwise every `rotate_every` ticks.
    TimedRotation { rotate_every: u64 },
}

/// Zone index of row `y`: the world is cut into ten horizontal bands.
pub fn zone_of(y: usize, height: usize) -> usize {
    y / (height / 10).max(1)
}

pub fn side_of(x: usize, width: usize) -> Side {
    if x < width / 2 {
        Side::Left
    } else {
        Side::Right
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseMachine {
    phase: Phase,
    last_zone: Option<usize>,
    last_side: Option<Side>,
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: Phase::OneA,
            last_zone: None,
            last_side: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advances the cycle after eating. Phase 1b only leaves through a zone
    /// or side change, so eating there changes nothing.
    /// Returns (from, to) when the phase moved.
    pub fn on_consumed(&mut self, _kind: TargetKind) -> Option<(Phase, Phase)> {
        let next = match self.phase {
            Phase::OneA => Phase::OneB,
            Phase::Two => Phase::Three,
            Phase::Three => Phase::Four,
            Phase::Four => Phase::OneA,
            Phase::OneB => return None,
        };
        let from = self.phase;
        self.phase = next;
        Some((from, next))
    }

    /// Records where the agent stands. In phase 1b, a change of zone or side
    /// since the last observation moves the machine to phase 2 and returns true.
    pub fn observe_position(&mut self, zone: usize, side: Side) -> bool {
        let zone_changed = self.last_zone.map_or(false, |z| z != zone);
        let side_changed = self.last_side.map_or(false, |s| s != side);
        let transition = self.phase == Phase::OneB && (zone_changed || side_changed);

        if transition {
            self.phase = Phase::Two;
        }
        self.last_zone = Some(zone);
        self.last_side = Some(side);
        transition
    }
}
