use super::phase::Phase;
use super::vision::{ChaseTarget, Facing};
use crate::world::cell::BushId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnReason {
    /// Timed look toward the nearest unfinished bush.
    NearestBush,
    /// Clockwise turn after eating.
    Meal,
    /// Entering phase 2.
    PhaseChange,
    /// Fixed-interval rotation.
    Timer,
}

/// Observable behavior changes, emitted in the order they happen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AgentEvent {
    TargetSpotted { target: ChaseTarget },
    TargetConsumed { target: ChaseTarget },
    TargetLost { target: ChaseTarget },
    StressVision { active: bool },
    PhaseChanged { from: Phase, to: Phase },
    Turned { facing: Facing, reason: TurnReason },
    BushVisited { bush: BushId, progress: u8 },
    BushesReset,
}

impl AgentEvent {
    /// Events worth surfacing at info level.
    pub fn is_milestone(&self) -> bool {
        matches!(
            self,
            AgentEvent::TargetConsumed { .. } | AgentEvent::PhaseChanged { .. } | AgentEvent::BushesReset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = AgentEvent::PhaseChanged {
            from: Phase::OneA,
            to: Phase::OneB,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"phase_changed","from":"1a","to":"1b"}"#);
    }

    #[test]
    fn test_milestones() {
        let target = ChaseTarget {
            x: 1,
            y: 2,
            kind: crate::world::cell::TargetKind::Rat,
            entity: 3,
            spotted_at: 4,
        };
        assert!(AgentEvent::BushesReset.is_milestone());
        assert!(AgentEvent::TargetConsumed { target }.is_milestone());
        assert!(AgentEvent::PhaseChanged {
            from: Phase::Four,
            to: Phase::OneA
        }
        .is_milestone());
        assert!(!AgentEvent::TargetSpotted { target }.is_milestone());
        assert!(!AgentEvent::StressVision { active: true }.is_milestone());
    }
}
