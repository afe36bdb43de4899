use serde::{Deserialize, Serialize};

/// Stable index of a bush in the world's bush registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BushId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BushColor {
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    Purple,
}

impl BushColor {
    pub const ALL: [BushColor; 6] = [
        BushColor::Green,
        BushColor::Blue,
        BushColor::Yellow,
        BushColor::Magenta,
        BushColor::Cyan,
        BushColor::Purple,
    ];

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            BushColor::Green => (0, 255, 0),
            BushColor::Blue => (0, 0, 255),
            BushColor::Yellow => (255, 255, 0),
            BushColor::Magenta => (255, 0, 255),
            BushColor::Cyan => (0, 255, 255),
            BushColor::Purple => (128, 0, 128),
        }
    }
}

/// What the agent can hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Food,
    Rat,
}

impl TargetKind {
    /// Stress raised when a target of this kind is spotted, and drained
    /// again when it is eaten.
    pub fn stress(&self) -> f64 {
        match self {
            TargetKind::Food => 1.0,
            TargetKind::Rat => 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Separator,
    Bridge,
    Bush { id: BushId, color: BushColor },
    Food { id: u32 },
    Rat { id: u32 },
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn bush(&self) -> Option<BushId> {
        match self {
            Cell::Bush { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Returns the hunt target held by this cell as (kind, entity id).
    pub fn target(&self) -> Option<(TargetKind, u32)> {
        match self {
            Cell::Food { id } => Some((TargetKind::Food, *id)),
            Cell::Rat { id } => Some((TargetKind::Rat, *id)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_empty() {
        let cell = Cell::Empty;
        assert!(cell.is_empty());
        assert!(cell.bush().is_none());
        assert!(cell.target().is_none());
    }

    #[test]
    fn test_cell_targets() {
        assert_eq!(Cell::Food { id: 3 }.target(), Some((TargetKind::Food, 3)));
        assert_eq!(Cell::Rat { id: 7 }.target(), Some((TargetKind::Rat, 7)));
        assert!(Cell::Separator.target().is_none());
        assert!(Cell::Bridge.target().is_none());
    }

    #[test]
    fn test_cell_bush() {
        let cell = Cell::Bush {
            id: BushId(2),
            color: BushColor::Yellow,
        };
        assert_eq!(cell.bush(), Some(BushId(2)));
        assert!(!cell.is_empty());
        assert!(cell.target().is_none());
    }

    #[test]
    fn test_target_stress() {
        assert_eq!(TargetKind::Rat.stress(), 5.0);
        assert_eq!(TargetKind::Food.stress(), 1.0);
    }

    #[test]
    fn test_cell_serialization() {
        let json = serde_json::to_string(&Cell::Rat { id: 1 }).unwrap();
        assert_eq!(json, r#"{"kind":"rat","id":1}"#);
    }
}
