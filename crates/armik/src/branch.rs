//! Redundancy branches of the closed-form solution.
//!
//! A 5-DOF arm reaching a roll/pitch/position goal has up to eight joint
//! configurations. Each is identified by three independent choices packed
//! into a 3-bit id:
//!
//! | bit | accessor      | meaning                                   |
//! |-----|---------------|-------------------------------------------|
//! | 2   | `flip_base`   | joint 1 points away from the goal         |
//! | 1   | `elbow_down`  | negative joint 3 (other planar elbow)     |
//! | 0   | `flip_wrist`  | joint 5 turned by pi about the tool axis  |

use std::fmt;

/// One of the eight redundancy branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Branch(u8);

impl Branch {
    /// All branches in evaluation order; `flip_base` varies slowest.
    pub const ALL: [Self; 8] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
    ];

    /// Branch with no alternative chosen for any joint.
    pub const PRIMARY: Self = Self(0);

    const FLIP_BASE: u8 = 0b100;
    const ELBOW_DOWN: u8 = 0b010;
    const FLIP_WRIST: u8 = 0b001;

    /// Branch from its three selector flags.
    pub const fn new(flip_base: bool, elbow_down: bool, flip_wrist: bool) -> Self {
        let mut id = 0;
        if flip_base {
            id |= Self::FLIP_BASE;
        }
        if elbow_down {
            id |= Self::ELBOW_DOWN;
        }
        if flip_wrist {
            id |= Self::FLIP_WRIST;
        }
        Self(id)
    }

    /// Branch from its id. Returns `None` for ids above 7.
    pub const fn from_id(id: u8) -> Option<Self> {
        if id < 8 { Some(Self(id)) } else { None }
    }

    pub const fn id(self) -> u8 {
        self.0
    }

    pub const fn flip_base(self) -> bool {
        self.0 & Self::FLIP_BASE != 0
    }

    pub const fn elbow_down(self) -> bool {
        self.0 & Self::ELBOW_DOWN != 0
    }

    pub const fn flip_wrist(self) -> bool {
        self.0 & Self::FLIP_WRIST != 0
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "branch {} (base {}, elbow {}, wrist {})",
            self.0,
            if self.flip_base() { "flipped" } else { "direct" },
            if self.elbow_down() { "down" } else { "up" },
            if self.flip_wrist() { "flipped" } else { "direct" },
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
