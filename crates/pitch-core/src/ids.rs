use serde::{Deserialize, Serialize};

/// A robot's jersey number, 1-based. Number 1 is the goalie.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PlayerNumber(u8);

impl PlayerNumber {
    pub const GOALIE: PlayerNumber = PlayerNumber(1);

    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn is_goalie(&self) -> bool {
        *self == Self::GOALIE
    }
}

impl std::fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The broadcast identifier of a positioning role. 0 means no role.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RoleId(u32);

impl RoleId {
    pub const NONE: RoleId = RoleId(0);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
