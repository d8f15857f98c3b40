use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// Kind of item occupying a grid cell.
///
/// The ordinary progression runs `Rock < Gem < Shell < Conch < Nautilus < Seastar < Sarah`. `Sand` is the
/// empty filler, `Bucket` and `Succulent` are fixed tiles that never move or merge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Sand,
    Rock,
    Gem,
    Shell,
    Conch,
    Nautilus,
    Seastar,
    Sarah,
    Bucket,
    Succulent,
}

impl Tier {
    pub const ALL: [Tier; 10] = [
        Tier::Sand,
        Tier::Rock,
        Tier::Gem,
        Tier::Shell,
        Tier::Conch,
        Tier::Nautilus,
        Tier::Seastar,
        Tier::Sarah,
        Tier::Bucket,
        Tier::Succulent,
    ];

    pub const PROGRESSION: [Tier; 7] = [
        Tier::Rock,
        Tier::Gem,
        Tier::Shell,
        Tier::Conch,
        Tier::Nautilus,
        Tier::Seastar,
        Tier::Sarah,
    ];

    /// What the bucket turns sand into.
    pub const LOWEST: Tier = Tier::Rock;

    /// Tier produced by merging two items of this tier, if any.
    pub const fn successor(self) -> Option<Tier> {
        use Tier::*;
        match self {
            Rock => Some(Gem),
            Gem => Some(Shell),
            Shell => Some(Conch),
            Conch => Some(Nautilus),
            Nautilus => Some(Seastar),
            Seastar => Some(Sarah),
            Sarah | Sand | Bucket | Succulent => None,
        }
    }

    pub const fn is_mergeable(self) -> bool {
        self.successor().is_some()
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Sarah)
    }

    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Bucket | Self::Succulent)
    }

    /// Position in the progression, `None` for sand and the fixed tiles.
    pub const fn rank(self) -> Option<u8> {
        use Tier::*;
        match self {
            Rock => Some(0),
            Gem => Some(1),
            Shell => Some(2),
            Conch => Some(3),
            Nautilus => Some(4),
            Seastar => Some(5),
            Sarah => Some(6),
            Sand | Bucket | Succulent => None,
        }
    }

    pub const fn name(self) -> &'static str {
        use Tier::*;
        match self {
            Sand => "sand",
            Rock => "rock",
            Gem => "gem",
            Shell => "shell",
            Conch => "conch",
            Nautilus => "nautilus",
            Seastar => "seastar",
            Sarah => "sarah",
            Bucket => "bucket",
            Succulent => "succulent",
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self::Sand
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.name() == s)
            .ok_or(GameError::UnknownTier)
    }
}
