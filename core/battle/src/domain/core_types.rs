//! 基本資料類型定義

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// 戰鬥區域，決定一般敵人獲得的特殊技能
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
    Display,
)]
pub enum Area {
    Fire,
    Earth,
    Lightning,
    Snow,
}

/// 戰鬥中的陣營
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// 戰鬥狀態，決定目前允許哪一方行動
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum BattleState {
    #[default]
    Inactive,
    Starting,
    PlayerTurn,
    EnemyTurn,
    Won,
    Lost,
}

impl BattleState {
    /// 戰鬥是否已分出勝負
    pub fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
