//! 棋盤格

use battle::{AbilityName, Combatant};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use tracing::info;

pub const ATTACK_BUFF_AMOUNT: i32 = 1;
pub const DEFENSE_BUFF_AMOUNT: i32 = 1;
/// 同時提高最大生命並回復等量生命
pub const HEALTH_BUFF_AMOUNT: i32 = 5;

/// 同盟格給予的永久增益
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum PermaBuff {
    Attack,
    Defense,
    Health,
}

impl PermaBuff {
    pub fn amount(self) -> i32 {
        match self {
            Self::Attack => ATTACK_BUFF_AMOUNT,
            Self::Defense => DEFENSE_BUFF_AMOUNT,
            Self::Health => HEALTH_BUFF_AMOUNT,
        }
    }

    /// 套用到玩家身上，回傳增加量
    pub fn apply(self, player: &mut Combatant) -> i32 {
        let amount = self.amount();
        match self {
            Self::Attack => player.grow_attack(amount),
            Self::Defense => player.grow_defense(amount),
            Self::Health => player.grow_max_health(amount),
        }
        info!(buff = %self, amount, "permanent buff applied");
        amount
    }
}

/// 生成在路徑上的格子
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Cell {
    /// 踩到時獲得永久增益
    Ally { buff: PermaBuff },
    /// 踩到時開始戰鬥，勝利獲得藥水
    Enemy { potion_reward: AbilityName },
}

impl Cell {
    pub fn is_ally(&self) -> bool {
        matches!(self, Self::Ally { .. })
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self, Self::Enemy { .. })
    }
}
