//! 狀態效果
//!
//! 屬性修正不直接寫回戰鬥者基礎值，而是在讀取攻擊力／防禦力時累加，
//! 效果移除後數值自然恢復。

use crate::domain::alias::{EffectId, Percent};
use crate::loader_schema::{BuffStat, StatusEffectType};
use serde::{Deserialize, Serialize};

/// 狀態效果種類與強度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectKind {
    Burn { damage: i32 },
    Stun,
    Vulnerable { defense_reduction: i32 },
    Weaken { attack_reduction: i32 },
    AttackUp { attack_increase: i32 },
    DefenseUp { defense_increase: i32 },
    ChanceToBlock { block_chance: Percent },
}

impl EffectKind {
    /// 依狀態技能設定建立效果
    pub fn from_status(effect: StatusEffectType, power: i32) -> Self {
        match effect {
            StatusEffectType::Burn => Self::Burn { damage: power },
            StatusEffectType::Stun => Self::Stun,
            StatusEffectType::Vulnerable => Self::Vulnerable {
                defense_reduction: power,
            },
            StatusEffectType::Weaken => Self::Weaken {
                attack_reduction: power,
            },
        }
    }

    /// 依增益藥水設定建立效果
    pub fn from_buff(buff: BuffStat, power: i32) -> Self {
        match buff {
            BuffStat::Attack => Self::AttackUp {
                attack_increase: power,
            },
            BuffStat::Defense => Self::DefenseUp {
                defense_increase: power,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Burn { .. } => "Burn",
            Self::Stun => "Stun",
            Self::Vulnerable { .. } => "Vulnerable",
            Self::Weaken { .. } => "Weaken",
            Self::AttackUp { .. } => "AttackUp",
            Self::DefenseUp { .. } => "DefenseUp",
            Self::ChanceToBlock { .. } => "ChanceToBlock",
        }
    }

    /// 對攻擊力的修正
    pub fn attack_modifier(&self) -> i32 {
        match self {
            Self::AttackUp { attack_increase } => *attack_increase,
            Self::Weaken { attack_reduction } => -attack_reduction,
            _ => 0,
        }
    }

    /// 對防禦力的修正
    pub fn defense_modifier(&self) -> i32 {
        match self {
            Self::DefenseUp { defense_increase } => *defense_increase,
            Self::Vulnerable { defense_reduction } => -defense_reduction,
            _ => 0,
        }
    }

    pub fn is_stun(&self) -> bool {
        matches!(self, Self::Stun)
    }

    pub fn block_chance(&self) -> Option<Percent> {
        match self {
            Self::ChanceToBlock { block_chance } => Some(*block_chance),
            _ => None,
        }
    }
}

/// 掛在戰鬥者身上的狀態效果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub id: EffectId,
    pub kind: EffectKind,
    /// 剩餘回合，歸零時移除
    pub duration: i32,
}

impl StatusEffect {
    pub fn is_expired(&self) -> bool {
        self.duration <= 0
    }
}
