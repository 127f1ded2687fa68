//! 測試輔助：固定擲骰序列與常用資料
//!
//! 只在 `cfg(test)` 或 `test-helpers` feature 下編譯。

use crate::dice::Dice;
use crate::domain::alias::Percent;
use crate::domain::constants::MAX_PERCENT;
use crate::loader_schema::{
    Ability, AbilityCatalog, AbilityEffect, BuffStat, StatusEffectType, TargetType,
};
use std::collections::VecDeque;

/// 依序回傳預先排好的擲骰結果
///
/// 序列用完後 `roll_percent` 回傳 100、`roll_below` 回傳上限減一，
/// 也就是永遠擲出最不利的結果（不格擋、不治療、不用特殊技能）。
#[derive(Debug, Default, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn push(&mut self, roll: u32) {
        self.rolls.push_back(roll);
    }

    /// 尚未使用的擲骰數
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll_percent(&mut self) -> Percent {
        self.rolls
            .pop_front()
            .map(|r| r.clamp(1, MAX_PERCENT))
            .unwrap_or(MAX_PERCENT)
    }

    fn roll_below(&mut self, upper: u32) -> u32 {
        let max = upper.saturating_sub(1);
        self.rolls.pop_front().map(|r| r.min(max)).unwrap_or(max)
    }
}

// ============================================================================
// 技能 fixture
// ============================================================================

pub const SLASH: &str = "Slash";
pub const BLOCK: &str = "Block";
pub const BURN: &str = "Burn";
pub const STUN: &str = "Stun";
pub const FROST: &str = "Frost";
pub const QUAKE: &str = "Quake";
pub const MEND: &str = "Mend";
pub const HEAL_POTION: &str = "Heal Potion";
pub const DAMAGE_POTION: &str = "DamageInc Potion";
pub const DEFENSE_POTION: &str = "DefenseInc Potion";

pub fn ability(name: &str, power: i32, target: TargetType, effect: AbilityEffect) -> Ability {
    Ability {
        name: name.to_string(),
        power,
        target,
        effect,
    }
}

fn status(effect: StatusEffectType, duration: i32, effect_power: i32) -> AbilityEffect {
    AbilityEffect::StatusEffect {
        effect,
        duration,
        effect_power,
    }
}

/// 測試用技能表
pub fn ability_catalog() -> AbilityCatalog {
    [
        ability(SLASH, 5, TargetType::Enemy, AbilityEffect::Damage),
        ability(BLOCK, 60, TargetType::Caster, AbilityEffect::Block),
        ability(
            BURN,
            3,
            TargetType::Enemy,
            status(StatusEffectType::Burn, 3, 4),
        ),
        ability(
            STUN,
            0,
            TargetType::Enemy,
            status(StatusEffectType::Stun, 2, 0),
        ),
        ability(
            FROST,
            0,
            TargetType::Enemy,
            status(StatusEffectType::Weaken, 2, 3),
        ),
        ability(
            QUAKE,
            0,
            TargetType::Enemy,
            status(StatusEffectType::Vulnerable, 2, 3),
        ),
        ability(MEND, 15, TargetType::Caster, AbilityEffect::Heal),
        ability(HEAL_POTION, 20, TargetType::Caster, AbilityEffect::Heal),
        ability(
            DAMAGE_POTION,
            5,
            TargetType::Caster,
            AbilityEffect::BuffPotion {
                buff: BuffStat::Attack,
                duration: 3,
            },
        ),
        ability(
            DEFENSE_POTION,
            5,
            TargetType::Caster,
            AbilityEffect::BuffPotion {
                buff: BuffStat::Defense,
                duration: 3,
            },
        ),
    ]
    .into_iter()
    .map(|a| (a.name.clone(), a))
    .collect()
}
