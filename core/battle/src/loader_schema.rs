//! Loader 相關的資料結構定義

use crate::domain::alias::{AbilityName, EnemyTypeName, Percent};
use crate::domain::constants::{
    DEFAULT_ATTACK_POWER, DEFAULT_DEFENSE, DEFAULT_HEAL_AT_HEALTH_PERCENT, DEFAULT_MAX_HEALTH,
    DEFAULT_SPECIAL_ABILITY_CHANCE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumIter};

// ============================================================================
// 技能系統 (Ability System)
// ============================================================================

/// 技能作用對象
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum TargetType {
    /// 對手
    #[default]
    Enemy,
    /// 施放者自己
    #[serde(rename = "Self", alias = "Caster")]
    Caster,
}

/// 增益藥水強化的屬性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Display)]
pub enum BuffStat {
    Attack,
    Defense,
}

/// 狀態技能施加的效果種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Display)]
pub enum StatusEffectType {
    /// 每回合造成 effect_power 傷害
    Burn,
    /// 無法行動
    Stun,
    /// 防禦降低 effect_power
    Vulnerable,
    /// 攻擊降低 effect_power
    Weaken,
}

/// 技能效果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AbilityEffect {
    /// 目標承受 施放者攻擊力 + power
    Damage,
    /// 目標回復 power
    Heal,
    /// 施放者獲得 power% 格擋機率
    Block,
    /// 目標 attack/defense 暫時提升 power
    BuffPotion { buff: BuffStat, duration: i32 },
    /// 目標獲得狀態效果
    StatusEffect {
        effect: StatusEffectType,
        duration: i32,
        effect_power: i32,
    },
}

/// 技能定義（藥水也是技能，只是放在背包內）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: AbilityName,
    #[serde(default)]
    pub power: i32,
    #[serde(default)]
    pub target: TargetType,
    pub effect: AbilityEffect,
}

/// 技能表：名稱 -> 技能
pub type AbilityCatalog = HashMap<AbilityName, Ability>;

// ============================================================================
// 敵人系統 (Enemy System)
// ============================================================================

/// 敵人模板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyType {
    pub name: EnemyTypeName,
    #[serde(default = "default_max_health")]
    pub max_health: i32,
    #[serde(default = "default_attack_power")]
    pub attack_power: i32,
    #[serde(default = "default_defense")]
    pub defense: i32,
    #[serde(default)]
    pub abilities: Vec<AbilityName>,
    #[serde(default)]
    pub normal_attack: Option<AbilityName>,
    #[serde(default = "default_special_ability_chance")]
    pub special_ability_chance: Percent,
    #[serde(default)]
    pub healing_ability: Option<AbilityName>,
    #[serde(default = "default_heal_at_health_percent")]
    pub heal_at_health_percent: f32,
}

impl Default for EnemyType {
    fn default() -> Self {
        Self {
            name: String::new(),
            max_health: DEFAULT_MAX_HEALTH,
            attack_power: DEFAULT_ATTACK_POWER,
            defense: DEFAULT_DEFENSE,
            abilities: Vec::new(),
            normal_attack: None,
            special_ability_chance: DEFAULT_SPECIAL_ABILITY_CHANCE,
            healing_ability: None,
            heal_at_health_percent: DEFAULT_HEAL_AT_HEALTH_PERCENT,
        }
    }
}

/// 敵人模板表：名稱 -> 模板
pub type EnemyCatalog = HashMap<EnemyTypeName, EnemyType>;

fn default_max_health() -> i32 {
    DEFAULT_MAX_HEALTH
}

fn default_attack_power() -> i32 {
    DEFAULT_ATTACK_POWER
}

fn default_defense() -> i32 {
    DEFAULT_DEFENSE
}

fn default_special_ability_chance() -> Percent {
    DEFAULT_SPECIAL_ABILITY_CHANCE
}

fn default_heal_at_health_percent() -> f32 {
    DEFAULT_HEAL_AT_HEALTH_PERCENT
}

// ============================================================================
// 檔案格式 (TOML Files)
// ============================================================================

/// abilities.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilitiesToml {
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

/// enemies.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemiesToml {
    #[serde(default)]
    pub enemies: Vec<EnemyType>,
    #[serde(default)]
    pub bosses: Vec<EnemyType>,
}
