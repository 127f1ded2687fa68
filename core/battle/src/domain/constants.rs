//! 戰鬥常數定義

use crate::domain::alias::Percent;

/// 戰鬥者預設最大生命
pub const DEFAULT_MAX_HEALTH: i32 = 10;

/// 戰鬥者預設攻擊力
pub const DEFAULT_ATTACK_POWER: i32 = 10;

/// 戰鬥者預設防禦力
pub const DEFAULT_DEFENSE: i32 = 5;

/// 預設特殊技能使用機率
pub const DEFAULT_SPECIAL_ABILITY_CHANCE: Percent = 50;

/// 預設治療門檻（生命低於最大值的比例）
pub const DEFAULT_HEAL_AT_HEALTH_PERCENT: f32 = 0.3;

/// 治療門檻允許範圍
pub const MIN_HEAL_AT_HEALTH_PERCENT: f32 = 0.1;
pub const MAX_HEAL_AT_HEALTH_PERCENT: f32 = 1.0;

/// 敵人低血量時選擇治療的機率
pub const ENEMY_HEAL_CHANCE: Percent = 20;

/// 百分比上限
pub const MAX_PERCENT: Percent = 100;

/// 未被格擋的攻擊最少造成的傷害
pub const MIN_DAMAGE: i32 = 1;

/// 格擋效果持續回合
pub const BLOCK_EFFECT_DURATION: i32 = 2;

/// 頭目固定屬性
pub const BOSS_MAX_HEALTH: i32 = 200;
pub const BOSS_ATTACK_POWER: i32 = 20;
pub const BOSS_DEFENSE: i32 = 10;
