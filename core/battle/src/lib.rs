//! 回合制戰鬥引擎
//!
//! 負責：
//! - 戰鬥者屬性、藥水背包與狀態效果
//! - 技能效果結算（傷害、治療、格擋、增益／減益、燃燒、暈眩）
//! - 敵方 AI 行動選擇
//! - 戰鬥狀態機（玩家回合、敵方回合、勝負與獎勵）
//!
//! 所有隨機性都經由 [`dice::Dice`] 注入，表現層只讀取 [`event::BattleEvent`]。

pub mod battle;
pub mod dice;
pub mod domain;
pub mod error;
pub mod event;
pub mod loader;
pub mod loader_schema;
pub mod logic;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use battle::{Battle, BattleOutcome, BattleResult, BattleReward, RewardGranted};
pub use dice::Dice;
pub use domain::alias::{AbilityName, EffectId, Percent};
pub use domain::core_types::{Area, BattleState, Side};
pub use error::{Error, ErrorKind, Result};
pub use event::{BattleEvent, DamageSource};
pub use loader_schema::{Ability, AbilityEffect, EnemyType, TargetType};
pub use logic::combatant::{Combatant, DamageOutcome};
pub use logic::status_effect::{EffectKind, StatusEffect};
