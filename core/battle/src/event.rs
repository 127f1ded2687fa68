//! 戰鬥事件
//!
//! 規則引擎不碰表現層，所有結果都以事件依序回報，由前端決定如何呈現。

use crate::domain::alias::{AbilityName, Percent};
use crate::domain::core_types::{BattleState, Side};
use crate::logic::status_effect::EffectKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 傷害來源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DamageSource {
    Ability { name: AbilityName },
    Burn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum BattleEvent {
    StateChanged {
        from: BattleState,
        to: BattleState,
    },
    EnemyAppeared {
        name: String,
    },
    AbilityUsed {
        side: Side,
        ability: AbilityName,
    },
    PotionConsumed {
        potion: AbilityName,
        remaining: u32,
    },
    DamageBlocked {
        side: Side,
        source: DamageSource,
        roll: Percent,
        chance: Percent,
    },
    DamageTaken {
        side: Side,
        source: DamageSource,
        amount: i32,
        remaining_health: i32,
    },
    Healed {
        side: Side,
        amount: i32,
        current_health: i32,
    },
    EffectApplied {
        side: Side,
        effect: EffectKind,
        duration: i32,
    },
    EffectExpired {
        side: Side,
        effect: EffectKind,
    },
    /// 暈眩跳過回合
    TurnSkipped {
        side: Side,
    },
    NoMoves {
        side: Side,
    },
    AbilityLearned {
        ability: AbilityName,
    },
    PotionRewarded {
        potion: AbilityName,
        count: u32,
    },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StateChanged { from, to } => match to {
                BattleState::PlayerTurn => write!(f, "Player's Turn. Choose your move."),
                BattleState::EnemyTurn => write!(f, "Enemy's Turn."),
                BattleState::Won => write!(f, "You won the battle!"),
                BattleState::Lost => write!(f, "You were defeated."),
                _ => write!(f, "Battle state {from} -> {to}"),
            },
            Self::EnemyAppeared { name } => write!(f, "A wild {name} appears!"),
            Self::AbilityUsed { side, ability } => write!(f, "{side} uses {ability}!"),
            Self::PotionConsumed { potion, remaining } => {
                write!(f, "Used {potion}. {remaining} remaining.")
            }
            Self::DamageBlocked {
                side, roll, chance, ..
            } => write!(f, "{side} BLOCKED the attack! (Rolled {roll} vs {chance}%)"),
            Self::DamageTaken {
                side,
                source: DamageSource::Burn,
                amount,
                ..
            } => write!(f, "{side} takes {amount} damage from the burn!"),
            Self::DamageTaken {
                side,
                amount,
                remaining_health,
                ..
            } => write!(f, "{side} takes {amount} damage ({remaining_health} HP left)."),
            Self::Healed {
                side,
                amount,
                current_health,
            } => write!(f, "{side} heals {amount} ({current_health} HP)."),
            Self::EffectApplied {
                side,
                effect,
                duration,
            } => write!(f, "{side} is affected by {} for {duration} turns.", effect.name()),
            Self::EffectExpired { side, effect } => {
                write!(f, "{} on {side} wears off.", effect.name())
            }
            Self::TurnSkipped { side } => write!(f, "{side} is stunned and cannot act!"),
            Self::NoMoves { side } => write!(f, "{side} has no moves!"),
            Self::AbilityLearned { ability } => write!(f, "You learned {ability}!"),
            Self::PotionRewarded { potion, count } => {
                write!(f, "You received a {potion}! ({count} in bag)")
            }
        }
    }
}
