//! 技能效果結算

use crate::dice::Dice;
use crate::domain::alias::Percent;
use crate::domain::constants::{BLOCK_EFFECT_DURATION, MAX_PERCENT};
use crate::domain::core_types::Side;
use crate::event::{BattleEvent, DamageSource};
use crate::loader_schema::{Ability, AbilityEffect, TargetType};
use crate::logic::combatant::Combatant;
use crate::logic::status_effect::EffectKind;
use tracing::debug;

/// 執行技能並回傳產生的事件
///
/// `target` 由呼叫端決定（藥水一律作用於自己），格擋永遠作用於施放者。
pub fn execute_ability(
    ability: &Ability,
    target: TargetType,
    user: &mut Combatant,
    user_side: Side,
    opponent: &mut Combatant,
    dice: &mut impl Dice,
) -> Vec<BattleEvent> {
    let mut events = Vec::new();
    let user_attack = user.attack_power();

    let (unit, side) = match (&ability.effect, target) {
        (AbilityEffect::Block, _) | (_, TargetType::Caster) => (user, user_side),
        (_, TargetType::Enemy) => (opponent, user_side.opponent()),
    };
    debug!(ability = %ability.name, user = ?user_side, target = ?side, "execute ability");

    match &ability.effect {
        AbilityEffect::Damage => {
            let outcome = unit.take_damage(user_attack + ability.power, dice);
            events.push(outcome.into_event(
                side,
                DamageSource::Ability {
                    name: ability.name.clone(),
                },
            ));
        }
        AbilityEffect::Heal => {
            let amount = unit.heal(ability.power);
            events.push(BattleEvent::Healed {
                side,
                amount,
                current_health: unit.current_health,
            });
        }
        AbilityEffect::Block => {
            let block_chance = ability.power.clamp(0, MAX_PERCENT as i32) as Percent;
            let kind = EffectKind::ChanceToBlock { block_chance };
            events.push(apply_status(unit, side, kind, BLOCK_EFFECT_DURATION));
        }
        AbilityEffect::BuffPotion { buff, duration } => {
            let kind = EffectKind::from_buff(*buff, ability.power);
            events.push(apply_status(unit, side, kind, *duration));
        }
        AbilityEffect::StatusEffect {
            effect,
            duration,
            effect_power,
        } => {
            let kind = EffectKind::from_status(*effect, *effect_power);
            events.push(apply_status(unit, side, kind, *duration));
        }
    }
    events
}

fn apply_status(unit: &mut Combatant, side: Side, kind: EffectKind, duration: i32) -> BattleEvent {
    unit.add_status_effect(kind, duration);
    BattleEvent::EffectApplied {
        side,
        effect: kind,
        duration,
    }
}
