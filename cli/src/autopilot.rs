//! 自動遊玩的玩家策略
//!
//! 優先順序：
//! 1. 生命偏低時喝治療藥水
//! 2. 身上沒有攻擊增益時喝攻擊藥水
//! 3. 生命不高且沒有格擋時使用格擋
//! 4. 對手身上還沒有的狀態技能
//! 5. 傷害技能

use crate::constants::{BLOCK_THRESHOLD, HEAL_POTION_THRESHOLD};
use battle::loader_schema::{AbilityCatalog, BuffStat};
use battle::{AbilityEffect, AbilityName, Battle, Combatant, EffectKind};

pub fn choose_action(battle: &Battle, catalog: &AbilityCatalog) -> Option<AbilityName> {
    let player = battle.player();
    let enemy = battle.enemy();
    let health_ratio = player.current_health as f32 / player.max_health.max(1) as f32;

    if health_ratio < HEAL_POTION_THRESHOLD {
        if let Some(potion) = find_potion(player, catalog, |e| matches!(e, AbilityEffect::Heal)) {
            return Some(potion);
        }
    }

    if !has_effect(player, |k| matches!(k, EffectKind::AttackUp { .. })) {
        let attack_potion = find_potion(player, catalog, |e| {
            matches!(
                e,
                AbilityEffect::BuffPotion {
                    buff: BuffStat::Attack,
                    ..
                }
            )
        });
        if attack_potion.is_some() {
            return attack_potion;
        }
    }

    if health_ratio < BLOCK_THRESHOLD && !has_effect(player, |k| k.block_chance().is_some()) {
        if let Some(block) = find_known(player, catalog, |e| matches!(e, AbilityEffect::Block)) {
            return Some(block);
        }
    }

    for name in &player.abilities {
        if let Some(AbilityEffect::StatusEffect { effect, .. }) = catalog.get(name).map(|a| &a.effect)
        {
            let wanted = EffectKind::from_status(*effect, 0).name();
            if !has_effect(enemy, |k| k.name() == wanted) {
                return Some(name.clone());
            }
        }
    }

    find_known(player, catalog, |e| matches!(e, AbilityEffect::Damage))
        .or_else(|| player.abilities.first().cloned())
}

fn has_effect(unit: &Combatant, pred: impl Fn(&EffectKind) -> bool) -> bool {
    unit.status_effects.iter().any(|e| pred(&e.kind))
}

fn find_known(
    unit: &Combatant,
    catalog: &AbilityCatalog,
    pred: impl Fn(&AbilityEffect) -> bool,
) -> Option<AbilityName> {
    unit.abilities
        .iter()
        .find(|name| catalog.get(*name).is_some_and(|a| pred(&a.effect)))
        .cloned()
}

fn find_potion(
    unit: &Combatant,
    catalog: &AbilityCatalog,
    pred: impl Fn(&AbilityEffect) -> bool,
) -> Option<AbilityName> {
    unit.potions
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(name, _)| name)
        .find(|name| catalog.get(*name).is_some_and(|a| pred(&a.effect)))
        .cloned()
}
