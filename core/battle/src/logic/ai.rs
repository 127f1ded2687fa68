//! 敵方 AI
//!
//! 低血量時有固定機率治療，否則依特殊技能機率決定使用第一個技能或普通攻擊。

use crate::dice::Dice;
use crate::domain::alias::AbilityName;
use crate::domain::constants::ENEMY_HEAL_CHANCE;
use crate::logic::combatant::Combatant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnemyAction {
    /// 對自己使用治療技能
    Heal(AbilityName),
    /// 使用技能（特殊技能或普通攻擊）
    UseAbility(AbilityName),
    NoMoves,
}

/// 是否達到考慮治療的條件
pub fn should_consider_healing(enemy: &Combatant) -> bool {
    enemy.ai.healing_ability.is_some()
        && (enemy.current_health as f32)
            < enemy.max_health as f32 * enemy.ai.heal_at_health_percent
}

pub fn decide_action(enemy: &Combatant, dice: &mut impl Dice) -> EnemyAction {
    if let Some(healing) = &enemy.ai.healing_ability {
        if should_consider_healing(enemy) {
            let roll = dice.roll_percent();
            debug!(roll, chance = ENEMY_HEAL_CHANCE, "enemy heal roll");
            if roll <= ENEMY_HEAL_CHANCE {
                return EnemyAction::Heal(healing.clone());
            }
        }
    }

    if let Some(special) = enemy.abilities.first() {
        let roll = dice.roll_below(100);
        debug!(roll, chance = enemy.ai.special_ability_chance, "enemy special roll");
        if roll < enemy.ai.special_ability_chance {
            return EnemyAction::UseAbility(special.clone());
        }
    }

    match &enemy.ai.normal_attack {
        Some(normal) => EnemyAction::UseAbility(normal.clone()),
        None => EnemyAction::NoMoves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::combatant::AiProfile;
    use crate::test_helpers::ScriptedDice;

    fn enemy() -> Combatant {
        Combatant::new("goblin", 100, 8, 2)
            .with_abilities(vec!["Burn".to_string()])
            .with_ai(AiProfile {
                normal_attack: Some("Slash".to_string()),
                special_ability_chance: 30,
                healing_ability: Some("Mend".to_string()),
                heal_at_health_percent: 0.3,
            })
    }

    #[test]
    fn test_decide_action() {
        // (說明, 目前生命, 擲骰序列, 預期行動)
        let data = [
            ("血量充足、特殊技能擲中", 100, vec![29], EnemyAction::UseAbility("Burn".into())),
            ("血量充足、特殊技能未中", 100, vec![30], EnemyAction::UseAbility("Slash".into())),
            ("低血量、治療擲中", 29, vec![20], EnemyAction::Heal("Mend".into())),
            ("低血量、治療未中改用特殊", 29, vec![21, 0], EnemyAction::UseAbility("Burn".into())),
            ("高於門檻不治療", 31, vec![99], EnemyAction::UseAbility("Slash".into())),
        ];
        for (desc, hp, rolls, expected) in data {
            let mut unit = enemy();
            unit.current_health = hp;
            let mut dice = ScriptedDice::new(rolls);
            assert_eq!(decide_action(&unit, &mut dice), expected, "{desc}");
            assert_eq!(dice.remaining(), 0, "{desc}：擲骰次數");
        }
    }

    #[test]
    fn test_no_moves() {
        let unit = Combatant::new("dummy", 10, 1, 1);
        let mut dice = ScriptedDice::default();
        assert_eq!(decide_action(&unit, &mut dice), EnemyAction::NoMoves);
    }
}
