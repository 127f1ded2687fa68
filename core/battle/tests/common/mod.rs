#![allow(dead_code)]

use battle::logic::combatant::AiProfile;
use battle::test_helpers::SLASH;
use battle::{Area, Battle, BattleReward, Combatant};

pub const PLAYER_NAME: &str = "hero";
pub const ENEMY_NAME: &str = "goblin";

/// 攻擊 10、防禦 5、生命 50，只會 Slash
pub fn player() -> Combatant {
    Combatant::new(PLAYER_NAME, 50, 10, 5).with_abilities(vec![SLASH.to_string()])
}

/// 攻擊 8、防禦 2，普通攻擊 Slash，不使用特殊技能
pub fn enemy(max_health: i32) -> Combatant {
    Combatant::new(ENEMY_NAME, max_health, 8, 2).with_ai(AiProfile {
        normal_attack: Some(SLASH.to_string()),
        special_ability_chance: 0,
        ..Default::default()
    })
}

/// 不會任何行動的敵人
pub fn idle_enemy(max_health: i32) -> Combatant {
    Combatant::new(ENEMY_NAME, max_health, 8, 2)
}

/// 已開場、輪到玩家的戰鬥
pub fn started(player: Combatant, enemy: Combatant, reward: BattleReward) -> Battle {
    let catalog = battle::test_helpers::ability_catalog();
    let mut battle = Battle::new(player, enemy, Area::Fire, reward);
    battle.begin(&catalog).expect("begin 應成功");
    battle
}
