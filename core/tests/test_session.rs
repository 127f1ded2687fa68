use battle::test_helpers::ScriptedDice;
use battle::{Area, BattleOutcome, BattleState, Dice, RewardGranted};
use board::{Cell, PermaBuff};
use game_core::{Encounter, GameData, GameError, GameSession, Landing, Phase};

const ABILITIES_TOML: &str = r#"
[[abilities]]
name = "Slash"
power = 5
effect = { type = "Damage" }

[[abilities]]
name = "Bite"
power = 2
effect = { type = "Damage" }

[[abilities]]
name = "Fire Ball"
effect = { type = "StatusEffect", effect = "Burn", duration = 3, effect_power = 3 }

[[abilities]]
name = "Frost Bite"
effect = { type = "StatusEffect", effect = "Weaken", duration = 2, effect_power = 3 }

[[abilities]]
name = "Earth Quake"
effect = { type = "StatusEffect", effect = "Vulnerable", duration = 2, effect_power = 3 }

[[abilities]]
name = "Thunder Bolt"
effect = { type = "StatusEffect", effect = "Stun", duration = 2, effect_power = 0 }

[[abilities]]
name = "Heal Potion"
power = 20
target = "Self"
effect = { type = "Heal" }

[[abilities]]
name = "DefenseInc Potion"
power = 5
target = "Self"
effect = { type = "BuffPotion", buff = "Defense", duration = 3 }
"#;

const ENEMIES_TOML: &str = r#"
[[enemies]]
name = "Wolf"
max_health = 30
attack_power = 10
defense = 2
normal_attack = "Bite"
special_ability_chance = 0

[[bosses]]
name = "Drake"
normal_attack = "Bite"

[[bosses]]
name = "King"
max_health = 40
attack_power = 5
defense = 0
normal_attack = "Bite"
special_ability_chance = 0
"#;

const GAME_TOML: &str = r#"
[player]
name = "hero"
max_health = 100
attack_power = 12
defense = 5
abilities = ["Slash"]

[spawner]
potion_rewards = ["Heal Potion", "DefenseInc Potion"]

[area_abilities]
fire = "Fire Ball"
snow = "Frost Bite"
earth = "Earth Quake"
lightning = "Thunder Bolt"

[[bosses]]
path_index = 12
area = "Fire"
template = "Drake"

[final_boss]
template = "King"
"#;

fn game_data(game_toml: &str) -> GameData {
    GameData::from_toml(ABILITIES_TOML, ENEMIES_TOML, game_toml).expect("測試資料應合法")
}

/// 空的擲骰序列：同盟格都是 Health，敵人格都給 DefenseInc Potion，洗牌不改順序
fn new_session(game_toml: &str) -> (GameSession, ScriptedDice) {
    let mut dice = ScriptedDice::default();
    let session = GameSession::new(game_data(game_toml), &mut dice).unwrap();
    (session, dice)
}

/// 玩家只用 Slash，打到分出勝負
fn fight(session: &mut GameSession, dice: &mut impl Dice) {
    for _ in 0..100 {
        let state = session.battle().map(|b| b.state()).expect("應在戰鬥中");
        match state {
            BattleState::PlayerTurn => {
                session.player_action("Slash", dice).unwrap();
            }
            BattleState::EnemyTurn => {
                session.enemy_turn(dice).unwrap();
            }
            _ => return,
        }
    }
    panic!("戰鬥沒有結束");
}

#[test]
fn test_new_session() {
    let (session, _) = new_session(GAME_TOML);

    assert_eq!(session.position(), 0);
    assert!(matches!(session.phase(), Phase::AwaitingRoll));
    assert_eq!(session.player().max_health, 100);
    assert_eq!(
        session.cells().keys().copied().collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5, 6]
    );
    assert_eq!(
        session.cells()[&1],
        Cell::Ally {
            buff: PermaBuff::Health
        }
    );
    assert_eq!(
        session.cells()[&3],
        Cell::Enemy {
            potion_reward: "DefenseInc Potion".to_string()
        }
    );
}

#[test]
fn test_roll_and_move_lands_on_ally() {
    let (mut session, _) = new_session(GAME_TOML);
    let mut dice = ScriptedDice::new([0]);

    let outcome = session.roll_and_move(&mut dice).unwrap();

    assert_eq!(outcome.steps, 1, "roll_below(6) = 0 擲出 1");
    assert_eq!(outcome.to, 1);
    assert_eq!(
        outcome.landing,
        Landing::Buff {
            buff: PermaBuff::Health,
            amount: 5
        }
    );
    assert_eq!(session.player().max_health, 105);
    assert_eq!(session.player().current_health, 105);
    assert_eq!(
        session.cells().keys().copied().collect::<Vec<_>>(),
        vec![2, 3, 4, 5, 6, 7],
        "從新位置重新生成"
    );
    assert!(matches!(session.phase(), Phase::AwaitingRoll));
}

#[test]
fn test_normal_battle_flow() {
    let (mut session, mut dice) = new_session(GAME_TOML);

    let outcome = session.move_by(3, &mut dice).unwrap();
    let Landing::Battle {
        encounter,
        enemy,
        area,
        events,
    } = outcome.landing
    else {
        panic!("應觸發戰鬥");
    };
    assert_eq!(encounter, Encounter::Normal);
    assert_eq!(enemy, "Wolf");
    assert_eq!(area, Area::Fire);
    assert!(!events.is_empty());

    let battle = session.battle().unwrap();
    assert_eq!(battle.enemy().abilities, vec!["Fire Ball".to_string()], "技能換成區域技能");
    assert!(session.move_by(1, &mut dice).is_err(), "戰鬥中不能移動");

    // 17 - 2 = 15，兩刀擊倒；中間被咬一次 12 - 5 = 7
    fight(&mut session, &mut dice);
    let result = session.conclude_battle(&mut dice).unwrap();

    assert_eq!(result.outcome, BattleOutcome::Victory);
    assert_eq!(
        result.reward,
        Some(RewardGranted::Potion {
            potion: "DefenseInc Potion".to_string(),
            count: 1
        })
    );
    assert_eq!(session.player().current_health, 93);
    assert_eq!(session.player().potion_count("DefenseInc Potion"), 1);
    assert!(matches!(session.phase(), Phase::AwaitingRoll));
    assert_eq!(
        session.cells().keys().copied().collect::<Vec<_>>(),
        vec![4, 5, 6, 7, 8, 9]
    );
}

#[test]
fn test_boss_defeat_is_game_over() {
    let (mut session, mut dice) = new_session(GAME_TOML);

    let outcome = session.move_by(12, &mut dice).unwrap();
    assert!(matches!(
        outcome.landing,
        Landing::Battle {
            encounter: Encounter::Boss { path_index: 12 },
            area: Area::Fire,
            ..
        }
    ));
    let boss = session.battle().unwrap().enemy();
    assert_eq!(
        (boss.max_health, boss.base_attack, boss.base_defense),
        (200, 20, 10),
        "頭目固定屬性"
    );
    assert_eq!(boss.abilities, vec!["Fire Ball".to_string()]);

    fight(&mut session, &mut dice);
    let result = session.conclude_battle(&mut dice).unwrap();

    assert_eq!(result.outcome, BattleOutcome::Defeat);
    assert!(matches!(session.phase(), Phase::GameOver));
    assert!(session.is_over());
    assert!(matches!(
        session.roll_and_move(&mut dice),
        Err(GameError::InvalidPhase { .. })
    ));
}

#[test]
fn test_boss_victory_teaches_skill_once() {
    let strong = GAME_TOML.replace("attack_power = 12", "attack_power = 400");
    let (mut session, mut dice) = new_session(&strong);

    session.move_by(12, &mut dice).unwrap();
    fight(&mut session, &mut dice);
    let result = session.conclude_battle(&mut dice).unwrap();

    assert_eq!(
        result.reward,
        Some(RewardGranted::LearnedAbility("Fire Ball".to_string()))
    );
    assert!(session.player().knows_ability("Fire Ball"));
    assert!(session.defeated_bosses().contains(&12));

    // 再次停在已擊敗的頭目格不會觸發戰鬥
    let outcome = session.move_by(0, &mut dice).unwrap();
    assert_eq!(outcome.landing, Landing::Empty);
    assert!(matches!(session.phase(), Phase::AwaitingRoll));
}

#[test]
fn test_final_boss_finishes_game() {
    let strong = GAME_TOML.replace("attack_power = 12", "attack_power = 400");
    let (mut session, mut dice) = new_session(&strong);

    let outcome = session.move_by(100, &mut dice).unwrap();
    assert_eq!(outcome.to, session.track().last_index());
    assert!(matches!(
        outcome.landing,
        Landing::Battle {
            encounter: Encounter::Final,
            area: Area::Fire,
            ..
        }
    ));

    fight(&mut session, &mut dice);
    let result = session.conclude_battle(&mut dice).unwrap();
    assert_eq!(result.outcome, BattleOutcome::Victory);
    assert_eq!(result.reward, None);
    assert!(matches!(session.phase(), Phase::Finished));
}

#[test]
fn test_reaching_end_without_final_boss() {
    let no_final = GAME_TOML.replace("[final_boss]\ntemplate = \"King\"\n", "");
    let (mut session, mut dice) = new_session(&no_final);

    let outcome = session.move_by(100, &mut dice).unwrap();
    assert_eq!(outcome.landing, Landing::Empty);
    assert!(matches!(session.phase(), Phase::Finished));
}

#[test]
fn test_battle_actions_need_battle() {
    let (mut session, mut dice) = new_session(GAME_TOML);

    assert!(matches!(
        session.player_action("Slash", &mut dice),
        Err(GameError::InvalidPhase { .. })
    ));
    assert!(session.enemy_turn(&mut dice).is_err());
    assert!(session.conclude_battle(&mut dice).is_err());

    session.move_by(3, &mut dice).unwrap();
    assert!(session.conclude_battle(&mut dice).is_err(), "未分出勝負不能結束");
    assert!(session.battle().is_some(), "戰鬥仍在進行");
    assert!(matches!(
        session.player_action("Fire Ball", &mut dice),
        Err(GameError::Battle(_))
    ));
}
