use battle::test_helpers::ScriptedDice;
use battle::{BattleEvent, Combatant, DamageOutcome, DamageSource, EffectKind, Side};

fn dummy() -> Combatant {
    Combatant::new("dummy", 40, 10, 5)
}

#[test]
fn test_tick_runs_from_last_to_first() {
    let mut dice = ScriptedDice::default();
    let mut unit = dummy();
    unit.add_status_effect(EffectKind::AttackUp { attack_increase: 2 }, 1);
    unit.add_status_effect(EffectKind::Burn { damage: 8 }, 1);

    let events = unit.tick_status_effects(Side::Enemy, &mut dice);

    assert_eq!(
        events,
        vec![
            BattleEvent::DamageTaken {
                side: Side::Enemy,
                source: DamageSource::Burn,
                amount: 3,
                remaining_health: 37,
            },
            BattleEvent::EffectExpired {
                side: Side::Enemy,
                effect: EffectKind::Burn { damage: 8 },
            },
            BattleEvent::EffectExpired {
                side: Side::Enemy,
                effect: EffectKind::AttackUp { attack_increase: 2 },
            },
        ]
    );
    assert!(unit.status_effects.is_empty());
}

#[test]
fn test_burn_consumes_block() {
    let mut dice = ScriptedDice::new([10]);
    let mut unit = dummy();
    unit.add_status_effect(EffectKind::ChanceToBlock { block_chance: 60 }, 2);
    unit.add_status_effect(EffectKind::Burn { damage: 8 }, 3);

    let events = unit.tick_status_effects(Side::Player, &mut dice);

    assert_eq!(
        events,
        vec![BattleEvent::DamageBlocked {
            side: Side::Player,
            source: DamageSource::Burn,
            roll: 10,
            chance: 60,
        }],
        "格擋被燃燒消耗後不再結算"
    );
    assert_eq!(unit.current_health, 40);
    assert_eq!(unit.status_effects.len(), 1);
    assert_eq!(unit.status_effects[0].duration, 2);
}

#[test]
fn test_derived_stats() {
    let mut unit = dummy();
    // (說明, 效果, 預期攻擊, 預期防禦)
    let data = [
        ("攻擊提升", EffectKind::AttackUp { attack_increase: 3 }, 13, 5),
        ("虛弱疊加", EffectKind::Weaken { attack_reduction: 5 }, 8, 5),
        ("防禦提升", EffectKind::DefenseUp { defense_increase: 2 }, 8, 7),
        ("易傷可使防禦為負", EffectKind::Vulnerable { defense_reduction: 9 }, 8, -2),
    ];

    for (desc, kind, attack, defense) in data {
        unit.add_status_effect(kind, 2);
        assert_eq!(unit.attack_power(), attack, "{desc}");
        assert_eq!(unit.defense(), defense, "{desc}");
    }

    let mut dice = ScriptedDice::default();
    assert_eq!(
        unit.take_damage(3, &mut dice),
        DamageOutcome::Hit {
            amount: 5,
            remaining_health: 35
        },
        "負防禦會加重傷害"
    );

    unit.clear_status_effects();
    assert_eq!(unit.attack_power(), 10, "效果移除後恢復基礎值");
    assert_eq!(unit.defense(), 5);
}

#[test]
fn test_damage_floor_and_clamp() {
    let mut dice = ScriptedDice::default();
    let mut unit = dummy();

    // (說明, 原始傷害, 預期傷害, 預期剩餘生命)
    let data = [
        ("低於防禦仍造成 1 點", 1, 1, 39),
        ("扣除防禦", 20, 15, 24),
        ("生命不低於 0", 100, 95, 0),
    ];
    for (desc, raw, amount, remaining_health) in data {
        assert_eq!(
            unit.take_damage(raw, &mut dice),
            DamageOutcome::Hit {
                amount,
                remaining_health
            },
            "{desc}"
        );
    }
    assert!(unit.is_defeated());
}

#[test]
fn test_heal_and_growth() {
    let mut unit = dummy();
    unit.current_health = 30;
    assert_eq!(unit.heal(25), 10, "回復量不超過最大生命");
    assert_eq!(unit.current_health, 40);

    unit.current_health = 10;
    assert_eq!(unit.heal(-50), 0, "負數回復不會扣血");
    assert_eq!(unit.current_health, 10);

    unit.current_health = 20;
    unit.grow_max_health(5);
    assert_eq!(unit.max_health, 45);
    assert_eq!(unit.current_health, 25);

    unit.grow_attack(1);
    unit.grow_defense(1);
    assert_eq!(unit.attack_power(), 11);
    assert_eq!(unit.defense(), 6);
}

#[test]
fn test_stacked_stuns() {
    let mut dice = ScriptedDice::default();
    let mut unit = dummy();
    unit.add_status_effect(EffectKind::Stun, 2);
    unit.add_status_effect(EffectKind::Stun, 1);
    assert!(unit.is_stunned());

    unit.tick_status_effects(Side::Enemy, &mut dice);
    assert!(unit.is_stunned(), "仍有一個暈眩未結束");

    unit.tick_status_effects(Side::Enemy, &mut dice);
    assert!(!unit.is_stunned());
    assert!(unit.status_effects.is_empty());
}

#[test]
fn test_potion_inventory() {
    let mut unit = dummy();
    assert!(!unit.is_potion("Heal Potion"));
    assert!(unit.use_potion("Heal Potion").is_err());

    assert_eq!(unit.add_potion("Heal Potion".to_string(), 2), 2);
    assert_eq!(unit.use_potion("Heal Potion").unwrap(), 1);
    assert_eq!(unit.use_potion("Heal Potion").unwrap(), 0);
    assert!(unit.use_potion("Heal Potion").is_err());
    assert!(unit.is_potion("Heal Potion"), "數量為 0 仍留在背包");
}
