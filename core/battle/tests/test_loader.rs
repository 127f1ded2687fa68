use battle::error::{ErrorKind, LoadError};
use battle::loader::{parse_ability_catalog, parse_enemy_roster};
use battle::{AbilityEffect, TargetType};

const ABILITIES_TOML: &str = r#"
[[abilities]]
name = "Slash"
power = 5
effect = { type = "Damage" }

[[abilities]]
name = "Mend"
power = 15
target = "Self"
effect = { type = "Heal" }

[[abilities]]
name = "Fire Ball"
power = 3
effect = { type = "StatusEffect", effect = "Burn", duration = 3, effect_power = 4 }

[[abilities]]
name = "Guard"
power = 60
target = "Self"
effect = { type = "Block" }
"#;

const ENEMIES_TOML: &str = r#"
[[enemies]]
name = "Goblin"
max_health = 30
attack_power = 8
defense = 2
normal_attack = "Slash"

[[enemies]]
name = "Shaman"
max_health = 25
normal_attack = "Slash"
healing_ability = "Mend"
heal_at_health_percent = 0.5

[[bosses]]
name = "Ifrit"
max_health = 200
attack_power = 20
defense = 10
normal_attack = "Slash"
"#;

#[test]
fn test_parse_abilities() {
    let catalog = parse_ability_catalog(ABILITIES_TOML).unwrap();
    assert_eq!(catalog.len(), 4);

    let mend = &catalog["Mend"];
    assert_eq!(mend.target, TargetType::Caster);
    assert_eq!(mend.effect, AbilityEffect::Heal);

    let slash = &catalog["Slash"];
    assert_eq!(slash.target, TargetType::Enemy, "未指定 target 時預設對敵");
}

#[test]
fn test_parse_enemies() {
    let catalog = parse_ability_catalog(ABILITIES_TOML).unwrap();
    let roster = parse_enemy_roster(ENEMIES_TOML, &catalog).unwrap();

    assert_eq!(
        roster
            .enemies
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Goblin", "Shaman"],
        "一般敵人保留檔案順序"
    );
    let shaman = &roster.enemies[1];
    assert_eq!(shaman.attack_power, 10, "預設攻擊力");
    assert_eq!(shaman.defense, 5, "預設防禦力");
    assert_eq!(shaman.special_ability_chance, 50, "預設特殊技能機率");

    assert_eq!(roster.boss("Ifrit").unwrap().max_health, 200);
    assert!(matches!(
        roster.boss("Dragon").unwrap_err().kind(),
        ErrorKind::Load(LoadError::UnknownEnemyType { .. })
    ));
}

#[test]
fn test_invalid_data() {
    let catalog = parse_ability_catalog(ABILITIES_TOML).unwrap();

    // (說明, enemies.toml 內容)
    let data = [
        (
            "名稱重複",
            "[[enemies]]\nname = \"Goblin\"\n[[enemies]]\nname = \"Goblin\"\n",
        ),
        (
            "未知技能",
            "[[enemies]]\nname = \"Goblin\"\nnormal_attack = \"Fireball\"\n",
        ),
        (
            "特殊技能機率超過 100",
            "[[enemies]]\nname = \"Goblin\"\nspecial_ability_chance = 101\n",
        ),
        (
            "治療門檻過低",
            "[[enemies]]\nname = \"Goblin\"\nheal_at_health_percent = 0.05\n",
        ),
        (
            "生命不為正",
            "[[bosses]]\nname = \"Ifrit\"\nmax_health = 0\n",
        ),
        ("格式錯誤", "[[enemies]]\nmax_health = 10\n"),
    ];

    for (desc, toml_str) in data {
        let result = parse_enemy_roster(toml_str, &catalog);
        let err = result.expect_err(desc);
        let expected = match desc {
            "名稱重複" => matches!(err.kind(), ErrorKind::Load(LoadError::DuplicateName { .. })),
            "未知技能" => matches!(err.kind(), ErrorKind::Load(LoadError::UnknownAbility { .. })),
            "格式錯誤" => matches!(
                err.kind(),
                ErrorKind::Load(LoadError::DeserializeError { .. })
            ),
            _ => matches!(err.kind(), ErrorKind::Load(LoadError::InvalidValue { .. })),
        };
        assert!(expected, "{desc}: {err}");
    }
}

#[test]
fn test_duplicate_ability() {
    let toml_str = r#"
[[abilities]]
name = "Slash"
effect = { type = "Damage" }

[[abilities]]
name = "Slash"
effect = { type = "Damage" }
"#;
    let err = parse_ability_catalog(toml_str).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::Load(LoadError::DuplicateName { .. })
    ));
}

#[test]
fn test_invalid_ability_values() {
    // (說明, 技能效果, 威力, 欄位)
    let data = [
        ("負數治療", r#"{ type = "Heal" }"#, -50, "power"),
        ("負數傷害", r#"{ type = "Damage" }"#, -1, "power"),
        ("格擋機率超過 100", r#"{ type = "Block" }"#, 101, "power"),
        (
            "負數增益",
            r#"{ type = "BuffPotion", buff = "Attack", duration = 3 }"#,
            -5,
            "power",
        ),
        (
            "增益持續為 0",
            r#"{ type = "BuffPotion", buff = "Defense", duration = 0 }"#,
            5,
            "duration",
        ),
        (
            "狀態持續為負",
            r#"{ type = "StatusEffect", effect = "Burn", duration = -2, effect_power = 3 }"#,
            0,
            "duration",
        ),
        (
            "狀態強度為負",
            r#"{ type = "StatusEffect", effect = "Weaken", duration = 2, effect_power = -3 }"#,
            0,
            "effect_power",
        ),
    ];

    for (desc, effect, power, expected_field) in data {
        let toml_str = format!(
            "[[abilities]]\nname = \"Drain\"\npower = {power}\ntarget = \"Self\"\neffect = {effect}\n"
        );
        let err = parse_ability_catalog(&toml_str).expect_err(desc);
        match err.kind() {
            ErrorKind::Load(LoadError::InvalidValue { owner, field, .. }) => {
                assert_eq!(owner, "Drain", "{desc}");
                assert_eq!(*field, expected_field, "{desc}");
            }
            other => panic!("{desc}: 非預期錯誤 {other}"),
        }
        assert!(
            err.to_string().contains("abilities.toml: Drain"),
            "{desc}: 錯誤訊息應帶有來源檔案與技能名稱: {err}"
        );
    }
}

#[test]
fn test_enemy_error_carries_context() {
    let catalog = parse_ability_catalog(ABILITIES_TOML).unwrap();
    let err = parse_enemy_roster(
        "[[enemies]]\nname = \"Goblin\"\nnormal_attack = \"Fireball\"\n",
        &catalog,
    )
    .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("enemies.toml: Goblin"), "{message}");
    assert!(message.contains("loader.rs"), "應記錄呼叫位置: {message}");
}
