//! 遊戲資料載入器
//!
//! 反序列化 TOML 並檢查資料一致性（名稱重複、數值範圍、技能參照）。

use crate::domain::constants::{MAX_HEAL_AT_HEALTH_PERCENT, MAX_PERCENT, MIN_HEAL_AT_HEALTH_PERCENT};
use crate::error::{Context, LoadError, Result};
use crate::loader_schema::{
    AbilitiesToml, Ability, AbilityCatalog, AbilityEffect, EnemiesToml, EnemyCatalog, EnemyType,
};
use std::collections::HashMap;
use tracing::debug;

const ABILITIES_FORMAT: &str = "abilities.toml";
const ENEMIES_FORMAT: &str = "enemies.toml";

/// 一般敵人與頭目模板
#[derive(Debug, Clone, Default)]
pub struct EnemyRoster {
    /// 保留檔案順序，隨機挑選時依此索引
    pub enemies: Vec<EnemyType>,
    pub bosses: EnemyCatalog,
}

impl EnemyRoster {
    pub fn boss(&self, name: &str) -> Result<&EnemyType> {
        self.bosses.get(name).ok_or_else(|| {
            LoadError::UnknownEnemyType {
                name: name.to_string(),
            }
            .into()
        })
    }
}

/// 反序列化 abilities.toml
pub fn parse_ability_catalog(abilities_toml: &str) -> Result<AbilityCatalog> {
    let parsed: AbilitiesToml =
        toml::from_str(abilities_toml).map_err(|e| LoadError::DeserializeError {
            format: ABILITIES_FORMAT.to_string(),
            reason: e.to_string(),
        })?;

    for ability in &parsed.abilities {
        validate_ability(ability).context(format!("{ABILITIES_FORMAT}: {}", ability.name))?;
    }

    let catalog = collect_unique(
        ABILITIES_FORMAT,
        parsed.abilities,
        |ability| ability.name.clone(),
    )
    .context(ABILITIES_FORMAT)?;
    debug!(count = catalog.len(), "abilities loaded");
    Ok(catalog)
}

/// 反序列化 enemies.toml 並驗證技能參照
pub fn parse_enemy_roster(enemies_toml: &str, catalog: &AbilityCatalog) -> Result<EnemyRoster> {
    let parsed: EnemiesToml =
        toml::from_str(enemies_toml).map_err(|e| LoadError::DeserializeError {
            format: ENEMIES_FORMAT.to_string(),
            reason: e.to_string(),
        })?;

    for enemy in parsed.enemies.iter().chain(parsed.bosses.iter()) {
        validate_enemy_type(enemy, catalog)
            .context(format!("{ENEMIES_FORMAT}: {}", enemy.name))?;
    }

    // 只用來檢查一般敵人名稱重複
    collect_unique(ENEMIES_FORMAT, parsed.enemies.clone(), |e| e.name.clone())
        .context(ENEMIES_FORMAT)?;
    let bosses = collect_unique(ENEMIES_FORMAT, parsed.bosses, |e| e.name.clone())
        .context(ENEMIES_FORMAT)?;
    debug!(
        enemies = parsed.enemies.len(),
        bosses = bosses.len(),
        "enemies loaded"
    );

    Ok(EnemyRoster {
        enemies: parsed.enemies,
        bosses,
    })
}

/// 檢查技能數值：威力與持續回合不可為負，格擋機率介於 0..=100
pub fn validate_ability(ability: &Ability) -> Result<()> {
    let invalid = |field: &'static str, reason: &str| -> crate::error::Error {
        LoadError::InvalidValue {
            owner: ability.name.clone(),
            field,
            reason: reason.to_string(),
        }
        .into()
    };

    match &ability.effect {
        AbilityEffect::Damage | AbilityEffect::Heal => {
            if ability.power < 0 {
                return Err(invalid("power", "不可為負"));
            }
        }
        AbilityEffect::Block => {
            if !(0..=MAX_PERCENT as i32).contains(&ability.power) {
                return Err(invalid("power", "格擋機率必須介於 0..=100"));
            }
        }
        AbilityEffect::BuffPotion { duration, .. } => {
            if ability.power < 0 {
                return Err(invalid("power", "不可為負"));
            }
            if *duration <= 0 {
                return Err(invalid("duration", "必須大於 0"));
            }
        }
        AbilityEffect::StatusEffect {
            duration,
            effect_power,
            ..
        } => {
            if *duration <= 0 {
                return Err(invalid("duration", "必須大於 0"));
            }
            if *effect_power < 0 {
                return Err(invalid("effect_power", "不可為負"));
            }
        }
    }
    Ok(())
}

/// 檢查敵人模板的數值範圍與技能參照
pub fn validate_enemy_type(enemy: &EnemyType, catalog: &AbilityCatalog) -> Result<()> {
    if enemy.max_health <= 0 {
        return Err(invalid(enemy, "max_health", "必須大於 0"));
    }
    if enemy.special_ability_chance > MAX_PERCENT {
        return Err(invalid(enemy, "special_ability_chance", "必須介於 0..=100"));
    }
    if !(MIN_HEAL_AT_HEALTH_PERCENT..=MAX_HEAL_AT_HEALTH_PERCENT)
        .contains(&enemy.heal_at_health_percent)
    {
        return Err(invalid(enemy, "heal_at_health_percent", "必須介於 0.1..=1.0"));
    }

    let referenced = enemy
        .abilities
        .iter()
        .chain(enemy.normal_attack.iter())
        .chain(enemy.healing_ability.iter());
    for ability in referenced {
        if !catalog.contains_key(ability) {
            return Err(LoadError::UnknownAbility {
                owner: enemy.name.clone(),
                ability: ability.clone(),
            }
            .into());
        }
    }
    Ok(())
}

fn invalid(enemy: &EnemyType, field: &'static str, reason: &str) -> crate::error::Error {
    LoadError::InvalidValue {
        owner: enemy.name.clone(),
        field,
        reason: reason.to_string(),
    }
    .into()
}

fn collect_unique<T>(
    format: &str,
    items: Vec<T>,
    key: impl Fn(&T) -> String,
) -> Result<HashMap<String, T>> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        let name = key(&item);
        if map.contains_key(&name) {
            return Err(LoadError::DuplicateName {
                format: format.to_string(),
                name,
            }
            .into());
        }
        map.insert(name, item);
    }
    Ok(map)
}
