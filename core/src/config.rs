//! 遊戲設定與資料載入
//!
//! 內容分成三個 TOML 檔：
//! - abilities.toml：技能與藥水
//! - enemies.toml：一般敵人與頭目模板
//! - game.toml：玩家初始狀態、生成規則、區域技能、頭目格

use crate::{GameError, GameResult};
use battle::domain::alias::EnemyTypeName;
use battle::loader::{parse_ability_catalog, parse_enemy_roster, EnemyRoster};
use battle::loader_schema::AbilityCatalog;
use battle::{AbilityName, Area, Combatant};
use board::path::TRACK_LENGTH;
use board::{PlayerColor, SpawnerConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::info;

const GAME_FORMAT: &str = "game.toml";

const LAST_INDEX: usize = TRACK_LENGTH - 1;

/// 擲骰移動使用的骰子面數
pub const DEFAULT_DIE_FACES: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player_name")]
    pub name: String,
    pub max_health: i32,
    pub attack_power: i32,
    pub defense: i32,
    #[serde(default)]
    pub abilities: Vec<AbilityName>,
    /// 初始藥水：名稱 -> 數量
    #[serde(default)]
    pub potions: BTreeMap<AbilityName, u32>,
}

fn default_player_name() -> String {
    "Player".to_string()
}

impl PlayerConfig {
    pub fn build(&self) -> Combatant {
        let mut player = Combatant::new(
            self.name.clone(),
            self.max_health,
            self.attack_power,
            self.defense,
        )
        .with_abilities(self.abilities.clone());
        for (potion, count) in &self.potions {
            player.add_potion(potion.clone(), *count);
        }
        player
    }
}

/// 各區域敵人獲得的特殊技能，也是該區域頭目教的技能
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaAbilities {
    pub fire: AbilityName,
    pub earth: AbilityName,
    pub lightning: AbilityName,
    pub snow: AbilityName,
}

impl AreaAbilities {
    pub fn get(&self, area: Area) -> &AbilityName {
        match area {
            Area::Fire => &self.fire,
            Area::Earth => &self.earth,
            Area::Lightning => &self.lightning,
            Area::Snow => &self.snow,
        }
    }
}

/// 固定位置的頭目格
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossCell {
    pub path_index: usize,
    pub area: Area,
    pub template: EnemyTypeName,
}

/// 終點的最終頭目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalBoss {
    pub template: EnemyTypeName,
    #[serde(default = "default_final_area")]
    pub area: Area,
}

fn default_final_area() -> Area {
    Area::Fire
}

/// game.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub player: PlayerConfig,
    #[serde(default)]
    pub color: PlayerColor,
    #[serde(default = "default_die_faces")]
    pub die_faces: u32,
    #[serde(default)]
    pub spawner: SpawnerConfig,
    pub area_abilities: AreaAbilities,
    #[serde(default)]
    pub bosses: Vec<BossCell>,
    #[serde(default)]
    pub final_boss: Option<FinalBoss>,
}

fn default_die_faces() -> u32 {
    DEFAULT_DIE_FACES
}

impl GameConfig {
    pub fn from_toml(game_toml: &str) -> GameResult<Self> {
        toml::from_str(game_toml).map_err(|e| GameError::Deserialize {
            format: GAME_FORMAT.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn boss_at(&self, path_index: usize) -> Option<&BossCell> {
        self.bosses.iter().find(|b| b.path_index == path_index)
    }
}

/// 已驗證的完整遊戲資料
#[derive(Debug, Clone)]
pub struct GameData {
    pub abilities: AbilityCatalog,
    pub roster: EnemyRoster,
    pub config: GameConfig,
}

impl GameData {
    /// 解析三個 TOML 檔並檢查所有參照
    pub fn from_toml(abilities_toml: &str, enemies_toml: &str, game_toml: &str) -> GameResult<Self> {
        let abilities = parse_ability_catalog(abilities_toml)?;
        let roster = parse_enemy_roster(enemies_toml, &abilities)?;
        let config = GameConfig::from_toml(game_toml)?;

        let data = Self {
            abilities,
            roster,
            config,
        };
        data.validate()?;
        info!(
            abilities = data.abilities.len(),
            enemies = data.roster.enemies.len(),
            bosses = data.roster.bosses.len(),
            "game data loaded"
        );
        Ok(data)
    }

    pub fn validate(&self) -> GameResult<()> {
        let config = &self.config;

        if config.player.max_health <= 0 {
            return Err(invalid("player.max_health", "must be positive"));
        }
        if config.die_faces == 0 {
            return Err(invalid("die_faces", "must be at least 1"));
        }
        if self.roster.enemies.is_empty() {
            return Err(GameError::NoEnemies);
        }
        config.spawner.validate()?;

        let player = &config.player.name;
        let area = "area_abilities".to_string();
        let spawner = "spawner".to_string();
        let referenced = config
            .player
            .abilities
            .iter()
            .chain(config.player.potions.keys())
            .map(|a| (player, a))
            .chain(
                Area::iter().map(|a| (&area, config.area_abilities.get(a))),
            )
            .chain(config.spawner.potion_rewards.iter().map(|a| (&spawner, a)));
        for (owner, ability) in referenced {
            if !self.abilities.contains_key(ability) {
                return Err(GameError::UnknownAbility {
                    owner: owner.clone(),
                    ability: ability.clone(),
                });
            }
        }

        let mut seen = Vec::with_capacity(config.bosses.len());
        for boss in &config.bosses {
            // 終點保留給最終頭目
            if boss.path_index == 0 || boss.path_index >= LAST_INDEX {
                return Err(invalid(
                    "bosses.path_index",
                    &format!("{} is outside 1..{LAST_INDEX}", boss.path_index),
                ));
            }
            if seen.contains(&boss.path_index) {
                return Err(invalid(
                    "bosses.path_index",
                    &format!("{} is used twice", boss.path_index),
                ));
            }
            seen.push(boss.path_index);
            self.roster.boss(&boss.template)?;
        }
        if let Some(final_boss) = &config.final_boss {
            self.roster.boss(&final_boss.template)?;
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> GameError {
    GameError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
