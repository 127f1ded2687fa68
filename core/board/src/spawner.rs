//! 格子生成
//!
//! 每次在玩家前方生成 dice_face 格：前 min_ally_cells 格為同盟格，
//! 其餘為敵人格，整批洗牌後依序放在玩家之後的路徑上。

use crate::cell::{Cell, PermaBuff};
use crate::error::{Error, Result};
use crate::path::Track;
use battle::{AbilityName, Dice};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::debug;

pub const DEFAULT_DICE_FACE: usize = 6;
pub const DEFAULT_MIN_ALLY_CELLS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// 每次生成的格數，與骰子面數相同
    pub dice_face: usize,
    pub min_ally_cells: usize,
    /// 敵人格可能給予的藥水
    pub potion_rewards: Vec<AbilityName>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            dice_face: DEFAULT_DICE_FACE,
            min_ally_cells: DEFAULT_MIN_ALLY_CELLS,
            potion_rewards: Vec::new(),
        }
    }
}

impl SpawnerConfig {
    pub fn validate(&self) -> Result<()> {
        let func = "SpawnerConfig::validate";

        if self.min_ally_cells > self.dice_face {
            return Err(Error::InvalidSpawnerConfig {
                func,
                dice_face: self.dice_face,
                min_ally_cells: self.min_ally_cells,
            });
        }
        if self.dice_face > self.min_ally_cells && self.potion_rewards.is_empty() {
            return Err(Error::NoPotionRewards { func });
        }
        Ok(())
    }
}

/// 產生洗牌後的生成計畫
pub fn generate_spawn_plan(config: &SpawnerConfig, dice: &mut impl Dice) -> Result<Vec<Cell>> {
    config.validate()?;

    let buffs: Vec<PermaBuff> = PermaBuff::iter().collect();
    let mut plan = Vec::with_capacity(config.dice_face);
    for _ in 0..config.min_ally_cells {
        let buff = buffs[dice.pick_index(buffs.len())];
        plan.push(Cell::Ally { buff });
    }
    for _ in config.min_ally_cells..config.dice_face {
        let potion = &config.potion_rewards[dice.pick_index(config.potion_rewards.len())];
        plan.push(Cell::Enemy {
            potion_reward: potion.clone(),
        });
    }

    dice.shuffle(&mut plan);
    Ok(plan)
}

/// 在 player_index 之後放置新的一批格子，取代舊的一批
///
/// 第 i 格放在 min(player_index + i + 1, 終點)；靠近終點時多格會落在同一索引，
/// 以先放的為準。
pub fn spawn_next_cells(
    track: &Track,
    player_index: usize,
    config: &SpawnerConfig,
    dice: &mut impl Dice,
) -> Result<BTreeMap<usize, Cell>> {
    if player_index >= track.len() {
        return Err(Error::IndexOutOfTrack {
            func: "spawn_next_cells",
            index: player_index,
            len: track.len(),
        });
    }

    let plan = generate_spawn_plan(config, dice)?;
    let mut cells = BTreeMap::new();
    for (i, cell) in plan.into_iter().enumerate() {
        let index = track.advance(player_index, i + 1);
        cells.entry(index).or_insert(cell);
    }
    debug!(player_index, count = cells.len(), "cells spawned");
    Ok(cells)
}
