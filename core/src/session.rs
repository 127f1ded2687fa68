//! 遊戲流程
//!
//! 擲骰 → 移動 → 依落點觸發：
//! 1. 未擊敗的頭目格：頭目戰，勝利學會該區域技能
//! 2. 終點且設定了最終頭目：最終戰，勝利即通關
//! 3. 同盟格：永久增益
//! 4. 敵人格：一般戰鬥，勝利獲得藥水
//!
//! 戰鬥以外的落點或戰鬥勝利後，從目前位置重新生成前方格子。

use crate::config::{BossCell, FinalBoss, GameData};
use crate::{GameError, GameResult};
use battle::{
    Area, Battle, BattleEvent, BattleOutcome, BattleResult, BattleReward, Combatant, Dice,
};
use board::{spawn_next_cells, Cell, PermaBuff, Track};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum_macros::Display;
use tracing::{debug, info};

/// 每個區域佔的路徑長度
const AREA_SEGMENT_LENGTH: usize = 13;
const AREA_CYCLE: [Area; 4] = [Area::Fire, Area::Snow, Area::Earth, Area::Lightning];

/// 一般戰鬥所在的區域：路徑每 13 格換一個區域，依 火、雪、土、雷 循環
pub fn area_for_path_index(index: usize) -> Area {
    AREA_CYCLE[(index / AREA_SEGMENT_LENGTH) % AREA_CYCLE.len()]
}

#[derive(Debug, Clone)]
pub enum Phase {
    AwaitingRoll,
    InBattle(Box<Battle>),
    /// 玩家戰敗
    GameOver,
    /// 抵達終點或擊敗最終頭目
    Finished,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingRoll => "awaiting a roll",
            Self::InBattle(_) => "in battle",
            Self::GameOver => "game over",
            Self::Finished => "finished",
        }
    }
}

/// 戰鬥來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Encounter {
    Normal,
    Boss { path_index: usize },
    Final,
}

/// 落點結算結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "landing")]
pub enum Landing {
    Battle {
        encounter: Encounter,
        enemy: String,
        area: Area,
        events: Vec<BattleEvent>,
    },
    Buff {
        buff: PermaBuff,
        amount: i32,
    },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveOutcome {
    pub steps: usize,
    pub from: usize,
    pub to: usize,
    pub landing: Landing,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    data: GameData,
    track: Track,
    /// 戰鬥外的玩家狀態；戰鬥中以 Battle 內的為準，結束後寫回
    player: Combatant,
    position: usize,
    cells: BTreeMap<usize, Cell>,
    defeated_bosses: BTreeSet<usize>,
    encounter: Option<Encounter>,
    phase: Phase,
}

impl GameSession {
    pub fn new(data: GameData, dice: &mut impl Dice) -> GameResult<Self> {
        data.validate()?;
        let track = Track::new(data.config.color)?;
        let player = data.config.player.build();
        let cells = spawn_next_cells(&track, 0, &data.config.spawner, dice)?;
        info!(color = %track.color(), player = %player.name, "session started");

        Ok(Self {
            data,
            track,
            player,
            position: 0,
            cells,
            defeated_bosses: BTreeSet::new(),
            encounter: None,
            phase: Phase::AwaitingRoll,
        })
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn cells(&self) -> &BTreeMap<usize, Cell> {
        &self.cells
    }

    pub fn defeated_bosses(&self) -> &BTreeSet<usize> {
        &self.defeated_bosses
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn encounter(&self) -> Option<Encounter> {
        self.encounter
    }

    pub fn battle(&self) -> Option<&Battle> {
        match &self.phase {
            Phase::InBattle(battle) => Some(battle.as_ref()),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver | Phase::Finished)
    }

    /// 擲骰並移動
    pub fn roll_and_move(&mut self, dice: &mut impl Dice) -> GameResult<MoveOutcome> {
        self.expect_awaiting_roll("roll")?;
        let steps = dice.roll_die(self.data.config.die_faces) as usize;
        debug!(steps, "rolled");
        self.move_by(steps, dice)
    }

    /// 移動指定步數並結算落點
    pub fn move_by(&mut self, steps: usize, dice: &mut impl Dice) -> GameResult<MoveOutcome> {
        self.expect_awaiting_roll("move")?;
        let from = self.position;
        let to = self.track.advance(from, steps);
        self.position = to;
        info!(from, to, "player moved");

        let landing = self.resolve_landing(dice)?;
        Ok(MoveOutcome {
            steps,
            from,
            to,
            landing,
        })
    }

    pub fn player_action(
        &mut self,
        ability: &str,
        dice: &mut impl Dice,
    ) -> GameResult<Vec<BattleEvent>> {
        match &mut self.phase {
            Phase::InBattle(battle) => Ok(battle.player_action(ability, &self.data.abilities, dice)?),
            other => Err(invalid_phase("act", other)),
        }
    }

    pub fn enemy_turn(&mut self, dice: &mut impl Dice) -> GameResult<Vec<BattleEvent>> {
        match &mut self.phase {
            Phase::InBattle(battle) => Ok(battle.enemy_turn(&self.data.abilities, dice)?),
            other => Err(invalid_phase("run the enemy turn", other)),
        }
    }

    /// 結束已分出勝負的戰鬥
    ///
    /// 勝利：寫回玩家狀態，頭目格標記為已擊敗，重新生成前方格子；最終戰勝利即通關。
    /// 戰敗：遊戲結束。
    pub fn conclude_battle(&mut self, dice: &mut impl Dice) -> GameResult<BattleResult> {
        let result = match &mut self.phase {
            Phase::InBattle(battle) => battle.finish()?,
            other => return Err(invalid_phase("conclude a battle", other)),
        };
        let encounter = self.encounter.take().unwrap_or(Encounter::Normal);
        self.player = result.player.clone();

        match result.outcome {
            BattleOutcome::Defeat => {
                info!(%encounter, "player was defeated");
                self.phase = Phase::GameOver;
            }
            BattleOutcome::Victory => {
                info!(%encounter, reward = ?result.reward, "battle won");
                match encounter {
                    Encounter::Final => self.phase = Phase::Finished,
                    Encounter::Boss { path_index } => {
                        self.defeated_bosses.insert(path_index);
                        self.end_turn(dice)?;
                    }
                    Encounter::Normal => self.end_turn(dice)?,
                }
            }
        }
        Ok(result)
    }

    fn resolve_landing(&mut self, dice: &mut impl Dice) -> GameResult<Landing> {
        let index = self.position;

        let boss = self
            .data
            .config
            .boss_at(index)
            .filter(|_| !self.defeated_bosses.contains(&index))
            .cloned();
        if let Some(boss) = boss {
            return self.start_boss_battle(&boss);
        }
        if index == self.track.last_index() {
            if let Some(final_boss) = self.data.config.final_boss.clone() {
                return self.start_final_battle(&final_boss);
            }
        }

        match self.cells.get(&index).cloned() {
            Some(Cell::Ally { buff }) => {
                let amount = buff.apply(&mut self.player);
                self.end_turn(dice)?;
                Ok(Landing::Buff { buff, amount })
            }
            Some(Cell::Enemy { potion_reward }) => self.start_normal_battle(potion_reward, dice),
            None => {
                self.end_turn(dice)?;
                Ok(Landing::Empty)
            }
        }
    }

    fn start_normal_battle(
        &mut self,
        potion_reward: String,
        dice: &mut impl Dice,
    ) -> GameResult<Landing> {
        let area = area_for_path_index(self.position);
        let enemies = &self.data.roster.enemies;
        let template = enemies
            .get(dice.pick_index(enemies.len()))
            .ok_or(GameError::NoEnemies)?;
        let area_ability = self.data.config.area_abilities.get(area).clone();
        let enemy = Combatant::area_enemy(template, area_ability);

        self.start_battle(
            enemy,
            area,
            BattleReward::potion(potion_reward),
            Encounter::Normal,
        )
    }

    fn start_boss_battle(&mut self, boss: &BossCell) -> GameResult<Landing> {
        let template = self.data.roster.boss(&boss.template)?;
        let skill = self.data.config.area_abilities.get(boss.area).clone();
        let enemy = Combatant::boss(template, skill.clone());

        self.start_battle(
            enemy,
            boss.area,
            BattleReward::skill(skill),
            Encounter::Boss {
                path_index: boss.path_index,
            },
        )
    }

    fn start_final_battle(&mut self, final_boss: &FinalBoss) -> GameResult<Landing> {
        let template = self.data.roster.boss(&final_boss.template)?;
        let enemy = Combatant::from_enemy_type(template);

        self.start_battle(
            enemy,
            final_boss.area,
            BattleReward::default(),
            Encounter::Final,
        )
    }

    fn start_battle(
        &mut self,
        enemy: Combatant,
        area: Area,
        reward: BattleReward,
        encounter: Encounter,
    ) -> GameResult<Landing> {
        let enemy_name = enemy.name.clone();
        let mut battle = Battle::new(self.player.clone(), enemy, area, reward);
        let events = battle.begin(&self.data.abilities)?;
        info!(%encounter, enemy = %enemy_name, %area, "battle started");

        self.phase = Phase::InBattle(Box::new(battle));
        self.encounter = Some(encounter);
        Ok(Landing::Battle {
            encounter,
            enemy: enemy_name,
            area,
            events,
        })
    }

    /// 回合結束：抵達終點則通關，否則重新生成前方格子
    fn end_turn(&mut self, dice: &mut impl Dice) -> GameResult<()> {
        if self.position >= self.track.last_index() {
            info!(position = self.position, "reached the end of the track");
            self.phase = Phase::Finished;
            return Ok(());
        }
        self.cells = spawn_next_cells(
            &self.track,
            self.position,
            &self.data.config.spawner,
            dice,
        )?;
        self.phase = Phase::AwaitingRoll;
        Ok(())
    }

    fn expect_awaiting_roll(&self, action: &'static str) -> GameResult<()> {
        match &self.phase {
            Phase::AwaitingRoll => Ok(()),
            other => Err(invalid_phase(action, other)),
        }
    }
}

fn invalid_phase(action: &'static str, phase: &Phase) -> GameError {
    GameError::InvalidPhase {
        action,
        phase: phase.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_for_path_index() {
        // (路徑索引, 預期區域)
        let data = [
            (0, Area::Fire),
            (12, Area::Fire),
            (13, Area::Snow),
            (25, Area::Snow),
            (26, Area::Earth),
            (38, Area::Earth),
            (39, Area::Lightning),
            (51, Area::Lightning),
            (52, Area::Fire),
            (56, Area::Fire),
        ];
        for (index, expected) in data {
            assert_eq!(area_for_path_index(index), expected, "索引 {index}");
        }
    }

    #[test]
    fn test_phase_name() {
        assert_eq!(Phase::AwaitingRoll.name(), "awaiting a roll");
        assert_eq!(
            invalid_phase("act", &Phase::GameOver).to_string(),
            "Cannot act while game over"
        );
    }
}
