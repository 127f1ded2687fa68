//! battle.rs：
//! - 負責戰鬥流程與回合管理（開場、玩家回合、敵方回合、勝負判定、獎勵發放）。
//! - 技能效果由 logic::ability 結算，敵方行動由 logic::ai 決定。
//! - 每個操作回傳本次產生的事件，完整歷程保存在 log 中。
use crate::dice::Dice;
use crate::domain::alias::AbilityName;
use crate::domain::core_types::{Area, BattleState, Side};
use crate::error::{AbilityError, BattleError, Context, LoadError, Result};
use crate::event::BattleEvent;
use crate::loader_schema::{Ability, AbilityCatalog, TargetType};
use crate::logic::ability::execute_ability;
use crate::logic::ai::{decide_action, EnemyAction};
use crate::logic::combatant::Combatant;
use serde::{Deserialize, Serialize};
use tracing::info;

/// 戰鬥勝利時的獎勵設定
///
/// 頭目技能優先；已會該技能時才改發藥水。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReward {
    pub skill: Option<AbilityName>,
    pub potion: Option<AbilityName>,
}

impl BattleReward {
    pub fn potion(potion: impl Into<AbilityName>) -> Self {
        Self {
            skill: None,
            potion: Some(potion.into()),
        }
    }

    pub fn skill(skill: impl Into<AbilityName>) -> Self {
        Self {
            skill: Some(skill.into()),
            potion: None,
        }
    }
}

/// 實際發放的獎勵
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardGranted {
    LearnedAbility(AbilityName),
    Potion { potion: AbilityName, count: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    /// 戰鬥後的玩家（戰鬥內狀態效果已清除）
    pub player: Combatant,
    pub reward: Option<RewardGranted>,
}

#[derive(Debug, Clone)]
pub struct Battle {
    state: BattleState,
    area: Area,
    reward: BattleReward,
    player: Combatant,
    enemy: Combatant,
    round: u32,
    granted: Option<RewardGranted>,
    log: Vec<BattleEvent>,
}

impl Battle {
    pub fn new(player: Combatant, enemy: Combatant, area: Area, reward: BattleReward) -> Self {
        let mut battle = Self {
            state: BattleState::Inactive,
            area,
            reward,
            player,
            enemy,
            round: 0,
            granted: None,
            log: Vec::new(),
        };
        let mut events = Vec::new();
        battle.transition(BattleState::Starting, &mut events);
        battle.log.extend(events);
        battle
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn reward(&self) -> &BattleReward {
        &self.reward
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    /// 已進行的敵方回合數
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// 開場：確認雙方技能都存在於技能表，進入玩家回合
    pub fn begin(&mut self, catalog: &AbilityCatalog) -> Result<Vec<BattleEvent>> {
        if self.state != BattleState::Starting {
            return Err(BattleError::CannotBegin { state: self.state }.into());
        }
        for unit in [&self.player, &self.enemy] {
            ensure_abilities_known(unit, catalog).context("戰鬥開場")?;
        }

        let mut events = vec![BattleEvent::EnemyAppeared {
            name: self.enemy.name.clone(),
        }];
        info!(enemy = %self.enemy.name, area = %self.area, "battle begins");
        self.transition(BattleState::PlayerTurn, &mut events);
        self.log.extend(events.iter().cloned());
        Ok(events)
    }

    /// 玩家行動
    ///
    /// 背包中的藥水一律作用於自己並消耗一瓶；數量為 0 時回傳錯誤，仍維持玩家回合。
    pub fn player_action(
        &mut self,
        ability_name: &str,
        catalog: &AbilityCatalog,
        dice: &mut impl Dice,
    ) -> Result<Vec<BattleEvent>> {
        if self.state != BattleState::PlayerTurn {
            return Err(BattleError::NotPlayerTurn { state: self.state }.into());
        }
        let ability = lookup(catalog, ability_name).context("玩家行動")?;
        let is_potion = self.player.is_potion(ability_name);
        if is_potion && self.player.potion_count(ability_name) == 0 {
            return Err(AbilityError::NoPotionsLeft {
                potion: ability_name.to_string(),
            }
            .into());
        }
        if !is_potion && !self.player.knows_ability(ability_name) {
            return Err(AbilityError::AbilityNotKnown {
                combatant: self.player.name.clone(),
                ability: ability_name.to_string(),
            }
            .into());
        }

        let mut events = vec![BattleEvent::AbilityUsed {
            side: Side::Player,
            ability: ability.name.clone(),
        }];
        let target = if is_potion {
            let remaining = self.player.use_potion(ability_name)?;
            events.push(BattleEvent::PotionConsumed {
                potion: ability.name.clone(),
                remaining,
            });
            TargetType::Caster
        } else {
            ability.target
        };

        events.extend(execute_ability(
            ability,
            target,
            &mut self.player,
            Side::Player,
            &mut self.enemy,
            dice,
        ));

        if self.enemy.is_defeated() {
            self.win(&mut events);
        } else {
            self.transition(BattleState::EnemyTurn, &mut events);
        }
        self.log.extend(events.iter().cloned());
        Ok(events)
    }

    /// 敵方回合
    ///
    /// 1. 結算敵方狀態效果（燃燒致死直接獲勝）
    /// 2. 未暈眩則由 AI 選擇行動
    /// 3. 玩家生命歸零則落敗
    /// 4. 結算玩家狀態效果；玩家暈眩時維持敵方回合，由敵方再行動一次
    pub fn enemy_turn(
        &mut self,
        catalog: &AbilityCatalog,
        dice: &mut impl Dice,
    ) -> Result<Vec<BattleEvent>> {
        if self.state != BattleState::EnemyTurn {
            return Err(BattleError::NotEnemyTurn { state: self.state }.into());
        }
        // 先確認技能都查得到，失敗時戰鬥狀態不變
        ensure_abilities_known(&self.enemy, catalog).context("敵方回合")?;
        self.round += 1;
        let mut events = self.enemy.tick_status_effects(Side::Enemy, dice);

        if self.enemy.is_defeated() {
            self.win(&mut events);
            self.log.extend(events.iter().cloned());
            return Ok(events);
        }

        if self.enemy.is_stunned() {
            events.push(BattleEvent::TurnSkipped { side: Side::Enemy });
        } else {
            match decide_action(&self.enemy, dice) {
                EnemyAction::Heal(name) => {
                    let ability = lookup(catalog, &name)?;
                    events.push(BattleEvent::AbilityUsed {
                        side: Side::Enemy,
                        ability: name.clone(),
                    });
                    events.extend(execute_ability(
                        ability,
                        TargetType::Caster,
                        &mut self.enemy,
                        Side::Enemy,
                        &mut self.player,
                        dice,
                    ));
                }
                EnemyAction::UseAbility(name) => {
                    let ability = lookup(catalog, &name)?;
                    events.push(BattleEvent::AbilityUsed {
                        side: Side::Enemy,
                        ability: name.clone(),
                    });
                    events.extend(execute_ability(
                        ability,
                        ability.target,
                        &mut self.enemy,
                        Side::Enemy,
                        &mut self.player,
                        dice,
                    ));
                }
                EnemyAction::NoMoves => {
                    events.push(BattleEvent::NoMoves { side: Side::Enemy });
                }
            }
        }

        if self.player.is_defeated() {
            self.transition(BattleState::Lost, &mut events);
            self.log.extend(events.iter().cloned());
            return Ok(events);
        }

        events.extend(self.player.tick_status_effects(Side::Player, dice));
        if self.player.is_defeated() {
            self.transition(BattleState::Lost, &mut events);
        } else if self.player.is_stunned() {
            events.push(BattleEvent::TurnSkipped { side: Side::Player });
        } else {
            self.transition(BattleState::PlayerTurn, &mut events);
        }
        self.log.extend(events.iter().cloned());
        Ok(events)
    }

    /// 結束戰鬥，回傳結果並回到 Inactive
    pub fn finish(&mut self) -> Result<BattleResult> {
        let outcome = match self.state {
            BattleState::Won => BattleOutcome::Victory,
            BattleState::Lost => BattleOutcome::Defeat,
            state => return Err(BattleError::NotFinished { state }.into()),
        };
        self.player.clear_status_effects();
        self.enemy.clear_status_effects();

        let mut events = Vec::new();
        self.transition(BattleState::Inactive, &mut events);
        self.log.extend(events);

        Ok(BattleResult {
            outcome,
            player: self.player.clone(),
            reward: self.granted.clone(),
        })
    }

    fn win(&mut self, events: &mut Vec<BattleEvent>) {
        self.transition(BattleState::Won, events);

        if let Some(skill) = &self.reward.skill {
            if self.player.learn_ability(skill.clone()) {
                info!(ability = %skill, "player learned ability");
                events.push(BattleEvent::AbilityLearned {
                    ability: skill.clone(),
                });
                self.granted = Some(RewardGranted::LearnedAbility(skill.clone()));
                return;
            }
        }
        if let Some(potion) = &self.reward.potion {
            let count = self.player.add_potion(potion.clone(), 1);
            info!(potion = %potion, count, "player received potion");
            events.push(BattleEvent::PotionRewarded {
                potion: potion.clone(),
                count,
            });
            self.granted = Some(RewardGranted::Potion {
                potion: potion.clone(),
                count,
            });
        }
    }

    fn transition(&mut self, to: BattleState, events: &mut Vec<BattleEvent>) {
        let from = self.state;
        self.state = to;
        info!(%from, %to, "battle state changed");
        events.push(BattleEvent::StateChanged { from, to });
    }
}

fn lookup<'a>(catalog: &'a AbilityCatalog, name: &str) -> Result<&'a Ability> {
    catalog.get(name).ok_or_else(|| {
        AbilityError::AbilityNotFound {
            ability: name.to_string(),
        }
        .into()
    })
}

fn ensure_abilities_known(unit: &Combatant, catalog: &AbilityCatalog) -> Result<()> {
    match referenced_abilities(unit).find(|ability| !catalog.contains_key(*ability)) {
        Some(ability) => Err(LoadError::UnknownAbility {
            owner: unit.name.clone(),
            ability: ability.clone(),
        }
        .into()),
        None => Ok(()),
    }
}

/// 戰鬥中可能用到的所有技能名稱
fn referenced_abilities(unit: &Combatant) -> impl Iterator<Item = &AbilityName> {
    unit.abilities
        .iter()
        .chain(unit.potions.keys())
        .chain(unit.ai.normal_attack.iter())
        .chain(unit.ai.healing_ability.iter())
}
