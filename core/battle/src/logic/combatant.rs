//! 戰鬥者
//!
//! 保存基礎屬性、已學會技能、藥水背包與狀態效果。
//! 實際攻擊力／防禦力 = 基礎值 + 所有狀態效果修正。

use crate::dice::Dice;
use crate::domain::alias::{AbilityName, EffectId, Percent};
use crate::domain::constants::{
    BOSS_ATTACK_POWER, BOSS_DEFENSE, BOSS_MAX_HEALTH, DEFAULT_ATTACK_POWER, DEFAULT_DEFENSE,
    DEFAULT_HEAL_AT_HEALTH_PERCENT, DEFAULT_MAX_HEALTH, DEFAULT_SPECIAL_ABILITY_CHANCE,
    MIN_DAMAGE,
};
use crate::domain::core_types::Side;
use crate::error::{AbilityError, Result};
use crate::event::{BattleEvent, DamageSource};
use crate::loader_schema::EnemyType;
use crate::logic::status_effect::{EffectKind, StatusEffect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// 敵方 AI 設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    pub normal_attack: Option<AbilityName>,
    /// 使用第一個特殊技能的機率
    pub special_ability_chance: Percent,
    pub healing_ability: Option<AbilityName>,
    /// 生命低於 max_health * 此比例時才考慮治療
    pub heal_at_health_percent: f32,
}

impl Default for AiProfile {
    fn default() -> Self {
        Self {
            normal_attack: None,
            special_ability_chance: DEFAULT_SPECIAL_ABILITY_CHANCE,
            healing_ability: None,
            heal_at_health_percent: DEFAULT_HEAL_AT_HEALTH_PERCENT,
        }
    }
}

/// 一次受擊的結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Blocked { roll: Percent, chance: Percent },
    Hit { amount: i32, remaining_health: i32 },
}

impl DamageOutcome {
    pub fn into_event(self, side: Side, source: DamageSource) -> BattleEvent {
        match self {
            Self::Blocked { roll, chance } => BattleEvent::DamageBlocked {
                side,
                source,
                roll,
                chance,
            },
            Self::Hit {
                amount,
                remaining_health,
            } => BattleEvent::DamageTaken {
                side,
                source,
                amount,
                remaining_health,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub max_health: i32,
    pub current_health: i32,
    pub base_attack: i32,
    pub base_defense: i32,
    pub abilities: Vec<AbilityName>,
    pub status_effects: Vec<StatusEffect>,
    pub potions: BTreeMap<AbilityName, u32>,
    pub ai: AiProfile,
    #[serde(default)]
    next_effect_id: EffectId,
}

impl Default for Combatant {
    fn default() -> Self {
        Self::new(
            "",
            DEFAULT_MAX_HEALTH,
            DEFAULT_ATTACK_POWER,
            DEFAULT_DEFENSE,
        )
    }
}

impl Combatant {
    pub fn new(name: impl Into<String>, max_health: i32, attack: i32, defense: i32) -> Self {
        Self {
            name: name.into(),
            max_health,
            current_health: max_health,
            base_attack: attack,
            base_defense: defense,
            abilities: Vec::new(),
            status_effects: Vec::new(),
            potions: BTreeMap::new(),
            ai: AiProfile::default(),
            next_effect_id: 0,
        }
    }

    pub fn with_abilities(mut self, abilities: Vec<AbilityName>) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_ai(mut self, ai: AiProfile) -> Self {
        self.ai = ai;
        self
    }

    /// 由敵人模板建立
    pub fn from_enemy_type(enemy_type: &EnemyType) -> Self {
        Self::new(
            enemy_type.name.clone(),
            enemy_type.max_health,
            enemy_type.attack_power,
            enemy_type.defense,
        )
        .with_abilities(enemy_type.abilities.clone())
        .with_ai(AiProfile {
            normal_attack: enemy_type.normal_attack.clone(),
            special_ability_chance: enemy_type.special_ability_chance,
            healing_ability: enemy_type.healing_ability.clone(),
            heal_at_health_percent: enemy_type.heal_at_health_percent,
        })
    }

    /// 一般戰鬥的敵人：技能列表換成區域技能
    pub fn area_enemy(enemy_type: &EnemyType, area_ability: AbilityName) -> Self {
        Self::from_enemy_type(enemy_type).with_abilities(vec![area_ability])
    }

    /// 頭目：固定屬性，唯一技能為擊敗後可學會的技能
    pub fn boss(enemy_type: &EnemyType, skill_to_learn: AbilityName) -> Self {
        let mut boss = Self::from_enemy_type(enemy_type).with_abilities(vec![skill_to_learn]);
        boss.max_health = BOSS_MAX_HEALTH;
        boss.current_health = BOSS_MAX_HEALTH;
        boss.base_attack = BOSS_ATTACK_POWER;
        boss.base_defense = BOSS_DEFENSE;
        boss
    }

    // ------------------------------------------------------------------------
    // 屬性
    // ------------------------------------------------------------------------

    pub fn attack_power(&self) -> i32 {
        self.base_attack
            + self
                .status_effects
                .iter()
                .map(|e| e.kind.attack_modifier())
                .sum::<i32>()
    }

    pub fn defense(&self) -> i32 {
        self.base_defense
            + self
                .status_effects
                .iter()
                .map(|e| e.kind.defense_modifier())
                .sum::<i32>()
    }

    pub fn is_stunned(&self) -> bool {
        self.status_effects.iter().any(|e| e.kind.is_stun())
    }

    pub fn is_defeated(&self) -> bool {
        self.current_health <= 0
    }

    // ------------------------------------------------------------------------
    // 生命
    // ------------------------------------------------------------------------

    /// 受到傷害
    ///
    /// 身上有格擋效果時先消耗一個並擲 1..=100，擲出值不大於格擋機率則完全擋下。
    /// 未擋下時扣除 max(raw - 防禦, 1)，生命不低於 0。
    pub fn take_damage(&mut self, raw: i32, dice: &mut impl Dice) -> DamageOutcome {
        let block = self
            .status_effects
            .iter()
            .enumerate()
            .find_map(|(idx, e)| e.kind.block_chance().map(|chance| (idx, chance)));
        if let Some((idx, chance)) = block {
            self.status_effects.remove(idx);
            let roll = dice.roll_percent();
            if roll <= chance {
                debug!(name = %self.name, roll, chance, "blocked");
                return DamageOutcome::Blocked { roll, chance };
            }
            debug!(name = %self.name, roll, chance, "failed to block");
        }

        let amount = (raw - self.defense()).max(MIN_DAMAGE);
        self.current_health = (self.current_health - amount).max(0);
        debug!(name = %self.name, raw, amount, hp = self.current_health, "takes damage");
        DamageOutcome::Hit {
            amount,
            remaining_health: self.current_health,
        }
    }

    /// 回復生命，不超過最大值，回傳實際回復量；負值視為 0
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_health;
        self.current_health = (self.current_health + amount.max(0)).min(self.max_health);
        self.current_health - before
    }

    // ------------------------------------------------------------------------
    // 狀態效果
    // ------------------------------------------------------------------------

    pub fn add_status_effect(&mut self, kind: EffectKind, duration: i32) -> EffectId {
        let id = self.next_effect_id;
        self.next_effect_id += 1;
        self.status_effects.push(StatusEffect { id, kind, duration });
        id
    }

    /// 結算一回合的狀態效果
    ///
    /// 以回合開始時的效果為準，從最後一個往前處理：持續時間減一，
    /// 燃燒造成傷害（會經過格擋與防禦），歸零者移除。
    /// 處理途中被移除的效果（例如燃燒消耗掉的格擋）直接略過。
    pub fn tick_status_effects(&mut self, side: Side, dice: &mut impl Dice) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        let ids: Vec<EffectId> = self.status_effects.iter().rev().map(|e| e.id).collect();

        for id in ids {
            let Some(effect) = self.status_effects.iter_mut().find(|e| e.id == id) else {
                continue;
            };
            effect.duration -= 1;
            let kind = effect.kind;

            if let EffectKind::Burn { damage } = kind {
                let outcome = self.take_damage(damage, dice);
                events.push(outcome.into_event(side, DamageSource::Burn));
            }

            let expired = self
                .status_effects
                .iter()
                .position(|e| e.id == id && e.is_expired());
            if let Some(idx) = expired {
                let removed = self.status_effects.remove(idx);
                debug!(name = %self.name, effect = removed.kind.name(), "effect expired");
                events.push(BattleEvent::EffectExpired {
                    side,
                    effect: removed.kind,
                });
            }
        }
        events
    }

    /// 清除所有狀態效果（戰鬥結束時）
    pub fn clear_status_effects(&mut self) -> Vec<StatusEffect> {
        std::mem::take(&mut self.status_effects)
    }

    // ------------------------------------------------------------------------
    // 技能與藥水
    // ------------------------------------------------------------------------

    pub fn knows_ability(&self, ability: &str) -> bool {
        self.abilities.iter().any(|a| a == ability)
    }

    /// 學會技能，已會則回傳 false
    pub fn learn_ability(&mut self, ability: AbilityName) -> bool {
        if self.knows_ability(&ability) {
            return false;
        }
        self.abilities.push(ability);
        true
    }

    /// 背包中有這種藥水（數量為 0 也算）
    pub fn is_potion(&self, ability: &str) -> bool {
        self.potions.contains_key(ability)
    }

    pub fn potion_count(&self, potion: &str) -> u32 {
        self.potions.get(potion).copied().unwrap_or(0)
    }

    /// 加入藥水，回傳新的數量
    pub fn add_potion(&mut self, potion: AbilityName, amount: u32) -> u32 {
        let count = self.potions.entry(potion).or_insert(0);
        *count += amount;
        *count
    }

    /// 消耗一瓶藥水，回傳剩餘數量
    pub fn use_potion(&mut self, potion: &str) -> Result<u32> {
        match self.potions.get_mut(potion) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(*count)
            }
            _ => Err(AbilityError::NoPotionsLeft {
                potion: potion.to_string(),
            }
            .into()),
        }
    }

    // ------------------------------------------------------------------------
    // 永久成長
    // ------------------------------------------------------------------------

    pub fn grow_attack(&mut self, amount: i32) {
        self.base_attack += amount;
    }

    pub fn grow_defense(&mut self, amount: i32) {
        self.base_defense += amount;
    }

    /// 提高最大生命並回復同等生命
    pub fn grow_max_health(&mut self, amount: i32) {
        self.max_health += amount;
        self.heal(amount);
    }
}
