//! 錯誤處理系統
//!
//! 頂層 [`Error`] 保存錯誤種類與 context 鏈，呼叫端可用 [`Context`] 逐層補充說明。

use crate::domain::alias::{AbilityName, EnemyTypeName};
use crate::domain::core_types::BattleState;
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// 頂層錯誤，包含原始錯誤和 context 鏈
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    contexts: Vec<String>,
}

/// 錯誤種類
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    #[error(transparent)]
    Battle(#[from] BattleError),
    #[error(transparent)]
    Ability(#[from] AbilityError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// 戰鬥流程錯誤
#[derive(Debug, ThisError)]
pub enum BattleError {
    #[error("目前狀態 {state} 不允許玩家行動")]
    NotPlayerTurn { state: BattleState },
    #[error("目前狀態 {state} 不允許敵方行動")]
    NotEnemyTurn { state: BattleState },
    #[error("狀態 {state} 無法開始戰鬥")]
    CannotBegin { state: BattleState },
    #[error("戰鬥尚未結束（目前狀態 {state}）")]
    NotFinished { state: BattleState },
}

/// 技能與藥水相關錯誤
#[derive(Debug, ThisError)]
pub enum AbilityError {
    #[error("技能未找到: {ability}")]
    AbilityNotFound { ability: AbilityName },
    #[error("{combatant} 不會技能 {ability}")]
    AbilityNotKnown {
        combatant: String,
        ability: AbilityName,
    },
    #[error("{potion} 已經用完")]
    NoPotionsLeft { potion: AbilityName },
}

/// 資料載入錯誤
#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("{format} 反序列化失敗: {reason}")]
    DeserializeError { format: String, reason: String },
    #[error("{format} 名稱重複: {name}")]
    DuplicateName { format: String, name: String },
    #[error("{owner} 參照了不存在的技能 {ability}")]
    UnknownAbility {
        owner: String,
        ability: AbilityName,
    },
    #[error("找不到敵人模板: {name}")]
    UnknownEnemyType { name: EnemyTypeName },
    #[error("{owner} 的 {field} 數值無效: {reason}")]
    InvalidValue {
        owner: String,
        field: &'static str,
        reason: String,
    },
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 添加錯誤上下文，自動記錄呼叫位置
    #[track_caller]
    pub fn context<C: Into<String>>(mut self, context: C) -> Self {
        let loc = std::panic::Location::caller();
        let msg = format!("{} [{}:{}]", context.into(), loc.file(), loc.line());
        self.contexts.push(msg);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for ctx in &self.contexts {
            write!(f, "\n  {}", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        Self {
            kind: error.into(),
            contexts: Vec::new(),
        }
    }
}

/// Result 擴展 trait，用於添加錯誤上下文
pub trait Context<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    #[track_caller]
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(e.context(context)),
        }
    }
}
