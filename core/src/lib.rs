//! Path Battler 遊戲核心
//!
//! 將棋盤移動與回合制戰鬥串起來：
//! - 讀取遊戲設定（玩家、生成規則、區域技能、頭目格）
//! - 擲骰移動並依落點觸發增益或戰鬥
//! - 戰鬥結束後結算獎勵、重新生成前方格子

pub mod config;
pub mod session;

pub use config::{AreaAbilities, BossCell, FinalBoss, GameConfig, GameData, PlayerConfig};
pub use session::{area_for_path_index, Encounter, GameSession, Landing, MoveOutcome, Phase};

/// 遊戲操作的結果類型
pub type GameResult<T> = Result<T, GameError>;

/// 遊戲錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Battle(#[from] battle::Error),

    #[error(transparent)]
    Board(#[from] board::Error),

    #[error("Failed to parse {format}: {reason}")]
    Deserialize { format: String, reason: String },

    #[error("Invalid config `{field}`: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Unknown ability `{ability}` referenced by {owner}")]
    UnknownAbility { owner: String, ability: String },

    #[error("No enemy templates available")]
    NoEnemies,

    #[error("Cannot {action} while {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: &'static str,
    },
}
