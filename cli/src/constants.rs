//! CLI 常數

pub const APP_NAME: &str = "path-battler";

/// 預設資料（編譯時嵌入）
pub const DEFAULT_ABILITIES_TOML: &str = include_str!("../../data/abilities.toml");
pub const DEFAULT_ENEMIES_TOML: &str = include_str!("../../data/enemies.toml");
pub const DEFAULT_GAME_TOML: &str = include_str!("../../data/game.toml");

pub const ABILITIES_FILE: &str = "abilities.toml";
pub const ENEMIES_FILE: &str = "enemies.toml";
pub const GAME_FILE: &str = "game.toml";

/// 自動遊玩時單場遊戲的行動上限
pub const MAX_ACTIONS: usize = 10_000;

/// 生命低於此比例時喝治療藥水
pub const HEAL_POTION_THRESHOLD: f32 = 0.4;

/// 生命低於此比例時使用格擋
pub const BLOCK_THRESHOLD: f32 = 0.6;

pub const DEFAULT_LOG_FILTER: &str = "info";
