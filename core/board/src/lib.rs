//! 棋盤：路徑、擲骰移動與格子生成
//!
//! - [`path`]：15×15 棋盤上各顏色的完整路徑
//! - [`cell`]：同盟格（永久增益）與敵人格（戰鬥）
//! - [`spawner`]：在玩家前方生成下一批格子

pub mod cell;
pub mod error;
pub mod path;
pub mod spawner;

pub use cell::{Cell, PermaBuff};
pub use error::{Error, Result};
pub use path::{GridPos, PlayerColor, Track};
pub use spawner::{generate_spawn_plan, spawn_next_cells, SpawnerConfig};
