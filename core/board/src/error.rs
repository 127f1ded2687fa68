// 棋盤錯誤型別，攜帶 function name
use crate::path::GridPos;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("`{func}`: 起點 {start:?} 不在主要路徑上")]
    StartNotOnTrack { func: &'static str, start: GridPos },

    #[error("`{func}`: 位置 {index} 超出路徑範圍（長度 {len}）")]
    IndexOutOfTrack {
        func: &'static str,
        index: usize,
        len: usize,
    },

    #[error("`{func}`: 最少同盟格 {min_ally_cells} 超過生成數量 {dice_face}")]
    InvalidSpawnerConfig {
        func: &'static str,
        dice_face: usize,
        min_ally_cells: usize,
    },

    #[error("`{func}`: 沒有可用的藥水獎勵")]
    NoPotionRewards { func: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
