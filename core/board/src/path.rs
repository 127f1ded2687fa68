//! 路徑生成
//!
//! 15×15 棋盤，(0,0) 為左下角。主要外圈共 48 格，各顏色從自己的起點出發，
//! 走完第 12、24、36 格後各插入一個轉角格，最後接上 6 格的終點直線。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

pub const GRID_SIZE: i32 = 15;

/// 棋盤座標
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

const fn p(x: i32, y: i32) -> GridPos {
    GridPos { x, y }
}

/// 主要外圈（不含彩色格）
pub const MAIN_TRACK: [GridPos; 48] = [
    p(6, 1),
    p(6, 2),
    p(6, 3),
    p(6, 4),
    p(6, 5),
    p(5, 6),
    p(4, 6),
    p(3, 6),
    p(2, 6),
    p(1, 6),
    p(0, 6),
    p(0, 7),
    p(1, 8),
    p(2, 8),
    p(3, 8),
    p(4, 8),
    p(5, 8),
    p(6, 9),
    p(6, 10),
    p(6, 11),
    p(6, 12),
    p(6, 13),
    p(6, 14),
    p(7, 14),
    p(8, 13),
    p(8, 12),
    p(8, 11),
    p(8, 10),
    p(8, 9),
    p(9, 8),
    p(10, 8),
    p(11, 8),
    p(12, 8),
    p(13, 8),
    p(14, 8),
    p(14, 7),
    p(13, 6),
    p(12, 6),
    p(11, 6),
    p(10, 6),
    p(9, 6),
    p(8, 5),
    p(8, 4),
    p(8, 3),
    p(8, 2),
    p(8, 1),
    p(8, 0),
    p(7, 0),
];

/// 走完外圈第幾格（從 0 起算）後插入轉角格
const EXTRA_AFTER: [usize; 3] = [11, 23, 35];

pub const HOME_LENGTH: usize = 6;

/// 完整路徑長度
pub const TRACK_LENGTH: usize = MAIN_TRACK.len() + EXTRA_AFTER.len() + HOME_LENGTH;

/// 玩家顏色，決定起點、轉角格與終點直線
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display,
)]
pub enum PlayerColor {
    Red,
    Green,
    Blue,
    #[default]
    Yellow,
}

impl PlayerColor {
    pub fn start(self) -> GridPos {
        match self {
            Self::Yellow => p(6, 1),
            Self::Blue => p(1, 8),
            Self::Green => p(13, 6),
            Self::Red => p(8, 13),
        }
    }

    /// 依經過順序排列的三個轉角格
    pub fn extras(self) -> [GridPos; 3] {
        match self {
            Self::Yellow => [p(0, 8), p(8, 14), p(14, 6)],
            Self::Blue => [p(8, 14), p(14, 6), p(6, 0)],
            Self::Red => [p(14, 6), p(6, 0), p(0, 8)],
            Self::Green => [p(6, 0), p(0, 8), p(8, 14)],
        }
    }

    /// 終點直線，由外往內
    pub fn home(self) -> [GridPos; HOME_LENGTH] {
        match self {
            Self::Yellow => [p(7, 1), p(7, 2), p(7, 3), p(7, 4), p(7, 5), p(7, 6)],
            Self::Blue => [p(1, 7), p(2, 7), p(3, 7), p(4, 7), p(5, 7), p(6, 7)],
            Self::Green => [p(13, 7), p(12, 7), p(11, 7), p(10, 7), p(9, 7), p(8, 7)],
            Self::Red => [p(7, 13), p(7, 12), p(7, 11), p(7, 10), p(7, 9), p(7, 8)],
        }
    }
}

/// 單一顏色的完整路徑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    color: PlayerColor,
    cells: Vec<GridPos>,
}

impl Track {
    pub fn new(color: PlayerColor) -> Result<Self> {
        let func = "Track::new";

        let start = color.start();
        let start_index = MAIN_TRACK
            .iter()
            .position(|pos| *pos == start)
            .ok_or(Error::StartNotOnTrack { func, start })?;
        let extras = color.extras();

        let mut cells = Vec::with_capacity(TRACK_LENGTH);
        for i in 0..MAIN_TRACK.len() {
            cells.push(MAIN_TRACK[(start_index + i) % MAIN_TRACK.len()]);
            if let Some(n) = EXTRA_AFTER.iter().position(|after| *after == i) {
                cells.push(extras[n]);
            }
        }
        cells.extend(color.home());

        Ok(Self { color, cells })
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }

    pub fn cells(&self) -> &[GridPos] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 終點索引
    pub fn last_index(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn pos(&self, index: usize) -> Result<GridPos> {
        self.cells
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfTrack {
                func: "Track::pos",
                index,
                len: self.cells.len(),
            })
    }

    /// 從 from 前進 steps 格，最多停在終點
    pub fn advance(&self, from: usize, steps: usize) -> usize {
        from.saturating_add(steps).min(self.last_index())
    }
}
