//! 擲骰介面
//!
//! 規則邏輯只依賴 [`Dice`]，正式執行時由 `rand` 的 RNG 提供，測試時可換成固定序列。

use crate::domain::alias::Percent;
use crate::domain::constants::MAX_PERCENT;
use rand::rngs::{StdRng, ThreadRng};
use rand::Rng;

/// 規則引擎所需的隨機來源
pub trait Dice {
    /// 擲 1..=100
    fn roll_percent(&mut self) -> Percent;

    /// 擲 0..upper（upper 為 0 時回傳 0）
    fn roll_below(&mut self, upper: u32) -> u32;

    /// 擲 1..=faces 的骰子
    fn roll_die(&mut self, faces: u32) -> u32 {
        self.roll_below(faces.max(1)) + 1
    }

    /// 從長度為 len 的集合中挑一個索引
    fn pick_index(&mut self, len: usize) -> usize {
        let upper = u32::try_from(len).unwrap_or(u32::MAX);
        self.roll_below(upper) as usize
    }

    /// Fisher-Yates 洗牌
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.pick_index(i + 1);
            items.swap(i, j);
        }
    }
}

fn roll_below_with<R: Rng>(rng: &mut R, upper: u32) -> u32 {
    if upper == 0 {
        return 0;
    }
    rng.random_range(0..upper)
}

impl Dice for StdRng {
    fn roll_percent(&mut self) -> Percent {
        self.random_range(1..=MAX_PERCENT)
    }

    fn roll_below(&mut self, upper: u32) -> u32 {
        roll_below_with(self, upper)
    }
}

impl Dice for ThreadRng {
    fn roll_percent(&mut self) -> Percent {
        self.random_range(1..=MAX_PERCENT)
    }

    fn roll_below(&mut self, upper: u32) -> u32 {
        roll_below_with(self, upper)
    }
}
