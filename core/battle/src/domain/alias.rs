//! 型別別名

/// 技能（含藥水）名稱，同時作為資料表的鍵
pub type AbilityName = String;

/// 敵人模板名稱
pub type EnemyTypeName = String;

/// 單一戰鬥者內唯一的狀態效果 ID
pub type EffectId = u32;

/// 百分比機率（0..=100）
pub type Percent = u32;
