//! 核心規則邏輯

pub mod ability;
pub mod ai;
pub mod combatant;
pub mod status_effect;
