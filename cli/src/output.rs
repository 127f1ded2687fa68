//! 輸出：文字或 JSON Lines

use anyhow::Result;
use battle::BattleEvent;
use serde::Serialize;
use serde_json::json;

pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn events(&self, events: &[BattleEvent]) -> Result<()> {
        for event in events {
            if self.json {
                println!("{}", serde_json::to_string(event)?);
            } else {
                println!("  {event}");
            }
        }
        Ok(())
    }

    /// 只在文字模式輸出
    pub fn text(&self, text: impl FnOnce() -> String) {
        if !self.json {
            println!("{}", text());
        }
    }

    /// JSON 模式輸出 `{"kind": ..., "data": ...}`，文字模式輸出 text
    pub fn record<T: Serialize>(&self, kind: &str, data: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(&json!({ "kind": kind, "data": data }))?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}
