// ==========================================
// 装卸口排班系统 - 领域类型定义
// ==========================================
// 职责: 性别、岗位类别、优先级分层等枚举
// 序列化格式与数据库存储一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 性别 (Gender)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// 数据库存储值
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }

    /// 从数据库值解析
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim() {
            "M" | "m" => Some(Gender::M),
            "F" | "f" => Some(Gender::F),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 岗位类别 (Station Category)
// ==========================================
// Reserve 为机动池，容量无上限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StationCategory {
    Unload,  // 卸车
    Turn,    // 翻包
    Fishing, // 捡货
    Bagging, // 装袋
    Reserve, // 机动/备勤
}

impl StationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StationCategory::Unload => "UNLOAD",
            StationCategory::Turn => "TURN",
            StationCategory::Fishing => "FISHING",
            StationCategory::Bagging => "BAGGING",
            StationCategory::Reserve => "RESERVE",
        }
    }

    /// 是否为有界岗位（机动池之外的全部岗位）
    pub fn is_bounded(&self) -> bool {
        !matches!(self, StationCategory::Reserve)
    }
}

impl fmt::Display for StationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 优先级分层 (Priority Tier)
// ==========================================
// 顺序即限制强度: FixedReserve 最严格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityTier {
    FixedReserve, // 固定机动，永不上岗
    Tier1,        // 最后兜底
    Tier2,        // 标准池耗尽后
    Standard,     // 标准池
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityTier::FixedReserve => write!(f, "FIXED_RESERVE"),
            PriorityTier::Tier1 => write!(f, "TIER1"),
            PriorityTier::Tier2 => write!(f, "TIER2"),
            PriorityTier::Standard => write!(f, "STANDARD"),
        }
    }
}
