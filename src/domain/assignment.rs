// ==========================================
// 装卸口排班系统 - 排班结果领域模型
// ==========================================
// Assignment: 单个槽位分配
// DailyRecord: 单日排班快照（历史输入，只读）
// ==========================================

use crate::domain::types::StationCategory;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 日结临时工占位ID（不参与公平轮换，不受唯一性约束）
pub const DAY_PASS_ID: &str = "__day_pass__";

/// 是否为日结临时工占位
pub fn is_day_pass(employee_id: &str) -> bool {
    employee_id == DAY_PASS_ID
}

// ==========================================
// Assignment - 槽位分配
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub task_id: String,     // 岗位ID
    pub employee_id: String, // 员工ID / 日结占位
    pub slot_index: u32,     // 岗位内槽位（从0开始）
    pub is_manual: bool,     // 人工锁定
}

impl Assignment {
    pub fn auto(task_id: &str, employee_id: &str, slot_index: u32) -> Self {
        Self {
            task_id: task_id.to_string(),
            employee_id: employee_id.to_string(),
            slot_index,
            is_manual: false,
        }
    }

    pub fn manual(task_id: &str, employee_id: &str, slot_index: u32) -> Self {
        Self {
            is_manual: true,
            ..Self::auto(task_id, employee_id, slot_index)
        }
    }

    pub fn day_pass(task_id: &str, slot_index: u32) -> Self {
        Self::auto(task_id, DAY_PASS_ID, slot_index)
    }

    pub fn is_day_pass(&self) -> bool {
        is_day_pass(&self.employee_id)
    }
}

// ==========================================
// DailyRecord - 单日排班快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub volume: f64, // 当日发货量
    #[serde(default)]
    pub day_pass_count: u32, // 当日日结人数
}

impl DailyRecord {
    pub fn new(date: NaiveDate, assignments: Vec<Assignment>) -> Self {
        Self {
            date,
            assignments,
            volume: 0.0,
            day_pass_count: 0,
        }
    }
}

// ==========================================
// SlotRef - 槽位引用（未填满槽位报告）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRef {
    pub task_id: String,
    pub slot_index: u32,
    pub category: StationCategory,
}

// ==========================================
// RotationOutcome - 引擎输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationOutcome {
    pub assignments: Vec<Assignment>,
    pub unfilled_slots: Vec<SlotRef>,
}
