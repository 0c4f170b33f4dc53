// ==========================================
// 装卸口排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、岗位目录
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod assignment;
pub mod station;
pub mod types;
pub mod worker;

// 重导出核心类型
pub use assignment::{
    is_day_pass, Assignment, DailyRecord, RotationOutcome, SlotRef, DAY_PASS_ID,
};
pub use station::{StationCatalog, TaskStation, RESERVE_STATION_ID};
pub use types::{Gender, PriorityTier, StationCategory};
pub use worker::Worker;
