// ==========================================
// 装卸口排班系统 - 引擎层
// ==========================================
// 职责: 实现排班规则引擎
// 红线: Engine 不访问数据库，不做 I/O
// ==========================================

pub mod eligibility;
pub mod name_match;
pub mod pool;
pub mod recency;
pub mod rotation;

// 重导出核心引擎
pub use eligibility::{EligibilityCore, SlotRule};
pub use pool::CandidatePool;
pub use recency::{RecencyIndex, RecencyScore};
pub use rotation::RotationEngine;
