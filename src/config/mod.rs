// ==========================================
// 装卸口排班系统 - 配置层
// ==========================================
// 职责: 轮换引擎配置（名单/阈值/优先级）及其持久化
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod rotation_config;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigManager};
pub use rotation_config::{PriorityRoster, RotationConfig};
