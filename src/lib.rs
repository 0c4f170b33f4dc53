// ==========================================
// 装卸口排班系统 - 核心库
// ==========================================
// 系统定位: 每日装卸作业岗位轮换（人工最终控制权）
// 技术栈: Rust + SQLite
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 名单/阈值/优先级
pub mod config;

// 引擎层 - 轮换规则
pub mod engine;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 员工名册
pub mod importer;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    Assignment, DailyRecord, Gender, PriorityTier, RotationOutcome, SlotRef, StationCatalog,
    StationCategory, TaskStation, Worker, DAY_PASS_ID,
};

pub use config::{ConfigManager, RotationConfig};

pub use engine::RotationEngine;

pub use api::RotationApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "装卸口排班系统";
