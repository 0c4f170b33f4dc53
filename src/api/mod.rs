// ==========================================
// 装卸口排班系统 - API 层
// ==========================================
// 职责: 面向前端的业务接口，负责入参校验与编排
// ==========================================

pub mod error;
pub mod rotation_api;

pub use error::{ApiError, ApiResult};
pub use rotation_api::RotationApi;
