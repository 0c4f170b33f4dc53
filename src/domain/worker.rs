// ==========================================
// 装卸口排班系统 - 员工领域模型
// ==========================================

use crate::domain::types::Gender;
use serde::{Deserialize, Serialize};

// ==========================================
// Worker - 员工
// ==========================================
// 身份以 id 为准；name 仅用于按名单匹配特殊分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,     // 员工ID
    pub name: String,   // 姓名
    pub active: bool,   // 是否在岗
    pub gender: Gender, // 性别
}

impl Worker {
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: true,
            gender,
        }
    }
}
