// ==========================================
// 装卸口排班系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::rotation_config::RotationConfig;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// 配置键
pub mod config_keys {
    /// 轮换引擎配置（JSON）
    pub const ROTATION_CONFIG: &str = "rotation_config";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 读取轮换引擎配置
    ///
    /// 未配置时返回默认值；JSON 损坏时记录告警并返回默认值
    pub fn load_rotation_config(&self) -> Result<RotationConfig, Box<dyn Error>> {
        let raw = match self.get_global_config_value(config_keys::ROTATION_CONFIG)? {
            Some(v) => v,
            None => {
                debug!("rotation_config 未配置，使用默认配置");
                return Ok(RotationConfig::default());
            }
        };

        match serde_json::from_str::<RotationConfig>(&raw) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(error = %e, "rotation_config 解析失败，使用默认配置");
                Ok(RotationConfig::default())
            }
        }
    }

    /// 保存轮换引擎配置
    pub fn save_rotation_config(&self, config: &RotationConfig) -> Result<(), Box<dyn Error>> {
        let raw = serde_json::to_string(config)?;
        self.set_global_config_value(config_keys::ROTATION_CONFIG, &raw)
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 保存排班记录时随记录留存（daily_record.config_snapshot_json）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }
}
