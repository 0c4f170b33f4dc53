// ==========================================
// 装卸口排班系统 - 员工数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::types::Gender;
use crate::domain::worker::Worker;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// WorkerRepository - 员工仓储
// ==========================================
/// 员工仓储
/// 职责: 管理 worker 表的 CRUD 操作
pub struct WorkerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WorkerRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> rusqlite::Result<(String, String, bool, String)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }

    fn into_worker(raw: (String, String, bool, String)) -> RepositoryResult<Worker> {
        let (id, name, active, gender) = raw;
        let gender = Gender::from_db_str(&gender).ok_or_else(|| RepositoryError::FieldValueError {
            field: "gender".to_string(),
            message: format!("worker_id={} 无效性别值 {}", id, gender),
        })?;
        Ok(Worker {
            id,
            name,
            active,
            gender,
        })
    }

    /// 新增或更新员工
    pub fn upsert(&self, worker: &Worker) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        Self::upsert_with(&conn, worker)?;
        Ok(())
    }

    fn upsert_with(conn: &Connection, worker: &Worker) -> rusqlite::Result<usize> {
        conn.execute(
            r#"
            INSERT INTO worker (worker_id, name, active, gender)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(worker_id) DO UPDATE SET
                name = excluded.name,
                active = excluded.active,
                gender = excluded.gender,
                updated_at = datetime('now')
            "#,
            params![worker.id, worker.name, worker.active, worker.gender.as_str()],
        )
    }

    /// 批量新增或更新（单事务）
    ///
    /// # 返回
    /// 写入条数
    pub fn batch_upsert(&self, workers: &[Worker]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut count = 0;
        for worker in workers {
            count += Self::upsert_with(&tx, worker)?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    /// 按主键查询
    pub fn find_by_id(&self, worker_id: &str) -> RepositoryResult<Option<Worker>> {
        let conn = self.get_conn()?;
        let raw = conn
            .query_row(
                "SELECT worker_id, name, active, gender FROM worker WHERE worker_id = ?1",
                params![worker_id],
                Self::map_row,
            )
            .optional()?;
        raw.map(Self::into_worker).transpose()
    }

    /// 全部员工（按创建顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Worker>> {
        self.list_where("1 = 1")
    }

    /// 在岗员工（按创建顺序，引擎同分时依赖此顺序）
    pub fn list_active(&self) -> RepositoryResult<Vec<Worker>> {
        self.list_where("active = 1")
    }

    fn list_where(&self, condition: &str) -> RepositoryResult<Vec<Worker>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT worker_id, name, active, gender FROM worker WHERE {} ORDER BY rowid",
            condition
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::map_row)?;

        let mut workers = Vec::new();
        for row in rows {
            workers.push(Self::into_worker(row?)?);
        }
        Ok(workers)
    }

    /// 设置在岗状态
    pub fn set_active(&self, worker_id: &str, active: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE worker SET active = ?1, updated_at = datetime('now') WHERE worker_id = ?2",
            params![active, worker_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "worker".to_string(),
                id: worker_id.to_string(),
            });
        }
        Ok(())
    }

    /// 删除员工
    pub fn delete(&self, worker_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM worker WHERE worker_id = ?1", params![worker_id])?;
        Ok(affected > 0)
    }
}
