// ==========================================
// 装卸口排班系统 - 每日排班记录仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 表: daily_record (1) ─ (N) daily_assignment
// ==========================================

use crate::domain::assignment::{Assignment, DailyRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// DailyRecordRepository - 每日排班记录仓储
// ==========================================
pub struct DailyRecordRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DailyRecordRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 保存某日排班（覆盖同日旧记录，沿用旧记录的配置快照）
    ///
    /// # 返回
    /// 新记录ID
    pub fn save(&self, record: &DailyRecord) -> RepositoryResult<String> {
        self.save_with_config_snapshot(record, None)
    }

    /// 保存某日排班并留存生成时的配置快照
    ///
    /// # 参数
    /// - config_snapshot: None 时沿用同日旧记录的快照
    pub fn save_with_config_snapshot(
        &self,
        record: &DailyRecord,
        config_snapshot: Option<&str>,
    ) -> RepositoryResult<String> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let previous_snapshot: Option<String> = tx
            .query_row(
                "SELECT config_snapshot_json FROM daily_record WHERE record_date = ?1",
                params![record.date],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?
            .flatten();
        let snapshot = config_snapshot.map(str::to_string).or(previous_snapshot);

        tx.execute(
            "DELETE FROM daily_assignment WHERE record_id IN (SELECT record_id FROM daily_record WHERE record_date = ?1)",
            params![record.date],
        )?;
        tx.execute(
            "DELETE FROM daily_record WHERE record_date = ?1",
            params![record.date],
        )?;

        let record_id = Uuid::new_v4().to_string();
        tx.execute(
            r#"
            INSERT INTO daily_record (record_id, record_date, volume, day_pass_count, config_snapshot_json)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![record_id, record.date, record.volume, record.day_pass_count, snapshot],
        )?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO daily_assignment (record_id, seq_no, task_id, employee_id, slot_index, is_manual)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for (seq_no, a) in record.assignments.iter().enumerate() {
                stmt.execute(params![
                    record_id,
                    seq_no as i64,
                    a.task_id,
                    a.employee_id,
                    a.slot_index,
                    a.is_manual,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(record_id)
    }

    /// 按日期查询
    pub fn find_by_date(&self, date: NaiveDate) -> RepositoryResult<Option<DailyRecord>> {
        let conn = self.get_conn()?;
        let header = conn
            .query_row(
                "SELECT record_id, volume, day_pass_count FROM daily_record WHERE record_date = ?1",
                params![date],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?, row.get::<_, u32>(2)?)),
            )
            .optional()?;

        match header {
            Some((record_id, volume, day_pass_count)) => Ok(Some(DailyRecord {
                date,
                assignments: Self::load_assignments(&conn, &record_id)?,
                volume,
                day_pass_count,
            })),
            None => Ok(None),
        }
    }

    /// 某日记录留存的配置快照
    pub fn find_config_snapshot(&self, date: NaiveDate) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let snapshot: Option<Option<String>> = conn
            .query_row(
                "SELECT config_snapshot_json FROM daily_record WHERE record_date = ?1",
                params![date],
                |row| row.get(0),
            )
            .optional()?;
        Ok(snapshot.flatten())
    }

    /// 查询指定日期之前的记录（最近的在前）
    ///
    /// # 参数
    /// - before: 截止日期（不含）
    /// - limit: 最多返回条数
    pub fn list_before(&self, before: NaiveDate, limit: u32) -> RepositoryResult<Vec<DailyRecord>> {
        let conn = self.get_conn()?;
        let headers: Vec<(String, NaiveDate, f64, u32)> = {
            let mut stmt = conn.prepare(
                r#"
                SELECT record_id, record_date, volume, day_pass_count
                FROM daily_record
                WHERE record_date < ?1
                ORDER BY record_date DESC
                LIMIT ?2
                "#,
            )?;
            let rows = stmt.query_map(params![before, limit], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let mut records = Vec::with_capacity(headers.len());
        for (record_id, date, volume, day_pass_count) in headers {
            records.push(DailyRecord {
                date,
                assignments: Self::load_assignments(&conn, &record_id)?,
                volume,
                day_pass_count,
            });
        }
        Ok(records)
    }

    /// 删除某日记录
    pub fn delete_by_date(&self, date: NaiveDate) -> RepositoryResult<bool> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        tx.execute(
            "DELETE FROM daily_assignment WHERE record_id IN (SELECT record_id FROM daily_record WHERE record_date = ?1)",
            params![date],
        )?;
        let affected = tx.execute("DELETE FROM daily_record WHERE record_date = ?1", params![date])?;
        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(affected > 0)
    }

    fn load_assignments(conn: &Connection, record_id: &str) -> RepositoryResult<Vec<Assignment>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT task_id, employee_id, slot_index, is_manual
            FROM daily_assignment
            WHERE record_id = ?1
            ORDER BY seq_no
            "#,
        )?;
        let rows = stmt.query_map(params![record_id], |row| {
            Ok(Assignment {
                task_id: row.get(0)?,
                employee_id: row.get(1)?,
                slot_index: row.get(2)?,
                is_manual: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
