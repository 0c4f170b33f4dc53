// ==========================================
// 装卸口排班系统 - 排班 API
// ==========================================
// 职责: 生成当日排班、人工锁定/解锁槽位、保存与查询记录
// 架构: API 层 → Engine（纯计算）+ Repository（读写）
// ==========================================
// 引擎本身不校验输入，入参校验在此层完成
// ==========================================

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::assignment::{is_day_pass, Assignment, DailyRecord, RotationOutcome};
use crate::domain::station::StationCatalog;
use crate::domain::types::StationCategory;
use crate::engine::rotation::RotationEngine;
use crate::repository::{DailyRecordRepository, WorkerRepository};

// ==========================================
// RotationApi - 排班 API
// ==========================================
pub struct RotationApi {
    worker_repo: Arc<WorkerRepository>,
    record_repo: Arc<DailyRecordRepository>,
    config_manager: Arc<ConfigManager>,
    catalog: StationCatalog,
}

impl RotationApi {
    /// 创建新的RotationApi实例
    pub fn new(
        worker_repo: Arc<WorkerRepository>,
        record_repo: Arc<DailyRecordRepository>,
        config_manager: Arc<ConfigManager>,
        catalog: StationCatalog,
    ) -> Self {
        Self {
            worker_repo,
            record_repo,
            config_manager,
            catalog,
        }
    }

    /// 共享同一连接构建全部依赖（默认岗位目录）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ApiResult<Self> {
        let config_manager = ConfigManager::from_connection(conn.clone())
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        Ok(Self::new(
            Arc::new(WorkerRepository::from_connection(conn.clone())),
            Arc::new(DailyRecordRepository::from_connection(conn)),
            Arc::new(config_manager),
            StationCatalog::default(),
        ))
    }

    fn build_engine(&self) -> ApiResult<RotationEngine> {
        let config = self
            .config_manager
            .load_rotation_config()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        Ok(RotationEngine::new(config, self.catalog.clone()))
    }

    // ==========================================
    // 排班生成
    // ==========================================

    /// 生成某日排班（不落库）
    ///
    /// # 参数
    /// - date: 排班日期
    /// - volume: 当日发货量（>= 0）
    /// - day_pass_count: 日结人数
    ///
    /// # 说明
    /// - 当日已保存记录中的人工锁定项会被保留
    /// - 历史取 date 之前最近 history_window_days 条记录
    #[instrument(skip(self))]
    pub fn generate(
        &self,
        date: NaiveDate,
        volume: f64,
        day_pass_count: u32,
    ) -> ApiResult<RotationOutcome> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(ApiError::InvalidInput(format!("发货量无效: {}", volume)));
        }

        let engine = self.build_engine()?;
        let workers = self.worker_repo.list_active()?;
        let history = self
            .record_repo
            .list_before(date, engine.config().history_window_days)?;
        let current = self
            .record_repo
            .find_by_date(date)?
            .map(|r| r.assignments)
            .unwrap_or_default();

        Ok(engine.compute_with_report(&workers, &history, &current, day_pass_count, volume))
    }

    /// 生成并保存某日排班（同时留存当时的配置快照）
    pub fn generate_and_save(
        &self,
        date: NaiveDate,
        volume: f64,
        day_pass_count: u32,
    ) -> ApiResult<DailyRecord> {
        let outcome = self.generate(date, volume, day_pass_count)?;
        let record = DailyRecord {
            date,
            assignments: outcome.assignments,
            volume,
            day_pass_count,
        };
        let snapshot = self
            .config_manager
            .get_config_snapshot()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let record_id = self
            .record_repo
            .save_with_config_snapshot(&record, Some(&snapshot))?;
        info!(%date, %record_id, assignments = record.assignments.len(), "排班已保存");
        Ok(record)
    }

    // ==========================================
    // 人工调整
    // ==========================================

    /// 人工锁定槽位
    ///
    /// # 规则
    /// - 岗位必须存在；有界岗位的槽位必须在容量以内
    ///   （日结占位在装袋岗可超出容量，与引擎的溢出规则一致）
    /// - 员工必须存在且在岗（日结占位除外）
    /// - 槽位原有人员被替换；该员工当日其他分配被移除
    #[instrument(skip(self))]
    pub fn pin_slot(
        &self,
        date: NaiveDate,
        task_id: &str,
        slot_index: u32,
        employee_id: &str,
    ) -> ApiResult<DailyRecord> {
        let station = self
            .catalog
            .get(task_id)
            .ok_or_else(|| ApiError::InvalidInput(format!("未知岗位: {}", task_id)))?;
        let bagging_overflow =
            is_day_pass(employee_id) && station.category == StationCategory::Bagging;
        if let Some(capacity) = station.capacity.filter(|_| !bagging_overflow) {
            if slot_index >= capacity {
                return Err(ApiError::InvalidInput(format!(
                    "岗位 {} 容量为 {}，槽位 {} 越界",
                    task_id, capacity, slot_index
                )));
            }
        }

        if !is_day_pass(employee_id) {
            let worker = self
                .worker_repo
                .find_by_id(employee_id)?
                .ok_or_else(|| ApiError::NotFound(format!("员工 {}", employee_id)))?;
            if !worker.active {
                return Err(ApiError::BusinessRuleViolation(format!(
                    "员工 {} 不在岗",
                    employee_id
                )));
            }
        }

        let mut record = self
            .record_repo
            .find_by_date(date)?
            .unwrap_or_else(|| DailyRecord::new(date, Vec::new()));

        record.assignments.retain(|a| {
            let same_slot = a.task_id == task_id && a.slot_index == slot_index;
            let same_worker = !is_day_pass(employee_id) && a.employee_id == employee_id;
            !same_slot && !same_worker
        });
        record
            .assignments
            .push(Assignment::manual(task_id, employee_id, slot_index));

        self.record_repo.save(&record)?;
        Ok(record)
    }

    /// 解除槽位的人工锁定（人员保留，下次生成时重新计算）
    pub fn unpin_slot(
        &self,
        date: NaiveDate,
        task_id: &str,
        slot_index: u32,
    ) -> ApiResult<DailyRecord> {
        let mut record = self
            .record_repo
            .find_by_date(date)?
            .ok_or_else(|| ApiError::NotFound(format!("{} 的排班记录", date)))?;

        let slot = record
            .assignments
            .iter_mut()
            .find(|a| a.task_id == task_id && a.slot_index == slot_index)
            .ok_or_else(|| ApiError::NotFound(format!("槽位 {}#{}", task_id, slot_index)))?;
        slot.is_manual = false;

        self.record_repo.save(&record)?;
        Ok(record)
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn get_record(&self, date: NaiveDate) -> ApiResult<Option<DailyRecord>> {
        Ok(self.record_repo.find_by_date(date)?)
    }

    /// 某日记录生成时的配置快照（JSON）
    pub fn get_config_snapshot(&self, date: NaiveDate) -> ApiResult<Option<String>> {
        Ok(self.record_repo.find_config_snapshot(date)?)
    }

    /// 查询历史记录（最近的在前）
    pub fn list_history(&self, before: NaiveDate, limit: u32) -> ApiResult<Vec<DailyRecord>> {
        if limit == 0 {
            return Err(ApiError::InvalidInput("limit 必须大于 0".to_string()));
        }
        Ok(self.record_repo.list_before(before, limit)?)
    }
}
