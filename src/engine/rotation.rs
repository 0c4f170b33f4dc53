// ==========================================
// 装卸口排班系统 - 岗位轮换引擎
// ==========================================
// 输入: 员工名册 + 历史排班 + 当日人工锁定 + 日结人数 + 发货量
// 输出: 当日完整排班（所有岗位槽位 + 机动池）
// ==========================================
// 红线:
// 1. 人工锁定的分配原样保留，不改槽位、不改人员
// 2. 同一员工（日结占位除外）只出现一次
// 3. 女性不安排翻包/卸车（人工锁定除外）
// 4. 固定机动人员永远进入机动池
// 5. 纯函数: 不修改输入，无 I/O，同输入同输出
// ==========================================

use crate::config::rotation_config::{PriorityRoster, RotationConfig};
use crate::domain::assignment::{Assignment, DailyRecord, RotationOutcome, SlotRef};
use crate::domain::station::StationCatalog;
use crate::domain::types::{PriorityTier, StationCategory};
use crate::domain::worker::Worker;
use crate::engine::eligibility::{EligibilityCore, SlotRule};
use crate::engine::pool::{CandidatePool, FILL_ORDER};
use crate::engine::recency::{RecencyIndex, RecencyScore};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

// ==========================================
// SlotBook - 已占用槽位登记
// ==========================================
#[derive(Debug, Default)]
struct SlotBook {
    taken: HashSet<(String, u32)>,
}

impl SlotBook {
    fn is_taken(&self, task_id: &str, slot_index: u32) -> bool {
        self.taken.contains(&(task_id.to_string(), slot_index))
    }

    fn claim(&mut self, task_id: &str, slot_index: u32) {
        self.taken.insert((task_id.to_string(), slot_index));
    }

    /// 该岗位从 0 开始的第一个空闲槽位
    fn next_free(&self, task_id: &str) -> u32 {
        let mut idx = 0;
        while self.is_taken(task_id, idx) {
            idx += 1;
        }
        idx
    }
}

// ==========================================
// RotationEngine - 岗位轮换引擎
// ==========================================
pub struct RotationEngine {
    config: RotationConfig,
    catalog: StationCatalog,
}

impl RotationEngine {
    /// 构造函数
    ///
    /// # 参数
    /// - `config`: 名单/阈值/优先级配置
    /// - `catalog`: 岗位目录
    pub fn new(config: RotationConfig, catalog: StationCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算当日排班
    ///
    /// 只返回分配列表；需要未填满槽位时使用 [`compute_with_report`](Self::compute_with_report)
    pub fn compute_assignment(
        &self,
        workers: &[Worker],
        history: &[DailyRecord],
        current_assignments: &[Assignment],
        day_pass_count: u32,
        volume: f64,
    ) -> Vec<Assignment> {
        self.compute_with_report(workers, history, current_assignments, day_pass_count, volume)
            .assignments
    }

    /// 计算当日排班（含未填满槽位报告）
    ///
    /// 步骤:
    /// 1) 排除已被人工锁定的员工，丢弃非人工分配
    /// 2) 日结占位优先填卸车，剩余填装袋（装袋可超出容量）
    /// 3) 按名单拆分候选池
    /// 4) 收集空闲有界槽位，按类别优先级稳定排序
    /// 5) 逐槽位按 [标准, 二级, 一级] 选人，组内按近度评分
    /// 6) 剩余人员依次进入机动池
    #[instrument(skip_all, fields(
        workers_count = workers.len(),
        history_days = history.len(),
        current_count = current_assignments.len(),
        day_pass_count = day_pass_count,
        volume = volume
    ))]
    pub fn compute_with_report(
        &self,
        workers: &[Worker],
        history: &[DailyRecord],
        current_assignments: &[Assignment],
        day_pass_count: u32,
        volume: f64,
    ) -> RotationOutcome {
        // 1. 人工锁定
        debug!("步骤1: 保留人工锁定分配");
        let mut book = SlotBook::default();
        let mut assignments: Vec<Assignment> = Vec::new();
        let mut pinned: HashSet<&str> = HashSet::new();
        for a in current_assignments.iter().filter(|a| a.is_manual) {
            book.claim(&a.task_id, a.slot_index);
            pinned.insert(a.employee_id.as_str());
            assignments.push(a.clone());
        }
        let manual_count = assignments.len();

        let mut seen: HashSet<&str> = HashSet::new();
        let available: Vec<Worker> = workers
            .iter()
            .filter(|w| w.active && !pinned.contains(w.id.as_str()))
            .filter(|w| seen.insert(w.id.as_str()))
            .cloned()
            .collect();

        // 2. 日结占位
        debug!("步骤2: 日结占位填充");
        let day_pass = self.fill_day_pass(&mut book, day_pass_count);
        let day_pass_placed = day_pass.len();
        assignments.extend(day_pass);

        // 3. 候选池
        debug!("步骤3: 按名单拆分候选池");
        let roster = self.config.resolve_roster(&available);
        let mut pool = CandidatePool::partition(available, &roster);

        // 4. 空闲槽位
        let open_slots = self.open_bounded_slots(&book);
        debug!(open_slots = open_slots.len(), "步骤4: 收集空闲槽位");

        // 5. 逐槽位选人
        let recency = RecencyIndex::build(history);
        let mut unfilled_slots = Vec::new();
        let mut filled = 0usize;
        for slot in open_slots {
            let rule = EligibilityCore::slot_rule(&self.config, slot.category, volume);
            let picked = Self::pick_candidate(&pool, &slot, rule, &roster, &recency)
                .and_then(|(tier, worker_id)| pool.take(tier, &worker_id));

            match picked {
                Some(worker) => {
                    book.claim(&slot.task_id, slot.slot_index);
                    assignments.push(Assignment::auto(&slot.task_id, &worker.id, slot.slot_index));
                    filled += 1;
                }
                None => {
                    debug!(task_id = %slot.task_id, slot_index = slot.slot_index, "槽位无可用人员");
                    unfilled_slots.push(slot);
                }
            }
        }

        // 6. 机动池
        let leftovers = pool.into_leftovers();
        let reserve_count = leftovers.len();
        match self.catalog.first_of(StationCategory::Reserve) {
            Some(reserve) => {
                for worker in leftovers {
                    let idx = book.next_free(&reserve.id);
                    book.claim(&reserve.id, idx);
                    assignments.push(Assignment::auto(&reserve.id, &worker.id, idx));
                }
            }
            None if reserve_count > 0 => {
                warn!(dropped = reserve_count, "岗位目录缺少机动池，剩余人员未安排");
            }
            None => {}
        }

        info!(
            manual = manual_count,
            day_pass = day_pass_placed,
            filled = filled,
            reserve = reserve_count,
            unfilled = unfilled_slots.len(),
            "轮换排班完成"
        );

        RotationOutcome {
            assignments,
            unfilled_slots,
        }
    }

    // ==========================================
    // 内部步骤
    // ==========================================

    /// 日结占位：先卸车（不超容量），再装袋（可超容量）
    fn fill_day_pass(&self, book: &mut SlotBook, day_pass_count: u32) -> Vec<Assignment> {
        let mut remaining = day_pass_count;
        let mut placed = Vec::new();

        for station in self
            .catalog
            .stations()
            .iter()
            .filter(|s| s.category == StationCategory::Unload)
        {
            let capacity = station.capacity.unwrap_or(0);
            for idx in 0..capacity {
                if remaining == 0 {
                    return placed;
                }
                if !book.is_taken(&station.id, idx) {
                    book.claim(&station.id, idx);
                    placed.push(Assignment::day_pass(&station.id, idx));
                    remaining -= 1;
                }
            }
        }

        if remaining == 0 {
            return placed;
        }

        match self.catalog.first_of(StationCategory::Bagging) {
            Some(bagging) => {
                while remaining > 0 {
                    let idx = book.next_free(&bagging.id);
                    book.claim(&bagging.id, idx);
                    placed.push(Assignment::day_pass(&bagging.id, idx));
                    remaining -= 1;
                }
            }
            None => warn!(dropped = remaining, "岗位目录缺少装袋岗，日结人员未安排"),
        }

        placed
    }

    /// 空闲有界槽位（按类别优先级稳定排序）
    fn open_bounded_slots(&self, book: &SlotBook) -> Vec<SlotRef> {
        let mut slots: Vec<SlotRef> = self
            .catalog
            .bounded_stations()
            .flat_map(|station| {
                (0..station.capacity.unwrap_or(0)).map(move |idx| SlotRef {
                    task_id: station.id.clone(),
                    slot_index: idx,
                    category: station.category,
                })
            })
            .filter(|slot| !book.is_taken(&slot.task_id, slot.slot_index))
            .collect();

        slots.sort_by_key(|slot| self.config.fill_rank(slot.category));
        slots
    }

    /// 为槽位挑选候选人
    ///
    /// 按 FILL_ORDER 依次尝试分组；组内取近度评分最高者，同分取输入顺序靠前者
    fn pick_candidate(
        pool: &CandidatePool,
        slot: &SlotRef,
        rule: SlotRule,
        roster: &PriorityRoster,
        recency: &RecencyIndex,
    ) -> Option<(PriorityTier, String)> {
        for tier in FILL_ORDER {
            let mut best: Option<(&Worker, RecencyScore)> = None;
            for worker in pool
                .bucket(tier)
                .iter()
                .filter(|w| EligibilityCore::is_eligible(w, rule, roster))
            {
                let score = recency.score(&worker.id, &slot.task_id);
                match best {
                    Some((_, best_score)) if score <= best_score => {}
                    _ => best = Some((worker, score)),
                }
            }
            if let Some((worker, _)) = best {
                return Some((tier, worker.id.clone()));
            }
        }
        None
    }
}

impl Default for RotationEngine {
    fn default() -> Self {
        Self::new(RotationConfig::default(), StationCatalog::default())
    }
}
