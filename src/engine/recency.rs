// ==========================================
// 装卸口排班系统 - 轮换近度评分
// ==========================================
// 规则:
// - 历史按日期倒序排列，索引 0 = 最近一天（同日期保持输入顺序）
// - 评分 = 员工最近一次担任该岗位的记录索引
// - 从未担任 → Never（高于任何具体索引）
// - 评分越高越优先（越久没做过该岗位）
// ==========================================

use crate::domain::assignment::DailyRecord;
use std::collections::HashMap;

// ==========================================
// RecencyScore - 近度评分
// ==========================================
// 变体顺序决定比较结果: Held(_) < Never
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecencyScore {
    Held(usize),
    Never,
}

// ==========================================
// RecencyIndex - (岗位, 员工) → 最近索引
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RecencyIndex {
    latest: HashMap<(String, String), usize>,
}

impl RecencyIndex {
    /// 由历史记录构建索引（不修改输入）
    pub fn build(history: &[DailyRecord]) -> Self {
        let mut ordered: Vec<&DailyRecord> = history.iter().collect();
        // 稳定排序，同日期保持原顺序
        ordered.sort_by(|a, b| b.date.cmp(&a.date));

        let mut latest = HashMap::new();
        for (idx, record) in ordered.iter().enumerate() {
            for a in record.assignments.iter().filter(|a| !a.is_day_pass()) {
                latest
                    .entry((a.task_id.clone(), a.employee_id.clone()))
                    .or_insert(idx);
            }
        }

        Self { latest }
    }

    /// 员工在该岗位的近度评分
    pub fn score(&self, employee_id: &str, task_id: &str) -> RecencyScore {
        self.latest
            .get(&(task_id.to_string(), employee_id.to_string()))
            .map(|&idx| RecencyScore::Held(idx))
            .unwrap_or(RecencyScore::Never)
    }
}
