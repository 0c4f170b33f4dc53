// ==========================================
// 装卸口排班系统 - 上岗资格判定
// ==========================================
// 职责: 判定员工能否担任某类岗位
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::config::rotation_config::{PriorityRoster, RotationConfig};
use crate::domain::types::{Gender, StationCategory};
use crate::domain::worker::Worker;

// ==========================================
// SlotRule - 单个槽位的资格规则
// ==========================================
/// 按(岗位类别, 发货量)预先计算的规则，对同一槽位的所有候选人复用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRule {
    /// 限制女性
    pub gender_restricted: bool,
    /// 仅精英名单
    pub elite_only: bool,
}

pub struct EligibilityCore;

impl EligibilityCore {
    /// 构造槽位规则
    ///
    /// # 规则
    /// 1. 类别在 restricted_gender_categories 内 → 女性不可上岗
    /// 2. 发货量 > 阈值 且 类别为 Turn → 仅精英名单
    pub fn slot_rule(config: &RotationConfig, category: StationCategory, volume: f64) -> SlotRule {
        SlotRule {
            gender_restricted: config.restricted_gender_categories.contains(&category),
            elite_only: category == StationCategory::Turn && config.is_high_volume(volume),
        }
    }

    /// 判定员工是否满足槽位规则
    pub fn is_eligible(worker: &Worker, rule: SlotRule, roster: &PriorityRoster) -> bool {
        if rule.gender_restricted && worker.gender == Gender::F {
            return false;
        }
        if rule.elite_only && !roster.is_elite(&worker.id) {
            return false;
        }
        true
    }
}
