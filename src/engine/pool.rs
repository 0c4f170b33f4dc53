// ==========================================
// 装卸口排班系统 - 候选人分组池
// ==========================================
// 每名员工只属于一个分组；选中即从分组中移出（所有权转移）
// 分组内保持输入顺序，保证同分时结果可复现
// ==========================================

use crate::config::rotation_config::PriorityRoster;
use crate::domain::types::PriorityTier;
use crate::domain::worker::Worker;

/// 岗位填充时的分组尝试顺序
pub const FILL_ORDER: [PriorityTier; 3] =
    [PriorityTier::Standard, PriorityTier::Tier2, PriorityTier::Tier1];

/// 剩余人员进入机动池的顺序
pub const OVERFLOW_ORDER: [PriorityTier; 4] = [
    PriorityTier::FixedReserve,
    PriorityTier::Tier1,
    PriorityTier::Tier2,
    PriorityTier::Standard,
];

// ==========================================
// CandidatePool - 分组候选池
// ==========================================
#[derive(Debug, Default)]
pub struct CandidatePool {
    fixed_reserve: Vec<Worker>,
    tier1: Vec<Worker>,
    tier2: Vec<Worker>,
    standard: Vec<Worker>,
}

impl CandidatePool {
    /// 按分层拆分员工
    pub fn partition(workers: Vec<Worker>, roster: &PriorityRoster) -> Self {
        let mut pool = Self::default();
        for worker in workers {
            let tier = roster.tier_of(&worker.id);
            pool.bucket_mut(tier).push(worker);
        }
        pool
    }

    pub fn bucket(&self, tier: PriorityTier) -> &[Worker] {
        match tier {
            PriorityTier::FixedReserve => &self.fixed_reserve,
            PriorityTier::Tier1 => &self.tier1,
            PriorityTier::Tier2 => &self.tier2,
            PriorityTier::Standard => &self.standard,
        }
    }

    fn bucket_mut(&mut self, tier: PriorityTier) -> &mut Vec<Worker> {
        match tier {
            PriorityTier::FixedReserve => &mut self.fixed_reserve,
            PriorityTier::Tier1 => &mut self.tier1,
            PriorityTier::Tier2 => &mut self.tier2,
            PriorityTier::Standard => &mut self.standard,
        }
    }

    /// 从分组中取出员工（转移所有权）
    pub fn take(&mut self, tier: PriorityTier, worker_id: &str) -> Option<Worker> {
        let bucket = self.bucket_mut(tier);
        let pos = bucket.iter().position(|w| w.id == worker_id)?;
        Some(bucket.remove(pos))
    }

    fn len(&self) -> usize {
        self.fixed_reserve.len() + self.tier1.len() + self.tier2.len() + self.standard.len()
    }

    /// 消费候选池，按 OVERFLOW_ORDER 返回剩余人员
    pub fn into_leftovers(mut self) -> Vec<Worker> {
        let mut leftovers = Vec::with_capacity(self.len());
        for tier in OVERFLOW_ORDER {
            leftovers.append(self.bucket_mut(tier));
        }
        leftovers
    }
}
