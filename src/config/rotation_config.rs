// ==========================================
// 装卸口排班系统 - 轮换引擎配置
// ==========================================
// 职责: 特殊名单、高发货量阈值、岗位填充优先级
// 存储: config_kv 表 (key = rotation_config, JSON)
// ==========================================
// 名单按姓名配置，每次调用时解析为 员工ID → 分层 的映射，
// 引擎内部只按ID判断
// ==========================================

use crate::domain::types::{PriorityTier, StationCategory};
use crate::domain::worker::Worker;
use crate::engine::name_match::normalize_name;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// 默认高发货量阈值（超过则翻包岗只用精英名单）
pub const DEFAULT_HIGH_VOLUME_THRESHOLD: f64 = 12_000.0;

/// 未配置类别的默认填充优先级
pub const DEFAULT_FILL_RANK: u32 = 2;

/// 默认历史窗口（天）
pub const DEFAULT_HISTORY_WINDOW_DAYS: u32 = 30;

// ==========================================
// RotationConfig - 轮换引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// 固定机动人员（永不上岗）
    #[serde(default)]
    pub fixed_reserve_names: Vec<String>,

    /// 一级备勤偏好（最后兜底）
    #[serde(default)]
    pub tier1_names: Vec<String>,

    /// 二级备勤偏好（标准池耗尽后）
    #[serde(default)]
    pub tier2_names: Vec<String>,

    /// 高发货量翻包精英名单
    #[serde(default)]
    pub elite_turn_names: Vec<String>,

    /// 高发货量阈值（严格大于）
    #[serde(default = "default_high_volume_threshold")]
    pub high_volume_threshold: f64,

    /// 岗位类别填充优先级（越小越先填）
    #[serde(default = "default_category_fill_priority")]
    pub category_fill_priority: HashMap<StationCategory, u32>,

    /// 女性不可安排的岗位类别
    #[serde(default = "default_restricted_gender_categories")]
    pub restricted_gender_categories: Vec<StationCategory>,

    /// 参与轮换评分的历史天数
    #[serde(default = "default_history_window_days")]
    pub history_window_days: u32,
}

fn default_high_volume_threshold() -> f64 {
    DEFAULT_HIGH_VOLUME_THRESHOLD
}

fn default_category_fill_priority() -> HashMap<StationCategory, u32> {
    HashMap::from([(StationCategory::Turn, 0), (StationCategory::Unload, 1)])
}

fn default_restricted_gender_categories() -> Vec<StationCategory> {
    vec![StationCategory::Turn, StationCategory::Unload]
}

fn default_history_window_days() -> u32 {
    DEFAULT_HISTORY_WINDOW_DAYS
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            fixed_reserve_names: vec!["João Batista".to_string()],
            tier1_names: vec!["Antônio Carlos".to_string()],
            tier2_names: vec!["Sebastião".to_string(), "Raimundo".to_string()],
            elite_turn_names: vec![
                "Márcio".to_string(),
                "Cláudio".to_string(),
                "Fábio".to_string(),
                "Anderson".to_string(),
            ],
            high_volume_threshold: DEFAULT_HIGH_VOLUME_THRESHOLD,
            category_fill_priority: default_category_fill_priority(),
            restricted_gender_categories: default_restricted_gender_categories(),
            history_window_days: DEFAULT_HISTORY_WINDOW_DAYS,
        }
    }
}

impl RotationConfig {
    /// 空名单配置（无特殊分组），便于测试替换
    pub fn without_name_lists() -> Self {
        Self {
            fixed_reserve_names: Vec::new(),
            tier1_names: Vec::new(),
            tier2_names: Vec::new(),
            elite_turn_names: Vec::new(),
            ..Self::default()
        }
    }

    /// 类别填充优先级
    pub fn fill_rank(&self, category: StationCategory) -> u32 {
        self.category_fill_priority
            .get(&category)
            .copied()
            .unwrap_or(DEFAULT_FILL_RANK)
    }

    /// 当日是否触发翻包精英规则
    pub fn is_high_volume(&self, volume: f64) -> bool {
        volume > self.high_volume_threshold
    }

    /// 按名单解析员工分层
    ///
    /// # 规则
    /// - 同时命中多个名单时取最严格的分层（FixedReserve > Tier1 > Tier2）
    /// - 未命中任何名单 → Standard
    pub fn resolve_roster(&self, workers: &[Worker]) -> PriorityRoster {
        let fixed = normalized_set(&self.fixed_reserve_names);
        let tier1 = normalized_set(&self.tier1_names);
        let tier2 = normalized_set(&self.tier2_names);
        let elite = normalized_set(&self.elite_turn_names);

        let mut tiers = HashMap::new();
        let mut elite_ids = HashSet::new();

        for worker in workers {
            let key = normalize_name(&worker.name);
            if key.is_empty() {
                continue;
            }

            let tier = if fixed.contains(&key) {
                Some(PriorityTier::FixedReserve)
            } else if tier1.contains(&key) {
                Some(PriorityTier::Tier1)
            } else if tier2.contains(&key) {
                Some(PriorityTier::Tier2)
            } else {
                None
            };
            if let Some(tier) = tier {
                tiers.insert(worker.id.clone(), tier);
            }

            if elite.contains(&key) {
                elite_ids.insert(worker.id.clone());
            }
        }

        PriorityRoster { tiers, elite_ids }
    }
}

fn normalized_set(names: &[String]) -> HashSet<String> {
    names
        .iter()
        .map(|n| normalize_name(n))
        .filter(|n| !n.is_empty())
        .collect()
}

// ==========================================
// PriorityRoster - 员工ID → 分层
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityRoster {
    tiers: HashMap<String, PriorityTier>,
    elite_ids: HashSet<String>,
}

impl PriorityRoster {
    pub fn tier_of(&self, worker_id: &str) -> PriorityTier {
        self.tiers
            .get(worker_id)
            .copied()
            .unwrap_or(PriorityTier::Standard)
    }

    pub fn is_elite(&self, worker_id: &str) -> bool {
        self.elite_ids.contains(worker_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Gender;

    fn worker(id: &str, name: &str) -> Worker {
        Worker::new(id, name, Gender::M)
    }

    #[test]
    fn test_resolve_roster_by_normalized_name() {
        let config = RotationConfig::default();
        let workers = vec![
            worker("w1", "JOAO BATISTA"),
            worker("w2", "antonio carlos"),
            worker("w3", "Sebastiao"),
            worker("w4", "Maria"),
            worker("w5", "marcio"),
        ];

        let roster = config.resolve_roster(&workers);
        assert_eq!(roster.tier_of("w1"), PriorityTier::FixedReserve);
        assert_eq!(roster.tier_of("w2"), PriorityTier::Tier1);
        assert_eq!(roster.tier_of("w3"), PriorityTier::Tier2);
        assert_eq!(roster.tier_of("w4"), PriorityTier::Standard);
        assert_eq!(roster.tier_of("unknown"), PriorityTier::Standard);
        assert!(roster.is_elite("w5"));
        assert!(!roster.is_elite("w4"));
    }

    #[test]
    fn test_most_restrictive_tier_wins() {
        let config = RotationConfig {
            tier1_names: vec!["Pedro".to_string()],
            tier2_names: vec!["Pedro".to_string()],
            ..RotationConfig::without_name_lists()
        };
        let roster = config.resolve_roster(&[worker("p", "Pedro")]);
        assert_eq!(roster.tier_of("p"), PriorityTier::Tier1);
    }

    #[test]
    fn test_fill_rank_defaults() {
        let config = RotationConfig::default();
        assert_eq!(config.fill_rank(StationCategory::Turn), 0);
        assert_eq!(config.fill_rank(StationCategory::Unload), 1);
        assert_eq!(config.fill_rank(StationCategory::Fishing), DEFAULT_FILL_RANK);
        assert_eq!(config.fill_rank(StationCategory::Bagging), DEFAULT_FILL_RANK);
    }

    #[test]
    fn test_high_volume_is_strict() {
        let config = RotationConfig::default();
        assert!(!config.is_high_volume(12_000.0));
        assert!(config.is_high_volume(12_000.5));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RotationConfig =
            serde_json::from_str(r#"{"tier2_names": ["Zé"]}"#).unwrap();
        assert_eq!(config.tier2_names, vec!["Zé".to_string()]);
        assert!(config.fixed_reserve_names.is_empty());
        assert_eq!(config.high_volume_threshold, DEFAULT_HIGH_VOLUME_THRESHOLD);
        assert_eq!(config.fill_rank(StationCategory::Turn), 0);
        assert_eq!(config.history_window_days, DEFAULT_HISTORY_WINDOW_DAYS);
    }

    #[test]
    fn test_config_json_round_trip_keeps_priority_map() {
        let config = RotationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: RotationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
