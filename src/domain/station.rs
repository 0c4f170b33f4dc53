// ==========================================
// 装卸口排班系统 - 岗位目录
// ==========================================
// 固定目录: 11 个有界岗位 + 1 个机动池
// 引擎只读，不修改目录
// ==========================================

use crate::domain::types::StationCategory;
use serde::{Deserialize, Serialize};

/// 机动池岗位ID
pub const RESERVE_STATION_ID: &str = "reserve";

// ==========================================
// TaskStation - 岗位
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStation {
    pub id: String,                // 岗位ID
    pub category: StationCategory, // 岗位类别
    pub capacity: Option<u32>,     // 容量（None = 无上限）
}

impl TaskStation {
    pub fn bounded(id: impl Into<String>, category: StationCategory, capacity: u32) -> Self {
        Self {
            id: id.into(),
            category,
            capacity: Some(capacity),
        }
    }

    pub fn unbounded(id: impl Into<String>, category: StationCategory) -> Self {
        Self {
            id: id.into(),
            category,
            capacity: None,
        }
    }
}

// ==========================================
// StationCatalog - 岗位目录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationCatalog {
    stations: Vec<TaskStation>,
}

impl StationCatalog {
    pub fn new(stations: Vec<TaskStation>) -> Self {
        Self { stations }
    }

    /// 全部岗位（按目录顺序）
    pub fn stations(&self) -> &[TaskStation] {
        &self.stations
    }

    pub fn get(&self, station_id: &str) -> Option<&TaskStation> {
        self.stations.iter().find(|s| s.id == station_id)
    }

    /// 指定类别的第一个岗位
    pub fn first_of(&self, category: StationCategory) -> Option<&TaskStation> {
        self.stations.iter().find(|s| s.category == category)
    }

    /// 有界岗位（机动池除外）
    pub fn bounded_stations(&self) -> impl Iterator<Item = &TaskStation> {
        self.stations
            .iter()
            .filter(|s| s.category.is_bounded() && s.capacity.is_some())
    }
}

impl Default for StationCatalog {
    /// 现场固定目录
    fn default() -> Self {
        let mut stations = vec![
            TaskStation::bounded("unload", StationCategory::Unload, 2),
            TaskStation::bounded("turn", StationCategory::Turn, 2),
        ];
        for n in 1..=8 {
            stations.push(TaskStation::bounded(
                format!("fishing-{:02}", n),
                StationCategory::Fishing,
                1,
            ));
        }
        stations.push(TaskStation::bounded("bagging", StationCategory::Bagging, 4));
        stations.push(TaskStation::unbounded(
            RESERVE_STATION_ID,
            StationCategory::Reserve,
        ));
        Self { stations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_shape() {
        let catalog = StationCatalog::default();
        assert_eq!(catalog.stations().len(), 12);
        assert_eq!(catalog.bounded_stations().count(), 11);
        let capacity: u32 = catalog.bounded_stations().filter_map(|s| s.capacity).sum();
        assert_eq!(capacity, 2 + 2 + 8 + 4);
        assert_eq!(catalog.get("fishing-08").map(|s| s.capacity), Some(Some(1)));
        assert_eq!(
            catalog.first_of(StationCategory::Reserve).map(|s| s.id.as_str()),
            Some(RESERVE_STATION_ID)
        );
    }
}
