// ==========================================
// RotationApi 端到端测试
// ==========================================
// 测试目标: 名册 → 生成 → 人工调整 → 保存 → 次日轮换
// ==========================================


use std::sync::Arc;

use dock_rotation::api::{ApiError, RotationApi};
use dock_rotation::config::{ConfigManager, RotationConfig};
use dock_rotation::domain::{Assignment, DAY_PASS_ID, RESERVE_STATION_ID};
use dock_rotation::logging;
use dock_rotation::repository::WorkerRepository;
use test_helpers::*;

fn setup(workers: &[dock_rotation::Worker]) -> (tempfile::NamedTempFile, RotationApi) {
    logging::init_test();
    let (tmp, conn) = create_test_db().unwrap();

    WorkerRepository::from_connection(conn.clone())
        .batch_upsert(workers)
        .unwrap();
    ConfigManager::from_connection(conn.clone())
        .unwrap()
        .save_rotation_config(&RotationConfig::without_name_lists())
        .unwrap();

    (tmp, RotationApi::from_connection(conn).unwrap())
}

#[test]
fn test_generate_and_save_then_rotate_next_day() {
    let (_tmp, api) = setup(&men(5));

    let first = api.generate_and_save(day(1), 1_000.0, 0).unwrap();
    assert_eq!(occupants(&first.assignments, "turn"), vec!["m00", "m01"]);
    assert_eq!(first.volume, 1_000.0);

    // 次日：做过翻包的人让位
    let second = api.generate(day(2), 1_000.0, 0).unwrap();
    let turn = occupants(&second.assignments, "turn");
    assert!(!turn.contains(&"m00"));
    assert!(!turn.contains(&"m01"));
    assert_eq!(turn.len(), 2);
    // generate 不落库
    assert!(api.get_record(day(2)).unwrap().is_none());
}

#[test]
fn test_pin_slot_survives_regeneration() {
    let (_tmp, api) = setup(&men(6));

    api.generate_and_save(day(3), 0.0, 0).unwrap();
    let pinned = api.pin_slot(day(3), "turn", 0, "m05").unwrap();
    assert!(pinned.assignments.contains(&Assignment::manual("turn", "m05", 0)));
    assert_eq!(by_employee(&pinned.assignments)["m05"].len(), 1);

    let regenerated = api.generate_and_save(day(3), 0.0, 1).unwrap();
    assert!(regenerated
        .assignments
        .contains(&Assignment::manual("turn", "m05", 0)));
    assert_eq!(occupants(&regenerated.assignments, "unload")[0], DAY_PASS_ID);
    assert_eq!(by_employee(&regenerated.assignments)["m05"].len(), 1);
}

#[test]
fn test_unpin_slot_clears_manual_flag() {
    let (_tmp, api) = setup(&men(2));

    api.pin_slot(day(4), RESERVE_STATION_ID, 0, "m01").unwrap();
    let record = api.unpin_slot(day(4), RESERVE_STATION_ID, 0).unwrap();
    assert_eq!(record.assignments, vec![Assignment::auto(RESERVE_STATION_ID, "m01", 0)]);

    let err = api.unpin_slot(day(4), "turn", 1).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn test_pin_slot_validation() {
    let mut workers = men(2);
    workers[1].active = false;
    let (_tmp, api) = setup(&workers);

    assert!(matches!(
        api.pin_slot(day(1), "dock-9", 0, "m00").unwrap_err(),
        ApiError::InvalidInput(_)
    ));
    assert!(matches!(
        api.pin_slot(day(1), "turn", 2, "m00").unwrap_err(),
        ApiError::InvalidInput(_)
    ));
    assert!(matches!(
        api.pin_slot(day(1), "turn", 0, "ghost").unwrap_err(),
        ApiError::NotFound(_)
    ));
    assert!(matches!(
        api.pin_slot(day(1), "turn", 0, "m01").unwrap_err(),
        ApiError::BusinessRuleViolation(_)
    ));
    // 日结占位可锁定到任意有效槽位
    assert!(api.pin_slot(day(1), "unload", 1, DAY_PASS_ID).is_ok());
}

#[test]
fn test_invalid_volume_rejected() {
    let (_tmp, api) = setup(&men(1));
    assert!(matches!(
        api.generate(day(1), -5.0, 0).unwrap_err(),
        ApiError::InvalidInput(_)
    ));
    assert!(matches!(
        api.generate(day(1), f64::NAN, 0).unwrap_err(),
        ApiError::InvalidInput(_)
    ));
}

#[test]
fn test_list_history_uses_saved_records() {
    let (_tmp, api) = setup(&men(3));
    for d in 1..=4 {
        api.generate_and_save(day(d), 0.0, 0).unwrap();
    }

    let history = api.list_history(day(4), 2).unwrap();
    let dates: Vec<_> = history.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day(3), day(2)]);
    assert!(matches!(api.list_history(day(4), 0), Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_default_config_used_when_none_saved() {
    logging::init_test();
    let (_tmp, conn) = create_test_db().unwrap();
    WorkerRepository::from_connection(conn.clone())
        .batch_upsert(&[man("jb", "Joao Batista"), man("p", "Paulo")])
        .unwrap();
    let api = RotationApi::new(
        Arc::new(WorkerRepository::from_connection(conn.clone())),
        Arc::new(dock_rotation::repository::DailyRecordRepository::from_connection(conn.clone())),
        Arc::new(ConfigManager::from_connection(conn).unwrap()),
        dock_rotation::StationCatalog::default(),
    );

    let outcome = api.generate(day(1), 0.0, 0).unwrap();
    assert_eq!(station_of(&outcome.assignments, "jb"), Some(RESERVE_STATION_ID));
    assert_eq!(station_of(&outcome.assignments, "p"), Some("turn"));
}

#[test]
fn test_day_pass_can_be_pinned_on_bagging_overflow_slot() {
    let (_tmp, api) = setup(&men(6));

    let saved = api.generate_and_save(day(7), 100.0, 8).unwrap();
    let bagging_day_pass = saved
        .assignments
        .iter()
        .filter(|a| a.task_id == "bagging" && a.employee_id == DAY_PASS_ID)
        .count();
    assert_eq!(bagging_day_pass, 6);

    let pinned = api.pin_slot(day(7), "bagging", 5, DAY_PASS_ID).unwrap();
    assert!(pinned
        .assignments
        .contains(&Assignment::manual("bagging", DAY_PASS_ID, 5)));

    // 真实员工仍受容量限制
    assert!(matches!(
        api.pin_slot(day(7), "bagging", 5, "m00").unwrap_err(),
        ApiError::InvalidInput(_)
    ));
    // 日结占位在其他岗位仍受容量限制
    assert!(matches!(
        api.pin_slot(day(7), "unload", 2, DAY_PASS_ID).unwrap_err(),
        ApiError::InvalidInput(_)
    ));
}

#[test]
fn test_generate_uses_active_roster_order() {
    let mut workers = men(4);
    workers[0].active = false;
    let (_tmp, api) = setup(&workers);

    let outcome = api.generate(day(1), 0.0, 0).unwrap();
    assert_eq!(station_of(&outcome.assignments, "m00"), None);
    assert_eq!(occupants(&outcome.assignments, "turn"), vec!["m01", "m02"]);
}

#[test]
fn test_config_snapshot_kept_with_saved_record() {
    let (_tmp, api) = setup(&men(3));
    assert!(api.get_config_snapshot(day(8)).unwrap().is_none());

    api.generate_and_save(day(8), 0.0, 0).unwrap();
    let snapshot = api.get_config_snapshot(day(8)).unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
    assert!(parsed.get("rotation_config").is_some());

    // 人工调整后快照保留
    api.pin_slot(day(8), "turn", 0, "m02").unwrap();
    assert_eq!(api.get_config_snapshot(day(8)).unwrap(), Some(snapshot));
}
