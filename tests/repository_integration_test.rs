// ==========================================
// Repository 层集成测试
// ==========================================
// 测试目标: 验证员工/排班记录的持久化行为
// ==========================================


use dock_rotation::domain::{Assignment, DailyRecord, Gender, DAY_PASS_ID};
use dock_rotation::repository::{DailyRecordRepository, RepositoryError, WorkerRepository};
use test_helpers::*;

// ==========================================
// WorkerRepository
// ==========================================

#[test]
fn test_worker_upsert_and_query() {
    let (_tmp, conn) = create_test_db().unwrap();
    let repo = WorkerRepository::from_connection(conn);

    repo.upsert(&man("w1", "Paulo")).unwrap();
    repo.upsert(&woman("w2", "Ana")).unwrap();

    // 更新不改变列表顺序
    let mut renamed = man("w1", "Paulo Roberto");
    renamed.active = false;
    repo.upsert(&renamed).unwrap();

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], renamed);
    assert_eq!(all[1].gender, Gender::F);

    let active = repo.list_active().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "w2");

    assert_eq!(repo.find_by_id("w2").unwrap().map(|w| w.name), Some("Ana".to_string()));
    assert!(repo.find_by_id("nope").unwrap().is_none());
}

#[test]
fn test_worker_batch_upsert_and_set_active() {
    let (_tmp, conn) = create_test_db().unwrap();
    let repo = WorkerRepository::from_connection(conn);

    let written = repo.batch_upsert(&men(5)).unwrap();
    assert_eq!(written, 5);

    repo.set_active("m03", false).unwrap();
    let ids: Vec<String> = repo.list_active().unwrap().into_iter().map(|w| w.id).collect();
    assert_eq!(ids, vec!["m00", "m01", "m02", "m04"]);

    let err = repo.set_active("ghost", true).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    assert!(repo.delete("m04").unwrap());
    assert!(!repo.delete("m04").unwrap());
}

// ==========================================
// DailyRecordRepository
// ==========================================

#[test]
fn test_daily_record_save_and_load_keeps_order() {
    let (_tmp, conn) = create_test_db().unwrap();
    let repo = DailyRecordRepository::from_connection(conn);

    let record = DailyRecord {
        date: day(5),
        assignments: vec![
            Assignment::manual("turn", "w1", 1),
            Assignment::day_pass("unload", 0),
            Assignment::day_pass("unload", 1),
            Assignment::auto("reserve", "w2", 0),
        ],
        volume: 13_500.0,
        day_pass_count: 2,
    };
    repo.save(&record).unwrap();

    let loaded = repo.find_by_date(day(5)).unwrap().unwrap();
    assert_eq!(loaded, record);
    assert_eq!(
        loaded.assignments.iter().filter(|a| a.employee_id == DAY_PASS_ID).count(),
        2
    );
    assert!(repo.find_by_date(day(6)).unwrap().is_none());
}

#[test]
fn test_saving_same_date_replaces_record() {
    let (_tmp, conn) = create_test_db().unwrap();
    let repo = DailyRecordRepository::from_connection(conn);

    repo.save(&record(5, vec![Assignment::auto("turn", "w1", 0)])).unwrap();
    repo.save(&record(5, vec![Assignment::auto("bagging", "w9", 2)])).unwrap();

    let loaded = repo.find_by_date(day(5)).unwrap().unwrap();
    assert_eq!(loaded.assignments, vec![Assignment::auto("bagging", "w9", 2)]);
}

#[test]
fn test_list_before_most_recent_first_with_limit() {
    let (_tmp, conn) = create_test_db().unwrap();
    let repo = DailyRecordRepository::from_connection(conn);

    for d in [3, 1, 4, 2, 6] {
        repo.save(&record(d, vec![Assignment::auto("turn", &format!("w{}", d), 0)]))
            .unwrap();
    }

    let history = repo.list_before(day(5), 3).unwrap();
    let dates: Vec<_> = history.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day(4), day(3), day(2)]);
    assert_eq!(history[0].assignments[0].employee_id, "w4");

    assert!(repo.delete_by_date(day(4)).unwrap());
    assert!(!repo.delete_by_date(day(4)).unwrap());
    assert_eq!(repo.list_before(day(5), 10).unwrap().len(), 3);
}

#[test]
fn test_config_snapshot_survives_plain_resave() {
    let (_tmp, conn) = create_test_db().unwrap();
    let repo = DailyRecordRepository::from_connection(conn);

    repo.save(&record(9, vec![Assignment::auto("turn", "w1", 0)])).unwrap();
    assert_eq!(repo.find_config_snapshot(day(9)).unwrap(), None);

    repo.save_with_config_snapshot(&record(9, vec![]), Some(r#"{"k":"v"}"#))
        .unwrap();
    repo.save(&record(9, vec![Assignment::auto("turn", "w2", 0)])).unwrap();
    assert_eq!(
        repo.find_config_snapshot(day(9)).unwrap().as_deref(),
        Some(r#"{"k":"v"}"#)
    );
    assert_eq!(repo.find_config_snapshot(day(10)).unwrap(), None);
}
