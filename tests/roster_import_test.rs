// ==========================================
// 员工名册导入集成测试
// ==========================================
// 测试目标: CSV 文件 → 解析 → 写入 worker 表
// ==========================================


use dock_rotation::domain::Gender;
use dock_rotation::importer::{ImportError, RosterImporter};
use dock_rotation::repository::WorkerRepository;
use std::io::Write;
use tempfile::Builder;
use test_helpers::*;

fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_import_csv_into_worker_table() {
    let (_tmp, conn) = create_test_db().unwrap();
    let repo = WorkerRepository::from_connection(conn);

    let csv = write_csv(&[
        "Matrícula,Nome,Sexo,Ativo",
        "101,José da Silva,M,1",
        "102,Maria Souza,F,sim",
        "103,Pedro,X,1",
        "104,Carla,F,0",
    ]);

    let result = RosterImporter::new().import_file(csv.path(), &repo).unwrap();
    assert_eq!(result.workers.len(), 3);
    assert_eq!(result.rejected.len(), 1);
    assert_eq!(result.rejected[0].row, 3);

    let stored = repo.list_all().unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].name, "José da Silva");
    assert_eq!(stored[1].gender, Gender::F);
    assert!(!stored[2].active);

    let active: Vec<String> = repo.list_active().unwrap().into_iter().map(|w| w.id).collect();
    assert_eq!(active, vec!["101", "102"]);
}

#[test]
fn test_reimport_updates_existing_workers() {
    let (_tmp, conn) = create_test_db().unwrap();
    let repo = WorkerRepository::from_connection(conn);
    let importer = RosterImporter::new();

    importer
        .import_file(write_csv(&["id,name,gender", "1,Ana,F", "2,Rui,M"]).path(), &repo)
        .unwrap();
    importer
        .import_file(write_csv(&["id,name,gender,active", "2,Rui Costa,M,nao"]).path(), &repo)
        .unwrap();

    let rui = repo.find_by_id("2").unwrap().unwrap();
    assert_eq!(rui.name, "Rui Costa");
    assert!(!rui.active);
    assert_eq!(repo.list_all().unwrap().len(), 2);
}

#[test]
fn test_missing_required_column() {
    let (_tmp, conn) = create_test_db().unwrap();
    let repo = WorkerRepository::from_connection(conn);

    let err = RosterImporter::new()
        .import_file(write_csv(&["id,name", "1,Ana"]).path(), &repo)
        .unwrap_err();
    assert!(matches!(err, ImportError::MissingColumn(_)));
    assert!(repo.list_all().unwrap().is_empty());
}
