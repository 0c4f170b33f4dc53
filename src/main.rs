// ==========================================
// 装卸口排班系统 - 命令行入口
// ==========================================
// 用法:
//   dock-rotation import-roster <file> [db_path]
//   dock-rotation generate <YYYY-MM-DD> <volume> <day_pass_count> [db_path] [--save]
//   dock-rotation show <YYYY-MM-DD> [db_path]
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use dock_rotation::db::{default_db_path, init_schema, open_sqlite_connection};
use dock_rotation::importer::RosterImporter;
use dock_rotation::repository::WorkerRepository;
use dock_rotation::{logging, RotationApi};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

const USAGE: &str = "\
用法:
  dock-rotation import-roster <file> [db_path]
  dock-rotation generate <YYYY-MM-DD> <volume> <day_pass_count> [db_path] [--save]
  dock-rotation show <YYYY-MM-DD> [db_path]";

fn open_db(db_path: Option<String>) -> Result<Arc<Mutex<Connection>>> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("无法打开数据库 {}", db_path))?;
    init_schema(&conn).context("建表失败")?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("日期格式错误（期望 YYYY-MM-DD）: {}", raw))
}

fn main() -> Result<()> {
    logging::init();
    tracing::info!("{} v{}", dock_rotation::APP_NAME, dock_rotation::VERSION);

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let save = args.iter().any(|a| a == "--save");
    args.retain(|a| a != "--save");

    let mut args = args.into_iter();
    let command = args.next().ok_or_else(|| anyhow!("{}", USAGE))?;

    match command.as_str() {
        "import-roster" => {
            let file = args.next().ok_or_else(|| anyhow!("{}", USAGE))?;
            let conn = open_db(args.next())?;
            let repo = WorkerRepository::from_connection(conn);
            let result = RosterImporter::new().import_file(&file, &repo)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        "generate" => {
            let date = parse_date(&args.next().ok_or_else(|| anyhow!("{}", USAGE))?)?;
            let volume: f64 = args
                .next()
                .ok_or_else(|| anyhow!("{}", USAGE))?
                .parse()
                .context("发货量必须为数字")?;
            let day_pass_count: u32 = args
                .next()
                .ok_or_else(|| anyhow!("{}", USAGE))?
                .parse()
                .context("日结人数必须为非负整数")?;
            let api = RotationApi::from_connection(open_db(args.next())?)?;

            if save {
                let record = api.generate_and_save(date, volume, day_pass_count)?;
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                let outcome = api.generate(date, volume, day_pass_count)?;
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
        }
        "show" => {
            let date = parse_date(&args.next().ok_or_else(|| anyhow!("{}", USAGE))?)?;
            let api = RotationApi::from_connection(open_db(args.next())?)?;
            match api.get_record(date)? {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => bail!("{} 没有排班记录", date),
            }
        }
        other => bail!("未知命令: {}\n{}", other, USAGE),
    }

    Ok(())
}
