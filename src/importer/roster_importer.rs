// ==========================================
// 装卸口排班系统 - 员工名册导入
// ==========================================
// 流程: 文件解析 → 列名映射 → 字段清洗 → 行级校验 → 写入 worker 表
// 规则:
// - 必需列: id, name, gender；active 缺省视为在岗
// - 单行数据错误只拒绝该行，不中断整批
// - 文件内重复 id: 后出现的行覆盖先出现的行
// ==========================================

use crate::domain::types::Gender;
use crate::domain::worker::Worker;
use crate::engine::name_match::normalize_name;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use crate::repository::worker_repo::WorkerRepository;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

const ID_ALIASES: &[&str] = &["id", "employee_id", "worker_id", "matricula", "工号"];
const NAME_ALIASES: &[&str] = &["name", "nome", "姓名"];
const ACTIVE_ALIASES: &[&str] = &["active", "ativo", "在岗"];
const GENDER_ALIASES: &[&str] = &["gender", "sexo", "性别"];

// ==========================================
// 导入结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    pub row: usize, // 数据行号（表头之后从 1 开始）
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RosterImportResult {
    pub workers: Vec<Worker>,
    pub rejected: Vec<RejectedRow>,
}

// ==========================================
// 列名映射
// ==========================================
#[derive(Debug, Clone)]
struct ColumnMap {
    id: String,
    name: String,
    gender: String,
    active: Option<String>,
}

impl ColumnMap {
    fn resolve(record: &RawRecord) -> ImportResult<Self> {
        let find = |aliases: &[&str]| -> Option<String> {
            record
                .keys()
                .find(|k| aliases.contains(&normalize_name(k).as_str()))
                .cloned()
        };

        Ok(Self {
            id: find(ID_ALIASES).ok_or_else(|| ImportError::MissingColumn("id".to_string()))?,
            name: find(NAME_ALIASES).ok_or_else(|| ImportError::MissingColumn("name".to_string()))?,
            gender: find(GENDER_ALIASES)
                .ok_or_else(|| ImportError::MissingColumn("gender".to_string()))?,
            active: find(ACTIVE_ALIASES),
        })
    }
}

// ==========================================
// 字段清洗
// ==========================================

/// 解析在岗标记
pub fn parse_active(raw: &str) -> Option<bool> {
    match normalize_name(raw).as_str() {
        "" => Some(true),
        "1" | "true" | "y" | "yes" | "s" | "sim" | "是" => Some(true),
        "0" | "false" | "n" | "no" | "nao" | "否" => Some(false),
        _ => None,
    }
}

/// 解析性别
pub fn parse_gender(raw: &str) -> Option<Gender> {
    match normalize_name(raw).as_str() {
        "m" | "male" | "masculino" | "男" => Some(Gender::M),
        "f" | "female" | "feminino" | "女" => Some(Gender::F),
        _ => None,
    }
}

// ==========================================
// RosterImporter - 名册导入器
// ==========================================
pub struct RosterImporter {
    parser: UniversalFileParser,
}

impl RosterImporter {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
        }
    }

    /// 解析名册文件（不落库）
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RosterImportResult> {
        let records = self.parser.parse(file_path.as_ref())?;
        self.map_records(&records)
    }

    /// 行记录 → 员工
    pub fn map_records(&self, records: &[RawRecord]) -> ImportResult<RosterImportResult> {
        let mut result = RosterImportResult::default();
        let Some(first) = records.first() else {
            return Ok(result);
        };
        let columns = ColumnMap::resolve(first)?;

        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;
            match Self::map_row(record, &columns) {
                Ok(worker) => {
                    if let Some(pos) = result.workers.iter().position(|w| w.id == worker.id) {
                        warn!(row, worker_id = %worker.id, "名册内重复员工ID，以后出现的行为准");
                        result.workers.remove(pos);
                    }
                    result.workers.push(worker);
                }
                Err(reason) => result.rejected.push(RejectedRow { row, reason }),
            }
        }

        info!(
            accepted = result.workers.len(),
            rejected = result.rejected.len(),
            "名册解析完成"
        );
        Ok(result)
    }

    fn map_row(record: &RawRecord, columns: &ColumnMap) -> Result<Worker, String> {
        let get = |key: &str| record.get(key).map(|v| v.trim()).unwrap_or("");

        let id = get(&columns.id);
        if id.is_empty() {
            return Err("员工ID为空".to_string());
        }

        let name = get(&columns.name);
        if name.is_empty() {
            return Err(format!("员工 {} 姓名为空", id));
        }

        let gender_raw = get(&columns.gender);
        let gender = parse_gender(gender_raw)
            .ok_or_else(|| format!("员工 {} 性别无法识别: {}", id, gender_raw))?;

        let active = match &columns.active {
            Some(col) => {
                let raw = get(col);
                parse_active(raw).ok_or_else(|| format!("员工 {} 在岗标记无法识别: {}", id, raw))?
            }
            None => true,
        };

        Ok(Worker {
            id: id.to_string(),
            name: name.to_string(),
            active,
            gender,
        })
    }

    /// 解析并写入 worker 表
    pub fn import_file<P: AsRef<Path>>(
        &self,
        file_path: P,
        repo: &WorkerRepository,
    ) -> ImportResult<RosterImportResult> {
        let result = self.parse_file(file_path)?;
        let written = repo.batch_upsert(&result.workers)?;
        info!(written, "名册写入完成");
        Ok(result)
    }
}

impl Default for RosterImporter {
    fn default() -> Self {
        Self::new()
    }
}
