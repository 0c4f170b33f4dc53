// ==========================================
// 装卸口排班系统 - 导入层
// ==========================================
// 职责: 员工名册文件（CSV/Excel）导入
// ==========================================

pub mod error;
pub mod file_parser;
pub mod roster_importer;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
pub use roster_importer::{RejectedRow, RosterImportResult, RosterImporter};
