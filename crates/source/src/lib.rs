//! source - 源文件扫描
//!
//! 目录遍历、文件读取、package/import 提取

mod config;
mod extract;
mod types;
mod walker;

pub use config::ScanConfig;
pub use extract::extract;
pub use types::{SourceRecord, UNKNOWN_PACKAGE};
pub use walker::{collect_records, read_lines, SourceError, SourceFile, SourceWalker};
