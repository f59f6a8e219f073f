use crate::extract::extract;
use crate::types::SourceRecord;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Read error: {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// 扫描到的源文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub directory: PathBuf,
    pub filename: String,
}

impl SourceFile {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// 源文件遍历器
pub struct SourceWalker {
    root: PathBuf,
    pattern: String,
    excludes: Vec<String>,
}

impl SourceWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pattern: "*.java".to_string(),
            excludes: Vec::new(),
        }
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = pattern.to_string();
        self
    }

    pub fn with_excludes(mut self, excludes: &[String]) -> Self {
        self.excludes = excludes.to_vec();
        self
    }

    /// 收集匹配的文件, 按路径排序
    ///
    /// 排除列表中的目录整棵跳过, 不跟随符号链接
    pub fn files(&self) -> Result<Vec<SourceFile>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().to_string();
            if !glob_match(&self.pattern, &filename) {
                continue;
            }

            let directory = entry
                .path()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            files.push(SourceFile { directory, filename });
        }

        tracing::debug!("Matched {} files under {}", files.len(), self.root.display());
        Ok(files)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        // 根目录本身不参与排除
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.excludes.iter().any(|e| *e == name)
    }
}

/// 读取文件并按行拆分 (非 UTF-8 内容按 lossy 处理)
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(String::from)
        .collect())
}

/// 遍历并提取所有文件的记录
pub fn collect_records(walker: &SourceWalker) -> Result<Vec<SourceRecord>> {
    let files = walker.files()?;

    let records = files.iter().try_fold(Vec::with_capacity(files.len()), |mut acc, file| {
        let path = file.path();
        let lines = read_lines(&path)?;
        let record = extract(&lines, &file.filename);
        tracing::debug!("{} -> {}", path.display(), record.qualified_name());
        acc.push(record);
        Ok::<_, SourceError>(acc)
    })?;

    tracing::info!("Extracted {} records from {}", records.len(), walker.root.display());
    Ok(records)
}

/// 简单通配: 只支持 `*`
pub(crate) fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return text == pattern;
    }

    let first = parts[0];
    let last = parts[parts.len() - 1];
    if !text.starts_with(first) {
        return false;
    }

    let mut pos = first.len();
    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match text[pos..].find(part) {
            Some(idx) => pos += idx + part.len(),
            None => return false,
        }
    }

    text.len() >= pos + last.len() && text[pos..].ends_with(last)
}
