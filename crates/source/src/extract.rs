use crate::types::{SourceRecord, UNKNOWN_PACKAGE};
use std::path::Path;

const PACKAGE_KEYWORD: &str = "package";
const IMPORT_KEYWORD: &str = "import";
const STATIC_MODIFIER: &str = "static";

/// 从单个文件的行提取 SourceRecord
///
/// 纯文本匹配, 任何输入都不会失败:
/// - 第一条 `package x.y;` 决定 package, 没有则为 `UNKNOWN`
/// - 每条 `import x.y.Z;` 按顺序记录, 保留重复
/// - 类名取文件名去掉扩展名
pub fn extract<I, S>(lines: I, filename: &str) -> SourceRecord
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut package = None;
    let mut dependencies = Vec::new();

    for line in lines {
        let line = line.as_ref().trim();

        if package.is_none() {
            if let Some(name) = declared_name(line, PACKAGE_KEYWORD) {
                package = Some(name.to_string());
                continue;
            }
        }

        if let Some(name) = imported_name(line) {
            dependencies.push(name.to_string());
        }
    }

    SourceRecord {
        package: package.unwrap_or_else(|| UNKNOWN_PACKAGE.to_string()),
        class_name: class_name(filename),
        dependencies,
    }
}

/// `keyword name;` -> `name`
///
/// 关键字后必须是空白, 名字截到第一个 `;`
pub(crate) fn declared_name<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let name = rest.split(';').next().unwrap_or(rest).trim();
    (!name.is_empty()).then_some(name)
}

/// `import [static] name;` -> `name`
///
/// 只去掉 `static` 修饰, 不区分静态成员
pub(crate) fn imported_name(line: &str) -> Option<&str> {
    let name = declared_name(line, IMPORT_KEYWORD)?;
    match name.strip_prefix(STATIC_MODIFIER) {
        Some(rest) if rest.starts_with(char::is_whitespace) => {
            let rest = rest.trim();
            (!rest.is_empty()).then_some(rest)
        }
        _ => Some(name),
    }
}

fn class_name(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
        .to_string()
}
