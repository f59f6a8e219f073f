use serde::{Deserialize, Serialize};

/// 未声明 package 时使用的占位名
pub const UNKNOWN_PACKAGE: &str = "UNKNOWN";

/// 源文件记录 - 每个文件一条
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// 点分 package 名: "com.acme.util"
    pub package: String,
    /// 类名 (取自文件名)
    pub class_name: String,
    /// import 的完整名, 按文件顺序, 保留重复
    pub dependencies: Vec<String>,
}

impl SourceRecord {
    pub fn new(package: impl Into<String>, class_name: impl Into<String>, dependencies: Vec<String>) -> Self {
        Self {
            package: package.into(),
            class_name: class_name.into(),
            dependencies,
        }
    }

    /// package 路径分段
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.package.split('.')
    }

    /// 完整限定名: "com.acme.Foo"
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_split_on_dots() {
        let record = SourceRecord::new("com.acme.util", "Foo", vec![]);
        let segments: Vec<_> = record.segments().collect();
        assert_eq!(segments, vec!["com", "acme", "util"]);
    }

    #[test]
    fn test_segments_single() {
        let record = SourceRecord::new(UNKNOWN_PACKAGE, "Foo", vec![]);
        assert_eq!(record.segments().collect::<Vec<_>>(), vec!["UNKNOWN"]);
    }

    #[test]
    fn test_qualified_name() {
        let record = SourceRecord::new("com.acme", "Foo", vec![]);
        assert_eq!(record.qualified_name(), "com.acme.Foo");
    }

    #[test]
    fn test_record_serializes_to_json() {
        let record = SourceRecord::new("com.acme", "Foo", vec!["java.util.List".to_string()]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["package"], "com.acme");
        assert_eq!(json["class_name"], "Foo");
        assert_eq!(json["dependencies"][0], "java.util.List");
    }
}
