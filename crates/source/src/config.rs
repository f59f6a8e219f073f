//! 扫描配置

/// 扫描配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// 文件名匹配模式
    pub pattern: String,
    /// 跳过的目录名
    pub excludes: Vec<String>,
    /// 依赖聚合时忽略的前缀
    pub ignored_prefixes: Vec<String>,
    /// 是否输出 package 依赖
    pub dependencies: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pattern: "*.java".to_string(),
            excludes: Vec::new(),
            ignored_prefixes: Vec::new(),
            dependencies: false,
        }
    }
}

impl ScanConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[doc(hidden)]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("PLUME_PATTERN") {
            if !v.trim().is_empty() {
                config.pattern = v.trim().to_string();
            }
        }

        if let Some(v) = lookup("PLUME_EXCLUDE") {
            config.excludes = split_list(&v);
        }

        if let Some(v) = lookup("PLUME_IGNORE") {
            config.ignored_prefixes = split_list(&v);
        }

        if let Some(v) = lookup("PLUME_DEPS") {
            config.dependencies = matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }

        config
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
