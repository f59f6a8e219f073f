use source::SourceRecord;
use std::collections::{BTreeMap, BTreeSet};

/// package -> 依赖的 package 集合
pub type DependencyMap = BTreeMap<String, BTreeSet<String>>;

/// 聚合 package 级依赖
///
/// 每个出现过的 package 都有条目 (可能为空集);
/// 以任一忽略前缀开头的 import 不计入 (纯字符串前缀, 不按分段)
pub fn aggregate_dependencies<'a, I, S>(records: I, ignored_prefixes: &[S]) -> DependencyMap
where
    I: IntoIterator<Item = &'a SourceRecord>,
    S: AsRef<str>,
{
    records.into_iter().fold(DependencyMap::new(), |mut map, record| {
        let targets = map.entry(record.package.clone()).or_default();

        for dependency in &record.dependencies {
            if is_ignored(dependency, ignored_prefixes) {
                tracing::trace!("{}: ignoring {}", record.package, dependency);
                continue;
            }
            targets.insert(containing_package(dependency).to_string());
        }

        map
    })
}

/// `a.b.C` -> `a.b`, 没有分隔符时原样返回
pub fn containing_package(dependency: &str) -> &str {
    dependency
        .rsplit_once('.')
        .map_or(dependency, |(package, _)| package)
}

fn is_ignored<S: AsRef<str>>(dependency: &str, ignored_prefixes: &[S]) -> bool {
    ignored_prefixes
        .iter()
        .any(|p| dependency.starts_with(p.as_ref()))
}

/// 边数 (source, target) 对
pub fn edge_count(map: &DependencyMap) -> usize {
    map.values().map(BTreeSet::len).sum()
}
