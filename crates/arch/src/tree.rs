use source::SourceRecord;
use std::collections::BTreeMap;

/// 节点在 arena 中的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// 命名空间节点
#[derive(Debug, Clone)]
pub enum NamespaceNode {
    /// package 分段 -> 子节点 (按键排序)
    Interior(BTreeMap<String, NodeId>),
    /// 类
    Leaf(SourceRecord),
}

/// 命名空间树 - package 路径逐段嵌套, 类为叶子
///
/// 后写覆盖时旧节点只是脱离树, 仍留在 arena 中 (总量不超过输入规模)
#[derive(Debug, Clone)]
pub struct NamespaceTree {
    nodes: Vec<NamespaceNode>,
}

impl NamespaceTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![NamespaceNode::Interior(BTreeMap::new())],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &NamespaceNode {
        &self.nodes[id.0]
    }

    /// 子节点, 叶子返回 None
    pub fn children(&self, id: NodeId) -> Option<&BTreeMap<String, NodeId>> {
        match self.node(id) {
            NamespaceNode::Interior(children) => Some(children),
            NamespaceNode::Leaf(_) => None,
        }
    }

    /// 按点分路径查找节点
    pub fn lookup(&self, path: &str) -> Option<NodeId> {
        path.split('.').try_fold(self.root(), |id, segment| {
            self.children(id)?.get(segment).copied()
        })
    }

    /// 插入一条记录
    ///
    /// 同键冲突时后写覆盖 (同包同名类, 或类名与子包同名)
    pub fn insert(&mut self, record: SourceRecord) {
        let mut current = self.root();

        for segment in record.segments() {
            current = self.interior_child(current, segment, &record.package);
        }

        let key = record.class_name.clone();
        let leaf = self.alloc(NamespaceNode::Leaf(record));
        let previous = self.children_mut(current).insert(key.clone(), leaf);
        if let Some(previous) = previous {
            tracing::warn!(
                "{} replaced existing {} under the same key",
                key,
                self.describe(previous)
            );
        }
    }

    /// 节点总数 (不含被覆盖后脱离的节点)
    pub fn len(&self) -> usize {
        self.count_from(self.root())
    }

    pub fn is_empty(&self) -> bool {
        self.children(self.root()).map_or(true, BTreeMap::is_empty)
    }

    /// 所有叶子记录, 按路径顺序
    pub fn leaves(&self) -> Vec<&SourceRecord> {
        let mut result = Vec::new();
        self.collect_leaves(self.root(), &mut result);
        result
    }

    fn interior_child(&mut self, parent: NodeId, segment: &str, package: &str) -> NodeId {
        let existing = self.children(parent).and_then(|c| c.get(segment).copied());
        if let Some(existing) = existing {
            if matches!(self.nodes[existing.0], NamespaceNode::Interior(_)) {
                return existing;
            }
            tracing::warn!("package segment {} of {} replaced a class leaf", segment, package);
        }

        let child = self.alloc(NamespaceNode::Interior(BTreeMap::new()));
        self.children_mut(parent).insert(segment.to_string(), child);
        child
    }

    fn children_mut(&mut self, id: NodeId) -> &mut BTreeMap<String, NodeId> {
        match &mut self.nodes[id.0] {
            NamespaceNode::Interior(children) => children,
            // 只有 interior_child 返回的节点会被下钻
            NamespaceNode::Leaf(_) => unreachable!("leaf node has no children"),
        }
    }

    fn alloc(&mut self, node: NamespaceNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn describe(&self, id: NodeId) -> String {
        match self.node(id) {
            NamespaceNode::Interior(_) => "package".to_string(),
            NamespaceNode::Leaf(record) => format!("class {}", record.qualified_name()),
        }
    }

    fn count_from(&self, id: NodeId) -> usize {
        match self.node(id) {
            NamespaceNode::Interior(children) => {
                1 + children.values().map(|&c| self.count_from(c)).sum::<usize>()
            }
            NamespaceNode::Leaf(_) => 1,
        }
    }

    fn collect_leaves<'a>(&'a self, id: NodeId, result: &mut Vec<&'a SourceRecord>) {
        match self.node(id) {
            NamespaceNode::Interior(children) => {
                for &child in children.values() {
                    self.collect_leaves(child, result);
                }
            }
            NamespaceNode::Leaf(record) => result.push(record),
        }
    }
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::new()
    }
}

/// 构建命名空间树
pub fn build_tree<I>(records: I) -> NamespaceTree
where
    I: IntoIterator<Item = SourceRecord>,
{
    records.into_iter().fold(NamespaceTree::new(), |mut tree, record| {
        tree.insert(record);
        tree
    })
}
