use crate::deps::DependencyMap;
use crate::tree::{NamespaceNode, NamespaceTree, NodeId};
use std::io::{self, Write};

/// PlantUML 图生成器
pub struct PlantUmlGenerator {
    indent: usize,
    title: Option<String>,
}

impl PlantUmlGenerator {
    pub fn new() -> Self {
        Self {
            indent: 2,
            title: None,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// 生成图的主体 (不含 @startuml/@enduml)
    ///
    /// 先输出嵌套的 package/class 块, 传入依赖时再输出 package 间的边
    pub fn render(&self, tree: &NamespaceTree, deps: Option<&DependencyMap>) -> Vec<String> {
        let mut lines = Vec::new();

        self.render_node(tree, tree.root(), "", 0, &mut lines);

        if let Some(deps) = deps {
            for (source, targets) in deps {
                for target in targets {
                    lines.push(format!(
                        "{} --> {}",
                        Self::normalize_id(source, None),
                        Self::normalize_id(target, None)
                    ));
                }
            }
        }

        lines
    }

    fn render_node(&self, tree: &NamespaceTree, id: NodeId, prefix: &str, depth: usize, lines: &mut Vec<String>) {
        let Some(children) = tree.children(id) else {
            return;
        };
        let pad = " ".repeat(self.indent * depth);

        for (key, &child) in children {
            match tree.node(child) {
                NamespaceNode::Leaf(record) => {
                    lines.push(format!(
                        "{}class \"{}\" as {}",
                        pad,
                        record.class_name,
                        Self::normalize_id(prefix, Some(key))
                    ));
                }
                NamespaceNode::Interior(_) => {
                    let path = Self::extend(prefix, key);
                    lines.push(format!(
                        "{}package \"{}\" as {}",
                        pad,
                        key,
                        Self::normalize_id(&path, None)
                    ));
                    lines.push(format!("{}{{", pad));
                    self.render_node(tree, child, &path, depth + 1, lines);
                    lines.push(format!("{}}}", pad));
                }
            }
        }
    }

    /// 输出完整文档
    pub fn write_document<W: Write>(&self, out: &mut W, body: &[String]) -> io::Result<()> {
        writeln!(out, "@startuml")?;
        if let Some(title) = &self.title {
            writeln!(out, "title {}", title)?;
        }
        for line in body {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "@enduml")?;
        Ok(())
    }

    /// 点分路径 (+ 类名) -> 图中标识符
    ///
    /// 类名中的 `.` 同样替换; `a.b` 与 `a_b` 会得到同一个标识符
    pub fn normalize_id(prefix: &str, leaf: Option<&str>) -> String {
        let mut id = prefix.replace('.', "_");
        if let Some(leaf) = leaf {
            id.push('_');
            id.push_str(&leaf.replace('.', "_"));
        }
        if !id.starts_with('_') {
            id.insert(0, '_');
        }
        id
    }

    #[doc(hidden)]
    pub fn extend(prefix: &str, segment: &str) -> String {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{}.{}", prefix, segment)
        }
    }
}

impl Default for PlantUmlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 使用默认设置生成图主体
pub fn render(tree: &NamespaceTree, deps: Option<&DependencyMap>) -> Vec<String> {
    PlantUmlGenerator::new().render(tree, deps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::aggregate_dependencies;
    use crate::tree::build_tree;
    use source::SourceRecord;

    fn record(package: &str, class_name: &str, deps: &[&str]) -> SourceRecord {
        SourceRecord::new(package, class_name, deps.iter().map(|d| d.to_string()).collect())
    }

    #[test]
    fn test_normalize_id_package() {
        assert_eq!(PlantUmlGenerator::normalize_id("com.acme", None), "_com_acme");
        assert_eq!(PlantUmlGenerator::normalize_id("com", None), "_com");
    }

    #[test]
    fn test_normalize_id_with_leaf() {
        assert_eq!(PlantUmlGenerator::normalize_id("com.acme", Some("Foo")), "_com_acme_Foo");
        assert_eq!(PlantUmlGenerator::normalize_id("", Some("Foo")), "_Foo");
    }

    #[test]
    fn test_normalize_id_dotted_class_name() {
        assert_eq!(
            PlantUmlGenerator::normalize_id("com.acme", Some("Foo.test")),
            "_com_acme_Foo_test"
        );
    }

    #[test]
    fn test_render_dotted_class_name_keeps_label() {
        let tree = build_tree(vec![record("com.acme", "Foo.test", &[])]);
        let lines = render(&tree, None);

        assert!(lines.iter().any(|l| l.trim() == "class \"Foo.test\" as _com_acme_Foo_test"));
    }

    #[test]
    fn test_normalize_id_keeps_existing_underscore() {
        assert_eq!(PlantUmlGenerator::normalize_id("_internal.x", None), "_internal_x");
    }

    #[test]
    fn test_normalize_id_known_collision() {
        // 分隔符与下划线不区分
        assert_eq!(
            PlantUmlGenerator::normalize_id("a.b", None),
            PlantUmlGenerator::normalize_id("a_b", None)
        );
    }

    #[test]
    fn test_normalize_id_deterministic() {
        let a = PlantUmlGenerator::normalize_id("org.example.app", Some("Main"));
        let b = PlantUmlGenerator::normalize_id("org.example.app", Some("Main"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_extend_prefix() {
        assert_eq!(PlantUmlGenerator::extend("", "com"), "com");
        assert_eq!(PlantUmlGenerator::extend("com", "acme"), "com.acme");
    }

    #[test]
    fn test_render_nested_blocks() {
        let tree = build_tree(vec![record("com.acme", "Foo", &[])]);
        let lines = render(&tree, None);

        assert_eq!(
            lines,
            vec![
                "package \"com\" as _com",
                "{",
                "  package \"acme\" as _com_acme",
                "  {",
                "    class \"Foo\" as _com_acme_Foo",
                "  }",
                "}",
            ]
        );
    }

    #[test]
    fn test_render_siblings_sorted() {
        let tree = build_tree(vec![
            record("b", "Z", &[]),
            record("a", "Y", &[]),
            record("a", "X", &[]),
        ]);
        let lines = PlantUmlGenerator::new().with_indent(0).render(&tree, None);

        assert_eq!(
            lines,
            vec![
                "package \"a\" as _a",
                "{",
                "class \"X\" as _a_X",
                "class \"Y\" as _a_Y",
                "}",
                "package \"b\" as _b",
                "{",
                "class \"Z\" as _b_Z",
                "}",
            ]
        );
    }

    #[test]
    fn test_render_dependency_edges() {
        let records = vec![
            record("app", "Main", &["lib.core.Api", "lib.util.Strings"]),
            record("app", "Other", &["lib.core.Api"]),
        ];
        let tree = build_tree(records.clone());
        let deps = aggregate_dependencies(&records, &[] as &[&str]);
        let lines = render(&tree, Some(&deps));

        let edges: Vec<_> = lines.iter().filter(|l| l.contains("-->")).collect();
        assert_eq!(edges, vec!["_app --> _lib_core", "_app --> _lib_util"]);
    }

    #[test]
    fn test_render_without_deps_has_no_edges() {
        let records = vec![record("app", "Main", &["lib.core.Api"])];
        let tree = build_tree(records);
        let lines = render(&tree, None);
        assert!(lines.iter().all(|l| !l.contains("-->")));
    }

    #[test]
    fn test_render_empty_tree() {
        let tree = build_tree(Vec::<SourceRecord>::new());
        assert!(render(&tree, None).is_empty());
    }

    #[test]
    fn test_write_document_wraps_body() {
        let body = vec!["class \"Foo\" as _Foo".to_string()];
        let mut out = Vec::new();
        PlantUmlGenerator::new()
            .with_title("demo")
            .write_document(&mut out, &body)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "@startuml\ntitle demo\nclass \"Foo\" as _Foo\n@enduml\n");
    }

    /// 总是失败的输出
    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "destination closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_document_propagates_write_error() {
        let body = vec!["class \"Foo\" as _Foo".to_string()];
        let err = PlantUmlGenerator::new()
            .write_document(&mut BrokenWriter, &body)
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_generator_default() {
        let gen = PlantUmlGenerator::default();
        assert_eq!(gen.indent, 2);
        assert!(gen.title.is_none());
    }
}
