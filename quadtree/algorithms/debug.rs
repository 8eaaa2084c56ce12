use crate::quadtree::node::Node;
use crate::quadtree::quadtree::Quadtree;
use crate::quadtree::record::Record;
use crate::quadtree::rectangle::Quadrant;

/// 按 (0,0), (0,1), (1,0), (1,1) 顺序深度优先遍历叶子的迭代器
pub struct Leaves<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node.children() {
                None => return Some(node),
                // 逆序压栈，保证先弹出 (0,0)
                Some(children) => self.stack.extend(children.iter().rev().flatten().map(|c| &**c)),
            }
        }
        None
    }
}

/// 四叉树遍历与调试功能实现
impl Quadtree {
    /// 按固定象限顺序遍历所有叶子
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: self.root().into_iter().collect(),
        }
    }

    /// 对每个叶子调用 `f`，顺序同 `leaves()`
    pub fn for_each_leaf<F: FnMut(&Node)>(&self, mut f: F) {
        for leaf in self.leaves() {
            f(leaf);
        }
    }

    /// 按叶子遍历顺序返回所有记录
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.leaves().flat_map(|leaf| leaf.bucket().iter())
    }

    /// 复制出所有记录，顺序同 `iter()`
    pub fn records(&self) -> Vec<Record> {
        self.iter().cloned().collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// 节点总数（叶子和内部节点）
    pub fn node_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            1 + node
                .children()
                .map_or(0, |children| children.iter().flatten().map(|c| count(c)).sum())
        }
        self.root().map_or(0, count)
    }

    /// 每个叶子一行的文本描述
    pub fn to_debug_string(&self) -> String {
        let mut out = String::new();
        self.for_each_leaf(|leaf| {
            let bucket: Vec<String> = leaf.bucket().iter().map(Record::to_string).collect();
            out.push_str(&format!(
                "Node{{bucket=[{}], minX={}, maxX={}, minY={}, maxY={}}}\n",
                bucket.join(", "),
                leaf.bounds.min[0],
                leaf.bounds.max[0],
                leaf.bounds.min[1],
                leaf.bounds.max[1],
            ));
        });
        out
    }

    /// 打印完整的树结构用于调试
    ///
    /// 递归遍历整个树结构，打印每个节点的类型、边界和记录
    pub fn print_tree_structure_debug(&self) {
        fn print_node_recursive(node: &Node, depth: usize, path: String) {
            let indent = "  ".repeat(depth);
            println!("{}Node{} (type={:?}, bounds=[{:.2},{:.2},{:.2},{:.2}], {} records):",
                indent, path, node.node_type(),
                node.bounds.min[0], node.bounds.min[1], node.bounds.max[0], node.bounds.max[1],
                node.bucket().len());

            for (i, record) in node.bucket().iter().enumerate() {
                println!("{}  [{}] {}", indent, i, record);
            }

            for quadrant in Quadrant::ALL {
                if let Some(child) = node.child(quadrant) {
                    let child_path = format!("{}[{},{}]", path, quadrant.vertical, quadrant.horizontal);
                    print_node_recursive(child, depth + 1, child_path);
                }
            }
        }

        println!("=== Quadtree Structure Debug ===");
        match self.root() {
            Some(root) => print_node_recursive(root, 0, String::new()),
            None => println!("Empty tree (no root)"),
        }
        println!("=== End Debug ===");
    }

    /// 检查整棵树的结构不变量
    ///
    /// - 叶子记录数不超过桶容量，且记录都落在叶子边界内
    /// - 内部节点至少有一个子节点，子节点边界等于对应象限
    /// - 内部节点的子树记录数大于桶容量（否则应当已合并）
    /// - 不存在空的子树，根节点存在时不为空
    pub fn check_invariants(&self) -> Result<(), String> {
        let root = match self.root() {
            Some(root) => root,
            None => return Ok(()),
        };
        if root.bounds != self.bounds() {
            return Err(format!("Root bounds {:?} differ from index bounds", root.bounds));
        }
        if root.record_count() == 0 {
            return Err("Root exists but holds no records".to_string());
        }
        self.check_node(root)
    }

    fn check_node(&self, node: &Node) -> Result<(), String> {
        match node.children() {
            None => {
                if node.bucket().len() > self.bucket_size() {
                    return Err(format!(
                        "Leaf {:?} holds {} records, capacity is {}",
                        node.bounds, node.bucket().len(), self.bucket_size()
                    ));
                }
                if let Some(record) = node.bucket().iter().find(|r| !node.bounds.contains_point(r.x(), r.y())) {
                    return Err(format!("Record {} lies outside leaf {:?}", record, node.bounds));
                }
                Ok(())
            }
            Some(children) => {
                if children.iter().all(Option::is_none) {
                    return Err(format!("Internal node {:?} has no children", node.bounds));
                }
                let count = node.record_count();
                if count <= self.bucket_size() {
                    return Err(format!(
                        "Internal node {:?} holds only {} records and should be consolidated",
                        node.bounds, count
                    ));
                }
                for quadrant in Quadrant::ALL {
                    if let Some(child) = node.child(quadrant) {
                        if child.bounds != node.bounds.quadrant(quadrant) {
                            return Err(format!(
                                "Child {:?} does not match quadrant {:?} of {:?}",
                                child.bounds, quadrant, node.bounds
                            ));
                        }
                        if child.record_count() == 0 {
                            return Err(format!("Empty child {:?} was not detached", child.bounds));
                        }
                        self.check_node(child)?;
                    }
                }
                Ok(())
            }
        }
    }
}
