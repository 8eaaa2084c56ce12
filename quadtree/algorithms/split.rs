use crate::quadtree::node::{Children, Node, NodeKind};
use crate::quadtree::record::Record;
use tracing::trace;

/// 节点分裂与合并算法
impl Node {
    /// 将叶子节点转换为内部节点
    ///
    /// 子象限按需创建：只为桶中记录实际落入的象限建立子节点，
    /// 记录按中线规则移动到对应子节点后清空当前桶。
    /// 对内部节点或空叶子调用没有效果
    pub fn split(&mut self) {
        let bucket = match &mut self.kind {
            NodeKind::Leaf { bucket } if !bucket.is_empty() => std::mem::take(bucket),
            _ => return,
        };

        let mut children: Children = Default::default();
        for record in bucket {
            let quadrant = self.quadrant_of(record.x(), record.y());
            children[quadrant.index()]
                .get_or_insert_with(|| Box::new(self.new_child(quadrant)))
                .add_record(record);
        }

        trace!(
            bounds = ?self.bounds,
            children = children.iter().flatten().count(),
            "split leaf"
        );
        self.kind = NodeKind::Internal { children };
    }

    /// 尝试把内部节点合并回叶子
    ///
    /// 当所有子树的记录总数不超过桶容量时，按 (0,0), (0,1), (1,0), (1,1)
    /// 的顺序把全部记录收回当前节点的桶，并丢弃所有子节点。
    /// 返回是否发生了合并
    pub fn consolidate(&mut self) -> bool {
        let bucket_size = self.bucket_size();
        let children = match &mut self.kind {
            NodeKind::Internal { children } => children,
            NodeKind::Leaf { .. } => return false,
        };

        let mut total = 0;
        for child in children.iter().flatten() {
            total += child.count_up_to(bucket_size - total);
            if total > bucket_size {
                return false;
            }
        }

        let mut bucket = Vec::with_capacity(total);
        for child in children.iter_mut().flatten() {
            child.drain_into(&mut bucket);
        }

        trace!(bounds = ?self.bounds, records = bucket.len(), "consolidated children");
        self.kind = NodeKind::Leaf { bucket };
        true
    }

    /// 统计子树记录数，超过 `limit` 后提前返回（返回值最多为 `limit + 1`）
    fn count_up_to(&self, limit: usize) -> usize {
        match &self.kind {
            NodeKind::Leaf { bucket } => bucket.len().min(limit + 1),
            NodeKind::Internal { children } => {
                let mut count = 0;
                for child in children.iter().flatten() {
                    count += child.count_up_to(limit - count);
                    if count > limit {
                        break;
                    }
                }
                count
            }
        }
    }

    /// 按遍历顺序把子树中所有记录移出到 `out`
    fn drain_into(&mut self, out: &mut Vec<Record>) {
        match &mut self.kind {
            NodeKind::Leaf { bucket } => out.append(bucket),
            NodeKind::Internal { children } => {
                for child in children.iter_mut().flatten() {
                    child.drain_into(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::quadtree::node::Node;
    use crate::quadtree::record::Record;
    use crate::quadtree::rectangle::{Quadrant, Rectangle};

    fn full_leaf() -> Node {
        let mut node = Node::new(3, Rectangle::new(0.0, 0.0, 1000.0, 1000.0));
        node.add_record(Record::new("A", 69.0, 420.0));
        node.add_record(Record::new("B", 333.0, 69.0));
        node.add_record(Record::new("C", 900.0, 900.0));
        node
    }

    #[test]
    fn test_split_creates_children_on_demand() {
        let mut node = full_leaf();
        node.split();

        assert!(!node.is_leaf());
        assert!(node.is_empty());
        // A 和 B 都在左上象限，C 在右下象限
        let upper_left = node.child(Quadrant::new(0, 0)).expect("upper left child");
        assert_eq!(upper_left.bucket().len(), 2);
        assert_eq!(upper_left.bounds, Rectangle::new(0.0, 0.0, 500.0, 500.0));
        assert!(node.child(Quadrant::new(0, 1)).is_none());
        assert!(node.child(Quadrant::new(1, 0)).is_none());
        assert_eq!(node.child(Quadrant::new(1, 1)).unwrap().bucket()[0].name(), "C");
    }

    #[test]
    fn test_split_empty_leaf_is_noop() {
        let mut node = Node::new(2, Rectangle::new(0.0, 0.0, 10.0, 10.0));
        node.split();
        assert!(node.is_leaf());
    }

    #[test]
    fn test_consolidate_within_capacity() {
        let mut node = full_leaf();
        node.split();
        let c = node.child_mut(Quadrant::new(1, 1)).unwrap();
        assert!(c.remove_record(&Record::new("C", 900.0, 900.0)));

        assert!(node.consolidate());
        assert!(node.is_leaf());
        let names: Vec<&str> = node.bucket().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_consolidate_uses_traversal_order() {
        let mut node = Node::new(4, Rectangle::new(0.0, 0.0, 100.0, 100.0));
        node.add_record(Record::new("lower-right", 75.0, 75.0));
        node.add_record(Record::new("upper-right", 75.0, 25.0));
        node.add_record(Record::new("lower-left", 25.0, 75.0));
        node.add_record(Record::new("upper-left", 25.0, 25.0));
        node.split();

        assert!(node.consolidate());
        let names: Vec<&str> = node.bucket().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["upper-left", "upper-right", "lower-left", "lower-right"]);
    }

    #[test]
    fn test_consolidate_over_capacity_keeps_children() {
        let mut node = full_leaf();
        node.split();
        node.child_mut(Quadrant::new(1, 1))
            .unwrap()
            .add_record(Record::new("D", 800.0, 800.0));

        assert!(!node.consolidate());
        assert!(!node.is_leaf());
        assert_eq!(node.record_count(), 4);
    }

    #[test]
    fn test_consolidate_leaf_is_noop() {
        let mut node = full_leaf();
        assert!(!node.consolidate());
        assert_eq!(node.bucket().len(), 3);
    }
}
