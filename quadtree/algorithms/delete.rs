use crate::quadtree::node::Node;
use crate::quadtree::quadtree::Quadtree;
use crate::quadtree::record::Record;
use tracing::debug;

/// 四叉树删除算法实现
impl Quadtree {
    /// 删除第一条与 `record` 相等的记录
    ///
    /// 返回是否找到并删除。未找到时树结构不变。
    /// 删除后沿路径向上清理空子节点并尝试合并，
    /// 根节点变空时释放根节点
    pub fn delete(&mut self, record: &Record) -> bool {
        let root = match self.root_mut() {
            Some(root) => root,
            None => return false,
        };

        let removed = Self::delete_from(root, record);
        if removed && root.is_leaf() && root.is_empty() {
            *self.root_mut() = None;
            debug!("removed last record, tree is empty");
        }
        removed
    }

    /// 按名称和坐标删除记录
    pub fn delete_point(&mut self, name: &str, x: f64, y: f64) -> bool {
        self.delete(&Record::new(name, x, y))
    }

    /// 递归删除
    ///
    /// 每一层在子树删除成功后：子节点变成空叶子就从槽位中摘除，
    /// 然后尝试把当前节点合并回叶子
    fn delete_from(node: &mut Node, record: &Record) -> bool {
        if node.is_leaf() {
            return node.remove_record(record);
        }

        let quadrant = node.quadrant_of(record.x(), record.y());
        let child_emptied = match node.child_mut(quadrant) {
            Some(child) => {
                if !Self::delete_from(child, record) {
                    return false;
                }
                child.is_leaf() && child.is_empty()
            }
            None => return false,
        };

        if child_emptied {
            node.set_child(None, quadrant);
        }
        node.consolidate();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadtree::rectangle::Quadrant;

    #[test]
    fn test_delete_from_empty_tree() {
        let mut tree = Quadtree::new(2, 100.0, 100.0);
        assert!(!tree.delete_point("A", 1.0, 1.0));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_delete_from_root_leaf() {
        let mut tree = Quadtree::new(2, 100.0, 100.0);
        tree.insert_point("A", 1.0, 1.0).unwrap();
        tree.insert_point("B", 2.0, 2.0).unwrap();

        assert!(tree.delete_point("A", 1.0, 1.0));
        assert_eq!(tree.len(), 1);
        assert!(tree.delete_point("B", 2.0, 2.0));
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_delete_consolidates_to_single_leaf() {
        let mut tree = Quadtree::new(2, 1000.0, 1000.0);
        tree.insert_point("A", 69.0, 420.0).unwrap();
        tree.insert_point("B", 333.0, 69.0).unwrap();
        tree.insert_point("C", 1.0, 2.0).unwrap();
        assert!(!tree.root().unwrap().is_leaf());
        assert_eq!(tree.search(1.0, 2.0), Some("C"));

        assert!(tree.delete_point("A", 69.0, 420.0));
        let root = tree.root().unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.bucket().len(), 2);
        assert_eq!(tree.depth(), 1);

        assert!(!tree.delete_point("A", 69.0, 420.0));
        assert_eq!(tree.search(1.0, 2.0), Some("C"));
        assert_eq!(tree.search(333.0, 69.0), Some("B"));
    }

    #[test]
    fn test_delete_detaches_empty_child_without_merging() {
        let mut tree = Quadtree::new(2, 100.0, 100.0);
        tree.insert_point("a", 10.0, 10.0).unwrap();
        tree.insert_point("b", 20.0, 20.0).unwrap();
        tree.insert_point("c", 90.0, 90.0).unwrap();
        tree.insert_point("d", 80.0, 10.0).unwrap();
        tree.insert_point("e", 70.0, 20.0).unwrap();

        // 5 条记录，删掉右下象限唯一的一条后仍有 4 条，不能合并
        assert!(tree.delete_point("c", 90.0, 90.0));
        let root = tree.root().unwrap();
        assert!(!root.is_leaf());
        assert!(root.child(Quadrant::new(1, 1)).is_none());
        assert_eq!(tree.len(), 4);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_delete_collapses_several_levels() {
        let mut tree = Quadtree::new(1, 1024.0, 1024.0);
        tree.insert_point("a", 1.0, 1.0).unwrap();
        tree.insert_point("b", 2.0, 2.0).unwrap();
        assert!(tree.depth() > 5);

        assert!(tree.delete_point("b", 2.0, 2.0));
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.search(1.0, 1.0), Some("a"));
    }

    #[test]
    fn test_delete_miss_does_not_change_shape() {
        let mut tree = Quadtree::new(2, 1000.0, 1000.0);
        tree.insert_point("A", 69.0, 420.0).unwrap();
        tree.insert_point("B", 333.0, 69.0).unwrap();
        tree.insert_point("C", 1.0, 2.0).unwrap();
        let before = tree.export_to_json().unwrap();

        assert!(!tree.delete_point("C", 1.0, 3.0));
        assert!(!tree.delete_point("X", 1.0, 2.0));
        assert!(!tree.delete_point("Y", 900.0, 900.0));
        assert_eq!(tree.export_to_json().unwrap(), before);
    }

    #[test]
    fn test_delete_duplicates_independently() {
        let mut tree = Quadtree::new(2, 100.0, 100.0);
        tree.insert_point("A", 5.0, 5.0).unwrap();
        tree.insert_point("B", 5.0, 5.0).unwrap();
        tree.insert_point("C", 60.0, 60.0).unwrap();

        assert!(tree.delete_point("A", 5.0, 5.0));
        assert_eq!(tree.search(5.0, 5.0), Some("B"));
        assert!(tree.delete_point("B", 5.0, 5.0));
        assert_eq!(tree.search(5.0, 5.0), None);
        assert_eq!(tree.len(), 1);
    }
}
