use crate::quadtree::node::Node;
use crate::quadtree::quadtree::Quadtree;
use crate::quadtree::record::Record;

/// 点查找算法
impl Quadtree {
    /// 按坐标查找记录名称
    ///
    /// 同一坐标有多条记录时返回叶子桶中的第一条（插入顺序）。
    /// 未找到时返回 None
    pub fn search(&self, x: f64, y: f64) -> Option<&str> {
        self.get(x, y).map(Record::name)
    }

    /// 按坐标查找第一条匹配的记录
    pub fn get(&self, x: f64, y: f64) -> Option<&Record> {
        self.find_leaf(x, y)?
            .bucket()
            .iter()
            .find(|record| record.is_at(x, y))
    }

    /// 返回坐标上的全部记录，按叶子桶中的顺序
    pub fn get_all(&self, x: f64, y: f64) -> Vec<&Record> {
        self.find_leaf(x, y)
            .map(|leaf| leaf.bucket().iter().filter(|record| record.is_at(x, y)).collect())
            .unwrap_or_default()
    }

    /// 检查树中是否存在与 `record` 完全相同的记录
    pub fn contains(&self, record: &Record) -> bool {
        self.find_leaf(record.x(), record.y())
            .is_some_and(|leaf| leaf.bucket().contains(record))
    }

    /// 统计坐标上的记录数
    pub(crate) fn count_at(&self, x: f64, y: f64) -> usize {
        self.find_leaf(x, y)
            .map_or(0, |leaf| leaf.bucket().iter().filter(|record| record.is_at(x, y)).count())
    }

    /// 沿中线规则下降到坐标所在的叶子
    ///
    /// 路径上遇到空槽位时返回 None
    fn find_leaf(&self, x: f64, y: f64) -> Option<&Node> {
        let mut node = self.root()?;
        while !node.is_leaf() {
            node = node.child(node.quadrant_of(x, y))?;
        }
        Some(node)
    }
}
