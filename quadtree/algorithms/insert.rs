use crate::quadtree::error::QuadtreeError;
use crate::quadtree::node::Node;
use crate::quadtree::quadtree::Quadtree;
use crate::quadtree::record::Record;
use tracing::{debug, warn};

/// 插入操作相关算法
impl Quadtree {
    /// 插入新的数据记录
    ///
    /// 坐标必须落在 `[0, width) × [0, height)` 内，否则返回 `OutOfBounds`。
    /// 同一坐标最多容纳 `bucket_size` 条记录，再插入返回 `CoordinateSaturated`。
    /// 返回错误时树不会被修改
    pub fn insert(&mut self, record: Record) -> Result<(), QuadtreeError> {
        let (x, y) = (record.x(), record.y());
        let bounds = self.bounds();
        let bucket_size = self.bucket_size();

        if !bounds.contains_point(x, y) {
            warn!(record = %record, "rejected insert outside index bounds");
            return Err(QuadtreeError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }

        // 同一坐标的记录永远路由到同一个叶子，无法通过分裂分开
        if self.count_at(x, y) >= bucket_size {
            warn!(record = %record, bucket_size, "rejected insert on saturated coordinate");
            return Err(QuadtreeError::CoordinateSaturated { x, y, bucket_size });
        }

        match self.root_mut() {
            Some(root) => Self::insert_into(root, record),
            None => {
                // 第一条记录直接放入新建的根叶子
                let mut root = Node::new(bucket_size, bounds);
                root.add_record(record);
                *self.root_mut() = Some(Box::new(root));
                debug!(?bounds, "created root leaf");
            }
        }
        Ok(())
    }

    /// 按名称和坐标插入记录
    pub fn insert_point(&mut self, name: impl Into<String>, x: f64, y: f64) -> Result<(), QuadtreeError> {
        self.insert(Record::new(name, x, y))
    }

    /// 自顶向下寻找有空位的叶子
    ///
    /// 经过已满的叶子时先分裂，再沿中线规则进入对应子象限（必要时创建）
    fn insert_into(root: &mut Node, record: Record) {
        let (x, y) = (record.x(), record.y());
        let mut node = root;
        loop {
            if node.is_leaf() && !node.is_full() {
                node.add_record(record);
                return;
            }

            if node.is_leaf() {
                node.split();
            }

            let quadrant = node.quadrant_of(x, y);
            node = match node.child_or_create(quadrant) {
                Some(child) => child,
                None => unreachable!("Full leaf did not become internal after split"),
            };
        }
    }
}
