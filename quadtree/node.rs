use super::record::Record;
use super::rectangle::{Quadrant, Rectangle};
use serde::{Deserialize, Serialize};

/// 节点类型
///
/// 用于可视化导出，运行时状态由 `NodeKind` 表达
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    /// 叶子节点：直接存储数据记录
    Leaf,
    /// 内部节点：只持有子象限，不存储数据
    Internal,
}

/// 四个子象限槽位，按 `Quadrant::index()` 寻址，每个槽位可以为空
pub type Children = [Option<Box<Node>>; 4];

/// 节点状态
///
/// 叶子和内部节点互斥：内部节点没有数据桶，叶子节点没有子节点
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// 叶子节点，桶内记录数不超过 bucket_size
    Leaf { bucket: Vec<Record> },
    /// 内部节点，至少有一个非空子象限
    Internal { children: Children },
}

/// 四叉树节点
///
/// 覆盖一个左闭右开的矩形象限。子树中的所有记录都落在 `bounds` 内
#[derive(Debug, Clone)]
pub struct Node {
    /// 节点覆盖的象限
    pub bounds: Rectangle,
    /// 叶子节点桶容量
    bucket_size: usize,
    pub(crate) kind: NodeKind,
}

impl Node {
    /// 创建新的空叶子节点
    pub fn new(bucket_size: usize, bounds: Rectangle) -> Self {
        Node {
            bounds,
            bucket_size,
            kind: NodeKind::Leaf { bucket: Vec::new() },
        }
    }

    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Leaf { .. } => NodeType::Leaf,
            NodeKind::Internal { .. } => NodeType::Internal,
        }
    }

    /// 向叶子节点的桶中添加记录
    ///
    /// 桶已满或节点不是叶子时记录被直接丢弃，不报错。
    /// 调用者负责在超出容量前先分裂节点
    pub fn add_record(&mut self, record: Record) {
        if let NodeKind::Leaf { bucket } = &mut self.kind {
            if bucket.len() < self.bucket_size {
                bucket.push(record);
            }
        }
    }

    /// 从叶子节点删除第一条与 `record` 相等的记录
    ///
    /// 返回是否真的删除了记录，内部节点总是返回 false
    pub fn remove_record(&mut self, record: &Record) -> bool {
        match &mut self.kind {
            NodeKind::Leaf { bucket } => match bucket.iter().position(|r| r == record) {
                Some(index) => {
                    bucket.remove(index);
                    true
                }
                None => false,
            },
            NodeKind::Internal { .. } => false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// 桶是否已满
    pub fn is_full(&self) -> bool {
        self.bucket().len() == self.bucket_size
    }

    /// 桶是否为空（内部节点的桶总是空的）
    pub fn is_empty(&self) -> bool {
        self.bucket().is_empty()
    }

    /// 叶子节点的记录，内部节点返回空切片
    pub fn bucket(&self) -> &[Record] {
        match &self.kind {
            NodeKind::Leaf { bucket } => bucket,
            NodeKind::Internal { .. } => &[],
        }
    }

    /// 子节点槽位，叶子节点返回 None
    pub fn children(&self) -> Option<&Children> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { children } => Some(children),
        }
    }

    /// 获取指定象限的子节点
    pub fn child(&self, quadrant: Quadrant) -> Option<&Node> {
        self.children()?[quadrant.index()].as_deref()
    }

    pub fn child_mut(&mut self, quadrant: Quadrant) -> Option<&mut Node> {
        match &mut self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { children } => children[quadrant.index()].as_deref_mut(),
        }
    }

    /// 获取指定象限的子节点，槽位为空时先创建空叶子再返回
    ///
    /// 叶子节点返回 None
    pub(crate) fn child_or_create(&mut self, quadrant: Quadrant) -> Option<&mut Node> {
        let bounds = self.bounds.quadrant(quadrant);
        let bucket_size = self.bucket_size;
        match &mut self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { children } => Some(
                children[quadrant.index()].get_or_insert_with(|| Box::new(Node::new(bucket_size, bounds))),
            ),
        }
    }

    /// 按中线规则计算坐标所属的子象限
    pub fn quadrant_of(&self, x: f64, y: f64) -> Quadrant {
        self.bounds.quadrant_of(x, y)
    }

    /// 创建指定象限的空子节点（不挂到当前节点上）
    pub fn new_child(&self, quadrant: Quadrant) -> Node {
        Node::new(self.bucket_size, self.bounds.quadrant(quadrant))
    }

    /// 替换子象限槽位
    ///
    /// 替换后若四个槽位全部为空，节点退化回空叶子。
    /// 对叶子节点调用没有任何效果
    pub fn set_child(&mut self, child: Option<Node>, quadrant: Quadrant) {
        if let NodeKind::Internal { children } = &mut self.kind {
            children[quadrant.index()] = child.map(Box::new);
            if children.iter().all(Option::is_none) {
                self.kind = NodeKind::Leaf { bucket: Vec::new() };
            }
        }
    }

    /// 子树中的记录总数
    pub fn record_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { bucket } => bucket.len(),
            NodeKind::Internal { children } => children
                .iter()
                .flatten()
                .map(|child| child.record_count())
                .sum(),
        }
    }

    /// 子树高度，叶子为 1
    pub fn height(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Internal { children } => {
                1 + children.iter().flatten().map(|child| child.height()).max().unwrap_or(0)
            }
        }
    }
}
