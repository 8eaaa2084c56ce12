use super::error::QuadtreeError;
use super::node::{Node, NodeType};
use super::record::Record;
use super::rectangle::Rectangle;
use crate::config::TreeConfig;
use serde::{Deserialize, Serialize};

/// 用于JSON序列化的简化树结构
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeVisualization {
    /// 根节点（如果存在）
    pub root: Option<NodeVisualization>,
    /// 树的配置参数
    pub config: TreeSettings,
}

/// 用于JSON序列化的树配置
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeSettings {
    pub bucket_size: usize,
    pub width: f64,
    pub height: f64,
}

/// 用于JSON序列化的节点结构
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeVisualization {
    /// 节点覆盖的象限
    pub bounds: Rectangle,
    /// 节点类型
    pub node_type: NodeType,
    /// 节点深度，根节点为 0
    pub depth: usize,
    /// 数据记录（仅叶子节点）
    pub records: Vec<Record>,
    /// 子节点（仅内部节点，按遍历顺序，空槽位为 null）
    pub children: Vec<Option<NodeVisualization>>,
}

/// 点四叉树主结构
///
/// 独占整棵节点树。根节点在第一次插入时创建，覆盖 `[0, width) × [0, height)`，
/// 最后一条记录被删除后根节点随之释放
#[derive(Debug, Clone)]
pub struct Quadtree {
    /// 根节点
    root: Option<Box<Node>>,
    /// 叶子节点桶容量
    bucket_size: usize,
    /// 索引区域宽度
    width: f64,
    /// 索引区域高度
    height: f64,
}

impl Quadtree {
    /// 宽高上限，保证任意象限的 `min + max` 不会溢出为无穷大
    pub const MAX_EXTENT: f64 = f64::MAX / 2.0;

    /// 创建新的四叉树
    ///
    /// 参数非法时 panic，需要错误返回时使用 `try_new`
    pub fn new(bucket_size: usize, width: f64, height: f64) -> Self {
        assert!(bucket_size >= 1, "Bucket size must be at least 1");
        assert!(
            is_valid_extent(width) && is_valid_extent(height),
            "Width and height must be positive and at most Quadtree::MAX_EXTENT"
        );
        Quadtree {
            root: None,
            bucket_size,
            width,
            height,
        }
    }

    /// 创建新的四叉树，参数非法时返回错误
    pub fn try_new(bucket_size: usize, width: f64, height: f64) -> Result<Self, QuadtreeError> {
        if bucket_size == 0 {
            return Err(QuadtreeError::InvalidBucketSize(bucket_size));
        }
        if !is_valid_extent(width) || !is_valid_extent(height) {
            return Err(QuadtreeError::InvalidDimensions { width, height });
        }
        Ok(Self::new(bucket_size, width, height))
    }

    /// 根据配置创建四叉树
    pub fn from_config(config: &TreeConfig) -> Result<Self, QuadtreeError> {
        Self::try_new(config.bucket_size, config.width, config.height)
    }

    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// 整个索引区域 `[0, width) × [0, height)`
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(0.0, 0.0, self.width, self.height)
    }

    /// 检查四叉树是否为空
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// 记录总数
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.record_count())
    }

    /// 树的高度：空树为 0，只有根叶子时为 1
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.height())
    }

    /// 清空整棵树
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// 内部方法：获取根节点的可变引用
    pub(crate) fn root_mut(&mut self) -> &mut Option<Box<Node>> {
        &mut self.root
    }

    /// 导出树结构为JSON格式
    ///
    /// 返回包含完整树结构的JSON字符串，用于调试和可视化
    pub fn export_to_json(&self) -> Result<String, serde_json::Error> {
        let visualization = self.create_tree_visualization();
        serde_json::to_string_pretty(&visualization)
    }

    /// 创建用于可视化的树结构
    fn create_tree_visualization(&self) -> TreeVisualization {
        TreeVisualization {
            root: self.root.as_ref().map(|node| Self::create_node_visualization(node, 0)),
            config: TreeSettings {
                bucket_size: self.bucket_size,
                width: self.width,
                height: self.height,
            },
        }
    }

    /// 递归创建节点的可视化结构
    fn create_node_visualization(node: &Node, depth: usize) -> NodeVisualization {
        let children = node
            .children()
            .map(|children| {
                children
                    .iter()
                    .map(|child| {
                        child
                            .as_deref()
                            .map(|child| Self::create_node_visualization(child, depth + 1))
                    })
                    .collect()
            })
            .unwrap_or_default();

        NodeVisualization {
            bounds: node.bounds,
            node_type: node.node_type(),
            depth,
            records: node.bucket().to_vec(),
            children,
        }
    }
}

fn is_valid_extent(value: f64) -> bool {
    value > 0.0 && value <= Quadtree::MAX_EXTENT
}
