/// 四叉树错误类型
///
/// 删除和查找未命中不是错误，分别通过 `false` 和 `None` 返回
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuadtreeError {
    #[error("Bucket size must be at least 1, got {0}")]
    InvalidBucketSize(usize),
    #[error("Invalid dimensions {width} x {height}: both must be positive and at most {max}", max = crate::quadtree::Quadtree::MAX_EXTENT)]
    InvalidDimensions { width: f64, height: f64 },
    #[error("Point ({x}, {y}) lies outside [0, {width}) x [0, {height})")]
    OutOfBounds { x: f64, y: f64, width: f64, height: f64 },
    #[error("Point ({x}, {y}) already holds {bucket_size} records and cannot be split further")]
    CoordinateSaturated { x: f64, y: f64, bucket_size: usize },
}
