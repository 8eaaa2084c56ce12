use serde::{Deserialize, Serialize};

/// 象限编号
///
/// - vertical: 0 表示上半部分（y 较小），1 表示下半部分
/// - horizontal: 0 表示左半部分（x 较小），1 表示右半部分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quadrant {
    pub vertical: usize,
    pub horizontal: usize,
}

impl Quadrant {
    /// 固定的遍历顺序：(0,0), (0,1), (1,0), (1,1)
    pub const ALL: [Quadrant; 4] = [
        Quadrant { vertical: 0, horizontal: 0 },
        Quadrant { vertical: 0, horizontal: 1 },
        Quadrant { vertical: 1, horizontal: 0 },
        Quadrant { vertical: 1, horizontal: 1 },
    ];

    pub fn new(vertical: usize, horizontal: usize) -> Self {
        assert!(vertical <= 1 && horizontal <= 1, "Invalid quadrant ({}, {})", vertical, horizontal);
        Quadrant { vertical, horizontal }
    }

    /// 在四个子节点槽位中的下标
    pub fn index(&self) -> usize {
        self.vertical * 2 + self.horizontal
    }
}

/// 矩形区域 - 表示四叉树节点覆盖的象限
///
/// 区间为左闭右开：`[min_x, max_x) × [min_y, max_y)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub min: [f64; 2],  // [x_min, y_min]
    pub max: [f64; 2],  // [x_max, y_max]
}

impl Rectangle {
    /// 创建新的矩形
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        assert!(x_min <= x_max && y_min <= y_max, "Invalid rectangle bounds");
        Rectangle {
            min: [x_min, y_min],
            max: [x_max, y_max],
        }
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// 计算矩形中心点，即分裂时使用的中线
    pub fn center(&self) -> [f64; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }

    /// 判断点是否落在矩形内（左闭右开）
    ///
    /// NaN 坐标永远不在任何矩形内
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min[0] <= x && x < self.max[0] &&
        self.min[1] <= y && y < self.max[1]
    }

    /// 中线路由规则：坐标大于等于中线时进入"高"的一侧
    ///
    /// 插入、删除、查找和分裂都必须使用这一个函数选择象限
    pub fn quadrant_of(&self, x: f64, y: f64) -> Quadrant {
        let [center_x, center_y] = self.center();
        Quadrant {
            vertical: usize::from(y >= center_y),
            horizontal: usize::from(x >= center_x),
        }
    }

    /// 计算指定象限的子矩形
    pub fn quadrant(&self, quadrant: Quadrant) -> Rectangle {
        let [center_x, center_y] = self.center();
        let (x_min, x_max) = if quadrant.horizontal == 0 {
            (self.min[0], center_x)
        } else {
            (center_x, self.max[0])
        };
        let (y_min, y_max) = if quadrant.vertical == 0 {
            (self.min[1], center_y)
        } else {
            (center_y, self.max[1])
        };
        Rectangle {
            min: [x_min, y_min],
            max: [x_max, y_max],
        }
    }
}
