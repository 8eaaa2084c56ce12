use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// 四叉树中存储的数据记录
///
/// 由名称和二维坐标组成，创建后不可修改。
/// 两条字段完全相同的记录无法区分，删除时可以互相替代。
#[derive(Debug, Display, Clone, Serialize, Deserialize)]
#[display(fmt = "{} ({}, {})", name, x, y)]
pub struct Record {
    name: String,
    x: f64,
    y: f64,
}

impl Record {
    /// 创建新的记录
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Record {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// 坐标是否与给定点完全相等（浮点 `==` 比较，无容差）
    pub fn is_at(&self, x: f64, y: f64) -> bool {
        self.x == x && self.y == y
    }
}

/// 按位比较坐标：`NaN` 与自身相等，`0.0` 与 `-0.0` 不等
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.name == other.name
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}
