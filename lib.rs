pub mod cli;
pub mod config;
pub mod quadtree;

use std::error::Error;

// 重新导出主要的公共接口
pub use quadtree::{Node, Quadrant, Quadtree, QuadtreeError, Record, Rectangle};

// 重新导出常用类型，便于二进制文件使用
pub use cli::{CliArgs, OutputFormatter, ScriptRunner};
pub use config::QuadtreeConfig;

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;
