use crate::quadtree::Quadtree;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 四叉树工具配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuadtreeConfig {
    /// 索引配置
    pub tree: TreeConfig,

    /// 日志配置
    pub logging: LoggingConfig,
}

/// 索引配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// 叶子节点桶容量
    #[serde(default = "default_bucket_size")]
    pub bucket_size: usize,

    /// 索引区域宽度
    #[serde(default = "default_width")]
    pub width: f64,

    /// 索引区域高度
    #[serde(default = "default_height")]
    pub height: f64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别：trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 日志输出：stderr, file
    #[serde(default = "default_log_output")]
    pub output: String,

    /// 日志文件路径（当 output = file 时）
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// 默认值函数
// ============================================================================

fn default_bucket_size() -> usize {
    2
}

fn default_width() -> f64 {
    1000.0
}

fn default_height() -> f64 {
    1000.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_output() -> String {
    "stderr".to_string()
}

// ============================================================================
// 实现
// ============================================================================

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig {
                bucket_size: default_bucket_size(),
                width: default_width(),
                height: default_height(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                output: default_log_output(),
                log_file: None,
            },
        }
    }
}

impl QuadtreeConfig {
    /// 从文件加载配置
    ///
    /// 配置加载顺序（优先级从低到高）：
    /// 1. 默认配置（内嵌的 default.toml）
    /// 2. 用户配置文件（可选）
    /// 3. 环境变量（QUADTREE__ 前缀，使用双下划线分隔嵌套）
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use quadtree::config::QuadtreeConfig;
    ///
    /// // 加载配置（如果文件不存在，使用默认配置）
    /// let config = QuadtreeConfig::from_file("quadtree.toml").unwrap();
    /// ```
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            // 1. 加载默认配置（内嵌）
            .add_source(config::File::from_str(
                include_str!("default.toml"),
                config::FileFormat::Toml,
            ))
            // 2. 加载用户配置（可选，不存在不报错）
            .add_source(config::File::with_name(path).required(false))
            // 3. 加载环境变量（QUADTREE__ 前缀，双下划线分隔嵌套）
            .add_source(config::Environment::with_prefix("QUADTREE").separator("__"))
            .build()
            .map_err(|e| format!("Failed to load config: {}", e))?;

        Ok(settings
            .try_deserialize()
            .map_err(|e| format!("Failed to parse config: {}", e))?)
    }

    /// 保存配置到文件
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use quadtree::config::QuadtreeConfig;
    ///
    /// let config = QuadtreeConfig::default();
    /// config.save_to_file("quadtree.toml").unwrap();
    /// ```
    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, toml_string)
            .map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// 验证配置
    ///
    /// 检查配置的合法性，包括：
    /// - 桶容量
    /// - 索引区域尺寸
    /// - 日志级别和输出方式
    pub fn validate(&self) -> Result<(), String> {
        if self.tree.bucket_size == 0 {
            return Err("Bucket size must be at least 1".to_string());
        }

        for (name, value) in [("width", self.tree.width), ("height", self.tree.height)] {
            if !(value > 0.0 && value <= Quadtree::MAX_EXTENT) {
                return Err(format!(
                    "Invalid {}: {}. Must be positive and at most {}",
                    name,
                    value,
                    Quadtree::MAX_EXTENT
                ));
            }
        }

        // 验证日志级别
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "Invalid log level: '{}'. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ))
            }
        }

        // 验证日志输出
        match self.logging.output.as_str() {
            "stderr" => {}
            "file" if self.logging.log_file.is_none() => {
                return Err("Log output is 'file' but log_file path is not specified".to_string());
            }
            "file" => {}
            _ => {
                return Err(format!(
                    "Invalid log output: '{}'. Must be one of: stderr, file",
                    self.logging.output
                ))
            }
        }

        Ok(())
    }

    /// 打印配置摘要
    pub fn print_summary(&self) {
        println!("📋 Quadtree Configuration:");
        println!("   Bucket Size: {}", self.tree.bucket_size);
        println!("   Bounds:      [0, {}) x [0, {})", self.tree.width, self.tree.height);
        println!();
        println!("   Log Level:   {}", self.logging.level);
        println!("   Log Output:  {}", self.logging.output);
        if let Some(ref log_file) = self.logging.log_file {
            println!("   Log File:    {}", log_file.display());
        }
        println!();
    }
}
