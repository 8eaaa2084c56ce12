use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::QuadtreeConfig;

#[derive(Parser, Debug)]
#[command(
    name = "quadtree-cli",
    version,
    about = "A command line interface for the point quadtree index",
    long_about = "quadtree-cli builds a point quadtree in memory and lets you insert, delete and search records.\nCommands can be read from a script file or typed interactively."
)]
pub struct CliArgs {
    /// 配置文件路径
    #[arg(short, long, default_value = "quadtree.toml")]
    pub config: String,

    /// 生成默认配置文件并退出
    #[arg(long)]
    pub generate_config: bool,

    /// Leaf bucket size (overrides config file)
    #[arg(short, long)]
    pub bucket_size: Option<usize>,

    /// Index width (overrides config file)
    #[arg(long)]
    pub width: Option<f64>,

    /// Index height (overrides config file)
    #[arg(long)]
    pub height: Option<f64>,

    /// Log level (overrides config file)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Fill the tree with sample records and print every leaf
    Demo {
        /// Number of records to insert
        #[arg(short = 'n', long, default_value_t = 26)]
        count: usize,

        /// Random seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the tree as JSON instead of the leaf dump
        #[arg(long)]
        json: bool,
    },
    /// Execute commands from a script file, or from stdin when no file is given
    Run {
        script: Option<PathBuf>,
    },
}

impl CliArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// 命令行参数覆盖配置文件
    pub fn apply_overrides(&self, config: &mut QuadtreeConfig) {
        if let Some(bucket_size) = self.bucket_size {
            config.tree.bucket_size = bucket_size;
        }
        if let Some(width) = self.width {
            config.tree.width = width;
        }
        if let Some(height) = self.height {
            config.tree.height = height;
        }
        if let Some(ref log_level) = self.log_level {
            config.logging.level = log_level.clone();
        }
    }

    /// 未指定子命令时从标准输入读取命令
    pub fn command(&self) -> CliCommand {
        self.command.clone().unwrap_or(CliCommand::Run { script: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_demo() {
        let args = CliArgs::parse_from(["quadtree-cli", "-b", "4", "demo", "-n", "10", "--seed", "3"]);
        assert_eq!(args.bucket_size, Some(4));
        assert_eq!(
            args.command(),
            CliCommand::Demo { count: 10, seed: Some(3), json: false }
        );
    }

    #[test]
    fn test_default_command_reads_stdin() {
        let args = CliArgs::parse_from(["quadtree-cli"]);
        assert_eq!(args.config, "quadtree.toml");
        assert_eq!(args.command(), CliCommand::Run { script: None });
    }

    #[test]
    fn test_apply_overrides() {
        let args = CliArgs::parse_from([
            "quadtree-cli", "--width", "64", "--height", "32", "--log-level", "debug", "run", "ops.txt",
        ]);
        let mut config = QuadtreeConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.tree.width, 64.0);
        assert_eq!(config.tree.height, 32.0);
        assert_eq!(config.tree.bucket_size, 2);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(args.command(), CliCommand::Run { script: Some(PathBuf::from("ops.txt")) });
    }
}
