use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::sync::Mutex;

use quadtree::cli::demo::run_demo;
use quadtree::cli::{CliArgs, CliCommand, OutputFormatter, ScriptRunner};
use quadtree::config::LoggingConfig;
use quadtree::{Quadtree, QuadtreeConfig, Result};
use tracing::{info, Level};

fn main() -> Result<()> {
    let args = CliArgs::parse_args();

    // 生成默认配置文件
    if args.generate_config {
        let config = QuadtreeConfig::default();
        config.save_to_file(&args.config)?;
        println!("✅ Generated default configuration: {}", args.config);
        println!("📝 You can edit this file and run the tool again.");
        return Ok(());
    }

    // 加载配置，命令行参数覆盖配置文件
    let mut config = QuadtreeConfig::from_file(&args.config)?;
    args.apply_overrides(&mut config);

    // 验证配置
    config.validate()?;

    // 初始化日志系统
    init_logging(&config.logging)?;

    info!("📦 quadtree-cli version {}", env!("CARGO_PKG_VERSION"));
    let tree = Quadtree::from_config(&config.tree)?;

    match args.command() {
        CliCommand::Demo { count, seed, json } => {
            config.print_summary();
            let seed = seed.unwrap_or_else(rand::random);
            info!(count, seed, "running demo");

            let mut tree = tree;
            let inserted = run_demo(&mut tree, count, seed);
            if json {
                println!("{}", tree.export_to_json()?);
            } else {
                print!("{}", tree.to_debug_string());
            }
            println!();
            println!(
                "Inserted {} records: depth {}, {} leaves, {} nodes",
                inserted,
                tree.depth(),
                tree.leaf_count(),
                tree.node_count()
            );
        }
        CliCommand::Run { script: Some(path) } => {
            info!("📖 Running script {}", path.display());
            let file = File::open(&path)
                .map_err(|e| format!("Failed to open script '{}': {}", path.display(), e))?;
            let mut runner = ScriptRunner::new(tree);
            let executed = runner.run(BufReader::new(file), &mut io::stdout().lock())?;
            info!(executed, records = runner.tree().len(), "script finished");
        }
        CliCommand::Run { script: None } => {
            let runner = ScriptRunner::new(tree);
            if io::stdin().is_terminal() {
                run_interactive_mode(runner)?;
            } else {
                let mut runner = runner;
                runner.run(io::stdin().lock(), &mut io::stdout().lock())?;
            }
        }
    }

    Ok(())
}

fn run_interactive_mode(mut runner: ScriptRunner) -> Result<()> {
    println!("quadtree-cli interactive mode");
    println!("Type 'HELP' for available commands, Ctrl+D to exit.");
    println!();

    // 创建标准输入读取器
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        // 显示提示符
        print!("{}", OutputFormatter::format_prompt(runner.tree().bucket_size()));
        io::stdout().flush()?;

        // 读取用户输入
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            // EOF (Ctrl+D)
            println!();
            break;
        }

        if let Some(reply) = runner.run_line(&input) {
            println!("{}", OutputFormatter::format_reply(&reply));
        }
    }

    Ok(())
}

/// 初始化日志系统
fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    match (config.output.as_str(), &config.log_file) {
        ("file", Some(log_file)) => {
            // 确保日志目录存在
            if let Some(parent) = log_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .map_err(|e| format!("Failed to open log file '{}': {}", log_file.display(), e))?;

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
        _ => {
            // stderr，避免和命令输出混在一起
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(false),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
    }

    Ok(())
}
