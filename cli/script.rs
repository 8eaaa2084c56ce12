use std::io::{BufRead, Write};

use tracing::debug;

use crate::cli::formatter::OutputFormatter;
use crate::quadtree::{Quadtree, Record};
use crate::Result;

/// 命令执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ok,
    Bool(bool),
    Name(Option<String>),
    Integer(usize),
    Text(String),
    Error(String),
}

/// 脚本中的单条命令
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Insert(Record),
    Delete(Record),
    Search { x: f64, y: f64 },
    Len,
    Depth,
    Dump,
    Json,
    Check,
    Clear,
    Help,
}

impl ScriptCommand {
    /// 解析一行命令，命令名大小写不敏感
    ///
    /// 空行和 `#` 开头的注释返回 `Ok(None)`
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let name = tokens[0].to_uppercase();
        let args = &tokens[1..];

        let command = match name.as_str() {
            "INSERT" => {
                check_arg_count(&name, args, 3)?;
                ScriptCommand::Insert(parse_record(args)?)
            }
            "DELETE" => {
                check_arg_count(&name, args, 3)?;
                ScriptCommand::Delete(parse_record(args)?)
            }
            "SEARCH" => {
                check_arg_count(&name, args, 2)?;
                ScriptCommand::Search {
                    x: parse_coordinate(args[0], "x")?,
                    y: parse_coordinate(args[1], "y")?,
                }
            }
            "LEN" => simple(&name, args, ScriptCommand::Len)?,
            "DEPTH" => simple(&name, args, ScriptCommand::Depth)?,
            "DUMP" => simple(&name, args, ScriptCommand::Dump)?,
            "JSON" => simple(&name, args, ScriptCommand::Json)?,
            "CHECK" => simple(&name, args, ScriptCommand::Check)?,
            "CLEAR" => simple(&name, args, ScriptCommand::Clear)?,
            "HELP" => simple(&name, args, ScriptCommand::Help)?,
            _ => return Err(format!("ERR unknown command '{}'", tokens[0])),
        };
        Ok(Some(command))
    }
}

fn check_arg_count(name: &str, args: &[&str], expected: usize) -> std::result::Result<(), String> {
    if args.len() != expected {
        return Err(format!(
            "ERR wrong number of arguments for '{}' command. Expected {}, got {}",
            name, expected, args.len()
        ));
    }
    Ok(())
}

fn simple(name: &str, args: &[&str], command: ScriptCommand) -> std::result::Result<ScriptCommand, String> {
    check_arg_count(name, args, 0)?;
    Ok(command)
}

fn parse_coordinate(token: &str, param_name: &str) -> std::result::Result<f64, String> {
    token
        .parse::<f64>()
        .map_err(|_| format!("ERR invalid {}: '{}' is not a number", param_name, token))
}

fn parse_record(args: &[&str]) -> std::result::Result<Record, String> {
    let x = parse_coordinate(args[1], "x")?;
    let y = parse_coordinate(args[2], "y")?;
    Ok(Record::new(args[0], x, y))
}

/// 逐行执行命令脚本的执行器，独占一棵四叉树
pub struct ScriptRunner {
    tree: Quadtree,
}

impl ScriptRunner {
    pub fn new(tree: Quadtree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &Quadtree {
        &self.tree
    }

    pub fn into_tree(self) -> Quadtree {
        self.tree
    }

    /// 执行单条命令
    pub fn execute(&mut self, command: ScriptCommand) -> Reply {
        debug!(?command, "executing command");
        match command {
            ScriptCommand::Insert(record) => match self.tree.insert(record) {
                Ok(()) => Reply::Ok,
                Err(e) => Reply::Error(format!("ERR {}", e)),
            },
            ScriptCommand::Delete(record) => Reply::Bool(self.tree.delete(&record)),
            ScriptCommand::Search { x, y } => Reply::Name(self.tree.search(x, y).map(str::to_string)),
            ScriptCommand::Len => Reply::Integer(self.tree.len()),
            ScriptCommand::Depth => Reply::Integer(self.tree.depth()),
            ScriptCommand::Dump => Reply::Text(self.tree.to_debug_string()),
            ScriptCommand::Json => match self.tree.export_to_json() {
                Ok(json) => Reply::Text(json),
                Err(e) => Reply::Error(format!("ERR failed to export JSON: {}", e)),
            },
            ScriptCommand::Check => match self.tree.check_invariants() {
                Ok(()) => Reply::Ok,
                Err(e) => Reply::Error(format!("ERR invariant violated: {}", e)),
            },
            ScriptCommand::Clear => {
                self.tree.clear();
                Reply::Ok
            }
            ScriptCommand::Help => Reply::Text(OutputFormatter::format_help_message()),
        }
    }

    /// 解析并执行一行，空行和注释返回 None
    pub fn run_line(&mut self, line: &str) -> Option<Reply> {
        match ScriptCommand::parse(line) {
            Ok(Some(command)) => Some(self.execute(command)),
            Ok(None) => None,
            Err(e) => Some(Reply::Error(e)),
        }
    }

    /// 执行整个脚本，把每条结果格式化后写入 `writer`
    ///
    /// 出错的行只输出错误信息，不会中断脚本。返回执行的命令数
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, writer: &mut W) -> Result<usize> {
        let mut executed = 0;
        for line in reader.lines() {
            let line = line?;
            if let Some(reply) = self.run_line(&line) {
                writeln!(writer, "{}", OutputFormatter::format_reply(&reply))?;
                executed += 1;
            }
        }
        Ok(executed)
    }
}
