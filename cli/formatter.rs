use colored::*;
use crate::cli::script::Reply;

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format_reply(reply: &Reply) -> String {
        match reply {
            Reply::Ok => "OK".green().to_string(),
            Reply::Bool(b) => Self::format_bool(*b),
            Reply::Name(name) => Self::format_name(name.as_deref()),
            Reply::Integer(i) => format!("(integer) {}", i.to_string().cyan()),
            Reply::Text(text) => Self::format_text(text),
            Reply::Error(err) => format!("(error) {}", err.red()),
        }
    }

    fn format_bool(b: bool) -> String {
        if b {
            "(true)".green().to_string()
        } else {
            "(false)".yellow().to_string()
        }
    }

    fn format_name(name: Option<&str>) -> String {
        match name {
            Some(name) => format!("\"{}\"", name).green().to_string(),
            None => "(nil)".red().to_string(),
        }
    }

    fn format_text(text: &str) -> String {
        if text.is_empty() {
            "(empty)".yellow().to_string()
        } else {
            text.trim_end().to_string()
        }
    }

    pub fn format_prompt(bucket_size: usize) -> String {
        format!("{}[{}]> ", "quadtree".blue(), bucket_size.to_string().blue())
    }

    pub fn format_help_message() -> String {
        let help = r#"
Available commands:
  INSERT name x y    - Insert a record
  DELETE name x y    - Delete a record, prints whether it was found
  SEARCH x y         - Find the name of a record at (x, y)
  LEN                - Number of stored records
  DEPTH              - Height of the tree
  DUMP               - Print every leaf
  JSON               - Print the tree as JSON
  CHECK              - Verify structural invariants
  CLEAR              - Remove all records
  HELP               - Show this help message

Lines starting with '#' are ignored. Use Ctrl+D to exit interactive mode.
"#;
        help.trim().to_string()
    }
}
