use crate::error::{DeskError, Result};
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  add PATH...     add CSV files (quote paths containing spaces)
  clear           remove every file
  list            show the files in schedule order
  select N        select file N
  remove          remove the selected file
  up / down       move the selected file
  output NAME     set the output filename
  generate        write the combined schedule
  help            show this text
  quit            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<PathBuf>),
    Clear,
    List,
    /// zero-based position
    Select(usize),
    Remove,
    Up,
    Down,
    Output(String),
    Generate,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line; blank lines give `None`
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = tokenize(line)?.into_iter();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<String> = words.collect();

        let command = match name.to_lowercase().as_str() {
            "add" => {
                if rest.is_empty() {
                    return Err(DeskError::Usage("add PATH..."));
                }
                Command::Add(rest.into_iter().map(PathBuf::from).collect())
            }
            "clear" => Command::Clear,
            "list" | "ls" => Command::List,
            "select" => match rest.as_slice() {
                [n] => match n.parse::<usize>() {
                    Ok(n) if n >= 1 => Command::Select(n - 1),
                    _ => return Err(DeskError::Usage("select N (N starts at 1)")),
                },
                _ => return Err(DeskError::Usage("select N (N starts at 1)")),
            },
            "remove" | "rm" => Command::Remove,
            "up" => Command::Up,
            "down" => Command::Down,
            // an empty name resets to the default
            "output" => Command::Output(rest.join(" ")),
            "generate" | "gen" => Command::Generate,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(DeskError::UnknownCommand(name)),
        };
        Ok(Some(command))
    }
}

/// Splits on whitespace, double quotes group words
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err(DeskError::UnterminatedQuote(line.trim().to_string()));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
