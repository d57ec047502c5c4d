// file: src/utils/prompt.rs
// description: interactive console prompt for the user query

use crate::error::Result;
use std::io::{BufRead, Write};

pub const QUERY_PROMPT: &str = "Enter your query: ";

/// Writes `prompt`, then reads one line with the trailing newline stripped.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn ask_user_query() -> Result<String> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    ask(&mut stdin.lock(), &mut stdout, QUERY_PROMPT)
}
