//! Line-oriented prompts over arbitrary reader/writer pairs.
//!
//! The binaries pass locked stdin/stdout; tests pass byte buffers.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Print `prompt` (no newline) and read one line.
///
/// Returns `None` at end of input. The line terminator is removed; nothing
/// else is touched.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<Option<String>> {
    write!(output, "{prompt}").context("write prompt")?;
    output.flush().context("flush prompt")?;
    read_line(input)
}

/// Read one line without its terminator; `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("read input line")?;
    if n == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Ask a yes/no question; only `y` or `yes` (any case, surrounding spaces ignored) is yes.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<bool> {
    let answer = ask(input, output, question)?.unwrap_or_default();
    let answer = answer.trim().to_ascii_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}

/// Block until the user presses Enter (or input ends).
pub fn pause<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<()> {
    ask(input, output, message)?;
    Ok(())
}
