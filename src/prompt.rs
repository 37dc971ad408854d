//! Interactive startup questions, asked before the terminal switches to raw mode.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

use crate::game::Difficulty;

fn read_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{question}").context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read answer")? == 0 {
        bail!("No answer on standard input");
    }
    Ok(line.trim().to_string())
}

/// "Play with levels? (y/n)"; anything but y/yes means no
pub fn ask_levels<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    let answer = read_answer(input, output, "Play with levels? (y/n): ")?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Asks until a valid difficulty is given
pub fn ask_difficulty<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Difficulty> {
    loop {
        let answer = read_answer(input, output, "Enter difficulty (easy/medium/hard): ")?;
        match answer.parse::<Difficulty>() {
            Ok(difficulty) => return Ok(difficulty),
            Err(err) => {
                log::debug!("{err}");
                writeln!(output, "Invalid difficulty.").context("Failed to write prompt")?;
            }
        }
    }
}
