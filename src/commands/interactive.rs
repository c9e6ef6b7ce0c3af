//! Terminal prompting for the queue action commands

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Prompt for yes/no confirmation on stdin
///
/// # Arguments
/// * `prompt` - The prompt message to display (without [y/N] suffix)
///
/// # Returns
/// * `true` if the user answers 'y' or 'Y'
/// * `false` otherwise, including on end of input
pub fn confirm(prompt: &str) -> Result<bool> {
    confirm_from(prompt, &mut io::stdin().lock())
}

/// Like [`confirm`], reading the answer from `input`
pub fn confirm_from(prompt: &str, input: &mut impl BufRead) -> Result<bool> {
    print!("{}? [y/N] ", prompt);
    io::stdout().flush()?;

    read_answer(input)
}

/// Whether stdin is attached to a terminal
pub fn is_stdin_tty() -> bool {
    atty::is(atty::Stream::Stdin)
}

fn read_answer(input: &mut impl BufRead) -> Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(line.trim().eq_ignore_ascii_case("y"))
}
