//! Line-oriented input helpers for the command loop.
//!
//! # Invariants
//! - EOF is reported as `Ok(None)` so callers can cancel cleanly instead of
//!   spinning on a closed stdin.

use std::io::{self, BufRead, Write};

/// Reads one line, trimmed. `None` means the input stream is exhausted.
pub fn read_trimmed<In: BufRead>(input: &mut In) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Writes a prompt without a trailing newline and reads the answer.
pub fn prompt_field<In: BufRead, Out: Write>(
    input: &mut In,
    output: &mut Out,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;
    read_trimmed(input)
}

/// Parses operator-typed age input. Range rules live in the core model;
/// this only rejects non-numeric shapes.
pub fn parse_age(raw: &str) -> Result<u32, String> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| format!("age must be a non-negative integer, got `{raw}`"))
}

/// Asks a yes/no question until an understood answer arrives.
/// `None` means the input stream is exhausted.
pub fn confirm<In: BufRead, Out: Write>(
    input: &mut In,
    output: &mut Out,
    prompt: &str,
) -> io::Result<Option<bool>> {
    loop {
        let Some(answer) = prompt_field(input, output, prompt)? else {
            return Ok(None);
        };
        match answer.to_lowercase().as_str() {
            "yes" | "y" => return Ok(Some(true)),
            "no" | "n" => return Ok(Some(false)),
            _ => writeln!(output, "Please answer yes or no.")?,
        }
    }
}
