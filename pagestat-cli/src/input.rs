//! Interactive line input for the plain-text mode.

use std::io::{self, BufRead, Write};

/// Printed once before the first read.
pub const PROMPT: &str = "Enter ! to exit. Empty input is ignored.";

/// Entering this alone ends the session without counting.
pub const EXIT: &str = "!";

/// Keep asking until a non-empty line arrives.
///
/// Returns `None` when the user enters `!` or the input ends. Only the line
/// terminator is removed, so a line of spaces counts as input.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn read_line<R: BufRead, W: Write>(reader: &mut R, out: &mut W) -> io::Result<Option<String>> {
    writeln!(out, "{PROMPT}")?;
    loop {
        write!(out, "Input: ")?;
        out.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line == EXIT {
            return Ok(None);
        }
        if !line.is_empty() {
            return Ok(Some(line.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(stdin: &str) -> (Option<String>, String) {
        let mut out = Vec::new();
        let line = read_line(&mut stdin.as_bytes(), &mut out).unwrap();
        (line, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_skips_empty_lines() {
        let (line, out) = run("\n\r\nhello world\nignored\n");
        assert_eq!(line.as_deref(), Some("hello world"));
        assert_eq!(out, format!("{PROMPT}\nInput: Input: Input: "));
    }

    #[test]
    fn test_exit() {
        assert_eq!(run("\n!\nhello\n").0, None);
    }

    #[test]
    fn test_end_of_input() {
        assert_eq!(run("\n\n").0, None);
    }

    #[test]
    fn test_whitespace_is_input() {
        assert_eq!(run("  \n").0.as_deref(), Some("  "));
    }

    #[test]
    fn test_exit_must_be_alone() {
        assert_eq!(run("! go\n").0.as_deref(), Some("! go"));
    }
}
