//! Input seam for the game engine.
//!
//! The engine reads player input through [`InputSource`] so tests can
//! drive a full game with scripted lines instead of a real terminal.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// A blocking source of input lines.
///
/// One line per call; the returned string carries no trailing newline.
pub trait InputSource {
    /// Reads the next line of input, blocking until one is available.
    fn read_line(&mut self) -> io::Result<String>;
}

/// Reads lines from the process's standard input.
#[derive(Debug, Default)]
pub struct StdinSource;

impl StdinSource {
    /// Creates a stdin-backed input source.
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for StdinSource {
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed",
            ));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

/// Feeds a fixed sequence of lines, for tests.
///
/// Running out of lines is an error rather than a hang, so a test with
/// a short script fails instead of blocking forever.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    /// Creates a scripted source from the given lines.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of unconsumed lines left in the script.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> io::Result<String> {
        self.lines.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted input exhausted")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_yields_lines_in_order() {
        let mut input = ScriptedInput::new(["first", "second"]);
        assert_eq!(input.read_line().unwrap(), "first");
        assert_eq!(input.read_line().unwrap(), "second");
        assert!(input.read_line().is_err());
    }
}
