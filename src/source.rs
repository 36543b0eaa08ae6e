//! Where command keys come from.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// A stream of command keys.
#[async_trait]
pub trait CommandSource: Send {
    /// The next key, or `None` once input is exhausted.
    async fn next_key(&mut self) -> Result<Option<char>>;
}

/// Keys from a fixed string, e.g. `--script 034e`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    keys: VecDeque<char>,
}

impl ScriptedSource {
    pub fn new(script: &str) -> Self {
        Self {
            keys: script.chars().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

#[async_trait]
impl CommandSource for ScriptedSource {
    async fn next_key(&mut self) -> Result<Option<char>> {
        Ok(self.keys.pop_front())
    }
}

/// Keys typed on a line-buffered reader, normally the terminal.
///
/// Each line is split into its characters, so typing `01` and Enter runs
/// two commands. The line terminator comes through as whitespace.
pub struct LineSource<R> {
    reader: BufReader<R>,
    pending: VecDeque<char>,
}

impl LineSource<tokio::io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin + Send> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            pending: VecDeque::new(),
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> CommandSource for LineSource<R> {
    async fn next_key(&mut self) -> Result<Option<char>> {
        loop {
            if let Some(key) = self.pending.pop_front() {
                return Ok(Some(key));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line).await? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.chars());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn drain<S: CommandSource>(source: &mut S) -> String {
        let mut keys = String::new();
        while let Some(key) = source.next_key().await.unwrap() {
            keys.push(key);
        }
        keys
    }

    #[tokio::test]
    async fn test_scripted_source_yields_in_order() {
        let mut source = ScriptedSource::new("03e");
        assert_eq!(source.remaining(), 3);
        assert_eq!(drain(&mut source).await, "03e");
        assert_eq!(source.next_key().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_line_source_splits_lines_into_keys() {
        let input: &[u8] = b"01\n3\ne";
        let mut source = LineSource::new(input);
        assert_eq!(drain(&mut source).await, "01\n3\ne");
    }

    #[tokio::test]
    async fn test_line_source_empty_input() {
        let input: &[u8] = b"";
        let mut source = LineSource::new(input);
        assert_eq!(source.next_key().await.unwrap(), None);
    }
}
