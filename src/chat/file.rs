use alloc::vec::Vec;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::ChatError;
use crate::options::ChatOptions;

use super::{ChatMessage, ChatRelay};

/// Reads the complete lines of `path` after the first `skip`.
///
/// Returns the new lines and the index of the first one. A trailing line
/// without a newline is still being written and is left for the next read. A
/// missing file reads as empty; a file shorter than `skip` was recreated and
/// is read from the top. Lines are raw bytes, so invalid UTF-8 is left for
/// the parser to reject.
fn read_new_lines(path: &Path, skip: usize) -> io::Result<(Vec<Vec<u8>>, usize)> {
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok((Vec::new(), 0)),
        Err(err) => return Err(err),
    };

    let lines: Vec<&[u8]> = contents
        .iter()
        .rposition(|&byte| byte == b'\n')
        .map_or_else(Vec::new, |end| {
            contents[..end].split(|&byte| byte == b'\n').collect()
        });

    let start = if lines.len() < skip {
        log::info!("{} was truncated, reading from the start", path.display());
        0
    } else {
        skip
    };

    let fresh = lines.into_iter().skip(start).map(<[u8]>::to_vec).collect();
    Ok((fresh, start))
}

/// Parses one chat line. Blank lines and anything that is not a message
/// yield `None`.
fn parse_line(path: &Path, line: &[u8]) -> Option<ChatMessage> {
    if line.trim_ascii().is_empty() {
        return None;
    }
    match serde_json::from_slice(line) {
        Ok(message) => Some(message),
        Err(err) => {
            log::debug!("skipping malformed line in {}: {err}", path.display());
            None
        }
    }
}

/// Appends `message` as one JSON line.
fn append_message(path: &Path, message: &ChatMessage) -> Result<(), ChatError> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

/// A relay backed by two append-only JSON-lines files: an outbox every
/// session writes to and a feed every session polls.
#[derive(Debug, Clone)]
pub struct FileRelay {
    outbox: PathBuf,
    feed: PathBuf,
    read_lines: usize,
}

impl FileRelay {
    /// Creates a relay on the files named in `options`, starting at the top
    /// of the feed.
    #[must_use]
    pub fn new(options: &ChatOptions) -> Self {
        Self {
            outbox: options.outbox_path.clone(),
            feed: options.feed_path.clone(),
            read_lines: 0,
        }
    }

    /// Lines of the feed consumed so far.
    #[must_use]
    pub const fn read_lines(&self) -> usize {
        self.read_lines
    }
}

impl ChatRelay for FileRelay {
    fn send(&mut self, message: &ChatMessage) -> Result<(), ChatError> {
        append_message(&self.outbox, message)
    }

    fn poll(&mut self) -> Result<Vec<ChatMessage>, ChatError> {
        let (lines, start) = read_new_lines(&self.feed, self.read_lines)?;
        self.read_lines = start + lines.len();
        Ok(lines
            .iter()
            .filter_map(|line| parse_line(&self.feed, line))
            .collect())
    }
}

/// Moves messages from the shared outbox onto the broadcast feed.
///
/// This is the relay process: sessions only ever write the outbox and read
/// the feed, so nothing is visible to anyone until a forwarder has copied it.
#[derive(Debug, Clone)]
pub struct Forwarder {
    outbox: PathBuf,
    feed: PathBuf,
    read_lines: usize,
}

impl Forwarder {
    /// Creates a forwarder for the files named in `options`.
    #[must_use]
    pub fn new(options: &ChatOptions) -> Self {
        Self {
            outbox: options.outbox_path.clone(),
            feed: options.feed_path.clone(),
            read_lines: 0,
        }
    }

    /// Deletes both files so a fresh relay starts with an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be removed.
    pub fn clear_files(&mut self) -> Result<(), ChatError> {
        for path in [&self.outbox, &self.feed] {
            match fs::remove_file(path) {
                Ok(()) => log::info!("removed {}", path.display()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        self.read_lines = 0;
        Ok(())
    }

    /// Marks everything already in the outbox as forwarded.
    ///
    /// Returns the number of lines skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the outbox exists but cannot be read.
    pub fn skip_backlog(&mut self) -> Result<usize, ChatError> {
        let (lines, _) = read_new_lines(&self.outbox, 0)?;
        self.read_lines = lines.len();
        Ok(self.read_lines)
    }

    /// Copies outbox lines written since the last pump onto the feed.
    ///
    /// Returns how many messages were forwarded. Malformed lines are skipped.
    /// A line only counts as forwarded once it is on the feed, so after a
    /// failed write the next pump resumes with the line that failed.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be accessed.
    pub fn pump(&mut self) -> Result<usize, ChatError> {
        let (lines, start) = read_new_lines(&self.outbox, self.read_lines)?;
        self.read_lines = start;

        let mut forwarded = 0;
        for line in &lines {
            if let Some(message) = parse_line(&self.outbox, line) {
                append_message(&self.feed, &message)?;
                log::info!("relayed message from {}", message.username);
                forwarded += 1;
            }
            self.read_lines += 1;
        }
        Ok(forwarded)
    }
}
