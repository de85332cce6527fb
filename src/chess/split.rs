use std::io::{self, Read};

/// Two blank lines between games.
pub const RECORD_DELIMITER: &[u8] = b"\n\n\n";

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Streaming splitter over concatenated PGN records.
///
/// Pulls bytes from `input` into a growable window and yields the text before
/// each `"\n\n\n"` delimiter. The window only ever holds the record being
/// assembled plus one read chunk, so arbitrarily long streams are fine.
///
/// A read error ends the iteration; it is kept and handed out by
/// [`RecordSplitter::take_error`] once the caller has stopped iterating.
pub struct RecordSplitter<R> {
    input: R,
    buffer: Vec<u8>,
    // Start of the record being assembled. Bytes before it are handed out
    // already and get compacted away on the next refill.
    start: usize,
    // Offset into `buffer` up to which no delimiter was found.
    scanned: usize,
    eof: bool,
    finished: bool,
    max_record_len: Option<usize>,
    error: Option<io::Error>,
}

impl<R: Read> RecordSplitter<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            buffer: Vec::new(),
            start: 0,
            scanned: 0,
            eof: false,
            finished: false,
            max_record_len: None,
            error: None,
        }
    }

    /// Fail with `InvalidData` instead of buffering a record longer than `max`
    /// bytes. `None` (the default) leaves the window unbounded.
    pub fn with_max_record_len(mut self, max: Option<usize>) -> Self {
        self.max_record_len = max;
        self
    }

    /// The read error that terminated the sequence, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn find_delimiter(&self) -> Option<usize> {
        self.buffer[self.scanned..]
            .windows(RECORD_DELIMITER.len())
            .position(|window| window == RECORD_DELIMITER)
            .map(|pos| pos + self.scanned)
    }

    fn compact(&mut self) {
        if self.start > 0 {
            self.buffer.drain(..self.start);
            self.scanned -= self.start;
            self.start = 0;
        }
    }

    fn fill_buffer(&mut self) -> io::Result<usize> {
        self.compact();
        let start = self.buffer.len();
        self.buffer.resize(start + READ_CHUNK_SIZE, 0);

        loop {
            match self.input.read(&mut self.buffer[start..]) {
                Ok(n) => {
                    self.buffer.truncate(start + n);
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buffer.truncate(start);
                    return Err(e);
                }
            }
        }
    }

    fn exceeds_limit(&self, len: usize) -> bool {
        self.max_record_len.is_some_and(|max| len > max)
    }

    fn fail(&mut self, error: io::Error) -> Option<String> {
        self.finished = true;
        self.buffer = Vec::new();
        self.start = 0;
        self.scanned = 0;
        self.error = Some(error);
        None
    }

    fn record_too_long(&mut self) -> Option<String> {
        let max = self.max_record_len.unwrap_or_default();
        self.fail(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("PGN record exceeds maximum length of {max} bytes"),
        ))
    }
}

impl<R: Read> Iterator for RecordSplitter<R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(pos) = self.find_delimiter() {
                if self.exceeds_limit(pos - self.start) {
                    return self.record_too_long();
                }

                let record = String::from_utf8_lossy(&self.buffer[self.start..pos]).into_owned();
                self.start = pos + RECORD_DELIMITER.len();
                self.scanned = self.start;
                return Some(record);
            }

            // A delimiter may straddle the next refill.
            self.scanned = self
                .buffer
                .len()
                .saturating_sub(RECORD_DELIMITER.len() - 1)
                .max(self.start);

            if self.eof {
                self.finished = true;
                let remainder = std::mem::take(&mut self.buffer);
                let remainder = &remainder[self.start..];
                if remainder.is_empty() {
                    return None;
                }
                if self.exceeds_limit(remainder.len()) {
                    return self.record_too_long();
                }
                return Some(String::from_utf8_lossy(remainder).into_owned());
            }

            if self.exceeds_limit(self.scanned - self.start) {
                return self.record_too_long();
            }

            match self.fill_buffer() {
                Ok(0) => self.eof = true,
                Ok(_) => {}
                Err(e) => return self.fail(e),
            }
        }
    }
}
