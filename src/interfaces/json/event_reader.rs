use crate::domain::event::WebhookEvent;
use crate::error::{Error, Result};
use std::io::{BufRead, BufReader, Read};

/// Reads webhook event envelopes from a JSON-lines source.
///
/// Wraps any `Read` (file, stdin, in-memory bytes) and yields one
/// `Result<WebhookEvent>` per non-empty line, so large replay files can be
/// processed in a streaming fashion.
pub struct EventReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    pub fn events(self) -> impl Iterator<Item = Result<WebhookEvent>> {
        self.reader.lines().filter_map(|line| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(
                serde_json::from_str(&line).map_err(|err| Error::Validation(vec![
                    crate::error::FieldError::new("envelope", err.to_string()),
                ])),
            ),
            Err(err) => Some(Err(Error::Storage(err.to_string()))),
        })
    }
}
