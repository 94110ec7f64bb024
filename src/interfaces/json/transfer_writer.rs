use crate::domain::transfer::Transfer;
use crate::error::{Error, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TransferRow<'a> {
    external_id: &'a str,
    status: crate::domain::status::TransferStatus,
}

/// Writes final transfer states as JSON lines, ordered by external id so
/// output is deterministic.
pub struct TransferWriter<W: Write> {
    writer: W,
}

impl<W: Write> TransferWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_transfers(&mut self, mut transfers: Vec<Transfer>) -> Result<()> {
        transfers.sort_by(|a, b| a.external_id.cmp(&b.external_id));
        for transfer in &transfers {
            let row = TransferRow {
                external_id: &transfer.external_id,
                status: transfer.status,
            };
            let line = serde_json::to_string(&row)
                .map_err(|err| Error::Internal(err.to_string()))?;
            writeln!(self.writer, "{line}").map_err(|err| Error::Storage(err.to_string()))?;
        }
        Ok(())
    }
}
