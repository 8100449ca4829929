use cdmcore::decode::DecodeOutcome;
use std::io::{self, Write};

/// Writes the accepted records as a JSON array.
pub fn render_json<W: Write>(out: &mut W, outcome: &DecodeOutcome) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &outcome.records)?;
    writeln!(out)
}
