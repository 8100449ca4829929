use cdmcore::decode::DecodeOutcome;
use cdmcore::model::ConjunctionRecord;
use cdmcore::query::format_provider_timestamp;
use std::io::{self, Write};

const RULE: &str = "-------------------------";

pub fn render_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Querying SpaceTrack active for Conjunction Alerts...")
}

pub fn render_console<W: Write>(out: &mut W, outcome: &DecodeOutcome) -> io::Result<()> {
    writeln!(out, "Found {} Records", outcome.received)?;
    writeln!(out, "{}", RULE)?;
    for record in &outcome.records {
        render_record(out, record)?;
    }
    if !outcome.rejected.is_empty() {
        writeln!(out)?;
        writeln!(out, "Rejected {} Records", outcome.rejected.len())?;
        for rejection in &outcome.rejected {
            writeln!(out, "   {}", rejection)?;
        }
    }
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Printed {} Records", outcome.records.len())
}

fn render_record<W: Write>(out: &mut W, record: &ConjunctionRecord) -> io::Result<()> {
    let probability = record
        .probability_of_collision()
        .map(|pc| pc.to_string())
        .unwrap_or_default();
    writeln!(out)?;
    writeln!(
        out,
        "CDM_ID {} PC {} TCA {} EMERGENCY_REPORTABLE {}",
        record.cdm_id(),
        probability,
        format_provider_timestamp(record.time_of_closest_approach()),
        if record.emergency_reportable() { "Y" } else { "N" }
    )?;
    writeln!(
        out,
        "   SAT_1_NAME {} ({}) SAT_2_NAME {} ({})",
        record.primary().object_name(),
        record.primary().object_type(),
        record.secondary().object_name(),
        record.secondary().object_type()
    )
}
