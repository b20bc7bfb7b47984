//! Result formatting and the dedup decision point
//!
//! Turns the typed results tree into the human-readable message, consulting
//! the delivery ledger as it scans: a record already in the ledger is skipped
//! outright, a new one is rendered and marked delivered on the spot.
//! Formatting IS the dedup decision: the ledger mutates eagerly, before
//! delivery is attempted, which is what gives the system its at-most-once
//! guarantee (a failed delivery is not retried for those records).
//!
//! Sessions are display groups: the first not-yet-delivered record in a
//! session emits the session header (name and issuing institution) before its
//! own detail block; a session with nothing new produces no output at all.

use crate::ledger::{DeliveryLedger, RecordKey};
use crate::model::ResultGroup;
use chrono::Local;
use tracing::debug;

/// Render all new records in the payload, marking them delivered
///
/// Returns the empty string when every record was already delivered; the
/// notifier treats that as "nothing to send".
pub fn format_results(groups: &[ResultGroup], ledger: &mut DeliveryLedger) -> String {
    let mut out = String::new();

    for group in groups {
        for session in &group.sessions {
            let mut header_emitted = false;

            for result in &session.results {
                let key = RecordKey::new(session.id, result.id);
                if ledger.contains(key) {
                    debug!(
                        session_id = session.id,
                        result_id = result.id,
                        "Skipping already delivered result"
                    );
                    continue;
                }

                if !header_emitted {
                    out.push_str(&format!("# {}\n", session.name));
                    out.push_str(&format!("Placówka: {}\n", session.institution_name));
                    header_emitted = true;
                }

                let exam = &result.exam_in_session.exam;
                out.push_str(&format!(
                    "## Egzamin: {} (poz. {}) ({})\n",
                    exam.name, exam.level.name, exam.mode.name
                ));
                out.push_str(&format!(
                    "Data wydania dokumentu: {}\n",
                    format_epoch(result.issued_at)
                ));
                out.push_str(&format!(
                    "Numer wydanego dokumentu: **{}**\n",
                    result.document_number
                ));
                out.push_str(&format!(
                    "Data egzaminu: {}\n",
                    format_epoch(result.exam_in_session.held_at)
                ));
                out.push_str(&format!("Kod arkusza: {}\n", result.sheet_code));
                out.push_str(&format!("Centyle: {}\n", result.percentile));
                out.push_str(&format!("\n**Procent: {}**\n\n", result.percent));
                out.push_str(&format!(
                    "Punkty: {:.2}/{:.2}\n",
                    result.earned_points, result.max_points
                ));
                out.push('\n');

                ledger.mark_delivered(key);
            }
        }
    }

    out
}

/// Render epoch seconds as a local calendar/time string
fn format_epoch(secs: i64) -> String {
    match chrono::DateTime::from_timestamp(secs, 0) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        // Out-of-range timestamps should never arrive; fall back to the raw
        // number rather than losing the record.
        None => secs.to_string(),
    }
}
