//! Console output for run progress and the final summary.

use std::io::{self, Write};

use magpie_core::{MatchSource, PlacementOutcome, RunEvent, RunSummary};

/// Print one progress line to stdout.
pub fn print_event(event: &RunEvent) {
    let mut stdout = io::stdout().lock();
    let _ = write_event(&mut stdout, event);
}

pub fn write_event<W: Write>(out: &mut W, event: &RunEvent) -> io::Result<()> {
    match event {
        RunEvent::AlbumsResolved { count } => {
            writeln!(out, "Found {} unique album(s).", count)
        }
        RunEvent::Searching { album, .. } => writeln!(out, "\nSEARCHING: {}", album),
        RunEvent::Found {
            candidate, source, ..
        } => {
            let chosen = match source {
                MatchSource::Automatic => "",
                MatchSource::Operator => " [chosen]",
            };
            writeln!(
                out,
                "FOUND: {} (format: {}, seeds: {}){}",
                candidate.title, candidate.category, candidate.seeds, chosen
            )
        }
        RunEvent::Unmatched { reason, .. } => writeln!(out, "NOT FOUND: {}", reason),
        RunEvent::Placed { outcome, .. } => {
            let label = match outcome {
                PlacementOutcome::Saved { .. } => "SAVED",
                PlacementOutcome::Submitted { .. } => "SUBMITTED",
                PlacementOutcome::Skipped { .. } => "SKIPPED",
                PlacementOutcome::Failed { .. } => "FAILED",
            };
            writeln!(out, "{}: {}", label, outcome)
        }
    }
}

/// Print the grouped summary to stdout.
pub fn print_summary(summary: &RunSummary) {
    let mut stdout = io::stdout().lock();
    let _ = write_summary(&mut stdout, summary);
}

pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    let successes: Vec<_> = summary.successes().collect();
    let failures: Vec<_> = summary.failures().collect();
    let refused: Vec<_> = summary.placement_failures().collect();

    writeln!(out)?;
    writeln!(out, "SUCCESSFUL ({}):", successes.len())?;
    for report in &successes {
        writeln!(out, "  {}", report.result.album)?;
    }

    writeln!(out, "UNSUCCESSFUL ({}):", failures.len() + refused.len())?;
    for report in &failures {
        let reason = report
            .result
            .failure()
            .map(|r| r.message())
            .unwrap_or_default();
        writeln!(out, "  {}: {}", report.result.album, reason)?;
    }
    for report in &refused {
        if let Some(outcome) = &report.placement {
            writeln!(out, "  {}: {}", report.result.album, outcome)?;
        }
    }

    writeln!(
        out,
        "Finished in {}s.",
        summary.duration().num_seconds().max(0)
    )
}
