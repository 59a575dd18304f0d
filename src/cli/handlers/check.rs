//! Check command handler.

use anyhow::{Result, bail};
use serde::Serialize;

use crate::cli::CheckArgs;
use crate::cli::output::{OutputFormat, print_json};
use crate::domain::Reference;
use crate::index::ConsistencyReport;
use crate::service::NoteService;
use crate::store::NoteStore;

#[derive(Debug, Serialize)]
struct CheckOutput {
    #[serde(flatten)]
    report: ConsistencyReport,
    dangling: Vec<Reference>,
    fingerprint: String,
}

pub fn handle_check<S: NoteStore>(
    args: &CheckArgs,
    service: &NoteService<S>,
    format: OutputFormat,
) -> Result<()> {
    let report = if args.fix {
        service.repair()?
    } else {
        service.check()?
    };
    let dangling = service.dangling_references();
    let fingerprint = service.fingerprint();

    let unresolved = !report.is_consistent() && !report.repaired;

    match format {
        OutputFormat::Human => {
            for issue in &report.issues {
                println!("error: {}", issue);
            }
            // Dangling references are allowed; they resolve once the target exists.
            for reference in &dangling {
                println!("warning: reference to missing note: {}", reference);
            }

            println!(
                "Checked {} note(s): {} issue(s), {} dangling reference(s)",
                report.notes_scanned,
                report.issues.len(),
                dangling.len()
            );
            if report.repaired {
                println!("Rebuilt tag index and reference graph.");
            }
            println!("Fingerprint: {}", fingerprint.short());
        }
        OutputFormat::Json => print_json(CheckOutput {
            report,
            dangling,
            fingerprint: fingerprint.to_string(),
        })?,
    }

    if unresolved {
        bail!("check failed; run with --fix to rebuild");
    }
    Ok(())
}
