use serde::Serialize;

use cashflow_domain::{CashflowProjection, OwnerId};
use cashflow_engine::{BookChange, ProjectionReport, RejectReason};

use crate::cli::{context::CliContext, output, registry::CommandResult};

#[derive(Serialize)]
struct ProjectOutput<'a> {
    owner: &'a OwnerId,
    #[serde(flatten)]
    projection: &'a CashflowProjection,
    rejected: Vec<RejectedView>,
}

#[derive(Serialize)]
struct RejectedView {
    name: String,
    reason: String,
}

fn rejected_views(report: &ProjectionReport) -> Vec<RejectedView> {
    report
        .rejected
        .iter()
        .map(|rejected| RejectedView {
            name: rejected.name.clone(),
            reason: match &rejected.reason {
                RejectReason::Malformed(err) => err.to_string(),
                RejectReason::ForeignOwner(owner) => format!("belongs to `{owner}`"),
            },
        })
        .collect()
}

fn change_summary(changes: &[BookChange]) -> String {
    let mut counts = [0usize; 4];
    for change in changes {
        let slot = match change {
            BookChange::AdvanceAnchor { .. } => 0,
            BookChange::RetireSchedule { .. } => 1,
            BookChange::BackfillFirstDate { .. } => 2,
            BookChange::PurgeSkip { .. } => 3,
        };
        counts[slot] += 1;
    }
    ["anchor advanced", "schedule retired", "first date backfilled", "skip purged"]
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| format!("{count} {label}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let owner = context.owner()?.clone();
    let report = context.projection_service().project(&owner)?;
    let rejected = rejected_views(&report);

    if context.json {
        let payload = ProjectOutput {
            owner: &owner,
            projection: &report.projection,
            rejected,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let projection = &report.projection;
    for entry in &rejected {
        output::warning(format!("Ignored schedule `{}`: {}", entry.name, entry.reason));
    }
    output::section(format!("Cash flow for {owner} as of {}", projection.today));
    output::info(format!("Current balance:  {}", output::amount(projection.balance)));
    output::info(format!(
        "Lowest projected: {}",
        output::amount(projection.chart.min_balance)
    ));

    output::section(format!("Upcoming until {}", projection.chart.x_range.end));
    if projection.upcoming.is_empty() {
        output::info("No upcoming transactions.");
    }
    for event in &projection.upcoming {
        output::info(format!(
            "{}  {:<8}{}  {}",
            event.date,
            event.polarity.to_string(),
            output::amount(event.amount),
            event.name
        ));
    }

    output::section("Running balance");
    for point in &projection.running {
        output::info(format!("{}  {}", point.date, output::amount(point.amount)));
    }
    if report.applied > 0 {
        output::success(format!(
            "Committed {} book change(s): {}",
            report.applied,
            change_summary(&report.changes)
        ));
    }
    Ok(())
}
