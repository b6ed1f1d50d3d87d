//! Builds the full projected-event stream for one account book.
//!
//! The builder never mutates the book. Anchor advances, retirements, skip
//! purges and first-date backfills come back as [`BookChange`] values that the
//! caller applies and commits through its storage backend.

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use cashflow_domain::{
    AccountBook, EventOrigin, ParseError, ProjectedEvent, ScheduleItem, ScheduleRecord,
};

use crate::{
    anchor::{decide_anchor, AnchorDecision},
    business_day::adjust_to_business_day,
    occurrence::raw_occurrences,
    override_merger::merge_overrides,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A pending mutation of the account book discovered while projecting.
pub enum BookChange {
    AdvanceAnchor {
        schedule_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    },
    RetireSchedule { schedule_id: Uuid },
    BackfillFirstDate { schedule_id: Uuid, date: NaiveDate },
    PurgeSkip { skip_id: Uuid },
}

#[derive(Debug, Clone, PartialEq)]
/// A schedule left out of the projection, with the reason.
pub struct RejectedSchedule {
    pub schedule_id: Uuid,
    pub name: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    Malformed(ParseError),
    ForeignOwner(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Horizon {
    pub events: Vec<ProjectedEvent>,
    pub changes: Vec<BookChange>,
    pub rejected: Vec<RejectedSchedule>,
}

/// Expands one validated schedule into projected events plus its anchor change.
pub fn expand_schedule(
    item: &ScheduleItem,
    today: NaiveDate,
) -> (Vec<ProjectedEvent>, Option<BookChange>) {
    let raw = raw_occurrences(item);
    let change = match decide_anchor(item, &raw, today) {
        AnchorDecision::Retire => {
            return (
                Vec::new(),
                Some(BookChange::RetireSchedule {
                    schedule_id: item.id,
                }),
            )
        }
        AnchorDecision::Advance(to) => Some(BookChange::AdvanceAnchor {
            schedule_id: item.id,
            from: item.anchor_date,
            to,
        }),
        AnchorDecision::Keep => None,
    };
    let events = raw
        .into_iter()
        .map(|date| ProjectedEvent {
            polarity: item.polarity,
            name: item.name.clone(),
            amount: item.amount,
            date: adjust_to_business_day(date, item.frequency, item.polarity),
            origin: EventOrigin::Schedule,
        })
        .collect();
    (events, change)
}

/// Projects every schedule, hold and skip in `book` as of `today`.
pub fn build_horizon(book: &AccountBook, today: NaiveDate) -> Horizon {
    let mut horizon = Horizon::default();

    for record in &book.schedules {
        let Some(item) = validate_record(book, record, &mut horizon.rejected) else {
            continue;
        };
        if item.first_date.is_none() {
            horizon.changes.push(BookChange::BackfillFirstDate {
                schedule_id: item.id,
                date: item.anchor_date,
            });
        }
        let (events, change) = expand_schedule(&item, today);
        debug!(
            schedule = %item.name,
            frequency = %item.frequency,
            occurrences = events.len(),
            "expanded schedule"
        );
        horizon.events.extend(events);
        horizon.changes.extend(change);
    }

    let holds: Vec<_> = book
        .holds
        .iter()
        .filter(|hold| keep_owned(book, *hold, "hold", &hold.name))
        .cloned()
        .collect();
    let skips: Vec<_> = book
        .skips
        .iter()
        .filter(|skip| keep_owned(book, *skip, "skip", &skip.name))
        .cloned()
        .collect();
    let merged = merge_overrides(&holds, &skips, today);
    horizon.events.extend(merged.events);
    horizon.changes.extend(
        merged
            .elapsed_skips
            .into_iter()
            .map(|skip_id| BookChange::PurgeSkip { skip_id }),
    );
    horizon
}

fn validate_record(
    book: &AccountBook,
    record: &ScheduleRecord,
    rejected: &mut Vec<RejectedSchedule>,
) -> Option<ScheduleItem> {
    if !book.owns(record) {
        warn!(schedule = %record.name, owner = %record.owner, "schedule belongs to another owner");
        rejected.push(RejectedSchedule {
            schedule_id: record.id,
            name: record.name.clone(),
            reason: RejectReason::ForeignOwner(record.owner.to_string()),
        });
        return None;
    }
    match record.parse() {
        Ok(item) => Some(item),
        Err(err) => {
            warn!(schedule = %record.name, error = %err, "skipping malformed schedule");
            rejected.push(RejectedSchedule {
                schedule_id: record.id,
                name: record.name.clone(),
                reason: RejectReason::Malformed(err),
            });
            None
        }
    }
}

fn keep_owned(
    book: &AccountBook,
    entity: &impl cashflow_domain::Owned,
    kind: &str,
    name: &str,
) -> bool {
    let owned = book.owns(entity);
    if !owned {
        warn!(%kind, %name, "ignoring override that belongs to another owner");
    }
    owned
}

/// Applies `changes` to `book`, returning how many took effect.
///
/// Changes referring to records that no longer exist are ignored. Anchor
/// advances never move an anchor backwards.
pub fn apply_changes(book: &mut AccountBook, changes: &[BookChange]) -> usize {
    let mut applied = 0;
    for change in changes {
        let took_effect = match change {
            BookChange::AdvanceAnchor { schedule_id, from, to } => {
                match book.schedule_mut(*schedule_id) {
                    Some(record) if to > from => {
                        info!(schedule = %record.name, %from, %to, "advancing schedule anchor");
                        record.set_anchor(*to);
                        true
                    }
                    _ => false,
                }
            }
            BookChange::RetireSchedule { schedule_id } => {
                let before = book.schedules.len();
                book.schedules.retain(|record| {
                    if record.id == *schedule_id {
                        info!(schedule = %record.name, "retiring elapsed one-time schedule");
                        false
                    } else {
                        true
                    }
                });
                book.schedules.len() != before
            }
            BookChange::BackfillFirstDate { schedule_id, date } => {
                match book.schedule_mut(*schedule_id) {
                    Some(record) if record.first_date.is_none() => {
                        record.set_first_date(*date);
                        true
                    }
                    _ => false,
                }
            }
            BookChange::PurgeSkip { skip_id } => {
                let before = book.skips.len();
                book.skips.retain(|skip| skip.id != *skip_id);
                book.skips.len() != before
            }
        };
        if took_effect {
            applied += 1;
        }
    }
    if applied > 0 {
        book.touch();
    }
    applied
}
