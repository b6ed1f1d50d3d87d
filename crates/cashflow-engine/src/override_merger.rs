//! Folds holds and skips into the projected-event stream.

use chrono::NaiveDate;
use uuid::Uuid;

use cashflow_domain::{marked_name, EventOrigin, Hold, ProjectedEvent, Skip};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedOverrides {
    pub events: Vec<ProjectedEvent>,
    /// Skips whose date has passed and should be deleted.
    pub elapsed_skips: Vec<Uuid>,
}

/// Projects holds onto tomorrow and live skips onto their own date.
pub fn merge_overrides(holds: &[Hold], skips: &[Skip], today: NaiveDate) -> MergedOverrides {
    let mut merged = MergedOverrides::default();
    if let Some(tomorrow) = today.succ_opt() {
        merged.events.extend(holds.iter().map(|hold| ProjectedEvent {
            polarity: hold.polarity,
            name: hold.name.clone(),
            amount: hold.amount,
            date: tomorrow,
            origin: EventOrigin::Hold,
        }));
    }
    for skip in skips {
        if skip.is_elapsed(today) {
            merged.elapsed_skips.push(skip.id);
            continue;
        }
        merged.events.push(ProjectedEvent {
            polarity: skip.polarity,
            name: marked_name(&skip.name),
            amount: skip.amount,
            date: skip.date,
            origin: EventOrigin::Skip,
        });
    }
    merged
}
