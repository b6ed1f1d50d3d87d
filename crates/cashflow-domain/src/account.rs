//! The per-owner aggregate persisted by storage backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{balance::Balance, common::*, overrides::*, schedule::ScheduleRecord};

/// Everything known about one account owner's cash flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBook {
    pub owner: OwnerId,
    #[serde(default)]
    pub schedules: Vec<ScheduleRecord>,
    #[serde(default)]
    pub holds: Vec<Hold>,
    #[serde(default)]
    pub skips: Vec<Skip>,
    #[serde(default)]
    pub balances: Vec<Balance>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountBook {
    pub fn new(owner: OwnerId) -> Self {
        let now = Utc::now();
        Self {
            owner,
            schedules: Vec::new(),
            holds: Vec::new(),
            skips: Vec::new(),
            balances: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schedule_mut(&mut self, id: Uuid) -> Option<&mut ScheduleRecord> {
        self.schedules.iter_mut().find(|record| record.id == id)
    }

    pub fn schedule_named(&self, name: &str) -> Option<&ScheduleRecord> {
        self.schedules.iter().find(|record| record.name == name)
    }

    /// Whether `entity` belongs to this book's owner.
    pub fn owns(&self, entity: &impl Owned) -> bool {
        entity.owner() == &self.owner
    }
}
