mod common;

use cashflow::{
    domain::{Frequency, Hold, OwnerId, Polarity},
    engine::{
        storage::AccountStorage, BalanceService, BookChange, FixedClock, HoldService,
        ProjectionService, ScheduleDraft, ScheduleService, SkipService,
    },
    init,
};
use common::{date, setup_storage};
use rust_decimal_macros::dec;

fn seed(storage: &dyn AccountStorage, owner: &OwnerId) {
    let clock = FixedClock::new(date(2025, 3, 12));
    ProjectionService::new(storage, &clock)
        .update_book(owner, |book| {
            ScheduleService::create(
                book,
                ScheduleDraft::new(
                    "Salary",
                    dec!(3000),
                    Polarity::Income,
                    Frequency::Monthly,
                    date(2025, 3, 31),
                ),
            )?;
            ScheduleService::create(
                book,
                ScheduleDraft::new(
                    "Rent",
                    dec!(1200),
                    Polarity::Expense,
                    Frequency::Monthly,
                    date(2025, 4, 1),
                ),
            )?;
            let check = Hold::new(owner.clone(), "Check #104", Polarity::Expense, dec!(75));
            HoldService::add(book, check)?;
            BalanceService::supersede(book, dec!(2000), date(2025, 3, 12));
            Ok(())
        })
        .expect("seed book");
}

#[test]
fn projection_lists_the_next_two_months() {
    init();
    let storage = setup_storage();
    let owner = OwnerId::new("alice");
    seed(&storage, &owner);

    let clock = FixedClock::new(date(2025, 3, 12));
    let report = ProjectionService::new(&storage, &clock)
        .project(&owner)
        .expect("project");

    let names: Vec<_> = report
        .projection
        .upcoming
        .iter()
        .map(|event| event.name.as_str())
        .collect();
    assert_eq!(names, vec!["Check #104", "Salary", "Rent", "Salary", "Rent"]);
    assert!(report.changes.is_empty());

    let running = &report.projection.running;
    assert_eq!((running[0].date, running[0].amount), (date(2025, 3, 12), dec!(2000)));
    assert_eq!((running[1].date, running[1].amount), (date(2025, 3, 13), dec!(1925)));
    assert_eq!((running[2].date, running[2].amount), (date(2025, 3, 31), dec!(4925)));
    assert!(running.windows(2).all(|pair| pair[0].date < pair[1].date));
    assert_eq!(report.projection.chart.min_balance, dec!(1925));
}

#[test]
fn anchors_advance_once_per_day_and_skips_expire() {
    let storage = setup_storage();
    let owner = OwnerId::new("alice");
    seed(&storage, &owner);

    let april_first = FixedClock::new(date(2025, 4, 1));
    let service = ProjectionService::new(&storage, &april_first);
    let report = service.project(&owner).expect("project on payday");
    assert_eq!(
        report
            .changes
            .iter()
            .filter(|change| matches!(change, BookChange::AdvanceAnchor { .. }))
            .count(),
        2
    );
    let book = storage.load_account(&owner).expect("load");
    assert_eq!(book.schedule_named("Salary").expect("salary").anchor_date, "2025-04-30");
    assert_eq!(book.schedule_named("Rent").expect("rent").anchor_date, "2025-05-01");
    assert!(service.project(&owner).expect("same day").changes.is_empty());

    service
        .update_book(&owner, |book| {
            let may = date(2025, 5, 1);
            SkipService::skip_transaction(book, "Rent", Polarity::Expense, dec!(1200), may)
        })
        .expect("skip may rent");
    let report = service.project(&owner).expect("project with skip");
    assert!(report
        .projection
        .upcoming
        .iter()
        .all(|event| !event.is_skip_marked()));

    let may_second = FixedClock::new(date(2025, 5, 2));
    let report = ProjectionService::new(&storage, &may_second)
        .project(&owner)
        .expect("project after skip date");
    assert!(report
        .changes
        .iter()
        .any(|change| matches!(change, BookChange::PurgeSkip { .. })));
    assert_eq!(report.applied, report.changes.len());

    let book = storage.load_account(&owner).expect("load");
    assert!(book.skips.is_empty());
    assert_eq!(book.schedule_named("Salary").expect("salary").anchor_date, "2025-05-31");
    assert_eq!(book.schedule_named("Rent").expect("rent").anchor_date, "2025-06-01");

    // May 31 is a Saturday: salary is paid Friday, rent on June 1 (Sunday) settles Monday.
    let first_of = |name: &str| {
        report
            .projection
            .upcoming
            .iter()
            .find(|event| event.name == name)
            .map(|event| event.date)
    };
    assert_eq!(first_of("Salary"), Some(date(2025, 5, 30)));
    assert_eq!(first_of("Rent"), Some(date(2025, 6, 2)));
}

#[test]
fn weekend_runs_leave_anchors_alone() {
    let storage = setup_storage();
    let owner = OwnerId::new("alice");
    seed(&storage, &owner);

    let saturday = FixedClock::new(date(2025, 4, 5));
    let report = ProjectionService::new(&storage, &saturday)
        .project(&owner)
        .expect("project on saturday");
    assert!(report.changes.is_empty());
    let book = storage.load_account(&owner).expect("load");
    assert_eq!(book.schedule_named("Salary").expect("salary").anchor_date, "2025-03-31");
}

#[test]
fn malformed_schedule_is_reported_not_fatal() {
    let storage = setup_storage();
    let owner = OwnerId::new("alice");
    seed(&storage, &owner);
    let mut book = storage.load_account(&owner).expect("load");
    book.schedules[0].frequency = "Fortnightly-ish".into();
    storage.save_account(&book).expect("save corrupted");

    let clock = FixedClock::new(date(2025, 3, 12));
    let report = ProjectionService::new(&storage, &clock)
        .project(&owner)
        .expect("project");
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].name, "Salary");
    assert!(report
        .projection
        .upcoming
        .iter()
        .any(|event| event.name == "Rent"));
}
