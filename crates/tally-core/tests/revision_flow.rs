use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use tally_core::{
    api_create_budget, api_propose_revision, api_resolve_revision, CategoryInput, CoreError,
    NewBudget, RevisionDecision,
};
use tally_domain::{BudgetBook, PeriodType, ProjectRef, RevisionStatus};

fn seeded_book() -> (BudgetBook, Uuid) {
    let mut book = BudgetBook::new("Acme");
    let project_id = book.add_project(ProjectRef::new("Mobile App"));
    let budget_id = api_create_budget(
        &mut book,
        NewBudget {
            project_id,
            total_amount: dec!(10_000),
            currency: "USD".into(),
            period_type: PeriodType::Project,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: None,
            description: None,
            created_by: Uuid::new_v4(),
            categories: vec![
                CategoryInput::new("Development", dec!(6000), "#3B82F6"),
                CategoryInput::new("Design", dec!(3000), "#8B5CF6"),
            ],
        },
    )
    .expect("create budget");
    (book, budget_id)
}

#[test]
fn approved_revision_raises_the_total() {
    let (mut book, budget_id) = seeded_book();
    let revision_id = api_propose_revision(
        &mut book,
        budget_id,
        dec!(12_500),
        "scope increase for phase two",
        Uuid::new_v4(),
    )
    .expect("propose");

    api_resolve_revision(&mut book, revision_id, RevisionDecision::Approve, Uuid::new_v4())
        .expect("approve");

    assert_eq!(book.budget(budget_id).unwrap().total_amount, dec!(12_500));
    assert_eq!(
        book.revision(revision_id).unwrap().status,
        RevisionStatus::Approved
    );
}

#[test]
fn shrink_below_allocations_fails_and_preserves_everything() {
    // Categories sum to 9000; revising the total down to 8000 must
    // fail at approval time and leave both records untouched.
    let (mut book, budget_id) = seeded_book();
    let revision_id = api_propose_revision(
        &mut book,
        budget_id,
        dec!(8000),
        "budget cut",
        Uuid::new_v4(),
    )
    .expect("propose");

    let err =
        api_resolve_revision(&mut book, revision_id, RevisionDecision::Approve, Uuid::new_v4())
            .expect_err("allocations exceed revised total");
    assert!(matches!(
        err,
        CoreError::AllocationExceedsRevisedTotal { allocated, new_total }
            if allocated == dec!(9000) && new_total == dec!(8000)
    ));

    let revision = book.revision(revision_id).unwrap();
    assert_eq!(revision.status, RevisionStatus::Pending);
    assert!(revision.approved_by.is_none());
    assert!(revision.resolved_at.is_none());
    assert_eq!(book.budget(budget_id).unwrap().total_amount, dec!(10_000));
}

#[test]
fn a_pending_revision_can_still_be_rejected_after_failed_approval() {
    let (mut book, budget_id) = seeded_book();
    let revision_id =
        api_propose_revision(&mut book, budget_id, dec!(8000), "budget cut", Uuid::new_v4())
            .expect("propose");

    api_resolve_revision(&mut book, revision_id, RevisionDecision::Approve, Uuid::new_v4())
        .expect_err("invariant violation");
    api_resolve_revision(&mut book, revision_id, RevisionDecision::Reject, Uuid::new_v4())
        .expect("reject still possible");

    assert_eq!(
        book.revision(revision_id).unwrap().status,
        RevisionStatus::Rejected
    );
    assert_eq!(book.budget(budget_id).unwrap().total_amount, dec!(10_000));
}

#[test]
fn resolved_revisions_are_immutable() {
    let (mut book, budget_id) = seeded_book();
    let revision_id = api_propose_revision(
        &mut book,
        budget_id,
        dec!(11_000),
        "contingency",
        Uuid::new_v4(),
    )
    .expect("propose");
    api_resolve_revision(&mut book, revision_id, RevisionDecision::Approve, Uuid::new_v4())
        .expect("approve");

    let err =
        api_resolve_revision(&mut book, revision_id, RevisionDecision::Approve, Uuid::new_v4())
            .expect_err("double resolution");
    assert!(matches!(err, CoreError::AlreadyResolved(id) if id == revision_id));
}

#[test]
fn previous_amount_survives_later_changes() {
    let (mut book, budget_id) = seeded_book();
    let first = api_propose_revision(&mut book, budget_id, dec!(11_000), "one", Uuid::new_v4())
        .expect("propose first");
    api_resolve_revision(&mut book, first, RevisionDecision::Approve, Uuid::new_v4())
        .expect("approve first");

    let second = api_propose_revision(&mut book, budget_id, dec!(13_000), "two", Uuid::new_v4())
        .expect("propose second");

    assert_eq!(book.revision(first).unwrap().previous_amount, dec!(10_000));
    assert_eq!(book.revision(second).unwrap().previous_amount, dec!(11_000));
}
