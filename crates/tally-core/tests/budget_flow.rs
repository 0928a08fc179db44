use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use tally_core::{
    api_budget_detail, api_create_budget, api_default_categories, api_record_expense,
    api_set_expense_status, api_update_budget, api_workspace_summary, BudgetUpdate, CategoryInput,
    CoreError, NewBudget, NewExpense,
};
use tally_domain::{BudgetBook, ExpenseStatus, PeriodType, ProjectRef};

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_book() -> (BudgetBook, Uuid) {
    let mut book = BudgetBook::new("Acme");
    let project_id = book.add_project(ProjectRef::new("Website Relaunch"));
    (book, project_id)
}

fn budget_input(project_id: Uuid, categories: Vec<CategoryInput>) -> NewBudget {
    NewBudget {
        project_id,
        total_amount: dec!(10_000),
        currency: "USD".into(),
        period_type: PeriodType::Project,
        start_date: sample_date(2025, 1, 1),
        end_date: None,
        description: Some("Relaunch envelope".into()),
        created_by: Uuid::new_v4(),
        categories,
    }
}

fn record_approved(book: &mut BudgetBook, category_id: Uuid, amount: rust_decimal::Decimal) {
    let expense_id = api_record_expense(
        book,
        NewExpense {
            category_id,
            amount,
            currency: "USD".into(),
            submitted_by: Uuid::new_v4(),
            incurred_on: sample_date(2025, 1, 10),
        },
    )
    .expect("record expense");
    api_set_expense_status(book, expense_id, ExpenseStatus::Approved).expect("approve expense");
}

#[test]
fn budget_within_allocation_is_accepted() {
    let (mut book, project_id) = new_book();
    let input = budget_input(
        project_id,
        vec![
            CategoryInput::new("Development", dec!(6000), "#3B82F6"),
            CategoryInput::new("Design", dec!(3000), "#8B5CF6"),
        ],
    );

    let budget_id = api_create_budget(&mut book, input).expect("create budget");
    let detail = api_budget_detail(&book, budget_id).expect("detail");
    assert_eq!(detail.budget.total_amount, dec!(10_000));
    assert_eq!(detail.categories.len(), 2);
    assert_eq!(detail.summary.total_spent, dec!(0));
    assert_eq!(detail.summary.remaining_budget, dec!(10_000));
}

#[test]
fn over_allocated_budget_is_rejected_without_persisting() {
    let (mut book, project_id) = new_book();
    let input = budget_input(
        project_id,
        vec![
            CategoryInput::new("Development", dec!(6000), "#3B82F6"),
            CategoryInput::new("Design", dec!(4500), "#8B5CF6"),
        ],
    );

    let err = api_create_budget(&mut book, input).expect_err("sum 10500 > 10000");
    assert!(
        matches!(err, CoreError::Validation { field, .. } if field == "categories"),
        "unexpected error: {err:?}"
    );
    assert!(book.budgets.is_empty());
    assert!(book.categories.is_empty());
}

#[test]
fn approved_expense_moves_utilization_figures() {
    let (mut book, project_id) = new_book();
    let budget_id = api_create_budget(
        &mut book,
        budget_input(
            project_id,
            vec![
                CategoryInput::new("Development", dec!(6000), "#3B82F6"),
                CategoryInput::new("Design", dec!(3000), "#8B5CF6"),
            ],
        ),
    )
    .expect("create budget");
    let dev_id = book.categories_for(budget_id)[0].id;

    record_approved(&mut book, dev_id, dec!(1000));

    let detail = api_budget_detail(&book, budget_id).expect("detail");
    let dev = detail
        .summary
        .per_category
        .iter()
        .find(|view| view.name == "Development")
        .expect("development view");
    assert_eq!(dev.total_spent, dec!(1000));
    assert_eq!(dev.utilization_percent, dec!(16.67));
    assert_eq!(dev.remaining, dec!(5000));
}

#[test]
fn remaining_moves_only_on_approval() {
    let (mut book, project_id) = new_book();
    let budget_id = api_create_budget(
        &mut book,
        budget_input(
            project_id,
            vec![CategoryInput::new("Development", dec!(6000), "#3B82F6")],
        ),
    )
    .expect("create budget");
    let dev_id = book.categories_for(budget_id)[0].id;

    let expense_id = api_record_expense(
        &mut book,
        NewExpense {
            category_id: dev_id,
            amount: dec!(750),
            currency: "USD".into(),
            submitted_by: Uuid::new_v4(),
            incurred_on: sample_date(2025, 1, 12),
        },
    )
    .expect("record");

    // Pending: conservation untouched.
    let view = api_set_expense_status(&mut book, expense_id, ExpenseStatus::RequiresInfo)
        .expect("requires info");
    assert_eq!(view.remaining, dec!(6000));

    let view =
        api_set_expense_status(&mut book, expense_id, ExpenseStatus::Approved).expect("approve");
    assert_eq!(view.remaining, dec!(5250));
    assert_eq!(view.total_spent, dec!(750));

    let view =
        api_set_expense_status(&mut book, expense_id, ExpenseStatus::Rejected).expect("reject");
    assert_eq!(view.remaining, dec!(6000));
}

#[test]
fn deleting_a_category_with_expenses_rejects_the_whole_update() {
    let (mut book, project_id) = new_book();
    let budget_id = api_create_budget(
        &mut book,
        budget_input(
            project_id,
            vec![
                CategoryInput::new("Development", dec!(6000), "#3B82F6"),
                CategoryInput::new("Design", dec!(3000), "#8B5CF6"),
            ],
        ),
    )
    .expect("create budget");
    let categories = book.categories_for(budget_id);
    let dev_id = categories[0].id;
    let design_id = categories[1].id;
    record_approved(&mut book, dev_id, dec!(100));

    // Payload drops Development (has an expense) and renames Design.
    let update = BudgetUpdate {
        categories: vec![CategoryInput::existing(
            design_id,
            "Design & Branding",
            dec!(3000),
            "#8B5CF6",
        )],
        ..BudgetUpdate::default()
    };
    let err = api_update_budget(&mut book, budget_id, update).expect_err("category in use");
    assert!(
        matches!(err, CoreError::CategoryInUse { category_id, .. } if category_id == dev_id),
        "unexpected error: {err:?}"
    );

    // Nothing applied, including the unrelated rename.
    let categories = book.categories_for(budget_id);
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].name, "Design");
}

#[test]
fn deleting_an_expense_free_category_succeeds() {
    let (mut book, project_id) = new_book();
    let budget_id = api_create_budget(
        &mut book,
        budget_input(
            project_id,
            vec![
                CategoryInput::new("Development", dec!(6000), "#3B82F6"),
                CategoryInput::new("Design", dec!(3000), "#8B5CF6"),
            ],
        ),
    )
    .expect("create budget");
    let dev = book.categories_for(budget_id)[0].clone();

    let update = BudgetUpdate {
        categories: vec![CategoryInput::existing(
            dev.id,
            dev.name,
            dev.allocated_amount,
            dev.color,
        )],
        ..BudgetUpdate::default()
    };
    api_update_budget(&mut book, budget_id, update).expect("update");

    let categories = book.categories_for(budget_id);
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Development");
}

#[test]
fn direct_total_change_is_blocked_once_expenses_exist() {
    let (mut book, project_id) = new_book();
    let budget_id = api_create_budget(
        &mut book,
        budget_input(
            project_id,
            vec![CategoryInput::new("Development", dec!(6000), "#3B82F6")],
        ),
    )
    .expect("create budget");
    let dev = book.categories_for(budget_id)[0].clone();
    record_approved(&mut book, dev.id, dec!(50));

    let update = BudgetUpdate {
        total_amount: Some(dec!(9000)),
        categories: vec![CategoryInput::existing(
            dev.id,
            dev.name,
            dev.allocated_amount,
            dev.color,
        )],
        ..BudgetUpdate::default()
    };
    let err = api_update_budget(&mut book, budget_id, update).expect_err("needs a revision");
    assert!(matches!(err, CoreError::Validation { field, .. } if field == "total_amount"));
    assert_eq!(book.budget(budget_id).unwrap().total_amount, dec!(10_000));
}

#[test]
fn workspace_summary_counts_pending_approvals() {
    let (mut book, project_id) = new_book();
    let budget_id = api_create_budget(
        &mut book,
        budget_input(
            project_id,
            vec![CategoryInput::new("Development", dec!(6000), "#3B82F6")],
        ),
    )
    .expect("create budget");
    let dev_id = book.categories_for(budget_id)[0].id;

    api_record_expense(
        &mut book,
        NewExpense {
            category_id: dev_id,
            amount: dec!(120),
            currency: "USD".into(),
            submitted_by: Uuid::new_v4(),
            incurred_on: sample_date(2025, 1, 20),
        },
    )
    .expect("record pending expense");
    record_approved(&mut book, dev_id, dec!(900));

    let summary = api_workspace_summary(&book);
    assert_eq!(summary.active_budgets, 1);
    assert_eq!(summary.pending_approvals, 1);
    assert_eq!(summary.total_spent, dec!(900));
}

#[test]
fn default_category_templates_seed_valid_payloads() {
    let (mut book, project_id) = new_book();
    let templates = api_default_categories();
    assert!(!templates.is_empty());

    let categories: Vec<CategoryInput> = templates
        .iter()
        .map(|template| CategoryInput::from_template(template, dec!(1000)))
        .collect();
    let mut input = budget_input(project_id, categories);
    input.total_amount = dec!(10_000);

    let budget_id = api_create_budget(&mut book, input).expect("seeded budget");
    assert_eq!(book.categories_for(budget_id).len(), templates.len());
}
