mod common;

use anyhow::Result;
use bilancio::application::AppError;
use bilancio::domain::{Month, PaymentStatus};
use common::{StandardBudget, parse_day, test_service};
use uuid::Uuid;

#[tokio::test]
async fn test_add_and_list_expenses() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let user = StandardBudget::create_with_categories(&service).await?;

    service
        .add_expense(
            &user,
            "Groceries",
            None,
            45.9,
            parse_day("2023-10-05"),
            Some("weekly shop".into()),
            false,
        )
        .await?;
    service
        .add_expense(
            &user,
            "Rent",
            None,
            800.0,
            parse_day("2023-10-01"),
            None,
            true,
        )
        .await?;
    service
        .add_expense(
            &user,
            "Groceries",
            None,
            23.4,
            parse_day("2023-11-02"),
            None,
            false,
        )
        .await?;

    // October only, newest first
    let october = service.list_expenses(&user, Month::new(2023, 10)).await?;
    assert_eq!(october.len(), 2);
    assert_eq!(october[0].spent_at, parse_day("2023-10-05"));
    assert_eq!(october[0].description.as_deref(), Some("weekly shop"));
    assert_eq!(october[1].spent_at, parse_day("2023-10-01"));

    let november = service.list_expenses(&user, Month::new(2023, 11)).await?;
    assert_eq!(november.len(), 1);
    assert_eq!(november[0].amount, 23.4);

    Ok(())
}

#[tokio::test]
async fn test_expense_result_names_the_category() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let user = StandardBudget::create_with_categories(&service).await?;

    let result = service
        .add_expense(
            &user,
            "Rent",
            None,
            800.0,
            parse_day("2023-10-01"),
            None,
            false,
        )
        .await?;

    assert_eq!(result.category_name, "Rent");
    assert_eq!(result.expense.amount, 800.0);
    assert!(!result.expense.paid);
    assert_eq!(result.expense.payment_status(), PaymentStatus::Unpaid);

    Ok(())
}

#[tokio::test]
async fn test_add_expense_validations() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let user = StandardBudget::create_with_categories(&service).await?;

    let err = service
        .add_expense(&user, "Rent", None, 0.0, parse_day("2023-10-01"), None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    let err = service
        .add_expense(&user, "Rent", None, -5.0, parse_day("2023-10-01"), None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    let err = service
        .add_expense(
            &user,
            "Helicopter",
            None,
            10.0,
            parse_day("2023-10-01"),
            None,
            false,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CategoryNotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_add_expense_marks_paid_on_spend_date() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let user = StandardBudget::create_with_categories(&service).await?;

    let result = service
        .add_expense(
            &user,
            "Rent",
            None,
            800.0,
            parse_day("2023-10-01"),
            None,
            true,
        )
        .await?;

    assert!(result.expense.paid);
    assert_eq!(result.expense.paid_at, Some(parse_day("2023-10-01")));
    assert_eq!(result.expense.payment_status(), PaymentStatus::Paid);

    Ok(())
}

#[tokio::test]
async fn test_pay_expense() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let user = StandardBudget::create_with_categories(&service).await?;

    let result = service
        .add_expense(
            &user,
            "Groceries",
            None,
            52.3,
            parse_day("2023-10-05"),
            None,
            false,
        )
        .await?;

    let paid = service
        .pay_expense(&user, result.expense.id, parse_day("2023-10-20"))
        .await?;
    assert!(paid.paid);
    assert_eq!(paid.paid_at, Some(parse_day("2023-10-20")));

    // Persisted
    let expenses = service.list_expenses(&user, Month::new(2023, 10)).await?;
    assert!(expenses[0].paid);
    assert_eq!(expenses[0].paid_at, Some(parse_day("2023-10-20")));

    // Paying again fails
    let err = service
        .pay_expense(&user, result.expense.id, parse_day("2023-10-21"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ExpenseAlreadyPaid(_)));

    Ok(())
}

#[tokio::test]
async fn test_expenses_are_owned_by_their_user() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let alice = StandardBudget::create_with_categories(&service).await?;
    let bob = service.create_user("bob".into(), "€".into()).await?;

    let result = service
        .add_expense(
            &alice,
            "Rent",
            None,
            800.0,
            parse_day("2023-10-01"),
            None,
            false,
        )
        .await?;

    // Bob cannot touch alice's expense
    let err = service
        .pay_expense(&bob, result.expense.id, parse_day("2023-10-02"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ExpenseNotFound(_)));

    let err = service
        .delete_expense(&bob, result.expense.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ExpenseNotFound(_)));

    // Still there for alice
    let expenses = service.list_expenses(&alice, Month::new(2023, 10)).await?;
    assert_eq!(expenses.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_delete_expense() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let user = StandardBudget::create_with_categories(&service).await?;

    let result = service
        .add_expense(
            &user,
            "Dining",
            None,
            28.0,
            parse_day("2023-10-14"),
            None,
            false,
        )
        .await?;

    let deleted = service.delete_expense(&user, result.expense.id).await?;
    assert_eq!(deleted.id, result.expense.id);
    assert!(
        service
            .list_expenses(&user, Month::new(2023, 10))
            .await?
            .is_empty()
    );

    // Deleting again fails
    let err = service
        .delete_expense(&user, result.expense.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ExpenseNotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_add_and_list_incomes() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let user = StandardBudget::create_user(&service).await?;

    service
        .add_income(
            &user,
            1800.0,
            parse_day("2023-10-27"),
            Some("salary".into()),
        )
        .await?;
    service
        .add_income(&user, 150.0, parse_day("2023-10-05"), None)
        .await?;
    service
        .add_income(&user, 1800.0, parse_day("2023-11-27"), None)
        .await?;

    // October only, newest first
    let october = service.list_incomes(&user, Month::new(2023, 10)).await?;
    assert_eq!(october.len(), 2);
    assert_eq!(october[0].received_at, parse_day("2023-10-27"));
    assert_eq!(october[0].description.as_deref(), Some("salary"));
    assert_eq!(october[1].amount, 150.0);

    Ok(())
}

#[tokio::test]
async fn test_income_validations() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let user = StandardBudget::create_user(&service).await?;

    let err = service
        .add_income(&user, 0.0, parse_day("2023-10-01"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    let err = service
        .add_income(&user, -10.0, parse_day("2023-10-01"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    Ok(())
}

#[tokio::test]
async fn test_delete_income() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let user = StandardBudget::create_user(&service).await?;

    let income = service
        .add_income(&user, 150.0, parse_day("2023-10-05"), None)
        .await?;

    let deleted = service.delete_income(&user, income.id).await?;
    assert_eq!(deleted.amount, 150.0);
    assert!(
        service
            .list_incomes(&user, Month::new(2023, 10))
            .await?
            .is_empty()
    );

    let err = service.delete_income(&user, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::IncomeNotFound(_)));

    Ok(())
}
