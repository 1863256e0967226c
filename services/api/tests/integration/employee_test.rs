use uuid::Uuid;

use palisade_api::domain::types::EmployeeFields;
use palisade_api::error::ApiError;
use palisade_api::usecase::employee::{
    CreateEmployeeUseCase, DeleteEmployeeUseCase, GetEmployeeUseCase, ListEmployeesUseCase,
    UpdateEmployeeUseCase,
};

use crate::helpers::{MockEmployeeRepo, test_employee};

#[tokio::test]
async fn should_create_employees_with_fresh_ids() {
    let mock_employees = MockEmployeeRepo::empty();
    let employees_handle = mock_employees.employees_handle();

    let uc = CreateEmployeeUseCase {
        employees: mock_employees,
    };
    let first = uc
        .execute(EmployeeFields {
            name: "Dana".to_owned(),
            email: "dana@example.com".to_owned(),
            phone: Some("555-0100".to_owned()),
            salary: 61_000.0,
        })
        .await
        .unwrap();
    let second = uc
        .execute(EmployeeFields {
            name: "Evan".to_owned(),
            email: "evan@example.com".to_owned(),
            phone: None,
            salary: 58_500.0,
        })
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.name, "Dana");
    assert_eq!(employees_handle.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_list_employees() {
    let uc = ListEmployeesUseCase {
        employees: MockEmployeeRepo::new(vec![test_employee("dana"), test_employee("evan")]),
    };

    let employees = uc.execute().await.unwrap();
    assert_eq!(employees.len(), 2);
}

#[tokio::test]
async fn should_get_employee_by_id() {
    let seeded = test_employee("dana");
    let uc = GetEmployeeUseCase {
        employees: MockEmployeeRepo::new(vec![seeded.clone()]),
    };

    let employee = uc.execute(seeded.id).await.unwrap();
    assert_eq!(employee, seeded);
}

#[tokio::test]
async fn should_return_not_found_for_missing_employee() {
    let uc = GetEmployeeUseCase {
        employees: MockEmployeeRepo::empty(),
    };

    let result = uc.execute(Uuid::new_v4()).await;
    assert!(
        matches!(result, Err(ApiError::EmployeeNotFound)),
        "expected EmployeeNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_replace_every_field_on_update() {
    let seeded = test_employee("dana");
    let mock_employees = MockEmployeeRepo::new(vec![seeded.clone()]);
    let employees_handle = mock_employees.employees_handle();

    let uc = UpdateEmployeeUseCase {
        employees: mock_employees,
    };
    let updated = uc
        .execute(
            seeded.id,
            EmployeeFields {
                name: "Dana Q".to_owned(),
                email: "dana.q@example.com".to_owned(),
                phone: None,
                salary: 64_000.0,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, seeded.id);
    assert_eq!(updated.name, "Dana Q");

    // Whole-record replacement: the previously set phone is now gone.
    let employees = employees_handle.lock().unwrap();
    assert_eq!(employees[0].email, "dana.q@example.com");
    assert!(employees[0].phone.is_none());
    assert_eq!(employees[0].salary, 64_000.0);
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_employee() {
    let uc = UpdateEmployeeUseCase {
        employees: MockEmployeeRepo::empty(),
    };

    let result = uc
        .execute(
            Uuid::new_v4(),
            EmployeeFields {
                name: "Nobody".to_owned(),
                email: "nobody@example.com".to_owned(),
                phone: None,
                salary: 0.0,
            },
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::EmployeeNotFound)),
        "expected EmployeeNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_delete_employee_exactly_once() {
    let seeded = test_employee("dana");
    let mock_employees = MockEmployeeRepo::new(vec![seeded.clone()]);
    let employees_handle = mock_employees.employees_handle();

    let uc = DeleteEmployeeUseCase {
        employees: mock_employees,
    };
    uc.execute(seeded.id).await.unwrap();
    assert!(employees_handle.lock().unwrap().is_empty());

    let result = uc.execute(seeded.id).await;
    assert!(
        matches!(result, Err(ApiError::EmployeeNotFound)),
        "expected EmployeeNotFound on second delete, got {result:?}"
    );
}
