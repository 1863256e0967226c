use palisade_api::error::ApiError;
use palisade_api::usecase::category::{
    CreateCategoryInput, CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase,
    ListCategoriesUseCase, UpdateCategoryInput, UpdateCategoryUseCase,
};

use crate::helpers::{
    MockCategoryRepo, MockPermissionRepo, admin_identity, grant_store, member_identity,
    test_category, test_grant,
};

// ── ListCategoriesUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_every_category_for_admin() {
    let uc = ListCategoriesUseCase {
        categories: MockCategoryRepo::new(
            vec![test_category(1, "Reports"), test_category(2, "Archive")],
            grant_store(vec![]),
        ),
    };

    let categories = uc.execute(&admin_identity()).await.unwrap();
    assert_eq!(categories.len(), 2, "admins see every category");
}

#[tokio::test]
async fn should_list_only_granted_categories_for_user() {
    let grants = grant_store(vec![test_grant(2, 1)]);
    let uc = ListCategoriesUseCase {
        categories: MockCategoryRepo::new(
            vec![test_category(1, "Reports"), test_category(2, "Archive")],
            grants,
        ),
    };

    let categories = uc.execute(&member_identity()).await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].category.name, "Reports");
}

#[tokio::test]
async fn should_list_nothing_for_user_without_grants() {
    let uc = ListCategoriesUseCase {
        categories: MockCategoryRepo::new(
            vec![test_category(1, "Reports")],
            grant_store(vec![]),
        ),
    };

    let categories = uc.execute(&member_identity()).await.unwrap();
    assert!(categories.is_empty());
}

// ── GetCategoryUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_get_category_with_grant() {
    let grants = grant_store(vec![test_grant(2, 1)]);
    let uc = GetCategoryUseCase {
        categories: MockCategoryRepo::new(vec![test_category(1, "Reports")], grants.clone()),
        permissions: MockPermissionRepo::new(grants),
    };

    let found = uc.execute(&member_identity(), 1).await.unwrap();
    assert_eq!(found.category.name, "Reports");
    assert_eq!(found.creator_username.as_deref(), Some("admin"));
}

#[tokio::test]
async fn should_forbid_get_without_grant() {
    let grants = grant_store(vec![]);
    let uc = GetCategoryUseCase {
        categories: MockCategoryRepo::new(vec![test_category(1, "Reports")], grants.clone()),
        permissions: MockPermissionRepo::new(grants),
    };

    let result = uc.execute(&member_identity(), 1).await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_allow_admin_get_without_grant() {
    let grants = grant_store(vec![]);
    let uc = GetCategoryUseCase {
        categories: MockCategoryRepo::new(vec![test_category(1, "Reports")], grants.clone()),
        permissions: MockPermissionRepo::new(grants),
    };

    let found = uc.execute(&admin_identity(), 1).await.unwrap();
    assert_eq!(found.category.id, 1);
}

#[tokio::test]
async fn should_report_missing_category_before_access() {
    // An ungranted caller asking for a missing id gets 404, not 403.
    let grants = grant_store(vec![]);
    let uc = GetCategoryUseCase {
        categories: MockCategoryRepo::new(vec![], grants.clone()),
        permissions: MockPermissionRepo::new(grants),
    };

    let result = uc.execute(&member_identity(), 99).await;
    assert!(
        matches!(result, Err(ApiError::CategoryNotFound)),
        "expected CategoryNotFound, got {result:?}"
    );
}

// ── CreateCategoryUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_category_stamping_creator() {
    let mock_categories = MockCategoryRepo::empty();
    let categories_handle = mock_categories.categories_handle();

    let uc = CreateCategoryUseCase {
        categories: mock_categories,
    };
    let category = uc
        .execute(
            1,
            CreateCategoryInput {
                name: "Reports".to_owned(),
                content: "Quarterly reports".to_owned(),
                link: Some("https://reports.example.com".to_owned()),
            },
        )
        .await
        .unwrap();

    assert_eq!(category.created_by_user_id, 1);
    assert!(category.updated_at.is_none(), "fresh categories carry no update stamp");

    let categories = categories_handle.lock().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].category.name, "Reports");
}

#[tokio::test]
async fn should_reject_duplicate_name_case_insensitively_at_create() {
    let uc = CreateCategoryUseCase {
        categories: MockCategoryRepo::new(vec![test_category(1, "Reports")], grant_store(vec![])),
    };

    let result = uc
        .execute(
            1,
            CreateCategoryInput {
                name: "REPORTS".to_owned(),
                content: "Duplicate".to_owned(),
                link: None,
            },
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::DuplicateCategoryName)),
        "expected DuplicateCategoryName, got {result:?}"
    );
}

// ── UpdateCategoryUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_rename_to_existing_name_case_insensitively() {
    let uc = UpdateCategoryUseCase {
        categories: MockCategoryRepo::new(
            vec![test_category(1, "Reports"), test_category(2, "Archive")],
            grant_store(vec![]),
        ),
    };

    let result = uc
        .execute(
            2,
            UpdateCategoryInput {
                name: Some("reports".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::DuplicateCategoryName)),
        "expected DuplicateCategoryName, got {result:?}"
    );
}

#[tokio::test]
async fn should_allow_rename_keeping_own_name() {
    let mock_categories =
        MockCategoryRepo::new(vec![test_category(1, "Reports")], grant_store(vec![]));
    let categories_handle = mock_categories.categories_handle();

    let uc = UpdateCategoryUseCase {
        categories: mock_categories,
    };
    // Resubmitting the current name must not trip the uniqueness check.
    uc.execute(
        1,
        UpdateCategoryInput {
            name: Some("Reports".to_owned()),
            content: Some("Refreshed".to_owned()),
            link: None,
        },
    )
    .await
    .unwrap();

    let categories = categories_handle.lock().unwrap();
    assert_eq!(categories[0].category.content, "Refreshed");
}

#[tokio::test]
async fn should_stamp_updated_at_on_update() {
    let mock_categories =
        MockCategoryRepo::new(vec![test_category(1, "Reports")], grant_store(vec![]));
    let categories_handle = mock_categories.categories_handle();

    let uc = UpdateCategoryUseCase {
        categories: mock_categories,
    };
    uc.execute(
        1,
        UpdateCategoryInput {
            content: Some("Refreshed".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let categories = categories_handle.lock().unwrap();
    assert!(categories[0].category.updated_at.is_some());
}

#[tokio::test]
async fn should_clear_link_with_explicit_null() {
    let mut seeded = test_category(1, "Reports");
    seeded.category.link = Some("https://reports.example.com".to_owned());

    let mock_categories = MockCategoryRepo::new(vec![seeded], grant_store(vec![]));
    let categories_handle = mock_categories.categories_handle();

    let uc = UpdateCategoryUseCase {
        categories: mock_categories,
    };
    uc.execute(
        1,
        UpdateCategoryInput {
            link: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let categories = categories_handle.lock().unwrap();
    assert!(categories[0].category.link.is_none(), "explicit null should clear the link");
}

#[tokio::test]
async fn should_leave_link_unchanged_when_absent() {
    let mut seeded = test_category(1, "Reports");
    seeded.category.link = Some("https://reports.example.com".to_owned());

    let mock_categories = MockCategoryRepo::new(vec![seeded], grant_store(vec![]));
    let categories_handle = mock_categories.categories_handle();

    let uc = UpdateCategoryUseCase {
        categories: mock_categories,
    };
    uc.execute(
        1,
        UpdateCategoryInput {
            content: Some("Refreshed".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let categories = categories_handle.lock().unwrap();
    assert_eq!(
        categories[0].category.link.as_deref(),
        Some("https://reports.example.com")
    );
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_category() {
    let uc = UpdateCategoryUseCase {
        categories: MockCategoryRepo::empty(),
    };

    let result = uc
        .execute(
            99,
            UpdateCategoryInput {
                content: Some("Refreshed".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::CategoryNotFound)),
        "expected CategoryNotFound, got {result:?}"
    );
}

// ── DeleteCategoryUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_category_and_its_grants() {
    let grants = grant_store(vec![test_grant(2, 1), test_grant(3, 1), test_grant(2, 2)]);
    let mock_categories = MockCategoryRepo::new(
        vec![test_category(1, "Reports"), test_category(2, "Archive")],
        grants.clone(),
    );
    let categories_handle = mock_categories.categories_handle();

    let uc = DeleteCategoryUseCase {
        categories: mock_categories,
    };
    uc.execute(1).await.unwrap();

    let categories = categories_handle.lock().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].category.id, 2);

    let remaining = grants.lock().unwrap();
    assert_eq!(remaining.len(), 1, "grants for the deleted category should go with it");
    assert_eq!(remaining[0].1.category_id, 2);
}

#[tokio::test]
async fn should_return_not_found_when_deleting_missing_category() {
    let uc = DeleteCategoryUseCase {
        categories: MockCategoryRepo::empty(),
    };

    let result = uc.execute(99).await;
    assert!(
        matches!(result, Err(ApiError::CategoryNotFound)),
        "expected CategoryNotFound, got {result:?}"
    );
}
