//! PostgreSQL repositories against a real database.
//!
//! Run with `DATABASE_URL` set: `cargo test --test repository_postgres -- --ignored`.

use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use bizhub::modules::finance::infrastructure::PgCurrencyRepository;
use bizhub::modules::finance::{CreateCurrencyCommand, CurrencyRepository, UpdateCurrencyCommand};
use bizhub::modules::rbac::infrastructure::PgRoleRepository;
use bizhub::modules::rbac::{CreateRoleCommand, RoleRepository};
use bizhub::modules::relationships::infrastructure::PgRelationshipRepository;
use bizhub::modules::relationships::{CreateRelationshipCommand, RelationshipRepository};

fn currency(id: Option<i64>, code: &str) -> CreateCurrencyCommand {
    CreateCurrencyCommand {
        id,
        name: format!("Currency {code}"),
        code: code.to_string(),
        country: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_currency_explicit_id_advances_sequence(pool: PgPool) {
    let repo = PgCurrencyRepository::new(Arc::new(pool));

    let explicit = repo.create(currency(Some(50), "EUR")).await.unwrap();
    assert_eq!(explicit.id, 50);

    let next = repo.create(currency(None, "USD")).await.unwrap();
    assert!(next.id > 50);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_currency_unique_code(pool: PgPool) {
    let repo = PgCurrencyRepository::new(Arc::new(pool));

    repo.create(currency(None, "EUR")).await.unwrap();
    let err = repo.create(currency(None, "EUR")).await.unwrap_err();

    assert_eq!(err.code(), "conflict");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_currency_update_keeps_absent_fields(pool: PgPool) {
    let repo = PgCurrencyRepository::new(Arc::new(pool));
    let created = repo
        .create(CreateCurrencyCommand {
            country: Some("Japan".to_string()),
            ..currency(None, "JPY")
        })
        .await
        .unwrap();

    let renamed = repo
        .update(
            created.id,
            UpdateCurrencyCommand {
                name: Some("Yen".to_string()),
                country: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.country.as_deref(), Some("Japan"));

    let cleared = repo
        .update(
            created.id,
            UpdateCurrencyCommand {
                name: None,
                country: Some(None),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.name, "Yen");
    assert_eq!(cleared.country, None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_role_assignments_cascade(pool: PgPool) {
    let repo = PgRoleRepository::new(Arc::new(pool));

    let role = repo
        .create(CreateRoleCommand {
            name: "reader".to_string(),
            description: None,
            permissions: vec!["invoices.read".to_string()],
        })
        .await
        .unwrap();

    let user = Uuid::new_v4();
    repo.assign(user, role.id).await.unwrap();
    repo.assign(user, role.id).await.unwrap();
    assert_eq!(repo.roles_for_user(user).await.unwrap().len(), 1);

    assert!(repo.delete(role.id).await.unwrap());
    assert!(repo.roles_for_user(user).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_relationships_filter_and_delete(pool: PgPool) {
    let repo = PgRelationshipRepository::new(Arc::new(pool));
    let user = Uuid::new_v4();

    for (entity_name, entity_id) in [("currency", 1), ("provider", 2)] {
        repo.create(CreateRelationshipCommand {
            user_id: user,
            entity_name: entity_name.to_string(),
            entity_id,
        })
        .await
        .unwrap();
    }

    let providers = repo
        .list_for_user(user, Some("provider".to_string()))
        .await
        .unwrap();
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].entity_id, 2);

    assert!(repo.delete(user, "currency", 1).await.unwrap());
    assert!(!repo.delete(user, "currency", 1).await.unwrap());
    assert_eq!(repo.list_for_user(user, None).await.unwrap().len(), 1);
}
