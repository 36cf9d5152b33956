//! Repository tests for user accounts.

use aistagram_db::repositories::UserRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn create_then_find_by_id_and_email(pool: PgPool) {
    let created = UserRepo::create(&pool, "u1", "u1@example.com", Some("Ada"))
        .await
        .unwrap();
    assert_eq!(created.id, "u1");
    assert!(created.is_active);
    assert_eq!(created.tier, "FREE");

    let by_id = UserRepo::find_by_id(&pool, "u1").await.unwrap().unwrap();
    assert_eq!(by_id.email, "u1@example.com");
    assert_eq!(by_id.name.as_deref(), Some("Ada"));

    let by_email = UserRepo::find_by_email(&pool, "u1@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, "u1");

    assert!(UserRepo::find_by_id(&pool, "nope").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_email_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, "u1", "dup@example.com", None)
        .await
        .unwrap();
    let err = UserRepo::create(&pool, "u2", "dup@example.com", None)
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_users_email"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn set_active_toggles_and_reports_missing_ids(pool: PgPool) {
    UserRepo::create(&pool, "u1", "u1@example.com", None)
        .await
        .unwrap();

    let updated = UserRepo::set_active(&pool, "u1", false)
        .await
        .unwrap()
        .unwrap();
    assert!(!updated.is_active);

    let reread = UserRepo::find_by_id(&pool, "u1").await.unwrap().unwrap();
    assert!(!reread.is_active);

    assert!(UserRepo::set_active(&pool, "nope", true)
        .await
        .unwrap()
        .is_none());
}
