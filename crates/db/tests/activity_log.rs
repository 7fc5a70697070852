//! Integration tests for the append-only activity trail.

use sqlx::SqlitePool;

use sponsorops_core::activity::{actions, entity_types};
use sponsorops_db::models::activity::NewActivityEvent;
use sponsorops_db::repositories::{ActivityRepo, OrganizationRepo};

fn event(org_id: i64, deal_id: Option<i64>, summary: &str) -> NewActivityEvent {
    NewActivityEvent {
        organization_id: org_id,
        deal_id,
        entity_type: entity_types::DEAL,
        entity_id: 1,
        action: actions::UPDATED,
        actor: "ops@example.com".to_string(),
        summary: summary.to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn events_list_in_reverse_chronological_order(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let org = OrganizationRepo::create(&mut conn, "Night Crew").await.unwrap();
    for i in 0..3 {
        ActivityRepo::append(&mut conn, &event(org.id, None, &format!("event {i}")))
            .await
            .unwrap();
    }
    drop(conn);

    let events = ActivityRepo::list(&pool, org.id, None, None, None).await.unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].summary, "event 2");
    assert_eq!(events[2].summary, "event 0");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deal_filter_narrows_the_trail(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let org = OrganizationRepo::create(&mut conn, "Night Crew").await.unwrap();
    ActivityRepo::append(&mut conn, &event(org.id, Some(10), "deal ten")).await.unwrap();
    ActivityRepo::append(&mut conn, &event(org.id, Some(11), "deal eleven")).await.unwrap();
    ActivityRepo::append(&mut conn, &event(org.id, None, "org level")).await.unwrap();
    drop(conn);

    let events = ActivityRepo::list(&pool, org.id, Some(10), None, None).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].summary, "deal ten");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn trail_is_scoped_by_organization(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let org_a = OrganizationRepo::create(&mut conn, "Org A").await.unwrap();
    let org_b = OrganizationRepo::create(&mut conn, "Org B").await.unwrap();
    ActivityRepo::append(&mut conn, &event(org_a.id, None, "a only")).await.unwrap();
    drop(conn);

    let events = ActivityRepo::list(&pool, org_b.id, None, None, None).await.unwrap();
    assert!(events.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pagination_with_limit_and_offset(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let org = OrganizationRepo::create(&mut conn, "Night Crew").await.unwrap();
    for i in 0..5 {
        ActivityRepo::append(&mut conn, &event(org.id, None, &format!("event {i}")))
            .await
            .unwrap();
    }
    drop(conn);

    let page = ActivityRepo::list(&pool, org.id, None, Some(2), Some(1)).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].summary, "event 3");
    assert_eq!(page[1].summary, "event 2");
}
