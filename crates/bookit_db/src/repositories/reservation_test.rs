use super::*;
use crate::DbClient;
use bookit_common::models::{Interval, NewReservation};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 20, hour, minute, 0).unwrap()
}

fn booking(name: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> NewReservation {
    NewReservation::new(name.to_string(), "0812".to_string(), Interval::new(start, end))
}

async fn sql_repository() -> SqlReservationRepository {
    let client = DbClient::from_url("sqlite::memory:").await.unwrap();
    let repository = SqlReservationRepository::new(client);
    repository.init_schema().await.unwrap();
    repository
}

async fn check_insert_and_overlap<R: ReservationRepository>(repo: &R) {
    let first = repo
        .insert_if_free(booking("Budi", at(3, 0), at(4, 0)))
        .await
        .unwrap()
        .expect("first booking stored");
    assert_eq!(first.name, "Budi");
    assert_eq!(first.start_time, at(3, 0));

    // Overlapping by half an hour
    let clash = repo
        .insert_if_free(booking("Sari", at(3, 30), at(4, 30)))
        .await
        .unwrap();
    assert!(clash.is_none());

    // Touching the end is allowed
    let adjacent = repo
        .insert_if_free(booking("Sari", at(4, 0), at(5, 0)))
        .await
        .unwrap();
    assert!(adjacent.is_some());

    let all = repo.find_in_range(None, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

async fn check_range_ordering<R: ReservationRepository>(repo: &R) {
    for (name, start) in [("c", 8), ("a", 2), ("b", 5)] {
        repo.insert_if_free(booking(name, at(start, 0), at(start + 1, 0)))
            .await
            .unwrap()
            .unwrap();
    }

    let all = repo.find_in_range(None, None).await.unwrap();
    let names: Vec<&str> = all.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    let window = repo
        .find_in_range(Some(at(5, 0)), Some(at(8, 0)))
        .await
        .unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].name, "b");

    let from_only = repo.find_in_range(Some(at(5, 0)), None).await.unwrap();
    assert_eq!(from_only.len(), 2);

    let to_only = repo.find_in_range(None, Some(at(5, 0))).await.unwrap();
    assert_eq!(to_only.len(), 1);
}

async fn check_has_conflict_excludes_self<R: ReservationRepository>(repo: &R) {
    let stored = repo
        .insert_if_free(booking("Budi", at(3, 0), at(4, 0)))
        .await
        .unwrap()
        .unwrap();

    let shifted = Interval::new(at(3, 30), at(4, 30));
    assert!(repo.has_conflict(shifted, None).await.unwrap());
    assert!(!repo.has_conflict(shifted, Some(stored.id)).await.unwrap());
    assert!(!repo
        .has_conflict(Interval::new(at(4, 0), at(5, 0)), None)
        .await
        .unwrap());
}

async fn check_update_and_delete<R: ReservationRepository>(repo: &R) {
    let first = repo
        .insert_if_free(booking("Budi", at(3, 0), at(4, 0)))
        .await
        .unwrap()
        .unwrap();
    let second = repo
        .insert_if_free(booking("Sari", at(5, 0), at(6, 0)))
        .await
        .unwrap()
        .unwrap();

    // Moving onto the other booking is refused and leaves the row untouched
    let mut moved = first.clone();
    moved.start_time = at(5, 30);
    moved.end_time = at(6, 30);
    assert!(!repo.update_if_free(moved).await.unwrap());
    let untouched = repo.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(untouched.interval(), first.interval());
    assert_eq!(untouched.name, first.name);

    // Overlapping its own old slot is fine
    let mut shifted = first.clone();
    shifted.start_time = at(3, 30);
    shifted.end_time = at(4, 30);
    shifted.name = "Budi S".to_string();
    assert!(repo.update_if_free(shifted.clone()).await.unwrap());
    let reloaded = repo.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(reloaded.start_time, at(3, 30));
    assert_eq!(reloaded.name, "Budi S");
    assert_eq!(reloaded.created_at.timestamp(), first.created_at.timestamp());

    assert!(repo
        .update_details(second.id, "Sari W".to_string(), "0899".to_string())
        .await
        .unwrap());
    let reloaded = repo.find_by_id(second.id).await.unwrap().unwrap();
    assert_eq!(reloaded.phone, "0899");
    assert_eq!(reloaded.end_time, at(6, 0));

    assert!(repo.delete(second.id).await.unwrap());
    assert!(!repo.delete(second.id).await.unwrap());
    assert!(repo.find_by_id(second.id).await.unwrap().is_none());
    assert!(!repo
        .update_details(second.id, "x".to_string(), "y".to_string())
        .await
        .unwrap());

    let mut ghost = first;
    ghost.id = 9_999;
    ghost.start_time = ghost.start_time + Duration::days(1);
    ghost.end_time = ghost.end_time + Duration::days(1);
    assert!(!repo.update_if_free(ghost).await.unwrap());
}

#[tokio::test]
async fn test_sql_insert_and_overlap() {
    check_insert_and_overlap(&sql_repository().await).await;
}

#[tokio::test]
async fn test_memory_insert_and_overlap() {
    check_insert_and_overlap(&MemoryReservationRepository::new()).await;
}

#[tokio::test]
async fn test_sql_range_ordering() {
    check_range_ordering(&sql_repository().await).await;
}

#[tokio::test]
async fn test_memory_range_ordering() {
    check_range_ordering(&MemoryReservationRepository::new()).await;
}

#[tokio::test]
async fn test_sql_has_conflict_excludes_self() {
    check_has_conflict_excludes_self(&sql_repository().await).await;
}

#[tokio::test]
async fn test_memory_has_conflict_excludes_self() {
    check_has_conflict_excludes_self(&MemoryReservationRepository::new()).await;
}

#[tokio::test]
async fn test_sql_update_and_delete() {
    check_update_and_delete(&sql_repository().await).await;
}

#[tokio::test]
async fn test_memory_update_and_delete() {
    check_update_and_delete(&MemoryReservationRepository::new()).await;
}

#[tokio::test]
async fn test_init_schema_is_idempotent() {
    let repository = sql_repository().await;
    repository.init_schema().await.unwrap();
    assert!(repository.db_client().is_healthy().await);
}

#[tokio::test]
async fn test_concurrent_inserts_store_one() {
    let repository = MemoryReservationRepository::new();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = repository.clone();
            tokio::spawn(async move {
                repo.insert_if_free(booking(&format!("r{i}"), at(3, 0), at(4, 0)))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut stored = 0;
    for handle in handles {
        if handle.await.unwrap().is_some() {
            stored += 1;
        }
    }
    assert_eq!(stored, 1);
}
