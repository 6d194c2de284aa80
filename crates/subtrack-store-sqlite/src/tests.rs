//! Integration tests for `SqliteStore` against an in-memory database.

use subtrack_core::{
  Error as CoreError, MonthYear, NewSubscription, SubscriptionService,
  store::{SubscriptionStore, TotalCostQuery},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn month(s: &str) -> MonthYear { s.parse().unwrap() }

fn new_sub(user_id: Uuid, name: &str, price: i64, start: &str, end: Option<&str>) -> NewSubscription {
  NewSubscription {
    service_name: name.into(),
    price,
    user_id,
    start_date: month(start),
    end_date: end.map(month),
  }
}

fn netflix(user_id: Uuid) -> NewSubscription {
  new_sub(user_id, "Netflix", 100, "01-2025", None)
}

fn period(start: &str, end: &str) -> TotalCostQuery {
  TotalCostQuery::new(month(start), month(end))
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_returns_same_fields() {
  let s = store().await;
  let input = new_sub(Uuid::new_v4(), "Yandex Plus", 400, "07-2025", Some("12-2025"));

  let created = s.create(input.clone()).await.unwrap();
  assert!(!created.id.is_nil());

  let fetched = s.get(created.id).await.unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.service_name, input.service_name);
  assert_eq!(fetched.price, input.price);
  assert_eq!(fetched.user_id, input.user_id);
  assert_eq!(fetched.start_date, input.start_date);
  assert_eq!(fetched.end_date, input.end_date);
}

#[tokio::test]
async fn create_assigns_distinct_ids() {
  let s = store().await;
  let user = Uuid::new_v4();

  let a = s.create(netflix(user)).await.unwrap();
  let b = s.create(netflix(user)).await.unwrap();
  assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn create_with_id_keeps_supplied_id() {
  let s = store().await;
  let id = Uuid::new_v4();

  let created = s.create_with_id(id, netflix(Uuid::new_v4())).await.unwrap();
  assert_eq!(created.id, id);
  assert_eq!(s.get(id).await.unwrap().id, id);
}

#[tokio::test]
async fn create_with_nil_id_generates_one() {
  let s = store().await;

  let created = s.create_with_id(Uuid::nil(), netflix(Uuid::new_v4())).await.unwrap();
  assert!(!created.id.is_nil());
  assert!(s.get(created.id).await.is_ok());
}

#[tokio::test]
async fn create_with_taken_id_is_storage_error() {
  let s = store().await;
  let id = Uuid::new_v4();
  s.create_with_id(id, netflix(Uuid::new_v4())).await.unwrap();

  let err = s.create_with_id(id, netflix(Uuid::new_v4())).await.unwrap_err();
  assert!(matches!(err, CoreError::Storage(_)));
}

#[tokio::test]
async fn non_positive_price_is_rejected_by_schema() {
  let s = store().await;

  let err = s
    .create(new_sub(Uuid::new_v4(), "Free", 0, "01-2025", None))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Storage(_)));
}

#[tokio::test]
async fn get_missing_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();

  let err = s.get(id).await.unwrap_err();
  assert!(matches!(err, CoreError::NotFound(missing) if missing == id));
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_every_field() {
  let s = store().await;
  let created = s.create(netflix(Uuid::new_v4())).await.unwrap();

  let replacement = new_sub(Uuid::new_v4(), "Spotify", 250, "03-2025", Some("09-2025"));
  let updated = s.update(created.id, replacement.clone()).await.unwrap();

  assert_eq!(updated.id, created.id);
  assert_eq!(updated.service_name, "Spotify");
  assert_eq!(updated.price, 250);
  assert_eq!(updated.user_id, replacement.user_id);
  assert_eq!(updated.start_date, month("03-2025"));
  assert_eq!(updated.end_date, Some(month("09-2025")));

  assert_eq!(s.get(created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn update_can_clear_end_date() {
  let s = store().await;
  let user = Uuid::new_v4();
  let created = s
    .create(new_sub(user, "Netflix", 100, "01-2025", Some("06-2025")))
    .await
    .unwrap();

  let updated = s.update(created.id, netflix(user)).await.unwrap();
  assert_eq!(updated.end_date, None);
}

#[tokio::test]
async fn update_missing_is_not_found() {
  let s = store().await;

  let err = s.update(Uuid::new_v4(), netflix(Uuid::new_v4())).await.unwrap_err();
  assert!(err.is_not_found());
  assert!(s.list().await.unwrap().is_empty());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_then_get_is_not_found() {
  let s = store().await;
  let created = s.create(netflix(Uuid::new_v4())).await.unwrap();

  s.delete(created.id).await.unwrap();
  assert!(s.get(created.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn delete_twice_is_not_found() {
  let s = store().await;
  let created = s.create(netflix(Uuid::new_v4())).await.unwrap();

  s.delete(created.id).await.unwrap();
  assert!(s.delete(created.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn delete_missing_is_not_found() {
  let s = store().await;
  assert!(s.delete(Uuid::new_v4()).await.unwrap_err().is_not_found());
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty_store() {
  let s = store().await;
  assert!(s.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_returns_insertion_order() {
  let s = store().await;
  let user = Uuid::new_v4();

  let a = s.create(new_sub(user, "A", 1, "01-2025", None)).await.unwrap();
  let b = s.create(new_sub(user, "B", 2, "02-2025", None)).await.unwrap();
  let c = s.create(new_sub(user, "C", 3, "03-2025", None)).await.unwrap();

  let ids: Vec<Uuid> = s.list().await.unwrap().into_iter().map(|sub| sub.id).collect();
  assert_eq!(ids, [a.id, b.id, c.id]);
}

// ─── Total cost ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn total_empty_store_is_zero() {
  let s = store().await;
  assert_eq!(s.total_cost(&period("01-2025", "12-2025")).await.unwrap(), 0);
}

#[tokio::test]
async fn open_ended_counts_after_start() {
  let s = store().await;
  s.create(netflix(Uuid::new_v4())).await.unwrap();

  assert_eq!(s.total_cost(&period("03-2025", "03-2025")).await.unwrap(), 100);
  assert_eq!(s.total_cost(&period("01-2024", "12-2024")).await.unwrap(), 0);
}

#[tokio::test]
async fn overlap_boundaries_are_inclusive() {
  let s = store().await;
  s.create(new_sub(Uuid::new_v4(), "Netflix", 100, "03-2025", Some("06-2025")))
    .await
    .unwrap();

  // Period ends exactly at the start month.
  assert_eq!(s.total_cost(&period("01-2025", "03-2025")).await.unwrap(), 100);
  // Period starts exactly at the end month.
  assert_eq!(s.total_cost(&period("06-2025", "12-2025")).await.unwrap(), 100);
  // Entirely after.
  assert_eq!(s.total_cost(&period("07-2025", "12-2025")).await.unwrap(), 0);
  // Entirely before.
  assert_eq!(s.total_cost(&period("01-2024", "02-2025")).await.unwrap(), 0);
}

#[tokio::test]
async fn comparison_is_chronological_not_textual() {
  let s = store().await;
  // Textually "12-2024" > "01-2025"; chronologically it is earlier.
  s.create(new_sub(Uuid::new_v4(), "Old", 50, "02-2024", Some("12-2024")))
    .await
    .unwrap();

  assert_eq!(s.total_cost(&period("01-2025", "12-2025")).await.unwrap(), 0);
  assert_eq!(s.total_cost(&period("11-2024", "01-2025")).await.unwrap(), 50);
}

#[tokio::test]
async fn sums_every_overlapping_subscription() {
  let s = store().await;
  let user = Uuid::new_v4();
  s.create(new_sub(user, "Netflix", 100, "01-2025", None)).await.unwrap();
  s.create(new_sub(user, "Spotify", 250, "02-2025", Some("04-2025"))).await.unwrap();
  s.create(new_sub(user, "Later", 999, "01-2026", None)).await.unwrap();

  assert_eq!(s.total_cost(&period("03-2025", "05-2025")).await.unwrap(), 350);
}

#[tokio::test]
async fn user_filter_excludes_other_users() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();
  s.create(netflix(alice)).await.unwrap();
  s.create(new_sub(bob, "Netflix", 300, "01-2025", None)).await.unwrap();

  let q = period("01-2025", "12-2025");
  assert_eq!(s.total_cost(&q).await.unwrap(), 400);
  assert_eq!(s.total_cost(&q.clone().with_user(alice)).await.unwrap(), 100);
  assert_eq!(s.total_cost(&q.clone().with_user(bob)).await.unwrap(), 300);
  assert_eq!(s.total_cost(&q.with_user(Uuid::new_v4())).await.unwrap(), 0);
}

#[tokio::test]
async fn name_filter_and_user_filter_combine() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();
  s.create(netflix(alice)).await.unwrap();
  s.create(new_sub(alice, "Spotify", 250, "01-2025", None)).await.unwrap();
  s.create(new_sub(bob, "Spotify", 300, "01-2025", None)).await.unwrap();

  let q = period("01-2025", "12-2025");
  assert_eq!(s.total_cost(&q.clone().with_service_name("Spotify")).await.unwrap(), 550);
  assert_eq!(
    s.total_cost(&q.clone().with_user(alice).with_service_name("Spotify"))
      .await
      .unwrap(),
    250
  );
  assert_eq!(
    s.total_cost(&q.with_user(bob).with_service_name("Netflix")).await.unwrap(),
    0
  );
}

#[tokio::test]
async fn disabled_filters_match_everything() {
  let s = store().await;
  s.create(netflix(Uuid::new_v4())).await.unwrap();
  s.create(new_sub(Uuid::new_v4(), "Spotify", 250, "01-2025", None)).await.unwrap();

  let q = period("01-2025", "01-2025").with_user(Uuid::nil()).with_service_name("");
  assert_eq!(s.total_cost(&q).await.unwrap(), 350);
}

#[tokio::test]
async fn store_total_agrees_with_in_memory_predicate() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();
  let inputs = [
    new_sub(alice, "Netflix", 100, "01-2024", Some("06-2024")),
    new_sub(alice, "Spotify", 250, "05-2024", None),
    new_sub(bob, "Netflix", 300, "12-2024", Some("02-2025")),
    new_sub(bob, "YouTube", 75, "03-2025", None),
    new_sub(alice, "Netflix", 120, "10-2025", Some("10-2025")),
  ];
  for input in inputs {
    s.create(input).await.unwrap();
  }
  let all = s.list().await.unwrap();

  let queries = [
    period("01-2024", "12-2024"),
    period("07-2024", "11-2024"),
    period("02-2025", "02-2025").with_user(bob),
    period("01-2024", "12-2025").with_service_name("Netflix"),
    period("01-2024", "12-2025").with_user(alice).with_service_name("Netflix"),
    period("11-2025", "12-2026"),
  ];
  for q in queries {
    let expected: i64 = all.iter().filter(|sub| q.matches(sub)).map(|sub| sub.price).sum();
    assert_eq!(s.total_cost(&q).await.unwrap(), expected, "query {q:?}");
  }
}

// ─── Service ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn service_update_returns_stored_record() {
  let svc = SubscriptionService::new(store().await);
  let created = svc.create(netflix(Uuid::new_v4())).await.unwrap();

  let updated = svc
    .update(created.id, new_sub(created.user_id, "Netflix", 150, "01-2025", None))
    .await
    .unwrap();
  assert_eq!(updated.price, 150);
  assert_eq!(svc.get(created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn service_passes_not_found_through() {
  let svc = SubscriptionService::new(store().await);
  let id = Uuid::new_v4();

  assert!(svc.get(id).await.unwrap_err().is_not_found());
  assert!(svc.update(id, netflix(Uuid::new_v4())).await.unwrap_err().is_not_found());
  assert!(svc.delete(id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn service_total_cost_and_list() {
  let svc = SubscriptionService::new(store().await);
  svc.create(netflix(Uuid::new_v4())).await.unwrap();
  svc.create(new_sub(Uuid::new_v4(), "Spotify", 250, "06-2025", None)).await.unwrap();

  assert_eq!(svc.list().await.unwrap().len(), 2);
  assert_eq!(svc.total_cost(&period("02-2025", "05-2025")).await.unwrap(), 100);
  assert_eq!(svc.total_cost(&period("06-2025", "06-2025")).await.unwrap(), 350);
}
