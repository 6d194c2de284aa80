//! [`SqliteStore`] — the SQLite implementation of [`SubscriptionStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use subtrack_core::{
  NewSubscription, Subscription,
  store::{SubscriptionStore, TotalCostQuery},
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawSubscription, SELECT_SUBSCRIPTION, encode_month_year, encode_uuid},
  query::TotalSumQuery,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A subscription store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert(&self, sub: &Subscription) -> Result<()> {
    let id_str      = encode_uuid(sub.id);
    let name        = sub.service_name.clone();
    let price       = sub.price;
    let user_id_str = encode_uuid(sub.user_id);
    let start_str   = encode_month_year(sub.start_date);
    let end_str     = sub.end_date.map(encode_month_year);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subscriptions (id, service_name, price, user_id, start_date, end_date)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, name, price, user_id_str, start_str, end_str],
        )?;
        Ok(())
      })
      .await?;

    debug!(id = %sub.id, "inserted subscription row");
    Ok(())
  }

  async fn fetch(&self, id: Uuid) -> Result<Subscription> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSubscription> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("{SELECT_SUBSCRIPTION} WHERE id = ?1"),
            rusqlite::params![id_str],
            RawSubscription::from_row,
          )
          .optional()?)
      })
      .await?;

    match raw {
      Some(raw) => raw.into_subscription(),
      None => {
        warn!(%id, "subscription not found");
        Err(Error::NotFound(id))
      }
    }
  }

  /// Overwrite the row for `id` and read it back inside one transaction.
  async fn replace(&self, id: Uuid, input: NewSubscription) -> Result<Subscription> {
    let id_str      = encode_uuid(id);
    let name        = input.service_name;
    let price       = input.price;
    let user_id_str = encode_uuid(input.user_id);
    let start_str   = encode_month_year(input.start_date);
    let end_str     = input.end_date.map(encode_month_year);

    let raw: Option<RawSubscription> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let changed = tx.execute(
          "UPDATE subscriptions
           SET service_name = ?1, price = ?2, user_id = ?3, start_date = ?4, end_date = ?5
           WHERE id = ?6",
          rusqlite::params![name, price, user_id_str, start_str, end_str, id_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }

        let raw = tx.query_row(
          &format!("{SELECT_SUBSCRIPTION} WHERE id = ?1"),
          rusqlite::params![id_str],
          RawSubscription::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    match raw {
      Some(raw) => {
        debug!(%id, "replaced subscription row");
        raw.into_subscription()
      }
      None => {
        warn!(%id, "subscription not found for update");
        Err(Error::NotFound(id))
      }
    }
  }

  async fn remove(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM subscriptions WHERE id = ?1", rusqlite::params![id_str])?)
      })
      .await?;

    if changed == 0 {
      warn!(%id, "subscription not found for delete");
      return Err(Error::NotFound(id));
    }
    debug!(%id, "deleted subscription row");
    Ok(())
  }

  async fn fetch_all(&self) -> Result<Vec<Subscription>> {
    let raws: Vec<RawSubscription> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{SELECT_SUBSCRIPTION} ORDER BY rowid"))?;
        let rows = stmt
          .query_map([], RawSubscription::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    debug!(count = raws.len(), "listed subscriptions");
    raws.into_iter().map(RawSubscription::into_subscription).collect()
  }

  async fn sum_prices(&self, query: &TotalCostQuery) -> Result<i64> {
    let (sql, params) = TotalSumQuery::from_query(query).into_parts();

    // SUM over zero rows is NULL.
    let total: Option<i64> = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, rusqlite::params_from_iter(params), |row| row.get(0))?)
      })
      .await?;

    let total = total.unwrap_or(0);
    debug!(total, "summed subscription prices");
    Ok(total)
  }
}

// ─── SubscriptionStore impl ──────────────────────────────────────────────────

impl SubscriptionStore for SqliteStore {
  async fn create(&self, input: NewSubscription) -> subtrack_core::Result<Subscription> {
    self.create_with_id(Uuid::new_v4(), input).await
  }

  async fn create_with_id(
    &self,
    id:    Uuid,
    input: NewSubscription,
  ) -> subtrack_core::Result<Subscription> {
    let id = if id.is_nil() { Uuid::new_v4() } else { id };
    let sub = Subscription::from_parts(id, input);
    self.insert(&sub).await?;
    Ok(sub)
  }

  async fn get(&self, id: Uuid) -> subtrack_core::Result<Subscription> {
    Ok(self.fetch(id).await?)
  }

  async fn update(
    &self,
    id:    Uuid,
    input: NewSubscription,
  ) -> subtrack_core::Result<Subscription> {
    Ok(self.replace(id, input).await?)
  }

  async fn delete(&self, id: Uuid) -> subtrack_core::Result<()> {
    Ok(self.remove(id).await?)
  }

  async fn list(&self) -> subtrack_core::Result<Vec<Subscription>> {
    Ok(self.fetch_all().await?)
  }

  async fn total_cost(&self, query: &TotalCostQuery) -> subtrack_core::Result<i64> {
    Ok(self.sum_prices(query).await?)
  }
}
