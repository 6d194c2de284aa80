//! SQL schema for the subtrack SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS subscriptions (
    id            TEXT PRIMARY KEY,
    service_name  TEXT NOT NULL,
    price         INTEGER NOT NULL CHECK (price > 0),
    user_id       TEXT NOT NULL,
    start_date    TEXT NOT NULL,   -- MM-YYYY
    end_date      TEXT             -- MM-YYYY, NULL while still active
);

CREATE INDEX IF NOT EXISTS subscriptions_user_idx    ON subscriptions(user_id);
CREATE INDEX IF NOT EXISTS subscriptions_service_idx ON subscriptions(service_name);

PRAGMA user_version = 1;
";
