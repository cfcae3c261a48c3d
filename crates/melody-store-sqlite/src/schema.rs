//! SQL schema for the melody SQLite store.
//!
//! Executed once at connection startup. There is no migration story beyond
//! `CREATE TABLE IF NOT EXISTS`; `PRAGMA user_version` records what was
//! created.

/// Full schema DDL; idempotent.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,   -- lowercase
    message     TEXT NOT NULL,
    phone       TEXT,
    subject     TEXT,
    status      TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'read', 'replied')),
    created_at  TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS subscribers (
    id             TEXT PRIMARY KEY,
    email          TEXT NOT NULL UNIQUE,   -- lowercase
    name           TEXT,
    subscribed_at  TEXT NOT NULL,
    is_active      INTEGER NOT NULL DEFAULT 1
);

-- Append-only.
CREATE TABLE IF NOT EXISTS analytics (
    id             TEXT PRIMARY KEY,
    source         TEXT NOT NULL DEFAULT 'website',
    device         TEXT NOT NULL DEFAULT 'unknown',
    country        TEXT NOT NULL DEFAULT 'unknown',
    download_date  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_email_idx ON contacts(email);

PRAGMA user_version = 1;
";
