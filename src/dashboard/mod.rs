//! Admin dashboard session logic: lock/unlock state machine, single-flight
//! fetch guard, and client-side filter/sort over the held list. Kept free
//! of I/O so the behavior is unit-testable; `bin/admin.rs` drives it.

pub mod api;

use serde::Deserialize;

/// A request row as returned by the HTTP API.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestRow {
    pub id: String,
    pub name: String,
    pub song: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    NewestFirst,
    OldestFirst,
}

impl SortDir {
    pub fn toggled(self) -> Self {
        match self {
            SortDir::NewestFirst => SortDir::OldestFirst,
            SortDir::OldestFirst => SortDir::NewestFirst,
        }
    }
}

/// How an admitted fetch should present: a full loading state before the
/// first successful load, a subtle refresh indicator afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    Background,
}

/// Per-session admin state. The key lives only in process memory for the
/// session's lifetime; locking (explicit or on a 401) discards it along
/// with the held list.
#[derive(Debug, Default)]
pub struct Session {
    key: Option<String>,
    busy: bool,
    has_loaded: bool,
    rows: Vec<RequestRow>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self) -> bool {
        self.key.is_some()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn rows(&self) -> &[RequestRow] {
        &self.rows
    }

    /// Unlocks with a non-empty key. Returns false (and stays locked) for
    /// blank input.
    pub fn unlock(&mut self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        self.key = Some(key.to_string());
        true
    }

    pub fn lock(&mut self) {
        self.key = None;
        self.rows.clear();
        self.has_loaded = false;
    }

    /// Admits at most one fetch at a time. A tick that fires while a fetch
    /// is outstanding (or while locked) is dropped, not queued.
    pub fn begin_fetch(&mut self, background: bool) -> Option<FetchKind> {
        if self.key.is_none() || self.busy {
            return None;
        }
        self.busy = true;
        if background && self.has_loaded {
            Some(FetchKind::Background)
        } else {
            Some(FetchKind::Initial)
        }
    }

    pub fn complete_fetch(&mut self, rows: Vec<RequestRow>) {
        self.rows = rows;
        self.has_loaded = true;
        self.busy = false;
    }

    /// Releases the single-flight guard without touching held state.
    /// Used when a fetch fails or when a delete finishes.
    pub fn end_fetch(&mut self) {
        self.busy = false;
    }

    /// A rejected key forces the session back to locked.
    pub fn fail_fetch(&mut self, unauthorized: bool) {
        self.end_fetch();
        if unauthorized {
            self.lock();
        }
    }

    /// Drops a row locally after a successful delete.
    pub fn remove_row(&mut self, id: &str) {
        self.rows.retain(|r| r.id != id);
    }
}

/// Case-insensitive substring filter over name OR song, then sort by
/// creation time. Purely presentational; never touches the server.
pub fn filter_and_sort(rows: &[RequestRow], query: &str, dir: SortDir) -> Vec<RequestRow> {
    let q = query.trim().to_lowercase();
    let mut out: Vec<RequestRow> = rows
        .iter()
        .filter(|r| {
            q.is_empty()
                || r.name.to_lowercase().contains(&q)
                || r.song.to_lowercase().contains(&q)
        })
        .cloned()
        .collect();

    // created_at is RFC 3339 UTC, so string order is chronological.
    match dir {
        SortDir::NewestFirst => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortDir::OldestFirst => out.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    out
}
