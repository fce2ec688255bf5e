use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 120;
pub const SONG_MIN: usize = 2;
pub const SONG_MAX: usize = 200;

/// A song request row. Timestamps are RFC 3339 UTC strings assigned by the
/// store at insert. `status` is written once as "pending" and never
/// transitioned anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongRequest {
    pub id: String,
    pub name: String,
    pub song: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl SongRequest {
    /// The only shape ever returned to callers. `updated_at` stays internal.
    pub fn public_json(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "song": self.song,
            "status": self.status,
            "createdAt": self.created_at,
        })
    }
}

/// Submission body. Fields are raw JSON values so non-string input coerces
/// to an empty string and fails the length check rather than the parse.
#[derive(Debug, Default, Deserialize)]
pub struct CreateRequestBody {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub song: Value,
}

/// Trims a raw body field down to a plain string, treating anything that
/// is not a JSON string as empty.
pub fn clean_string(value: &Value) -> &str {
    value.as_str().map(str::trim).unwrap_or("")
}
