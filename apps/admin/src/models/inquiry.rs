use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A row of the `inquiries` table.
///
/// The table is owned by the public site, so the row is carried as the JSON
/// object PostgreSQL produces for it rather than a fixed struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inquiry(pub Value);
