//! Field value categories.

use serde::{Deserialize, Serialize};

/// The declared category of a tagged field's value, decided once at
/// registration time. The diff engine dispatches comparison and coercion on
/// this, not on the runtime shape of the incoming value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Ordered sequence; compared element-wise, replaced wholesale.
    List,
    /// String; compared literally, placeholder-interpolated before apply.
    Text,
    /// Integer/boolean/long; compared by semantic value.
    Scalar,
    /// Any other shape; compared structurally, mapped onto the field's
    /// declared type by name on apply.
    Structured,
}
