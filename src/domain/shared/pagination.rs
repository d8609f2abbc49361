use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Hard cap applied to client-supplied page sizes.
pub const MAX_PAGE_SIZE: i64 = 200;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaginationRequest {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

impl PaginationRequest {
    /// Limit clamped to `[1, MAX_PAGE_SIZE]`.
    pub fn safe_limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    /// Offset clamped to be non-negative.
    pub fn safe_offset(&self) -> i64 {
        self.offset.max(0)
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
