//! Swap response DTOs

use serde::Serialize;

use crate::models::Swap;

/// Single swap response
#[derive(Debug, Serialize)]
pub struct SwapResponse {
    pub swap: Swap,
}

/// Swap list response
#[derive(Debug, Serialize)]
pub struct SwapsListResponse {
    pub swaps: Vec<Swap>,
    pub total: usize,
}
