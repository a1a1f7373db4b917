use async_trait::async_trait;
use boards_core::{ApiError, UpdateParams};
use serde_json::Value;

/// The remote boards service. Payloads are passed through to the store untouched.
#[async_trait]
pub trait BoardsApi: Send + Sync {
    /// One page of the board list. Pages are 1-based.
    async fn fetch_boards(&self, page_index: usize, page_size: usize) -> Result<Value, ApiError>;

    async fn fetch_starred_boards(&self) -> Result<Value, ApiError>;

    async fn fetch_board(&self, id: &str) -> Result<Value, ApiError>;

    async fn create_board(&self, title: &str, description: &str) -> Result<Value, ApiError>;

    async fn remove_board(&self, id: &str) -> Result<Value, ApiError>;

    async fn update_board(
        &self,
        id: &str,
        props: &Value,
        params: Option<UpdateParams>,
    ) -> Result<Value, ApiError>;

    /// Moves `source_id` to the position currently held by `target_id`.
    async fn move_board(&self, source_id: &str, target_id: &str) -> Result<Value, ApiError>;
}
