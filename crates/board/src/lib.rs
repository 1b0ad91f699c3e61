#![forbid(unsafe_code)]

//! Task board view: fetches the task feed once and renders it as cards.

pub mod client;
pub mod dedup;
pub mod render;
pub mod state;

pub use client::{FeedResponse, FetchError, TaskFeedClient};
pub use render::{build_cards, render_board, Card, CardAction};
pub use state::BoardState;

/// Runs the board's single fetch and returns the resolved state.
pub async fn load_board(client: &TaskFeedClient) -> BoardState {
    let mut state = BoardState::new();
    state.resolve(client.fetch_tasks().await);
    state
}
