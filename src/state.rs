//! Process-wide state for the common routes. Resources carry their own service as state.

use sqlx::AnyPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: AnyPool,
}
