use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user profile row maintained alongside the hosted auth provider.
/// `plan` is the flag the billing webhook flips.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub email: String,
    pub plan: String,
}
