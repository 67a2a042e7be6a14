//! Members repository for table store operations

use std::sync::Arc;

use serde_json::json;

use super::{decode_rows, encode_row};
use crate::{
    error::{AppError, AppResult},
    models::member::Member,
    store::{Filter, Table, TableStore},
};

#[derive(Clone)]
pub struct MembersRepository {
    store: Arc<dyn TableStore>,
}

impl MembersRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, member_id: i64) -> AppResult<Member> {
        let rows = self
            .store
            .select(Table::Members, vec![Filter::eq("member_id", member_id)])
            .await?;

        decode_rows::<Member>(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Member ID {} not found", member_id)))
    }

    /// Create a new member
    pub async fn create(&self, member: &Member) -> AppResult<()> {
        self.store.insert(Table::Members, encode_row(member)?).await?;
        Ok(())
    }

    /// Update the email address, returning the number of rows affected
    pub async fn update_email(&self, member_id: i64, email: &str) -> AppResult<u64> {
        let affected = self
            .store
            .update(
                Table::Members,
                json!({ "email": email }),
                vec![Filter::eq("member_id", member_id)],
            )
            .await?;
        Ok(affected)
    }

    /// Delete a member, returning the number of rows affected
    pub async fn delete(&self, member_id: i64) -> AppResult<u64> {
        let affected = self
            .store
            .delete(Table::Members, vec![Filter::eq("member_id", member_id)])
            .await?;
        Ok(affected)
    }
}
