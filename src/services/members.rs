//! Member management service

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, MemberDetails, MemberLoan},
    repository::Repository,
};

use super::today;

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a member, stamping today's date as the join date
    pub async fn add_member(&self, member: CreateMember) -> AppResult<Member> {
        let member = member.into_member(today());
        self.repository.members.create(&member).await?;
        tracing::info!(member_id = member.member_id, "Member added");
        Ok(member)
    }

    /// Get a member with every borrow record and the titles they refer to
    pub async fn member_details(&self, member_id: i64) -> AppResult<MemberDetails> {
        let member = self.repository.members.get_by_id(member_id).await?;
        let records = self.repository.loans.get_member_records(member_id).await?;

        let book_ids: Vec<i64> = records.iter().map(|r| r.book_id).collect();
        let titles = self.repository.books.titles(&book_ids).await?;

        let loans = records
            .iter()
            .map(|r| MemberLoan::new(r, titles.get(&r.book_id).cloned()))
            .collect();

        Ok(MemberDetails { member, loans })
    }

    /// Change a member's email address
    pub async fn update_email(&self, member_id: i64, email: &str) -> AppResult<()> {
        let affected = self.repository.members.update_email(member_id, email).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Member ID {} not found", member_id)));
        }
        tracing::info!(member_id, "Member email updated");
        Ok(())
    }

    /// Delete a member with no borrow history
    pub async fn delete_member(&self, member_id: i64) -> AppResult<()> {
        let records = self.repository.loans.get_member_records(member_id).await?;
        if !records.is_empty() {
            let open = records.iter().filter(|r| r.is_open()).count();
            tracing::warn!(member_id, records = records.len(), open, "Member deletion blocked");
            return Err(AppError::HasBorrowHistory(if open > 0 {
                "Cannot delete member: Books not returned".to_string()
            } else {
                "Cannot delete member: Member has borrow history".to_string()
            }));
        }

        let affected = self.repository.members.delete(member_id).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Member ID {} not found", member_id)));
        }
        tracing::info!(member_id, "Member deleted");
        Ok(())
    }
}
