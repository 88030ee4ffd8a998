//! Member repository port.

use async_trait::async_trait;

use crate::domain::directory::Member;
use crate::domain::foundation::{DomainError, MemberId};

/// Repository port for Member persistence.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persists a new member.
    async fn save(&self, member: &Member) -> Result<(), DomainError>;

    /// Persists changes to an existing member.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member does not exist
    async fn update(&self, member: &Member) -> Result<(), DomainError>;

    /// Finds a member by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Drops every session back-reference on every member (bulk reset).
    async fn clear_session_refs(&self) -> Result<(), DomainError>;
}
