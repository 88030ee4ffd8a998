//! In-memory member repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::directory::Member;
use crate::domain::foundation::{DomainError, ErrorCode, MemberId};
use crate::ports::MemberRepository;

/// Member storage backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryMemberRepository {
    members: RwLock<HashMap<MemberId, Member>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn save(&self, member: &Member) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        members.insert(*member.id(), member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        if !members.contains_key(member.id()) {
            return Err(DomainError::new(
                ErrorCode::MemberNotFound,
                format!("Member not found: {}", member.id()),
            ));
        }
        members.insert(*member.id(), member.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        let members = self.members.read().await;
        Ok(members.get(id).cloned())
    }

    async fn clear_session_refs(&self) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        for member in members.values_mut() {
            member.clear_sessions();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::MemberRole;
    use crate::domain::foundation::SessionId;

    fn teacher() -> Member {
        Member::new(MemberId::new(), "Ada".to_string(), MemberRole::Teacher).unwrap()
    }

    #[tokio::test]
    async fn save_and_find_round_trip() {
        let repo = InMemoryMemberRepository::new();
        let m = teacher();
        repo.save(&m).await.unwrap();
        assert_eq!(repo.find_by_id(m.id()).await.unwrap(), Some(m));
    }

    #[tokio::test]
    async fn update_missing_member_errors() {
        let repo = InMemoryMemberRepository::new();
        let err = repo.update(&teacher()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MemberNotFound);
    }

    #[tokio::test]
    async fn clear_session_refs_keeps_notifications() {
        let repo = InMemoryMemberRepository::new();
        let mut m = teacher();
        let notification_id = crate::domain::foundation::NotificationId::new();
        m.add_session(SessionId::new());
        m.add_notification(notification_id);
        repo.save(&m).await.unwrap();

        repo.clear_session_refs().await.unwrap();

        let stored = repo.find_by_id(m.id()).await.unwrap().unwrap();
        assert!(stored.session_ids().is_empty());
        assert_eq!(stored.notification_ids(), &[notification_id]);
    }
}
