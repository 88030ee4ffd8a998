//! ReferenceSynchronizer - single entry point for back-reference upkeep.
//!
//! Course, class group, teacher, and timetable aggregates each keep a
//! denormalized list of their session ids so they can enumerate their own
//! sessions without a join. Every mutation of those lists funnels through
//! here, and every operation is idempotent (adding a present id or removing
//! an absent id is a no-op) because the synchronizer is invoked from
//! create, update, delete, and cascade-delete with partially known prior
//! state.
//!
//! A back-reference target that has since disappeared is logged and
//! skipped, never an error: the session itself is the authoritative record.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{
    ClassGroupId, CourseId, DomainError, MemberId, SessionId, TimetableId,
};
use crate::domain::scheduling::{Session, SessionRefs};
use crate::ports::{
    ClassGroupRepository, CourseRepository, MemberRepository, TimetableRepository,
};

/// Keeps the four back-reference lists consistent with session state.
pub struct ReferenceSynchronizer {
    courses: Arc<dyn CourseRepository>,
    class_groups: Arc<dyn ClassGroupRepository>,
    members: Arc<dyn MemberRepository>,
    timetables: Arc<dyn TimetableRepository>,
}

impl ReferenceSynchronizer {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        class_groups: Arc<dyn ClassGroupRepository>,
        members: Arc<dyn MemberRepository>,
        timetables: Arc<dyn TimetableRepository>,
    ) -> Self {
        Self {
            courses,
            class_groups,
            members,
            timetables,
        }
    }

    /// Registers the session on every aggregate it references.
    pub async fn attach(&self, session: &Session) -> Result<(), DomainError> {
        let refs = session.refs();
        let id = *session.id();
        self.link_course(&refs.course_id, id, true).await?;
        self.link_class_group(&refs.class_group_id, id, true).await?;
        self.link_teacher(&refs.teacher_id, id, true).await?;
        if let Some(timetable_id) = &refs.timetable_id {
            self.link_timetable(timetable_id, id, true).await?;
        }
        Ok(())
    }

    /// Removes the session from every aggregate it references.
    pub async fn detach(&self, session: &Session) -> Result<(), DomainError> {
        let refs = session.refs();
        let id = *session.id();
        self.link_course(&refs.course_id, id, false).await?;
        self.link_class_group(&refs.class_group_id, id, false).await?;
        self.link_teacher(&refs.teacher_id, id, false).await?;
        if let Some(timetable_id) = &refs.timetable_id {
            self.link_timetable(timetable_id, id, false).await?;
        }
        Ok(())
    }

    /// Moves back-references from old to new targets, relation by relation.
    /// Unchanged relations are untouched.
    pub async fn apply(
        &self,
        session_id: &SessionId,
        previous: &SessionRefs,
        current: &SessionRefs,
    ) -> Result<(), DomainError> {
        let id = *session_id;

        if previous.course_id != current.course_id {
            self.link_course(&previous.course_id, id, false).await?;
            self.link_course(&current.course_id, id, true).await?;
        }
        if previous.class_group_id != current.class_group_id {
            self.link_class_group(&previous.class_group_id, id, false).await?;
            self.link_class_group(&current.class_group_id, id, true).await?;
        }
        if previous.teacher_id != current.teacher_id {
            self.link_teacher(&previous.teacher_id, id, false).await?;
            self.link_teacher(&current.teacher_id, id, true).await?;
        }
        if previous.timetable_id != current.timetable_id {
            if let Some(old) = &previous.timetable_id {
                self.link_timetable(old, id, false).await?;
            }
            if let Some(new) = &current.timetable_id {
                self.link_timetable(new, id, true).await?;
            }
        }
        Ok(())
    }

    /// Resets the session lists on every aggregate of every kind.
    ///
    /// Companion to the registry's bulk clear.
    pub async fn reset_all(&self) -> Result<(), DomainError> {
        self.courses.clear_session_refs().await?;
        self.class_groups.clear_session_refs().await?;
        self.members.clear_session_refs().await?;
        self.timetables.clear_session_refs().await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Per-relation plumbing
    // ─────────────────────────────────────────────────────────────────────────

    async fn link_course(
        &self,
        course_id: &CourseId,
        session_id: SessionId,
        add: bool,
    ) -> Result<(), DomainError> {
        match self.courses.find_by_id(course_id).await? {
            Some(mut course) => {
                let changed = if add {
                    course.add_session(session_id)
                } else {
                    course.remove_session(&session_id)
                };
                if changed {
                    self.courses.update(&course).await?;
                }
            }
            None => warn!(%course_id, %session_id, "course missing during reference sync"),
        }
        Ok(())
    }

    async fn link_class_group(
        &self,
        class_group_id: &ClassGroupId,
        session_id: SessionId,
        add: bool,
    ) -> Result<(), DomainError> {
        match self.class_groups.find_by_id(class_group_id).await? {
            Some(mut group) => {
                let changed = if add {
                    group.add_session(session_id)
                } else {
                    group.remove_session(&session_id)
                };
                if changed {
                    self.class_groups.update(&group).await?;
                }
            }
            None => warn!(%class_group_id, %session_id, "class group missing during reference sync"),
        }
        Ok(())
    }

    async fn link_teacher(
        &self,
        teacher_id: &MemberId,
        session_id: SessionId,
        add: bool,
    ) -> Result<(), DomainError> {
        match self.members.find_by_id(teacher_id).await? {
            Some(mut member) => {
                let changed = if add {
                    member.add_session(session_id)
                } else {
                    member.remove_session(&session_id)
                };
                if changed {
                    self.members.update(&member).await?;
                }
            }
            None => warn!(%teacher_id, %session_id, "teacher missing during reference sync"),
        }
        Ok(())
    }

    async fn link_timetable(
        &self,
        timetable_id: &TimetableId,
        session_id: SessionId,
        add: bool,
    ) -> Result<(), DomainError> {
        match self.timetables.find_by_id(timetable_id).await? {
            Some(mut timetable) => {
                let changed = if add {
                    timetable.add_session(session_id)
                } else {
                    timetable.remove_session(&session_id)
                };
                if changed {
                    self.timetables.update(&timetable).await?;
                }
            }
            None => warn!(%timetable_id, %session_id, "timetable missing during reference sync"),
        }
        Ok(())
    }
}
