//! Directory domain - courses, class groups, and institution members.
//!
//! These aggregates are external collaborators of the scheduler: their CRUD
//! is plain data access. What matters here are the weak session
//! back-reference lists each one carries so it can enumerate its own
//! sessions without a join. All list mutations are idempotent.

mod class_group;
mod course;
mod member;

pub use class_group::ClassGroup;
pub use course::Course;
pub use member::{Member, MemberRole};
