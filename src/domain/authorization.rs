use crate::domain::value_objects::UserId;

/// Actor derived from request authentication state.
///
/// Read-only input to every authorization and merge decision; never mutated
/// after the auth middleware builds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    user_id: UserId,
    is_admin: bool,
}

impl ActorContext {
    pub fn new(user_id: UserId, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    pub fn admin(user_id: UserId) -> Self {
        Self::new(user_id, true)
    }

    pub fn contributor(user_id: UserId) -> Self {
        Self::new(user_id, false)
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Author-or-admin check used by the information update gate
    pub fn can_manage(&self, author_id: &UserId) -> bool {
        self.is_admin || &self.user_id == author_id
    }
}
