use crate::category::UserRole;
use crate::ids::RecordId;

/// Who is looking at the search screen.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionIdentity {
    pub current_user_id: RecordId,
    pub role: UserRole,
}

impl SessionIdentity {
    pub fn new(current_user_id: impl Into<RecordId>, role: UserRole) -> Self {
        Self {
            current_user_id: current_user_id.into(),
            role,
        }
    }

    pub fn is_self(&self, id: &RecordId) -> bool {
        &self.current_user_id == id
    }
}
