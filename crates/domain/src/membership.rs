use crate::{Name, ReadError, id::entity_id};

#[allow(async_fn_in_trait)]
pub trait MembershipService {
    async fn get_memberships(&self) -> Result<Vec<Membership>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait MembershipRepository {
    async fn read_memberships(&self) -> Result<Vec<Membership>, ReadError>;
}

entity_id!(MembershipID);

/// Access tier referenced by plans, programs and recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: MembershipID,
    pub name: Name,
    pub is_active: bool,
}
