use kernel::prelude::entity::{DestructRental, Rental};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalDto {
    pub id: Uuid,
    pub opened_at: OffsetDateTime,
    pub ended_at: Option<OffsetDateTime>,
    pub user_id: Uuid,
    pub closed: bool,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            opened_at,
            ended_at,
            user_id,
            closed,
        } = value.into_destruct();
        Self {
            id: id.into(),
            opened_at: opened_at.into(),
            ended_at: ended_at.map(Into::into),
            user_id: user_id.into(),
            closed: closed.into(),
        }
    }
}

pub struct GetRentalDto {
    pub id: Uuid,
}

pub struct CreateRentalDto {
    pub user_id: Uuid,
    pub movie_ids: Vec<Uuid>,
}

pub struct FinishRentalDto {
    pub id: Uuid,
}
