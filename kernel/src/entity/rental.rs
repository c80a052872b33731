mod closed;
mod ended_at;
mod id;
mod opened_at;

pub use self::{closed::*, ended_at::*, id::*, opened_at::*};
use crate::entity::UserId;
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Rental {
    id: RentalId,
    opened_at: OpenedAt,
    ended_at: Option<EndedAt>,
    user_id: UserId,
    closed: RentalClosed,
}

impl Rental {
    pub fn new(
        id: RentalId,
        opened_at: OpenedAt,
        ended_at: Option<EndedAt>,
        user_id: UserId,
        closed: RentalClosed,
    ) -> Self {
        Self {
            id,
            opened_at,
            ended_at,
            user_id,
            closed,
        }
    }

    pub fn open(id: RentalId, user_id: UserId, now: OffsetDateTime) -> Self {
        Self::new(
            id,
            OpenedAt::new(now),
            None,
            user_id,
            RentalClosed::new(false),
        )
    }

    pub fn is_open(&self) -> bool {
        !bool::from(self.closed)
    }

    pub fn finish(self, now: OffsetDateTime) -> Self {
        self.reconstruct(|r| {
            r.ended_at = Some(EndedAt::new(now));
            r.closed = RentalClosed::new(true);
        })
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use crate::entity::{EndedAt, Rental, RentalId, UserId};

    #[test]
    fn finish_closes_and_stamps_end_date() {
        let opened = datetime!(2026-10-01 10:00 UTC);
        let ended = datetime!(2026-10-03 18:30 UTC);
        let rental = Rental::open(
            RentalId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            opened,
        );
        assert!(rental.is_open());
        assert!(rental.ended_at().is_none());

        let finished = rental.clone().finish(ended);
        assert!(!finished.is_open());
        assert_eq!(finished.ended_at(), &Some(EndedAt::new(ended)));
        assert_eq!(finished.opened_at(), rental.opened_at());
        assert_eq!(finished.id(), rental.id());
    }
}
