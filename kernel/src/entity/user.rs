mod birth_date;
mod cpf;
mod email;
mod id;
mod name;

pub use self::{birth_date::*, cpf::*, email::*, id::*, name::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use time::Date;
use vodca::References;

pub const ADULT_AGE: i32 = 18;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct User {
    id: UserId,
    first_name: UserFirstName,
    last_name: UserLastName,
    email: UserEmail,
    cpf: UserCpf,
    birth_date: UserBirthDate,
}

impl User {
    pub fn new(
        id: UserId,
        first_name: UserFirstName,
        last_name: UserLastName,
        email: UserEmail,
        cpf: UserCpf,
        birth_date: UserBirthDate,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            cpf,
            birth_date,
        }
    }

    pub fn age_at(&self, today: Date) -> i32 {
        self.birth_date.age_at(today)
    }

    pub fn is_adult_at(&self, today: Date) -> bool {
        self.age_at(today) >= ADULT_AGE
    }
}
