use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserBirthDate(Date);

impl UserBirthDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }

    // 29 February birthdays are reached on 1 March in common years
    pub fn age_at(&self, today: Date) -> i32 {
        let birth = self.0;
        let years = today.year() - birth.year();
        let before_anniversary =
            (today.month() as u8, today.day()) < (birth.month() as u8, birth.day());
        if before_anniversary {
            years - 1
        } else {
            years
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use super::UserBirthDate;

    #[test]
    fn counts_exact_elapsed_years() {
        let birth = UserBirthDate::new(date!(2008 - 06 - 15));
        assert_eq!(birth.age_at(date!(2026 - 06 - 14)), 17);
        assert_eq!(birth.age_at(date!(2026 - 06 - 15)), 18);
        assert_eq!(birth.age_at(date!(2026 - 12 - 31)), 18);
    }

    #[test]
    fn leap_day_birthday_is_reached_in_march() {
        let birth = UserBirthDate::new(date!(2008 - 02 - 29));
        assert_eq!(birth.age_at(date!(2026 - 02 - 28)), 17);
        assert_eq!(birth.age_at(date!(2026 - 03 - 01)), 18);
        assert_eq!(birth.age_at(date!(2028 - 02 - 29)), 20);
    }

    #[test]
    fn born_today_is_zero() {
        let birth = UserBirthDate::new(date!(2026 - 10 - 15));
        assert_eq!(birth.age_at(date!(2026 - 10 - 15)), 0);
    }
}
