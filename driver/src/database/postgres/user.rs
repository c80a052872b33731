use sqlx::PgConnection;
use time::Date;
use uuid::Uuid;

use kernel::interface::query::UserQuery;
use kernel::prelude::entity::{
    User, UserBirthDate, UserCpf, UserEmail, UserFirstName, UserId, UserLastName,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresUserRepository;

#[async_trait::async_trait]
impl UserQuery for PostgresUserRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_id(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    cpf: String,
    birth_date: Date,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            UserId::new(row.id),
            UserFirstName::new(row.first_name),
            UserLastName::new(row.last_name),
            UserEmail::new(row.email),
            UserCpf::new(row.cpf),
            UserBirthDate::new(row.birth_date),
        )
    }
}

pub(in crate::database) struct PgUserInternal;

impl PgUserInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, first_name, last_name, email, cpf, birth_date
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(User::from))
    }

    #[cfg(test)]
    pub(in crate::database) async fn create(
        con: &mut PgConnection,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO users (id, first_name, last_name, email, cpf, birth_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id().as_ref())
        .bind(user.first_name().as_ref())
        .bind(user.last_name().as_ref())
        .bind(user.email().as_ref())
        .bind(user.cpf().as_ref())
        .bind(Date::from(*user.birth_date()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
pub(in crate::database) fn test_user() -> User {
    let id = Uuid::new_v4();
    User::new(
        UserId::new(id),
        UserFirstName::new("Ana"),
        UserLastName::new("Souza"),
        UserEmail::new(format!("{id}@example.com")),
        UserCpf::new(id.simple().to_string()[..11].to_string()),
        UserBirthDate::new(time::macros::date!(1990 - 05 - 20)),
    )
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::UserQuery;
    use kernel::prelude::entity::UserId;
    use kernel::KernelError;

    use crate::database::postgres::user::{test_user, PgUserInternal, PostgresUserRepository};
    use crate::database::postgres::PostgresDatabase;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn find_by_id() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let user = test_user();
        PgUserInternal::create(&mut con, &user).await?;

        let found = PostgresUserRepository
            .find_by_id(&mut con, user.id())
            .await?;
        assert_eq!(found, Some(user));

        let missing = PostgresUserRepository
            .find_by_id(&mut con, &UserId::new(Uuid::new_v4()))
            .await?;
        assert!(missing.is_none());
        Ok(())
    }
}

