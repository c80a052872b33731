use error_stack::Report;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{EndedAt, OpenedAt, Rental, RentalClosed, RentalId, UserId};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for PostgresRentalRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_by_user_id(con, user_id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresRentalRepository {
    type Transaction = PostgresTransaction;
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::create(con, rental).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::update(con, rental).await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    opened_at: OffsetDateTime,
    ended_at: Option<OffsetDateTime>,
    user_id: Uuid,
    closed: bool,
}

impl From<RentalRow> for Rental {
    fn from(value: RentalRow) -> Self {
        Rental::new(
            RentalId::new(value.id),
            OpenedAt::new(value.opened_at),
            value.ended_at.map(EndedAt::new),
            UserId::new(value.user_id),
            RentalClosed::new(value.closed),
        )
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, opened_at, ended_at, user_id, closed
            FROM rentals
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rental::from))
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, opened_at, ended_at, user_id, closed
            FROM rentals
            WHERE user_id = $1
            ORDER BY opened_at
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, opened_at, ended_at, user_id, closed
            FROM rentals
            ORDER BY opened_at
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    #[tracing::instrument(skip(con))]
    async fn create(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO rentals (id, opened_at, ended_at, user_id, closed)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(OffsetDateTime::from(rental.opened_at().clone()))
        .bind(rental.ended_at().clone().map(OffsetDateTime::from))
        .bind(rental.user_id().as_ref())
        .bind(bool::from(*rental.closed()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    #[tracing::instrument(skip(con))]
    async fn update(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET ended_at = $2, closed = $3
            WHERE id = $1 AND NOT closed
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.ended_at().clone().map(OffsetDateTime::from))
        .bind(bool::from(*rental.closed()))
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::RentalClosed)
                .attach_printable(format!("Rental was closed concurrently: {:?}", rental.id())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::RentalQuery;
    use kernel::interface::update::RentalModifier;
    use kernel::prelude::entity::{Rental, RentalId};
    use kernel::KernelError;

    use crate::database::postgres::rental::PostgresRentalRepository;
    use crate::database::postgres::user::{test_user, PgUserInternal};
    use crate::database::postgres::PostgresDatabase;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_find_and_finish() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let user = test_user();
        PgUserInternal::create(&mut con, &user).await?;

        let now = OffsetDateTime::now_utc().replace_nanosecond(0).unwrap();
        let rental = Rental::open(RentalId::new(Uuid::new_v4()), user.id().clone(), now);
        PostgresRentalRepository.create(&mut con, &rental).await?;

        let found = PostgresRentalRepository
            .find_by_id(&mut con, rental.id())
            .await?;
        assert_eq!(found, Some(rental.clone()));

        let by_user = PostgresRentalRepository
            .find_by_user_id(&mut con, user.id())
            .await?;
        assert_eq!(by_user, vec![rental.clone()]);

        let finished = rental.finish(now);
        PostgresRentalRepository
            .update(&mut con, &finished)
            .await?;
        let found = PostgresRentalRepository
            .find_by_id(&mut con, finished.id())
            .await?;
        assert_eq!(found, Some(finished));
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn closed_rental_cannot_be_finished_again() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let user = test_user();
        PgUserInternal::create(&mut con, &user).await?;

        let now = OffsetDateTime::now_utc();
        let rental = Rental::open(RentalId::new(Uuid::new_v4()), user.id().clone(), now);
        PostgresRentalRepository.create(&mut con, &rental).await?;

        let finished = rental.finish(now);
        PostgresRentalRepository
            .update(&mut con, &finished)
            .await?;
        let report = PostgresRentalRepository
            .update(&mut con, &finished)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::RentalClosed);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn second_open_rental_is_rejected() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let user = test_user();
        PgUserInternal::create(&mut con, &user).await?;

        let now = OffsetDateTime::now_utc();
        let first = Rental::open(RentalId::new(Uuid::new_v4()), user.id().clone(), now);
        PostgresRentalRepository.create(&mut con, &first).await?;

        let second = Rental::open(RentalId::new(Uuid::new_v4()), user.id().clone(), now);
        let report = PostgresRentalRepository
            .create(&mut con, &second)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::PendentRental);
        Ok(())
    }
}
