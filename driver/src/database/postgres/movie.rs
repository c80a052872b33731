use error_stack::Report;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::MovieQuery;
use kernel::interface::update::MovieModifier;
use kernel::prelude::entity::{AdultsOnly, Movie, MovieId, MovieName, RentalId};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresMovieRepository;

#[async_trait::async_trait]
impl MovieQuery for PostgresMovieRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        PgMovieInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl MovieModifier for PostgresMovieRepository {
    type Transaction = PostgresTransaction;
    async fn attach(
        &self,
        con: &mut PostgresTransaction,
        movie_id: &MovieId,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::attach(con, movie_id, rental_id).await
    }

    async fn release(
        &self,
        con: &mut PostgresTransaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::release(con, rental_id).await
    }
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    name: String,
    adults_only: bool,
    rental_id: Option<Uuid>,
}

impl From<MovieRow> for Movie {
    fn from(value: MovieRow) -> Self {
        Movie::new(
            MovieId::new(value.id),
            MovieName::new(value.name),
            AdultsOnly::new(value.adults_only),
            value.rental_id.map(RentalId::new),
        )
    }
}

pub(in crate::database) struct PgMovieInternal;

impl PgMovieInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        let row = sqlx::query_as::<_, MovieRow>(
            // language=postgresql
            r#"
            SELECT id, name, adults_only, rental_id
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Movie::from))
    }

    #[tracing::instrument(skip(con))]
    async fn attach(
        con: &mut PgConnection,
        movie_id: &MovieId,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET rental_id = $2
            WHERE id = $1 AND rental_id IS NULL
            "#,
        )
        .bind(movie_id.as_ref())
        .bind(rental_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::MovieInRental)
                .attach_printable(format!("Movie was taken concurrently: {movie_id:?}")));
        }
        Ok(())
    }

    #[tracing::instrument(skip(con))]
    async fn release(
        con: &mut PgConnection,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET rental_id = NULL
            WHERE rental_id = $1
            "#,
        )
        .bind(rental_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!("Released {} movie(s)", result.rows_affected());
        Ok(())
    }

    #[cfg(test)]
    pub(in crate::database) async fn create(
        con: &mut PgConnection,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO movies (id, name, adults_only, rental_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(movie.id().as_ref())
        .bind(movie.name().as_ref())
        .bind(movie.is_adults_only())
        .bind(movie.rental_id().clone().map(Uuid::from))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
