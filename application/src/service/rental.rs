use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnMovieQuery, DependOnRentalQuery, DependOnUserQuery, MovieQuery, RentalQuery,
    UserQuery,
};
use kernel::interface::update::{
    DependOnMovieModifier, DependOnRentalModifier, MovieModifier, RentalModifier,
};
use kernel::prelude::entity::{MovieId, Rental, RentalId, UserId};
use kernel::{KernelError, Resource};

use crate::transfer::{CreateRentalDto, FinishRentalDto, GetRentalDto, RentalDto};

async fn find_rental<Q: RentalQuery>(
    query: &Q,
    con: &mut Q::Transaction,
    id: &RentalId,
) -> error_stack::Result<Rental, KernelError> {
    query
        .find_by_id(con, id)
        .await?
        .ok_or_else(|| Report::new(KernelError::NotFound(Resource::Rental)))
}

#[async_trait::async_trait]
pub trait GetRentalService: 'static + Sync + Send + DependOnRentalQuery {
    async fn get_rental(&self, dto: GetRentalDto) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let rental = find_rental(self.rental_query(), &mut connection, &id).await?;
        connection.commit().await?;

        Ok(RentalDto::from(rental))
    }

    async fn get_all_rentals(&self) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let rentals = self.rental_query().find_all(&mut connection).await?;
        connection.commit().await?;

        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }
}

impl<T> GetRentalService for T where T: DependOnRentalQuery {}

#[async_trait::async_trait]
pub trait CreateRentalService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnMovieQuery
    + DependOnRentalQuery
    + DependOnMovieModifier
    + DependOnRentalModifier
{
    async fn create_rental(
        &self,
        dto: CreateRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        if dto.movie_ids.is_empty() {
            return Err(Report::new(KernelError::InvalidRequest));
        }

        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        let user = self
            .user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound(Resource::User)))?;

        let rentals = self
            .rental_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;
        if let Some(pending) = rentals.iter().find(|rental| rental.is_open()) {
            return Err(Report::new(KernelError::PendentRental)
                .attach_printable(format!("Pending rental: {:?}", pending.id())));
        }

        let now = OffsetDateTime::now_utc();
        let is_adult = user.is_adult_at(now.date());

        let mut movie_ids: Vec<MovieId> = Vec::with_capacity(dto.movie_ids.len());
        for id in dto.movie_ids.into_iter().map(MovieId::new) {
            if !movie_ids.contains(&id) {
                movie_ids.push(id);
            }
        }

        for movie_id in &movie_ids {
            let movie = self
                .movie_query()
                .find_by_id(&mut connection, movie_id)
                .await?
                .ok_or_else(|| {
                    Report::new(KernelError::NotFound(Resource::Movie))
                        .attach_printable(format!("Movie: {:?}", movie_id))
                })?;
            if movie.is_rented() {
                return Err(Report::new(KernelError::MovieInRental)
                    .attach_printable(format!("Movie: {:?}", movie.id())));
            }
            if movie.is_adults_only() && !is_adult {
                return Err(Report::new(KernelError::InsufficientAge)
                    .attach_printable(format!("Movie: {:?}", movie.id())));
            }
        }

        let rental = Rental::open(RentalId::new(Uuid::new_v4()), user_id, now);
        self.rental_modifier()
            .create(&mut connection, &rental)
            .await?;
        for movie_id in &movie_ids {
            self.movie_modifier()
                .attach(&mut connection, movie_id, rental.id())
                .await?;
        }
        connection.commit().await?;

        tracing::info!(
            "Opened rental {:?} with {} movie(s)",
            rental.id(),
            movie_ids.len()
        );
        Ok(RentalDto::from(rental))
    }
}

impl<T> CreateRentalService for T where
    T: DependOnUserQuery
        + DependOnMovieQuery
        + DependOnRentalQuery
        + DependOnMovieModifier
        + DependOnRentalModifier
{
}

#[async_trait::async_trait]
pub trait FinishRentalService:
    'static + Sync + Send + DependOnRentalQuery + DependOnRentalModifier + DependOnMovieModifier
{
    async fn finish_rental(
        &self,
        dto: FinishRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let rental = find_rental(self.rental_query(), &mut connection, &id).await?;
        if !rental.is_open() {
            return Err(Report::new(KernelError::RentalClosed)
                .attach_printable(format!("Rental: {:?}", rental.id())));
        }

        let rental = rental.finish(OffsetDateTime::now_utc());
        self.rental_modifier()
            .update(&mut connection, &rental)
            .await?;
        self.movie_modifier()
            .release(&mut connection, rental.id())
            .await?;
        connection.commit().await?;

        tracing::info!("Finished rental {:?}", rental.id());
        Ok(RentalDto::from(rental))
    }
}

impl<T> FinishRentalService for T where
    T: DependOnRentalQuery + DependOnRentalModifier + DependOnMovieModifier
{
}
