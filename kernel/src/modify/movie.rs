use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{MovieId, RentalId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MovieModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn attach(
        &self,
        con: &mut Self::Transaction,
        movie_id: &MovieId,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError>;

    async fn release(
        &self,
        con: &mut Self::Transaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnMovieModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type MovieModifier: MovieModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn movie_modifier(&self) -> &Self::MovieModifier;
}
