use crate::controller::{Intake, TryIntake};
use crate::error::ErrorStatus;
use application::transfer::{CreateRentalDto, FinishRentalDto, GetRentalDto};
use error_stack::Report;
use kernel::KernelError;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    user_id: Uuid,
    movies_id: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishRequest {
    rental_id: Uuid,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl TryIntake<CreateRequest> for Transformer {
    type To = CreateRentalDto;
    type Error = ErrorStatus;
    fn emit(&self, input: CreateRequest) -> Result<Self::To, Self::Error> {
        if input.movies_id.is_empty() {
            return Err(ErrorStatus::from(
                Report::new(KernelError::InvalidRequest)
                    .attach_printable("moviesId must not be empty"),
            ));
        }
        Ok(CreateRentalDto {
            user_id: input.user_id,
            movie_ids: input.movies_id,
        })
    }
}

impl Intake<FinishRequest> for Transformer {
    type To = FinishRentalDto;
    fn emit(&self, input: FinishRequest) -> Self::To {
        FinishRentalDto {
            id: input.rental_id,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetRentalDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetRentalDto { id: input.id }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::controller::TryIntake;
    use crate::route::rental::request::{CreateRequest, Transformer};

    #[test]
    fn create_request_reads_camel_case() {
        let user_id = Uuid::new_v4();
        let movie_id = Uuid::new_v4();
        let json = format!(r#"{{"userId":"{user_id}","moviesId":["{movie_id}"]}}"#);
        let request: CreateRequest = serde_json::from_str(&json).unwrap();

        let dto = Transformer.emit(request).unwrap();
        assert_eq!(dto.user_id, user_id);
        assert_eq!(dto.movie_ids, vec![movie_id]);
    }

    #[test]
    fn create_request_needs_a_movie() {
        let request = CreateRequest {
            user_id: Uuid::new_v4(),
            movies_id: Vec::new(),
        };
        assert!(Transformer.emit(request).is_err());
    }
}
