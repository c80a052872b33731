use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Resource {
    User,
    Movie,
    Rental,
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::User => write!(f, "User"),
            Resource::Movie => write!(f, "Movie"),
            Resource::Rental => write!(f, "Rental"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum KernelError {
    NotFound(Resource),
    PendentRental,
    MovieInRental,
    InsufficientAge,
    RentalClosed,
    InvalidRequest,
    BadRequest,
    Timeout,
    Internal,
}

impl KernelError {
    pub fn kind(&self) -> &'static str {
        match self {
            KernelError::NotFound(_) => "NotFoundError",
            KernelError::PendentRental => "PendentRentalError",
            KernelError::MovieInRental => "MovieInRentalError",
            KernelError::InsufficientAge => "InsufficientAgeError",
            KernelError::RentalClosed => "RentalClosedError",
            KernelError::InvalidRequest => "InvalidRequestError",
            KernelError::BadRequest => "BadRequestError",
            KernelError::Timeout => "TimeoutError",
            KernelError::Internal => "InternalError",
        }
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound(resource) => write!(f, "{resource} not found."),
            KernelError::PendentRental => write!(f, "The user already have a rental!"),
            KernelError::MovieInRental => write!(f, "Movie already in a rental."),
            KernelError::InsufficientAge => write!(f, "Cannot see that movie."),
            KernelError::RentalClosed => write!(f, "Rental already finished."),
            KernelError::InvalidRequest => write!(f, "At least one movie is required."),
            KernelError::BadRequest => write!(f, "Malformed request."),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
