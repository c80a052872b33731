use error_stack::Report;
use sqlx::Error;

use kernel::KernelError;

pub(crate) static OPEN_RENTAL_INDEX: &str = "rentals_one_open_per_user";

pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(db) if db.constraint() == Some(OPEN_RENTAL_INDEX) => {
                    KernelError::PendentRental
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;
    use sqlx::Error;

    use crate::error::ConvertError;

    #[test]
    fn pool_timeout_becomes_timeout() {
        let report = Err::<(), _>(Error::PoolTimedOut).convert_error().unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Timeout);
    }

    #[test]
    fn other_storage_errors_become_internal() {
        let report = Err::<(), _>(Error::RowNotFound).convert_error().unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
        let report = Err::<(), _>(Error::PoolClosed).convert_error().unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
    }
}
