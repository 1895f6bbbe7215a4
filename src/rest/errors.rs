use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};

/// Failures raised by the lifecycle controllers, mapped one-to-one onto the
/// HTTP error contract of the marketplace API.
#[derive(Debug, Display, Error)]
pub enum ApiError {
    Validation(#[error(not(source))] String),
    /// The marketplace contract answers a reserved pet with 400, not 409.
    #[display("pet already has an active booking")]
    PetAlreadyBooked,
    #[display("the veterinarian already has an appointment at that time")]
    SlotTaken,
    NotFound(#[error(not(source))] String),
    Forbidden(#[error(not(source))] String),
    #[display("internal server error")]
    Storage(#[error(not(source))] String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(format!("{err:#}"))
    }
}

impl web::error::WebResponseError for ApiError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        if let ApiError::Storage(details) = self {
            error!("storage failure surfaced as 500: {details}");
        }

        web::HttpResponse::build(self.status_code()).json(&serde_json::json!({
            "message": self.to_string(),
        }))
    }

    fn status_code(&self) -> http::StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::PetAlreadyBooked => http::StatusCode::BAD_REQUEST,
            ApiError::SlotTaken => http::StatusCode::CONFLICT,
            ApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => http::StatusCode::FORBIDDEN,
            ApiError::Storage(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntex::web::error::WebResponseError;

    #[test]
    fn test_error_contract_status_codes() {
        assert_eq!(
            ApiError::Validation("missing vetId".into()).status_code(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PetAlreadyBooked.status_code(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::SlotTaken.status_code(), http::StatusCode::CONFLICT);
        assert_eq!(
            ApiError::NotFound("booking 9".into()).status_code(),
            http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Forbidden("not declined".into()).status_code(),
            http::StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Storage("pool closed".into()).status_code(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_details_stay_out_of_the_message() {
        let err = ApiError::Storage("connection refused at 10.0.0.1".into());
        assert_eq!(err.to_string(), "internal server error");
    }
}
