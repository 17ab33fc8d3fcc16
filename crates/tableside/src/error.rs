//! # Service Errors and Responses
//!
//! Actor errors are folded into [`ServiceError`] at the session coordinator
//! boundary. Each variant is one status category, and [`ApiResponse`] turns
//! any `Result<T, ServiceError>` into the `{success, message, data?,
//! statusCategory?}` envelope returned to callers.

use crate::order_actor::OrderError;
use crate::table_actor::TableError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCategory {
    NotFound,
    InvalidInput,
    SessionConflict,
    InvalidTransition,
    Internal,
}

impl StatusCategory {
    /// Only infrastructure failures are worth retrying.
    pub fn is_retryable(self) -> bool {
        matches!(self, StatusCategory::Internal)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    SessionConflict(String),

    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn category(&self) -> StatusCategory {
        match self {
            ServiceError::NotFound(_) => StatusCategory::NotFound,
            ServiceError::InvalidInput(_) => StatusCategory::InvalidInput,
            ServiceError::SessionConflict(_) => StatusCategory::SessionConflict,
            ServiceError::InvalidTransition(_) => StatusCategory::InvalidTransition,
            ServiceError::Internal(_) => StatusCategory::Internal,
        }
    }

    pub fn table_occupied() -> Self {
        ServiceError::SessionConflict(
            "This table is currently occupied by another customer. Please select a different table.".into(),
        )
    }
}

impl From<TableError> for ServiceError {
    fn from(e: TableError) -> Self {
        let message = e.to_string();
        match e {
            TableError::NotFound(_) => ServiceError::NotFound(message),
            TableError::WrongOutlet { .. } => ServiceError::NotFound("Invalid table for this outlet".into()),
            TableError::EmptyLabel
            | TableError::DuplicateLabel(_)
            | TableError::InvalidCapacity(_)
            | TableError::StillLeased(_) => ServiceError::InvalidInput(message),
            TableError::ActorCommunicationError(_) => ServiceError::Internal(message),
        }
    }
}

impl From<OrderError> for ServiceError {
    fn from(e: OrderError) -> Self {
        let message = e.to_string();
        match e {
            OrderError::NotFound(_) => ServiceError::NotFound(message),
            OrderError::EmptyOrder
            | OrderError::InvalidQuantity(_)
            | OrderError::UnknownItem(_)
            | OrderError::ItemUnavailable(_)
            | OrderError::Undeletable(_) => ServiceError::InvalidInput(message),
            OrderError::InvalidTransition { .. } => ServiceError::InvalidTransition(message),
            OrderError::Catalog(_) | OrderError::ActorCommunicationError(_) => ServiceError::Internal(message),
        }
    }
}

/// Result discriminator returned across the service boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_category: Option<StatusCategory>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::ok_with_message(data, "Success")
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            status_category: None,
        }
    }

    pub fn error(error: &ServiceError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            data: None,
            status_category: Some(error.category()),
        }
    }
}

impl<T> From<Result<T, ServiceError>> for ApiResponse<T> {
    fn from(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data),
            Err(e) => ApiResponse::error(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus;

    #[test]
    fn test_error_categories() {
        let cases = [
            (ServiceError::from(TableError::NotFound("table_1".into())), StatusCategory::NotFound),
            (
                ServiceError::from(TableError::WrongOutlet {
                    table: "table_1".into(),
                    outlet: "o2".into(),
                }),
                StatusCategory::NotFound,
            ),
            (ServiceError::from(OrderError::EmptyOrder), StatusCategory::InvalidInput),
            (
                ServiceError::from(OrderError::InvalidTransition {
                    from: OrderStatus::Delivered,
                    to: OrderStatus::Cooking,
                }),
                StatusCategory::InvalidTransition,
            ),
            (ServiceError::from(OrderError::Catalog("down".into())), StatusCategory::Internal),
            (ServiceError::table_occupied(), StatusCategory::SessionConflict),
        ];
        for (error, category) in cases {
            assert_eq!(error.category(), category, "{error}");
        }
    }

    #[test]
    fn test_error_response_shape() {
        let response: ApiResponse<u32> = Err(ServiceError::table_occupied()).into();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["statusCategory"], "SessionConflict");
        assert!(json.get("data").is_none());
        assert!(json["message"].as_str().unwrap().contains("occupied"));
    }

    #[test]
    fn test_ok_response_shape() {
        let response: ApiResponse<u32> = Ok(7).into();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 7);
        assert!(json.get("statusCategory").is_none());
        assert!(StatusCategory::Internal.is_retryable());
        assert!(!StatusCategory::SessionConflict.is_retryable());
    }
}
