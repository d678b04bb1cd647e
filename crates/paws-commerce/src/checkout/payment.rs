//! Payment error classification and user-facing messages.

use crate::error::GatewayError;

/// Known processor error codes and their storefront messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorErrorCode {
    CardDeclined,
    InsufficientFunds,
    ExpiredCard,
    IncorrectCvc,
    ProcessingError,
    InvalidRequest,
    ApiConnection,
    ServiceUnavailable,
    Authentication,
    RateLimit,
    Validation,
    Unknown,
}

impl ProcessorErrorCode {
    /// Map a processor error code string.
    pub fn from_code(code: &str) -> Self {
        match code {
            "card_declined" => Self::CardDeclined,
            "insufficient_funds" => Self::InsufficientFunds,
            "expired_card" => Self::ExpiredCard,
            "incorrect_cvc" => Self::IncorrectCvc,
            "processing_error" => Self::ProcessingError,
            "invalid_request_error" => Self::InvalidRequest,
            "api_connection_error" => Self::ApiConnection,
            "api_error" => Self::ServiceUnavailable,
            "authentication_error" => Self::Authentication,
            "rate_limit_error" => Self::RateLimit,
            "validation_error" => Self::Validation,
            _ => Self::Unknown,
        }
    }

    /// Message shown to the buyer.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CardDeclined => "Your card was declined. Please try a different payment method.",
            Self::InsufficientFunds => {
                "Insufficient funds. Please try a different card or add funds."
            }
            Self::ExpiredCard => "Your card has expired. Please try a different card.",
            Self::IncorrectCvc => {
                "The security code (CVC) is incorrect. Please check and try again."
            }
            Self::ProcessingError => {
                "An error occurred while processing your payment. Please try again."
            }
            Self::InvalidRequest => "Payment information is invalid. Please check your details.",
            Self::ApiConnection => "Connection error. Please check your internet and try again.",
            Self::ServiceUnavailable => {
                "Payment service temporarily unavailable. Please try again later."
            }
            Self::Authentication => "Payment authentication failed. Please try again.",
            Self::RateLimit => "Too many requests. Please wait a moment and try again.",
            Self::Validation => "Please check your payment information and try again.",
            Self::Unknown => "An unexpected error occurred. Please try again or contact support.",
        }
    }
}

/// The storefront message for a gateway failure during payment setup.
///
/// Transient transport failures read as connection problems; otherwise
/// the backend message is scanned for a known processor code.
pub fn user_message_for(error: &GatewayError) -> &'static str {
    if error.is_transient() {
        return ProcessorErrorCode::ApiConnection.user_message();
    }
    let message = error.message().to_ascii_lowercase();
    for code in [
        "card_declined",
        "insufficient_funds",
        "expired_card",
        "incorrect_cvc",
        "processing_error",
        "invalid_request_error",
        "api_connection_error",
        "api_error",
        "authentication_error",
        "rate_limit_error",
        "validation_error",
    ] {
        if message.contains(code) {
            return ProcessorErrorCode::from_code(code).user_message();
        }
    }
    ProcessorErrorCode::Unknown.user_message()
}

/// How a failed confirmation is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend reports the payment already went through; treated as
    /// success, no rollback.
    AlreadyConfirmed,
    /// The charge was declined or otherwise failed.
    PaymentFailed,
    InsufficientFunds,
    Generic,
}

impl FailureKind {
    /// Message shown to the buyer.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AlreadyConfirmed => "Your payment was already confirmed.",
            Self::PaymentFailed => {
                "Your payment could not be processed. Please try again or use a different card."
            }
            Self::InsufficientFunds => {
                "Insufficient funds. Please try a different card or add funds."
            }
            Self::Generic => "An unexpected error occurred. Please try again or contact support.",
        }
    }
}

/// Classify a confirmation-stage error by its message content.
pub fn classify_confirmation_error(message: &str) -> FailureKind {
    let message = message.to_ascii_lowercase();
    if message.contains("already") && message.contains("confirm") {
        FailureKind::AlreadyConfirmed
    } else if message.contains("insufficient") {
        FailureKind::InsufficientFunds
    } else if message.contains("payment_failed")
        || message.contains("payment failed")
        || message.contains("declined")
        || message.contains("card")
    {
        FailureKind::PaymentFailed
    } else {
        FailureKind::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping() {
        assert_eq!(
            ProcessorErrorCode::from_code("card_declined"),
            ProcessorErrorCode::CardDeclined
        );
        assert_eq!(
            ProcessorErrorCode::from_code("mystery"),
            ProcessorErrorCode::Unknown
        );
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            classify_confirmation_error("Payment has already been confirmed"),
            FailureKind::AlreadyConfirmed
        );
        assert_eq!(
            classify_confirmation_error("insufficient funds on card"),
            FailureKind::InsufficientFunds
        );
        assert_eq!(
            classify_confirmation_error("payment_failed"),
            FailureKind::PaymentFailed
        );
        assert_eq!(
            classify_confirmation_error("Your card was declined"),
            FailureKind::PaymentFailed
        );
        assert_eq!(
            classify_confirmation_error("something odd"),
            FailureKind::Generic
        );
    }

    #[test]
    fn test_transient_maps_to_connection_message() {
        let error = GatewayError::transient("connection reset");
        assert_eq!(
            user_message_for(&error),
            ProcessorErrorCode::ApiConnection.user_message()
        );
    }

    #[test]
    fn test_rejected_scans_for_code() {
        let error = GatewayError::rejected(Some(402), "card_declined: do not honor");
        assert_eq!(
            user_message_for(&error),
            ProcessorErrorCode::CardDeclined.user_message()
        );
    }
}
