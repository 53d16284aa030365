pub mod dashboard_service;
pub mod interest_service;
pub mod mediator_service;
pub mod pairing_service;
pub mod profile_service;

use permata_shared::errors::{AppError, ErrorCode};

use crate::taaruf::{Ineligible, PairingRuleError, TransitionError};

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::UnknownStatus(_) => AppError::new(ErrorCode::ValidationError, err.to_string()),
            TransitionError::NotAllowed { .. } => AppError::new(ErrorCode::InvalidStatusTransition, err.to_string()),
        }
    }
}

impl From<PairingRuleError> for AppError {
    fn from(err: PairingRuleError) -> Self {
        let code = match err {
            PairingRuleError::SexNotRecorded(_) => ErrorCode::SexNotRecorded,
            PairingRuleError::SameSex => ErrorCode::SameSexPairing,
            PairingRuleError::SelfPairing => ErrorCode::BadRequest,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<Ineligible> for AppError {
    fn from(err: Ineligible) -> Self {
        let code = match err {
            Ineligible::OwnProfile => ErrorCode::CannotTargetSelf,
            _ => ErrorCode::InterestNotAllowed,
        };
        AppError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taaruf::TaarufStatus;

    #[test]
    fn rule_errors_keep_their_domain_codes() {
        let err: AppError = TransitionError::NotAllowed {
            from: TaarufStatus::Mediasi,
            to: TaarufStatus::Menikah,
        }
        .into();
        assert_eq!(err.error_code(), ErrorCode::InvalidStatusTransition);

        let err: AppError = PairingRuleError::SameSex.into();
        assert_eq!(err.error_code(), ErrorCode::SameSexPairing);

        let err: AppError = Ineligible::OwnProfile.into();
        assert_eq!(err.error_code(), ErrorCode::CannotTargetSelf);
        let err: AppError = Ineligible::TargetNotFemale.into();
        assert_eq!(err.error_code(), ErrorCode::InterestNotAllowed);
    }
}
