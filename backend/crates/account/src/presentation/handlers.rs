//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::application::check_password::{CheckPasswordInput, CheckPasswordUseCase};
use crate::application::config::AccountConfig;
use crate::presentation::dto::{ValidatePasswordRequest, ValidatePasswordResponse};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState {
    pub config: Arc<AccountConfig>,
}

/// POST /api/account/password/validate
///
/// Always `200`: a weak password is reported in the body.
pub async fn validate_password(
    State(state): State<AccountAppState>,
    Json(req): Json<ValidatePasswordRequest>,
) -> Json<ValidatePasswordResponse> {
    let use_case = CheckPasswordUseCase::new(state.config.clone());

    let input = CheckPasswordInput {
        password: req.password,
        options: req.options,
    };

    Json(use_case.execute(input))
}
