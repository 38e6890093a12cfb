//! 认证 API Handlers

use axum::{Json, extract::State};
use shared::{LoginRequest, LoginResponse, UserPublic};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::users::UserDirectory;
use crate::utils::AppResult;

/// Login with username and password, returns a JWT plus the public user
/// record. Unknown usernames and wrong passwords are indistinguishable.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let directory = UserDirectory::new(state.get_store());
    let user = directory.authenticate(&payload.username, &payload.password).await?;

    let token = state
        .get_jwt_service()
        .generate_token(&user)
        .map_err(|e| crate::utils::AppError::internal(e.to_string()))?;

    security_log!("INFO", "login_success", user_id = user.id, username = user.username.as_str());

    Ok(Json(LoginResponse {
        token,
        data: UserPublic::from(&user),
    }))
}

/// Current authenticated user, resolved from the token
pub async fn current_user(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<UserPublic>> {
    let directory = UserDirectory::new(state.get_store());
    let user = directory.get(current.id).await?;
    Ok(Json(UserPublic::from(&user)))
}
