//! Account Handlers
//!
//! Profile, settings, password change and account deletion. All routes here
//! sit behind the bearer gate; handlers receive the caller via
//! [`CurrentUser`].

use axum::{extract::State, Json};
use std::sync::Arc;

use traininghub_store::ProfileChanges;

use crate::dto::{
    ChangePasswordRequest, DeleteAccountRequest, MessageResponse, ProfileResponse,
    SettingsResponse, UpdateProfileRequest, UpdateSettingsRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::state::AppState;

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/v1/account/profile",
    tag = "Account",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<Json<ProfileResponse>> {
    let record = state
        .users
        .find_by_id(user.user_id)
        .await?
        .ok_or(ApiError::Auth(traininghub_auth::AuthError::UserNotFound))?;

    Ok(Json(ProfileResponse::from(&record)))
}

/// Update the caller's profile (partial)
#[utoipa::path(
    post,
    path = "/api/v1/account/profile",
    tag = "Account",
    security(("bearer" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let record = state
        .users
        .update_profile(
            user.user_id,
            ProfileChanges {
                first_name: request.first_name,
                last_name: request.last_name,
                display_name: request.display_name,
                bio: request.bio,
                phone: request.phone,
            },
        )
        .await?;

    Ok(Json(ProfileResponse::from(&record)))
}

/// Change the caller's password
#[utoipa::path(
    post,
    path = "/api/v1/account/change-password",
    tag = "Account",
    security(("bearer" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Confirmation mismatch or new password too short"),
        (status = 401, description = "Current password wrong or not authenticated")
    )
)]
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .auth
        .change_password(
            user.user_id,
            &request.current_password,
            &request.new_password,
            &request.confirm_password,
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed.".to_string(),
    }))
}

/// Get the caller's settings
#[utoipa::path(
    get,
    path = "/api/v1/account/settings",
    tag = "Account",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Settings map", body = SettingsResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<Json<SettingsResponse>> {
    let record = state
        .users
        .find_by_id(user.user_id)
        .await?
        .ok_or(ApiError::Auth(traininghub_auth::AuthError::UserNotFound))?;

    Ok(Json(SettingsResponse {
        settings: record.attributes,
    }))
}

/// Merge settings into the caller's stored map
#[utoipa::path(
    post,
    path = "/api/v1/account/settings",
    tag = "Account",
    security(("bearer" = [])),
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated settings map", body = SettingsResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<UpdateSettingsRequest>,
) -> ApiResult<Json<SettingsResponse>> {
    state
        .users
        .update_attributes(user.user_id, request.settings.into_iter().collect())
        .await?;

    let record = state
        .users
        .find_by_id(user.user_id)
        .await?
        .ok_or(ApiError::Auth(traininghub_auth::AuthError::UserNotFound))?;

    Ok(Json(SettingsResponse {
        settings: record.attributes,
    }))
}

/// Delete the caller's account immediately
#[utoipa::path(
    post,
    path = "/api/v1/account/delete",
    tag = "Account",
    security(("bearer" = [])),
    request_body = DeleteAccountRequest,
    responses(
        (status = 200, description = "Account deleted"),
        (status = 401, description = "Password wrong or not authenticated")
    )
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<DeleteAccountRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .auth
        .delete_account(user.user_id, &request.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Account deleted.".to_string(),
    }))
}
