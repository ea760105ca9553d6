//! OpenAPI Documentation

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::dto;
use crate::error::ErrorBody;
use crate::handlers;
use traininghub_auth::IdentitySummary;

/// TrainingHub API Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TrainingHub API",
        description = "Headless REST API for the TrainingHub platform: accounts, email verification, content and lead capture.",
        version = "1.0.0",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    servers(
        (url = "https://api.traininghub.example", description = "Production"),
        (url = "http://localhost:3000", description = "Local Development")
    ),
    paths(
        // Health
        handlers::health::health_check,
        // Auth
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::verify_token,
        handlers::auth::verify_email,
        handlers::auth::resend_verification,
        // Account
        handlers::account::get_profile,
        handlers::account::update_profile,
        handlers::account::change_password,
        handlers::account::get_settings,
        handlers::account::update_settings,
        handlers::account::delete_account,
        // Content
        handlers::pages::get_page,
        handlers::menus::list_menus,
        handlers::menus::get_menu_tree,
        handlers::entries::list_entries,
        handlers::entries::get_entry,
        // Newsletter & leads
        handlers::subscribe::subscribe,
        handlers::subscribe::unsubscribe,
        handlers::leads::create_lead,
    ),
    components(
        schemas(
            ErrorBody,
            IdentitySummary,
            // Auth
            dto::RegisterRequest,
            dto::RegisterResponse,
            dto::LoginRequest,
            dto::TokenResponse,
            dto::TokenRequest,
            dto::VerifyEmailRequest,
            dto::ResendVerificationRequest,
            dto::MessageResponse,
            // Account
            dto::ProfileResponse,
            dto::UpdateProfileRequest,
            dto::ChangePasswordRequest,
            dto::SettingsResponse,
            dto::UpdateSettingsRequest,
            dto::DeleteAccountRequest,
            // Content
            dto::MenuSummary,
            dto::MenuTreeResponse,
            dto::MenuTreeItem,
            dto::EntrySummary,
            dto::EntryDetail,
            dto::SubscribeRequest,
            dto::LeadRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Registration, login, tokens and email verification"),
        (name = "Account", description = "Profile, settings and account lifecycle"),
        (name = "Content", description = "Pages, menus and published entries"),
        (name = "Newsletter", description = "Newsletter subscription"),
        (name = "Leads", description = "Lead capture")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security scheme modifier
pub struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = &mut openapi.components {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
