// API layer - HTTP endpoints
pub mod auth;
pub mod health;
pub mod helpers;
pub mod items;

pub use auth::AuthApi;
pub use health::HealthApi;
pub use items::ItemsApi;

use poem::Route;
use poem_openapi::OpenApiService;

use crate::app_data::AppData;

/// Compose routes: API service under /api and Swagger UI under /swagger
pub fn build_app(app_data: &AppData, server_url: &str) -> Route {
    let auth_api = AuthApi::new(app_data.auth_service.clone(), app_data.token_provider.clone());
    let items_api = ItemsApi::new(app_data.item_service.clone(), app_data.token_provider.clone());

    let api_service = OpenApiService::new(
        (HealthApi, auth_api, items_api),
        "Itemstash API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);
    let ui = api_service.swagger_ui();

    Route::new().nest("/api", api_service).nest("/swagger", ui)
}
