//! API server initialization

use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use super::auth::{AuthState, require_auth};
use super::middleware::{self, AllowedOrigins};
use super::openapi::openapi_json;
use super::routes::{
    auth, floors, health, hotel_informations, hotel_settings, hotels, permissions, roles,
    room_types, rooms, users,
};
use crate::core::constants::{AUTH_BODY_LIMIT, DEFAULT_BODY_LIMIT};
use crate::core::shutdown::shutdown_signal;
use crate::core::CoreApp;

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);

        Self {
            app,
            allowed_origins,
        }
    }

    pub async fn start(self) -> Result<()> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(host.parse()?, port);

        let pool = app.database.pool().clone();
        let auth_state = AuthState {
            auth_manager: app.auth.clone(),
            gate: app.gate.clone(),
        };

        // Helper to protect a resource router with the auth middleware
        let protect = |router: Router<()>| {
            router.layer(axum::middleware::from_fn_with_state(
                auth_state.clone(),
                require_auth,
            ))
        };

        let auth_routes = auth::routes(app.auth.clone(), app.resolver.clone(), pool.clone())
            .layer(DefaultBodyLimit::max(AUTH_BODY_LIMIT));

        let hotels_routes = protect(hotels::routes(pool.clone(), app.cache.clone()));
        let floors_routes = protect(floors::routes(pool.clone(), app.cache.clone()));
        let rooms_routes = protect(rooms::routes(pool.clone(), app.cache.clone()));
        let room_types_routes = protect(room_types::routes(pool.clone(), app.cache.clone()));
        let hotel_settings_routes =
            protect(hotel_settings::routes(pool.clone(), app.cache.clone()));
        let hotel_informations_routes =
            protect(hotel_informations::routes(pool.clone(), app.cache.clone()));
        let permissions_routes = protect(permissions::routes(pool.clone(), app.cache.clone()));
        let roles_routes = protect(roles::routes(pool.clone(), app.cache.clone()));
        let users_routes = protect(users::routes(pool.clone()));

        let router = Router::new()
            .route("/api/openapi.json", get(openapi_json))
            .nest(
                "/api/v1/health",
                health::routes(app.database.clone(), app.cache.clone()),
            )
            .nest("/api/v1/auth", auth_routes)
            .nest("/api/v1/hotels", hotels_routes)
            .nest("/api/v1/floors", floors_routes)
            .nest("/api/v1/rooms", rooms_routes)
            .nest("/api/v1/room-types", room_types_routes)
            .nest("/api/v1/hotel-settings", hotel_settings_routes)
            .nest("/api/v1/hotel-informations", hotel_informations_routes)
            .nest("/api/v1/permissions", permissions_routes)
            .nest("/api/v1/roles", roles_routes)
            .nest("/api/v1/users", users_routes)
            .fallback(middleware::handle_404)
            .layer(CompressionLayer::new())
            .layer(middleware::cors(&allowed_origins))
            .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT));

        tracing::info!("Listening on http://{}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
