use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{MethodRouter, delete, get, post, put},
};

use crate::presentation::{
    handlers::{self, AppState, method_not_allowed},
    middleware::{RequestLoggingConfig, logging_middleware, recovery_layer, require_session},
};

/// Create all API routes with application state.
///
/// Catalog routes run `recovery(logging(auth(handler)))`; the auth routes
/// skip the session gate.
pub fn create_routes(state: AppState, logging: RequestLoggingConfig) -> Router {
    let protected = with_session_gate(catalog_routes(), &state);
    assemble(protected, auth_routes(), logging).with_state(state)
}

fn with_session_gate(routes: Router<AppState>, state: &AppState) -> Router<AppState> {
    routes.route_layer(from_fn_with_state(state.clone(), require_session))
}

fn assemble(
    protected: Router<AppState>,
    public: Router<AppState>,
    logging: RequestLoggingConfig,
) -> Router<AppState> {
    Router::new()
        .merge(protected)
        .merge(public)
        .layer(from_fn(logging_middleware(logging)))
        .layer(recovery_layer())
}

/// Wrong methods on a known path answer with a 405 envelope
fn only(method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
    method_router.fallback(method_not_allowed)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/sign-up", only(post(handlers::auth::sign_up)))
        .route("/api/auth/login", only(post(handlers::auth::login)))
        .route("/api/auth/logout", only(delete(handlers::auth::logout)))
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/films", only(get(handlers::film::get_all_films)))
        .route(
            "/api/films/{id}",
            only(get(handlers::film::get_film).delete(handlers::film::delete_film)),
        )
        .route("/api/create_films", only(post(handlers::film::create_film)))
        .route("/api/update_films", only(put(handlers::film::update_film)))
        .route("/api/update_films_actors/{id}", only(post(handlers::film::update_film_actors)))
        .route("/api/search_films/{pattern}", only(get(handlers::film::search_films)))
        .route("/api/actors", only(get(handlers::actor::get_all_actors)))
        .route(
            "/api/actors/{id}",
            only(get(handlers::actor::get_actor).delete(handlers::actor::delete_actor)),
        )
        .route("/api/create_actors", only(post(handlers::actor::create_actor)))
        .route("/api/update_actors", only(put(handlers::actor::update_actor)))
}
