use axum::{
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::{bearer_auth_middleware, cors_middleware, request_logging_layer};
use crate::state::AppState;

/// Build the full application router.
///
/// Layer order, outermost first: request logging, CORS (answers every `OPTIONS`),
/// then routing. Protected routes additionally run the bearer-token gate.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(handlers::health))
        // Protected
        .merge(protected_routes(state.clone()))
        .fallback(handlers::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(request_logging_layer())
                .layer(middleware::from_fn(cors_middleware)),
        )
        .with_state(state)
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::*;

    Router::new()
        .route("/me", get(me_get))
        .route("/notes", get(notes_get).post(notes_post))
        .route(
            "/notes/*name",
            get(note_get).put(note_put).delete(note_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}
