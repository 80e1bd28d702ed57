mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::store::NoteStore;

pub fn create_router(store: NoteStore) -> Router {
    Router::new()
        // Notes
        .route("/notes", get(handlers::list_notes))
        .route("/notes", post(handlers::create_note))
        .route("/notes/{id}", put(handlers::update_note))
        .route("/notes/{id}", delete(handlers::delete_note))
        .route("/notes/{id}/pin", put(handlers::pin_note))
        // Health
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(store)
}
