use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_book::create_book;
use super::handlers::delete_book::delete_book;
use super::handlers::get_book::get_book_by_isbn;
use super::handlers::get_book::get_book_by_title;
use super::handlers::health_check::health_check;
use super::handlers::list_books::list_books;
use super::handlers::list_books::list_books_by_author;
use super::handlers::list_books::list_books_by_publisher;
use super::handlers::list_books::list_books_by_year;
use super::handlers::list_books::list_famous_books;
use super::handlers::login::login;
use super::handlers::signup::signup;
use super::handlers::update_book::update_book;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AuthFlowPort;
use crate::domain::book::ports::BookServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_flow: Arc<dyn AuthFlowPort>,
    pub book_service: Arc<dyn BookServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    auth_flow: Arc<dyn AuthFlowPort>,
    book_service: Arc<dyn BookServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        auth_flow,
        book_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/healthchecker", get(health_check))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/api/books/", get(list_books))
        .route("/api/books/bookByIsbn/:isbn", get(get_book_by_isbn))
        .route("/api/books/title/:title", get(get_book_by_title))
        .route("/api/books/author/:author", get(list_books_by_author))
        .route("/api/books/year/:year", get(list_books_by_year))
        .route("/api/books/publisher/:publisher", get(list_books_by_publisher))
        .route("/api/books/famous/", get(list_famous_books));

    let protected_routes = Router::new()
        .route("/api/books/", post(create_book))
        .route("/api/books/:isbn", put(update_book).delete(delete_book))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers are left out: they carry bearer tokens
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
