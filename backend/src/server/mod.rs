//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};

use crate::domain::{
    CookbookService, RecipeService, ReviewService, UserService, VisibilityPolicy,
};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, cookbooks, recipes, reviews, users};
use crate::middleware::Trace;
use crate::outbound::persistence::MemoryStore;

/// Wire every domain service over one shared entity store.
pub fn build_http_state(store: Arc<MemoryStore>, policy: VisibilityPolicy) -> HttpState {
    HttpState::new(
        UserService::new(store.clone(), store.clone(), policy),
        RecipeService::new(store.clone(), store.clone(), store.clone(), policy),
        CookbookService::new(store.clone(), store.clone(), store.clone(), policy),
        ReviewService::new(store.clone(), store.clone(), store, policy),
    )
}

/// Assemble the application: session middleware, trace middleware, health
/// probes, and the versioned API scope.
///
/// `/recipes/mine`, `/reviews/recipe/{recipeId}`, and `/reviews/mine` are
/// registered before their `{id}` siblings so the literal segments win
/// route matching.
pub fn build_app(
    state: HttpState,
    health_state: web::Data<HealthState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(auth::login_complete)
        .service(auth::logout)
        .service(auth::status)
        .service(recipes::create)
        .service(recipes::list_mine)
        .service(recipes::list_public)
        .service(recipes::get)
        .service(recipes::update)
        .service(recipes::remove)
        .service(cookbooks::create)
        .service(cookbooks::list_mine)
        .service(cookbooks::get)
        .service(cookbooks::update)
        .service(cookbooks::remove)
        .service(reviews::create)
        .service(reviews::list_for_recipe)
        .service(reviews::list_mine)
        .service(reviews::list_public)
        .service(reviews::get)
        .service(reviews::update)
        .service(reviews::remove)
        .service(users::me)
        .service(users::update)
        .service(users::remove)
        .service(users::public_recipes);

    App::new()
        .app_data(web::Data::new(state))
        .app_data(health_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
}

/// Bind and run the HTTP server.
pub fn run(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        public_cookbook_reads,
    } = config;

    let store = Arc::new(MemoryStore::new());
    let policy = VisibilityPolicy::new(public_cookbook_reads);
    let state = build_http_state(store, policy);

    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(
            state.clone(),
            server_health_state.clone(),
            key.clone(),
            cookie_secure,
            same_site,
        )
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
