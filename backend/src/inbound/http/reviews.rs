//! Review handlers.
//!
//! ```text
//! POST   /api/v1/reviews/recipe/{recipeId}  Review a public recipe (session required)
//! GET    /api/v1/reviews/recipe/{recipeId}  List a recipe's reviews with the rating aggregate
//! GET    /api/v1/reviews                    List reviews on public recipes
//! GET    /api/v1/reviews/mine               List the requester's reviews
//! GET    /api/v1/reviews/{id}               Fetch one review per visibility rules
//! PUT    /api/v1/reviews/{id}               Merge-update; author only
//! DELETE /api/v1/reviews/{id}               Delete; author only
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::reviews::ReviewInput;
use crate::domain::views::ReviewView;
use crate::domain::ReviewPatch;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;
use crate::inbound::http::ApiResult;

/// Review creation body. Reviewer and recipe come from session and path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Serialize)]
struct ReviewResponse {
    message: &'static str,
    review: ReviewView,
}

#[derive(Debug, Serialize)]
struct ReviewListResponse {
    count: usize,
    reviews: Vec<ReviewView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecipeReviewsResponse {
    recipe_id: Uuid,
    average_rating: f64,
    count: usize,
    reviews: Vec<ReviewView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewDeletedResponse {
    message: &'static str,
    deleted_review_id: Uuid,
}

#[post("/reviews/recipe/{recipeId}")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Json<ReviewRequest>,
) -> ApiResult<HttpResponse> {
    let recipe_id = parse_uuid(&path.into_inner(), "recipeId")?;
    let identity = session.identity()?;
    let body = body.into_inner();
    let review = state
        .reviews
        .create(
            identity,
            recipe_id,
            ReviewInput {
                rating: body.rating,
                comment: body.comment,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(ReviewResponse {
        message: "Review created successfully",
        review,
    }))
}

#[get("/reviews/recipe/{recipeId}")]
pub async fn list_for_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let recipe_id = parse_uuid(&path.into_inner(), "recipeId")?;
    let identity = session.identity()?;
    let listing = state.reviews.list_for_recipe(identity, recipe_id).await?;
    Ok(HttpResponse::Ok().json(RecipeReviewsResponse {
        recipe_id: listing.recipe_id,
        average_rating: listing.summary.average_rating,
        count: listing.summary.count,
        reviews: listing.reviews,
    }))
}

#[get("/reviews")]
pub async fn list_public(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let reviews = state.reviews.list_public().await?;
    Ok(HttpResponse::Ok().json(ReviewListResponse {
        count: reviews.len(),
        reviews,
    }))
}

#[get("/reviews/mine")]
pub async fn list_mine(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    let reviews = state.reviews.list_mine(identity).await?;
    Ok(HttpResponse::Ok().json(ReviewListResponse {
        count: reviews.len(),
        reviews,
    }))
}

#[get("/reviews/{id}")]
pub async fn get(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(&path.into_inner(), "id")?;
    let identity = session.identity()?;
    let review = state.reviews.get(identity, id).await?;
    Ok(HttpResponse::Ok().json(ReviewResponse {
        message: "Review retrieved successfully",
        review,
    }))
}

#[put("/reviews/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Json<ReviewPatch>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(&path.into_inner(), "id")?;
    let identity = session.identity()?;
    let review = state
        .reviews
        .update(identity, id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ReviewResponse {
        message: "Review updated successfully",
        review,
    }))
}

#[delete("/reviews/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(&path.into_inner(), "id")?;
    let identity = session.identity()?;
    let deleted_review_id = state.reviews.delete(identity, id).await?;
    Ok(HttpResponse::Ok().json(ReviewDeletedResponse {
        message: "Review deleted successfully",
        deleted_review_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{login_as, test_session_middleware, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use serde_json::{json, Value};

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(test_state()))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(crate::inbound::http::auth::login_complete)
                    .service(crate::inbound::http::recipes::create)
                    .service(crate::inbound::http::recipes::remove)
                    .service(create)
                    .service(list_for_recipe)
                    .service(list_mine)
                    .service(list_public)
                    .service(get)
                    .service(update)
                    .service(remove),
            )
    }

    async fn create_recipe(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        cookie: &actix_web::cookie::Cookie<'static>,
        is_public: bool,
    ) -> Uuid {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/recipes")
                .cookie(cookie.clone())
                .set_json(json!({
                    "title": "Ramen",
                    "ingredients": [{ "name": "Noodles", "quantity": "200 g" }],
                    "instructions": ["Boil."],
                    "isPublic": is_public,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        body["recipe"]["id"]
            .as_str()
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .expect("recipe id")
    }

    async fn post_review(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        cookie: &actix_web::cookie::Cookie<'static>,
        recipe_id: Uuid,
        rating: u8,
    ) -> actix_web::dev::ServiceResponse {
        actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/reviews/recipe/{recipe_id}"))
                .cookie(cookie.clone())
                .set_json(json!({ "rating": rating, "comment": "Slurp." }))
                .to_request(),
        )
        .await
    }

    #[actix_web::test]
    async fn anonymous_review_is_unauthorised() {
        let app = actix_test::init_service(test_app()).await;
        let (cookie, _) = login_as(&app, "google-v1", "Ada").await;
        let recipe_id = create_recipe(&app, &cookie, true).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/reviews/recipe/{recipe_id}"))
                .set_json(json!({ "rating": 5, "comment": "Slurp." }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn reviewing_a_private_recipe_is_forbidden() {
        let app = actix_test::init_service(test_app()).await;
        let (owner, _) = login_as(&app, "google-v2", "Ada").await;
        let recipe_id = create_recipe(&app, &owner, false).await;

        let response = post_review(&app, &owner, recipe_id, 5).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"], "Cannot review a private recipe");
    }

    #[actix_web::test]
    async fn second_review_by_same_user_conflicts() {
        let app = actix_test::init_service(test_app()).await;
        let (owner, _) = login_as(&app, "google-v3", "Ada").await;
        let recipe_id = create_recipe(&app, &owner, true).await;
        let (reviewer, _) = login_as(&app, "google-v4", "Eve").await;

        let first = post_review(&app, &reviewer, recipe_id, 5).await;
        assert_eq!(first.status(), StatusCode::CREATED);
        let second = post_review(&app, &reviewer, recipe_id, 3).await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(second).await;
        assert_eq!(body["error"], "You have already reviewed this recipe");
    }

    #[actix_web::test]
    async fn listing_reports_the_rounded_average() {
        let app = actix_test::init_service(test_app()).await;
        let (owner, _) = login_as(&app, "google-v5", "Ada").await;
        let recipe_id = create_recipe(&app, &owner, true).await;
        let (alice, _) = login_as(&app, "google-v6", "Alice").await;
        let (bob, _) = login_as(&app, "google-v7", "Bob").await;

        assert_eq!(
            post_review(&app, &alice, recipe_id, 5).await.status(),
            StatusCode::CREATED
        );
        assert_eq!(
            post_review(&app, &bob, recipe_id, 4).await.status(),
            StatusCode::CREATED
        );

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/reviews/recipe/{recipe_id}"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["recipeId"], recipe_id.to_string());
        assert_eq!(body["count"], 2);
        assert_eq!(body["averageRating"], 4.5);
    }

    #[actix_web::test]
    async fn empty_listing_reports_zero_average() {
        let app = actix_test::init_service(test_app()).await;
        let (owner, _) = login_as(&app, "google-v8", "Ada").await;
        let recipe_id = create_recipe(&app, &owner, true).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/reviews/recipe/{recipe_id}"))
                .to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["count"], 0);
        assert_eq!(body["averageRating"], 0.0);
    }

    #[actix_web::test]
    async fn deleting_a_recipe_cascades_to_its_reviews() {
        let app = actix_test::init_service(test_app()).await;
        let (owner, _) = login_as(&app, "google-v9", "Ada").await;
        let recipe_id = create_recipe(&app, &owner, true).await;
        let (reviewer, _) = login_as(&app, "google-v10", "Eve").await;
        assert_eq!(
            post_review(&app, &reviewer, recipe_id, 4).await.status(),
            StatusCode::CREATED
        );

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/recipes/{recipe_id}"))
                .cookie(owner)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/reviews/mine")
                .cookie(reviewer)
                .to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["count"], 0);
    }

    #[actix_web::test]
    async fn update_by_another_user_is_forbidden() {
        let app = actix_test::init_service(test_app()).await;
        let (owner, _) = login_as(&app, "google-v11", "Ada").await;
        let recipe_id = create_recipe(&app, &owner, true).await;
        let (reviewer, _) = login_as(&app, "google-v12", "Eve").await;
        let created = post_review(&app, &reviewer, recipe_id, 4).await;
        let body: Value = actix_test::read_body_json(created).await;
        let review_id = body["review"]["id"].as_str().expect("review id").to_owned();

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/v1/reviews/{review_id}"))
                .cookie(owner)
                .set_json(json!({ "rating": 1 }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn author_can_update_their_review() {
        let app = actix_test::init_service(test_app()).await;
        let (owner, _) = login_as(&app, "google-v13", "Ada").await;
        let recipe_id = create_recipe(&app, &owner, true).await;
        let (reviewer, _) = login_as(&app, "google-v14", "Eve").await;
        let created = post_review(&app, &reviewer, recipe_id, 4).await;
        let body: Value = actix_test::read_body_json(created).await;
        let review_id = body["review"]["id"].as_str().expect("review id").to_owned();

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/v1/reviews/{review_id}"))
                .cookie(reviewer)
                .set_json(json!({ "rating": 2 }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["review"]["rating"], 2);
        assert_eq!(body["review"]["comment"], "Slurp.");
    }

    #[actix_web::test]
    async fn public_review_listing_is_anonymous_accessible() {
        let app = actix_test::init_service(test_app()).await;
        let (owner, _) = login_as(&app, "google-v15", "Ada").await;
        let recipe_id = create_recipe(&app, &owner, true).await;
        let (reviewer, _) = login_as(&app, "google-v16", "Eve").await;
        assert_eq!(
            post_review(&app, &reviewer, recipe_id, 5).await.status(),
            StatusCode::CREATED
        );

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/reviews")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["count"], 1);
    }
}
