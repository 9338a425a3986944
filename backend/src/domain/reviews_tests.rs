//! Tests for the review lifecycle service.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockRecipeRepository, MockReviewRepository, MockUserRepository};
use crate::domain::{ErrorCode, Ingredient, Recipe, User};

fn sample_user(id: Uuid) -> User {
    User {
        id,
        oauth_id: "google-456".to_owned(),
        display_name: "Grace Hopper".to_owned(),
        first_name: None,
        last_name: None,
        email: None,
        profile_image_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn stored_recipe(creator_id: Uuid, is_public: bool) -> Recipe {
    Recipe {
        id: Uuid::new_v4(),
        creator_id,
        title: "Pho".to_owned(),
        description: None,
        ingredients: vec![Ingredient {
            name: "Broth".to_owned(),
            quantity: "2 l".to_owned(),
        }],
        instructions: vec!["Simmer.".to_owned()],
        prep_time_minutes: None,
        cook_time_minutes: None,
        servings: None,
        is_public,
        tags: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn stored_review(reviewer_id: Uuid, recipe_id: Uuid, rating: u8) -> Review {
    Review {
        id: Uuid::new_v4(),
        reviewer_id,
        recipe_id,
        rating,
        comment: "Restorative.".to_owned(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_input() -> ReviewInput {
    ReviewInput {
        rating: 5,
        comment: "Restorative.".to_owned(),
    }
}

fn service(
    reviews: MockReviewRepository,
    recipes: MockRecipeRepository,
    users: MockUserRepository,
) -> ReviewService {
    ReviewService::new(
        Arc::new(reviews),
        Arc::new(recipes),
        Arc::new(users),
        VisibilityPolicy::default(),
    )
}

#[tokio::test]
async fn create_on_missing_recipe_is_not_found() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    let mut reviews = MockReviewRepository::new();
    reviews.expect_create().times(0);

    let service = service(reviews, recipes, MockUserRepository::new());
    let error = service
        .create(Identity::User(Uuid::new_v4()), Uuid::new_v4(), sample_input())
        .await
        .expect_err("missing recipe");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.error(), "Recipe not found");
}

#[tokio::test]
async fn creator_cannot_review_their_own_private_recipe() {
    let creator_id = Uuid::new_v4();
    let recipe = stored_recipe(creator_id, false);
    let recipe_id = recipe.id;

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(recipe)));
    let mut reviews = MockReviewRepository::new();
    reviews.expect_create().times(0);

    let service = service(reviews, recipes, MockUserRepository::new());
    let error = service
        .create(Identity::User(creator_id), recipe_id, sample_input())
        .await
        .expect_err("private recipe");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.error(), "Cannot review a private recipe");
}

#[tokio::test]
async fn second_review_for_same_recipe_is_conflict() {
    let reviewer_id = Uuid::new_v4();
    let recipe = stored_recipe(Uuid::new_v4(), true);
    let recipe_id = recipe.id;
    let existing = stored_review(reviewer_id, recipe_id, 4);

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(recipe)));
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_reviewer_and_recipe()
        .times(1)
        .return_once(move |_, _| Ok(Some(existing)));
    reviews.expect_create().times(0);

    let service = service(reviews, recipes, MockUserRepository::new());
    let error = service
        .create(Identity::User(reviewer_id), recipe_id, sample_input())
        .await
        .expect_err("duplicate review");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.error(), "You have already reviewed this recipe");
}

#[tokio::test]
async fn racing_duplicate_from_store_maps_to_conflict() {
    let reviewer_id = Uuid::new_v4();
    let recipe = stored_recipe(Uuid::new_v4(), true);
    let recipe_id = recipe.id;

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(recipe)));
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_reviewer_and_recipe()
        .times(1)
        .return_once(|_, _| Ok(None));
    reviews
        .expect_create()
        .times(1)
        .return_once(move |_| Err(ReviewRepositoryError::duplicate(reviewer_id, recipe_id)));

    let service = service(reviews, recipes, MockUserRepository::new());
    let error = service
        .create(Identity::User(reviewer_id), recipe_id, sample_input())
        .await
        .expect_err("lost the race");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn create_persists_and_populates_reviewer_and_recipe() {
    let reviewer_id = Uuid::new_v4();
    let recipe = stored_recipe(Uuid::new_v4(), true);
    let recipe_id = recipe.id;
    let stored = stored_review(reviewer_id, recipe_id, 5);
    let stored_id = stored.id;

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .times(2)
        .returning(move |_| Ok(Some(recipe.clone())));
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_reviewer_and_recipe()
        .times(1)
        .return_once(|_, _| Ok(None));
    reviews
        .expect_create()
        .times(1)
        .return_once(move |_| Ok(stored));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(sample_user(reviewer_id))));

    let service = service(reviews, recipes, users);
    let view = service
        .create(Identity::User(reviewer_id), recipe_id, sample_input())
        .await
        .expect("create succeeds");

    assert_eq!(view.id, stored_id);
    assert_eq!(
        view.reviewer.as_ref().map(|reviewer| reviewer.id),
        Some(reviewer_id)
    );
    assert_eq!(view.recipe.as_ref().map(|recipe| recipe.id), Some(recipe_id));
}

#[tokio::test]
async fn create_rejects_out_of_range_rating_without_store_write() {
    let recipe = stored_recipe(Uuid::new_v4(), true);
    let recipe_id = recipe.id;

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(recipe)));
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_by_reviewer_and_recipe().times(0);
    reviews.expect_create().times(0);

    let service = service(reviews, recipes, MockUserRepository::new());
    let error = service
        .create(
            Identity::User(Uuid::new_v4()),
            recipe_id,
            ReviewInput {
                rating: 6,
                comment: "Too good.".to_owned(),
            },
        )
        .await
        .expect_err("rating out of range");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn list_for_recipe_reports_rounded_average() {
    let recipe = stored_recipe(Uuid::new_v4(), true);
    let recipe_id = recipe.id;
    let newest = stored_review(Uuid::new_v4(), recipe_id, 5);
    let oldest = stored_review(Uuid::new_v4(), recipe_id, 4);
    let newest_id = newest.id;

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .returning(move |_| Ok(Some(recipe.clone())));
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_list()
        .times(1)
        .return_once(move |_, _| Ok(vec![newest, oldest]));
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let service = service(reviews, recipes, users);
    let listing = service
        .list_for_recipe(Identity::Anonymous, recipe_id)
        .await
        .expect("listing succeeds");

    assert_eq!(listing.recipe_id, recipe_id);
    assert_eq!(listing.summary.count, 2);
    assert_eq!(listing.summary.average_rating, 4.5);
    assert_eq!(listing.reviews.len(), 2);
    assert_eq!(listing.reviews[0].id, newest_id);
}

#[tokio::test]
async fn listing_reviews_of_private_recipe_is_forbidden_for_strangers() {
    let recipe = stored_recipe(Uuid::new_v4(), false);
    let recipe_id = recipe.id;

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(recipe)));
    let mut reviews = MockReviewRepository::new();
    reviews.expect_list().times(0);

    let service = service(reviews, recipes, MockUserRepository::new());
    let error = service
        .list_for_recipe(Identity::User(Uuid::new_v4()), recipe_id)
        .await
        .expect_err("private recipe");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn orphaned_review_is_visible_to_its_author_only() {
    let author_id = Uuid::new_v4();
    let review = stored_review(author_id, Uuid::new_v4(), 3);
    let review_id = review.id;

    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_id()
        .returning(move |_| Ok(Some(review.clone())));
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_find_by_id().returning(|_| Ok(None));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(sample_user(author_id))));

    let service = service(reviews, recipes, users);
    let view = service
        .get(Identity::User(author_id), review_id)
        .await
        .expect("author read succeeds");
    assert!(view.recipe.is_none());

    let error = service
        .get(Identity::User(Uuid::new_v4()), review_id)
        .await
        .expect_err("stranger read");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn update_by_non_author_is_forbidden_without_store_write() {
    let review = stored_review(Uuid::new_v4(), Uuid::new_v4(), 4);
    let review_id = review.id;

    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(review)));
    reviews.expect_update().times(0);

    let service = service(reviews, MockRecipeRepository::new(), MockUserRepository::new());
    let error = service
        .update(Identity::User(Uuid::new_v4()), review_id, ReviewPatch::default())
        .await
        .expect_err("not the author");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(
        error.error(),
        "Access denied. You can only update your own reviews."
    );
}

#[tokio::test]
async fn delete_by_author_returns_the_deleted_id() {
    let author_id = Uuid::new_v4();
    let review = stored_review(author_id, Uuid::new_v4(), 2);
    let review_id = review.id;

    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(review)));
    reviews
        .expect_delete()
        .times(1)
        .return_once(|_| Ok(true));

    let service = service(reviews, MockRecipeRepository::new(), MockUserRepository::new());
    let deleted = service
        .delete(Identity::User(author_id), review_id)
        .await
        .expect("delete succeeds");

    assert_eq!(deleted, review_id);
}

#[tokio::test]
async fn list_mine_requires_authentication() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_list().times(0);

    let service = service(reviews, MockRecipeRepository::new(), MockUserRepository::new());
    let error = service
        .list_mine(Identity::Anonymous)
        .await
        .expect_err("anonymous listing");

    assert_eq!(error.code(), ErrorCode::Unauthenticated);
}
