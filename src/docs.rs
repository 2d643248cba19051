use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{SignupRequest, SignupResponse, TokenRequest, TokenResponse};
use crate::modules::categories::model::{
    Category, CreateCategoryDto, PaginatedCategoriesResponse,
};
use crate::modules::comments::model::{
    Comment, CreateCommentDto, PaginatedCommentsResponse, UpdateCommentDto,
};
use crate::modules::genres::model::{CreateGenreDto, Genre, PaginatedGenresResponse};
use crate::modules::reviews::model::{
    CreateReviewDto, PaginatedReviewsResponse, Review, UpdateReviewDto,
};
use crate::modules::titles::model::{
    CreateTitleDto, PaginatedTitlesResponse, TitleResponse, UpdateTitleDto,
};
use crate::modules::users::model::{
    CreateUserDto, PaginatedUsersResponse, Role, UpdateProfileDto, UpdateUserDto, UserResponse,
};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::exchange_token,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::update_me,
        crate::modules::categories::controller::list_categories,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::genres::controller::list_genres,
        crate::modules::genres::controller::create_genre,
        crate::modules::genres::controller::delete_genre,
        crate::modules::titles::controller::list_titles,
        crate::modules::titles::controller::get_title,
        crate::modules::titles::controller::create_title,
        crate::modules::titles::controller::update_title,
        crate::modules::titles::controller::delete_title,
        crate::modules::reviews::controller::list_reviews,
        crate::modules::reviews::controller::get_review,
        crate::modules::reviews::controller::create_review,
        crate::modules::reviews::controller::update_review,
        crate::modules::reviews::controller::delete_review,
        crate::modules::comments::controller::list_comments,
        crate::modules::comments::controller::get_comment,
        crate::modules::comments::controller::create_comment,
        crate::modules::comments::controller::update_comment,
        crate::modules::comments::controller::delete_comment,
    ),
    components(
        schemas(
            Role,
            UserResponse,
            CreateUserDto,
            UpdateUserDto,
            UpdateProfileDto,
            PaginatedUsersResponse,
            SignupRequest,
            SignupResponse,
            TokenRequest,
            TokenResponse,
            Category,
            CreateCategoryDto,
            PaginatedCategoriesResponse,
            Genre,
            CreateGenreDto,
            PaginatedGenresResponse,
            TitleResponse,
            CreateTitleDto,
            UpdateTitleDto,
            PaginatedTitlesResponse,
            Review,
            CreateReviewDto,
            UpdateReviewDto,
            PaginatedReviewsResponse,
            Comment,
            CreateCommentDto,
            UpdateCommentDto,
            PaginatedCommentsResponse,
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Signup and confirmation-code token exchange"),
        (name = "Users", description = "User administration and self-service profile"),
        (name = "Categories", description = "Title categories"),
        (name = "Genres", description = "Title genres"),
        (name = "Titles", description = "Reviewable works"),
        (name = "Reviews", description = "Per-title reviews with scores"),
        (name = "Comments", description = "Comments on reviews")
    ),
    info(
        title = "Laurel API",
        version = "0.1.0",
        description = "A REST API for cataloguing titles and collecting scored reviews, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
