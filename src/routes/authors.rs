//! Author CRUD handlers and DTOs.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{author::validate_name, Author, AuthorId};
use crate::error::AppError;
use crate::repository::AuthorRepository;
use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    /// The ID of the author.
    #[schema(example = 42)]
    pub id: i32,
    /// The first name of the author.
    #[schema(example = "Peter")]
    pub first_name: String,
    /// The last name of the author.
    #[schema(example = "Pan")]
    pub last_name: String,
    /// The time when the author was created.
    pub created_at: DateTime<Utc>,
    /// The time when the author was last updated.
    pub updated_at: DateTime<Utc>,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        AuthorDto {
            id: author.id().get(),
            first_name: author.first_name().to_string(),
            last_name: author.last_name().to_string(),
            created_at: author.created_at(),
            updated_at: author.updated_at(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorDto {
    /// The first name of the author.
    #[schema(example = "Peter")]
    pub first_name: String,
    /// The last name of the author.
    #[schema(example = "Pan")]
    pub last_name: String,
}

impl CreateAuthorDto {
    fn validate(&self) -> Result<(), AppError> {
        validate_name("first name", &self.first_name)?;
        validate_name("last name", &self.last_name)
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorDto {
    /// The ID of the author.
    #[schema(example = 42)]
    pub id: i32,
    /// The first name of the author.
    pub first_name: String,
    /// The last name of the author.
    pub last_name: String,
}

impl UpdateAuthorDto {
    fn validate(&self) -> Result<(), AppError> {
        validate_name("first name", &self.first_name)?;
        validate_name("last name", &self.last_name)
    }
}

fn parse_id(id: i32) -> Result<AuthorId, AppError> {
    AuthorId::new(id).map_err(|_| AppError::BadRequest("id must be a positive integer".into()))
}

#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses((status = 200, description = "All authors.", body = [AuthorDto]))
)]
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<AuthorDto>>, AppError> {
    let authors = AuthorRepository::new(state.pool.clone()).get_all().await?;
    Ok(Json(authors.into_iter().map(AuthorDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author id", example = 42)),
    responses(
        (status = 200, description = "The author with the given id.", body = AuthorDto),
        (status = 400, description = "The id was malformed."),
        (status = 404, description = "No author with the given id exists.")
    )
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AuthorDto>, AppError> {
    let id = parse_id(id)?;
    let author = AuthorRepository::new(state.pool.clone()).get(id).await?;
    Ok(Json(author.into()))
}

#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthorDto,
    responses(
        (status = 201, description = "The author was created.", body = AuthorDto),
        (status = 422, description = "The payload did not pass validation.")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<CreateAuthorDto>,
) -> Result<(StatusCode, Json<AuthorDto>), AppError> {
    dto.validate()?;
    let author = AuthorRepository::new(state.pool.clone())
        .create(&dto.first_name, &dto.last_name)
        .await?;
    Ok((StatusCode::CREATED, Json(author.into())))
}

#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author id", example = 42)),
    request_body = UpdateAuthorDto,
    responses(
        (status = 200, description = "The author was updated.", body = AuthorDto),
        (status = 400, description = "The id in the payload does not match the id in the route."),
        (status = 404, description = "No author with the given id exists."),
        (status = 422, description = "The payload did not pass validation.")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateAuthorDto>,
) -> Result<Json<AuthorDto>, AppError> {
    let id = parse_id(id)?;
    if id.get() != dto.id {
        return Err(AppError::BadRequest(
            "the id in the payload does not match the id in the route".into(),
        ));
    }
    dto.validate()?;
    let author = AuthorRepository::new(state.pool.clone())
        .update(id, &dto.first_name, &dto.last_name)
        .await?;
    Ok(Json(author.into()))
}

#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author id", example = 42)),
    responses(
        (status = 204, description = "The author was deleted."),
        (status = 404, description = "No author with the given id exists."),
        (status = 409, description = "The author still has quotes assigned.")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(id)?;
    AuthorRepository::new(state.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn author_routes(state: AppState) -> Router {
    Router::new()
        .route("/authors", get(get_all).post(create))
        .route("/authors/:id", get(get_one).put(update).delete(delete))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dto_with_empty_first_name_fails_validation() {
        let dto = CreateAuthorDto {
            first_name: "".into(),
            last_name: "Pan".into(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn create_dto_with_both_names_passes_validation() {
        let dto = CreateAuthorDto {
            first_name: "Peter".into(),
            last_name: "Pan".into(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn author_maps_to_dto() {
        let now = "2020-01-01T06:15:00Z".parse().unwrap();
        let author = Author::new(
            AuthorId::new(42).unwrap(),
            "Peter".into(),
            "Pan".into(),
            now,
            now,
        )
        .unwrap();
        let dto = AuthorDto::from(author);
        assert_eq!(dto.id, 42);
        assert_eq!(dto.first_name, "Peter");
        assert_eq!(dto.last_name, "Pan");
    }

    #[test]
    fn dto_serializes_camel_case() {
        let now = "2020-01-01T06:15:00Z".parse().unwrap();
        let author = Author::new(
            AuthorId::new(1).unwrap(),
            "Peter".into(),
            "Pan".into(),
            now,
            now,
        )
        .unwrap();
        let json = serde_json::to_value(AuthorDto::from(author)).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
