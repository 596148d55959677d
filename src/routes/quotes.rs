//! Quote CRUD handlers and DTOs.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{quote::validate_text, AuthorId, Quote, QuoteId};
use crate::error::AppError;
use crate::repository::QuoteRepository;
use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDto {
    /// The ID of the quote.
    #[schema(example = 42)]
    pub id: i32,
    /// The text of the quote.
    #[schema(example = "Lorem ipsum dolor sit amet.")]
    pub text: String,
    /// The ID of the author the quote is attributed to.
    #[schema(example = 7)]
    pub author_id: i32,
    /// The time when the quote was created.
    pub created_at: DateTime<Utc>,
    /// The time when the quote was last updated.
    pub updated_at: DateTime<Utc>,
}

impl From<Quote> for QuoteDto {
    fn from(quote: Quote) -> Self {
        QuoteDto {
            id: quote.id().get(),
            text: quote.text().to_string(),
            author_id: quote.author_id().get(),
            created_at: quote.created_at(),
            updated_at: quote.updated_at(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteDto {
    /// The text of the quote.
    #[schema(example = "Lorem ipsum dolor sit amet.")]
    pub text: String,
    /// The ID of the author the quote is attributed to.
    #[schema(example = 7)]
    pub author_id: i32,
}

impl CreateQuoteDto {
    fn validate(&self) -> Result<AuthorId, AppError> {
        validate_text(&self.text)?;
        AuthorId::new(self.author_id)
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuoteDto {
    /// The ID of the quote.
    #[schema(example = 42)]
    pub id: i32,
    /// The text of the quote.
    pub text: String,
    /// The ID of the author the quote is attributed to.
    pub author_id: i32,
}

impl UpdateQuoteDto {
    fn validate(&self) -> Result<AuthorId, AppError> {
        validate_text(&self.text)?;
        AuthorId::new(self.author_id)
    }
}

fn parse_id(id: i32) -> Result<QuoteId, AppError> {
    QuoteId::new(id).map_err(|_| AppError::BadRequest("id must be a positive integer".into()))
}

#[utoipa::path(
    get,
    path = "/quotes",
    tag = "quotes",
    responses((status = 200, description = "All quotes.", body = [QuoteDto]))
)]
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<QuoteDto>>, AppError> {
    let quotes = QuoteRepository::new(state.pool.clone()).get_all().await?;
    Ok(Json(quotes.into_iter().map(QuoteDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/quotes/random",
    tag = "quotes",
    responses(
        (status = 200, description = "A randomly selected quote.", body = QuoteDto),
        (status = 404, description = "No quote exists.")
    )
)]
pub async fn get_random(State(state): State<AppState>) -> Result<Json<QuoteDto>, AppError> {
    let quote = QuoteRepository::new(state.pool.clone())
        .get_random()
        .await?
        .ok_or_else(|| AppError::NotFound("no quotes found".into()))?;
    Ok(Json(quote.into()))
}

#[utoipa::path(
    get,
    path = "/quotes/{id}",
    tag = "quotes",
    params(("id" = i32, Path, description = "Quote id", example = 42)),
    responses(
        (status = 200, description = "The quote with the given id.", body = QuoteDto),
        (status = 400, description = "The id was malformed."),
        (status = 404, description = "No quote with the given id exists.")
    )
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<QuoteDto>, AppError> {
    let id = parse_id(id)?;
    let quote = QuoteRepository::new(state.pool.clone()).get(id).await?;
    Ok(Json(quote.into()))
}

#[utoipa::path(
    post,
    path = "/quotes",
    tag = "quotes",
    request_body = CreateQuoteDto,
    responses(
        (status = 201, description = "The quote was created.", body = QuoteDto),
        (status = 422, description = "The payload did not pass validation.")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<CreateQuoteDto>,
) -> Result<(StatusCode, Json<QuoteDto>), AppError> {
    let author_id = dto.validate()?;
    let quote = QuoteRepository::new(state.pool.clone())
        .create(&dto.text, author_id)
        .await?;
    Ok((StatusCode::CREATED, Json(quote.into())))
}

#[utoipa::path(
    put,
    path = "/quotes/{id}",
    tag = "quotes",
    params(("id" = i32, Path, description = "Quote id", example = 42)),
    request_body = UpdateQuoteDto,
    responses(
        (status = 200, description = "The quote was updated.", body = QuoteDto),
        (status = 400, description = "The id in the payload does not match the id in the route."),
        (status = 404, description = "No quote with the given id exists."),
        (status = 422, description = "The payload did not pass validation.")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateQuoteDto>,
) -> Result<Json<QuoteDto>, AppError> {
    let id = parse_id(id)?;
    if id.get() != dto.id {
        return Err(AppError::BadRequest(
            "the id in the payload does not match the id in the route".into(),
        ));
    }
    let author_id = dto.validate()?;
    let quote = QuoteRepository::new(state.pool.clone())
        .update(id, &dto.text, author_id)
        .await?;
    Ok(Json(quote.into()))
}

#[utoipa::path(
    delete,
    path = "/quotes/{id}",
    tag = "quotes",
    params(("id" = i32, Path, description = "Quote id", example = 42)),
    responses(
        (status = 204, description = "The quote was deleted."),
        (status = 404, description = "No quote with the given id exists.")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(id)?;
    QuoteRepository::new(state.pool.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn quote_routes(state: AppState) -> Router {
    Router::new()
        .route("/quotes", get(get_all).post(create))
        .route("/quotes/random", get(get_random))
        .route("/quotes/:id", get(get_one).put(update).delete(delete))
        .with_state(state)
}
