//! Fruit handlers and DTOs, served from the in-memory store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Fruit, FruitId};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FruitDto {
    /// The ID of the fruit.
    #[schema(example = 1)]
    pub id: i32,
    /// The name of the fruit.
    #[schema(example = "Banana")]
    pub name: String,
    /// How much calories a serving has.
    #[schema(example = 111.0)]
    pub calories: f64,
}

impl From<Fruit> for FruitDto {
    fn from(fruit: Fruit) -> Self {
        FruitDto {
            id: fruit.id().get(),
            name: fruit.name().to_string(),
            calories: fruit.calories(),
        }
    }
}

impl TryFrom<FruitDto> for Fruit {
    type Error = AppError;

    fn try_from(dto: FruitDto) -> Result<Self, Self::Error> {
        Fruit::new(FruitId::new(dto.id)?, dto.name, dto.calories)
    }
}

fn parse_id(id: i32) -> Result<FruitId, AppError> {
    FruitId::new(id).map_err(|_| AppError::BadRequest("id must be a positive integer".into()))
}

#[utoipa::path(
    get,
    path = "/fruits/random",
    tag = "fruits",
    responses(
        (status = 200, description = "A randomly selected fruit.", body = FruitDto),
        (status = 404, description = "No fruit exists.")
    )
)]
pub async fn get_random(State(state): State<AppState>) -> Result<Json<FruitDto>, AppError> {
    let fruit = state
        .fruits
        .get_random()
        .ok_or_else(|| AppError::NotFound("no fruits found".into()))?;
    Ok(Json(fruit.into()))
}

#[utoipa::path(
    get,
    path = "/fruits/{id}",
    tag = "fruits",
    params(("id" = i32, Path, description = "Fruit id", example = 1)),
    responses(
        (status = 200, description = "The fruit with the given id.", body = FruitDto),
        (status = 400, description = "The id was malformed."),
        (status = 404, description = "No fruit with the given id exists.")
    )
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FruitDto>, AppError> {
    let id = parse_id(id)?;
    let fruit = state.fruits.get(id)?;
    Ok(Json(fruit.into()))
}

#[utoipa::path(
    post,
    path = "/fruits",
    tag = "fruits",
    request_body = FruitDto,
    responses(
        (status = 201, description = "The fruit was created.", body = FruitDto),
        (status = 409, description = "A fruit with the given id already exists."),
        (status = 422, description = "The payload did not pass validation.")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<FruitDto>,
) -> Result<(StatusCode, Json<FruitDto>), AppError> {
    let fruit = Fruit::try_from(dto)?;
    let created = state.fruits.create(fruit)?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/fruits/{id}",
    tag = "fruits",
    params(("id" = i32, Path, description = "Fruit id", example = 1)),
    request_body = FruitDto,
    responses(
        (status = 200, description = "The fruit was updated.", body = FruitDto),
        (status = 400, description = "The id in the payload does not match the id in the route."),
        (status = 404, description = "No fruit with the given id exists."),
        (status = 422, description = "The payload did not pass validation.")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(dto): Json<FruitDto>,
) -> Result<Json<FruitDto>, AppError> {
    let id = parse_id(id)?;
    if id.get() != dto.id {
        return Err(AppError::BadRequest(
            "the id in the payload does not match the id in the route".into(),
        ));
    }
    let fruit = Fruit::try_from(dto)?;
    let updated = state.fruits.update(fruit)?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/fruits/{id}",
    tag = "fruits",
    params(("id" = i32, Path, description = "Fruit id", example = 1)),
    responses(
        (status = 204, description = "The fruit was deleted."),
        (status = 404, description = "No fruit with the given id exists.")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(id)?;
    state.fruits.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn fruit_routes(state: AppState) -> Router {
    Router::new()
        .route("/fruits", post(create))
        .route("/fruits/random", get(get_random))
        .route("/fruits/:id", get(get_one).put(update).delete(delete))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dto_round_trips_through_domain() {
        let dto = FruitDto {
            id: 5,
            name: "Apple".into(),
            calories: 95.0,
        };
        let fruit = Fruit::try_from(dto).unwrap();
        let back = FruitDto::from(fruit);
        assert_eq!(back.id, 5);
        assert_eq!(back.name, "Apple");
        assert_eq!(back.calories, 95.0);
    }

    #[test]
    fn dto_with_negative_calories_fails_conversion() {
        let dto = FruitDto {
            id: 5,
            name: "Apple".into(),
            calories: -1.0,
        };
        assert!(Fruit::try_from(dto).is_err());
    }
}
