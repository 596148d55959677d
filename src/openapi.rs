//! OpenAPI document and Swagger UI wiring.
//!
//! Each route module annotates its handlers with `#[utoipa::path]` and
//! derives `ToSchema` on its DTOs; this module aggregates them into one
//! document. The UI is mounted by `main` only when enabled in config.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::routes::authors::{AuthorDto, CreateAuthorDto, UpdateAuthorDto};
use crate::routes::common::{HealthBody, ReadyBody, VersionBody};
use crate::routes::fruits::FruitDto;
use crate::routes::quotes::{CreateQuoteDto, QuoteDto, UpdateQuoteDto};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quotery API",
        description = "CRUD service for quotes, their authors, and a small fruit playground.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Quotery Team", url = "https://github.com/kaushik-xs/quotery")
    ),
    tags(
        (name = "health", description = "Service health and version"),
        (name = "authors", description = "Author CRUD"),
        (name = "quotes", description = "Quote CRUD"),
        (name = "fruits", description = "Fruit CRUD (in-memory)")
    ),
    components(
        schemas(
            HealthBody,
            ReadyBody,
            VersionBody,
            AuthorDto,
            CreateAuthorDto,
            UpdateAuthorDto,
            QuoteDto,
            CreateQuoteDto,
            UpdateQuoteDto,
            FruitDto,
        )
    ),
    paths(
        crate::routes::common::health,
        crate::routes::common::ready,
        crate::routes::common::version,
        crate::routes::authors::get_all,
        crate::routes::authors::get_one,
        crate::routes::authors::create,
        crate::routes::authors::update,
        crate::routes::authors::delete,
        crate::routes::quotes::get_all,
        crate::routes::quotes::get_random,
        crate::routes::quotes::get_one,
        crate::routes::quotes::create,
        crate::routes::quotes::update,
        crate::routes::quotes::delete,
        crate::routes::fruits::get_random,
        crate::routes::fruits::get_one,
        crate::routes::fruits::create,
        crate::routes::fruits::update,
        crate::routes::fruits::delete,
    )
)]
pub struct ApiDoc;

/// Swagger UI router serving the interactive docs at `path` and the raw
/// document at `<path>/openapi.json`.
pub fn swagger_routes(path: &str) -> Router {
    let spec_url = format!("{}/openapi.json", path.trim_end_matches('/'));
    SwaggerUi::new(path.to_string())
        .url(spec_url, ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_contains_all_entity_paths() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        for path in [
            "/health",
            "/ready",
            "/version",
            "/authors",
            "/authors/{id}",
            "/quotes",
            "/quotes/random",
            "/quotes/{id}",
            "/fruits/random",
            "/fruits/{id}",
        ] {
            assert!(json.contains(&format!("\"{}\"", path)), "missing {}", path);
        }
    }

    #[test]
    fn document_contains_dto_schemas() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        for schema in ["AuthorDto", "CreateQuoteDto", "FruitDto"] {
            assert!(json.contains(schema), "missing {}", schema);
        }
    }

    #[test]
    fn swagger_router_builds() {
        let _router: Router = swagger_routes("/docs");
    }
}
