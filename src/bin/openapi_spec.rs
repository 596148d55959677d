//! Print the OpenAPI document as JSON (for committing a spec file or feeding
//! client generators).

use quotery::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(&ApiDoc::openapi())?);
    Ok(())
}
