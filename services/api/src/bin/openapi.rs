//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document for the site's API. The output path is the first
//! argument, `openapi.json` when omitted.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());

    let doc = ApiDoc::openapi();
    std::fs::write(&path, doc.to_pretty_json()?)?;
    println!("Wrote {} paths to {}", doc.paths.paths.len(), path);
    Ok(())
}
