//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog CRUD with pagination and validation",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_paths_are_nested() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for expected in [
            "/api/products",
            "/api/products/{id}",
            "/api/products/{id}/update",
            "/api/products/{id}/delete",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_product_schemas_registered() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        assert!(schemas.contains_key("ProductDto"));
    }

    #[test]
    fn test_product_operations_document_pool_timeout() {
        let doc = ApiDoc::openapi();
        let list = doc.paths.paths["/api/products"]
            .get
            .as_ref()
            .expect("list operation");
        assert!(list.responses.responses.contains_key("503"));
        assert!(list.responses.responses.contains_key("500"));
    }
}
