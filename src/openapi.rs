//! OpenAPI 3.0 documentation assembly
//!
//! Aggregates all handler path annotations and domain schemas into a single
//! OpenAPI specification served next to the Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Catalog browsing, order retrieval and role-based access control"
    ),
    tags(
        (name = "System", description = "Health checks and system status"),
        (name = "Catalog", description = "Products and categories"),
        (name = "Orders", description = "Order retrieval and checkout"),
        (name = "Users", description = "Authenticated user profile"),
    ),
    paths(
        crate::api::health::health,
        crate::api::health::ready,
        crate::api::product::list,
        crate::api::product::get,
        crate::api::product::create,
        crate::api::product::update,
        crate::api::product::delete,
        crate::api::category::list,
        crate::api::order::get,
        crate::api::order::create,
        crate::api::user::me,
    ),
    components(schemas(
        crate::api::health::HealthResponse,
        crate::api::MessageResponse,
        crate::domain::CategoryDto,
        crate::domain::CategoryRef,
        crate::domain::OrderClient,
        crate::domain::OrderDto,
        crate::domain::OrderItemDto,
        crate::domain::OrderItemPayload,
        crate::domain::OrderPayload,
        crate::domain::OrderStatus,
        crate::domain::Payment,
        crate::domain::ProductDto,
        crate::domain::ProductMinDto,
        crate::domain::ProductPayload,
        crate::domain::Role,
        crate::domain::UserDto,
    )),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_has_paths() {
        let spec = ApiDoc::openapi();
        assert!(spec.paths.paths.contains_key("/products"));
        assert!(spec.paths.paths.contains_key("/products/{id}"));
        assert!(spec.paths.paths.contains_key("/orders/{id}"));
        assert!(spec.paths.paths.contains_key("/categories"));
        assert!(spec.paths.paths.contains_key("/users/me"));
    }

    #[test]
    fn test_openapi_spec_has_bearer_scheme() {
        let spec = ApiDoc::openapi();
        let components = spec.components.expect("components must be present");
        assert!(components.security_schemes.contains_key("bearer_jwt"));
    }
}
