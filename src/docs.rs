// src/docs.rs

use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

use crate::{handlers, models};

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Fornecedores ---
        handlers::suppliers::create_supplier,
        handlers::suppliers::create_bare_supplier,
        handlers::suppliers::list_suppliers,
        handlers::suppliers::get_supplier,
        handlers::suppliers::replace_supplier,
        handlers::suppliers::patch_supplier,
        handlers::suppliers::delete_supplier,
    ),
    components(
        schemas(
            models::supplier::SupplierResponse,
            models::supplier::SupplierPage,

            // --- Payloads ---
            models::supplier::SupplierPayload,
            models::supplier::SupplierPatchPayload,
        )
    ),
    tags(
        (name = "Fornecedores", description = "Cadastro de Fornecedores da Entidade")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

// Registra o esquema Bearer referenciado por `security(("api_jwt" = []))` nos handlers.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
    }
}
