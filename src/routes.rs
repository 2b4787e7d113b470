// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas de fornecedores (protegidas pelo middleware).
    // `route_layer` para que rota inexistente continue 404, e não 401.
    let supplier_routes = Router::new()
        .route(
            "/fornecedores/",
            post(handlers::suppliers::create_supplier).get(handlers::suppliers::list_suppliers),
        )
        .route("/fornecedores/novo", post(handlers::suppliers::create_bare_supplier))
        .route(
            "/fornecedores/{id}/",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::replace_supplier)
                .patch(handlers::suppliers::patch_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(supplier_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
