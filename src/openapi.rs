use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Facilities API",
        version = "1.0.0",
        description = "Available shifts for workers, paged with opaque cursors"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
    ),
    paths(
        crate::handlers::health::health_check,
        crate::handlers::workers_handler::get_available_shifts,
    ),
    components(
        schemas(
            crate::models::AvailableShiftsResponse,
            crate::models::AvailableShift,
            crate::models::FacilityView,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "workers", description = "Worker shift discovery"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/healthcheck"));
        assert!(doc.paths.paths.contains_key("/v1/workers/{id}/available_shifts"));
    }
}
