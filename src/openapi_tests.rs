#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{PathItemType, RefOr, schema::Schema};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("{} should be an object schema", name),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        for schema in [
            "ErrorResponse",
            "MessageResponse",
            "HealthResponse",
            "RegisterRequest",
            "UserResponse",
            "LoginResponse",
            "ProfileResponse",
            "VideoResponse",
        ] {
            assert!(components.schemas.contains_key(schema), "missing schema {}", schema);
        }
        assert!(components.security_schemes.contains_key("bearer_auth"));

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        for field in ["error", "code", "success"] {
            assert!(properties.iter().any(|p| p == field));
        }
    }

    #[test]
    fn test_user_response_has_no_password() {
        let properties = object_properties("UserResponse");
        assert!(properties.iter().any(|p| p == "email"));
        assert!(!properties.iter().any(|p| p == "password"));
    }

    #[test]
    fn test_openapi_paths_and_methods() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        let expected = [
            ("/health", vec![PathItemType::Get]),
            ("/api/v1/register", vec![PathItemType::Post]),
            ("/api/v1/login", vec![PathItemType::Post]),
            ("/api/v1/logout", vec![PathItemType::Post]),
            ("/api/v1/token/refresh", vec![PathItemType::Post]),
            (
                "/api/v1/profile",
                vec![PathItemType::Get, PathItemType::Post, PathItemType::Put, PathItemType::Patch],
            ),
            (
                "/api/v1/videos",
                vec![PathItemType::Get, PathItemType::Post, PathItemType::Put, PathItemType::Patch],
            ),
        ];

        for (path, methods) in expected {
            let item = paths.get(path).unwrap_or_else(|| panic!("missing path {}", path));
            for method in methods {
                assert!(item.operations.contains_key(&method), "{} lacks a documented method", path);
            }
        }
    }

    #[test]
    fn test_login_documents_failure_responses() {
        let openapi = ApiDoc::openapi();
        let login = openapi.paths.paths.get("/api/v1/login").unwrap();
        let operation = login.operations.get(&PathItemType::Post).unwrap();

        let responses = &operation.responses.responses;
        assert!(responses.contains_key("200"));
        assert!(responses.contains_key("400"));
        assert!(responses.contains_key("401"));
    }

    #[test]
    fn test_register_failure_responses_reference_components() {
        let openapi = ApiDoc::openapi();
        let register = openapi.paths.paths.get("/api/v1/register").unwrap();
        let operation = register.operations.get(&PathItemType::Post).unwrap();

        let responses = serde_json::to_value(&operation.responses).unwrap();
        assert_eq!(
            responses["500"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/ErrorResponse"
        );
        assert_eq!(
            responses["400"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/FieldErrors"
        );
    }

    #[test]
    fn test_schema_references_are_well_formed() {
        let openapi_json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));
        assert!(openapi_json.contains("#/components/schemas/ErrorResponse"));
    }
}
