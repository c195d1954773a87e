//! The OData error body every Graph operation maps failures to.

use msgraph_abstractions::{ErrorMappings, ErrorModel, GraphResult, JsonParseNode, Parsable};
use std::any::Any;
use std::sync::Arc;

graph_model! {
    pub struct ErrorDetails {
        value "code" => code / set_code: String;
        value "message" => message / set_message: String;
        value "target" => target / set_target: String;
    }
}

graph_model! {
    /// Diagnostics the service attaches to an error.
    pub struct InnerError {
        value "client-request-id" => client_request_id / set_client_request_id: String;
        value "date" => date / set_date: String;
        value "request-id" => request_id / set_request_id: String;
    }
}

graph_model! {
    pub struct MainError {
        value "code" => code / set_code: String;
        value "message" => message / set_message: String;
        value "target" => target / set_target: String;
        collection "details" => details / set_details: ErrorDetails;
        object "innerError" => inner_error / set_inner_error: InnerError;
    }
}

graph_model! {
    /// `{"error": {"code": ..., "message": ..., "innerError": {...}}}`
    pub struct ODataError {
        object "error" => error / set_error: MainError;
    }
}

impl ErrorModel for ODataError {
    fn error_code(&self) -> Option<String> {
        self.error().and_then(|e| e.code())
    }

    fn error_message(&self) -> Option<String> {
        self.error().and_then(|e| e.message())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Error factory registered for every status class.
pub fn create_odata_error_from_discriminator_value(
    node: &JsonParseNode<'_>,
) -> GraphResult<Arc<dyn ErrorModel>> {
    Ok(Arc::new(ODataError::create_from_discriminator_value(node)?))
}

/// The mapping shared by all generated operations: any 4XX or 5XX status
/// is decoded as an [`ODataError`].
pub fn odata_error_mappings() -> ErrorMappings {
    ErrorMappings::new().with("XXX", create_odata_error_from_discriminator_value)
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
