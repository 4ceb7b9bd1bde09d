pub mod initialize;

/// Build the response for a request this server does not handle.
///
/// # Arguments
///
/// + `req` - The unhandled request.
pub fn method_not_found(req: lsp_server::Request) -> lsp_server::Response {
    lsp_server::Response {
        id: req.id,
        result: None,
        error: Some(lsp_server::ResponseError {
            code: lsp_server::ErrorCode::MethodNotFound as i32,
            message: format!("method not found: {}", req.method),
            data: None,
        }),
    }
}
