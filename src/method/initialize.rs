use lsp_types::*;

/// Run the initialize handshake.
///
/// Waits for the `initialize` request, replies with the server info and
/// capabilities, then waits for the `initialized` notification.
///
/// # Arguments
///
/// + `connection` - The client connection.
pub fn initialize(connection: &lsp_server::Connection) -> crate::Result<()> {
    let (id, params) = connection.initialize_start()?;
    let params: InitializeParams = serde_json::from_value(params)?;

    if let Some(client) = &params.client_info {
        tracing::info!(
            "client: {} {}",
            client.name,
            client.version.as_deref().unwrap_or("")
        );
    }

    let result = InitializeResult {
        server_info: Some(ServerInfo {
            name: String::from(env!("CARGO_PKG_NAME")),
            version: Some(String::from(env!("CARGO_PKG_VERSION"))),
        }),
        capabilities: get_server_capacity(),
        ..Default::default()
    };
    connection.initialize_finish(id, serde_json::to_value(result)?)?;

    Ok(())
}

fn get_server_capacity() -> ServerCapabilities {
    return ServerCapabilities {
        position_encoding: Some(PositionEncodingKind::UTF16),
        ..ServerCapabilities::default()
    };
}
