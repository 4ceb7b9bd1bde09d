use lsp_types::notification::Notification;

use crate::config::LspConfig;
use crate::logger::ClientLogger;

/// An LSP session bound to a transport.
pub struct LspConnection {
    config: LspConfig,
    connection: lsp_server::Connection,
    io_threads: Option<lsp_server::IoThreads>,
}

/// Create a connection that talks to the client over stdio.
///
/// # Arguments
///
/// + `config` - The resolved startup configuration.
pub fn create_connection(config: LspConfig) -> LspConnection {
    let (connection, io_threads) = lsp_server::Connection::stdio();
    LspConnection {
        config,
        connection,
        io_threads: Some(io_threads),
    }
}

impl LspConnection {
    /// Wrap an existing transport, such as one half of
    /// `lsp_server::Connection::memory()`.
    pub fn new(config: LspConfig, connection: lsp_server::Connection) -> LspConnection {
        LspConnection {
            config,
            connection,
            io_threads: None,
        }
    }

    /// Serve the session until the client sends `shutdown` and `exit`.
    pub fn listen(self) -> crate::Result<()> {
        let LspConnection {
            config,
            connection,
            io_threads,
        } = self;

        tracing::info!("initialize...");
        crate::method::initialize::initialize(&connection)?;

        let logger = ClientLogger::new(&connection, config.show_message_level);
        announce_tsserver(&logger, &config)?;

        tracing::info!("starting lsp");
        message_loop(&connection)?;

        // The writer thread exits once every sender is dropped.
        drop(connection);
        if let Some(io_threads) = io_threads {
            io_threads.join()?;
        }

        tracing::info!("connection closed");
        Ok(())
    }
}

fn announce_tsserver(logger: &ClientLogger, config: &LspConfig) -> crate::Result<()> {
    let path = config
        .tsserver_path
        .as_deref()
        .unwrap_or("automatic discovery");
    logger.info(&format!("Using tsserver from: {}", path))?;
    logger.info(&format!(
        "tsserver log verbosity: {}",
        config.tsserver_log_verbosity
    ))?;
    Ok(())
}

/// The main message loop.
///
/// # Arguments
///
/// + `connection` - A reference to lsp_server::Connection
fn message_loop(connection: &lsp_server::Connection) -> crate::Result<()> {
    for msg in &connection.receiver {
        match msg {
            lsp_server::Message::Request(req) => {
                if connection.handle_shutdown(&req)? {
                    tracing::info!("shutdown");
                    return Ok(());
                }

                handle_request(connection, req)?;
            }

            lsp_server::Message::Response(rsp) => {
                tracing::debug!("ignoring response {:?}", rsp.id);
            }

            lsp_server::Message::Notification(nfy) => {
                if nfy.method == lsp_types::notification::Exit::METHOD {
                    tracing::warn!("exit without shutdown");
                    return Ok(());
                }
                tracing::debug!("ignoring notification {}", nfy.method);
            }
        }
    }

    Ok(())
}

fn handle_request(conn: &lsp_server::Connection, req: lsp_server::Request) -> crate::Result<()> {
    tracing::debug!("unhandled request {} ({:?})", req.method, req.id);
    let rsp = crate::method::method_not_found(req);
    conn.sender.send(lsp_server::Message::Response(rsp))?;

    Ok(())
}
