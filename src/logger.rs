use lsp_types::notification::Notification;

use crate::config::LogLevel;

/// Forwards messages to the client as `window/logMessage` notifications.
///
/// Messages less severe than the configured level are dropped.
#[derive(Clone, Copy)]
pub struct ClientLogger<'a> {
    connection: &'a lsp_server::Connection,
    level: LogLevel,
}

impl<'a> ClientLogger<'a> {
    /// Create a logger bound to a connection.
    ///
    /// # Arguments
    ///
    /// + `connection` - The client connection.
    /// + `level` - Least severe message type that is still sent.
    pub fn new(connection: &'a lsp_server::Connection, level: LogLevel) -> ClientLogger<'a> {
        ClientLogger { connection, level }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn error(&self, message: &str) -> crate::Result<()> {
        self.send(LogLevel::Error, message)
    }

    pub fn warn(&self, message: &str) -> crate::Result<()> {
        self.send(LogLevel::Warn, message)
    }

    pub fn info(&self, message: &str) -> crate::Result<()> {
        self.send(LogLevel::Info, message)
    }

    pub fn log(&self, message: &str) -> crate::Result<()> {
        self.send(LogLevel::Log, message)
    }

    fn send(&self, severity: LogLevel, message: &str) -> crate::Result<()> {
        if severity > self.level {
            return Ok(());
        }

        let params = lsp_types::LogMessageParams {
            typ: severity.into(),
            message: message.to_string(),
        };
        let nfy = lsp_server::Notification::new(
            lsp_types::notification::LogMessage::METHOD.to_string(),
            params,
        );
        self.connection
            .sender
            .send(lsp_server::Message::Notification(nfy))?;

        Ok(())
    }
}
