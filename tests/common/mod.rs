use serde_json::json;

/// How long the client waits for any single server message.
const RECV_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

pub struct LspClient {
    /// Client half of the in-memory transport.
    connection: lsp_server::Connection,
    id: i32,

    /// Notifications received while waiting for responses.
    pub notifications: Vec<lsp_server::Notification>,
}

impl LspClient {
    /// Start a server on an in-memory transport.
    ///
    /// # Arguments
    ///
    /// + `config` - Server configuration.
    ///
    /// # Returns
    ///
    /// + The client and the handle of the server thread.
    pub fn spawn(
        config: typescript_language_server::LspConfig,
    ) -> (
        LspClient,
        std::thread::JoinHandle<typescript_language_server::Result<()>>,
    ) {
        let (server, client) = lsp_server::Connection::memory();
        let handle = std::thread::spawn(move || {
            typescript_language_server::LspConnection::new(config, server).listen()
        });

        let client = LspClient {
            connection: client,
            id: 1,
            notifications: Vec::new(),
        };
        return (client, handle);
    }

    /// Send request and receive response.
    ///
    /// # Arguments
    ///
    /// + `method` - Method name.
    /// + `params` - Method parameters.
    ///
    /// # Returns
    ///
    /// + Response message.
    pub fn request(&mut self, method: &str, params: serde_json::Value) -> lsp_server::Response {
        let id = lsp_server::RequestId::from(self.id);
        self.id += 1;

        let req = lsp_server::Request::new(id.clone(), method.to_string(), params);
        self.connection
            .sender
            .send(lsp_server::Message::Request(req))
            .unwrap();

        loop {
            match self.connection.receiver.recv_timeout(RECV_TIMEOUT).unwrap() {
                lsp_server::Message::Response(rsp) => {
                    assert_eq!(rsp.id, id);
                    return rsp;
                }
                lsp_server::Message::Notification(nfy) => self.notifications.push(nfy),
                lsp_server::Message::Request(req) => panic!("unexpected request {}", req.method),
            }
        }
    }

    /// Send notification.
    ///
    /// # Arguments
    ///
    /// + `method` - Method name.
    /// + `params` - Method parameters.
    pub fn notify(&mut self, method: &str, params: serde_json::Value) {
        let nfy = lsp_server::Notification::new(method.to_string(), params);
        self.connection
            .sender
            .send(lsp_server::Message::Notification(nfy))
            .unwrap();
    }

    /// Perform initialize request.
    ///
    /// # Returns
    ///
    /// + The `InitializeResult` sent by the server.
    pub fn initialize(&mut self) -> lsp_types::InitializeResult {
        let param = json!({
            "processId": null,
            "rootUri": null,
            "clientInfo": { "name": "test-client", "version": "1.0" },
            "capabilities": {}
        });

        let rsp = self.request("initialize", param);
        assert!(rsp.error.is_none(), "initialize failed: {:?}", rsp.error);
        self.notify("initialized", json!({}));

        serde_json::from_value(rsp.result.unwrap()).unwrap()
    }

    /// Perform shutdown request.
    pub fn shutdown(&mut self) {
        let rsp = self.request("shutdown", serde_json::Value::Null);
        assert!(rsp.error.is_none());

        self.notify("exit", serde_json::Value::Null);
    }

    /// Messages of every `window/logMessage` notification received so far.
    pub fn log_messages(&self) -> Vec<(lsp_types::MessageType, String)> {
        self.notifications
            .iter()
            .filter(|nfy| nfy.method == "window/logMessage")
            .map(|nfy| {
                let params: lsp_types::LogMessageParams =
                    serde_json::from_value(nfy.params.clone()).unwrap();
                (params.typ, params.message)
            })
            .collect()
    }
}
