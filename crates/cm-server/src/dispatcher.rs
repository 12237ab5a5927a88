//! Request routing and per-session state.
//!
//! A [`Dispatcher`] owns the pattern registry, the current framework and the
//! location of the project config. Requests are handled strictly one at a
//! time; `&mut self` on every handler enforces it.

use camino::{Utf8Path, Utf8PathBuf};
use cm_catalog::{CustomOverlay, PatternRegistry};
use cm_config::{ConfigSource, LoadedConfig, load_config};
use cm_core::FrameworkId;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::protocol::{
    JSONRPC_VERSION, Request, Response, RpcError, ToolResult, negotiate_protocol_version,
};
use crate::tools::{ToolName, tool_definitions};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "classmcp";

/// Version reported in `serverInfo`.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeParams {
    #[serde(default)]
    protocol_version: Option<String>,
}

/// Session state plus JSON-RPC routing.
///
/// # Examples
///
/// ```
/// use cm_catalog::PatternRegistry;
/// use cm_core::FrameworkId;
/// use cm_server::Dispatcher;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut dispatcher = Dispatcher::new(PatternRegistry::builtin()?, "/nonexistent");
/// assert_eq!(dispatcher.framework(), FrameworkId::Tailwind);
///
/// let reply = dispatcher
///     .handle_message(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#)
///     .await
///     .expect("requests get a response");
/// assert!(!reply.is_error());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    pub(crate) registry: PatternRegistry,
    pub(crate) framework: FrameworkId,
    pub(crate) project_dir: Utf8PathBuf,
    pub(crate) config_source: Option<ConfigSource>,
}

impl Dispatcher {
    /// Creates a dispatcher for `project_dir` with no config applied.
    ///
    /// The initial framework is detected from the files in `project_dir`.
    pub fn new(registry: PatternRegistry, project_dir: impl Into<Utf8PathBuf>) -> Self {
        let project_dir = project_dir.into();
        let framework = registry.detect_framework(&project_dir);
        Self {
            registry,
            framework,
            project_dir,
            config_source: None,
        }
    }

    /// Loads the project config and applies it if it is valid.
    ///
    /// A valid config replaces the custom overlay and selects its default
    /// framework. The full load result is returned for reporting.
    pub async fn load_config(&mut self) -> LoadedConfig {
        let loaded = load_config(&self.project_dir).await;
        self.config_source.clone_from(&loaded.source);

        if loaded.found() && loaded.is_valid() {
            self.apply_config(&loaded);
        } else if loaded.found() {
            warn!("config validation failed, using defaults");
        }
        loaded
    }

    pub(crate) fn apply_config(&mut self, loaded: &LoadedConfig) {
        let overlay = CustomOverlay::from_config(&loaded.config);
        if !overlay.is_empty() {
            if let Some(source) = &loaded.source {
                info!(count = overlay.len(), %source, "loaded custom patterns");
            }
        }
        self.registry.set_overlay(overlay);
        if let Some(framework) = loaded.config.default_framework {
            self.framework = framework;
        }
    }

    /// The framework tools currently operate on.
    #[must_use]
    pub const fn framework(&self) -> FrameworkId {
        self.framework
    }

    /// Switches the current framework.
    pub fn set_framework(&mut self, framework: FrameworkId) {
        info!(%framework, "framework selected");
        self.framework = framework;
    }

    /// The pattern registry.
    #[must_use]
    pub const fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// The project directory configs are read from.
    #[must_use]
    pub fn project_dir(&self) -> &Utf8Path {
        &self.project_dir
    }

    /// Where the current config came from, if one was found.
    #[must_use]
    pub const fn config_source(&self) -> Option<&ConfigSource> {
        self.config_source.as_ref()
    }

    /// Handles one raw message line.
    ///
    /// Returns `None` for notifications. Malformed input gets an error
    /// response with a `null` id.
    pub async fn handle_message(&mut self, line: &str) -> Option<Response> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparseable message");
                return Some(Response::failure(None, RpcError::parse_error(e)));
            }
        };
        match serde_json::from_value::<Request>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(Response::failure(None, RpcError::invalid_request(e))),
        }
    }

    /// Handles one decoded request.
    pub async fn handle(&mut self, request: Request) -> Option<Response> {
        debug!(method = %request.method, id = ?request.id, "request");

        if request.jsonrpc != JSONRPC_VERSION {
            let error = RpcError::invalid_request(format!(
                "unsupported jsonrpc version \"{}\"",
                request.jsonrpc
            ));
            return (!request.is_notification()).then(|| Response::failure(request.id, error));
        }

        if request.is_notification() {
            debug!(method = %request.method, "notification");
            return None;
        }

        let result = self.dispatch(&request.method, request.params).await;
        Some(match result {
            Ok(value) => Response::success(request.id, value),
            Err(error) => {
                debug!(method = %request.method, %error, "request failed");
                Response::failure(request.id, error)
            }
        })
    }

    async fn dispatch(&mut self, method: &str, params: Option<Value>) -> Result<Value, RpcError> {
        match method {
            "initialize" => {
                let params: InitializeParams = parse_params(params)?;
                Ok(json!({
                    "protocolVersion": negotiate_protocol_version(params.protocol_version.as_deref()),
                    "capabilities": { "tools": {}, "resources": {} },
                    "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION },
                }))
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => {
                let params: CallToolParams = parse_params(params)?;
                let arguments = params
                    .arguments
                    .filter(|args| !args.is_null())
                    .unwrap_or_else(|| json!({}));
                let result = self.call_tool(&params.name, arguments).await?;
                to_value(&result)
            }
            "resources/list" => Ok(json!({ "resources": self.list_resources() })),
            "resources/read" => {
                let params: ReadResourceParams = parse_params(params)?;
                let contents = self.read_resource(&params.uri)?;
                Ok(json!({ "contents": [contents] }))
            }
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    /// Runs a tool by wire name.
    ///
    /// Unknown tools and user-level failures come back as text results;
    /// only malformed arguments are errors.
    pub async fn call_tool(&mut self, name: &str, arguments: Value) -> Result<ToolResult, RpcError> {
        let Ok(tool) = name.parse::<ToolName>() else {
            return Ok(ToolResult::text(format!("Unknown tool: {name}")));
        };
        debug!(%tool, "tool call");

        let text = match tool {
            ToolName::SetFramework => self.set_framework_tool(&parse_args(arguments)?),
            ToolName::GetClass => self.get_class(&parse_args(arguments)?),
            ToolName::ListClasses => self.list_classes(&parse_args(arguments)?),
            ToolName::SearchClasses => self.search_classes(&parse_args(arguments)?),
            ToolName::GenerateCss => self.generate_css_tool(parse_args(arguments)?),
            ToolName::GetComponent => self.get_component(&parse_args(arguments)?),
            ToolName::GetSsrInfo => self.get_ssr_info(&parse_args(arguments)?),
            ToolName::ListFrameworks => self.list_frameworks(),
            ToolName::ReloadConfig => self.reload_config_tool().await,
            ToolName::ListCustomPatterns => self.list_custom_patterns(&parse_args(arguments)?),
        };
        Ok(ToolResult::text(text))
    }
}

fn parse_params<T>(params: Option<Value>) -> Result<T, RpcError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(params.unwrap_or_else(|| json!({}))).map_err(RpcError::invalid_params)
}

fn parse_args<T>(arguments: Value) -> Result<T, RpcError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(arguments).map_err(RpcError::invalid_params)
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(RpcError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::RequestId;
    use crate::testing::dispatcher;

    async fn roundtrip(dispatcher: &mut Dispatcher, line: &str) -> Value {
        let response = dispatcher.handle_message(line).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let (_dir, mut d) = dispatcher();
        let reply = roundtrip(
            &mut d,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"t","version":"1"}}}"#,
        )
        .await;

        assert_eq!(reply["id"], 1);
        assert_eq!(reply["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(reply["result"]["serverInfo"]["name"], "classmcp");
        assert_eq!(
            reply["result"]["capabilities"],
            json!({"tools": {}, "resources": {}})
        );
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let (_dir, mut d) = dispatcher();
        let reply = d
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let (_dir, mut d) = dispatcher();
        let reply = roundtrip(&mut d, r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#).await;
        assert_eq!(reply, json!({"jsonrpc": "2.0", "id": "p", "result": {}}));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let (_dir, mut d) = dispatcher();
        let reply = roundtrip(&mut d, r#"{"jsonrpc":"2.0","id":2,"method":"prompts/list"}"#).await;
        assert_eq!(reply["error"]["code"], RpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_parse_error() {
        let (_dir, mut d) = dispatcher();
        let reply = roundtrip(&mut d, "{\"jsonrpc\":").await;
        assert_eq!(reply["id"], Value::Null);
        assert_eq!(reply["error"]["code"], RpcError::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let (_dir, mut d) = dispatcher();
        let reply = roundtrip(&mut d, r#"{"jsonrpc":"2.0","id":3}"#).await;
        assert_eq!(reply["error"]["code"], RpcError::INVALID_REQUEST);

        let reply = roundtrip(&mut d, r#"{"jsonrpc":"1.0","id":3,"method":"ping"}"#).await;
        assert_eq!(reply["id"], 3);
        assert_eq!(reply["error"]["code"], RpcError::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let (_dir, mut d) = dispatcher();
        let reply = roundtrip(&mut d, r#"{"jsonrpc":"2.0","id":4,"method":"tools/list"}"#).await;
        let names: Vec<&str> = reply["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|tool| tool["name"].as_str().unwrap())
            .collect();
        assert_eq!(names[0], "set_framework");
        assert_eq!(names.len(), 10);
    }

    #[tokio::test]
    async fn test_tools_call_envelope() {
        let (_dir, mut d) = dispatcher();
        let reply = roundtrip(
            &mut d,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"set_framework","arguments":{"framework":"unocss"}}}"#,
        )
        .await;
        let content = &reply["result"]["content"][0];
        assert_eq!(content["type"], "text");
        assert!(content["text"].as_str().unwrap().starts_with("Framework set to **UnoCSS**"));
        assert_eq!(d.framework(), FrameworkId::Unocss);
    }

    #[tokio::test]
    async fn test_tools_call_bad_arguments() {
        let (_dir, mut d) = dispatcher();
        let reply = roundtrip(
            &mut d,
            r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"get_class","arguments":{}}}"#,
        )
        .await;
        assert_eq!(reply["error"]["code"], RpcError::INVALID_PARAMS);

        let reply = roundtrip(&mut d, r#"{"jsonrpc":"2.0","id":7,"method":"tools/call"}"#).await;
        assert_eq!(reply["error"]["code"], RpcError::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_text() {
        let (_dir, mut d) = dispatcher();
        let result = d.call_tool("make_coffee", json!({})).await.unwrap();
        assert_eq!(result.joined_text(), "Unknown tool: make_coffee");
    }

    #[tokio::test]
    async fn test_handle_decoded_request() {
        let (_dir, mut d) = dispatcher();
        let response = d
            .handle(Request::new(RequestId::Number(9), "ping", None))
            .await
            .unwrap();
        assert_eq!(response.id, Some(RequestId::Number(9)));
        assert!(!response.is_error());
    }

    #[tokio::test]
    async fn test_detects_framework_from_project() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("uno.config.ts"), "export default {}").unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let d = Dispatcher::new(PatternRegistry::builtin().unwrap(), root);
        assert_eq!(d.framework(), FrameworkId::Unocss);
    }

    #[tokio::test]
    async fn test_load_config_applies_valid_config() {
        let (dir, mut d) = dispatcher();
        std::fs::write(
            dir.path().join(".classmcp.json"),
            r#"{"defaultFramework":"tachyons","customPatterns":[{"id":"brand-btn","classes":"pa3 bg-blue"}]}"#,
        )
        .unwrap();

        let loaded = d.load_config().await;
        assert!(loaded.found());
        assert_eq!(d.framework(), FrameworkId::Tachyons);
        assert!(d.registry().is_custom(FrameworkId::Tachyons, "brand-btn"));
        assert!(d.config_source().is_some());
    }

    #[tokio::test]
    async fn test_load_config_without_default_keeps_detected_framework() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("uno.config.ts"), "export default {}").unwrap();
        std::fs::write(
            dir.path().join(".classmcp.json"),
            r#"{"customPatterns":[{"id":"brand-btn","classes":"px-4 bg-brand"}]}"#,
        )
        .unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let mut d = Dispatcher::new(PatternRegistry::builtin().unwrap(), root);

        let loaded = d.load_config().await;
        assert!(loaded.is_valid());
        assert_eq!(d.framework(), FrameworkId::Unocss);
        assert!(d.registry().is_custom(FrameworkId::Unocss, "brand-btn"));
    }

    #[tokio::test]
    async fn test_load_config_ignores_invalid_config() {
        let (dir, mut d) = dispatcher();
        std::fs::write(
            dir.path().join(".classmcp.json"),
            r#"{"defaultFramework":"bootstrap","overrideBuiltins":"yes"}"#,
        )
        .unwrap();

        let loaded = d.load_config().await;
        assert!(!loaded.is_valid());
        assert_eq!(d.framework(), FrameworkId::Tailwind);
        assert!(d.registry().overlay().is_empty());
    }
}
