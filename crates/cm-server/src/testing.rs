//! Shared fixtures for unit tests.

use camino::Utf8PathBuf;
use cm_catalog::PatternRegistry;
use serde_json::Value;

use crate::dispatcher::Dispatcher;

/// A dispatcher over an empty temporary project directory.
pub(crate) fn dispatcher() -> (tempfile::TempDir, Dispatcher) {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    let dispatcher = Dispatcher::new(PatternRegistry::builtin().unwrap(), root);
    (dir, dispatcher)
}

/// Calls a tool and returns its text.
pub(crate) async fn call(dispatcher: &mut Dispatcher, tool: &str, arguments: Value) -> String {
    dispatcher
        .call_tool(tool, arguments)
        .await
        .unwrap()
        .joined_text()
}
