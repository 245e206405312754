use crate::controller::{Pane, ScrollMetrics};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct ServeMessage {
    pub seq: u64,
    #[serde(rename = "type")]
    pub msg_type: String,
    #[serde(flatten)]
    pub content: ServeMessageContent,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServeMessageContent {
    Request {
        command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        arguments: Option<Value>,
    },
    Response {
        request_seq: u64,
        success: bool,
        command: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<Value>,
    },
    Event {
        event: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<Value>,
    },
}

#[derive(Debug, Deserialize)]
pub struct SetInputArguments {
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOptionsArguments {
    pub append_slash: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewlineArguments {
    /// Replaces the input first when the frontend holds unsynced edits.
    pub text: Option<String>,
    pub cursor: usize,
}

#[derive(Debug, Deserialize)]
pub struct ScrollArguments {
    pub pane: Pane,
    pub top: f64,
    pub input: Option<ScrollMetrics>,
    pub output: Option<ScrollMetrics>,
}

/// Stateless one-off render, independent of the session's input.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderArguments {
    pub text: String,
    #[serde(default)]
    pub append_slash: bool,
    #[serde(default)]
    pub literal_root: bool,
}
