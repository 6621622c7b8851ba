//! Chat messages and the ordered message collection sent to `/api/chat` and `/api/create`.

use super::tool::ToolCall;
use super::wire::{drop_absent, WireForm, WireValue};
use crate::{Error, ErrorContext};
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Tool => "tool",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "tool" => Ok(MessageRole::Tool),
            other => Err(Error::validation_with_context(
                format!("unknown message role '{}'", other),
                ErrorContext::new()
                    .with_field_path("role")
                    .with_details("expected one of: system, user, assistant, tool"),
            )),
        }
    }
}

/// Role as sent on the wire: one of the known roles, or a raw string the
/// caller takes responsibility for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Role {
    Known(MessageRole),
    Custom(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Known(role) => role.as_str(),
            Role::Custom(raw) => raw,
        }
    }
}

impl From<MessageRole> for Role {
    fn from(role: MessageRole) -> Self {
        Role::Known(role)
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub content: String,
    /// Base64-encoded images (for multimodal models)
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatMessage {
    pub fn new(role: impl Into<Role>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            images: None,
            tool_calls: None,
        }
    }

    /// Message with a role string outside [`MessageRole`], forwarded unchecked.
    pub fn with_raw_role(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(Role::Custom(role.into()), content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn tool(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Tool, content)
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }

    /// Append one image given as raw bytes; it is base64-encoded here.
    pub fn with_image_bytes(mut self, bytes: impl AsRef<[u8]>) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes.as_ref());
        self.images.get_or_insert_with(Vec::new).push(encoded);
        self
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = Some(tool_calls);
        self
    }
}

impl WireForm for ChatMessage {
    fn to_wire_form(&self) -> Map<String, Value> {
        drop_absent([
            ("role", Value::String(self.role.as_str().to_string())),
            ("content", Value::String(self.content.clone())),
            (
                "images",
                self.images
                    .as_ref()
                    .map(|imgs| imgs.to_wire_value())
                    .unwrap_or(Value::Null),
            ),
            (
                "tool_calls",
                self.tool_calls
                    .as_ref()
                    .map(|calls| calls.to_wire_value())
                    .unwrap_or(Value::Null),
            ),
        ])
    }
}

/// One element of a [`ChatMessages`] collection.
#[derive(Debug, Clone)]
pub enum MessageEntry {
    /// Anything that knows its own wire form.
    Structured(Arc<dyn WireForm + Send + Sync>),
    /// A raw JSON object, forwarded unchanged.
    Raw(Map<String, Value>),
}

impl MessageEntry {
    pub fn structured<T>(message: T) -> Self
    where
        T: WireForm + Send + Sync + 'static,
    {
        MessageEntry::Structured(Arc::new(message))
    }

    pub fn to_wire_form(&self) -> Map<String, Value> {
        match self {
            MessageEntry::Structured(message) => message.to_wire_form(),
            MessageEntry::Raw(map) => map.clone(),
        }
    }
}

impl From<ChatMessage> for MessageEntry {
    fn from(message: ChatMessage) -> Self {
        MessageEntry::structured(message)
    }
}

impl From<Map<String, Value>> for MessageEntry {
    fn from(map: Map<String, Value>) -> Self {
        MessageEntry::Raw(map)
    }
}

/// Ordered collection of structured and raw messages.
#[derive(Debug, Clone, Default)]
pub struct ChatMessages {
    entries: Vec<MessageEntry>,
}

impl ChatMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<MessageEntry>) {
        self.entries.push(entry.into());
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, entry: impl Into<MessageEntry>) -> Self {
        self.push(entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    /// Wire form of every entry, same length and order as the input.
    pub fn normalize(&self) -> Vec<Map<String, Value>> {
        self.iter().collect()
    }

    /// Restartable view over the normalized entries.
    pub fn iter(&self) -> impl Iterator<Item = Map<String, Value>> + '_ {
        self.entries.iter().map(MessageEntry::to_wire_form)
    }
}

impl WireValue for ChatMessages {
    fn to_wire_value(&self) -> Value {
        Value::Array(self.iter().map(Value::Object).collect())
    }
}

impl<'a> IntoIterator for &'a ChatMessages {
    type Item = Map<String, Value>;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, MessageEntry>,
        fn(&MessageEntry) -> Map<String, Value>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(MessageEntry::to_wire_form as fn(&MessageEntry) -> Map<String, Value>)
    }
}

impl<E: Into<MessageEntry>> FromIterator<E> for ChatMessages {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<E: Into<MessageEntry>> From<Vec<E>> for ChatMessages {
    fn from(entries: Vec<E>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<ChatMessage> for ChatMessages {
    fn from(message: ChatMessage) -> Self {
        ChatMessages::new().with(message)
    }
}
