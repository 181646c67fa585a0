//! JSON output envelope for all CLI commands.
//!
//! Every command prints one envelope on stdout so output can be piped into
//! other tools. Logs go to stderr and never mix with it.

use serde::{Deserialize, Serialize};

use super::ExitCode;

/// Schema version for this envelope format.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Operation outcome status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Operation succeeded with results
    Success,
    /// Operation succeeded but found nothing
    NotFound,
    /// Operation failed
    Error,
}

/// Machine-readable result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    Ok,
    NotFound,
    FeedError,
}

impl ResultCode {
    fn exit_code(self) -> ExitCode {
        match self {
            Self::Ok => ExitCode::Success,
            Self::NotFound => ExitCode::NotFound,
            Self::FeedError => ExitCode::FeedError,
        }
    }
}

/// Entity type in the data payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Resolution,
    IndexStats,
}

/// Unified JSON output envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    /// Operation outcome
    pub status: Status,

    /// Machine-readable result code
    pub code: ResultCode,

    /// Unix exit code (0-255)
    pub exit_code: u8,

    /// Human-readable message
    pub message: String,

    /// Next step suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    /// Result payload
    pub data: Option<T>,

    /// Error details (absent on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,

    pub meta: Meta,
}

/// Error details with suggestions and context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

/// Response metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub schema_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Reference text as it was queried
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            entity_type: None,
            count: None,
            query: None,
            duration_ms: None,
        }
    }
}

impl<T> Envelope<T> {
    fn with_code(status: Status, code: ResultCode, message: String, data: Option<T>) -> Self {
        Self {
            status,
            code,
            exit_code: code.exit_code().code(),
            message,
            hint: None,
            data,
            error: None,
            meta: Meta::default(),
        }
    }

    /// Create a success envelope with data.
    pub fn success(data: T) -> Self {
        Self::with_code(
            Status::Success,
            ResultCode::Ok,
            "Operation completed successfully".to_string(),
            Some(data),
        )
    }

    /// Create a not-found envelope. `data` may still carry a payload
    /// describing the miss.
    pub fn not_found(message: impl Into<String>, data: Option<T>) -> Self {
        Self::with_code(Status::NotFound, ResultCode::NotFound, message.into(), data)
    }

    /// Create an error envelope.
    pub fn error(code: ResultCode, message: impl Into<String>) -> Self {
        Self::with_code(Status::Error, code, message.into(), None)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.meta.entity_type = Some(entity_type);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.meta.count = Some(count);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.meta.query = Some(query.into());
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.meta.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_error_details(mut self, details: ErrorDetails) -> Self {
        self.error = Some(details);
        self
    }

    pub fn exit_code(&self) -> ExitCode {
        self.code.exit_code()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error>
    where
        T: Serialize,
    {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to compact JSON (no whitespace).
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error>
    where
        T: Serialize,
    {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let envelope = Envelope::success(vec!["cinder::gl::Texture"])
            .with_entity_type(EntityType::Resolution)
            .with_count(1)
            .with_query("gl::TextureRef");

        assert_eq!(envelope.status, Status::Success);
        assert_eq!(envelope.code, ResultCode::Ok);
        assert_eq!(envelope.exit_code, 0);
        assert_eq!(envelope.meta.query.as_deref(), Some("gl::TextureRef"));
    }

    #[test]
    fn test_not_found_keeps_payload() {
        let envelope = Envelope::not_found("'Nowhere' did not resolve", Some(serde_json::json!({"found": false})))
            .with_hint("Check the spelling or qualify the name");

        assert_eq!(envelope.status, Status::NotFound);
        assert_eq!(envelope.exit_code, 1);
        assert_eq!(envelope.exit_code(), ExitCode::NotFound);
        assert!(envelope.data.is_some());
    }

    #[test]
    fn test_error_envelope() {
        let envelope: Envelope<()> = Envelope::error(ResultCode::FeedError, "feed.json: not an array")
            .with_error_details(ErrorDetails {
                suggestions: vec!["Pass a JSON array of declaration records".to_string()],
                context: None,
            });

        assert_eq!(envelope.status, Status::Error);
        assert_eq!(envelope.exit_code, 4);
        assert!(envelope.error.is_some());
    }

    #[test]
    fn test_json_serialization() {
        let envelope = Envelope::success(1).with_entity_type(EntityType::IndexStats);

        let json = envelope.to_json().unwrap();
        assert!(json.contains("\"status\": \"success\""));
        assert!(json.contains("\"entity_type\": \"index_stats\""));
        assert!(json.contains("\"schema_version\": \"1.0.0\""));
    }
}
