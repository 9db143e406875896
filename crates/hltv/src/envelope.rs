use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::scraper::ScraperError;

pub const SOURCE: &str = "hltv";

/// The uniform wrapper every data-producing operation returns; no error
/// crosses into a transport layer un-enveloped.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
    pub source: &'static str,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            source: SOURCE,
            timestamp: now(),
            error: None,
        }
    }
}

impl<T: Default> Envelope<T> {
    // A missing entity is a normal outcome: success is false but no error
    // is attached.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
            source: SOURCE,
            timestamp: now(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            data: T::default(),
            message: message.clone(),
            source: SOURCE,
            timestamp: now(),
            error: Some(message),
        }
    }

    pub fn of_entity(
        result: Result<T, ScraperError>,
        describe: impl FnOnce(&T) -> String,
    ) -> Self {
        match result {
            Ok(data) => {
                let message = describe(&data);
                Self::ok(data, message)
            }
            Err(e @ ScraperError::NotFound(_)) => Self::not_found(e.to_string()),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

impl<T> Envelope<Vec<T>> {
    // success means at least one record; an empty extraction reads as a
    // miss, not as an error.
    pub fn of_list(result: Result<Vec<T>, ScraperError>, noun: &str) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self::not_found(format!("No {} found", noun)),
            Ok(items) => {
                let message = format!("Fetched {} {}", items.len(), noun);
                Self::ok(items, message)
            }
            Err(e @ ScraperError::NotFound(_)) => Self::not_found(e.to_string()),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
