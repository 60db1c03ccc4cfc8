//! Failure taxonomy for weather sources.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Bad request for city '{city}': {body}")]
    BadRequest { city: String, body: String },

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Source reported an error ({code}): {info}")]
    Api { code: i64, info: String },

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl FetchError {
    /// Short text suitable for the widget's notice area.
    pub fn user_message(&self, city: &str) -> String {
        match self {
            Self::BadRequest { .. } | Self::Api { .. } => {
                format!("Couldn't update weather: no data for '{city}'")
            }
            Self::Status { .. } | Self::Malformed(_) => {
                "Couldn't update weather: the weather service returned an unusable response"
                    .to_string()
            }
            Self::Network(_) => "Couldn't update weather: check your connection".to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
