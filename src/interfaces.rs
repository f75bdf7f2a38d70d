use serde::{Deserialize, Serialize};

pub mod movies;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimpleMessage {
    pub message: String,
}

impl SimpleMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
