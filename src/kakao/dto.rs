use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Skill payload sent by the chat platform.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KakaoRequest {
    pub user_request: UserRequest,
    #[serde(default)]
    pub bot: Option<Bot>,
    #[serde(default)]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub utterance: String,
    pub user: KakaoUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KakaoUser {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bot {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Action {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub params: HashMap<String, serde_json::Value>,
}

impl KakaoRequest {
    pub fn user_id(&self) -> &str {
        &self.user_request.user.id
    }

    pub fn utterance(&self) -> &str {
        &self.user_request.utterance
    }
}

/// Skill response carrying a single simple-text bubble.
#[derive(Debug, Clone, Serialize)]
pub struct KakaoResponse {
    pub version: &'static str,
    pub template: Template,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub outputs: Vec<Output>,
    pub quick_replies: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub simple_text: SimpleText,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimpleText {
    pub text: String,
}

impl KakaoResponse {
    pub fn simple_text(text: impl Into<String>) -> Self {
        Self {
            version: "2.0",
            template: Template {
                outputs: vec![Output {
                    simple_text: SimpleText { text: text.into() },
                }],
                quick_replies: Vec::new(),
            },
        }
    }

    pub fn text(&self) -> &str {
        self.template
            .outputs
            .first()
            .map(|o| o.simple_text.text.as_str())
            .unwrap_or_default()
    }
}
