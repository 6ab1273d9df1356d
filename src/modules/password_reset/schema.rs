use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ForgetPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Uniform `{success, message|error}` body for all three endpoints.
#[derive(Debug, Serialize)]
pub struct FlowResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FlowResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}
