//! Backend Config

use clap::Args;
use quire::ids::{Identity, UserId};

use crate::store::RestConfig;

/// Hosted backend settings.
#[derive(Debug, Args)]
pub struct BackendConfig {
    /// Base URL of the hosted backend
    #[arg(long, env = "QUIRE_BACKEND_URL")]
    pub backend_url: String,

    /// Public API key of the hosted backend
    #[arg(long, env = "QUIRE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Session token of the signed-in user
    #[arg(long, env = "QUIRE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Id of the signed-in user; guest when omitted
    #[arg(long, env = "QUIRE_USER_ID")]
    pub user_id: Option<String>,

    /// Display name of the signed-in user
    #[arg(long, env = "QUIRE_USER_NAME")]
    pub user_name: Option<String>,
}

impl BackendConfig {
    /// REST client settings.
    #[must_use]
    pub fn rest(&self) -> RestConfig {
        RestConfig {
            base_url: self.backend_url.clone(),
            api_key: self.api_key.clone(),
            access_token: self.access_token.clone(),
        }
    }

    /// Who the session belongs to. Blank user ids count as guests.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::from_user(
            self.user_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(UserId::from),
        )
    }

    /// Display name used for reviews and chat, falling back to the user id.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.user_name
            .clone()
            .or_else(|| self.user_id.clone())
            .unwrap_or_else(|| "Guest".to_string())
    }
}
