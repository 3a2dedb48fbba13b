pub mod admin;
pub mod attendee;
pub mod auth;
pub mod chat;
pub mod templates;

use std::io::{BufRead, Write};

use companion_api_client::{
    ApiClient, ClientConfig, Credential, FileTokenStore, TokenStore,
};
use serde::Serialize;

use crate::Result;
use crate::cli::{Cli, EventArg};

/// Shared state for one CLI invocation.
pub struct Context {
    pub client: ApiClient,
    pub tokens: Box<dyn TokenStore>,
    pub json: bool,
}

impl Context {
    /// Client from flags; `--token` wins over the stored token.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = ClientConfig::new(&cli.api_url)?;
        let tokens: Box<dyn TokenStore> = match &cli.token_file {
            Some(path) => Box::new(FileTokenStore::new(path)),
            None => Box::new(FileTokenStore::default_location()),
        };
        let credential = match &cli.token {
            Some(token) => Credential::new(token.as_str()),
            None => tokens.load()?,
        };
        log::debug!(
            "api {} ({})",
            config.base_url,
            if credential.is_some() { "authenticated" } else { "anonymous" }
        );
        Ok(Self {
            client: ApiClient::new(config).with_credential(credential),
            tokens,
            json: cli.json,
        })
    }

    /// Explicit `--event`, else the active event.
    pub async fn event_id(&self, arg: &EventArg) -> Result<String> {
        if let Some(id) = &arg.event {
            return Ok(id.clone());
        }
        let event = self.client.active_event().await?;
        log::debug!("using active event {} ({})", event.title, event.id);
        Ok(event.id)
    }

    /// Print `value` as JSON when `--json` was given; returns whether it did.
    pub fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<bool> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(self.json)
    }
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
