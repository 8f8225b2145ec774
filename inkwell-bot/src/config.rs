use std::env;
use std::time::Duration;

use anyhow::Context as _;

use inkwell_database::store::DEFAULT_JSONSTORE_BASE_URL;
use inkwell_utils::parse::parse_name_list;

pub const DEFAULT_MOD_ROLE_NAMES: &str = "Tapioca God Mod,Supreme Pudding Admin";
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    JsonStore {
        base_url: String,
        token: String,
        timeout: Duration,
    },
}

/// Process-wide settings, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotConfig {
    pub discord_token: String,
    pub guild_id: Option<u64>,
    pub store: StoreConfig,
    pub moderator_roles: Vec<String>,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let discord_token = non_empty("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;

        let guild_id = non_empty("DISCORD_GUILD_ID")
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .context("DISCORD_GUILD_ID is not a valid guild id")?;

        let backend = non_empty("STORE_BACKEND")
            .unwrap_or_else(|| "jsonstore".to_owned())
            .to_ascii_lowercase();

        let store = match backend.as_str() {
            "memory" => StoreConfig::Memory,
            "jsonstore" => {
                let token = non_empty("STORE_TOKEN")
                    .context("STORE_TOKEN is required for the jsonstore backend")?;
                let base_url = non_empty("STORE_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_JSONSTORE_BASE_URL.to_owned());
                let timeout_secs = non_empty("STORE_TIMEOUT_SECONDS")
                    .and_then(|raw| raw.parse::<u64>().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_STORE_TIMEOUT_SECS);

                StoreConfig::JsonStore {
                    base_url,
                    token,
                    timeout: Duration::from_secs(timeout_secs),
                }
            }
            other => anyhow::bail!("unknown STORE_BACKEND `{other}` (expected jsonstore or memory)"),
        };

        let moderator_roles = parse_name_list(
            &non_empty("MOD_ROLE_NAMES").unwrap_or_else(|| DEFAULT_MOD_ROLE_NAMES.to_owned()),
        );

        Ok(Self {
            discord_token,
            guild_id,
            store,
            moderator_roles,
        })
    }
}
