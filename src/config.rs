use crate::error::ConfigError;
use log::info;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_URL: &str = "http://127.0.0.1:5000/";
const DEFAULT_REFRESH_SECS: u64 = 30;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Which page of the party this console stands in for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    SmashPassAdmin,
    Voter,
    Slideshow,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" | "mfk-admin" => Ok(Role::Admin),
            "smashpass-admin" | "sp-admin" => Ok(Role::SmashPassAdmin),
            "voter" | "vote" => Ok(Role::Voter),
            "slideshow" => Ok(Role::Slideshow),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub role: Role,
    pub feed: Option<PathBuf>,
    // Zero disables the fallback refresh
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separate from `from_env` so tests don't touch the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            base_url: lookup("PARTY_VOTE_URL").unwrap_or_else(|| {
                info!("PARTY_VOTE_URL not set, using default: {}", DEFAULT_URL);
                DEFAULT_URL.to_string()
            }),
            role: parse_or("PARTY_VOTE_ROLE", &lookup, Role::Voter)?,
            feed: lookup("PARTY_VOTE_FEED")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            refresh_interval: Duration::from_secs(parse_or(
                "PARTY_VOTE_REFRESH_SECS",
                &lookup,
                DEFAULT_REFRESH_SECS,
            )?),
            request_timeout: Duration::from_secs(parse_or(
                "PARTY_VOTE_TIMEOUT_SECS",
                &lookup,
                DEFAULT_TIMEOUT_SECS,
            )?),
        })
    }
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
