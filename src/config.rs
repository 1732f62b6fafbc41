use std::{fs, path::Path, path::PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Error;

/// Retrieve your taste.io ratings as a json/csv
#[derive(Parser, Debug, Clone)]
#[command(name = "taste2file", version)]
pub struct Args {
    /// Configuration file with a JSON object holding 'email' and 'password'.
    /// If it does not exist it is created from the other flags.
    #[arg(short = 'C', long = "conf-file", default_value = "my_taste_conf.json")]
    pub conf_file: PathBuf,

    /// Email used to login to taste.io
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password used to login to taste.io
    #[arg(short, long)]
    pub password: Option<String>,

    /// Write the ratings as json
    #[arg(short, long)]
    pub json: bool,

    /// Write the ratings as csv
    #[arg(short, long)]
    pub csv: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub csv: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormats {
    pub json: bool,
    pub csv: bool,
}

impl Config {
    /// The part of the email before the `@`, which is also the user id on taste.io.
    pub fn user(&self) -> &str {
        match self.email.find('@') {
            Some(at) => &self.email[..at],
            None => &self.email,
        }
    }

    /// JSON is also written whenever no format flag was passed on the command
    /// line, whatever the file says.
    pub fn output_formats(&self, args: &Args) -> OutputFormats {
        let no_flags = !args.json && !args.csv;
        OutputFormats {
            json: args.json || self.json || no_flags,
            csv: args.csv || self.csv,
        }
    }
}

pub fn resolve(args: &Args) -> Result<Config, Error> {
    let path = args.conf_file.as_path();

    if is_missing_or_empty(path) {
        log::info!(
            "No configuration found at {}, creating one from the command line",
            path.display()
        );
        let value = json!({
            "email": args.email,
            "password": args.password,
            "json": args.json,
            "csv": args.csv,
        });
        // Only a config that validates is written to disk.
        let config = validate(&value)?;
        persist(path, &config)?;
        return Ok(config);
    }

    log::debug!("Reading configuration from {}", path.display());
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|e| {
        Error::ConfigInvalid(format!("{} is not valid JSON: {}", path.display(), e))
    })?;

    validate(&value)
}

pub fn validate(value: &Value) -> Result<Config, Error> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::ConfigInvalid(format!("{} is not of type 'object'", value)))?;

    let email = required_string(object, "email")?;
    if !is_email_shaped(email) {
        return Err(Error::ConfigInvalid(format!(
            "'{}' is not a valid email address",
            email
        )));
    }

    let password = required_string(object, "password")?;
    if password.is_empty() {
        return Err(Error::ConfigInvalid("'password' is empty".to_string()));
    }

    Ok(Config {
        email: email.to_string(),
        password: password.to_string(),
        json: optional_bool(object, "json")?,
        csv: optional_bool(object, "csv")?,
    })
}

fn required_string<'a>(
    object: &'a serde_json::Map<String, Value>,
    key: &str,
) -> Result<&'a str, Error> {
    match object.get(key) {
        None => Err(Error::ConfigInvalid(format!(
            "'{}' is a required property",
            key
        ))),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(Error::ConfigInvalid(format!(
            "'{}' must be a string, got {}",
            key, other
        ))),
    }
}

fn optional_bool(object: &serde_json::Map<String, Value>, key: &str) -> Result<bool, Error> {
    match object.get(key) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(Error::ConfigInvalid(format!(
            "'{}' must be a boolean, got {}",
            key, other
        ))),
    }
}

// local@host.rest with the usual character classes for each part
fn is_email_shaped(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, rest)) = domain.split_once('.') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_.+-".contains(c));
    let host_ok = !host.is_empty() && host.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    let rest_ok = !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');

    local_ok && host_ok && rest_ok
}

fn is_missing_or_empty(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true)
}

fn persist(path: &Path, config: &Config) -> Result<(), Error> {
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    log::info!("Saved configuration to {}", path.display());
    Ok(())
}
