use std::{env::var, sync::Arc};

use eyre::{Context, Error};
use model::statistics::DAILY_OPERATING_MINUTES;

#[derive(Clone)]
pub struct Env(Arc<EnvInner>);

#[derive(Clone)]
pub struct EnvInner {
    mongo_url: String,
    operating_minutes: u32,
    dashboard_start: Option<String>,
    dashboard_end: Option<String>,
}

impl Env {
    pub fn mongo_url(&self) -> &str {
        &self.0.mongo_url
    }

    /// Bookable minutes of one space per day.
    pub fn operating_minutes(&self) -> u32 {
        self.0.operating_minutes
    }

    pub fn dashboard_start(&self) -> Option<&str> {
        self.0.dashboard_start.as_deref()
    }

    pub fn dashboard_end(&self) -> Option<&str> {
        self.0.dashboard_end.as_deref()
    }

    /// Reads the process environment; `.env` is expected to be applied by the caller.
    pub fn load() -> Result<Env, Error> {
        Ok(Env(Arc::new(EnvInner {
            mongo_url: var("MONGO_URL").context("MONGO_URL is not set")?,
            operating_minutes: parse_operating_minutes(var("OPERATING_MINUTES").ok())?,
            dashboard_start: var("DASHBOARD_START").ok(),
            dashboard_end: var("DASHBOARD_END").ok(),
        })))
    }
}

fn parse_operating_minutes(value: Option<String>) -> Result<u32, Error> {
    let Some(value) = value else {
        return Ok(DAILY_OPERATING_MINUTES);
    };
    let minutes = value
        .trim()
        .parse::<u32>()
        .with_context(|| format!("OPERATING_MINUTES is not a number: {:?}", value))?;
    if minutes == 0 {
        eyre::bail!("OPERATING_MINUTES must be positive");
    }
    Ok(minutes)
}
