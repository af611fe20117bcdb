use std::env;
use std::str::FromStr;

use crate::sighting::types::Coordinate;

/// Runtime configuration, collected once at startup.
///
/// Observer coordinates and SMTP credentials are required; everything else
/// carries the defaults the service runs with in production.
#[derive(Debug, Clone)]
pub struct Config {
    pub observer: Coordinate,
    pub tolerance_degrees: f64,
    pub poll_interval_seconds: u64,
    pub iss_api_url: String,
    pub sunrise_sunset_api_url: String,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub recipient: String,
}

const DEFAULT_TOLERANCE_DEGREES: f64 = 5.0;
const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 60;
const DEFAULT_ISS_API_URL: &str = "http://api.open-notify.org";
const DEFAULT_SUNRISE_SUNSET_API_URL: &str = "https://api.sunrise-sunset.org";
const DEFAULT_SMTP_PORT: u16 = 587;

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let observer_lat = parse_required::<f64>("OBSERVER_LAT")?;
        let observer_lon = parse_required::<f64>("OBSERVER_LON")?;

        let tolerance_degrees =
            parse_or_default("TOLERANCE_DEGREES", DEFAULT_TOLERANCE_DEGREES)?;
        let poll_interval_seconds =
            parse_or_default("POLL_INTERVAL_SECONDS", DEFAULT_POLL_INTERVAL_SECONDS)?;

        let iss_api_url = env::var("ISS_API_URL")
            .unwrap_or_else(|_| DEFAULT_ISS_API_URL.to_string());
        let sunrise_sunset_api_url = env::var("SUNRISE_SUNSET_API_URL")
            .unwrap_or_else(|_| DEFAULT_SUNRISE_SUNSET_API_URL.to_string());

        let smtp = SmtpConfig {
            server: required("SMTP_SERVER")?,
            port: parse_or_default("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            username: required("SMTP_USERNAME")?,
            password: required("SMTP_PASSWORD")?,
            recipient: required("ALERT_RECIPIENT")?,
        };

        Ok(Self {
            observer: Coordinate::new(observer_lat, observer_lon),
            tolerance_degrees,
            poll_interval_seconds,
            iss_api_url,
            sunrise_sunset_api_url,
            smtp,
        })
    }
}

fn required(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("{} is required", name))
}

fn parse_required<T: FromStr>(name: &str) -> Result<T, String> {
    required(name)?
        .parse::<T>()
        .map_err(|_| format!("{} must be a valid number", name))
}

fn parse_or_default<T: FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}
