use std::time::Duration;

use bon::Builder;
use url::Url;

use crate::Result;
use crate::error::Error;

pub const PRODUCTION_BASE_URL: &str = "https://appapi2.bankid.com/rp/v5.1";
pub const TEST_BASE_URL: &str = "https://appapi2.test.bankid.com/rp/v5.1";
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client configuration.
///
/// [`Config::default`] targets production, [`Config::test`] the public test environment.
#[non_exhaustive]
#[derive(Builder, Clone, Debug)]
pub struct Config {
    #[builder(default = production_base_url())]
    pub base_url: Url,
    #[builder(into, default = USER_AGENT.to_owned())]
    pub user_agent: String,
    /// Applied to HTTP clients built by this crate. A client passed to
    /// [`crate::Client::with_http_client`] keeps its own timeout.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl Config {
    pub fn from_raw(base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self::builder().base_url(base_url).build())
    }

    #[must_use]
    pub fn test() -> Self {
        Self::builder().base_url(test_base_url()).build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url)?;
    if url.cannot_be_a_base() {
        return Err(Error::validation(format!(
            "base url `{base_url}` cannot be used as a base"
        )));
    }
    Ok(url)
}

fn production_base_url() -> Url {
    Url::parse(PRODUCTION_BASE_URL).unwrap_or_else(|_| unreachable!("production url is valid"))
}

fn test_base_url() -> Url {
    Url::parse(TEST_BASE_URL).unwrap_or_else(|_| unreachable!("test url is valid"))
}
