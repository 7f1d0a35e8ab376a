use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const MAX_URL_LENGTH: usize = 2048;

/// Hands a URL to the platform. The shell checks whether any installed
/// handler accepts the scheme before opening it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkingOperation {
    Open { url: String },
}

impl Operation for LinkingOperation {
    type Output = LinkingResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkingOutput {
    Opened,
    Unsupported,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum LinkingError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{message}")]
    Platform { message: String },
}

pub type LinkingResult = Result<LinkingOutput, LinkingError>;

/// Builds a map-service search link for a free-text location.
pub fn map_search_url(base: &str, location: &str) -> Result<Url, LinkingError> {
    Url::parse_with_params(base, &[("api", "1"), ("query", location)]).map_err(|e| {
        LinkingError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        }
    })
}

pub fn parse_link(raw: &str) -> Result<Url, LinkingError> {
    if raw.len() > MAX_URL_LENGTH {
        return Err(LinkingError::InvalidUrl {
            url: raw.chars().take(50).collect::<String>() + "...",
            reason: format!("URL exceeds maximum length of {MAX_URL_LENGTH} bytes"),
        });
    }
    Url::parse(raw).map_err(|e| LinkingError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

pub struct Linking<E> {
    context: CapabilityContext<LinkingOperation, E>,
}

impl<Ev> Capability<Ev> for Linking<Ev> {
    type Operation = LinkingOperation;
    type MappedSelf<MappedEv> = Linking<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Linking::new(self.context.map_event(f))
    }
}

impl<E> Linking<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<LinkingOperation, E>) -> Self {
        Self { context }
    }

    pub fn open<F>(&self, url: &Url, make_event: F)
    where
        F: FnOnce(LinkingResult) -> E + Send + 'static,
    {
        let ctx = self.context.clone();
        let operation = LinkingOperation::Open {
            url: url.to_string(),
        };
        self.context.spawn(async move {
            let result = ctx.request_from_shell(operation).await;
            ctx.update_app(make_event(result));
        });
    }
}
