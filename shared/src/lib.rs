// lib.rs - Pincode lookup core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capabilities;
pub mod event;
pub mod model;
pub mod pincode;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use crux_core::App as CruxApp;
pub use event::Event;
pub use model::{LookupPhase, Model, PostOffice, RequestId};
pub use pincode::{Pincode, PincodeError};

pub const DEFAULT_API_BASE_URL: &str = "https://api.postalpincode.in/pincode";
pub const PINCODE_LENGTH: usize = 6;

pub const INVALID_PINCODE_MESSAGE: &str = "Pincode must be exactly 6 digits";
pub const NO_DATA_MESSAGE: &str = "No data found for this pincode";
pub const NETWORK_ERROR_MESSAGE: &str = "Something went wrong while fetching data.";
pub const EMPTY_RESULTS_MESSAGE: &str = "Couldn\u{2019}t find the postal data you\u{2019}re looking for\u{2026}";

pub const TITLE_LABEL: &str = "Pincode Lookup";
pub const PINCODE_PLACEHOLDER: &str = "Enter 6-digit Pincode";
pub const FILTER_PLACEHOLDER: &str = "Filter by Post Office Name";
pub const LOOKUP_BUTTON_LABEL: &str = "Lookup";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Network,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "INVALID_PINCODE",
            Self::NotFound => "NOT_FOUND",
            Self::Network => "NETWORK_ERROR",
        }
    }

    /// Nothing retries automatically; this only tells the shell whether
    /// resubmitting the same pincode could help.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Network)
    }
}

/// Everything that can end a lookup attempt without results.
///
/// `NoMatch` and `Transport` together are the lookup failures; the user only
/// sees them apart through their messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum LookupError {
    #[error("invalid pincode: {0}")]
    InvalidPincode(#[from] PincodeError),
    #[error("no post offices found for {pincode}")]
    NoMatch { pincode: String },
    #[error("lookup request failed: {reason}")]
    Transport { reason: String },
}

impl LookupError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPincode(_) => ErrorKind::Validation,
            Self::NoMatch { .. } => ErrorKind::NotFound,
            Self::Transport { .. } => ErrorKind::Network,
        }
    }

    #[must_use]
    pub const fn user_facing_message(&self) -> &'static str {
        match self {
            Self::InvalidPincode(_) => INVALID_PINCODE_MESSAGE,
            Self::NoMatch { .. } => NO_DATA_MESSAGE,
            Self::Transport { .. } => NETWORK_ERROR_MESSAGE,
        }
    }
}

pub type LookupResult<T> = Result<T, LookupError>;

// --- View model ---

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhaseView {
    Idle,
    Loading,
    Success,
    NoMatch,
    Failed,
}

impl From<&LookupPhase> for PhaseView {
    fn from(phase: &LookupPhase) -> Self {
        match phase {
            LookupPhase::Idle => Self::Idle,
            LookupPhase::Loading { .. } => Self::Loading,
            LookupPhase::Success { .. } => Self::Success,
            LookupPhase::Failed {
                error: LookupError::NoMatch { .. },
            } => Self::NoMatch,
            LookupPhase::Failed { .. } => Self::Failed,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserFacingError {
    pub message: String,
    pub error_code: String,
    pub is_retryable: bool,
}

impl From<&LookupError> for UserFacingError {
    fn from(e: &LookupError) -> Self {
        Self {
            message: e.user_facing_message().to_owned(),
            error_code: e.kind().code().to_owned(),
            is_retryable: e.kind().is_retryable(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostOfficeCard {
    pub name: String,
    pub pincode: String,
    pub district: String,
    pub state: String,
}

impl From<&PostOffice> for PostOfficeCard {
    fn from(office: &PostOffice) -> Self {
        Self {
            name: office.name.clone(),
            pincode: office.pincode.clone(),
            district: office.district.clone(),
            state: office.state.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Labels {
    pub title: String,
    pub pincode_placeholder: String,
    pub filter_placeholder: String,
    pub lookup_button: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: TITLE_LABEL.into(),
            pincode_placeholder: PINCODE_PLACEHOLDER.into(),
            filter_placeholder: FILTER_PLACEHOLDER.into(),
            lookup_button: LOOKUP_BUTTON_LABEL.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub pincode: String,
    pub phase: PhaseView,
    pub is_loading: bool,
    pub error: Option<UserFacingError>,
    pub filter_visible: bool,
    pub filter_text: String,
    pub cards: Vec<PostOfficeCard>,
    pub result_count: usize,
    pub filtered_count: usize,
    pub empty_message: Option<String>,
    pub labels: Labels,
}

pub mod app {
    use super::*;
    use crate::capabilities::{lookup_outcome, ApiEndpoint, Capabilities, PincodeApiResponse};
    use tracing::{debug, info, instrument, warn};

    #[derive(Default)]
    pub struct App;

    impl App {
        #[instrument(skip_all, fields(pincode = %raw))]
        fn submit_lookup(raw: String, model: &mut Model, caps: &Capabilities) {
            match model.begin_lookup(raw) {
                Ok((request_id, pincode)) => {
                    let url = model.endpoint.lookup_url(&pincode);
                    info!(%request_id, %url, "lookup started");

                    caps.http
                        .get(&url)
                        .expect_json::<PincodeApiResponse>()
                        .send(move |result| Event::LookupResponse {
                            request_id,
                            result: Box::new(result),
                        });
                }
                Err(e) => {
                    debug!(error = %e, "pincode rejected, no request sent");
                }
            }

            caps.render.render();
        }

        #[instrument(skip(model, caps, result))]
        fn handle_lookup_response(
            request_id: RequestId,
            result: crux_http::Result<crux_http::Response<PincodeApiResponse>>,
            model: &mut Model,
            caps: &Capabilities,
        ) {
            let Some(pincode) = model.pending_pincode(request_id).cloned() else {
                debug!(
                    latest = %model.last_request_id(),
                    "discarding response from superseded lookup"
                );
                return;
            };

            let outcome = lookup_outcome(&pincode, result);
            match &outcome {
                Ok(offices) => info!(%pincode, count = offices.len(), "lookup succeeded"),
                Err(e @ LookupError::Transport { .. }) => {
                    warn!(%pincode, error = %e, "lookup failed");
                }
                Err(e) => info!(%pincode, error = %e, "lookup found nothing"),
            }

            model.finish_lookup(request_id, outcome);
            caps.render.render();
        }

        fn configure_endpoint(base_url: &str, model: &mut Model, caps: &Capabilities) {
            match ApiEndpoint::new(base_url) {
                Ok(endpoint) => {
                    info!(endpoint = endpoint.as_str(), "api endpoint configured");
                    model.endpoint = endpoint;
                    caps.render.render();
                }
                Err(e) => {
                    warn!(error = %e, "rejected api endpoint, keeping {}", model.endpoint.as_str());
                }
            }
        }

        fn empty_message(model: &Model) -> Option<String> {
            let nothing_to_show =
                model.filter_visible() && !model.is_loading() && model.filtered_count() == 0;
            nothing_to_show.then(|| EMPTY_RESULTS_MESSAGE.to_owned())
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            debug!(
                event = event.name(),
                user = event.is_user_initiated(),
                phase = model.phase.name(),
                "update"
            );

            match event {
                Event::Noop => {}

                Event::PincodeChanged { value } => {
                    model.pincode = value;
                    caps.render.render();
                }

                Event::SubmitLookup { pincode } => {
                    Self::submit_lookup(pincode, model, caps);
                }

                Event::FilterChanged { text } => {
                    if model.apply_filter(text) {
                        caps.render.render();
                    } else {
                        debug!(phase = model.phase.name(), "filter ignored without results");
                    }
                }

                Event::ConfigureEndpoint { base_url } => {
                    Self::configure_endpoint(&base_url, model, caps);
                }

                Event::LookupResponse { request_id, result } => {
                    Self::handle_lookup_response(request_id, *result, model, caps);
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            ViewModel {
                pincode: model.pincode.clone(),
                phase: PhaseView::from(&model.phase),
                is_loading: model.is_loading(),
                error: model.error().map(UserFacingError::from),
                filter_visible: model.filter_visible(),
                filter_text: model.filter_text().to_owned(),
                cards: model.filtered_results().map(PostOfficeCard::from).collect(),
                result_count: model.results().len(),
                filtered_count: model.filtered_count(),
                empty_message: Self::empty_message(model),
                labels: Labels::default(),
            }
        }
    }
}
