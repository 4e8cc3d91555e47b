use serde::{Deserialize, Serialize};

use crate::capabilities::PincodeApiResponse;
use crate::model::RequestId;

#[derive(Serialize, Deserialize, Debug, Default)]
pub enum Event {
    #[default]
    Noop,

    // Shell -> core
    PincodeChanged {
        value: String,
    },
    SubmitLookup {
        pincode: String,
    },
    FilterChanged {
        text: String,
    },
    ConfigureEndpoint {
        base_url: String,
    },

    // Capability callbacks; never sent by the shell.
    #[serde(skip)]
    LookupResponse {
        request_id: RequestId,
        result: Box<crux_http::Result<crux_http::Response<PincodeApiResponse>>>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::PincodeChanged { .. } => "pincode_changed",
            Self::SubmitLookup { .. } => "submit_lookup",
            Self::FilterChanged { .. } => "filter_changed",
            Self::ConfigureEndpoint { .. } => "configure_endpoint",
            Self::LookupResponse { .. } => "lookup_response",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::PincodeChanged { .. } | Self::SubmitLookup { .. } | Self::FilterChanged { .. }
        )
    }
}
