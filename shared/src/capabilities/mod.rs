//! Effects the core asks the shell to perform.
//!
//! We use Crux's built-in Render and Http capabilities directly; the shell
//! executes the request and feeds the result back as an [`Event`].

pub mod http;

pub use self::http::{
    classify_response, lookup_outcome, ApiEndpoint, EndpointError, PincodeApiResponse,
    PincodeRecord,
};

pub use crux_core::render::Render;
pub use crux_http::Http;

// The derive names `App` and `Event` unqualified, so both must be in scope.
use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
}
