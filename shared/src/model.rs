use serde::{Deserialize, Serialize};
use std::fmt;

use crate::capabilities::http::ApiEndpoint;
use crate::pincode::Pincode;
use crate::LookupError;

/// One post office as returned by the postal API. Fields the API sends
/// beyond these four are dropped during deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOffice {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Pincode", default)]
    pub pincode: String,
    #[serde(rename = "District", default)]
    pub district: String,
    #[serde(rename = "State", default)]
    pub state: String,
}

/// Tag carried by every in-flight lookup. Strictly increasing per model.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl RequestId {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum LookupPhase {
    #[default]
    Idle,
    Loading {
        request_id: RequestId,
        pincode: Pincode,
    },
    Success {
        pincode: Pincode,
        results: Vec<PostOffice>,
    },
    /// Invalid input, no match, or transport failure; see [`LookupError`].
    Failed {
        error: LookupError,
    },
}

impl LookupPhase {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Success { .. } => "success",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Indices of `results` whose name contains `needle`, ignoring case.
/// An empty needle keeps every entry.
#[must_use]
pub fn filter_by_name(results: &[PostOffice], needle: &str) -> Vec<usize> {
    let needle = needle.to_lowercase();
    results
        .iter()
        .enumerate()
        .filter(|(_, office)| office.name.to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect()
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Model {
    /// Raw text of the pincode input, unvalidated.
    pub pincode: String,
    pub phase: LookupPhase,

    // Filter state is orthogonal to the phase and only meaningful on success.
    filter_text: String,
    filtered: Vec<usize>,

    next_request_id: RequestId,
    pub endpoint: ApiEndpoint,
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets lookup state, validates `raw`, and on success moves to
    /// `Loading` under a fresh request id. On failure the phase is
    /// `Failed` and no request must be issued.
    pub fn begin_lookup(&mut self, raw: String) -> Result<(RequestId, Pincode), LookupError> {
        self.pincode = raw;
        self.filter_text.clear();
        self.filtered.clear();

        let pincode = match Pincode::parse(&self.pincode) {
            Ok(pincode) => pincode,
            Err(e) => {
                let error = LookupError::InvalidPincode(e);
                self.phase = LookupPhase::Failed {
                    error: error.clone(),
                };
                return Err(error);
            }
        };

        self.next_request_id = self.next_request_id.next();
        let request_id = self.next_request_id;
        self.phase = LookupPhase::Loading {
            request_id,
            pincode: pincode.clone(),
        };

        Ok((request_id, pincode))
    }

    /// The pincode of the lookup tagged `request_id`, if it is still the one
    /// in flight.
    #[must_use]
    pub fn pending_pincode(&self, request_id: RequestId) -> Option<&Pincode> {
        match &self.phase {
            LookupPhase::Loading {
                request_id: current,
                pincode,
            } if *current == request_id => Some(pincode),
            _ => None,
        }
    }

    /// Applies the outcome of `request_id`. Returns `false` and leaves the
    /// model untouched when that request has been superseded.
    pub fn finish_lookup(
        &mut self,
        request_id: RequestId,
        outcome: Result<Vec<PostOffice>, LookupError>,
    ) -> bool {
        let Some(pincode) = self.pending_pincode(request_id).cloned() else {
            return false;
        };

        self.filter_text.clear();
        match outcome {
            Ok(results) => {
                self.filtered = (0..results.len()).collect();
                self.phase = LookupPhase::Success { pincode, results };
            }
            Err(error) => {
                self.filtered.clear();
                self.phase = LookupPhase::Failed { error };
            }
        }
        true
    }

    /// Recomputes the filtered view. Inert unless the last lookup succeeded.
    pub fn apply_filter(&mut self, text: String) -> bool {
        let LookupPhase::Success { results, .. } = &self.phase else {
            return false;
        };

        self.filtered = filter_by_name(results, &text);
        self.filter_text = text;
        true
    }

    #[must_use]
    pub fn results(&self) -> &[PostOffice] {
        match &self.phase {
            LookupPhase::Success { results, .. } => results,
            _ => &[],
        }
    }

    pub fn filtered_results(&self) -> impl Iterator<Item = &PostOffice> + '_ {
        let results = self.results();
        self.filtered.iter().filter_map(move |&index| results.get(index))
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    #[must_use]
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, LookupPhase::Loading { .. })
    }

    #[must_use]
    pub const fn filter_visible(&self) -> bool {
        matches!(self.phase, LookupPhase::Success { .. })
    }

    #[must_use]
    pub fn error(&self) -> Option<&LookupError> {
        match &self.phase {
            LookupPhase::Failed { error } => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        self.error().map(LookupError::user_facing_message)
    }

    #[must_use]
    pub const fn last_request_id(&self) -> RequestId {
        self.next_request_id
    }
}
