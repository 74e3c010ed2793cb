//! Response envelopes.
//!
//! Some endpoints wrap payloads as `{ "data": ... }` and others answer with the
//! bare value. Both shapes decode to the same domain value here so nothing
//! above the adapter sees the difference.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ListEnvelope<R> {
    Wrapped { data: Vec<R> },
    Bare(Vec<R>),
}

impl<R> ListEnvelope<R> {
    pub(super) fn into_rows(self) -> Vec<R> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ItemEnvelope<R> {
    Wrapped { data: R },
    Bare(R),
}

impl<R> ItemEnvelope<R> {
    pub(super) fn into_record(self) -> R {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}
