//! Transport implementations behind the dispatch bridge.
//!
//! Both transports carry one framed or HTTP-posted JSON payload per call and
//! hand back the raw response value; envelope decoding is a separate layer.

pub mod http;
#[cfg(unix)]
pub mod socket;
