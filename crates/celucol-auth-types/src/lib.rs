//! Auth types shared across CeluCol services.
//!
//! Tokens are issued and verified by the hosted identity provider; services only
//! lift the raw bearer token out of the request and hand it to the provider.

pub mod bearer;
