//! Domain-level frontend features (auth, complaints, reference data, users)
//! and their shared logic. Routes import these modules to keep view code
//! focused while keeping session handling and API access in dedicated
//! feature areas.

pub(crate) mod auth;
pub(crate) mod complaints;
pub(crate) mod reference;
pub(crate) mod users;
