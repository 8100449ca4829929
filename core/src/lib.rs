//! Query, fetch, and decode core for Space-Track conjunction data messages.
//!
//! The modules follow the single run the driver performs: build the CDM
//! query, submit it together with the operator's credentials, then decode and
//! validate the returned records into the typed model.

pub mod client;
pub mod decode;
pub mod model;
pub mod prelude;
pub mod query;
pub mod telemetry;

pub use prelude::{AlertError, AlertResult, CdmSource, Stage, ValidationError};
