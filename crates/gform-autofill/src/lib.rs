//! gform-autofill: fill and submit Google Forms without a browser.
//!
//! The pipeline runs one way: a form page is fetched and its embedded schema
//! decoded ([`schema`]), normalized into field descriptors ([`interpret`]),
//! answered by a [`fill::FillStrategy`], assembled into the wire payload
//! ([`payload`]), and posted to the form's `formResponse` endpoint
//! ([`submit`], [`campaign`]).

pub mod campaign;
pub mod config;
pub mod endpoint;
pub mod fill;
pub mod http_client;
pub mod interpret;
pub mod payload;
pub mod progress;
pub mod report;
pub mod schema;
pub mod submit;
pub mod types;

pub use campaign::{AbortSignal, FormFiller};
pub use config::FillerConfig;
pub use endpoint::{resolve_endpoint, resolve_endpoint_with_base};
pub use fill::{FillStrategy, FirstOptionFill, RandomFill};
pub use interpret::interpret_schema;
pub use payload::{build_payload, FormIdentity, SubmissionPayload};
pub use progress::{ProgressEvent, ProgressReceiver, ProgressSender};
pub use report::{build_report, format_for_autofill, ReportEntry};
pub use schema::{extract_schema, fetch_schema, RawFormPayload};
pub use submit::Submitter;
pub use types::*;
