//! Background CSV loading.
//!
//! [`LoadJob::start`] runs the scanner off the caller's context and returns
//! a [`LoadHandle`] carrying the cancel capability, a progress stream and
//! the completion future. [`LoadSession`] layers last-request-wins on top
//! for callers that only care about their newest request.

mod job;
mod session;

pub use job::{percent_of, CancelToken, LoadHandle, LoadJob, LoadedDataset};
pub use session::{LoadSession, SessionLoad};
