#![deny(unsafe_code)]

pub mod merge;
pub mod store;
pub mod submit;

pub use merge::merge_view;
pub use store::{PendingPatch, StagingStore};
pub use submit::{
    ResultSink, SubmissionCoordinator, SubmissionOutcome, SubmitError, plan_submission,
};
