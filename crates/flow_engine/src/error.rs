//! Flow engine error type

use record_store::RecordStoreError;
use thiserror::Error;

/// A flow could not finish handling a message. Expected store outcomes
/// (duplicate key, missing key) are handled inside the flows and become
/// chat replies; only failures with no conversational answer end up here.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Store(#[from] RecordStoreError),
}
