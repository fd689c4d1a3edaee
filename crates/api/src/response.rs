//! Shared response envelope types for API handlers.
//!
//! Every body is `{ "data": ... }`. Operations the front-end reports with
//! a toast add a `"notice"`.

use beautyboss_core::notice::Notice;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "notice": {...} }`. The notice is omitted when `None`.
#[derive(Debug, Serialize)]
pub struct NoticeResponse<T: Serialize> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl<T: Serialize> NoticeResponse<T> {
    pub fn new(data: T, notice: Notice) -> Self {
        Self {
            data,
            notice: Some(notice),
        }
    }

    pub fn silent(data: T) -> Self {
        Self { data, notice: None }
    }
}
