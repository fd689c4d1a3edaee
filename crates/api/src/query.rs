//! Query parameter types shared by several handler modules.

use serde::Deserialize;

/// `?search=&limit=&offset=`. Values are clamped by the handlers.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?path=` for the dashboard shell and route resolution.
#[derive(Debug, Deserialize)]
pub struct PathParams {
    pub path: Option<String>,
}
