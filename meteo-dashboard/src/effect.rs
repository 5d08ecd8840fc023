//! Effects - side effects declared by the reducer
//!
//! Returned from the reducer and performed by the main loop, which keeps the
//! reducer pure while making the fetch explicit.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch `GET {base}/{path}/data`
    FetchMapData { path: String },
}
