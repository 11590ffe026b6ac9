use bnpl_core::AdminError;

/// Observable state of one hook.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    /// Last successful payload. Survives later failures.
    pub data: Option<T>,
    pub loading: bool,
    /// Last failure, cleared when the next request starts.
    pub error: Option<AdminError>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    /// Nothing loaded yet and nothing in flight.
    pub fn is_idle(&self) -> bool {
        self.data.is_none() && !self.loading && self.error.is_none()
    }
}
