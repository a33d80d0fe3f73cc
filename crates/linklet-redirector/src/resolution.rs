/// Terminal outcome of resolving a short code.
///
/// `NotFound` and `Expired` are user-visible error states, not failures;
/// `Redirect` carries the navigation target and means a click recording
/// has been (or will be) dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The code resolved to an unexpired link; navigate to `target`.
    Redirect { target: String },
    /// No link carries this code.
    NotFound,
    /// The link exists but its expiry instant has passed.
    Expired,
}

impl Resolution {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Resolution::Redirect { .. })
    }
}
