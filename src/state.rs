use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    /// Shared admin secret. `None` means admin routes are not usable yet,
    /// which is a server configuration error, not an authorization failure.
    pub admin_key: Option<String>,
}
