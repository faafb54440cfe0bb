//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod session_record_store;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{DEMO_USER_ID, FixtureLoginService, LoginService, demo_user};
#[cfg(test)]
pub use session_record_store::MockSessionRecordStore;
pub use session_record_store::{
    FixtureSessionRecordStore, SESSION_RECORD_KEY, SessionRecordError, SessionRecordStore,
};
