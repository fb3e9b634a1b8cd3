pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::bootstrap::build_session;
pub use use_cases::lifecycle::StreamSession;
