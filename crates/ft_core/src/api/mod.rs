pub mod session_json;

pub use session_json::{session_state_json, session_view, SessionView, VIEW_SCHEMA_VERSION};
