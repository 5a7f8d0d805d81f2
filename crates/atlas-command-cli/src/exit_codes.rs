//! Exit codes for the `atlas` binary.
//! Library errors map through `AtlasError::exit_code`; these cover the rest.

pub const SUCCESS: i32 = 0;
pub const INPUT_ERROR: i32 = 1; // Bad file, unreadable input, not found
pub const INTERNAL_ERROR: i32 = 6; // Anything not raised by the client library

/// Exit code for a command failure.
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(atlas) = err.downcast_ref::<atlas_command::AtlasError>() {
        return atlas.exit_code();
    }
    if err.downcast_ref::<std::io::Error>().is_some()
        || err.downcast_ref::<serde_json::Error>().is_some()
    {
        return INPUT_ERROR;
    }
    INTERNAL_ERROR
}
