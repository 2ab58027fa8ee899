//! Data access layer for the developer worklog.

mod loader;

#[allow(unused_imports)]
pub use loader::{
    fetch_roster,
    load,
    parse_payload,
    read_roster_file,
    spawn_load,
    validate_roster,
};
