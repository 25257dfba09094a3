//! Application-wide constants

/// Child generations inlined by `GET /api/menus`.
pub const DEFAULT_LIST_ALL_DEPTH: u32 = 3;

/// Child generations inlined by `GET /api/menus/hierarchy`.
pub const DEFAULT_HIERARCHY_DEPTH: u32 = 4;

/// Default for `GET /api/menus/{id}?depth=` when the service is asked without a depth.
pub const DEFAULT_EXPAND_DEPTH: u32 = 5;

/// Upper bound on any requested expansion depth.
pub const MAX_EXPAND_DEPTH: u32 = 64;

pub const DEFAULT_LOG_FILTER: &str = "info,menu_server=debug";
pub const LOG_FILE_PREFIX: &str = "menu-server.log";
