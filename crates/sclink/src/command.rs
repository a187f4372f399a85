//! Server command address patterns.

/// Create a new synth node.
pub const S_NEW: &str = "/s_new";

/// Set named controls on a node.
pub const N_SET: &str = "/n_set";

/// Free a node.
pub const N_FREE: &str = "/n_free";

/// Pause or resume a node.
pub const N_RUN: &str = "/n_run";

/// Create a new group node.
pub const G_NEW: &str = "/g_new";

/// Free every node in a group.
pub const G_FREE_ALL: &str = "/g_freeAll";

/// Print the node tree rooted at a group.
pub const G_DUMP_TREE: &str = "/g_dumpTree";

/// Toggle echoing of received commands (diagnostics dump).
pub const DUMP_OSC: &str = "/dumpOSC";

/// Drop all bundles scheduled but not yet executed.
pub const CLEAR_SCHED: &str = "/clearSched";

/// Ask the server process to exit.
pub const QUIT: &str = "/quit";
