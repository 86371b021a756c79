// HTTP boundary for resume parsing and advisory.
// Parsing itself lives in crate::extraction; this module only moves bytes and
// maps failures to status codes.

pub mod handlers;
