//! File-record models handed to the embedded widget.

pub mod list;
pub mod record;
