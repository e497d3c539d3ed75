// Linework - a write-once HTTP response model
//
// This library assembles a single HTTP response from a line-split response
// stream: status line, headers, and a content-type aware body.

// Re-export the response model
pub use linework_response::*;
