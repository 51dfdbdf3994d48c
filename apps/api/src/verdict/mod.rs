// Presentation parsers for the free tier.
// Regex extraction is a decorator over the roast text, never a required parse.

pub mod handlers;
pub mod summary;
