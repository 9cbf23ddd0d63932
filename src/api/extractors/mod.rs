//! Custom request extractors.

mod path;
mod validated_json;

pub use path::ValidPath;
pub use validated_json::ValidatedJson;
