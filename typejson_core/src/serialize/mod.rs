//! Encode path: reflected values to JSON text.

mod exclusions;
mod options;
mod serializer;

use exclusions::merge_exclusions;
pub use options::SerializerOptions;
pub use serializer::{MAX_DEPTH, Serializer, to_json_string};
