mod array;
mod number;
mod object;
mod parse;
mod stringify;
mod value;

pub use array::JsonArray;
pub use number::JsonNumber;
pub use object::JsonObject;
pub use parse::{MAX_NESTING, parse_json_iter, parse_json_reader, parse_json_str};
pub use stringify::{escape_json_string, stringify};
pub use value::JsonValue;
