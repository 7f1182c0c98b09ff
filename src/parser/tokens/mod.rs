pub mod identifiers;
pub mod literals;

pub use self::identifiers::{parse_comment, parse_identifier, ws_or_comment};
pub use self::literals::{
    parse_double_quoted_string, parse_number, parse_quoted_string, parse_string_literal,
    parse_value,
};
