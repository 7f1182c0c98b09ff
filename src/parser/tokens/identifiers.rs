use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{multispace1, not_line_ending},
    combinator::value,
    multi::many0,
    sequence::pair,
};

/// Parse whitespace or comments.
pub fn ws_or_comment(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((value((), multispace1), parse_comment))))(input)
}

/// Parse a single comment line (// ... or -- ...).
pub fn parse_comment(input: &str) -> IResult<&str, ()> {
    value((), pair(alt((tag("//"), tag("--"))), not_line_ending))(input)
}

/// Parse an identifier (operation or attribute name).
pub fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}
