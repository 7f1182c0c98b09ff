use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, satisfy},
    combinator::{map, not, opt, recognize, value},
    sequence::{pair, terminated, tuple},
};

use crate::ast::Value;

/// Parse a literal value.
///
/// The DSL deliberately has no bare-identifier values: a name following
/// another name always starts the next invocation.
pub fn parse_value(input: &str) -> IResult<&str, Value> {
    alt((
        value(Value::Null, keyword("null")),
        value(Value::Bool(true), keyword("true")),
        value(Value::Bool(false), keyword("false")),
        parse_number,
        parse_double_quoted_string,
        parse_quoted_string,
    ))(input)
}

/// Match `kw` only when not followed by another identifier character, so
/// `true` never swallows the head of an identifier like `truncate`.
fn keyword(kw: &'static str) -> impl FnMut(&str) -> IResult<&str, &str> {
    move |input| {
        terminated(
            tag(kw),
            not(satisfy(|c: char| c.is_alphanumeric() || c == '_')),
        )(input)
    }
}

/// Parse a number (integer or float).
pub fn parse_number(input: &str) -> IResult<&str, Value> {
    let (rest, num_str) = recognize(tuple((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
    )))(input)?;

    let parsed = if num_str.contains('.') {
        num_str.parse::<f64>().ok().map(Value::Float)
    } else {
        num_str.parse::<i128>().ok().map(Value::Int)
    };

    match parsed {
        Some(value) => Ok((rest, value)),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        ))),
    }
}

/// Parse a single-quoted string. No escape sequences; use double quotes
/// for text containing single quotes.
pub fn parse_quoted_string(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('\'')(input)?;
    let (input, content) = take_while(|c| c != '\'')(input)?;
    let (input, _) = char('\'')(input)?;

    Ok((input, Value::String(content.to_string())))
}

/// Parse a double-quoted string. No escape sequences; use single quotes
/// for text containing double quotes.
pub fn parse_double_quoted_string(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('"')(input)?;
    let (input, content) = take_while(|c| c != '"')(input)?;
    let (input, _) = char('"')(input)?;

    Ok((input, Value::String(content.to_string())))
}

/// Parse a string literal in either quoting style.
pub fn parse_string_literal(input: &str) -> IResult<&str, String> {
    let (rest, value) = alt((parse_double_quoted_string, parse_quoted_string))(input)?;
    match value {
        Value::String(s) => Ok((rest, s)),
        _ => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        ))),
    }
}
