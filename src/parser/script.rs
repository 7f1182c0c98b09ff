use nom::{
    IResult,
    branch::alt,
    character::complete::char,
    combinator::{map, opt},
    multi::{many0, separated_list0},
    sequence::{terminated, tuple},
};

use crate::ast::Value;
use crate::error::ParseError;
use crate::parser::tokens::{parse_identifier, parse_string_literal, parse_value, ws_or_comment};

/// One argument in an invocation's argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    /// `None` for positional arguments
    pub name: Option<String>,
    pub value: Value,
}

/// One parsed operation call: a name, its arguments, and an optional
/// nested block.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<Arg>,
    pub block: Option<Block>,
}

impl Invocation {
    /// Named arguments in script order.
    pub fn named_args(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.args
            .iter()
            .filter_map(|arg| arg.name.as_deref().map(|name| (name, &arg.value)))
    }

    /// The positional argument, if one was given.
    pub fn positional(&self) -> Option<&Value> {
        self.args
            .iter()
            .find(|arg| arg.name.is_none())
            .map(|arg| &arg.value)
    }
}

/// A `{ ... }` block: invocations and raw text items in script order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub items: Vec<BlockItem>,
}

/// One item inside a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockItem {
    Call(Invocation),
    /// A bare string literal: raw body text (SQL, view definition, ...)
    Text(String),
}

impl Block {
    /// The invocations in this block.
    pub fn calls(&self) -> impl Iterator<Item = &Invocation> {
        self.items.iter().filter_map(|item| match item {
            BlockItem::Call(call) => Some(call),
            BlockItem::Text(_) => None,
        })
    }

    /// Raw text items joined with newlines, or `None` when there are none.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .items
            .iter()
            .filter_map(|item| match item {
                BlockItem::Text(text) => Some(text.as_str()),
                BlockItem::Call(_) => None,
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }
}

/// Parse a complete changeset body.
pub fn parse(input: &str) -> Result<Block, ParseError> {
    match parse_script(input) {
        Ok((rest, block)) if rest.is_empty() => Ok(block),
        Ok((rest, _)) => Err(error_at(input, rest)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(error_at(input, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(error_at(input, "")),
    }
}

fn parse_script(input: &str) -> IResult<&str, Block> {
    let (input, _) = ws_or_comment(input)?;
    let (input, items) = many0(terminated(parse_block_item, ws_or_comment))(input)?;
    Ok((input, Block { items }))
}

fn parse_block_item(input: &str) -> IResult<&str, BlockItem> {
    alt((
        map(parse_string_literal, BlockItem::Text),
        map(parse_invocation, BlockItem::Call),
    ))(input)
}

/// Parse one invocation: `name`, `name(args)`, `name value`,
/// `name { ... }`, or any combination of argument form and block.
pub fn parse_invocation(input: &str) -> IResult<&str, Invocation> {
    let (input, name) = parse_identifier(input)?;
    let (input, _) = ws_or_comment(input)?;
    let (input, parens) = opt(parse_arg_list)(input)?;
    let (input, _) = ws_or_comment(input)?;
    // Bare positional form (`comment "text"`) only applies without parens.
    let (input, positional) = if parens.is_none() {
        opt(parse_value)(input)?
    } else {
        (input, None)
    };
    let (input, _) = ws_or_comment(input)?;
    let (input, block) = opt(parse_block)(input)?;

    let mut args = parens.unwrap_or_default();
    if let Some(value) = positional {
        args.push(Arg { name: None, value });
    }

    Ok((
        input,
        Invocation {
            name: name.to_string(),
            args,
            block,
        },
    ))
}

fn parse_arg_list(input: &str) -> IResult<&str, Vec<Arg>> {
    let (input, _) = char('(')(input)?;
    let (input, _) = ws_or_comment(input)?;
    let (input, args) = separated_list0(
        tuple((ws_or_comment, char(','), ws_or_comment)),
        parse_arg,
    )(input)?;
    let (input, _) = ws_or_comment(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, args))
}

fn parse_arg(input: &str) -> IResult<&str, Arg> {
    alt((
        parse_named_arg,
        map(parse_value, |value| Arg { name: None, value }),
    ))(input)
}

fn parse_named_arg(input: &str) -> IResult<&str, Arg> {
    let (input, name) = parse_identifier(input)?;
    let (input, _) = ws_or_comment(input)?;
    let (input, _) = char(':')(input)?;
    let (input, _) = ws_or_comment(input)?;
    let (input, value) = parse_value(input)?;
    Ok((
        input,
        Arg {
            name: Some(name.to_string()),
            value,
        },
    ))
}

/// Parse a `{ ... }` block.
pub fn parse_block(input: &str) -> IResult<&str, Block> {
    let (input, _) = char('{')(input)?;
    let (input, _) = ws_or_comment(input)?;
    let (input, items) = many0(terminated(parse_block_item, ws_or_comment))(input)?;
    let (input, _) = char('}')(input)?;
    Ok((input, Block { items }))
}

fn error_at(input: &str, rest: &str) -> ParseError {
    let consumed = input.len() - rest.len();
    let line = input[..consumed].matches('\n').count() + 1;
    let snippet: String = rest.trim_start().chars().take(24).collect();
    ParseError { line, snippet }
}
