//! # Region Properties
//!
//! Parses the `key=value` list that may follow a region's `#` marker,
//! e.g. `# color=red width=2 tag={Group 1} source`. Tags are collected
//! separately since a region may carry several of them.

use nom::{
    branch::alt,
    bytes::complete::{take_till1, take_until, take_while1},
    character::complete::{char as nom_char, multispace0, multispace1},
    combinator::{map, opt},
    error::{context, VerboseError},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use std::collections::HashMap;

type PropResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

#[derive(Debug, PartialEq, Clone)]
pub enum AttributeValue {
    String(String),
    Number(f64),
    NumberList(Vec<f64>),
    Flag(bool),
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Properties {
    pub attributes: HashMap<String, AttributeValue>,
    pub tags: Vec<String>,
}

impl Properties {
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.tags.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

const FLAG_KEYS: &[&str] = &[
    "select", "highlite", "dash", "fixed", "edit", "move", "rotate", "delete", "include",
    "source", "background", "fill", "textrotate",
];
const NUMBER_KEYS: &[&str] = &["width", "size", "textangle", "composite"];
const NUMBER_LIST_KEYS: &[&str] = &["dashlist", "line"];

fn parse_key(input: &str) -> PropResult<'_, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

fn parse_delimited_string(input: &str) -> PropResult<'_, String> {
    context(
        "delimited string value",
        alt((
            map(delimited(nom_char('"'), take_until("\""), nom_char('"')), str::to_string),
            map(delimited(nom_char('\''), take_until("'"), nom_char('\'')), str::to_string),
            map(delimited(nom_char('{'), take_until("}"), nom_char('}')), str::to_string),
        )),
    )(input)
}

fn parse_bare_word(input: &str) -> PropResult<'_, &str> {
    take_till1(|c: char| c.is_whitespace() || c == '=' || c == '#')(input)
}

fn parse_value<'a>(key: &str, input: &'a str) -> PropResult<'a, AttributeValue> {
    let key = key.to_ascii_lowercase();
    if FLAG_KEYS.contains(&key.as_str()) {
        if let Ok((rest, flag)) = alt((nom_char::<&str, VerboseError<&str>>('1'), nom_char('0')))(input) {
            return Ok((rest, AttributeValue::Flag(flag == '1')));
        }
    }
    if NUMBER_LIST_KEYS.contains(&key.as_str()) {
        if let Ok((rest, list)) = separated_list1(multispace1, double::<&str, VerboseError<&str>>)(input) {
            return Ok((rest, AttributeValue::NumberList(list)));
        }
    }
    if NUMBER_KEYS.contains(&key.as_str()) {
        if let Ok((rest, n)) = double::<&str, VerboseError<&str>>(input) {
            return Ok((rest, AttributeValue::Number(n)));
        }
    }
    alt((
        map(parse_delimited_string, AttributeValue::String),
        map(parse_bare_word, |s| AttributeValue::String(s.to_string())),
    ))(input)
}

/// Parses one `key=value` pair or a valueless flag.
fn parse_attribute(input: &str) -> PropResult<'_, (String, AttributeValue)> {
    let (i, key) = parse_key(input)?;
    let (i, value) = opt(preceded(tuple((multispace0, nom_char('='), multispace0)), |v| {
        parse_value(key, v)
    }))(i)?;
    let value = value.unwrap_or(AttributeValue::Flag(true));
    Ok((i, (key.to_string(), value)))
}

/// Parses as many attributes as possible, returning them with any text that
/// could not be understood.
pub fn parse_properties(input: &str) -> (Properties, &str) {
    let mut props = Properties::default();
    let mut rest = input.trim_start();
    while !rest.is_empty() {
        match parse_attribute(rest) {
            Ok((next, (key, value))) => {
                if key.eq_ignore_ascii_case("tag") {
                    if let AttributeValue::String(tag) = value {
                        props.tags.push(tag);
                    }
                } else {
                    props.attributes.insert(key, value);
                }
                rest = next.trim_start();
            }
            Err(_) => break,
        }
    }
    (props, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_properties() {
        let (props, rest) = parse_properties(r#"color=green dashlist=8 3 width=1 font="helvetica 10 normal" select=1 highlite=0"#);
        assert_eq!(rest, "");
        assert_eq!(props.get("color"), Some(&AttributeValue::String("green".to_string())));
        assert_eq!(props.get("dashlist"), Some(&AttributeValue::NumberList(vec![8.0, 3.0])));
        assert_eq!(props.get("width"), Some(&AttributeValue::Number(1.0)));
        assert_eq!(props.get("font"), Some(&AttributeValue::String("helvetica 10 normal".to_string())));
        assert_eq!(props.get("select"), Some(&AttributeValue::Flag(true)));
        assert_eq!(props.get("highlite"), Some(&AttributeValue::Flag(false)));
    }

    #[test]
    fn test_valueless_flags_and_tags() {
        let (props, rest) = parse_properties("source tag={Group 1} tag={Group 2} background");
        assert_eq!(rest, "");
        assert_eq!(props.get("source"), Some(&AttributeValue::Flag(true)));
        assert_eq!(props.get("background"), Some(&AttributeValue::Flag(true)));
        assert_eq!(props.tags, vec!["Group 1".to_string(), "Group 2".to_string()]);
    }

    #[test]
    fn test_text_with_quotes_inside_braces() {
        let (props, _) = parse_properties(r#"text={This message has both a " and ' in it}"#);
        assert_eq!(
            props.get("text"),
            Some(&AttributeValue::String(r#"This message has both a " and ' in it"#.to_string()))
        );
    }

    #[test]
    fn test_unparsed_remainder_is_returned() {
        let (props, rest) = parse_properties("color=red ?? width=3");
        assert_eq!(props.get("color"), Some(&AttributeValue::String("red".to_string())));
        assert_eq!(rest, "?? width=3");
    }

    #[test]
    fn test_empty_property_list() {
        let (props, rest) = parse_properties("   ");
        assert!(props.is_empty());
        assert_eq!(rest, "");
        let (props, _) = parse_properties("tag={a}");
        assert!(!props.is_empty());
    }
}
