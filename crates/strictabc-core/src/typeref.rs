//! Parsing of type expressions into canonical [`TypeRef`] trees.
//!
//! Accepts the subscript syntax used by Python annotations
//! (`Dict[str, int]`, `Callable[[int], str]`, `int | None`, `"Forward"`)
//! and folds the spellings that denote the same type:
//! - `typing.` / `typing_extensions.` / `builtins.` qualifiers are dropped
//! - `Text` is `str`
//! - `Optional[X]` and `X | None` are `Union[X, None]`
//! - union members are a set: nested unions flatten, duplicates drop and
//!   members sort by their text with `None` last; one member stands alone
//! - `Any` is the [`TypeRef::Any`] sentinel

use std::str::FromStr;

use crate::types::TypeRef;

const STRIPPED_QUALIFIERS: &[&str] = &["typing.", "typing_extensions.", "builtins."];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeParseError {
    #[error("empty type expression")]
    Empty,
    #[error("unexpected '{token}' at offset {offset}")]
    UnexpectedToken { token: String, offset: usize },
    #[error("unexpected end of type expression")]
    UnexpectedEnd,
    #[error("unterminated string at offset {0}")]
    UnterminatedString(usize),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Ellipsis,
    LBracket,
    RBracket,
    Comma,
    Pipe,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(s) => s.clone(),
            Token::Str(s) => format!("'{s}'"),
            Token::Ellipsis => "...".into(),
            Token::LBracket => "[".into(),
            Token::RBracket => "]".into(),
            Token::Comma => ",".into(),
            Token::Pipe => "|".into(),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(Token, usize)>, TypeParseError> {
    let mut tokens = Vec::new();
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;
    while i < chars.len() {
        let (offset, c) = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '[' => {
                tokens.push((Token::LBracket, offset));
                i += 1;
            }
            ']' => {
                tokens.push((Token::RBracket, offset));
                i += 1;
            }
            ',' => {
                tokens.push((Token::Comma, offset));
                i += 1;
            }
            '|' => {
                tokens.push((Token::Pipe, offset));
                i += 1;
            }
            '\'' | '"' => {
                let quote = c;
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end].1 != quote {
                    end += 1;
                }
                if end == chars.len() {
                    return Err(TypeParseError::UnterminatedString(offset));
                }
                let inner: String = chars[start..end].iter().map(|(_, c)| *c).collect();
                tokens.push((Token::Str(inner), offset));
                i = end + 1;
            }
            '.' if text[offset..].starts_with("...") => {
                tokens.push((Token::Ellipsis, offset));
                i += 3;
            }
            c if c.is_alphanumeric() || c == '_' || c == '-' => {
                let mut ident = String::new();
                // Dotted names stay one token; whitespace around dots is dropped.
                while i < chars.len() {
                    let c = chars[i].1;
                    if c.is_alphanumeric() || c == '_' || c == '.' || (c == '-' && ident.is_empty()) {
                        ident.push(c);
                        i += 1;
                    } else {
                        break;
                    }
                }
                tokens.push((Token::Ident(ident), offset));
            }
            other => {
                return Err(TypeParseError::UnexpectedToken {
                    token: other.to_string(),
                    offset,
                })
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Result<(Token, usize), TypeParseError> {
        let tok = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(TypeParseError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(&mut self, want: Token) -> Result<(), TypeParseError> {
        let (tok, offset) = self.next()?;
        if tok == want {
            Ok(())
        } else {
            Err(TypeParseError::UnexpectedToken {
                token: tok.describe(),
                offset,
            })
        }
    }

    fn parse_union(&mut self) -> Result<TypeRef, TypeParseError> {
        let mut members = vec![self.parse_primary()?];
        while self.peek() == Some(&Token::Pipe) {
            self.pos += 1;
            members.push(self.parse_primary()?);
        }
        if members.len() == 1 {
            return Ok(members.remove(0));
        }
        Ok(union(members))
    }

    fn parse_list(&mut self) -> Result<Vec<TypeRef>, TypeParseError> {
        let mut items = Vec::new();
        if self.peek() == Some(&Token::RBracket) {
            self.pos += 1;
            return Ok(items);
        }
        loop {
            items.push(self.parse_union()?);
            let (tok, offset) = self.next()?;
            match tok {
                Token::Comma if self.peek() == Some(&Token::RBracket) => {
                    self.pos += 1;
                    return Ok(items);
                }
                Token::Comma => continue,
                Token::RBracket => return Ok(items),
                other => {
                    return Err(TypeParseError::UnexpectedToken {
                        token: other.describe(),
                        offset,
                    })
                }
            }
        }
    }

    fn parse_primary(&mut self) -> Result<TypeRef, TypeParseError> {
        let (tok, offset) = self.next()?;
        match tok {
            Token::LBracket => Ok(TypeRef::List(self.parse_list()?)),
            Token::Ellipsis => Ok(TypeRef::named("...")),
            // Forward references are parsed as the type they name.
            Token::Str(inner) => Ok(inner.parse().unwrap_or_else(|_| TypeRef::named(inner))),
            Token::Ident(raw) => {
                let args = if self.peek() == Some(&Token::LBracket) {
                    self.expect(Token::LBracket)?;
                    self.parse_list()?
                } else {
                    Vec::new()
                };
                Ok(canonicalize(&raw, args))
            }
            other => Err(TypeParseError::UnexpectedToken {
                token: other.describe(),
                offset,
            }),
        }
    }
}

fn canonical_name(raw: &str) -> &str {
    let mut name = raw;
    for qualifier in STRIPPED_QUALIFIERS {
        if let Some(rest) = name.strip_prefix(qualifier) {
            name = rest;
        }
    }
    match name {
        "Text" => "str",
        other => other,
    }
}

fn canonicalize(raw: &str, mut args: Vec<TypeRef>) -> TypeRef {
    match canonical_name(raw) {
        "Any" if args.is_empty() => TypeRef::Any,
        "Optional" if args.len() == 1 => {
            args.push(TypeRef::named("None"));
            union(args)
        }
        "Union" if !args.is_empty() => union(args),
        name => TypeRef::generic(name, args),
    }
}

fn union(members: Vec<TypeRef>) -> TypeRef {
    let mut flat: Vec<TypeRef> = Vec::with_capacity(members.len());
    for member in members {
        // Nested unions were canonicalized when built, one level is enough.
        let inner = match member {
            TypeRef::Named { name, args } if name == "Union" && !args.is_empty() => args,
            other => vec![other],
        };
        for m in inner {
            if !flat.contains(&m) {
                flat.push(m);
            }
        }
    }
    flat.sort_by_cached_key(|m| (m.is_none(), m.to_string()));
    if flat.len() == 1 {
        return flat.remove(0);
    }
    TypeRef::generic("Union", flat)
}

/// Parse a type expression.
pub fn parse_type(text: &str) -> Result<TypeRef, TypeParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(TypeParseError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let ty = parser.parse_union()?;
    if let Some((tok, offset)) = parser.tokens.get(parser.pos) {
        return Err(TypeParseError::UnexpectedToken {
            token: tok.describe(),
            offset: *offset,
        });
    }
    Ok(ty)
}

/// Parse a type expression, keeping unparseable text as an opaque name.
///
/// Whitespace is collapsed so that cosmetic spacing cannot make two opaque
/// names differ. Empty text yields `Any`.
pub fn parse_type_lenient(text: &str) -> TypeRef {
    match parse_type(text) {
        Ok(ty) => ty,
        Err(TypeParseError::Empty) => TypeRef::Any,
        Err(e) => {
            tracing::warn!(annotation = text, error = %e, "keeping unparsed annotation verbatim");
            TypeRef::named(text.split_whitespace().collect::<Vec<_>>().join(" "))
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}
