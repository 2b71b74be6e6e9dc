/* src/i18n/core/src/format/message.rs */

//! A compact ICU MessageFormat subset.
//!
//! Supported: `{arg}`, `{arg, number[, preset]}`, `{arg, date[, preset]}`,
//! `{arg, time[, preset]}`, `{arg, plural, [offset:N] =N {..} one {..} other {..}}`,
//! `{arg, selectordinal, ..}`, `{arg, select, key {..} other {..}}`, `#` inside
//! plural branches and apostrophe quoting (`''`, `'{literal}'`).

use chrono::{DateTime, Utc};

use super::plural::{self, PluralCategory, PluralKind};
use crate::errors::I18nError;
use crate::locale::Locale;
use crate::values::{Value, Values};

/// Formatting services a message needs while rendering its arguments.
pub trait FormatContext {
  fn locale(&self) -> &Locale;
  fn number(&self, value: f64, preset: Option<&str>) -> Result<String, I18nError>;
  fn date_time(
    &self,
    value: DateTime<Utc>,
    preset: Option<&str>,
    time_only: bool,
  ) -> Result<String, I18nError>;
}

#[derive(Debug, Clone, PartialEq)]
enum Selector {
  Exact(f64),
  Category(PluralCategory),
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
  Text(String),
  Arg(String),
  Pound,
  Number { arg: String, preset: Option<String> },
  Date { arg: String, preset: Option<String>, time_only: bool },
  Plural { arg: String, kind: PluralKind, offset: f64, branches: Vec<(Selector, Vec<Node>)> },
  Select { arg: String, branches: Vec<(String, Vec<Node>)> },
}

/// A parsed message, ready to be formatted against values.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
  nodes: Vec<Node>,
}

impl Message {
  /// Parse `source`; the error is a human-readable syntax description.
  pub fn parse(source: &str) -> Result<Self, String> {
    let mut parser = Parser { chars: source.chars().collect(), pos: 0 };
    let nodes = parser.nodes(0, false)?;
    Ok(Self { nodes })
  }

  pub fn format(&self, ctx: &dyn FormatContext, values: &Values) -> Result<String, I18nError> {
    let mut out = String::new();
    render(&self.nodes, ctx, values, None, &mut out)?;
    Ok(out)
  }
}

struct Parser {
  chars: Vec<char>,
  pos: usize,
}

impl Parser {
  fn peek(&self) -> Option<char> {
    self.chars.get(self.pos).copied()
  }

  fn peek_at(&self, offset: usize) -> Option<char> {
    self.chars.get(self.pos + offset).copied()
  }

  fn skip_ws(&mut self) {
    while self.peek().is_some_and(char::is_whitespace) {
      self.pos += 1;
    }
  }

  fn expect(&mut self, ch: char) -> Result<(), String> {
    self.skip_ws();
    if self.peek() == Some(ch) {
      self.pos += 1;
      Ok(())
    } else {
      Err(format!("expected '{ch}' at offset {}", self.pos))
    }
  }

  fn word(&mut self) -> String {
    self.skip_ws();
    let start = self.pos;
    while self.peek().is_some_and(|c| !c.is_whitespace() && !matches!(c, ',' | '{' | '}')) {
      self.pos += 1;
    }
    self.chars[start..self.pos].iter().collect()
  }

  fn nodes(&mut self, depth: usize, in_plural: bool) -> Result<Vec<Node>, String> {
    let mut nodes = Vec::new();
    let mut text = String::new();
    let flush = |text: &mut String, nodes: &mut Vec<Node>| {
      if !text.is_empty() {
        nodes.push(Node::Text(std::mem::take(text)));
      }
    };

    while let Some(ch) = self.peek() {
      match ch {
        '{' => {
          flush(&mut text, &mut nodes);
          self.pos += 1;
          nodes.push(self.argument(depth, in_plural)?);
        }
        '}' if depth == 0 => return Err(format!("unmatched '}}' at offset {}", self.pos)),
        '}' => break,
        '#' if in_plural => {
          flush(&mut text, &mut nodes);
          self.pos += 1;
          nodes.push(Node::Pound);
        }
        '\'' => self.quoted(in_plural, &mut text),
        _ => {
          text.push(ch);
          self.pos += 1;
        }
      }
    }
    if depth > 0 && self.peek().is_none() {
      return Err("unterminated argument".to_string());
    }
    flush(&mut text, &mut nodes);
    Ok(nodes)
  }

  fn quoted(&mut self, in_plural: bool, text: &mut String) {
    match self.peek_at(1) {
      Some('\'') => {
        text.push('\'');
        self.pos += 2;
      }
      Some(c) if matches!(c, '{' | '}') || (c == '#' && in_plural) => {
        self.pos += 1;
        while let Some(c) = self.peek() {
          self.pos += 1;
          if c == '\'' {
            if self.peek() == Some('\'') {
              text.push('\'');
              self.pos += 1;
            } else {
              return;
            }
          } else {
            text.push(c);
          }
        }
      }
      _ => {
        text.push('\'');
        self.pos += 1;
      }
    }
  }

  fn argument(&mut self, depth: usize, in_plural: bool) -> Result<Node, String> {
    let arg = self.word();
    if arg.is_empty() {
      return Err(format!("empty argument name at offset {}", self.pos));
    }
    self.skip_ws();
    match self.peek() {
      Some('}') => {
        self.pos += 1;
        return Ok(Node::Arg(arg));
      }
      Some(',') => self.pos += 1,
      _ => return Err(format!("expected ',' or '}}' after \"{arg}\"")),
    }

    let kind = self.word();
    match kind.as_str() {
      "number" | "date" | "time" => {
        let preset = self.simple_style()?;
        Ok(if kind == "number" {
          Node::Number { arg, preset }
        } else {
          Node::Date { arg, preset, time_only: kind == "time" }
        })
      }
      "plural" | "selectordinal" => {
        self.expect(',')?;
        self.skip_ws();
        let mut offset = 0.0;
        if self.chars[self.pos..].starts_with(&['o', 'f', 'f', 's', 'e', 't', ':']) {
          self.pos += 7;
          let raw = self.word();
          offset = raw.parse().map_err(|_| format!("invalid plural offset \"{raw}\""))?;
        }
        let raw_branches = self.branches(depth, true)?;
        let mut branches = Vec::with_capacity(raw_branches.len());
        for (key, body) in raw_branches {
          let selector = if let Some(exact) = key.strip_prefix('=') {
            Selector::Exact(exact.parse().map_err(|_| format!("invalid plural selector \"{key}\""))?)
          } else {
            Selector::Category(
              PluralCategory::from_keyword(&key)
                .ok_or_else(|| format!("unknown plural category \"{key}\""))?,
            )
          };
          branches.push((selector, body));
        }
        if !branches.iter().any(|(s, _)| *s == Selector::Category(PluralCategory::Other)) {
          return Err(format!("plural argument \"{arg}\" has no 'other' branch"));
        }
        let kind = if kind == "plural" { PluralKind::Cardinal } else { PluralKind::Ordinal };
        Ok(Node::Plural { arg, kind, offset, branches })
      }
      "select" => {
        self.expect(',')?;
        let branches = self.branches(depth, in_plural)?;
        if !branches.iter().any(|(k, _)| k == "other") {
          return Err(format!("select argument \"{arg}\" has no 'other' branch"));
        }
        Ok(Node::Select { arg, branches })
      }
      other => Err(format!("unsupported argument type \"{other}\"")),
    }
  }

  fn simple_style(&mut self) -> Result<Option<String>, String> {
    self.skip_ws();
    match self.peek() {
      Some('}') => {
        self.pos += 1;
        Ok(None)
      }
      Some(',') => {
        self.pos += 1;
        let start = self.pos;
        while self.peek().is_some_and(|c| c != '}') {
          self.pos += 1;
        }
        let style: String = self.chars[start..self.pos].iter().collect();
        self.expect('}')?;
        let style = style.trim();
        Ok((!style.is_empty()).then(|| style.to_string()))
      }
      _ => Err(format!("malformed format argument at offset {}", self.pos)),
    }
  }

  fn branches(&mut self, depth: usize, in_plural: bool) -> Result<Vec<(String, Vec<Node>)>, String> {
    let mut branches = Vec::new();
    loop {
      self.skip_ws();
      match self.peek() {
        Some('}') => {
          self.pos += 1;
          return Ok(branches);
        }
        None => return Err("unterminated branch list".to_string()),
        _ => {}
      }
      let key = self.word();
      if key.is_empty() {
        return Err(format!("expected branch key at offset {}", self.pos));
      }
      self.expect('{')?;
      let body = self.nodes(depth + 1, in_plural)?;
      self.expect('}')?;
      branches.push((key, body));
    }
  }
}

fn lookup<'v>(values: &'v Values, arg: &str) -> Result<&'v Value, I18nError> {
  values.get(arg).ok_or_else(|| I18nError::formatting(format!("missing value for \"{arg}\"")))
}

fn number_of(values: &Values, arg: &str) -> Result<f64, I18nError> {
  lookup(values, arg)?
    .as_number()
    .ok_or_else(|| I18nError::formatting(format!("value for \"{arg}\" is not a number")))
}

fn render(
  nodes: &[Node],
  ctx: &dyn FormatContext,
  values: &Values,
  pound: Option<f64>,
  out: &mut String,
) -> Result<(), I18nError> {
  for node in nodes {
    match node {
      Node::Text(text) => out.push_str(text),
      Node::Pound => match pound {
        Some(n) => out.push_str(&ctx.number(n, None)?),
        None => out.push('#'),
      },
      Node::Arg(arg) => match lookup(values, arg)? {
        Value::Text(text) => out.push_str(text),
        Value::Number(n) => out.push_str(&ctx.number(*n, None)?),
        Value::Date(d) => out.push_str(&ctx.date_time(*d, None, false)?),
      },
      Node::Number { arg, preset } => {
        out.push_str(&ctx.number(number_of(values, arg)?, preset.as_deref())?);
      }
      Node::Date { arg, preset, time_only } => {
        let date = match lookup(values, arg)? {
          Value::Date(d) => *d,
          // Numbers are epoch milliseconds
          #[allow(clippy::cast_possible_truncation)]
          Value::Number(ms) => DateTime::from_timestamp_millis(*ms as i64).ok_or_else(|| {
            I18nError::formatting(format!("value for \"{arg}\" is out of range"))
          })?,
          Value::Text(_) => {
            return Err(I18nError::formatting(format!("value for \"{arg}\" is not a date")));
          }
        };
        out.push_str(&ctx.date_time(date, preset.as_deref(), *time_only)?);
      }
      Node::Plural { arg, kind, offset, branches } => {
        let n = number_of(values, arg)?;
        let exact = branches.iter().find(|(s, _)| *s == Selector::Exact(n));
        let body = match exact {
          Some((_, body)) => body,
          None => {
            let category = plural::select(ctx.locale(), *kind, n - offset);
            branch(branches, &Selector::Category(category))
              .or_else(|| branch(branches, &Selector::Category(PluralCategory::Other)))
              .ok_or_else(|| I18nError::formatting(format!("no branch for \"{arg}\"")))?
          }
        };
        render(body, ctx, values, Some(n - offset), out)?;
      }
      Node::Select { arg, branches } => {
        let key = match lookup(values, arg)? {
          Value::Text(text) => text.clone(),
          Value::Number(n) => n.to_string(),
          Value::Date(d) => d.to_rfc3339(),
        };
        let body = branches
          .iter()
          .find(|(k, _)| *k == key)
          .or_else(|| branches.iter().find(|(k, _)| k == "other"))
          .map(|(_, body)| body)
          .ok_or_else(|| I18nError::formatting(format!("no branch for \"{arg}\"")))?;
        render(body, ctx, values, pound, out)?;
      }
    }
  }
  Ok(())
}

fn branch<'a>(branches: &'a [(Selector, Vec<Node>)], selector: &Selector) -> Option<&'a Vec<Node>> {
  branches.iter().find(|(s, _)| s == selector).map(|(_, body)| body)
}
