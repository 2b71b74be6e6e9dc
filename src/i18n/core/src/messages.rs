/* src/i18n/core/src/messages.rs */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::I18nError;

/// A message catalog tree: leaves are message sources, groups are namespaces.
///
/// Deserializes directly from nested JSON objects of strings. Any other JSON
/// type (numbers, arrays, null) is rejected rather than coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Messages {
  Text(String),
  Group(BTreeMap<String, Messages>),
}

/// Result of walking a dotted path through a [`Messages`] tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
  Message(&'a str),
  Group(&'a BTreeMap<String, Messages>),
  Missing,
}

impl Default for Messages {
  fn default() -> Self {
    Self::empty()
  }
}

impl Messages {
  pub fn empty() -> Self {
    Self::Group(BTreeMap::new())
  }

  pub fn from_json(json: &str) -> Result<Self, I18nError> {
    serde_json::from_str(json).map_err(|e| I18nError::config(format!("parse messages: {e}")))
  }

  pub fn from_value(value: serde_json::Value) -> Result<Self, I18nError> {
    serde_json::from_value(value).map_err(|e| I18nError::config(format!("parse messages: {e}")))
  }

  /// Walk a dot-delimited path. An empty path addresses the tree itself.
  pub fn lookup(&self, path: &str) -> Lookup<'_> {
    let mut node = self;
    if !path.is_empty() {
      for segment in path.split('.') {
        node = match node {
          Self::Group(children) => match children.get(segment) {
            Some(child) => child,
            None => return Lookup::Missing,
          },
          Self::Text(_) => return Lookup::Missing,
        };
      }
    }
    match node {
      Self::Text(text) => Lookup::Message(text),
      Self::Group(children) => Lookup::Group(children),
    }
  }

  pub fn get(&self, path: &str) -> Option<&Messages> {
    let mut node = self;
    if path.is_empty() {
      return Some(node);
    }
    for segment in path.split('.') {
      let Self::Group(children) = node else {
        return None;
      };
      node = children.get(segment)?;
    }
    Some(node)
  }

  pub fn is_empty(&self) -> bool {
    match self {
      Self::Text(_) => false,
      Self::Group(children) => children.is_empty(),
    }
  }

  /// Number of leaf messages in the tree.
  pub fn message_count(&self) -> usize {
    match self {
      Self::Text(_) => 1,
      Self::Group(children) => children.values().map(Self::message_count).sum(),
    }
  }

  /// Keep only the listed namespaces. Dotted namespaces keep the nested
  /// subtree with its ancestors; unknown namespaces are skipped.
  /// An empty list keeps everything.
  pub fn pick<S: AsRef<str>>(&self, namespaces: &[S]) -> Messages {
    if namespaces.is_empty() {
      return self.clone();
    }
    let mut picked = Messages::empty();
    for ns in namespaces {
      let ns = ns.as_ref();
      if let Some(subtree) = self.get(ns) {
        picked.insert_at(ns, subtree.clone());
      }
    }
    picked
  }

  fn insert_at(&mut self, path: &str, value: Messages) {
    let mut node = self;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
      if !matches!(node, Self::Group(_)) {
        *node = Messages::empty();
      }
      let Self::Group(children) = node else { return };
      if segments.peek().is_none() {
        children.insert(segment.to_string(), value);
        return;
      }
      node = children.entry(segment.to_string()).or_insert_with(Messages::empty);
    }
  }

  /// Fill keys missing from `self` with values from `fallback`, recursively.
  /// Empty strings count as missing. Returns the number of messages filled.
  pub fn fill_missing_from(&mut self, fallback: &Messages) -> usize {
    match (self, fallback) {
      (Self::Group(own), Self::Group(other)) => {
        let mut filled = 0;
        for (key, fb) in other {
          match own.get_mut(key) {
            Some(Self::Text(text)) if text.is_empty() => {
              if let Self::Text(fb_text) = fb
                && !fb_text.is_empty()
              {
                text.clone_from(fb_text);
                filled += 1;
              }
            }
            Some(existing) => filled += existing.fill_missing_from(fb),
            None => {
              filled += fb.message_count();
              own.insert(key.clone(), fb.clone());
            }
          }
        }
        filled
      }
      _ => 0,
    }
  }
}
