/* src/i18n/core/src/values.rs */

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// One interpolation argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Text(String),
  Number(f64),
  Date(DateTime<Utc>),
}

impl Value {
  /// Numeric view used by plural selection; numeric strings are accepted.
  pub fn as_number(&self) -> Option<f64> {
    match self {
      Self::Number(n) => Some(*n),
      Self::Text(s) => s.trim().parse().ok(),
      Self::Date(_) => None,
    }
  }
}

impl From<&str> for Value {
  fn from(v: &str) -> Self {
    Self::Text(v.to_string())
  }
}

impl From<String> for Value {
  fn from(v: String) -> Self {
    Self::Text(v)
  }
}

impl From<DateTime<Utc>> for Value {
  fn from(v: DateTime<Utc>) -> Self {
    Self::Date(v)
  }
}

macro_rules! impl_value_from_number {
  ($($ty:ty),*) => {
    $(
      impl From<$ty> for Value {
        fn from(v: $ty) -> Self {
          Self::Number(f64::from(v))
        }
      }
    )*
  };
}

impl_value_from_number!(i8, i16, i32, u8, u16, u32, f32, f64);

// 64-bit integers do not convert losslessly; counts in messages stay far below 2^53
macro_rules! impl_value_from_wide {
  ($($ty:ty),*) => {
    $(
      impl From<$ty> for Value {
        #[allow(clippy::cast_precision_loss)]
        fn from(v: $ty) -> Self {
          Self::Number(v as f64)
        }
      }
    )*
  };
}

impl_value_from_wide!(i64, u64, usize, isize);

/// Named interpolation arguments for a translation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values(BTreeMap<String, Value>);

impl Values {
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
    self.0.insert(name.into(), value.into());
    self
  }

  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
    self.0.insert(name.into(), value.into());
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.0.get(name)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Values {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builder_and_conversions() {
    let values = Values::new().with("name", "Ada").with("count", 3).with("big", 10_000_000_000_i64);
    assert_eq!(values.get("name"), Some(&Value::Text("Ada".into())));
    assert_eq!(values.get("count"), Some(&Value::Number(3.0)));
    assert_eq!(values.get("big").and_then(Value::as_number), Some(1e10));
    assert!(values.get("missing").is_none());
  }

  #[test]
  fn numeric_text_counts_as_number() {
    assert_eq!(Value::from(" 5 ").as_number(), Some(5.0));
    assert_eq!(Value::from("five").as_number(), None);
  }

  #[test]
  fn collect_from_pairs() {
    let values: Values = [("a", 1), ("b", 2)].into_iter().collect();
    assert_eq!(values.get("b"), Some(&Value::Number(2.0)));
  }
}
