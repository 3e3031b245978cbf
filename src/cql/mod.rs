//! Fluent builder for Confluence Query Language (CQL) strings.
//!
//! The builder is deliberately dumb: it concatenates tokens in the order they
//! are supplied and never validates the result. Each condition and connector
//! leaves a trailing space so the next token can be appended directly.
//!
//! ```
//! use confluence_rest::cql::{CqlBuilder, Field, Operator, SortOrder, quote};
//!
//! let mut builder = CqlBuilder::new();
//! let cql = builder
//!   .add_condition(Some(Field::Space), Some(Operator::Equals), &[quote("DEMO")])
//!   .and()
//!   .add_condition(Some(Field::Type), Some(Operator::Equals), &[quote("page")])
//!   .order_by(Some(SortOrder::Desc), &[Field::Created]);
//!
//! assert_eq!(cql, r#"space = "DEMO" AND type = "page" ORDER BY created DESC"#);
//! ```

mod terms;

pub use terms::{Field, Keyword, Operator, SortOrder};

const WHITESPACE: char = ' ';

/// Accumulates a CQL query one clause at a time.
///
/// A single instance must not be shared between concurrent query
/// constructions; the buffer is consumed by [`CqlBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct CqlBuilder {
  cql: String,
}

/// Returned by [`CqlBuilder::add_condition`] to continue or finish the query.
#[derive(Debug)]
#[must_use = "a condition handle does nothing unless chained or built"]
pub struct ConditionHandle<'a> {
  builder: &'a mut CqlBuilder,
}

impl CqlBuilder {
  /// Create an empty builder.
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a `field operator operand(s)` condition.
  ///
  /// Every part is optional and absent parts contribute nothing. A single
  /// operand is rendered bare, several operands are comma-joined inside one
  /// pair of parentheses.
  ///
  /// # Arguments
  /// * `field` - Field the condition applies to.
  /// * `operator` - Comparison between the field and the operands.
  /// * `operands` - Already-formatted operand values (see [`quote`]).
  ///
  /// # Returns
  /// A [`ConditionHandle`] for chaining `AND`/`OR`, ordering, or building.
  pub fn add_condition<S: AsRef<str>>(
    &mut self,
    field: Option<Field>,
    operator: Option<Operator>,
    operands: &[S],
  ) -> ConditionHandle<'_> {
    if let Some(field) = field {
      self.cql.push_str(field.as_str());
      self.cql.push(WHITESPACE);
    }
    if let Some(operator) = operator {
      self.cql.push_str(operator.as_str());
      self.cql.push(WHITESPACE);
    }

    match operands {
      [] => {}
      [single] => {
        self.cql.push_str(single.as_ref());
        self.cql.push(WHITESPACE);
      }
      many => {
        let joined = many.iter().map(|operand| operand.as_ref()).collect::<Vec<&str>>().join(",");
        self.cql.push('(');
        self.cql.push_str(&joined);
        self.cql.push(')');
        self.cql.push(WHITESPACE);
      }
    }

    ConditionHandle { builder: self }
  }

  /// Return the accumulated query and reset the buffer.
  ///
  /// This is a consuming read: a second call without intervening conditions
  /// returns an empty string.
  pub fn build(&mut self) -> String {
    std::mem::take(&mut self.cql)
  }

  /// Discard everything accumulated so far.
  pub fn clear(&mut self) {
    self.cql.clear();
  }

  fn push_keyword(&mut self, keyword: Keyword) {
    self.cql.push_str(&keyword.to_string());
    self.cql.push(WHITESPACE);
  }
}

impl<'a> ConditionHandle<'a> {
  /// Append `AND` and hand the builder back for the next condition.
  pub fn and(self) -> &'a mut CqlBuilder {
    self.builder.push_keyword(Keyword::And);
    self.builder
  }

  /// Append `OR` and hand the builder back for the next condition.
  pub fn or(self) -> &'a mut CqlBuilder {
    self.builder.push_keyword(Keyword::Or);
    self.builder
  }

  /// Finish the query with an `ORDER BY` clause and build it.
  ///
  /// When `order` is absent or `fields` is empty the ordering request is
  /// ignored and this behaves exactly like [`ConditionHandle::build`].
  pub fn order_by(self, order: Option<SortOrder>, fields: &[Field]) -> String {
    let Some(order) = order else {
      return self.builder.build();
    };
    if fields.is_empty() {
      return self.builder.build();
    }

    self.builder.push_keyword(Keyword::OrderBy);
    let joined = fields.iter().map(Field::as_str).collect::<Vec<_>>().join(", ");
    self.builder.cql.push_str(&joined);
    self.builder.cql.push(WHITESPACE);
    self.builder.cql.push_str(&order.to_string());
    self.builder.build()
  }

  /// Return the accumulated query and reset the builder.
  pub fn build(self) -> String {
    self.builder.build()
  }
}

/// Wrap a value in double quotes for use as a CQL string literal.
///
/// Backslashes and embedded double quotes are escaped.
pub fn quote(value: &str) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('"');
  for c in value.chars() {
    if c == '"' || c == '\\' {
      quoted.push('\\');
    }
    quoted.push(c);
  }
  quoted.push('"');
  quoted
}

#[cfg(test)]
mod tests {
  use super::*;

  const NO_OPERANDS: &[&str] = &[];

  #[test]
  fn test_single_operand_renders_bare() {
    let mut builder = CqlBuilder::new();
    let cql = builder.add_condition(Some(Field::Space), None, &["DEMO"]).build();
    assert_eq!(cql, "space DEMO ");
    assert!(!cql.contains('('));
  }

  #[test]
  fn test_multiple_operands_render_parenthesized() {
    let mut builder = CqlBuilder::new();
    let cql = builder
      .add_condition(Some(Field::Type), Some(Operator::In), &["page", "blogpost", "comment"])
      .build();
    assert_eq!(cql, "type IN (page,blogpost,comment) ");
    assert_eq!(cql.matches('(').count(), 1);
    assert_eq!(cql.matches(')').count(), 1);
  }

  #[test]
  fn test_missing_parts_contribute_nothing() {
    let mut builder = CqlBuilder::new();
    let cql = builder.add_condition(None, None, NO_OPERANDS).build();
    assert_eq!(cql, "");

    let cql = builder.add_condition(None, Some(Operator::Equals), &["x"]).build();
    assert_eq!(cql, "= x ");
  }

  #[test]
  fn test_and_or_chaining() {
    let mut builder = CqlBuilder::new();
    let cql = builder
      .add_condition(Some(Field::Space), Some(Operator::Equals), &["DEMO"])
      .or()
      .add_condition(Some(Field::Space), Some(Operator::Equals), &["TEST"])
      .and()
      .add_condition(Some(Field::Label), Some(Operator::NotEquals), &["archived"])
      .build();
    assert_eq!(cql, "space = DEMO OR space = TEST AND label != archived ");
  }

  #[test]
  fn test_order_by_appends_fields_and_direction() {
    let mut builder = CqlBuilder::new();
    let cql = builder
      .add_condition(Some(Field::Space), Some(Operator::Equals), &[quote("DEMO")])
      .and()
      .add_condition(Some(Field::Type), Some(Operator::Equals), &[quote("page")])
      .order_by(Some(SortOrder::Desc), &[Field::Created]);
    assert_eq!(cql, r#"space = "DEMO" AND type = "page" ORDER BY created DESC"#);
  }

  #[test]
  fn test_order_by_multiple_fields() {
    let mut builder = CqlBuilder::new();
    let cql = builder
      .add_condition(Some(Field::Creator), Some(Operator::Equals), &["currentUser()"])
      .order_by(Some(SortOrder::Asc), &[Field::Title, Field::LastModified]);
    assert_eq!(cql, "creator = currentUser() ORDER BY title, lastmodified ASC");
  }

  #[test]
  fn test_order_by_without_fields_behaves_like_build() {
    let mut builder = CqlBuilder::new();
    let ordered = builder
      .add_condition(Some(Field::Space), Some(Operator::Equals), &["DEMO"])
      .order_by(Some(SortOrder::Desc), &[]);

    let mut other = CqlBuilder::new();
    let built = other
      .add_condition(Some(Field::Space), Some(Operator::Equals), &["DEMO"])
      .build();

    assert_eq!(ordered, built);
    assert!(!ordered.contains("ORDER BY"));
  }

  #[test]
  fn test_order_by_without_direction_behaves_like_build() {
    let mut builder = CqlBuilder::new();
    let cql = builder
      .add_condition(Some(Field::Title), Some(Operator::Contains), &[quote("release")])
      .order_by(None, &[Field::Created]);
    assert_eq!(cql, "title ~ \"release\" ");
  }

  #[test]
  fn test_build_is_a_consuming_read() {
    let mut builder = CqlBuilder::new();
    let _ = builder.add_condition(Some(Field::Id), Some(Operator::Equals), &["42"]);
    assert_eq!(builder.build(), "id = 42 ");
    assert_eq!(builder.build(), "");
  }

  #[test]
  fn test_clear_discards_buffer() {
    let mut builder = CqlBuilder::new();
    let _ = builder.add_condition(Some(Field::Id), Some(Operator::Equals), &["42"]).and();
    builder.clear();
    assert_eq!(builder.build(), "");
  }

  #[test]
  fn test_builder_is_reusable_after_build() {
    let mut builder = CqlBuilder::new();
    let first = builder.add_condition(Some(Field::Id), Some(Operator::Equals), &["1"]).build();
    let second = builder.add_condition(Some(Field::Id), Some(Operator::Equals), &["2"]).build();
    assert_eq!(first, "id = 1 ");
    assert_eq!(second, "id = 2 ");
  }

  #[test]
  fn test_quote_escapes_inner_quotes() {
    assert_eq!(quote("DEMO"), "\"DEMO\"");
    assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
    assert_eq!(quote(r"C:\docs"), r#""C:\\docs""#);
  }
}
