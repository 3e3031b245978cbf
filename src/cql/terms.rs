//! Vocabulary of the Confluence Query Language.
//!
//! Each type renders to the exact token the Confluence search endpoint
//! expects through its [`fmt::Display`] implementation, which is all
//! [`CqlBuilder`](super::CqlBuilder) relies on.

use std::fmt;

/// Searchable CQL fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
  Ancestor,
  Content,
  Created,
  Creator,
  Contributor,
  Favourite,
  Id,
  Label,
  LastModified,
  Macro,
  Mention,
  Parent,
  Space,
  SpaceKey,
  Text,
  Title,
  Type,
  Watcher,
}

impl Field {
  /// Field name as written in a CQL query.
  pub fn as_str(&self) -> &'static str {
    match self {
      Field::Ancestor => "ancestor",
      Field::Content => "content",
      Field::Created => "created",
      Field::Creator => "creator",
      Field::Contributor => "contributor",
      Field::Favourite => "favourite",
      Field::Id => "id",
      Field::Label => "label",
      Field::LastModified => "lastmodified",
      Field::Macro => "macro",
      Field::Mention => "mention",
      Field::Parent => "parent",
      Field::Space => "space",
      Field::SpaceKey => "space.key",
      Field::Text => "text",
      Field::Title => "title",
      Field::Type => "type",
      Field::Watcher => "watcher",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Comparison operators between a field and its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
  Equals,
  NotEquals,
  GreaterThan,
  GreaterThanEquals,
  LessThan,
  LessThanEquals,
  Contains,
  DoesNotContain,
  In,
  NotIn,
}

impl Operator {
  /// Operator token as written in a CQL query.
  pub fn as_str(&self) -> &'static str {
    match self {
      Operator::Equals => "=",
      Operator::NotEquals => "!=",
      Operator::GreaterThan => ">",
      Operator::GreaterThanEquals => ">=",
      Operator::LessThan => "<",
      Operator::LessThanEquals => "<=",
      Operator::Contains => "~",
      Operator::DoesNotContain => "!~",
      Operator::In => "IN",
      Operator::NotIn => "NOT IN",
    }
  }
}

impl fmt::Display for Operator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Reserved words joining clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
  And,
  Or,
  Not,
  OrderBy,
}

impl fmt::Display for Keyword {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Keyword::And => "AND",
      Keyword::Or => "OR",
      Keyword::Not => "NOT",
      Keyword::OrderBy => "ORDER BY",
    })
  }
}

/// Direction of an `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

impl fmt::Display for SortOrder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      SortOrder::Asc => "ASC",
      SortOrder::Desc => "DESC",
    })
  }
}
