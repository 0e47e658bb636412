// GuildView - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

// =============================================================================
// Guild record (normalised output of parsing)
// =============================================================================

/// A single guild parsed from one input line.
///
/// This is the data unit that flows through sorting, searching, display,
/// and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuildRecord {
    /// Guild display name, trimmed.
    pub name: String,

    /// Member count with thousands separators removed.
    pub member_count: u64,

    /// Guild identifier. Opaque text, never treated as a number even when
    /// it is all digits.
    pub id: String,

    /// Owner name, trimmed.
    pub owner: String,

    /// 1-based line number in the source file. Diagnostic only.
    #[serde(skip)]
    pub line_number: usize,
}

impl GuildRecord {
    /// Text form of `field` as it is shown in the table and matched by search.
    pub fn field_text(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::Name => Cow::Borrowed(&self.name),
            Field::MemberCount => Cow::Owned(self.member_count.to_string()),
            Field::Id => Cow::Borrowed(&self.id),
            Field::Owner => Cow::Borrowed(&self.owner),
        }
    }

    /// Compare two records by `field` using the field's semantic type:
    /// numeric for the member count, byte-wise lexical for text fields.
    pub fn compare_by(&self, other: &Self, field: Field) -> Ordering {
        match field {
            Field::Name => self.name.cmp(&other.name),
            Field::MemberCount => self.member_count.cmp(&other.member_count),
            Field::Id => self.id.cmp(&other.id),
            Field::Owner => self.owner.cmp(&other.owner),
        }
    }
}

// =============================================================================
// Field identity
// =============================================================================

/// Stable identity of a table column. Independent of the active language:
/// sort and search logic only ever see this tag, never a display label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    #[default]
    Name,
    MemberCount,
    Id,
    Owner,
}

impl Field {
    /// Returns all fields in column order.
    pub fn all() -> &'static [Field] {
        &[Field::Name, Field::MemberCount, Field::Id, Field::Owner]
    }

    /// Stable machine key, also used as the export header when localized
    /// headers are disabled.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::MemberCount => "member_count",
            Field::Id => "id",
            Field::Owner => "owner",
        }
    }

    /// Locale string key for the column label.
    pub fn label_key(&self) -> &'static str {
        match self {
            Field::Name => "guild_name",
            Field::MemberCount => "member_count",
            Field::Id => "guild_id",
            Field::Owner => "owner",
        }
    }

    /// Whether the field holds a number (affects alignment and XLSX cell type).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::MemberCount)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Sort order
// =============================================================================

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::Ascending)
    }

    /// The other direction.
    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Locale string key for the order label.
    pub fn label_key(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl From<bool> for SortOrder {
    /// `true` means ascending.
    fn from(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

// =============================================================================
// Rejected line
// =============================================================================

/// An input line that did not split into exactly four fields.
/// Kept for diagnostics only; no field is ever recovered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number in the source.
    pub line_number: usize,

    /// The original line, verbatim.
    pub text: String,
}

// =============================================================================
// Member count policy
// =============================================================================

/// What the parser does with a four-field line whose member count is not a
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberCountPolicy {
    /// Abort the whole load with a `ParseFieldError`.
    #[default]
    Abort,

    /// Treat the line like any other malformed line and reject it.
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, members: u64, id: &str, owner: &str) -> GuildRecord {
        GuildRecord {
            name: name.to_string(),
            member_count: members,
            id: id.to_string(),
            owner: owner.to_string(),
            line_number: 1,
        }
    }

    #[test]
    fn member_count_compares_numerically() {
        let small = record("a", 9, "1", "o");
        let big = record("a", 10, "1", "o");
        assert_eq!(small.compare_by(&big, Field::MemberCount), Ordering::Less);
        // As text "9" > "10"; the numeric comparison must win.
        assert_eq!(
            small.field_text(Field::MemberCount).cmp(&big.field_text(Field::MemberCount)),
            Ordering::Greater
        );
    }

    #[test]
    fn id_compares_as_text_even_when_numeric() {
        let a = record("a", 1, "9", "o");
        let b = record("a", 1, "10", "o");
        assert_eq!(a.compare_by(&b, Field::Id), Ordering::Greater);
    }

    #[test]
    fn text_comparison_is_case_sensitive() {
        let upper = record("Zeta", 1, "1", "o");
        let lower = record("alpha", 1, "1", "o");
        assert_eq!(upper.compare_by(&lower, Field::Name), Ordering::Less);
    }

    #[test]
    fn field_keys_are_stable_and_ordered() {
        let keys: Vec<_> = Field::all().iter().map(Field::key).collect();
        assert_eq!(keys, vec!["name", "member_count", "id", "owner"]);
    }

    #[test]
    fn sort_order_from_bool() {
        assert_eq!(SortOrder::from(true), SortOrder::Ascending);
        assert_eq!(SortOrder::from(false).toggled(), SortOrder::Ascending);
    }
}
