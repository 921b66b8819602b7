//! Category registry data model.
//!
//! A category is the single authoritative record `{id, name, item_range}`.
//! Identifiers come from the backing store and increase monotonically; a
//! deleted identifier is never handed out again.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for category values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    NonPositiveId,
    BlankName,
    NameTooLong { max: usize },
    NegativeItemRange,
    EmptyPatch,
}

impl CategoryValidationError {
    /// Machine-readable code placed in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonPositiveId => "invalid_identifier",
            Self::BlankName => "blank_field",
            Self::NameTooLong { .. } => "too_long",
            Self::NegativeItemRange => "negative_item_range",
            Self::EmptyPatch => "empty_patch",
        }
    }
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId => write!(f, "category id must be a positive integer"),
            Self::BlankName => write!(f, "category name must not be blank"),
            Self::NameTooLong { max } => {
                write!(f, "category name must be at most {max} characters")
            }
            Self::NegativeItemRange => write!(f, "item_range must not be negative"),
            Self::EmptyPatch => write!(f, "provide at least one of name or item_range"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// Store-assigned category identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct CategoryId(i32);

impl CategoryId {
    /// Validate a positive id.
    pub fn new(id: i32) -> Result<Self, CategoryValidationError> {
        if id <= 0 {
            return Err(CategoryValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Raw integer id.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CategoryId> for i32 {
    fn from(value: CategoryId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for CategoryId {
    type Error = CategoryValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum category name length in characters.
pub const CATEGORY_NAME_MAX: usize = 64;

/// Display name of a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Trim and validate a name.
    pub fn new(name: impl Into<String>) -> Result<Self, CategoryValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CategoryValidationError::BlankName);
        }
        if trimmed.chars().count() > CATEGORY_NAME_MAX {
            return Err(CategoryValidationError::NameTooLong {
                max: CATEGORY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = CategoryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Number of items a category is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct ItemRange(i32);

impl ItemRange {
    /// Validate a non-negative range.
    pub fn new(value: i32) -> Result<Self, CategoryValidationError> {
        if value < 0 {
            return Err(CategoryValidationError::NegativeItemRange);
        }
        Ok(Self(value))
    }

    /// Raw range value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<ItemRange> for i32 {
    fn from(value: ItemRange) -> Self {
        value.0
    }
}

impl TryFrom<i32> for ItemRange {
    type Error = CategoryValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted category.
///
/// # Examples
/// ```
/// use shop_backend::domain::{Category, CategoryId, CategoryName, ItemRange};
///
/// let category = Category::new(
///     CategoryId::new(1).unwrap(),
///     CategoryName::new("Tools").unwrap(),
///     ItemRange::new(5).unwrap(),
/// );
/// assert_eq!(category.name().as_ref(), "Tools");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: CategoryName,
    item_range: ItemRange,
}

impl Category {
    /// Assemble a category from validated parts.
    pub fn new(id: CategoryId, name: CategoryName, item_range: ItemRange) -> Self {
        Self {
            id,
            name,
            item_range,
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &CategoryName {
        &self.name
    }

    pub fn item_range(&self) -> ItemRange {
        self.item_range
    }

    /// Apply a partial update, leaving absent fields untouched.
    #[must_use]
    pub fn patched(self, patch: &CategoryPatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.clone().unwrap_or(self.name),
            item_range: patch.item_range.unwrap_or(self.item_range),
        }
    }
}

/// Input for creating a category; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: CategoryName,
    pub item_range: ItemRange,
}

/// Partial update for an existing category.
///
/// ## Invariants
/// - At least one field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPatch {
    name: Option<CategoryName>,
    item_range: Option<ItemRange>,
}

impl CategoryPatch {
    /// Build a patch; at least one field must be present.
    pub fn new(
        name: Option<CategoryName>,
        item_range: Option<ItemRange>,
    ) -> Result<Self, CategoryValidationError> {
        if name.is_none() && item_range.is_none() {
            return Err(CategoryValidationError::EmptyPatch);
        }
        Ok(Self { name, item_range })
    }

    pub fn name(&self) -> Option<&CategoryName> {
        self.name.as_ref()
    }

    pub fn item_range(&self) -> Option<ItemRange> {
        self.item_range
    }
}

#[cfg(test)]
mod tests {
    //! Category newtype validation and serde shape.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn tools() -> Category {
        Category::new(
            CategoryId::new(7).expect("id"),
            CategoryName::new("Tools").expect("name"),
            ItemRange::new(5).expect("range"),
        )
    }

    #[rstest]
    #[case("", CategoryValidationError::BlankName)]
    #[case("   ", CategoryValidationError::BlankName)]
    fn blank_names_are_rejected(#[case] raw: &str, #[case] expected: CategoryValidationError) {
        assert_eq!(CategoryName::new(raw), Err(expected));
    }

    #[rstest]
    fn names_are_trimmed() {
        let name = CategoryName::new("  Garden ").expect("valid");
        assert_eq!(name.as_ref(), "Garden");
    }

    #[rstest]
    fn overlong_names_are_rejected() {
        let err = CategoryName::new("x".repeat(CATEGORY_NAME_MAX + 1)).expect_err("too long");
        assert_eq!(err.code(), "too_long");
    }

    #[rstest]
    #[case(0, true)]
    #[case(24, true)]
    #[case(-1, false)]
    fn item_range_must_not_be_negative(#[case] raw: i32, #[case] ok: bool) {
        assert_eq!(ItemRange::new(raw).is_ok(), ok);
    }

    #[rstest]
    fn empty_patch_is_rejected() {
        let err = CategoryPatch::new(None, None).expect_err("empty");
        assert_eq!(err, CategoryValidationError::EmptyPatch);
        assert_eq!(err.code(), "empty_patch");
    }

    #[rstest]
    fn patch_replaces_only_present_fields(tools: Category) {
        let patch =
            CategoryPatch::new(None, Some(ItemRange::new(9).expect("range"))).expect("patch");
        let updated = tools.clone().patched(&patch);
        assert_eq!(updated.id(), tools.id());
        assert_eq!(updated.name(), tools.name());
        assert_eq!(updated.item_range().get(), 9);
    }

    #[rstest]
    fn patch_can_rename(tools: Category) {
        let patch =
            CategoryPatch::new(Some(CategoryName::new("Hardware").expect("name")), None)
                .expect("patch");
        let updated = tools.patched(&patch);
        assert_eq!(updated.name().as_ref(), "Hardware");
        assert_eq!(updated.item_range().get(), 5);
    }
}
