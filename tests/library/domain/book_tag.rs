// @generated by crood-gen. Do not edit by hand.

/// Row of `public.book_tag`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    sqlx::FromRow,
    serde::Serialize,
    serde::Deserialize,
    validator::Validate,
    utoipa::ToSchema
)]
pub struct BookTagDomain {
    book_id: i64,
    #[validate(length(max = 40))]
    tag: String,
}
/// Metadata of `public.book_tag`.
pub static BOOK_TAG: ::crood::Table = ::crood::Table {
    schema: Some("public"),
    name: "book_tag",
    columns: &[
        ::crood::Column::new("book_id", ::crood::SqlType::BigInt),
        ::crood::Column::new("tag", ::crood::SqlType::Varchar).length(40),
    ],
    primary_key: &["book_id", "tag"],
    version_field: None,
    timestamp_field: None,
};
/// Primary key of the table.
pub type BookTagId = (i64, String);
impl BookTagDomain {
    /// Create a domain object from every column value.
    #[must_use]
    pub fn new(book_id: i64, tag: String) -> Self {
        Self { book_id, tag }
    }
    #[must_use]
    pub const fn book_id(&self) -> i64 {
        self.book_id
    }
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}
impl ::crood::Domain for BookTagDomain {
    fn table() -> &'static ::crood::Table {
        &BOOK_TAG
    }
    fn values(&self) -> Vec<::crood::Value> {
        vec![::crood::Value::from(self.book_id), ::crood::Value::from(self.tag.clone())]
    }
}
