// @generated by crood-gen. Do not edit by hand.

/// Row of `public.book`.
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
pub struct BookDomain {
    #[serde(skip_serializing)]
    id: Option<i64>,
    #[validate(length(max = 255))]
    title: String,
    author_id: i32,
    published: Option<chrono::NaiveDate>,
    #[serde(skip_serializing)]
    version: Option<i32>,
    #[serde(skip_serializing)]
    modified_at: Option<chrono::DateTime<chrono::Utc>>,
}
/// Metadata of `public.book`.
pub static BOOK: ::crood::Table = ::crood::Table {
    schema: Some("public"),
    name: "book",
    columns: &[
        ::crood::Column::new("id", ::crood::SqlType::BigInt).identity(),
        ::crood::Column::new("title", ::crood::SqlType::Varchar).length(255),
        ::crood::Column::new("author_id", ::crood::SqlType::Integer),
        ::crood::Column::new("published", ::crood::SqlType::Date).nullable(),
        ::crood::Column::new("version", ::crood::SqlType::Integer).nullable(),
        ::crood::Column::new("modified_at", ::crood::SqlType::TimestampTz).nullable(),
    ],
    primary_key: &["id"],
    version_field: Some("version"),
    timestamp_field: Some("modified_at"),
};
/// Primary key of the table.
pub type BookId = i64;
impl BookDomain {
    /// Create a domain object from every column value.
    #[must_use]
    pub fn new(
        id: Option<i64>,
        title: String,
        author_id: i32,
        published: Option<chrono::NaiveDate>,
        version: Option<i32>,
        modified_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Self {
        Self {
            id,
            title,
            author_id,
            published,
            version,
            modified_at,
        }
    }
    /// Create a domain object to insert, leaving server-assigned columns empty.
    #[must_use]
    pub fn for_insert(
        title: String,
        author_id: i32,
        published: Option<chrono::NaiveDate>,
    ) -> Self {
        Self {
            id: None,
            title,
            author_id,
            published,
            version: None,
            modified_at: None,
        }
    }
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
    #[must_use]
    pub const fn author_id(&self) -> i32 {
        self.author_id
    }
    #[must_use]
    pub const fn published(&self) -> Option<chrono::NaiveDate> {
        self.published
    }
}
impl ::crood::Domain for BookDomain {
    fn table() -> &'static ::crood::Table {
        &BOOK
    }
    fn values(&self) -> Vec<::crood::Value> {
        vec![
            ::crood::Value::from(self.id), ::crood::Value::from(self.title.clone()),
            ::crood::Value::from(self.author_id), ::crood::Value::from(self.published),
            ::crood::Value::from(self.version), ::crood::Value::from(self.modified_at)
        ]
    }
}
