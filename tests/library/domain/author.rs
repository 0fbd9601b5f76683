// @generated by crood-gen. Do not edit by hand.

/// Row of `public.author`.
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
pub struct AuthorDomain {
    #[serde(skip_serializing)]
    id: Option<i32>,
    #[validate(length(max = 80))]
    name: String,
    #[serde(skip_serializing)]
    version: Option<i32>,
}
/// Metadata of `public.author`.
pub static AUTHOR: ::crood::Table = ::crood::Table {
    schema: Some("public"),
    name: "author",
    columns: &[
        ::crood::Column::new("id", ::crood::SqlType::Integer).identity(),
        ::crood::Column::new("name", ::crood::SqlType::Varchar).length(80),
        ::crood::Column::new("version", ::crood::SqlType::Integer).nullable(),
    ],
    primary_key: &["id"],
    version_field: Some("version"),
    timestamp_field: None,
};
/// Primary key of the table.
pub type AuthorId = i32;
impl AuthorDomain {
    /// Create a domain object from every column value.
    #[must_use]
    pub fn new(id: Option<i32>, name: String, version: Option<i32>) -> Self {
        Self { id, name, version }
    }
    /// Create a domain object to insert, leaving server-assigned columns empty.
    #[must_use]
    pub fn for_insert(name: String) -> Self {
        Self {
            id: None,
            name,
            version: None,
        }
    }
    #[must_use]
    pub const fn id(&self) -> Option<i32> {
        self.id
    }
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
impl ::crood::Domain for AuthorDomain {
    fn table() -> &'static ::crood::Table {
        &AUTHOR
    }
    fn values(&self) -> Vec<::crood::Value> {
        vec![
            ::crood::Value::from(self.id), ::crood::Value::from(self.name.clone()),
            ::crood::Value::from(self.version)
        ]
    }
}
