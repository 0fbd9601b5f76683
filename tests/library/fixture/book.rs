// @generated by crood-gen. Do not edit by hand.

/// Test fixture for `public.book`.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    validator::Validate
)]
pub struct BookTestDomain {
    id: Option<i64>,
    #[validate(length(max = 255))]
    title: Option<String>,
    author_id: Option<i32>,
    published: Option<chrono::NaiveDate>,
    version: Option<i32>,
    modified_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author_domain: Option<Box<super::super::fixture::AuthorTestDomain>>,
}
impl BookTestDomain {
    /// Fixture with every column empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    #[must_use]
    pub const fn author_id(&self) -> Option<i32> {
        self.author_id
    }
    #[must_use]
    pub const fn published(&self) -> Option<chrono::NaiveDate> {
        self.published
    }
    #[must_use]
    pub const fn version(&self) -> Option<i32> {
        self.version
    }
    #[must_use]
    pub const fn modified_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.modified_at
    }
    pub fn set_id(&mut self, id: Option<i64>) -> &mut Self {
        self.id = id;
        self
    }
    pub fn set_title(&mut self, title: Option<String>) -> &mut Self {
        self.title = title;
        self
    }
    pub fn set_published(&mut self, published: Option<chrono::NaiveDate>) -> &mut Self {
        self.published = published;
        self
    }
    pub fn set_version(&mut self, version: Option<i32>) -> &mut Self {
        self.version = version;
        self
    }
    pub fn set_modified_at(
        &mut self,
        modified_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> &mut Self {
        self.modified_at = modified_at;
        self
    }
    #[must_use]
    pub fn author_domain(&self) -> Option<&super::super::fixture::AuthorTestDomain> {
        self.author_domain.as_deref()
    }
    pub fn set_author_domain(
        &mut self,
        author_domain: Option<super::super::fixture::AuthorTestDomain>,
    ) -> &mut Self {
        self.author_id = author_domain.as_ref().and_then(|d| d.id());
        self.author_domain = author_domain.map(Box::new);
        self
    }
    /// Immutable domain object, empty required columns set to their default.
    #[must_use]
    pub fn to_domain(&self) -> super::super::domain::BookDomain {
        super::super::domain::BookDomain::new(
            self.id,
            self.title.clone().unwrap_or_default(),
            self.author_id.unwrap_or_default(),
            self.published,
            self.version,
            self.modified_at,
        )
    }
}
