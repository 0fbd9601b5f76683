// @generated by crood-gen. Do not edit by hand.

/// Test fixture for `public.book_tag`.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    validator::Validate
)]
pub struct BookTagTestDomain {
    book_id: Option<i64>,
    #[validate(length(max = 40))]
    tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    book_domain: Option<Box<super::super::fixture::BookTestDomain>>,
}
impl BookTagTestDomain {
    /// Fixture with every column empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub const fn book_id(&self) -> Option<i64> {
        self.book_id
    }
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
    pub fn set_tag(&mut self, tag: Option<String>) -> &mut Self {
        self.tag = tag;
        self
    }
    #[must_use]
    pub fn book_domain(&self) -> Option<&super::super::fixture::BookTestDomain> {
        self.book_domain.as_deref()
    }
    pub fn set_book_domain(
        &mut self,
        book_domain: Option<super::super::fixture::BookTestDomain>,
    ) -> &mut Self {
        self.book_id = book_domain.as_ref().and_then(|d| d.id());
        self.book_domain = book_domain.map(Box::new);
        self
    }
    /// Immutable domain object, empty required columns set to their default.
    #[must_use]
    pub fn to_domain(&self) -> super::super::domain::BookTagDomain {
        super::super::domain::BookTagDomain::new(
            self.book_id.unwrap_or_default(),
            self.tag.clone().unwrap_or_default(),
        )
    }
}
