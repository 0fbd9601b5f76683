// @generated by crood-gen. Do not edit by hand.

/// Test fixture for `public.author`.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    validator::Validate
)]
pub struct AuthorTestDomain {
    id: Option<i32>,
    #[validate(length(max = 80))]
    name: Option<String>,
    version: Option<i32>,
}
impl AuthorTestDomain {
    /// Fixture with every column empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub const fn id(&self) -> Option<i32> {
        self.id
    }
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    #[must_use]
    pub const fn version(&self) -> Option<i32> {
        self.version
    }
    pub fn set_id(&mut self, id: Option<i32>) -> &mut Self {
        self.id = id;
        self
    }
    pub fn set_name(&mut self, name: Option<String>) -> &mut Self {
        self.name = name;
        self
    }
    pub fn set_version(&mut self, version: Option<i32>) -> &mut Self {
        self.version = version;
        self
    }
    /// Immutable domain object, empty required columns set to their default.
    #[must_use]
    pub fn to_domain(&self) -> super::super::domain::AuthorDomain {
        super::super::domain::AuthorDomain::new(
            self.id,
            self.name.clone().unwrap_or_default(),
            self.version,
        )
    }
}
