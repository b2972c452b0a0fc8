/// One logical request before signing: a relative path, its query
/// parameters in wire order, and whether it must be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub path: String,
    pub params: Vec<(String, String)>,
    pub requires_auth: bool,
}

impl RequestSpec {
    pub fn new(path: impl Into<String>, requires_auth: bool) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
            requires_auth,
        }
    }

    /// Append a query parameter; parameters are sent in insertion order.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn param_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }
}
