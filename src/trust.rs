use std::collections::HashSet;

/// The set of header names considered safe. Fixed once built.
#[derive(Debug, Clone, Default)]
pub struct TrustReference {
    names: HashSet<String>,
}

impl TrustReference {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub struct TrustClassifier {
    trusted: TrustReference,
}

impl TrustClassifier {
    pub fn new(trusted: TrustReference) -> Self {
        Self { trusted }
    }

    pub fn trusted(&self) -> &TrustReference {
        &self.trusted
    }

    /// Returns the names missing from the trust reference, keeping input order and repeats.
    pub fn untrusted(&self, includes: &[String]) -> Vec<String> {
        includes
            .iter()
            .filter(|name| !self.trusted.contains(name))
            .cloned()
            .collect()
    }
}
