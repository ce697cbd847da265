//! Named, composable boolean tests over a class.

use crate::class::TypeScriptClass;

/// Test performed by a [`DescribedPredicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Test {
    Always,
    ResideInAnyPackage(Vec<String>),
    SimpleNameContaining(String),
    And(Box<DescribedPredicate>, Box<DescribedPredicate>),
    Or(Box<DescribedPredicate>, Box<DescribedPredicate>),
    Not(Box<DescribedPredicate>),
}

/// A boolean test over a [`TypeScriptClass`] together with the
/// human-readable text used in rule descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedPredicate {
    description: String,
    test: Test,
}

impl DescribedPredicate {
    /// Matches every class.
    #[must_use]
    pub fn always() -> Self {
        Self {
            description: "all classes".to_string(),
            test: Test::Always,
        }
    }

    /// Matches classes whose package path contains `package`.
    #[must_use]
    pub fn reside_in_a_package(package: &str) -> Self {
        Self {
            description: format!("reside in a package '{package}'"),
            test: Test::ResideInAnyPackage(vec![package.to_string()]),
        }
    }

    /// Matches classes whose package path contains any of `packages`.
    #[must_use]
    pub fn reside_in_any_package<S: AsRef<str>>(packages: &[S]) -> Self {
        let packages: Vec<String> = packages.iter().map(|p| p.as_ref().to_string()).collect();
        let quoted: Vec<String> = packages.iter().map(|p| format!("'{p}'")).collect();
        Self {
            description: format!("reside in any package [{}]", quoted.join(", ")),
            test: Test::ResideInAnyPackage(packages),
        }
    }

    /// Matches classes whose name contains `fragment`.
    #[must_use]
    pub fn have_simple_name_containing(fragment: &str) -> Self {
        Self {
            description: format!("have simple name containing '{fragment}'"),
            test: Test::SimpleNameContaining(fragment.to_string()),
        }
    }

    /// Both `self` and `other` must hold.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self {
            description: format!("{} and {}", self.description, other.description),
            test: Test::And(Box::new(self), Box::new(other)),
        }
    }

    /// Either `self` or `other` must hold.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            description: format!("{} or {}", self.description, other.description),
            test: Test::Or(Box::new(self), Box::new(other)),
        }
    }

    /// Inverts the test.
    #[must_use]
    pub fn negate(self) -> Self {
        Self {
            description: format!("not {}", self.description),
            test: Test::Not(Box::new(self)),
        }
    }

    /// Replaces the description, keeping the test.
    #[must_use]
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Runs the test against `class`.
    #[must_use]
    pub fn test(&self, class: &TypeScriptClass) -> bool {
        match &self.test {
            Test::Always => true,
            Test::ResideInAnyPackage(packages) => packages
                .iter()
                .any(|p| class.package_path().contains(p)),
            Test::SimpleNameContaining(fragment) => class.name().contains(fragment.as_str()),
            Test::And(left, right) => left.test(class) && right.test(class),
            Test::Or(left, right) => left.test(class) || right.test(class),
            Test::Not(inner) => !inner.test(class),
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn describe(&self) -> &str {
        &self.description
    }
}
