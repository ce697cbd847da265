//! Conditions: named checks that record pass/fail events for a class.

use crate::class::TypeScriptClass;

use super::events::{ConditionEvent, ConditionEvents};
use super::predicate::DescribedPredicate;

/// A named check evaluated once per selected class.
///
/// Implementations append their outcomes to `events`. A rule check passes
/// one accumulator through every selected class, in order.
pub trait ArchCondition: Send + Sync {
    /// Human-readable description, e.g. `only depend on classes that ...`.
    fn description(&self) -> &str;

    /// Evaluates `class` and appends zero or more events.
    fn check(&self, class: &TypeScriptClass, events: &mut ConditionEvents);
}

/// Type alias for boxed [`ArchCondition`] trait objects.
pub type ArchConditionBox = Box<dyn ArchCondition>;

/// Records one event per outgoing edge; the edge violates when its target
/// does not satisfy the predicate.
///
/// The predicate sees a dependency-free stand-in for the target (name and
/// path only), so targets are never re-evaluated transitively.
#[derive(Debug, Clone)]
pub struct AllDependencyCondition {
    description: String,
    predicate: DescribedPredicate,
}

impl AllDependencyCondition {
    /// Creates the condition.
    #[must_use]
    pub fn new(description: impl Into<String>, predicate: DescribedPredicate) -> Self {
        Self {
            description: description.into(),
            predicate,
        }
    }
}

impl ArchCondition for AllDependencyCondition {
    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self, class: &TypeScriptClass, events: &mut ConditionEvents) {
        for dependency in class.dependencies() {
            let target = TypeScriptClass::from_dependency(dependency);
            events.add(ConditionEvent::new(
                format!("Wrong dependency in {}: {}", class.path(), dependency.path()),
                !self.predicate.test(&target),
            ));
        }
    }
}

/// Runs the inner condition and flips the violating flag of every event it
/// produced, keeping messages verbatim.
pub struct NeverCondition {
    description: String,
    inner: ArchConditionBox,
}

impl NeverCondition {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: impl ArchCondition + 'static) -> Self {
        Self::boxed(Box::new(inner))
    }

    /// Wraps an already boxed condition.
    #[must_use]
    pub fn boxed(inner: ArchConditionBox) -> Self {
        Self {
            description: format!("never {}", inner.description()),
            inner,
        }
    }

    /// Replaces the description.
    #[must_use]
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl std::fmt::Debug for NeverCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeverCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl ArchCondition for NeverCondition {
    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self, class: &TypeScriptClass, events: &mut ConditionEvents) {
        let mut produced = ConditionEvents::new();
        self.inner.check(class, &mut produced);
        for event in produced {
            events.add(event.inverted());
        }
    }
}
