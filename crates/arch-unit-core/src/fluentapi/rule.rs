//! Executable architecture rules.

use miette::Diagnostic;
use tracing::debug;

use crate::class::TypeScriptClass;

use super::condition::{ArchCondition, ArchConditionBox};
use super::events::ConditionEvents;
use super::predicate::DescribedPredicate;

/// Aggregate failure of one rule check, listing every violation found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
#[error("Architecture violation : {reason}.\nErrors : {}", .violations.join("\n"))]
#[diagnostic(code(arch_unit::violation))]
pub struct ArchRuleError {
    reason: String,
    violations: Vec<String>,
}

impl ArchRuleError {
    /// Text given to [`ArchRule::because`], or the generated description.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Violation messages, in accumulation order.
    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

/// Selection predicate, condition and reason bundled into a reusable rule.
///
/// Rules hold no state between checks: each [`check`](Self::check) starts
/// from a fresh [`ConditionEvents`].
pub struct ArchRule {
    selection: DescribedPredicate,
    condition: ArchConditionBox,
    reason: Option<String>,
}

impl std::fmt::Debug for ArchRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchRule")
            .field("description", &self.description())
            .field("reason", &self.reason)
            .finish()
    }
}

impl ArchRule {
    /// Creates a rule checking `condition` on every class matching `selection`.
    #[must_use]
    pub fn new(selection: DescribedPredicate, condition: impl ArchCondition + 'static) -> Self {
        Self::boxed(selection, Box::new(condition))
    }

    /// Creates a rule from an already boxed condition.
    #[must_use]
    pub fn boxed(selection: DescribedPredicate, condition: ArchConditionBox) -> Self {
        Self {
            selection,
            condition,
            reason: None,
        }
    }

    /// Sets the reason reported when the rule fails.
    #[must_use]
    pub fn because(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Generated description, e.g.
    /// `classes that reside in a package 'domain' should only depend on ...`.
    #[must_use]
    pub fn description(&self) -> String {
        if self.selection == DescribedPredicate::always() {
            format!("classes should {}", self.condition.description())
        } else {
            format!(
                "classes that {} should {}",
                self.selection.describe(),
                self.condition.description()
            )
        }
    }

    /// Reason given with [`because`](Self::because), if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Runs the condition on every selected class and returns all outcomes.
    pub fn evaluate<'a, I>(&self, classes: I) -> ConditionEvents
    where
        I: IntoIterator<Item = &'a TypeScriptClass>,
    {
        let mut events = ConditionEvents::new();
        let mut selected = 0usize;
        for class in classes {
            if self.selection.test(class) {
                selected += 1;
                self.condition.check(class, &mut events);
            }
        }
        debug!(
            rule = %self.description(),
            selected,
            events = events.len(),
            "evaluated rule"
        );
        events
    }

    /// Checks the rule against `classes`.
    ///
    /// Every selected class is evaluated before deciding; an empty selection
    /// always passes.
    ///
    /// # Errors
    ///
    /// Returns [`ArchRuleError`] carrying every violating event message if
    /// at least one was recorded.
    pub fn check<'a, I>(&self, classes: I) -> Result<(), ArchRuleError>
    where
        I: IntoIterator<Item = &'a TypeScriptClass>,
    {
        let events = self.evaluate(classes);
        let violations: Vec<String> = events
            .violating()
            .into_iter()
            .map(|e| e.message().to_string())
            .collect();
        if violations.is_empty() {
            return Ok(());
        }
        debug!(violations = violations.len(), "rule failed");
        Err(ArchRuleError {
            reason: self.reason.clone().unwrap_or_else(|| self.description()),
            violations,
        })
    }
}
