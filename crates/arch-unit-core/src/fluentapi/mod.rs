//! Predicates, conditions and the fluent rule definition API.

pub mod condition;
pub mod definition;
pub mod events;
pub mod predicate;
pub mod rule;

pub use condition::{AllDependencyCondition, ArchCondition, ArchConditionBox, NeverCondition};
pub use definition::{classes, ClassesShould, ClassesThat, GivenClasses, GivenClassesConjunction};
pub use events::{ConditionEvent, ConditionEvents};
pub use predicate::DescribedPredicate;
pub use rule::{ArchRule, ArchRuleError};
