//! Fluent rule definition.
//!
//! ```text
//! classes()
//!   [.that().<predicate> [.and()/.or().<predicate>]*]   selection
//!   .should().<condition>().<predicate>                 condition
//!   [.because(reason)]                                  description
//!   .check(classes)                                     execution
//! ```
//!
//! Each step returns a different type, so steps can only be chained in
//! this order.

use super::condition::{AllDependencyCondition, ArchCondition, NeverCondition};
use super::predicate::DescribedPredicate;
use super::rule::ArchRule;

/// Starts a rule definition over classes.
#[must_use]
pub fn classes() -> GivenClasses {
    GivenClasses
}

/// Receives the predicate completed by a [`ClassesThat`] builder.
pub trait PredicateSink {
    /// Next step of the definition.
    type Output;

    /// Consumes the completed predicate.
    fn accept(self, predicate: DescribedPredicate) -> Self::Output;
}

/// Predicate builder shared by the selection and condition steps.
#[derive(Debug)]
#[must_use]
pub struct ClassesThat<S> {
    sink: S,
}

impl<S: PredicateSink> ClassesThat<S> {
    /// Classes whose package path contains `package`.
    pub fn reside_in_a_package(self, package: &str) -> S::Output {
        self.sink
            .accept(DescribedPredicate::reside_in_a_package(package))
    }

    /// Classes whose package path contains any of `packages`.
    pub fn reside_in_any_package<T: AsRef<str>>(self, packages: &[T]) -> S::Output {
        self.sink
            .accept(DescribedPredicate::reside_in_any_package(packages))
    }

    /// Classes whose name contains `fragment`.
    pub fn have_simple_name_containing(self, fragment: &str) -> S::Output {
        self.sink
            .accept(DescribedPredicate::have_simple_name_containing(fragment))
    }

    /// Classes matching an arbitrary predicate.
    pub fn satisfy(self, predicate: DescribedPredicate) -> S::Output {
        self.sink.accept(predicate)
    }
}

/// Selection step, nothing chosen yet.
#[derive(Debug)]
#[must_use]
pub struct GivenClasses;

impl GivenClasses {
    /// Restricts the selection with a predicate.
    pub fn that(self) -> ClassesThat<Selection> {
        ClassesThat {
            sink: Selection { previous: None },
        }
    }

    /// Selects every class.
    pub fn should(self) -> ClassesShould {
        ClassesShould {
            selection: DescribedPredicate::always(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Combinator {
    And,
    Or,
}

/// Sink building the selection predicate.
#[derive(Debug)]
pub struct Selection {
    previous: Option<(Combinator, DescribedPredicate)>,
}

impl PredicateSink for Selection {
    type Output = GivenClassesConjunction;

    fn accept(self, predicate: DescribedPredicate) -> GivenClassesConjunction {
        let selection = match self.previous {
            None => predicate,
            Some((Combinator::And, previous)) => previous.and(predicate),
            Some((Combinator::Or, previous)) => previous.or(predicate),
        };
        GivenClassesConjunction { selection }
    }
}

/// Selection step with a predicate in place.
#[derive(Debug)]
#[must_use]
pub struct GivenClassesConjunction {
    selection: DescribedPredicate,
}

impl GivenClassesConjunction {
    /// Narrows the selection with another predicate.
    pub fn and(self) -> ClassesThat<Selection> {
        self.chain(Combinator::And)
    }

    /// Widens the selection with another predicate.
    pub fn or(self) -> ClassesThat<Selection> {
        self.chain(Combinator::Or)
    }

    fn chain(self, combinator: Combinator) -> ClassesThat<Selection> {
        ClassesThat {
            sink: Selection {
                previous: Some((combinator, self.selection)),
            },
        }
    }

    /// Moves on to the condition step.
    pub fn should(self) -> ClassesShould {
        ClassesShould {
            selection: self.selection,
        }
    }
}

/// Condition step.
#[derive(Debug)]
#[must_use]
pub struct ClassesShould {
    selection: DescribedPredicate,
}

impl ClassesShould {
    /// Every dependency of a selected class must satisfy the next predicate.
    pub fn only_depend_on_classes_that(self) -> ClassesThat<OnlyDependOn> {
        ClassesThat {
            sink: OnlyDependOn {
                selection: self.selection,
            },
        }
    }

    /// No dependency of a selected class may satisfy the next predicate.
    pub fn not_depend_on_classes_that(self) -> ClassesThat<NotDependOn> {
        ClassesThat {
            sink: NotDependOn {
                selection: self.selection,
            },
        }
    }

    /// Uses a custom condition.
    pub fn satisfy(self, condition: impl ArchCondition + 'static) -> ArchRule {
        ArchRule::new(self.selection, condition)
    }
}

/// Sink turning a predicate into an [`AllDependencyCondition`].
#[derive(Debug)]
pub struct OnlyDependOn {
    selection: DescribedPredicate,
}

impl PredicateSink for OnlyDependOn {
    type Output = ArchRule;

    fn accept(self, predicate: DescribedPredicate) -> ArchRule {
        let description = format!("only depend on classes that {}", predicate.describe());
        ArchRule::new(
            self.selection,
            AllDependencyCondition::new(description, predicate),
        )
    }
}

/// Sink turning a predicate into a [`NeverCondition`] over an
/// [`AllDependencyCondition`].
#[derive(Debug)]
pub struct NotDependOn {
    selection: DescribedPredicate,
}

impl PredicateSink for NotDependOn {
    type Output = ArchRule;

    fn accept(self, predicate: DescribedPredicate) -> ArchRule {
        let description = format!("not depend on classes that {}", predicate.describe());
        let condition = NeverCondition::new(AllDependencyCondition::new(
            description.clone(),
            predicate,
        ))
        .described_as(description);
        ArchRule::new(self.selection, condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::fixture::{context_one, context_two, fake_src};
    use crate::TypeScriptProject;

    const REASON: &str =
        "Domain model should only depend on domains and a very limited set of external dependencies";

    fn shared_kernels() -> Vec<String> {
        let project = TypeScriptProject::from_source(&fake_src()).unwrap();
        project
            .root()
            .shared_kernel_packages("SharedKernel")
            .into_iter()
            .map(|p| p.as_str().to_string())
            .collect()
    }

    fn domain_rule() -> ArchRule {
        let mut allowed = vec!["domain".to_string()];
        allowed.extend(shared_kernels());
        classes()
            .that()
            .reside_in_a_package("domain")
            .should()
            .only_depend_on_classes_that()
            .reside_in_any_package(&allowed)
            .because(REASON)
    }

    #[test]
    fn domain_depending_on_domain_and_kernel_passes() {
        let project = TypeScriptProject::from_source(&context_one()).unwrap();
        assert!(domain_rule().check(project.root().all_classes()).is_ok());
    }

    #[test]
    fn domain_depending_on_infrastructure_fails_with_aggregate_message() {
        let project = TypeScriptProject::from_source(&context_two()).unwrap();
        let err = domain_rule()
            .check(project.root().all_classes())
            .unwrap_err();
        insta::assert_snapshot!(err.to_string(), @r"
        Architecture violation : Domain model should only depend on domains and a very limited set of external dependencies.
        Errors : Wrong dependency in /src/test/fake-src/business-context-two/domain/Basket.ts: /src/test/fake-src/business-context-two/infrastructure/secondary/BasketJson.ts
        ");
    }

    #[test]
    fn checking_twice_gives_identical_outcomes() {
        let project = TypeScriptProject::from_source(&context_two()).unwrap();
        let rule = domain_rule();
        let first = rule.check(project.root().all_classes());
        let second = rule.check(project.root().all_classes());
        assert!(first.is_err());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_selection_passes_vacuously() {
        let project = TypeScriptProject::from_source(&fake_src()).unwrap();
        let rule = classes()
            .that()
            .reside_in_a_package("no-such-package")
            .should()
            .only_depend_on_classes_that()
            .reside_in_any_package::<&str>(&[]);
        assert!(rule.check(project.root().all_classes()).is_ok());
    }

    #[test]
    fn violations_follow_traversal_order() {
        let project = TypeScriptProject::from_source(&fake_src()).unwrap();
        let err = classes()
            .should()
            .only_depend_on_classes_that()
            .reside_in_a_package("shared-kernel")
            .because("only the kernel")
            .check(project.root().all_classes())
            .unwrap_err();
        let targets: Vec<&str> = err
            .violations()
            .iter()
            .map(|m| m.rsplit('/').next().unwrap_or_default())
            .collect();
        assert_eq!(
            targets,
            vec!["Fruit.ts", "FruitName.ts", "BasketJson.ts", "Basket.ts"]
        );
    }

    #[test]
    fn not_depend_on_flags_matching_targets() {
        let project = TypeScriptProject::from_source(&context_two()).unwrap();
        let err = classes()
            .that()
            .reside_in_a_package("domain")
            .should()
            .not_depend_on_classes_that()
            .reside_in_a_package("infrastructure")
            .because("domain stays pure")
            .check(project.root().all_classes())
            .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert!(err.violations()[0].ends_with("infrastructure/secondary/BasketJson.ts"));

        let ok = classes()
            .that()
            .reside_in_a_package("infrastructure")
            .should()
            .not_depend_on_classes_that()
            .reside_in_a_package("application")
            .check(project.root().all_classes());
        assert!(ok.is_ok());
    }

    #[test]
    fn chained_selection_combines_predicates() {
        let project = TypeScriptProject::from_source(&fake_src()).unwrap();
        let rule = classes()
            .that()
            .reside_in_a_package("domain")
            .and()
            .have_simple_name_containing("Basket")
            .should()
            .only_depend_on_classes_that()
            .reside_in_a_package("domain");
        let err = rule.check(project.root().all_classes()).unwrap_err();
        assert_eq!(err.violations().len(), 1);

        let rule = classes()
            .that()
            .have_simple_name_containing("Fruit")
            .or()
            .have_simple_name_containing("Color")
            .should()
            .only_depend_on_classes_that()
            .reside_in_a_package("domain");
        assert!(rule.check(project.root().all_classes()).is_ok());
    }

    #[test]
    fn custom_predicate_and_condition_plug_into_the_builder() {
        let project = TypeScriptProject::from_source(&context_two()).unwrap();
        let rule = classes()
            .that()
            .satisfy(DescribedPredicate::have_simple_name_containing("Json").negate())
            .should()
            .satisfy(NeverCondition::new(AllDependencyCondition::new(
                "depend on infrastructure",
                DescribedPredicate::reside_in_a_package("infrastructure"),
            )));
        assert_eq!(
            rule.description(),
            "classes that not have simple name containing 'Json' should never depend on infrastructure"
        );

        let err = rule.check(project.root().all_classes()).unwrap_err();
        assert_eq!(
            err.violations(),
            ["Wrong dependency in /src/test/fake-src/business-context-two/domain/Basket.ts: /src/test/fake-src/business-context-two/infrastructure/secondary/BasketJson.ts"]
        );
    }

    #[test]
    fn description_is_used_when_no_reason_given() {
        let project = TypeScriptProject::from_source(&context_two()).unwrap();
        let rule = classes()
            .that()
            .reside_in_a_package("domain")
            .should()
            .only_depend_on_classes_that()
            .reside_in_a_package("domain");
        assert_eq!(
            rule.description(),
            "classes that reside in a package 'domain' should only depend on classes that reside in a package 'domain'"
        );
        let err = rule.check(project.root().all_classes()).unwrap_err();
        assert_eq!(err.reason(), rule.description());
        assert!(rule.reason().is_none());
    }
}
