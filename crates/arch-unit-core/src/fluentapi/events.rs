//! Outcomes recorded while a condition is checked.

use serde::Serialize;

/// One evaluation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionEvent {
    message: String,
    violating: bool,
}

impl ConditionEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(message: impl Into<String>, violating: bool) -> Self {
        Self {
            message: message.into(),
            violating,
        }
    }

    /// Message, reported verbatim when the event is a violation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this outcome breaks the rule.
    #[must_use]
    pub fn is_violating(&self) -> bool {
        self.violating
    }

    /// Same message, opposite flag.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            message: self.message.clone(),
            violating: !self.violating,
        }
    }
}

/// Append-only, insertion-ordered collection of [`ConditionEvent`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConditionEvents {
    events: Vec<ConditionEvent>,
}

impl ConditionEvents {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn add(&mut self, event: ConditionEvent) {
        self.events.push(event);
    }

    /// Violating events, in insertion order.
    #[must_use]
    pub fn violating(&self) -> Vec<&ConditionEvent> {
        self.events.iter().filter(|e| e.is_violating()).collect()
    }

    /// Whether any recorded event is violating.
    #[must_use]
    pub fn has_violation(&self) -> bool {
        self.events.iter().any(ConditionEvent::is_violating)
    }

    /// All events, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ConditionEvent> {
        self.events.iter()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl IntoIterator for ConditionEvents {
    type Item = ConditionEvent;
    type IntoIter = std::vec::IntoIter<ConditionEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
