//! Ordered rule evaluation for heuristic classification.
//!
//! A [`RuleSet`] holds `(name, predicate, outcome)` triples checked in the
//! order they were added. The first predicate that holds decides the outcome;
//! if none does, the fallback applies.

use std::fmt;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

struct Rule<T, O> {
    name: &'static str,
    predicate: Predicate<T>,
    outcome: O,
}

/// Priority-ordered classifier
pub struct RuleSet<T, O> {
    rules: Vec<Rule<T, O>>,
    fallback_name: &'static str,
    fallback: O,
}

impl<T, O> RuleSet<T, O> {
    /// Create an empty rule set that always yields `fallback`
    pub fn new(fallback_name: &'static str, fallback: O) -> Self {
        Self {
            rules: Vec::new(),
            fallback_name,
            fallback,
        }
    }

    /// Append a rule with lower priority than every rule added before it
    pub fn rule<F>(mut self, name: &'static str, predicate: F, outcome: O) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            name,
            predicate: Box::new(predicate),
            outcome,
        });
        self
    }

    /// Outcome of the first matching rule, or the fallback
    pub fn evaluate(&self, input: &T) -> &O {
        self.first_match(input)
            .map(|rule| &rule.outcome)
            .unwrap_or(&self.fallback)
    }

    /// Name of the rule that decides `input`
    pub fn matching_rule(&self, input: &T) -> &'static str {
        self.first_match(input)
            .map(|rule| rule.name)
            .unwrap_or(self.fallback_name)
    }

    /// Rule names in priority order, fallback last
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .map(|rule| rule.name)
            .chain(std::iter::once(self.fallback_name))
            .collect()
    }

    fn first_match(&self, input: &T) -> Option<&Rule<T, O>> {
        self.rules.iter().find(|rule| (rule.predicate)(input))
    }
}

impl<T, O: fmt::Debug> fmt::Debug for RuleSet<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for rule in &self.rules {
            list.entry(&(rule.name, &rule.outcome));
        }
        list.entry(&(self.fallback_name, &self.fallback));
        list.finish()
    }
}
