use std::ops::RangeInclusive;

use crate::error::{CoreError, CoreResult};

/// The ranges a topic draws quotients and divisors from.
///
/// Generating from a rule is a pure function of the random source; the rule
/// itself holds no state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRule {
    /// Inclusive range the quotient (the answer) is drawn from.
    pub quotient: RangeInclusive<u32>,
    /// Inclusive range the divisor is drawn from.
    pub divisor: RangeInclusive<u32>,
}

impl TopicRule {
    /// Check that every draw yields a well-formed question.
    ///
    /// Both ranges must be non-empty, the divisor must be at least 1, and
    /// the largest dividend must fit in a `u32`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.quotient.is_empty() || self.divisor.is_empty() {
            return Err(CoreError::InvalidRule("empty range".to_string()));
        }
        if *self.divisor.start() == 0 {
            return Err(CoreError::InvalidRule("divisor range includes 0".to_string()));
        }
        if self.quotient.end().checked_mul(*self.divisor.end()).is_none() {
            return Err(CoreError::InvalidRule(format!(
                "{} × {} overflows",
                self.quotient.end(),
                self.divisor.end()
            )));
        }
        Ok(())
    }
}

/// A named difficulty tier with its question-generation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Identity key (e.g. `"basic"`).
    pub key: String,
    /// Display name, stored in history entries.
    pub name: String,
    /// How questions for this topic are drawn.
    pub rule: TopicRule,
}

impl Topic {
    /// Single-digit quotients.
    pub fn basic() -> Self {
        Self {
            key: "basic".to_string(),
            name: "Redstone Basics (single-digit quotient)".to_string(),
            rule: TopicRule {
                quotient: 1..=9,
                divisor: 1..=9,
            },
        }
    }

    /// Two-digit quotients from 10 to 20.
    pub fn advanced() -> Self {
        Self {
            key: "advanced".to_string(),
            name: "End Portal (two-digit quotient)".to_string(),
            rule: TopicRule {
                quotient: 10..=20,
                divisor: 1..=9,
            },
        }
    }

    /// All built-in topics.
    pub fn catalog() -> Vec<Topic> {
        vec![Self::basic(), Self::advanced()]
    }

    /// Look up a built-in topic by key (case-insensitive).
    pub fn find(key: &str) -> CoreResult<Topic> {
        let lower = key.trim().to_lowercase();
        Self::catalog()
            .into_iter()
            .find(|t| t.key == lower)
            .ok_or_else(|| CoreError::UnknownTopic(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys() {
        let keys: Vec<String> = Topic::catalog().into_iter().map(|t| t.key).collect();
        assert_eq!(keys, vec!["basic", "advanced"]);
    }

    #[test]
    fn advanced_rule_ranges() {
        let t = Topic::find("Advanced").unwrap();
        assert_eq!(t.rule.quotient, 10..=20);
        assert_eq!(t.rule.divisor, 1..=9);
    }

    #[test]
    fn catalog_rules_are_valid() {
        for topic in Topic::catalog() {
            assert!(topic.rule.validate().is_ok(), "{}", topic.key);
        }
    }

    #[test]
    fn broken_rules_rejected() {
        let zero = TopicRule {
            quotient: 1..=9,
            divisor: 0..=9,
        };
        let huge = TopicRule {
            quotient: 1..=u32::MAX / 2,
            divisor: 1..=9,
        };
        let empty = TopicRule {
            quotient: RangeInclusive::new(9, 1),
            divisor: 1..=9,
        };
        for rule in [zero, huge, empty] {
            assert!(matches!(rule.validate(), Err(CoreError::InvalidRule(_))));
        }
    }

    #[test]
    fn unknown_topic() {
        let err = Topic::find("nether").unwrap_err();
        assert_eq!(err.to_string(), "unknown topic: nether");
    }
}
