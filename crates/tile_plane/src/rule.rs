//! Propagation rules and the ordered rule set.
//!
//! A rule is a result color plus a list of neighbor conditions
//! `(threshold, color)`: it matches a tile when, for every condition, at
//! least `threshold` of the tile's neighbors carry `color`. Rules are kept
//! in priority order and the first match wins.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{RuleError, MAX_RULE_WEIGHT};

/// One neighbor condition of a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    /// Minimum number of neighbors with `color`.
    pub threshold: u32,
    /// Neighbor color being counted.
    pub color: String,
}

/// Count of neighbor colors around one tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorHistogram<'a> {
    counts: HashMap<&'a str, u32>,
}

impl<'a> ColorHistogram<'a> {
    /// Tally an iterator of neighbor colors.
    pub fn from_colors(colors: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts: HashMap<&'a str, u32> = HashMap::new();
        for color in colors {
            *counts.entry(color).or_default() += 1;
        }
        Self { counts }
    }

    /// Number of neighbors with `color`.
    pub fn count(&self, color: &str) -> u32 {
        self.counts.get(color).copied().unwrap_or(0)
    }

    /// Total number of neighbors tallied.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Number of distinct colors.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

/// A propagation rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    result: String,
    conditions: Vec<Condition>,
    usage: u64,
}

impl Rule {
    /// Build a rule, rejecting conditions whose thresholds sum above
    /// [`MAX_RULE_WEIGHT`].
    pub fn new(result: impl Into<String>, conditions: Vec<Condition>) -> Result<Self, RuleError> {
        let result = result.into();
        if result.is_empty() {
            return Err(RuleError::MissingResult);
        }
        let sum = conditions
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.threshold));
        if sum > MAX_RULE_WEIGHT {
            return Err(RuleError::Overweight { sum });
        }
        Ok(Self {
            result,
            conditions,
            usage: 0,
        })
    }

    /// Parse `beta k1 c1 k2 c2 ...`.
    ///
    /// # Example
    /// ```
    /// use tile_plane::Rule;
    ///
    /// let rule = Rule::parse("red 2 blue 1 green").unwrap();
    /// assert_eq!(rule.result(), "red");
    /// assert_eq!(rule.weight(), 3);
    /// assert_eq!(rule.to_string(), "red: 2 blue 1 green");
    ///
    /// assert!(Rule::parse("red 5 blue 4 green").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        let mut tokens = text.split_whitespace();
        let result = tokens.next().ok_or(RuleError::MissingResult)?;

        let mut conditions = Vec::new();
        while let Some(token) = tokens.next() {
            let threshold: u32 = token.parse().map_err(|_| RuleError::InvalidThreshold {
                token: token.to_string(),
            })?;
            let color = tokens
                .next()
                .ok_or(RuleError::MissingColor { threshold })?;
            conditions.push(Condition {
                threshold,
                color: color.to_string(),
            });
        }

        Self::new(result, conditions)
    }

    /// Color a matching tile takes.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Conditions in declaration order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Number of times this rule has fired.
    pub fn usage(&self) -> u64 {
        self.usage
    }

    /// Sum of all thresholds.
    pub fn weight(&self) -> u32 {
        self.conditions.iter().map(|c| c.threshold).sum()
    }

    /// Check every condition against a neighbor histogram.
    ///
    /// A rule without conditions always matches.
    pub fn matches(&self, histogram: &ColorHistogram<'_>) -> bool {
        self.conditions
            .iter()
            .all(|c| histogram.count(&c.color) >= c.threshold)
    }

    pub(crate) fn record_use(&mut self) {
        self.usage += 1;
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::parse(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.result)?;
        for (i, c) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} {}", c.threshold, c.color)?;
        }
        Ok(())
    }
}

/// Rules in priority order (earliest first).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule at the lowest priority.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule at priority `index`.
    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    /// Iterate rules in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Index of the first rule matching `histogram`.
    pub fn first_match(&self, histogram: &ColorHistogram<'_>) -> Option<usize> {
        self.rules.iter().position(|rule| rule.matches(histogram))
    }

    /// Bump the usage counter of the rule at `index`.
    pub(crate) fn record_use(&mut self, index: usize) {
        if let Some(rule) = self.rules.get_mut(index) {
            rule.record_use();
        }
    }

    /// Sum of every rule's usage counter.
    pub fn total_usage(&self) -> u64 {
        self.rules.iter().map(Rule::usage).sum()
    }

    /// Stable sort by ascending usage; equal counts keep their order.
    pub fn reorder(&mut self) {
        let rules = std::mem::take(&mut self.rules);
        self.rules = merge_sort_by_usage(rules);
    }

    /// Remove every rule.
    pub fn clear(&mut self) {
        self.rules.clear();
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

fn merge_sort_by_usage(mut rules: Vec<Rule>) -> Vec<Rule> {
    if rules.len() <= 1 {
        return rules;
    }
    let right = rules.split_off(rules.len() / 2);
    merge(merge_sort_by_usage(rules), merge_sort_by_usage(right))
}

// Ties take from the left half, which keeps the sort stable.
fn merge(left: Vec<Rule>, right: Vec<Rule>) -> Vec<Rule> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.usage <= r.usage,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        out.extend(if take_left { left.next() } else { right.next() });
    }
    out
}
