use std::collections::HashMap;

/// Canonical string form used to discretize a feature value.
///
/// Values compare by this text, so `1.0` and `1.00` read from a file land in
/// the same bucket while `0.0` and `-0.0` do not.
pub fn discretize(value: f64) -> String {
    format!("{:?}", value)
}

/// One additive-smoothed estimate, kept as a fraction for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothed {
    pub numerator: f64,
    pub denominator: f64,
}

impl Smoothed {
    pub fn probability(&self) -> f64 {
        self.numerator / self.denominator
    }
}

/// Smoothed `P(value at column | label)` for every observed combination.
#[derive(Clone, Debug, Default)]
pub struct ConditionalProbabilityTable {
    by_label: HashMap<String, Vec<HashMap<String, Smoothed>>>,
}

impl ConditionalProbabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: &str, column: usize, label: &str, entry: Smoothed) {
        let columns = self.by_label.entry(label.to_string()).or_default();
        if columns.len() <= column {
            columns.resize_with(column + 1, HashMap::new);
        }
        columns[column].insert(value.to_string(), entry);
    }

    pub fn get(&self, value: &str, column: usize, label: &str) -> Option<Smoothed> {
        self.by_label.get(label)?.get(column)?.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.by_label.values()
            .flat_map(|columns| columns.iter().map(HashMap::len))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
