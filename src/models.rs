use serde::{Deserialize, Serialize};

// A single scored item. On disk it is the two-element array `[name, score]`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct Assignment {
    pub name: String,
    pub score: f64,
}

impl Assignment {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Assignment { name: name.into(), score }
    }

    // Exact structural match on `(name, score)`.
    pub fn matches(&self, name: &str, score: f64) -> bool {
        self.name == name && self.score == score
    }
}

impl From<(String, f64)> for Assignment {
    fn from((name, score): (String, f64)) -> Self {
        Assignment { name, score }
    }
}

impl From<Assignment> for (String, f64) {
    fn from(a: Assignment) -> Self {
        (a.name, a.score)
    }
}

// A weighted group of assignments. The name is the key it is stored under.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub weight: f64,
    pub assignments: Vec<Assignment>,
}

impl Category {
    pub fn new(weight: f64) -> Self {
        Category { weight, assignments: Vec::new() }
    }

    // Mean of all scores, or `None` when there is nothing to average.
    pub fn average(&self) -> Option<f64> {
        if self.assignments.is_empty() {
            return None;
        }
        let total: f64 = self.assignments.iter().map(|a| a.score).sum();
        Some(total / self.assignments.len() as f64)
    }
}

// Result of a final-grade computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalGrade {
    pub grade: f64,
    // Sum of every category's `weight / 100`, graded or not.
    pub total_weight: f64,
    pub weight_warning: bool,
}
