use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use crate::error::{GradebookError, Result};
use crate::models::{Assignment, Category, FinalGrade};

// How far the summed weights may drift from 100% before a warning is raised.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

// Parses the raw text of an entry field into a finite number.
pub fn parse_number(field: &str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(GradebookError::Validation(format!("{} must be numeric.", field))),
    }
}

fn ensure_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GradebookError::Validation(format!("{} must be numeric.", field)))
    }
}

// Categories of one course, keyed by name in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gradebook {
    categories: IndexMap<String, Category>,
}

impl Gradebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    // Categories in display order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories.iter().map(|(name, cat)| (name.as_str(), cat))
    }

    fn category_mut(&mut self, name: &str) -> Result<&mut Category> {
        self.categories
            .get_mut(name)
            .ok_or_else(|| GradebookError::NotFound(format!("category '{}'", name)))
    }

    // Creates an empty category and returns the name it was stored under.
    pub fn add_category(&mut self, name: &str, weight: f64) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GradebookError::Validation("Category must have a name.".to_string()));
        }
        ensure_finite("Weight", weight)?;
        if self.categories.contains_key(name) {
            return Err(GradebookError::Validation(format!("Duplicate category '{}'.", name)));
        }

        self.categories.insert(name.to_string(), Category::new(weight));
        debug!("Added category '{}' with weight {}", name, weight);
        Ok(name.to_string())
    }

    // Renames a category and sets its weight, keeping its assignments and its position.
    pub fn rename_category(&mut self, old_name: &str, new_name: &str, new_weight: f64) -> Result<()> {
        let index = self
            .categories
            .get_index_of(old_name)
            .ok_or_else(|| GradebookError::NotFound(format!("category '{}'", old_name)))?;
        ensure_finite("Weight", new_weight)?;
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(GradebookError::Validation("Category must have a name.".to_string()));
        }
        if new_name != old_name && self.categories.contains_key(new_name) {
            return Err(GradebookError::Validation(format!("Category name '{}' already exists.", new_name)));
        }

        // Nothing below can fail, so the rename is all-or-nothing.
        if new_name == old_name {
            self.categories[index].weight = new_weight;
        } else if let Some((_, mut category)) = self.categories.shift_remove_index(index) {
            category.weight = new_weight;
            self.categories.shift_insert(index, new_name.to_string(), category);
        }
        debug!("Renamed category '{}' to '{}' with weight {}", old_name, new_name, new_weight);
        Ok(())
    }

    // Deletes a category together with all of its assignments.
    pub fn remove_category(&mut self, name: &str) -> Result<Category> {
        let removed = self
            .categories
            .shift_remove(name)
            .ok_or_else(|| GradebookError::NotFound(format!("category '{}'", name)))?;
        debug!("Removed category '{}' ({} assignments)", name, removed.assignments.len());
        Ok(removed)
    }

    // Appends an assignment and returns the category's new average.
    pub fn add_assignment(&mut self, category_name: &str, name: &str, score: f64) -> Result<f64> {
        let category = self.category_mut(category_name)?;
        ensure_finite("Score", score)?;

        category.assignments.push(Assignment::new(name, score));
        debug!("Added assignment '{}' ({}) to '{}'", name, score, category_name);
        Ok(category.average().unwrap_or(score))
    }

    // Replaces the first `(old_name, old_score)` match. The edited assignment moves
    // to the end of the list; use `edit_assignment_at` to keep its place.
    pub fn edit_assignment(
        &mut self,
        category_name: &str,
        old_name: &str,
        old_score: f64,
        new_name: &str,
        new_score: f64,
    ) -> Result<()> {
        let category = self.category_mut(category_name)?;
        let position = category
            .assignments
            .iter()
            .position(|a| a.matches(old_name, old_score))
            .ok_or_else(|| GradebookError::NotFound(format!("assignment '{}' ({}) in '{}'", old_name, old_score, category_name)))?;
        ensure_finite("Score", new_score)?;

        category.assignments.remove(position);
        category.assignments.push(Assignment::new(new_name, new_score));
        debug!("Edited assignment '{}' in '{}'", old_name, category_name);
        Ok(())
    }

    // Replaces the assignment at `index` without moving it.
    pub fn edit_assignment_at(&mut self, category_name: &str, index: usize, new_name: &str, new_score: f64) -> Result<()> {
        let category = self.category_mut(category_name)?;
        if index >= category.assignments.len() {
            return Err(GradebookError::NotFound(format!("assignment #{} in '{}'", index, category_name)));
        }
        ensure_finite("Score", new_score)?;

        category.assignments[index] = Assignment::new(new_name, new_score);
        debug!("Edited assignment #{} in '{}'", index, category_name);
        Ok(())
    }

    // Removes the first assignment equal to `(name, score)`.
    pub fn remove_assignment(&mut self, category_name: &str, name: &str, score: f64) -> Result<Assignment> {
        let category = self.category_mut(category_name)?;
        let position = category
            .assignments
            .iter()
            .position(|a| a.matches(name, score))
            .ok_or_else(|| GradebookError::NotFound(format!("assignment '{}' ({}) in '{}'", name, score, category_name)))?;

        debug!("Removed assignment '{}' from '{}'", name, category_name);
        Ok(category.assignments.remove(position))
    }

    pub fn remove_assignment_at(&mut self, category_name: &str, index: usize) -> Result<Assignment> {
        let category = self.category_mut(category_name)?;
        if index >= category.assignments.len() {
            return Err(GradebookError::NotFound(format!("assignment #{} in '{}'", index, category_name)));
        }

        debug!("Removed assignment #{} from '{}'", index, category_name);
        Ok(category.assignments.remove(index))
    }

    // Mean score of a category, `Ok(None)` while it has no assignments.
    pub fn category_average(&self, category_name: &str) -> Result<Option<f64>> {
        self.categories
            .get(category_name)
            .map(Category::average)
            .ok_or_else(|| GradebookError::NotFound(format!("category '{}'", category_name)))
    }

    // Weighted final grade. Ungraded categories add nothing to the grade but their
    // weight still counts toward the 100% check.
    pub fn final_grade(&self) -> FinalGrade {
        let mut grade = 0.0;
        let mut total_weight = 0.0;
        for category in self.categories.values() {
            let w = category.weight / 100.0;
            total_weight += w;
            if let Some(avg) = category.average() {
                grade += avg * w;
            }
        }

        let weight_warning = (total_weight - 1.0).abs() > WEIGHT_TOLERANCE;
        if weight_warning {
            warn!("Total weight is {:.2}%, not 100%", total_weight * 100.0);
        }
        FinalGrade { grade, total_weight, weight_warning }
    }

    // Pretty JSON document with a four-space indent.
    pub fn serialize(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        Serialize::serialize(self, &mut ser)?;
        String::from_utf8(buf).map_err(|e| GradebookError::Malformed(e.to_string()))
    }

    // Strictly decodes a document produced by `serialize`.
    pub fn deserialize(blob: &str) -> Result<Gradebook> {
        let gradebook: Gradebook = serde_json::from_str(blob)?;
        gradebook.validate()?;
        Ok(gradebook)
    }

    // Checks the invariants serde cannot express on its own.
    fn validate(&self) -> Result<()> {
        for (name, category) in &self.categories {
            if name.trim().is_empty() {
                return Err(GradebookError::Malformed("category with a blank name".to_string()));
            }
            if !category.weight.is_finite() {
                return Err(GradebookError::Malformed(format!("category '{}' has a non-finite weight", name)));
            }
            if let Some(a) = category.assignments.iter().find(|a| !a.score.is_finite()) {
                return Err(GradebookError::Malformed(format!("assignment '{}' in '{}' has a non-finite score", a.name, name)));
            }
        }
        Ok(())
    }
}
