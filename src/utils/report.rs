use crate::models::{Assignment, Category, FinalGrade};
use crate::utils::gradebook::Gradebook;

// Builds the display row of a category: its weight and running average.
pub fn category_line(name: &str, category: &Category) -> String {
    let average = match category.average() {
        Some(avg) => format!("{:.2}", avg),
        None => "--".to_string(),
    };
    format!("{}  {}%  {}", name, category.weight, average)
}

pub fn assignment_line(assignment: &Assignment) -> String {
    format!("    {}  {:.2}", assignment.name, assignment.score)
}

// Constructs the final grade message, with the weight warning when it applies.
pub fn final_grade_message(result: &FinalGrade) -> String {
    let mut message = format!("Your final grade is: {:.2}%", result.grade);
    if result.weight_warning {
        message.push_str("\nWarning: Total weight does not sum to 100%.");
    }
    message
}

// Renders every category with its assignments, then the final grade.
pub fn render(gradebook: &Gradebook) -> String {
    let mut report = String::new();
    for (name, category) in gradebook.categories() {
        report.push_str(&category_line(name, category));
        report.push('\n');
        for assignment in &category.assignments {
            report.push_str(&assignment_line(assignment));
            report.push('\n');
        }
    }
    report.push('\n');
    report += &final_grade_message(&gradebook.final_grade());
    report
}
