/// Declarative input rules for form fields. Rules are checked in order and
/// the first failure wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Integer,
}

impl Rule {
    fn check(&self, value: &str) -> Option<String> {
        match self {
            Rule::Required if value.trim().is_empty() => {
                Some("This field is required".to_string())
            }
            Rule::MinLength(min) if value.chars().count() < *min => {
                Some(format!("Must be at least {} characters", min))
            }
            Rule::MaxLength(max) if value.chars().count() > *max => {
                Some(format!("Must be at most {} characters", max))
            }
            Rule::Integer if !value.trim().is_empty() && value.trim().parse::<u32>().is_err() => {
                Some("Must be a whole number".to_string())
            }
            _ => None,
        }
    }
}

pub fn first_error(rules: &[Rule], value: &str) -> Option<String> {
    rules.iter().find_map(|rule| rule.check(value))
}
