use super::scenario::Scenario;
use crate::types::Point2;

/// Built-in problems selectable from the command line
pub fn preset_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            description: "No obstacles".to_string(),
            link_lengths: vec![4.0, 3.0],
            start: Point2::new(4.0, 4.0),
            end: Point2::new(-5.0, 3.0),
            obstacles: Vec::new(),
        },
        Scenario {
            description: "Two obstacles".to_string(),
            link_lengths: vec![4.0, 3.0],
            start: Point2::new(4.0, 4.0),
            end: Point2::new(-5.0, 3.0),
            obstacles: vec![Point2::new(2.0, 5.0), Point2::new(-3.0, 4.0)],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::traits::ConfigSection;

    #[test]
    fn test_presets_validate() {
        for preset in preset_scenarios() {
            assert!(preset.validate().is_ok(), "{} should be valid", preset.description);
        }
    }
}
