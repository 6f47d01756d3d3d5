use crate::conf::types::LogloomConfig;
use crate::conf::validation::ValidationReport;

/// Checks a loaded config, collecting every problem rather than stopping at the first.
pub fn validate_config(config: &LogloomConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.sources.pattern.trim().is_empty() {
        report.error(
            "sources.pattern",
            "source pattern is empty".to_string(),
            Some("Use a glob such as \"*.log\".".to_string()),
        );
    }

    if !config.sources.dir.is_dir() {
        report.warning(
            "sources.dir",
            format!("source directory {} does not exist", config.sources.dir.display()),
            None,
        );
    }

    if config.sources.dir == config.entity_logs.dir {
        report.error(
            "entity_logs.dir",
            "entity logs would be written into the source directory".to_string(),
            Some("Point entity_logs.dir somewhere other than sources.dir.".to_string()),
        );
    }

    let markers = [
        ("intervals.start_marker", &config.intervals.start_marker),
        ("intervals.end_marker", &config.intervals.end_marker),
    ];
    for (field, marker) in markers {
        if marker.trim().is_empty() {
            report.error(field, "marker is empty".to_string(), None);
        } else if marker.trim() != marker.as_str() {
            report.error(
                field,
                format!("marker {marker:?} has surrounding whitespace"),
                Some("Payloads are trimmed before matching, so this marker can never match.".to_string()),
            );
        }
    }

    if config.intervals.start_marker == config.intervals.end_marker {
        report.error(
            "intervals.end_marker",
            "start and end markers are identical".to_string(),
            None,
        );
    }

    report
}
