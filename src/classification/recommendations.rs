use super::rules::FileClassification;

/// Fixed guidance for each classification, most important first.
pub fn classification_recommendations(classification: FileClassification) -> Vec<String> {
    let lines: &[&str] = match classification {
        FileClassification::BarrelExport => &[
            "Barrel export file detected - multiple domains are expected here",
            "Consider if this barrel export improves or hinders discoverability",
        ],
        FileClassification::TypeDefinition => &[
            "Type definition file - centralized types improve consistency",
            "Consider splitting if file becomes too large (>500 lines)",
        ],
        FileClassification::CohesiveModule => &[
            "Module has good cohesion despite its size",
            "Consider documenting the module boundaries for AI assistants",
        ],
        FileClassification::LambdaHandler => &[
            "Lambda handler - single entry point with helpers is expected",
            "Keep business logic in separate modules the handler calls",
        ],
        FileClassification::EmailTemplate => &[
            "Email template - rendering helpers alongside templates is expected",
            "Share layout components between related templates",
        ],
        FileClassification::ParserFile => &[
            "Parser/transformer file - related conversion functions belong together",
            "Document the input and output formats of each transformation",
        ],
        FileClassification::ServiceFile => &[
            "Service file - orchestration across domains is expected",
            "Keep the service thin and delegate domain logic to focused modules",
        ],
        FileClassification::NextjsPage => &[
            "Next.js page - page component and metadata exports belong together",
            "Move data fetching helpers into a separate module if they grow",
        ],
        FileClassification::UtilityModule => &[
            "Utility module detected - multiple domains are acceptable here",
            "Consider grouping related utilities by prefix or domain for better discoverability",
        ],
        FileClassification::MixedConcerns => &[
            "Consider splitting this file by domain",
            "Identify independent responsibilities and extract them into separate modules",
            "Review import dependencies to understand coupling",
        ],
        FileClassification::Unknown => {
            &["Review file structure and consider if it follows single responsibility"]
        }
    };

    lines.iter().map(|line| line.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_classification_has_guidance() {
        for label in FileClassification::ALL {
            let recs = classification_recommendations(label);
            assert!((1..=3).contains(&recs.len()), "{} has {} lines", label, recs.len());
        }
    }

    #[test]
    fn test_mixed_concerns_suggests_splitting() {
        let recs = classification_recommendations(FileClassification::MixedConcerns);
        assert_eq!(recs[0], "Consider splitting this file by domain");
        assert_eq!(recs.len(), 3);
    }
}
