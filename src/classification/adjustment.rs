//! Reinterpreting raw scores in light of a file's classification.
//!
//! A utility module is expected to mix helpers and a barrel is expected to
//! re-export everything, so their raw cohesion and fragmentation are softened
//! before issue detection.

use super::entity::has_shared_entity_noun;
use super::rules::FileClassification;
use super::signals::{has_leading_token, leading_token};
use crate::core::{ExportKind, FileNode, UNKNOWN_DOMAIN};
use crate::extraction::split_identifier;
use std::collections::BTreeSet;

/// Multiplier applied to fragmentation for each classification.
pub fn fragmentation_multiplier(classification: FileClassification) -> f64 {
    match classification {
        FileClassification::BarrelExport | FileClassification::TypeDefinition => 0.0,
        FileClassification::UtilityModule
        | FileClassification::ServiceFile
        | FileClassification::LambdaHandler
        | FileClassification::EmailTemplate
        | FileClassification::ParserFile
        | FileClassification::NextjsPage => 0.2,
        FileClassification::CohesiveModule => 0.3,
        FileClassification::MixedConcerns => 1.0,
        FileClassification::Unknown => 0.7,
    }
}

pub fn adjust_fragmentation_for_classification(
    fragmentation: f64,
    classification: FileClassification,
) -> f64 {
    fragmentation * fragmentation_multiplier(classification)
}

/// Floor and boost for one cohesion adjustment: `min(1, max(floor, base + boost))`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CohesionLift {
    floor: f64,
    boost: f64,
}

impl CohesionLift {
    const fn new(floor: f64, boost: f64) -> Self {
        Self { floor, boost }
    }

    fn apply(self, base: f64) -> f64 {
        (base + self.boost).max(self.floor).min(1.0)
    }

    fn pick(strong: bool, strong_lift: Self, default_lift: Self) -> Self {
        if strong {
            strong_lift
        } else {
            default_lift
        }
    }
}

pub fn adjust_cohesion_for_classification(
    cohesion: f64,
    classification: FileClassification,
    node: &FileNode,
) -> f64 {
    match classification {
        FileClassification::BarrelExport
        | FileClassification::TypeDefinition
        | FileClassification::NextjsPage => 1.0,
        FileClassification::UtilityModule => CohesionLift::pick(
            exports_share_theme(node),
            CohesionLift::new(0.80, 0.45),
            CohesionLift::new(0.75, 0.35),
        )
        .apply(cohesion),
        FileClassification::ServiceFile => CohesionLift::pick(
            node.exports.iter().any(|e| e.kind == ExportKind::Class),
            CohesionLift::new(0.78, 0.40),
            CohesionLift::new(0.72, 0.30),
        )
        .apply(cohesion),
        FileClassification::LambdaHandler => CohesionLift::pick(
            has_single_entry_point(node),
            CohesionLift::new(0.80, 0.45),
            CohesionLift::new(0.75, 0.35),
        )
        .apply(cohesion),
        FileClassification::EmailTemplate => CohesionLift::pick(
            node.exports.iter().any(|e| {
                let name = e.name.to_lowercase();
                name.contains("render") || name.contains("generate") || name.contains("template")
            }),
            CohesionLift::new(0.75, 0.40),
            CohesionLift::new(0.72, 0.30),
        )
        .apply(cohesion),
        FileClassification::ParserFile => CohesionLift::pick(
            node.exports
                .iter()
                .any(|e| has_leading_token(&e.name, &["parse", "transform", "convert"])),
            CohesionLift::new(0.75, 0.40),
            CohesionLift::new(0.70, 0.30),
        )
        .apply(cohesion),
        FileClassification::CohesiveModule => cohesion.max(0.7),
        FileClassification::MixedConcerns => cohesion,
        FileClassification::Unknown => (cohesion + 0.1).min(1.0),
    }
}

fn has_single_entry_point(node: &FileNode) -> bool {
    node.exports.len() == 1
        || node
            .exports
            .iter()
            .any(|e| e.name.to_lowercase().contains("handler"))
}

/// Do the exports look like one family: a common name token, a common
/// leading verb, a single known domain, or a shared entity noun?
pub fn exports_share_theme(node: &FileNode) -> bool {
    let exports = &node.exports;
    if exports.len() < 2 {
        return false;
    }

    let mut token_sets = exports.iter().map(|e| {
        split_identifier(&e.name)
            .into_iter()
            .filter(|t| t.len() > 2)
            .collect::<BTreeSet<_>>()
    });
    let shared_stem = token_sets.next().is_some_and(|first| {
        let shared = token_sets.fold(first, |acc, tokens| {
            acc.intersection(&tokens).cloned().collect()
        });
        !shared.is_empty()
    });
    if shared_stem {
        return true;
    }

    let first_prefix = leading_token(&exports[0].name);
    let shared_prefix = first_prefix.is_some()
        && exports
            .iter()
            .all(|e| leading_token(&e.name) == first_prefix);
    if shared_prefix {
        return true;
    }

    let first_domain = exports[0].domain_or_unknown();
    let shared_domain = first_domain != UNKNOWN_DOMAIN
        && exports.iter().all(|e| e.domain_or_unknown() == first_domain);
    if shared_domain {
        return true;
    }

    let names: Vec<&str> = exports.iter().map(|e| e.name.as_str()).collect();
    has_shared_entity_noun(&names)
}
