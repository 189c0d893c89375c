//! File classification as an ordered rule list.
//!
//! Rules are evaluated top to bottom and the first match wins. Later rules
//! assume every earlier one failed (a barrel file never reaches the utility
//! check), so the order of [`CLASSIFICATION_RULES`] is part of the behavior.

use super::entity::has_shared_entity_noun;
use super::signals::{
    has_leading_token, has_type_path_signal, is_index_file, is_under_utility_directory,
    FileSignals,
};
use crate::core::{ExportKind, FileNode, UNKNOWN_DOMAIN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a file's raw metrics look the way they do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileClassification {
    BarrelExport,
    TypeDefinition,
    CohesiveModule,
    LambdaHandler,
    EmailTemplate,
    ParserFile,
    ServiceFile,
    NextjsPage,
    UtilityModule,
    MixedConcerns,
    Unknown,
}

impl FileClassification {
    pub const ALL: [FileClassification; 11] = [
        FileClassification::BarrelExport,
        FileClassification::TypeDefinition,
        FileClassification::CohesiveModule,
        FileClassification::LambdaHandler,
        FileClassification::EmailTemplate,
        FileClassification::ParserFile,
        FileClassification::ServiceFile,
        FileClassification::NextjsPage,
        FileClassification::UtilityModule,
        FileClassification::MixedConcerns,
        FileClassification::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileClassification::BarrelExport => "barrel-export",
            FileClassification::TypeDefinition => "type-definition",
            FileClassification::CohesiveModule => "cohesive-module",
            FileClassification::LambdaHandler => "lambda-handler",
            FileClassification::EmailTemplate => "email-template",
            FileClassification::ParserFile => "parser-file",
            FileClassification::ServiceFile => "service-file",
            FileClassification::NextjsPage => "nextjs-page",
            FileClassification::UtilityModule => "utility-module",
            FileClassification::MixedConcerns => "mixed-concerns",
            FileClassification::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything a rule may look at.
pub struct ClassificationContext<'a> {
    pub signals: FileSignals<'a>,
    pub cohesion: f64,
    pub domains: &'a [String],
}

impl<'a> ClassificationContext<'a> {
    pub fn new(node: &'a FileNode, cohesion: f64, domains: &'a [String]) -> Self {
        Self {
            signals: FileSignals::new(node),
            cohesion,
            domains,
        }
    }

    fn known_domain_count(&self) -> usize {
        self.domains
            .iter()
            .filter(|d| d.as_str() != UNKNOWN_DOMAIN)
            .count()
    }
}

/// A named predicate and the label it assigns.
pub struct ClassificationRule {
    pub name: &'static str,
    pub label: FileClassification,
    pub matches: fn(&ClassificationContext) -> bool,
}

pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "barrel-export",
        label: FileClassification::BarrelExport,
        matches: is_barrel_export,
    },
    ClassificationRule {
        name: "type-definition",
        label: FileClassification::TypeDefinition,
        matches: is_type_definition,
    },
    ClassificationRule {
        name: "config-or-schema",
        label: FileClassification::CohesiveModule,
        matches: is_config_or_schema,
    },
    ClassificationRule {
        name: "lambda-handler",
        label: FileClassification::LambdaHandler,
        matches: is_lambda_handler,
    },
    ClassificationRule {
        name: "data-access",
        label: FileClassification::CohesiveModule,
        matches: is_data_access,
    },
    ClassificationRule {
        name: "email-template",
        label: FileClassification::EmailTemplate,
        matches: is_email_template,
    },
    ClassificationRule {
        name: "parser",
        label: FileClassification::ParserFile,
        matches: is_parser_file,
    },
    ClassificationRule {
        name: "service",
        label: FileClassification::ServiceFile,
        matches: is_service_file,
    },
    ClassificationRule {
        name: "session-or-state",
        label: FileClassification::CohesiveModule,
        matches: is_session_or_state,
    },
    ClassificationRule {
        name: "nextjs-page",
        label: FileClassification::NextjsPage,
        matches: is_nextjs_page,
    },
    ClassificationRule {
        name: "utility",
        label: FileClassification::UtilityModule,
        matches: is_utility_module,
    },
    ClassificationRule {
        name: "single-domain-or-shared-entity",
        label: FileClassification::CohesiveModule,
        matches: is_single_domain_or_shared_entity,
    },
    ClassificationRule {
        name: "mixed-concerns",
        label: FileClassification::MixedConcerns,
        matches: is_mixed_concerns,
    },
    ClassificationRule {
        name: "high-cohesion",
        label: FileClassification::CohesiveModule,
        matches: has_high_cohesion,
    },
];

/// Classify a file from its node, raw cohesion and domain list.
pub fn classify_file(node: &FileNode, cohesion: f64, domains: &[String]) -> FileClassification {
    let context = ClassificationContext::new(node, cohesion, domains);
    matching_rule(&context).map_or(FileClassification::Unknown, |rule| rule.label)
}

/// The first rule that matches, if any.
pub fn matching_rule(context: &ClassificationContext) -> Option<&'static ClassificationRule> {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.matches)(context))
}

fn is_barrel_export(ctx: &ClassificationContext) -> bool {
    let s = &ctx.signals;
    let exports = s.export_count();
    let imports = s.import_count();
    let loc = s.node.lines_of_code;

    if is_index_file(s) && imports > 0 && exports > 0 {
        return true;
    }
    if exports > 3 && loc < exports * 5 && imports as f64 >= exports as f64 * 0.5 {
        return true;
    }
    loc > 0 && loc < 50 && exports >= 2 && imports > 0
}

fn is_type_definition(ctx: &ClassificationContext) -> bool {
    let s = &ctx.signals;
    if has_type_path_signal(s) {
        return true;
    }

    let total = s.export_count();
    if total == 0 {
        return false;
    }
    let types = s.type_export_count();
    let runtime = s.runtime_export_count();

    types == total || (types as f64 / total as f64 > 0.7 && types > runtime)
}

const CONFIG_TOKENS: &[&str] = &[
    "config",
    "configuration",
    "schema",
    "setting",
    "option",
    "constant",
    "env",
    "environment",
];

fn is_config_or_schema(ctx: &ClassificationContext) -> bool {
    let s = &ctx.signals;
    s.stem_has_token(CONFIG_TOKENS)
        || s.path_contains_any(&["/config/", "/schemas/", "/settings/"])
        || s.any_export_contains(&["table", "schema", "config", "setting"])
}

const HANDLER_ENTRY_NAMES: &[&str] = &["handler", "main", "lambdahandler"];

fn is_handler_entry_name(name: &str) -> bool {
    HANDLER_ENTRY_NAMES.contains(&name) || name.ends_with("handler")
}

fn is_lambda_handler(ctx: &ClassificationContext) -> bool {
    let s = &ctx.signals;
    if s.stem_has_token(&["handler", "lambda"])
        || s.path_contains_any(&["/handlers/", "/lambdas/", "/lambda/", "/functions/"])
    {
        return true;
    }

    if s.export_count() != 1 {
        return false;
    }
    if is_handler_entry_name(&s.export_names[0]) {
        return true;
    }

    let kind = s.node.exports[0].kind;
    matches!(kind, ExportKind::Function | ExportKind::Default)
        && s.path_contains_any(&["handler", "lambda", "/api/", "/routes/"])
}

const DATA_STORE_TOKENS: &[&str] = &[
    "dynamo",
    "database",
    "repository",
    "repo",
    "dao",
    "firestore",
    "postgres",
    "mysql",
    "mongo",
    "redis",
    "sqlite",
    "supabase",
    "prisma",
];

fn has_data_store_name(s: &FileSignals) -> bool {
    s.stem_tokens.iter().any(|token| {
        DATA_STORE_TOKENS.iter().any(|store| {
            token == store || (token.starts_with(store) && token.ends_with("db"))
        })
    })
}

fn is_data_access(ctx: &ClassificationContext) -> bool {
    let s = &ctx.signals;
    let location =
        s.path_contains_any(&["/repositories/", "/dao/", "/data/"]) || has_data_store_name(s);
    if !location || is_under_utility_directory(s) {
        return false;
    }

    let exports = s.export_count();
    (1..=10).contains(&exports)
        && (exports == 1 || has_shared_entity_noun(&s.export_names_original()))
}

const EMAIL_EXPORT_TERMS: &[&str] = &["email", "mail", "receipt", "template", "notification"];

fn is_email_template(ctx: &ClassificationContext) -> bool {
    let s = &ctx.signals;
    if s.path_contains_any(&["/emails/", "/email/", "/mail/", "/notifications/"]) {
        return true;
    }

    let name_signal = s.stem_contains_any(&["-email-", "receipt"])
        || s.stem.ends_with("-email")
        || s.stem.ends_with("-template");
    let generator_export = s
        .node
        .exports
        .iter()
        .any(|e| has_leading_token(&e.name, &["render", "generate"]));

    (name_signal || generator_export) && s.any_export_contains(EMAIL_EXPORT_TERMS)
}

const PARSER_NAME_TERMS: &[&str] = &[
    "parser",
    "transform",
    "converter",
    "mapper",
    "serializer",
    "deterministic",
];

const PARSER_EXPORT_PREFIXES: &[&str] = &[
    "parse",
    "transform",
    "convert",
    "map",
    "serialize",
    "deserialize",
    "extract",
];

fn is_parser_file(ctx: &ClassificationContext) -> bool {
    let s = &ctx.signals;
    s.path_contains_any(PARSER_NAME_TERMS)
        || s
            .node
            .exports
            .iter()
            .any(|e| has_leading_token(&e.name, PARSER_EXPORT_PREFIXES))
}

fn is_service_file(ctx: &ClassificationContext) -> bool {
    let s = &ctx.signals;
    s.path.contains("service")
        || s
            .node
            .exports
            .iter()
            .any(|e| e.kind == ExportKind::Class && e.name.to_lowercase().contains("service"))
}

const STATE_TOKENS: &[&str] = &["session", "state", "context", "store"];

const STATE_DIRECTORIES: &[&str] = &[
    "/session/",
    "/sessions/",
    "/state/",
    "/context/",
    "/contexts/",
    "/store/",
    "/stores/",
];

fn is_session_or_state(ctx: &ClassificationContext) -> bool {
    let s = &ctx.signals;
    s.stem_has_token(STATE_TOKENS)
        || s.path_contains_any(STATE_DIRECTORIES)
        || s.any_export_has_token(STATE_TOKENS)
}

const NEXTJS_PAGE_EXPORTS: &[&str] = &[
    "metadata",
    "generatemetadata",
    "faqjsonld",
    "jsonld",
    "icon",
    "viewport",
    "dynamic",
];

fn is_nextjs_page(ctx: &ClassificationContext) -> bool {
    let s = &ctx.signals;
    if !s.path.contains("/app/") || !matches!(s.file_name.as_str(), "page.tsx" | "page.ts") {
        return false;
    }
    s.has_kind(ExportKind::Default) || s.any_export_contains(NEXTJS_PAGE_EXPORTS)
}

const UTILITY_TOKENS: &[&str] = &[
    "util",
    "utility",
    "helper",
    "common",
    "shared",
    "toolbox",
    "toolkit",
];

fn is_utility_module(ctx: &ClassificationContext) -> bool {
    let s = &ctx.signals;
    s.stem_has_token(UTILITY_TOKENS)
        || s.path_contains_any(&["/utils/", "/helpers/", "/common/"])
}

fn is_single_domain_or_shared_entity(ctx: &ClassificationContext) -> bool {
    ctx.known_domain_count() <= 1 || has_shared_entity_noun(&ctx.signals.export_names_original())
}

fn is_mixed_concerns(ctx: &ClassificationContext) -> bool {
    ctx.known_domain_count() > 1 && ctx.cohesion < 0.4
}

fn has_high_cohesion(ctx: &ClassificationContext) -> bool {
    ctx.cohesion >= 0.5
}
