//! Map analyzer findings to suggested check statuses
//!
//! Only checks a single page can say something about get a suggestion.
//! A missing finding is not always a failure: a sitemap absent from
//! robots.txt may still be submitted in Search Console, so `xml-sitemap`
//! only ever suggests a pass.

use super::PageAnalysis;
use crate::answers::Answers;
use crate::checklist::Checklist;
use crate::models::CheckStatus;
use serde::Serialize;
use tracing::debug;

const TITLE_LENGTH: std::ops::RangeInclusive<usize> = 10..=60;
const DESCRIPTION_LENGTH: std::ops::RangeInclusive<usize> = 50..=160;

/// Schema types that describe the site owner
const ENTITY_TYPES: &[&str] = &[
    "Organization",
    "LocalBusiness",
    "Corporation",
    "Store",
    "Restaurant",
    "ProfessionalService",
    "OnlineStore",
    "NGO",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub check_id: &'static str,
    pub status: CheckStatus,
    pub reason: String,
}

impl Suggestion {
    fn new(check_id: &'static str, pass: bool, reason: impl Into<String>) -> Self {
        Self {
            check_id,
            status: if pass { CheckStatus::Pass } else { CheckStatus::Fail },
            reason: reason.into(),
        }
    }
}

/// Suggested statuses for built-in check ids. Empty when the page failed to load.
pub fn suggestions(analysis: &PageAnalysis) -> Vec<Suggestion> {
    if analysis.status_code.is_none() || !analysis.is_ok() {
        return Vec::new();
    }
    let mut out = Vec::new();

    out.push(Suggestion::new(
        "https",
        analysis.https,
        if analysis.https {
            "Page is served over HTTPS"
        } else {
            "Page is served over plain HTTP"
        },
    ));

    let blocked = analysis.robots_txt.as_ref().is_some_and(|r| r.disallow_all);
    let indexable_reason = if analysis.is_noindex() {
        "Meta robots contains noindex".to_string()
    } else if blocked {
        "robots.txt disallows / for all crawlers".to_string()
    } else {
        "No noindex directive and not blocked by robots.txt".to_string()
    };
    out.push(Suggestion::new(
        "indexable",
        !analysis.is_noindex() && !blocked,
        indexable_reason,
    ));

    if let Some(robots) = &analysis.robots_txt {
        out.push(Suggestion::new(
            "robots-txt",
            robots.found && !robots.disallow_all,
            match (robots.found, robots.disallow_all) {
                (false, _) => "robots.txt not found",
                (true, true) => "robots.txt blocks the whole site",
                (true, false) => "robots.txt present",
            },
        ));
        if !robots.sitemaps.is_empty() {
            out.push(Suggestion::new(
                "xml-sitemap",
                true,
                format!("robots.txt declares {} sitemap(s)", robots.sitemaps.len()),
            ));
        }
    }

    out.push(Suggestion::new(
        "canonical-tags",
        analysis.canonical.is_some(),
        match &analysis.canonical {
            Some(href) => format!("Canonical: {}", href),
            None => "No rel=canonical link".to_string(),
        },
    ));

    out.push(match analysis.title_length {
        Some(len) => Suggestion::new(
            "title-tag",
            TITLE_LENGTH.contains(&len),
            format!(
                "Title is {} characters (aim for {}-{})",
                len,
                TITLE_LENGTH.start(),
                TITLE_LENGTH.end()
            ),
        ),
        None => Suggestion::new("title-tag", false, "No <title> found"),
    });

    out.push(match &analysis.meta_description {
        Some(desc) => {
            let len = desc.chars().count();
            Suggestion::new(
                "meta-description",
                DESCRIPTION_LENGTH.contains(&len),
                format!(
                    "Meta description is {} characters (aim for {}-{})",
                    len,
                    DESCRIPTION_LENGTH.start(),
                    DESCRIPTION_LENGTH.end()
                ),
            )
        }
        None => Suggestion::new("meta-description", false, "No meta description"),
    });

    out.push(Suggestion::new(
        "h1-heading",
        analysis.h1.len() == 1,
        format!("{} H1 heading(s) found", analysis.h1.len()),
    ));

    if analysis.images_total > 0 {
        out.push(Suggestion::new(
            "image-alt-text",
            analysis.images_missing_alt == 0,
            format!(
                "{} of {} images missing alt",
                analysis.images_missing_alt, analysis.images_total
            ),
        ));
    }

    out.push(Suggestion::new(
        "viewport-meta",
        analysis.has_viewport,
        if analysis.has_viewport {
            "Viewport meta tag present"
        } else {
            "No viewport meta tag"
        },
    ));

    let entity = analysis
        .schema_types
        .iter()
        .find(|t| ENTITY_TYPES.contains(&t.as_str()));
    out.push(Suggestion::new(
        "schema-organization",
        entity.is_some(),
        match entity {
            Some(t) => format!("{} schema found", t),
            None => "No Organization or LocalBusiness schema".to_string(),
        },
    ));

    let has_og = analysis.open_graph.contains_key("og:title")
        && analysis.open_graph.contains_key("og:image");
    out.push(Suggestion::new(
        "open-graph",
        has_og,
        if has_og {
            "og:title and og:image present"
        } else {
            "og:title or og:image missing"
        },
    ));

    let has_card = analysis.twitter.contains_key("twitter:card");
    out.push(Suggestion::new(
        "twitter-card",
        has_card,
        if has_card {
            "twitter:card present"
        } else {
            "No twitter:card tag"
        },
    ));

    out.push(Suggestion::new(
        "social-profiles",
        !analysis.social_links.is_empty(),
        format!("{} social profile link(s)", analysis.social_links.len()),
    ));

    out
}

/// Fill unanswered checks from suggestions. Returns how many were applied.
///
/// Existing answers always win; ids missing from the checklist are skipped.
pub fn apply_suggestions(
    answers: &mut Answers,
    suggestions: &[Suggestion],
    checklist: &Checklist,
) -> usize {
    let mut applied = 0;
    for suggestion in suggestions {
        if checklist.find_check(suggestion.check_id).is_none() {
            continue;
        }
        if answers.statuses.get(suggestion.check_id).is_answered() {
            continue;
        }
        debug!(
            "Applying suggestion {} = {} ({})",
            suggestion.check_id, suggestion.status, suggestion.reason
        );
        answers.statuses.set(suggestion.check_id, suggestion.status);
        if answers.note(suggestion.check_id).is_none() {
            answers.set_note(suggestion.check_id, &format!("Analyzer: {}", suggestion.reason));
        }
        applied += 1;
    }
    applied
}
