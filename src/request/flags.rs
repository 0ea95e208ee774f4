/// Content-shaping flags and their mapping onto `ContentToggle` fields.
///
/// Each field resolves the same way: omitted when nothing related was given,
/// `true` when only the plain switch was given, and a structured object as soon
/// as any refinement was given (refinements imply the switch).
use crate::api::types::{
    ContentToggle, ContextOptions, HighlightsOptions, SummaryOptions, TextOptions, TextVerbosity,
};

use super::errors::RequestError;

/// Raw option values for text, highlights, summary and context.
#[derive(Debug, Clone, Default)]
pub struct ContentFlags {
    pub text: bool,
    pub text_max_chars: Option<u32>,
    pub text_include_html: bool,
    pub text_verbosity: Option<TextVerbosity>,
    pub highlights: bool,
    pub highlights_sentences: Option<u32>,
    pub highlights_per_url: Option<u32>,
    pub highlights_query: Option<String>,
    pub summary: bool,
    pub summary_query: Option<String>,
    pub summary_schema: Option<String>,
    pub context: bool,
    pub context_max_chars: Option<u32>,
}

impl ContentFlags {
    /// Resolve the `text` field.
    #[must_use]
    pub fn text(&self) -> Option<ContentToggle<TextOptions>> {
        let max_characters = positive(self.text_max_chars);
        let detail = (max_characters.is_some()
            || self.text_include_html
            || self.text_verbosity.is_some())
        .then(|| TextOptions {
            max_characters,
            include_html_tags: self.text_include_html,
            verbosity: self.text_verbosity,
        });
        toggle(self.text, detail)
    }

    /// Resolve the `highlights` field.
    #[must_use]
    pub fn highlights(&self) -> Option<ContentToggle<HighlightsOptions>> {
        let num_sentences = positive(self.highlights_sentences);
        let highlights_per_url = positive(self.highlights_per_url);
        let query = non_empty(self.highlights_query.as_deref());
        let detail = (num_sentences.is_some() || highlights_per_url.is_some() || query.is_some())
            .then(|| HighlightsOptions {
                num_sentences,
                highlights_per_url,
                query,
            });
        toggle(self.highlights, detail)
    }

    /// Resolve the `summary` field, parsing the schema if one was given.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::InvalidSchema` if `summary_schema` is not valid JSON.
    pub fn summary(&self) -> Result<Option<ContentToggle<SummaryOptions>>, RequestError> {
        let query = non_empty(self.summary_query.as_deref());
        let schema = non_empty(self.summary_schema.as_deref())
            .map(|raw| serde_json::from_str::<serde_json::Value>(&raw))
            .transpose()
            .map_err(RequestError::InvalidSchema)?;
        let detail =
            (query.is_some() || schema.is_some()).then(|| SummaryOptions { query, schema });
        Ok(toggle(self.summary, detail))
    }

    /// Resolve the `context` field.
    #[must_use]
    pub fn context(&self) -> Option<ContentToggle<ContextOptions>> {
        let detail = positive(self.context_max_chars).map(|n| ContextOptions {
            max_characters: Some(n),
        });
        toggle(self.context, detail)
    }
}

fn toggle<T>(enabled: bool, detail: Option<T>) -> Option<ContentToggle<T>> {
    match detail {
        Some(opts) => Some(ContentToggle::Detailed(opts)),
        None if enabled => Some(ContentToggle::Enabled),
        None => None,
    }
}

/// Zero counts as "not given".
pub(crate) fn positive<T: Default + PartialOrd>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v > T::default())
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_nothing_given_omits_every_field() {
        let flags = ContentFlags::default();
        assert_eq!(flags.text(), None);
        assert_eq!(flags.highlights(), None);
        assert_eq!(flags.summary().unwrap(), None);
        assert_eq!(flags.context(), None);
    }

    #[test]
    fn test_plain_switches_encode_true() {
        let flags = ContentFlags {
            text: true,
            highlights: true,
            summary: true,
            context: true,
            ..ContentFlags::default()
        };
        assert_eq!(flags.text(), Some(ContentToggle::Enabled));
        assert_eq!(flags.highlights(), Some(ContentToggle::Enabled));
        assert_eq!(flags.summary().unwrap(), Some(ContentToggle::Enabled));
        assert_eq!(flags.context(), Some(ContentToggle::Enabled));
    }

    #[test]
    fn test_text_refinement_implies_enablement() {
        let flags = ContentFlags {
            text_verbosity: Some(TextVerbosity::Full),
            ..ContentFlags::default()
        };
        assert_eq!(
            flags.text(),
            Some(ContentToggle::Detailed(TextOptions {
                max_characters: None,
                include_html_tags: false,
                verbosity: Some(TextVerbosity::Full),
            }))
        );
    }

    #[test]
    fn test_each_text_refinement_alone_yields_object() {
        let cases = [
            ContentFlags {
                text_max_chars: Some(1000),
                ..ContentFlags::default()
            },
            ContentFlags {
                text_include_html: true,
                ..ContentFlags::default()
            },
            ContentFlags {
                text: true,
                text_verbosity: Some(TextVerbosity::Compact),
                ..ContentFlags::default()
            },
        ];
        for flags in cases {
            assert!(
                matches!(flags.text(), Some(ContentToggle::Detailed(_))),
                "{flags:?}"
            );
        }
    }

    #[test]
    fn test_zero_max_chars_is_not_a_refinement() {
        let flags = ContentFlags {
            text: true,
            text_max_chars: Some(0),
            context_max_chars: Some(0),
            ..ContentFlags::default()
        };
        assert_eq!(flags.text(), Some(ContentToggle::Enabled));
        assert_eq!(flags.context(), None);
    }

    #[test]
    fn test_highlights_query_yields_object() {
        let flags = ContentFlags {
            highlights_query: Some("pricing".to_owned()),
            highlights_sentences: Some(2),
            ..ContentFlags::default()
        };
        assert_eq!(
            flags.highlights(),
            Some(ContentToggle::Detailed(HighlightsOptions {
                num_sentences: Some(2),
                highlights_per_url: None,
                query: Some("pricing".to_owned()),
            }))
        );
    }

    #[test]
    fn test_summary_schema_is_parsed() {
        let flags = ContentFlags {
            summary_schema: Some(r#"{"type":"object","properties":{"ceo":{"type":"string"}}}"#.to_owned()),
            ..ContentFlags::default()
        };
        let Some(ContentToggle::Detailed(opts)) = flags.summary().unwrap() else {
            panic!("expected structured summary");
        };
        assert_eq!(opts.query, None);
        assert_eq!(
            opts.schema,
            Some(json!({ "type": "object", "properties": { "ceo": { "type": "string" } } }))
        );
    }

    #[test]
    fn test_invalid_summary_schema_fails() {
        let flags = ContentFlags {
            summary: true,
            summary_schema: Some("{not json".to_owned()),
            ..ContentFlags::default()
        };
        let err = flags.summary().unwrap_err();
        assert!(err.to_string().starts_with("invalid summary-schema JSON"));
    }

    #[test]
    fn test_blank_summary_query_is_ignored() {
        let flags = ContentFlags {
            summary: true,
            summary_query: Some("   ".to_owned()),
            ..ContentFlags::default()
        };
        assert_eq!(flags.summary().unwrap(), Some(ContentToggle::Enabled));
    }

    #[test]
    fn test_context_max_chars_yields_object() {
        let flags = ContentFlags {
            context_max_chars: Some(10_000),
            ..ContentFlags::default()
        };
        assert_eq!(
            serde_json::to_value(flags.context()).unwrap(),
            json!({ "maxCharacters": 10000 })
        );
    }
}
