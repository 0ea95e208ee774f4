/// CLI argument definitions via clap derive.
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::api::API_KEY_ENV;
use crate::api::types::{Category, SearchType, TextVerbosity};
use crate::request::{ContentFlags, ContentsParams, SearchParams};

/// exa: search the web and extract page contents with the Exa API.
#[derive(Debug, Parser)]
#[command(
    name = "exa",
    about = "CLI tool for the Exa API",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Exa API key (overrides the config file).
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Output format.
    #[arg(short, long, global = true, value_name = "FORMAT", default_value = "table")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode: only URLs (search) or text (contents), for scripting.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Omit the table header row.
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Log request timing and HTTP diagnostics to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    // Search arguments for a bare `exa <query>`.
    #[command(flatten)]
    pub search: SearchArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The command to run. Without a subcommand, the top-level arguments are a search.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Search(self.search))
    }
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Aligned table for search, markdown-like documents for contents.
    #[default]
    Table,
    /// The full response, pretty-printed.
    Json,
    /// The full response as length-annotated TOON (fewer tokens for LLMs).
    Toon,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the web using Exa.
    #[command(
        visible_alias = "s",
        after_help = "Examples:\n  exa search \"latest AI news\"\n  exa search -n 5 --summary \"rust error handling\"\n  exa search -i github.com -i docs.rs \"async runtimes\"\n  exa search -c news --max-age-hours 24 \"tech layoffs\""
    )]
    Search(SearchArgs),
    /// Get contents from URLs.
    #[command(
        visible_alias = "c",
        after_help = "Examples:\n  exa contents https://example.com\n  exa contents --summary https://example.com https://another.com\n  exa contents -q https://example.com | head -100"
    )]
    Contents(ContentsArgs),
    /// Store the API key in the config file.
    Configure,
    /// Generate a shell completion script.
    Completion(CompletionArgs),
    /// Show detailed version information.
    Version,
}

/// Arguments for `exa search`.
#[derive(Debug, clap::Args)]
pub struct SearchArgs {
    /// Search query; several words are joined with spaces.
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// Search type.
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "auto")]
    pub search_type: SearchType,

    /// Number of results (1-100).
    #[arg(
        short = 'n',
        long,
        value_name = "N",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub num_results: u32,

    /// Include full text content.
    #[arg(long)]
    pub text: bool,

    #[command(flatten)]
    pub text_opts: TextArgs,

    /// Include highlights.
    #[arg(short = 'H', long)]
    pub highlights: bool,

    #[command(flatten)]
    pub highlight_opts: HighlightArgs,

    /// Include AI-generated summary.
    #[arg(short = 's', long)]
    pub summary: bool,

    #[command(flatten)]
    pub summary_opts: SummaryArgs,

    /// Only include results from these domains.
    #[arg(short = 'i', long, value_name = "DOMAIN", value_delimiter = ',')]
    pub include_domains: Vec<String>,

    /// Exclude results from these domains.
    #[arg(short = 'x', long, value_name = "DOMAIN", value_delimiter = ',')]
    pub exclude_domains: Vec<String>,

    /// Only results published on or after this date (ISO 8601).
    #[arg(long, value_name = "DATE")]
    pub start_published_date: Option<String>,

    /// Only results published on or before this date (ISO 8601).
    #[arg(long, value_name = "DATE")]
    pub end_published_date: Option<String>,

    /// Content category.
    #[arg(short = 'c', long, value_name = "CATEGORY")]
    pub category: Option<Category>,

    /// Maximum age of content in hours (0 = always livecrawl, -1 = cache only).
    #[arg(long, value_name = "HOURS", allow_negative_numbers = true)]
    pub max_age_hours: Option<i64>,
}

/// Arguments for `exa contents`.
#[derive(Debug, Parser)]
pub struct ContentsArgs {
    /// URLs to fetch.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Include full text content (on by default; --text=false to disable).
    #[arg(
        short = 't',
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true",
        require_equals = true,
        value_name = "BOOL"
    )]
    pub text: bool,

    #[command(flatten)]
    pub text_opts: TextArgs,

    /// Include highlights.
    #[arg(short = 'H', long)]
    pub highlights: bool,

    #[command(flatten)]
    pub highlight_opts: HighlightArgs,

    /// Include AI-generated summary.
    #[arg(short = 's', long)]
    pub summary: bool,

    #[command(flatten)]
    pub summary_opts: SummaryArgs,

    /// Number of subpages to crawl.
    #[arg(short = 'p', long, value_name = "N")]
    pub subpages: Option<u32>,

    /// Keywords to target when crawling subpages.
    #[arg(long, value_name = "KEYWORD", value_delimiter = ',')]
    pub subpage_target: Vec<String>,

    /// Maximum age of content in hours (0 = always livecrawl, -1 = cache only).
    #[arg(long, value_name = "HOURS", allow_negative_numbers = true)]
    pub max_age_hours: Option<i64>,

    /// Timeout in ms for live crawling.
    #[arg(long, value_name = "MS")]
    pub livecrawl_timeout: Option<u64>,

    /// Return all results combined into a single string for RAG.
    #[arg(short = 'C', long)]
    pub context: bool,

    /// Maximum characters for the context string.
    #[arg(long, value_name = "N")]
    pub context_max_chars: Option<u32>,
}

/// Text refinements shared by `search` and `contents`.
#[derive(Debug, Clone, clap::Args)]
pub struct TextArgs {
    /// Maximum characters for text content.
    #[arg(long, value_name = "N")]
    pub text_max_chars: Option<u32>,

    /// Include HTML tags in text content.
    #[arg(long)]
    pub text_include_html: bool,

    /// Text verbosity.
    #[arg(long, value_name = "LEVEL")]
    pub text_verbosity: Option<TextVerbosity>,
}

/// Highlight refinements shared by `search` and `contents`.
#[derive(Debug, Clone, clap::Args)]
pub struct HighlightArgs {
    /// Sentences per highlight.
    #[arg(long, value_name = "N")]
    pub highlights_sentences: Option<u32>,

    /// Highlights returned per URL.
    #[arg(long, value_name = "N")]
    pub highlights_per_url: Option<u32>,

    /// Custom query for highlight selection.
    #[arg(long, value_name = "QUERY")]
    pub highlights_query: Option<String>,
}

/// Summary refinements shared by `search` and `contents`.
#[derive(Debug, Clone, clap::Args)]
pub struct SummaryArgs {
    /// Custom query for summary generation.
    #[arg(long, value_name = "QUERY")]
    pub summary_query: Option<String>,

    /// JSON schema for structured summary extraction.
    #[arg(long, value_name = "JSON")]
    pub summary_schema: Option<String>,
}

/// Arguments for `exa completion`.
#[derive(Debug, Parser)]
pub struct CompletionArgs {
    /// Target shell.
    pub shell: CompletionShell,
}

/// Shells with generated completion scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

fn content_flags(
    text: bool,
    text_opts: &TextArgs,
    highlights: bool,
    highlight_opts: &HighlightArgs,
    summary: bool,
    summary_opts: &SummaryArgs,
) -> ContentFlags {
    ContentFlags {
        text,
        text_max_chars: text_opts.text_max_chars,
        text_include_html: text_opts.text_include_html,
        text_verbosity: text_opts.text_verbosity,
        highlights,
        highlights_sentences: highlight_opts.highlights_sentences,
        highlights_per_url: highlight_opts.highlights_per_url,
        highlights_query: highlight_opts.highlights_query.clone(),
        summary,
        summary_query: summary_opts.summary_query.clone(),
        summary_schema: summary_opts.summary_schema.clone(),
        context: false,
        context_max_chars: None,
    }
}

impl SearchArgs {
    /// Option values for the request builder.
    #[must_use]
    pub fn params(&self) -> SearchParams {
        SearchParams {
            query: (!self.query.is_empty()).then(|| self.query.join(" ")),
            search_type: self.search_type,
            num_results: self.num_results,
            content: content_flags(
                self.text,
                &self.text_opts,
                self.highlights,
                &self.highlight_opts,
                self.summary,
                &self.summary_opts,
            ),
            include_domains: self.include_domains.clone(),
            exclude_domains: self.exclude_domains.clone(),
            start_published_date: self.start_published_date.clone(),
            end_published_date: self.end_published_date.clone(),
            category: self.category,
            max_age_hours: self.max_age_hours,
        }
    }
}

impl ContentsArgs {
    /// Option values for the request builder.
    #[must_use]
    pub fn params(&self) -> ContentsParams {
        let mut content = content_flags(
            self.text,
            &self.text_opts,
            self.highlights,
            &self.highlight_opts,
            self.summary,
            &self.summary_opts,
        );
        content.context = self.context;
        content.context_max_chars = self.context_max_chars;

        ContentsParams {
            urls: self.urls.clone(),
            content,
            subpages: self.subpages,
            subpage_target: self.subpage_target.clone(),
            max_age_hours: self.max_age_hours,
            livecrawl_timeout: self.livecrawl_timeout,
        }
    }
}
