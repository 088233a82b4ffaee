//! Environment variable configuration.
//!
//! Each variable is a unit type implementing [`EnvVar`], so its name,
//! default and documentation live next to its parser.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::WikimediaError;

#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

impl From<EnvError> for WikimediaError {
    fn from(err: EnvError) -> Self {
        WikimediaError::Config(err.to_string())
    }
}

pub type EnvResult<T> = Result<T, EnvError>;

pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }
}

/// Logging and terminal output
pub mod output {
    use super::*;

    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "WIKIMEDIA_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error (default: warn)";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("warn".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            Ok(!value.is_empty())
        }
    }
}

/// Page download
pub mod fetch {
    use super::*;

    pub struct UserAgent;
    impl EnvVar<String> for UserAgent {
        const NAME: &'static str = "WIKIMEDIA_USER_AGENT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "User-Agent sent to the wikis (default: wikimedia/<version>)";

        fn parse(value: &str) -> EnvResult<String> {
            let value = value.trim();
            if value.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "User agent must not be empty".to_string(),
                });
            }
            Ok(value.to_string())
        }
    }

    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "WIKIMEDIA_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(30));
        const DESCRIPTION: &'static str = "Request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let secs = parse_positive_usize(value, Self::NAME, 1, 3600)?;
            Ok(Duration::from_secs(secs as u64))
        }
    }
}

/// What gets imported
pub mod import {
    use super::*;

    pub struct Languages;
    impl EnvVar<Vec<String>> for Languages {
        const NAME: &'static str = "WIKIMEDIA_LANGUAGES";
        const DEFAULT: Option<Vec<String>> = None;
        const DESCRIPTION: &'static str = "Comma-separated allowed language codes (default: en)";

        fn get() -> EnvResult<Vec<String>> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(vec!["en".to_string()]),
            }
        }

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            let languages: Vec<String> = value
                .split(',')
                .map(|lang| lang.trim().to_lowercase())
                .filter(|lang| !lang.is_empty())
                .collect();

            if languages.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "At least one language is required".to_string(),
                });
            }
            if let Some(lang) = languages.iter().find(|lang| lang.chars().count() != 2) {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid language code '{}'. Use two letters", lang),
                });
            }

            Ok(languages)
        }
    }

    pub struct DefaultLanguage;
    impl EnvVar<String> for DefaultLanguage {
        const NAME: &'static str = "WIKIMEDIA_DEFAULT_LANGUAGE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Language used when none is given (default: first allowed language)";

        fn parse(value: &str) -> EnvResult<String> {
            let lang = value.trim().to_lowercase();
            if lang.chars().count() != 2 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid language code '{}'. Use two letters", value),
                });
            }
            Ok(lang)
        }
    }

    pub struct SisterDepth;
    impl EnvVar<usize> for SisterDepth {
        const NAME: &'static str = "WIKIMEDIA_SISTER_DEPTH";
        const DEFAULT: Option<usize> = Some(1);
        const DESCRIPTION: &'static str = "How many sister project hops an import follows (1-8)";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 8)
        }
    }

    pub struct ProjectsFile;
    impl EnvVar<PathBuf> for ProjectsFile {
        const NAME: &'static str = "WIKIMEDIA_PROJECTS_FILE";
        const DEFAULT: Option<PathBuf> = None;
        const DESCRIPTION: &'static str = "TOML file with extra [[project]] entries";

        fn parse(value: &str) -> EnvResult<PathBuf> {
            if value.trim().is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Path must not be empty".to_string(),
                });
            }
            Ok(PathBuf::from(value))
        }
    }
}

fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// Every setting read from the environment
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,
    pub no_color: bool,

    pub user_agent: Option<String>,
    pub timeout: Duration,

    pub languages: Vec<String>,
    pub default_language: Option<String>,
    pub sister_depth: usize,
    pub projects_file: Option<PathBuf>,
}

impl EnvConfig {
    /// Unset optional variables stay `None`; set but malformed ones fail
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: output::LogLevel::get()?,
            no_color: output::NoColor::get()?,

            user_agent: optional::<fetch::UserAgent, String>()?,
            timeout: fetch::Timeout::get()?,

            languages: import::Languages::get()?,
            default_language: optional::<import::DefaultLanguage, String>()?,
            sister_depth: import::SisterDepth::get()?,
            projects_file: optional::<import::ProjectsFile, PathBuf>()?,
        })
    }

    /// Cross-field checks
    pub fn validate(&self) -> EnvResult<()> {
        if let Some(lang) = &self.default_language {
            if !self.languages.contains(lang) {
                return Err(EnvError {
                    variable: import::DefaultLanguage::NAME.to_string(),
                    message: format!(
                        "'{}' is not one of the allowed languages ({})",
                        lang,
                        self.languages.join(", ")
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn default_language(&self) -> &str {
        self.default_language
            .as_deref()
            .or_else(|| self.languages.first().map(String::as_str))
            .unwrap_or("en")
    }
}

fn optional<V: EnvVar<T>, T>() -> EnvResult<Option<T>> {
    match env::var(V::NAME) {
        Ok(value) => V::parse(&value).map(Some),
        Err(_) => Ok(None),
    }
}

fn doc_line<V: EnvVar<T>, T>() -> String {
    format!("- `{}`: {}\n", V::NAME, V::DESCRIPTION)
}

/// Markdown reference of every variable
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");

    docs.push_str("## Import\n\n");
    docs.push_str(&doc_line::<import::Languages, Vec<String>>());
    docs.push_str(&doc_line::<import::DefaultLanguage, String>());
    docs.push_str(&doc_line::<import::SisterDepth, usize>());
    docs.push_str(&doc_line::<import::ProjectsFile, PathBuf>());

    docs.push_str("\n## Fetching\n\n");
    docs.push_str(&doc_line::<fetch::UserAgent, String>());
    docs.push_str(&doc_line::<fetch::Timeout, Duration>());

    docs.push_str("\n## Output\n\n");
    docs.push_str(&doc_line::<output::LogLevel, String>());
    docs.push_str(&doc_line::<output::NoColor, bool>());

    docs
}
