use std::path::PathBuf;

use clap::Parser;
use openapi_merge_core::MergeOptions;

pub const USAGE: &str = "Usage: openapi-merge <output> <input1> [input2 ...]";

#[derive(Parser, Debug)]
#[command(
    name = "openapi-merge",
    about = "Merge several OpenAPI documents into one",
    version,
)]
pub struct Cli {
    /// File the merged document is written to
    pub output: Option<PathBuf>,

    /// Input documents, merged in order (later inputs win conflicts)
    pub inputs: Vec<PathBuf>,

    /// Default server URL for the merged document (overrides MERGE_DEFAULT_SERVER)
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// `info.title` of the merged document
    #[arg(long)]
    pub title: Option<String>,

    /// `info.version` of the merged document
    #[arg(long, value_name = "VERSION")]
    pub api_version: Option<String>,

    /// Log each merge step to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// A complete merge invocation.
#[derive(Debug)]
pub struct MergeArgs {
    pub output: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub options: MergeOptions,
}

impl Cli {
    /// Resolve the invocation, or `None` when the output or every input is
    /// missing. `env_server` is the value of `MERGE_DEFAULT_SERVER`, if set.
    pub fn into_merge_args(self, env_server: Option<String>) -> Option<MergeArgs> {
        let output = self.output?;
        if self.inputs.is_empty() {
            return None;
        }

        let mut options = MergeOptions::default();
        if let Some(url) = self.server.or(env_server) {
            options = options.with_default_server(url);
        }
        if let Some(title) = self.title {
            options = options.with_title(title);
        }
        if let Some(version) = self.api_version {
            options = options.with_version(version);
        }

        Some(MergeArgs {
            output,
            inputs: self.inputs,
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn parse_output_and_inputs() {
        let args = parse(&["openapi-merge", "out.yaml", "a.yaml", "b.yaml"])
            .into_merge_args(None)
            .unwrap();
        assert_eq!(args.output, PathBuf::from("out.yaml"));
        assert_eq!(args.inputs, vec![PathBuf::from("a.yaml"), PathBuf::from("b.yaml")]);
        assert_eq!(args.options, MergeOptions::default());
    }

    #[test]
    fn no_arguments_is_usage_error() {
        assert!(parse(&["openapi-merge"]).into_merge_args(None).is_none());
    }

    #[test]
    fn output_without_inputs_is_usage_error() {
        assert!(parse(&["openapi-merge", "out.yaml"]).into_merge_args(None).is_none());
    }

    #[test]
    fn env_server_is_used() {
        let args = parse(&["openapi-merge", "out.yaml", "a.yaml"])
            .into_merge_args(Some("https://api.example.com".into()))
            .unwrap();
        assert_eq!(args.options.server_url(), Some("https://api.example.com"));
    }

    #[test]
    fn server_flag_overrides_env() {
        let args = parse(&[
            "openapi-merge", "--server", "http://localhost:8080", "out.yaml", "a.yaml",
        ])
        .into_merge_args(Some("https://api.example.com".into()))
        .unwrap();
        assert_eq!(args.options.server_url(), Some("http://localhost:8080"));
    }

    #[test]
    fn parse_metadata_flags() {
        let args = parse(&[
            "openapi-merge", "out.yaml", "a.yaml", "--title", "Gateway", "--api-version", "2.0.0",
        ])
        .into_merge_args(None)
        .unwrap();
        assert_eq!(args.options.title, "Gateway");
        assert_eq!(args.options.version, "2.0.0");
    }

    #[test]
    fn parse_verbose() {
        let cli = parse(&["openapi-merge", "-v", "out.yaml", "a.yaml"]);
        assert!(cli.verbose);
    }
}
