use crate::reporting::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "covtable",
    version,
    about = "Per-file Go test coverage, including files no test touches"
)]
pub struct Cli {
    /// Module root containing go.mod
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
    /// Reconcile an existing cover profile instead of running `go test`
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
    /// Enable debug logging on stderr
    #[arg(long, short)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_current_directory_and_table() {
        let cli = Cli::try_parse_from(["covtable"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("."));
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.profile.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn accepts_path_profile_and_json() {
        let cli = Cli::try_parse_from([
            "covtable",
            "../svc",
            "--profile",
            "cover.out",
            "--format",
            "json",
            "--no-color",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.path, PathBuf::from("../svc"));
        assert_eq!(cli.profile, Some(PathBuf::from("cover.out")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.no_color && cli.verbose);
    }

    #[test]
    fn rejects_extra_positionals() {
        assert!(Cli::try_parse_from(["covtable", "a", "b"]).is_err());
    }
}
