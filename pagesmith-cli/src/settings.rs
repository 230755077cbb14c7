//! Conversion of parsed arguments into a library [`Config`].

use std::str::FromStr;

use pagesmith::config::{CompressionLevel, Config, DEFAULT_SWIPE_THRESHOLD, OverwriteMode};
use pagesmith::error::{PageSmithError, Result};

use crate::cli::{Cli, Command};

impl Cli {
    /// Convert the shared options into a validated [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is unknown or the resulting
    /// configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let common = &self.common;

        let compression = CompressionLevel::from_str(&common.compression)?;

        let overwrite_mode = if common.force {
            OverwriteMode::Force
        } else if common.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = Config {
            output_dir: common.output_dir.clone(),
            dry_run: common.dry_run,
            verbose: common.verbose,
            quiet: common.quiet,
            json: common.json,
            overwrite_mode,
            compression,
            preview_scale: common.scale,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate subcommand arguments that `clap` cannot check.
    ///
    /// # Errors
    ///
    /// Returns an error for zero page numbers or merge swaps.
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Delete { toggle, .. } if toggle.contains(&0) => {
                Err(PageSmithError::invalid_config("Page numbers start at 1"))
            }
            Command::Merge { inputs, .. } if inputs.is_empty() => {
                Err(PageSmithError::invalid_config("No input files specified"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parse_swap;
    use clap::Parser;
    use rstest::rstest;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pagesmith").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_merge_defaults() {
        let cli = parse(&["merge", "a.pdf", "b.pdf"]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.overwrite_mode, OverwriteMode::Prompt);
        assert_eq!(config.compression, CompressionLevel::Standard);
        assert!(!config.dry_run);
        match cli.command {
            Command::Merge { inputs, swap } => {
                assert_eq!(inputs, vec!["a.pdf", "b.pdf"]);
                assert!(swap.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_common_options_after_subcommand() {
        let cli = parse(&["split", "doc.pdf", "-o", "out", "-f", "-c", "maximum", "--json"]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.overwrite_mode, OverwriteMode::Force);
        assert_eq!(config.compression, CompressionLevel::Maximum);
        assert!(config.json);
    }

    #[test]
    fn test_no_clobber() {
        let cli = parse(&["compress", "doc.pdf", "--no-clobber"]);
        assert_eq!(
            cli.to_config().unwrap().overwrite_mode,
            OverwriteMode::NoClobber
        );
    }

    #[test]
    fn test_force_conflicts_with_no_clobber() {
        let result =
            Cli::try_parse_from(["pagesmith", "compress", "doc.pdf", "-f", "--no-clobber"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_split_takes_one_file() {
        assert!(Cli::try_parse_from(["pagesmith", "split", "a.pdf", "b.pdf"]).is_err());
    }

    #[test]
    fn test_delete_toggles() {
        let cli = parse(&["delete", "doc.pdf", "-t", "2", "--toggle", "4", "-i"]);
        match &cli.command {
            Command::Delete {
                toggle,
                interactive,
                ..
            } => {
                assert_eq!(toggle, &vec![2, 4]);
                assert!(interactive);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_delete_rejects_page_zero() {
        let cli = parse(&["delete", "doc.pdf", "--toggle", "0"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_invalid_scale() {
        let cli = parse(&["delete", "doc.pdf", "--scale", "0"]);
        assert!(cli.to_config().is_err());
    }

    #[rstest]
    #[case("1:3", Ok((1, 3)))]
    #[case("2: 1", Ok((2, 1)))]
    #[case("0:1", Err(()))]
    #[case("1-2", Err(()))]
    #[case("a:b", Err(()))]
    fn test_parse_swap(
        #[case] input: &str,
        #[case] expected: std::result::Result<(usize, usize), ()>,
    ) {
        assert_eq!(parse_swap(input).map_err(|_| ()), expected);
    }

    #[test]
    fn test_swaps_are_collected() {
        let cli = parse(&["merge", "a.pdf", "b.pdf", "c.pdf", "--swap", "1:3", "--swap", "2:1"]);
        match cli.command {
            Command::Merge { swap, .. } => assert_eq!(swap, vec![(1, 3), (2, 1)]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
