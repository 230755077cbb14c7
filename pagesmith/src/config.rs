//! Configuration module for pagesmith.
//!
//! This module holds the validated, normalized settings that drive every
//! operation: where outputs go, how they are encoded, how chatty the output
//! is, and the tuning constants of the page review surface.

use std::{path::PathBuf, str::FromStr};

use crate::codec::SaveOptions;
use crate::error::{PageSmithError, Result};

/// Default scale used to render review thumbnails.
pub const DEFAULT_PREVIEW_SCALE: f32 = 1.2;

/// Default leftward displacement, in logical pixels, that turns a swipe into a toggle.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Compression level for output PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams are written as they are.
    None,
    /// Flate-compress streams (default).
    #[default]
    Standard,
    /// Flate-compress streams, drop unreachable objects and pack objects into
    /// object streams.
    Maximum,
}

impl CompressionLevel {
    /// Serialization options for this level.
    pub fn save_options(&self) -> SaveOptions {
        match self {
            Self::None => SaveOptions::plain(),
            Self::Standard => SaveOptions::standard(),
            Self::Maximum => SaveOptions::compact(),
        }
    }
}

impl FromStr for CompressionLevel {
    type Err = PageSmithError;

    /// Parse compression level from "none", "standard" or "maximum".
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PageSmithError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Ask before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without asking.
    Force,
    /// Never overwrite, error if the file exists.
    NoClobber,
}

/// Complete configuration for a pagesmith run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory that receives every output file.
    pub output_dir: PathBuf,

    /// Dry run mode - resolve and print the plan without writing anything.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print the operation report as JSON.
    pub json: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for merge, split and delete outputs.
    pub compression: CompressionLevel,

    /// Scale applied to page geometry when rendering review thumbnails.
    pub preview_scale: f32,

    /// Leftward swipe distance that toggles a page.
    pub swipe_threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            dry_run: false,
            verbose: false,
            quiet: false,
            json: false,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            preview_scale: DEFAULT_PREVIEW_SCALE,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The preview scale is not a positive finite number
    /// - The swipe threshold is not a positive finite number
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(PageSmithError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if !self.preview_scale.is_finite() || self.preview_scale <= 0.0 {
            return Err(PageSmithError::invalid_config(format!(
                "Preview scale must be a positive number, got {}",
                self.preview_scale
            )));
        }

        if !self.swipe_threshold.is_finite() || self.swipe_threshold <= 0.0 {
            return Err(PageSmithError::invalid_config(format!(
                "Swipe threshold must be a positive number, got {}",
                self.swipe_threshold
            )));
        }

        Ok(())
    }

    /// Serialization options for merge, split and delete outputs.
    pub fn save_options(&self) -> SaveOptions {
        self.compression.save_options()
    }

    /// Check if progress output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
