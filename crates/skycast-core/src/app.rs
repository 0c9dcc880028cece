use anyhow::Result;

use crate::config::{Config, ValidationResult};

/// Main application state and lifecycle manager
pub struct App {
    config: Config,
    validation: ValidationResult,
}

impl App {
    /// Create a new application instance from the user configuration
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    /// Create an application around an already-loaded configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            validation: ValidationResult::default(),
        }
    }

    /// Validate configuration; errors abort startup, warnings are logged.
    pub fn initialize(&mut self) -> Result<()> {
        tracing::info!(
            "Initializing application (config directory: {})",
            self.config.config_dir.display()
        );

        let validation = self.config.validate();
        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }
        self.validation = validation;

        tracing::info!("Application initialized successfully");
        Ok(())
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Warnings collected by the last `initialize()`
    pub fn warnings(&self) -> &[crate::config::ConfigValidationError] {
        &self.validation.warnings
    }
}
