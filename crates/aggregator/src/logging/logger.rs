// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use config::LogConfig;
use rolling_file::*;
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "logs.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory or file appender: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to install the global subscriber: {0}")]
    InitError(#[from] tracing_subscriber::util::TryInitError),
}

/// Initialize tracing/logging from the log configuration.
///
/// # Log Rotation
/// When `write` is set, logs also go to `<write_path>/logs.log`. When that file
/// reaches `write_max_file_size` it is rotated to logs.log.1, logs.log.2, etc.
/// keeping `write_max_files` files in total.
///
/// The returned guard flushes the log file when dropped; hold it until the
/// program exits.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = build_filter(&config.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    if config.write {
        std::fs::create_dir_all(&config.write_path)?;

        let log_file_path = PathBuf::from(&config.write_path).join(LOG_FILE_NAME);
        // write_max_files includes the current file
        let rotated_files_count = config.write_max_files.saturating_sub(1);
        let file_appender = BasicRollingFileAppender::new(
            log_file_path,
            RollingConditionBasic::new().max_size(config.write_max_file_size),
            rotated_files_count,
        )?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if config.json {
            registry
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_writer(non_blocking))
                .try_init()?;
        } else {
            let console_layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(!config.strip_ansi);

            let file_layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(non_blocking);

            registry.with(console_layer).with(file_layer).try_init()?;
        }

        return Ok(Some(guard));
    }

    if config.json {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(!config.strip_ansi);

        registry.with(fmt_layer).try_init()?;
    }

    Ok(None)
}

/// `RUST_LOG` refines the configured level when set.
fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let directives = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(extra) if !extra.trim().is_empty() => format!("{},{}", level, extra),
        _ => level.to_string(),
    };

    EnvFilter::try_new(&directives).map_err(|source| LoggingError::InvalidLogLevel {
        level: directives,
        source,
    })
}
