use thiserror::Error;

use crate::models::Config;

/// Batch sizes above this hammer the upstream harder than it likes.
pub const MAX_POLITE_BATCH_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint(
        &mut self,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("aggregation.batch_size must be at least 1")]
    ZeroBatchSize,
    #[error("browse.page_size must be at least 1")]
    ZeroPageSize,
    #[error("catalog.{field} must be at least 1")]
    ZeroStartPage { field: &'static str },
}

/// Reject settings the engine cannot run with and flag risky ones.
pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.aggregation.batch_size == 0 {
        return Err(ConfigGuardRailError::ZeroBatchSize);
    }
    if config.browse.page_size == 0 {
        return Err(ConfigGuardRailError::ZeroPageSize);
    }
    if config.catalog.popular_start_page == 0 {
        return Err(ConfigGuardRailError::ZeroStartPage {
            field: "popular_start_page",
        });
    }

    if config.aggregation.batch_size > MAX_POLITE_BATCH_SIZE {
        warnings.push_with_hint(
            format!(
                "aggregation.batch_size = {} exceeds {}",
                config.aggregation.batch_size, MAX_POLITE_BATCH_SIZE
            ),
            "Large batches are likely to trip upstream rate limiting",
        );
    }
    if config.aggregation.inter_batch_delay.is_zero() {
        warnings.push("aggregation.inter_batch_delay is zero; batches run back to back");
    }
    if config.catalog.popular_pages == 0 {
        warnings.push("catalog.popular_pages is zero; the browse list will be empty");
    }
    if config.refresh.failure_interval > config.refresh.interval {
        warnings.push(
            "refresh.failure_interval is longer than refresh.interval",
        );
    }

    Ok(warnings)
}
