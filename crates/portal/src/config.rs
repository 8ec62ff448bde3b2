//! Portal configuration.
//!
//! Defaults match production behaviour: 20 invoices per page, no
//! states hidden from listings, only paid invoices printable. All
//! knobs can be overridden from the environment:
//!
//! * `BILLHUB_PAGINATION_LIMIT` — page size, at least 1.
//! * `BILLHUB_EXCLUDED_STATES` — comma-separated state labels hidden
//!   from listings.
//! * `BILLHUB_PRINTABLE_STATES` — comma-separated state labels allowed
//!   for printing. An empty list means any state is printable.

use billhub_invoices::{InvoiceState, UnknownState};
use thiserror::Error;

const DEFAULT_PAGINATION_LIMIT: usize = 20;

const ENV_PAGINATION_LIMIT: &str = "BILLHUB_PAGINATION_LIMIT";
const ENV_EXCLUDED_STATES: &str = "BILLHUB_EXCLUDED_STATES";
const ENV_PRINTABLE_STATES: &str = "BILLHUB_PRINTABLE_STATES";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pagination_limit: usize,
    excluded_states: Vec<InvoiceState>,
    printable_states: Vec<InvoiceState>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            pagination_limit: DEFAULT_PAGINATION_LIMIT,
            excluded_states: Vec::new(),
            printable_states: vec![InvoiceState::Paid],
        }
    }
}

impl PortalConfig {
    pub fn new(
        pagination_limit: usize,
        excluded_states: Vec<InvoiceState>,
        printable_states: Vec<InvoiceState>,
    ) -> Result<Self, ConfigError> {
        if pagination_limit == 0 {
            return Err(ConfigError::invalid(
                ENV_PAGINATION_LIMIT,
                "page size must be at least 1",
            ));
        }
        Ok(Self {
            pagination_limit,
            excluded_states,
            printable_states,
        })
    }

    /// Read configuration from the environment, falling back to the
    /// defaults for any variable that is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let pagination_limit = match std::env::var(ENV_PAGINATION_LIMIT) {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::invalid(ENV_PAGINATION_LIMIT, e.to_string()))?,
            Err(_) => defaults.pagination_limit,
        };

        let excluded_states = match std::env::var(ENV_EXCLUDED_STATES) {
            Ok(raw) => parse_states(&raw)
                .map_err(|e| ConfigError::invalid(ENV_EXCLUDED_STATES, e.to_string()))?,
            Err(_) => defaults.excluded_states,
        };

        let printable_states = match std::env::var(ENV_PRINTABLE_STATES) {
            Ok(raw) => parse_states(&raw)
                .map_err(|e| ConfigError::invalid(ENV_PRINTABLE_STATES, e.to_string()))?,
            Err(_) => defaults.printable_states,
        };

        Self::new(pagination_limit, excluded_states, printable_states)
    }

    pub fn pagination_limit(&self) -> usize {
        self.pagination_limit
    }

    pub fn excluded_states(&self) -> &[InvoiceState] {
        &self.excluded_states
    }

    /// States an invoice may be in to be printed. Empty means any.
    pub fn printable_states(&self) -> &[InvoiceState] {
        &self.printable_states
    }
}

fn parse_states(raw: &str) -> Result<Vec<InvoiceState>, UnknownState> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_behaviour() {
        let config = PortalConfig::default();
        assert_eq!(config.pagination_limit(), 20);
        assert!(config.excluded_states().is_empty());
        assert_eq!(config.printable_states(), &[InvoiceState::Paid]);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = PortalConfig::new(0, Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn state_lists_parse_with_whitespace() {
        let states = parse_states(" draft , paid ").unwrap();
        assert_eq!(states, vec![InvoiceState::Draft, InvoiceState::Paid]);
    }

    #[test]
    fn empty_state_list_parses_to_nothing() {
        assert!(parse_states("").unwrap().is_empty());
    }

    #[test]
    fn unknown_state_label_fails_parsing() {
        assert!(parse_states("paid,open").is_err());
    }
}
