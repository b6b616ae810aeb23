//! Interface name filtering for selective reporting.
//!
//! # Design
//!
//! - **Pure Matchers**: [`NameRegexFilter`] only answers "does this name
//!   match?" without include/exclude semantics.
//! - **Filter Chain**: [`FilterChain`] combines matchers with the usual
//!   semantics:
//!   - Exclude filters: any match rejects
//!   - Include filters: any match accepts, empty = accept all

use regex::Regex;

/// Trait for deciding whether an interface should be reported.
///
/// Filters must be `Send + Sync` because the scan engine that owns them
/// runs on blocking worker threads.
pub trait InterfaceFilter: Send + Sync {
    /// Returns `true` if the interface matches this filter.
    fn matches(&self, name: &str) -> bool;
}

/// Matches interface names against a regex (pure matcher).
///
/// # Examples
///
/// ```
/// use ifscan::network::filter::{InterfaceFilter, NameRegexFilter};
///
/// let filter = NameRegexFilter::new(r"^eth").unwrap();
///
/// assert!(filter.matches("eth0"));
/// assert!(!filter.matches("wlan0"));
/// ```
#[derive(Debug, Clone)]
pub struct NameRegexFilter {
    pattern: Regex,
}

impl NameRegexFilter {
    /// Creates a name filter with the given regex pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Returns a reference to the regex pattern.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Regex is not a const type
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl InterfaceFilter for NameRegexFilter {
    fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

/// Filter chain with include/exclude semantics.
///
/// Evaluation order:
/// 1. **Exclude filters**: any match → reject.
/// 2. **Include filters**: any match → accept. Empty includes = accept all.
///
/// # Examples
///
/// ```
/// use ifscan::network::filter::{FilterChain, InterfaceFilter, NameRegexFilter};
///
/// let chain = FilterChain::new()
///     .exclude(NameRegexFilter::new(r"^docker").unwrap())
///     .include(NameRegexFilter::new(r"^(eth|wl)").unwrap());
///
/// assert!(chain.matches("eth0"));
/// assert!(chain.matches("wlp3s0"));
/// assert!(!chain.matches("enp0s31f6"));  // not included
/// assert!(!chain.matches("docker0"));    // excluded
/// ```
#[derive(Default)]
pub struct FilterChain {
    includes: Vec<Box<dyn InterfaceFilter>>,
    excludes: Vec<Box<dyn InterfaceFilter>>,
}

impl FilterChain {
    /// Creates an empty filter chain (matches all interfaces).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include filter (OR semantics).
    #[must_use]
    pub fn include<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.includes.push(Box::new(filter));
        self
    }

    /// Adds an exclude filter; any match rejects regardless of includes.
    #[must_use]
    pub fn exclude<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    /// Returns the number of include filters.
    #[must_use]
    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    /// Returns the number of exclude filters.
    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    /// Returns true if no filters are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

impl InterfaceFilter for FilterChain {
    fn matches(&self, name: &str) -> bool {
        if self.excludes.iter().any(|f| f.matches(name)) {
            return false;
        }

        self.includes.is_empty() || self.includes.iter().any(|f| f.matches(name))
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("include_count", &self.includes.len())
            .field("exclude_count", &self.excludes.len())
            .finish()
    }
}

impl<F: InterfaceFilter + ?Sized> InterfaceFilter for Box<F> {
    fn matches(&self, name: &str) -> bool {
        (**self).matches(name)
    }
}
