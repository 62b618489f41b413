//! Crawling-policy gate: robots.txt parsing and per-domain evaluation.
//!
//! The registry only ever requests one path per domain, so the parser is
//! reduced to what that decision needs: user-agent groups, allow/disallow
//! prefixes, and crawl delay. Absent or unreachable policy documents fail
//! open with the default delay.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::fetcher::DomainFetcher;

/// Agent label the registry identifies itself with in policy checks.
pub const AGENT_LABEL: &str = "ObrRegistryBot";

/// Well-known path every participating business serves its record at.
pub const RECORD_PATH: &str = "/obr-business.json";

/// Politeness floor applied when a policy names no crawl delay.
pub const DEFAULT_CRAWL_DELAY: Duration = Duration::from_secs(1);

/// Per-attempt crawling permission for one domain. Recomputed on every
/// sync; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlPolicy {
    /// Whether the record path may be fetched for our agent
    pub allowed: bool,

    /// Minimum wait before issuing the record fetch
    pub crawl_delay: Duration,
}

impl CrawlPolicy {
    /// Fail-open policy used when a domain publishes no usable rules.
    pub fn permissive() -> Self {
        Self {
            allowed: true,
            crawl_delay: DEFAULT_CRAWL_DELAY,
        }
    }
}

/// One user-agent group from a robots.txt file.
#[derive(Debug, Clone, Default)]
struct RuleGroup {
    /// Agent tokens (lowercase), `*` for the catch-all group
    agents: Vec<String>,
    allow: Vec<String>,
    disallow: Vec<String>,
    crawl_delay: Option<f64>,
}

/// Parsed robots.txt rules, reduced to what record syncing needs.
#[derive(Debug, Clone, Default)]
pub struct RobotsRules {
    groups: Vec<RuleGroup>,
}

impl RobotsRules {
    /// Parse robots.txt content. Unknown directives, comments, and lines
    /// outside any user-agent group are ignored.
    pub fn parse(content: &str) -> Self {
        let mut groups: Vec<RuleGroup> = Vec::new();
        let mut current: Option<RuleGroup> = None;
        // Consecutive user-agent lines share one group; any other directive
        // closes the agent list.
        let mut accepting_agents = false;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            let directive = directive.trim().to_ascii_lowercase();
            let value = value.trim();

            match directive.as_str() {
                "user-agent" => {
                    if !accepting_agents {
                        if let Some(group) = current.take() {
                            groups.push(group);
                        }
                        current = Some(RuleGroup::default());
                        accepting_agents = true;
                    }
                    if let Some(group) = current.as_mut() {
                        group.agents.push(value.to_ascii_lowercase());
                    }
                }
                "allow" => {
                    accepting_agents = false;
                    if let Some(group) = current.as_mut() {
                        if !value.is_empty() {
                            group.allow.push(value.to_string());
                        }
                    }
                }
                "disallow" => {
                    accepting_agents = false;
                    if let Some(group) = current.as_mut() {
                        // An empty Disallow means "allow everything"
                        if !value.is_empty() {
                            group.disallow.push(value.to_string());
                        }
                    }
                }
                "crawl-delay" => {
                    accepting_agents = false;
                    if let Some(group) = current.as_mut() {
                        if let Ok(delay) = value.parse::<f64>() {
                            group.crawl_delay = Some(delay);
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(group) = current.take() {
            groups.push(group);
        }

        Self { groups }
    }

    /// The most specific group for an agent: a named match first, then the
    /// `*` group.
    fn group_for(&self, agent: &str) -> Option<&RuleGroup> {
        let agent = agent.to_ascii_lowercase();
        self.groups
            .iter()
            .find(|g| {
                g.agents
                    .iter()
                    .any(|a| a != "*" && agent.contains(a.as_str()))
            })
            .or_else(|| self.groups.iter().find(|g| g.agents.iter().any(|a| a == "*")))
    }

    /// Evaluate permission and delay for one agent and one path.
    pub fn evaluate(&self, agent: &str, path: &str) -> CrawlPolicy {
        let Some(group) = self.group_for(agent) else {
            return CrawlPolicy::permissive();
        };

        // Allow rules take precedence over disallow rules
        let allowed = if group.allow.iter().any(|prefix| path.starts_with(prefix)) {
            true
        } else {
            !group
                .disallow
                .iter()
                .any(|prefix| path.starts_with(prefix))
        };

        let crawl_delay = group
            .crawl_delay
            .map(Duration::from_secs_f64)
            .unwrap_or(DEFAULT_CRAWL_DELAY);

        CrawlPolicy {
            allowed,
            crawl_delay,
        }
    }
}

/// Decides whether a domain's published crawling rules permit fetching the
/// record path, and how long to wait before doing so.
pub struct PolicyGate {
    fetcher: Arc<dyn DomainFetcher>,
    agent: String,
}

impl PolicyGate {
    pub fn new(fetcher: Arc<dyn DomainFetcher>) -> Self {
        Self {
            fetcher,
            agent: AGENT_LABEL.to_string(),
        }
    }

    /// Set a custom agent label.
    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = agent.into();
        self
    }

    /// Fetch and evaluate the domain's policy for the record path.
    ///
    /// Most domains publish no policy document, so absence and fetch
    /// failures both fail open.
    pub async fn check(&self, domain: &str) -> CrawlPolicy {
        match self.fetcher.fetch_policy_document(domain).await {
            Ok(Some(content)) => RobotsRules::parse(&content).evaluate(&self.agent, RECORD_PATH),
            Ok(None) => CrawlPolicy::permissive(),
            Err(error) => {
                debug!(domain, error = %error, "policy document unreachable, failing open");
                CrawlPolicy::permissive()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_rules() {
        let content = r#"
User-agent: *
Disallow: /private/
Allow: /private/public/
Crawl-delay: 2
        "#;

        let rules = RobotsRules::parse(content);

        assert!(!rules.evaluate("AnyBot", "/private/secret").allowed);
        assert!(rules.evaluate("AnyBot", "/private/public/page").allowed);
        assert!(rules.evaluate("AnyBot", "/obr-business.json").allowed);
        assert_eq!(
            rules.evaluate("AnyBot", "/").crawl_delay,
            Duration::from_secs(2)
        );
    }

    #[test]
    fn named_group_overrides_catch_all() {
        let content = r#"
User-agent: *
Disallow: /

User-agent: obrregistrybot
Disallow:
        "#;

        let rules = RobotsRules::parse(content);

        assert!(!rules.evaluate("SomeOtherBot", "/obr-business.json").allowed);
        assert!(rules.evaluate(AGENT_LABEL, "/obr-business.json").allowed);
    }

    #[test]
    fn agent_match_is_case_insensitive_substring() {
        let content = r#"
User-agent: ObrRegistryBot
Disallow: /obr-business.json
        "#;

        let rules = RobotsRules::parse(content);

        // Full product tokens like "ObrRegistryBot/1.0" still match
        assert!(!rules.evaluate("obrregistrybot/1.0", RECORD_PATH).allowed);
    }

    #[test]
    fn empty_document_is_permissive() {
        let rules = RobotsRules::parse("");

        assert_eq!(rules.evaluate(AGENT_LABEL, RECORD_PATH), CrawlPolicy::permissive());
    }

    #[test]
    fn garbage_lines_are_ignored() {
        let content = "not a directive\n# comment\nDisallow /missing-colon\nUser-agent: *\nDisallow: /obr-business.json";

        let rules = RobotsRules::parse(content);

        assert!(!rules.evaluate(AGENT_LABEL, RECORD_PATH).allowed);
        assert!(rules.evaluate(AGENT_LABEL, "/index.html").allowed);
    }

    #[test]
    fn delay_defaults_to_one_second() {
        let rules = RobotsRules::parse("User-agent: *\nDisallow: /admin/");

        assert_eq!(
            rules.evaluate(AGENT_LABEL, RECORD_PATH).crawl_delay,
            DEFAULT_CRAWL_DELAY
        );
    }

    #[test]
    fn fractional_delay_is_respected() {
        let rules = RobotsRules::parse("User-agent: *\nCrawl-delay: 0.5");

        assert_eq!(
            rules.evaluate(AGENT_LABEL, RECORD_PATH).crawl_delay,
            Duration::from_millis(500)
        );
    }
}
