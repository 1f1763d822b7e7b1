use std::collections::HashSet;

/// Suffix GitHub appends to the login of app accounts
const BOT_SUFFIX: &str = "[bot]";

/// Recognizes automation accounts that should not count as contributors
#[derive(Debug, Clone, Default)]
pub struct BotFilter {
    accounts: HashSet<String>,
}

impl BotFilter {
    /// Create a filter that also rejects the given account names
    #[must_use]
    pub fn new<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accounts: accounts.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_bot(&self, login: &str) -> bool {
        login.ends_with(BOT_SUFFIX) || self.accounts.contains(login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_suffix() {
        let filter = BotFilter::default();
        assert!(filter.is_bot("dependabot[bot]"));
        assert!(filter.is_bot("renovate[bot]"));
        assert!(!filter.is_bot("octocat"));
        assert!(!filter.is_bot("robot"));
    }

    #[test]
    fn test_listed_accounts() {
        let filter = BotFilter::new(["snyk-bot"]);
        assert!(filter.is_bot("snyk-bot"));
        assert!(!filter.is_bot("snyk-bot-fan"));
    }
}
