//! robots.txt courtesy check.
//!
//! Scrapers only log a warning when a path they intend to visit is
//! disallowed; the check never blocks a run.

use crate::fetch::HttpFetcher;

/// Fetch `robots_url` and return the entries of `paths` disallowed for all
/// user agents (`User-agent: *`). Fetch failures yield an empty list.
pub async fn check_robots_txt(
    fetcher: &HttpFetcher,
    robots_url: &str,
    paths: &[&str],
) -> Vec<String> {
    let page = match fetcher.get(robots_url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::debug!(robots_url, error = %e, "error checking robots.txt");
            return Vec::new();
        }
    };

    if !page.is_success() {
        tracing::debug!(robots_url, status = page.status, "failed to fetch robots.txt");
        return Vec::new();
    }

    let blocked = disallowed_paths(&page.body, paths);
    for path in &blocked {
        tracing::warn!(robots_url, path, "scraping this path may violate robots.txt");
    }
    blocked
}

/// Paths from `paths` blocked for `User-agent: *`.
///
/// The longest matching `Allow`/`Disallow` prefix decides; on a tie the
/// `Allow` rule wins.
#[must_use]
pub fn disallowed_paths(robots_txt: &str, paths: &[&str]) -> Vec<String> {
    let rules = wildcard_rules(robots_txt);

    paths
        .iter()
        .filter(|path| {
            rules
                .iter()
                .filter(|rule| path.starts_with(rule.prefix.as_str()))
                .max_by_key(|rule| (rule.prefix.len(), rule.allow))
                .is_some_and(|rule| !rule.allow)
        })
        .map(|path| (*path).to_string())
        .collect()
}

struct Rule {
    prefix: String,
    allow: bool,
}

fn wildcard_rules(robots_txt: &str) -> Vec<Rule> {
    let mut rules = Vec::new();
    let mut group_applies = false;
    let mut in_agent_block = false;

    for raw in robots_txt.lines() {
        let line = raw.split('#').next().unwrap_or("").trim();
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim().to_ascii_lowercase().as_str() {
            "user-agent" => {
                // Consecutive user-agent lines share one group.
                if !in_agent_block {
                    group_applies = false;
                }
                in_agent_block = true;
                if value == "*" {
                    group_applies = true;
                }
            }
            directive @ ("allow" | "disallow") => {
                in_agent_block = false;
                if group_applies && !value.is_empty() {
                    rules.push(Rule {
                        prefix: value.to_string(),
                        allow: directive == "allow",
                    });
                }
            }
            _ => in_agent_block = false,
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_disallowed_path_for_all_agents() {
        let robots = "User-agent: *\nDisallow: /stores\nDisallow: /cart\n";
        assert_eq!(
            disallowed_paths(robots, &["/stores", "/stores/mo", "/parts"]),
            vec!["/stores".to_string(), "/stores/mo".to_string()]
        );
    }

    #[test]
    fn ignores_rules_for_other_agents() {
        let robots = "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nDisallow: /checkout\n";
        assert!(disallowed_paths(robots, &["/stores"]).is_empty());
    }

    #[test]
    fn shared_group_with_wildcard_applies() {
        let robots = "User-agent: Googlebot\nUser-agent: *\nDisallow: /stores # locator\n";
        assert_eq!(disallowed_paths(robots, &["/stores"]), vec!["/stores".to_string()]);
    }

    #[test]
    fn longer_allow_overrides_root_disallow() {
        let robots = "User-agent: *\nDisallow: /\nAllow: /stores\n";
        assert!(disallowed_paths(robots, &["/stores", "/stores/mo"]).is_empty());
        assert_eq!(disallowed_paths(robots, &["/cart"]), vec!["/cart".to_string()]);
    }

    #[test]
    fn longer_disallow_beats_shorter_allow() {
        let robots = "User-agent: *\nAllow: /stores\nDisallow: /stores/private\n";
        assert_eq!(
            disallowed_paths(robots, &["/stores", "/stores/private/x"]),
            vec!["/stores/private/x".to_string()]
        );
    }

    #[test]
    fn equal_length_tie_goes_to_allow() {
        let robots = "User-agent: *\nDisallow: /stores\nAllow: /stores\n";
        assert!(disallowed_paths(robots, &["/stores"]).is_empty());
    }

    #[test]
    fn empty_disallow_allows_everything() {
        let robots = "User-agent: *\nDisallow:\n";
        assert!(disallowed_paths(robots, &["/stores"]).is_empty());
    }
}
