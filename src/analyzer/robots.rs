//! Minimal robots.txt reading
//!
//! Only answers two questions: does the `*` group block the whole site,
//! and which sitemaps are declared.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RobotsTxt {
    /// Served with a 2xx status
    pub found: bool,
    /// `Disallow: /` in the group that applies to all crawlers
    pub disallow_all: bool,
    pub sitemaps: Vec<String>,
}

impl RobotsTxt {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn parse(content: &str) -> Self {
        let mut robots = RobotsTxt {
            found: true,
            ..Default::default()
        };

        // Consecutive User-agent lines open one group
        let mut group_agents: Vec<String> = Vec::new();
        let mut in_rules = false;

        for raw in content.lines() {
            let line = raw.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    if in_rules {
                        group_agents.clear();
                        in_rules = false;
                    }
                    group_agents.push(value.to_ascii_lowercase());
                }
                "disallow" | "allow" => {
                    in_rules = true;
                    let applies = group_agents.iter().any(|a| a == "*");
                    if applies && key == "disallow" && value == "/" {
                        robots.disallow_all = true;
                    }
                }
                "sitemap" => {
                    // Sitemap lines live outside groups; the value has its own ':'
                    let url = line[line.find(':').map_or(0, |i| i + 1)..].trim();
                    if !url.is_empty() && !robots.sitemaps.iter().any(|s| s == url) {
                        robots.sitemaps.push(url.to_string());
                    }
                }
                _ => {}
            }
        }
        robots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_file_with_sitemaps() {
        let robots = RobotsTxt::parse(
            "User-agent: *\nDisallow: /admin/\n\nSitemap: https://example.com/sitemap.xml\nSitemap: https://example.com/news.xml\n",
        );
        assert!(robots.found);
        assert!(!robots.disallow_all);
        assert_eq!(
            robots.sitemaps,
            vec![
                "https://example.com/sitemap.xml".to_string(),
                "https://example.com/news.xml".to_string()
            ]
        );
    }

    #[test]
    fn test_disallow_all_for_every_agent() {
        let robots = RobotsTxt::parse("User-agent: *\nDisallow: /\n");
        assert!(robots.disallow_all);
    }

    #[test]
    fn test_disallow_all_for_one_bot_only() {
        let robots = RobotsTxt::parse(
            "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nDisallow: /private\n",
        );
        assert!(!robots.disallow_all);
    }

    #[test]
    fn test_shared_group_and_comments() {
        let robots = RobotsTxt::parse(
            "# staging\nUser-agent: Googlebot\nUser-agent: *\nDisallow: / # everything\n",
        );
        assert!(robots.disallow_all);
    }

    #[test]
    fn test_empty_disallow_allows_everything() {
        let robots = RobotsTxt::parse("User-agent: *\nDisallow:\n");
        assert!(robots.found);
        assert!(!robots.disallow_all);
        assert!(robots.sitemaps.is_empty());
    }

    #[test]
    fn test_missing() {
        assert!(!RobotsTxt::missing().found);
    }
}
