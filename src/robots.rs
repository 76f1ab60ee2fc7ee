use url::Url;

/// Exclusion rules extracted from a robots.txt document for one agent.
#[derive(Debug, Clone, Default)]
pub struct RobotsRules {
    allowed: Vec<String>,
    disallowed: Vec<String>,
}

impl RobotsRules {
    /// Whether a fetch of `path` is permitted.
    ///
    /// Between a matching Allow and a matching Disallow, the longer
    /// pattern wins; a path no rule matches is permitted.
    pub fn is_allowed(&self, path: &str) -> bool {
        let longest = |patterns: &[String]| {
            patterns
                .iter()
                .filter(|p| path_matches(path, p))
                .map(|p| p.len())
                .max()
        };

        match (longest(&self.allowed), longest(&self.disallowed)) {
            (Some(allow), Some(disallow)) => allow >= disallow,
            (None, Some(_)) => false,
            _ => true,
        }
    }
}

/// Builds the robots.txt URL for the host serving `target`.
pub fn robots_url(target: &Url) -> Url {
    let mut robots = target.clone();
    robots.set_path("/robots.txt");
    robots.set_query(None);
    robots.set_fragment(None);
    robots
}

/// Parses a robots.txt document into the rules that apply to `user_agent`.
///
/// Rules from a group naming our agent take precedence over the wildcard
/// `*` group; with neither present, everything is permitted.
pub fn parse_robots(txt: &str, user_agent: &str) -> RobotsRules {
    let mut wildcard = RobotsRules::default();
    let mut specific = RobotsRules::default();
    let mut found_specific = false;

    // Which groups the current rule block belongs to. Consecutive
    // User-agent lines head a single shared block, so membership
    // accumulates until the first rule line closes the header.
    let mut in_wildcard = false;
    let mut in_specific = false;
    let mut header_open = false;

    let ua_lower = user_agent.to_lowercase();

    for line in txt.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();

        match key.as_str() {
            "user-agent" => {
                if !header_open {
                    in_wildcard = false;
                    in_specific = false;
                    header_open = true;
                }
                let ua = value.to_lowercase();
                if ua == "*" {
                    in_wildcard = true;
                } else if ua_lower.contains(ua.as_str()) {
                    in_specific = true;
                    found_specific = true;
                }
            }
            "allow" if !value.is_empty() => {
                header_open = false;
                if in_specific {
                    specific.allowed.push(value.to_string());
                }
                if in_wildcard {
                    wildcard.allowed.push(value.to_string());
                }
            }
            "disallow" if !value.is_empty() => {
                header_open = false;
                if in_specific {
                    specific.disallowed.push(value.to_string());
                }
                if in_wildcard {
                    wildcard.disallowed.push(value.to_string());
                }
            }
            _ => {}
        }
    }

    if found_specific { specific } else { wildcard }
}

fn path_matches(path: &str, pattern: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix('*') {
        return path.starts_with(prefix);
    }
    if let Some(exact) = pattern.strip_suffix('$') {
        return path == exact;
    }
    path.starts_with(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENT: &str = "articulations/0.1.0";

    #[test]
    fn empty_document_permits_everything() {
        let rules = parse_robots("", AGENT);
        assert!(rules.is_allowed("/web-dbgen/artic/all-course-to-course.html"));
    }

    #[test]
    fn wildcard_disallow_applies() {
        let txt = "User-agent: *\nDisallow: /web-dbgen/";
        let rules = parse_robots(txt, AGENT);
        assert!(!rules.is_allowed("/web-dbgen/artic/all-course-to-course.html"));
        assert!(rules.is_allowed("/index.html"));
    }

    #[test]
    fn specific_group_overrides_wildcard() {
        let txt = "\
User-agent: *
Disallow: /

User-agent: articulations
Disallow: /private/
";
        let rules = parse_robots(txt, AGENT);
        assert!(rules.is_allowed("/web-dbgen/artic/all-course-to-course.html"));
        assert!(!rules.is_allowed("/private/data.html"));
    }

    #[test]
    fn longer_allow_beats_shorter_disallow() {
        let txt = "\
User-agent: *
Disallow: /web-dbgen/
Allow: /web-dbgen/artic/
";
        let rules = parse_robots(txt, AGENT);
        assert!(rules.is_allowed("/web-dbgen/artic/all-course-to-course.html"));
        assert!(!rules.is_allowed("/web-dbgen/other.html"));
    }

    #[test]
    fn comments_and_blank_lines_ignored() {
        let txt = "\
# campus crawler policy
User-agent: * # everyone

Disallow: /cgi-bin/ # legacy
";
        let rules = parse_robots(txt, AGENT);
        assert!(!rules.is_allowed("/cgi-bin/lookup"));
        assert!(rules.is_allowed("/web-dbgen/"));
    }

    #[test]
    fn stacked_agent_lines_share_one_rule_block() {
        let txt = "\
User-agent: articulations
User-agent: *
Disallow: /web-dbgen/
";
        let rules = parse_robots(txt, AGENT);
        assert!(!rules.is_allowed("/web-dbgen/artic/all-course-to-course.html"));
    }

    #[test]
    fn rule_line_closes_the_group_header() {
        let txt = "\
User-agent: somebot
Disallow: /a

User-agent: *
Disallow: /b
";
        let rules = parse_robots(txt, AGENT);
        assert!(rules.is_allowed("/a"));
        assert!(!rules.is_allowed("/b"));
    }

    #[test]
    fn dollar_pattern_is_exact() {
        let txt = "User-agent: *\nDisallow: /index.html$";
        let rules = parse_robots(txt, AGENT);
        assert!(!rules.is_allowed("/index.html"));
        assert!(rules.is_allowed("/index.html?page=2"));
    }

    #[test]
    fn star_pattern_matches_prefix() {
        let txt = "User-agent: *\nDisallow: /web-dbgen/*";
        let rules = parse_robots(txt, AGENT);
        assert!(!rules.is_allowed("/web-dbgen/artic/x.html"));
    }

    #[test]
    fn robots_url_from_target() {
        let target =
            Url::parse("http://info.sjsu.edu/web-dbgen/artic/all-course-to-course.html?x=1")
                .unwrap();
        assert_eq!(
            robots_url(&target).as_str(),
            "http://info.sjsu.edu/robots.txt"
        );
    }
}
