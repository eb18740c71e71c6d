/// A named aesthetic direction and the phrases that give it away in a design brief.
#[derive(Debug, Clone, Copy)]
pub struct AestheticCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str], // lowercase
}

/// Aesthetics the generator tends to fall back on. Order is significant: it is the
/// order tired categories are reported in, so prompts stay reproducible.
pub static AESTHETIC_CATALOG: &[AestheticCategory] = &[
    AestheticCategory {
        name: "terminal/CRT/hacker",
        keywords: &[
            "terminal",
            "crt",
            "command line",
            "command-line",
            "monospace",
            "green on black",
            "green text",
            "matrix",
            "hacker",
            "dos",
            "console",
            "scanline",
            "phosphor",
            "retro computer",
        ],
    },
    AestheticCategory {
        name: "newspaper/broadsheet",
        keywords: &[
            "newspaper",
            "broadsheet",
            "editorial",
            "gazette",
            "print journalism",
            "masthead",
            "column layout",
            "front page",
        ],
    },
    AestheticCategory {
        name: "dark/somber/urgent",
        keywords: &[
            "dark background",
            "somber",
            "urgent",
            "emergency",
            "crisis",
            "alarm",
            "warning",
            "dark mode",
            "black background",
        ],
    },
    AestheticCategory {
        name: "minimalist typography",
        keywords: &[
            "typographic hierarchy",
            "typography only",
            "pure type",
            "minimal decoration",
            "whitespace",
            "type hierarchy",
        ],
    },
    AestheticCategory {
        name: "government/classified",
        keywords: &[
            "classified",
            "redacted",
            "government",
            "dossier",
            "intelligence",
            "confidential",
            "top secret",
        ],
    },
];

pub fn category(name: &str) -> Option<&'static AestheticCategory> {
    AESTHETIC_CATALOG.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_are_unique() {
        let names: HashSet<_> = AESTHETIC_CATALOG.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), AESTHETIC_CATALOG.len());
    }

    #[test]
    fn test_keywords_are_lowercase_and_nonempty() {
        for c in AESTHETIC_CATALOG {
            assert!(!c.keywords.is_empty(), "{} has no keywords", c.name);
            for k in c.keywords {
                assert!(!k.is_empty());
                assert_eq!(*k, k.to_lowercase(), "keyword {:?} in {} is not lowercase", k, c.name);
            }
        }
    }

    #[test]
    fn test_category_lookup() {
        let c = category("government/classified").unwrap();
        assert!(c.keywords.contains(&"redacted"));
        assert!(category("vaporwave").is_none());
    }
}
