//! Test fixtures - reusable content for registry tests.

/// A minimal valid manifest for the given `owner/repo` slug
pub fn manifest(github: &str) -> String {
    format!(
        r#"{{
  "name": "example",
  "description": "An example grimoire",
  "version": "1.0.0",
  "github": "{github}",
  "sourceType": "github"
}}"#
    )
}

/// A minimal valid topic document
pub fn topic(slug: &str, order: i64) -> String {
    format!(
        r#"---
title: Topic {slug}
slug: {slug}
description: About {slug}
order: {order}
category: concepts
---
# Topic {slug}

Body text for {slug}.
"#
    )
}

/// Topic frontmatter missing the required `order` field
pub const TOPIC_MISSING_ORDER: &str = r#"---
title: Broken
slug: broken
description: Missing its order field
category: concepts
---
# Broken
"#;

/// A markdown file with no frontmatter block at all
pub const TOPIC_NO_FRONTMATTER: &str = "# Just markdown\n\nNo frontmatter here.\n";

/// Registry config that fails check runs on warnings
pub const CONFIG_STRICT: &str = r#"
[validation]
strict_warnings = true
"#;

/// Registry config closing the category vocabulary
pub const CONFIG_CLOSED_CATEGORIES: &str = r#"
[validation]
allowed_categories = ["guides"]
"#;
