#[cfg(test)]
pub const POST_DATA: &str = r#"---
title: "Fixing a flaky CI job, for good"
created: 2025-06-14
status: published
slug: flaky-ci
description: How a race in the test harness kept failing builds
categories: [DevOps]
tags: [debugging, "github-actions", 'ci-cd']
---

# Fixing a flaky CI job

Every other build failed and nobody knew why.
"#;

#[cfg(test)]
pub const NO_FRONTMATTER: &str = "# Just notes

No header in here.
";

#[cfg(test)]
pub const UNTERMINATED_FRONTMATTER: &str = "---
title: Half written
created: 2025-01-01

# Half written
";
