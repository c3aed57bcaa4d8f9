use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

use crate::config::Site;
use crate::content::PostRecord;
use crate::text_utils::{format_long_date, UNKNOWN};
use crate::view::tag_groups::TagGroup;

const ABOUT: &str = "This blog is where I write down what I learn while building, breaking and fixing \
software. Most posts start as notes taken in the middle of an incident or a long debugging session, \
cleaned up so that the next person (usually me) doesn't have to start from scratch.";

const FINDING_POSTS: &str = "- Browse the **Latest Posts** above for what's new.
- Use **Posts by Category** to read everything on one subject.
- Use **Posts by Topic** when you are chasing a specific kind of problem.
- Press `t` on GitHub to jump to any file, or search the repository for a tag name.";

const CONNECT: &str = "Found a mistake or have a question? Open an issue or a pull request in this \
repository. Suggestions for new topics are always welcome.";

const AUTOMATION: &str = "This README is generated from the frontmatter of every post and is \
rebuilt automatically whenever a post changes. Do not edit it by hand, your changes will be \
overwritten on the next run.";

const CLOSING: &str = "Thanks for reading!";

/// Renders the README index. The output only depends on the records and the
/// renderer settings, rendering the same records twice gives the same text.
pub struct IndexRenderer<'a> {
    pub site: &'a Site,
    pub tag_groups: &'a [TagGroup],
}

struct Stats {
    total: usize,
    categories: usize,
    most_recent: Option<String>,
}

impl<'a> IndexRenderer<'a> {
    pub fn new(site: &'a Site, tag_groups: &'a [TagGroup]) -> IndexRenderer<'a> {
        IndexRenderer {
            site,
            tag_groups,
        }
    }

    pub fn render(&self, records: &[PostRecord]) -> String {
        let sorted = sort_by_recency(records);
        let categories = group_by_category(records);
        let stats = Stats {
            total: records.len(),
            categories: categories.len(),
            most_recent: sorted.first().map(|r| format_long_date(&r.created)),
        };

        let mut buf = String::new();

        let _ = writeln!(&mut buf, "# {}", self.site.title);
        let _ = writeln!(&mut buf);
        let _ = writeln!(&mut buf, "{}", self.site.intro);
        let _ = writeln!(&mut buf);

        render_latest(&mut buf, &sorted);
        render_categories(&mut buf, &categories);
        self.render_tag_groups(&mut buf, records);
        render_stats(&mut buf, &stats);
        render_footer(&mut buf);

        buf
    }

    fn render_tag_groups(&self, buf: &mut String, records: &[PostRecord]) {
        let _ = writeln!(buf, "## Posts by Topic");
        let _ = writeln!(buf);

        for group in self.tag_groups {
            let posts = posts_in_group(group, records);
            if posts.is_empty() {
                continue;
            }

            let _ = writeln!(buf, "### {}", group.label);
            let _ = writeln!(buf);
            for post in posts {
                let _ = writeln!(buf, "- {}", post_link(post));
            }
            let _ = writeln!(buf);
        }
    }
}

/// Newest first. Posts without a valid date go last, equal dates keep the
/// order they were given in.
pub fn sort_by_recency(records: &[PostRecord]) -> Vec<&PostRecord> {
    let mut sorted: Vec<&PostRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.created.cmp(&a.created));
    sorted
}

/// Category as written in the post -> posts declaring it, in input order.
pub fn group_by_category(records: &[PostRecord]) -> BTreeMap<&str, Vec<&PostRecord>> {
    let mut categories: BTreeMap<&str, Vec<&PostRecord>> = BTreeMap::new();
    for record in records {
        for category in record.categories.iter() {
            let posts = categories.entry(category.as_str()).or_default();
            // A post repeating a category is listed once
            if posts.last().map_or(true, |last| !std::ptr::eq(*last, record)) {
                posts.push(record);
            }
        }
    }
    categories
}

/// Posts with at least one tag of the group, once per title, sorted by title.
pub fn posts_in_group<'a>(group: &TagGroup, records: &'a [PostRecord]) -> Vec<&'a PostRecord> {
    let mut seen = HashSet::new();
    let mut posts: Vec<&PostRecord> = records.iter()
        .filter(|r| group.matches(&r.tags))
        .filter(|r| seen.insert(display_title(*r)))
        .collect();
    posts.sort_by(|a, b| display_title(a).cmp(display_title(b)));
    posts
}

fn render_latest(buf: &mut String, sorted: &[&PostRecord]) {
    let _ = writeln!(buf, "## Latest Posts");
    let _ = writeln!(buf);

    for record in sorted {
        let status = record.status.as_deref().unwrap_or(UNKNOWN);

        let _ = writeln!(buf, "### {}", post_link(record));
        let _ = writeln!(buf);
        let _ = writeln!(buf, "**Created:** {} | **Status:** {}", format_long_date(&record.created), status);
        let _ = writeln!(buf);
        if !record.categories.is_empty() {
            let _ = writeln!(buf, "**Categories:** {}", record.categories.join(", "));
            let _ = writeln!(buf);
        }
        if !record.tags.is_empty() {
            let _ = writeln!(buf, "**Tags:** {}", record.tags.join(", "));
            let _ = writeln!(buf);
        }
        if let Some(ref description) = record.description {
            let _ = writeln!(buf, "{}", description);
            let _ = writeln!(buf);
        }
        let _ = writeln!(buf, "---");
        let _ = writeln!(buf);
    }
}

fn render_categories(buf: &mut String, categories: &BTreeMap<&str, Vec<&PostRecord>>) {
    let _ = writeln!(buf, "## Posts by Category");
    let _ = writeln!(buf);

    for (category, posts) in categories {
        let _ = writeln!(buf, "### {}", category);
        let _ = writeln!(buf);
        for post in posts {
            let _ = writeln!(buf, "- {}", post_link(post));
        }
        let _ = writeln!(buf);
    }
}

fn render_stats(buf: &mut String, stats: &Stats) {
    let _ = writeln!(buf, "## Stats");
    let _ = writeln!(buf);
    let _ = writeln!(buf, "- **Total Posts:** {}", stats.total);
    let _ = writeln!(buf, "- **Categories:** {}", stats.categories);
    if let Some(ref most_recent) = stats.most_recent {
        let _ = writeln!(buf, "- **Most Recent:** {}", most_recent);
    }
    let _ = writeln!(buf);
}

fn render_footer(buf: &mut String) {
    for (heading, text) in [("About", ABOUT), ("Finding Posts", FINDING_POSTS), ("Connect", CONNECT), ("Automation", AUTOMATION)] {
        let _ = writeln!(buf, "## {}", heading);
        let _ = writeln!(buf);
        let _ = writeln!(buf, "{}", text);
        let _ = writeln!(buf);
    }
    let _ = writeln!(buf, "---");
    let _ = writeln!(buf);
    let _ = writeln!(buf, "_{}_", CLOSING);
}

fn display_title(record: &PostRecord) -> &str {
    record.title.as_deref().unwrap_or(UNKNOWN)
}

fn post_link(record: &PostRecord) -> String {
    format!("[{}]({})", display_title(record), record.link().replace(' ', "%20"))
}
