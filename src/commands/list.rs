//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::helpers::short_date;
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str, json: bool) -> Result<()> {
    let posts = blog.load_posts()?;

    match content_type {
        "post" | "posts" => {
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
                return Ok(());
            }
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!(
                    "  {} - {} [{}]",
                    short_date(post.effective_date()),
                    post.title().unwrap_or(post.slug.as_str()),
                    post.slug
                );
            }
        }
        "tag" | "tags" => {
            let counts = count(posts.iter().flat_map(|p| p.tags.iter()));
            print_counts("Tags", counts, json)?;
        }
        "category" | "categories" => {
            let counts = count(posts.iter().flat_map(|p| p.category.iter()));
            print_counts("Categories", counts, json)?;
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

/// Occurrences per name, most frequent first, ties by name
fn count<'a>(names: impl Iterator<Item = &'a String>) -> Vec<(&'a str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    counts
}

fn print_counts(label: &str, counts: Vec<(&str, usize)>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }
    println!("{} ({}):", label, counts.len());
    for (name, n) in counts {
        println!("  {} ({})", name, n);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_orders_by_frequency_then_name() {
        let names: Vec<String> = ["rust", "web", "rust", "blog", "web", "rust"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(count(names.iter()), vec![("rust", 3), ("web", 2), ("blog", 1)]);
    }
}
