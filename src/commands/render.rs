//! Render a post body to HTML

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Blog;

/// Render the post with `slug`, to stdout or to `output`
pub fn run(blog: &Blog, slug: &str, output: Option<&Path>) -> Result<()> {
    let post = blog.find_post(slug)?;
    let html = blog.renderer().render(&post.content)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &html)?;
            tracing::info!("Rendered {} to {:?}", post.slug, path);
        }
        None => println!("{}", html),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_to_file() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("src").join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("hello.md"), "---\ndate: 2024-01-01\n---\n## Intro\n").unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let out = dir.path().join("out").join("hello.html");
        run(&blog, "hello", Some(&out)).unwrap();

        let html = fs::read_to_string(out).unwrap();
        assert!(html.contains(r#"<h2 id="intro">Intro</h2>"#));
    }
}
