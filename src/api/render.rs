use crate::storage::{is_web_url, Recipe};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Recipe Box</title>
  <link rel="stylesheet" href="/assets/style.css">
</head>
<body>
  <h1>Recipe Box</h1>
  <form method="post" action="/">
    <input type="url" name="recipeUrl" placeholder="https://example.com/recipe" required>
    <button type="submit">Save recipe</button>
  </form>
"#;

const PAGE_FOOT: &str = "</body>\n</html>\n";

/// Render the index page: the add form, an optional error and the recipe list.
pub fn index_page(recipes: &[Recipe], error: Option<&str>) -> String {
    let mut html = String::with_capacity(PAGE_HEAD.len() + recipes.len() * 512);
    html.push_str(PAGE_HEAD);

    if let Some(message) = error {
        let _ = writeln!(
            html,
            "  <p class=\"error\" role=\"alert\">{}</p>",
            encode_text(message)
        );
    }

    if recipes.is_empty() {
        html.push_str("  <p class=\"empty\">No recipes saved yet.</p>\n");
    } else {
        html.push_str("  <ul class=\"recipes\">\n");
        for recipe in recipes {
            push_recipe(&mut html, recipe);
        }
        html.push_str("  </ul>\n");
    }

    html.push_str(PAGE_FOOT);
    html
}

fn push_recipe(html: &mut String, recipe: &Recipe) {
    html.push_str("    <li class=\"recipe\">\n");
    // Only http(s) URLs reach src/href, whatever the row holds.
    if is_web_url(&recipe.image_url) {
        let _ = writeln!(
            html,
            "      <img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            encode_double_quoted_attribute(&recipe.image_url),
            encode_double_quoted_attribute(&recipe.title)
        );
    }
    if is_web_url(&recipe.url) {
        let _ = writeln!(
            html,
            "      <div>\n        <h2><a href=\"{}\">{}</a></h2>",
            encode_double_quoted_attribute(&recipe.url),
            encode_text(&recipe.title)
        );
    } else {
        let _ = writeln!(
            html,
            "      <div>\n        <h2>{}</h2>",
            encode_text(&recipe.title)
        );
    }
    if !recipe.description.is_empty() {
        let _ = writeln!(html, "        <p>{}</p>", encode_text(&recipe.description));
    }
    let _ = writeln!(
        html,
        "        <time datetime=\"{}\">Saved {}</time>\n      </div>",
        recipe.created_at.to_rfc3339(),
        recipe.created_at.format("%b %-d, %Y")
    );
    html.push_str("    </li>\n");
}
