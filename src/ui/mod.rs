//! Server-side rendering of the items page.
//!
//! The controller hands over a plain [`ItemView`]; this module turns it into
//! an HTML document. Text and attribute values are escaped by leptos, so
//! item content never becomes markup.

mod components;

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

use crate::items::ItemView;
pub use components::*;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Items</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css">
</head>
<body>
"#;

const PAGE_TAIL: &str = "\n</body>\n</html>\n";

/// Render a complete HTML document for the items page.
pub fn render_items_page(page: ItemView) -> String {
    let owner = Owner::new();
    let body = owner.with(|| view! { <ItemsPage page=page /> }.to_html());

    let mut html = String::with_capacity(PAGE_HEAD.len() + body.len() + PAGE_TAIL.len());
    html.push_str(PAGE_HEAD);
    html.push_str(&body);
    html.push_str(PAGE_TAIL);
    html
}
