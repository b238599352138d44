//! Landing page rendering.

use anyhow::Result;

use crate::nlp::ModelName;

#[cfg(feature = "askama")]
mod templates {
    use askama::Template;

    #[derive(Template)]
    #[template(path = "index.html")]
    pub struct IndexTemplate<'a> {
        pub models: &'a [&'static str],
        pub version: &'static str,
    }
}

/// Render the landing page listing the available models.
#[cfg(feature = "askama")]
pub fn render_index() -> Result<String> {
    use askama::Template;

    let models: Vec<&'static str> = ModelName::ALL.iter().map(ModelName::as_str).collect();
    let page = templates::IndexTemplate {
        models: &models,
        version: env!("CARGO_PKG_VERSION"),
    };
    Ok(page.render()?)
}

/// Plain landing page used when templates are compiled out.
#[cfg(not(feature = "askama"))]
pub fn render_index() -> Result<String> {
    let items: String = ModelName::ALL
        .iter()
        .map(|model| format!("<li><code>{model}</code></li>"))
        .collect();
    Ok(format!(
        "<!DOCTYPE html><html><head><title>Article AI</title></head>\
         <body><h1>Article AI</h1><ul>{items}</ul></body></html>"
    ))
}
