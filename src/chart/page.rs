//! HTML page composition and persistence.
//!
//! A page is a self-contained HTML document holding one ECharts container
//! and init script per chart. Pages are written to a temporary sibling file
//! and renamed into place so a failed run never leaves a truncated page.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use super::Chart;

/// ECharts bundle loaded by rendered pages
pub const DEFAULT_ASSET_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

/// Errors that can occur while writing rendered pages
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to write page {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A titled collection of charts rendered into one HTML document
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub asset_url: String,
    pub charts: Vec<Chart>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            asset_url: DEFAULT_ASSET_URL.to_string(),
            charts: Vec::new(),
        }
    }

    pub fn with_asset_url(mut self, asset_url: impl Into<String>) -> Self {
        self.asset_url = asset_url.into();
        self
    }

    pub fn add_chart(&mut self, chart: Chart) -> &mut Self {
        self.charts.push(chart);
        self
    }

    /// Render the complete HTML document
    pub fn render(&self) -> String {
        let mut body = String::new();
        for (index, chart) in self.charts.iter().enumerate() {
            let id = format!("chart-{}", index);
            let _ = write!(
                body,
                r#"
    <div class="item" id="{id}"></div>
    <script type="text/javascript">
        "use strict";
        let chart_{index} = echarts.init(document.getElementById("{id}"), "white");
        let option_{index} = {option};
        chart_{index}.setOption(option_{index});
    </script>"#,
                id = id,
                index = index,
                option = script_json(&chart.option()),
            );
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="{asset}"></script>
    <style>
        .container {{ display: flex; flex-direction: column; align-items: center; }}
        .item {{ width: 900px; height: 500px; margin: 10px auto; }}
    </style>
</head>
<body>
<div class="container">{body}
</div>
</body>
</html>
"#,
            title = escape_html(&self.title),
            asset = escape_html(&self.asset_url),
            body = body,
        )
    }

    /// Write the page to `<html_dir>/<name>.html`, replacing any previous version
    pub fn write(&self, html_dir: &Path, name: &str) -> Result<PathBuf, RenderError> {
        let path = html_dir.join(format!("{}.html", name));
        write_atomic(&path, &self.render())?;
        log::info!("Rendered {} charts to {}", self.charts.len(), path.display());
        Ok(path)
    }
}

/// Write `index.html` linking every rendered page
pub fn write_index(html_dir: &Path, title: &str, pages: &[String]) -> Result<PathBuf, RenderError> {
    let mut links = String::new();
    for name in pages {
        let name = escape_html(name);
        let _ = write!(links, "\n        <li><a href=\"{0}.html\">{0}</a></li>", name);
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body>
    <h1>{title}</h1>
    <ul>{links}
    </ul>
</body>
</html>
"#,
        title = escape_html(title),
        links = links,
    );

    let path = html_dir.join("index.html");
    write_atomic(&path, &html)?;
    Ok(path)
}

fn write_atomic(path: &Path, content: &str) -> Result<(), RenderError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, content)
        .and_then(|_| fs::rename(&tmp, path))
        .map_err(|source| {
            let _ = fs::remove_file(&tmp);
            RenderError::Io {
                path: path.to_path_buf(),
                source,
            }
        })
}

/// Serialize an option object so it cannot close the surrounding script tag
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
