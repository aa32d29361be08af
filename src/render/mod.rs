//! Chart artifact rendering.
//!
//! A [`Renderer`] turns summary views into chart artifacts in two phases:
//! every chart of a run is staged first, then `publish` moves the whole set
//! into place. A run that fails mid-way therefore never leaves a mixed set
//! of old and new charts in the output directory.

pub mod plotly;

use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::Granularity;
use crate::views::SummaryView;

/// Sink for rendered summary views.
pub trait Renderer {
    /// Stage one chart artifact. Nothing is visible in the output
    /// directory until [`publish`](Self::publish).
    fn render(
        &mut self,
        view: &SummaryView,
        title: &str,
        granularity: Granularity,
        artifact: &str,
    ) -> Result<()>;

    /// Move every staged artifact into the output directory, returning the
    /// published paths.
    fn publish(&mut self) -> Result<Vec<PathBuf>>;
}

/// Renders each view as a self-contained HTML page that draws a Plotly
/// figure from the CDN bundle.
pub struct PlotlyHtmlRenderer {
    out_dir: PathBuf,
    staged: Vec<(PathBuf, PathBuf)>,
}

impl PlotlyHtmlRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            staged: Vec::new(),
        }
    }

    pub fn out_dir(&self) -> &PathBuf {
        &self.out_dir
    }
}

impl Renderer for PlotlyHtmlRenderer {
    fn render(
        &mut self,
        view: &SummaryView,
        title: &str,
        granularity: Granularity,
        artifact: &str,
    ) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;

        let figure = plotly::figure(view, title, granularity);
        let html = plotly::html_page(title, &figure)?;

        let dest = self.out_dir.join(artifact);
        let tmp = dest.with_extension("html.tmp");
        fs::write(&tmp, html)?;
        self.staged.push((tmp, dest));
        Ok(())
    }

    fn publish(&mut self) -> Result<Vec<PathBuf>> {
        let mut published = Vec::with_capacity(self.staged.len());
        for (tmp, dest) in self.staged.drain(..) {
            fs::rename(&tmp, &dest)?;
            published.push(dest);
        }
        eprintln!("Published {} chart(s) to {}", published.len(), self.out_dir.display());
        Ok(published)
    }
}

impl Drop for PlotlyHtmlRenderer {
    fn drop(&mut self) {
        // Staged files left behind by an aborted run are discarded.
        for (tmp, _) in self.staged.drain(..) {
            let _ = fs::remove_file(tmp);
        }
    }
}
