use super::{
    html_escape,
    PanelHandle,
    PanelSink,
    SinkError,
};
use std::{
    io,
    path::{
        Path,
        PathBuf,
    },
};

const LOADING_HTML: &str = "Loading... <br> This may take a few seconds.";
const PROJECT_URL: &str = "https://github.com/dakota1337x/Summoner-Name-Reveal-V2";

/// Overlay panel rendered as a standalone HTML document on disk.
#[derive(Debug)]
pub struct HtmlOverlay {
    path: PathBuf,
    shown: Option<u64>,
}

impl HtmlOverlay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            shown: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, content: &str) -> Result<(), SinkError> {
        let document = document(content);
        let write = || -> io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, document)
        };
        write().map_err(|source| self.error(source))
    }

    fn error(&self, source: io::Error) -> SinkError {
        SinkError::Overlay {
            path: self.path.clone(),
            source,
        }
    }
}

impl PanelSink for HtmlOverlay {
    fn show(&mut self, generation: u64) -> Result<PanelHandle, SinkError> {
        self.write(LOADING_HTML)?;
        self.shown = Some(generation);
        debug!(generation, path = ?self.path, "Overlay shown");
        Ok(PanelHandle::new(generation))
    }

    fn populate(&mut self, handle: &PanelHandle, lines: &[String], links_html: &str) -> Result<(), SinkError> {
        if self.shown != Some(handle.generation()) {
            return Err(SinkError::StaleHandle {
                generation: handle.generation(),
            });
        }

        let lines = lines.iter().map(|line| html_escape(line)).collect::<Vec<_>>().join("<br>");
        self.write(&format!(
            r#"<p style="font-size: 12px">{lines}</p>
      {links_html}
      <p style="font-size: 10px">
        This is a beta overlay. For configuration options, visit
        <a href="{PROJECT_URL}" target="_blank" style="color: gold;">here</a> for more information.
      </p>"#
        ))?;
        debug!(generation = handle.generation(), "Overlay populated");
        Ok(())
    }

    fn hide(&mut self, handle: PanelHandle) -> Result<(), SinkError> {
        if self.shown != Some(handle.generation()) {
            trace!(generation = handle.generation(), "Overlay already replaced");
            return Ok(());
        }
        self.shown = None;

        match std::fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(self.error(err)),
            _ => {
                debug!(generation = handle.generation(), "Overlay hidden");
                Ok(())
            }
        }
    }
}

fn document(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Champion select</title>
  </head>
  <body style="margin: 0; background-color: #1e2328;">
    <div id="infoSidebar" style="width: 282px; min-height: 100%; padding: 20px; border-right: 1px solid #C8A660; color: white; overflow-y: auto; font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;">
      <div id="sidebarContent">{content}</div>
    </div>
  </body>
</html>
"#
    )
}
