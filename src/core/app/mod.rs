use anyhow::Result;
use tracing::info;

use crate::core::config::AppConfig;
use crate::core::models::{CorrectionLevel, LevelChoice};
use crate::encode::select::{required_version, select_optimal_level};
use crate::session::{Event, Outcome, Session};
use crate::utils::terminal::render_preview;

/// One CLI invocation: builds a session, regenerates once from the given
/// input, optionally probes all levels, and runs the requested exports.
pub struct App {
    config: AppConfig,
    text: String,
    choice: LevelChoice,
    export_png: bool,
    export_svg: bool,
    probe: bool,
}

impl App {
    pub fn new(
        config: AppConfig,
        text: String,
        choice: LevelChoice,
        export_png: bool,
        export_svg: bool,
        probe: bool,
    ) -> Self {
        Self {
            config,
            text,
            choice,
            export_png,
            export_svg,
            probe,
        }
    }

    pub fn run(&self) -> Result<()> {
        let mut session = Session::new(self.config.clone());
        session.set_choice(self.choice);

        if self.probe {
            self.print_probe_table()?;
        }

        let outcome = session.dispatch(Event::TextChanged(self.text.clone()))?;
        if let Outcome::Rendered {
            info,
            effective_level,
        } = outcome
        {
            if self.config.ui.preview {
                if let Some(rendered) = session.current() {
                    println!(
                        "{}",
                        render_preview(rendered.encoding.code(), session.prefs().dark_mode)
                    );
                }
            }
            match self.choice {
                LevelChoice::Auto => println!("Level:   auto ({})", effective_level),
                LevelChoice::Fixed(_) => println!("Level:   {}", effective_level),
            }
            println!("Version: {}", info.version);
            println!("Modules: {}", info.modules_label());
        }

        if self.export_png {
            if let Outcome::Exported(path) = session.dispatch(Event::ExportPng)? {
                info!("PNG exported to {}", path.display());
            }
        }
        if self.export_svg {
            if let Outcome::Exported(path) = session.dispatch(Event::ExportSvg)? {
                info!("SVG exported to {}", path.display());
            }
        }

        Ok(())
    }

    fn print_probe_table(&self) -> Result<()> {
        for level in CorrectionLevel::RANKING {
            let version = required_version(&self.text, level)?;
            println!("{}: version {}", level, version);
        }
        let auto = select_optimal_level(&self.text)?;
        println!("auto -> {}", auto);
        Ok(())
    }
}
