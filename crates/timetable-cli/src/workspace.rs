//! Shared state for commands: data directory, config, catalog, plan book.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use timetable_core::storage::data_dir;
use timetable_core::{Catalog, Config, PlanBook};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub struct Workspace {
    pub dir: PathBuf,
    pub config: Config,
}

impl Workspace {
    pub fn open(dir: Option<PathBuf>) -> CliResult<Self> {
        let dir = match dir {
            Some(dir) => {
                std::fs::create_dir_all(&dir)?;
                dir
            }
            None => data_dir()?,
        };
        let config = Config::load_from(&dir)?;
        tracing::debug!(dir = %dir.display(), "workspace opened");
        Ok(Self { dir, config })
    }

    pub fn catalog(&self) -> CliResult<Catalog> {
        let path = self.config.catalog_path(&self.dir);
        Catalog::load(&path)
            .map_err(|e| format!("cannot load catalog {}: {e}", path.display()).into())
    }

    pub fn plans(&self) -> CliResult<PlanBook> {
        Ok(PlanBook::load_from(&self.dir)?)
    }

    pub fn save_plans(&self, book: &PlanBook) -> CliResult {
        book.save_to(&self.dir)?;
        Ok(())
    }
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
pub fn confirm(prompt: &str) -> CliResult<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// `10.33` -> `"10:20"`.
pub fn fmt_hour(hour: f64) -> String {
    let minutes = (hour * 60.0).round() as u32;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// `1` -> `"Mon"`.
pub fn fmt_day(day: u8) -> String {
    timetable_core::catalog::weekday(day)
        .map(|d| d.to_string())
        .unwrap_or_else(|| format!("day {day}"))
}
