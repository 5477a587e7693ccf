use std::io::{self, BufWriter};

use clap::Parser;
use crossterm::{cursor, execute, terminal};

use termlife::config::{self, Overrides, Settings, Theme};
use termlife::menu;

#[derive(Parser)]
#[command(name = "termlife", about = "Conway's Game of Life in the terminal")]
struct Cli {
    /// Grid rows
    #[arg(long)]
    height: Option<usize>,

    /// Grid columns
    #[arg(long)]
    width: Option<usize>,

    /// Seconds between generations while running
    #[arg(short, long)]
    tick: Option<f64>,

    /// Colour theme
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Redraw rate (1-120)
    #[arg(short, long)]
    fps: Option<u32>,

    /// Seed for random fill, for reproducible boards
    #[arg(short, long)]
    seed: Option<u64>,

    /// Do not animate the title screen
    #[arg(long)]
    no_title: bool,

    /// Print the config file path and exit
    #[arg(long)]
    show_config: bool,

    /// Print a commented default config file and exit
    #[arg(long)]
    default_config: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            height: self.height,
            width: self.width,
            tick_interval: self.tick,
            theme: self.theme,
            fps: self.fps,
            seed: self.seed,
            no_title: self.no_title,
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.show_config {
        match config::config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("No config directory available on this platform"),
        }
        return Ok(());
    }

    if cli.default_config {
        print!("{}", config::default_config_string());
        return Ok(());
    }

    let file_config = config::load_config();
    let settings = Settings::resolve(&file_config, &cli.overrides())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    log::debug!("starting with {settings:?}");

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let mut writer = BufWriter::with_capacity(64 * 1024, stdout);
    let result = match menu::Shell::new(&mut writer, settings) {
        Ok(mut shell) => shell.run(),
        Err(e) => Err(io::Error::new(io::ErrorKind::InvalidInput, e)),
    };

    // Cleanup
    execute!(writer, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}
