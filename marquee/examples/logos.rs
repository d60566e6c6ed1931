//! Scrolling logo strip from image files.
//!
//! Usage: `cargo run --example logos -- path/to/a.png path/to/b.png ...`
//! Without arguments a set of text badges stands in. Hover the strip to
//! ease it to a stop, move away to resume. `q` or `Esc` quits.

use std::fs::File;
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};

use marquee::{Color, Logo, MarqueeOptions, Style, Terminal};

fn main() -> std::io::Result<()> {
    let log_file = File::create("logos.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let logos: Vec<Logo> = std::env::args()
        .skip(1)
        .map(|path| {
            let label = Path::new(&path)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("logo")
                .to_string();
            Logo::image(path, label)
        })
        .collect();

    let logos = if logos.is_empty() {
        vec![
            Logo::text("ACME ROBOTICS"),
            Logo::text("NORTHWIND"),
            Logo::text("GLOBEX"),
            Logo::text("INITECH"),
            Logo::text("UMBRELLA"),
        ]
    } else {
        logos
    };

    let mut marquee = MarqueeOptions::new()
        .logos(logos)
        .speed(14.0)
        .gap(6)
        .item_height(4)
        .style(
            Style::new()
                .background(Color::oklch(0.15, 0.01, 250.0))
                .foreground(Color::oklch(0.9, 0.05, 250.0))
                .bold(),
        )
        .build();

    let mut term = Terminal::new()?;
    marquee::run(&mut term, &mut marquee, 60)
}
