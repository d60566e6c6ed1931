//! Text-badge marquee scrolling the opposite way: a negative speed
//! reverses the direction. Hover pause is off, so the strip never stops.

use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};

use marquee::{Color, Logo, MarqueeOptions, Style, Terminal};

fn main() -> std::io::Result<()> {
    let log_file = File::create("badges.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut marquee = MarqueeOptions::new()
        .logos([
            Logo::text("* now shipping *"),
            Logo::text("v0.1.0"),
            Logo::text("* cell-perfect seams *"),
            Logo::text("hover to inspect"),
        ])
        .speed(-10.0)
        .gap(8)
        .item_height(1)
        .pause_on_hover(false)
        .style(
            Style::new()
                .background(Color::oklch(0.2, 0.02, 250.0))
                .foreground(Color::oklch(0.85, 0.1, 160.0)),
        )
        .build();

    let mut term = Terminal::new()?;
    marquee::run(&mut term, &mut marquee, 30)
}
