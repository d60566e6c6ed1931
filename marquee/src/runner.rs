use std::io;
use std::time::{Duration, Instant};

use crate::event::{self, Event, Key};
use crate::layout::Rect;
use crate::marquee::Marquee;
use crate::terminal::Terminal;

/// Drive the marquee in a fixed-rate frame loop until it is disposed.
///
/// An interval timer stands in for a per-frame callback; `dt` is always
/// measured from the wall clock inside the integrator, never assumed
/// constant. `q` and `Esc` dispose the marquee and return. Disposal
/// interrupts the loop between frames; no tick runs past it.
pub fn run(terminal: &mut Terminal, marquee: &mut Marquee, fps: u16) -> io::Result<()> {
    let frame = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let mut next_frame = Instant::now() + frame;

    while !marquee.is_disposed() {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        let raw = terminal.poll(Some(timeout))?;
        let events = event::convert(&raw);

        for ev in &events {
            if let Event::Key {
                key: Key::Char('q') | Key::Escape,
                ..
            } = ev
            {
                marquee.dispose();
            }
        }
        marquee.handle_events(&events);
        if marquee.is_disposed() {
            break;
        }

        let now = Instant::now();
        if now >= next_frame {
            next_frame += frame;
            if now >= next_frame {
                // Fell behind; resync rather than burst.
                next_frame = now + frame;
            }

            marquee.layout(strip_area(terminal, marquee));
            marquee.tick(Instant::now());
            terminal.draw(|buf| marquee.render(buf))?;
        }
    }

    Ok(())
}

/// Full-width strip, vertically centered in the terminal.
fn strip_area(terminal: &Terminal, marquee: &Marquee) -> Rect {
    let (width, height) = terminal.size();
    let strip = marquee.preferred_height().min(height.max(1));
    let y = height.saturating_sub(strip) / 2;
    Rect::new(0, y, width, strip)
}
