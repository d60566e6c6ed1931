use crate::buffer::{Buffer, Cell};
use crate::layout::Rect;
use crate::logo::LogoArt;
use crate::marquee::Marquee;
use crate::text::char_width;
use crate::types::{Rgb, Style, TextStyle};

/// Draw the marquee strip into the buffer.
///
/// The whole track is translated by `-offset`; every slot whose span
/// intersects the container is drawn, clipped at the container edges.
pub(crate) fn draw(marquee: &Marquee, buf: &mut Buffer) {
    let area = marquee.area();
    if area.is_empty() {
        return;
    }

    let style = &marquee.options().style;
    let strip_bg = style.background.map(|color| color.to_rgb());
    if let Some(bg) = strip_bg {
        fill_rect(buf, area, bg);
    }

    let track = marquee.track();
    let sequence_width = track.sequence_width();
    if sequence_width == 0 {
        return;
    }

    // Positive speed scrolls leftward: translate by -offset.
    let offset = marquee.offset().round() as i32;
    let base = i32::from(area.x) - offset;
    let bg = strip_bg.unwrap_or_default();

    for (index, replica) in track.replicas().iter().enumerate() {
        let origin = base + index as i32 * i32::from(sequence_width);
        for slot in &replica.slots {
            let left = origin + i32::from(slot.x);
            if left + i32::from(slot.width) <= i32::from(area.left())
                || left >= i32::from(area.right())
            {
                continue;
            }

            let (Some(logo), Some(status)) = (
                marquee.logos().get(slot.item),
                marquee.statuses().get(slot.item),
            ) else {
                continue;
            };

            match status.art() {
                Some(art) => draw_art(buf, area, art, left, bg),
                None => draw_label(buf, area, &logo.label, left, style, bg),
            }
        }
    }
}

fn fill_rect(buf: &mut Buffer, rect: Rect, bg: Rgb) {
    for y in rect.y..rect.bottom().min(buf.height()) {
        for x in rect.x..rect.right().min(buf.width()) {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.bg = bg;
            }
        }
    }
}

/// Half-block art: the upper pixel is the `▀` foreground, the lower its
/// background. Transparent pixels keep the strip background.
fn draw_art(buf: &mut Buffer, area: Rect, art: &LogoArt, left: i32, strip_bg: Rgb) {
    let height = art.height().min(area.height);
    let top = area.y + (area.height - height) / 2;

    for row in 0..height {
        let y = top + row;
        for col in 0..art.width() {
            let x = left + i32::from(col);
            if x < i32::from(area.left()) || x >= i32::from(area.right()) {
                continue;
            }
            let cell = match art.pixel(col, row) {
                (None, None) => continue,
                (Some(upper), Some(lower)) => Cell::new('▀').with_fg(upper).with_bg(lower),
                (Some(upper), None) => Cell::new('▀').with_fg(upper).with_bg(strip_bg),
                (None, Some(lower)) => Cell::new('▄').with_fg(lower).with_bg(strip_bg),
            };
            buf.set(x as u16, y, cell);
        }
    }
}

/// Label fallback, vertically centered, clipped at the container edges.
/// Wide characters occupy two columns with a continuation cell and are
/// dropped entirely when only partially visible.
fn draw_label(buf: &mut Buffer, area: Rect, label: &str, left: i32, style: &Style, strip_bg: Rgb) {
    let y = area.y + (area.height.saturating_sub(1)) / 2;
    let fg = style
        .foreground
        .map(|color| color.to_rgb())
        .unwrap_or(Rgb::new(255, 255, 255));

    let mut x = left;
    for ch in label.chars() {
        let width = char_width(ch).max(1) as i32;
        if x + width > i32::from(area.right()) {
            break;
        }
        if x >= i32::from(area.left()) {
            buf.set(
                x as u16,
                y,
                Cell::new(ch)
                    .with_fg(fg)
                    .with_bg(strip_bg)
                    .with_style(style.text_style),
            );
            if width == 2 {
                buf.set(
                    x as u16 + 1,
                    y,
                    Cell {
                        char: ' ',
                        fg,
                        bg: strip_bg,
                        style: TextStyle::new(),
                        wide_continuation: true,
                    },
                );
            }
        }
        x += width;
    }
}
