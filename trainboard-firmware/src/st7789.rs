//! ST7789 panel driver for the Pico Display 2 (320x240 landscape)
//!
//! Drawing mutates an RGB332 frame buffer in RAM (one byte per pixel; a
//! full 16-bit frame would eat 150KB of the RP2040's 264KB) and `present`
//! converts each row to RGB565 while streaming it over SPI. Text goes
//! through embedded-graphics mono fonts, which also provide the glyph
//! metrics behind `measure_text`.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::spi::{self, Blocking, Instance, Spi};
use embassy_time::Timer;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X9, FONT_9X18};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use trainboard_display::{DisplaySurface, Rgb};

/// Panel width in pixels
pub const WIDTH: usize = 320;
/// Panel height in pixels
pub const HEIGHT: usize = 240;
/// Frame buffer length in bytes (RGB332, one byte per pixel)
pub const FRAME_BYTES: usize = WIDTH * HEIGHT;

/// The panel as wired on the board, concrete for task signatures
pub type BoardPanel = St7789<'static, embassy_rp::peripherals::SPI0>;

/// ST7789 command bytes
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVON: u8 = 0x21;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// Row exchange + row mirror: landscape with the origin at the top left
const MADCTL_LANDSCAPE: u8 = 0x70;

pub struct St7789<'d, T: Instance> {
    spi: Spi<'d, T, Blocking>,
    dc: Output<'d>,
    cs: Output<'d>,
    frame: &'d mut [u8; FRAME_BYTES],
}

impl<'d, T: Instance> St7789<'d, T> {
    pub fn new(
        spi: Spi<'d, T, Blocking>,
        dc: Output<'d>,
        cs: Output<'d>,
        frame: &'d mut [u8; FRAME_BYTES],
    ) -> Self {
        Self { spi, dc, cs, frame }
    }

    /// Reset and configure the panel. Delays follow the ST7789 datasheet.
    pub async fn init(&mut self) -> Result<(), spi::Error> {
        self.command(cmd::SWRESET, &[])?;
        Timer::after_millis(150).await;
        self.command(cmd::SLPOUT, &[])?;
        Timer::after_millis(120).await;
        // 16-bit color over the wire
        self.command(cmd::COLMOD, &[0x55])?;
        self.command(cmd::MADCTL, &[MADCTL_LANDSCAPE])?;
        // This panel is an inverted-by-default IPS module
        self.command(cmd::INVON, &[])?;
        self.command(cmd::NORON, &[])?;
        self.command(cmd::DISPON, &[])?;
        Timer::after_millis(100).await;
        Ok(())
    }

    fn command(&mut self, c: u8, params: &[u8]) -> Result<(), spi::Error> {
        self.cs.set_low();
        self.dc.set_low();
        let result = self.spi.blocking_write(&[c]).and_then(|()| {
            if params.is_empty() {
                Ok(())
            } else {
                self.dc.set_high();
                self.spi.blocking_write(params)
            }
        });
        self.cs.set_high();
        result
    }

    /// Write the full frame buffer to panel RAM, expanding RGB332 to
    /// RGB565 one row at a time.
    fn flush(&mut self) -> Result<(), spi::Error> {
        let x1 = (WIDTH as u16 - 1).to_be_bytes();
        let y1 = (HEIGHT as u16 - 1).to_be_bytes();
        self.command(cmd::CASET, &[0, 0, x1[0], x1[1]])?;
        self.command(cmd::RASET, &[0, 0, y1[0], y1[1]])?;

        self.cs.set_low();
        self.dc.set_low();
        let result = self.spi.blocking_write(&[cmd::RAMWR]).and_then(|()| {
            self.dc.set_high();
            let mut row = [0u8; WIDTH * 2];
            for y in 0..HEIGHT {
                for x in 0..WIDTH {
                    let [hi, lo] = expand_rgb565(self.frame[y * WIDTH + x]);
                    row[2 * x] = hi;
                    row[2 * x + 1] = lo;
                }
                self.spi.blocking_write(&row)?;
            }
            Ok(())
        });
        self.cs.set_high();
        result
    }
}

impl<T: Instance> DisplaySurface for St7789<'_, T> {
    fn size(&self) -> (u16, u16) {
        (WIDTH as u16, HEIGHT as u16)
    }

    fn clear(&mut self, color: Rgb) {
        self.frame.fill(pack_rgb332(color));
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb) {
        let x0 = (x as usize).min(WIDTH);
        let y0 = (y as usize).min(HEIGHT);
        let x1 = (x0 + w as usize).min(WIDTH);
        let y1 = (y0 + h as usize).min(HEIGHT);
        let byte = pack_rgb332(color);
        for row in y0..y1 {
            self.frame[row * WIDTH + x0..row * WIDTH + x1].fill(byte);
        }
    }

    fn hline(&mut self, x0: u16, x1: u16, y: u16, color: Rgb) {
        if (y as usize) >= HEIGHT {
            return;
        }
        let a = (x0.min(x1) as usize).min(WIDTH);
        let b = (x0.max(x1) as usize + 1).min(WIDTH);
        self.frame[y as usize * WIDTH + a..y as usize * WIDTH + b].fill(pack_rgb332(color));
    }

    fn text(&mut self, s: &str, x: u16, y: u16, scale: u8, color: Rgb) {
        let style = MonoTextStyle::new(font_for(scale), rgb565(color));
        let origin = Point::new(x as i32, y as i32);
        let mut target = FrameTarget { frame: self.frame };
        // Infallible target
        let _ = Text::with_baseline(s, origin, style, Baseline::Top).draw(&mut target);
    }

    fn measure_text(&self, s: &str, scale: u8) -> Option<u16> {
        let font = font_for(scale);
        let advance = font.character_size.width + font.character_spacing;
        Some((s.chars().count() as u32 * advance) as u16)
    }

    fn present(&mut self) {
        if self.flush().is_err() {
            warn!("Panel SPI write failed");
        }
    }
}

/// Pick a mono font roughly matching the requested scaled glyph size
fn font_for(scale: u8) -> &'static MonoFont<'static> {
    match scale {
        0 | 1 => &FONT_6X9,
        2 => &FONT_9X18,
        _ => &FONT_10X20,
    }
}

fn rgb565(c: Rgb) -> Rgb565 {
    Rgb565::new(c.r >> 3, c.g >> 2, c.b >> 3)
}

fn pack_rgb332(c: Rgb) -> u8 {
    (c.r & 0xE0) | ((c.g & 0xE0) >> 3) | (c.b >> 6)
}

/// Expand one RGB332 byte to big-endian RGB565, scaling each channel to
/// its full range so white stays white.
fn expand_rgb565(byte: u8) -> [u8; 2] {
    let r3 = (byte >> 5) as u16;
    let g3 = ((byte >> 2) & 0x07) as u16;
    let b2 = (byte & 0x03) as u16;
    let r5 = (r3 * 31 + 3) / 7;
    let g6 = (g3 * 63 + 3) / 7;
    let b5 = (b2 * 31 + 1) / 3;
    ((r5 << 11) | (g6 << 5) | b5).to_be_bytes()
}

/// embedded-graphics draw target over the RGB332 frame buffer, used for
/// glyph rasterization only
struct FrameTarget<'a> {
    frame: &'a mut [u8; FRAME_BYTES],
}

impl OriginDimensions for FrameTarget<'_> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameTarget<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                let byte = ((color.r() >> 2) << 5) | ((color.g() >> 3) << 2) | (color.b() >> 3);
                self.frame[point.y as usize * WIDTH + point.x as usize] = byte;
            }
        }
        Ok(())
    }
}
