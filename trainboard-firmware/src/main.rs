//! Trainboard - departure board firmware
//!
//! Main firmware binary for a Raspberry Pi Pico driving a Pico Display 2.
//! Shows a rolling window of upcoming departures generated from a table
//! of periodic routes, German station board style.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use trainboard_core::config::default_routes;
use trainboard_display::{render_splash, BOARD_BG, BOARD_FG};

use crate::channels::install_routes;
use crate::st7789::{BoardPanel, St7789, FRAME_BYTES};

mod channels;
mod st7789;
mod tasks;

// Frame buffer and panel must live forever for the render task
static FRAME: StaticCell<[u8; FRAME_BYTES]> = StaticCell::new();
static PANEL: StaticCell<BoardPanel> = StaticCell::new();

/// SPI clock for the ST7789; the controller accepts fast write cycles
const SPI_FREQ_HZ: u32 = 62_500_000;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Trainboard firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Pico Display 2 wiring: SPI0 TX with DC on GP16, CS on GP17
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = SPI_FREQ_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let dc = Output::new(p.PIN_16, Level::Low);
    let cs = Output::new(p.PIN_17, Level::High);

    // Backlight full on; the pin must stay configured after main returns
    let backlight = Output::new(p.PIN_20, Level::High);
    core::mem::forget(backlight);

    let frame = FRAME.init([0; FRAME_BYTES]);
    let panel = PANEL.init(St7789::new(spi, dc, cs, frame));
    if panel.init().await.is_err() {
        error!("Panel init failed");
    }

    render_splash(&mut *panel, BOARD_FG, BOARD_BG);

    // Seed the table so the first frame has content
    install_routes(default_routes());

    spawner.spawn(tasks::clock_task()).unwrap();
    spawner.spawn(tasks::render_task(panel)).unwrap();

    info!("Trainboard ready");
}
